// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited-file parsing and the exercise dataset loader

mod csv_parser;
mod dataset_loader;

pub use csv_parser::{CsvParser, RawTable};
pub use dataset_loader::DatasetLoader;
