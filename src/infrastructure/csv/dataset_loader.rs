// ============================================================
// EXERCISE DATASET LOADER
// ============================================================
// Turn the exercise CSV into a typed, immutable ExerciseTable

use std::path::Path;

use tracing::{error, info, warn};

use super::csv_parser::{CsvParser, RawTable};
use crate::domain::error::{AppError, Result};
use crate::domain::exercise::{ExerciseRow, ExerciseTable};

const REQUIRED_COLUMNS: [&str; 8] = [
    "workout_type",
    "fitness_level",
    "day_index",
    "order",
    "exercise_name",
    "sets",
    "reps",
    "duration_sec",
];

pub struct DatasetLoader {
    parser: CsvParser,
}

impl DatasetLoader {
    pub fn new(delimiter: Option<u8>) -> Self {
        Self {
            parser: CsvParser::new().with_delimiter(delimiter),
        }
    }

    /// Load the dataset, degrading to an empty table on any failure.
    ///
    /// The failure is logged here and never reaches the caller; an empty
    /// table makes every later lookup report the dataset as unavailable.
    pub fn load(&self, path: &Path) -> ExerciseTable {
        match self.try_load(path) {
            Ok(table) => table,
            Err(err) => {
                error!(error = %err, path = %path.display(), "Failed loading exercises CSV");
                ExerciseTable::empty()
            }
        }
    }

    pub fn try_load(&self, path: &Path) -> Result<ExerciseTable> {
        let raw = self
            .parser
            .parse_file(path)
            .map_err(|err| AppError::DatasetUnavailable(err.to_string()))?;

        let table = build_table(&raw);
        let unknown_levels = table
            .rows()
            .iter()
            .filter(|row| !row.has_known_fitness_level())
            .count();
        if unknown_levels > 0 {
            warn!(rows = unknown_levels, "Rows with unrecognised fitness_level");
        }

        info!(
            path = %path.display(),
            rows = table.len(),
            delimiter = %char::from(raw.delimiter).escape_default(),
            "Loaded exercises CSV"
        );
        Ok(table)
    }
}

/// Map an untyped table onto ExerciseRow, defaulting absent columns.
pub fn build_table(raw: &RawTable) -> ExerciseTable {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| raw.column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        warn!(columns = ?missing, "Exercise dataset is missing columns");
    }

    let workout_type = raw.column_index("workout_type");
    let fitness_level = raw.column_index("fitness_level");
    let day_index = raw.column_index("day_index");
    let order = raw.column_index("order");
    let exercise_name = raw.column_index("exercise_name");
    let sets = raw.column_index("sets");
    let reps = raw.column_index("reps");
    let duration_sec = raw.column_index("duration_sec");

    raw.records
        .iter()
        .map(|record| ExerciseRow {
            workout_type: cell(record, workout_type).to_string(),
            fitness_level: cell(record, fitness_level).to_string(),
            day_index: coerce_integer(cell(record, day_index)),
            order: coerce_integer(cell(record, order)),
            exercise_name: cell(record, exercise_name).to_string(),
            sets: coerce_count(cell(record, sets)),
            reps: coerce_count(cell(record, reps)),
            duration_sec: coerce_count(cell(record, duration_sec)),
        })
        .collect()
}

fn cell(record: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|idx| record.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

/// Integer value of a cell; floats truncate toward zero, anything else is 0.
pub fn coerce_integer(value: &str) -> i64 {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return parsed;
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed.trunc() as i64,
        _ => 0,
    }
}

/// Like `coerce_integer`, clamped into the non-negative `u32` range.
pub fn coerce_count(value: &str) -> u32 {
    coerce_integer(value).clamp(0, i64::from(u32::MAX)) as u32
}
