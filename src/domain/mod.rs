pub mod error;
pub mod exercise;
pub mod plan;
