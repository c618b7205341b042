use serde::{Deserialize, Serialize};

pub const BEGINNER: &str = "Beginner";

pub const KNOWN_FITNESS_LEVELS: [&str; 3] = [BEGINNER, "Intermediate", "Advanced"];

/// One row of the exercise dataset, typed at load time.
///
/// Numeric columns that were absent or unparseable in the source file are
/// already defaulted to 0 here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExerciseRow {
    pub workout_type: String,
    pub fitness_level: String,
    pub day_index: i64,
    pub order: i64,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub duration_sec: u32,
}

impl ExerciseRow {
    pub fn matches(&self, workout_type: &str, fitness_level: &str, day_index: i64) -> bool {
        self.workout_type == workout_type
            && self.fitness_level == fitness_level
            && self.day_index == day_index
    }

    pub fn has_known_fitness_level(&self) -> bool {
        KNOWN_FITNESS_LEVELS.contains(&self.fitness_level.as_str())
    }
}

/// The immutable, load-ordered exercise dataset shared by every request.
#[derive(Debug, Clone, Default)]
pub struct ExerciseTable {
    rows: Vec<ExerciseRow>,
}

impl ExerciseTable {
    pub fn new(rows: Vec<ExerciseRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[ExerciseRow] {
        &self.rows
    }

    /// Rows matching all three columns, ordered by `order`.
    ///
    /// `sort_by_key` is stable, so ties keep their load order.
    pub fn select(&self, workout_type: &str, fitness_level: &str, day_index: i64) -> Vec<&ExerciseRow> {
        let mut matches: Vec<&ExerciseRow> = self
            .rows
            .iter()
            .filter(|row| row.matches(workout_type, fitness_level, day_index))
            .collect();
        matches.sort_by_key(|row| row.order);
        matches
    }
}

impl FromIterator<ExerciseRow> for ExerciseTable {
    fn from_iter<I: IntoIterator<Item = ExerciseRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: &str, day: i64, order: i64, name: &str) -> ExerciseRow {
        ExerciseRow {
            workout_type: "cardio".to_string(),
            fitness_level: level.to_string(),
            day_index: day,
            order,
            exercise_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_filters_on_all_three_columns() {
        let table: ExerciseTable = vec![
            row("Beginner", 1, 1, "march"),
            row("Beginner", 2, 1, "skip"),
            row("Advanced", 1, 1, "sprint"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = table
            .select("cardio", "Beginner", 1)
            .iter()
            .map(|r| r.exercise_name.as_str())
            .collect();
        assert_eq!(names, vec!["march"]);
        assert!(table.select("strength", "Beginner", 1).is_empty());
    }

    #[test]
    fn test_select_orders_by_order_and_keeps_ties_stable() {
        let table = ExerciseTable::new(vec![
            row("Beginner", 1, 3, "cooldown"),
            row("Beginner", 1, 1, "warmup-a"),
            row("Beginner", 1, 2, "main"),
            row("Beginner", 1, 1, "warmup-b"),
        ]);

        let names: Vec<_> = table
            .select("cardio", "Beginner", 1)
            .iter()
            .map(|r| r.exercise_name.as_str())
            .collect();
        assert_eq!(names, vec!["warmup-a", "warmup-b", "main", "cooldown"]);
    }

    #[test]
    fn test_select_is_case_sensitive() {
        let table = ExerciseTable::new(vec![row("Beginner", 1, 1, "march")]);
        assert!(table.select("cardio", "beginner", 1).is_empty());
        assert!(table.select("Cardio", "Beginner", 1).is_empty());
    }

    #[test]
    fn test_known_fitness_levels() {
        assert!(row("Intermediate", 1, 1, "x").has_known_fitness_level());
        assert!(!row("Expert", 1, 1, "x").has_known_fitness_level());
    }
}
