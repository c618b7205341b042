use crate::domain::error::{AppError, Result};
use crate::domain::exercise::{ExerciseTable, BEGINNER};
use crate::domain::plan::{DayPlan, PlanEntry, PlanQuery};
use std::sync::Arc;

pub struct PlanLookupUseCase {
    table: Arc<ExerciseTable>,
}

impl PlanLookupUseCase {
    pub fn new(table: Arc<ExerciseTable>) -> Self {
        Self { table }
    }

    /// False when the dataset failed to load or held no rows.
    pub fn is_available(&self) -> bool {
        !self.table.is_empty()
    }

    /// Returns `Ok(None)` when nothing matches, including after the Beginner
    /// fallback.
    pub fn execute(&self, query: &PlanQuery) -> Result<Option<DayPlan>> {
        if self.table.is_empty() {
            return Err(AppError::DatasetUnavailable(
                "exercise table is empty".to_string(),
            ));
        }

        let mut matches =
            self.table
                .select(&query.workout_type, &query.fitness_level, query.day_index);

        // Only one step down: every other level falls straight back to Beginner.
        if matches.is_empty() && query.fitness_level != BEGINNER {
            matches = self
                .table
                .select(&query.workout_type, BEGINNER, query.day_index);
            if !matches.is_empty() {
                tracing::debug!(
                    workout_type = %query.workout_type,
                    requested_level = %query.fitness_level,
                    day_index = query.day_index,
                    "No rows for requested level, using Beginner plan"
                );
            }
        }

        if matches.is_empty() {
            tracing::debug!(
                workout_type = %query.workout_type,
                fitness_level = %query.fitness_level,
                day_index = query.day_index,
                "No exercises found"
            );
            return Ok(None);
        }

        let plan: Vec<PlanEntry> = matches.into_iter().map(PlanEntry::from).collect();
        tracing::debug!(exercises = plan.len(), "Plan resolved");

        Ok(Some(DayPlan {
            workout_type: query.workout_type.clone(),
            fitness_level: query.fitness_level.clone(),
            day_index: query.day_index,
            plan,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exercise::ExerciseRow;

    fn row(workout: &str, level: &str, day: i64, order: i64, name: &str) -> ExerciseRow {
        ExerciseRow {
            workout_type: workout.to_string(),
            fitness_level: level.to_string(),
            day_index: day,
            order,
            exercise_name: name.to_string(),
            sets: 3,
            reps: 10,
            duration_sec: 0,
        }
    }

    fn use_case(rows: Vec<ExerciseRow>) -> PlanLookupUseCase {
        PlanLookupUseCase::new(Arc::new(ExerciseTable::new(rows)))
    }

    fn names(plan: &DayPlan) -> Vec<&str> {
        plan.plan.iter().map(|e| e.exercise_name.as_str()).collect()
    }

    #[test]
    fn test_empty_table_is_unavailable() {
        let lookup = use_case(Vec::new());
        assert!(!lookup.is_available());
        let result = lookup.execute(&PlanQuery::new("cardio", "Beginner", 1));
        assert!(matches!(result, Err(AppError::DatasetUnavailable(_))));
    }

    #[test]
    fn test_exact_match_sorted_by_order() {
        let lookup = use_case(vec![
            row("cardio", "Intermediate", 2, 2, "intervals"),
            row("cardio", "Intermediate", 2, 1, "jog"),
            row("cardio", "Beginner", 2, 1, "walk"),
        ]);

        let plan = lookup
            .execute(&PlanQuery::new("cardio", "Intermediate", 2))
            .unwrap()
            .unwrap();
        assert_eq!(names(&plan), vec!["jog", "intervals"]);
        assert_eq!(plan.fitness_level, "Intermediate");
        assert_eq!(plan.day_index, 2);
    }

    #[test]
    fn test_advanced_falls_back_to_beginner_and_echoes_request() {
        let lookup = use_case(vec![
            row("cardio", "Beginner", 3, 2, "walk"),
            row("cardio", "Beginner", 3, 1, "stretch"),
            row("cardio", "Intermediate", 3, 1, "jog"),
        ]);

        let plan = lookup
            .execute(&PlanQuery::new("cardio", "Advanced", 3))
            .unwrap()
            .unwrap();
        // Intermediate rows exist but are never consulted.
        assert_eq!(names(&plan), vec!["stretch", "walk"]);
        assert_eq!(plan.fitness_level, "Advanced");
        assert_eq!(plan.workout_type, "cardio");
    }

    #[test]
    fn test_fallback_keeps_workout_type_and_day() {
        let lookup = use_case(vec![
            row("strength", "Beginner", 3, 1, "squat"),
            row("cardio", "Beginner", 4, 1, "walk"),
        ]);

        let result = lookup
            .execute(&PlanQuery::new("cardio", "Advanced", 3))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_beginner_without_rows_is_not_found() {
        let lookup = use_case(vec![row("cardio", "Advanced", 1, 1, "sprint")]);
        let result = lookup
            .execute(&PlanQuery::new("cardio", "Beginner", 1))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unknown_workout_is_not_found() {
        let lookup = use_case(vec![row("cardio", "Beginner", 1, 1, "walk")]);
        let result = lookup
            .execute(&PlanQuery::new("nonexistent", "Beginner", 1))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unrecognised_level_also_falls_back() {
        let lookup = use_case(vec![row("cardio", "Beginner", 1, 1, "walk")]);
        let plan = lookup
            .execute(&PlanQuery::new("cardio", "Expert", 1))
            .unwrap()
            .unwrap();
        assert_eq!(names(&plan), vec!["walk"]);
        assert_eq!(plan.fitness_level, "Expert");
    }
}
