use serde::{Deserialize, Serialize};

use super::exercise::ExerciseRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuery {
    pub workout_type: String,
    pub fitness_level: String,
    pub day_index: i64,
}

impl PlanQuery {
    pub fn new(workout_type: impl Into<String>, fitness_level: impl Into<String>, day_index: i64) -> Self {
        Self {
            workout_type: workout_type.into(),
            fitness_level: fitness_level.into(),
            day_index,
        }
    }
}

/// An exercise reduced to its name plus whichever of sets, reps and duration
/// are non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub exercise_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,
}

fn non_zero(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

impl From<&ExerciseRow> for PlanEntry {
    fn from(row: &ExerciseRow) -> Self {
        Self {
            exercise_name: row.exercise_name.clone(),
            sets: non_zero(row.sets),
            reps: non_zero(row.reps),
            duration_sec: non_zero(row.duration_sec),
        }
    }
}

/// Response body for a successful lookup. `fitness_level` always echoes the
/// level the caller asked for, even when the rows came from the Beginner
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub workout_type: String,
    pub fitness_level: String,
    pub day_index: i64,
    pub plan: Vec<PlanEntry>,
}
