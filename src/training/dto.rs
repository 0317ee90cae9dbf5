use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::DateKey;
use crate::journal::model::{DailySummary, Exercise, Series, Stats, WorkoutKind};

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesInput {
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    #[serde(default)]
    pub series: Vec<SeriesInput>,
}

impl ExerciseInput {
    pub fn into_exercise(self) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            series: self
                .series
                .into_iter()
                .map(|s| Series {
                    reps: s.reps,
                    weight: s.weight,
                    completed: s.completed,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutInput {
    pub name: String,
    pub kind: WorkoutKind,
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub date: DateKey,
    pub workout_id: Uuid,
    pub time: String,
}

/// A gym session; when `exercises` is empty the routine is snapshotted with
/// every series pending.
#[derive(Debug, Clone, Deserialize)]
pub struct GymSessionRequest {
    pub workout_id: Uuid,
    pub date: DateKey,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtherSportRequest {
    pub workout_id: Uuid,
    pub date: DateKey,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct TrainingFilter {
    pub date: Option<DateKey>,
    pub workout_id: Option<Uuid>,
}

/// Result of a change that re-evaluated one date.
#[derive(Debug, Serialize)]
pub struct DayEffect<T> {
    #[serde(flatten)]
    pub record: T,
    pub summary: DailySummary,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct WorkoutDeleted {
    pub id: Uuid,
    pub summaries: Vec<DailySummary>,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct DayRefreshed {
    pub summary: DailySummary,
    pub stats: Stats,
}
