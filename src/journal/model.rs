use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::dates::DateKey;

/// The five fixed meal slots of a plan day, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    Breakfast,
    MidMorning,
    Lunch,
    Snack,
    Dinner,
}

impl MealCategory {
    pub const ALL: [MealCategory; 5] = [
        MealCategory::Breakfast,
        MealCategory::MidMorning,
        MealCategory::Lunch,
        MealCategory::Snack,
        MealCategory::Dinner,
    ];

    /// Heading used for this slot in the nutritionist's documents.
    pub fn label(self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Desayuno",
            MealCategory::MidMorning => "Media mañana",
            MealCategory::Lunch => "Comida",
            MealCategory::Snack => "Merienda",
            MealCategory::Dinner => "Cena",
        }
    }

    pub fn default_time(self) -> &'static str {
        match self {
            MealCategory::Breakfast => "08:00",
            MealCategory::MidMorning => "11:00",
            MealCategory::Lunch => "14:00",
            MealCategory::Snack => "17:00",
            MealCategory::Dinner => "21:00",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub day_index: u8,
    pub time: String,
    pub category: MealCategory,
    pub name: String,
    pub ingredients: String,
    pub recipe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlan {
    pub id: Uuid,
    pub start_date: DateKey,
    /// day index (1-7) -> meals of that plan day
    pub meals: BTreeMap<u8, Vec<MealRecord>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Gym,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    pub id: Uuid,
    pub name: String,
    pub kind: WorkoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session: Option<DateKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymSession {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub date: DateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    pub exercises: Vec<Exercise>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherSportRecord {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub date: DateKey,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub workout_id: Uuid,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayColor {
    Green,
    Red,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: DateKey,
    pub completed: bool,
    pub color: DayColor,
}

impl DailySummary {
    /// Verdict for a date nothing was scheduled on.
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            completed: false,
            color: DayColor::White,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_completed_days: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: DateKey,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub legs: Option<f64>,
    pub chest: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: DateKey,
    #[serde(flatten)]
    pub values: Measurements,
}

/// A past visit to the nutritionist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub date: DateKey,
    pub weight: f64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutritionist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateKey>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// Everything one user has logged. Loaded, mutated and saved as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub diet_plan: Option<DietPlan>,
    #[serde(default)]
    pub meals: BTreeMap<DateKey, Vec<MealRecord>>,
    #[serde(default)]
    pub workouts: Vec<WorkoutDefinition>,
    #[serde(default)]
    pub gym_sessions: Vec<GymSession>,
    #[serde(default)]
    pub other_sports: Vec<OtherSportRecord>,
    #[serde(default)]
    pub scheduled_workouts: BTreeMap<DateKey, Vec<ScheduledWorkout>>,
    #[serde(default)]
    pub weight: Vec<WeightRecord>,
    #[serde(default)]
    pub measurements: Vec<MeasurementRecord>,
    #[serde(default)]
    pub nutritionist: Nutritionist,
    #[serde(default)]
    pub daily_summary: BTreeMap<DateKey, DailySummary>,
    #[serde(default)]
    pub stats: Stats,
}

impl UserData {
    pub fn workout(&self, id: Uuid) -> Option<&WorkoutDefinition> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn meals_on(&self, date: DateKey) -> &[MealRecord] {
        self.meals.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn scheduled_on(&self, date: DateKey) -> &[ScheduledWorkout] {
        self.scheduled_workouts
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
