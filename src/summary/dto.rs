use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{DateKey, MonthKey};
use crate::journal::model::{
    DailySummary, GymSession, MealRecord, OtherSportRecord, Stats,
};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: MonthKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledEntry {
    pub workout_id: Uuid,
    /// Empty when the workout was deleted after scheduling.
    pub name: String,
    pub time: String,
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct DayDetails {
    pub date: DateKey,
    /// Position of the date in the weekly diet cycle, if a plan covers it.
    pub diet_day: Option<u8>,
    pub meals: Vec<MealRecord>,
    pub scheduled: Vec<ScheduledEntry>,
    pub gym_sessions: Vec<GymSession>,
    pub other_sports: Vec<OtherSportRecord>,
    pub summary: DailySummary,
}

#[derive(Debug, Serialize)]
pub struct MonthCalendar {
    pub month: MonthKey,
    pub days: Vec<DailySummary>,
}

#[derive(Debug, Serialize)]
pub struct PartnerOverview {
    pub user_id: Uuid,
    pub stats: Stats,
    pub calendar: MonthCalendar,
}
