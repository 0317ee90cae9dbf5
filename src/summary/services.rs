use crate::dates::{DateKey, MonthKey};
use crate::journal::model::{DailySummary, UserData};
use crate::plan::services::diet_day_number;

use super::dto::{DayDetails, MonthCalendar, ScheduledEntry};
use super::evaluator::evaluate_day;

/// Everything logged on `date`, with a fresh verdict.
pub fn day_details(data: &UserData, date: DateKey) -> DayDetails {
    let gym_sessions: Vec<_> = data
        .gym_sessions
        .iter()
        .filter(|s| s.date == date)
        .cloned()
        .collect();
    let other_sports: Vec<_> = data
        .other_sports
        .iter()
        .filter(|r| r.date == date)
        .cloned()
        .collect();

    let scheduled = data
        .scheduled_on(date)
        .iter()
        .map(|s| ScheduledEntry {
            workout_id: s.workout_id,
            name: data
                .workout(s.workout_id)
                .map(|w| w.name.clone())
                .unwrap_or_default(),
            time: s.time.clone(),
            done: gym_sessions
                .iter()
                .any(|g| g.workout_id == s.workout_id && g.completed)
                || other_sports.iter().any(|o| o.workout_id == s.workout_id),
        })
        .collect();

    let diet_day = data
        .diet_plan
        .as_ref()
        .filter(|p| date >= p.start_date)
        .map(|p| diet_day_number(p.start_date, date));

    DayDetails {
        date,
        diet_day,
        meals: data.meals_on(date).to_vec(),
        scheduled,
        gym_sessions,
        other_sports,
        summary: evaluate_day(data, date),
    }
}

/// Stored verdicts for every date of `month`; dates never evaluated are white.
pub fn month_calendar(data: &UserData, month: MonthKey) -> MonthCalendar {
    let days = month
        .dates()
        .into_iter()
        .map(|date| {
            data.daily_summary
                .get(&date)
                .copied()
                .unwrap_or_else(|| DailySummary::empty(date))
        })
        .collect();
    MonthCalendar { month, days }
}
