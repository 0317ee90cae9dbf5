//! Daily completion verdicts and the streak counters they feed.
//!
//! Streaks move forward only: a newly completed date extends the current
//! streak, and a completed date that regresses resets it to zero. Nothing is
//! recomputed from history, so back-filling old dates out of order can leave
//! `current_streak` different from the trailing run of green days.

use std::collections::HashSet;

use tracing::debug;

use crate::dates::DateKey;
use crate::journal::model::{DailySummary, DayColor, Stats, UserData};

/// Verdict for `date` from the meals, schedule and training recorded on it.
pub fn evaluate_day(data: &UserData, date: DateKey) -> DailySummary {
    let meals = data.meals_on(date);
    let scheduled = data.scheduled_on(date);

    if meals.is_empty() && scheduled.is_empty() {
        return DailySummary::empty(date);
    }

    // a date with no meals cannot be completed by training alone
    let all_meals_completed = !meals.is_empty() && meals.iter().all(|m| m.completed);

    let scheduled_ids: HashSet<_> = scheduled.iter().map(|s| s.workout_id).collect();
    let gym_done = data
        .gym_sessions
        .iter()
        .filter(|s| s.date == date && s.completed && scheduled_ids.contains(&s.workout_id))
        .count();
    let other_done = data
        .other_sports
        .iter()
        .filter(|r| r.date == date && scheduled_ids.contains(&r.workout_id))
        .count();
    let all_workouts_completed = scheduled.is_empty() || scheduled.len() == gym_done + other_done;

    let completed = all_meals_completed && all_workouts_completed;
    DailySummary {
        date,
        completed,
        color: if completed {
            DayColor::Green
        } else {
            DayColor::Red
        },
    }
}

/// Fold one date's transition into the running counters.
pub fn apply_transition(stats: &mut Stats, was_completed: bool, now: &DailySummary) {
    if now.color == DayColor::White {
        return;
    }
    match (was_completed, now.completed) {
        (false, true) => {
            stats.total_completed_days += 1;
            stats.current_streak += 1;
            stats.best_streak = stats.best_streak.max(stats.current_streak);
        }
        (true, false) => {
            stats.total_completed_days = stats.total_completed_days.saturating_sub(1);
            stats.current_streak = 0;
        }
        _ => {}
    }
}

/// Re-evaluate `date`, store its summary and update the user's stats.
pub fn refresh_day(data: &mut UserData, date: DateKey) -> DailySummary {
    let summary = evaluate_day(data, date);
    let was_completed = data
        .daily_summary
        .get(&date)
        .is_some_and(|s| s.completed);

    apply_transition(&mut data.stats, was_completed, &summary);
    data.daily_summary.insert(date, summary);

    debug!(
        date = %date,
        completed = summary.completed,
        color = ?summary.color,
        streak = data.stats.current_streak,
        "day re-evaluated"
    );
    summary
}
