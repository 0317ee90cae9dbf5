use std::collections::BTreeSet;

use tracing::info;
use uuid::Uuid;

use super::dto::{GymSessionRequest, OtherSportRequest, WorkoutInput};
use crate::dates::{parse_clock_time, DateKey};
use crate::journal::model::{
    DailySummary, Exercise, GymSession, OtherSportRecord, ScheduledWorkout, UserData,
    WorkoutDefinition, WorkoutKind,
};
use crate::journal::JournalError;
use crate::summary::evaluator::refresh_day;

fn validated_name(raw: &str) -> Result<String, JournalError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(JournalError::Invalid("workout name must not be empty".into()));
    }
    Ok(name.to_string())
}

fn workout_of_kind(
    data: &UserData,
    id: Uuid,
    kind: WorkoutKind,
) -> Result<&WorkoutDefinition, JournalError> {
    let workout = data.workout(id).ok_or(JournalError::NotFound("workout"))?;
    if workout.kind != kind {
        return Err(JournalError::Invalid(format!(
            "workout {} is not a {:?} workout",
            id, kind
        )));
    }
    Ok(workout)
}

pub fn create_workout(data: &mut UserData, input: WorkoutInput) -> Result<WorkoutDefinition, JournalError> {
    let workout = WorkoutDefinition {
        id: Uuid::new_v4(),
        name: validated_name(&input.name)?,
        kind: input.kind,
        muscle_group: input.muscle_group.filter(|g| !g.trim().is_empty()),
        exercises: input.exercises.into_iter().map(|e| e.into_exercise()).collect(),
        last_session: None,
    };
    data.workouts.push(workout.clone());
    info!(workout_id = %workout.id, name = %workout.name, "workout created");
    Ok(workout)
}

/// Edit a routine in place. Sessions keep their own exercise snapshots, and
/// the kind is fixed once anything was logged against the workout.
pub fn update_workout(
    data: &mut UserData,
    id: Uuid,
    input: WorkoutInput,
) -> Result<WorkoutDefinition, JournalError> {
    let name = validated_name(&input.name)?;
    let current = data.workout(id).ok_or(JournalError::NotFound("workout"))?;
    let has_history = data.gym_sessions.iter().any(|s| s.workout_id == id)
        || data.other_sports.iter().any(|r| r.workout_id == id);
    if current.kind != input.kind && has_history {
        return Err(JournalError::Invalid(format!(
            "workout {} already has logged sessions; its kind cannot change",
            id
        )));
    }

    let workout = data
        .workouts
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or(JournalError::NotFound("workout"))?;
    workout.name = name;
    workout.kind = input.kind;
    workout.muscle_group = input.muscle_group.filter(|g| !g.trim().is_empty());
    workout.exercises = input.exercises.into_iter().map(|e| e.into_exercise()).collect();
    Ok(workout.clone())
}

/// Remove a workout with its schedule entries, sessions and other-sport
/// records, then re-evaluate every date they touched.
pub fn delete_workout(data: &mut UserData, id: Uuid) -> Result<Vec<DailySummary>, JournalError> {
    let before = data.workouts.len();
    data.workouts.retain(|w| w.id != id);
    if data.workouts.len() == before {
        return Err(JournalError::NotFound("workout"));
    }

    let mut touched = BTreeSet::new();
    for (date, entries) in data.scheduled_workouts.iter_mut() {
        let n = entries.len();
        entries.retain(|s| s.workout_id != id);
        if entries.len() != n {
            touched.insert(*date);
        }
    }
    data.scheduled_workouts.retain(|_, entries| !entries.is_empty());

    touched.extend(data.gym_sessions.iter().filter(|s| s.workout_id == id).map(|s| s.date));
    data.gym_sessions.retain(|s| s.workout_id != id);
    touched.extend(data.other_sports.iter().filter(|r| r.workout_id == id).map(|r| r.date));
    data.other_sports.retain(|r| r.workout_id != id);

    info!(workout_id = %id, dates = touched.len(), "workout deleted");
    Ok(touched.into_iter().map(|date| refresh_day(data, date)).collect())
}

pub fn schedule_workout(
    data: &mut UserData,
    date: DateKey,
    workout_id: Uuid,
    time: &str,
) -> Result<(ScheduledWorkout, DailySummary), JournalError> {
    data.workout(workout_id).ok_or(JournalError::NotFound("workout"))?;
    let time = parse_clock_time(time)
        .ok_or_else(|| JournalError::Invalid(format!("invalid time {time:?}, expected HH:MM")))?;

    let entry = ScheduledWorkout { workout_id, time };
    data.scheduled_workouts
        .entry(date)
        .or_default()
        .push(entry.clone());

    let summary = refresh_day(data, date);
    info!(%date, %workout_id, time = %entry.time, "workout scheduled");
    Ok((entry, summary))
}

/// Drop one schedule entry of `workout_id` on `date`.
pub fn unschedule_workout(
    data: &mut UserData,
    date: DateKey,
    workout_id: Uuid,
) -> Result<DailySummary, JournalError> {
    let entries = data
        .scheduled_workouts
        .get_mut(&date)
        .ok_or(JournalError::NotFound("scheduled workout"))?;
    let pos = entries
        .iter()
        .position(|s| s.workout_id == workout_id)
        .ok_or(JournalError::NotFound("scheduled workout"))?;
    entries.remove(pos);
    if entries.is_empty() {
        data.scheduled_workouts.remove(&date);
    }
    Ok(refresh_day(data, date))
}

fn pending_snapshot(exercises: &[Exercise]) -> Vec<Exercise> {
    exercises
        .iter()
        .map(|e| Exercise {
            id: Uuid::new_v4(),
            name: e.name.clone(),
            series: e
                .series
                .iter()
                .cloned()
                .map(|mut s| {
                    s.completed = false;
                    s
                })
                .collect(),
        })
        .collect()
}

/// Record a gym session. It counts as completed only when every series of
/// its snapshot was completed.
pub fn record_gym_session(
    data: &mut UserData,
    req: GymSessionRequest,
) -> Result<(GymSession, DailySummary), JournalError> {
    let workout = workout_of_kind(data, req.workout_id, WorkoutKind::Gym)?;
    let exercises = if req.exercises.is_empty() {
        pending_snapshot(&workout.exercises)
    } else {
        req.exercises.into_iter().map(|e| e.into_exercise()).collect()
    };
    let completed = exercises
        .iter()
        .flat_map(|e| e.series.iter())
        .all(|s| s.completed);

    let session = GymSession {
        id: Uuid::new_v4(),
        workout_id: req.workout_id,
        date: req.date,
        muscle_group: workout.muscle_group.clone(),
        exercises,
        completed,
    };

    if let Some(w) = data.workouts.iter_mut().find(|w| w.id == req.workout_id) {
        w.last_session = Some(w.last_session.map_or(req.date, |d| d.max(req.date)));
    }
    data.gym_sessions.push(session.clone());

    let summary = refresh_day(data, req.date);
    info!(session_id = %session.id, date = %req.date, completed, "gym session recorded");
    Ok((session, summary))
}

pub fn record_other_sport(
    data: &mut UserData,
    req: OtherSportRequest,
) -> Result<(OtherSportRecord, DailySummary), JournalError> {
    workout_of_kind(data, req.workout_id, WorkoutKind::Other)?;

    let record = OtherSportRecord {
        id: Uuid::new_v4(),
        workout_id: req.workout_id,
        date: req.date,
        goals: req.goals.trim().to_string(),
        achievements: req.achievements.trim().to_string(),
        notes: req.notes.trim().to_string(),
    };
    data.other_sports.push(record.clone());

    let summary = refresh_day(data, req.date);
    info!(record_id = %record.id, date = %req.date, "other sport recorded");
    Ok((record, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::model::{DayColor, MealCategory, MealRecord};
    use crate::training::dto::{ExerciseInput, SeriesInput};
    use time::macros::date;

    fn day() -> DateKey {
        DateKey::new(date!(2026 - 10 - 15))
    }

    fn squat_day() -> WorkoutInput {
        WorkoutInput {
            name: "Pierna".into(),
            kind: WorkoutKind::Gym,
            muscle_group: Some("piernas".into()),
            exercises: vec![ExerciseInput {
                name: "Sentadilla".into(),
                series: vec![
                    SeriesInput { reps: 10, weight: 60.0, completed: false },
                    SeriesInput { reps: 8, weight: 70.0, completed: false },
                ],
            }],
        }
    }

    fn done_meal(data: &mut UserData, date: DateKey) {
        data.meals.entry(date).or_default().push(MealRecord {
            id: Uuid::new_v4(),
            day_index: 1,
            time: "14:00".into(),
            category: MealCategory::Lunch,
            name: "Arroz".into(),
            ingredients: String::new(),
            recipe: String::new(),
            notes: None,
            completed: true,
        });
    }

    fn session_req(workout_id: Uuid, all_done: bool) -> GymSessionRequest {
        GymSessionRequest {
            workout_id,
            date: day(),
            exercises: vec![ExerciseInput {
                name: "Sentadilla".into(),
                series: vec![
                    SeriesInput { reps: 10, weight: 60.0, completed: true },
                    SeriesInput { reps: 8, weight: 72.5, completed: all_done },
                ],
            }],
        }
    }

    #[test]
    fn scheduled_gym_session_completes_the_day() {
        let mut data = UserData::default();
        done_meal(&mut data, day());
        let w = create_workout(&mut data, squat_day()).unwrap();

        let (entry, summary) = schedule_workout(&mut data, day(), w.id, "19:00").unwrap();
        assert_eq!(entry.time, "19:00");
        assert_eq!(summary.color, DayColor::Red);

        let (session, summary) = record_gym_session(&mut data, session_req(w.id, false)).unwrap();
        assert!(!session.completed);
        assert_eq!(summary.color, DayColor::Red);

        let (session, summary) = record_gym_session(&mut data, session_req(w.id, true)).unwrap();
        assert!(session.completed);
        assert_eq!(session.muscle_group.as_deref(), Some("piernas"));
        assert_eq!(summary.color, DayColor::Green);
        assert_eq!(data.stats.total_completed_days, 1);
        assert_eq!(data.workout(w.id).unwrap().last_session, Some(day()));
    }

    #[test]
    fn session_without_exercises_snapshots_routine_as_pending() {
        let mut data = UserData::default();
        let w = create_workout(&mut data, squat_day()).unwrap();
        let req = GymSessionRequest {
            workout_id: w.id,
            date: day(),
            exercises: vec![],
        };
        let (session, _) = record_gym_session(&mut data, req).unwrap();
        assert_eq!(session.exercises.len(), 1);
        assert_eq!(session.exercises[0].series.len(), 2);
        assert_ne!(session.exercises[0].id, w.exercises[0].id);
        assert!(!session.completed);
    }

    #[test]
    fn kind_mismatch_and_unknown_workouts_are_rejected() {
        let mut data = UserData::default();
        let gym = create_workout(&mut data, squat_day()).unwrap();
        let req = OtherSportRequest {
            workout_id: gym.id,
            date: day(),
            goals: String::new(),
            achievements: String::new(),
            notes: String::new(),
        };
        assert!(matches!(
            record_other_sport(&mut data, req),
            Err(JournalError::Invalid(_))
        ));
        assert!(matches!(
            schedule_workout(&mut data, day(), Uuid::new_v4(), "10:00"),
            Err(JournalError::NotFound("workout"))
        ));
        assert!(matches!(
            schedule_workout(&mut data, day(), gym.id, "tarde"),
            Err(JournalError::Invalid(_))
        ));
        assert!(data.scheduled_workouts.is_empty());
    }

    #[test]
    fn unscheduling_restores_meal_only_verdict() {
        let mut data = UserData::default();
        done_meal(&mut data, day());
        let w = create_workout(&mut data, squat_day()).unwrap();
        schedule_workout(&mut data, day(), w.id, "7:30").unwrap();

        let summary = unschedule_workout(&mut data, day(), w.id).unwrap();
        assert_eq!(summary.color, DayColor::Green);
        assert!(data.scheduled_on(day()).is_empty());
        assert!(matches!(
            unschedule_workout(&mut data, day(), w.id),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn deleting_a_workout_reevaluates_its_dates() {
        let mut data = UserData::default();
        let w = create_workout(&mut data, squat_day()).unwrap();
        let next = day().offset_days(1).unwrap();
        done_meal(&mut data, next);
        schedule_workout(&mut data, day(), w.id, "19:00").unwrap();
        schedule_workout(&mut data, next, w.id, "19:00").unwrap();
        record_gym_session(&mut data, session_req(w.id, true)).unwrap();
        // no meals on the first date, so its session alone cannot complete it
        assert_eq!(data.daily_summary[&day()].color, DayColor::Red);
        assert_eq!(data.daily_summary[&next].color, DayColor::Red);

        let summaries = delete_workout(&mut data, w.id).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(data.daily_summary[&day()].color, DayColor::White);
        assert_eq!(data.daily_summary[&next].color, DayColor::Green);
        assert!(data.gym_sessions.is_empty());
        assert!(data.scheduled_workouts.is_empty());
        assert!(matches!(
            delete_workout(&mut data, w.id),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn update_replaces_routine_but_not_sessions() {
        let mut data = UserData::default();
        let w = create_workout(&mut data, squat_day()).unwrap();
        record_gym_session(&mut data, session_req(w.id, true)).unwrap();

        let mut input = squat_day();
        input.name = "Pierna y glúteo".into();
        input.exercises.clear();
        let updated = update_workout(&mut data, w.id, input).unwrap();
        assert_eq!(updated.name, "Pierna y glúteo");
        assert!(updated.exercises.is_empty());
        assert_eq!(data.gym_sessions[0].exercises.len(), 1);
    }

    #[test]
    fn kind_is_locked_once_sessions_exist() {
        let mut data = UserData::default();
        let w = create_workout(&mut data, squat_day()).unwrap();

        // no history yet: switching kind is allowed
        let mut input = squat_day();
        input.kind = WorkoutKind::Other;
        update_workout(&mut data, w.id, input).unwrap();
        let mut input = squat_day();
        input.kind = WorkoutKind::Gym;
        update_workout(&mut data, w.id, input).unwrap();

        record_gym_session(&mut data, session_req(w.id, true)).unwrap();
        let mut input = squat_day();
        input.kind = WorkoutKind::Other;
        assert!(matches!(
            update_workout(&mut data, w.id, input),
            Err(JournalError::Invalid(_))
        ));
        assert_eq!(data.workout(w.id).unwrap().kind, WorkoutKind::Gym);
    }
}
