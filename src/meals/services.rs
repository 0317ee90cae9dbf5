use tracing::info;
use uuid::Uuid;

use crate::dates::DateKey;
use crate::journal::model::{DailySummary, MealRecord, UserData};
use crate::journal::JournalError;
use crate::summary::evaluator::refresh_day;

fn find_meal(data: &mut UserData, date: DateKey, meal_id: Uuid) -> Result<&mut MealRecord, JournalError> {
    data.meals
        .get_mut(&date)
        .and_then(|meals| meals.iter_mut().find(|m| m.id == meal_id))
        .ok_or(JournalError::NotFound("meal"))
}

/// Flip a meal's completion flag and re-evaluate its date.
pub fn toggle_meal(
    data: &mut UserData,
    date: DateKey,
    meal_id: Uuid,
) -> Result<(MealRecord, DailySummary), JournalError> {
    let meal = find_meal(data, date, meal_id)?;
    meal.completed = !meal.completed;
    let meal = meal.clone();

    let summary = refresh_day(data, date);
    info!(%date, %meal_id, completed = meal.completed, "meal toggled");
    Ok((meal, summary))
}

pub fn rename_meal(
    data: &mut UserData,
    date: DateKey,
    meal_id: Uuid,
    name: &str,
) -> Result<MealRecord, JournalError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(JournalError::Invalid("meal name must not be empty".into()));
    }
    let meal = find_meal(data, date, meal_id)?;
    meal.name = name.to_string();
    Ok(meal.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::model::{DayColor, MealCategory};
    use time::macros::date;

    fn seeded() -> (UserData, DateKey, Uuid, Uuid) {
        let day = DateKey::new(date!(2026 - 10 - 14));
        let meal = |category: MealCategory| MealRecord {
            id: Uuid::new_v4(),
            day_index: 3,
            time: category.default_time().into(),
            category,
            name: category.label().into(),
            ingredients: String::new(),
            recipe: String::new(),
            notes: None,
            completed: false,
        };
        let meals = vec![meal(MealCategory::Breakfast), meal(MealCategory::Dinner)];
        let (a, b) = (meals[0].id, meals[1].id);
        let mut data = UserData::default();
        data.meals.insert(day, meals);
        (data, day, a, b)
    }

    #[test]
    fn toggling_every_meal_turns_the_day_green() {
        let (mut data, day, a, b) = seeded();

        let (meal, summary) = toggle_meal(&mut data, day, a).unwrap();
        assert!(meal.completed);
        assert_eq!(summary.color, DayColor::Red);

        let (_, summary) = toggle_meal(&mut data, day, b).unwrap();
        assert_eq!(summary.color, DayColor::Green);
        assert_eq!(data.stats.current_streak, 1);

        let (meal, summary) = toggle_meal(&mut data, day, b).unwrap();
        assert!(!meal.completed);
        assert_eq!(summary.color, DayColor::Red);
        assert_eq!(data.stats.current_streak, 0);
        assert_eq!(data.stats.total_completed_days, 0);
        assert_eq!(data.stats.best_streak, 1);
    }

    #[test]
    fn unknown_meal_is_not_found() {
        let (mut data, day, _, _) = seeded();
        let err = toggle_meal(&mut data, day, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, JournalError::NotFound("meal")));

        let other_day = day.offset_days(1).unwrap();
        let (_, _, a, _) = seeded();
        assert!(toggle_meal(&mut data, other_day, a).is_err());
    }

    #[test]
    fn rename_trims_and_rejects_blank() {
        let (mut data, day, a, _) = seeded();
        let meal = rename_meal(&mut data, day, a, "  Gachas de avena ").unwrap();
        assert_eq!(meal.name, "Gachas de avena");
        assert_eq!(data.meals_on(day)[0].name, "Gachas de avena");
        assert!(matches!(
            rename_meal(&mut data, day, a, "   "),
            Err(JournalError::Invalid(_))
        ));
    }
}
