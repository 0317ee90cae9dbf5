use std::collections::BTreeMap;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::parser::{parse_diet_text, ParsedDay, PlanParseError, MAX_DAY_INDEX};
use crate::config::PlanConfig;
use crate::dates::DateKey;
use crate::journal::model::{DietPlan, MealRecord, UserData};

/// Plan day (1-7) that falls on `date` for a plan starting on `start`.
pub fn diet_day_number(start: DateKey, date: DateKey) -> u8 {
    let cycle = i64::from(MAX_DAY_INDEX);
    (date.days_since(start).rem_euclid(cycle) + 1) as u8
}

/// Validate and parse uploaded plan text.
pub fn parse_plan_text(text: &str, cfg: &PlanConfig) -> Result<Vec<ParsedDay>, PlanParseError> {
    if text.trim().is_empty() {
        return Err(PlanParseError::InvalidInput("plan text is empty".into()));
    }
    if text.len() > cfg.max_text_bytes {
        return Err(PlanParseError::InvalidInput(format!(
            "plan text exceeds {} bytes",
            cfg.max_text_bytes
        )));
    }
    parse_diet_text(text)
}

/// Calendar meals for `horizon_days` dates from `start`, cycling plan days
/// 1..=7. Each date gets its own copies with fresh ids, all pending.
pub fn expand_plan(
    start: DateKey,
    by_day: &BTreeMap<u8, Vec<MealRecord>>,
    horizon_days: u32,
) -> BTreeMap<DateKey, Vec<MealRecord>> {
    (0..i64::from(horizon_days))
        .filter_map(|offset| start.offset_days(offset))
        .map(|date| {
            let meals = by_day
                .get(&diet_day_number(start, date))
                .map(|meals| {
                    meals
                        .iter()
                        .map(|m| MealRecord {
                            id: Uuid::new_v4(),
                            completed: false,
                            ..m.clone()
                        })
                        .collect()
                })
                .unwrap_or_default();
            (date, meals)
        })
        .collect()
}

/// Replace the user's plan and calendar meals. Summaries and stats are left
/// alone; dates are re-evaluated as the user checks meals off.
pub fn install_plan(
    data: &mut UserData,
    start: DateKey,
    days: Vec<ParsedDay>,
    horizon_days: u32,
) -> DietPlan {
    let mut by_day: BTreeMap<u8, Vec<MealRecord>> = BTreeMap::new();
    for day in days {
        // a repeated day marker replaces the earlier block
        by_day.insert(day.day_index, day.meals);
    }

    let plan = DietPlan {
        id: Uuid::new_v4(),
        start_date: start,
        meals: by_day,
        created_at: OffsetDateTime::now_utc(),
    };
    data.meals = expand_plan(start, &plan.meals, horizon_days);
    data.diet_plan = Some(plan.clone());

    info!(
        plan_id = %plan.id,
        start = %start,
        plan_days = plan.meals.len(),
        dates = data.meals.len(),
        "diet plan installed"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::model::MealCategory;
    use time::macros::date;

    fn start() -> DateKey {
        DateKey::new(date!(2026 - 10 - 05))
    }

    fn week_text() -> String {
        (1..=7)
            .map(|n| format!("Día {n} Desayuno Avena {n} Comida Arroz {n} Cena Sopa {n} "))
            .collect()
    }

    #[test]
    fn day_numbers_cycle_from_start() {
        let s = start();
        assert_eq!(diet_day_number(s, s), 1);
        assert_eq!(diet_day_number(s, s.offset_days(6).unwrap()), 7);
        assert_eq!(diet_day_number(s, s.offset_days(7).unwrap()), 1);
        assert_eq!(diet_day_number(s, s.offset_days(-1).unwrap()), 7);
    }

    #[test]
    fn rejects_blank_and_oversized_text() {
        let cfg = PlanConfig {
            horizon_days: 14,
            max_text_bytes: 16,
        };
        assert!(matches!(
            parse_plan_text("   \n", &cfg),
            Err(PlanParseError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_plan_text("Día 1 Desayuno Avena con miel", &cfg),
            Err(PlanParseError::InvalidInput(_))
        ));
    }

    #[test]
    fn install_expands_plan_onto_calendar() {
        let days = parse_plan_text(&week_text(), &PlanConfig::default()).unwrap();
        let mut data = UserData::default();
        let plan = install_plan(&mut data, start(), days, 14);

        assert_eq!(plan.meals.len(), 7);
        assert_eq!(data.meals.len(), 14);
        assert_eq!(data.diet_plan.as_ref().map(|p| p.id), Some(plan.id));

        let first = data.meals_on(start());
        let again = data.meals_on(start().offset_days(7).unwrap());
        assert_eq!(first[0].name, "Avena 1");
        assert_eq!(again[0].name, "Avena 1");
        assert_ne!(first[0].id, again[0].id);
        assert_ne!(first[0].id, plan.meals[&1][0].id);
        assert_eq!(first[2].category, MealCategory::Dinner);

        let day3 = data.meals_on(start().offset_days(2).unwrap());
        assert_eq!(day3[1].name, "Arroz 3");
    }

    #[test]
    fn install_replaces_previous_meals() {
        let mut data = UserData::default();
        let days = parse_plan_text(&week_text(), &PlanConfig::default()).unwrap();
        install_plan(&mut data, start(), days, 60);
        data.meals.values_mut().flatten().for_each(|m| m.completed = true);

        let later = start().offset_days(30).unwrap();
        let days = parse_plan_text("Día 1 Desayuno Huevos", &PlanConfig::default()).unwrap();
        install_plan(&mut data, later, days, 7);

        assert_eq!(data.meals.len(), 7);
        assert!(data.meals_on(start()).is_empty());
        assert_eq!(data.meals_on(later).len(), 1);
        assert!(!data.meals_on(later)[0].completed);
        // plan days without meals still get an (empty) calendar entry
        assert!(data.meals_on(later.offset_days(1).unwrap()).is_empty());
    }
}
