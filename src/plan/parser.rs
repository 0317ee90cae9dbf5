//! Extraction of a weekly meal plan from the plain text of a diet document.
//!
//! The text is split on `Día <N>` markers. Inside each day the five meal
//! headings are located in canonical order and each heading's content runs
//! until the next stop-set hit: any meal heading or day marker.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::journal::model::{MealCategory, MealRecord};

pub const MAX_DAY_INDEX: u8 = 7;
pub const RECIPE_PLACEHOLDER: &str = "Ver detalles en el PDF original";
pub const INGREDIENTS_PLACEHOLDER: &str = "Ver receta completa";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanParseError {
    #[error("invalid plan input: {0}")]
    InvalidInput(String),
    #[error("no day markers (\"Día N\") found in the plan text")]
    NoDaysFound,
    #[error("no meals could be extracted from the plan text")]
    NoMealsExtracted,
}

/// Meals of one plan day, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDay {
    pub day_index: u8,
    pub meals: Vec<MealRecord>,
}

lazy_static! {
    static ref DAY_MARKER: Regex = Regex::new(r"(?i)\bdía\s+(\d+)").unwrap();
    static ref STOP_SET: Regex = Regex::new(
        r"(?i)\b(?:desayuno|media\s+mañana|comida|merienda|cena|día\s+\d+)\b"
    )
    .unwrap();
    static ref HEADINGS: Vec<(MealCategory, Regex)> = MealCategory::ALL
        .iter()
        .map(|&c| (c, heading_regex(c)))
        .collect();
}

fn heading_regex(category: MealCategory) -> Regex {
    let words: Vec<String> = category
        .label()
        .split_whitespace()
        .map(regex::escape)
        .collect();
    Regex::new(&format!(r"(?i)\b{}\s+", words.join(r"\s+"))).unwrap()
}

pub fn parse_diet_text(text: &str) -> Result<Vec<ParsedDay>, PlanParseError> {
    let markers: Vec<(usize, Option<u8>)> = DAY_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index = caps.get(1)?.as_str().parse::<u8>().ok();
            Some((whole.start(), index))
        })
        .collect();

    debug!(markers = markers.len(), "day markers located");
    if markers.is_empty() {
        return Err(PlanParseError::NoDaysFound);
    }

    let mut days = Vec::new();
    for (i, &(start, index)) in markers.iter().enumerate() {
        let Some(day_index) = index.filter(|n| (1..=MAX_DAY_INDEX).contains(n)) else {
            debug!(offset = start, "skipping day marker outside 1..=7");
            continue;
        };
        let end = markers.get(i + 1).map_or(text.len(), |&(next, _)| next);

        let meals = extract_meals(&text[start..end], day_index);
        debug!(day_index, meals = meals.len(), "day parsed");
        if !meals.is_empty() {
            days.push(ParsedDay { day_index, meals });
        }
    }

    if days.is_empty() {
        return Err(PlanParseError::NoMealsExtracted);
    }
    Ok(days)
}

fn extract_meals(span: &str, day_index: u8) -> Vec<MealRecord> {
    HEADINGS
        .iter()
        .filter_map(|(category, heading)| {
            // a label word can also appear inside an earlier recipe; take the
            // first occurrence that is followed by content
            heading.find_iter(span).find_map(|m| {
                let content_end = STOP_SET
                    .find_at(span, m.end())
                    .map_or(span.len(), |stop| stop.start());
                meal_from_content(*category, day_index, span[m.end()..content_end].trim())
            })
        })
        .collect()
}

fn meal_from_content(category: MealCategory, day_index: u8, content: &str) -> Option<MealRecord> {
    let name = content.lines().map(str::trim).find(|l| !l.is_empty())?;
    let recipe = content.replacen(name, "", 1).trim().to_string();

    Some(MealRecord {
        id: Uuid::new_v4(),
        day_index,
        time: category.default_time().to_string(),
        category,
        name: name.to_string(),
        ingredients: INGREDIENTS_PLACEHOLDER.to_string(),
        recipe: if recipe.is_empty() {
            RECIPE_PLACEHOLDER.to_string()
        } else {
            recipe
        },
        notes: None,
        completed: false,
    })
}
