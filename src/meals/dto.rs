use serde::{Deserialize, Serialize};

use crate::journal::model::{DailySummary, MealRecord, Stats};

#[derive(Debug, Deserialize)]
pub struct RenameMealRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MealToggledResponse {
    pub meal: MealRecord,
    pub summary: DailySummary,
    pub stats: Stats,
}
