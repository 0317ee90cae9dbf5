use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::DateKey;

/// Upload of a plan whose text was already extracted from the PDF.
#[derive(Debug, Deserialize)]
pub struct InstallPlanRequest {
    pub text: String,
    pub start_date: DateKey,
}

#[derive(Debug, Serialize)]
pub struct PlanDayCount {
    pub day_index: u8,
    pub meals: usize,
}

#[derive(Debug, Serialize)]
pub struct InstalledPlanResponse {
    pub id: Uuid,
    pub start_date: DateKey,
    pub days: Vec<PlanDayCount>,
    pub total_meals: usize,
    pub dates_filled: usize,
}
