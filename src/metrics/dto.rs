use serde::{Deserialize, Serialize};

use crate::dates::DateKey;
use crate::journal::model::{Appointment, Measurements};

#[derive(Debug, Deserialize)]
pub struct WeightInput {
    pub date: DateKey,
    pub value: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MeasurementInput {
    pub date: DateKey,
    #[serde(flatten)]
    pub values: Measurements,
}

/// `date: null` clears the pending appointment.
#[derive(Debug, Deserialize)]
pub struct NextAppointmentRequest {
    pub date: Option<DateKey>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentInput {
    pub date: DateKey,
    pub weight: f64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct NutritionistView {
    pub next_appointment: Option<DateKey>,
    /// Days from today to the next appointment; negative once it has passed.
    pub days_until: Option<i64>,
    pub appointments: Vec<Appointment>,
}
