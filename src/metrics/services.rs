use tracing::info;

use super::dto::{AppointmentInput, MeasurementInput, NutritionistView, WeightInput};
use crate::dates::DateKey;
use crate::journal::model::{
    Appointment, MeasurementRecord, Measurements, Nutritionist, UserData, WeightRecord,
};
use crate::journal::JournalError;

fn check_positive(field: &str, value: f64) -> Result<(), JournalError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JournalError::Invalid(format!("{field} must be a positive number")))
    }
}

/// Insert or replace the weight logged on a date. Records stay sorted by date.
pub fn upsert_weight(data: &mut UserData, input: WeightInput) -> Result<WeightRecord, JournalError> {
    check_positive("weight", input.value)?;
    let record = WeightRecord {
        date: input.date,
        value: input.value,
        notes: input.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
    };
    match data.weight.binary_search_by_key(&record.date, |r| r.date) {
        Ok(i) => data.weight[i] = record.clone(),
        Err(i) => data.weight.insert(i, record.clone()),
    }
    info!(date = %record.date, value = record.value, "weight recorded");
    Ok(record)
}

pub fn upsert_measurements(
    data: &mut UserData,
    input: MeasurementInput,
) -> Result<MeasurementRecord, JournalError> {
    let Measurements { waist, hips, arms, legs, chest } = &input.values;
    let fields = [("waist", waist), ("hips", hips), ("arms", arms), ("legs", legs), ("chest", chest)];
    if fields.iter().all(|(_, v)| v.is_none()) {
        return Err(JournalError::Invalid("at least one measurement is required".into()));
    }
    for (name, value) in fields {
        if let Some(v) = value {
            check_positive(name, *v)?;
        }
    }

    let record = MeasurementRecord {
        date: input.date,
        values: input.values,
    };
    match data.measurements.binary_search_by_key(&record.date, |r| r.date) {
        Ok(i) => data.measurements[i] = record.clone(),
        Err(i) => data.measurements.insert(i, record.clone()),
    }
    info!(date = %record.date, "measurements recorded");
    Ok(record)
}

pub fn set_next_appointment(data: &mut UserData, date: Option<DateKey>) -> Option<DateKey> {
    data.nutritionist.next_appointment = date;
    info!(next = ?date, "next nutritionist appointment set");
    date
}

/// Log a visit, replacing any visit already logged that day. A pending
/// appointment on that date is considered attended and cleared.
pub fn record_appointment(
    data: &mut UserData,
    input: AppointmentInput,
) -> Result<Appointment, JournalError> {
    check_positive("weight", input.weight)?;
    let appointment = Appointment {
        date: input.date,
        weight: input.weight,
        feedback: input.feedback.trim().to_string(),
    };

    let visits = &mut data.nutritionist.appointments;
    match visits.binary_search_by_key(&appointment.date, |a| a.date) {
        Ok(i) => visits[i] = appointment.clone(),
        Err(i) => visits.insert(i, appointment.clone()),
    }
    if data.nutritionist.next_appointment == Some(appointment.date) {
        data.nutritionist.next_appointment = None;
    }
    info!(date = %appointment.date, "nutritionist appointment recorded");
    Ok(appointment)
}

pub fn nutritionist_view(nutritionist: &Nutritionist, today: DateKey) -> NutritionistView {
    NutritionistView {
        next_appointment: nutritionist.next_appointment,
        days_until: nutritionist.next_appointment.map(|d| d.days_since(today)),
        appointments: nutritionist.appointments.clone(),
    }
}
