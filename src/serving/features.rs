//! Typed feature vector for the cancellation model and form validation

use std::collections::HashMap;

use thiserror::Error;

/// Number of features the model expects
pub const FEATURE_COUNT: usize = 10;

/// Column order of the model's feature matrix
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "lead_time",
    "no_of_special_request",
    "avg_price_per_room",
    "arrival_month",
    "arrival_date",
    "market_segment_type",
    "no_of_week_nights",
    "no_of_weekend_nights",
    "type_of_meal_plan",
    "room_type_reserved",
];

/// One row of the model's feature matrix
pub type FeatureRow = [f64; FEATURE_COUNT];

/// A user-submitted form value that could not be used
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormInputError {
    #[error("missing field '{field}'")]
    Missing { field: &'static str },

    #[error("field '{field}' expects {expected}, got '{value}'")]
    Invalid {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl FormInputError {
    pub fn field(&self) -> &'static str {
        match self {
            FormInputError::Missing { field } | FormInputError::Invalid { field, .. } => *field,
        }
    }
}

/// Validated booking features
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFeatures {
    pub lead_time: i64,
    pub no_of_special_request: i64,
    pub avg_price_per_room: f64,
    pub arrival_month: i64,
    pub arrival_date: i64,
    pub market_segment_type: i64,
    pub no_of_week_nights: i64,
    pub no_of_weekend_nights: i64,
    pub type_of_meal_plan: i64,
    pub room_type_reserved: i64,
}

fn raw_field<'a>(
    form: &'a HashMap<String, String>,
    field: &'static str,
) -> Result<&'a str, FormInputError> {
    form.get(field)
        .map(|v| v.trim())
        .ok_or(FormInputError::Missing { field })
}

fn int_field(form: &HashMap<String, String>, field: &'static str) -> Result<i64, FormInputError> {
    let raw = raw_field(form, field)?;
    raw.parse().map_err(|_| FormInputError::Invalid {
        field,
        value: raw.to_string(),
        expected: "an integer",
    })
}

fn float_field(form: &HashMap<String, String>, field: &'static str) -> Result<f64, FormInputError> {
    let raw = raw_field(form, field)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormInputError::Invalid {
            field,
            value: raw.to_string(),
            expected: "a number",
        }),
    }
}

impl BookingFeatures {
    /// Parse and validate the ten form fields
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, FormInputError> {
        Ok(Self {
            lead_time: int_field(form, "lead_time")?,
            no_of_special_request: int_field(form, "no_of_special_request")?,
            avg_price_per_room: float_field(form, "avg_price_per_room")?,
            arrival_month: int_field(form, "arrival_month")?,
            arrival_date: int_field(form, "arrival_date")?,
            market_segment_type: int_field(form, "market_segment_type")?,
            no_of_week_nights: int_field(form, "no_of_week_nights")?,
            no_of_weekend_nights: int_field(form, "no_of_weekend_nights")?,
            type_of_meal_plan: int_field(form, "type_of_meal_plan")?,
            room_type_reserved: int_field(form, "room_type_reserved")?,
        })
    }

    /// Features laid out in `FEATURE_ORDER`
    pub fn to_row(&self) -> FeatureRow {
        [
            self.lead_time as f64,
            self.no_of_special_request as f64,
            self.avg_price_per_room,
            self.arrival_month as f64,
            self.arrival_date as f64,
            self.market_segment_type as f64,
            self.no_of_week_nights as f64,
            self.no_of_weekend_nights as f64,
            self.type_of_meal_plan as f64,
            self.room_type_reserved as f64,
        ]
    }
}
