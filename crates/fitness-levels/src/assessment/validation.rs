use serde_json::{Map, Value};

use super::domain::{ExerciseResults, PushupVariant, Submission};

/// Result fields in the order they are checked.
pub const REQUIRED_RESULT_FIELDS: [&str; 5] = [
    "max_push_ups",
    "max_squats",
    "max_reverse_snow_angels_45s",
    "plank_max_time_seconds",
    "mountain_climbers_45s",
];

const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;
const I64_BOUND: f64 = -9_223_372_036_854_775_808.0;

/// First rule a submission body violated. Every message names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    BodyNotObject,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("user_id must be a non-empty string")]
    InvalidUserId,
    #[error("results must be an object")]
    ResultsNotObject,
    #[error("pushups_type must be a string")]
    PushupsTypeNotString,
    #[error("pushups_type must be one of: wall, incline, knee, classic")]
    UnknownPushupsType,
    #[error("Missing required result field: {0}")]
    MissingResultField(&'static str),
    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),
    #[error("{0} must be non-negative")]
    Negative(&'static str),
}

impl ValidationError {
    /// Name of the field the violation concerns, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::BodyNotObject => None,
            ValidationError::InvalidUserId => Some("user_id"),
            ValidationError::ResultsNotObject => Some("results"),
            ValidationError::PushupsTypeNotString | ValidationError::UnknownPushupsType => {
                Some("pushups_type")
            }
            ValidationError::MissingField(field)
            | ValidationError::MissingResultField(field)
            | ValidationError::NotAnInteger(field)
            | ValidationError::Negative(field) => Some(field),
        }
    }
}

/// Validates a decoded request body and builds the typed submission.
///
/// Checks stop at the first violation: top-level fields, then `pushups_type`, then each result
/// field in [`REQUIRED_RESULT_FIELDS`] order.
pub fn validate(body: &Value) -> Result<Submission, ValidationError> {
    let body = body.as_object().ok_or(ValidationError::BodyNotObject)?;

    let user_id = body
        .get("user_id")
        .ok_or(ValidationError::MissingField("user_id"))?;
    let results = body
        .get("results")
        .ok_or(ValidationError::MissingField("results"))?;

    let user_id = match user_id.as_str() {
        Some(raw) if !raw.trim().is_empty() => raw.to_string(),
        _ => return Err(ValidationError::InvalidUserId),
    };

    let results = results
        .as_object()
        .ok_or(ValidationError::ResultsNotObject)?;

    let pushups_type = body
        .get("pushups_type")
        .ok_or(ValidationError::MissingField("pushups_type"))?
        .as_str()
        .ok_or(ValidationError::PushupsTypeNotString)?
        .parse::<PushupVariant>()
        .map_err(|_| ValidationError::UnknownPushupsType)?;

    let [push_ups, squats, snow_angels, plank, climbers] = REQUIRED_RESULT_FIELDS;
    let results = ExerciseResults {
        max_push_ups: result_value(results, push_ups)?,
        max_squats: result_value(results, squats)?,
        max_reverse_snow_angels_45s: result_value(results, snow_angels)?,
        plank_max_time_seconds: result_value(results, plank)?,
        mountain_climbers_45s: result_value(results, climbers)?,
    };

    Ok(Submission {
        user_id,
        pushups_type,
        results,
    })
}

fn result_value(results: &Map<String, Value>, field: &'static str) -> Result<u32, ValidationError> {
    let value = results
        .get(field)
        .ok_or(ValidationError::MissingResultField(field))?;

    let Value::Number(number) = value else {
        return Err(ValidationError::NotAnInteger(field));
    };

    if let Some(unsigned) = number.as_u64() {
        return Ok(u32::try_from(unsigned).unwrap_or(u32::MAX));
    }

    if number.as_i64().is_some() {
        return Err(ValidationError::Negative(field));
    }

    // Integer literals beyond the 64-bit range are decoded as whole-valued floats.
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float >= U64_BOUND => Ok(u32::MAX),
        Some(float) if float.fract() == 0.0 && float < I64_BOUND => {
            Err(ValidationError::Negative(field))
        }
        _ => Err(ValidationError::NotAnInteger(field)),
    }
}
