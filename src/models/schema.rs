//! Boundary schema checks for inbound JSON payloads
//!
//! A payload type lists its fields in [`PayloadSchema::FIELDS`]. Validation
//! walks the raw JSON object, reports every offending field at once, and
//! applies lax integer coercion (`"2017"` becomes `2017`) before handing the
//! normalized object to serde.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const FIELD_REQUIRED: &str = "Field required";
pub const EXPECTED_STRING: &str = "Input should be a valid string";
pub const EXPECTED_INTEGER: &str = "Input should be a valid integer";
pub const UNPARSABLE_INTEGER: &str =
    "Input should be a valid integer, unable to parse string as an integer";
pub const FRACTIONAL_INTEGER: &str =
    "Input should be a valid integer, got a number with a fractional part";
pub const INTEGER_OUT_OF_RANGE: &str = "Input should be a valid integer, value out of range";
pub const EXPECTED_OBJECT: &str = "Input should be a valid object";

/// Name of the pseudo-field used for errors that concern the whole body
pub const BODY_FIELD: &str = "body";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Stored as a 32-bit signed integer
    Integer,
}

impl FieldKind {
    /// Check `value` against this kind, normalizing it in place when coercion applies.
    pub fn coerce(&self, value: &mut Value) -> Result<(), &'static str> {
        match self {
            FieldKind::String => match value {
                Value::String(_) => Ok(()),
                _ => Err(EXPECTED_STRING),
            },
            FieldKind::Integer => {
                let parsed = match value {
                    Value::Number(number) => {
                        if let Some(i) = number.as_i64() {
                            i
                        } else if number.is_u64() {
                            return Err(INTEGER_OUT_OF_RANGE);
                        } else {
                            let f = number.as_f64().ok_or(EXPECTED_INTEGER)?;
                            if f.fract() != 0.0 {
                                return Err(FRACTIONAL_INTEGER);
                            }
                            if f < i32::MIN as f64 || f > i32::MAX as f64 {
                                return Err(INTEGER_OUT_OF_RANGE);
                            }
                            f as i64
                        }
                    }
                    Value::String(raw) => raw.trim().parse::<i64>().map_err(|_| UNPARSABLE_INTEGER)?,
                    _ => return Err(EXPECTED_INTEGER),
                };

                let parsed = i32::try_from(parsed).map_err(|_| INTEGER_OUT_OF_RANGE)?;
                *value = Value::from(parsed);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A payload whose shape is checked field by field before deserialization
pub trait PayloadSchema: DeserializeOwned {
    const FIELDS: &'static [FieldSpec];

    /// Check every declared field, then deserialize the normalized object.
    fn validate(mut value: Value) -> Result<Self, Vec<FieldError>> {
        let Some(object) = value.as_object_mut() else {
            return Err(vec![FieldError::new(BODY_FIELD, EXPECTED_OBJECT)]);
        };

        let errors = check_fields(object, Self::FIELDS);
        if !errors.is_empty() {
            return Err(errors);
        }

        serde_json::from_value(value).map_err(|e| vec![FieldError::new(BODY_FIELD, e.to_string())])
    }
}

fn check_fields(object: &mut Map<String, Value>, fields: &[FieldSpec]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for spec in fields {
        match object.get_mut(spec.name) {
            None | Some(Value::Null) if !spec.required => {}
            None => errors.push(FieldError::new(spec.name, FIELD_REQUIRED)),
            Some(value) => {
                if let Err(message) = spec.kind.coerce(value) {
                    errors.push(FieldError::new(spec.name, message));
                }
            }
        }
    }

    errors
}
