//! Declared payload schemas and a validator that collects every violation.
//!
//! Validation runs in two passes:
//!
//! 1. A structural pass against a [`Schema`]: the payload must be an object, every required
//!    field must be present with the declared primitive type and no undeclared field may appear.
//! 2. A content pass using the [`Validate`] implementation of the target type, run only once the
//!    payload could be deserialized.
//!
//! Both passes report all of their violations at once.

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// An integral JSON number within the range of an `i32`.
    Integer,
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => as_i32(value).is_some(),
        }
    }
}

/// Reads an integer, accepting floats without a fractional part such as `500.0`.
fn as_i32(value: &Value) -> Option<i32> {
    if let Some(number) = value.as_i64() {
        return i32::try_from(number).ok();
    }

    let number = value.as_f64()?;

    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&number);

    match number.fract() == 0.0 && in_range {
        true => Some(number as i32),
        false => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Checks presence and primitive type of every field.
    pub fn check(&self, value: &Value) -> Result<(), Vec<String>> {
        let Some(object) = value.as_object() else {
            return Err(vec![String::from("instance is not of a type(s) object")]);
        };

        let mut violations = Vec::new();

        for field in self.fields {
            match object.get(field.name) {
                None if field.required => {
                    violations.push(format!("instance requires property \"{}\"", field.name));
                }
                None => {}
                Some(value) if !field.field_type.matches(value) => {
                    violations.push(format!(
                        "instance.{} is not of a type(s) {}",
                        field.name,
                        field.field_type.name()
                    ));
                }
                Some(_) => {}
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|field| field.name == key) {
                violations.push(format!(
                    "instance is not allowed to have the additional property \"{key}\""
                ));
            }
        }

        match violations.is_empty() {
            true => Ok(()),
            false => Err(violations),
        }
    }

    /// Rewrites integer fields given as integral floats to plain integers.
    ///
    /// Only meaningful after [`Schema::check`] passed.
    fn normalize(&self, value: &mut Value) {
        let Some(object) = value.as_object_mut() else {
            return;
        };

        for field in self.fields {
            if field.field_type != FieldType::Integer {
                continue;
            }

            if let Some(value) = object.get_mut(field.name) {
                if let Some(number) = as_i32(value) {
                    *value = Value::from(number);
                }
            }
        }
    }
}

/// A payload type with a declared [`Schema`].
pub trait SchemaValidated: DeserializeOwned + Validate {
    fn schema() -> &'static Schema;
}

/// Validates `value` against the schema of `T` and converts it.
pub fn validate<T: SchemaValidated>(mut value: Value) -> Result<T, Vec<String>> {
    let schema = T::schema();

    schema.check(&value)?;
    schema.normalize(&mut value);

    let payload: T = serde_json::from_value(value).map_err(|err| vec![err.to_string()])?;

    payload.validate().map_err(content_violations)?;

    Ok(payload)
}

fn content_violations(errors: ValidationErrors) -> Vec<String> {
    let mut violations: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => format!("instance.{field} {message}"),
                None => format!("instance.{field} failed {} validation", error.code),
            })
        })
        .collect();

    violations.sort();

    violations
}
