use dispatch_matrix_providers::coordinates::Coordinates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::deadline::Deadline;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer name is required")]
    MissingName,

    #[error("Customer {name}: weight is required")]
    MissingWeight { name: String },

    #[error("Customer {name}: weight {value} is not a non-negative integer")]
    InvalidWeight { name: String, value: String },

    #[error("Customer {name}: invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { name: String, lat: f64, lng: f64 },

    #[error("Customer {name}: invalid deadline {value:?}: {source}")]
    InvalidDeadline {
        name: String,
        value: String,
        source: jiff::Error,
    },
}

/// A validated delivery customer.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Customer {
    name: String,
    #[serde(flatten)]
    location: Coordinates,
    weight: u64,
    #[schemars(with = "String")]
    deadline: Deadline,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        location: Coordinates,
        weight: u64,
        deadline: Deadline,
    ) -> Self {
        Customer {
            name: name.into(),
            location,
            weight,
            deadline,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Coordinates {
        &self.location
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }
}

/// Customer as submitted by a client, before validation.
///
/// `weight` accepts a JSON number or a numeric string.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub weight: Option<Value>,
    pub deadline: String,
}

impl TryFrom<CustomerInput> for Customer {
    type Error = CustomerError;

    fn try_from(input: CustomerInput) -> Result<Self, Self::Error> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(CustomerError::MissingName);
        }

        let location = Coordinates::new(input.lat, input.lng);
        if !location.is_valid() {
            return Err(CustomerError::InvalidCoordinates {
                name,
                lat: input.lat,
                lng: input.lng,
            });
        }

        let weight = parse_weight(&name, input.weight)?;

        let deadline = match Deadline::parse(&input.deadline) {
            Ok(deadline) => deadline,
            Err(source) => {
                return Err(CustomerError::InvalidDeadline {
                    name,
                    value: input.deadline,
                    source,
                });
            }
        };

        Ok(Customer {
            name,
            location,
            weight,
            deadline,
        })
    }
}

fn parse_weight(name: &str, weight: Option<Value>) -> Result<u64, CustomerError> {
    let invalid = |value: &Value| CustomerError::InvalidWeight {
        name: name.to_string(),
        value: value.to_string(),
    };

    match weight {
        None | Some(Value::Null) => Err(CustomerError::MissingWeight {
            name: name.to_string(),
        }),
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| {
                // 400.0 is accepted, 400.5 and -1 are not
                number
                    .as_f64()
                    .filter(|value| {
                        *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64
                    })
                    .map(|value| value as u64)
            })
            .ok_or_else(|| invalid(&Value::Number(number.clone()))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(&Value::String(text.clone()))),
        Some(other) => Err(invalid(&other)),
    }
}
