use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::types::NewProduct;

/// Create payload exactly as the client sent it.
///
/// Every field keeps its raw JSON value so validation can tell an absent key
/// (`None`) apart from an explicit `null` (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
}

/// Rejections produced by [`CreateProductRequest::validate`].
///
/// The `Display` text is the message returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: name, category, price, and stock are required")]
    MissingFields,
    #[error("Price must be a positive number")]
    InvalidPrice,
    #[error("Stock must be a non-negative number")]
    InvalidStock,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl CreateProductRequest {
    /// Builds a request from an arbitrary JSON document.
    ///
    /// Anything other than an object carries no fields and therefore fails the
    /// required-field check.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Checks the payload and produces typed product fields.
    ///
    /// The first failing check wins: required fields, then price, then stock.
    /// A stock of `0` passes while a price of `0` is rejected as non-positive.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let name = non_empty_text(self.name.as_ref());
        let category = non_empty_text(self.category.as_ref());
        let (Some(name), Some(category), Some(price), Some(stock)) = (
            name,
            category,
            self.price.filter(|value| !is_blank(value)),
            self.stock,
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let price = price
            .as_f64()
            .filter(|price| *price > 0.0)
            .ok_or(ValidationError::InvalidPrice)?;
        let stock = whole_count(&stock).ok_or(ValidationError::InvalidStock)?;

        let description = match self.description {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };

        Ok(NewProduct {
            name,
            category,
            price,
            stock,
            description,
        })
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Values that count as "not provided" for price. Numeric zero is provided.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn whole_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let float = value.as_f64()?;
    // integral floats such as `5.0` are accepted
    (float >= 0.0 && float.fract() == 0.0 && float < u64::MAX as f64).then_some(float as u64)
}
