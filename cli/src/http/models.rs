use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query form of a gift request, used when the body is empty.
///
/// Values stay strings here; the core binary decides what is valid.
#[derive(Debug, Default, Deserialize)]
pub struct GiftQuery {
    pub age: Option<String>,
    pub interests: Option<String>,
}

impl GiftQuery {
    pub fn to_payload(&self) -> String {
        let mut obj = Map::new();
        if let Some(age) = &self.age {
            let value = age
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(age.clone()));
            obj.insert("age".into(), value);
        }
        if let Some(interests) = &self.interests {
            obj.insert("interests".into(), Value::String(interests.clone()));
        }
        Value::Object(obj).to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: f64,
    pub requests_handled: u64,
    pub validation_errors: u64,
    pub internal_errors: u64,
    pub timestamp: String,
}
