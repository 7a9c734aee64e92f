use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-battlecard`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBattlecardRequest {
    pub user_url: String,
    pub competitor_url: String,
    pub user_email: String,
}

impl GenerateBattlecardRequest {
    /// Parse a request body. Only a JSON object is accepted; serde would
    /// otherwise also take an array of the three fields in order.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<serde_json::Value>(body)? {
            value @ serde_json::Value::Object(_) => serde_json::from_value(value),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateBattlecardResponse {
    pub message: String,
    /// HTML fragment, returned unescaped.
    pub battlecard: String,
}
