use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Organization as returned by the API. Only `id` and `name` are typed;
/// everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_kept() {
        let org: Organization = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "name": "Red de Semillas",
            "web": "https://example.org",
            "country": "ES"
        }))
        .unwrap();

        assert_eq!(org.name.as_deref(), Some("Red de Semillas"));
        assert_eq!(org.extra["country"], "ES");
        assert_eq!(serde_json::to_value(&org).unwrap()["web"], "https://example.org");
    }
}
