//! Helpers for fields the remote API and hand-written configs send either as
//! JSON strings or as JSON integers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(number) => number.to_string(),
        }
    }
}

/// Deserialize a string or an integer into a `String`.
///
/// # Errors
///
/// Fails when the value is neither a string nor an integer.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// Like [`string_or_number`], but `null`, the integer `0` and blank strings
/// become `None`.
///
/// # Errors
///
/// Fails when the value is neither `null`, a string, nor an integer.
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value
        .filter(|scalar| !matches!(scalar, Scalar::Integer(0)))
        .map(String::from)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty()))
}

/// Deserialize a list of strings or integers; `null` becomes an empty list.
///
/// # Errors
///
/// Fails when the value is not `null` or a list of strings and integers.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Scalar>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{optional_string_or_number, string_list, string_or_number};

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        code: String,
        #[serde(default, deserialize_with = "optional_string_or_number")]
        name: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        blocked: Vec<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).expect("probe should deserialize")
    }

    #[test]
    fn integers_become_strings() {
        let parsed = probe(r#"{"code": 123, "name": 7, "blocked": [1, "2a"]}"#);
        assert_eq!(parsed.code, "123", "integer code");
        assert_eq!(parsed.name.as_deref(), Some("7"), "integer name");
        assert_eq!(parsed.blocked, vec!["1", "2a"], "mixed list");
    }

    #[test]
    fn blank_and_null_values_are_missing() {
        let parsed = probe(r#"{"code": "9", "name": "   ", "blocked": null}"#);
        assert_eq!(parsed.name, None, "blank name");
        assert!(parsed.blocked.is_empty(), "null list");

        let parsed = probe(r#"{"code": "9", "name": null}"#);
        assert_eq!(parsed.name, None, "null name");

        let parsed = probe(r#"{"code": 0, "name": 0}"#);
        assert_eq!(parsed.code, "0", "required zero is kept");
        assert_eq!(parsed.name, None, "optional zero");

        let parsed = probe(r#"{"code": "9", "name": "0"}"#);
        assert_eq!(parsed.name.as_deref(), Some("0"), "zero as text is a value");
    }

    #[test]
    fn absent_optional_fields_default() {
        let parsed = probe(r#"{"code": "9"}"#);
        assert_eq!(parsed.name, None, "absent name");
        assert!(parsed.blocked.is_empty(), "absent list");
    }

    #[test]
    fn rejects_objects() {
        let result = serde_json::from_str::<Probe>(r#"{"code": {"nested": true}}"#);
        assert!(result.is_err(), "objects are not scalars");
    }
}
