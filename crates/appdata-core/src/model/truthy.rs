//! Lenient boolean decoding for snapshot flags
//!
//! Upstream producers emit flags as JSON booleans, as 0/1 integers, or leave
//! them null. All of these decode to `bool`: null and zero are false.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Truthy {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Truthy>::deserialize(deserializer)? {
        None => false,
        Some(Truthy::Bool(b)) => b,
        Some(Truthy::Int(i)) => i != 0,
        Some(Truthy::Float(f)) => f != 0.0,
        Some(Truthy::Text(s)) => !s.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "super::deserialize")]
        on: bool,
    }

    fn decode(json: &str) -> bool {
        serde_json::from_str::<Flag>(json).unwrap().on
    }

    #[test]
    fn test_truthy_forms() {
        assert!(decode(r#"{"on": true}"#));
        assert!(decode(r#"{"on": 1}"#));
        assert!(decode(r#"{"on": "Y"}"#));
        assert!(!decode(r#"{"on": false}"#));
        assert!(!decode(r#"{"on": 0}"#));
        assert!(!decode(r#"{"on": null}"#));
        assert!(!decode(r#"{"on": ""}"#));
        assert!(!decode(r#"{}"#));
    }
}
