use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::Record;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub phone: i64,
    pub fave_color: String,
}

impl User {
    pub fn new(name: impl Into<String>, phone: i64, fave_color: impl Into<String>) -> Self {
        Self { name: name.into(), phone, fave_color: fave_color.into() }
    }
}

/// Case-insensitive name comparison used as the user key predicate.
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

impl Record for User {
    type Key = str;
    const ENTITY: &'static str = "user";

    fn key(&self) -> &str {
        &self.name
    }

    fn key_matches(&self, key: &str) -> bool {
        names_match(&self.name, key)
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_match_ignores_case() {
        let u = User::new("Ann", 555, "blue");
        assert!(u.key_matches("ann"));
        assert!(u.key_matches("ANN"));
        assert!(!u.key_matches("anne"));
    }

    #[test]
    fn key_match_folds_non_ascii() {
        let u = User::new("Zoë", 1, "green");
        assert!(u.key_matches("ZOË"));
    }

    #[test]
    fn only_empty_name_rejected() {
        assert!(User::new("", 1, "red").validate().is_err());
        assert!(User::new("   ", 1, "red").validate().is_ok());
        assert!(User::new("Bo", 1, "").validate().is_ok());
    }

    #[test]
    fn phone_must_be_integer() {
        let bad = serde_json::json!({"name": "Ann", "phone": "five", "fave_color": "blue"});
        assert!(serde_json::from_value::<User>(bad).is_err());
        let missing = serde_json::json!({"name": "Ann", "phone": 5});
        assert!(serde_json::from_value::<User>(missing).is_err());
    }

    #[test]
    fn serializes_in_field_order() -> anyhow::Result<()> {
        let text = serde_json::to_string(&User::new("Ann", 555, "blue"))?;
        assert_eq!(text, r#"{"name":"Ann","phone":555,"fave_color":"blue"}"#);
        Ok(())
    }
}
