//! Schema compiler
//!
//! [`compile`] turns an ordered field list into a [`FormSchema`]: one
//! validator per field, keyed by the field name, chosen purely from
//! `(type, required)`. The compiler is a pure function with no UI or
//! network dependencies, so the form renderer, preview renderer, and
//! response viewer all share identical validation semantics.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::field::{FieldDefinition, FieldType};

/// The answers a respondent provided, keyed by field name.
pub type ValueMap = serde_json::Map<String, Value>;

/// Per-field validation errors, keyed by field name.
///
/// Validation never short-circuits: every field is checked and every
/// violation recorded, so errors can be displayed beside their fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Error message for a field, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Record an error for a field.
    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.0.insert(name.into(), message.into());
    }

    /// Iterate `(field name, message)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Acceptance criteria for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidator {
    /// Field name, the key a value is looked up under
    pub name: String,
    /// Field type driving the rule table
    pub field_type: FieldType,
    /// Whether absence or emptiness is an error
    pub required: bool,
}

impl FieldValidator {
    /// Check one value against this field's rule.
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        match self.field_type {
            FieldType::Text | FieldType::MultilineText => self.check_text(value),
            FieldType::Email => self.check_email(value),
            FieldType::Number => self.check_number(value),
            FieldType::StarRating => self.check_rating(value),
        }
    }

    fn check_text(&self, value: Option<&Value>) -> Result<(), String> {
        match value {
            None | Some(Value::Null) => self.require_present(),
            Some(Value::String(s)) => {
                if self.required && s.is_empty() {
                    Err(format!("{} is required", self.name))
                } else {
                    Ok(())
                }
            }
            Some(_) => Err(format!("{} must be text", self.name)),
        }
    }

    fn check_email(&self, value: Option<&Value>) -> Result<(), String> {
        match value {
            None | Some(Value::Null) => self.require_present(),
            Some(Value::String(s)) => {
                if s.is_empty() {
                    return self.require_present();
                }
                if is_valid_email(s) {
                    Ok(())
                } else {
                    Err("Please enter a valid email address".to_string())
                }
            }
            Some(_) => Err(format!("{} must be text", self.name)),
        }
    }

    fn check_number(&self, value: Option<&Value>) -> Result<(), String> {
        match value {
            None | Some(Value::Null) => self.require_present(),
            // An untouched numeric input submits as "", which is absence,
            // not a type error.
            Some(Value::String(s)) if s.is_empty() => self.require_present(),
            Some(Value::Number(n)) => {
                if self.required && n.as_f64().unwrap_or(0.0) < 1.0 {
                    Err(format!("{} is required", self.name))
                } else {
                    Ok(())
                }
            }
            Some(_) => Err(format!("{} must be a number", self.name)),
        }
    }

    fn check_rating(&self, value: Option<&Value>) -> Result<(), String> {
        let missing = || {
            if self.required {
                Err(format!("Please provide a {}", self.name.to_lowercase()))
            } else {
                Ok(())
            }
        };
        match value {
            None | Some(Value::Null) => missing(),
            Some(Value::String(s)) if s.is_empty() => missing(),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(stars) if stars > 5 => Err("Maximum 5 stars allowed".to_string()),
                Some(stars) if stars < 0 => Err("Invalid rating".to_string()),
                Some(0) if self.required => Err("Please select at least 1 star".to_string()),
                Some(_) => Ok(()),
                None => Err(format!("{} must be a whole number of stars", self.name)),
            },
            Some(_) => Err(format!("{} must be a number", self.name)),
        }
    }

    fn require_present(&self) -> Result<(), String> {
        if self.required {
            Err(format!("{} is required", self.name))
        } else {
            Ok(())
        }
    }
}

/// A compiled validation schema: one validator per field, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    validators: Vec<FieldValidator>,
}

impl FormSchema {
    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True for the empty schema, which accepts the empty value map.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validators in field order.
    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    /// Validator for a field name, if the schema has one.
    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.validators.iter().find(|v| v.name == name)
    }

    /// Check a value map against every validator.
    ///
    /// Keys in `values` with no matching validator are ignored.
    pub fn validate(&self, values: &ValueMap) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for validator in &self.validators {
            if let Err(message) = validator.check(values.get(&validator.name)) {
                errors.insert(validator.name.clone(), message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Default value map for a fresh render: every field starts as `""`.
    ///
    /// An untouched optional star rating therefore submits as empty, not
    /// as zero; zero appears only when the response viewer clamps a stored
    /// value for display.
    pub fn default_values(&self) -> ValueMap {
        self.validators
            .iter()
            .map(|v| (v.name.clone(), Value::String(String::new())))
            .collect()
    }
}

/// Compile an ordered field list into its validation schema.
///
/// Pure and infallible: the same field list always yields a schema with
/// identical accept/reject behavior, and an empty list yields the empty
/// schema.
pub fn compile(fields: &[FieldDefinition]) -> FormSchema {
    FormSchema {
        validators: fields
            .iter()
            .map(|f| FieldValidator {
                name: f.name.clone(),
                field_type: f.field_type,
                required: f.required,
            })
            .collect(),
    }
}

/// Default value map for a field list, without keeping the schema.
pub fn default_values(fields: &[FieldDefinition]) -> ValueMap {
    compile(fields).default_values()
}

fn is_valid_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    });
    re.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str, ty: FieldType, required: bool) -> FieldDefinition {
        FieldDefinition::new(name, ty, required)
    }

    fn values(pairs: &[(&str, Value)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_field_list_compiles_to_empty_schema() {
        let schema = compile(&[]);
        assert!(schema.is_empty());
        assert!(schema.validate(&ValueMap::new()).is_ok());
        assert!(schema.default_values().is_empty());
    }

    #[test]
    fn test_one_validator_per_field_in_order() {
        let fields = vec![
            field("Name", FieldType::Text, true),
            field("Email", FieldType::Email, false),
            field("Rating", FieldType::StarRating, true),
        ];
        let schema = compile(&fields);
        assert_eq!(schema.len(), 3);
        let names: Vec<&str> = schema.validators().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "Email", "Rating"]);
        assert!(schema.get("Rating").is_some());
        assert!(schema.get("Missing").is_none());
    }

    #[test]
    fn test_required_text_rejects_empty() {
        let schema = compile(&[field("Comment", FieldType::MultilineText, true)]);
        let err = schema
            .validate(&values(&[("Comment", json!(""))]))
            .unwrap_err();
        assert_eq!(err.get("Comment"), Some("Comment is required"));
        assert!(schema
            .validate(&values(&[("Comment", json!("great product"))]))
            .is_ok());
    }

    #[test]
    fn test_optional_text_accepts_empty_and_absent() {
        let schema = compile(&[field("Comment", FieldType::Text, false)]);
        assert!(schema.validate(&values(&[("Comment", json!(""))])).is_ok());
        assert!(schema.validate(&ValueMap::new()).is_ok());
    }

    #[test]
    fn test_text_rejects_non_string() {
        let schema = compile(&[field("Name", FieldType::Text, false)]);
        let err = schema.validate(&values(&[("Name", json!(7))])).unwrap_err();
        assert_eq!(err.get("Name"), Some("Name must be text"));
    }

    #[test]
    fn test_email_format() {
        let schema = compile(&[field("Email", FieldType::Email, false)]);
        assert!(schema.validate(&values(&[("Email", json!(""))])).is_ok());
        assert!(schema
            .validate(&values(&[("Email", json!("a@b.co"))]))
            .is_ok());
        let err = schema
            .validate(&values(&[("Email", json!("not-an-email"))]))
            .unwrap_err();
        assert_eq!(err.get("Email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_required_email_rejects_empty() {
        let schema = compile(&[field("Email", FieldType::Email, true)]);
        let err = schema.validate(&values(&[("Email", json!(""))])).unwrap_err();
        assert_eq!(err.get("Email"), Some("Email is required"));
        let err = schema.validate(&ValueMap::new()).unwrap_err();
        assert_eq!(err.get("Email"), Some("Email is required"));
    }

    #[test]
    fn test_required_number_rejects_below_one_and_absence() {
        let schema = compile(&[field("Age", FieldType::Number, true)]);
        assert!(schema.validate(&values(&[("Age", json!(1))])).is_ok());
        assert!(schema.validate(&values(&[("Age", json!(0))])).is_err());
        assert!(schema.validate(&ValueMap::new()).is_err());
    }

    #[test]
    fn test_optional_number_accepts_absence_and_any_number() {
        let schema = compile(&[field("Age", FieldType::Number, false)]);
        assert!(schema.validate(&ValueMap::new()).is_ok());
        assert!(schema.validate(&values(&[("Age", json!(0))])).is_ok());
        assert!(schema.validate(&values(&[("Age", json!(-3.5))])).is_ok());
        let err = schema
            .validate(&values(&[("Age", json!("abc"))]))
            .unwrap_err();
        assert_eq!(err.get("Age"), Some("Age must be a number"));
    }

    #[test]
    fn test_required_rating_scenario() {
        let schema = compile(&[field("Rating", FieldType::StarRating, true)]);
        let err = schema
            .validate(&values(&[("Rating", json!(0))]))
            .unwrap_err();
        assert_eq!(err.get("Rating"), Some("Please select at least 1 star"));
        assert!(schema.validate(&values(&[("Rating", json!(3))])).is_ok());
        let err = schema.validate(&ValueMap::new()).unwrap_err();
        assert_eq!(err.get("Rating"), Some("Please provide a rating"));
    }

    #[test]
    fn test_rating_bounds() {
        let optional = compile(&[field("Rating", FieldType::StarRating, false)]);
        assert!(optional.validate(&values(&[("Rating", json!(0))])).is_ok());
        assert!(optional.validate(&values(&[("Rating", json!(5))])).is_ok());
        assert!(optional.validate(&ValueMap::new()).is_ok());
        let err = optional
            .validate(&values(&[("Rating", json!(6))]))
            .unwrap_err();
        assert_eq!(err.get("Rating"), Some("Maximum 5 stars allowed"));
        let err = optional
            .validate(&values(&[("Rating", json!(-1))]))
            .unwrap_err();
        assert_eq!(err.get("Rating"), Some("Invalid rating"));
        let err = optional
            .validate(&values(&[("Rating", json!(3.5))]))
            .unwrap_err();
        assert_eq!(
            err.get("Rating"),
            Some("Rating must be a whole number of stars")
        );
    }

    #[test]
    fn test_errors_collected_for_all_fields() {
        let schema = compile(&[
            field("Name", FieldType::Text, true),
            field("Email", FieldType::Email, true),
            field("Rating", FieldType::StarRating, true),
        ]);
        let err = schema
            .validate(&values(&[("Email", json!("nope"))]))
            .unwrap_err();
        assert_eq!(err.len(), 3);
        assert!(err.get("Name").is_some());
        assert!(err.get("Email").is_some());
        assert!(err.get("Rating").is_some());
    }

    #[test]
    fn test_extra_keys_ignored() {
        let schema = compile(&[field("Name", FieldType::Text, false)]);
        assert!(schema
            .validate(&values(&[("Name", json!("x")), ("Legacy", json!(42))]))
            .is_ok());
    }

    #[test]
    fn test_compile_is_idempotent() {
        let fields = vec![
            field("Name", FieldType::Text, true),
            field("Rating", FieldType::StarRating, false),
        ];
        let a = compile(&fields);
        let b = compile(&fields);
        assert_eq!(a, b);
        let probe = values(&[("Name", json!("")), ("Rating", json!(4))]);
        assert_eq!(a.validate(&probe), b.validate(&probe));
    }

    #[test]
    fn test_default_values_are_empty_strings() {
        let fields = vec![
            field("Name", FieldType::Text, true),
            field("Rating", FieldType::StarRating, false),
        ];
        let defaults = default_values(&fields);
        assert_eq!(defaults.get("Name"), Some(&json!("")));
        assert_eq!(defaults.get("Rating"), Some(&json!("")));
    }
}
