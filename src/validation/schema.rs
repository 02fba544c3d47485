// ABOUTME: Immutable request schemas composed of ordered field constraints
// ABOUTME: Evaluation aggregates every violation in field-declaration order, or aborts early on request
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Request schemas
//!
//! A [`Schema`] is a named, ordered set of [`FieldSpec`]s describing one
//! logical request shape. Schemas are built once, held in statics, and shared
//! read-only across requests; evaluation never mutates the schema.
//!
//! Evaluation returns a result instead of throwing: either the normalized
//! payload (defaults applied, strings trimmed and cased, numeric strings
//! parsed) or the ordered list of field violations. Engine defects are a
//! separate [`ValidationError::Fault`] variant so callers can map them to a
//! 500 instead of a 400.

use crate::errors::FieldViolation;
use crate::validation::constraint::{Field, FieldOutcome, FieldSpec};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Failed schema evaluation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more field constraints were violated, in declaration order
    #[error("validation failed with {} violation(s)", .0.len())]
    Violations(Vec<FieldViolation>),
    /// The validation engine itself failed; a registry defect, not bad input
    #[error("schema fault: {0}")]
    Fault(String),
}

/// Named, immutable set of field constraints for one request shape
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Start building a schema with the given shape name
    #[must_use]
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// Logical shape name (e.g. `create-user`)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the raw input, collecting every violation
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Violations`] when any field constraint
    /// fails, or [`ValidationError::Fault`] when the schema definition itself
    /// is defective.
    pub fn evaluate(&self, input: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        self.evaluate_at(input, Utc::now(), false)
    }

    /// Evaluate with an injected clock and an early-abort option
    ///
    /// With `abort_early`, evaluation stops at the first violation in
    /// field-declaration order and reports exactly that one.
    ///
    /// # Errors
    ///
    /// Same contract as [`Schema::evaluate`].
    pub fn evaluate_at(
        &self,
        input: &Map<String, Value>,
        now: DateTime<Utc>,
        abort_early: bool,
    ) -> Result<Map<String, Value>, ValidationError> {
        let mut normalized = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match field
                .evaluate(input.get(field.name), now)
                .map_err(ValidationError::Fault)?
            {
                FieldOutcome::Absent => {}
                FieldOutcome::Value(value) => {
                    normalized.insert(field.name.to_owned(), value);
                }
                FieldOutcome::Violations(mut entries) => {
                    if abort_early {
                        entries.truncate(1);
                        return Err(ValidationError::Violations(entries));
                    }
                    violations.append(&mut entries);
                }
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationError::Violations(violations))
        }
    }
}

/// Builder collecting fields in declaration order
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Append a field; declaration order is the reporting order
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field.build());
        self
    }

    /// Finalize the schema
    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::builder("sample")
            .field(Field::integer("telegram_id").required().positive())
            .field(Field::string("first_name").required().trim().non_empty().max_len(100))
            .field(Field::string("last_name").max_len(100))
            .build()
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn valid_input_normalizes() {
        let schema = sample_schema();
        let input = as_map(json!({"telegram_id": 42, "first_name": "  Ada "}));
        let normalized = schema.evaluate(&input).unwrap();
        assert_eq!(normalized.get("first_name"), Some(&json!("Ada")));
        // absent optional field stays absent, never synthesized
        assert!(!normalized.contains_key("last_name"));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let schema = sample_schema();
        let input = as_map(json!({"telegram_id": 1, "first_name": "Ada", "extra": true}));
        let normalized = schema.evaluate(&input).unwrap();
        assert!(!normalized.contains_key("extra"));
    }

    #[test]
    fn violations_follow_declaration_order() {
        let schema = sample_schema();
        let input = as_map(json!({
            "telegram_id": -1,
            "first_name": "   ",
            "last_name": "x".repeat(101),
        }));
        let Err(ValidationError::Violations(violations)) = schema.evaluate(&input) else {
            panic!("expected violations");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["telegram_id", "first_name", "last_name"]);
    }

    #[test]
    fn abort_early_reports_exactly_one() {
        let schema = sample_schema();
        let input = as_map(json!({"telegram_id": -1, "first_name": ""}));
        let Err(ValidationError::Violations(violations)) =
            schema.evaluate_at(&input, Utc::now(), true)
        else {
            panic!("expected violations");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "telegram_id");
    }

    #[test]
    fn normalization_is_a_fixed_point() {
        let schema = sample_schema();
        let input = as_map(json!({"telegram_id": 42, "first_name": "  Ada ", "last_name": "L"}));
        let first = schema.evaluate(&input).unwrap();
        let second = schema.evaluate(&first).unwrap();
        assert_eq!(first, second);
    }
}
