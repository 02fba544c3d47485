// ABOUTME: Declarative field constraints, normalization transforms, and per-field evaluation
// ABOUTME: Each field carries an ordered list of constraint descriptors evaluated independently
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Field-level constraint descriptors
//!
//! A field is described by a type expectation, a presence requirement, an
//! ordered list of normalization transforms, and an ordered list of rules.
//! Evaluation is pure: the same input always yields the same outcome, and
//! transforms are fixed points (normalizing normalized output is a no-op).

use crate::errors::FieldViolation;
use chrono::{DateTime, Months, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Lazily compiled, anchored regular expression with a violation message
///
/// Compilation happens once on first use. A pattern that fails to compile is
/// a registry defect and surfaces as a schema fault, never a panic.
pub struct Pattern {
    source: &'static str,
    message: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl Pattern {
    /// Define a pattern from a regex source and the message reported on mismatch
    #[must_use]
    pub const fn new(source: &'static str, message: &'static str) -> Self {
        Self {
            source,
            message,
            compiled: OnceLock::new(),
        }
    }

    fn regex(&self) -> Result<&Regex, String> {
        self.compiled
            .get_or_init(|| Regex::new(self.source).ok())
            .as_ref()
            .ok_or_else(|| format!("schema pattern failed to compile: {}", self.source))
    }
}

/// Expected JSON type of a field, checked before any rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// JSON string
    String,
    /// JSON integer (floats rejected)
    Integer,
    /// Any JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// Integer that also coerces from its string representation ("2" -> 2),
    /// used for query-string fields which always arrive as strings
    StringInt,
}

/// Normalization step applied to a valid value before rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Strip leading/trailing whitespace
    Trim,
    /// Case-fold to lowercase
    Lowercase,
}

/// One declarative constraint attached to a field
pub enum FieldRule {
    /// String must not be empty (checked after transforms)
    NonEmpty,
    /// Minimum string length in characters
    MinLen(usize),
    /// Maximum string length in characters
    MaxLen(usize),
    /// Minimum numeric value, inclusive
    Min(f64),
    /// Maximum numeric value, inclusive
    Max(f64),
    /// Number must be strictly greater than zero
    Positive,
    /// Full-string match against an anchored pattern
    Matches(&'static Pattern),
    /// Value must be one of a fixed set of strings
    OneOf(&'static [&'static str]),
    /// String must parse as an absolute http or https URL
    HttpUrl,
    /// RFC 3339 datetime string; optionally bounded against the clock
    Rfc3339 {
        allow_future: bool,
        max_age_years: Option<u32>,
    },
    /// Unix timestamp within `[now - past_secs, now + future_secs]` inclusive
    UnixWindow { past_secs: i64, future_secs: i64 },
}

/// Presence requirement for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Field must be present in the input
    Required,
    /// Field may be absent; absence leaves no key in the normalized output
    Optional,
}

/// Complete declarative description of one schema field
///
/// Built with the chained [`Field`] builder; immutable once the owning schema
/// is constructed.
pub struct FieldSpec {
    pub(crate) name: &'static str,
    kind: Kind,
    presence: Presence,
    nullable: bool,
    default: Option<Value>,
    transforms: Vec<Transform>,
    rules: Vec<FieldRule>,
}

/// Chained builder for a [`FieldSpec`]
///
/// ```
/// use pulsefit_server::validation::Field;
///
/// let spec = Field::string("first_name").required().trim().non_empty().max_len(100);
/// ```
pub struct Field(FieldSpec);

impl Field {
    fn with_kind(name: &'static str, kind: Kind) -> Self {
        Self(FieldSpec {
            name,
            kind,
            presence: Presence::Optional,
            nullable: false,
            default: None,
            transforms: Vec::new(),
            rules: Vec::new(),
        })
    }

    /// String-typed field
    #[must_use]
    pub fn string(name: &'static str) -> Self {
        Self::with_kind(name, Kind::String)
    }

    /// Integer-typed field (floats rejected)
    #[must_use]
    pub fn integer(name: &'static str) -> Self {
        Self::with_kind(name, Kind::Integer)
    }

    /// Number-typed field (integer or float)
    #[must_use]
    pub fn number(name: &'static str) -> Self {
        Self::with_kind(name, Kind::Number)
    }

    /// Boolean-typed field
    #[must_use]
    pub fn boolean(name: &'static str) -> Self {
        Self::with_kind(name, Kind::Boolean)
    }

    /// Integer field that coerces from a string representation,
    /// for query-string payloads where every value arrives as a string
    #[must_use]
    pub fn string_int(name: &'static str) -> Self {
        Self::with_kind(name, Kind::StringInt)
    }

    /// Mark the field as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.0.presence = Presence::Required;
        self
    }

    /// Allow an explicit JSON `null`, preserved as-is in the normalized output
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.0.nullable = true;
        self
    }

    /// Declared default, inserted when the field is absent.
    /// The default must already be in normalized form.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.0.default = Some(value.into());
        self
    }

    /// Trim surrounding whitespace before rules run
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.0.transforms.push(Transform::Trim);
        self
    }

    /// Lowercase the value before rules run
    #[must_use]
    pub fn lowercase(mut self) -> Self {
        self.0.transforms.push(Transform::Lowercase);
        self
    }

    fn rule(mut self, rule: FieldRule) -> Self {
        self.0.rules.push(rule);
        self
    }

    /// Reject empty strings
    #[must_use]
    pub fn non_empty(self) -> Self {
        self.rule(FieldRule::NonEmpty)
    }

    /// Minimum length in characters
    #[must_use]
    pub fn min_len(self, len: usize) -> Self {
        self.rule(FieldRule::MinLen(len))
    }

    /// Maximum length in characters
    #[must_use]
    pub fn max_len(self, len: usize) -> Self {
        self.rule(FieldRule::MaxLen(len))
    }

    /// Inclusive numeric lower bound
    #[must_use]
    pub fn min(self, bound: f64) -> Self {
        self.rule(FieldRule::Min(bound))
    }

    /// Inclusive numeric upper bound
    #[must_use]
    pub fn max(self, bound: f64) -> Self {
        self.rule(FieldRule::Max(bound))
    }

    /// Number must be strictly positive
    #[must_use]
    pub fn positive(self) -> Self {
        self.rule(FieldRule::Positive)
    }

    /// Full-string pattern match
    #[must_use]
    pub fn matches(self, pattern: &'static Pattern) -> Self {
        self.rule(FieldRule::Matches(pattern))
    }

    /// Value restricted to a fixed set
    #[must_use]
    pub fn one_of(self, allowed: &'static [&'static str]) -> Self {
        self.rule(FieldRule::OneOf(allowed))
    }

    /// Value must be a valid absolute http(s) URL
    #[must_use]
    pub fn http_url(self) -> Self {
        self.rule(FieldRule::HttpUrl)
    }

    /// RFC 3339 datetime, rejected when in the future
    #[must_use]
    pub fn rfc3339_past(self) -> Self {
        self.rule(FieldRule::Rfc3339 {
            allow_future: false,
            max_age_years: None,
        })
    }

    /// RFC 3339 datetime, rejected when in the future or older than `years`
    #[must_use]
    pub fn rfc3339_age_capped(self, years: u32) -> Self {
        self.rule(FieldRule::Rfc3339 {
            allow_future: false,
            max_age_years: Some(years),
        })
    }

    /// Unix timestamp bounded to a clock-skew window around now
    #[must_use]
    pub fn unix_window(self, past_secs: i64, future_secs: i64) -> Self {
        self.rule(FieldRule::UnixWindow {
            past_secs,
            future_secs,
        })
    }

    /// Finalize the field specification
    #[must_use]
    pub fn build(self) -> FieldSpec {
        self.0
    }
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        field.build()
    }
}

/// Outcome of evaluating a single field
pub(crate) enum FieldOutcome {
    /// Field absent from input and no default declared; no key emitted
    Absent,
    /// Normalized value to commit under the field's name
    Value(Value),
    /// One entry per violated constraint, in rule-declaration order
    Violations(Vec<FieldViolation>),
}

impl FieldSpec {
    /// Evaluate this field against the raw input value (or its absence).
    ///
    /// # Errors
    ///
    /// Returns a fault description if the field definition itself is
    /// defective (e.g. a pattern that does not compile).
    pub(crate) fn evaluate(
        &self,
        raw: Option<&Value>,
        now: DateTime<Utc>,
    ) -> Result<FieldOutcome, String> {
        let Some(raw) = raw else {
            return Ok(match (&self.default, self.presence) {
                (Some(default), _) => FieldOutcome::Value(default.clone()),
                (None, Presence::Required) => FieldOutcome::Violations(vec![
                    FieldViolation::type_mismatch(self.name, "is required"),
                ]),
                (None, Presence::Optional) => FieldOutcome::Absent,
            });
        };

        if raw.is_null() {
            return Ok(if self.nullable {
                FieldOutcome::Value(Value::Null)
            } else {
                FieldOutcome::Violations(vec![FieldViolation::type_mismatch(
                    self.name,
                    "must not be null",
                )])
            });
        }

        // Type expectation and string coercion come first; a mismatch makes
        // the remaining rules meaningless, so it is the field's only entry.
        let normalized = match self.coerce(raw) {
            Ok(value) => value,
            Err(message) => {
                return Ok(FieldOutcome::Violations(vec![
                    FieldViolation::type_mismatch(self.name, message),
                ]))
            }
        };

        let mut violations = Vec::new();
        for rule in &self.rules {
            if let Some(violation) = self.check_rule(rule, &normalized, now)? {
                violations.push(violation);
            }
        }

        Ok(if violations.is_empty() {
            FieldOutcome::Value(normalized)
        } else {
            FieldOutcome::Violations(violations)
        })
    }

    /// Type-check the raw value and apply transforms, producing the
    /// normalized base value rules are checked against.
    fn coerce(&self, raw: &Value) -> Result<Value, &'static str> {
        match self.kind {
            Kind::String => match raw {
                Value::String(s) => Ok(Value::String(self.apply_transforms(s))),
                _ => Err("must be a string"),
            },
            Kind::Integer => match raw {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
                _ => Err("must be an integer"),
            },
            Kind::Number => match raw {
                Value::Number(_) => Ok(raw.clone()),
                _ => Err("must be a number"),
            },
            Kind::Boolean => match raw {
                Value::Bool(_) => Ok(raw.clone()),
                _ => Err("must be a boolean"),
            },
            Kind::StringInt => match raw {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| "must be an integer"),
                _ => Err("must be an integer"),
            },
        }
    }

    fn apply_transforms(&self, input: &str) -> String {
        let mut value = input.to_owned();
        for transform in &self.transforms {
            value = match transform {
                Transform::Trim => value.trim().to_owned(),
                Transform::Lowercase => value.to_lowercase(),
            };
        }
        value
    }

    fn check_rule(
        &self,
        rule: &FieldRule,
        value: &Value,
        now: DateTime<Utc>,
    ) -> Result<Option<FieldViolation>, String> {
        let violation = match rule {
            FieldRule::NonEmpty => self.check_string(value, |s| {
                s.is_empty().then(|| "must not be empty".to_owned())
            }),
            FieldRule::MinLen(len) => self.check_string(value, |s| {
                (s.chars().count() < *len)
                    .then(|| format!("must be at least {len} characters long"))
            }),
            FieldRule::MaxLen(len) => self.check_string(value, |s| {
                (s.chars().count() > *len).then(|| format!("must be at most {len} characters long"))
            }),
            FieldRule::Min(bound) => self.check_number(value, |n| {
                (n < *bound).then(|| format!("must be at least {bound}"))
            }),
            FieldRule::Max(bound) => self.check_number(value, |n| {
                (n > *bound).then(|| format!("must be at most {bound}"))
            }),
            FieldRule::Positive => self.check_number(value, |n| {
                (n <= 0.0).then(|| "must be a positive number".to_owned())
            }),
            FieldRule::Matches(pattern) => {
                let regex = pattern.regex()?;
                self.check_string(value, |s| {
                    (!regex.is_match(s)).then(|| pattern.message.to_owned())
                })
            }
            FieldRule::OneOf(allowed) => self.check_string(value, |s| {
                (!allowed.contains(&s)).then(|| format!("must be one of: {}", allowed.join(", ")))
            }),
            FieldRule::HttpUrl => self.check_string(value, |s| {
                match url::Url::parse(s) {
                    Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => None,
                    _ => Some("must be a valid http or https URL".to_owned()),
                }
            }),
            FieldRule::Rfc3339 {
                allow_future,
                max_age_years,
            } => self.check_rfc3339(value, *allow_future, *max_age_years, now),
            FieldRule::UnixWindow {
                past_secs,
                future_secs,
            } => self.check_number(value, |n| {
                #[allow(clippy::cast_precision_loss)]
                let (earliest, latest) = (
                    (now.timestamp() - past_secs) as f64,
                    (now.timestamp() + future_secs) as f64,
                );
                (n < earliest || n > latest)
                    .then(|| "is outside the accepted time window".to_owned())
            }),
        };
        Ok(violation)
    }

    /// Run a string predicate; non-string values were already rejected by
    /// type coercion, so a mismatch here is silently skipped.
    fn check_string(
        &self,
        value: &Value,
        predicate: impl FnOnce(&str) -> Option<String>,
    ) -> Option<FieldViolation> {
        let s = value.as_str()?;
        predicate(s).map(|message| FieldViolation::new(self.name, message, value.clone()))
    }

    fn check_number(
        &self,
        value: &Value,
        predicate: impl FnOnce(f64) -> Option<String>,
    ) -> Option<FieldViolation> {
        let n = value.as_f64()?;
        predicate(n).map(|message| FieldViolation::new(self.name, message, value.clone()))
    }

    fn check_rfc3339(
        &self,
        value: &Value,
        allow_future: bool,
        max_age_years: Option<u32>,
        now: DateTime<Utc>,
    ) -> Option<FieldViolation> {
        let s = value.as_str()?;
        let Ok(parsed) = DateTime::parse_from_rfc3339(s) else {
            // Parse failure is a type-shaped mismatch; the raw value is omitted
            return Some(FieldViolation::type_mismatch(
                self.name,
                "must be a valid RFC 3339 datetime",
            ));
        };
        let parsed = parsed.with_timezone(&Utc);

        if !allow_future && parsed > now {
            return Some(FieldViolation::new(
                self.name,
                "must not be in the future",
                value.clone(),
            ));
        }

        if let Some(years) = max_age_years {
            let cutoff = now.checked_sub_months(Months::new(years * 12));
            if let Some(cutoff) = cutoff {
                if parsed < cutoff {
                    return Some(FieldViolation::new(
                        self.name,
                        format!("implies an age over {years} years"),
                        value.clone(),
                    ));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(spec: &FieldSpec, raw: Option<&Value>) -> FieldOutcome {
        spec.evaluate(raw, Utc::now()).unwrap()
    }

    #[test]
    fn required_field_missing_is_violation() {
        let spec = Field::string("first_name").required().build();
        let FieldOutcome::Violations(violations) = eval(&spec, None) else {
            panic!("expected violations");
        };
        assert_eq!(violations[0].message, "is required");
        assert!(violations[0].value.is_none());
    }

    #[test]
    fn optional_field_missing_is_absent() {
        let spec = Field::string("last_name").build();
        assert!(matches!(eval(&spec, None), FieldOutcome::Absent));
    }

    #[test]
    fn default_fills_absent_field() {
        let spec = Field::string_int("page").min(1.0).default_value(1).build();
        let FieldOutcome::Value(value) = eval(&spec, None) else {
            panic!("expected value");
        };
        assert_eq!(value, json!(1));
    }

    #[test]
    fn trim_and_lowercase_normalize_strings() {
        let spec = Field::string("email").trim().lowercase().build();
        let raw = json!("  User@Example.COM ");
        let FieldOutcome::Value(value) = eval(&spec, Some(&raw)) else {
            panic!("expected value");
        };
        assert_eq!(value, json!("user@example.com"));
    }

    #[test]
    fn transforms_are_idempotent() {
        let spec = Field::string("email").trim().lowercase().build();
        let raw = json!("  User@Example.COM ");
        let FieldOutcome::Value(first) = eval(&spec, Some(&raw)) else {
            panic!("expected value");
        };
        let FieldOutcome::Value(second) = eval(&spec, Some(&first)) else {
            panic!("expected value");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn string_int_coerces_and_rejects_garbage() {
        let spec = Field::string_int("limit").build();
        let FieldOutcome::Value(value) = eval(&spec, Some(&json!("42"))) else {
            panic!("expected value");
        };
        assert_eq!(value, json!(42));

        let FieldOutcome::Violations(violations) = eval(&spec, Some(&json!("abc"))) else {
            panic!("expected violations");
        };
        assert_eq!(violations[0].message, "must be an integer");
        assert!(violations[0].value.is_none());
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let spec = Field::number("weight_kg").min(20.0).max(300.0).build();
        assert!(matches!(
            eval(&spec, Some(&json!(20))),
            FieldOutcome::Value(_)
        ));
        assert!(matches!(
            eval(&spec, Some(&json!(300))),
            FieldOutcome::Value(_)
        ));
        assert!(matches!(
            eval(&spec, Some(&json!(19.999))),
            FieldOutcome::Violations(_)
        ));
        assert!(matches!(
            eval(&spec, Some(&json!(300.001))),
            FieldOutcome::Violations(_)
        ));
    }

    #[test]
    fn multiple_rules_each_report() {
        static USERNAME: Pattern = Pattern::new(
            "^[A-Za-z0-9_]+$",
            "may contain only letters, digits, and underscores",
        );
        let spec = Field::string("username")
            .min_len(3)
            .matches(&USERNAME)
            .build();
        let FieldOutcome::Violations(violations) = eval(&spec, Some(&json!("a!"))) else {
            panic!("expected violations");
        };
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn nullable_passes_null_through() {
        let spec = Field::string("username").nullable().min_len(3).build();
        let FieldOutcome::Value(value) = eval(&spec, Some(&Value::Null)) else {
            panic!("expected value");
        };
        assert!(value.is_null());
    }

    #[test]
    fn null_rejected_when_not_nullable() {
        let spec = Field::string("first_name").build();
        assert!(matches!(
            eval(&spec, Some(&Value::Null)),
            FieldOutcome::Violations(_)
        ));
    }

    #[test]
    fn unix_window_boundaries() {
        let spec = Field::integer("auth_date").unix_window(300, 60).build();
        let now = Utc::now();
        let at = |offset: i64| {
            let raw = json!(now.timestamp() + offset);
            spec.evaluate(Some(&raw), now).unwrap()
        };
        assert!(matches!(at(-300), FieldOutcome::Value(_)));
        assert!(matches!(at(-301), FieldOutcome::Violations(_)));
        assert!(matches!(at(60), FieldOutcome::Value(_)));
        assert!(matches!(at(61), FieldOutcome::Violations(_)));
    }

    #[test]
    fn rfc3339_rejects_future_and_ancient() {
        let spec = Field::string("date_of_birth").rfc3339_age_capped(120).build();
        let future = json!("2999-01-01T00:00:00Z");
        let FieldOutcome::Violations(violations) = eval(&spec, Some(&future)) else {
            panic!("expected violations");
        };
        assert_eq!(violations[0].message, "must not be in the future");

        let ancient = json!("1800-01-01T00:00:00Z");
        let FieldOutcome::Violations(violations) = eval(&spec, Some(&ancient)) else {
            panic!("expected violations");
        };
        assert_eq!(violations[0].message, "implies an age over 120 years");

        let date_only = json!("1990-05-04");
        let FieldOutcome::Violations(violations) = eval(&spec, Some(&date_only)) else {
            panic!("expected violations");
        };
        assert_eq!(violations[0].message, "must be a valid RFC 3339 datetime");
    }

    #[test]
    fn http_url_rule() {
        let spec = Field::string("photo_url").http_url().build();
        assert!(matches!(
            eval(&spec, Some(&json!("https://t.me/i/userpic/320/abc.jpg"))),
            FieldOutcome::Value(_)
        ));
        assert!(matches!(
            eval(&spec, Some(&json!("ftp://example.com/a.jpg"))),
            FieldOutcome::Violations(_)
        ));
        assert!(matches!(
            eval(&spec, Some(&json!("not a url"))),
            FieldOutcome::Violations(_)
        ));
    }
}
