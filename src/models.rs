// ABOUTME: Database-shaped data models for users and personal records
// ABOUTME: Contract-only declarations; schema field names in the registry mirror these records
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Common data models
//!
//! These declarations describe the records the validation schemas borrow
//! their field names and types from. No persistence or business behavior
//! lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role, lowest privilege first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular member; the fallback when a request declares no role
    #[default]
    Member,
    /// Trainer with coaching capabilities
    Trainer,
    /// Administrator
    Admin,
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLanguage {
    En,
    Ru,
    Es,
}

/// Sort order for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal user identifier
    pub id: Uuid,
    /// Telegram account identifier (positive, unique)
    pub telegram_id: i64,
    /// Display first name
    pub first_name: String,
    /// Display last name
    pub last_name: Option<String>,
    /// Telegram username, absent for users who hide it
    pub username: Option<String>,
    /// Profile photo URL served by Telegram
    pub photo_url: Option<String>,
    /// Permission role
    pub role: UserRole,
    /// Interface language
    pub language: Option<UserLanguage>,
    /// Contact email
    pub email: Option<String>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Years of training experience
    pub experience_years: Option<f64>,
    /// Date of birth
    pub date_of_birth: Option<DateTime<Utc>>,
    /// IANA timezone name (Region/City)
    pub timezone: Option<String>,
    /// Payout bank name (trainers only)
    pub bank_name: Option<String>,
    /// Payout bank account (trainers only)
    pub bank_account: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

/// A personal best for one exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Exercise name (e.g. "Deadlift")
    pub exercise_name: String,
    /// Record type (e.g. "one_rep_max", "max_reps")
    pub record_type: String,
    /// Achieved value in `unit`
    pub value: f64,
    /// Measurement unit (e.g. "kg", "reps")
    pub unit: Option<String>,
    /// When the record was achieved
    pub achieved_at: Option<DateTime<Utc>>,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialization_matches_registry_constants() {
        use crate::validation::USER_ROLES;
        for role in [UserRole::Member, UserRole::Trainer, UserRole::Admin] {
            let name = serde_json::to_value(role).unwrap();
            assert!(USER_ROLES.contains(&name.as_str().unwrap()));
        }
    }

    #[test]
    fn default_role_is_lowest_privilege() {
        assert_eq!(UserRole::default(), UserRole::Member);
    }

    #[test]
    fn language_serialization_matches_registry_constants() {
        use crate::validation::USER_LANGUAGES;
        for language in [UserLanguage::En, UserLanguage::Ru, UserLanguage::Es] {
            let name = serde_json::to_value(language).unwrap();
            assert!(USER_LANGUAGES.contains(&name.as_str().unwrap()));
        }
    }
}
