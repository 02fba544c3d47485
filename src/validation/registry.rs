// ABOUTME: Schema registry defining the five request shapes and their field constraints
// ABOUTME: Schemas are built once in LazyLock statics and shared read-only across requests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PulseFit

//! Schema registry
//!
//! One entry per logical request shape. Enum value sets are named constants
//! held here and referenced by value, never through a mutable shared import.
//! Field names mirror the `User` and `PersonalRecord` record contracts in
//! [`crate::models`]; nothing here touches storage.

use crate::validation::constraint::{Field, Pattern};
use crate::validation::schema::Schema;
use std::sync::LazyLock;

/// User roles, lowest privilege first. `create-user` declares no default:
/// an absent `role` stays absent and the caller falls back to `member`.
pub const USER_ROLES: &[&str] = &["member", "trainer", "admin"];

/// Supported interface languages
pub const USER_LANGUAGES: &[&str] = &["en", "ru", "es"];

/// Sort orders accepted by list endpoints
pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// Telegram login clock-skew tolerance: how far in the past `auth_date` may lie
pub const AUTH_DATE_MAX_PAST_SECS: i64 = 300;

/// Forward clock-skew tolerance for `auth_date`
pub const AUTH_DATE_MAX_FUTURE_SECS: i64 = 60;

static USERNAME_PATTERN: Pattern = Pattern::new(
    "^[A-Za-z0-9_]+$",
    "may contain only letters, digits, and underscores",
);

static EMAIL_PATTERN: Pattern = Pattern::new(
    r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$",
    "must be a valid email address",
);

// Two-segment IANA-style zone name, e.g. America/Montreal
static TIMEZONE_PATTERN: Pattern = Pattern::new(
    r"^[A-Za-z_]+/[A-Za-z_+\-]+$",
    "must be a Region/City timezone name",
);

// Telegram login widget hash: SHA-256 hex digest. Shape only; authenticity
// is verified elsewhere against the bot token.
static LOGIN_HASH_PATTERN: Pattern = Pattern::new(
    "^[a-f0-9]{64}$",
    "must be a 64-character lowercase hex string",
);

/// Logical request shapes known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    CreateUser,
    UpdateUser,
    Login,
    CreateRecord,
    PaginationQuery,
}

impl Shape {
    /// Resolve the shape to its immutable schema
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::CreateUser => &CREATE_USER,
            Self::UpdateUser => &UPDATE_USER,
            Self::Login => &LOGIN,
            Self::CreateRecord => &CREATE_RECORD,
            Self::PaginationQuery => &PAGINATION_QUERY,
        }
    }
}

static CREATE_USER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("create-user")
        .field(Field::integer("telegram_id").required().positive())
        .field(
            Field::string("first_name")
                .required()
                .trim()
                .non_empty()
                .max_len(100),
        )
        .field(
            Field::string("username")
                .nullable()
                .trim()
                .min_len(3)
                .max_len(50)
                .matches(&USERNAME_PATTERN),
        )
        .field(Field::string("last_name").max_len(100))
        .field(Field::string("photo_url").max_len(2048).http_url())
        .field(Field::string("role").one_of(USER_ROLES))
        .field(Field::string("language").one_of(USER_LANGUAGES))
        .build()
});

static UPDATE_USER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("update-user")
        .field(Field::integer("telegram_id").required().positive())
        .field(Field::string("first_name").trim().non_empty().max_len(100))
        .field(
            Field::string("username")
                .nullable()
                .trim()
                .min_len(3)
                .max_len(50)
                .matches(&USERNAME_PATTERN),
        )
        .field(Field::string("last_name").max_len(100))
        .field(Field::string("photo_url").max_len(2048).http_url())
        .field(Field::string("role").one_of(USER_ROLES))
        .field(Field::string("language").one_of(USER_LANGUAGES))
        .field(Field::number("height_cm").min(50.0).max(250.0))
        .field(Field::number("weight_kg").min(20.0).max(300.0))
        .field(Field::number("experience_years").min(0.0).max(80.0))
        .field(
            Field::string("email")
                .trim()
                .lowercase()
                .max_len(255)
                .matches(&EMAIL_PATTERN),
        )
        .field(Field::string("date_of_birth").rfc3339_age_capped(120))
        .field(Field::string("timezone").matches(&TIMEZONE_PATTERN))
        .field(Field::string("bank_name").max_len(100))
        .field(Field::string("bank_account").max_len(50))
        .build()
});

static LOGIN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("login")
        .field(Field::integer("id").required().positive())
        .field(Field::string("first_name").required().non_empty())
        .field(
            Field::integer("auth_date")
                .required()
                .unix_window(AUTH_DATE_MAX_PAST_SECS, AUTH_DATE_MAX_FUTURE_SECS),
        )
        .field(Field::string("hash").required().matches(&LOGIN_HASH_PATTERN))
        .build()
});

static CREATE_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("create-record")
        .field(
            Field::string("exercise_name")
                .required()
                .trim()
                .non_empty()
                .max_len(100),
        )
        .field(
            Field::string("record_type")
                .required()
                .trim()
                .non_empty()
                .max_len(50),
        )
        // Sanity ceiling, not a real-world hard limit
        .field(Field::number("value").required().positive().max(100_000.0))
        .field(Field::string("unit").max_len(20))
        .field(Field::string("achieved_at").rfc3339_past())
        .build()
});

static PAGINATION_QUERY: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("pagination-query")
        .field(Field::string_int("page").min(1.0).default_value(1))
        .field(
            Field::string_int("limit")
                .min(1.0)
                .max(100.0)
                .default_value(10),
        )
        .field(Field::string("order").one_of(SORT_ORDERS).default_value("asc"))
        .build()
});
