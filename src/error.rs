// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every codec and conversion in the crate.
//!
//! Two families live here: *decode* failures (malformed text, inconsistent
//! binary payloads) and *semantic* failures that the legacy types chose to
//! report instead of mapping to a sentinel.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text that does not match the grammar of the target type.
    #[error("invalid input syntax for type {type_name}: \"{input}\"")]
    InvalidSyntax {
        type_name: &'static str,
        input: String,
    },

    /// A quoted endpoint inside an interval literal failed to decode.
    #[error("invalid input syntax for type tinterval: \"{input}\"")]
    InvalidEndpoint {
        input: String,
        #[source]
        source: Box<Error>,
    },

    #[error("date/time field value out of range: \"{input}\" (type {type_name})")]
    FieldOutOfRange {
        type_name: &'static str,
        input: String,
    },

    #[error("interval field value out of range: \"{input}\"")]
    IntervalOutOfRange { input: String },

    #[error("time zone \"{zone}\" not recognized")]
    UnknownTimeZone { zone: String },

    #[error("unexpected date type {kind} while parsing {type_name} \"{input}\"")]
    UnexpectedDateType {
        kind: &'static str,
        type_name: &'static str,
        input: String,
    },

    /// Binary payload shorter than the fixed-width frame.
    #[error("insufficient data left in message: needed {needed} bytes, {remaining} remaining")]
    InsufficientData { needed: usize, remaining: usize },

    #[error("invalid status in external \"tinterval\" value: {status}")]
    InvalidStatus { status: i32 },

    #[error("cannot convert abstime \"invalid\" to timestamp")]
    InvalidAbstimeConversion,

    #[error("cannot convert reltime \"invalid\" to interval")]
    InvalidReltimeConversion,

    #[error("timestamp out of range")]
    TimestampOutOfRange,

    #[error("invalid value for parameter \"{name}\": \"{value}\"")]
    InvalidSetting { name: &'static str, value: String },
}

impl Error {
    /// `true` for malformed-input failures, as opposed to range or
    /// conversion failures.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSyntax { .. } | Error::InvalidEndpoint { .. }
        )
    }

    pub(crate) fn syntax(type_name: &'static str, input: &str) -> Self {
        Error::InvalidSyntax {
            type_name,
            input: input.to_owned(),
        }
    }

    pub(crate) fn out_of_range(type_name: &'static str, input: &str) -> Self {
        Error::FieldOutOfRange {
            type_name,
            input: input.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_message_names_input() {
        let err = Error::syntax("tinterval", "[ \"bad\" ]");
        assert_eq!(
            err.to_string(),
            "invalid input syntax for type tinterval: \"[ \"bad\" ]\""
        );
        assert!(err.is_syntax_error());
    }

    #[test]
    fn endpoint_error_keeps_source() {
        use std::error::Error as _;
        let inner = Error::syntax("abstime", "bad");
        let err = Error::InvalidEndpoint {
            input: "[\"bad\" \"epoch\"]".into(),
            source: Box::new(inner.clone()),
        };
        assert!(err.is_syntax_error());
        assert_eq!(err.source().map(|s| s.to_string()), Some(inner.to_string()));
    }

    #[test]
    fn conversion_errors_are_not_syntax_errors() {
        assert!(!Error::InvalidAbstimeConversion.is_syntax_error());
        assert!(!Error::TimestampOutOfRange.is_syntax_error());
    }
}
