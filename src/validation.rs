//! # Request Validation
//!
//! Each request body declares an explicit list of [`Rule`]s. A rule names the
//! field it reads, a pure [`Check`] and the message reported when the check
//! fails. [`Validate::validate`] runs every rule and folds all failures into a
//! single `BadRequest`, so a body with three bad fields yields three messages
//! in one response.
//!
//! Within one field, evaluation stops at the first failing rule: a missing
//! email is reported once, not once as missing and again as malformed.

use crate::error::{AppError, AppResult};

/// A pure predicate over one field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-empty
    Present,
    /// At most this many characters (not bytes)
    MaxChars(usize),
    /// Looks like `local@domain.tld`
    Email,
}

impl Check {
    pub fn passes(self, value: &str) -> bool {
        match self {
            Check::Present => !value.is_empty(),
            Check::MaxChars(max) => value.chars().count() <= max,
            Check::Email => is_email(value),
        }
    }
}

/// One named validation rule for a field of `T`
pub struct Rule<T> {
    pub field: &'static str,
    pub value: fn(&T) -> &str,
    pub check: Check,
    pub message: &'static str,
}

impl<T> Rule<T> {
    pub const fn new(
        field: &'static str,
        value: fn(&T) -> &str,
        check: Check,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            value,
            check,
            message,
        }
    }
}

/// Request bodies that carry declared validation rules
pub trait Validate: Sized {
    fn rules() -> Vec<Rule<Self>>;

    /// Messages of every failed rule, in declaration order.
    fn errors(&self) -> Vec<String> {
        let mut failed_fields: Vec<&'static str> = Vec::new();
        let mut errors = Vec::new();

        for rule in Self::rules() {
            if failed_fields.contains(&rule.field) {
                continue;
            }
            if !rule.check.passes((rule.value)(self)) {
                tracing::debug!(field = rule.field, check = ?rule.check, "validation failed");
                failed_fields.push(rule.field);
                errors.push(rule.message.to_string());
            }
        }

        errors
    }

    fn validate(&self) -> AppResult<()> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::bad_request(errors))
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
