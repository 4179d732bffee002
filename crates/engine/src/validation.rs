//! Field constraints applied to write payloads before they reach the store.
//!
//! Every rule is checked, so a single call reports all the broken fields.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::transactions::TransactionDetails;

/// One broken constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Non-empty list of broken constraints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Candidate values for a new transaction, as assembled by a caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionDraft {
    pub user: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub create_date: Option<DateTime<Utc>>,
    pub details: TransactionDetails,
}

/// A draft that passed [`TransactionDraft::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub user: Option<String>,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub create_date: Option<DateTime<Utc>>,
    pub details: TransactionDetails,
}

/// Fields the update operation is allowed to change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none()
    }

    /// Check the fields accepted by an update.
    ///
    /// Both are optional, but a present one must not be blank and at least one
    /// must be present.
    pub fn validate(self) -> Result<TransactionPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.is_empty() {
            errors.push("body", "provide at least one of name or type");
            return Err(errors);
        }

        let name = self
            .name
            .and_then(|value| min_length(&mut errors, "name", Some(value)));
        let kind = self
            .kind
            .and_then(|value| min_length(&mut errors, "type", Some(value)));

        errors.into_result(TransactionPatch { name, kind })
    }
}

impl TransactionDraft {
    /// Apply the creation ruleset.
    ///
    /// - `user`: optional, non-empty when present
    /// - `name`, `type`, `status`: required, at least one character after trimming
    /// - `createDate`: optional
    pub fn validate(self) -> Result<NewTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let user = match self.user {
            Some(user) if user.trim().is_empty() => {
                errors.push("user", "must not be empty");
                None
            }
            other => other,
        };
        let name = required(&mut errors, "name", self.name);
        let status = required(&mut errors, "status", self.status);
        let kind = required(&mut errors, "type", self.kind);

        match (name, kind, status) {
            (Some(name), Some(kind), Some(status)) if errors.is_empty() => Ok(NewTransaction {
                user,
                name,
                kind,
                status,
                create_date: self.create_date,
                details: self.details,
            }),
            _ => Err(errors),
        }
    }
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    if value.is_none() {
        errors.push(field, "is required");
        return None;
    }
    min_length(errors, field, value)
}

fn min_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "must be at least 1 character long");
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: Option<&str>, kind: Option<&str>, status: Option<&str>) -> TransactionDraft {
        TransactionDraft {
            user: Some("u-1".to_string()),
            name: name.map(str::to_string),
            kind: kind.map(str::to_string),
            status: status.map(str::to_string),
            create_date: Some(Utc::now()),
            details: TransactionDetails::default(),
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.errors().iter().map(|e| e.field).collect()
    }

    #[test]
    fn complete_draft_is_valid() {
        let tx = draft(Some("123 Main St Listing"), Some("sale"), Some("active"))
            .validate()
            .unwrap();
        assert_eq!(tx.name, "123 Main St Listing");
        assert_eq!(tx.kind, "sale");
        assert_eq!(tx.status, "active");
        assert_eq!(tx.user.as_deref(), Some("u-1"));
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = draft(None, None, None).validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "status", "type"]);
        assert!(errors.errors().iter().all(|e| e.message == "is required"));
    }

    #[test]
    fn blank_strings_fail_min_length() {
        let errors = draft(Some(""), Some("  "), Some("active"))
            .validate()
            .unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "type"]);
    }

    #[test]
    fn values_are_trimmed() {
        let tx = draft(Some("  Lot 7 "), Some("lease"), Some(" pending"))
            .validate()
            .unwrap();
        assert_eq!(tx.name, "Lot 7");
        assert_eq!(tx.status, "pending");
    }

    #[test]
    fn empty_user_is_rejected() {
        let mut d = draft(Some("a"), Some("b"), Some("c"));
        d.user = Some(String::new());
        let errors = d.validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["user"]);
    }

    #[test]
    fn anonymous_draft_is_valid() {
        let mut d = draft(Some("a"), Some("b"), Some("c"));
        d.user = None;
        d.create_date = None;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn patch_accepts_a_single_field() {
        let patch = TransactionPatch {
            name: Some(" Renamed ".to_string()),
            kind: None,
        }
        .validate()
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Renamed"));
        assert_eq!(patch.kind, None);
    }

    #[test]
    fn patch_does_not_require_status() {
        let patch = TransactionPatch {
            name: Some("n".to_string()),
            kind: Some("t".to_string()),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let errors = TransactionPatch::default().validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["body"]);
    }

    #[test]
    fn blank_patch_field_is_rejected() {
        let errors = TransactionPatch {
            name: Some("ok".to_string()),
            kind: Some(String::new()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["type"]);
    }

    #[test]
    fn display_joins_fields() {
        let errors = draft(None, Some("t"), None).validate().unwrap_err();
        assert_eq!(errors.to_string(), "name: is required; status: is required");
    }
}
