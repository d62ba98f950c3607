use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loan amount requested when the form does not collect one.
pub const DEFAULT_LOAN_AMOUNT: u64 = 3_500_000;

/// Applicant data captured by the lead form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(alias = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(alias = "branch", alias = "branchCode")]
    pub branch_code: String,
    #[serde(default, alias = "loanAmount", skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<u64>,
    #[serde(default, alias = "agreed", alias = "agreedToContact")]
    pub agreed_to_contact: bool,
}

impl ApplicantInput {
    /// Rejects submissions the form would never send: missing consent or blank fields.
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        if !self.agreed_to_contact {
            return Err(LeadValidationError::ConsentRequired);
        }

        for (field, value) in [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("branch_code", &self.branch_code),
        ] {
            if value.trim().is_empty() {
                return Err(LeadValidationError::MissingField(field));
            }
        }

        Ok(())
    }

    pub fn name(&self) -> ApplicantName {
        ApplicantName::split(&self.full_name)
    }

    /// Requested amount; zero counts as unspecified.
    pub fn loan_amount(&self) -> u64 {
        self.loan_amount
            .filter(|amount| *amount > 0)
            .unwrap_or(DEFAULT_LOAN_AMOUNT)
    }
}

/// Raised before any upstream call is made.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LeadValidationError {
    #[error("please agree to be contacted for loan enquiry")]
    ConsentRequired,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// First and last name derived from the single free-text name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantName {
    pub first: String,
    pub last: String,
}

impl ApplicantName {
    /// Splits on every single space; the first token is the first name and the
    /// remaining tokens, re-joined with spaces, form the last name.
    pub fn split(full_name: &str) -> Self {
        let mut parts = full_name.split(' ');
        let first = parts.next().unwrap_or_default().to_string();
        let last = parts.collect::<Vec<_>>().join(" ");
        Self { first, last }
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// Bearer credential issued for a single submission attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Identifier wrapper for applications created upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First executable step of a built workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowStepId(pub String);

impl fmt::Display for WorkflowStepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw upstream payloads from a fully successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub application_id: ApplicationId,
    pub create: Value,
    pub build: Value,
    pub execute: Value,
}

/// Renders an identifier field as an opaque string. Numbers keep their decimal
/// form; zero, empty strings, and other JSON types count as absent.
pub(crate) fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(raw) if !raw.is_empty() => Some(raw.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn applicant() -> ApplicantInput {
        ApplicantInput {
            full_name: "Asha Rao".to_string(),
            email: "a@x.com".to_string(),
            phone: "9999999999".to_string(),
            branch_code: "mumbai".to_string(),
            loan_amount: None,
            agreed_to_contact: true,
        }
    }

    #[test]
    fn name_without_space_has_empty_last_name() {
        let name = ApplicantName::split("Madonna");
        assert_eq!(name.first, "Madonna");
        assert_eq!(name.last, "");
    }

    #[test]
    fn name_splits_on_first_space() {
        let name = ApplicantName::split("Jane Doe Smith");
        assert_eq!(name.first, "Jane");
        assert_eq!(name.last, "Doe Smith");
        assert_eq!(name.display(), "Jane Doe Smith");
    }

    #[test]
    fn repeated_spaces_are_preserved_in_last_name() {
        let name = ApplicantName::split("Jane  Doe");
        assert_eq!(name.first, "Jane");
        assert_eq!(name.last, " Doe");
    }

    #[test]
    fn validate_requires_consent() {
        let mut input = applicant();
        input.agreed_to_contact = false;
        assert_eq!(input.validate(), Err(LeadValidationError::ConsentRequired));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut input = applicant();
        input.phone = "   ".to_string();
        assert_eq!(
            input.validate(),
            Err(LeadValidationError::MissingField("phone"))
        );
    }

    #[test]
    fn loan_amount_defaults() {
        let mut input = applicant();
        assert_eq!(input.loan_amount(), DEFAULT_LOAN_AMOUNT);
        input.loan_amount = Some(1_200_000);
        assert_eq!(input.loan_amount(), 1_200_000);
        input.loan_amount = Some(0);
        assert_eq!(input.loan_amount(), DEFAULT_LOAN_AMOUNT);
    }

    #[test]
    fn accepts_form_field_aliases() {
        let input: ApplicantInput = serde_json::from_value(json!({
            "fullName": "Asha Rao",
            "email": "a@x.com",
            "phone": "9999999999",
            "branch": "mumbai",
            "agreed": true
        }))
        .expect("form payload parses");
        assert_eq!(input, applicant());
    }

    #[test]
    fn identifiers_accept_numbers_and_strings() {
        assert_eq!(identifier(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(identifier(Some(&json!("A100"))), Some("A100".to_string()));
        assert_eq!(identifier(Some(&json!(""))), None);
        assert_eq!(identifier(Some(&json!(0))), None);
        assert_eq!(identifier(Some(&json!(0.0))), None);
        assert_eq!(identifier(Some(&Value::Null)), None);
        assert_eq!(identifier(None), None);
    }

    #[test]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken::new("T1");
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
        assert_eq!(token.bearer(), "Bearer T1");
    }
}
