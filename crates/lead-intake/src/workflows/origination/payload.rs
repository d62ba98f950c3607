use serde::Serialize;

use super::branches::resolve_pincode;
use super::domain::{ApplicantInput, ApplicationId, WorkflowStepId};

/// Workflow tag the platform uses for web leads.
pub const LEAD_CREATION_WORKFLOW: &str = "LEAD_CREATION";

#[derive(Debug, Clone, Serialize)]
pub struct ClientCredentialsRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Flattened "short application" accepted by the create endpoint.
///
/// Every applicant-independent field is fixed: a salaried individual enquiring
/// about a loan against property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortApplication {
    #[serde(rename = "application.type")]
    pub application_type: &'static str,
    #[serde(rename = "application.apply_capacity")]
    pub apply_capacity: &'static str,
    #[serde(rename = "application.employment_type")]
    pub employment_type: &'static str,
    #[serde(rename = "application.salutation")]
    pub salutation: &'static str,
    #[serde(rename = "application.loan_type_code")]
    pub loan_type_code: &'static str,
    #[serde(rename = "application.loan_info[0].sub_loan_type")]
    pub sub_loan_type: &'static str,
    #[serde(rename = "application.applicant_name")]
    pub applicant_name: String,
    #[serde(rename = "application.mobile")]
    pub mobile: String,
    #[serde(rename = "application.email")]
    pub email: String,
    #[serde(rename = "application.contact_name")]
    pub contact_name: String,
    #[serde(rename = "applicants[0].applicant_category")]
    pub applicant_category: &'static str,
    #[serde(rename = "applicants[0].applicant_type")]
    pub applicant_type: &'static str,
    #[serde(rename = "applicants[0].personal.primary_id_type")]
    pub primary_id_type: &'static str,
    #[serde(rename = "applicants[0].personal.salutation")]
    pub personal_salutation: &'static str,
    #[serde(rename = "applicants[0].personal.addresses[0].address_type")]
    pub address_type: &'static str,
    #[serde(rename = "applicants[0].personal.addresses[0].pincode")]
    pub pincode: String,
    #[serde(rename = "applicants[0].personal.mobile")]
    pub personal_mobile: String,
    #[serde(rename = "applicants[0].personal.email")]
    pub personal_email: String,
    #[serde(rename = "applicants[0].personal.first_name")]
    pub first_name: String,
    #[serde(rename = "applicants[0].personal.last_name")]
    pub last_name: String,
    #[serde(rename = "application.loan_amount")]
    pub loan_amount: String,
}

impl ShortApplication {
    pub fn from_applicant(applicant: &ApplicantInput) -> Self {
        let name = applicant.name();
        let display_name = name.display();

        Self {
            application_type: "ENQUIRY_APPLICATION",
            apply_capacity: "PERSON",
            employment_type: "SALARIED",
            salutation: "Mrs",
            loan_type_code: "LAP",
            sub_loan_type: "203",
            applicant_name: display_name.clone(),
            mobile: applicant.phone.clone(),
            email: applicant.email.clone(),
            contact_name: display_name,
            applicant_category: "PERSON",
            applicant_type: "PRIMARY",
            primary_id_type: "PAN",
            personal_salutation: "Mrs",
            address_type: "CURRENT_RESIDENCE",
            pincode: resolve_pincode(&applicant.branch_code).to_string(),
            personal_mobile: applicant.phone.clone(),
            personal_email: applicant.email.clone(),
            first_name: name.first,
            last_name: name.last,
            loan_amount: applicant.loan_amount().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowBuildRequest<'a> {
    pub workflow_type: &'static str,
    pub source_id: &'a str,
}

impl<'a> WorkflowBuildRequest<'a> {
    pub fn lead_creation(application_id: &'a ApplicationId) -> Self {
        Self {
            workflow_type: LEAD_CREATION_WORKFLOW,
            source_id: &application_id.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowExecutionRequest<'a> {
    pub workflow_type: &'static str,
    pub source_id: &'a str,
    pub execute_step_id: &'a str,
}

impl<'a> WorkflowExecutionRequest<'a> {
    pub fn lead_creation(application_id: &'a ApplicationId, step_id: &'a WorkflowStepId) -> Self {
        Self {
            workflow_type: LEAD_CREATION_WORKFLOW,
            source_id: &application_id.0,
            execute_step_id: &step_id.0,
        }
    }
}
