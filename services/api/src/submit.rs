use crate::infra::lead_service;
use clap::Args;
use lead_intake::config::AppConfig;
use lead_intake::error::AppError;
use lead_intake::telemetry;
use lead_intake::workflows::origination::{ApplicantInput, SubmissionProgress, SUCCESS_MESSAGE};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Applicant full name; the first word becomes the first name
    #[arg(long)]
    pub(crate) full_name: String,
    /// Applicant e-mail address
    #[arg(long)]
    pub(crate) email: String,
    /// Applicant mobile number
    #[arg(long)]
    pub(crate) phone: String,
    /// Branch code from the branch table (e.g. mumbai)
    #[arg(long)]
    pub(crate) branch: String,
    /// Requested loan amount (defaults to 3500000)
    #[arg(long)]
    pub(crate) loan_amount: Option<u64>,
    /// Confirm the applicant agreed to be contacted
    #[arg(long)]
    pub(crate) agreed: bool,
}

impl From<SubmitArgs> for ApplicantInput {
    fn from(args: SubmitArgs) -> Self {
        ApplicantInput {
            full_name: args.full_name,
            email: args.email,
            phone: args.phone,
            branch_code: args.branch,
            loan_amount: args.loan_amount,
            agreed_to_contact: args.agreed,
        }
    }
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let applicant = ApplicantInput::from(args);
    applicant.validate()?;

    let service = lead_service(&config.lending)?;
    let (sender, mut receiver) = mpsc::unbounded_channel::<SubmissionProgress>();
    let printer = tokio::spawn(async move {
        while let Some(progress) = receiver.recv().await {
            println!("  {}", progress.label());
        }
    });

    println!(
        "Submitting lead for {} ({})",
        applicant.full_name, applicant.branch_code
    );
    let outcome = service.submit(&applicant, &sender).await;
    drop(sender);
    if let Err(err) = printer.await {
        warn!(error = %err, "progress printer task failed");
    }

    let result = outcome?;
    println!("{SUCCESS_MESSAGE}");
    println!("Application ID: {}", result.application_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_convert_to_applicant_input() {
        let args = SubmitArgs {
            full_name: "Asha Rao".to_string(),
            email: "a@x.com".to_string(),
            phone: "9999999999".to_string(),
            branch: "surat".to_string(),
            loan_amount: None,
            agreed: false,
        };

        let applicant = ApplicantInput::from(args);
        assert_eq!(applicant.branch_code, "surat");
        assert!(applicant.validate().is_err());
    }
}
