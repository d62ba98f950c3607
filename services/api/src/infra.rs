use lead_intake::config::LendingPlatformConfig;
use lead_intake::error::AppError;
use lead_intake::workflows::origination::{
    ClientCredentials, HttpTransport, LeadSubmissionService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LeadService = LeadSubmissionService<HttpTransport>;

pub(crate) fn lead_service(config: &LendingPlatformConfig) -> Result<Arc<LeadService>, AppError> {
    let credentials = ClientCredentials::from(config);
    let transport = HttpTransport::new(config.clone())?;
    Ok(Arc::new(LeadSubmissionService::new(
        Arc::new(transport),
        credentials,
    )))
}
