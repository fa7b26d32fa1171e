use lendo_credit::config::{AppConfig, CreditConfig};
use lendo_credit::error::AppError;
use lendo_credit::workflows::credit::{CreditFileNotice, NotificationError, NotificationSender};
use lendo_credit::workflows::qawaem::QawaemDataset;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notification transport that records the credit file in the service log.
#[derive(Default, Clone)]
pub(crate) struct LogNotificationSender;

impl NotificationSender for LogNotificationSender {
    fn send(&self, notice: CreditFileNotice) -> Result<(), NotificationError> {
        info!(
            recipient = %notice.recipient,
            subject = %notice.subject,
            generated_on = %notice.generated_on,
            risk_rating = %notice.summary.risk_rating,
            "credit file dispatched"
        );
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationSender {
    notices: Arc<Mutex<Vec<CreditFileNotice>>>,
}

impl NotificationSender for InMemoryNotificationSender {
    fn send(&self, notice: CreditFileNotice) -> Result<(), NotificationError> {
        let mut guard = self
            .notices
            .lock()
            .map_err(|_| NotificationError::Transport("notice buffer poisoned".to_string()))?;
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryNotificationSender {
    pub(crate) fn notices(&self) -> Vec<CreditFileNotice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Credit settings from the environment, with an optional snapshot path override.
pub(crate) fn credit_config(dataset: Option<PathBuf>) -> Result<CreditConfig, AppError> {
    let mut config = AppConfig::load()?.credit;
    if let Some(path) = dataset {
        config.dataset_path = path;
    }
    Ok(config)
}

pub(crate) fn load_dataset(path: &Path) -> Result<QawaemDataset, AppError> {
    let dataset = QawaemDataset::from_path(path).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "qawaem snapshot could not be loaded")
    })?;
    info!(
        path = %path.display(),
        companies = dataset.len(),
        "qawaem snapshot loaded"
    );
    Ok(dataset)
}
