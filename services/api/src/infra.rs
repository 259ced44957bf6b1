use metrics_exporter_prometheus::PrometheusHandle;
use module_election::config::CatalogConfig;
use module_election::error::AppError;
use module_election::workflows::election::{
    CsvModuleCatalog, ElectionNotification, ElectionNotifier, ElectionRecord, ElectionRepository,
    InMemoryModuleCatalog, NotifyError, RepositoryError, StudentId,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Catalog served when `APP_MODULE_CATALOG` is not set.
pub(crate) const DEFAULT_CATALOG_CSV: &str = include_str!("../data/modules.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryElectionRepository {
    records: Arc<Mutex<HashMap<StudentId, ElectionRecord>>>,
}

impl ElectionRepository for InMemoryElectionRepository {
    fn upsert(&self, record: ElectionRecord) -> Result<ElectionRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        guard.insert(record.student.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<ElectionRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn invalid(&self, limit: usize) -> Result<Vec<ElectionRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        let mut records: Vec<ElectionRecord> = guard
            .values()
            .filter(|record| !record.status.is_valid())
            .cloned()
            .collect();
        records.sort_by(|left, right| left.validated_at.cmp(&right.validated_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryElectionNotifier {
    events: Arc<Mutex<Vec<ElectionNotification>>>,
}

impl ElectionNotifier for InMemoryElectionNotifier {
    fn publish(&self, notification: ElectionNotification) -> Result<(), NotifyError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notifier mutex poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryElectionNotifier {
    pub(crate) fn events(&self) -> Vec<ElectionNotification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Load the configured module catalog, falling back to the bundled one.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryModuleCatalog, AppError> {
    let catalog = match &config.module_csv {
        Some(path) => {
            let catalog = CsvModuleCatalog::from_path(path)?;
            info!(path = %path.display(), modules = catalog.len(), "module catalog loaded");
            catalog
        }
        None => default_catalog()?,
    };
    Ok(catalog)
}

pub(crate) fn default_catalog() -> Result<InMemoryModuleCatalog, AppError> {
    Ok(CsvModuleCatalog::from_reader(Cursor::new(
        DEFAULT_CATALOG_CSV,
    ))?)
}
