use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ModuleId, Student, StudentId, ValidationSetting};
use super::status::ElectionStatus;

/// Stored election together with the verdict it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionRecord {
    pub student: Student,
    pub module_ids: Vec<ModuleId>,
    pub setting: ValidationSetting,
    pub status: ElectionStatus,
    pub validated_at: DateTime<Utc>,
}

impl ElectionRecord {
    pub fn status_view(&self) -> ElectionStatusView {
        ElectionStatusView {
            student_id: self.student.id.clone(),
            valid: self.status.is_valid(),
            summary: self.status.summary(),
            module_ids: self.module_ids.clone(),
            status: self.status.clone(),
            validated_at: self.validated_at,
        }
    }
}

/// One election per student; storing again replaces the previous election.
pub trait ElectionRepository: Send + Sync {
    fn upsert(&self, record: ElectionRecord) -> Result<ElectionRecord, RepositoryError>;
    fn fetch(&self, id: &StudentId) -> Result<Option<ElectionRecord>, RepositoryError>;
    fn invalid(&self, limit: usize) -> Result<Vec<ElectionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("election not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (chat, e-mail).
pub trait ElectionNotifier: Send + Sync {
    fn publish(&self, notification: ElectionNotification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionNotification {
    pub template: String,
    pub student_id: StudentId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Response shape for a stored election.
#[derive(Debug, Clone, Serialize)]
pub struct ElectionStatusView {
    pub student_id: StudentId,
    pub valid: bool,
    pub summary: String,
    pub module_ids: Vec<ModuleId>,
    pub status: ElectionStatus,
    pub validated_at: DateTime<Utc>,
}
