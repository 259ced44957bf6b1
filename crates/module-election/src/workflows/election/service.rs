use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::catalog::ModuleCatalog;
use super::domain::{ElectionError, ModuleElection, StudentId};
use super::intake::{ElectionIntake, ElectionSubmission, IntakeViolation};
use super::repository::{
    ElectionNotification, ElectionNotifier, ElectionRecord, ElectionRepository, NotifyError,
    RepositoryError,
};
use super::status::ElectionStatus;
use super::validation::ElectionValidator;

/// Service composing catalog intake, validation, storage, and notifications.
pub struct ElectionService<C, R, N> {
    intake: ElectionIntake<C>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<C, R, N> ElectionService<C, R, N>
where
    C: ModuleCatalog + 'static,
    R: ElectionRepository + 'static,
    N: ElectionNotifier + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            intake: ElectionIntake::new(catalog),
            repository,
            notifier,
        }
    }

    pub fn catalog(&self) -> &C {
        self.intake.catalog()
    }

    /// Validate a submission without storing it.
    pub fn preview(
        &self,
        submission: ElectionSubmission,
    ) -> Result<ElectionStatus, ElectionServiceError> {
        let election = self.hydrate(submission)?;
        Ok(validate(&election)?)
    }

    /// Validate and store a submission, then notify the student about the verdict.
    pub fn submit(
        &self,
        submission: ElectionSubmission,
    ) -> Result<ElectionRecord, ElectionServiceError> {
        let election = self.hydrate(submission)?;
        let status = validate(&election)?;

        let record = ElectionRecord {
            student: election.student().clone(),
            module_ids: election.module_ids(),
            setting: *election.setting(),
            status,
            validated_at: Utc::now(),
        };
        let stored = self.repository.upsert(record)?;

        let notification = notification_for(&stored);
        self.notifier.publish(notification)?;

        info!(
            student = %stored.student.id.0,
            modules = stored.module_ids.len(),
            valid = stored.status.is_valid(),
            "election stored"
        );
        Ok(stored)
    }

    /// Fetch the stored election of a student.
    pub fn get(&self, student_id: &StudentId) -> Result<ElectionRecord, ElectionServiceError> {
        let record = self
            .repository
            .fetch(student_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn hydrate(&self, submission: ElectionSubmission) -> Result<ModuleElection, IntakeViolation> {
        let student = submission.student.id.0.clone();
        self.intake.hydrate(submission).map_err(|violation| {
            warn!(student = %student, %violation, "election submission rejected");
            violation
        })
    }
}

fn validate(election: &ModuleElection) -> Result<ElectionStatus, ElectionError> {
    ElectionValidator::for_student(election.student()).validate(election)
}

fn notification_for(record: &ElectionRecord) -> ElectionNotification {
    let mut details = BTreeMap::new();
    details.insert("summary".to_string(), record.status.summary());

    let template = if record.status.is_valid() {
        "election_confirmed"
    } else {
        details.insert("reasons".to_string(), record.status.reasons().join("; "));
        "election_rejected"
    };

    ElectionNotification {
        template: template.to_string(),
        student_id: record.student.id.clone(),
        details,
    }
}

/// Error raised by the election service.
#[derive(Debug, thiserror::Error)]
pub enum ElectionServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Election(#[from] ElectionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
