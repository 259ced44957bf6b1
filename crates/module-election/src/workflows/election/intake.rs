use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::ModuleCatalog;
use super::domain::{
    ElectionError, EnrollmentMode, ModuleElection, ModuleId, Student, ValidationSetting,
};

/// Raw election as entered by a student: module identifiers still unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSubmission {
    pub student: Student,
    pub module_ids: Vec<String>,
    #[serde(default)]
    pub setting: ValidationSetting,
}

/// Submissions the intake refuses to turn into an election.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("module identifier must not be blank")]
    BlankModuleIdentifier,
    #[error("module {0} is not offered in the catalog")]
    UnknownModule(String),
    #[error("module {0} was elected more than once")]
    DuplicateModule(String),
    #[error("only part-time students take a second election")]
    SecondElectionForFullTime,
    #[error(transparent)]
    Election(#[from] ElectionError),
}

/// Resolves submissions against the module catalog.
pub struct ElectionIntake<C> {
    catalog: Arc<C>,
}

impl<C> ElectionIntake<C>
where
    C: ModuleCatalog + 'static,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn hydrate(&self, submission: ElectionSubmission) -> Result<ModuleElection, IntakeViolation> {
        let ElectionSubmission {
            student,
            module_ids,
            setting,
        } = submission;

        if student.second_election && student.enrollment == EnrollmentMode::FullTime {
            return Err(IntakeViolation::SecondElectionForFullTime);
        }

        let mut seen = BTreeSet::new();
        let mut modules = Vec::with_capacity(module_ids.len());
        for raw in module_ids {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(IntakeViolation::BlankModuleIdentifier);
            }
            if !seen.insert(trimmed.to_string()) {
                return Err(IntakeViolation::DuplicateModule(trimmed.to_string()));
            }

            let module = self
                .catalog
                .module(&ModuleId(trimmed.to_string()))
                .ok_or_else(|| IntakeViolation::UnknownModule(trimmed.to_string()))?;
            modules.push(module);
        }

        Ok(ModuleElection::new(student, modules, setting)?)
    }
}
