use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::election::catalog::InMemoryModuleCatalog;
use crate::workflows::election::domain::{
    EnrollmentMode, Module, ModuleElection, ModuleId, Semester, Student, StudentId,
    ValidationSetting,
};
use crate::workflows::election::intake::ElectionSubmission;
use crate::workflows::election::repository::{
    ElectionNotification, ElectionNotifier, ElectionRecord, ElectionRepository, NotifyError,
    RepositoryError,
};
use crate::workflows::election::{election_router, ElectionService};

pub(super) const SOE: &str = "t.BA.WVK.SOE.19HS";
pub(super) const ENG: &str = "t.BA.XXK.ENG.19HS";
pub(super) const ETHIK: &str = "t.BA.WV.ETHIK.19HS";
pub(super) const LAW: &str = "t.BA.WVK.LAW.20FS";
pub(super) const PSY: &str = "t.BA.WU.PSY.19HS";
pub(super) const AI1: &str = "t.BA.WM.AI1-EN.19HS";
pub(super) const AI2: &str = "t.BA.WM.AI2-EN.20FS";
pub(super) const SE1: &str = "t.BA.WM.SE1.19HS";
pub(super) const SE2: &str = "t.BA.WM.SE2.20FS";
pub(super) const ISE: &str = "t.BA.WM.ISE-EN.19HS";
pub(super) const ML: &str = "t.BA.WM.ML-EN.20FS";
pub(super) const CLD: &str = "t.BA.WM.CLD-EN.19HS";
pub(super) const DB: &str = "t.BA.WV.DB.19HS";
pub(super) const PSPP: &str = "t.BA.WV.PSPP.19HS";
pub(super) const PM3: &str = "t.BA.WM.PM3.20FS";
pub(super) const THESIS: &str = "m.MA.XY.19HS";

fn module(
    id: &str,
    short_id: &str,
    credits: u32,
    language: &str,
    group: &str,
    paired: Option<&str>,
) -> Module {
    Module {
        id: ModuleId(id.to_string()),
        short_id: short_id.to_string(),
        title: format!("Module {short_id}"),
        credits,
        language: language.to_string(),
        group: group.to_string(),
        paired_module: paired.map(str::to_string),
        semesters: vec![Semester::Autumn],
    }
}

pub(super) fn catalog_modules() -> Vec<Module> {
    vec![
        module(SOE, "SOE", 2, "German", "IT5", None),
        module(ENG, "ENG", 2, "English", "", None),
        module(ETHIK, "ETHIK", 2, "German", "IT5 Kontext", None),
        module(LAW, "LAW", 2, "German", "IT5", None),
        module(PSY, "PSY", 4, "German", "", None),
        module(AI1, "AI1", 4, "English", "IT6", Some(AI2)),
        module(AI2, "AI2", 4, "English", "IT6", Some(AI1)),
        module(SE1, "SE1", 4, "German", "IT6", Some(SE2)),
        module(SE2, "SE2", 4, "German", "IT6", Some(SE1)),
        module(ISE, "ISE", 4, "English", "IT6", None),
        module(ML, "ML", 4, "English", "IT6", None),
        module(CLD, "CLD", 4, "English", "IT6", None),
        module(DB, "DB", 4, "German", "WV-IT6", None),
        module(PSPP, "PSPP", 4, "German", "IT6", None),
        module(PM3, "PM3", 4, "German", "IT6", None),
        module(THESIS, "XY", 4, "German", "", None),
    ]
}

pub(super) fn catalog() -> InMemoryModuleCatalog {
    InMemoryModuleCatalog::new(catalog_modules()).expect("fixture catalog is consistent")
}

pub(super) fn full_time_student() -> Student {
    Student {
        id: StudentId("ft-001".to_string()),
        enrollment: EnrollmentMode::FullTime,
        international_profile: false,
        repeating: false,
        second_election: false,
        dispensation_credits: 0,
    }
}

pub(super) fn international_student() -> Student {
    Student {
        id: StudentId("ip-001".to_string()),
        international_profile: true,
        ..full_time_student()
    }
}

pub(super) fn part_time_student(second_election: bool) -> Student {
    Student {
        id: StudentId("pt-001".to_string()),
        enrollment: EnrollmentMode::PartTime,
        international_profile: false,
        repeating: false,
        second_election,
        dispensation_credits: 0,
    }
}

/// 3 context, 1 interdisciplinary, 8 subject modules with two pairs: 42 credits.
pub(super) fn canonical_full_time_ids() -> Vec<&'static str> {
    vec![
        SOE, ENG, ETHIK, PSY, AI1, AI2, SE1, SE2, ISE, ML, CLD, DB,
    ]
}

pub(super) fn part_time_first_round_ids() -> Vec<&'static str> {
    vec![DB, ML, SOE, ENG]
}

pub(super) fn part_time_second_round_ids() -> Vec<&'static str> {
    vec![AI1, AI2, SE1, SE2, DB, ML, PSY, ETHIK]
}

pub(super) fn without(ids: &[&'static str], removed: &str) -> Vec<&'static str> {
    ids.iter().copied().filter(|id| *id != removed).collect()
}

pub(super) fn election(
    student: Student,
    ids: &[&str],
    setting: ValidationSetting,
) -> ModuleElection {
    let modules = catalog_modules();
    let elected = ids
        .iter()
        .map(|id| {
            modules
                .iter()
                .find(|module| module.id.as_str() == *id)
                .cloned()
                .expect("fixture module exists")
        })
        .collect();
    ModuleElection::new(student, elected, setting).expect("fixture election is well formed")
}

pub(super) fn submission(
    student: Student,
    ids: &[&str],
    setting: ValidationSetting,
) -> ElectionSubmission {
    ElectionSubmission {
        student,
        module_ids: ids.iter().map(|id| id.to_string()).collect(),
        setting,
    }
}

pub(super) fn build_service() -> (
    ElectionService<InMemoryModuleCatalog, MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ElectionService::new(Arc::new(catalog()), repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<StudentId, ElectionRecord>>>,
}

impl ElectionRepository for MemoryRepository {
    fn upsert(&self, record: ElectionRecord) -> Result<ElectionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.student.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<ElectionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn invalid(&self, limit: usize) -> Result<Vec<ElectionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| !record.status.is_valid())
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<ElectionNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<ElectionNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ElectionNotifier for MemoryNotifier {
    fn publish(&self, notification: ElectionNotification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ElectionRepository for UnavailableRepository {
    fn upsert(&self, _record: ElectionRecord) -> Result<ElectionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &StudentId) -> Result<Option<ElectionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn invalid(&self, _limit: usize) -> Result<Vec<ElectionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineNotifier;

impl ElectionNotifier for OfflineNotifier {
    fn publish(&self, _notification: ElectionNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("chat gateway down".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_unprocessable(response: &Response) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

pub(super) fn router_with_service(
    service: ElectionService<InMemoryModuleCatalog, MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    election_router(Arc::new(service))
}
