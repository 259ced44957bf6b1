use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Globally unique module identifier, e.g. `t.BA.WM.AI1-EN.19HS`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semester in which a module runs. Carried for course-structure views only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    Autumn,
    Spring,
}

/// Catalog entry for an elective module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub short_id: String,
    pub title: String,
    pub credits: u32,
    pub language: String,
    pub group: String,
    /// Reference to the consecutive counterpart. Blank and absent mean the same thing.
    #[serde(default)]
    pub paired_module: Option<String>,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl Module {
    pub fn declares_pairing(&self) -> bool {
        self.paired_module
            .as_deref()
            .map(|reference| !reference.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Curriculum quota categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModuleCategory {
    Subject,
    Context,
    Interdisciplinary,
}

impl ModuleCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ModuleCategory::Subject => "subject",
            ModuleCategory::Context => "context",
            ModuleCategory::Interdisciplinary => "interdisciplinary",
        }
    }
}

impl std::fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentMode {
    FullTime,
    PartTime,
}

/// Student profile as far as the election rules are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub enrollment: EnrollmentMode,
    #[serde(default)]
    pub international_profile: bool,
    #[serde(default)]
    pub repeating: bool,
    /// Only meaningful for part-time students.
    #[serde(default)]
    pub second_election: bool,
    #[serde(default)]
    pub dispensation_credits: u32,
}

/// Student-entered flags consumed by the part-time rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSetting {
    #[serde(default)]
    pub had_already_elected_two_consecutive_pairs: bool,
    #[serde(default)]
    pub skip_consecutive_pair_check: bool,
    #[serde(default)]
    pub elected_context_modules_in_first_election: u32,
}

/// A hydrated election: the student, the elected modules, and the validation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleElection {
    student: Student,
    modules: Vec<Module>,
    setting: ValidationSetting,
}

impl ModuleElection {
    /// Build an election, rejecting blank identifiers and duplicate modules.
    pub fn new(
        student: Student,
        modules: Vec<Module>,
        setting: ValidationSetting,
    ) -> Result<Self, ElectionError> {
        if student.id.0.trim().is_empty() {
            return Err(ElectionError::MissingStudent);
        }

        let mut seen = BTreeSet::new();
        for module in &modules {
            if module.id.0.trim().is_empty() {
                return Err(ElectionError::BlankModuleIdentifier);
            }
            if !seen.insert(module.id.clone()) {
                return Err(ElectionError::DuplicateModule(module.id.clone()));
            }
        }

        Ok(Self {
            student,
            modules,
            setting,
        })
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn setting(&self) -> &ValidationSetting {
        &self.setting
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|module| module.id.clone()).collect()
    }
}

/// Contract violations by the caller of the election engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectionError {
    #[error("election has no student")]
    MissingStudent,
    #[error("elected module has a blank identifier")]
    BlankModuleIdentifier,
    #[error("module {0} was elected more than once")]
    DuplicateModule(ModuleId),
    #[error("election belongs to student {found:?} but the validator was built for {expected:?}")]
    StudentMismatch { expected: StudentId, found: StudentId },
}
