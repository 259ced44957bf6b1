use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::full_time::FullTimeElectionRules;
use super::part_time::PartTimeElectionRules;
use crate::workflows::election::domain::{EnrollmentMode, Student, ValidationSetting};

/// Credit value of a regular subject module; dispensation credits convert at this rate.
pub const CREDITS_PER_SUBJECT_MODULE: u32 = 4;

/// Context modules a student elects over the whole year.
pub const TOTAL_CONTEXT_MODULES: u32 = 3;

/// How many modules of a category an election must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountRule {
    Exactly(u32),
    AtMost(u32),
    /// This election plus the modules already elected in the first round must hit `total`.
    CompletesTotal { carried: u32, total: u32 },
}

/// Accepted credit range, with the dispensation credits added to the elected credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRule {
    pub minimum: u32,
    pub maximum: u32,
    pub dispensation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairRule {
    Exempt,
    /// One confirmed pair, or the substitute pair.
    OnePairOrSubstitute,
    /// Two confirmed pairs, or one confirmed pair plus the substitute pair.
    TwoPairs,
}

/// English-track requirement for international profile students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InternationalRule {
    pub language: &'static str,
    pub minimum_credits: u32,
    pub designated_module: &'static str,
}

/// Enrollment-specific thresholds plugged into the shared validation engine.
pub trait ElectionRules: Debug + Send + Sync {
    fn subject_target(&self, student: &Student) -> CountRule;
    fn context_target(&self, setting: &ValidationSetting) -> CountRule;
    fn interdisciplinary_target(&self) -> CountRule;
    fn credit_rule(&self, student: &Student) -> CreditRule;
    fn pair_rule(&self, setting: &ValidationSetting) -> PairRule;
    fn international_rule(&self, student: &Student) -> Option<InternationalRule>;
}

/// Rule set chosen by enrollment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    FullTime(FullTimeElectionRules),
    PartTime(PartTimeElectionRules),
}

impl RuleSet {
    pub fn for_student(student: &Student) -> Self {
        match student.enrollment {
            EnrollmentMode::FullTime => RuleSet::FullTime(FullTimeElectionRules),
            EnrollmentMode::PartTime => {
                RuleSet::PartTime(PartTimeElectionRules::for_round(student.second_election))
            }
        }
    }

    pub fn rules(&self) -> &dyn ElectionRules {
        match self {
            RuleSet::FullTime(rules) => rules,
            RuleSet::PartTime(rules) => rules,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleSet::FullTime(_) => "full_time",
            RuleSet::PartTime(rules) if rules.is_second_election() => "part_time_second",
            RuleSet::PartTime(_) => "part_time_first",
        }
    }
}

/// Subject modules a student no longer has to elect thanks to dispensation credits.
pub fn dispensed_subject_modules(dispensation_credits: u32) -> u32 {
    dispensation_credits / CREDITS_PER_SUBJECT_MODULE
}
