use super::rules::{
    dispensed_subject_modules, CountRule, CreditRule, ElectionRules, InternationalRule, PairRule,
    TOTAL_CONTEXT_MODULES,
};
use crate::workflows::election::domain::{Student, ValidationSetting};

pub const SUBJECT_MODULES: u32 = 8;
pub const INTERDISCIPLINARY_MODULES: u32 = 1;
pub const CREDIT_TARGET: u32 = 42;

pub const INTERNATIONAL_LANGUAGE: &str = "English";
pub const INTERNATIONAL_MINIMUM_CREDITS: u32 = 20;
pub const INTERNATIONAL_DESIGNATED_MODULE: &str = "ISE";

/// Yearly targets for full-time students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullTimeElectionRules;

impl ElectionRules for FullTimeElectionRules {
    fn subject_target(&self, student: &Student) -> CountRule {
        CountRule::Exactly(
            SUBJECT_MODULES.saturating_sub(dispensed_subject_modules(student.dispensation_credits)),
        )
    }

    fn context_target(&self, _setting: &ValidationSetting) -> CountRule {
        CountRule::Exactly(TOTAL_CONTEXT_MODULES)
    }

    fn interdisciplinary_target(&self) -> CountRule {
        CountRule::Exactly(INTERDISCIPLINARY_MODULES)
    }

    fn credit_rule(&self, student: &Student) -> CreditRule {
        CreditRule {
            minimum: CREDIT_TARGET,
            maximum: CREDIT_TARGET,
            dispensation: student.dispensation_credits,
        }
    }

    fn pair_rule(&self, _setting: &ValidationSetting) -> PairRule {
        PairRule::TwoPairs
    }

    fn international_rule(&self, student: &Student) -> Option<InternationalRule> {
        student.international_profile.then_some(InternationalRule {
            language: INTERNATIONAL_LANGUAGE,
            minimum_credits: INTERNATIONAL_MINIMUM_CREDITS,
            designated_module: INTERNATIONAL_DESIGNATED_MODULE,
        })
    }
}
