use super::rules::{
    dispensed_subject_modules, CountRule, CreditRule, ElectionRules, InternationalRule, PairRule,
    TOTAL_CONTEXT_MODULES,
};
use crate::workflows::election::domain::{Student, ValidationSetting};

pub const FIRST_ROUND_SUBJECT_MODULES: u32 = 2;
pub const SECOND_ROUND_SUBJECT_MODULES: u32 = 6;
pub const SECOND_ROUND_INTERDISCIPLINARY_MODULES: u32 = 1;
pub const FIRST_ROUND_MINIMUM_CREDITS: u32 = 8;
pub const SECOND_ROUND_MINIMUM_CREDITS: u32 = 28;
/// Credits a context module is worth; the upper credit bound leaves room for all of them.
pub const CONTEXT_MODULE_CREDITS: u32 = 2;

/// Thresholds for part-time students, which elect twice per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartTimeElectionRules {
    second_election: bool,
}

impl PartTimeElectionRules {
    pub const fn first_round() -> Self {
        Self {
            second_election: false,
        }
    }

    pub const fn second_round() -> Self {
        Self {
            second_election: true,
        }
    }

    pub const fn for_round(second_election: bool) -> Self {
        Self { second_election }
    }

    pub const fn is_second_election(&self) -> bool {
        self.second_election
    }

    fn credit_range(minimum: u32, dispensation: u32) -> CreditRule {
        CreditRule {
            minimum,
            maximum: minimum + CONTEXT_MODULE_CREDITS * TOTAL_CONTEXT_MODULES,
            dispensation,
        }
    }
}

impl ElectionRules for PartTimeElectionRules {
    fn subject_target(&self, student: &Student) -> CountRule {
        if self.second_election {
            CountRule::Exactly(
                SECOND_ROUND_SUBJECT_MODULES
                    .saturating_sub(dispensed_subject_modules(student.dispensation_credits)),
            )
        } else {
            CountRule::Exactly(FIRST_ROUND_SUBJECT_MODULES)
        }
    }

    fn context_target(&self, setting: &ValidationSetting) -> CountRule {
        if self.second_election {
            CountRule::CompletesTotal {
                carried: setting.elected_context_modules_in_first_election,
                total: TOTAL_CONTEXT_MODULES,
            }
        } else {
            // The second-round count is unknown yet.
            CountRule::AtMost(TOTAL_CONTEXT_MODULES)
        }
    }

    fn interdisciplinary_target(&self) -> CountRule {
        if self.second_election {
            CountRule::Exactly(SECOND_ROUND_INTERDISCIPLINARY_MODULES)
        } else {
            CountRule::Exactly(0)
        }
    }

    fn credit_rule(&self, student: &Student) -> CreditRule {
        if self.second_election {
            Self::credit_range(SECOND_ROUND_MINIMUM_CREDITS, student.dispensation_credits)
        } else {
            Self::credit_range(FIRST_ROUND_MINIMUM_CREDITS, 0)
        }
    }

    fn pair_rule(&self, setting: &ValidationSetting) -> PairRule {
        if !self.second_election || setting.skip_consecutive_pair_check {
            PairRule::Exempt
        } else if setting.had_already_elected_two_consecutive_pairs {
            PairRule::OnePairOrSubstitute
        } else {
            PairRule::TwoPairs
        }
    }

    fn international_rule(&self, _student: &Student) -> Option<InternationalRule> {
        None
    }
}
