mod arithmetic;
mod full_time;
mod part_time;
mod rules;

pub use arithmetic::{
    count_by_category, count_confirmed_consecutive_pairs, count_special_pairs,
    sum_credits_with_dispensation, unclassified_modules,
};
pub use full_time::FullTimeElectionRules;
pub use part_time::PartTimeElectionRules;
pub use rules::{
    dispensed_subject_modules, CountRule, CreditRule, ElectionRules, InternationalRule, PairRule,
    RuleSet, CREDITS_PER_SUBJECT_MODULE, TOTAL_CONTEXT_MODULES,
};

use super::domain::{ElectionError, ModuleCategory, ModuleElection, Student};
use super::status::{ElectionStatus, StatusSlot};
use arithmetic::{check_count, check_credit_sum, check_international, check_pairs};
use tracing::{debug, warn};

/// Validates module elections of one student against the quota rules of their enrollment.
///
/// A validator is cheap to build; construct one per election being checked. Every call to
/// [`ElectionValidator::validate`] builds a fresh [`ElectionStatus`].
#[derive(Debug, Clone)]
pub struct ElectionValidator {
    student: Student,
    rules: RuleSet,
}

impl ElectionValidator {
    pub fn for_student(student: &Student) -> Self {
        Self::with_rules(student, RuleSet::for_student(student))
    }

    pub fn with_rules(student: &Student, rules: RuleSet) -> Self {
        Self {
            student: student.clone(),
            rules,
        }
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn validate(&self, election: &ModuleElection) -> Result<ElectionStatus, ElectionError> {
        if election.student().id != self.student.id {
            return Err(ElectionError::StudentMismatch {
                expected: self.student.id.clone(),
                found: election.student().id.clone(),
            });
        }

        let mut status = ElectionStatus::builder();

        if self.student.repeating {
            debug!(student = %self.student.id.0, "repeating student exempt from quota validation");
            return Ok(status.build());
        }

        for module in unclassified_modules(election) {
            warn!(
                student = %self.student.id.0,
                module = %module.id,
                "module outside every quota category"
            );
            status.warn(format!(
                "module {} does not count towards any category",
                module.id
            ));
        }

        let rules = self.rules.rules();
        let setting = election.setting();

        let subject_count = count_by_category(election, ModuleCategory::Subject);
        let pairs = count_confirmed_consecutive_pairs(election);
        let special_pairs = count_special_pairs(election);
        check_count(
            &mut status,
            StatusSlot::Subject,
            ModuleCategory::Subject,
            subject_count,
            rules.subject_target(&self.student),
        );
        check_pairs(&mut status, pairs, special_pairs, rules.pair_rule(setting));

        check_count(
            &mut status,
            StatusSlot::Context,
            ModuleCategory::Context,
            count_by_category(election, ModuleCategory::Context),
            rules.context_target(setting),
        );

        check_count(
            &mut status,
            StatusSlot::Interdisciplinary,
            ModuleCategory::Interdisciplinary,
            count_by_category(election, ModuleCategory::Interdisciplinary),
            rules.interdisciplinary_target(),
        );

        let credit_rule = rules.credit_rule(&self.student);
        let credits = sum_credits_with_dispensation(election, credit_rule.dispensation);
        check_credit_sum(&mut status, credits, credit_rule);
        if let Some(international) = rules.international_rule(&self.student) {
            check_international(&mut status, election, international);
        }

        let status = status.build();
        debug!(
            student = %self.student.id.0,
            rules = self.rules.label(),
            subject_count,
            pairs,
            special_pairs,
            credits,
            valid = status.is_valid(),
            "election validated"
        );
        Ok(status)
    }
}
