use super::rules::{CountRule, CreditRule, InternationalRule, PairRule};
use crate::workflows::election::classifier::classify;
use crate::workflows::election::domain::{Module, ModuleCategory, ModuleElection};
use crate::workflows::election::pairing;
use crate::workflows::election::status::{ElectionStatusBuilder, StatusSlot};

pub(crate) fn category_of(module: &Module) -> Option<ModuleCategory> {
    classify(module.id.as_str(), &module.group)
}

pub fn count_by_category(election: &ModuleElection, category: ModuleCategory) -> u32 {
    election
        .modules()
        .iter()
        .filter(|module| category_of(module) == Some(category))
        .count() as u32
}

pub fn unclassified_modules(election: &ModuleElection) -> Vec<&Module> {
    election
        .modules()
        .iter()
        .filter(|module| category_of(module).is_none())
        .collect()
}

pub fn sum_credits_with_dispensation(election: &ModuleElection, dispensation_credits: u32) -> u32 {
    election
        .modules()
        .iter()
        .map(|module| module.credits)
        .fold(0u32, u32::saturating_add)
        .saturating_add(dispensation_credits)
}

pub fn count_confirmed_consecutive_pairs(election: &ModuleElection) -> u32 {
    pairing::count_pairs(election.modules()).full_pair_count() as u32
}

pub fn count_special_pairs(election: &ModuleElection) -> u32 {
    pairing::count_special_pairs(election.modules()) as u32
}

fn too_few(category: ModuleCategory, by: u32) -> String {
    format!("too few modules of category {category} by {by}")
}

fn too_many(category: ModuleCategory, by: u32) -> String {
    format!("too many modules of category {category} by {by}")
}

pub(crate) fn check_count(
    status: &mut ElectionStatusBuilder,
    slot: StatusSlot,
    category: ModuleCategory,
    count: u32,
    rule: CountRule,
) -> bool {
    match rule {
        CountRule::Exactly(target) if count < target => {
            status.reject(slot, too_few(category, target - count));
            false
        }
        CountRule::Exactly(target) if count > target => {
            status.reject(slot, too_many(category, count - target));
            false
        }
        CountRule::Exactly(_) => true,
        CountRule::AtMost(limit) if count > limit => {
            status.reject(slot, too_many(category, count - limit));
            false
        }
        CountRule::AtMost(_) => true,
        CountRule::CompletesTotal { carried, total } if carried.saturating_add(count) != total => {
            status.reject(
                slot,
                format!(
                    "{category} modules of both elections must add up to {total} \
                     (first election: {carried}, second election: {count})"
                ),
            );
            false
        }
        CountRule::CompletesTotal { .. } => true,
    }
}

pub(crate) fn check_credit_sum(
    status: &mut ElectionStatusBuilder,
    credits: u32,
    rule: CreditRule,
) -> bool {
    if credits < rule.minimum {
        status.reject(
            StatusSlot::Additional,
            format!("missing {} credits", rule.minimum - credits),
        );
        false
    } else if credits > rule.maximum {
        status.reject(
            StatusSlot::Additional,
            format!("{} credits over", credits - rule.maximum),
        );
        false
    } else {
        true
    }
}

pub(crate) fn check_pairs(
    status: &mut ElectionStatusBuilder,
    pairs: u32,
    special_pairs: u32,
    rule: PairRule,
) -> bool {
    let substitute = special_pairs.min(1);
    let (valid, required) = match rule {
        PairRule::Exempt => return true,
        PairRule::OnePairOrSubstitute => (pairs >= 1 || substitute == 1, 1),
        PairRule::TwoPairs => (pairs >= 2 || (pairs == 1 && substitute == 1), 2),
    };

    if !valid {
        let missing = required - (pairs + substitute).min(required - 1);
        status.reject(
            StatusSlot::Subject,
            format!("missing {missing} consecutive pair(s)"),
        );
    }
    valid
}

pub(crate) fn check_international(
    status: &mut ElectionStatusBuilder,
    election: &ModuleElection,
    rule: InternationalRule,
) -> bool {
    let taught: Vec<&Module> = election
        .modules()
        .iter()
        .filter(|module| category_of(module) == Some(ModuleCategory::Subject))
        .filter(|module| module.language.trim().eq_ignore_ascii_case(rule.language))
        .collect();

    let credits = taught
        .iter()
        .map(|module| module.credits)
        .fold(0u32, u32::saturating_add);
    let enough_credits = credits >= rule.minimum_credits;
    if !enough_credits {
        status.reject(
            StatusSlot::Additional,
            format!(
                "missing {} {} credits for the international profile",
                rule.minimum_credits - credits,
                rule.language
            ),
        );
    }

    let designated = taught
        .iter()
        .any(|module| module.short_id.trim() == rule.designated_module);
    if !designated {
        status.reject(
            StatusSlot::Additional,
            format!(
                "international profile requires module {}",
                rule.designated_module
            ),
        );
    }

    enough_credits && designated
}
