use super::common::*;
use crate::workflows::election::domain::{
    ElectionError, ModuleElection, Student, ValidationSetting,
};
use crate::workflows::election::status::ElectionStatus;
use crate::workflows::election::validation::{ElectionValidator, RuleSet};

fn validate(student: Student, ids: &[&str], setting: ValidationSetting) -> ElectionStatus {
    let election = election(student.clone(), ids, setting);
    ElectionValidator::for_student(&student)
        .validate(&election)
        .expect("validator matches election student")
}

fn second_round_setting() -> ValidationSetting {
    ValidationSetting {
        elected_context_modules_in_first_election: 2,
        ..ValidationSetting::default()
    }
}

#[test]
fn canonical_full_time_election_is_valid() {
    let status = validate(
        full_time_student(),
        &canonical_full_time_ids(),
        ValidationSetting::default(),
    );

    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
    assert!(status.reasons().is_empty());
    assert!(status.warnings.is_empty());
    assert_eq!(status.summary(), "election valid");
}

#[test]
fn input_order_does_not_change_the_verdict() {
    let mut reversed = canonical_full_time_ids();
    reversed.reverse();

    let forward = validate(
        full_time_student(),
        &canonical_full_time_ids(),
        ValidationSetting::default(),
    );
    let backward = validate(full_time_student(), &reversed, ValidationSetting::default());
    assert_eq!(forward, backward);
}

#[test]
fn missing_context_module_only_fails_context_and_credits() {
    let ids = without(&canonical_full_time_ids(), SOE);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert!(!status.is_valid());
    assert!(status.subject.valid);
    assert!(status.interdisciplinary.valid);
    assert_eq!(
        status.context.reasons,
        vec!["too few modules of category context by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["missing 2 credits"]);
}

#[test]
fn missing_interdisciplinary_module_only_fails_interdisciplinary_and_credits() {
    let ids = without(&canonical_full_time_ids(), PSY);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert!(status.subject.valid);
    assert!(status.context.valid);
    assert_eq!(
        status.interdisciplinary.reasons,
        vec!["too few modules of category interdisciplinary by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["missing 4 credits"]);
}

#[test]
fn missing_subject_module_only_fails_subject_and_credits() {
    let ids = without(&canonical_full_time_ids(), DB);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert!(status.context.valid);
    assert!(status.interdisciplinary.valid);
    assert_eq!(
        status.subject.reasons,
        vec!["too few modules of category subject by 1"]
    );
    assert!(!status.additional.valid);
}

#[test]
fn extra_subject_module_is_too_many() {
    let mut ids = canonical_full_time_ids();
    ids.push(PSPP);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert_eq!(
        status.subject.reasons,
        vec!["too many modules of category subject by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["4 credits over"]);
}

#[test]
fn shared_prefix_modules_count_by_group() {
    let ids = without(&canonical_full_time_ids(), ETHIK);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());
    assert!(!status.context.valid);
    assert!(status.subject.valid, "DB counts as subject via its group");
}

#[test]
fn dispensation_trades_one_subject_module_for_its_credits() {
    let student = Student {
        dispensation_credits: 4,
        ..full_time_student()
    };

    let ids = without(&canonical_full_time_ids(), DB);
    let status = validate(student.clone(), &ids, ValidationSetting::default());
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());

    let status = validate(
        student,
        &canonical_full_time_ids(),
        ValidationSetting::default(),
    );
    assert_eq!(
        status.subject.reasons,
        vec!["too many modules of category subject by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["4 credits over"]);
}

#[test]
fn one_pair_with_substitute_satisfies_full_time_pairs() {
    let mut ids = without(&without(&canonical_full_time_ids(), SE1), SE2);
    ids.extend([PSPP, PM3]);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn single_pair_without_substitute_is_reported() {
    let mut ids = without(&canonical_full_time_ids(), SE2);
    ids.push(PSPP);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert_eq!(status.subject.reasons, vec!["missing 1 consecutive pair(s)"]);
    assert!(status.additional.valid);
}

#[test]
fn subject_count_and_pairs_are_both_reported() {
    let ids = without(&without(&canonical_full_time_ids(), SE2), DB);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert_eq!(
        status.subject.reasons,
        vec![
            "too few modules of category subject by 2",
            "missing 1 consecutive pair(s)",
        ]
    );
}

#[test]
fn international_profile_accepts_canonical_election() {
    let status = validate(
        international_student(),
        &canonical_full_time_ids(),
        ValidationSetting::default(),
    );
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn international_profile_requires_english_credits_and_designated_module() {
    let mut ids = without(&canonical_full_time_ids(), ISE);
    ids.push(PSPP);

    let regular = validate(full_time_student(), &ids, ValidationSetting::default());
    assert!(regular.is_valid(), "unexpected reasons: {:?}", regular.reasons());

    let status = validate(international_student(), &ids, ValidationSetting::default());
    assert!(status.subject.valid);
    assert_eq!(
        status.additional.reasons,
        vec![
            "missing 4 English credits for the international profile",
            "international profile requires module ISE",
        ]
    );
}

#[test]
fn repeating_student_is_exempt_even_without_modules() {
    let student = Student {
        repeating: true,
        ..full_time_student()
    };
    let status = validate(student, &[], ValidationSetting::default());

    assert!(status.is_valid());
    assert!(status.reasons().is_empty());
}

#[test]
fn unclassified_modules_warn_but_still_add_credits() {
    let mut ids = canonical_full_time_ids();
    ids.push(THESIS);
    let status = validate(full_time_student(), &ids, ValidationSetting::default());

    assert_eq!(
        status.warnings,
        vec![format!("module {THESIS} does not count towards any category")]
    );
    assert!(status.subject.valid);
    assert!(status.context.valid);
    assert!(status.interdisciplinary.valid);
    assert_eq!(status.additional.reasons, vec!["4 credits over"]);
}

#[test]
fn part_time_first_round_is_valid_without_pairs() {
    let status = validate(
        part_time_student(false),
        &part_time_first_round_ids(),
        ValidationSetting::default(),
    );
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn part_time_first_round_rejects_interdisciplinary_modules() {
    let mut ids = part_time_first_round_ids();
    ids.push(PSY);
    let status = validate(part_time_student(false), &ids, ValidationSetting::default());

    assert_eq!(
        status.interdisciplinary.reasons,
        vec!["too many modules of category interdisciplinary by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["2 credits over"]);
}

#[test]
fn part_time_first_round_caps_context_modules() {
    let mut ids = part_time_first_round_ids();
    ids.extend([ETHIK, LAW]);
    let status = validate(part_time_student(false), &ids, ValidationSetting::default());

    assert!(status.subject.valid);
    assert_eq!(
        status.context.reasons,
        vec!["too many modules of category context by 1"]
    );
    assert_eq!(status.additional.reasons, vec!["2 credits over"]);
}

#[test]
fn part_time_first_round_ignores_dispensation() {
    let student = Student {
        dispensation_credits: 4,
        ..part_time_student(false)
    };
    let status = validate(
        student,
        &part_time_first_round_ids(),
        ValidationSetting::default(),
    );
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn part_time_second_round_completes_context_total() {
    let status = validate(
        part_time_student(true),
        &part_time_second_round_ids(),
        second_round_setting(),
    );
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());

    let status = validate(
        part_time_student(true),
        &part_time_second_round_ids(),
        ValidationSetting::default(),
    );
    assert!(status.subject.valid);
    assert_eq!(
        status.context.reasons,
        vec![
            "context modules of both elections must add up to 3 \
             (first election: 0, second election: 1)"
        ]
    );
}

#[test]
fn part_time_second_round_pair_settings() {
    let one_pair = [AI1, AI2, DB, ML, CLD, ISE, PSY, ETHIK];

    let status = validate(part_time_student(true), &one_pair, second_round_setting());
    assert_eq!(status.subject.reasons, vec!["missing 1 consecutive pair(s)"]);

    let relaxed = ValidationSetting {
        had_already_elected_two_consecutive_pairs: true,
        ..second_round_setting()
    };
    let status = validate(part_time_student(true), &one_pair, relaxed);
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());

    let with_substitute = [AI1, AI2, DB, ML, PSPP, PM3, PSY, ETHIK];
    let status = validate(
        part_time_student(true),
        &with_substitute,
        second_round_setting(),
    );
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn part_time_second_round_can_skip_pair_check() {
    let no_pairs = [AI1, DB, ML, CLD, ISE, PSPP, PSY, ETHIK];

    let status = validate(part_time_student(true), &no_pairs, second_round_setting());
    assert_eq!(status.subject.reasons, vec!["missing 2 consecutive pair(s)"]);

    let skipped = ValidationSetting {
        skip_consecutive_pair_check: true,
        ..second_round_setting()
    };
    let status = validate(part_time_student(true), &no_pairs, skipped);
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn part_time_second_round_applies_dispensation() {
    let student = Student {
        dispensation_credits: 4,
        ..part_time_student(true)
    };
    let ids = without(&part_time_second_round_ids(), DB);
    let status = validate(student, &ids, second_round_setting());
    assert!(status.is_valid(), "unexpected reasons: {:?}", status.reasons());
}

#[test]
fn validator_rejects_elections_of_other_students() {
    let validator = ElectionValidator::for_student(&full_time_student());
    let foreign = election(
        international_student(),
        &canonical_full_time_ids(),
        ValidationSetting::default(),
    );

    match validator.validate(&foreign) {
        Err(ElectionError::StudentMismatch { expected, found }) => {
            assert_eq!(expected, full_time_student().id);
            assert_eq!(found, international_student().id);
        }
        other => panic!("expected student mismatch, got {other:?}"),
    }
}

#[test]
fn rule_set_follows_enrollment_and_round() {
    assert_eq!(RuleSet::for_student(&full_time_student()).label(), "full_time");
    assert_eq!(
        RuleSet::for_student(&part_time_student(false)).label(),
        "part_time_first"
    );
    assert_eq!(
        RuleSet::for_student(&part_time_student(true)).label(),
        "part_time_second"
    );
}

#[test]
fn oversized_credit_values_saturate_instead_of_overflowing() {
    let student = international_student();
    let mut modules: Vec<_> = catalog_modules()
        .into_iter()
        .filter(|module| module.id.as_str() == AI1 || module.id.as_str() == ISE)
        .collect();
    modules[0].credits = u32::MAX;
    let election = ModuleElection::new(student.clone(), modules, ValidationSetting::default())
        .expect("election is well formed");

    let status = ElectionValidator::for_student(&student)
        .validate(&election)
        .expect("validator matches election student");

    assert!(!status.is_valid());
    assert_eq!(
        status.additional.reasons,
        vec![format!("{} credits over", u32::MAX - 42)]
    );
}
