//! Recognition of consecutive module pairs (part 1 / part 2 of the same topic).
//!
//! Catalog data declares consecutiveness through the paired-module reference, but that
//! reference is often shared loosely by a whole module family. A pair is therefore only
//! confirmed when both modules declare a reference and their short identifiers differ in
//! nothing but a trailing number (`AI1` / `AI2`).

use std::collections::BTreeSet;

use super::domain::Module;

/// Module pairs the curriculum accepts in place of a consecutive pair, by short identifier.
pub const SUBSTITUTE_PAIRS: &[(&str, &str)] = &[("PSPP", "PM3")];

/// Result of pairing an elected module set.
#[derive(Debug, Clone, Default)]
pub struct ConsecutivePairs<'a> {
    confirmed: Vec<(&'a Module, &'a Module)>,
    unmatched: Vec<&'a Module>,
}

impl<'a> ConsecutivePairs<'a> {
    pub fn full_pair_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Confirmed pairs, ordered by the identifier of the first module.
    pub fn confirmed(&self) -> impl Iterator<Item = (&'a Module, &'a Module)> + '_ {
        self.confirmed.iter().copied()
    }

    /// Candidates that declare a pairing but found no confirmed partner.
    pub fn unmatched(&self) -> impl Iterator<Item = &'a Module> + '_ {
        self.unmatched.iter().copied()
    }
}

/// Pair up the elected modules. Input order does not influence the outcome.
pub fn count_pairs(modules: &[Module]) -> ConsecutivePairs<'_> {
    let mut candidates: Vec<&Module> = modules
        .iter()
        .filter(|module| module.declares_pairing())
        .collect();
    candidates.sort_by(|left, right| left.id.cmp(&right.id));

    let mut confirmed = Vec::new();
    let mut paired: BTreeSet<&str> = BTreeSet::new();

    for (index, &first) in candidates.iter().enumerate() {
        for &second in &candidates[index + 1..] {
            if first.id == second.id
                || paired.contains(first.id.as_str())
                || paired.contains(second.id.as_str())
            {
                continue;
            }

            if differ_only_in_trailing_number(&first.short_id, &second.short_id) {
                confirmed.push((first, second));
                paired.insert(first.id.as_str());
                paired.insert(second.id.as_str());
            }
        }
    }

    let unmatched = candidates
        .into_iter()
        .filter(|module| !paired.contains(module.id.as_str()))
        .collect();

    ConsecutivePairs {
        confirmed,
        unmatched,
    }
}

/// Number of substitute pairs whose two modules are both elected.
pub fn count_special_pairs(modules: &[Module]) -> usize {
    let elected: BTreeSet<&str> = modules
        .iter()
        .map(|module| module.short_id.trim())
        .collect();

    SUBSTITUTE_PAIRS
        .iter()
        .filter(|(first, second)| elected.contains(first) && elected.contains(second))
        .count()
}

fn split_trailing_number(short_id: &str) -> (&str, &str) {
    let trimmed = short_id.trim();
    let stem = trimmed.trim_end_matches(|c: char| c.is_ascii_digit());
    (stem, &trimmed[stem.len()..])
}

pub(crate) fn differ_only_in_trailing_number(left: &str, right: &str) -> bool {
    let (left_stem, left_number) = split_trailing_number(left);
    let (right_stem, right_number) = split_trailing_number(right);

    !left_stem.is_empty()
        && left_stem == right_stem
        && !left_number.is_empty()
        && !right_number.is_empty()
        && left_number != right_number
}
