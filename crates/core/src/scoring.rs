use crate::{Animal, AnimalCard, COPIES_PER_ANIMAL};
use std::collections::BTreeMap;

fn counts(herd: &[AnimalCard]) -> BTreeMap<Animal, usize> {
    let mut counts = BTreeMap::new();
    for card in herd {
        *counts.entry(card.animal).or_insert(0) += 1;
    }
    counts
}

pub fn only_complete_sets(herd: &[AnimalCard]) -> bool {
    counts(herd)
        .values()
        .all(|count| count % COPIES_PER_ANIMAL == 0)
}

pub fn complete_sets(herd: &[AnimalCard]) -> Vec<Animal> {
    counts(herd)
        .into_iter()
        .filter(|(_, count)| *count >= COPIES_PER_ANIMAL)
        .map(|(animal, _)| animal)
        .collect()
}

/// Sum of the distinct species values held, times the number of complete sets.
pub fn herd_score(herd: &[AnimalCard]) -> u32 {
    let distinct: u32 = counts(herd).keys().map(|animal| animal.value()).sum();
    let sets = (herd.len() / COPIES_PER_ANIMAL) as u32;
    distinct * sets
}
