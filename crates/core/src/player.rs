use crate::{Animal, AnimalCard, Wallet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub wallet: Wallet,
    pub herd: Vec<AnimalCard>,
    #[serde(default)]
    pub score: Option<u32>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            wallet: Wallet::starting(),
            herd: Vec::new(),
            score: None,
        }
    }

    pub fn count_of(&self, animal: Animal) -> usize {
        self.herd.iter().filter(|card| card.animal == animal).count()
    }

    pub fn holds(&self, animal: Animal) -> bool {
        self.herd.iter().any(|card| card.animal == animal)
    }

    pub fn herd_counts(&self) -> BTreeMap<Animal, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.herd {
            *counts.entry(card.animal).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn take_cards(&mut self, animal: Animal, limit: usize) -> Vec<AnimalCard> {
        let mut taken = Vec::new();
        let mut idx = self.herd.len();
        while idx > 0 && taken.len() < limit {
            idx -= 1;
            if self.herd[idx].animal == animal {
                taken.push(self.herd.remove(idx));
            }
        }
        taken
    }
}
