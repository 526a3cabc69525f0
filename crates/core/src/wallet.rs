use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Note {
    Zero,
    Ten,
    Fifty,
    Hundred,
    TwoHundred,
    FiveHundred,
}

impl Note {
    pub const ALL: [Note; 6] = [
        Note::Zero,
        Note::Ten,
        Note::Fifty,
        Note::Hundred,
        Note::TwoHundred,
        Note::FiveHundred,
    ];

    pub fn value(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::Ten => 10,
            Self::Fifty => 50,
            Self::Hundred => 100,
            Self::TwoHundred => 200,
            Self::FiveHundred => 500,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|note| note.value() == value)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Zero => "Zero",
            Self::Ten => "Ten",
            Self::Fifty => "Fifty",
            Self::Hundred => "Hundred",
            Self::TwoHundred => "TwoHundred",
            Self::FiveHundred => "FiveHundred",
        };
        f.write_str(label)
    }
}

/// Face value of a stack of notes, saturating at `u32::MAX`.
pub fn cash_value(cash: &[Note]) -> u32 {
    cash.iter().fold(0u32, |total, note| total.saturating_add(note.value()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("payer does not have enough of {note} to transfer (requested {requested}, held {held})")]
    InsufficientNote { note: Note, requested: u32, held: u32 },
}

/// A player's money as a multiset of notes. Payments remove exactly the named
/// notes; there is no change-making.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    notes: BTreeMap<Note, u32>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting() -> Self {
        Self::from_notes(&STARTING_CASH)
    }

    pub fn from_notes(notes: &[Note]) -> Self {
        let mut wallet = Self::new();
        wallet.deposit(notes);
        wallet
    }

    pub fn count(&self, note: Note) -> u32 {
        self.notes.get(&note).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.notes
            .iter()
            .map(|(note, count)| note.value() * count)
            .sum()
    }

    pub fn note_count(&self) -> u32 {
        self.notes.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.note_count() == 0
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes
            .iter()
            .flat_map(|(note, count)| std::iter::repeat(*note).take(*count as usize))
            .collect()
    }

    pub fn check(&self, cash: &[Note]) -> Result<(), WalletError> {
        let mut requested: BTreeMap<Note, u32> = BTreeMap::new();
        for note in cash {
            let count = requested.entry(*note).or_insert(0);
            *count = count.saturating_add(1);
        }
        for note in cash {
            let wanted = requested[note];
            let held = self.count(*note);
            if wanted > held {
                return Err(WalletError::InsufficientNote {
                    note: *note,
                    requested: wanted,
                    held,
                });
            }
        }
        Ok(())
    }

    pub fn withdraw(&mut self, cash: &[Note]) -> Result<(), WalletError> {
        self.check(cash)?;
        for note in cash {
            if let Some(count) = self.notes.get_mut(note) {
                *count -= 1;
                if *count == 0 {
                    self.notes.remove(note);
                }
            }
        }
        Ok(())
    }

    pub fn deposit(&mut self, cash: &[Note]) {
        for note in cash {
            *self.notes.entry(*note).or_insert(0) += 1;
        }
    }
}

pub const STARTING_CASH: [Note; 7] = [
    Note::Zero,
    Note::Zero,
    Note::Ten,
    Note::Ten,
    Note::Ten,
    Note::Ten,
    Note::Fifty,
];
