use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of every species in the deck. A complete set is this many cards.
pub const COPIES_PER_ANIMAL: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Animal {
    Kip,
    Gans,
    Kat,
    Hond,
    Schaap,
    Geit,
    Ezel,
    Varken,
    Koe,
    Paard,
}

impl Animal {
    pub const ALL: [Animal; 10] = [
        Animal::Koe,
        Animal::Schaap,
        Animal::Gans,
        Animal::Kat,
        Animal::Paard,
        Animal::Ezel,
        Animal::Hond,
        Animal::Kip,
        Animal::Varken,
        Animal::Geit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Kip => "Kip",
            Self::Gans => "Gans",
            Self::Kat => "Kat",
            Self::Hond => "Hond",
            Self::Schaap => "Schaap",
            Self::Geit => "Geit",
            Self::Ezel => "Ezel",
            Self::Varken => "Varken",
            Self::Koe => "Koe",
            Self::Paard => "Paard",
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Self::Kip => 10,
            Self::Gans => 40,
            Self::Kat => 90,
            Self::Hond => 160,
            Self::Schaap => 250,
            Self::Geit => 350,
            Self::Ezel => 500,
            Self::Varken => 650,
            Self::Koe => 800,
            Self::Paard => 1000,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|animal| animal.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AnimalCard {
    pub id: u32,
    pub animal: Animal,
}

impl AnimalCard {
    pub fn new(id: u32, animal: Animal) -> Self {
        Self { id, animal }
    }

    pub fn value(&self) -> u32 {
        self.animal.value()
    }
}
