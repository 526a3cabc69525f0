use crate::{Animal, AnimalCard, RngState, COPIES_PER_ANIMAL};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("no animals left in the deck")]
    Empty,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Deck {
    draw: VecDeque<AnimalCard>,
    initial_len: usize,
}

impl Deck {
    pub fn standard() -> Self {
        let animals = Animal::ALL
            .into_iter()
            .flat_map(|animal| std::iter::repeat(animal).take(COPIES_PER_ANIMAL));
        Self::from_animals(animals)
    }

    pub fn shuffled(rng: &mut RngState) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn from_animals(animals: impl IntoIterator<Item = Animal>) -> Self {
        let draw: VecDeque<AnimalCard> = animals
            .into_iter()
            .zip(1u32..)
            .map(|(animal, id)| AnimalCard::new(id, animal))
            .collect();
        let initial_len = draw.len();
        Self { draw, initial_len }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(self.draw.make_contiguous());
    }

    pub fn peek(&self) -> Option<&AnimalCard> {
        self.draw.front()
    }

    pub fn draw_next(&mut self) -> Result<AnimalCard, DeckError> {
        self.draw.pop_front().ok_or(DeckError::Empty)
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn initial_len(&self) -> usize {
        self.initial_len
    }

    pub fn dealt(&self) -> usize {
        self.initial_len - self.draw.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimalCard> + '_ {
        self.draw.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_holds_four_of_each() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 40);
        for animal in Animal::ALL {
            assert_eq!(deck.iter().filter(|card| card.animal == animal).count(), 4);
        }
        assert_eq!(deck.peek().map(|card| card.animal), Some(Animal::Koe));
    }

    #[test]
    fn draw_consumes_front_to_back() {
        let mut deck = Deck::from_animals([Animal::Ezel, Animal::Kip]);
        assert_eq!(deck.draw_next().map(|card| card.animal), Ok(Animal::Ezel));
        assert_eq!(deck.draw_next().map(|card| card.animal), Ok(Animal::Kip));
        assert_eq!(deck.draw_next(), Err(DeckError::Empty));
        assert_eq!(deck.dealt() + deck.len(), deck.initial_len());
    }

    #[test]
    fn shuffle_is_seeded_and_keeps_cards() {
        let a = Deck::shuffled(&mut RngState::from_seed(11));
        let b = Deck::shuffled(&mut RngState::from_seed(11));
        let ids_a: Vec<_> = a.iter().map(|card| card.id).collect();
        let ids_b: Vec<_> = b.iter().map(|card| card.id).collect();
        assert_eq!(ids_a, ids_b);
        let mut sorted = ids_a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=40).collect::<Vec<_>>());
        assert_eq!(a.initial_len(), 40);
    }
}
