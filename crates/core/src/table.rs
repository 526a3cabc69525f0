use crate::{Animal, AnimalCard, GameError, Note, Player, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    players: Vec<Player>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seat(&mut self, player: Player) -> usize {
        self.players.push(player);
        self.players.len() - 1
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub(crate) fn get_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|player| player.id == id)
    }

    pub fn seat_of(&self, id: PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|player| player.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub(crate) fn id_at(&self, seat: usize) -> PlayerId {
        self.players[seat].id
    }

    pub fn name(&self, seat: usize) -> &str {
        self.players
            .get(seat)
            .map(|player| player.name.as_str())
            .unwrap_or("?")
    }

    pub fn name_of(&self, id: PlayerId) -> String {
        self.players
            .iter()
            .find(|player| player.id == id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    pub fn seats_after(&self, seat: usize) -> Vec<usize> {
        let len = self.players.len();
        (1..len).map(|offset| (seat + offset) % len).collect()
    }

    pub fn count_of(&self, seat: usize, animal: Animal) -> usize {
        self.players
            .get(seat)
            .map(|player| player.count_of(animal))
            .unwrap_or(0)
    }

    pub(crate) fn check_cash(&self, seat: usize, cash: &[Note]) -> Result<(), GameError> {
        self.players[seat]
            .wallet
            .check(cash)
            .map_err(|source| GameError::InsufficientFunds {
                player: self.name(seat).to_string(),
                source,
            })
    }

    pub(crate) fn transfer_cash(&mut self, from: usize, to: usize, cash: &[Note]) -> Result<(), GameError> {
        self.check_cash(from, cash)?;
        self.players[from]
            .wallet
            .withdraw(cash)
            .map_err(|source| GameError::Invariant(format!("checked withdraw failed: {source}")))?;
        self.players[to].wallet.deposit(cash);
        Ok(())
    }

    pub(crate) fn swap_cash(
        &mut self,
        left: usize,
        left_cash: &[Note],
        right: usize,
        right_cash: &[Note],
    ) -> Result<(), GameError> {
        self.check_cash(left, left_cash)?;
        self.check_cash(right, right_cash)?;
        self.transfer_cash(right, left, right_cash)?;
        self.transfer_cash(left, right, left_cash)
    }

    pub(crate) fn give_card(&mut self, seat: usize, card: AnimalCard) {
        self.players[seat].herd.push(card);
    }

    pub(crate) fn move_cards(&mut self, from: usize, to: usize, animal: Animal, all: bool) -> usize {
        let limit = if all { usize::MAX } else { 1 };
        let cards = self.players[from].take_cards(animal, limit);
        let moved = cards.len();
        self.players[to].herd.extend(cards);
        moved
    }

    pub(crate) fn credit_all(&mut self, note: Note) {
        for player in &mut self.players {
            player.wallet.deposit(&[note]);
        }
    }

    pub fn total_cash(&self) -> u32 {
        self.players.iter().map(|player| player.wallet.total()).sum()
    }

    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|player| player.herd.len()).sum()
    }
}
