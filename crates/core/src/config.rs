use crate::{Animal, Note, COPIES_PER_ANIMAL, STARTING_CASH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_SEATS: usize = 3;
pub const MAX_SEATS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_players must be at least 3 (got {0})")]
    TooFewSeats(usize),
    #[error("max_players must be at most 4 (got {0})")]
    TooManySeats(usize),
    #[error("min_players ({min}) exceeds max_players ({max})")]
    SeatRange { min: usize, max: usize },
    #[error("starting cash cannot be empty")]
    NoStartingCash,
    #[error("donkey payout table has {actual} entries, needs {required}")]
    ShortPayoutTable { required: usize, actual: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub starting_cash: Vec<Note>,
    pub donkey: Animal,
    pub donkey_payouts: Vec<Note>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: MIN_SEATS,
            max_players: MAX_SEATS,
            starting_cash: STARTING_CASH.to_vec(),
            donkey: Animal::Ezel,
            donkey_payouts: vec![Note::Fifty, Note::Hundred, Note::TwoHundred, Note::FiveHundred],
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < MIN_SEATS {
            return Err(ConfigError::TooFewSeats(self.min_players));
        }
        if self.max_players > MAX_SEATS {
            return Err(ConfigError::TooManySeats(self.max_players));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::SeatRange {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.starting_cash.is_empty() {
            return Err(ConfigError::NoStartingCash);
        }
        if self.donkey_payouts.len() < COPIES_PER_ANIMAL {
            return Err(ConfigError::ShortPayoutTable {
                required: COPIES_PER_ANIMAL,
                actual: self.donkey_payouts.len(),
            });
        }
        Ok(())
    }

    /// Payout for the `drop`-th donkey (1-based).
    pub fn donkey_payout(&self, drop: u8) -> Option<Note> {
        let index = usize::from(drop).checked_sub(1)?;
        self.donkey_payouts.get(index).copied()
    }

    pub fn starting_total(&self) -> u32 {
        crate::cash_value(&self.starting_cash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.starting_total(), 90);
        assert_eq!(config.donkey_payout(1), Some(Note::Fifty));
        assert_eq!(config.donkey_payout(4), Some(Note::FiveHundred));
        assert_eq!(config.donkey_payout(5), None);
        assert_eq!(config.donkey_payout(0), None);
    }

    #[test]
    fn rejects_inverted_seat_range() {
        let config = GameConfig {
            min_players: 5,
            max_players: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SeatRange { min: 5, max: 4 })
        );
    }

    macro_rules! seat_case {
        ($name:ident, $min:expr, $max:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let config = GameConfig {
                    min_players: $min,
                    max_players: $max,
                    ..GameConfig::default()
                };
                assert_eq!(config.validate(), $expected);
            }
        };
    }

    seat_case!(three_to_four_seats, 3, 4, Ok(()));
    seat_case!(exactly_three_seats, 3, 3, Ok(()));
    seat_case!(two_seats_rejected, 2, 4, Err(ConfigError::TooFewSeats(2)));
    seat_case!(five_seats_rejected, 3, 5, Err(ConfigError::TooManySeats(5)));
    seat_case!(six_seats_rejected, 3, 6, Err(ConfigError::TooManySeats(6)));

    #[test]
    fn rejects_short_payout_table() {
        let config = GameConfig {
            donkey_payouts: vec![Note::Fifty],
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ShortPayoutTable {
                required: 4,
                actual: 1
            })
        );
    }
}
