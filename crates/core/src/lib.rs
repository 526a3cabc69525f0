//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod auction;
pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod game;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod table;
pub mod trade;
pub mod wallet;

pub use auction::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use game::*;
pub use player::*;
pub use rng::*;
pub use scoring::*;
pub use snapshot::*;
pub use state::*;
pub use table::*;
pub use trade::*;
pub use wallet::*;
