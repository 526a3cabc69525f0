//! Seeded random-play driver over the core game API.

mod action;
mod config;
mod error;
mod runner;
mod simulator;
mod trace;

pub use action::*;
pub use config::*;
pub use error::*;
pub use runner::*;
pub use simulator::*;
pub use trace::*;
