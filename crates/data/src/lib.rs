//! Loading and validation of table rules.

pub mod load;

pub use load::*;
