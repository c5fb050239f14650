//! Game economy simulation for the agricultural capitalism simulator.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - Static catalog entries ([`Crop`], [`Field`]), the player's
//!   [`Farm`], and the [`Weather`] model that drives yields.
//! - [`engine`] - The yearly turn loop ([`Game`]), the legal [`Action`] set,
//!   and the [`DecisionPolicy`] / [`GameReporter`] contracts through which a
//!   player (human or automated) drives the simulation.
//!
//! A [`Catalog`] is validated once and then shared read-only between any
//! number of [`Game`] instances. Every game clones the catalog fields it needs,
//! so independent games never share mutable state.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised by the game simulator.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },
    #[display("illegal action selected: {action}")]
    IllegalAction { action: Action },
    #[display("choice {index} is out of range for {count} options")]
    InvalidChoice { index: usize, count: usize },
    #[display("quantity {quantity} exceeds the maximum of {maximum}")]
    InvalidQuantity { quantity: u32, maximum: u32 },
    #[display("the game is already over")]
    GameOver,
}
