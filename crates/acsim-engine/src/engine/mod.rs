//! Turn-based game loop and the contracts used to drive it.
//!
//! - [`Game`] - One farm over a fixed number of years
//! - [`Action`] - What a player may do on a turn
//! - [`DecisionPolicy`] - Chooses actions and sub-decisions (human or automated)
//! - [`GameReporter`] - Receives structured outcomes; purely observational
//!
//! # Turn Protocol
//!
//! 1. The game enumerates the legal actions for its current state
//! 2. The policy picks one of them
//! 3. The game executes it, asking the policy for any sub-decisions
//! 4. [`Action::AdvanceToHarvest`] closes the year: weather is drawn, fields
//!    are harvested and cleared, and the year counter advances
//! 5. [`Action::Retire`] ends the game immediately
//!
//! The game completes once the configured number of years has elapsed. The
//! final score is cash plus the purchase price of every owned field.

pub use self::{action::*, game::*, policy::*, report::*};

mod action;
mod game;
mod policy;
mod report;
