//! Strategy-driven play and fitness evaluation.
//!
//! This crate sits between the game engine and the evolutionary optimizer:
//!
//! 1. **Strategy** ([`strategy`]) - The evolvable genome: a positive weighting
//!    per catalog crop plus a field-buying ratio.
//! 2. **Policy** ([`policy`]) - A [`DecisionPolicy`](acsim_engine::DecisionPolicy)
//!    that plays a game according to a strategy.
//! 3. **Session Evaluation** ([`session_evaluator`]) - Plays repeated
//!    independent games with one strategy and averages their final scores into
//!    a fitness value.
//!
//! # Architecture
//!
//! ```text
//! Session Evaluation (fitness for training)
//!     ↓ plays games with
//! Strategy Policy (rule-based action choice)
//!     ↓ parameterized by
//! Strategy (crop weightings + field ratio)
//! ```
//!
//! # Decision Rules
//!
//! The policy is deterministic at the action level:
//!
//! 1. Buy the first affordable field priced below `cash / field_ratio`
//! 2. Otherwise plant, if planting is possible
//! 3. Otherwise advance to harvest
//!
//! Planting always uses the first empty field and the largest quantity the
//! farm can afford and the field can hold. The crop is drawn at random from
//! the affordable crops, weighted by the strategy's crop weightings.

pub mod policy;
pub mod session_evaluator;
pub mod strategy;
