//! Economy model: catalog entries, farm holdings and weather.

pub use self::{catalog::*, crop::*, farm::*, field::*, weather::*};

mod catalog;
mod crop;
mod farm;
mod field;
mod weather;
