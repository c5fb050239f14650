use std::sync::Arc;

use crate::{Crop, Field};

use super::{Action, Game};

/// Makes every choice a player faces during a [`Game`].
///
/// The game only ever offers legal options: `decide_action` receives the
/// legal action set, and the sub-decisions receive the candidates that are
/// currently affordable. Returning an action outside the set, or an index
/// outside a candidate list, is reported by the game as an error.
///
/// Implementations range from a console prompt to an evolved strategy.
pub trait DecisionPolicy {
    /// Picks one of `actions` (never empty).
    fn decide_action(&mut self, game: &Game<'_>, actions: &[Action]) -> Action;

    /// Picks the empty field to plant in, as an index into `fields`.
    fn decide_field_to_plant(&mut self, game: &Game<'_>, fields: &[&Field]) -> usize;

    /// Picks the crop to plant, as an index into the affordable `crops`.
    fn decide_crop_to_plant(&mut self, game: &Game<'_>, crops: &[&Arc<Crop>]) -> usize;

    /// Picks how many units to plant, at most `maximum`.
    ///
    /// Returning zero leaves the field empty.
    fn decide_crop_quantity(
        &mut self,
        game: &Game<'_>,
        field: &Field,
        crop: &Crop,
        maximum: u32,
    ) -> u32;

    /// Picks a field to buy as an index into the affordable `fields`, or
    /// declines with `None`.
    fn decide_field_to_buy(&mut self, game: &Game<'_>, fields: &[&Field]) -> Option<usize>;
}
