/// A turn-level choice offered to a [`DecisionPolicy`](super::DecisionPolicy).
///
/// The display text doubles as the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Action {
    #[display("Review farm status")]
    ReviewStatus,
    #[display("See a list of available crops")]
    ListCrops,
    #[display("Buy and plant crops")]
    PlantCrops,
    #[display("Buy fields")]
    BuyField,
    #[display("Advance to harvest time")]
    AdvanceToHarvest,
    #[display("Retire from the farming business")]
    Retire,
}

impl Action {
    /// Whether taking this action ends the current round.
    #[must_use]
    pub const fn ends_round(self) -> bool {
        matches!(self, Self::AdvanceToHarvest | Self::Retire)
    }
}
