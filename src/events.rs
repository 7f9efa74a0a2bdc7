use crate::food::Food;

/// Notifications produced by one simulation step, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate and gained a segment.
    Growth { new_length: usize },
    /// The head ran into its own body and `truncated` segments were cut off.
    SelfCollision { truncated: usize },
    /// The food batch was replaced.
    FoodRespawned(Vec<Food>),
    /// The tick interval changed.
    SpeedChanged { speed: u32 },
}
