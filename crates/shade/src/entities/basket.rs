//! The basket
//!
//! Where the player empties their trail. The basket only keeps a tally;
//! turning deliveries into meter and counter gains is up to the game state.

/// Basket state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    delivered: u32,
}

impl Basket {
    /// An empty basket
    pub fn new() -> Self {
        Self::default()
    }

    /// Mushrooms dropped in so far
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    pub(crate) fn receive(&mut self, count: u32) {
        self.delivered += count;
    }
}
