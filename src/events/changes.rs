//! What one accepted action touched.

use smallvec::SmallVec;

use crate::cards::ToolCardId;
use crate::core::Dice;
use crate::grid::Position;

/// Touched-entity record filled in while an action is applied.
///
/// The game turns it into [`GameEvent`](super::GameEvent)s with fresh
/// snapshots once the action has been accepted. A rejected action's record
/// is empty, except after a failed tool effect was unwound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub tool_used: Option<ToolCardId>,
    /// A failed effect handed its card and tokens back.
    pub tool_refunded: Option<ToolCardId>,
    pub drafted: Option<Dice>,
    pub held: bool,
    pub cells: SmallVec<[Position; 2]>,
    pub pool: bool,
    pub track: bool,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&mut self, at: Position) {
        if !self.cells.contains(&at) {
            self.cells.push(at);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
