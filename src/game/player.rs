//! A seated player and what they own.

use serde::{Deserialize, Serialize};

use crate::cards::PrivateObjectiveCard;
use crate::core::PlayerId;
use crate::grid::{Grid, GridTemplate};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    tokens: u32,
    grid: Option<Grid>,
    private: Option<PrivateObjectiveCard>,
    grid_options: Vec<GridTemplate>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tokens: 0,
            grid: None,
            private: None,
            grid_options: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unspent favor tokens.
    #[must_use]
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn private_objective(&self) -> Option<&PrivateObjectiveCard> {
        self.private.as_ref()
    }

    /// Templates this player was dealt to choose from.
    #[must_use]
    pub fn grid_options(&self) -> &[GridTemplate] {
        &self.grid_options
    }

    /// Bind the player's grid. The first binding also sets the token
    /// balance to the grid's difficulty; later calls are no-ops.
    ///
    /// Returns whether the grid was bound by this call.
    pub(crate) fn bind_grid(&mut self, grid: Grid) -> bool {
        if self.grid.is_some() {
            return false;
        }
        self.tokens = grid.difficulty();
        self.grid = Some(grid);
        true
    }

    pub(crate) fn set_private_objective(&mut self, card: PrivateObjectiveCard) {
        self.private = Some(card);
    }

    pub(crate) fn set_grid_options(&mut self, options: Vec<GridTemplate>) {
        self.grid_options = options;
    }

    /// Split borrow for the controller: grid and tokens at once.
    pub(crate) fn table_mut(&mut self) -> Option<(&mut Grid, &mut u32)> {
        let grid = self.grid.as_mut()?;
        Some((grid, &mut self.tokens))
    }
}
