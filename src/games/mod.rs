//! Ready-made game content.
//!
//! - `standard`: the standard tool cards, public objectives and grid
//!   templates, plus a builder that runs the whole setup sequence

pub mod standard;
