pub mod core;
pub mod ffi;
pub mod session;

// module re-exports
pub use crate::core::board::Board;
pub use crate::core::definitions::{Figure, FigureType, Move, Square, Team};
pub use crate::core::error::{ChessError, Result};
pub use crate::core::game::Engine;
pub use crate::core::rules::{is_legal, RuleSet};

#[cfg(test)]
mod tests;
