pub mod board;
pub mod definitions;
pub mod error;
pub mod game;
pub mod history;
pub mod rules;
pub mod turn;
pub mod utils;
