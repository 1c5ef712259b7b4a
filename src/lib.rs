//! BLOCKFALL - a falling-block puzzle game
//!
//! The engine (`game`, `board`, `piece`, `collision`, ...) knows nothing
//! about terminals; the scenes and UI drive it and draw what it reports.

pub mod board;
pub mod collision;
pub mod game;
pub mod input;
pub mod menu;
pub mod piece;
pub mod randomizer;
pub mod scene;
pub mod score;
pub mod settings;
pub mod shape;
pub mod tetromino;
pub mod timer;
pub mod ui;
