//! Laser Grid - a 5x5 optical puzzle
//!
//! Core modules:
//! - `sim`: Beam propagation, win evaluation and the puzzle session
//! - `levels`: The compiled-in level catalog
//! - `input`: Prompt line parsing
//! - `renderer`: Terminal presentation of a session
//! - `settings`: Tunables loaded from JSON

pub mod input;
pub mod levels;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use levels::{BuiltinLevels, Level, LevelCatalog};
pub use settings::{Settings, SettingsError};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Board is BOARD_SIZE x BOARD_SIZE cells
    pub const BOARD_SIZE: usize = 5;
    /// Number of hand slots below the board
    pub const HAND_SLOTS: usize = 5;

    /// The laser source sits left of this row and fires rightward
    pub const LASER_ENTRY_ROW: usize = 1;

    /// Independent photon passes OR'd together on each activation
    pub const PASSES_PER_ACTIVATION: u32 = 100;
    /// Per-pass step cap: 25 cells x 4 entry sides, so only a revisit can reach it
    pub const MAX_STEPS_PER_PASS: u32 = (BOARD_SIZE * BOARD_SIZE * 4) as u32;

    /// Undrained session events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 64;
}

/// Whether a grid position (x = column, y = row) lies on the board
#[inline]
pub fn on_board(pos: IVec2) -> bool {
    let size = IVec2::splat(consts::BOARD_SIZE as i32);
    pos.cmpge(IVec2::ZERO).all() && pos.cmplt(size).all()
}
