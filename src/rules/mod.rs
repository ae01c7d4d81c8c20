//! Game rules for stacking four-in-a-row on a 5x5x5 cube
//!
//! This module implements the rule set:
//! - Placement legality (bounds, occupancy, gravity)
//! - Win conditions (four in a row along 13 axes)
//! - Winning-line extraction for display

pub mod placement;
pub mod win;

// Re-exports for convenient access
pub use placement::{check_coords, check_move, is_valid_move, valid_moves};
pub use win::{
    check_win, has_four_at_pos, has_four_in_row, winning_combination, WIN_LENGTH,
};
