//! Keyboard navigation translated into pointer positions.
//!
//! The core only understands a pointer and a click, so arrow keys move a
//! cursor whose position is reported as a synthetic pointer.

use crossterm::event::KeyCode;
use crystal_nim_core::{PileSet, ROWS, TokenHit};

/// What a key press means, independent of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Arrow key.
    Move(KeyCode),
    /// Tap at the cursor.
    Tap,
    /// Tap the accept button.
    Accept,
    /// Tap the deny button.
    Deny,
    /// Tap the settings gear.
    Gear,
    /// Close the overlay, or leave.
    Back,
    /// Leave immediately.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key code to its action.
pub fn key_action(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => KeyAction::Move(code),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Tap,
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Accept,
        KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::Deny,
        KeyCode::Char('g') | KeyCode::Char('G') => KeyAction::Gear,
        KeyCode::Esc => KeyAction::Back,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Moves the token cursor, keeping it on an existing token where possible.
pub fn move_cursor(cursor: TokenHit, key: KeyCode, piles: &PileSet) -> TokenHit {
    let last_col = |row: usize| piles.count(row).saturating_sub(1);

    match key {
        KeyCode::Up if cursor.row > 0 => {
            let row = cursor.row - 1;
            TokenHit::new(row, cursor.col.min(last_col(row)))
        }
        KeyCode::Down if cursor.row + 1 < ROWS => {
            let row = cursor.row + 1;
            TokenHit::new(row, cursor.col.min(last_col(row)))
        }
        KeyCode::Left if cursor.col > 0 => TokenHit::new(cursor.row, cursor.col - 1),
        KeyCode::Right if cursor.col < last_col(cursor.row) => {
            TokenHit::new(cursor.row, cursor.col + 1)
        }
        // No change for other keys or edge cases
        _ => TokenHit::new(cursor.row, cursor.col.min(last_col(cursor.row))),
    }
}

/// Puts the cursor back on a token after rows have emptied.
///
/// Stays put when its row still has tokens (clamped to the last one),
/// otherwise jumps to column 0 of the first non-empty row.
pub fn snap_cursor(cursor: TokenHit, piles: &PileSet) -> TokenHit {
    let count = piles.count(cursor.row);
    if count > 0 {
        return TokenHit::new(cursor.row, cursor.col.min(count - 1));
    }
    (0..ROWS)
        .find(|&row| piles.count(row) > 0)
        .map_or(cursor, |row| TokenHit::new(row, 0))
}

/// Moves between the two tutorial choices.
pub fn move_choice(choice: usize, key: KeyCode) -> usize {
    match key {
        KeyCode::Left | KeyCode::Up => 0,
        KeyCode::Right | KeyCode::Down => 1,
        _ => choice,
    }
}
