//! Raw input decoding for the multi-select component.
//!
//! Input arrives as discrete byte chunks read from the terminal in raw mode.
//! Each chunk decodes to at most one [`Action`]; anything outside the
//! recognized alphabet degrades to [`Action::Unrecognized`] and is silently
//! ignored by the model, so decoding is total and never errors.
//!
//! Decoding is stateless per chunk: an escape sequence split across two reads
//! (`ESC` in one chunk, `[ A` in the next) is not reassembled and both halves
//! decode as unrecognized. In practice a raw-mode terminal delivers arrow-key
//! sequences atomically; this is a known constraint of the input protocol,
//! not something callers should try to work around by buffering here.

/// Bytes sent by the terminal for the up arrow key.
pub const ARROW_UP: &[u8] = b"\x1b[A";
/// Bytes sent by the terminal for the down arrow key.
pub const ARROW_DOWN: &[u8] = b"\x1b[B";
/// Carriage return, sent for the enter key.
pub const ENTER: &[u8] = b"\r";
/// A single space.
pub const SPACE: &[u8] = b" ";

/// A decoded input action for the multi-select state machine.
///
/// This is the complete input alphabet of the component. Every byte chunk
/// maps to exactly one variant, so the state machine has a defined outcome
/// for arbitrary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the highlight up one row, wrapping at the top.
    MoveUp,
    /// Move the highlight down one row, wrapping at the bottom.
    MoveDown,
    /// Submit the current selection.
    Submit,
    /// Toggle the highlighted item in or out of the selection.
    ToggleSelect,
    /// Input that is not part of the protocol; ignored without state change
    /// or callback.
    Unrecognized,
}

/// Decodes one raw input chunk into an [`Action`].
///
/// Exactly four byte sequences are recognized: `ESC [ A` (up), `ESC [ B`
/// (down), `CR` (submit), and `SPACE` (toggle). The whole chunk must match;
/// trailing or embedded extra bytes make it unrecognized.
///
/// # Examples
///
/// ```rust
/// use multiselect_widgets::multiselect::{decode, Action};
///
/// assert_eq!(decode(b"\x1b[A"), Action::MoveUp);
/// assert_eq!(decode(b"\x1b[B"), Action::MoveDown);
/// assert_eq!(decode(b"\r"), Action::Submit);
/// assert_eq!(decode(b" "), Action::ToggleSelect);
/// assert_eq!(decode(b"x"), Action::Unrecognized);
/// ```
pub fn decode(chunk: &[u8]) -> Action {
    if chunk == ARROW_UP {
        Action::MoveUp
    } else if chunk == ARROW_DOWN {
        Action::MoveDown
    } else if chunk == ENTER {
        Action::Submit
    } else if chunk == SPACE {
        Action::ToggleSelect
    } else {
        Action::Unrecognized
    }
}
