//! Multi-select list component with windowing, callbacks, and customizable
//! row rendering.
//!
//! This module exposes a generic `Model<I: Item>` plus supporting traits
//! and submodules:
//! - [`Item`]: implement for your item type; must be `Display + Clone +
//!   PartialEq`, with an optional stable identity key
//! - [`RowDelegate`]: controls how the indicator, checkbox, and label of each
//!   row are rendered
//! - Submodules: `decode` (the raw input protocol), `style` (Lip Gloss
//!   theming)
//!
//! ## Architecture Overview
//!
//! The component is a small synchronous state machine. Input arrives as
//! discrete raw chunks; each chunk is decoded to at most one [`Action`],
//! applied as at most one state transition, reported through at most one
//! semantic callback, and followed by a re-render notification. There is no
//! internal concurrency and no buffering between chunks.
//!
//! ### Input protocol
//!
//! Four byte sequences are recognized (`ESC [ A`, `ESC [ B`, `CR`, `SPACE`);
//! everything else is ignored. See [`decode`] for the exact contract and its
//! known constraint around split escape sequences.
//!
//! ### Windowing
//!
//! An optional row [limit](Model::with_limit) keeps long lists inside a fixed
//! display height. The window is either pinned to the top of the list
//! ([`WindowMode::Static`], the default) or starts at a host-driven offset
//! ([`WindowMode::Rotating`]); navigation wraps within the window in both
//! modes.
//!
//! ### Runtime integration
//!
//! [`Model`] implements `bubbletea_rs::Model`. Crossterm key events for the
//! four protocol keys are translated back into their byte sequences and fed
//! through the same decoder, so the byte protocol stays the single source of
//! truth. Hosts with their own event loop can skip the runtime entirely and
//! call [`Model::handle_input`] directly.

// Internal modules
mod decode;
mod model;
mod render;
mod types;

/// Visual styling for the default row renderers.
pub mod style;

/// The main multi-select component model.
pub use model::Model;

/// The input decoder and the decoded action alphabet.
pub use decode::{decode, Action};

/// Core item traits and configuration axes.
pub use types::{DefaultItem, IdentityStrategy, Item, WindowMode};

/// Row rendering capability and the built-in glyph renderers.
pub use render::{DefaultRowDelegate, RowDelegate};

/// Style configuration for the built-in renderers.
pub use style::MultiSelectStyles;

use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

/// Message carrying one raw input chunk for hosts that feed the component
/// bytes directly (e.g. from a pty or a test harness).
#[derive(Debug, Clone)]
pub struct InputChunkMsg(pub Vec<u8>);

/// Maps a crossterm key event to the equivalent raw byte sequence of the
/// input protocol, if the key is part of it.
fn chunk_for_key(key_msg: &KeyMsg) -> Option<&'static [u8]> {
    match key_msg.key {
        KeyCode::Up => Some(decode::ARROW_UP),
        KeyCode::Down => Some(decode::ARROW_DOWN),
        KeyCode::Enter => Some(decode::ENTER),
        KeyCode::Char(' ') => Some(decode::SPACE),
        _ => None,
    }
}

impl<I: Item + Send + Sync + 'static> BubbleTeaModel for Model<I> {
    /// Initializes an empty, focused multi-select list.
    ///
    /// Standalone runtime use starts with no items; hosts normally construct
    /// the model themselves via [`Model::new`] and embed it in their own
    /// bubbletea model.
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(vec![]), None)
    }

    /// Routes input messages through the component's input protocol.
    ///
    /// [`InputChunkMsg`] payloads go straight to the decoder. Crossterm key
    /// events for up/down/enter/space are translated to their byte sequences
    /// first; all other keys are ignored, matching the protocol's
    /// unrecognized-input behavior. Submit ends the interaction session by
    /// returning `quit()` — the component itself stays live and would keep
    /// accepting input if the host kept the program running.
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(chunk) = msg.downcast_ref::<InputChunkMsg>() {
            let submitted = decode(&chunk.0) == Action::Submit;
            self.handle_input(&chunk.0);
            return submitted.then(quit);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if key_msg.key == KeyCode::Char('c') && key_msg.modifiers.contains(KeyModifiers::CONTROL)
            {
                return Some(quit());
            }
            if let Some(chunk) = chunk_for_key(key_msg) {
                let submitted = decode(chunk) == Action::Submit;
                self.handle_input(chunk);
                return submitted.then(quit);
            }
        }
        None
    }

    /// Renders the component; see [`Model::view`].
    fn view(&self) -> String {
        self.view()
    }
}
