#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/multiselect-widgets/")]

//! # multiselect-widgets
//!
//! A keyboard-driven multi-select list component for building terminal
//! applications with [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! [![License](https://img.shields.io/badge/license-MIT-blue.svg)](https://opensource.org/licenses/MIT)
//!
//! ## Overview
//!
//! multiselect-widgets provides a single focused component: a vertical list of
//! labeled items where the user moves a highlight with the arrow keys, toggles
//! items in and out of a selection with the space bar, and submits the ordered
//! selection with enter. The component follows the Elm Architecture pattern
//! with `init()`, `update()`, and `view()` methods so it drops directly into a
//! bubbletea-rs program, and it can also be driven standalone by feeding raw
//! input chunks to [`multiselect::Model::handle_input`].
//!
//! ## Features
//!
//! - **Wrap-around navigation** over the visible window
//! - **Insertion-ordered selection** with select/unselect/submit/highlight
//!   callbacks
//! - **Display windowing** via an optional row limit, with static and
//!   host-rotated window modes
//! - **Pluggable row rendering** through the [`multiselect::RowDelegate`]
//!   capability (indicator, checkbox, label)
//! - **Scoped raw-mode input** with exclusive listener ownership and
//!   guaranteed release on every exit path
//!
//! ## Quick Start
//!
//! ```rust
//! use multiselect_widgets::multiselect::{DefaultItem, Model};
//!
//! let items = vec![
//!     DefaultItem::new("Item 1", "item1"),
//!     DefaultItem::new("Item 2", "item2"),
//! ];
//!
//! let mut list = Model::new(items)
//!     .on_submit(|selected| println!("submitted {} items", selected.len()));
//!
//! // Drive it with raw input chunks: down, space, enter.
//! list.handle_input(b"\x1b[B");
//! list.handle_input(b" ");
//! list.handle_input(b"\r");
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! The model implements `bubbletea_rs::Model`, translating crossterm key
//! events into the component's input protocol:
//!
//! ```rust,ignore
//! use bubbletea_rs::Program;
//! use multiselect_widgets::multiselect::{DefaultItem, Model};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = Program::<Model<DefaultItem>>::builder().build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! For convenience, you can import the prelude:
//!
//! ```rust
//! use multiselect_widgets::prelude::*;
//! ```

pub mod input;
pub mod multiselect;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focus decides whether a component is currently listening for input. For the
/// multi-select model, gaining focus acquires the attached input source (raw
/// mode on, listener subscribed) and losing focus releases it again, so only
/// the focused component owns the terminal.
///
/// ## Focus States
///
/// - **Focused**: The component receives keyboard input and holds its input
///   source's listener slot
/// - **Blurred**: The component ignores input and has released the listener
///
/// Implementations must make `focus()`/`blur()` idempotent: focusing an
/// already-focused component or blurring an already-blurred one is a no-op.
///
/// # Examples
///
/// ```rust
/// use multiselect_widgets::prelude::*;
///
/// fn handle_focus<T: Component>(component: &mut T) {
///     let _cmd = component.focus();
///     assert!(component.focused());
///     component.blur();
///     assert!(!component.focused());
/// }
///
/// let mut list: MultiSelect<MultiSelectItem> = MultiSelect::new(vec![]);
/// list.blur();
/// handle_focus(&mut list);
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for the bubbletea runtime (none of the components
    /// in this crate currently need one, but the seam matches the wider
    /// widget ecosystem).
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state, releasing any
    /// input resources it holds.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use input::{InputSource, TtyInput};
pub use multiselect::{
    decode, Action, DefaultItem as MultiSelectItem, DefaultRowDelegate, IdentityStrategy,
    InputChunkMsg, Item, Model as MultiSelect, MultiSelectStyles, RowDelegate, WindowMode,
};

/// Prelude module for convenient imports.
///
/// Re-exports the component model, its item and delegate traits, and the
/// input-source types so most applications only need a single `use`:
///
/// ```rust
/// use multiselect_widgets::prelude::*;
///
/// let list: MultiSelect<MultiSelectItem> = MultiSelect::new(vec![
///     MultiSelectItem::new("First", "first"),
/// ]);
/// assert_eq!(list.len(), 1);
/// ```
pub mod prelude {
    pub use crate::input::{InputSource, TtyInput};
    pub use crate::multiselect::{
        decode, Action, DefaultItem as MultiSelectItem, DefaultRowDelegate, IdentityStrategy,
        InputChunkMsg, Item, Model as MultiSelect, MultiSelectStyles, RowDelegate, WindowMode,
    };
    pub use crate::Component;
}
