//! Core types and traits for the multi-select component.
//!
//! This module contains the building blocks shared by the model and its
//! renderers:
//! - the [`Item`] trait for displayable, identity-bearing list entries
//! - [`DefaultItem`], a ready-made label/value/key item
//! - [`IdentityStrategy`] and [`WindowMode`], the two configuration axes of
//!   the component
//! - [`SelectedEntry`], the internal selection-set representation

use std::fmt::Display;

/// Trait for items that can be displayed and selected in a multi-select list.
///
/// Items must be displayable (the default label renderer uses their `Display`
/// output), cloneable (the selection set stores copies), and comparable
/// (value-based identity). The optional [`key`](Item::key) provides a stable
/// identity that survives duplicate values in the list.
///
/// # Examples
///
/// ```
/// use multiselect_widgets::multiselect::Item;
/// use std::fmt::Display;
///
/// #[derive(Clone, PartialEq)]
/// struct Package {
///     name: String,
///     version: String,
/// }
///
/// impl Display for Package {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{} {}", self.name, self.version)
///     }
/// }
///
/// impl Item for Package {
///     fn key(&self) -> Option<&str> {
///         Some(&self.name)
///     }
/// }
/// ```
pub trait Item: Display + Clone + PartialEq {
    /// Returns a stable identity key for this item, if it has one.
    ///
    /// When present, the key takes precedence over value equality under the
    /// default [`IdentityStrategy::ByKey`]. Return `None` (the default) to
    /// fall back to value equality.
    fn key(&self) -> Option<&str> {
        None
    }
}

/// Simple item with a display label, an application value, and an optional
/// stable key.
///
/// # Examples
///
/// ```
/// use multiselect_widgets::multiselect::DefaultItem;
///
/// let plain = DefaultItem::new("Item 1", "item1");
/// let keyed = DefaultItem::new("Item 1", "item1").with_key("item1");
/// assert_eq!(plain.label, keyed.label);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultItem {
    /// Text shown in the list.
    pub label: String,
    /// Opaque application value carried alongside the label.
    pub value: String,
    /// Optional stable identity key.
    pub key: Option<String>,
}

impl DefaultItem {
    /// Creates a new item with a label and value and no key.
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            key: None,
        }
    }

    /// Sets the item's stable identity key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

impl Display for DefaultItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Item for DefaultItem {
    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// How selection membership decides that two items are "the same".
///
/// Lists with duplicate values need a stronger identity than equality; lists
/// of anonymous rows may only have their position. The strategy is a
/// construction-time choice on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityStrategy {
    /// Compare stable keys when both items carry one; fall back to value
    /// equality when either side has no key. This is the default.
    #[default]
    ByKey,
    /// Compare items by value equality only, ignoring keys.
    ByValue,
    /// Compare items by their position in the item list.
    ByIndex,
}

/// Which slice of the item list is visible when a row limit is configured.
///
/// With no limit, or a limit at least the list length, the whole list is
/// visible and the mode is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// The window is always the first `limit` items. Navigation wraps within
    /// that fixed window; items beyond it are unreachable. This is the
    /// default.
    #[default]
    Static,
    /// The window starts at a host-controlled rotate offset
    /// ([`set_rotate_offset`](super::Model::set_rotate_offset)). The model
    /// never rotates on its own; a host that wants "scroll to see more" drives
    /// the offset itself.
    Rotating,
}

/// A selection-set entry: the selected item plus its position in the item
/// list at selection time.
///
/// Keeping the original index lets every [`IdentityStrategy`] answer
/// membership questions, and entries stay in insertion order so the submitted
/// selection is ordered by when each item was picked.
#[derive(Debug, Clone)]
pub(super) struct SelectedEntry<I: Item> {
    /// Index of this item in the full item list.
    pub index: usize,
    /// The selected item.
    pub item: I,
}

impl<I: Item> SelectedEntry<I> {
    /// Returns whether this entry identifies the given item/index pair under
    /// the given strategy.
    pub(super) fn matches(&self, strategy: IdentityStrategy, index: usize, item: &I) -> bool {
        match strategy {
            IdentityStrategy::ByIndex => self.index == index,
            IdentityStrategy::ByValue => self.item == *item,
            IdentityStrategy::ByKey => match (self.item.key(), item.key()) {
                (Some(a), Some(b)) => a == b,
                _ => self.item == *item,
            },
        }
    }
}
