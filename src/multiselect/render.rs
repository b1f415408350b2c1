//! Row rendering for the multi-select component.
//!
//! Each visible row is composed from three pure render calls, in fixed order:
//! indicator (highlight marker), checkbox (selection marker), label. The
//! calls go through the [`RowDelegate`] capability so applications can swap
//! any of the three without touching the state machine; the delegate never
//! gets write access to component state.

use super::style::MultiSelectStyles;
use super::types::Item;
use super::Model;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the three elements of a list row.
///
/// All methods are pure functions of their arguments: the same inputs must
/// produce the same output, with no shared mutable state behind them. The
/// model calls them once per visible row per render pass, in declaration
/// order, and concatenates the results into one row.
///
/// # Examples
///
/// ```
/// use multiselect_widgets::multiselect::{DefaultItem, Item, Model, RowDelegate};
///
/// struct Plain;
///
/// impl<I: Item> RowDelegate<I> for Plain {
///     fn indicator(&self, is_highlighted: bool) -> String {
///         if is_highlighted { "> ".into() } else { "  ".into() }
///     }
///     fn checkbox(&self, is_selected: bool) -> String {
///         if is_selected { "[x] ".into() } else { "[ ] ".into() }
///     }
///     fn label(&self, item: &I, _is_highlighted: bool) -> String {
///         item.to_string()
///     }
/// }
///
/// let list = Model::new(vec![DefaultItem::new("First", "first")]).with_delegate(Plain);
/// assert_eq!(list.view(), "> [ ] First");
/// ```
pub trait RowDelegate<I: Item> {
    /// Renders the highlight indicator for a row.
    fn indicator(&self, is_highlighted: bool) -> String;

    /// Renders the selection checkbox for a row.
    fn checkbox(&self, is_selected: bool) -> String;

    /// Renders the row's label.
    fn label(&self, item: &I, is_highlighted: bool) -> String;
}

/// The built-in glyph renderers.
///
/// Draws a pointer (`❯`) in front of the highlighted row, a filled (`◉`) or
/// hollow (`◯`) circle for the selection state, and the item's `Display`
/// output as the label, tinted when highlighted. Long labels can be truncated
/// to a display width with [`with_max_label_width`](DefaultRowDelegate::with_max_label_width).
#[derive(Debug, Clone, Default)]
pub struct DefaultRowDelegate {
    /// Glyphs and styles used for rendering.
    pub styles: MultiSelectStyles,
    /// Maximum label display width; labels wider than this are truncated
    /// with an ellipsis. `None` leaves labels untouched.
    pub max_label_width: Option<usize>,
}

impl DefaultRowDelegate {
    /// Creates a delegate with the default glyphs and styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the style set.
    pub fn with_styles(mut self, styles: MultiSelectStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Truncates labels to at most `width` display columns.
    pub fn with_max_label_width(mut self, width: usize) -> Self {
        self.max_label_width = Some(width);
        self
    }
}

impl<I: Item> RowDelegate<I> for DefaultRowDelegate {
    fn indicator(&self, is_highlighted: bool) -> String {
        if is_highlighted {
            format!("{} ", self.styles.indicator.render(&self.styles.pointer))
        } else {
            "  ".to_string()
        }
    }

    fn checkbox(&self, is_selected: bool) -> String {
        if is_selected {
            format!("{} ", self.styles.checkbox.render(&self.styles.checked))
        } else {
            format!("{} ", self.styles.unchecked)
        }
    }

    fn label(&self, item: &I, is_highlighted: bool) -> String {
        let mut label = item.to_string();
        if let Some(max) = self.max_label_width {
            label = truncate_to_width(&label, max);
        }
        if is_highlighted {
            self.styles.highlighted_label.render(&label)
        } else {
            self.styles.label.render(&label)
        }
    }
}

/// Truncates `text` to at most `max_width` display columns, appending an
/// ellipsis when anything was cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1); // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

impl<I: Item + Send + Sync + 'static> Model<I> {
    /// Composes the visible rows, one string per row.
    ///
    /// For each visible item, in index order, the delegate's indicator,
    /// checkbox, and label are rendered in that fixed order and concatenated.
    /// This is also the payload handed to the `on_state_changed` callback
    /// after every mutation.
    pub fn view_rows(&self) -> Vec<String> {
        let (start, end) = self.window_bounds();
        let mut rows = Vec::with_capacity(end - start);
        for (offset, item) in self.items[start..end].iter().enumerate() {
            let index = start + offset;
            let is_highlighted = offset == self.highlighted;
            let is_selected = self.selection_position(index, item).is_some();
            rows.push(format!(
                "{}{}{}",
                self.delegate.indicator(is_highlighted),
                self.delegate.checkbox(is_selected),
                self.delegate.label(item, is_highlighted),
            ));
        }
        rows
    }

    /// Renders the component as a vertical stack of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiselect_widgets::multiselect::{DefaultItem, Model};
    ///
    /// let list = Model::new(vec![
    ///     DefaultItem::new("Item 1", "item1"),
    ///     DefaultItem::new("Item 2", "item2"),
    /// ]);
    /// assert_eq!(list.view().lines().count(), 2);
    /// ```
    pub fn view(&self) -> String {
        self.view_rows().join("\n")
    }
}
