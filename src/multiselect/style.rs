//! Visual styling for the multi-select component.
//!
//! All default rendering goes through Lip Gloss styles so applications can
//! retheme the widget without replacing the renderers. Custom
//! [`RowDelegate`](super::RowDelegate) implementations are free to ignore
//! these styles entirely.

use lipgloss_extras::prelude::*;

/// Glyphs and styles used by the default row renderers.
///
/// The defaults follow the classic terminal multi-select look: a pointer
/// glyph marks the highlighted row, a filled or hollow circle shows selection
/// state, and the highlighted label is tinted.
///
/// # Examples
///
/// ```rust
/// use lipgloss_extras::prelude::*;
/// use multiselect_widgets::multiselect::MultiSelectStyles;
///
/// let mut styles = MultiSelectStyles::default();
/// styles.highlighted_label = Style::new().foreground(Color::from("212")).bold(true);
/// ```
#[derive(Debug, Clone)]
pub struct MultiSelectStyles {
    /// Pointer glyph shown in front of the highlighted row.
    pub pointer: String,
    /// Checkbox glyph for a selected row.
    pub checked: String,
    /// Checkbox glyph for an unselected row.
    pub unchecked: String,
    /// Style applied to the pointer glyph.
    pub indicator: Style,
    /// Style applied to the checkbox glyph when the row is selected.
    pub checkbox: Style,
    /// Style applied to the label of the highlighted row.
    pub highlighted_label: Style,
    /// Style applied to labels of all other rows.
    pub label: Style,
}

impl Default for MultiSelectStyles {
    fn default() -> Self {
        Self {
            pointer: "❯".to_string(),
            checked: "◉".to_string(),
            unchecked: "◯".to_string(),
            indicator: Style::new().foreground(Color::from("12")),
            checkbox: Style::new().foreground(Color::from("10")),
            highlighted_label: Style::new().foreground(Color::from("12")),
            label: Style::new(),
        }
    }
}

impl MultiSelectStyles {
    /// Creates the default style set.
    pub fn new() -> Self {
        Self::default()
    }
}
