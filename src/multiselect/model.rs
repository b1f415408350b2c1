//! Main Model struct and state machine for the multi-select component.
//!
//! This module contains the component's state (highlight position, selection
//! set, display window), the construction-time configuration builders, the
//! action transitions, and the input-source lifecycle.

use super::decode::{decode, Action};
use super::render::{DefaultRowDelegate, RowDelegate};
use super::types::{IdentityStrategy, Item, SelectedEntry, WindowMode};
use crate::input::InputSource;
use crate::Component;
use bubbletea_rs::Cmd;
use std::io;

/// A keyboard-driven multi-select list.
///
/// The model owns the highlighted row index and the insertion-ordered
/// selection set over a host-supplied item list. It reacts to four decoded
/// input actions (move up, move down, toggle, submit), keeps the highlight
/// inside the currently visible window, and notifies the host through
/// callbacks on every observable change.
///
/// # State
///
/// - **Highlight**: index of the highlighted row, always within
///   `[0, M-1]` for the `M` currently visible rows; navigation wraps at both
///   ends rather than stopping.
/// - **Selection**: the subset of items the user has toggled on, kept in the
///   order they were selected. Every member is an element of the item list.
/// - **Window**: when a row limit is configured and smaller than the list,
///   only a contiguous slice of rows is visible (see [`WindowMode`]).
///
/// # Callbacks
///
/// `on_select`/`on_unselect` fire on toggle, `on_highlight` on navigation,
/// `on_submit` with the ordered selection on enter, and `on_state_changed`
/// with the freshly composed rows after every state mutation. All default to
/// no-ops.
///
/// # Examples
///
/// ```
/// use multiselect_widgets::multiselect::{DefaultItem, Model};
///
/// let mut list = Model::new(vec![
///     DefaultItem::new("Item 1", "item1"),
///     DefaultItem::new("Item 2", "item2"),
/// ]);
///
/// list.handle_input(b"\x1b[B"); // highlight Item 2
/// list.handle_input(b" ");      // select it
/// assert_eq!(list.selected_items().len(), 1);
/// ```
pub struct Model<I: Item> {
    pub(super) items: Vec<I>,
    pub(super) selected: Vec<SelectedEntry<I>>,
    /// Highlight position, relative to the visible window.
    pub(super) highlighted: usize,
    pub(super) limit: Option<usize>,
    pub(super) window_mode: WindowMode,
    pub(super) rotate_offset: usize,
    pub(super) identity: IdentityStrategy,
    pub(super) delegate: Box<dyn RowDelegate<I> + Send + Sync>,

    // Input lifecycle
    pub(super) focus: bool,
    input: Option<Box<dyn InputSource + Send>>,
    attached: bool,

    // Host callbacks
    on_select: Option<Box<dyn Fn(&I) + Send>>,
    on_unselect: Option<Box<dyn Fn(&I) + Send>>,
    on_submit: Option<Box<dyn Fn(&[I]) + Send>>,
    on_highlight: Option<Box<dyn Fn(&I) + Send>>,
    on_state_changed: Option<Box<dyn Fn(&[String]) + Send>>,
}

impl<I: Item + Send + Sync + 'static> Model<I> {
    /// Creates a new multi-select list over the given items.
    ///
    /// Defaults: nothing selected, first row highlighted, no row limit,
    /// static window mode, key-based identity, the built-in glyph renderers,
    /// and focus enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiselect_widgets::multiselect::{DefaultItem, Model};
    ///
    /// let list = Model::new(vec![DefaultItem::new("First", "first")]);
    /// assert_eq!(list.len(), 1);
    /// assert_eq!(list.highlighted_index(), 0);
    /// ```
    pub fn new(items: Vec<I>) -> Self {
        Self {
            items,
            selected: vec![],
            highlighted: 0,
            limit: None,
            window_mode: WindowMode::default(),
            rotate_offset: 0,
            identity: IdentityStrategy::default(),
            delegate: Box::new(DefaultRowDelegate::new()),
            focus: true,
            input: None,
            attached: false,
            on_select: None,
            on_unselect: None,
            on_submit: None,
            on_highlight: None,
            on_state_changed: None,
        }
    }

    /// Seeds the initial selection.
    ///
    /// Each given item is matched against the item list under the configured
    /// [`IdentityStrategy`]; items that are not in the list are dropped, so
    /// the selection-set invariant holds from the start. Set the identity
    /// strategy before calling this.
    pub fn with_selected(mut self, selected: Vec<I>) -> Self {
        for item in selected {
            let identity = self.identity;
            if let Some(index) = self
                .items
                .iter()
                .position(|candidate| items_match(identity, candidate, &item))
            {
                let already = self
                    .selected
                    .iter()
                    .any(|entry| entry.matches(identity, index, &item));
                if !already {
                    self.selected.push(SelectedEntry {
                        index,
                        item: self.items[index].clone(),
                    });
                }
            }
        }
        self
    }

    /// Sets whether the component starts focused (listening for input).
    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    /// Sets the initially highlighted row, clamped into the visible window.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiselect_widgets::multiselect::{DefaultItem, Model};
    ///
    /// let list = Model::new(vec![
    ///     DefaultItem::new("A", "a"),
    ///     DefaultItem::new("B", "b"),
    /// ])
    /// .with_initial_index(99);
    /// assert_eq!(list.highlighted_index(), 1); // clamped
    /// ```
    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.highlighted = index;
        self.clamp_window();
        self
    }

    /// Sets the maximum number of visible rows, or `None` for the full list.
    ///
    /// A limit of zero is a configuration contract violation by the host and
    /// is normalized to one rather than treated as fatal.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.set_limit(limit);
        self
    }

    /// Sets the windowing policy used when a row limit is active.
    pub fn with_window_mode(mut self, mode: WindowMode) -> Self {
        self.window_mode = mode;
        self
    }

    /// Sets how selection membership compares items.
    pub fn with_identity_strategy(mut self, identity: IdentityStrategy) -> Self {
        self.identity = identity;
        self
    }

    /// Replaces the row renderers.
    pub fn with_delegate<D>(mut self, delegate: D) -> Self
    where
        D: RowDelegate<I> + Send + Sync + 'static,
    {
        self.delegate = Box::new(delegate);
        self
    }

    /// Sets the callback fired when an item is added to the selection.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(&I) + Send + 'static,
    {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when an item is removed from the selection.
    pub fn on_unselect<F>(mut self, f: F) -> Self
    where
        F: Fn(&I) + Send + 'static,
    {
        self.on_unselect = Some(Box::new(f));
        self
    }

    /// Sets the callback fired on submit with the selection in insertion
    /// order.
    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&[I]) + Send + 'static,
    {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when the highlight moves, with the newly
    /// highlighted item.
    pub fn on_highlight<F>(mut self, f: F) -> Self
    where
        F: Fn(&I) + Send + 'static,
    {
        self.on_highlight = Some(Box::new(f));
        self
    }

    /// Sets the callback fired after every state mutation with the freshly
    /// composed rows, so hosts can repaint without polling.
    pub fn on_state_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) + Send + 'static,
    {
        self.on_state_changed = Some(Box::new(f));
        self
    }

    // --- Accessors ---

    /// Returns the total number of items in the list (not just the visible
    /// window).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the item list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the highlight position within the visible window.
    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// Returns a reference to the highlighted item, or `None` when the
    /// visible window is empty.
    pub fn highlighted_item(&self) -> Option<&I> {
        let (start, end) = self.window_bounds();
        self.items[start..end].get(self.highlighted)
    }

    /// Returns the selected items in the order they were selected.
    pub fn selected_items(&self) -> Vec<I> {
        self.selected.iter().map(|entry| entry.item.clone()).collect()
    }

    /// Returns whether the item at the given list index is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) => self.selection_position(index, item).is_some(),
            None => false,
        }
    }

    /// Returns the `[start, end)` bounds of the visible window within the
    /// item list.
    ///
    /// With no limit, or a limit at least the list length, the window is the
    /// whole list. Otherwise the window starts at zero (static mode) or at
    /// the host-driven rotate offset (rotating mode).
    ///
    /// # Examples
    ///
    /// ```
    /// use multiselect_widgets::multiselect::{DefaultItem, Model};
    ///
    /// let items: Vec<_> = (0..5)
    ///     .map(|i| DefaultItem::new(&format!("Item {i}"), &i.to_string()))
    ///     .collect();
    /// let list = Model::new(items).with_limit(Some(2));
    /// assert_eq!(list.window_bounds(), (0, 2));
    /// ```
    pub fn window_bounds(&self) -> (usize, usize) {
        let n = self.items.len();
        match self.limit {
            Some(limit) if limit < n => {
                let start = match self.window_mode {
                    WindowMode::Static => 0,
                    WindowMode::Rotating => self.rotate_offset.min(n - limit),
                };
                (start, start + limit)
            }
            _ => (0, n),
        }
    }

    /// Returns the currently visible slice of the item list.
    pub fn window(&self) -> &[I] {
        let (start, end) = self.window_bounds();
        &self.items[start..end]
    }

    /// Returns the number of visible rows.
    pub fn visible_len(&self) -> usize {
        let (start, end) = self.window_bounds();
        end - start
    }

    // --- Mutation ---

    /// Replaces the item list.
    ///
    /// Selection entries whose items are no longer present are pruned, the
    /// remaining entries are re-indexed, and the highlight is clamped back
    /// into the (possibly smaller) visible window.
    pub fn set_items(&mut self, items: Vec<I>) {
        let identity = self.identity;
        self.selected.retain_mut(|entry| match identity {
            IdentityStrategy::ByIndex => entry.index < items.len(),
            _ => match items
                .iter()
                .position(|candidate| entry.matches(identity, entry.index, candidate))
            {
                Some(index) => {
                    entry.index = index;
                    true
                }
                None => false,
            },
        });
        self.items = items;
        self.clamp_window();
    }

    /// Changes the row limit, clamping the highlight if the window shrank.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        // Zero rows would make every item unreachable; normalize instead of
        // failing.
        self.limit = limit.map(|l| l.max(1));
        self.clamp_window();
    }

    /// Moves the rotating window's start offset.
    ///
    /// The model never rotates by itself; hosts using
    /// [`WindowMode::Rotating`] call this to bring further items into view.
    /// The offset is clamped so the window always stays inside the list. Has
    /// no visible effect in static mode.
    pub fn set_rotate_offset(&mut self, offset: usize) {
        self.rotate_offset = offset;
        self.clamp_window();
    }

    /// Replaces the selection wholesale, applying the same matching rules as
    /// [`with_selected`](Model::with_selected). No callbacks fire; this is a
    /// host-driven reset, not a user interaction.
    pub fn set_selected(&mut self, selected: Vec<I>) {
        self.selected.clear();
        let identity = self.identity;
        for item in selected {
            if let Some(index) = self
                .items
                .iter()
                .position(|candidate| items_match(identity, candidate, &item))
            {
                let already = self
                    .selected
                    .iter()
                    .any(|entry| entry.matches(identity, index, &item));
                if !already {
                    self.selected.push(SelectedEntry {
                        index,
                        item: self.items[index].clone(),
                    });
                }
            }
        }
    }

    // --- Input handling ---

    /// Feeds one raw input chunk through the component.
    ///
    /// The chunk is decoded to at most one action, the action is applied as
    /// at most one state transition firing at most one semantic callback, and
    /// `on_state_changed` is emitted with the recomposed rows if the state
    /// actually changed. Unrecognized input is ignored entirely. Input is
    /// also ignored while the component is unfocused.
    pub fn handle_input(&mut self, chunk: &[u8]) {
        if !self.focus {
            return;
        }
        self.apply(decode(chunk));
    }

    /// Applies one decoded action to the state machine.
    ///
    /// See [`handle_input`](Model::handle_input) for the callback contract;
    /// this entry point exists for hosts that do their own decoding.
    pub fn apply(&mut self, action: Action) {
        let changed = match action {
            Action::MoveUp => self.move_highlight(Direction::Up),
            Action::MoveDown => self.move_highlight(Direction::Down),
            Action::ToggleSelect => self.toggle_highlighted(),
            Action::Submit => {
                self.submit();
                false
            }
            Action::Unrecognized => false,
        };
        if changed {
            if let Some(cb) = &self.on_state_changed {
                cb(&self.view_rows());
            }
        }
    }

    fn move_highlight(&mut self, direction: Direction) -> bool {
        let m = self.visible_len();
        if m == 0 {
            return false;
        }
        self.highlighted = match direction {
            Direction::Up => {
                if self.highlighted == 0 {
                    m - 1
                } else {
                    self.highlighted - 1
                }
            }
            Direction::Down => {
                if self.highlighted == m - 1 {
                    0
                } else {
                    self.highlighted + 1
                }
            }
        };
        if let Some(cb) = &self.on_highlight {
            let (start, _) = self.window_bounds();
            cb(&self.items[start + self.highlighted]);
        }
        true
    }

    fn toggle_highlighted(&mut self) -> bool {
        let m = self.visible_len();
        if m == 0 {
            return false;
        }
        let (start, _) = self.window_bounds();
        let index = start + self.highlighted;
        let item = self.items[index].clone();

        match self.selection_position(index, &item) {
            Some(pos) => {
                // Removal keeps the remaining entries in their insertion
                // order.
                let entry = self.selected.remove(pos);
                if let Some(cb) = &self.on_unselect {
                    cb(&entry.item);
                }
            }
            None => {
                self.selected.push(SelectedEntry {
                    index,
                    item: item.clone(),
                });
                if let Some(cb) = &self.on_select {
                    cb(&item);
                }
            }
        }
        true
    }

    fn submit(&self) {
        if let Some(cb) = &self.on_submit {
            cb(&self.selected_items());
        }
    }

    pub(super) fn selection_position(&self, index: usize, item: &I) -> Option<usize> {
        self.selected
            .iter()
            .position(|entry| entry.matches(self.identity, index, item))
    }

    /// Clamps the rotate offset and highlight back into the current window.
    fn clamp_window(&mut self) {
        let n = self.items.len();
        if let Some(limit) = self.limit {
            if limit < n {
                self.rotate_offset = self.rotate_offset.min(n - limit);
            } else {
                self.rotate_offset = 0;
            }
        }
        let m = self.visible_len();
        if m == 0 {
            self.highlighted = 0;
        } else if self.highlighted > m - 1 {
            self.highlighted = m - 1;
        }
    }

    // --- Input source lifecycle ---

    /// Attaches an input source to the component.
    ///
    /// Any previously attached source is detached first. If the component is
    /// focused, the new source is acquired immediately; otherwise it is held
    /// until focus is gained.
    ///
    /// # Errors
    ///
    /// Propagates acquisition failures (source unavailable or already claimed
    /// by another listener). The component is non-functional without input,
    /// so these are never swallowed.
    pub fn attach(&mut self, source: Box<dyn InputSource + Send>) -> io::Result<()> {
        self.detach()?;
        let mut source = source;
        if self.focus {
            source.acquire()?;
            self.attached = true;
        }
        self.input = Some(source);
        Ok(())
    }

    /// Detaches and releases the current input source, if any.
    ///
    /// Idempotent; safe to call during teardown regardless of focus state.
    ///
    /// # Errors
    ///
    /// Propagates release failures from the source.
    pub fn detach(&mut self) -> io::Result<()> {
        if let Some(mut source) = self.input.take() {
            if self.attached {
                self.attached = false;
                source.release()?;
            }
        }
        Ok(())
    }

    /// Sets the focus flag, acquiring or releasing the attached input source
    /// to match.
    ///
    /// Toggling focus off detaches the listener (restoring the source's
    /// prior mode); toggling it back on reattaches cleanly. Repeated calls
    /// with the same value are no-ops, so a host can drive this from its own
    /// focus tracking without double-acquiring.
    ///
    /// # Errors
    ///
    /// Propagates acquire/release failures from the attached source.
    pub fn set_focus(&mut self, focus: bool) -> io::Result<()> {
        if focus == self.focus {
            return Ok(());
        }
        self.focus = focus;
        if let Some(source) = &mut self.input {
            if focus && !self.attached {
                source.acquire()?;
                self.attached = true;
            } else if !focus && self.attached {
                self.attached = false;
                source.release()?;
            }
        }
        Ok(())
    }
}

impl<I: Item + Send + Sync + 'static> Component for Model<I> {
    fn focus(&mut self) -> Option<Cmd> {
        // Attach errors surface through set_focus for hosts that need them;
        // the trait seam itself is infallible.
        let _ = self.set_focus(true);
        None
    }

    fn blur(&mut self) {
        let _ = self.set_focus(false);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl<I: Item> Drop for Model<I> {
    fn drop(&mut self) {
        // Mirror of attach: the listener must not outlive the component.
        if let Some(mut source) = self.input.take() {
            if self.attached {
                let _ = source.release();
            }
        }
    }
}

enum Direction {
    Up,
    Down,
}

/// Compares two free-standing items under an identity strategy.
///
/// Used when seeding or resetting the selection from host-supplied items,
/// where no list index exists yet; `ByIndex` therefore falls back to value
/// equality to locate the item.
fn items_match<I: Item>(identity: IdentityStrategy, a: &I, b: &I) -> bool {
    match identity {
        IdentityStrategy::ByKey => match (a.key(), b.key()) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => a == b,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::MockInput;
    use crate::multiselect::DefaultItem;
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Mutex};

    fn items(n: usize) -> Vec<DefaultItem> {
        (0..n)
            .map(|i| DefaultItem::new(&format!("Item {}", i), &format!("item{}", i)))
            .collect()
    }

    fn abc() -> Vec<DefaultItem> {
        vec![
            DefaultItem::new("A", "a"),
            DefaultItem::new("B", "b"),
            DefaultItem::new("C", "c"),
        ]
    }

    #[test]
    fn test_move_down_wraps_modulo_window() {
        // k MoveDown presses on an M-item unlimited window land on k mod M.
        let m = 5;
        for k in 0..17 {
            let mut list = Model::new(items(m));
            for _ in 0..k {
                list.handle_input(b"\x1b[B");
            }
            assert_eq!(list.highlighted_index(), k % m, "k = {}", k);
        }
    }

    #[test]
    fn test_move_up_then_down_is_inverse() {
        for start in 0..3 {
            let mut list = Model::new(abc()).with_initial_index(start);
            list.handle_input(b"\x1b[A");
            list.handle_input(b"\x1b[B");
            assert_eq!(list.highlighted_index(), start);

            list.handle_input(b"\x1b[B");
            list.handle_input(b"\x1b[A");
            assert_eq!(list.highlighted_index(), start);
        }
    }

    #[test]
    fn test_move_up_wraps_to_bottom() {
        let mut list = Model::new(vec![DefaultItem::new("A", "a"), DefaultItem::new("B", "b")]);
        list.handle_input(b"\x1b[A");
        assert_eq!(list.highlighted_index(), 1);

        list.handle_input(b"\x1b[A");
        list.handle_input(b"\x1b[A");
        assert_eq!(list.highlighted_index(), 1);

        let mut list = Model::new(vec![DefaultItem::new("A", "a"), DefaultItem::new("B", "b")]);
        list.handle_input(b"\x1b[A");
        list.handle_input(b"\x1b[A");
        assert_eq!(list.highlighted_index(), 0);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let selects = events.clone();
        let unselects = events.clone();
        let mut list = Model::new(abc())
            .on_select(move |item| selects.lock().unwrap().push(format!("select:{}", item)))
            .on_unselect(move |item| unselects.lock().unwrap().push(format!("unselect:{}", item)));

        list.handle_input(b" ");
        list.handle_input(b" ");

        assert!(list.selected_items().is_empty());
        assert_eq!(
            *events.lock().unwrap(),
            vec!["select:A".to_string(), "unselect:A".to_string()]
        );
    }

    #[test]
    fn test_submit_mutates_nothing() {
        let mut list = Model::new(abc()).with_initial_index(1);
        list.handle_input(b" ");
        let before = list.selected_items();

        list.handle_input(b"\r");
        list.handle_input(b"\r");

        assert_eq!(list.highlighted_index(), 1);
        assert_eq!(list.selected_items(), before);
    }

    #[test]
    fn test_submit_reports_insertion_order() {
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let sink = submitted.clone();
        let mut list = Model::new(abc())
            .on_submit(move |sel| *sink.lock().unwrap() = sel.to_vec());

        // Select C first, then A: the order of selection, not list order.
        list.handle_input(b"\x1b[A"); // highlight C
        list.handle_input(b" ");
        list.handle_input(b"\x1b[B"); // wrap to A
        list.handle_input(b" ");
        list.handle_input(b"\r");

        let labels: Vec<String> = submitted
            .lock()
            .unwrap()
            .iter()
            .map(|i: &DefaultItem| i.label.clone())
            .collect();
        assert_eq!(labels, vec!["C", "A"]);
    }

    #[test]
    fn test_scenario_down_toggle_down_toggle_submit() {
        // items = [A,B,C], no limit: highlight path 0→1→1→2→2,
        // selection {B, C} in that order, one submit with [B, C].
        let highlights = Arc::new(Mutex::new(Vec::new()));
        let submits = Arc::new(Mutex::new(0usize));
        let submitted = Arc::new(Mutex::new(Vec::new()));

        let h = highlights.clone();
        let count = submits.clone();
        let sink = submitted.clone();
        let mut list = Model::new(abc())
            .on_highlight(move |item| h.lock().unwrap().push(item.label.clone()))
            .on_submit(move |sel| {
                *count.lock().unwrap() += 1;
                *sink.lock().unwrap() = sel.to_vec();
            });

        list.handle_input(b"\x1b[B");
        list.handle_input(b" ");
        list.handle_input(b"\x1b[B");
        list.handle_input(b" ");
        list.handle_input(b"\r");

        assert_eq!(list.highlighted_index(), 2);
        assert_eq!(*highlights.lock().unwrap(), vec!["B", "C"]);
        assert_eq!(*submits.lock().unwrap(), 1);
        let labels: Vec<String> = submitted
            .lock()
            .unwrap()
            .iter()
            .map(|i: &DefaultItem| i.label.clone())
            .collect();
        assert_eq!(labels, vec!["B", "C"]);
    }

    #[test]
    fn test_unrecognized_input_is_inert() {
        let fired = Arc::new(Mutex::new(0usize));
        let make_counter = |fired: &Arc<Mutex<usize>>| {
            let fired = fired.clone();
            move |_: &DefaultItem| *fired.lock().unwrap() += 1
        };
        let changes = fired.clone();
        let mut list = Model::new(abc())
            .on_select(make_counter(&fired))
            .on_unselect(make_counter(&fired))
            .on_highlight(make_counter(&fired))
            .on_state_changed(move |_| *changes.lock().unwrap() += 1);

        list.handle_input(b"x");
        list.handle_input(b"\x1b[C");
        list.handle_input(b"");

        assert_eq!(*fired.lock().unwrap(), 0);
        assert_eq!(list.highlighted_index(), 0);
        assert!(list.selected_items().is_empty());
    }

    #[test]
    fn test_empty_list_ignores_navigation_and_toggle() {
        let submitted = Arc::new(Mutex::new(None));
        let sink = submitted.clone();
        let mut list: Model<DefaultItem> =
            Model::new(vec![]).on_submit(move |sel| *sink.lock().unwrap() = Some(sel.len()));

        list.handle_input(b"\x1b[A");
        list.handle_input(b"\x1b[B");
        list.handle_input(b" ");
        assert_eq!(list.highlighted_index(), 0);
        assert!(list.selected_items().is_empty());

        // Submit still fires, with the (empty) selection.
        list.handle_input(b"\r");
        assert_eq!(*submitted.lock().unwrap(), Some(0));
    }

    #[test]
    fn test_static_window_bounds_reachability() {
        // With limit = 2 over 5 items, only the first two rows are ever
        // reachable, whatever the input sequence.
        let mut list = Model::new(items(5)).with_limit(Some(2));
        assert_eq!(list.window_bounds(), (0, 2));

        let mut seen = std::collections::HashSet::new();
        for chunk in [
            b"\x1b[B".as_slice(),
            b"\x1b[B",
            b"\x1b[A",
            b"\x1b[B",
            b"\x1b[B",
            b"\x1b[A",
            b"\x1b[A",
        ] {
            list.handle_input(chunk);
            seen.insert(list.highlighted_item().unwrap().label.clone());
        }
        assert!(seen.iter().all(|l| l == "Item 0" || l == "Item 1"));
    }

    #[test]
    fn test_rotating_window_follows_host_offset() {
        let mut list = Model::new(items(5))
            .with_limit(Some(2))
            .with_window_mode(WindowMode::Rotating);
        assert_eq!(list.window_bounds(), (0, 2));

        list.set_rotate_offset(3);
        assert_eq!(list.window_bounds(), (3, 5));
        assert_eq!(list.highlighted_item().unwrap().label, "Item 3");

        // Offset past the end clamps so the window stays in bounds.
        list.set_rotate_offset(10);
        assert_eq!(list.window_bounds(), (3, 5));
    }

    #[test]
    fn test_limit_zero_is_normalized() {
        let list = Model::new(abc()).with_limit(Some(0));
        assert_eq!(list.window_bounds(), (0, 1));
    }

    #[test]
    fn test_limit_at_or_above_len_shows_everything() {
        let list = Model::new(abc()).with_limit(Some(3));
        assert_eq!(list.window_bounds(), (0, 3));
        let list = Model::new(abc()).with_limit(Some(10));
        assert_eq!(list.window_bounds(), (0, 3));
    }

    #[test]
    fn test_highlight_reclamps_when_window_shrinks() {
        let mut list = Model::new(items(5)).with_initial_index(4);
        assert_eq!(list.highlighted_index(), 4);

        list.set_limit(Some(2));
        assert_eq!(list.highlighted_index(), 1);

        list.set_items(vec![]);
        assert_eq!(list.highlighted_index(), 0);
    }

    #[test]
    fn test_set_items_prunes_stale_selection() {
        let mut list = Model::new(abc());
        list.handle_input(b" "); // select A
        list.handle_input(b"\x1b[B");
        list.handle_input(b" "); // select B
        assert_eq!(list.selected_items().len(), 2);

        list.set_items(vec![DefaultItem::new("B", "b"), DefaultItem::new("D", "d")]);
        let remaining = list.selected_items();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].label, "B");
        assert!(list.is_selected(0));
    }

    #[test]
    fn test_with_selected_drops_unknown_items() {
        let list = Model::new(abc()).with_selected(vec![
            DefaultItem::new("B", "b"),
            DefaultItem::new("Z", "z"),
        ]);
        let selected = list.selected_items();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "B");
    }

    #[test]
    fn test_duplicate_values_with_keys_toggle_independently() {
        let twins = vec![
            DefaultItem::new("Same", "same").with_key("first"),
            DefaultItem::new("Same", "same").with_key("second"),
        ];
        let mut list = Model::new(twins);

        list.handle_input(b" "); // select the first twin
        assert!(list.is_selected(0));
        assert!(!list.is_selected(1));

        list.handle_input(b"\x1b[B");
        list.handle_input(b" "); // the second twin selects separately
        assert_eq!(list.selected_items().len(), 2);
    }

    #[test]
    fn test_by_index_identity_on_anonymous_duplicates() {
        let twins = vec![DefaultItem::new("Same", "same"), DefaultItem::new("Same", "same")];
        let mut list = Model::new(twins).with_identity_strategy(IdentityStrategy::ByIndex);

        list.handle_input(b" ");
        assert!(list.is_selected(0));
        assert!(!list.is_selected(1));
    }

    #[test]
    fn test_unfocused_component_ignores_input() {
        let mut list = Model::new(abc()).with_focus(false);
        list.handle_input(b"\x1b[B");
        list.handle_input(b" ");
        assert_eq!(list.highlighted_index(), 0);
        assert!(list.selected_items().is_empty());

        list.set_focus(true).unwrap();
        list.handle_input(b"\x1b[B");
        assert_eq!(list.highlighted_index(), 1);
    }

    #[test]
    fn test_state_changed_fires_on_mutations_only() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let mut list = Model::new(abc())
            .on_state_changed(move |rows| sink.lock().unwrap().push(rows.len()));

        list.handle_input(b"\x1b[B"); // highlight move: change
        list.handle_input(b" "); // toggle: change
        list.handle_input(b"\r"); // submit: no mutation
        list.handle_input(b"x"); // unrecognized: nothing

        let seen = changes.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|&rows| rows == 3));
    }

    #[test]
    fn test_focus_toggle_keeps_one_live_listener() {
        let mock = MockInput::default();
        let acquires = mock.acquires.clone();
        let releases = mock.releases.clone();

        let mut list = Model::new(abc());
        list.attach(Box::new(mock)).unwrap();
        assert_eq!(acquires.load(Ordering::SeqCst), 1);

        // Two full blur/focus cycles: every release is paired with exactly
        // one fresh acquire, no duplicate subscriptions.
        for _ in 0..2 {
            list.set_focus(false).unwrap();
            list.set_focus(false).unwrap();
            list.set_focus(true).unwrap();
            list.set_focus(true).unwrap();
        }
        assert_eq!(acquires.load(Ordering::SeqCst), 3);
        assert_eq!(releases.load(Ordering::SeqCst), 2);

        list.detach().unwrap();
        assert_eq!(releases.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_drop_releases_attached_source() {
        let mock = MockInput::default();
        let releases = mock.releases.clone();
        {
            let mut list = Model::new(abc());
            list.attach(Box::new(mock)).unwrap();
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_attach_while_blurred_defers_acquisition() {
        let mock = MockInput::default();
        let acquires = mock.acquires.clone();

        let mut list = Model::new(abc()).with_focus(false);
        list.attach(Box::new(mock)).unwrap();
        assert_eq!(acquires.load(Ordering::SeqCst), 0);

        list.set_focus(true).unwrap();
        assert_eq!(acquires.load(Ordering::SeqCst), 1);
    }
}
