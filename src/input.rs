//! Input source management for raw-mode terminal listening.
//!
//! The multi-select component reads its keystrokes from an [`InputSource`]: a
//! capability that can be acquired (switch the terminal into raw, unbuffered
//! mode and claim the listener slot) and released (restore the prior mode and
//! give the slot back). The component acquires the source when it gains focus
//! and releases it when it blurs or is dropped, so the acquire/release pairing
//! holds on every exit path.
//!
//! Only one listener may be active on a given source at a time. [`TtyInput`]
//! enforces this process-wide for the controlling terminal: a second live
//! acquisition fails with [`std::io::ErrorKind::AlreadyExists`] until the
//! first is released.
//!
//! ### Example
//! ```rust,no_run
//! use multiselect_widgets::input::{InputSource, TtyInput};
//!
//! let mut tty = TtyInput::new();
//! tty.acquire()?;
//! // ... read raw input chunks from stdin ...
//! tty.release()?;
//! # Ok::<(), std::io::Error>(())
//! ```

use crossterm::terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

// Process-wide listener slot for the controlling terminal. There is exactly
// one tty, so exclusivity has to be global rather than per-instance.
static TTY_CLAIMED: AtomicBool = AtomicBool::new(false);

/// A byte-stream input source with scoped acquire/release semantics.
///
/// `acquire` puts the source into raw, listener-attached mode; `release`
/// restores whatever mode it was in before. Both must be idempotent: acquiring
/// an already-held source or releasing an already-released one is a no-op so
/// that focus toggling never double-claims or double-restores.
///
/// Failures are reported to the caller rather than swallowed; a component
/// without its input source is non-functional and the host needs to know.
pub trait InputSource {
    /// Claims the source and switches it into raw, unbuffered mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unavailable or already claimed by
    /// another listener.
    fn acquire(&mut self) -> io::Result<()>;

    /// Releases the source and restores its prior mode.
    ///
    /// # Errors
    ///
    /// Returns an error if restoring the prior mode fails.
    fn release(&mut self) -> io::Result<()>;
}

/// The controlling terminal as an input source.
///
/// Acquiring enables crossterm raw mode; releasing disables it. The terminal
/// is also released on drop, so raw mode cannot leak past the owning
/// component's lifetime even when teardown is abnormal.
///
/// # Examples
///
/// ```rust,no_run
/// use multiselect_widgets::input::{InputSource, TtyInput};
///
/// let mut tty = TtyInput::new();
/// tty.acquire()?;
/// assert!(tty.held());
///
/// // A second listener is refused while the first holds the terminal.
/// let mut other = TtyInput::new();
/// assert!(other.acquire().is_err());
///
/// tty.release()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TtyInput {
    held: bool,
}

impl TtyInput {
    /// Creates a new, unclaimed terminal input source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether this instance currently holds the terminal.
    pub fn held(&self) -> bool {
        self.held
    }
}

impl InputSource for TtyInput {
    fn acquire(&mut self) -> io::Result<()> {
        if self.held {
            return Ok(());
        }
        if TTY_CLAIMED.swap(true, Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "terminal input is already claimed by another listener",
            ));
        }
        if let Err(err) = terminal::enable_raw_mode() {
            TTY_CLAIMED.store(false, Ordering::SeqCst);
            return Err(err);
        }
        self.held = true;
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.held {
            return Ok(());
        }
        self.held = false;
        let result = terminal::disable_raw_mode();
        TTY_CLAIMED.store(false, Ordering::SeqCst);
        result
    }
}

impl Drop for TtyInput {
    fn drop(&mut self) {
        // Raw mode must not outlive the listener; errors here have nowhere
        // to go.
        let _ = self.release();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Counting mock used to verify acquire/release pairing without a tty.

    use super::InputSource;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    pub(crate) struct MockInput {
        held: bool,
        pub(crate) acquires: Arc<AtomicUsize>,
        pub(crate) releases: Arc<AtomicUsize>,
    }

    impl InputSource for MockInput {
        fn acquire(&mut self) -> io::Result<()> {
            if !self.held {
                self.held = true;
                self.acquires.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }

        fn release(&mut self) -> io::Result<()> {
            if self.held {
                self.held = false;
                self.releases.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockInput;
    use super::*;

    #[test]
    fn test_mock_acquire_release_idempotent() {
        let mut src = MockInput::default();
        src.acquire().unwrap();
        src.acquire().unwrap();
        assert_eq!(src.acquires.load(Ordering::SeqCst), 1);

        src.release().unwrap();
        src.release().unwrap();
        assert_eq!(src.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tty_release_without_acquire_is_noop() {
        let mut tty = TtyInput::new();
        assert!(!tty.held());
        // Never acquired, so release must not touch the global claim or the
        // terminal state.
        tty.release().unwrap();
        assert!(!tty.held());
    }
}
