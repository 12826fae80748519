//! Single-slot handoff of finished words from the interrupt to the foreground.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use super::Rc5Word;

/// Holds at most one finished [`Rc5Word`].
///
/// [`publish`](Self::publish) overwrites an unread word; a held remote button keeps
/// resending, so nothing is queued. Both sides run with interrupts disabled, so the
/// 16-bit word never tears.
///
/// ```rust
/// use ir_matrix::rc5::{Rc5Mailbox, Rc5Word};
///
/// static MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
///
/// MAILBOX.publish(Rc5Word::try_from(0x3043_u16).unwrap());
/// assert_eq!(MAILBOX.take(), Some(3));
/// assert_eq!(MAILBOX.take(), None);
/// ```
pub struct Rc5Mailbox(Mutex<CriticalSectionRawMutex, Cell<Option<Rc5Word>>>);

impl Rc5Mailbox {
    /// An empty mailbox, usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(None)))
    }

    /// Store `word`, replacing any word not yet taken.
    pub fn publish(&self, word: Rc5Word) {
        self.0.lock(|slot| slot.set(Some(word)));
    }

    /// Remove and return the waiting word.
    #[must_use]
    pub fn take_word(&self) -> Option<Rc5Word> {
        self.0.lock(Cell::take)
    }

    /// Remove the waiting word and return its 7-bit key code (see [`Rc5Word::reduced`]).
    #[must_use]
    pub fn take(&self) -> Option<u8> {
        self.take_word().map(Rc5Word::reduced)
    }
}

impl Default for Rc5Mailbox {
    fn default() -> Self {
        Self::new()
    }
}
