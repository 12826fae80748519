//! Interrupt-side glue between a sampled pin, the decoder, and the mailbox.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal::digital::InputPin;

use super::{Rc5Decoder, Rc5Mailbox, Rc5Timing};
use crate::{Error, Result};

/// Samples the IR receiver pin and publishes finished words.
///
/// Call [`tick`](Self::tick) at the tick rate the [`Rc5Timing`] was derived for.
pub struct Rc5Receiver<'m, P> {
    pin: P,
    decoder: Rc5Decoder,
    mailbox: &'m Rc5Mailbox,
}

impl<'m, P: InputPin> Rc5Receiver<'m, P> {
    /// Create a receiver reading `pin` and publishing into `mailbox`.
    #[must_use]
    pub const fn new(pin: P, timing: Rc5Timing, mailbox: &'m Rc5Mailbox) -> Self {
        Self {
            pin,
            decoder: Rc5Decoder::new(timing),
            mailbox,
        }
    }

    /// Sample the pin once and advance the decoder.
    ///
    /// A failed pin read skips the sample; the decoder still sees the tick pass so
    /// its timeout keeps running.
    pub fn tick(&mut self) {
        let level_high = match self.pin.is_high() {
            Ok(level_high) => level_high,
            Err(_) => self.decoder.level_high,
        };
        if let Some(word) = self.decoder.tick(level_high) {
            self.mailbox.publish(word);
        }
    }

    /// Give the pin back.
    pub fn into_pin(self) -> P {
        self.pin
    }
}

/// A `static` slot that lets an interrupt handler drive an [`Rc5Receiver`].
///
/// The handler owns no state of its own: it calls [`on_tick`](Self::on_tick), which is
/// a no-op until [`install`](Self::install) has run.
///
/// ```rust,no_run
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{ErrorType, InputPin};
/// # struct IrPin;
/// # impl ErrorType for IrPin { type Error = Infallible; }
/// # impl InputPin for IrPin {
/// #     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(false) }
/// # }
/// use ir_matrix::config::RC5_TIMING;
/// use ir_matrix::rc5::{Rc5Isr, Rc5Mailbox, Rc5Receiver};
///
/// static RC5_MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
/// static RC5_ISR: Rc5Isr<IrPin> = Rc5Isr::new();
///
/// // In the timer interrupt handler:
/// fn on_timer() {
///     RC5_ISR.on_tick();
/// }
///
/// fn start() -> ir_matrix::Result<()> {
///     RC5_ISR.install(Rc5Receiver::new(IrPin, RC5_TIMING, &RC5_MAILBOX))
/// }
/// ```
pub struct Rc5Isr<P>(Mutex<CriticalSectionRawMutex, RefCell<Option<Rc5Receiver<'static, P>>>>);

impl<P: InputPin> Rc5Isr<P> {
    /// An empty slot, usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self(Mutex::new(RefCell::new(None)))
    }

    /// Move `receiver` into the slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rc5ReceiverInstalled`] if a receiver is already installed.
    pub fn install(&self, receiver: Rc5Receiver<'static, P>) -> Result<()> {
        self.0.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(Error::Rc5ReceiverInstalled);
            }
            *slot = Some(receiver);
            Ok(())
        })
    }

    /// Run one tick of the installed receiver. Call from the timer interrupt.
    pub fn on_tick(&self) {
        self.0.lock(|slot| {
            if let Some(receiver) = slot.borrow_mut().as_mut() {
                receiver.tick();
            }
        });
    }
}

impl<P: InputPin> Default for Rc5Isr<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType;

    use super::*;

    struct Idle;

    impl ErrorType for Idle {
        type Error = Infallible;
    }

    impl InputPin for Idle {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(true)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(false)
        }
    }

    static MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
    const TIMING: Rc5Timing = Rc5Timing::from_tick_hz(31_250);

    #[test]
    fn tick_without_receiver_is_a_no_op() {
        let isr: Rc5Isr<Idle> = Rc5Isr::new();
        isr.on_tick();
    }

    #[test]
    fn second_install_is_rejected() {
        let isr: Rc5Isr<Idle> = Rc5Isr::new();
        assert_eq!(isr.install(Rc5Receiver::new(Idle, TIMING, &MAILBOX)), Ok(()));
        assert_eq!(
            isr.install(Rc5Receiver::new(Idle, TIMING, &MAILBOX)),
            Err(Error::Rc5ReceiverInstalled)
        );
        for _ in 0..500 {
            isr.on_tick();
        }
        assert_eq!(MAILBOX.take(), None);
    }
}
