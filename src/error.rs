//! Crate-wide error type.
//!
//! Most failure modes in this crate never reach runtime: timing that cannot be
//! met fails const evaluation, glitches are dropped inside the decoder, and
//! out-of-range pixels are ignored. What is left is listed here.

/// Errors returned by fallible operations in this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A raw value had bits set above the 14 RC5 word bits.
    #[display("RC5 word 0x{_0:04X} is wider than 14 bits")]
    Rc5WordTooWide(#[error(not(source))] u16),

    /// A raw value did not carry the leading RC5 start bit.
    #[display("RC5 word 0x{_0:04X} is missing its start bit")]
    Rc5MissingStartBit(#[error(not(source))] u16),

    /// The RC5 interrupt slot already holds a receiver.
    #[display("an RC5 receiver is already installed")]
    Rc5ReceiverInstalled,
}

/// Result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
