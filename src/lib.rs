//! RC5 infrared decoding and two-line WS2812 matrix output for the Pico.
//!
//! The crate has three cores:
//!
//! - [`rc5`]: a biphase decoder sampled from a fast timer interrupt, publishing
//!   finished words to a single-slot [`Rc5Mailbox`](rc5::Rc5Mailbox).
//! - [`ws2812`]: cycle-budgeted WS2812 bit emission behind the narrow
//!   [`BitEmitter`](ws2812::BitEmitter) interface, with compile-time pulse timing.
//! - [`matrix`]: a serpentine-mapped pixel buffer that flushes as two equal
//!   halves on two data lines.
//!
//! # Glossary
//!
//! - **Tick:** one sample of the IR receiver pin, taken from the SysTick interrupt
//!   at [`config::RC5_TICK_HZ`].
//! - **Line:** one WS2812 data output. The matrix is driven as two panels, one per line.
//! - **Wiring order:** the order LEDs appear on the data line, as opposed to `(x, y)`.
#![cfg_attr(not(test), no_std)]

// Compile-time checks: board and architecture features must agree (unless building for the host)
#[cfg(all(feature = "pico1", not(feature = "arm")))]
compile_error!("The 'pico1' board feature requires the 'arm' architecture feature");

#[cfg(all(feature = "arm", not(feature = "pico1")))]
compile_error!("The 'arm' feature is only supported together with the 'pico1' board feature");

pub mod config;
mod error;
pub mod matrix;
pub mod rc5;
pub mod remote;
pub mod ws2812;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
