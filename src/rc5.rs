//! RC5 infrared decoding from periodic pin samples.
//!
//! See [`Rc5Decoder`] for the decode rules and [`Rc5Receiver`] for the
//! interrupt-side wiring.
//!
//! # Signal
//!
//! An RC5 word is 14 biphase-coded bits, most-significant first:
//!
//! ```text
//!   S1 S2 T  A4 A3 A2 A1 A0  C5 C4 C3 C2 C1 C0
//!   13 12 11 10  9  8  7  6   5  4  3  2  1  0   (bit position in the word)
//! ```
//!
//! Each bit lasts 1.778 ms and carries exactly one transition in its middle. The
//! demodulating receiver pulls its output low while the carrier is present, so a
//! `1` bit reads high then low, and a `0` bit reads low then high.
//!
//! # Example
//!
//! ```rust,no_run
//! use ir_matrix::config::RC5_TIMING;
//! use ir_matrix::rc5::{Rc5Decoder, Rc5Mailbox};
//!
//! static MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
//!
//! // Interrupt side: one call per tick with the sampled pin level.
//! let mut decoder = Rc5Decoder::new(RC5_TIMING);
//! # let level_high = true;
//! if let Some(word) = decoder.tick(level_high) {
//!     MAILBOX.publish(word);
//! }
//!
//! // Foreground side: each finished word is handed out once.
//! if let Some(command) = MAILBOX.take() {
//!     assert!(command < 128);
//! }
//! ```

use crate::{Error, Result};

mod mailbox;
mod receiver;
#[cfg(feature = "arm")]
pub mod systick;

pub use mailbox::Rc5Mailbox;
pub use receiver::{Rc5Isr, Rc5Receiver};

// ============================================================================
// Timing
// ============================================================================

/// Length of one RC5 bit in nanoseconds.
pub const RC5_BIT_NS: u32 = 1_778_000;

/// Set once more than 14 bits have been shifted in.
const WORD_OVERFLOW: u16 = 1 << 14;

/// Where the first start bit lands after exactly 14 bits.
const WORD_FIRST_BIT: u16 = 1 << 13;

/// Tick-count thresholds used to classify the time since the last mid-bit transition.
///
/// All three are fractions of one RC5 bit, rounded to the nearest tick:
///
/// | threshold   | fraction of a bit | at 31 250 Hz |
/// |-------------|-------------------|--------------|
/// | `min_ticks` | 0.4               | 22           |
/// | `mid_ticks` | 0.8               | 44           |
/// | `max_ticks` | 1.2               | 67           |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rc5Timing {
    /// Transitions sooner than this are glitches.
    pub min_ticks: u8,
    /// Transitions later than this are mid-bit transitions.
    pub mid_ticks: u8,
    /// Silence longer than this ends the word.
    pub max_ticks: u8,
}

impl Rc5Timing {
    /// Derive the thresholds for a sampling rate.
    ///
    /// Panics (and so fails the build when used in a `const`) if the thresholds collapse
    /// onto each other or do not fit the 8-bit saturating tick counter.
    ///
    /// ```rust
    /// use ir_matrix::rc5::Rc5Timing;
    ///
    /// const TIMING: Rc5Timing = Rc5Timing::from_tick_hz(31_250);
    /// const _: () = assert!(TIMING.min_ticks == 22 && TIMING.mid_ticks == 44 && TIMING.max_ticks == 67);
    /// ```
    ///
    /// ```rust,compile_fail
    /// use ir_matrix::rc5::Rc5Timing;
    ///
    /// // 1 MHz sampling would need a 2134-tick timeout.
    /// const TIMING: Rc5Timing = Rc5Timing::from_tick_hz(1_000_000);
    /// ```
    #[must_use]
    pub const fn from_tick_hz(tick_hz: u32) -> Self {
        let min_ticks = bit_fraction_ticks(tick_hz, 40);
        let mid_ticks = bit_fraction_ticks(tick_hz, 80);
        let max_ticks = bit_fraction_ticks(tick_hz, 120);

        assert!(min_ticks > 0, "RC5 tick rate too low to detect glitches");
        assert!(
            min_ticks < mid_ticks && mid_ticks < max_ticks,
            "RC5 tick rate too low to separate the decode bands"
        );
        assert!(
            max_ticks < u8::MAX as u64,
            "RC5 tick rate too high for the 8-bit tick counter"
        );

        Self {
            min_ticks: min_ticks as u8,
            mid_ticks: mid_ticks as u8,
            max_ticks: max_ticks as u8,
        }
    }
}

/// `percent` of one RC5 bit, in ticks, rounded to nearest.
const fn bit_fraction_ticks(tick_hz: u32, percent: u64) -> u64 {
    const SCALE: u64 = 1_000_000_000 * 100;
    (tick_hz as u64 * RC5_BIT_NS as u64 * percent + SCALE / 2) / SCALE
}

/// SysTick reload value that fires at `tick_hz` from a `cpu_hz` core clock.
///
/// ```rust
/// use ir_matrix::rc5::tick_reload;
///
/// const _: () = assert!(tick_reload(125_000_000, 31_250) == 3_999);
/// ```
#[must_use]
pub const fn tick_reload(cpu_hz: u32, tick_hz: u32) -> u32 {
    assert!(tick_hz > 0 && cpu_hz >= tick_hz, "tick rate above core clock");
    assert!(
        cpu_hz % tick_hz == 0,
        "core clock must be a whole multiple of the tick rate"
    );
    let reload = cpu_hz / tick_hz - 1;
    assert!(reload <= 0x00FF_FFFF, "SysTick reload must fit in 24 bits");
    reload
}

// ============================================================================
// Rc5Word
// ============================================================================

/// A complete 14-bit RC5 word as it came off the decoder.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rc5Word(u16);

impl Rc5Word {
    /// The raw 14-bit value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The two start bits (`S1 S2`), `0b11` for standard RC5.
    #[must_use]
    pub const fn start_bits(self) -> u8 {
        ((self.0 >> 12) & 0b11) as u8
    }

    /// The toggle bit; it flips on every new key press and holds during a repeat.
    #[must_use]
    pub const fn toggle(self) -> bool {
        self.0 & (1 << 11) != 0
    }

    /// The 5-bit device address.
    #[must_use]
    pub const fn address(self) -> u8 {
        ((self.0 >> 6) & 0x1F) as u8
    }

    /// The 6-bit command field.
    #[must_use]
    pub const fn command(self) -> u8 {
        (self.0 & 0x3F) as u8
    }

    /// The 7-bit key code handed to the application.
    ///
    /// The low six bits are the command field; bit 6 is the complement of word bit 13.
    ///
    /// ```rust
    /// use ir_matrix::rc5::Rc5Word;
    ///
    /// // 11 0 00001 000011: start, toggle clear, address 1, command 3
    /// let word = Rc5Word::try_from(0b11_0_00001_000011_u16).unwrap();
    /// assert_eq!(word.reduced(), 3);
    /// ```
    #[must_use]
    pub const fn reduced(self) -> u8 {
        ((self.0 & 0x3F) | ((!self.0 >> 7) & 0x40)) as u8
    }
}

impl TryFrom<u16> for Rc5Word {
    type Error = Error;

    fn try_from(raw: u16) -> Result<Self> {
        if raw & !(WORD_OVERFLOW - 1) != 0 {
            return Err(Error::Rc5WordTooWide(raw));
        }
        if raw & WORD_FIRST_BIT == 0 {
            return Err(Error::Rc5MissingStartBit(raw));
        }
        Ok(Self(raw))
    }
}

impl From<Rc5Word> for u16 {
    fn from(word: Rc5Word) -> Self {
        word.0
    }
}

// ============================================================================
// Rc5Decoder
// ============================================================================

/// Biphase accumulator fed one pin sample per tick.
///
/// Belongs to the interrupt handler; nothing in the foreground should hold one.
///
/// Two counters run on every tick: the time since the last mid-bit transition, and the
/// time since any transition. Then:
///
/// - if the mid-bit timer exceeds `max_ticks`, the word ends: it is returned when exactly
///   14 bits were collected with the first start bit set, then the accumulator clears;
/// - a pin transition sooner than `min_ticks` after the previous one is a glitch: the
///   accumulator clears and the rest of the frame is ignored until the line has been
///   quiet for `max_ticks`;
/// - a transition later than `mid_ticks` after the last mid-bit transition, or any
///   transition into an empty accumulator, is a mid-bit transition: the new bit (1 when
///   the pin went low) is shifted in and the mid-bit timer restarts;
/// - other transitions sit on a bit boundary and only restart the transition timer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rc5Decoder {
    timing: Rc5Timing,
    word: u16,
    level_high: bool,
    elapsed: u8,
    since_edge: u8,
    discarding: bool,
}

impl Rc5Decoder {
    /// An idle decoder. The receiver output is assumed to idle high.
    #[must_use]
    pub const fn new(timing: Rc5Timing) -> Self {
        Self {
            timing,
            word: 0,
            level_high: true,
            elapsed: 0,
            since_edge: u8::MAX,
            discarding: false,
        }
    }

    /// Feed one pin sample. Returns the word that just finished, if any.
    pub fn tick(&mut self, level_high: bool) -> Option<Rc5Word> {
        // Both saturate so a long idle stays an idle.
        self.elapsed = self.elapsed.saturating_add(1);
        self.since_edge = self.since_edge.saturating_add(1);

        let mut finished = None;
        if self.elapsed > self.timing.max_ticks {
            if !self.discarding && self.word & WORD_OVERFLOW == 0 && self.word & WORD_FIRST_BIT != 0
            {
                finished = Some(Rc5Word(self.word));
            }
            self.word = 0;
        }
        // Edges inside a frame are at most one bit apart, so this only holds between frames.
        if self.since_edge > self.timing.max_ticks {
            self.discarding = false;
        }

        if level_high != self.level_high {
            self.level_high = level_high;

            if self.since_edge < self.timing.min_ticks {
                self.word = 0;
                self.discarding = true;
            }
            self.since_edge = 0;

            if !self.discarding && (self.word == 0 || self.elapsed > self.timing.mid_ticks) {
                if self.word & WORD_OVERFLOW == 0 {
                    self.word <<= 1;
                }
                if !level_high {
                    self.word |= 1;
                }
                self.elapsed = 0;
            }
        }

        finished
    }

    /// Whether a word is being collected.
    #[must_use]
    pub const fn is_collecting(&self) -> bool {
        self.word != 0
    }
}
