//! Cycle-budgeted WS2812 output on two data lines.
//!
//! A WS2812 bit is one fixed-period pulse: a short high for `0`, a long high for `1`.
//! [`Ws2812Timing`] turns those pulse widths into cycle counts at compile time, and a
//! [`BitEmitter`] spends them on real pins. Everything above a single bit (byte order,
//! bit order, the two-line fan-out) lives in [`Ws2812`] and is plain Rust.
//!
//! # Example
//!
//! ```rust,no_run
//! use critical_section::CriticalSection;
//! use ir_matrix::ws2812::{BitEmitter, Line, Ws2812};
//!
//! struct Pins;
//!
//! impl BitEmitter for Pins {
//!     fn emit_bit(&mut self, _cs: CriticalSection<'_>, _line: Line, _bit: bool) {
//!         // drive the pin for one bit period
//!     }
//! }
//!
//! let mut ws2812 = Ws2812::new(Pins);
//! let frame = [0x10_u8; 2 * 3 * 128];
//! let (first, second) = frame.split_at(frame.len() / 2);
//! ws2812.flush(first, second);
//! ```

use critical_section::CriticalSection;

#[cfg(all(feature = "pico1", feature = "arm"))]
pub mod rp2040;

// ============================================================================
// Constants
// ============================================================================

/// High time of a `0` bit.
pub const ZERO_HIGH_NS: u32 = 350;

/// High time of a `1` bit.
pub const ONE_HIGH_NS: u32 = 900;

/// Full period of one bit.
pub const BIT_PERIOD_NS: u32 = 1_250;

/// Longest `0`-bit high time the LEDs still read as `0`.
pub const ZERO_HIGH_LIMIT_NS: u32 = 550;

/// Above this the `0`-bit high time still works but has little margin.
pub const ZERO_HIGH_MARGINAL_NS: u32 = 450;

/// Cycles the emitter spends on its own between the rising edge and the `0`-bit falling edge.
const EMIT_ZERO_CYCLES: u32 = 1;

/// Further fixed cycles between the `0`-bit and `1`-bit falling-edge stores.
const EMIT_ONE_CYCLES: u32 = 1;

/// Minimum cycles per bit outside the padding runs: the three stores plus call and loop
/// overhead.
///
/// Only the low phase depends on this. Extra cycles spent between bits stretch the low
/// phase, which the LEDs accept up to their reset threshold (tens of microseconds).
const EMIT_PERIOD_CYCLES: u32 = 8;

// ============================================================================
// Ws2812Timing
// ============================================================================

/// Cycle budget for one WS2812 bit at a given core clock.
///
/// The emitter raises the line, waits `w1` cycles, drops it for a `0` bit, waits `w2`,
/// drops it for a `1` bit, then waits `w3` to close the period. Each padding count is
/// the nominal cycle count minus what the emitter's own instructions already take,
/// clamped at zero.
///
/// ```rust
/// use ir_matrix::ws2812::Ws2812Timing;
///
/// const TIMING: Ws2812Timing = Ws2812Timing::from_cpu_hz(125_000_000);
/// const _: () = assert!(TIMING.w1 == 42 && TIMING.w2 == 69 && TIMING.w3 == 37);
/// ```
///
/// A clock that cannot produce a short enough `0` pulse fails the build:
///
/// ```rust,compile_fail
/// use ir_matrix::ws2812::Ws2812Timing;
///
/// const TIMING: Ws2812Timing = Ws2812Timing::from_cpu_hz(1_000_000);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ws2812Timing {
    /// Nominal `0`-bit high time in cycles (truncated).
    pub zero_high_cycles: u32,
    /// Nominal `1`-bit high time in cycles (rounded).
    pub one_high_cycles: u32,
    /// Nominal bit period in cycles (rounded).
    pub period_cycles: u32,
    /// Padding after the rising edge.
    pub w1: u32,
    /// Padding between the `0` and `1` falling edges.
    pub w2: u32,
    /// Padding after the `1` falling edge.
    pub w3: u32,
    /// The `0`-bit high time the emitter actually produces.
    pub zero_high_ns: u32,
}

impl Ws2812Timing {
    /// Derive the cycle budget for a `cpu_hz` core clock.
    ///
    /// Panics (and so fails the build when used in a `const`) if the realized `0`-bit
    /// high time exceeds [`ZERO_HIGH_LIMIT_NS`].
    #[must_use]
    pub const fn from_cpu_hz(cpu_hz: u32) -> Self {
        assert!(cpu_hz >= 1_000, "CPU clock below 1 kHz");
        let khz = cpu_hz as u64 / 1_000;

        let zero_high_cycles = (khz * ZERO_HIGH_NS as u64 / 1_000_000) as u32;
        let one_high_cycles = ns_to_cycles_rounded(khz, ONE_HIGH_NS);
        let period_cycles = ns_to_cycles_rounded(khz, BIT_PERIOD_NS);

        let w1 = zero_high_cycles.saturating_sub(EMIT_ZERO_CYCLES);
        // The `1` falling edge comes after both fixed costs and both padding runs.
        let w2 = one_high_cycles
            .saturating_sub(EMIT_ZERO_CYCLES + EMIT_ONE_CYCLES)
            .saturating_sub(w1);
        let w3 = period_cycles
            .saturating_sub(EMIT_PERIOD_CYCLES)
            .saturating_sub(w1)
            .saturating_sub(w2);

        let zero_high_ns = ((w1 + EMIT_ZERO_CYCLES) as u64 * 1_000_000 / khz) as u32;
        assert!(
            zero_high_ns <= ZERO_HIGH_LIMIT_NS,
            "CPU clock too low for the WS2812 zero pulse"
        );

        Self {
            zero_high_cycles,
            one_high_cycles,
            period_cycles,
            w1,
            w2,
            w3,
            zero_high_ns,
        }
    }

    /// Whether the `0` pulse is accepted but close to being read as a `1`.
    #[must_use]
    pub const fn is_marginal(&self) -> bool {
        self.zero_high_ns > ZERO_HIGH_MARGINAL_NS
    }
}

const fn ns_to_cycles_rounded(khz: u64, ns: u32) -> u32 {
    ((khz * ns as u64 + 500_000) / 1_000_000) as u32
}

// ============================================================================
// BitEmitter
// ============================================================================

/// One of the two WS2812 data outputs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Carries the first half of the frame.
    First,
    /// Carries the second half of the frame.
    Second,
}

/// Produces the waveform for one bit on one line.
///
/// Implementations must hold the line for exactly one bit period and may assume nothing
/// interrupts them: the [`CriticalSection`] token proves interrupts are off.
pub trait BitEmitter {
    /// Emit `bit` on `line`.
    fn emit_bit(&mut self, cs: CriticalSection<'_>, line: Line, bit: bool);
}

// ============================================================================
// Ws2812
// ============================================================================

/// Serializes byte runs onto the two lines of a [`BitEmitter`].
pub struct Ws2812<E> {
    emitter: E,
}

impl<E: BitEmitter> Ws2812<E> {
    /// Wrap an emitter.
    #[must_use]
    pub const fn new(emitter: E) -> Self {
        Self { emitter }
    }

    /// Emit `bytes` on `line`, most-significant bit first.
    pub fn send(&mut self, cs: CriticalSection<'_>, line: Line, bytes: &[u8]) {
        for &byte in bytes {
            for shift in (0..8).rev() {
                self.emitter.emit_bit(cs, line, (byte >> shift) & 1 != 0);
            }
        }
    }

    /// Emit `first` on [`Line::First`] and then `second` on [`Line::Second`] with
    /// interrupts disabled across both.
    ///
    /// The two halves of a frame are always the same length.
    pub fn flush(&mut self, first: &[u8], second: &[u8]) {
        debug_assert_eq!(first.len(), second.len(), "frame halves differ in length");
        critical_section::with(|cs| {
            self.send(cs, Line::First, first);
            self.send(cs, Line::Second, second);
        });
    }

    /// Borrow the emitter.
    #[must_use]
    pub const fn emitter(&self) -> &E {
        &self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        bits: Vec<(Line, bool)>,
    }

    impl BitEmitter for Recorder {
        fn emit_bit(&mut self, _cs: CriticalSection<'_>, line: Line, bit: bool) {
            self.bits.push((line, bit));
        }
    }

    #[test]
    fn reference_clock_budget() {
        let timing = Ws2812Timing::from_cpu_hz(125_000_000);
        assert_eq!(timing.zero_high_cycles, 43);
        assert_eq!(timing.one_high_cycles, 113);
        assert_eq!(timing.period_cycles, 156);
        assert_eq!(timing.zero_high_ns, 344);
        assert!(!timing.is_marginal());
    }

    #[test]
    fn one_bit_high_time_counts_every_fixed_cost() {
        for cpu_hz in [48_000_000, 125_000_000, 133_000_000] {
            let timing = Ws2812Timing::from_cpu_hz(cpu_hz);
            let realized = EMIT_ZERO_CYCLES + timing.w1 + EMIT_ONE_CYCLES + timing.w2;
            assert_eq!(realized, timing.one_high_cycles, "{cpu_hz} Hz");
        }
    }

    #[test]
    fn slow_clock_is_marginal() {
        // One emitter cycle is already 500 ns.
        let timing = Ws2812Timing::from_cpu_hz(2_000_000);
        assert_eq!((timing.w1, timing.zero_high_ns), (0, 500));
        assert!(timing.is_marginal());
    }

    #[test]
    #[should_panic(expected = "CPU clock too low")]
    fn too_slow_clock_panics() {
        let _ = Ws2812Timing::from_cpu_hz(1_000_000);
    }

    #[test]
    fn bytes_go_out_msb_first() {
        let mut ws2812 = Ws2812::new(Recorder::default());
        critical_section::with(|cs| ws2812.send(cs, Line::Second, &[0b1000_0001]));
        let bits: Vec<bool> = ws2812.emitter().bits.iter().map(|&(_, bit)| bit).collect();
        assert_eq!(
            bits,
            [true, false, false, false, false, false, false, true]
        );
        assert!(ws2812.emitter().bits.iter().all(|&(line, _)| line == Line::Second));
    }

    #[test]
    fn flush_sends_first_line_then_second() {
        let mut ws2812 = Ws2812::new(Recorder::default());
        ws2812.flush(&[0xFF, 0xFF], &[0x00, 0x00]);
        let lines: Vec<Line> = ws2812.emitter().bits.iter().map(|&(line, _)| line).collect();
        assert_eq!(lines.len(), 32);
        assert!(lines[..16].iter().all(|&line| line == Line::First));
        assert!(lines[16..].iter().all(|&line| line == Line::Second));
    }

    #[test]
    #[should_panic(expected = "frame halves differ in length")]
    fn flush_rejects_uneven_halves() {
        let mut ws2812 = Ws2812::new(Recorder::default());
        ws2812.flush(&[0xFF], &[0x00, 0x00]);
    }
}
