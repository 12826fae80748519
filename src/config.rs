//! Build-time configuration for the matrix display.
//!
//! Everything here is a `const`. Derived timing values are evaluated while compiling,
//! so a clock rate or tick rate that cannot meet the protocols fails the build.

use crate::matrix::ChannelOrder;
use crate::matrix::layout::LedLayout;
use crate::rc5::Rc5Timing;
use crate::ws2812::Ws2812Timing;

/// Core clock of the RP2040 after `embassy_rp::init` with default clocks.
pub const CPU_HZ: u32 = 125_000_000;

/// Rate at which the IR receiver pin is sampled (32 µs per tick).
pub const RC5_TICK_HZ: u32 = 31_250;

/// Matrix width in LEDs.
pub const MATRIX_WIDTH: usize = 16;

/// Matrix height in LEDs.
pub const MATRIX_HEIGHT: usize = 16;

/// Total number of LEDs in the matrix.
pub const MATRIX_LEN: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// How the matrix is wired: snaking down the columns, with rows counted from the
/// bottom edge of the wiring.
///
/// Even columns run from `y = H - 1` down to `y = 0`; odd columns run from `y = 0` up.
pub const MATRIX_LAYOUT: LedLayout<MATRIX_LEN, MATRIX_WIDTH, MATRIX_HEIGHT> =
    LedLayout::serpentine_column_major().flip_v();

/// Byte order the LEDs expect on the wire.
pub const CHANNEL_ORDER: ChannelOrder = ChannelOrder::Grb;

/// GPIO carrying the demodulated IR receiver output (active low, idles high).
pub const RC5_PIN: u8 = 7;

/// GPIO driving the first half of the matrix.
pub const FIRST_LINE_PIN: u8 = 9;

/// GPIO driving the second half of the matrix.
pub const SECOND_LINE_PIN: u8 = 10;

/// RC5 decode thresholds for [`RC5_TICK_HZ`].
pub const RC5_TIMING: Rc5Timing = Rc5Timing::from_tick_hz(RC5_TICK_HZ);

/// WS2812 cycle budget for [`CPU_HZ`].
pub const WS2812_TIMING: Ws2812Timing = Ws2812Timing::from_cpu_hz(CPU_HZ);

const _: () = assert!(
    MATRIX_LEN % 2 == 0,
    "the matrix must split into two equal halves"
);
