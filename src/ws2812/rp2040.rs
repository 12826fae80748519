//! [`BitEmitter`] for the RP2040, driving two GPIOs through the SIO block.
//!
//! SIO stores complete in a single cycle on the Cortex-M0+ IOPORT, so the waveform is
//! three stores padded with `nop` runs sized by [`WS2812_TIMING`]. The stores run from
//! SRAM (`.data.ram_func`, copied there at reset) so flash fetches never stretch a pulse.

use core::arch::asm;

use critical_section::CriticalSection;
use embassy_rp::Peri;
use embassy_rp::gpio::{Level, Output, Pin};

use super::{BitEmitter, Line};
use crate::config::WS2812_TIMING;

/// SIO `GPIO_OUT_SET`: writing a mask drives those pins high.
const SIO_GPIO_OUT_SET: u32 = 0xD000_0014;

/// SIO `GPIO_OUT_CLR`: writing a mask drives those pins low.
const SIO_GPIO_OUT_CLR: u32 = 0xD000_0018;

const W1: u32 = WS2812_TIMING.w1;
const W2: u32 = WS2812_TIMING.w2;
const W3: u32 = WS2812_TIMING.w3;

/// Two WS2812 data lines on bank-0 GPIOs.
pub struct SioEmitter<'d> {
    _first: Output<'d>,
    _second: Output<'d>,
    first_mask: u32,
    second_mask: u32,
}

impl<'d> SioEmitter<'d> {
    /// Configure both pins as low outputs.
    ///
    /// ```rust,no_run
    /// # #![no_std]
    /// # #![no_main]
    /// # use panic_probe as _;
    /// use ir_matrix::ws2812::{Ws2812, rp2040::SioEmitter};
    ///
    /// # fn example() {
    /// let p = embassy_rp::init(Default::default());
    /// let mut ws2812 = Ws2812::new(SioEmitter::new(p.PIN_9, p.PIN_10));
    /// ws2812.flush(&[0; 384], &[0; 384]);
    /// # }
    /// ```
    #[must_use]
    pub fn new(first: Peri<'d, impl Pin>, second: Peri<'d, impl Pin>) -> Self {
        let first_mask = 1_u32 << first.pin();
        let second_mask = 1_u32 << second.pin();
        Self {
            _first: Output::new(first, Level::Low),
            _second: Output::new(second, Level::Low),
            first_mask,
            second_mask,
        }
    }
}

impl BitEmitter for SioEmitter<'_> {
    #[inline(always)]
    fn emit_bit(&mut self, _cs: CriticalSection<'_>, line: Line, bit: bool) {
        let mask = match line {
            Line::First => self.first_mask,
            Line::Second => self.second_mask,
        };
        // A `1` bit re-sets the line where a `0` bit drops it.
        let mid = if bit {
            SIO_GPIO_OUT_SET
        } else {
            SIO_GPIO_OUT_CLR
        };
        emit_waveform(mask, mid);
    }
}

/// One bit's three stores and padding, executed from SRAM.
///
/// Running from flash would let an XIP cache miss stall a `nop` run mid-pulse. From SRAM
/// the only unpredictable cycles are the call and return, and both fall in the low phase.
#[inline(never)]
#[expect(
    unsafe_code,
    reason = "cycle-counted SIO stores need inline assembly placed in SRAM"
)]
#[unsafe(link_section = ".data.ram_func")]
fn emit_waveform(mask: u32, mid: u32) {
    // SAFETY: the three addresses are the SIO output set/clear registers, which only
    // touch the GPIOs named in `mask`; callers pass the mask of a pin they own.
    unsafe {
        asm!(
            "str {mask}, [{set}]",
            ".rept {w1}",
            "nop",
            ".endr",
            "str {mask}, [{mid}]",
            ".rept {w2}",
            "nop",
            ".endr",
            "str {mask}, [{clr}]",
            ".rept {w3}",
            "nop",
            ".endr",
            mask = in(reg) mask,
            set = in(reg) SIO_GPIO_OUT_SET,
            mid = in(reg) mid,
            clr = in(reg) SIO_GPIO_OUT_CLR,
            w1 = const W1,
            w2 = const W2,
            w3 = const W3,
            options(nostack, preserves_flags),
        );
    }
}
