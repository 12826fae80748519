//! SysTick as the RC5 tick source.
//!
//! The embassy time driver runs on the RP2040 TIMER peripheral, which leaves the
//! core's SysTick free for a fixed-rate sample interrupt. The firmware's
//! `#[cortex_m_rt::exception] fn SysTick()` calls [`Rc5Isr::on_tick`](super::Rc5Isr::on_tick).

use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;

use super::tick_reload;
use crate::config::{CPU_HZ, RC5_TICK_HZ};

/// SysTick reload value for [`RC5_TICK_HZ`] from the core clock.
pub const RELOAD: u32 = tick_reload(CPU_HZ, RC5_TICK_HZ);

/// Start SysTick firing at [`RC5_TICK_HZ`].
pub fn start(syst: &mut SYST) {
    syst.disable_counter();
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(RELOAD);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
}
