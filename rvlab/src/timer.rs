//! Interval timer driver.
//!
//! The timer reloads its 32-bit period and keeps counting when started in
//! continuous mode, raising a level interrupt on each timeout. The lab
//! programs use it as their only time base.

use crate::device::{self, timer_ctrl, TimerRegs};
use crate::CPU_HZ;

pub struct SysTimer {
    _priv: (),
}

impl SysTimer {
    pub(crate) fn new() -> Self {
        SysTimer { _priv: () }
    }

    fn regs(&self) -> &'static TimerRegs {
        // Safety: construction of SysTimer is gated through take_board.
        unsafe { device::timer() }
    }

    /// Stops the counter and masks its interrupt at the source.
    ///
    /// The control register is write-only, so this clobbers any previous
    /// mode bits; that is fine for the fixed setups used here.
    pub fn stop(&mut self) {
        self.regs().control.write(timer_ctrl::STOP);
    }

    /// Programs the reload value, in CPU cycles. The hardware counts
    /// `cycles + 1` per period.
    pub fn set_period_cycles(&mut self, cycles: u32) {
        let regs = self.regs();
        regs.period_lo.write(cycles & 0xFFFF);
        regs.period_hi.write(cycles >> 16);
    }

    /// Programs the reload value, in milliseconds of wall time.
    pub fn set_period_ms(&mut self, ms: u32) {
        self.set_period_cycles(ms * (CPU_HZ / 1000) - 1);
    }

    /// Starts the timer in continuous mode with the timeout interrupt
    /// enabled. Pair with an [`crate::irq::register`]ed handler that calls
    /// [`acknowledge`].
    pub fn start_with_irq(&mut self) {
        self.regs()
            .control
            .write(timer_ctrl::ITO | timer_ctrl::CONT | timer_ctrl::START);
    }

}

/// Acknowledges the timeout interrupt by clearing the status register.
///
/// This is a free function rather than a method so interrupt handlers can
/// call it without holding the `SysTimer` value, which lives with the main
/// loop. A stray extra acknowledge is harmless.
pub fn acknowledge() {
    // Safety: a status-register write is the architecturally blessed way
    // to drop the request line, whoever performs it.
    unsafe { device::timer() }.status.write(0);
}
