//! One-time hand-out of the board's peripherals.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::lcd::Lcd;
use crate::perf::PerfBank;
use crate::pio::{Leds, SimplePio};
use crate::timer::SysTimer;

/// Everything the bitstream wires up, as owned driver values.
pub struct Board {
    pub timer: SysTimer,
    pub pio: SimplePio,
    pub leds: Leds,
    pub lcd: Lcd,
    pub perf: PerfBank,
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Hands out the board singleton. Returns `None` on every call after the
/// first, which keeps two pieces of code from driving the same registers
/// by accident.
pub fn take_board() -> Option<Board> {
    if TAKEN.swap(true, Ordering::AcqRel) {
        None
    } else {
        Some(Board {
            timer: SysTimer::new(),
            pio: SimplePio::new(),
            leds: Leds::new(),
            lcd: Lcd::new(),
            perf: PerfBank::new(),
        })
    }
}
