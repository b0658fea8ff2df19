//! Simple PIO and LED bank drivers.
//!
//! Both blocks are 8 bits wide. The PIO's pins go to the expansion
//! header; the LED bank drives the red LEDs directly.

use crate::device::{self, LedRegs, PioRegs};

pub struct SimplePio {
    _priv: (),
}

impl SimplePio {
    pub(crate) fn new() -> Self {
        SimplePio { _priv: () }
    }

    fn regs(&self) -> &'static PioRegs {
        // Safety: construction is gated through take_board.
        unsafe { device::pio() }
    }

    /// All pins outputs, all low.
    pub fn init(&mut self) {
        let regs = self.regs();
        regs.direction.write(0xFF);
        regs.data.write(0);
    }

    pub fn write(&mut self, value: u8) {
        self.regs().data.write(value.into());
    }
}

/// Writes the PIO data register without owning the driver value.
///
/// Interrupt handlers use this to mirror their counter while the
/// `SimplePio` itself lives with the main loop. A plain data-register
/// store is idempotent, so the aliasing is harmless.
pub fn mirror(value: u8) {
    // Safety: single idempotent register store; see above.
    unsafe { device::pio() }.data.write(value.into());
}

pub struct Leds {
    _priv: (),
}

impl Leds {
    pub(crate) fn new() -> Self {
        Leds { _priv: () }
    }

    fn regs(&self) -> &'static LedRegs {
        // Safety: construction is gated through take_board.
        unsafe { device::leds() }
    }

    /// All LEDs off.
    pub fn init(&mut self) {
        self.regs().data.write(0);
    }

    /// Shows the low 8 bits of `value`.
    pub fn write(&mut self, value: u8) {
        self.regs().data.write(value.into());
    }
}
