//! The board's register map.
//!
//! The lab bitstreams instantiate every peripheral at a fixed base address,
//! so this module plays the role a generated peripheral-access crate would
//! play for a commercial chip: `#[repr(C)]` register blocks, volatile
//! accessors, and the bit assignments of each control word.
//!
//! All registers are 32 bits wide on the bus. Several peripherals only
//! decode the low 8 or 16 bits; that is noted per block.

use core::cell::UnsafeCell;
use core::ptr;

/// A single memory-mapped register.
///
/// Reads and writes always go through `ptr::{read,write}_volatile`, so the
/// compiler can neither elide nor reorder them relative to other register
/// accesses.
#[repr(transparent)]
pub struct Reg<T: Copy>(UnsafeCell<T>);

impl<T: Copy> Reg<T> {
    #[inline(always)]
    pub fn read(&self) -> T {
        // Safety: the pointer comes from a live register block mapping.
        unsafe { ptr::read_volatile(self.0.get()) }
    }

    #[inline(always)]
    pub fn write(&self, value: T) {
        // Safety: as above.
        unsafe { ptr::write_volatile(self.0.get(), value) }
    }
}

// Safety: every access is volatile and the hardware tolerates concurrent
// accesses from ISRs and thread code; interlocking beyond that is the
// drivers' job.
unsafe impl<T: Copy> Sync for Reg<T> {}

const LEDS_BASE: usize = 0x1000_0010;
const SIMPLEPIO_BASE: usize = 0x1000_0020;
const SYS_TIMER_BASE: usize = 0x1000_0040;
const UART_BASE: usize = 0x1000_0060;
const INTC_BASE: usize = 0x1000_0080;
const LCD_BASE: usize = 0x1000_1000;
const PERF_BASE: usize = 0x0100_1000;

/// Interval timer. The period registers hold a 32-bit reload value split
/// into two 16-bit halves, little end first.
#[repr(C)]
pub struct TimerRegs {
    /// Bit 0: timeout occurred (level IRQ source). Any write clears it.
    /// Bit 1: running.
    pub status: Reg<u32>,
    /// See [`timer_ctrl`].
    pub control: Reg<u32>,
    pub period_lo: Reg<u32>,
    pub period_hi: Reg<u32>,
}

/// Control word bits of the interval timer.
pub mod timer_ctrl {
    /// Interrupt on timeout.
    pub const ITO: u32 = 1 << 0;
    /// Reload the period and keep counting on timeout.
    pub const CONT: u32 = 1 << 1;
    pub const START: u32 = 1 << 2;
    pub const STOP: u32 = 1 << 3;
}

/// Simple PIO block, 8 significant bits. A set direction bit makes the
/// corresponding pin an output.
#[repr(C)]
pub struct PioRegs {
    pub data: Reg<u32>,
    pub direction: Reg<u32>,
}

/// The red LED bank next to the seven-segment displays. 8 significant
/// bits, output only.
#[repr(C)]
pub struct LedRegs {
    pub data: Reg<u32>,
}

/// Console UART bridged to the debug probe.
#[repr(C)]
pub struct UartRegs {
    /// Low 8 bits: transmit on write, receive on read.
    pub data: Reg<u32>,
    /// Bits 31:16: remaining write FIFO space.
    pub control: Reg<u32>,
}

impl UartRegs {
    #[inline(always)]
    pub fn write_space(&self) -> u32 {
        self.control.read() >> 16
    }
}

/// Interrupt controller in front of the core's machine-external line.
/// One bit per request line; see [`IrqLine`](crate::irq::IrqLine).
#[repr(C)]
pub struct IntcRegs {
    pub enable: Reg<u32>,
    /// Level-sensitive image of the peripherals' request lines, masked by
    /// `enable`. Clears when the source peripheral is acknowledged.
    pub pending: Reg<u32>,
}

/// LCD controller, both generations. The plain slave decodes `command`,
/// `data`, and `control` (16 significant bits each); the DMA-capable
/// variant adds the image registers and the DMA/IRQ control bits.
#[repr(C)]
pub struct LcdRegs {
    pub command: Reg<u32>,
    pub data: Reg<u32>,
    /// See [`lcd_ctrl`].
    pub control: Reg<u32>,
    /// Pixels per panel line, for the DMA address generator.
    pub pix_per_line: Reg<u32>,
    /// Width in pixels of the image being transferred.
    pub img_width: Reg<u32>,
    /// Bus address of the first pixel.
    pub img_addr: Reg<u32>,
    /// Total number of pixels to transfer.
    pub img_size: Reg<u32>,
}

/// Control word bits of the LCD controller.
///
/// The bus width defaults to 16 bits after reset, so there is no "16-bit"
/// bit to set; writing the control word with `EIGHT_BIT` clear selects it.
pub mod lcd_ctrl {
    pub const EIGHT_BIT: u32 = 1 << 0;
    /// Holds the panel in reset while set.
    pub const RESET: u32 = 1 << 1;
    /// Self-clearing DMA kick (DMA-capable controller only).
    pub const START_DMA: u32 = 1 << 2;
    /// Source pixels are RGB565 rather than the legacy 8-bit format.
    pub const RGB565: u32 = 1 << 3;
    /// Convert source pixels to grayscale on the fly.
    pub const GRAYSCALE_SRC: u32 = 1 << 4;
    /// Raise the completion interrupt at end of transfer.
    pub const IRQ_ENABLE: u32 = 1 << 5;
    /// Acknowledge the completion interrupt.
    pub const IRQ_ACK: u32 = 1 << 6;
}

/// One section of the performance counter bank. Time counts CPU cycles and
/// is frozen while the section is not running.
#[repr(C)]
pub struct PerfSectionRegs {
    pub time_lo: Reg<u32>,
    pub time_hi: Reg<u32>,
    /// Number of begin events seen by this section.
    pub occurrences: Reg<u32>,
    /// Write 1 to begin, 0 to end. For section 0 (the global section) this
    /// starts/stops the whole bank; writing to `time_lo` of section 0
    /// resets every counter.
    pub ctrl: Reg<u32>,
}

impl PerfSectionRegs {
    /// Coherent 64-bit read of a counter that may be ticking underneath us.
    pub fn time(&self) -> u64 {
        loop {
            let hi = self.time_hi.read();
            let lo = self.time_lo.read();
            if self.time_hi.read() == hi {
                return (u64::from(hi) << 32) | u64::from(lo);
            }
        }
    }
}

/// The performance counter bank: the global section plus seven numbered
/// measurement sections.
#[repr(C)]
pub struct PerfRegs {
    pub sections: [PerfSectionRegs; 8],
}

macro_rules! reg_block {
    ($(#[$attr:meta])* $name:ident, $block:ty, $base:expr) => {
        $(#[$attr])*
        ///
        /// # Safety
        ///
        /// Returns a shared reference out of thin air; the caller is
        /// responsible for not creating conflicting drivers for the block.
        #[inline(always)]
        pub unsafe fn $name() -> &'static $block {
            &*($base as *const $block)
        }
    };
}

reg_block!(
    /// The interval timer block.
    timer, TimerRegs, SYS_TIMER_BASE);
reg_block!(
    /// The simple PIO block.
    pio, PioRegs, SIMPLEPIO_BASE);
reg_block!(
    /// The LED bank.
    leds, LedRegs, LEDS_BASE);
reg_block!(
    /// The console UART.
    uart, UartRegs, UART_BASE);
reg_block!(
    /// The interrupt controller.
    intc, IntcRegs, INTC_BASE);
reg_block!(
    /// The LCD controller.
    lcd, LcdRegs, LCD_BASE);
reg_block!(
    /// The performance counter bank.
    perf, PerfRegs, PERF_BASE);
