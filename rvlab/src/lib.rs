//! Thin drivers for the lab board's SoC: an rv32 soft core plus a fixed set
//! of custom memory-mapped peripherals (interval timer, simple PIO, LEDs,
//! console UART, LCD controller, performance counters).
//!
//! This is deliberately *not* a general peripheral abstraction. Every
//! address and bit assignment is baked in, because the lab bitstreams pin
//! them down and the programs using this crate are single-purpose.

#![no_std]

pub mod util;

/// Core clock of the soft core in all lab bitstreams.
pub const CPU_HZ: u32 = 50_000_000;

cfg_if::cfg_if! {
    if #[cfg(target_os = "none")] {
        pub mod device;
        pub mod rv32;
        pub mod irq;
        pub mod timer;
        pub mod pio;
        pub mod console;
        pub mod lcd;
        pub mod perf;

        mod board;
        pub use board::*;
    }
}
