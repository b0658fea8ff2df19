//! Helpers tied to the rv32 core itself rather than to any peripheral.

use crate::CPU_HZ;

/// Reads the core's free-running cycle counter.
#[inline(always)]
pub fn cycle_count() -> u64 {
    riscv::register::mcycle::read64()
}

/// Spins for at least `us` microseconds.
///
/// Accuracy is one-sided: interrupts taken during the spin only make the
/// delay longer, which is what the LCD bring-up sequences need.
pub fn delay_us(us: u32) {
    let deadline =
        cycle_count() + u64::from(us) * u64::from(CPU_HZ / 1_000_000);
    while cycle_count() < deadline {
        core::hint::spin_loop();
    }
}
