//! Latency measurement signals on spare PIO pins, compiled out unless the
//! `measurement` feature is set.
//!
//! Because this is a debug facility it circumvents hardware ownership
//! entirely: the signals share the PIO data register with whatever the
//! running program mirrors there. If the program writes the full byte
//! (the timer labs do), expect the pulses to get stomped on.
//!
//! Current pin mapping on the expansion header:
//!
//! - A: PIO bit 4 (pulsed around interrupt dispatch by the driver)
//! - B: PIO bit 5 (free for program use)

#[cfg(all(target_os = "none", feature = "measurement"))]
mod hw {
    use crate::device;

    pub const SIG_A: u32 = 1 << 4;
    pub const SIG_B: u32 = 1 << 5;

    pub fn modify_data(f: impl FnOnce(u32) -> u32) {
        // Safety: read-modify-write of the data register; the aliasing
        // hazard is this module's documented nature.
        let pio = unsafe { device::pio() };
        pio.data.write(f(pio.data.read()));
    }
}

/// Sets up the measurement pins as outputs.
///
/// # Safety
///
/// Must not be preempted by anything else touching the PIO direction
/// register. Call it early in `main` and you're good.
pub unsafe fn init() {
    #[cfg(all(target_os = "none", feature = "measurement"))]
    {
        let pio = crate::device::pio();
        pio.direction
            .write(pio.direction.read() | hw::SIG_A | hw::SIG_B);
    }
}

/// Raises measurement signal A. No-op without the `measurement` feature.
pub fn sig_a_set() {
    #[cfg(all(target_os = "none", feature = "measurement"))]
    hw::modify_data(|d| d | hw::SIG_A);
}

/// Drops measurement signal A. No-op without the `measurement` feature.
pub fn sig_a_clear() {
    #[cfg(all(target_os = "none", feature = "measurement"))]
    hw::modify_data(|d| d & !hw::SIG_A);
}

/// Raises measurement signal B. No-op without the `measurement` feature.
pub fn sig_b_set() {
    #[cfg(all(target_os = "none", feature = "measurement"))]
    hw::modify_data(|d| d | hw::SIG_B);
}

/// Drops measurement signal B. No-op without the `measurement` feature.
pub fn sig_b_clear() {
    #[cfg(all(target_os = "none", feature = "measurement"))]
    hw::modify_data(|d| d & !hw::SIG_B);
}
