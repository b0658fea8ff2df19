//! Polled LED counter with a busy-wait delay.
//!
//! The simplest thing the board can do: no interrupts, no timer, just a
//! loop that counts, prints, and shows the low byte on the LEDs. The
//! companion program `pio_timer` does the same job interrupt-driven; the
//! contrast between the two is the exercise.

#![no_std]
#![no_main]

// Demo mains must elect one panic-handler crate.
#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use rvlab::println;

/// Spins per loop iteration. Roughly a third of a second of visible dwell
/// at the core clock; precision is beside the point here.
const DELAY_SPINS: u32 = 1_000_000;

#[riscv_rt::entry]
fn main() -> ! {
    let mut board = rvlab::take_board().unwrap();

    println!("Lets start counting");
    board.leds.init();

    let mut counter = 0u32;
    loop {
        counter += 1;
        println!("counter = {}", counter);
        board.leds.write(counter as u8);

        // silly busy wait
        for _ in 0..DELAY_SPINS {
            core::hint::spin_loop();
        }
    }
}
