//! Timer interrupt producing a counter+flag pair for a polling main loop.
//!
//! The canonical lab shape: the timeout handler bumps a shared counter
//! and raises a flag; the main loop polls the flag and, when it sees it,
//! prints the counter and mirrors it to the LED bank and the PIO header.
//!
//! The handler takes the lock unconditionally, which is only sound
//! because the main loop touches `TICKS` exclusively inside a masked
//! window; see the spin_lock module docs for the full argument.

#![no_std]
#![no_main]

#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use rvlab::util::spin_lock::SpinLock;
use rvlab::{irq, println, timer};

struct Ticks {
    count: u32,
    fresh: bool,
}

static TICKS: SpinLock<Ticks> = SpinLock::new(Ticks {
    count: 0,
    fresh: false,
});

const TICK_MS: u32 = 100;

#[riscv_rt::entry]
fn main() -> ! {
    let mut board = rvlab::take_board().unwrap();

    println!("initialize Timer interface...");
    board.timer.stop();
    board.timer.set_period_ms(TICK_MS);
    println!("Register IRQ handler ...");
    irq::register(irq::IrqLine::Timer, timer_tick);

    println!("initialize simplePIO interface...");
    board.pio.init();
    println!("initialize LED interface...");
    board.leds.init();

    println!("Enable Timer IRQ and start Timer ...");
    board.timer.start_with_irq();
    irq::enable_machine_irqs();

    loop {
        let tick = irq::free(|| {
            let mut t = TICKS.lock();
            if t.fresh {
                t.fresh = false;
                Some(t.count)
            } else {
                None
            }
        });

        if let Some(count) = tick {
            println!("counter value is = {}", count);
            board.leds.write(count as u8);
            board.pio.write(count as u8);
        }
    }
}

/// Timeout handler: produce the pair, drop the request line.
fn timer_tick() {
    let mut t = TICKS.lock();
    t.count = t.count.wrapping_add(1);
    t.fresh = true;
    timer::acknowledge();
}

/// Wires the machine-external trap to the driver's dispatch loop.
#[no_mangle]
#[allow(non_snake_case)]
fn MachineExternal() {
    irq::dispatch();
}
