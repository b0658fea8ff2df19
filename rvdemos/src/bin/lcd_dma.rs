//! Frames handed to the DMA-capable LCD controller, restarted from the
//! completion interrupt.
//!
//! Three pattern frames are generated once at startup and then frozen;
//! the completion handler raises a flag and the main loop rotates the
//! ring, kicking the next transfer. The third frame goes out with the
//! controller's on-the-fly grayscale conversion enabled, so the same
//! source pixels show up colorless: the hardware sibling of the
//! `grayscale_bench` software variants.
//!
//! The tick task from the earlier labs stays in the loop, mostly to show
//! that the CPU is now idle enough to service it: the controller moves
//! the pixels.

#![no_std]
#![no_main]

#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use core::sync::atomic::{AtomicBool, Ordering};

use pix::pattern;
use rvlab::lcd::{self, DmaFormat, PANEL_HEIGHT, PANEL_PIXELS, PANEL_WIDTH};
use rvlab::pio::Leds;
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

/// Starts true so the main loop kicks the first transfer itself.
static FRAME_DONE: AtomicBool = AtomicBool::new(true);

const TICK_MS: u32 = 100;

#[riscv_rt::entry]
fn main() -> ! {
    let frames: [&'static [u16]; 3] = {
        static mut CHECKER: [u16; PANEL_PIXELS] = [0; PANEL_PIXELS];
        static mut GRADIENT: [u16; PANEL_PIXELS] = [0; PANEL_PIXELS];
        static mut NOISE: [u16; PANEL_PIXELS] = [0; PANEL_PIXELS];
        // Safety: the mutable borrows below end before the shared ones
        // are created, and nothing mutates these again; the DMA engine
        // reads from frozen buffers.
        unsafe {
            let (red, blue) = (pix::rgb565(0xFF, 0, 0), pix::rgb565(0, 0, 0xFF));
            pattern::fill(&mut CHECKER, PANEL_WIDTH, |x, y| {
                pattern::checkerboard(x, y, 16, red, blue)
            });
            pattern::fill(&mut GRADIENT, PANEL_WIDTH, |x, y| {
                pattern::gradient(x, y, PANEL_WIDTH, PANEL_HEIGHT)
            });
            pattern::noise(&mut NOISE, 11181981);
            [&CHECKER[..], &GRADIENT[..], &NOISE[..]]
        }
    };

    let mut board = rvlab::take_board().unwrap();

    // Quiesce everything before any line can fire, then bring the
    // peripherals up inside the masked window.
    let masked = irq::disable_all();
    board.pio.init();
    board.leds.init();
    let mut lcd = board.lcd.into_dma();
    lcd.init();
    irq::enable_all(masked);

    println!("initialize Timer interface...");
    board.timer.stop();
    board.timer.set_period_ms(TICK_MS);
    println!("Register IRQ handlers ...");
    irq::register(irq::IrqLine::Timer, timer_tick);
    irq::register(irq::IrqLine::Lcd, frame_done);
    lcd.listen();

    println!("Enable Timer IRQ and start Timer ...");
    board.timer.start_with_irq();
    irq::enable_machine_irqs();

    let mut ring = 0;
    loop {
        tick_task(&mut board.leds);

        if FRAME_DONE.swap(false, Ordering::AcqRel) {
            let format = if ring == 2 {
                DmaFormat::Grayscale
            } else {
                DmaFormat::Color
            };
            lcd.start_transfer(
                frames[ring],
                PANEL_WIDTH as u16,
                PANEL_HEIGHT as u16,
                format,
            );
            ring = (ring + 1) % frames.len();
        }
    }
}

/// Task 1 of the earlier labs, unchanged.
fn tick_task(leds: &mut Leds) {
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
        leds.write(count as u8);
    }
}

/// Timeout handler: produce the pair, drop the request line.
fn timer_tick() {
    let mut t = TICKS.lock();
    t.count = t.count.wrapping_add(1);
    t.fresh = true;
    timer::acknowledge();
}

/// Transfer-complete handler: flag the main loop, drop the request line.
fn frame_done() {
    FRAME_DONE.store(true, Ordering::Release);
    lcd::acknowledge_irq();
}

/// Wires the machine-external trap to the driver's dispatch loop.
#[no_mangle]
#[allow(non_snake_case)]
fn MachineExternal() {
    irq::dispatch();
}
