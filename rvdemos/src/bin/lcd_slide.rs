//! Timer tick plus CPU-pushed frames on the LCD slave controller.
//!
//! The main loop is a four-task round robin: the tick task drains the
//! timer handler's counter+flag pair, and three slide tasks regenerate
//! and push one pattern frame each. Every pixel goes through the
//! command/data registers by hand, so a full slide takes on the order of
//! a second. That slowness is the point this lab makes, and what the DMA
//! variant (`lcd_dma`) fixes.

#![no_std]
#![no_main]

#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use pix::pattern;
use rvlab::lcd::{Lcd, PANEL_HEIGHT, PANEL_PIXELS, PANEL_WIDTH};
use rvlab::pio::Leds;
use rvlab::util::spin_lock::SpinLock;
use rvlab::{irq, pio, println, timer};

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
    let frame = {
        static mut FRAME: [u16; PANEL_PIXELS] = [0; PANEL_PIXELS];
        // Safety: because of scoping this is clearly the only mutable
        // reference we generate to this static.
        unsafe { &mut FRAME as &mut [u16] }
    };

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
    println!("initialize LCD display...");
    board.lcd.init();

    println!("Enable Timer IRQ and start Timer ...");
    board.timer.start_with_irq();
    irq::enable_machine_irqs();

    loop {
        tick_task(&mut board.leds);
        checker_task(&mut board.lcd, frame);
        gradient_task(&mut board.lcd, frame);
        xor_task(&mut board.lcd, frame);
    }
}

/// Task 1: drain the tick pair, mirror the counter to the LEDs.
fn tick_task(leds: &mut Leds) {
    println!("Enter Task 1");
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

/// Task 2: checkerboard slide.
fn checker_task(lcd: &mut Lcd, frame: &mut [u16]) {
    println!("Enter Task 2");
    let (red, blue) = (pix::rgb565(0xFF, 0, 0), pix::rgb565(0, 0, 0xFF));
    pattern::fill(frame, PANEL_WIDTH, |x, y| {
        pattern::checkerboard(x, y, 16, red, blue)
    });
    lcd.transfer(frame);
    println!("checkerboard slide transferred");
}

/// Task 3: gradient slide.
fn gradient_task(lcd: &mut Lcd, frame: &mut [u16]) {
    println!("Enter Task 3");
    pattern::fill(frame, PANEL_WIDTH, |x, y| {
        pattern::gradient(x, y, PANEL_WIDTH, PANEL_HEIGHT)
    });
    lcd.transfer(frame);
    println!("gradient slide transferred");
}

/// Task 4: XOR-grid slide.
fn xor_task(lcd: &mut Lcd, frame: &mut [u16]) {
    println!("Enter Task 4");
    pattern::fill(frame, PANEL_WIDTH, |x, y| pattern::xor_grid(x, y, 0));
    lcd.transfer(frame);
    println!("xor slide transferred");
}

/// Timeout handler: produce the pair, mirror the count to the PIO header,
/// drop the request line.
fn timer_tick() {
    let mut t = TICKS.lock();
    t.count = t.count.wrapping_add(1);
    t.fresh = true;
    pio::mirror(t.count as u8);
    timer::acknowledge();
}

/// Wires the machine-external trap to the driver's dispatch loop.
#[no_mangle]
#[allow(non_snake_case)]
fn MachineExternal() {
    irq::dispatch();
}
