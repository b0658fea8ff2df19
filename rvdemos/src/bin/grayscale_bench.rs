//! Grayscale conversion variants under the performance counter.
//!
//! Runs each rewrite of the weighted-sum conversion over the same
//! generated frame and reports cycles, cycles per pixel, wall time at the
//! core clock, and speedup against the per-channel-division baseline.
//! This is the ladder the optimization exercise climbs: first remove the
//! divisions, then remove the loop bookkeeping.

#![no_std]
#![no_main]

#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use pix::rgb888;
use rvlab::perf;
use rvlab::println;
use rvlab_fx_grayscale as grayscale;

const WIDTH: usize = 320;
const HEIGHT: usize = 240;
const PIXELS: usize = WIDTH * HEIGHT;

#[riscv_rt::entry]
fn main() -> ! {
    let (src, dst) = {
        static mut SRC: [u32; PIXELS] = [0; PIXELS];
        static mut DST: [u32; PIXELS] = [0; PIXELS];
        // Safety: because of scoping these are clearly the only mutable
        // references we generate to these statics.
        unsafe { (&mut SRC as &mut [u32], &mut DST as &mut [u32]) }
    };

    // Deterministic source picture: smooth ramps through every channel.
    for (i, px) in src.iter_mut().enumerate() {
        let (x, y) = (i % WIDTH, i / WIDTH);
        *px = rgb888::pack(
            (x * 255 / WIDTH) as u8,
            (y * 255 / HEIGHT) as u8,
            ((x + y) & 0xFF) as u8,
        );
    }

    let mut board = rvlab::take_board().unwrap();
    let perf = &mut board.perf;

    println!("grayscale timing over a {}x{} frame", WIDTH, HEIGHT);
    perf.reset();
    perf.start_measuring();

    perf.begin(1);
    grayscale::convert_per_channel_div(src, dst);
    perf.end(1);
    let baseline = perf.section_time(1);
    summarize("per-channel division", baseline, baseline, dst);

    perf.begin(2);
    grayscale::convert_single_div(src, dst);
    perf.end(2);
    summarize("single division", perf.section_time(2), baseline, dst);

    perf.begin(3);
    grayscale::convert_shift(src, dst);
    perf.end(3);
    summarize("shift weights", perf.section_time(3), baseline, dst);

    perf.begin(4);
    grayscale::convert_shift_unrolled(src, dst);
    perf.end(4);
    summarize("shift weights, unrolled", perf.section_time(4), baseline, dst);

    perf.stop_measuring();
    perf.report(&[
        "per-channel div",
        "single div",
        "shift",
        "shift unrolled",
    ]);

    loop {
        core::hint::spin_loop();
    }
}

fn summarize(name: &str, cycles: u64, baseline: u64, dst: &[u32]) {
    println!();
    println!("{}:", name);
    println!("Counter value = {}", cycles);
    println!("Cycles each pixel = {}", cycles / dst.len() as u64);
    println!("Execution time = {:.5} sec", perf::cycles_to_secs(cycles));
    println!("Speed-up is : {:.1} x", baseline as f32 / cycles as f32);

    // The checksum depends on every output pixel, which keeps the
    // conversion loops from being optimized into thin air.
    let checksum = dst.iter().fold(0u32, |acc, &px| acc.wrapping_add(px));
    println!("checksum = {:#010x}", checksum);
}
