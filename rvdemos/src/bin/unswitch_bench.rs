//! Loop unswitching and unrolling measured against their naive forms.
//!
//! Also demonstrates calibrating the counter itself: section 1 brackets
//! nothing but an empty begin/end of section 7, so its reading is the
//! cost of the instrumentation.

#![no_std]
#![no_main]

#[cfg(feature = "panic-halt")]
extern crate panic_halt;

use rvlab::println;
use rvlab_fx_loopopt as loopopt;

const N: usize = 1000;

#[riscv_rt::entry]
fn main() -> ! {
    let (x, y, a, b) = {
        static mut X: [i32; N] = [0; N];
        static mut Y: [i32; N] = [0; N];
        static mut A: [i32; N] = [0; N];
        static mut B: [i32; N] = [0; N];
        // Safety: because of scoping these are clearly the only mutable
        // references we generate to these statics.
        unsafe {
            (
                &mut X as &mut [i32],
                &mut Y as &mut [i32],
                &mut A as &mut [i32],
                &mut B as &mut [i32],
            )
        }
    };

    for i in 0..N {
        x[i] = i as i32 * 3 - 7;
        y[i] = 11 - i as i32;
        a[i] = (i % 13) as i32;
        b[i] = (i % 7) as i32 - 3;
    }

    let mut board = rvlab::take_board().unwrap();
    let perf = &mut board.perf;

    println!("loop optimization timing, {} elements", N);
    perf.reset();
    perf.start_measuring();

    // Counter overhead: start the overhead section, bracket an empty
    // dummy section, stop.
    perf.begin(1);
    perf.begin(7);
    perf.end(7);
    perf.end(1);

    perf.begin(2);
    loopopt::add_clear_naive(x, y, true);
    perf.end(2);

    // The first run zeroed y; refill so both forms chew the same data.
    for i in 0..N {
        y[i] = 11 - i as i32;
    }

    perf.begin(3);
    loopopt::add_clear_unswitched(x, y, true);
    perf.end(3);

    perf.begin(4);
    let dot_naive = loopopt::dot_naive(a, b);
    perf.end(4);

    perf.begin(5);
    let dot_unrolled = loopopt::dot_unrolled4(a, b);
    perf.end(5);

    perf.stop_measuring();

    // Print every result so none of the kernels can be optimized away.
    let x_sum = x.iter().fold(0i32, |acc, &v| acc.wrapping_add(v));
    println!("x checksum = {}, dot = {} / {}", x_sum, dot_naive, dot_unrolled);

    println!(
        "unswitching speed-up: {:.1} x",
        perf.section_time(2) as f32 / perf.section_time(3) as f32
    );
    println!(
        "unrolling speed-up: {:.1} x",
        perf.section_time(4) as f32 / perf.section_time(5) as f32
    );

    perf.report(&[
        "overhead",
        "add+clear naive",
        "add+clear unswitched",
        "dot naive",
        "dot unrolled",
        "(unused)",
        "overhead dummy",
    ]);

    loop {
        core::hint::spin_loop();
    }
}
