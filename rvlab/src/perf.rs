//! Performance counter bank driver.
//!
//! The bank has one global section and seven numbered measurement
//! sections. Section counters only advance between their begin and end
//! events, and only while the global section is running, so nested
//! sections measure exactly the bracketed code.
//!
//! Typical shape of a profiling run:
//!
//! ```ignore
//! perf.reset();
//! perf.start_measuring();
//! perf.begin(1);
//! work();
//! perf.end(1);
//! perf.stop_measuring();
//! perf.report(&["work"]);
//! ```

use crate::device::{self, PerfRegs};
use crate::CPU_HZ;

/// Numbered measurement sections available to programs (1 through 7;
/// section 0 is the global section and is driven through
/// `start_measuring`/`stop_measuring`).
pub const NUM_SECTIONS: usize = 7;

/// Converts a cycle count to seconds at the core clock.
pub fn cycles_to_secs(cycles: u64) -> f32 {
    cycles as f32 / CPU_HZ as f32
}

pub struct PerfBank {
    _priv: (),
}

impl PerfBank {
    pub(crate) fn new() -> Self {
        PerfBank { _priv: () }
    }

    fn regs(&self) -> &'static PerfRegs {
        // Safety: construction is gated through take_board.
        unsafe { device::perf() }
    }

    /// Zeroes every counter in the bank.
    pub fn reset(&mut self) {
        self.regs().sections[0].time_lo.write(0);
    }

    /// Starts the global section; numbered sections can tick from here on.
    pub fn start_measuring(&mut self) {
        self.regs().sections[0].ctrl.write(1);
    }

    /// Stops the global section and freezes the whole bank.
    pub fn stop_measuring(&mut self) {
        self.regs().sections[0].ctrl.write(0);
    }

    /// Opens numbered section `section`.
    pub fn begin(&mut self, section: usize) {
        debug_assert!((1..=NUM_SECTIONS).contains(&section));
        self.regs().sections[section].ctrl.write(1);
    }

    /// Closes numbered section `section`.
    pub fn end(&mut self, section: usize) {
        debug_assert!((1..=NUM_SECTIONS).contains(&section));
        self.regs().sections[section].ctrl.write(0);
    }

    /// Cycles accumulated by the global section.
    pub fn total_time(&self) -> u64 {
        self.regs().sections[0].time()
    }

    /// Cycles accumulated by numbered section `section`.
    pub fn section_time(&self, section: usize) -> u64 {
        debug_assert!((1..=NUM_SECTIONS).contains(&section));
        self.regs().sections[section].time()
    }

    /// Begin events seen by numbered section `section`.
    pub fn occurrences(&self, section: usize) -> u32 {
        debug_assert!((1..=NUM_SECTIONS).contains(&section));
        self.regs().sections[section].occurrences.read()
    }

    /// Prints the classic formatted report: one row per label, sections
    /// numbered from 1 in label order. Call after `stop_measuring`.
    pub fn report(&self, labels: &[&str]) {
        let total = self.total_time();
        crate::println!("--Performance Counter Report--");
        crate::println!(
            "Total Time: {} clocks, {:.5} seconds",
            total,
            cycles_to_secs(total)
        );
        crate::println!(
            "{:<20} {:>7} {:>12} {:>15} {:>12}",
            "Section", "%", "Time (sec)", "Time (clocks)", "Occurrences"
        );
        for (i, label) in labels.iter().enumerate() {
            let section = i + 1;
            let time = self.section_time(section);
            let percent = if total == 0 {
                0.0
            } else {
                time as f32 * 100.0 / total as f32
            };
            crate::println!(
                "{:<20} {:>7.1} {:>12.5} {:>15} {:>12}",
                label,
                percent,
                cycles_to_secs(time),
                time,
                self.occurrences(section)
            );
        }
    }
}
