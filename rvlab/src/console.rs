//! Console output over the debug UART.
//!
//! The UART is bridged to the debug probe and is always ready after
//! configuration load, so there is no init step; `println!` works from the
//! first line of `main`.
//!
//! Interrupt handlers must not print: the console is guarded by a spinning
//! lock, and an ISR preempting a thread-mode printer would spin on it
//! forever. The lab handlers only poke registers anyway.

use core::fmt;

use crate::device;
use crate::util::spin_lock::SpinLock;

pub struct Console {
    _priv: (),
}

impl Console {
    fn put_byte(&mut self, byte: u8) {
        // Safety: the console is the only driver of the UART block, and
        // access to it is serialized by the lock below.
        let uart = unsafe { device::uart() };
        while uart.write_space() == 0 {}
        uart.data.write(byte.into());
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.put_byte(byte);
        }
        Ok(())
    }
}

static CONSOLE: SpinLock<Console> = SpinLock::new(Console { _priv: () });

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    // The UART never fails; the Result is fmt plumbing.
    let _ = CONSOLE.lock().write_fmt(args);
}

/// `print!` over the debug UART.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::_print(format_args!($($arg)*))
    };
}

/// `println!` over the debug UART.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
