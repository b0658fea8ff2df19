//! Bulk interrupt control and handler registration.
//!
//! The board routes every peripheral request line through a small
//! interrupt controller into the core's machine-external interrupt. This
//! module owns the dispatch table for those lines and the bulk
//! enable/disable window that registration happens inside, mirroring how
//! the lab programs have always set up their handlers: mask everything,
//! quiesce the peripheral, hook the line, unmask.
//!
//! # Invariants
//!
//! - The dispatch table is written only with interrupts disabled
//!   ([`register`] does this internally) and read only from [`dispatch`],
//!   i.e. from interrupt context. That is the entire synchronization
//!   story, so do not read or write it any other way.
//! - A registered handler must acknowledge its peripheral before
//!   returning; the request lines are level-sensitive and [`dispatch`]
//!   loops until they drop.

use core::cell::UnsafeCell;

use crate::device;
use crate::util::measurement;

/// The board's interrupt request lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IrqLine {
    /// Interval timer timeout.
    Timer = 0,
    /// LCD DMA transfer complete.
    Lcd = 1,
}

const NLINES: usize = 2;

struct HandlerTable(UnsafeCell<[Option<fn()>; NLINES]>);

// Safety: access rules are documented at module level; all mutation
// happens with interrupts disabled on the single hart.
unsafe impl Sync for HandlerTable {}

static HANDLERS: HandlerTable = HandlerTable(UnsafeCell::new([None; NLINES]));

/// Opaque record of the machine interrupt-enable state, as returned by
/// [`disable_all`] and consumed by [`enable_all`].
#[must_use]
pub struct IrqState {
    mie: bool,
}

/// Disables all machine interrupts, returning the previous state so that
/// nesting works: a caller inside someone else's disabled window will not
/// re-enable behind their back.
pub fn disable_all() -> IrqState {
    let mie = riscv::register::mstatus::read().mie();
    // Safety: masking interrupts cannot break anything on its own.
    unsafe { riscv::register::mstatus::clear_mie() }
    IrqState { mie }
}

/// Restores the interrupt-enable state captured by [`disable_all`].
pub fn enable_all(prev: IrqState) {
    if prev.mie {
        // Safety: we only ever restore a state the core was already in.
        unsafe { riscv::register::mstatus::set_mie() }
    }
}

/// Runs `f` with machine interrupts disabled, restoring the previous state
/// on the way out (also on panic-unwind-less early return paths).
pub fn free<R>(f: impl FnOnce() -> R) -> R {
    let prev = disable_all();
    let _restore = scopeguard::guard(prev, enable_all);
    f()
}

/// Enables machine interrupt delivery. Call once after every handler is
/// registered and every peripheral is initialized.
pub fn enable_machine_irqs() {
    // Safety: turning delivery on is sound here because `register` never
    // leaves a line unmasked without a handler behind it.
    unsafe { riscv::register::mstatus::set_mie() }
}

/// Hooks `handler` to `line` and unmasks it at the interrupt controller.
///
/// The whole operation happens inside a disabled-interrupt window, so a
/// half-registered handler can never be dispatched.
pub fn register(line: IrqLine, handler: fn()) {
    let prev = disable_all();
    let _restore = scopeguard::guard(prev, enable_all);

    // Safety: interrupts are disabled, so we satisfy the table's access
    // rules.
    unsafe {
        (*HANDLERS.0.get())[line as usize] = Some(handler);
    }

    // Safety: the intc has no other driver; enable-bit updates only happen
    // here, inside the disabled window.
    let intc = unsafe { device::intc() };
    intc.enable.write(intc.enable.read() | (1 << line as u32));

    // Safety: unmasking the external line is sound now that the table
    // entry exists.
    unsafe { riscv::register::mie::set_mext() }
}

/// Machine-external dispatch loop. Demo binaries wire their
/// `MachineExternal` handler straight to this.
///
/// Runs every pending handler until the controller's pending image drops
/// to zero, so back-to-back requests on different lines are drained in one
/// trap.
pub fn dispatch() {
    measurement::sig_a_set();

    // Safety: reads of the pending image are side-effect free; the enable
    // write below only masks a line nobody registered for.
    let intc = unsafe { device::intc() };
    let mut pending = intc.pending.read();
    while pending != 0 {
        let line = pending.trailing_zeros() as usize;
        // Safety: interrupt context; see the table's access rules.
        let handler = unsafe { (*HANDLERS.0.get())[line] };
        match handler {
            Some(h) => h(),
            // A request on an unregistered line would otherwise trap
            // forever; mask it instead.
            None => intc.enable.write(intc.enable.read() & !(1 << line)),
        }
        pending = intc.pending.read();
    }

    measurement::sig_a_clear();
}
