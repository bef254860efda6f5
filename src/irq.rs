//! The interrupt seam.
//!
//! The radio's IRQ line is active low and edge triggered. Its handler must not
//! touch the SPI bus, so the only work done in interrupt context is a call to
//! [`EventHandler::on_event()`]. [`IrqNotifier`] is the handler used by
//! [`RadioTask`](struct@crate::radio::RadioTask): it records the edge and
//! the task loop performs the actual dispatch later.

use core::cell::Cell;

use critical_section::Mutex;

/// A typed callback invoked from the IRQ line's interrupt context.
pub trait EventHandler: Sync {
    fn on_event(&self);
}

/// The interrupt half of the radio's GPIO surface.
///
/// Implementations arm a falling-edge interrupt on the pin connected to the
/// radio's IRQ output and call `handler.on_event()` from the ISR.
pub trait InterruptLine {
    type Error;

    fn enable_interrupt(&mut self, handler: &'static dyn EventHandler)
        -> Result<(), Self::Error>;

    fn disable_interrupt(&mut self) -> Result<(), Self::Error>;
}

/// A pending-event counter shared between an ISR and the task loop.
///
/// Edges that arrive while a dispatch is in flight are coalesced into the
/// next [`IrqNotifier::take()`].
///
/// The counter lives behind a [`critical_section::Mutex`], so it also works
/// on cores without atomic read-modify-write instructions (thumbv6m). The
/// final binary must link a `critical-section` implementation, which HAL
/// crates usually provide.
#[derive(Debug)]
pub struct IrqNotifier {
    pending: Mutex<Cell<u32>>,
}

impl IrqNotifier {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(0)),
        }
    }

    /// Consume all pending events, returning how many edges were seen.
    pub fn take(&self) -> u32 {
        critical_section::with(|cs| self.pending.borrow(cs).replace(0))
    }

    /// Has an edge been seen since the last [`IrqNotifier::take()`]?
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get() != 0)
    }

    /// Wake the task loop from thread or interrupt context.
    ///
    /// Call this after pushing to an outbound queue, or after switching the
    /// radio into [`OperatingMode::Tx`](crate::OperatingMode::Tx), so the next
    /// [`RadioTask::poll()`](fn@crate::radio::RadioTask::poll) refills the TX FIFO.
    pub fn notify(&self) {
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            pending.set(pending.get().saturating_add(1));
        });
    }
}

impl Default for IrqNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for IrqNotifier {
    fn on_event(&self) {
        self.notify();
    }
}
