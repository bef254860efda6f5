//! The task half of deferred interrupt handling.
//!
//! [`RadioTask`] owns the driver and the IRQ line. The line's handler only
//! bumps an [`IrqNotifier`]; [`RadioTask::poll()`] runs the dispatcher from
//! task context whenever the notifier has seen an edge.
//!
//! Without a notification, polling costs no SPI traffic. The application
//! wakes the task with [`IrqNotifier::notify()`] after queueing outbound
//! packages, which is also how the first package of a burst gets out.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{EsbInit, EsbMode},
        DispatchReport, Nrf24, Nrf24Error,
    },
    InterruptLine, IrqNotifier, OperatingMode,
};

/// Errors raised while setting up or tearing down a [`RadioTask`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskError<SPI, DO, IRQ> {
    /// The radio failed to initialize or change modes.
    Radio(Nrf24Error<SPI, DO>),
    /// The IRQ line could not be (dis)armed.
    Irq(IRQ),
}

impl<SPI, DO, IRQ> From<Nrf24Error<SPI, DO>> for TaskError<SPI, DO, IRQ> {
    fn from(value: Nrf24Error<SPI, DO>) -> Self {
        TaskError::Radio(value)
    }
}

/// Binds an [`Nrf24`] to its IRQ line and an [`IrqNotifier`].
pub struct RadioTask<'q, SPI, DO, DELAY, IRQ> {
    radio: Nrf24<'q, SPI, DO, DELAY>,
    irq: IRQ,
    notifier: &'static IrqNotifier,
}

impl<'q, SPI, DO, DELAY, IRQ> RadioTask<'q, SPI, DO, DELAY, IRQ>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    IRQ: InterruptLine,
{
    pub fn new(radio: Nrf24<'q, SPI, DO, DELAY>, irq: IRQ, notifier: &'static IrqNotifier) -> Self {
        Self {
            radio,
            irq,
            notifier,
        }
    }

    /// Initialize the radio, then arm the IRQ line.
    ///
    /// Call this once before [`RadioTask::poll()`]. The radio is left in
    /// [`OperatingMode::Shutdown`].
    pub fn setup(&mut self) -> Result<(), TaskError<SPI::Error, DO::Error, IRQ::Error>> {
        self.radio.init()?;
        self.irq
            .enable_interrupt(self.notifier)
            .map_err(TaskError::Irq)?;
        debug!("IRQ line armed");
        Ok(())
    }

    /// Run one iteration of the task loop.
    ///
    /// Dispatches if the notifier was bumped (by the IRQ line or by
    /// [`IrqNotifier::notify()`]) since the last call. In
    /// [`OperatingMode::Tx`] the TX FIFO is then refilled from the outbound
    /// queue.
    ///
    /// Returns [`None`] without touching the radio if there was nothing to do.
    pub fn poll(&mut self) -> Option<DispatchReport> {
        if self.notifier.take() == 0 {
            return None;
        }
        let mut report = self.radio.dispatch();
        if self.radio.get_mode() == OperatingMode::Tx {
            match self.radio.feed_tx_fifo() {
                Ok(uploaded) => report.uploaded = report.uploaded.saturating_add(uploaded),
                Err(_) => {
                    error!("failed to refill the TX FIFO");
                    report.aborted = true;
                }
            }
        }
        Some(report)
    }

    /// Poll forever.
    pub fn run(&mut self) -> ! {
        loop {
            if self.poll().is_none() {
                core::hint::spin_loop();
            }
        }
    }

    /// Access the driver, to bind queues or change modes.
    pub fn radio(&mut self) -> &mut Nrf24<'q, SPI, DO, DELAY> {
        &mut self.radio
    }

    /// Disarm the IRQ line and shut the radio down.
    pub fn teardown(&mut self) -> Result<(), TaskError<SPI::Error, DO::Error, IRQ::Error>> {
        self.irq.disable_interrupt().map_err(TaskError::Irq)?;
        self.radio.set_mode(OperatingMode::Shutdown)?;
        debug!("IRQ line disarmed");
        Ok(())
    }
}
