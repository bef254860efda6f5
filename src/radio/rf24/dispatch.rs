//! The interrupt event dispatcher.
//!
//! One pass resolves the events latched in the STATUS byte in the order
//! MAX_RT, TX_DS, RX_DR. Each event's flag is cleared only after its handler
//! has run, and all of them are cleared with a single STATUS write.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::prelude::{EsbFifo, EsbStatus},
    OperatingMode, Package, PipeIndex, StatusFlags,
};

use super::{bit_fields::FifoStatus, registers, Nrf24, Nrf24Error};

/// What a single [`Nrf24::dispatch()`] pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Packages pushed into an inbound queue.
    pub received: u8,
    /// Packages read from the RX FIFO with no queue (or a full one) to take them.
    pub dropped: u8,
    /// Packages uploaded from the outbound queue to the TX FIFO.
    pub uploaded: u8,
    /// The TX FIFO was flushed after the maximum number of retries.
    pub max_retries: bool,
    /// The RX FIFO was flushed because it held a corrupted payload.
    pub rx_flushed: bool,
    /// The status flags cleared at the end of the pass.
    pub cleared: StatusFlags,
    /// The pass was cut short by an SPI or GPIO error.
    pub aborted: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DispatchReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DispatchReport received: {}, dropped: {}, uploaded: {}, {}",
            self.received,
            self.dropped,
            self.uploaded,
            self.cleared
        )
    }
}

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Service the radio's pending interrupt events.
    ///
    /// - MAX_RT: the TX FIFO is flushed (the radio will not move past the
    ///   failed payload on its own).
    /// - TX_DS: in [`OperatingMode::Tx`], the next package from the outbound
    ///   queue is uploaded if the TX FIFO has room. In any other mode (an ACK
    ///   payload was sent from Rx, for instance) the flag is only cleared.
    /// - RX_DR: the RX FIFO is drained into the inbound queue bound to each
    ///   payload's pipe. Payloads for pipes without a queue are dropped.
    ///
    /// This never fails. A transport error ends the pass early and is
    /// reported through [`DispatchReport::aborted`]; the flags that were not
    /// cleared keep the IRQ line asserted so the next pass retries.
    pub fn dispatch(&mut self) -> DispatchReport {
        let mut report = DispatchReport::default();
        if self.try_dispatch(&mut report).is_err() {
            error!("dispatch aborted by a transport error");
            report.aborted = true;
        }
        trace!("{}", report);
        report
    }

    fn try_dispatch(
        &mut self,
        report: &mut DispatchReport,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let status = self.nop()?;
        let mut clear = StatusFlags::default();
        if status.max_rt() {
            warn!("maximum retries reached; flushing TX FIFO");
            self.flush_tx()?;
            report.max_retries = true;
            clear = clear.with_max_rt(true);
        }
        if status.tx_ds() {
            if self.mode == OperatingMode::Tx && self.upload_next()? {
                report.uploaded += 1;
            }
            clear = clear.with_tx_ds(true);
        }
        if status.rx_dr() {
            self.drain_rx_fifo(report)?;
            clear = clear.with_rx_dr(true);
        }
        if clear.any() {
            self.clear_status_flags(clear)?;
            report.cleared = clear;
        }
        Ok(())
    }

    /// Upload one package if the (last seen) TX FIFO has room.
    fn upload_next(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        if self._status.tx_full() {
            return Ok(false);
        }
        let Some(queue) = self.tx_queue.as_mut() else {
            return Ok(false);
        };
        let Some(package) = queue.dequeue() else {
            return Ok(false);
        };
        let no_ack = package.no_ack() && self._feature.ask_no_ack();
        self.write_payload(package.as_bytes(), no_ack)?;
        Ok(true)
    }

    /// Read payloads until `FIFO_STATUS` reports the RX FIFO empty.
    fn drain_rx_fifo(
        &mut self,
        report: &mut DispatchReport,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let mut payload = [0u8; Package::MAX_LENGTH];
        loop {
            let width = self.read_payload_width()? as usize;
            if width == 0 || width > Package::MAX_LENGTH {
                // reading would not pop a corrupted entry
                warn!("RX FIFO corrupted (payload width {}); flushing", width);
                self.flush_rx()?;
                report.rx_flushed = true;
                break;
            }
            // the status byte clocked out with R_RX_PL_WID names the pipe
            let Some(pipe) = PipeIndex::new(self._status.rx_pipe()) else {
                // pipe 7 means empty, 6 is never valid; neither entry can be popped
                warn!("RX FIFO corrupted (pipe {}); flushing", self._status.rx_pipe());
                self.flush_rx()?;
                report.rx_flushed = true;
                break;
            };
            self.read_payload(&mut payload[..width])?;
            let package = Package::received(pipe, &payload[..width]);
            match self.rx_queues[pipe.index()].as_mut() {
                Some(queue) => match queue.enqueue(package) {
                    Ok(()) => report.received = report.received.saturating_add(1),
                    Err(_) => {
                        warn!("inbound queue of {} is full; package dropped", pipe);
                        report.dropped = report.dropped.saturating_add(1);
                    }
                },
                None => {
                    warn!("no queue bound to {}; package dropped", pipe);
                    report.dropped = report.dropped.saturating_add(1);
                }
            }
            if FifoStatus::from_bits(self.read_byte(registers::FIFO_STATUS)?).rx_empty() {
                break;
            }
        }
        Ok(())
    }

    /// Upload queued outbound packages while the TX FIFO has room.
    ///
    /// Transmission of the first package in a burst has to be kicked off
    /// this way since no TX_DS event can arrive before it. Does nothing
    /// unless the radio is in [`OperatingMode::Tx`].
    ///
    /// Returns the number of packages uploaded.
    pub fn feed_tx_fifo(&mut self) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let mut uploaded = 0;
        if self.mode != OperatingMode::Tx {
            return Ok(uploaded);
        }
        while self.tx_queue.as_ref().is_some_and(|queue| !queue.is_empty()) {
            // the status byte clocked out with a payload predates the upload
            self.nop()?;
            if !self.upload_next()? {
                break;
            }
            uploaded += 1;
        }
        Ok(uploaded)
    }
}
