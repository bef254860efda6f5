//! Register-level traits implemented by [`Nrf24`](struct@crate::radio::Nrf24).
//!
//! Import them all at once:
//!
//! ```
//! use rf24_pipes::radio::prelude::*;
//! ```
//!
//! Every setter in these traits is verified: the register is read back after
//! writing and a mismatch is reported as an error instead of silently
//! succeeding.

use crate::types::{CrcLength, DataRate, FifoState, OperatingMode, PaLevel, StatusFlags};

use super::RadioConfig;

/// The RF channel.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Tune to `channel` MHz above 2400 MHz (76 after init, i.e. 2.476 GHz).
    ///
    /// Channels above 127 are rejected before anything is written to the radio.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Read `RF_CH` back.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// The IRQ events latched in the STATUS register.
pub trait EsbStatus {
    type StatusErrorType;

    /// The status byte clocked out by the most recent SPI transaction.
    fn status_flags(&self) -> StatusFlags;

    /// Route events to the IRQ pin.
    ///
    /// An event whose flag is `false` is masked: it still latches in STATUS
    /// but leaves the IRQ pin alone. After init every event is routed, as if
    /// `set_status_flags(StatusFlags::new())` had been called.
    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Clear the events whose flag is `true` (write-1-to-clear).
    ///
    /// The IRQ pin stays low for as long as any routed event is still latched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Clock out a NOP so that [`EsbStatus::status_flags()`] is current.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// The radio's 3-level RX and TX FIFOs.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard every payload in the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard every payload in the TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Read `FIFO_STATUS` for the TX FIFO (`about_tx`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Does the RX FIFO hold at least one payload?
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Keep the payload at the top of the TX FIFO after it is sent.
    ///
    /// The payload is retransmitted every time the chip-enable line
    /// is pulsed in TX mode, until [`EsbFifo::flush_tx()`] or a new
    /// payload is written.
    fn reuse_tx_payload(&mut self) -> Result<(), Self::FifoErrorType>;
}

/// Automatic acknowledgement (Enhanced ShockBurst).
pub trait EsbAutoAck {
    type AutoAckErrorType;

    /// Toggle `EN_ACK_PAY`, which lets [`EsbAutoAck::write_ack_payload()`]
    /// attach data to outgoing ACK packets.
    ///
    /// Off after init. Dynamic payloads are always on, which this feature requires.
    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// The cached `EN_ACK_PAY` bit.
    fn get_ack_payloads(&self) -> bool;

    /// Queue `buf` in the TX FIFO as the payload of the next ACK sent on `pipe`.
    ///
    /// Returns `false` without writing anything while ACK payloads are off.
    /// Otherwise returns whether the TX FIFO still had room (as reported by
    /// the status byte of the write). An unknown `pipe` is an error.
    ///
    /// The ACK payload has to be in the FIFO before the packet it answers arrives.
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType>;

    /// Write `EN_AA` for every pipe at once (on after init).
    ///
    /// Both ends of a link must agree on this setting.
    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Write the `EN_AA` bit of one `pipe`.
    ///
    /// A primary transmitter listens for ACKs on pipe 0. With auto-ack off on
    /// that pipe, every transmission is reported as delivered.
    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Allow packages flagged with [`Package::with_no_ack()`](fn@crate::Package::with_no_ack)
    /// to be sent without requesting an acknowledgement.
    ///
    /// Without this, the flag is ignored and every package asks for an ACK.
    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;
}

/// Automatic retransmission (`SETUP_RETR`) and its counters (`OBSERVE_TX`).
///
/// The two parameters live in one register but are independent: setting one
/// never changes the other.
pub trait EsbAutoRetries {
    type AutoRetriesErrorType;

    /// How many retries before giving up. The value is clamped to range [0, 15].
    /// Use 0 to disable the auto-retry feature.
    fn set_retry_count(&mut self, count: u8) -> Result<(), Self::AutoRetriesErrorType>;

    fn get_retry_count(&mut self) -> Result<u8, Self::AutoRetriesErrorType>;

    /// How long to wait between each retry, in multiples of 250 us
    /// (microseconds). The value is clamped to range [0, 15].
    ///
    /// The minimum value of 0 means 250 us, and the maximum value
    /// of 15 means 4000 us.
    fn set_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoRetriesErrorType>;

    fn get_retry_delay(&mut self) -> Result<u8, Self::AutoRetriesErrorType>;

    /// Get the number of retries used for the last transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::AutoRetriesErrorType>;

    /// Get the number of packages lost since the channel was last set.
    ///
    /// The counter saturates at 15.
    fn get_lost_packets(&mut self) -> Result<u8, Self::AutoRetriesErrorType>;
}

/// Transmit power.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Read the `RF_PWR` field back.
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;
}

/// On-air data rate.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Fails with `BinaryCorruption` for the reserved `RF_DR_LOW | RF_DR_HIGH` encoding.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// Packet CRC.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// The radio forces CRC on while auto-ack is enabled for any pipe, so
    /// [`CrcLength::Disabled`] then fails verification.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType>;
}

/// A trait to represent the operating-mode state machine
/// of an ESB capable transceiver.
///
/// ```text
/// Shutdown <-> Standby <-> Rx
///                  ^
///                  +-----> Tx
/// ```
///
/// Requesting the mode that is already active does nothing. Any other
/// transition into `Rx` or `Tx` passes through `Standby` first.
pub trait EsbMode {
    type ModeErrorType;

    /// Switch to the given operating `mode`.
    ///
    /// Leaving `Rx` or `Tx` deliberately interrupts whatever the radio was
    /// doing. Payloads not yet acknowledged are lost.
    fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Self::ModeErrorType>;

    /// The operating mode tracked by the driver.
    fn get_mode(&self) -> OperatingMode;
}

/// Bring-up and bulk reconfiguration.
pub trait EsbInit {
    type InitErrorType;

    /// Initialize the radio's hardware with the [`RadioConfig::default()`].
    ///
    /// This leaves the radio in [`OperatingMode::Shutdown`].
    fn init(&mut self) -> Result<(), Self::InitErrorType>;

    /// Write every register held by `config` in one go.
    ///
    /// Pipes bound to a queue stay enabled and the radio is
    /// left in [`OperatingMode::Shutdown`].
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType>;
}
