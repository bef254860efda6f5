//! Radio settings applied by [`EsbInit`](trait@crate::radio::prelude::EsbInit).

use crate::radio::rf24::bit_fields::{Config, Feature, RfSetup, SetupRetry};
use crate::{CrcLength, DataRate, PaLevel};

/// Everything [`EsbInit::with_config()`](fn@crate::radio::prelude::EsbInit::with_config)
/// writes to the radio, kept as register images.
///
/// Start from [`RadioConfig::default()`] and chain `with_*` calls:
/// ```
/// use rf24_pipes::{radio::RadioConfig, DataRate};
/// let config = RadioConfig::default()
///     .with_channel(42)
///     .with_data_rate(DataRate::Mbps2);
/// assert_eq!(config.channel(), 42);
/// ```
///
/// Addresses do not live here. A pipe's address is written when the pipe is
/// bound to a queue (see [`Nrf24::configure_rx_pipe()`](fn@crate::radio::Nrf24::configure_rx_pipe)).
///
/// | setting | default |
/// |--------:|:--------|
/// | [`RadioConfig::channel()`] | `76` (2.476 GHz) |
/// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
/// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
/// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
/// | [`RadioConfig::lna_enable()`] | `true` |
/// | [`RadioConfig::auto_retry_delay()`] | `5` (1500 us) |
/// | [`RadioConfig::auto_retry_count()`] | `15` |
/// | [`RadioConfig::auto_ack()`] | `0x3F` (every pipe) |
/// | [`RadioConfig::ack_payloads()`] | `false` |
/// | [`RadioConfig::ask_no_ack()`] | `false` |
/// | IRQ events ([`RadioConfig::rx_dr()`], [`RadioConfig::tx_ds()`], [`RadioConfig::max_rt()`]) | all routed to the IRQ pin |
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    pub(crate) feature: Feature,
    channel: u8,
    auto_ack: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            // 16 bit CRC, every IRQ event unmasked, powered down
            config_reg: Config::default(),
            // ARD 5, ARC 15
            auto_retries: SetupRetry::default(),
            // 1 Mbps, 0 dBm, LNA on
            rf_setup: RfSetup::default(),
            // EN_DPL only
            feature: Feature::default(),
            channel: 76,
            auto_ack: 0x3F,
        }
    }
}

impl RadioConfig {
    pub fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length().unwrap_or(CrcLength::Bit16)
    }

    /// See [`EsbCrcLength::set_crc_length()`](fn@crate::radio::prelude::EsbCrcLength::set_crc_length).
    pub fn with_crc_length(mut self, length: CrcLength) -> Self {
        self.config_reg = self.config_reg.with_crc_length(length);
        self
    }

    pub const fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate()
    }

    pub fn with_data_rate(mut self, data_rate: DataRate) -> Self {
        self.rf_setup = self.rf_setup.with_data_rate(data_rate);
        self
    }

    pub const fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    pub fn with_pa_level(mut self, level: PaLevel) -> Self {
        self.rf_setup = self.rf_setup.with_pa_level(level);
        self
    }

    pub const fn lna_enable(&self) -> bool {
        self.rf_setup.lna_enable()
    }

    /// Only non-plus nRF24L01 modules and Si24R1 clones honor this.
    pub fn with_lna_enable(mut self, enable: bool) -> Self {
        self.rf_setup = self.rf_setup.with_lna_enable(enable);
        self
    }

    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The RF channel, as an offset in MHz from 2400 MHz.
    ///
    /// Values above 127 are clamped to 127.
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel.min(127);
        self
    }

    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Wait `(delay + 1) * 250` microseconds between at most `count` retries.
    ///
    /// Both values are clamped to 15.
    pub fn with_auto_retries(mut self, delay: u8, count: u8) -> Self {
        self.auto_retries = self
            .auto_retries
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        self
    }

    /// Does "RX Data Ready" assert the IRQ pin?
    pub const fn rx_dr(&self) -> bool {
        self.config_reg.rx_dr()
    }

    pub fn with_rx_dr(mut self, enable: bool) -> Self {
        self.config_reg = self.config_reg.with_rx_dr(enable);
        self
    }

    /// Does "TX Data Sent" assert the IRQ pin?
    pub const fn tx_ds(&self) -> bool {
        self.config_reg.tx_ds()
    }

    pub fn with_tx_ds(mut self, enable: bool) -> Self {
        self.config_reg = self.config_reg.with_tx_ds(enable);
        self
    }

    /// Does "Max retries" assert the IRQ pin?
    pub const fn max_rt(&self) -> bool {
        self.config_reg.max_rt()
    }

    /// Masking this event leaves a failed payload stuck at the top of the
    /// TX FIFO, since the dispatcher never learns about it.
    pub fn with_max_rt(mut self, enable: bool) -> Self {
        self.config_reg = self.config_reg.with_max_rt(enable);
        self
    }

    pub const fn ask_no_ack(&self) -> bool {
        self.feature.ask_no_ack()
    }

    /// Allow outbound packages flagged with [`Package::with_no_ack()`](fn@crate::Package::with_no_ack)
    /// to skip the receiver's acknowledgement.
    pub fn with_ask_no_ack(mut self, enable: bool) -> Self {
        self.feature = self.feature.with_ask_no_ack(enable);
        self
    }

    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Auto-ack enable bits, one per pipe (bit 0 is pipe 0). Bits 6 and 7 are ignored.
    ///
    /// ```
    /// use rf24_pipes::radio::RadioConfig;
    /// // pipes 0, 1 and 4
    /// let config = RadioConfig::default().with_auto_ack(0b01_0011);
    /// assert_eq!(config.auto_ack(), 0x13);
    /// ```
    /// Pipe 0 carries the ACK packets a primary transmitter waits for, so it
    /// should stay enabled whenever any other pipe is.
    pub fn with_auto_ack(mut self, pipes: u8) -> Self {
        self.auto_ack = pipes & 0x3F;
        self
    }

    pub const fn ack_payloads(&self) -> bool {
        self.feature.ack_payloads()
    }

    /// Attach custom payloads to automatic ACK packets.
    ///
    /// Enabling this also enables auto-ack on pipe 0.
    pub fn with_ack_payloads(mut self, enable: bool) -> Self {
        self.feature = self.feature.with_ack_payloads(enable);
        if enable {
            self.auto_ack |= 1;
        }
        self
    }
}
