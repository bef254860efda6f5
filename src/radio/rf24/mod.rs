use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
mod auto_retries;
pub(crate) mod bit_fields;
mod channel;
mod codec;
mod constants;
mod crc_length;
mod data_rate;
mod dispatch;
mod fifo;
mod init;
mod mode;
mod pa_level;
mod pipe;
mod status;
use bit_fields::{Config, Feature, RfSetup};
pub use constants::{commands, mnemonics, registers, timing};
pub use dispatch::DispatchReport;

use crate::{OperatingMode, PackageSink, PackageSource, PipeIndex, StatusFlags};

/// An collection of error types to describe hardware malfunctions
/// and rejected requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
    /// The register (at the given address) did not read back what was written to it.
    ///
    /// This is not retried. The radio may reject values outside its hardware limits.
    VerificationFailed(u8),
    /// The given pipe number is not in range [0, 5].
    UnknownPipe(u8),
    /// The given address does not fit in 40 bits.
    MalformedAddress,
    /// The given channel is above 127.
    UnknownChannel(u8),
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01+ transceiver.
///
/// Additionally, it owns the binding of the radio's data pipes to
/// application queues (see [`Nrf24::configure_rx_pipe()`] and
/// [`Nrf24::configure_tx_pipe()`]) and the interrupt event dispatcher
/// ([`Nrf24::dispatch()`]). The queues are borrowed for `'q`.
pub struct Nrf24<'q, SPI, DO, DELAY> {
    _spi: SPI,
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active modes.
    /// It is strongly recommended to change modes using
    /// [`EsbMode::set_mode()`](fn@crate::radio::prelude::EsbMode::set_mode)
    /// because the driver can not observe this pin.
    pub ce_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _feature: Feature,
    mode: OperatingMode,
    rx_queues: [Option<&'q mut dyn PackageSink>; PipeIndex::COUNT],
    tx_queue: Option<&'q mut dyn PackageSource>,
}

impl<'q, SPI, DO, DELAY> Nrf24<'q, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// No pipe is bound and the radio is assumed to be in
    /// [`OperatingMode::Shutdown`] until
    /// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) makes it so.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24<'q, SPI, DO, DELAY> {
        Nrf24 {
            ce_pin,
            _spi: spi,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            // 16 bit CRC, enable all IRQ, and power down as TX
            _config_reg: Config::default(),
            // dynamic payloads only
            _feature: Feature::default(),
            mode: OperatingMode::Shutdown,
            rx_queues: core::array::from_fn(|_| None),
            tx_queue: None,
        }
    }

    fn pipe_index(pipe: u8) -> Result<PipeIndex, Nrf24Error<SPI::Error, DO::Error>> {
        PipeIndex::new(pipe).ok_or(Nrf24Error::UnknownPipe(pipe))
    }

    /// Was a signal of at least -64 dBm detected on the current channel?
    ///
    /// Only meaningful in RX mode.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_byte(registers::RPD)? & 1 == 1)
    }

    /// Control the builtin LNA feature on nRF24L01 (older non-plus variants) and Si24R1
    /// (cheap chinese clones of the nRF24L01).
    ///
    /// This is enabled by default (regardless of chip variant).
    /// See [`PaLevel`](enum@crate::PaLevel) for effective behavior.
    ///
    /// This function has no effect on nRF24L01+ modules and PA/LNA variants because
    /// the LNA feature is always enabled.
    pub fn set_lna(&mut self, enable: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.write_verified(registers::RF_SETUP, RfSetup::LNA_MASK, enable as u8)?;
        Ok(())
    }
}
