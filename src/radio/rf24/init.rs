use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{EsbFifo, EsbInit, EsbStatus},
        Nrf24, Nrf24Error, RadioConfig,
    },
    OperatingMode, StatusFlags,
};

use super::{bit_fields::Config, mnemonics, registers, timing};

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// CE low and `PWR_UP` cleared, regardless of the tracked mode.
    fn force_shutdown(&mut self, config: Config) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._config_reg = config.with_power(false).with_is_rx(false);
        self.write_byte(registers::CONFIG, self._config_reg.into_bits())?;
        self.mode = OperatingMode::Shutdown;
        Ok(())
    }
}

impl<SPI, DO, DELAY> EsbInit for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type InitErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware.
    ///
    /// Blocks for the radio's power-on reset (5 milliseconds), then checks
    /// that the `CONFIG` register reads back what was written to it. A radio
    /// that is unpowered or not connected usually fails that check with
    /// [`Nrf24Error::BinaryCorruption`].
    fn init(&mut self) -> Result<(), Self::InitErrorType> {
        self._delay_impl.delay_ms(timing::POWER_ON_RESET_MS);

        self.force_shutdown(self._config_reg)?;
        let config = self.read_byte(registers::CONFIG)?;
        if config != self._config_reg.into_bits() {
            error!(
                "CONFIG reads {=u8:#x}, expected {=u8:#x}",
                config,
                self._config_reg.into_bits()
            );
            return Err(Nrf24Error::BinaryCorruption);
        }

        self.with_config(&RadioConfig::default())?;
        debug!("radio initialized");
        Ok(())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType> {
        self.force_shutdown(config.config_reg)?;
        self.clear_status_flags(StatusFlags::new())?;
        self.flush_rx()?;
        self.flush_tx()?;

        self.write_byte(registers::SETUP_AW, mnemonics::ADDRESS_WIDTH_5)?;
        self.write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.write_byte(registers::EN_AA, config.auto_ack())?;
        self._feature = config.feature;
        self.write_byte(registers::FEATURE, self._feature.into_bits())?;
        let bound = self.bound_pipes();
        self.write_byte(registers::DYNPD, bound)?;
        self.write_byte(registers::EN_RXADDR, bound)?;
        self.write_byte(registers::RF_SETUP, config.rf_setup.into_bits())?;
        self.write_byte(registers::RF_CH, config.channel())?;
        Ok(())
    }
}
