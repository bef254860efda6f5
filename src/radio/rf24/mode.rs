use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbMode, Nrf24, Nrf24Error},
    OperatingMode,
};

use super::{registers, timing};

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// CE low, then power up if coming out of Shutdown.
    ///
    /// `PWR_UP` is left untouched when leaving Rx or Tx.
    fn enter_standby(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        if !self._config_reg.power() {
            self._config_reg = self._config_reg.with_power(true);
            self.write_byte(registers::CONFIG, self._config_reg.into_bits())?;
            // Tpd2stby can be up to 5ms per the 1.0 datasheet
            self._delay_impl.delay_us(timing::POWER_UP_US);
        }
        self.mode = OperatingMode::Standby;
        Ok(())
    }

    fn enter_active(&mut self, as_rx: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._config_reg = self._config_reg.with_power(true).with_is_rx(as_rx);
        self.write_byte(registers::CONFIG, self._config_reg.into_bits())?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(timing::SETTLE_US);
        Ok(())
    }

    fn enter_shutdown(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._config_reg = self._config_reg.with_power(false);
        self.write_byte(registers::CONFIG, self._config_reg.into_bits())
    }
}

impl<SPI, DO, DELAY> EsbMode for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ModeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// After switching to [`OperatingMode::Rx`], a non-PA/LNA radio will consume
    /// about 13.5mA at [`PaLevel::Max`](type@crate::types::PaLevel::Max).
    /// In [`OperatingMode::Standby`], a non-PA/LNA radio will consume about
    /// 26uA (.026mA).
    /// In [`OperatingMode::Shutdown`], the radio will consume approximately
    /// 900nA (.0009mA).
    ///
    /// Coming out of Shutdown blocks for 5 milliseconds. Entering Rx or Tx
    /// blocks for another 130 microseconds.
    fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Self::ModeErrorType> {
        let previous = self.mode;
        if mode == previous {
            return Ok(());
        }
        match mode {
            OperatingMode::Standby => self.enter_standby()?,
            OperatingMode::Rx | OperatingMode::Tx => {
                if previous != OperatingMode::Standby {
                    self.enter_standby()?;
                }
                self.enter_active(mode == OperatingMode::Rx)?;
            }
            OperatingMode::Shutdown => {
                if previous != OperatingMode::Standby {
                    self.enter_standby()?;
                }
                self.enter_shutdown()?;
            }
        }
        self.mode = mode;
        debug!("radio mode {} -> {}", previous, mode);
        Ok(())
    }

    fn get_mode(&self) -> OperatingMode {
        self.mode
    }
}
