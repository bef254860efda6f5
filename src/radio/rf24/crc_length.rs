use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbCrcLength, Nrf24, Nrf24Error},
    CrcLength,
};

use super::{registers, Config};

impl<SPI, DO, DELAY> EsbCrcLength for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CrcLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        let config = Config::from_bits(self.read_byte(registers::CONFIG)?);
        config.crc_length().ok_or(Nrf24Error::BinaryCorruption)
    }

    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType> {
        self.write_verified(registers::CONFIG, CrcLength::MASK, crc_length.into_bits())?;
        self._config_reg = self._config_reg.with_crc_length(crc_length);
        Ok(())
    }
}
