use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbDataRate, Nrf24, Nrf24Error},
    DataRate,
};

use super::registers;

impl<SPI, DO, DELAY> EsbDataRate for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Return the [`DataRate`] used.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        let da_bin = self.read_byte(registers::RF_SETUP)? & DataRate::MASK;
        if da_bin == DataRate::MASK {
            return Err(Nrf24Error::BinaryCorruption);
        }
        Ok(DataRate::from_bits(da_bin))
    }

    /// Set the [`DataRate`] used.
    ///
    /// 250 Kbps sets `RF_DR_LOW` only, 2 Mbps sets `RF_DR_HIGH` only
    /// and 1 Mbps clears both.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        self.write_verified(registers::RF_SETUP, DataRate::MASK, data_rate.into_bits())?;
        Ok(())
    }
}
