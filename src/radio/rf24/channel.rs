use super::{mnemonics, registers};
use crate::radio::{prelude::EsbChannel, Nrf24, Nrf24Error};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbChannel for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 support 128 channels. A `channel` above 127 is
    /// rejected with [`Nrf24Error::UnknownChannel`] before any SPI transaction.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        if channel > mnemonics::MAX_CHANNEL {
            return Err(Nrf24Error::UnknownChannel(channel));
        }
        self.write_verified(registers::RF_CH, mnemonics::MAX_CHANNEL, channel)?;
        Ok(())
    }

    /// See also [`Nrf24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        Ok(self.read_byte(registers::RF_CH)? & mnemonics::MAX_CHANNEL)
    }
}
