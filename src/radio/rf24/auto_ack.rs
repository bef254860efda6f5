use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbAutoAck, Nrf24, Nrf24Error};

use super::{bit_fields::Feature, commands, registers};

/// `EN_AA` bits for pipes 0 - 5.
const ALL_PIPES: u8 = 0x3F;

impl<SPI, DO, DELAY> EsbAutoAck for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_ack_payloads(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        let bits = (enable as u8) * Feature::ACK_PAYLOADS_MASK;
        let feature = self.write_verified(registers::FEATURE, Feature::ACK_PAYLOADS_MASK, bits)?;
        self._feature = Feature::from_bits(feature);
        Ok(())
    }

    fn get_ack_payloads(&self) -> bool {
        self._feature.ack_payloads()
    }

    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType> {
        let pipe = Self::pipe_index(pipe)?;
        if !self._feature.ack_payloads() {
            return Ok(false);
        }
        let len = buf.len().min(32);
        self.transmit(
            commands::W_ACK_PAYLOAD | (pipe.get() & 7),
            Some(&buf[..len]),
            None,
            len,
        )?;
        Ok(!self._status.tx_full())
    }

    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.write_verified(registers::EN_AA, ALL_PIPES, (enable as u8) * ALL_PIPES)?;
        Ok(())
    }

    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        let mask = Self::pipe_index(pipe)?.mask();
        self.write_verified(registers::EN_AA, mask, (enable as u8) * mask)?;
        Ok(())
    }

    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        let bits = (enable as u8) * Feature::ASK_NO_ACK_MASK;
        let feature = self.write_verified(registers::FEATURE, Feature::ASK_NO_ACK_MASK, bits)?;
        self._feature = Feature::from_bits(feature);
        Ok(())
    }
}
