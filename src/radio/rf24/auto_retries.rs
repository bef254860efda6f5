use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbAutoRetries, Nrf24, Nrf24Error};

use super::{
    bit_fields::{ObserveTx, SetupRetry},
    registers,
};

impl<SPI, DO, DELAY> EsbAutoRetries for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoRetriesErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_retry_count(&mut self, count: u8) -> Result<(), Self::AutoRetriesErrorType> {
        let bits = SetupRetry::new().with_arc(count.min(15)).into_bits();
        self.write_verified(registers::SETUP_RETR, SetupRetry::ARC_MASK, bits)?;
        Ok(())
    }

    fn get_retry_count(&mut self) -> Result<u8, Self::AutoRetriesErrorType> {
        Ok(SetupRetry::from_bits(self.read_byte(registers::SETUP_RETR)?).arc())
    }

    fn set_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoRetriesErrorType> {
        let bits = SetupRetry::new().with_ard(delay.min(15)).into_bits();
        self.write_verified(registers::SETUP_RETR, SetupRetry::ARD_MASK, bits)?;
        Ok(())
    }

    fn get_retry_delay(&mut self) -> Result<u8, Self::AutoRetriesErrorType> {
        Ok(SetupRetry::from_bits(self.read_byte(registers::SETUP_RETR)?).ard())
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::AutoRetriesErrorType> {
        Ok(ObserveTx::from_bits(self.read_byte(registers::OBSERVE_TX)?).arc_cnt())
    }

    fn get_lost_packets(&mut self) -> Result<u8, Self::AutoRetriesErrorType> {
        Ok(ObserveTx::from_bits(self.read_byte(registers::OBSERVE_TX)?).plos_cnt())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbAutoRetries};
    use crate::radio::rf24::commands;
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn retry_fields_are_independent() {
        let spi_expectations = spi_test_expects![
            // set_retry_count(5) keeps the default delay
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x5Fu8]),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0x55u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x55u8]),
            // set_retry_delay(3) keeps the count
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x55u8]),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0x35u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x35u8]),
            // get_retry_count()
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x35u8]),
            // get_retry_delay()
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x35u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_retry_count(5).unwrap();
        radio.set_retry_delay(3).unwrap();
        assert_eq!(radio.get_retry_count().unwrap(), 5);
        assert_eq!(radio.get_retry_delay().unwrap(), 3);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn retry_count_is_clamped() {
        let spi_expectations = spi_test_expects![
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x50u8]),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0x5Fu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::SETUP_RETR, 0xFFu8], vec![0xEu8, 0x5Fu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_retry_count(200).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn observe_tx() {
        let spi_expectations = spi_test_expects![
            (vec![registers::OBSERVE_TX, 0xFFu8], vec![0xEu8, 0x2Au8]),
            (vec![registers::OBSERVE_TX, 0xFFu8], vec![0xEu8, 0x2Au8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_last_arc().unwrap(), 10);
        assert_eq!(radio.get_lost_packets().unwrap(), 2);
        spi.done();
        ce_pin.done();
    }
}
