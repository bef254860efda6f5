use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbPaLevel, Nrf24, Nrf24Error},
    PaLevel,
};

use super::registers;

impl<SPI, DO, DELAY> EsbPaLevel for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        Ok(PaLevel::from_bits(self.read_byte(registers::RF_SETUP)?))
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType> {
        self.write_verified(registers::RF_SETUP, PaLevel::MASK, pa_level.into_bits())?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbPaLevel};
    use crate::radio::rf24::commands;
    use crate::{spi_test_expects, test::mk_radio, PaLevel};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    fn pa_level_parametrized(level: PaLevel, raw: u8) {
        let spi_expectations = spi_test_expects![
            // set_pa_level() keeps the data rate and LNA bits
            (vec![registers::RF_SETUP, 0xFFu8], vec![0xEu8, 0x21u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x21 | raw],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0xFFu8], vec![0xEu8, 0x21 | raw]),
            // get_pa_level()
            (vec![registers::RF_SETUP, 0xFFu8], vec![0xEu8, 0x21 | raw]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_pa_level(level).unwrap();
        assert_eq!(radio.get_pa_level().unwrap(), level);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pa_level_min() {
        pa_level_parametrized(PaLevel::Min, 0);
    }

    #[test]
    fn pa_level_low() {
        pa_level_parametrized(PaLevel::Low, 2);
    }

    #[test]
    fn pa_level_high() {
        pa_level_parametrized(PaLevel::High, 4);
    }

    #[test]
    fn pa_level_max() {
        pa_level_parametrized(PaLevel::Max, 6);
    }
}
