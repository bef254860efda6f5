use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbStatus, Nrf24, Nrf24Error},
    types::StatusFlags,
};

use super::{registers, Config};

impl<SPI, DO, DELAY> EsbStatus for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        let masked = !flags.into_bits() & StatusFlags::IRQ_MASK;
        let config = self.write_verified(registers::CONFIG, StatusFlags::IRQ_MASK, masked)?;
        self._config_reg = Config::from_bits(
            self._config_reg.into_bits() & !StatusFlags::IRQ_MASK
                | config & StatusFlags::IRQ_MASK,
        );
        Ok(())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.nop()?;
        Ok(())
    }

    fn status_flags(&self) -> StatusFlags {
        self._status
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbStatus, StatusFlags};
    use crate::radio::rf24::{commands, mnemonics};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn what_happened() {
        let spi_expectations = spi_test_expects![(vec![commands::NOP], vec![0x70u8]),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.update().unwrap();
        let flags = radio.status_flags();
        assert!(flags.rx_dr());
        assert!(flags.tx_ds());
        assert!(flags.max_rt());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_status_flags() {
        let spi_expectations = spi_test_expects![
            // read the CONFIG register value
            (vec![registers::CONFIG, 0xFFu8], vec![0xEu8, 0xFu8]),
            // set the CONFIG register value to disable all IRQ events
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x7Fu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::CONFIG, 0xFFu8], vec![0xEu8, 0x7Fu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_status_flags(StatusFlags::default()).unwrap();
        assert!(!radio._config_reg.rx_dr());
        // power state is owned by the mode state machine
        assert!(!radio._config_reg.power());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn clear_status_flags() {
        let spi_expectations = spi_test_expects![(
            vec![
                registers::STATUS | commands::W_REGISTER,
                mnemonics::MASK_RX_DR | mnemonics::MASK_MAX_RT,
            ],
            vec![0xEu8, 0u8],
        ),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let flags = StatusFlags::default().with_rx_dr(true).with_max_rt(true);
        radio.clear_status_flags(flags).unwrap();
        spi.done();
        ce_pin.done();
    }
}
