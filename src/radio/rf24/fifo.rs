use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbFifo, Nrf24, Nrf24Error},
    FifoState,
};

use super::{bit_fields::FifoStatus, commands, registers};

impl<SPI, DO, DELAY> EsbFifo for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(!FifoStatus::from_bits(self.read_byte(registers::FIFO_STATUS)?).rx_empty())
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.transmit(commands::FLUSH_RX, None, None, 0)?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.transmit(commands::FLUSH_TX, None, None, 0)?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo = FifoStatus::from_bits(self.read_byte(registers::FIFO_STATUS)?);
        let (full, empty) = if about_tx {
            (fifo.tx_full(), fifo.tx_empty())
        } else {
            (fifo.rx_full(), fifo.rx_empty())
        };
        Ok(match (full, empty) {
            (true, _) => FifoState::Full,
            (_, true) => FifoState::Empty,
            _ => FifoState::Occupied,
        })
    }

    fn reuse_tx_payload(&mut self) -> Result<(), Self::FifoErrorType> {
        self.transmit(commands::REUSE_TX_PL, None, None, 0)?;
        Ok(())
    }
}
