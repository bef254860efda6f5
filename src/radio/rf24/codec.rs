//! SPI framing.
//!
//! Every transaction is `[command][data_0]..[data_n-1]` clocked full duplex.
//! The first byte clocked back is always the STATUS register, which is cached
//! in `_status` after every exchange.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24, Nrf24Error};
use crate::{Package, StatusFlags};

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Exchange `len + 1` bytes: the `command` followed by `len` bytes of `tx`
    /// (padded with [`commands::FILLER`]).
    ///
    /// The bytes clocked back after the status byte are copied into `rx`.
    /// `len` is capped at 32.
    pub(super) fn transmit(
        &mut self,
        command: u8,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        let len = len.min(Package::MAX_LENGTH);
        self._buf[0] = command;
        let written = match tx {
            Some(bytes) => {
                let n = bytes.len().min(len);
                self._buf[1..=n].copy_from_slice(&bytes[..n]);
                n
            }
            None => 0,
        };
        self._buf[written + 1..=len].fill(commands::FILLER);
        self._spi
            .transfer_in_place(&mut self._buf[..=len])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        if let Some(bytes) = rx {
            let n = bytes.len().min(len);
            bytes[..n].copy_from_slice(&self._buf[1..=n]);
        }
        Ok(self._status)
    }

    pub(super) fn read_register(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        let command = commands::R_REGISTER | (register & registers::ADDRESS_MASK);
        self.transmit(command, None, Some(buf), len)?;
        Ok(())
    }

    pub(super) fn write_register(
        &mut self,
        register: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let command = commands::W_REGISTER | (register & registers::ADDRESS_MASK);
        self.transmit(command, Some(buf), None, buf.len())?;
        Ok(())
    }

    pub(super) fn read_byte(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let mut byte = [0u8];
        self.read_register(register, &mut byte)?;
        Ok(byte[0])
    }

    pub(super) fn write_byte(
        &mut self,
        register: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.write_register(register, &[byte])
    }

    /// Read-modify-write-verify the bits of `register` selected by `mask`.
    ///
    /// Returns the value read back.
    pub(super) fn write_verified(
        &mut self,
        register: u8,
        mask: u8,
        bits: u8,
    ) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let current = self.read_byte(register)?;
        let out = current & !mask | bits & mask;
        self.write_byte(register, out)?;
        let actual = self.read_byte(register)?;
        if actual & mask != out & mask {
            warn!(
                "register {=u8:#x} reads {=u8:#x} after writing {=u8:#x}",
                register, actual, out
            );
            return Err(Nrf24Error::VerificationFailed(register));
        }
        Ok(actual)
    }

    /// Write a multi-byte `register` (LSByte first) and read it back.
    pub(super) fn write_register_verified(
        &mut self,
        register: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.write_register(register, buf)?;
        let mut actual = [0u8; 5];
        let len = buf.len().min(actual.len());
        self.read_register(register, &mut actual[..len])?;
        if actual[..len] != buf[..len] {
            warn!("register {=u8:#x} did not accept {=[u8]:x}", register, buf);
            return Err(Nrf24Error::VerificationFailed(register));
        }
        Ok(())
    }

    pub(super) fn nop(&mut self) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        self.transmit(commands::NOP, None, None, 0)
    }

    /// The width of the payload at the top of the RX FIFO.
    pub(super) fn read_payload_width(&mut self) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let mut width = [0u8];
        self.transmit(commands::R_RX_PL_WID, None, Some(&mut width), 1)?;
        Ok(width[0])
    }

    pub(super) fn read_payload(
        &mut self,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        self.transmit(commands::R_RX_PAYLOAD, None, Some(buf), len)?;
        Ok(())
    }

    /// Upload a payload to the TX FIFO. `no_ack` selects `W_TX_PAYLOAD_NO_ACK`.
    pub(super) fn write_payload(
        &mut self,
        buf: &[u8],
        no_ack: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let command = if no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        self.transmit(command, Some(buf), None, buf.len())?;
        Ok(())
    }
}
