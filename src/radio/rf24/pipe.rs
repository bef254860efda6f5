use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{PackageSink, PackageSource, PipeIndex};

use super::{mnemonics, registers, Nrf24, Nrf24Error};

/// `RX_ADDR_Px` register of each pipe.
const RX_ADDR: [u8; PipeIndex::COUNT] = [0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F];

/// Bytes stored in each pipe's `RX_ADDR_Px` register.
///
/// Pipes 2 - 5 only store their LSByte and borrow the upper 4 bytes of pipe 1.
const ADDRESS_WIDTH: [usize; PipeIndex::COUNT] = [5, 5, 1, 1, 1, 1];

/// Addresses are 40 bits, transmitted LSByte first.
const ADDRESS_BYTES: usize = 5;

fn address_bytes(address: u64) -> [u8; ADDRESS_BYTES] {
    let mut bytes = [0u8; ADDRESS_BYTES];
    bytes.copy_from_slice(&address.to_le_bytes()[..ADDRESS_BYTES]);
    bytes
}

fn address_value(bytes: &[u8; ADDRESS_BYTES]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..ADDRESS_BYTES].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

impl<'q, SPI, DO, DELAY> Nrf24<'q, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Bind an RX data `pipe` to an inbound `queue`.
    ///
    /// The pipe's address is written (unless `address` is 0, which keeps the
    /// existing address), then the pipe is enabled with dynamic payload
    /// lengths. Packages received on this pipe are pushed into `queue` by
    /// [`Nrf24::dispatch()`].
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 store a full 5-byte address. Pipes 2-5 only store the
    /// address' LSByte (the upper 4 bytes of `address` are ignored) and share
    /// the upper 4 bytes of pipe 1's address. Changing the address of pipe 1
    /// thus changes the effective address of pipes 2-5.
    ///
    /// ```ignore
    /// radio.configure_rx_pipe(1, &mut pipe1_producer, 0xC2C2C2C2C2)?;
    /// // listens on 0xC2C2C2C2C3
    /// radio.configure_rx_pipe(2, &mut pipe2_producer, 0xC3)?;
    /// ```
    ///
    /// Pipe 0 is also used by [`Nrf24::configure_tx_pipe()`] to receive ACK packets.
    pub fn configure_rx_pipe(
        &mut self,
        pipe: u8,
        queue: &'q mut dyn PackageSink,
        address: u64,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let pipe = Self::pipe_index(pipe)?;
        if address > mnemonics::MAX_ADDRESS {
            return Err(Nrf24Error::MalformedAddress);
        }
        if address != 0 {
            let bytes = address_bytes(address);
            self.write_register_verified(
                RX_ADDR[pipe.index()],
                &bytes[..ADDRESS_WIDTH[pipe.index()]],
            )?;
        }
        self.enable_data_pipe(pipe.get(), true)?;
        self.rx_queues[pipe.index()] = Some(queue);
        debug!("bound RX {}", pipe);
        Ok(())
    }

    /// Bind the TX pipe to an outbound `queue` and set the destination `address`.
    ///
    /// If `address` is 0, the current `TX_ADDR` is kept. Either way the
    /// destination address is mirrored into RX pipe 0 (needed to receive
    /// auto-ack packets) and pipe 0 is enabled.
    ///
    /// Pipe 0 can still be bound to an inbound queue, which then receives
    /// ACK payloads.
    pub fn configure_tx_pipe(
        &mut self,
        queue: &'q mut dyn PackageSource,
        address: u64,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if address > mnemonics::MAX_ADDRESS {
            return Err(Nrf24Error::MalformedAddress);
        }
        let bytes = if address == 0 {
            let mut bytes = [0u8; ADDRESS_BYTES];
            self.read_register(registers::TX_ADDR, &mut bytes)?;
            bytes
        } else {
            let bytes = address_bytes(address);
            self.write_register_verified(registers::TX_ADDR, &bytes)?;
            bytes
        };
        self.write_register_verified(registers::RX_ADDR_P0, &bytes)?;
        self.enable_data_pipe(0, true)?;
        self.tx_queue = Some(queue);
        debug!("bound TX pipe to {=[u8]:x}", bytes);
        Ok(())
    }

    /// Enable (or disable) an RX data `pipe`.
    ///
    /// The pipe's `EN_RXADDR` and `DYNPD` bits are always changed together.
    /// If `DYNPD` rejects the change, `EN_RXADDR` is put back to match it
    /// and the `DYNPD` error is returned.
    /// Queue bindings are not affected.
    pub fn enable_data_pipe(
        &mut self,
        pipe: u8,
        enable: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let mask = Self::pipe_index(pipe)?.mask();
        let bits = (enable as u8) * mask;
        self.write_verified(registers::EN_RXADDR, mask, bits)?;
        if let Err(e) = self.write_verified(registers::DYNPD, mask, bits) {
            // a single-bit mismatch means DYNPD still holds the other state
            warn!("DYNPD rejected pipe {}, rolling back EN_RXADDR", pipe);
            let _ = self.write_verified(registers::EN_RXADDR, mask, !bits & mask);
            return Err(e);
        }
        Ok(())
    }

    /// Disable an RX data `pipe` and release its inbound queue.
    pub fn disable_data_pipe(&mut self, pipe: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.enable_data_pipe(pipe, false)?;
        let pipe = Self::pipe_index(pipe)?;
        self.rx_queues[pipe.index()] = None;
        debug!("released RX {}", pipe);
        Ok(())
    }

    /// Release the outbound queue. The radio's registers are not changed.
    pub fn release_tx_pipe(&mut self) {
        self.tx_queue = None;
    }

    /// The effective 40-bit address of an RX data `pipe`.
    ///
    /// For pipes 2 - 5 this is the pipe's own LSByte on top of pipe 1's
    /// upper 4 bytes.
    pub fn rx_address(&mut self, pipe: u8) -> Result<u64, Nrf24Error<SPI::Error, DO::Error>> {
        let pipe = Self::pipe_index(pipe)?;
        let mut bytes = [0u8; ADDRESS_BYTES];
        if ADDRESS_WIDTH[pipe.index()] == ADDRESS_BYTES {
            self.read_register(RX_ADDR[pipe.index()], &mut bytes)?;
        } else {
            self.read_register(registers::RX_ADDR_P1, &mut bytes)?;
            self.read_register(RX_ADDR[pipe.index()], &mut bytes[..1])?;
        }
        Ok(address_value(&bytes))
    }

    /// The 40-bit destination address used by the TX pipe.
    pub fn tx_address(&mut self) -> Result<u64, Nrf24Error<SPI::Error, DO::Error>> {
        let mut bytes = [0u8; ADDRESS_BYTES];
        self.read_register(registers::TX_ADDR, &mut bytes)?;
        Ok(address_value(&bytes))
    }

    /// Is the given RX data `pipe` enabled in the radio?
    pub fn is_pipe_enabled(&mut self, pipe: u8) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        let mask = Self::pipe_index(pipe)?.mask();
        Ok(self.read_byte(registers::EN_RXADDR)? & mask != 0)
    }

    /// Is an inbound queue bound to the given RX data `pipe`?
    ///
    /// Always `false` for pipe numbers not in range [0, 5].
    pub fn is_pipe_bound(&self, pipe: u8) -> bool {
        PipeIndex::new(pipe).is_some_and(|pipe| self.rx_queues[pipe.index()].is_some())
    }

    /// Bit mask (as in `EN_RXADDR`) of the pipes that must stay enabled.
    pub(super) fn bound_pipes(&self) -> u8 {
        let tx = self.tx_queue.is_some() as u8;
        self.rx_queues
            .iter()
            .enumerate()
            .fold(tx, |mask, (pipe, queue)| mask | ((queue.is_some() as u8) << pipe))
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::registers;
    use crate::radio::{
        rf24::{commands, test::toggle_pipe_expects},
        Nrf24Error,
    };
    use crate::{spi_test_expects, test::mk_radio, Package};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use heapless::spsc::Queue;
    use std::vec;

    #[test]
    fn configure_rx_pipe_1() {
        let mut spi_expectations = spi_test_expects![
            (
                vec![0x0B | commands::W_REGISTER, 0xC2u8, 0xC2, 0xC2, 0xC2, 0xC2],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![0x0Bu8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
                vec![0xEu8, 0xC2, 0xC2, 0xC2, 0xC2, 0xC2],
            ),
        ]
        .to_vec();
        spi_expectations.extend(toggle_pipe_expects(0, 2));
        let mut queue: Queue<Package, 4> = Queue::new();
        let (mut producer, _consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio
            .configure_rx_pipe(1, &mut producer, 0xC2C2C2C2C2)
            .unwrap();
        assert!(radio.is_pipe_bound(1));
        assert!(!radio.is_pipe_bound(2));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_rx_pipe_keeps_address() {
        let spi_expectations = toggle_pipe_expects(0x2, 0x22);
        let mut queue: Queue<Package, 4> = Queue::new();
        let (mut producer, _consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure_rx_pipe(5, &mut producer, 0).unwrap();
        assert!(radio.is_pipe_bound(5));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_rx_pipe_rejects_before_spi() {
        let mut queue_a: Queue<Package, 4> = Queue::new();
        let mut queue_b: Queue<Package, 4> = Queue::new();
        let (mut producer_a, _consumer_a) = queue_a.split();
        let (mut producer_b, _consumer_b) = queue_b.split();
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.configure_rx_pipe(6, &mut producer_a, 0xC3),
            Err(Nrf24Error::UnknownPipe(6))
        );
        assert_eq!(
            radio.configure_rx_pipe(2, &mut producer_b, 1 << 40),
            Err(Nrf24Error::MalformedAddress)
        );
        assert!(!radio.is_pipe_bound(2));
        assert!(!radio.is_pipe_bound(6));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pipe_toggles_both_registers() {
        for pipe in 0..6u8 {
            let mask = 1u8 << pipe;
            let mut spi_expectations = toggle_pipe_expects(0, mask);
            spi_expectations.extend(toggle_pipe_expects(mask, 0));
            let mocks = mk_radio(&[], &spi_expectations);
            let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
            radio.enable_data_pipe(pipe, true).unwrap();
            radio.enable_data_pipe(pipe, false).unwrap();
            spi.done();
            ce_pin.done();
        }
    }

    #[test]
    fn dynpd_failure_rolls_back_en_rxaddr() {
        let spi_expectations = spi_test_expects![
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 0u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 4u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 4u8]),
            (vec![registers::DYNPD, 0xFFu8], vec![0xEu8, 0u8]),
            (
                vec![registers::DYNPD | commands::W_REGISTER, 4u8],
                vec![0xEu8, 0u8],
            ),
            // DYNPD did not take the write
            (vec![registers::DYNPD, 0xFFu8], vec![0xEu8, 0u8]),
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 4u8]),
            (
                vec![registers::EN_RXADDR | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.enable_data_pipe(2, true),
            Err(Nrf24Error::VerificationFailed(registers::DYNPD))
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn disable_data_pipe_releases_queue() {
        let mut spi_expectations = toggle_pipe_expects(0, 0x4);
        spi_expectations.extend(toggle_pipe_expects(0x4, 0));
        let mut queue: Queue<Package, 4> = Queue::new();
        let (mut producer, _consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure_rx_pipe(2, &mut producer, 0).unwrap();
        assert_eq!(radio.bound_pipes(), 0x4);
        radio.disable_data_pipe(2).unwrap();
        assert!(!radio.is_pipe_bound(2));
        assert_eq!(radio.bound_pipes(), 0);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_tx_pipe() {
        let address = [0xE7u8, 0xE7, 0xE7, 0xE7, 0xE7];
        let mut spi_expectations = spi_test_expects![
            // write TX_ADDR and verify
            (
                vec![registers::TX_ADDR | commands::W_REGISTER, 0xE7u8, 0xE7, 0xE7, 0xE7, 0xE7],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![registers::TX_ADDR, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &address[..]].concat(),
            ),
            // mirror into RX_ADDR_P0 and verify
            (
                vec![registers::RX_ADDR_P0 | commands::W_REGISTER, 0xE7u8, 0xE7, 0xE7, 0xE7, 0xE7],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![registers::RX_ADDR_P0, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &address[..]].concat(),
            ),
        ]
        .to_vec();
        spi_expectations.extend(toggle_pipe_expects(0, 1));
        let mut queue: Queue<Package, 4> = Queue::new();
        let (_producer, mut consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure_tx_pipe(&mut consumer, 0xE7E7E7E7E7).unwrap();
        assert_eq!(radio.bound_pipes(), 1);
        radio.release_tx_pipe();
        assert_eq!(radio.bound_pipes(), 0);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn configure_tx_pipe_keeps_address() {
        let address = [1u8, 2, 3, 4, 5];
        let mut spi_expectations = spi_test_expects![
            // read current TX_ADDR instead of writing it
            (
                vec![registers::TX_ADDR, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &address[..]].concat(),
            ),
            (
                [&[registers::RX_ADDR_P0 | commands::W_REGISTER][..], &address[..]].concat(),
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![registers::RX_ADDR_P0, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &address[..]].concat(),
            ),
        ]
        .to_vec();
        spi_expectations.extend(toggle_pipe_expects(2, 3));
        let mut queue: Queue<Package, 4> = Queue::new();
        let (_producer, mut consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.configure_tx_pipe(&mut consumer, 0).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pipe_address_aliasing() {
        let pipe1 = [0xC2u8, 0xB1, 0xB2, 0xB3, 0xB4];
        let mut spi_expectations = spi_test_expects![
            // only the LSByte of a pipe 3 address is written, then verified
            (
                vec![0x0D | commands::W_REGISTER, 0xC4u8],
                vec![0xEu8, 0u8],
            ),
            (vec![0x0Du8, 0xFF], vec![0xEu8, 0xC4u8]),
        ]
        .to_vec();
        spi_expectations.extend(toggle_pipe_expects(0x2, 0xA));
        spi_expectations.extend(spi_test_expects![
            // rx_address(1) is unchanged
            (
                vec![registers::RX_ADDR_P1, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &pipe1[..]].concat(),
            ),
            // rx_address(3) composes pipe 1's upper bytes with its own LSByte
            (
                vec![registers::RX_ADDR_P1, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                [&[0xEu8][..], &pipe1[..]].concat(),
            ),
            (vec![0x0Du8, 0xFF], vec![0xEu8, 0xC4u8]),
        ]);
        let mut queue: Queue<Package, 4> = Queue::new();
        let (mut producer, _consumer) = queue.split();
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio
            .configure_rx_pipe(3, &mut producer, 0xFFFF_FFC4)
            .unwrap();
        assert_eq!(radio.rx_address(1).unwrap(), 0xB4B3B2B1C2);
        assert_eq!(radio.rx_address(3).unwrap(), 0xB4B3B2B1C4);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pipe_registers() {
        let spi_expectations = spi_test_expects![
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 0x5u8]),
            (vec![registers::EN_RXADDR, 0xFFu8], vec![0xEu8, 0x5u8]),
            (
                vec![registers::TX_ADDR, 0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF],
                vec![0xEu8, 0xE7, 0xE7, 0xE7, 0xE7, 0xE7],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.is_pipe_enabled(2).unwrap());
        assert!(!radio.is_pipe_enabled(1).unwrap());
        assert_eq!(radio.tx_address().unwrap(), 0xE7E7E7E7E7);
        assert_eq!(radio.rx_address(7), Err(Nrf24Error::UnknownPipe(7)));
        spi.done();
        ce_pin.done();
    }
}
