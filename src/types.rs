//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaLevel::Min => "Min",
            PaLevel::Low => "Low",
            PaLevel::High => "High",
            PaLevel::Max => "Max",
        }
    }

    /// The `RF_PWR` field of the `RF_SETUP` register.
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataRate::Mbps1 => "1 Mbps",
            DataRate::Mbps2 => "2 Mbps",
            DataRate::Kbps250 => "250 Kbps",
        }
    }

    /// `RF_DR_LOW | RF_DR_HIGH` in the `RF_SETUP` register.
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

/// The length of a CRC checksum that is used (if any).
///
/// Cyclical Redundancy Checking (CRC) is commonly used to ensure data integrity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CrcLength::Disabled => "disabled",
            CrcLength::Bit8 => "8 bit",
            CrcLength::Bit16 => "16 bit",
        }
    }

    /// `EN_CRC | CRCO` in the `CONFIG` register.
    pub(crate) const MASK: u8 = 0xC;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }

    /// Returns `None` for the reserved `CRCO` without `EN_CRC` encoding.
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & Self::MASK {
            0 => Some(CrcLength::Disabled),
            8 => Some(CrcLength::Bit8),
            12 => Some(CrcLength::Bit16),
            _ => None,
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

impl FifoState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FifoState::Full => "Full",
            FifoState::Empty => "Empty",
            FifoState::Occupied => "Occupied",
        }
    }
}

/// The operating modes tracked by the driver.
///
/// The radio cannot report which of these it is in (the chip-enable line is
/// write-only from the radio's point of view), so the driver is the only
/// source of truth. Exactly one mode is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatingMode {
    /// `PWR_UP` is cleared. Register contents are retained.
    Shutdown,
    /// `PWR_UP` is set and the chip-enable line is inactive.
    Standby,
    /// Primary receiver with the chip-enable line active.
    Rx,
    /// Primary transmitter with the chip-enable line active.
    Tx,
}

impl OperatingMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Shutdown => "Shutdown",
            OperatingMode::Standby => "Standby",
            OperatingMode::Rx => "Rx",
            OperatingMode::Tx => "Tx",
        }
    }
}

/// `Display` (and `defmt::Format`) through each type's `as_str()`.
macro_rules! display_as_str {
    ($($name:ty),+ $(,)?) => {
        $(
            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> Result {
                    f.write_str(self.as_str())
                }
            }

            #[cfg(feature = "defmt")]
            impl defmt::Format for $name {
                fn format(&self, fmt: defmt::Formatter) {
                    defmt::write!(fmt, "{=str}", self.as_str())
                }
            }
        )+
    };
}

display_as_str!(PaLevel, DataRate, CrcLength, FifoState, OperatingMode);

/// A validated RX data pipe number in range [0, 5].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipeIndex(u8);

impl PipeIndex {
    /// The number of RX data pipes.
    pub const COUNT: usize = 6;

    /// Returns `None` if `pipe` is not in range [0, 5].
    pub const fn new(pipe: u8) -> Option<Self> {
        if pipe < Self::COUNT as u8 {
            Some(Self(pipe))
        } else {
            None
        }
    }

    /// The pipe number.
    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// This pipe's bit in the `EN_AA`, `EN_RXADDR` and `DYNPD` registers.
    pub(crate) const fn mask(self) -> u8 {
        1 << self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PipeIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "pipe {=u8}", self.0)
    }
}

impl Display for PipeIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "pipe {}", self.0)
    }
}

/// A payload of at most 32 bytes.
///
/// Inbound packages carry the number of the pipe that received them.
/// Outbound packages may request that the receiver does not acknowledge them
/// (only honored if [`allow_ask_no_ack()`](fn@crate::radio::prelude::EsbAutoAck::allow_ask_no_ack)
/// was enabled).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Package {
    buf: [u8; Package::MAX_LENGTH],
    len: u8,
    pipe: u8,
    no_ack: bool,
}

impl Package {
    /// The largest payload the radio can carry.
    pub const MAX_LENGTH: usize = 32;

    /// Copy `payload` into a new outbound package.
    ///
    /// Returns `None` if `payload` is longer than [`Package::MAX_LENGTH`].
    pub fn new(payload: &[u8]) -> Option<Self> {
        if payload.len() > Self::MAX_LENGTH {
            return None;
        }
        let mut buf = [0u8; Self::MAX_LENGTH];
        buf[..payload.len()].copy_from_slice(payload);
        Some(Self {
            buf,
            len: payload.len() as u8,
            pipe: 0,
            no_ack: false,
        })
    }

    /// An inbound package. Bytes past [`Package::MAX_LENGTH`] are discarded.
    pub(crate) fn received(pipe: PipeIndex, payload: &[u8]) -> Self {
        let len = payload.len().min(Self::MAX_LENGTH);
        let mut buf = [0u8; Self::MAX_LENGTH];
        buf[..len].copy_from_slice(&payload[..len]);
        Self {
            buf,
            len: len as u8,
            pipe: pipe.get(),
            no_ack: false,
        }
    }

    /// Ask the receiver not to acknowledge this package.
    pub fn with_no_ack(self, no_ack: bool) -> Self {
        Self { no_ack, ..self }
    }

    /// Was this package flagged with [`Package::with_no_ack()`]?
    pub fn no_ack(&self) -> bool {
        self.no_ack
    }

    /// The pipe that received this package (always 0 for outbound packages).
    pub fn pipe(&self) -> u8 {
        self.pipe
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

/// A struct used to describe the different interrupt events.
///
/// This is a snapshot of the STATUS byte, which the radio returns as the
/// first byte of every SPI transaction.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24_pipes::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the maximum number of retransmits was reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload at the top of the RX FIFO.
    ///
    /// `7` means the RX FIFO is empty, `6` is unused.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// Only the IRQ event flags of this snapshot.
    pub fn events(&self) -> Self {
        Self::from_bits(self.into_bits() & Self::IRQ_MASK)
    }

    /// Are any of the IRQ event flags set?
    pub fn any(&self) -> bool {
        self.into_bits() & Self::IRQ_MASK != 0
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::RX_DR_OFFSET))
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DS_OFFSET))
    }

    /// A flag to describe if the maximum number of retransmits was reached.
    pub fn with_max_rt(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::MAX_RT_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::MAX_RT_OFFSET))
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{CrcLength, DataRate, OperatingMode, Package, PaLevel, PipeIndex, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn crc_display() {
        assert_eq!(format!("{}", CrcLength::Bit8), String::from("8 bit"));
        assert_eq!(format!("{}", CrcLength::Bit16), String::from("16 bit"));
        assert_eq!(format!("{}", CrcLength::Disabled), String::from("disabled"));
    }

    #[test]
    fn crc_reserved_encoding() {
        assert_eq!(CrcLength::from_bits(4), None);
        assert_eq!(CrcLength::from_bits(0xC | 2), Some(CrcLength::Bit16));
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::from_bits(DataRate::Kbps250.into_bits()), DataRate::Kbps250);
        assert_eq!(DataRate::from_bits(0x8 | 0x7), DataRate::Mbps2);
        assert_eq!(format!("{}", DataRate::Kbps250), String::from("250 Kbps"));
    }

    #[test]
    fn pa_level_bits() {
        assert_eq!(PaLevel::from_bits(0x27), PaLevel::Max);
        assert_eq!(PaLevel::from_bits(PaLevel::Low.into_bits()), PaLevel::Low);
        assert_eq!(format!("{}", PaLevel::High), String::from("High"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(format!("{}", OperatingMode::Standby), String::from("Standby"));
    }

    #[test]
    fn pipe_index_bounds() {
        assert!(PipeIndex::new(6).is_none());
        let pipe = PipeIndex::new(5).unwrap();
        assert_eq!(pipe.get(), 5);
        assert_eq!(pipe.mask(), 0x20);
    }

    #[test]
    fn package_length_limit() {
        assert!(Package::new(&[0u8; 33]).is_none());
        let package = Package::new(b"hello").unwrap().with_no_ack(true);
        assert_eq!(package.as_bytes(), b"hello");
        assert_eq!(package.len(), 5);
        assert!(package.no_ack());
        assert!(Package::new(&[]).unwrap().is_empty());
    }

    #[test]
    fn received_package_keeps_pipe() {
        let package = Package::received(PipeIndex::new(3).unwrap(), &[1, 2, 3]);
        assert_eq!(package.pipe(), 3);
        assert_eq!(package.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::default()),
            String::from("StatusFlags rx_dr: false, tx_ds: false, max_rt: false")
        );
    }

    #[test]
    fn status_byte_fields() {
        // RX_DR on pipe 2 with a full TX FIFO
        let flags = StatusFlags::from_bits(0x45);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert_eq!(flags.rx_pipe(), 2);
        assert!(flags.tx_full());
        assert_eq!(flags.events().into_bits(), 0x40);
    }

    fn set_flags(rx_dr: bool, tx_ds: bool, max_rt: bool) {
        let flags = StatusFlags::default()
            .with_rx_dr(rx_dr)
            .with_tx_ds(tx_ds)
            .with_max_rt(max_rt);
        assert_eq!(flags.rx_dr(), rx_dr);
        assert_eq!(flags.tx_ds(), tx_ds);
        assert_eq!(flags.max_rt(), max_rt);
        assert_eq!(flags.any(), rx_dr || tx_ds || max_rt);
    }

    #[test]
    fn flags_0x50() {
        set_flags(true, false, true);
    }

    #[test]
    fn flags_0x20() {
        set_flags(false, true, false);
    }
}
