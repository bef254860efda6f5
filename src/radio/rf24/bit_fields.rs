use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

use super::mnemonics;

/// The `CONFIG` register.
///
/// The IRQ mask bits are inverted: a set bit keeps the event off the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    /// Configure the radio's "RX Data Ready" IRQ event.
    #[bits(1, access = None)]
    pub rx_dr: bool,

    /// Configure the radio's "TX Data Sent" IRQ event.
    #[bits(1, access = None)]
    pub tx_ds: bool,

    /// Configure the radio's "Max retries" IRQ event.
    #[bits(1, access = None)]
    pub max_rt: bool,

    #[bits(2, access = None, default = 3)]
    pub crc_length: u8,

    /// `PWR_UP`
    pub power: bool,

    /// `PRIM_RX`
    pub is_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> Option<CrcLength> {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !CrcLength::MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    pub const fn rx_dr(&self) -> bool {
        (self.into_bits() & mnemonics::MASK_RX_DR) == 0
    }

    pub fn with_rx_dr(self, enable: bool) -> Self {
        Self::from_bits(
            self.into_bits() & !mnemonics::MASK_RX_DR | ((!enable as u8) * mnemonics::MASK_RX_DR),
        )
    }

    pub const fn tx_ds(&self) -> bool {
        (self.into_bits() & mnemonics::MASK_TX_DS) == 0
    }

    pub fn with_tx_ds(self, enable: bool) -> Self {
        Self::from_bits(
            self.into_bits() & !mnemonics::MASK_TX_DS | ((!enable as u8) * mnemonics::MASK_TX_DS),
        )
    }

    pub const fn max_rt(&self) -> bool {
        (self.into_bits() & mnemonics::MASK_MAX_RT) == 0
    }

    pub fn with_max_rt(self, enable: bool) -> Self {
        Self::from_bits(
            self.into_bits() & !mnemonics::MASK_MAX_RT | ((!enable as u8) * mnemonics::MASK_MAX_RT),
        )
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 5)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 15)]
    pub arc: u8,
}

impl SetupRetry {
    pub const ARD_MASK: u8 = 0xF0;
    pub const ARC_MASK: u8 = 0x0F;
}

/// The `OBSERVE_TX` register. Read only.
#[bitfield(u8, order = Msb)]
pub(crate) struct ObserveTx {
    /// Lost packets since `RF_CH` was last written.
    #[bits(4)]
    pub plos_cnt: u8,

    /// Retransmissions used by the last payload.
    #[bits(4)]
    pub arc_cnt: u8,
}

/// The `RF_SETUP` register.
#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    #[bits(1, access = None)]
    rf_dr_low: bool,

    pub pll_lock: bool,

    #[bits(1, access = None)]
    rf_dr_high: bool,

    #[bits(2, access = None, default = 3)]
    rf_pwr: u8,

    /// Only honored by non-plus variants and clones.
    #[bits(1, default = true)]
    pub lna_enable: bool,
}

impl RfSetup {
    pub const LNA_MASK: u8 = 1;

    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits())
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !DataRate::MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !PaLevel::MASK;
        Self::from_bits(new_val | level.into_bits())
    }
}

/// The `FEATURE` register.
///
/// `EN_DPL` defaults on and is never cleared: every pipe uses dynamic
/// payload lengths.
#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    #[bits(5)]
    _reserved: u8,

    #[bits(1, default = true)]
    pub dynamic_payloads: bool,

    pub ack_payloads: bool,

    pub ask_no_ack: bool,
}

impl Feature {
    pub const ACK_PAYLOADS_MASK: u8 = 1 << Self::ACK_PAYLOADS_OFFSET;
    pub const ASK_NO_ACK_MASK: u8 = 1 << Self::ASK_NO_ACK_OFFSET;
}

/// The `FIFO_STATUS` register. Read only.
#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _reserved_hi: u8,

    pub tx_reuse: bool,

    pub tx_full: bool,

    pub tx_empty: bool,

    #[bits(2)]
    _reserved_lo: u8,

    pub rx_full: bool,

    pub rx_empty: bool,
}
