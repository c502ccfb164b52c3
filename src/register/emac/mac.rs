//! MAC Register Definitions
//!
//! MAC configuration, frame filtering, MDIO, flow control, power management
//! and the eight address filter slots. Offsets are relative to
//! [`DR_REG_EMAC_BASE`](crate::soc::DR_REG_EMAC_BASE), so the block starts at
//! 0x1000.

use crate::error::{FieldError, Result};
use crate::register::{reg_bit_check_set, reg_bit_ops, reg_ro, reg_rw, register_block};
use crate::soc::RegisterBus;
use crate::soc::field::{Access::*, Field, reset_value};
#[cfg(feature = "esp32")]
use crate::soc::{DR_REG_EMAC_BASE, Mmio};

/// Number of address slots, including the station address in slot 0
pub const ADDRESS_SLOTS: usize = 8;

/// Offset of the high half of address slot `slot` (0..=7).
pub const fn addr_high_offset(slot: usize) -> Option<usize> {
    if slot == 0 {
        return Some(addr0_high::OFFSET);
    }
    addr_high::offset(slot)
}

/// Offset of the low half of address slot `slot` (0..=7).
pub const fn addr_low_offset(slot: usize) -> Option<usize> {
    if slot == 0 {
        return Some(addr0_low::OFFSET);
    }
    addr_low::offset(slot)
}

// =============================================================================
// Register Map
// =============================================================================

/// MAC configuration
pub mod config {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1000;

    /// Source address insertion or replacement on transmit
    pub const SA_INSERT_CTRL: Field = Field::new("SA_INSERT_CTRL", 28, 3, ReadWrite, 0);
    /// Accept frames up to 2000 bytes
    pub const ACCEPT_2K: Field = Field::bit("ACCEPT_2K", 27, ReadWrite, 0);
    /// Disable the receive watchdog
    pub const WATCHDOG_DISABLE: Field = Field::bit("WATCHDOG_DISABLE", 23, ReadWrite, 0);
    /// Disable the transmit jabber timer
    pub const JABBER_DISABLE: Field = Field::bit("JABBER_DISABLE", 22, ReadWrite, 0);
    /// Accept jumbo frames
    pub const JUMBO_FRAME: Field = Field::bit("JUMBO_FRAME", 20, ReadWrite, 0);
    /// Minimum gap between frames, `96 - 8 * n` bit times
    pub const INTER_FRAME_GAP: Field = Field::new("INTER_FRAME_GAP", 17, 3, ReadWrite, 0);
    /// Ignore carrier sense while transmitting
    pub const DISABLE_CRS: Field = Field::bit("DISABLE_CRS", 16, ReadWrite, 0);
    /// Port select, set for 10/100 operation
    pub const PORT_SELECT: Field = Field::bit("PORT_SELECT", 15, ReadWrite, 0);
    /// 100 Mbit/s when set, 10 Mbit/s when clear
    pub const SPEED_100: Field = Field::bit("SPEED_100", 14, ReadWrite, 0);
    /// Do not receive own frames in half duplex
    pub const RX_OWN_DISABLE: Field = Field::bit("RX_OWN_DISABLE", 13, ReadWrite, 0);
    /// MII loopback
    pub const LOOPBACK: Field = Field::bit("LOOPBACK", 12, ReadWrite, 0);
    /// Full duplex
    pub const DUPLEX: Field = Field::bit("DUPLEX", 11, ReadWrite, 0);
    /// Receive checksum offload
    pub const CHECKSUM_OFFLOAD: Field = Field::bit("CHECKSUM_OFFLOAD", 10, ReadWrite, 0);
    /// Attempt one transmission only after a collision
    pub const RETRY_DISABLE: Field = Field::bit("RETRY_DISABLE", 9, ReadWrite, 0);
    /// Strip pad and FCS from short frames
    pub const PAD_CRC_STRIP: Field = Field::bit("PAD_CRC_STRIP", 7, ReadWrite, 0);
    /// Back-off limit
    pub const BACKOFF_LIMIT: Field = Field::new("BACKOFF_LIMIT", 5, 2, ReadWrite, 0);
    /// Abort after excessive deferral
    pub const DEFERRAL_CHECK: Field = Field::bit("DEFERRAL_CHECK", 4, ReadWrite, 0);
    /// Transmitter enable
    pub const TX_ENABLE: Field = Field::bit("TX_ENABLE", 3, ReadWrite, 0);
    /// Receiver enable
    pub const RX_ENABLE: Field = Field::bit("RX_ENABLE", 2, ReadWrite, 0);
    /// Transmit preamble length, 7, 5 or 3 bytes
    pub const PREAMBLE_LEN: Field = Field::new("PREAMBLE_LEN", 0, 2, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        SA_INSERT_CTRL, ACCEPT_2K, WATCHDOG_DISABLE, JABBER_DISABLE, JUMBO_FRAME, INTER_FRAME_GAP,
        DISABLE_CRS, PORT_SELECT, SPEED_100, RX_OWN_DISABLE, LOOPBACK, DUPLEX, CHECKSUM_OFFLOAD,
        RETRY_DISABLE, PAD_CRC_STRIP, BACKOFF_LIMIT, DEFERRAL_CHECK, TX_ENABLE, RX_ENABLE,
        PREAMBLE_LEN,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// MAC frame filter
pub mod frame_filter {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1004;

    /// Pass every frame regardless of filter result
    pub const RECEIVE_ALL: Field = Field::bit("RECEIVE_ALL", 31, ReadWrite, 0);
    /// Drop frames failing the source address filter
    pub const SA_FILTER: Field = Field::bit("SA_FILTER", 9, ReadWrite, 0);
    /// Invert the source address filter
    pub const SA_INVERSE: Field = Field::bit("SA_INVERSE", 8, ReadWrite, 0);
    /// Control frame forwarding
    pub const PASS_CONTROL: Field = Field::new("PASS_CONTROL", 6, 2, ReadWrite, 0);
    /// Drop broadcast frames
    pub const DISABLE_BROADCAST: Field = Field::bit("DISABLE_BROADCAST", 5, ReadWrite, 0);
    /// Pass all multicast frames
    pub const PASS_ALL_MULTICAST: Field = Field::bit("PASS_ALL_MULTICAST", 4, ReadWrite, 0);
    /// Invert the destination address filter
    pub const DA_INVERSE: Field = Field::bit("DA_INVERSE", 3, ReadWrite, 0);
    /// Promiscuous mode
    pub const PROMISCUOUS: Field = Field::bit("PROMISCUOUS", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        RECEIVE_ALL, SA_FILTER, SA_INVERSE, PASS_CONTROL, DISABLE_BROADCAST, PASS_ALL_MULTICAST,
        DA_INVERSE, PROMISCUOUS,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// MII (MDIO) address
pub mod mii_addr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1010;

    /// PHY address
    pub const PHY_ADDR: Field = Field::new("PHY_ADDR", 11, 5, ReadWrite, 0);
    /// PHY register
    pub const REG: Field = Field::new("REG", 6, 5, ReadWrite, 0);
    /// MDC clock range
    pub const CSR_CLOCK: Field = Field::new("CSR_CLOCK", 2, 4, ReadWrite, 0);
    /// Write when set, read when clear
    pub const WRITE: Field = Field::bit("WRITE", 1, ReadWrite, 0);
    /// Transaction in progress, clears itself when done
    pub const BUSY: Field = Field::bit("BUSY", 0, SetSelfClear, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PHY_ADDR, REG, CSR_CLOCK, WRITE, BUSY];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// MII (MDIO) data
pub mod mii_data {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1014;

    /// Data to write or data read
    pub const DATA: Field = Field::new("DATA", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATA];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Flow control
pub mod flow_control {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1018;

    /// Pause time in slot times sent in PAUSE frames
    pub const PAUSE_TIME: Field = Field::new("PAUSE_TIME", 16, 16, ReadWrite, 0);
    /// Do not send zero-quanta PAUSE frames
    pub const ZERO_QUANTA_DISABLE: Field = Field::bit("ZERO_QUANTA_DISABLE", 7, ReadWrite, 0);
    /// When to resend a PAUSE frame before the timer expires
    pub const PAUSE_LOW_THRESHOLD: Field = Field::new("PAUSE_LOW_THRESHOLD", 4, 2, ReadWrite, 0);
    /// Also detect PAUSE frames sent to the station address
    pub const UNICAST_PAUSE_DETECT: Field = Field::bit("UNICAST_PAUSE_DETECT", 3, ReadWrite, 0);
    /// Honour received PAUSE frames
    pub const RX_FLOW_CONTROL: Field = Field::bit("RX_FLOW_CONTROL", 2, ReadWrite, 0);
    /// Send PAUSE frames
    pub const TX_FLOW_CONTROL: Field = Field::bit("TX_FLOW_CONTROL", 1, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        PAUSE_TIME, ZERO_QUANTA_DISABLE, PAUSE_LOW_THRESHOLD, UNICAST_PAUSE_DETECT, RX_FLOW_CONTROL,
        TX_FLOW_CONTROL,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Debug status
pub mod debug {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1024;

    /// Transmit status FIFO full
    pub const TX_STATUS_FIFO_FULL: Field = Field::bit("TX_STATUS_FIFO_FULL", 25, ReadOnly, 0);
    /// Transmit FIFO not empty
    pub const TX_FIFO_NOT_EMPTY: Field = Field::bit("TX_FIFO_NOT_EMPTY", 24, ReadOnly, 0);
    /// Transmit FIFO write controller active
    pub const TX_FIFO_WRITE_ACTIVE: Field = Field::bit("TX_FIFO_WRITE_ACTIVE", 22, ReadOnly, 0);
    /// Transmit FIFO read controller state
    pub const TX_FIFO_READ_STATE: Field = Field::new("TX_FIFO_READ_STATE", 20, 2, ReadOnly, 0);
    /// Transmitter paused
    pub const TX_PAUSED: Field = Field::bit("TX_PAUSED", 19, ReadOnly, 0);
    /// Transmit frame controller state
    pub const TX_FRAME_CTRL_STATE: Field = Field::new("TX_FRAME_CTRL_STATE", 17, 2, ReadOnly, 0);
    /// Transmit protocol engine active
    pub const TX_ENGINE_ACTIVE: Field = Field::bit("TX_ENGINE_ACTIVE", 16, ReadOnly, 0);
    /// Receive FIFO fill level
    pub const RX_FIFO_LEVEL: Field = Field::new("RX_FIFO_LEVEL", 8, 2, ReadOnly, 0);
    /// Receive FIFO read controller state
    pub const RX_FIFO_READ_STATE: Field = Field::new("RX_FIFO_READ_STATE", 5, 2, ReadOnly, 0);
    /// Receive FIFO write controller active
    pub const RX_FIFO_WRITE_ACTIVE: Field = Field::bit("RX_FIFO_WRITE_ACTIVE", 4, ReadOnly, 0);
    /// Receive frame FIFO controller state
    pub const RX_FRAME_FIFO_STATE: Field = Field::new("RX_FRAME_FIFO_STATE", 1, 2, ReadOnly, 0);
    /// Receive protocol engine active
    pub const RX_ENGINE_ACTIVE: Field = Field::bit("RX_ENGINE_ACTIVE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TX_STATUS_FIFO_FULL, TX_FIFO_NOT_EMPTY, TX_FIFO_WRITE_ACTIVE, TX_FIFO_READ_STATE, TX_PAUSED,
        TX_FRAME_CTRL_STATE, TX_ENGINE_ACTIVE, RX_FIFO_LEVEL, RX_FIFO_READ_STATE,
        RX_FIFO_WRITE_ACTIVE, RX_FRAME_FIFO_STATE, RX_ENGINE_ACTIVE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Remote wake-up frame filter
pub mod wakeup_filter {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1028;

    /// Next word of the wake-up frame filter
    pub const FILTER: Field = Field::new("FILTER", 0, 32, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FILTER];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Power management control and status
pub mod pmt_csr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x102C;

    /// Reset the wake-up filter pointer
    pub const FILTER_RESET: Field = Field::bit("FILTER_RESET", 31, SetSelfClear, 0);
    /// Wake-up filter pointer
    pub const FILTER_PTR: Field = Field::new("FILTER_PTR", 24, 5, ReadOnly, 0);
    /// Any unicast frame is a wake-up frame
    pub const GLOBAL_UNICAST: Field = Field::bit("GLOBAL_UNICAST", 9, ReadWrite, 0);
    /// Wake-up frame received
    pub const WAKEUP_RECEIVED: Field = Field::bit("WAKEUP_RECEIVED", 6, ReadToClear, 0);
    /// Magic packet received
    pub const MAGIC_RECEIVED: Field = Field::bit("MAGIC_RECEIVED", 5, ReadToClear, 0);
    /// Wake up on wake-up frames
    pub const WAKEUP_ENABLE: Field = Field::bit("WAKEUP_ENABLE", 2, ReadWrite, 0);
    /// Wake up on magic packets
    pub const MAGIC_ENABLE: Field = Field::bit("MAGIC_ENABLE", 1, ReadWrite, 0);
    /// Enter power down until a wake-up event
    pub const POWER_DOWN: Field = Field::bit("POWER_DOWN", 0, SetSelfClear, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        FILTER_RESET, FILTER_PTR, GLOBAL_UNICAST, WAKEUP_RECEIVED, MAGIC_RECEIVED, WAKEUP_ENABLE,
        MAGIC_ENABLE, POWER_DOWN,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Low power idle control and status
pub mod lpi_csr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1030;

    /// Enter LPI only once the transmit path is idle
    pub const LPI_TX_AUTOMATE: Field = Field::bit("LPI_TX_AUTOMATE", 19, ReadWrite, 0);
    /// PHY link status as seen by the LPI logic
    pub const PHY_LINK_STATUS: Field = Field::bit("PHY_LINK_STATUS", 17, ReadWrite, 0);
    /// Enter LPI state
    pub const LPI_ENABLE: Field = Field::bit("LPI_ENABLE", 16, ReadWriteSelfClear, 0);
    /// Receiver in LPI state
    pub const RX_LPI_STATE: Field = Field::bit("RX_LPI_STATE", 9, ReadWrite, 0);
    /// Transmitter in LPI state
    pub const TX_LPI_STATE: Field = Field::bit("TX_LPI_STATE", 8, ReadWrite, 0);
    /// Receiver left LPI state
    pub const RX_LPI_EXIT: Field = Field::bit("RX_LPI_EXIT", 3, ReadToClear, 0);
    /// Receiver entered LPI state
    pub const RX_LPI_ENTRY: Field = Field::bit("RX_LPI_ENTRY", 2, ReadToClear, 0);
    /// Transmitter left LPI state
    pub const TX_LPI_EXIT: Field = Field::bit("TX_LPI_EXIT", 1, ReadToClear, 0);
    /// Transmitter entered LPI state
    pub const TX_LPI_ENTRY: Field = Field::bit("TX_LPI_ENTRY", 0, ReadToClear, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        LPI_TX_AUTOMATE, PHY_LINK_STATUS, LPI_ENABLE, RX_LPI_STATE, TX_LPI_STATE, RX_LPI_EXIT,
        RX_LPI_ENTRY, TX_LPI_EXIT, TX_LPI_ENTRY,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Low power idle timers
pub mod lpi_timers {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1034;

    /// Link status timer in milliseconds
    pub const LS_TIMER: Field = Field::new("LS_TIMER", 16, 10, ReadWrite, 0x3E8);
    /// Wake timer in microseconds
    pub const TW_TIMER: Field = Field::new("TW_TIMER", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[LS_TIMER, TW_TIMER];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt status
pub mod int_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1038;

    /// LPI interrupt
    pub const LPI: Field = Field::bit("LPI", 10, ReadOnly, 0);
    /// Power management interrupt
    pub const PMT: Field = Field::bit("PMT", 3, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[LPI, PMT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt mask
pub mod int_mask {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x103C;

    /// Mask the LPI interrupt
    pub const LPI: Field = Field::bit("LPI", 10, ReadWrite, 0);
    /// Mask the power management interrupt
    pub const PMT: Field = Field::bit("PMT", 3, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[LPI, PMT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Station address, high half
pub mod addr0_high {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1040;

    /// Slot 0 is always in use
    pub const ADDRESS_ENABLE: Field = Field::bit("ADDRESS_ENABLE", 31, ReadOnly, 0);
    /// Address bytes 5 and 4
    pub const ADDRESS_HI: Field = Field::new("ADDRESS_HI", 0, 16, ReadWrite, 0xFFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDRESS_ENABLE, ADDRESS_HI];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Station address, low half
pub mod addr0_low {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1044;

    /// Address bytes 3 to 0
    pub const ADDRESS_LO: Field = Field::new("ADDRESS_LO", 0, 32, ReadWrite, 0xFFFF_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDRESS_LO];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Perfect filter address, high half
///
/// Slots 1 to 7 share this layout.
pub mod addr_high {
    use super::*;

    /// Use this slot for filtering
    pub const ADDRESS_ENABLE: Field = Field::bit("ADDRESS_ENABLE", 31, ReadWrite, 0);
    /// Compare against the source address instead of the destination
    pub const SOURCE_ADDRESS: Field = Field::bit("SOURCE_ADDRESS", 30, ReadWrite, 0);
    /// Address bytes excluded from the comparison, bit 0 is byte 0
    pub const MASK_BYTE_CONTROL: Field = Field::new("MASK_BYTE_CONTROL", 24, 6, ReadWrite, 0);
    /// Address bytes 5 and 4
    pub const ADDRESS_HI: Field = Field::new("ADDRESS_HI", 0, 16, ReadWrite, 0xFFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDRESS_ENABLE, SOURCE_ADDRESS, MASK_BYTE_CONTROL, ADDRESS_HI];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);

    /// Offset of filter slot `slot` (1..=7).
    pub const fn offset(slot: usize) -> Option<usize> {
        if slot == 0 || slot >= ADDRESS_SLOTS {
            return None;
        }
        Some(0x1048 + 8 * (slot - 1))
    }
}

/// Perfect filter address, low half
///
/// Slots 1 to 7 share this layout.
pub mod addr_low {
    use super::*;

    /// Address bytes 3 to 0
    pub const ADDRESS_LO: Field = Field::new("ADDRESS_LO", 0, 32, ReadWrite, 0xFFFF_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDRESS_LO];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);

    /// Offset of filter slot `slot` (1..=7).
    pub const fn offset(slot: usize) -> Option<usize> {
        if slot == 0 || slot >= ADDRESS_SLOTS {
            return None;
        }
        Some(0x104C + 8 * (slot - 1))
    }
}

/// SMII/RGMII core status
pub mod core_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x10D8;

    /// Jabber timeout seen on the link
    pub const JABBER_TIMEOUT: Field = Field::bit("JABBER_TIMEOUT", 4, ReadOnly, 0);
    /// Receive clock speed reported by the PHY
    pub const LINK_SPEED: Field = Field::new("LINK_SPEED", 1, 2, ReadOnly, 0);
    /// Full duplex reported by the PHY
    pub const LINK_MODE: Field = Field::bit("LINK_MODE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[JABBER_TIMEOUT, LINK_SPEED, LINK_MODE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Receive watchdog timeout
pub mod watchdog_timeout {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x10DC;

    /// Use `TIMEOUT` instead of the default 2048 bytes
    pub const PROGRAMMABLE: Field = Field::bit("PROGRAMMABLE", 16, ReadWrite, 0);
    /// Receive watchdog limit in bytes
    pub const TIMEOUT: Field = Field::new("TIMEOUT", 0, 14, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PROGRAMMABLE, TIMEOUT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// EMAC MAC register block
    MacRegs
}

#[cfg(feature = "esp32")]
impl MacRegs<Mmio> {
    /// MAC registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not create a second handle to the
    /// same block while this one is in use.
    pub const unsafe fn steal() -> Self {
        Self::new(unsafe { Mmio::new() }, DR_REG_EMAC_BASE)
    }
}

impl<B: RegisterBus> MacRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(config, set_config, config::OFFSET, "MAC Configuration register");
    reg_rw!(frame_filter, set_frame_filter, frame_filter::OFFSET, "Frame Filter register");
    reg_rw!(mii_address, set_mii_address, mii_addr::OFFSET, "MII Address register");
    reg_rw!(mii_data, set_mii_data, mii_data::OFFSET, "MII Data register");
    reg_rw!(flow_control, set_flow_control, flow_control::OFFSET, "Flow Control register");
    reg_rw!(wakeup_filter, set_wakeup_filter, wakeup_filter::OFFSET, "Wake-up Frame Filter register");
    reg_rw!(pmt_csr, set_pmt_csr, pmt_csr::OFFSET, "PMT Control and Status register");
    reg_rw!(lpi_csr, set_lpi_csr, lpi_csr::OFFSET, "LPI Control and Status register");
    reg_rw!(lpi_timers, set_lpi_timers, lpi_timers::OFFSET, "LPI Timers Control register");
    reg_rw!(interrupt_mask, set_interrupt_mask, int_mask::OFFSET, "Interrupt Mask register");
    reg_rw!(addr0_high, set_addr0_high, addr0_high::OFFSET, "station address high register");
    reg_rw!(addr0_low, set_addr0_low, addr0_low::OFFSET, "station address low register");
    reg_rw!(watchdog_timeout, set_watchdog_timeout, watchdog_timeout::OFFSET, "Watchdog Timeout register");

    reg_ro!(debug, debug::OFFSET, "Debug register");
    reg_ro!(interrupt_status, int_status::OFFSET, "Interrupt Status register");
    reg_ro!(core_status, core_status::OFFSET, "Core Status register");

    // -------------------------------------------------------------------------
    // Bit operations (generated by macros)
    // -------------------------------------------------------------------------

    reg_bit_ops!(enable_tx, disable_tx, config::OFFSET, config::TX_ENABLE.mask(),
                 "MAC transmitter", "Enable", "Disable");
    reg_bit_ops!(enable_rx, disable_rx, config::OFFSET, config::RX_ENABLE.mask(),
                 "MAC receiver", "Enable", "Disable");
    reg_bit_ops!(enable_promiscuous, disable_promiscuous, frame_filter::OFFSET,
                 frame_filter::PROMISCUOUS.mask(), "promiscuous mode", "Enable", "Disable");

    reg_bit_check_set!(is_mii_busy, mii_addr::OFFSET, mii_addr::BUSY.mask(),
                       "Check if an MDIO transaction is in progress");

    // -------------------------------------------------------------------------
    // Address slots
    // -------------------------------------------------------------------------

    /// Read the high half of address slot `slot` (0..=7)
    pub fn addr_high(&mut self, slot: usize) -> Result<u32> {
        let offset = addr_high_offset(slot).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        Ok(self.bus.read(addr))
    }

    /// Read the low half of address slot `slot` (0..=7)
    pub fn addr_low(&mut self, slot: usize) -> Result<u32> {
        let offset = addr_low_offset(slot).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        Ok(self.bus.read(addr))
    }

    /// Write both halves of address slot `slot` (0..=7).
    ///
    /// The high half goes first: the MAC latches the pair when the low half
    /// is written.
    pub fn set_addr(&mut self, slot: usize, high: u32, low: u32) -> Result<()> {
        let high_offset = addr_high_offset(slot).ok_or(FieldError::InvalidSlot)?;
        let low_offset = addr_low_offset(slot).ok_or(FieldError::InvalidSlot)?;
        let high_addr = self.addr(high_offset);
        let low_addr = self.addr(low_offset);
        self.bus.write(high_addr, high);
        self.bus.write(low_addr, low);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::Error;
    use crate::soc::field::fields_disjoint;
    use crate::testing::MockRegisterBus;

    const BASE: usize = 0x3FF6_9000;

    #[test]
    fn register_offsets() {
        assert_eq!(config::OFFSET, 0x1000);
        assert_eq!(frame_filter::OFFSET, 0x1004);
        assert_eq!(mii_addr::OFFSET, 0x1010);
        assert_eq!(mii_data::OFFSET, 0x1014);
        assert_eq!(flow_control::OFFSET, 0x1018);
        assert_eq!(debug::OFFSET, 0x1024);
        assert_eq!(wakeup_filter::OFFSET, 0x1028);
        assert_eq!(pmt_csr::OFFSET, 0x102C);
        assert_eq!(lpi_csr::OFFSET, 0x1030);
        assert_eq!(lpi_timers::OFFSET, 0x1034);
        assert_eq!(int_status::OFFSET, 0x1038);
        assert_eq!(int_mask::OFFSET, 0x103C);
        assert_eq!(addr0_high::OFFSET, 0x1040);
        assert_eq!(addr0_low::OFFSET, 0x1044);
        assert_eq!(core_status::OFFSET, 0x10D8);
        assert_eq!(watchdog_timeout::OFFSET, 0x10DC);
    }

    #[test]
    fn address_slot_offsets() {
        assert_eq!(addr_high_offset(0), Some(0x1040));
        assert_eq!(addr_low_offset(0), Some(0x1044));
        assert_eq!(addr_high_offset(1), Some(0x1048));
        assert_eq!(addr_low_offset(1), Some(0x104C));
        assert_eq!(addr_high_offset(4), Some(0x1060));
        assert_eq!(addr_high_offset(7), Some(0x1078));
        assert_eq!(addr_low_offset(7), Some(0x107C));
        assert_eq!(addr_high_offset(8), None);
        assert_eq!(addr_high::offset(0), None);
        assert_eq!(addr_low::offset(0), None);
    }

    #[test]
    fn config_layout() {
        assert_eq!(config::PREAMBLE_LEN.mask(), 0x0000_0003);
        assert_eq!(config::RX_ENABLE.mask(), 1 << 2);
        assert_eq!(config::TX_ENABLE.mask(), 1 << 3);
        assert_eq!(config::BACKOFF_LIMIT.mask(), 0x0000_0060);
        assert_eq!(config::DUPLEX.mask(), 1 << 11);
        assert_eq!(config::SPEED_100.mask(), 1 << 14);
        assert_eq!(config::PORT_SELECT.mask(), 1 << 15);
        assert_eq!(config::INTER_FRAME_GAP.mask(), 0x000E_0000);
        assert_eq!(config::INTER_FRAME_GAP.max(), 0x7);
        assert_eq!(config::SA_INSERT_CTRL.mask(), 0x7000_0000);
        assert_eq!(config::RESET, 0);
    }

    #[test]
    fn mii_layout() {
        assert_eq!(mii_addr::BUSY.mask(), 0x0001);
        assert_eq!(mii_addr::WRITE.mask(), 0x0002);
        assert_eq!(mii_addr::CSR_CLOCK.mask(), 0x003C);
        assert_eq!(mii_addr::CSR_CLOCK.max(), 0xF);
        assert_eq!(mii_addr::REG.mask(), 0x07C0);
        assert_eq!(mii_addr::PHY_ADDR.mask(), 0xF800);
        assert_eq!(mii_addr::PHY_ADDR.max(), 0x1F);
        assert!(mii_addr::BUSY.access().is_self_clearing());
        assert_eq!(mii_data::DATA.mask(), 0xFFFF);
    }

    #[test]
    fn misc_layouts() {
        assert_eq!(frame_filter::PASS_CONTROL.mask(), 0x0000_00C0);
        assert_eq!(frame_filter::RECEIVE_ALL.mask(), 1 << 31);
        assert_eq!(flow_control::PAUSE_TIME.mask(), 0xFFFF_0000);
        assert_eq!(flow_control::PAUSE_LOW_THRESHOLD.mask(), 0x0000_0030);
        assert_eq!(pmt_csr::FILTER_PTR.mask(), 0x1F00_0000);
        assert_eq!(pmt_csr::FILTER_RESET.mask(), 1 << 31);
        assert_eq!(lpi_timers::LS_TIMER.mask(), 0x03FF_0000);
        assert_eq!(lpi_timers::RESET, 0x03E8_0000);
        assert_eq!(core_status::LINK_SPEED.mask(), 0x6);
        assert_eq!(core_status::LINK_SPEED.max(), 0x3);
        assert_eq!(watchdog_timeout::TIMEOUT.mask(), 0x3FFF);
        assert_eq!(int_mask::LPI.mask(), int_status::LPI.mask());
        assert_eq!(int_mask::PMT.mask(), int_status::PMT.mask());
    }

    #[test]
    fn address_reset_values() {
        assert_eq!(addr0_high::RESET, 0x0000_FFFF);
        assert_eq!(addr0_low::RESET, 0xFFFF_FFFF);
        assert_eq!(addr_high::RESET, 0x0000_FFFF);
        assert_eq!(addr_low::RESET, 0xFFFF_FFFF);
        assert_eq!(addr_high::MASK_BYTE_CONTROL.mask(), 0x3F00_0000);
        assert!(!addr0_high::ADDRESS_ENABLE.access().is_writable());
        assert!(addr_high::ADDRESS_ENABLE.access().is_writable());
    }

    #[test]
    fn fields_never_overlap() {
        let maps: &[&[Field]] = &[
            config::FIELDS,
            frame_filter::FIELDS,
            mii_addr::FIELDS,
            flow_control::FIELDS,
            debug::FIELDS,
            pmt_csr::FIELDS,
            lpi_csr::FIELDS,
            addr_high::FIELDS,
        ];
        for fields in maps {
            assert!(fields_disjoint(fields));
        }
    }

    #[test]
    fn set_addr_writes_high_then_low() {
        let mut mac = MacRegs::new(MockRegisterBus::new(), BASE);
        mac.set_addr(3, 0x8000_2211, 0x6655_4433).unwrap();
        assert_eq!(mac.addr_high(3), Ok(0x8000_2211));

        let bus = mac.free();
        assert_eq!(
            bus.writes(),
            std::vec![(BASE + 0x1058, 0x8000_2211), (BASE + 0x105C, 0x6655_4433)]
        );
    }

    #[test]
    fn address_slot_out_of_range() {
        let mut mac = MacRegs::new(MockRegisterBus::new(), BASE);
        assert_eq!(mac.addr_low(8), Err(Error::Field(FieldError::InvalidSlot)));
        assert_eq!(
            mac.set_addr(9, 0, 0),
            Err(Error::Field(FieldError::InvalidSlot))
        );
        assert!(mac.free().writes().is_empty());
    }

    #[test]
    fn bit_ops_and_mii_busy() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x1010, 0x0000_0001);
        let mut mac = MacRegs::new(bus, BASE);

        assert!(mac.is_mii_busy());
        mac.enable_tx();
        mac.enable_rx();
        assert_eq!(mac.config(), 0x0000_000C);
        mac.disable_rx();
        assert_eq!(mac.config(), 0x0000_0008);
        mac.enable_promiscuous();
        assert_eq!(mac.frame_filter(), 0x0000_0001);
    }
}
