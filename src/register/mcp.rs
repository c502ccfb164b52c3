//! MCP (memory copy DMA) Register Definitions
//!
//! The copy engine moves data between two descriptor chains. It has no
//! fixed address on the ESP32, so [`McpRegs`] is always built from an
//! explicit base.
//!
//! Link registers take only the low 20 bits of a descriptor address; the
//! upper bits are implied by the internal DMA-capable RAM window.

use embedded_hal::delay::DelayNs;

use crate::error::{FieldError, Result};
use crate::register::{reg_ro, reg_rw, reg_wo, register_block};
use crate::soc::field::{Access::*, Field, fields_mask, reset_value};
use crate::soc::memory::is_dma_capable;
use crate::soc::{RegisterBus, wait_bits_set};

/// Raw interrupt status
pub mod int_raw {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x000;

    /// CRC calculation finished
    pub const CRC_DONE: Field = Field::bit("CRC_DONE", 8, ReadOnly, 0);
    /// Last outbound descriptor consumed
    pub const OUT_TOTAL_EOF: Field = Field::bit("OUT_TOTAL_EOF", 7, ReadOnly, 0);
    /// Inbound buffers exhausted
    pub const IN_DSCR_EMPTY: Field = Field::bit("IN_DSCR_EMPTY", 6, ReadOnly, 0);
    /// Outbound descriptor error
    pub const OUT_DSCR_ERR: Field = Field::bit("OUT_DSCR_ERR", 5, ReadOnly, 0);
    /// Inbound descriptor error
    pub const IN_DSCR_ERR: Field = Field::bit("IN_DSCR_ERR", 4, ReadOnly, 0);
    /// Outbound descriptor with EOF consumed
    pub const OUT_EOF: Field = Field::bit("OUT_EOF", 3, ReadOnly, 0);
    /// Outbound descriptor consumed
    pub const OUT_DONE: Field = Field::bit("OUT_DONE", 2, ReadOnly, 0);
    /// Inbound frame received
    pub const IN_SUC_EOF: Field = Field::bit("IN_SUC_EOF", 1, ReadOnly, 0);
    /// Inbound descriptor filled
    pub const IN_DONE: Field = Field::bit("IN_DONE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CRC_DONE, OUT_TOTAL_EOF, IN_DSCR_EMPTY, OUT_DSCR_ERR, IN_DSCR_ERR, OUT_EOF, OUT_DONE,
        IN_SUC_EOF, IN_DONE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Masked interrupt status
///
/// Bit positions match [`int_raw`](super::int_raw).
pub mod int_st {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x004;

    /// CRC calculation finished
    pub const CRC_DONE: Field = Field::bit("CRC_DONE", 8, ReadOnly, 0);
    /// Last outbound descriptor consumed
    pub const OUT_TOTAL_EOF: Field = Field::bit("OUT_TOTAL_EOF", 7, ReadOnly, 0);
    /// Inbound buffers exhausted
    pub const IN_DSCR_EMPTY: Field = Field::bit("IN_DSCR_EMPTY", 6, ReadOnly, 0);
    /// Outbound descriptor error
    pub const OUT_DSCR_ERR: Field = Field::bit("OUT_DSCR_ERR", 5, ReadOnly, 0);
    /// Inbound descriptor error
    pub const IN_DSCR_ERR: Field = Field::bit("IN_DSCR_ERR", 4, ReadOnly, 0);
    /// Outbound descriptor with EOF consumed
    pub const OUT_EOF: Field = Field::bit("OUT_EOF", 3, ReadOnly, 0);
    /// Outbound descriptor consumed
    pub const OUT_DONE: Field = Field::bit("OUT_DONE", 2, ReadOnly, 0);
    /// Inbound frame received
    pub const IN_SUC_EOF: Field = Field::bit("IN_SUC_EOF", 1, ReadOnly, 0);
    /// Inbound descriptor filled
    pub const IN_DONE: Field = Field::bit("IN_DONE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CRC_DONE, OUT_TOTAL_EOF, IN_DSCR_EMPTY, OUT_DSCR_ERR, IN_DSCR_ERR, OUT_EOF, OUT_DONE,
        IN_SUC_EOF, IN_DONE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt enable
///
/// Bit positions match [`int_raw`](super::int_raw).
pub mod int_ena {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x008;

    /// CRC calculation finished
    pub const CRC_DONE: Field = Field::bit("CRC_DONE", 8, ReadWrite, 0);
    /// Last outbound descriptor consumed
    pub const OUT_TOTAL_EOF: Field = Field::bit("OUT_TOTAL_EOF", 7, ReadWrite, 0);
    /// Inbound buffers exhausted
    pub const IN_DSCR_EMPTY: Field = Field::bit("IN_DSCR_EMPTY", 6, ReadWrite, 0);
    /// Outbound descriptor error
    pub const OUT_DSCR_ERR: Field = Field::bit("OUT_DSCR_ERR", 5, ReadWrite, 0);
    /// Inbound descriptor error
    pub const IN_DSCR_ERR: Field = Field::bit("IN_DSCR_ERR", 4, ReadWrite, 0);
    /// Outbound descriptor with EOF consumed
    pub const OUT_EOF: Field = Field::bit("OUT_EOF", 3, ReadWrite, 0);
    /// Outbound descriptor consumed
    pub const OUT_DONE: Field = Field::bit("OUT_DONE", 2, ReadWrite, 0);
    /// Inbound frame received
    pub const IN_SUC_EOF: Field = Field::bit("IN_SUC_EOF", 1, ReadWrite, 0);
    /// Inbound descriptor filled
    pub const IN_DONE: Field = Field::bit("IN_DONE", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CRC_DONE, OUT_TOTAL_EOF, IN_DSCR_EMPTY, OUT_DSCR_ERR, IN_DSCR_ERR, OUT_EOF, OUT_DONE,
        IN_SUC_EOF, IN_DONE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt clear (write 1)
///
/// Bit positions match [`int_raw`](super::int_raw).
pub mod int_clr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x00C;

    /// CRC calculation finished
    pub const CRC_DONE: Field = Field::bit("CRC_DONE", 8, WriteOnly, 0);
    /// Last outbound descriptor consumed
    pub const OUT_TOTAL_EOF: Field = Field::bit("OUT_TOTAL_EOF", 7, WriteOnly, 0);
    /// Inbound buffers exhausted
    pub const IN_DSCR_EMPTY: Field = Field::bit("IN_DSCR_EMPTY", 6, WriteOnly, 0);
    /// Outbound descriptor error
    pub const OUT_DSCR_ERR: Field = Field::bit("OUT_DSCR_ERR", 5, WriteOnly, 0);
    /// Inbound descriptor error
    pub const IN_DSCR_ERR: Field = Field::bit("IN_DSCR_ERR", 4, WriteOnly, 0);
    /// Outbound descriptor with EOF consumed
    pub const OUT_EOF: Field = Field::bit("OUT_EOF", 3, WriteOnly, 0);
    /// Outbound descriptor consumed
    pub const OUT_DONE: Field = Field::bit("OUT_DONE", 2, WriteOnly, 0);
    /// Inbound frame received
    pub const IN_SUC_EOF: Field = Field::bit("IN_SUC_EOF", 1, WriteOnly, 0);
    /// Inbound descriptor filled
    pub const IN_DONE: Field = Field::bit("IN_DONE", 0, WriteOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CRC_DONE, OUT_TOTAL_EOF, IN_DSCR_EMPTY, OUT_DSCR_ERR, IN_DSCR_ERR, OUT_EOF, OUT_DONE,
        IN_SUC_EOF, IN_DONE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Outbound descriptor link control
pub mod out_link {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x010;

    /// Link idle
    pub const PARK: Field = Field::bit("PARK", 31, ReadOnly, 1);
    /// Resume from the current descriptor
    pub const RESTART: Field = Field::bit("RESTART", 30, SetSelfClear, 0);
    /// Start at `ADDR`
    pub const START: Field = Field::bit("START", 29, SetSelfClear, 0);
    /// Stop after the current descriptor
    pub const STOP: Field = Field::bit("STOP", 28, SetSelfClear, 0);
    /// Low 20 bits of the first descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 20, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PARK, RESTART, START, STOP, ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Inbound descriptor link control
pub mod in_link {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x014;

    /// Link idle
    pub const PARK: Field = Field::bit("PARK", 31, ReadOnly, 1);
    /// Resume from the current descriptor
    pub const RESTART: Field = Field::bit("RESTART", 30, SetSelfClear, 0);
    /// Start at `ADDR`
    pub const START: Field = Field::bit("START", 29, SetSelfClear, 0);
    /// Stop after the current descriptor
    pub const STOP: Field = Field::bit("STOP", 28, SetSelfClear, 0);
    /// Low 20 bits of the first descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 20, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PARK, RESTART, START, STOP, ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Last outbound descriptor with EOF
pub mod out_eof_des_addr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x018;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Last inbound descriptor with EOF
pub mod in_eof_des_addr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x01C;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Outbound descriptor before the last EOF
pub mod out_eof_bfr_des_addr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x020;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current inbound descriptor
pub mod inlink_dscr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x024;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Next inbound descriptor
pub mod inlink_dscr_bf0 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x028;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Second next inbound descriptor
pub mod inlink_dscr_bf1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x02C;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current outbound descriptor
pub mod outlink_dscr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x030;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Next outbound descriptor
pub mod outlink_dscr_bf0 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x034;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Second next outbound descriptor
pub mod outlink_dscr_bf1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x038;

    /// Descriptor address
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Configuration
pub mod conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x03C;

    /// Force the register clock on
    pub const CLK_EN: Field = Field::bit("CLK_EN", 31, ReadWrite, 0);
    /// Bit-reverse the CRC result
    pub const CRC_OUT_REVERSE_EN: Field = Field::bit("CRC_OUT_REVERSE_EN", 11, ReadWrite, 0);
    /// Feed bytes to the CRC most significant first
    pub const CRC_BIG_ENDIAN_EN: Field = Field::bit("CRC_BIG_ENDIAN_EN", 10, ReadWrite, 0);
    /// Run the CRC over copied data
    pub const CRC_CAL_EN: Field = Field::bit("CRC_CAL_EN", 9, ReadWrite, 0);
    /// Reset the CRC state
    pub const CRC_CAL_RESET: Field = Field::bit("CRC_CAL_RESET", 8, ReadWrite, 0);
    /// Check the owner bit of descriptors
    pub const CHECK_OWNER: Field = Field::bit("CHECK_OWNER", 7, ReadWrite, 0);
    /// Write back outbound descriptors when consumed
    pub const OUT_AUTO_WRBACK: Field = Field::bit("OUT_AUTO_WRBACK", 6, ReadWrite, 0);
    /// Owner value written back to inbound descriptors
    pub const IN_OWNER: Field = Field::bit("IN_OWNER", 5, ReadWrite, 0);
    /// Owner value written back to outbound descriptors
    pub const OUT_OWNER: Field = Field::bit("OUT_OWNER", 4, ReadWrite, 0);
    /// Reset the FIFO
    pub const FIFO_RST: Field = Field::bit("FIFO_RST", 3, ReadWrite, 0);
    /// Reset the AHB command FIFO
    pub const CMDFIFO_RST: Field = Field::bit("CMDFIFO_RST", 2, ReadWrite, 0);
    /// Reset the outbound state machine
    pub const OUT_RST: Field = Field::bit("OUT_RST", 1, ReadWrite, 0);
    /// Reset the inbound state machine
    pub const IN_RST: Field = Field::bit("IN_RST", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CLK_EN, CRC_OUT_REVERSE_EN, CRC_BIG_ENDIAN_EN, CRC_CAL_EN, CRC_CAL_RESET, CHECK_OWNER,
        OUT_AUTO_WRBACK, IN_OWNER, OUT_OWNER, FIFO_RST, CMDFIFO_RST, OUT_RST, IN_RST,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Inbound state
pub mod in_st {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x040;

    /// FIFO empty
    pub const FIFO_EMPTY: Field = Field::bit("FIFO_EMPTY", 23, ReadOnly, 0);
    /// Transfer state
    pub const STATE: Field = Field::new("STATE", 20, 3, ReadOnly, 0);
    /// Descriptor fetch state
    pub const DSCR_STATE: Field = Field::new("DSCR_STATE", 18, 2, ReadOnly, 0);
    /// Low bits of the current descriptor address
    pub const DSCR_ADDR: Field = Field::new("DSCR_ADDR", 0, 18, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FIFO_EMPTY, STATE, DSCR_STATE, DSCR_ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Outbound state
pub mod out_st {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x044;

    /// FIFO full
    pub const FIFO_FULL: Field = Field::bit("FIFO_FULL", 23, ReadOnly, 0);
    /// Transfer state
    pub const STATE: Field = Field::new("STATE", 20, 3, ReadOnly, 0);
    /// Descriptor fetch state
    pub const DSCR_STATE: Field = Field::new("DSCR_STATE", 18, 2, ReadOnly, 0);
    /// Low bits of the current descriptor address
    pub const DSCR_ADDR: Field = Field::new("DSCR_ADDR", 0, 18, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FIFO_FULL, STATE, DSCR_STATE, DSCR_ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// CRC result
pub mod crc_out {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x048;

    /// CRC of the copied data
    pub const VALUE: Field = Field::new("VALUE", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[VALUE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Version
pub mod date {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x0FC;

    /// Block version
    pub const DATE: Field = Field::new("DATE", 0, 32, ReadWrite, 0x1808_2000);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Every interrupt bit, valid for all four interrupt registers
pub const INTERRUPT_MASK: u32 = fields_mask(int_raw::FIELDS);

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// MCP register block
    McpRegs
}

impl<B: RegisterBus> McpRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(conf, set_conf, conf::OFFSET, "Configuration register");
    reg_rw!(interrupt_enable, set_interrupt_enable, int_ena::OFFSET, "Interrupt Enable register");
    reg_rw!(out_link, set_out_link, out_link::OFFSET, "Outbound Link register");
    reg_rw!(in_link, set_in_link, in_link::OFFSET, "Inbound Link register");

    reg_ro!(raw_interrupts, int_raw::OFFSET, "Raw Interrupt Status register");
    reg_ro!(interrupt_status, int_st::OFFSET, "Interrupt Status register");
    reg_ro!(out_eof_descriptor, out_eof_des_addr::OFFSET, "Outbound EOF Descriptor register");
    reg_ro!(in_eof_descriptor, in_eof_des_addr::OFFSET, "Inbound EOF Descriptor register");
    reg_ro!(out_eof_prev_descriptor, out_eof_bfr_des_addr::OFFSET,
            "Outbound Pre-EOF Descriptor register");
    reg_ro!(in_descriptor, inlink_dscr::OFFSET, "Current Inbound Descriptor register");
    reg_ro!(out_descriptor, outlink_dscr::OFFSET, "Current Outbound Descriptor register");
    reg_ro!(in_state, in_st::OFFSET, "Inbound State register");
    reg_ro!(out_state, out_st::OFFSET, "Outbound State register");
    reg_ro!(crc_out, crc_out::OFFSET, "CRC Result register");
    reg_ro!(date, date::OFFSET, "Date register (version info)");

    reg_wo!(clear_interrupts, int_clr::OFFSET, "Interrupt Clear register");

    // -------------------------------------------------------------------------
    // Link control
    // -------------------------------------------------------------------------

    fn start_link(&mut self, offset: usize, descriptor: usize) -> Result<()> {
        if !is_dma_capable(descriptor) {
            return Err(FieldError::ValueOutOfRange.into());
        }
        let addr = self.addr(offset);
        self.bus
            .write_field_truncating(addr, out_link::ADDR, descriptor as u32);
        self.bus.set_bits(addr, out_link::START.mask());
        Ok(())
    }

    /// Point the outbound link at `descriptor` and start it.
    ///
    /// Fails when the descriptor is outside DMA-capable RAM.
    pub fn start_out_link(&mut self, descriptor: usize) -> Result<()> {
        self.start_link(out_link::OFFSET, descriptor)
    }

    /// Point the inbound link at `descriptor` and start it.
    pub fn start_in_link(&mut self, descriptor: usize) -> Result<()> {
        self.start_link(in_link::OFFSET, descriptor)
    }

    /// Stop both links after their current descriptors.
    pub fn stop_links(&mut self) {
        let out = self.addr(out_link::OFFSET);
        self.bus.set_bits(out, out_link::STOP.mask());
        let inb = self.addr(in_link::OFFSET);
        self.bus.set_bits(inb, in_link::STOP.mask());
    }

    /// Pulse the state machine and FIFO resets.
    pub fn reset(&mut self) {
        let mask = conf::IN_RST.mask() | conf::OUT_RST.mask() | conf::FIFO_RST.mask();
        let addr = self.addr(conf::OFFSET);
        self.bus.set_bits(addr, mask);
        self.bus.clear_bits(addr, mask);
    }

    /// Wait for the outbound link to park.
    pub fn wait_out_link_parked<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let addr = self.addr(out_link::OFFSET);
        wait_bits_set(&mut self.bus, addr, out_link::PARK.mask(), delay, timeout_us)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::{Error, IoError};
    use crate::soc::field::fields_disjoint;
    use crate::testing::{MockDelay, MockRegisterBus};

    const BASE: usize = 0x3FF4_6000;

    #[test]
    fn register_offsets() {
        assert_eq!(int_raw::OFFSET, 0x00);
        assert_eq!(int_clr::OFFSET, 0x0C);
        assert_eq!(out_link::OFFSET, 0x10);
        assert_eq!(in_link::OFFSET, 0x14);
        assert_eq!(out_eof_des_addr::OFFSET, 0x18);
        assert_eq!(outlink_dscr_bf1::OFFSET, 0x38);
        assert_eq!(conf::OFFSET, 0x3C);
        assert_eq!(in_st::OFFSET, 0x40);
        assert_eq!(out_st::OFFSET, 0x44);
        assert_eq!(crc_out::OFFSET, 0x48);
        assert_eq!(date::OFFSET, 0xFC);
    }

    #[test]
    fn reset_values() {
        assert_eq!(out_link::RESET, 0x8000_0000);
        assert_eq!(in_link::RESET, 0x8000_0000);
        assert_eq!(conf::RESET, 0);
        assert_eq!(date::RESET, 0x1808_2000);
    }

    #[test]
    fn layouts() {
        assert_eq!(INTERRUPT_MASK, 0x1FF);
        assert_eq!(int_ena::CRC_DONE.mask(), 1 << 8);
        assert_eq!(out_link::ADDR.mask(), 0x000F_FFFF);
        assert_eq!(in_st::STATE.mask(), 0x0070_0000);
        assert_eq!(in_st::DSCR_STATE.mask(), 0x000C_0000);
        assert_eq!(out_st::DSCR_ADDR.mask(), 0x0003_FFFF);
        for fields in [conf::FIELDS, in_st::FIELDS, out_st::FIELDS, out_link::FIELDS] {
            assert!(fields_disjoint(fields));
        }
        assert!(out_link::START.access().is_self_clearing());
    }

    #[test]
    fn start_out_link_writes_low_bits_then_starts() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x10, out_link::RESET);
        let mut mcp = McpRegs::new(bus, BASE);

        mcp.start_out_link(0x3FFB_1230).unwrap();
        let writes = mcp.free().writes_to(BASE + 0x10);
        assert_eq!(writes, std::vec![0x800B_1230, 0xA00B_1230]);
    }

    #[test]
    fn start_link_rejects_flash_descriptor() {
        let mut mcp = McpRegs::new(MockRegisterBus::new(), BASE);
        assert_eq!(
            mcp.start_in_link(0x3F40_0000),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
        assert!(mcp.free().writes().is_empty());
    }

    #[test]
    fn reset_pulses_bits() {
        let mut mcp = McpRegs::new(MockRegisterBus::new(), BASE);
        mcp.reset();
        assert_eq!(mcp.free().writes_to(BASE + 0x3C), std::vec![0b1011, 0]);
    }

    #[test]
    fn wait_parked() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x10, out_link::RESET);
        let mut mcp = McpRegs::new(bus, BASE);
        let mut delay = MockDelay::new();
        mcp.wait_out_link_parked(&mut delay, 100).unwrap();

        mcp.set_out_link(0);
        assert_eq!(
            mcp.wait_out_link_parked(&mut delay, 20),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
