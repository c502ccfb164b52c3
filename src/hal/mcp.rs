//! Typed memory-copy DMA values
//!
//! Link control words, interrupt flags, CRC options and the engine state
//! words of the MCP (memory copy) DMA block.

use crate::error::{DecodeError, DecodeResult, FieldError, FieldResult, Result};
use crate::register::mcp::{McpRegs, conf, in_st, int_raw, out_link, out_st};
use crate::soc::RegisterBus;

/// Upper address bits the links prepend to their 20-bit descriptor field
pub const LINK_ADDR_BASE: usize = 0x3FF0_0000;

/// Full address of a descriptor from a link `ADDR` field value.
pub const fn link_address(addr_field: u32) -> usize {
    LINK_ADDR_BASE | (addr_field & 0xF_FFFF) as usize
}

// =============================================================================
// Link Control
// =============================================================================

/// Command carried by an `out_link` or `in_link` write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// Only load the address
    #[default]
    None,
    /// Start from the loaded descriptor
    Start,
    /// Stop after the current descriptor
    Stop,
    /// Resume from the next descriptor
    Restart,
}

/// Decoded or to-be-written link register
///
/// Both links share one layout, so the `out_link` fields serve for either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkControl {
    /// Low 20 bits of the first descriptor address
    pub addr: u32,
    /// Command to issue
    pub command: LinkCommand,
    /// Link idle (read only)
    pub parked: bool,
}

impl LinkControl {
    /// Start the link at `descriptor`.
    ///
    /// Fails when `descriptor` does not lie in the window the 20-bit field
    /// can reach.
    pub const fn start(descriptor: usize) -> FieldResult<Self> {
        if descriptor & !0xF_FFFF != LINK_ADDR_BASE {
            return Err(FieldError::ValueOutOfRange);
        }
        Ok(Self {
            addr: (descriptor & 0xF_FFFF) as u32,
            command: LinkCommand::Start,
            parked: false,
        })
    }

    /// A bare command, keeping whatever address is loaded.
    pub const fn command(command: LinkCommand, addr: u32) -> Self {
        Self {
            addr,
            command,
            parked: false,
        }
    }

    /// Register value to write. The park bit is never written.
    pub const fn to_bits(&self) -> FieldResult<u32> {
        if self.addr > out_link::ADDR.max() {
            return Err(FieldError::ValueOutOfRange);
        }
        let command = match self.command {
            LinkCommand::None => 0,
            LinkCommand::Start => out_link::START.mask(),
            LinkCommand::Stop => out_link::STOP.mask(),
            LinkCommand::Restart => out_link::RESTART.mask(),
        };
        Ok(out_link::ADDR.to_value(self.addr) | command)
    }

    /// Decode a link register read.
    ///
    /// The command bits clear themselves, so a pending command is reported
    /// only while the engine has not taken it yet.
    pub const fn from_bits(value: u32) -> Self {
        let command = if out_link::START.is_set(value) {
            LinkCommand::Start
        } else if out_link::STOP.is_set(value) {
            LinkCommand::Stop
        } else if out_link::RESTART.is_set(value) {
            LinkCommand::Restart
        } else {
            LinkCommand::None
        };
        Self {
            addr: out_link::ADDR.get(value),
            command,
            parked: out_link::PARK.is_set(value),
        }
    }

    /// Full descriptor address.
    pub const fn descriptor(&self) -> usize {
        link_address(self.addr)
    }
}

// =============================================================================
// Interrupts
// =============================================================================

/// MCP interrupt flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct McpInterrupts {
    /// Inbound descriptor finished
    pub in_done: bool,
    /// Inbound EOF descriptor finished
    pub in_suc_eof: bool,
    /// Outbound descriptor finished
    pub out_done: bool,
    /// Outbound EOF descriptor finished
    pub out_eof: bool,
    /// Bad inbound descriptor
    pub in_dscr_err: bool,
    /// Bad outbound descriptor
    pub out_dscr_err: bool,
    /// Inbound ran out of descriptors
    pub in_dscr_empty: bool,
    /// Every outbound descriptor finished
    pub out_total_eof: bool,
    /// CRC computation finished
    pub crc_done: bool,
}

impl McpInterrupts {
    /// Decode an interrupt register value.
    pub const fn from_raw(value: u32) -> Self {
        Self {
            in_done: int_raw::IN_DONE.is_set(value),
            in_suc_eof: int_raw::IN_SUC_EOF.is_set(value),
            out_done: int_raw::OUT_DONE.is_set(value),
            out_eof: int_raw::OUT_EOF.is_set(value),
            in_dscr_err: int_raw::IN_DSCR_ERR.is_set(value),
            out_dscr_err: int_raw::OUT_DSCR_ERR.is_set(value),
            in_dscr_empty: int_raw::IN_DSCR_EMPTY.is_set(value),
            out_total_eof: int_raw::OUT_TOTAL_EOF.is_set(value),
            crc_done: int_raw::CRC_DONE.is_set(value),
        }
    }

    /// Encode for the enable or clear registers.
    pub const fn to_raw(&self) -> u32 {
        let flags = [
            (self.in_done, int_raw::IN_DONE),
            (self.in_suc_eof, int_raw::IN_SUC_EOF),
            (self.out_done, int_raw::OUT_DONE),
            (self.out_eof, int_raw::OUT_EOF),
            (self.in_dscr_err, int_raw::IN_DSCR_ERR),
            (self.out_dscr_err, int_raw::OUT_DSCR_ERR),
            (self.in_dscr_empty, int_raw::IN_DSCR_EMPTY),
            (self.out_total_eof, int_raw::OUT_TOTAL_EOF),
            (self.crc_done, int_raw::CRC_DONE),
        ];
        let mut raw = 0;
        let mut i = 0;
        while i < flags.len() {
            if flags[i].0 {
                raw |= flags[i].1.mask();
            }
            i += 1;
        }
        raw
    }

    /// A descriptor fault on either link.
    pub const fn has_error(&self) -> bool {
        self.in_dscr_err || self.out_dscr_err
    }

    /// A copy finished on the inbound side.
    pub const fn copy_complete(&self) -> bool {
        self.in_suc_eof
    }
}

// =============================================================================
// CRC
// =============================================================================

/// CRC engine options held in `conf`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrcConfig {
    /// Compute a CRC over the copied data
    pub enabled: bool,
    /// Feed bytes most significant first
    pub big_endian: bool,
    /// Bit-reverse the result
    pub reverse_output: bool,
}

impl CrcConfig {
    const MASK: u32 = conf::CRC_CAL_EN.mask() | conf::CRC_BIG_ENDIAN_EN.mask() | conf::CRC_OUT_REVERSE_EN.mask();

    /// Decode a `conf` value.
    pub const fn from_conf(value: u32) -> Self {
        Self {
            enabled: conf::CRC_CAL_EN.is_set(value),
            big_endian: conf::CRC_BIG_ENDIAN_EN.is_set(value),
            reverse_output: conf::CRC_OUT_REVERSE_EN.is_set(value),
        }
    }

    /// Replace the CRC option bits of a `conf` value.
    pub const fn apply(&self, value: u32) -> u32 {
        let mut value = value & !Self::MASK;
        if self.enabled {
            value |= conf::CRC_CAL_EN.mask();
        }
        if self.big_endian {
            value |= conf::CRC_BIG_ENDIAN_EN.mask();
        }
        if self.reverse_output {
            value |= conf::CRC_OUT_REVERSE_EN.mask();
        }
        value
    }
}

// =============================================================================
// Engine State
// =============================================================================

/// Descriptor fetch state of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorState {
    /// Idle
    Idle,
    /// Loading the descriptor
    Fetch,
    /// Processing its buffer
    Process,
    /// Writing it back
    WriteBack,
}

impl DescriptorState {
    /// Decode `DSCR_STATE`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::Idle,
            1 => Self::Fetch,
            2 => Self::Process,
            _ => Self::WriteBack,
        }
    }
}

/// Decoded `in_st` or `out_st`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    /// FIFO empty (inbound) or full (outbound)
    pub fifo_flag: bool,
    /// Data state machine (0 idle)
    pub state: u8,
    /// Descriptor state machine
    pub descriptor: DescriptorState,
    /// Low bits of the current descriptor address
    pub descriptor_addr: u32,
}

impl LinkState {
    /// Decode an `in_st` value.
    pub const fn from_in_st(value: u32) -> DecodeResult<Self> {
        Self::decode(
            in_st::FIFO_EMPTY.is_set(value),
            in_st::STATE.get(value),
            in_st::DSCR_STATE.get(value),
            in_st::DSCR_ADDR.get(value),
        )
    }

    /// Decode an `out_st` value.
    pub const fn from_out_st(value: u32) -> DecodeResult<Self> {
        Self::decode(
            out_st::FIFO_FULL.is_set(value),
            out_st::STATE.get(value),
            out_st::DSCR_STATE.get(value),
            out_st::DSCR_ADDR.get(value),
        )
    }

    const fn decode(fifo_flag: bool, state: u32, dscr: u32, addr: u32) -> DecodeResult<Self> {
        // States 5..=7 are never reported.
        if state > 4 {
            return Err(DecodeError::Reserved);
        }
        Ok(Self {
            fifo_flag,
            state: state as u8,
            descriptor: DescriptorState::from_bits(dscr),
            descriptor_addr: addr,
        })
    }

    /// Both state machines idle.
    pub const fn is_idle(&self) -> bool {
        self.state == 0 && matches!(self.descriptor, DescriptorState::Idle)
    }
}

// =============================================================================
// Register Block Helpers
// =============================================================================

impl<B: RegisterBus> McpRegs<B> {
    /// Pending masked interrupts.
    pub fn interrupts(&mut self) -> McpInterrupts {
        McpInterrupts::from_raw(self.interrupt_status())
    }

    /// Clear the interrupts set in `irq`.
    pub fn acknowledge(&mut self, irq: McpInterrupts) {
        self.clear_interrupts(irq.to_raw());
    }

    /// Enable exactly the interrupts set in `irq`.
    pub fn enable_interrupts(&mut self, irq: McpInterrupts) {
        self.set_interrupt_enable(irq.to_raw());
    }

    /// Current CRC options.
    pub fn crc_config(&mut self) -> CrcConfig {
        CrcConfig::from_conf(self.conf())
    }

    /// Change the CRC options, keeping the rest of `conf`.
    pub fn set_crc_config(&mut self, config: &CrcConfig) {
        let addr = self.addr(conf::OFFSET);
        self.bus.modify(addr, |value| config.apply(value));
    }

    /// Pulse the CRC accumulator reset.
    pub fn reset_crc(&mut self) {
        let addr = self.addr(conf::OFFSET);
        self.bus.set_bits(addr, conf::CRC_CAL_RESET.mask());
        self.bus.clear_bits(addr, conf::CRC_CAL_RESET.mask());
    }

    /// Hand descriptors back to software on completion and verify the owner
    /// bit before use.
    pub fn set_owner_handling(&mut self, check_owner: bool, auto_writeback: bool) {
        let addr = self.addr(conf::OFFSET);
        self.bus.modify(addr, |value| {
            let value = conf::CHECK_OWNER.insert(value, check_owner as u32);
            conf::OUT_AUTO_WRBACK.insert(value, auto_writeback as u32)
        });
    }

    /// Decoded outbound link register.
    pub fn out_link_control(&mut self) -> LinkControl {
        LinkControl::from_bits(self.out_link())
    }

    /// Decoded inbound link register.
    pub fn in_link_control(&mut self) -> LinkControl {
        LinkControl::from_bits(self.in_link())
    }

    /// Write `control` to the outbound link.
    pub fn set_out_link_control(&mut self, control: &LinkControl) -> Result<()> {
        let value = control.to_bits()?;
        self.set_out_link(value);
        Ok(())
    }

    /// Write `control` to the inbound link.
    pub fn set_in_link_control(&mut self, control: &LinkControl) -> Result<()> {
        let value = control.to_bits()?;
        self.set_in_link(value);
        Ok(())
    }

    /// Inbound engine state.
    pub fn in_link_state(&mut self) -> DecodeResult<LinkState> {
        LinkState::from_in_st(self.in_state())
    }

    /// Outbound engine state.
    pub fn out_link_state(&mut self) -> DecodeResult<LinkState> {
        LinkState::from_out_st(self.out_state())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
