//! Typed views of the EMAC registers
//!
//! Decoders for the DMA status word, the MAC address slots, the core status
//! register and the PHY interface select. They only translate register
//! values; nothing here sequences the controller.

use core::fmt;

use crate::error::{DecodeError, DecodeResult, FieldError, FieldResult, Result};
use crate::register::emac::dma::status;
use crate::register::emac::ext::phyinf_conf;
use crate::register::emac::mac::{self, addr_high, addr0_high, addr_low, core_status};
use crate::register::emac::{DmaRegs, ExtRegs, MacRegs};
use crate::soc::RegisterBus;

// =============================================================================
// DMA Process States
// =============================================================================

/// Receive DMA state machine, `status::RX_STATE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RxProcessState {
    /// Stopped after reset or a stop command
    Stopped = 0,
    /// Fetching a receive descriptor
    FetchingDescriptor = 1,
    /// Waiting for a frame
    WaitingForFrame = 3,
    /// Suspended, no descriptor available
    Suspended = 4,
    /// Closing a receive descriptor
    ClosingDescriptor = 5,
    /// Writing the timestamp
    WritingTimestamp = 6,
    /// Moving a frame from the FIFO into memory
    Transferring = 7,
}

impl RxProcessState {
    /// Decode the 3-bit state value.
    pub const fn from_bits(bits: u32) -> DecodeResult<Self> {
        Ok(match bits {
            0 => Self::Stopped,
            1 => Self::FetchingDescriptor,
            3 => Self::WaitingForFrame,
            4 => Self::Suspended,
            5 => Self::ClosingDescriptor,
            6 => Self::WritingTimestamp,
            7 => Self::Transferring,
            _ => return Err(DecodeError::Reserved),
        })
    }

    /// Whether the engine is neither stopped nor suspended.
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Stopped | Self::Suspended)
    }
}

/// Transmit DMA state machine, `status::TX_STATE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TxProcessState {
    /// Stopped after reset or a stop command
    Stopped = 0,
    /// Fetching a transmit descriptor
    FetchingDescriptor = 1,
    /// Waiting for the frame status
    WaitingForStatus = 2,
    /// Reading a buffer into the FIFO
    ReadingData = 3,
    /// Writing the timestamp
    WritingTimestamp = 4,
    /// Suspended, no descriptor available or underflow
    Suspended = 6,
    /// Closing a transmit descriptor
    ClosingDescriptor = 7,
}

impl TxProcessState {
    /// Decode the 3-bit state value.
    pub const fn from_bits(bits: u32) -> DecodeResult<Self> {
        Ok(match bits {
            0 => Self::Stopped,
            1 => Self::FetchingDescriptor,
            2 => Self::WaitingForStatus,
            3 => Self::ReadingData,
            4 => Self::WritingTimestamp,
            6 => Self::Suspended,
            7 => Self::ClosingDescriptor,
            _ => return Err(DecodeError::Reserved),
        })
    }

    /// Whether the engine is neither stopped nor suspended.
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Stopped | Self::Suspended)
    }
}

/// Source of a fatal bus error, `status::ERROR_BITS`
///
/// Only meaningful while `FATAL_BUS_ERR` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusErrorKind {
    /// Raised by the transmit engine, otherwise the receive engine
    pub tx_dma: bool,
    /// Failed on a read transfer, otherwise a write
    pub read: bool,
    /// Failed on a descriptor access, otherwise a data buffer
    pub descriptor: bool,
}

impl BusErrorKind {
    /// Decode the 3-bit error value.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            tx_dma: bits & 0b001 != 0,
            read: bits & 0b010 != 0,
            descriptor: bits & 0b100 != 0,
        }
    }
}

// =============================================================================
// DMA Interrupts
// =============================================================================

/// Interrupt flags of the DMA status register.
///
/// # Example
///
/// ```ignore
/// let irq = dma.interrupts();
/// if irq.rx_complete {
///     // Handle received frame
/// }
/// dma.acknowledge(irq);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaInterrupts {
    /// Frame transmitted
    pub tx_complete: bool,
    /// Transmit engine stopped
    pub tx_stopped: bool,
    /// No transmit descriptor available
    pub tx_buf_unavailable: bool,
    /// Transmit jabber timer expired
    pub tx_jabber: bool,
    /// Receive FIFO overflow
    pub rx_overflow: bool,
    /// Transmit FIFO underflow
    pub tx_underflow: bool,
    /// Frame received
    pub rx_complete: bool,
    /// No receive descriptor available
    pub rx_buf_unavailable: bool,
    /// Receive engine stopped
    pub rx_stopped: bool,
    /// Received frame longer than the watchdog allows
    pub rx_watchdog: bool,
    /// Frame to transmit fully moved into the FIFO
    pub early_tx: bool,
    /// Unrecoverable bus error
    pub fatal_bus_error: bool,
    /// First buffer of a frame filled
    pub early_rx: bool,
    /// Abnormal interrupt summary
    pub abnormal_summary: bool,
    /// Normal interrupt summary
    pub normal_summary: bool,
}

impl DmaInterrupts {
    /// Decode a DMA status register value.
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self {
            tx_complete: status::TX.is_set(value),
            tx_stopped: status::TX_STOPPED.is_set(value),
            tx_buf_unavailable: status::TX_BUF_UNAVAIL.is_set(value),
            tx_jabber: status::TX_JABBER.is_set(value),
            rx_overflow: status::RX_OVERFLOW.is_set(value),
            tx_underflow: status::TX_UNDERFLOW.is_set(value),
            rx_complete: status::RX.is_set(value),
            rx_buf_unavailable: status::RX_BUF_UNAVAIL.is_set(value),
            rx_stopped: status::RX_STOPPED.is_set(value),
            rx_watchdog: status::RX_WATCHDOG.is_set(value),
            early_tx: status::EARLY_TX.is_set(value),
            fatal_bus_error: status::FATAL_BUS_ERR.is_set(value),
            early_rx: status::EARLY_RX.is_set(value),
            abnormal_summary: status::ABNORMAL_SUMMARY.is_set(value),
            normal_summary: status::NORMAL_SUMMARY.is_set(value),
        }
    }

    /// Encode as a write-1-to-clear value for the status register.
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        let flags = [
            (self.tx_complete, status::TX),
            (self.tx_stopped, status::TX_STOPPED),
            (self.tx_buf_unavailable, status::TX_BUF_UNAVAIL),
            (self.tx_jabber, status::TX_JABBER),
            (self.rx_overflow, status::RX_OVERFLOW),
            (self.tx_underflow, status::TX_UNDERFLOW),
            (self.rx_complete, status::RX),
            (self.rx_buf_unavailable, status::RX_BUF_UNAVAIL),
            (self.rx_stopped, status::RX_STOPPED),
            (self.rx_watchdog, status::RX_WATCHDOG),
            (self.early_tx, status::EARLY_TX),
            (self.fatal_bus_error, status::FATAL_BUS_ERR),
            (self.early_rx, status::EARLY_RX),
            (self.abnormal_summary, status::ABNORMAL_SUMMARY),
            (self.normal_summary, status::NORMAL_SUMMARY),
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

    /// Any event flag set, ignoring the two summary bits.
    #[inline]
    pub const fn any(&self) -> bool {
        self.to_raw() & !(status::NORMAL_SUMMARY.mask() | status::ABNORMAL_SUMMARY.mask()) != 0
    }

    /// Any flag that signals lost data or a stuck engine.
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.tx_underflow || self.rx_overflow || self.fatal_bus_error || self.tx_jabber
    }
}

impl<B: RegisterBus> DmaRegs<B> {
    /// Decode the interrupt flags of the status register.
    pub fn interrupts(&mut self) -> DmaInterrupts {
        DmaInterrupts::from_raw(self.status())
    }

    /// Clear the interrupts set in `irq`.
    pub fn acknowledge(&mut self, irq: DmaInterrupts) {
        self.clear_interrupts(irq.to_raw());
    }

    /// Current receive engine state.
    pub fn rx_process_state(&mut self) -> DecodeResult<RxProcessState> {
        RxProcessState::from_bits(status::RX_STATE.get(self.status()))
    }

    /// Current transmit engine state.
    pub fn tx_process_state(&mut self) -> DecodeResult<TxProcessState> {
        TxProcessState::from_bits(status::TX_STATE.get(self.status()))
    }

    /// Source of the pending fatal bus error, if there is one.
    pub fn bus_error(&mut self) -> Option<BusErrorKind> {
        let value = self.status();
        if !status::FATAL_BUS_ERR.is_set(value) {
            return None;
        }
        let kind = BusErrorKind::from_bits(status::ERROR_BITS.get(value));
        #[cfg(feature = "defmt")]
        defmt::warn!("emac: fatal bus error {}", kind);
        Some(kind)
    }
}

// =============================================================================
// MAC Address
// =============================================================================

/// Six-byte Ethernet address, byte 0 first on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// ff:ff:ff:ff:ff:ff
    pub const BROADCAST: Self = Self([0xFF; 6]);

    /// Wrap six address bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Address bytes
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Group address bit of the first byte.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Locally administered bit of the first byte.
    pub const fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// Pack into the `(high, low)` register pair.
    ///
    /// Bytes 0 to 3 fill the low register from its least significant byte
    /// up, bytes 4 and 5 the address bits of the high register. Control bits
    /// of the high register are left clear.
    pub const fn to_registers(&self) -> (u32, u32) {
        let [b0, b1, b2, b3, b4, b5] = self.0;
        let high = ((b5 as u32) << 8) | b4 as u32;
        let low = u32::from_le_bytes([b0, b1, b2, b3]);
        (high, low)
    }

    /// Unpack a `(high, low)` register pair, ignoring the control bits.
    pub const fn from_registers(high: u32, low: u32) -> Self {
        let [b0, b1, b2, b3] = low.to_le_bytes();
        Self([b0, b1, b2, b3, high as u8, (high >> 8) as u8])
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// =============================================================================
// Address Filter Slots
// =============================================================================

/// Perfect filter entry for address slots 1 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressFilter {
    /// Address to compare
    pub address: MacAddress,
    /// Compare against the source address instead of the destination
    pub source: bool,
    /// Bytes left out of the comparison, bit 0 is byte 0
    pub mask_bytes: u8,
}

impl AddressFilter {
    /// Match `address` as destination, all bytes compared.
    pub const fn destination(address: MacAddress) -> Self {
        Self {
            address,
            source: false,
            mask_bytes: 0,
        }
    }

    /// Match `address` as source, all bytes compared.
    pub const fn source(address: MacAddress) -> Self {
        Self {
            address,
            source: true,
            mask_bytes: 0,
        }
    }

    /// Encode as an enabled `(high, low)` register pair.
    pub fn encode(&self) -> FieldResult<(u32, u32)> {
        let (mut high, low) = self.address.to_registers();
        high = addr_high::MASK_BYTE_CONTROL.try_insert(high, u32::from(self.mask_bytes))?;
        high |= addr_high::ADDRESS_ENABLE.mask();
        if self.source {
            high |= addr_high::SOURCE_ADDRESS.mask();
        }
        Ok((high, low))
    }

    /// Decode a register pair, `None` when the slot is disabled.
    pub const fn decode(high: u32, low: u32) -> Option<Self> {
        if !addr_high::ADDRESS_ENABLE.is_set(high) {
            return None;
        }
        Some(Self {
            address: MacAddress::from_registers(high, low),
            source: addr_high::SOURCE_ADDRESS.is_set(high),
            mask_bytes: addr_high::MASK_BYTE_CONTROL.get(high) as u8,
        })
    }
}

impl<B: RegisterBus> MacRegs<B> {
    /// Station address in slot 0.
    pub fn station_address(&mut self) -> MacAddress {
        let high = self.addr0_high();
        let low = self.addr0_low();
        MacAddress::from_registers(high, low)
    }

    /// Program the station address in slot 0.
    pub fn set_station_address(&mut self, address: MacAddress) {
        let (high, low) = address.to_registers();
        self.set_addr0_high(high & addr0_high::ADDRESS_HI.mask());
        self.set_addr0_low(low);
    }

    /// Filter programmed in `slot` (1..=7).
    pub fn address_filter(&mut self, slot: usize) -> Result<Option<AddressFilter>> {
        check_filter_slot(slot)?;
        let high = self.addr_high(slot)?;
        let low = self.addr_low(slot)?;
        Ok(AddressFilter::decode(high, low))
    }

    /// Program `filter` into `slot` (1..=7).
    pub fn set_address_filter(&mut self, slot: usize, filter: &AddressFilter) -> Result<()> {
        check_filter_slot(slot)?;
        let (high, low) = filter.encode()?;
        self.set_addr(slot, high, low)
    }

    /// Disable `slot` (1..=7), restoring its reset contents.
    pub fn clear_address_filter(&mut self, slot: usize) -> Result<()> {
        check_filter_slot(slot)?;
        self.set_addr(slot, addr_high::RESET, addr_low::RESET)
    }

    /// Decode the core status register.
    pub fn link_status(&mut self) -> DecodeResult<CoreStatus> {
        CoreStatus::from_raw(self.core_status())
    }
}

fn check_filter_slot(slot: usize) -> FieldResult<()> {
    if slot == 0 || slot >= mac::ADDRESS_SLOTS {
        return Err(FieldError::InvalidSlot);
    }
    Ok(())
}

// =============================================================================
// Core Status
// =============================================================================

/// Line speed reported through the transmit clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinkSpeed {
    /// 2.5 MHz clock, 10 Mbps
    Mbps10 = 0,
    /// 25 MHz clock, 100 Mbps
    Mbps100 = 1,
    /// 125 MHz clock, 1000 Mbps
    Mbps1000 = 2,
}

impl LinkSpeed {
    /// Transmit clock frequency for this speed.
    pub const fn clock_hz(self) -> u32 {
        match self {
            Self::Mbps10 => 2_500_000,
            Self::Mbps100 => 25_000_000,
            Self::Mbps1000 => 125_000_000,
        }
    }
}

/// Decoded core status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreStatus {
    /// Line speed
    pub speed: LinkSpeed,
    /// Full duplex link
    pub full_duplex: bool,
    /// Jabber timeout seen
    pub jabber_timeout: bool,
}

impl CoreStatus {
    /// Decode a core status register value.
    pub const fn from_raw(value: u32) -> DecodeResult<Self> {
        let speed = match core_status::LINK_SPEED.get(value) {
            0 => LinkSpeed::Mbps10,
            1 => LinkSpeed::Mbps100,
            2 => LinkSpeed::Mbps1000,
            _ => return Err(DecodeError::Reserved),
        };
        Ok(Self {
            speed,
            full_duplex: core_status::LINK_MODE.is_set(value),
            jabber_timeout: core_status::JABBER_TIMEOUT.is_set(value),
        })
    }
}

// =============================================================================
// PHY Interface
// =============================================================================

/// PHY interface selected in the extension block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// Media Independent Interface
    Mii,
    /// Reduced MII
    #[default]
    Rmii,
}

impl PhyInterface {
    /// `PHY_INTF_SEL` value
    pub const fn to_bits(self) -> u32 {
        match self {
            Self::Mii => phyinf_conf::PHY_INTF_MII,
            Self::Rmii => phyinf_conf::PHY_INTF_RMII,
        }
    }

    /// Decode a `PHY_INTF_SEL` value.
    pub const fn from_bits(bits: u32) -> DecodeResult<Self> {
        match bits {
            phyinf_conf::PHY_INTF_MII => Ok(Self::Mii),
            phyinf_conf::PHY_INTF_RMII => Ok(Self::Rmii),
            _ => Err(DecodeError::Reserved),
        }
    }
}

impl<B: RegisterBus> ExtRegs<B> {
    /// Currently selected PHY interface.
    pub fn phy_interface(&mut self) -> DecodeResult<PhyInterface> {
        let addr = self.addr(phyinf_conf::OFFSET);
        PhyInterface::from_bits(self.bus.read_field(addr, phyinf_conf::PHY_INTF_SEL))
    }

    /// Select the PHY interface.
    pub fn set_phy_interface(&mut self, interface: PhyInterface) {
        let addr = self.addr(phyinf_conf::OFFSET);
        self.bus
            .write_field_truncating(addr, phyinf_conf::PHY_INTF_SEL, interface.to_bits());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
