//! Typed views over the raw registers
//!
//! The [`register`](crate::register) modules describe bit layouts. The
//! modules here decode those bits into enums and structs and add helper
//! methods to the register blocks for the common multi-field operations.
//!
//! # Modules
//!
//! - [`apb`]: REF_TICK dividers, CPU pre-divider, SAR ADC pattern tables
//! - [`efuse`]: chip identity, factory MAC address, protection bits
//! - [`emac`]: DMA state, interrupts, MAC addresses and filters
//! - [`mcp`]: memory-copy DMA links, interrupts, CRC and engine state
//! - [`mdio`]: PHY management command encoding
//! - [`uart`]: baud divider, framing, interrupt sets
//!
//! # Delay Integration
//!
//! Functions that poll take any `embedded_hal::delay::DelayNs`.

pub mod apb;
pub mod efuse;
pub mod emac;
pub mod mcp;
pub mod mdio;
pub mod uart;

// Re-export commonly used types
pub use apb::{PatternEntry, ScanMode, SysClockConfig, TickSource};
pub use efuse::{ChipInfo, ChipPackage, CodingScheme, FactoryMac};
pub use emac::{AddressFilter, DmaInterrupts, LinkSpeed, MacAddress, PhyInterface};
pub use mcp::{CrcConfig, LinkControl, LinkState, McpInterrupts};
pub use mdio::{MdcClockDivider, MiiCommand};
pub use uart::{ClockDivider, FrameFormat, UartInterrupts};
