//! Ethernet MAC (DWC GMAC) register map
//!
//! The EMAC occupies one 8 KiB window at
//! [`DR_REG_EMAC_BASE`](crate::soc::DR_REG_EMAC_BASE):
//!
//! | Window | Block |
//! |--------|-------|
//! | 0x0000..0x0800 | [`dma`] |
//! | 0x0800..0x0900 | [`ext`] |
//! | 0x1000..0x1100 | [`mac`] |
//!
//! All three register blocks take the EMAC base address, and every `OFFSET`
//! in this module is relative to it.

pub mod dma;
pub mod ext;
pub mod mac;

pub use dma::DmaRegs;
pub use ext::ExtRegs;
pub use mac::MacRegs;

/// Start of the DMA registers within the EMAC window
pub const DMA_OFFSET: usize = 0x0000;
/// Start of the extension registers within the EMAC window
pub const EXT_OFFSET: usize = 0x0800;
/// Start of the MAC registers within the EMAC window
pub const MAC_OFFSET: usize = 0x1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_contain_their_registers() {
        assert_eq!(dma::bus_mode::OFFSET, DMA_OFFSET);
        assert!(dma::cur_rx_buf::OFFSET < EXT_OFFSET);
        assert_eq!(ext::clkout_conf::OFFSET, EXT_OFFSET);
        assert!(ext::date::OFFSET < MAC_OFFSET);
        assert_eq!(mac::config::OFFSET, MAC_OFFSET);
        assert!(mac::watchdog_timeout::OFFSET < MAC_OFFSET + 0x100);
    }
}
