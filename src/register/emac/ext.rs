//! Extension Register Definitions
//!
//! ESP32-specific wrapper around the MAC: clock generation and gating, PHY
//! interface selection and RAM power down. The block sits 0x800 above
//! [`DR_REG_EMAC_BASE`](crate::soc::DR_REG_EMAC_BASE).

use crate::register::{reg_ro, reg_rw, register_block};
use crate::soc::RegisterBus;
use crate::soc::field::{Access::*, Field};
#[cfg(feature = "esp32")]
use crate::soc::{DR_REG_EMAC_BASE, Mmio};

// =============================================================================
// Register Map
// =============================================================================

/// Clock output configuration
pub mod clkout_conf {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x800;

    /// Clock output delay
    pub const DLY_NUM: Field = Field::new("DLY_NUM", 8, 2, ReadWrite, 0);
    /// Clock output high-period divider
    pub const H_DIV_NUM: Field = Field::new("H_DIV_NUM", 4, 4, ReadWrite, 0);
    /// Clock output divider
    pub const DIV_NUM: Field = Field::new("DIV_NUM", 0, 4, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DLY_NUM, H_DIV_NUM, DIV_NUM];
}

/// Oscillator clock configuration
pub mod oscclk_conf {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x804;

    /// Use the external reference clock
    pub const CLK_SEL: Field = Field::bit("CLK_SEL", 24, ReadWrite, 0);
    /// High-period divider for the 100 Mbit/s MII clock
    pub const H_DIV_NUM_100M: Field = Field::new("H_DIV_NUM_100M", 18, 6, ReadWrite, 0);
    /// Divider for the 100 Mbit/s MII clock
    pub const DIV_NUM_100M: Field = Field::new("DIV_NUM_100M", 12, 6, ReadWrite, 0);
    /// High-period divider for the 10 Mbit/s MII clock
    pub const H_DIV_NUM_10M: Field = Field::new("H_DIV_NUM_10M", 6, 6, ReadWrite, 0);
    /// Divider for the 10 Mbit/s MII clock
    pub const DIV_NUM_10M: Field = Field::new("DIV_NUM_10M", 0, 6, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[CLK_SEL, H_DIV_NUM_100M, DIV_NUM_100M, H_DIV_NUM_10M, DIV_NUM_10M];
}

/// Clock gates
pub mod clk_ctrl {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x808;

    /// Main MAC clock
    pub const CLK_EN: Field = Field::bit("CLK_EN", 5, ReadWrite, 0);
    /// MII receive clock
    pub const MII_CLK_RX_EN: Field = Field::bit("MII_CLK_RX_EN", 4, ReadWrite, 0);
    /// MII transmit clock
    pub const MII_CLK_TX_EN: Field = Field::bit("MII_CLK_TX_EN", 3, ReadWrite, 0);
    /// 125 MHz receive clock
    pub const RX_125_CLK_EN: Field = Field::bit("RX_125_CLK_EN", 2, ReadWrite, 0);
    /// Generate the reference clock internally
    pub const INT_EN: Field = Field::bit("INT_EN", 1, ReadWrite, 0);
    /// Take the reference clock from a pin
    pub const EXT_EN: Field = Field::bit("EXT_EN", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[CLK_EN, MII_CLK_RX_EN, MII_CLK_TX_EN, RX_125_CLK_EN, INT_EN, EXT_EN];

    /// Gates opened while the MAC runs.
    pub const RUNNING: u32 = CLK_EN.mask() | MII_CLK_RX_EN.mask() | MII_CLK_TX_EN.mask();
}

/// PHY interface configuration
pub mod phyinf_conf {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x80C;

    /// Interface select, see [`PHY_INTF_MII`] and [`PHY_INTF_RMII`]
    pub const PHY_INTF_SEL: Field = Field::new("PHY_INTF_SEL", 13, 3, ReadWrite, 0);
    /// Reverse MII PHY address
    pub const REVMII_PHY_ADDR: Field = Field::new("REVMII_PHY_ADDR", 8, 5, ReadWrite, 0);
    /// Core PHY address
    pub const CORE_PHY_ADDR: Field = Field::new("CORE_PHY_ADDR", 3, 5, ReadWrite, 0);
    /// Sideband flow control
    pub const SBD_FLOWCTRL: Field = Field::bit("SBD_FLOWCTRL", 2, ReadWrite, 0);
    /// External reverse MII receive clock
    pub const EXT_REVMII_RX_CLK_SEL: Field = Field::bit("EXT_REVMII_RX_CLK_SEL", 1, ReadWrite, 0);
    /// Internal reverse MII receive clock
    pub const INT_REVMII_RX_CLK_SEL: Field = Field::bit("INT_REVMII_RX_CLK_SEL", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        PHY_INTF_SEL, REVMII_PHY_ADDR, CORE_PHY_ADDR, SBD_FLOWCTRL, EXT_REVMII_RX_CLK_SEL,
        INT_REVMII_RX_CLK_SEL,
    ];

    /// `PHY_INTF_SEL` value for MII
    pub const PHY_INTF_MII: u32 = 0;
    /// `PHY_INTF_SEL` value for RMII
    pub const PHY_INTF_RMII: u32 = 4;
}

/// RAM power down
pub mod ram_pd {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x810;

    /// Power down the MAC FIFO RAMs
    pub const RAM_PD_EN: Field = Field::new("RAM_PD_EN", 0, 2, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RAM_PD_EN];
}

/// Version
pub mod date {
    use super::*;

    /// Offset from the EMAC base.
    pub const OFFSET: usize = 0x8FC;

    /// Block version
    pub const DATE: Field = Field::new("DATE", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATE];
}

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// EMAC extension register block
    ExtRegs
}

#[cfg(feature = "esp32")]
impl ExtRegs<Mmio> {
    /// Extension registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not create a second handle to the
    /// same block while this one is in use.
    pub const unsafe fn steal() -> Self {
        Self::new(unsafe { Mmio::new() }, DR_REG_EMAC_BASE)
    }
}

impl<B: RegisterBus> ExtRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(clkout_conf, set_clkout_conf, clkout_conf::OFFSET, "Clock Output Configuration");
    reg_rw!(osc_clk_conf, set_osc_clk_conf, oscclk_conf::OFFSET, "Oscillator Clock Configuration");
    reg_rw!(clk_ctrl, set_clk_ctrl, clk_ctrl::OFFSET, "Clock Control register");
    reg_rw!(phy_inf_conf, set_phy_inf_conf, phyinf_conf::OFFSET, "PHY Interface Configuration");
    reg_rw!(ram_pd, set_ram_pd, ram_pd::OFFSET, "RAM Power Down register");
    reg_ro!(date, date::OFFSET, "Date register (version info)");

    // -------------------------------------------------------------------------
    // Clock control helpers
    // -------------------------------------------------------------------------

    /// Open the MAC and MII clock gates
    #[inline(always)]
    pub fn enable_clocks(&mut self) {
        let addr = self.addr(clk_ctrl::OFFSET);
        self.bus.set_bits(addr, clk_ctrl::RUNNING);
    }

    /// Close the MAC and MII clock gates
    #[inline(always)]
    pub fn disable_clocks(&mut self) {
        let addr = self.addr(clk_ctrl::OFFSET);
        self.bus.clear_bits(addr, clk_ctrl::RUNNING);
    }

    /// Take the RMII reference clock from a pin
    pub fn set_rmii_clock_external(&mut self) {
        let ctrl = self.addr(clk_ctrl::OFFSET);
        self.bus
            .modify(ctrl, |v| (v | clk_ctrl::EXT_EN.mask()) & !clk_ctrl::INT_EN.mask());
        let osc = self.addr(oscclk_conf::OFFSET);
        self.bus.set_bits(osc, oscclk_conf::CLK_SEL.mask());

        #[cfg(feature = "defmt")]
        defmt::debug!("EMAC reference clock: external");
    }

    /// Generate the RMII reference clock internally, undivided
    pub fn set_rmii_clock_internal(&mut self) {
        let ctrl = self.addr(clk_ctrl::OFFSET);
        self.bus
            .modify(ctrl, |v| (v | clk_ctrl::INT_EN.mask()) & !clk_ctrl::EXT_EN.mask());
        let osc = self.addr(oscclk_conf::OFFSET);
        self.bus.clear_bits(osc, oscclk_conf::CLK_SEL.mask());
        let clkout = self.addr(clkout_conf::OFFSET);
        self.bus.clear_bits(
            clkout,
            clkout_conf::DIV_NUM.mask() | clkout_conf::H_DIV_NUM.mask(),
        );

        #[cfg(feature = "defmt")]
        defmt::debug!("EMAC reference clock: internal");
    }

    // -------------------------------------------------------------------------
    // Power management helpers
    // -------------------------------------------------------------------------

    /// Power up the MAC RAM
    #[inline(always)]
    pub fn power_up_ram(&mut self) {
        self.set_ram_pd(0);
    }

    /// Power down the MAC RAM
    #[inline(always)]
    pub fn power_down_ram(&mut self) {
        self.set_ram_pd(ram_pd::RAM_PD_EN.mask());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
