//! MDIO (SMI) command encoding
//!
//! The GMII address register starts a PHY management transaction when it is
//! written with the busy bit set. [`MiiCommand`] composes that word and
//! [`MdcClockDivider`] picks the CSR clock range for it.

use embedded_hal::delay::DelayNs;

use crate::error::{DecodeError, DecodeResult, FieldError, FieldResult, Result};
use crate::register::emac::MacRegs;
use crate::register::emac::mac::{mii_addr, mii_data};
use crate::soc::{RegisterBus, wait_field_clear};

// =============================================================================
// MDIO Constants
// =============================================================================

/// Default MDIO operation timeout in microseconds
pub const MDIO_TIMEOUT_US: u32 = 1_000;

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

/// Highest MDC frequency allowed by IEEE 802.3
pub const MDC_MAX_HZ: u32 = 2_500_000;

/// MDC clock divider values based on system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MdcClockDivider {
    /// Clock/42 (60-100 MHz system clock)
    Div42 = 0,
    /// Clock/62 (100-150 MHz system clock)
    Div62 = 1,
    /// Clock/16 (20-35 MHz system clock)
    Div16 = 2,
    /// Clock/26 (35-60 MHz system clock)
    Div26 = 3,
    /// Clock/102 (150-250 MHz system clock)
    #[default]
    Div102 = 4,
    /// Clock/124 (250-300 MHz system clock)
    Div124 = 5,
}

impl MdcClockDivider {
    /// Get the appropriate divider for a given system clock frequency
    ///
    /// The MDC clock must not exceed 2.5 MHz per IEEE 802.3.
    pub const fn from_sys_clock_hz(sys_clk_hz: u32) -> Self {
        if sys_clk_hz < 35_000_000 {
            Self::Div16
        } else if sys_clk_hz < 60_000_000 {
            Self::Div26
        } else if sys_clk_hz < 100_000_000 {
            Self::Div42
        } else if sys_clk_hz < 150_000_000 {
            Self::Div62
        } else if sys_clk_hz < 250_000_000 {
            Self::Div102
        } else {
            Self::Div124
        }
    }

    /// Get the divider value for register programming
    pub const fn to_reg_value(self) -> u32 {
        self as u32
    }

    /// Decode a `CSR_CLOCK` value.
    pub const fn from_reg_value(value: u32) -> DecodeResult<Self> {
        Ok(match value {
            0 => Self::Div42,
            1 => Self::Div62,
            2 => Self::Div16,
            3 => Self::Div26,
            4 => Self::Div102,
            5 => Self::Div124,
            _ => return Err(DecodeError::Reserved),
        })
    }

    /// Division ratio
    pub const fn ratio(self) -> u32 {
        match self {
            Self::Div16 => 16,
            Self::Div26 => 26,
            Self::Div42 => 42,
            Self::Div62 => 62,
            Self::Div102 => 102,
            Self::Div124 => 124,
        }
    }

    /// MDC frequency produced from `sys_clk_hz`.
    pub const fn mdc_hz(self, sys_clk_hz: u32) -> u32 {
        sys_clk_hz / self.ratio()
    }
}

// =============================================================================
// MII Command
// =============================================================================

/// One PHY management transaction, as written to the GMII address register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiiCommand {
    /// PHY address (0..=31)
    pub phy_addr: u8,
    /// PHY register (0..=31)
    pub reg_addr: u8,
    /// Write transaction, otherwise read
    pub write: bool,
    /// MDC clock range
    pub clock: MdcClockDivider,
}

impl MiiCommand {
    /// Read `reg_addr` of the PHY at `phy_addr`.
    pub const fn read(phy_addr: u8, reg_addr: u8, clock: MdcClockDivider) -> Self {
        Self {
            phy_addr,
            reg_addr,
            write: false,
            clock,
        }
    }

    /// Write `reg_addr` of the PHY at `phy_addr`.
    pub const fn write(phy_addr: u8, reg_addr: u8, clock: MdcClockDivider) -> Self {
        Self {
            phy_addr,
            reg_addr,
            write: true,
            clock,
        }
    }

    /// Build the GMII address word with the busy bit set.
    pub fn to_word(&self) -> FieldResult<u32> {
        if self.phy_addr > MAX_PHY_ADDR || self.reg_addr > MAX_REG_ADDR {
            return Err(FieldError::ValueOutOfRange);
        }
        let mut word = mii_addr::PHY_ADDR.to_value(u32::from(self.phy_addr));
        word |= mii_addr::REG.to_value(u32::from(self.reg_addr));
        word |= mii_addr::CSR_CLOCK.to_value(self.clock.to_reg_value());
        if self.write {
            word |= mii_addr::WRITE.mask();
        }
        Ok(word | mii_addr::BUSY.mask())
    }

    /// Decode a GMII address word. The busy bit is ignored.
    pub const fn from_word(word: u32) -> DecodeResult<Self> {
        let clock = match MdcClockDivider::from_reg_value(mii_addr::CSR_CLOCK.get(word)) {
            Ok(clock) => clock,
            Err(e) => return Err(e),
        };
        Ok(Self {
            phy_addr: mii_addr::PHY_ADDR.get(word) as u8,
            reg_addr: mii_addr::REG.get(word) as u8,
            write: mii_addr::WRITE.is_set(word),
            clock,
        })
    }
}

impl<B: RegisterBus> MacRegs<B> {
    /// Start `cmd`. For a write, `data` is loaded into the data register first.
    ///
    /// The caller waits for completion with [`wait_mii_idle`](Self::wait_mii_idle).
    pub fn issue_mii(&mut self, cmd: &MiiCommand, data: u16) -> Result<()> {
        let word = cmd.to_word()?;
        if cmd.write {
            self.set_mii_data(mii_data::DATA.to_value(u32::from(data)));
        }
        self.set_mii_address(word);
        Ok(())
    }

    /// Result of the last read transaction.
    pub fn mii_read_data(&mut self) -> u16 {
        mii_data::DATA.get(self.mii_data()) as u16
    }

    /// Wait for the busy bit to clear.
    pub fn wait_mii_idle<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let addr = self.addr(mii_addr::OFFSET);
        wait_field_clear(&mut self.bus, addr, mii_addr::BUSY, delay, timeout_us)
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
    use crate::testing::{MockDelay, MockRegisterBus};

    const BASE: usize = 0x3FF6_9000;

    #[test]
    fn divider_from_sys_clock() {
        assert_eq!(MdcClockDivider::from_sys_clock_hz(20_000_000), MdcClockDivider::Div16);
        assert_eq!(MdcClockDivider::from_sys_clock_hz(40_000_000), MdcClockDivider::Div26);
        assert_eq!(MdcClockDivider::from_sys_clock_hz(80_000_000), MdcClockDivider::Div42);
        assert_eq!(MdcClockDivider::from_sys_clock_hz(120_000_000), MdcClockDivider::Div62);
        assert_eq!(MdcClockDivider::from_sys_clock_hz(160_000_000), MdcClockDivider::Div102);
        assert_eq!(MdcClockDivider::from_sys_clock_hz(300_000_000), MdcClockDivider::Div124);
    }

    #[test]
    fn divider_keeps_mdc_under_limit() {
        for mhz in [20u32, 34, 35, 59, 60, 80, 99, 100, 149, 150, 240, 249, 250, 300] {
            let hz = mhz * 1_000_000;
            let div = MdcClockDivider::from_sys_clock_hz(hz);
            assert!(div.mdc_hz(hz) <= MDC_MAX_HZ, "{mhz} MHz -> {div:?}");
        }
    }

    #[test]
    fn divider_register_values() {
        for value in 0..6 {
            let div = MdcClockDivider::from_reg_value(value).unwrap();
            assert_eq!(div.to_reg_value(), value);
        }
        assert_eq!(MdcClockDivider::from_reg_value(6), Err(DecodeError::Reserved));
        assert!(MdcClockDivider::Div124.to_reg_value() <= mii_addr::CSR_CLOCK.max());
    }

    #[test]
    fn command_word_layout() {
        let cmd = MiiCommand::write(1, 0x1F, MdcClockDivider::Div42);
        assert_eq!(cmd.to_word(), Ok((1 << 11) | (0x1F << 6) | 0b11));

        let cmd = MiiCommand::read(31, 2, MdcClockDivider::Div102);
        let word = cmd.to_word().unwrap();
        assert_eq!(word, (31 << 11) | (2 << 6) | (4 << 2) | 1);
        assert_eq!(MiiCommand::from_word(word), Ok(cmd));
    }

    #[test]
    fn command_rejects_wide_addresses() {
        let cmd = MiiCommand::read(32, 0, MdcClockDivider::Div42);
        assert_eq!(cmd.to_word(), Err(FieldError::ValueOutOfRange));
        let cmd = MiiCommand::write(0, 32, MdcClockDivider::Div42);
        assert_eq!(cmd.to_word(), Err(FieldError::ValueOutOfRange));
    }

    #[test]
    fn issue_write_loads_data_first() {
        let mut mac = MacRegs::new(MockRegisterBus::new(), BASE);
        let cmd = MiiCommand::write(3, 0, MdcClockDivider::Div42);
        mac.issue_mii(&cmd, 0x8000).unwrap();

        let writes = mac.free().writes();
        assert_eq!(writes[0], (BASE + 0x1014, 0x8000));
        assert_eq!(writes[1], (BASE + 0x1010, (3 << 11) | 0b11));
    }

    #[test]
    fn issue_read_leaves_data_alone() {
        let mut mac = MacRegs::new(MockRegisterBus::new(), BASE);
        mac.issue_mii(&MiiCommand::read(3, 1, MdcClockDivider::Div42), 0xFFFF)
            .unwrap();
        assert!(mac.free().writes_to(BASE + 0x1014).is_empty());
    }

    #[test]
    fn wait_idle_polls_busy() {
        let mut mac = MacRegs::new(MockRegisterBus::new(), BASE);
        mac.bus_mut().set_register(BASE + 0x1010, 1);
        mac.bus_mut().clear_after_reads(BASE + 0x1010, 1, 3);
        let mut delay = MockDelay::new();
        mac.wait_mii_idle(&mut delay, MDIO_TIMEOUT_US).unwrap();
        assert!(delay.total_us() > 0);

        mac.bus_mut().set_register(BASE + 0x1010, 1);
        assert_eq!(
            mac.wait_mii_idle(&mut delay, 50),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
