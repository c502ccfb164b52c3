//! APB Control Register Definitions
//!
//! The APB control block (also called SYSCON) holds the CPU clock
//! pre-divider, the REF_TICK dividers for every clock source and the
//! digital controller of the SAR ADCs.

use crate::error::{FieldError, Result};
use crate::register::{reg_field, reg_ro, reg_rw, register_block};
use crate::soc::RegisterBus;
use crate::soc::field::{Access::*, Field, reset_value};
#[cfg(feature = "esp32")]
use crate::soc::{DR_REG_APB_CTRL_BASE, Mmio};

/// Entries in each SAR pattern table
pub const PATT_TAB_ENTRIES: usize = 16;

/// `saradc_ctrl::WORK_MODE` values
pub mod work_mode {
    /// One unit, chosen by `SAR_SEL`
    pub const SINGLE: u32 = 0;
    /// Both units in parallel
    pub const DOUBLE: u32 = 1;
    /// Units take turns
    pub const ALTERNATE: u32 = 2;
}

/// Layout of one 8-bit pattern table entry
pub mod patt_entry {
    use super::*;

    /// ADC channel
    pub const CHANNEL: Field = Field::new("CHANNEL", 4, 4, ReadWrite, 0);
    /// Result width, 0 = 9 bits up to 3 = 12 bits
    pub const BIT_WIDTH: Field = Field::new("BIT_WIDTH", 2, 2, ReadWrite, 0);
    /// Input attenuation
    pub const ATTEN: Field = Field::new("ATTEN", 0, 2, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[CHANNEL, BIT_WIDTH, ATTEN];
}

/// Register offset and shift of pattern entry `index` of SAR unit `unit`.
///
/// `unit` is 1 or 2, `index` runs 0..16. Entry 0 sits in the top byte of
/// the first table word.
pub const fn pattern_slot(unit: usize, index: usize) -> Option<(usize, u32)> {
    let base = match unit {
        1 => sar1_patt_tab1::OFFSET,
        2 => sar2_patt_tab1::OFFSET,
        _ => return None,
    };
    if index >= PATT_TAB_ENTRIES {
        return None;
    }
    Some((base + (index / 4) * 4, (24 - (index % 4) * 8) as u32))
}

/// System clock configuration
pub mod sysclk_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x000;

    /// Switch the CPU clock source without waiting for a tick boundary
    pub const QUICK_CLK_CHNG: Field = Field::bit("QUICK_CLK_CHNG", 13, ReadWrite, 1);
    /// Reset the REF_TICK counters
    pub const RST_TICK_CNT: Field = Field::bit("RST_TICK_CNT", 12, ReadWrite, 0);
    /// Force the APB control clock on
    pub const CLK_EN: Field = Field::bit("CLK_EN", 11, ReadWrite, 0);
    /// Enable the 320 MHz PLL output
    pub const CLK_320M_EN: Field = Field::bit("CLK_320M_EN", 10, ReadWrite, 0);
    /// Divider from XTAL to the CPU clock, minus one
    pub const PRE_DIV_CNT: Field = Field::new("PRE_DIV_CNT", 0, 10, ReadWrite, 1);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[QUICK_CLK_CHNG, RST_TICK_CNT, CLK_EN, CLK_320M_EN, PRE_DIV_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// REF_TICK divider while running from XTAL
pub mod xtal_tick_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x004;

    /// Source cycles per REF_TICK, minus one
    pub const TICK_NUM: Field = Field::new("TICK_NUM", 0, 8, ReadWrite, 0x27);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TICK_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// REF_TICK divider while running from PLL
pub mod pll_tick_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x008;

    /// Source cycles per REF_TICK, minus one
    pub const TICK_NUM: Field = Field::new("TICK_NUM", 0, 8, ReadWrite, 0x4F);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TICK_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// REF_TICK divider while running from the 8 MHz oscillator
pub mod ck8m_tick_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x00C;

    /// Source cycles per REF_TICK, minus one
    pub const TICK_NUM: Field = Field::new("TICK_NUM", 0, 8, ReadWrite, 0xB);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TICK_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Digital SAR ADC control
pub mod saradc_ctrl {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x010;

    /// Route conversion results to I2S0 instead of the SAR registers
    pub const DATA_TO_I2S: Field = Field::bit("DATA_TO_I2S", 26, ReadWrite, 0);
    /// Use the 12-bit result format with the unit number
    pub const DATA_SAR_SEL: Field = Field::bit("DATA_SAR_SEL", 25, ReadWrite, 0);
    /// Rewind the SAR2 pattern pointer
    pub const SAR2_PATT_P_CLEAR: Field = Field::bit("SAR2_PATT_P_CLEAR", 24, ReadWrite, 0);
    /// Rewind the SAR1 pattern pointer
    pub const SAR1_PATT_P_CLEAR: Field = Field::bit("SAR1_PATT_P_CLEAR", 23, ReadWrite, 0);
    /// SAR2 pattern table length, minus one
    pub const SAR2_PATT_LEN: Field = Field::new("SAR2_PATT_LEN", 19, 4, ReadWrite, 0xF);
    /// SAR1 pattern table length, minus one
    pub const SAR1_PATT_LEN: Field = Field::new("SAR1_PATT_LEN", 15, 4, ReadWrite, 0xF);
    /// SAR clock divider
    pub const SAR_CLK_DIV: Field = Field::new("SAR_CLK_DIV", 7, 8, ReadWrite, 4);
    /// Gate the SAR clock when idle
    pub const SAR_CLK_GATED: Field = Field::bit("SAR_CLK_GATED", 6, ReadWrite, 1);
    /// Unit used in single mode, set for SAR2
    pub const SAR_SEL: Field = Field::bit("SAR_SEL", 5, ReadWrite, 0);
    /// Scan mode, see [`work_mode`](super::work_mode)
    pub const WORK_MODE: Field = Field::new("WORK_MODE", 3, 2, ReadWrite, 0);
    /// SAR2 controlled by the digital controller instead of RTC
    pub const SAR2_MUX: Field = Field::bit("SAR2_MUX", 2, ReadWrite, 0);
    /// Start a conversion when forced
    pub const START: Field = Field::bit("START", 1, ReadWrite, 0);
    /// Software starts conversions
    pub const START_FORCE: Field = Field::bit("START_FORCE", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        DATA_TO_I2S, DATA_SAR_SEL, SAR2_PATT_P_CLEAR, SAR1_PATT_P_CLEAR, SAR2_PATT_LEN,
        SAR1_PATT_LEN, SAR_CLK_DIV, SAR_CLK_GATED, SAR_SEL, WORK_MODE, SAR2_MUX, START, START_FORCE,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Digital SAR ADC control 2
pub mod saradc_ctrl2 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x014;

    /// Invert SAR2 results
    pub const SAR2_INV: Field = Field::bit("SAR2_INV", 10, ReadWrite, 0);
    /// Invert SAR1 results
    pub const SAR1_INV: Field = Field::bit("SAR1_INV", 9, ReadWrite, 0);
    /// Conversions before the controller stops
    pub const MAX_MEAS_NUM: Field = Field::new("MAX_MEAS_NUM", 1, 8, ReadWrite, 0xFF);
    /// Stop after `MAX_MEAS_NUM` conversions
    pub const MEAS_NUM_LIMIT: Field = Field::bit("MEAS_NUM_LIMIT", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[SAR2_INV, SAR1_INV, MAX_MEAS_NUM, MEAS_NUM_LIMIT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Digital SAR ADC state machine timing
pub mod saradc_fsm {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x018;

    /// Sample cycles
    pub const SAMPLE_CYCLE: Field = Field::new("SAMPLE_CYCLE", 24, 8, ReadWrite, 2);
    /// Start wait cycles
    pub const START_WAIT: Field = Field::new("START_WAIT", 16, 8, ReadWrite, 8);
    /// Standby wait cycles
    pub const STANDBY_WAIT: Field = Field::new("STANDBY_WAIT", 8, 8, ReadWrite, 0xFF);
    /// Reset wait cycles
    pub const RSTB_WAIT: Field = Field::new("RSTB_WAIT", 0, 8, ReadWrite, 8);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[SAMPLE_CYCLE, START_WAIT, STANDBY_WAIT, RSTB_WAIT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR1 pattern table, entries 0 to 3
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar1_patt_tab1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x01C;

    /// Entry 0
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 1
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 2
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 3
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR1 pattern table, entries 4 to 7
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar1_patt_tab2 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x020;

    /// Entry 4
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 5
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 6
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 7
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR1 pattern table, entries 8 to 11
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar1_patt_tab3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x024;

    /// Entry 8
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 9
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 10
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 11
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR1 pattern table, entries 12 to 15
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar1_patt_tab4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x028;

    /// Entry 12
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 13
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 14
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 15
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR2 pattern table, entries 0 to 3
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar2_patt_tab1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x02C;

    /// Entry 0
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 1
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 2
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 3
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR2 pattern table, entries 4 to 7
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar2_patt_tab2 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x030;

    /// Entry 4
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 5
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 6
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 7
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR2 pattern table, entries 8 to 11
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar2_patt_tab3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x034;

    /// Entry 8
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 9
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 10
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 11
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// SAR2 pattern table, entries 12 to 15
///
/// See [`patt_entry`](super::patt_entry) for the entry format.
pub mod sar2_patt_tab4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x038;

    /// Entry 12
    pub const ITEM0: Field = Field::new("ITEM0", 24, 8, ReadWrite, 0xF);
    /// Entry 13
    pub const ITEM1: Field = Field::new("ITEM1", 16, 8, ReadWrite, 0xF);
    /// Entry 14
    pub const ITEM2: Field = Field::new("ITEM2", 8, 8, ReadWrite, 0xF);
    /// Entry 15
    pub const ITEM3: Field = Field::new("ITEM3", 0, 8, ReadWrite, 0xF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ITEM0, ITEM1, ITEM2, ITEM3];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// REF_TICK divider while running from the audio PLL
pub mod apll_tick_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x03C;

    /// Source cycles per REF_TICK, minus one
    pub const TICK_NUM: Field = Field::new("TICK_NUM", 0, 8, ReadWrite, 0x63);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TICK_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Version
pub mod date {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x07C;

    /// Block version
    pub const DATE: Field = Field::new("DATE", 0, 32, ReadWrite, 0x1604_2000);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// APB control register block
    ApbCtrlRegs
}

#[cfg(feature = "esp32")]
impl ApbCtrlRegs<Mmio> {
    /// APB control registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not create a second handle to the
    /// same block while this one is in use.
    pub const unsafe fn steal() -> Self {
        Self::new(unsafe { Mmio::new() }, DR_REG_APB_CTRL_BASE)
    }
}

impl<B: RegisterBus> ApbCtrlRegs<B> {
    reg_rw!(sysclk_conf, set_sysclk_conf, sysclk_conf::OFFSET, "System Clock Configuration register");
    reg_rw!(saradc_ctrl, set_saradc_ctrl, saradc_ctrl::OFFSET, "SAR ADC Control register");
    reg_rw!(saradc_ctrl2, set_saradc_ctrl2, saradc_ctrl2::OFFSET, "SAR ADC Control 2 register");
    reg_rw!(saradc_fsm, set_saradc_fsm, saradc_fsm::OFFSET, "SAR ADC FSM register");
    reg_ro!(date, date::OFFSET, "Date register (version info)");

    reg_field!(pre_div_cnt, set_pre_div_cnt, sysclk_conf::OFFSET,
               sysclk_conf::PRE_DIV_CNT, "CPU clock pre-divider");
    reg_field!(xtal_tick_num, set_xtal_tick_num, xtal_tick_conf::OFFSET,
               xtal_tick_conf::TICK_NUM, "XTAL REF_TICK divider");
    reg_field!(pll_tick_num, set_pll_tick_num, pll_tick_conf::OFFSET,
               pll_tick_conf::TICK_NUM, "PLL REF_TICK divider");
    reg_field!(ck8m_tick_num, set_ck8m_tick_num, ck8m_tick_conf::OFFSET,
               ck8m_tick_conf::TICK_NUM, "8 MHz oscillator REF_TICK divider");
    reg_field!(apll_tick_num, set_apll_tick_num, apll_tick_conf::OFFSET,
               apll_tick_conf::TICK_NUM, "audio PLL REF_TICK divider");
    reg_field!(work_mode, set_work_mode, saradc_ctrl::OFFSET,
               saradc_ctrl::WORK_MODE, "SAR ADC scan mode");

    /// Read pattern entry `index` of SAR unit `unit`.
    pub fn sar_pattern(&mut self, unit: usize, index: usize) -> Result<u8> {
        let (offset, shift) = pattern_slot(unit, index).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        Ok((self.bus.read(addr) >> shift) as u8)
    }

    /// Replace pattern entry `index` of SAR unit `unit`, leaving its
    /// neighbours in the same word untouched.
    pub fn set_sar_pattern(&mut self, unit: usize, index: usize, entry: u8) -> Result<()> {
        let (offset, shift) = pattern_slot(unit, index).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        self.bus.write_bits_shifted(addr, 0xFF, u32::from(entry), shift);
        Ok(())
    }

    /// Set how many pattern entries SAR unit `unit` cycles through (1..=16).
    pub fn set_sar_pattern_len(&mut self, unit: usize, len: usize) -> Result<()> {
        let field = match unit {
            1 => saradc_ctrl::SAR1_PATT_LEN,
            2 => saradc_ctrl::SAR2_PATT_LEN,
            _ => return Err(FieldError::InvalidInstance.into()),
        };
        if len == 0 || len > PATT_TAB_ENTRIES {
            return Err(FieldError::ValueOutOfRange.into());
        }
        let addr = self.addr(saradc_ctrl::OFFSET);
        self.bus.write_field(addr, field, (len - 1) as u32)
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

    const BASE: usize = 0x3FF6_6000;

    #[test]
    fn register_offsets() {
        assert_eq!(sysclk_conf::OFFSET, 0x00);
        assert_eq!(xtal_tick_conf::OFFSET, 0x04);
        assert_eq!(pll_tick_conf::OFFSET, 0x08);
        assert_eq!(ck8m_tick_conf::OFFSET, 0x0C);
        assert_eq!(saradc_ctrl::OFFSET, 0x10);
        assert_eq!(saradc_ctrl2::OFFSET, 0x14);
        assert_eq!(saradc_fsm::OFFSET, 0x18);
        assert_eq!(sar1_patt_tab1::OFFSET, 0x1C);
        assert_eq!(sar1_patt_tab4::OFFSET, 0x28);
        assert_eq!(sar2_patt_tab1::OFFSET, 0x2C);
        assert_eq!(sar2_patt_tab4::OFFSET, 0x38);
        assert_eq!(apll_tick_conf::OFFSET, 0x3C);
        assert_eq!(date::OFFSET, 0x7C);
    }

    #[test]
    fn reset_values() {
        assert_eq!(sysclk_conf::RESET, 0x0000_2001);
        assert_eq!(xtal_tick_conf::RESET, 39);
        assert_eq!(pll_tick_conf::RESET, 79);
        assert_eq!(ck8m_tick_conf::RESET, 11);
        assert_eq!(apll_tick_conf::RESET, 99);
        assert_eq!(saradc_ctrl::RESET, 0x007F_8240);
        assert_eq!(saradc_ctrl2::RESET, 0x0000_01FE);
        assert_eq!(saradc_fsm::RESET, 0x0208_FF08);
        assert_eq!(sar1_patt_tab1::RESET, 0x0F0F_0F0F);
        assert_eq!(sar2_patt_tab3::RESET, 0x0F0F_0F0F);
        assert_eq!(date::RESET, 0x1604_2000);
    }

    #[test]
    fn fields_never_overlap() {
        let maps: &[&[Field]] = &[
            patt_entry::FIELDS,
            sysclk_conf::FIELDS,
            xtal_tick_conf::FIELDS,
            pll_tick_conf::FIELDS,
            ck8m_tick_conf::FIELDS,
            saradc_ctrl::FIELDS,
            saradc_ctrl2::FIELDS,
            saradc_fsm::FIELDS,
            sar1_patt_tab1::FIELDS,
            sar1_patt_tab2::FIELDS,
            sar1_patt_tab3::FIELDS,
            sar1_patt_tab4::FIELDS,
            sar2_patt_tab1::FIELDS,
            sar2_patt_tab2::FIELDS,
            sar2_patt_tab3::FIELDS,
            sar2_patt_tab4::FIELDS,
            apll_tick_conf::FIELDS,
            date::FIELDS,
        ];
        for fields in maps {
            assert!(fields_disjoint(fields), "{}", fields[0].name());
        }
    }

    #[test]
    fn saradc_ctrl_layout() {
        assert_eq!(saradc_ctrl::SAR1_PATT_LEN.shift(), 15);
        assert_eq!(saradc_ctrl::SAR2_PATT_LEN.shift(), 19);
        assert_eq!(saradc_ctrl::SAR_CLK_DIV.mask(), 0xFF << 7);
        assert_eq!(saradc_ctrl::WORK_MODE.mask(), 0x18);
        assert_eq!(saradc_ctrl::DATA_SAR_SEL.mask(), 1 << 25);
        assert!(fields_disjoint(saradc_ctrl::FIELDS));
        assert!(fields_disjoint(saradc_fsm::FIELDS));
        assert!(fields_disjoint(patt_entry::FIELDS));
    }

    #[test]
    fn pattern_slots() {
        assert_eq!(pattern_slot(1, 0), Some((0x1C, 24)));
        assert_eq!(pattern_slot(1, 3), Some((0x1C, 0)));
        assert_eq!(pattern_slot(1, 5), Some((0x20, 16)));
        assert_eq!(pattern_slot(2, 15), Some((0x38, 0)));
        assert_eq!(pattern_slot(2, 16), None);
        assert_eq!(pattern_slot(3, 0), None);
    }

    #[test]
    fn set_sar_pattern_keeps_neighbours() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x30, sar2_patt_tab2::RESET);
        let mut apb = ApbCtrlRegs::new(bus, BASE);

        apb.set_sar_pattern(2, 6, 0xAD).unwrap();
        assert_eq!(apb.bus_mut().register(BASE + 0x30), 0x0F0F_AD0F);
        assert_eq!(apb.sar_pattern(2, 6), Ok(0xAD));
        assert_eq!(apb.sar_pattern(2, 7), Ok(0x0F));
        assert_eq!(
            apb.set_sar_pattern(0, 0, 0),
            Err(Error::Field(FieldError::InvalidSlot))
        );
    }

    #[test]
    fn pattern_len_is_stored_minus_one() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x10, saradc_ctrl::RESET);
        let mut apb = ApbCtrlRegs::new(bus, BASE);

        apb.set_sar_pattern_len(1, 4).unwrap();
        assert_eq!(saradc_ctrl::SAR1_PATT_LEN.get(apb.saradc_ctrl()), 3);
        assert_eq!(saradc_ctrl::SAR2_PATT_LEN.get(apb.saradc_ctrl()), 15);
        assert_eq!(
            apb.set_sar_pattern_len(1, 0),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
        assert_eq!(
            apb.set_sar_pattern_len(1, 17),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
    }

    #[test]
    fn tick_dividers() {
        let mut apb = ApbCtrlRegs::new(MockRegisterBus::new(), BASE);
        apb.set_xtal_tick_num(39).unwrap();
        assert_eq!(apb.xtal_tick_num(), 39);
        assert!(apb.set_pll_tick_num(256).is_err());
        assert_eq!(apb.bus_mut().register(BASE + 0x04), 39);
    }
}
