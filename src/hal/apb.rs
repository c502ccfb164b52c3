//! Typed APB control values
//!
//! REF_TICK divider calculation, the CPU pre-divider and the SAR ADC
//! digital controller's pattern table entries.

use crate::error::{DecodeError, DecodeResult, FieldError, FieldResult, Result};
use crate::register::apb_ctrl::{
    ApbCtrlRegs, PATT_TAB_ENTRIES, patt_entry, saradc_ctrl, sysclk_conf, work_mode,
};
use crate::soc::RegisterBus;
use crate::soc::clock::REF_CLK_FREQ;

// =============================================================================
// REF_TICK
// =============================================================================

/// Clock source feeding a REF_TICK divider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickSource {
    /// Crystal, through the CPU pre-divider
    Xtal,
    /// PLL (APB at 80 MHz)
    Pll,
    /// Internal 8 MHz oscillator
    Ck8m,
    /// Audio PLL
    Apll,
}

/// `TICK_NUM` for a REF_TICK of `tick_hz` derived from `source_hz`.
///
/// The divider counts `TICK_NUM + 1` source cycles, so the source must be
/// an exact multiple of the tick and the quotient must fit in 8 bits.
pub const fn tick_num(source_hz: u32, tick_hz: u32) -> FieldResult<u32> {
    if tick_hz == 0 || source_hz < tick_hz || source_hz % tick_hz != 0 {
        return Err(FieldError::ValueOutOfRange);
    }
    let cycles = source_hz / tick_hz;
    if cycles - 1 > 0xFF {
        return Err(FieldError::ValueOutOfRange);
    }
    Ok(cycles - 1)
}

// =============================================================================
// System Clock
// =============================================================================

/// Decoded `sysclk_conf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SysClockConfig {
    /// CPU clock divider from the crystal (1..=1024)
    pub pre_divider: u32,
    /// 320 MHz PLL output enabled
    pub clk_320m: bool,
    /// Switch sources without waiting for a tick boundary
    pub quick_change: bool,
}

impl SysClockConfig {
    /// Decode a `sysclk_conf` value.
    pub const fn from_bits(value: u32) -> Self {
        Self {
            pre_divider: sysclk_conf::PRE_DIV_CNT.get(value) + 1,
            clk_320m: sysclk_conf::CLK_320M_EN.is_set(value),
            quick_change: sysclk_conf::QUICK_CLK_CHNG.is_set(value),
        }
    }

    /// Replace the fields this type covers in `value`.
    pub const fn apply(&self, value: u32) -> FieldResult<u32> {
        if self.pre_divider == 0 || self.pre_divider - 1 > sysclk_conf::PRE_DIV_CNT.max() {
            return Err(FieldError::ValueOutOfRange);
        }
        let mut value = sysclk_conf::PRE_DIV_CNT.insert(value, self.pre_divider - 1);
        value = sysclk_conf::CLK_320M_EN.insert(value, self.clk_320m as u32);
        Ok(sysclk_conf::QUICK_CLK_CHNG.insert(value, self.quick_change as u32))
    }

    /// CPU clock for a crystal of `xtal_hz`.
    pub const fn cpu_hz(&self, xtal_hz: u32) -> u32 {
        xtal_hz / self.pre_divider
    }
}

// =============================================================================
// SAR ADC Pattern Table
// =============================================================================

/// SAR ADC result width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcWidth {
    /// 9 bits
    Bits9 = 0,
    /// 10 bits
    Bits10 = 1,
    /// 11 bits
    Bits11 = 2,
    /// 12 bits
    #[default]
    Bits12 = 3,
}

impl AdcWidth {
    /// Number of result bits.
    pub const fn bits(self) -> u8 {
        self as u8 + 9
    }
}

/// SAR ADC input attenuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Attenuation {
    /// 0 dB
    #[default]
    Db0 = 0,
    /// 2.5 dB
    Db2_5 = 1,
    /// 6 dB
    Db6 = 2,
    /// 11 dB
    Db11 = 3,
}

/// One pattern table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternEntry {
    /// ADC channel (0..=15)
    pub channel: u8,
    /// Result width
    pub width: AdcWidth,
    /// Input attenuation
    pub atten: Attenuation,
}

impl PatternEntry {
    /// Pack into the 8-bit table format.
    pub const fn to_byte(&self) -> FieldResult<u8> {
        if self.channel as u32 > patt_entry::CHANNEL.max() {
            return Err(FieldError::ValueOutOfRange);
        }
        let value = patt_entry::CHANNEL.to_value(self.channel as u32)
            | patt_entry::BIT_WIDTH.to_value(self.width as u32)
            | patt_entry::ATTEN.to_value(self.atten as u32);
        Ok(value as u8)
    }

    /// Unpack an 8-bit table entry.
    pub const fn from_byte(byte: u8) -> Self {
        let value = byte as u32;
        let width = match patt_entry::BIT_WIDTH.get(value) {
            0 => AdcWidth::Bits9,
            1 => AdcWidth::Bits10,
            2 => AdcWidth::Bits11,
            _ => AdcWidth::Bits12,
        };
        let atten = match patt_entry::ATTEN.get(value) {
            0 => Attenuation::Db0,
            1 => Attenuation::Db2_5,
            2 => Attenuation::Db6,
            _ => Attenuation::Db11,
        };
        Self {
            channel: patt_entry::CHANNEL.get(value) as u8,
            width,
            atten,
        }
    }
}

/// How the digital controller schedules the two SAR units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanMode {
    /// Only the unit picked by `SAR_SEL`
    #[default]
    Single,
    /// Both units at once
    Double,
    /// Units alternate
    Alternate,
}

impl ScanMode {
    /// `WORK_MODE` value
    pub const fn to_bits(self) -> u32 {
        match self {
            Self::Single => work_mode::SINGLE,
            Self::Double => work_mode::DOUBLE,
            Self::Alternate => work_mode::ALTERNATE,
        }
    }

    /// Decode `WORK_MODE`. Value 3 is reserved.
    pub const fn from_bits(bits: u32) -> DecodeResult<Self> {
        match bits {
            work_mode::SINGLE => Ok(Self::Single),
            work_mode::DOUBLE => Ok(Self::Double),
            work_mode::ALTERNATE => Ok(Self::Alternate),
            _ => Err(DecodeError::Reserved),
        }
    }
}

// =============================================================================
// Register Block Helpers
// =============================================================================

impl<B: RegisterBus> ApbCtrlRegs<B> {
    /// Decoded system clock configuration.
    pub fn sys_clock_config(&mut self) -> SysClockConfig {
        SysClockConfig::from_bits(self.sysclk_conf())
    }

    /// Update the system clock configuration, keeping other bits.
    pub fn set_sys_clock_config(&mut self, config: &SysClockConfig) -> Result<()> {
        let value = config.apply(self.sysclk_conf())?;
        self.set_sysclk_conf(value);
        Ok(())
    }

    /// Program the REF_TICK divider of `source` for a 1 MHz tick.
    pub fn configure_ref_tick(&mut self, source: TickSource, source_hz: u32) -> Result<()> {
        let num = tick_num(source_hz, REF_CLK_FREQ)?;
        match source {
            TickSource::Xtal => self.set_xtal_tick_num(num),
            TickSource::Pll => self.set_pll_tick_num(num),
            TickSource::Ck8m => self.set_ck8m_tick_num(num),
            TickSource::Apll => self.set_apll_tick_num(num),
        }
    }

    /// Current scan mode.
    pub fn scan_mode(&mut self) -> DecodeResult<ScanMode> {
        ScanMode::from_bits(self.work_mode())
    }

    /// Select the scan mode.
    pub fn set_scan_mode(&mut self, mode: ScanMode) -> Result<()> {
        self.set_work_mode(mode.to_bits())
    }

    /// Load `entries` into the pattern table of `unit` and set its length.
    pub fn load_pattern_table(&mut self, unit: usize, entries: &[PatternEntry]) -> Result<()> {
        if entries.is_empty() || entries.len() > PATT_TAB_ENTRIES {
            return Err(FieldError::ValueOutOfRange.into());
        }
        for (index, entry) in entries.iter().enumerate() {
            self.set_sar_pattern(unit, index, entry.to_byte()?)?;
        }
        self.set_sar_pattern_len(unit, entries.len())
    }

    /// Pattern entry `index` of `unit`.
    pub fn pattern_entry(&mut self, unit: usize, index: usize) -> Result<PatternEntry> {
        Ok(PatternEntry::from_byte(self.sar_pattern(unit, index)?))
    }

    /// Pattern length of `unit` currently programmed.
    pub fn pattern_len(&mut self, unit: usize) -> Result<usize> {
        let field = match unit {
            1 => saradc_ctrl::SAR1_PATT_LEN,
            2 => saradc_ctrl::SAR2_PATT_LEN,
            _ => return Err(FieldError::InvalidInstance.into()),
        };
        let addr = self.addr(saradc_ctrl::OFFSET);
        Ok(self.bus.read_field(addr, field) as usize + 1)
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
    use crate::register::apb_ctrl::{
        apll_tick_conf, ck8m_tick_conf, pll_tick_conf, sar2_patt_tab1, xtal_tick_conf,
    };
    use crate::soc::clock::APB_CLK_FREQ;
    use crate::testing::MockRegisterBus;

    const BASE: usize = 0x3FF6_6000;

    #[test]
    fn tick_num_matches_reset_values() {
        assert_eq!(tick_num(40_000_000, REF_CLK_FREQ), Ok(xtal_tick_conf::TICK_NUM.reset()));
        assert_eq!(tick_num(APB_CLK_FREQ, REF_CLK_FREQ), Ok(pll_tick_conf::TICK_NUM.reset()));
        assert_eq!(tick_num(12_000_000, REF_CLK_FREQ), Ok(ck8m_tick_conf::TICK_NUM.reset()));
        assert_eq!(tick_num(100_000_000, REF_CLK_FREQ), Ok(apll_tick_conf::TICK_NUM.reset()));
    }

    #[test]
    fn tick_num_rejects_bad_ratios() {
        assert_eq!(tick_num(1_000_000, 0), Err(FieldError::ValueOutOfRange));
        assert_eq!(tick_num(500_000, REF_CLK_FREQ), Err(FieldError::ValueOutOfRange));
        assert_eq!(tick_num(26_500_000, REF_CLK_FREQ), Err(FieldError::ValueOutOfRange));
        assert_eq!(tick_num(257_000_000, REF_CLK_FREQ), Err(FieldError::ValueOutOfRange));
        assert_eq!(tick_num(256_000_000, REF_CLK_FREQ), Ok(255));
        assert_eq!(tick_num(REF_CLK_FREQ, REF_CLK_FREQ), Ok(0));
    }

    #[test]
    fn sys_clock_round_trip_keeps_other_bits() {
        let config = SysClockConfig::from_bits(sysclk_conf::RESET);
        assert_eq!(config.pre_divider, 2);
        assert!(config.quick_change);
        assert!(!config.clk_320m);
        assert_eq!(config.cpu_hz(40_000_000), 20_000_000);

        let raw = sysclk_conf::CLK_EN.mask();
        let config = SysClockConfig {
            pre_divider: 1,
            clk_320m: true,
            quick_change: false,
        };
        let value = config.apply(raw).unwrap();
        assert_eq!(value, raw | sysclk_conf::CLK_320M_EN.mask());
        assert_eq!(SysClockConfig::from_bits(value), config);

        let too_big = SysClockConfig {
            pre_divider: 1025,
            ..config
        };
        assert_eq!(too_big.apply(0), Err(FieldError::ValueOutOfRange));
    }

    #[test]
    fn pattern_entry_packing() {
        let entry = PatternEntry {
            channel: 7,
            width: AdcWidth::Bits12,
            atten: Attenuation::Db11,
        };
        assert_eq!(entry.to_byte(), Ok(0x7F));
        assert_eq!(PatternEntry::from_byte(0x7F), entry);
        assert_eq!(PatternEntry::from_byte(0x0F).channel, 0);
        assert_eq!(AdcWidth::Bits10.bits(), 10);

        let wide = PatternEntry {
            channel: 16,
            ..entry
        };
        assert_eq!(wide.to_byte(), Err(FieldError::ValueOutOfRange));
    }

    #[test]
    fn scan_mode_bits() {
        for mode in [ScanMode::Single, ScanMode::Double, ScanMode::Alternate] {
            assert_eq!(ScanMode::from_bits(mode.to_bits()), Ok(mode));
        }
        assert_eq!(ScanMode::from_bits(3), Err(DecodeError::Reserved));
    }

    #[test]
    fn configure_ref_tick_writes_divider() {
        let mut apb = ApbCtrlRegs::new(MockRegisterBus::new(), BASE);
        apb.configure_ref_tick(TickSource::Pll, APB_CLK_FREQ).unwrap();
        assert_eq!(apb.pll_tick_num(), 79);
        apb.configure_ref_tick(TickSource::Xtal, 26_000_000).unwrap();
        assert_eq!(apb.xtal_tick_num(), 25);
        assert_eq!(
            apb.configure_ref_tick(TickSource::Ck8m, 8_500_000),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
    }

    #[test]
    fn load_pattern_table_fills_unit() {
        let mut apb = ApbCtrlRegs::new(MockRegisterBus::new(), BASE);
        let entries = [
            PatternEntry {
                channel: 0,
                width: AdcWidth::Bits12,
                atten: Attenuation::Db0,
            },
            PatternEntry {
                channel: 3,
                width: AdcWidth::Bits9,
                atten: Attenuation::Db6,
            },
        ];
        apb.load_pattern_table(2, &entries).unwrap();
        assert_eq!(apb.pattern_entry(2, 1).unwrap(), entries[1]);
        assert_eq!(apb.pattern_len(2), Ok(2));

        let bus = apb.free();
        assert_eq!(bus.register(BASE + sar2_patt_tab1::OFFSET), 0x0C32_0000);
    }

    #[test]
    fn load_pattern_table_rejects_bad_input() {
        let mut apb = ApbCtrlRegs::new(MockRegisterBus::new(), BASE);
        assert_eq!(
            apb.load_pattern_table(1, &[]),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
        assert_eq!(
            apb.load_pattern_table(3, &[PatternEntry::default()]),
            Err(Error::Field(FieldError::InvalidSlot))
        );
        assert_eq!(apb.pattern_len(0), Err(Error::Field(FieldError::InvalidInstance)));
    }
}
