//! eFuse Controller Register Definitions
//!
//! Four 256-bit blocks of one-time programmable memory. BLK0 holds chip
//! configuration (MAC address, package, security flags) and is mapped as
//! seven read words and seven write words; BLK1 to BLK3 hold keys or user
//! data and are mapped as eight words each.
//!
//! Read registers only reflect the fuses after a read command, which the
//! ROM issues at boot. See [`EfuseRegs::reload`].

use embedded_hal::delay::DelayNs;

use crate::error::{FieldError, Result};
use crate::register::{reg_ro, reg_rw, reg_wo, register_block};
use crate::soc::field::{Access::*, Field, reset_value};
use crate::soc::{RegisterBus, wait_bits_clear};
#[cfg(feature = "esp32")]
use crate::soc::{DR_REG_EFUSE_BASE, Mmio};

/// Words per block
pub const BLOCK_WORDS: usize = 8;

/// Read disable bits in `blk0_rdata0`, as register masks
pub mod rd_dis {
    /// BLK1 (flash encryption key) unreadable
    pub const BLK1: u32 = 1 << 16;
    /// BLK2 (secure boot key) unreadable
    pub const BLK2: u32 = 1 << 17;
    /// BLK3 unreadable
    pub const BLK3: u32 = 1 << 18;
    /// Flash encryption config in BLK0 unreadable
    pub const BLK0_PARTIAL: u32 = 1 << 19;
}

/// Write disable bits in `blk0_rdata0`, as register masks
pub mod wr_dis {
    /// `RD_DIS`
    pub const RD_DIS: u32 = 1 << 0;
    /// `WR_DIS` itself
    pub const WR_DIS: u32 = 1 << 1;
    /// `FLASH_CRYPT_CNT`
    pub const FLASH_CRYPT_CNT: u32 = 1 << 2;
    /// MAC address and `SPI_PAD_CONFIG_HD`
    pub const MAC_SPI_CONFIG_HD: u32 = 1 << 3;
    /// SDIO regulator settings
    pub const XPD_SDIO: u32 = 1 << 5;
    /// SPI pad overrides
    pub const SPI_PAD_CONFIG: u32 = 1 << 6;
    /// BLK1
    pub const BLK1: u32 = 1 << 7;
    /// BLK2
    pub const BLK2: u32 = 1 << 8;
    /// BLK3
    pub const BLK3: u32 = 1 << 9;
    /// `FLASH_CRYPT_CONFIG` and `CODING_SCHEME`
    pub const FLASH_CRYPT_CODING_SCHEME: u32 = 1 << 10;
    /// `ABS_DONE_0`
    pub const ABS_DONE_0: u32 = 1 << 12;
    /// `ABS_DONE_1`
    pub const ABS_DONE_1: u32 = 1 << 13;
    /// `DISABLE_JTAG`
    pub const JTAG_DISABLE: u32 = 1 << 14;
    /// Console and download mode flags
    pub const CONSOLE_DL_DISABLE: u32 = 1 << 15;
}

/// `CHIP_PACKAGE` values
pub mod package {
    /// ESP32-D0WDQ6
    pub const ESP32D0WDQ6: u32 = 0;
    /// ESP32-D0WDQ5
    pub const ESP32D0WDQ5: u32 = 1;
    /// ESP32-D2WDQ5
    pub const ESP32D2WDQ5: u32 = 2;
    /// ESP32-PICO-D2
    pub const ESP32PICOD2: u32 = 4;
    /// ESP32-U4WDH, same code as ESP32-PICO-D2
    pub const ESP32U4WDH: u32 = 4;
    /// ESP32-PICO-D4
    pub const ESP32PICOD4: u32 = 5;
    /// ESP32-PICO-V3-02
    pub const ESP32PICOV302: u32 = 6;
    /// ESP32-D0WDR2-V3
    pub const ESP32D0WDR2V3: u32 = 7;
}

/// `CODING_SCHEME` values
pub mod coding_scheme {
    /// No encoding, 256 usable bits per block
    pub const NONE: u32 = 0;
    /// 3/4 encoding, 192 usable bits per block
    pub const THREE_FOURTHS: u32 = 1;
    /// Repeat encoding, 128 usable bits per block
    pub const REPEAT: u32 = 2;
}

// =============================================================================
// Register Map
// =============================================================================

/// BLK0 word 0, read
///
/// Flash encryption and protection
pub mod blk0_rdata0 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x000;

    /// Flash encryption counter, encryption is on while an odd number of bits is set
    pub const FLASH_CRYPT_CNT: Field = Field::new("FLASH_CRYPT_CNT", 20, 7, ReadOnly, 0);
    /// Read disable bits, see [`rd_dis`](super::rd_dis)
    pub const RD_DIS: Field = Field::new("RD_DIS", 16, 4, ReadOnly, 0);
    /// Write disable bits, see [`wr_dis`](super::wr_dis)
    pub const WR_DIS: Field = Field::new("WR_DIS", 0, 16, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FLASH_CRYPT_CNT, RD_DIS, WR_DIS];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 1, read
///
/// Factory MAC address, low word
pub mod blk0_rdata1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x004;

    /// MAC address bytes 2 to 5, byte 2 in the top bits
    pub const WIFI_MAC_LOW: Field = Field::new("WIFI_MAC_LOW", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[WIFI_MAC_LOW];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 2, read
///
/// Factory MAC address, high word
pub mod blk0_rdata2 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x008;

    /// MAC address bytes 0 and 1 in bits 15:0, CRC-8 in bits 23:16
    pub const WIFI_MAC_HIGH: Field = Field::new("WIFI_MAC_HIGH", 0, 24, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[WIFI_MAC_HIGH];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 3, read
///
/// Chip version and package
pub mod blk0_rdata3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x00C;

    /// Silicon revision 1 or later
    pub const CHIP_VER_REV1: Field = Field::bit("CHIP_VER_REV1", 15, ReadWrite, 0);
    /// BLK3 words 3 and 4 hold ADC calibration data
    pub const BLK3_PART_RESERVE: Field = Field::bit("BLK3_PART_RESERVE", 14, ReadWrite, 0);
    /// Maximum CPU frequency is fused
    pub const CPU_FREQ_RATED: Field = Field::bit("CPU_FREQ_RATED", 13, ReadWrite, 0);
    /// Fused maximum is 160 MHz instead of 240 MHz
    pub const CPU_FREQ_LOW: Field = Field::bit("CPU_FREQ_LOW", 12, ReadWrite, 0);
    /// Package identifier
    pub const CHIP_PACKAGE: Field = Field::new("CHIP_PACKAGE", 9, 3, ReadWrite, 0);
    /// Flash HD pin override
    pub const SPI_PAD_CONFIG_HD: Field = Field::new("SPI_PAD_CONFIG_HD", 4, 5, ReadOnly, 0);
    /// Cache disabled
    pub const DIS_CACHE: Field = Field::bit("DIS_CACHE", 3, ReadOnly, 0);
    /// 32-pad package
    pub const CHIP_32PAD: Field = Field::bit("CHIP_32PAD", 2, ReadOnly, 0);
    /// Bluetooth disabled
    pub const DIS_BT: Field = Field::bit("DIS_BT", 1, ReadOnly, 0);
    /// Second core disabled
    pub const DIS_APP_CPU: Field = Field::bit("DIS_APP_CPU", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CHIP_VER_REV1, BLK3_PART_RESERVE, CPU_FREQ_RATED, CPU_FREQ_LOW, CHIP_PACKAGE,
        SPI_PAD_CONFIG_HD, DIS_CACHE, CHIP_32PAD, DIS_BT, DIS_APP_CPU,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 4, read
///
/// Oscillator and SDIO regulator trim
pub mod blk0_rdata4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x010;

    /// Use the fused SDIO regulator settings instead of the strapping pin
    pub const SDIO_FORCE: Field = Field::bit("SDIO_FORCE", 16, ReadOnly, 0);
    /// SDIO regulator voltage, 3.3 V when set
    pub const SDIO_TIEH: Field = Field::bit("SDIO_TIEH", 15, ReadOnly, 0);
    /// Power up the SDIO regulator
    pub const XPD_SDIO_REG: Field = Field::bit("XPD_SDIO_REG", 14, ReadOnly, 0);
    /// SDIO regulator drive, low
    pub const SDIO_DREFL: Field = Field::new("SDIO_DREFL", 12, 2, ReadOnly, 0);
    /// SDIO regulator drive, medium
    pub const SDIO_DREFM: Field = Field::new("SDIO_DREFM", 10, 2, ReadOnly, 0);
    /// SDIO regulator drive, high
    pub const SDIO_DREFH: Field = Field::new("SDIO_DREFH", 8, 2, ReadOnly, 0);
    /// 8 MHz oscillator trim
    pub const CK8M_FREQ: Field = Field::new("CK8M_FREQ", 0, 8, ReadOnly, 0);
    /// ADC reference voltage trim, overlaps the SDIO drive strength fields
    pub const ADC_VREF: Field = Field::new("ADC_VREF", 8, 5, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        SDIO_FORCE, SDIO_TIEH, XPD_SDIO_REG, SDIO_DREFL, SDIO_DREFM, SDIO_DREFH, CK8M_FREQ,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 5, read
///
/// Flash encryption config and SPI pad overrides
pub mod blk0_rdata5 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x014;

    /// Flash encryption key tweak
    pub const FLASH_CRYPT_CONFIG: Field = Field::new("FLASH_CRYPT_CONFIG", 28, 4, ReadOnly, 0);
    /// Digital voltage level 6 trim
    pub const DIG_VOL_L6: Field = Field::new("DIG_VOL_L6", 24, 4, ReadOnly, 0);
    /// High-performance voltage level trim
    pub const VOL_LEVEL_HP_INV: Field = Field::new("VOL_LEVEL_HP_INV", 22, 2, ReadOnly, 0);
    /// Flash CS0 pin override
    pub const SPI_PAD_CONFIG_CS0: Field = Field::new("SPI_PAD_CONFIG_CS0", 15, 5, ReadOnly, 0);
    /// Flash D pin override
    pub const SPI_PAD_CONFIG_D: Field = Field::new("SPI_PAD_CONFIG_D", 10, 5, ReadOnly, 0);
    /// Flash Q pin override
    pub const SPI_PAD_CONFIG_Q: Field = Field::new("SPI_PAD_CONFIG_Q", 5, 5, ReadOnly, 0);
    /// Flash CLK pin override
    pub const SPI_PAD_CONFIG_CLK: Field = Field::new("SPI_PAD_CONFIG_CLK", 0, 5, ReadOnly, 0);
    /// Legacy view of bits 27:20
    pub const INST_CONFIG: Field = Field::new("INST_CONFIG", 20, 8, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        FLASH_CRYPT_CONFIG, DIG_VOL_L6, VOL_LEVEL_HP_INV, SPI_PAD_CONFIG_CS0, SPI_PAD_CONFIG_D,
        SPI_PAD_CONFIG_Q, SPI_PAD_CONFIG_CLK,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 6, read
///
/// Security configuration
pub mod blk0_rdata6 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x018;

    /// BLK3 is not used as a key block
    pub const KEY_STATUS: Field = Field::bit("KEY_STATUS", 10, ReadOnly, 0);
    /// Disable the flash cache in download mode
    pub const DISABLE_DL_CACHE: Field = Field::bit("DISABLE_DL_CACHE", 9, ReadOnly, 0);
    /// Disable flash decryption in download mode
    pub const DISABLE_DL_DECRYPT: Field = Field::bit("DISABLE_DL_DECRYPT", 8, ReadOnly, 0);
    /// Disable flash encryption in download mode
    pub const DISABLE_DL_ENCRYPT: Field = Field::bit("DISABLE_DL_ENCRYPT", 7, ReadOnly, 0);
    /// Disable JTAG
    pub const DISABLE_JTAG: Field = Field::bit("DISABLE_JTAG", 6, ReadOnly, 0);
    /// Secure boot v2 enabled
    pub const ABS_DONE_1: Field = Field::bit("ABS_DONE_1", 5, ReadOnly, 0);
    /// Secure boot v1 enabled
    pub const ABS_DONE_0: Field = Field::bit("ABS_DONE_0", 4, ReadOnly, 0);
    /// Disable the SD/MMC host
    pub const DISABLE_SDIO_HOST: Field = Field::bit("DISABLE_SDIO_HOST", 3, ReadOnly, 0);
    /// Disable the ROM BASIC console
    pub const CONSOLE_DEBUG_DISABLE: Field = Field::bit("CONSOLE_DEBUG_DISABLE", 2, ReadOnly, 0);
    /// Coding scheme of BLK1 to BLK3
    pub const CODING_SCHEME: Field = Field::new("CODING_SCHEME", 0, 2, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        KEY_STATUS, DISABLE_DL_CACHE, DISABLE_DL_DECRYPT, DISABLE_DL_ENCRYPT, DISABLE_JTAG,
        ABS_DONE_1, ABS_DONE_0, DISABLE_SDIO_HOST, CONSOLE_DEBUG_DISABLE, CODING_SCHEME,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 0, program
///
/// Same layout as [`blk0_rdata0`].
pub mod blk0_wdata0 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x01C;

    /// Flash encryption counter, encryption is on while an odd number of bits is set
    pub const FLASH_CRYPT_CNT: Field = Field::new("FLASH_CRYPT_CNT", 20, 7, ReadWrite, 0);
    /// Read disable bits, see [`rd_dis`](super::rd_dis)
    pub const RD_DIS: Field = Field::new("RD_DIS", 16, 4, ReadWrite, 0);
    /// Write disable bits, see [`wr_dis`](super::wr_dis)
    pub const WR_DIS: Field = Field::new("WR_DIS", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FLASH_CRYPT_CNT, RD_DIS, WR_DIS];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 1, program
///
/// Same layout as [`blk0_rdata1`].
pub mod blk0_wdata1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x020;

    /// MAC address bytes 2 to 5, byte 2 in the top bits
    pub const WIFI_MAC_LOW: Field = Field::new("WIFI_MAC_LOW", 0, 32, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[WIFI_MAC_LOW];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 2, program
///
/// Same layout as [`blk0_rdata2`].
pub mod blk0_wdata2 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x024;

    /// MAC address bytes 0 and 1 in bits 15:0, CRC-8 in bits 23:16
    pub const WIFI_MAC_HIGH: Field = Field::new("WIFI_MAC_HIGH", 0, 24, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[WIFI_MAC_HIGH];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 3, program
///
/// Same layout as [`blk0_rdata3`].
pub mod blk0_wdata3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x028;

    /// Silicon revision 1 or later
    pub const CHIP_VER_REV1: Field = Field::bit("CHIP_VER_REV1", 15, ReadWrite, 0);
    /// BLK3 words 3 and 4 hold ADC calibration data
    pub const BLK3_PART_RESERVE: Field = Field::bit("BLK3_PART_RESERVE", 14, ReadWrite, 0);
    /// Maximum CPU frequency is fused
    pub const CPU_FREQ_RATED: Field = Field::bit("CPU_FREQ_RATED", 13, ReadWrite, 0);
    /// Fused maximum is 160 MHz instead of 240 MHz
    pub const CPU_FREQ_LOW: Field = Field::bit("CPU_FREQ_LOW", 12, ReadWrite, 0);
    /// Package identifier
    pub const CHIP_PACKAGE: Field = Field::new("CHIP_PACKAGE", 9, 3, ReadWrite, 0);
    /// Flash HD pin override
    pub const SPI_PAD_CONFIG_HD: Field = Field::new("SPI_PAD_CONFIG_HD", 4, 5, ReadWrite, 0);
    /// Cache disabled
    pub const DIS_CACHE: Field = Field::bit("DIS_CACHE", 3, ReadWrite, 0);
    /// 32-pad package
    pub const CHIP_32PAD: Field = Field::bit("CHIP_32PAD", 2, ReadWrite, 0);
    /// Bluetooth disabled
    pub const DIS_BT: Field = Field::bit("DIS_BT", 1, ReadWrite, 0);
    /// Second core disabled
    pub const DIS_APP_CPU: Field = Field::bit("DIS_APP_CPU", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        CHIP_VER_REV1, BLK3_PART_RESERVE, CPU_FREQ_RATED, CPU_FREQ_LOW, CHIP_PACKAGE,
        SPI_PAD_CONFIG_HD, DIS_CACHE, CHIP_32PAD, DIS_BT, DIS_APP_CPU,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 4, program
///
/// Same layout as [`blk0_rdata4`].
pub mod blk0_wdata4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x02C;

    /// Use the fused SDIO regulator settings instead of the strapping pin
    pub const SDIO_FORCE: Field = Field::bit("SDIO_FORCE", 16, ReadWrite, 0);
    /// SDIO regulator voltage, 3.3 V when set
    pub const SDIO_TIEH: Field = Field::bit("SDIO_TIEH", 15, ReadWrite, 0);
    /// Power up the SDIO regulator
    pub const XPD_SDIO_REG: Field = Field::bit("XPD_SDIO_REG", 14, ReadWrite, 0);
    /// SDIO regulator drive, low
    pub const SDIO_DREFL: Field = Field::new("SDIO_DREFL", 12, 2, ReadWrite, 0);
    /// SDIO regulator drive, medium
    pub const SDIO_DREFM: Field = Field::new("SDIO_DREFM", 10, 2, ReadWrite, 0);
    /// SDIO regulator drive, high
    pub const SDIO_DREFH: Field = Field::new("SDIO_DREFH", 8, 2, ReadWrite, 0);
    /// 8 MHz oscillator trim
    pub const CK8M_FREQ: Field = Field::new("CK8M_FREQ", 0, 8, ReadWrite, 0);
    /// ADC reference voltage trim, overlaps the SDIO drive strength fields
    pub const ADC_VREF: Field = Field::new("ADC_VREF", 8, 5, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        SDIO_FORCE, SDIO_TIEH, XPD_SDIO_REG, SDIO_DREFL, SDIO_DREFM, SDIO_DREFH, CK8M_FREQ,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 5, program
///
/// Same layout as [`blk0_rdata5`].
pub mod blk0_wdata5 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x030;

    /// Flash encryption key tweak
    pub const FLASH_CRYPT_CONFIG: Field = Field::new("FLASH_CRYPT_CONFIG", 28, 4, ReadWrite, 0);
    /// Digital voltage level 6 trim
    pub const DIG_VOL_L6: Field = Field::new("DIG_VOL_L6", 24, 4, ReadWrite, 0);
    /// High-performance voltage level trim
    pub const VOL_LEVEL_HP_INV: Field = Field::new("VOL_LEVEL_HP_INV", 22, 2, ReadWrite, 0);
    /// Flash CS0 pin override
    pub const SPI_PAD_CONFIG_CS0: Field = Field::new("SPI_PAD_CONFIG_CS0", 15, 5, ReadWrite, 0);
    /// Flash D pin override
    pub const SPI_PAD_CONFIG_D: Field = Field::new("SPI_PAD_CONFIG_D", 10, 5, ReadWrite, 0);
    /// Flash Q pin override
    pub const SPI_PAD_CONFIG_Q: Field = Field::new("SPI_PAD_CONFIG_Q", 5, 5, ReadWrite, 0);
    /// Flash CLK pin override
    pub const SPI_PAD_CONFIG_CLK: Field = Field::new("SPI_PAD_CONFIG_CLK", 0, 5, ReadWrite, 0);
    /// Legacy view of bits 27:20
    pub const INST_CONFIG: Field = Field::new("INST_CONFIG", 20, 8, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        FLASH_CRYPT_CONFIG, DIG_VOL_L6, VOL_LEVEL_HP_INV, SPI_PAD_CONFIG_CS0, SPI_PAD_CONFIG_D,
        SPI_PAD_CONFIG_Q, SPI_PAD_CONFIG_CLK,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK0 word 6, program
///
/// Same layout as [`blk0_rdata6`].
pub mod blk0_wdata6 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x034;

    /// BLK3 is not used as a key block
    pub const KEY_STATUS: Field = Field::bit("KEY_STATUS", 10, ReadWrite, 0);
    /// Disable the flash cache in download mode
    pub const DISABLE_DL_CACHE: Field = Field::bit("DISABLE_DL_CACHE", 9, ReadWrite, 0);
    /// Disable flash decryption in download mode
    pub const DISABLE_DL_DECRYPT: Field = Field::bit("DISABLE_DL_DECRYPT", 8, ReadWrite, 0);
    /// Disable flash encryption in download mode
    pub const DISABLE_DL_ENCRYPT: Field = Field::bit("DISABLE_DL_ENCRYPT", 7, ReadWrite, 0);
    /// Disable JTAG
    pub const DISABLE_JTAG: Field = Field::bit("DISABLE_JTAG", 6, ReadWrite, 0);
    /// Secure boot v2 enabled
    pub const ABS_DONE_1: Field = Field::bit("ABS_DONE_1", 5, ReadWrite, 0);
    /// Secure boot v1 enabled
    pub const ABS_DONE_0: Field = Field::bit("ABS_DONE_0", 4, ReadWrite, 0);
    /// Disable the SD/MMC host
    pub const DISABLE_SDIO_HOST: Field = Field::bit("DISABLE_SDIO_HOST", 3, ReadWrite, 0);
    /// Disable the ROM BASIC console
    pub const CONSOLE_DEBUG_DISABLE: Field = Field::bit("CONSOLE_DEBUG_DISABLE", 2, ReadWrite, 0);
    /// Coding scheme of BLK1 to BLK3
    pub const CODING_SCHEME: Field = Field::new("CODING_SCHEME", 0, 2, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        KEY_STATUS, DISABLE_DL_CACHE, DISABLE_DL_DECRYPT, DISABLE_DL_ENCRYPT, DISABLE_JTAG,
        ABS_DONE_1, ABS_DONE_0, DISABLE_SDIO_HOST, CONSOLE_DEBUG_DISABLE, CODING_SCHEME,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK3 word 3, read
///
/// The calibration view is valid when
/// `blk0_rdata3::BLK3_PART_RESERVE` is set.
pub mod blk3_rdata3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x084;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadOnly, 0);
    /// ADC2 two-point calibration, high reading
    pub const ADC2_TP_HIGH: Field = Field::new("ADC2_TP_HIGH", 23, 9, ReadWrite, 0);
    /// ADC2 two-point calibration, low reading
    pub const ADC2_TP_LOW: Field = Field::new("ADC2_TP_LOW", 16, 7, ReadWrite, 0);
    /// ADC1 two-point calibration, high reading
    pub const ADC1_TP_HIGH: Field = Field::new("ADC1_TP_HIGH", 7, 9, ReadWrite, 0);
    /// ADC1 two-point calibration, low reading
    pub const ADC1_TP_LOW: Field = Field::new("ADC1_TP_LOW", 0, 7, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATA];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK3 word 4, read
pub mod blk3_rdata4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x088;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadOnly, 0);
    /// Reserved for calibration data
    pub const CAL_RESERVED: Field = Field::new("CAL_RESERVED", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATA];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK3 word 3, program
///
/// The calibration view is valid when
/// `blk0_rdata3::BLK3_PART_RESERVE` is set.
pub mod blk3_wdata3 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x0E4;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadWrite, 0);
    /// ADC2 two-point calibration, high reading
    pub const ADC2_TP_HIGH: Field = Field::new("ADC2_TP_HIGH", 23, 9, ReadWrite, 0);
    /// ADC2 two-point calibration, low reading
    pub const ADC2_TP_LOW: Field = Field::new("ADC2_TP_LOW", 16, 7, ReadWrite, 0);
    /// ADC1 two-point calibration, high reading
    pub const ADC1_TP_HIGH: Field = Field::new("ADC1_TP_HIGH", 7, 9, ReadWrite, 0);
    /// ADC1 two-point calibration, low reading
    pub const ADC1_TP_LOW: Field = Field::new("ADC1_TP_LOW", 0, 7, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATA];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK3 word 4, program
pub mod blk3_wdata4 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x0E8;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadWrite, 0);
    /// Reserved for calibration data
    pub const CAL_RESERVED: Field = Field::new("CAL_RESERVED", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATA];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Timing configuration
pub mod clk {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x0F8;

    /// Force the controller clock on
    pub const CLK_EN: Field = Field::bit("CLK_EN", 16, ReadWrite, 0);
    /// Programming timing, high
    pub const CLK_SEL1: Field = Field::new("CLK_SEL1", 8, 8, ReadWrite, 0x40);
    /// Programming timing, low
    pub const CLK_SEL0: Field = Field::new("CLK_SEL0", 0, 8, ReadWrite, 0x52);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[CLK_EN, CLK_SEL1, CLK_SEL0];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Command configuration
pub mod conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x0FC;

    /// Ignore read disable bits while programming
    pub const FORCE_NO_WR_RD_DIS: Field = Field::bit("FORCE_NO_WR_RD_DIS", 16, ReadWrite, 1);
    /// Command unlock code, [`READ_OP_CODE`] or [`PGM_OP_CODE`]
    pub const OP_CODE: Field = Field::new("OP_CODE", 0, 16, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FORCE_NO_WR_RD_DIS, OP_CODE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);

    /// Unlock code for a read command
    pub const READ_OP_CODE: u32 = 0x5AA5;
    /// Unlock code for a program command
    pub const PGM_OP_CODE: u32 = 0x5A5A;
}

/// Status
pub mod status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x100;

    /// Controller debug state
    pub const DEBUG: Field = Field::new("DEBUG", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DEBUG];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Command
pub mod cmd {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x104;

    /// Program the write data registers, clears when done
    pub const PGM_CMD: Field = Field::bit("PGM_CMD", 1, ReadWrite, 0);
    /// Reload the read data registers, clears when done
    pub const READ_CMD: Field = Field::bit("READ_CMD", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PGM_CMD, READ_CMD];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Raw interrupt status
pub mod int_raw {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x108;

    /// Program command finished
    pub const PGM_DONE: Field = Field::bit("PGM_DONE", 1, ReadOnly, 0);
    /// Read command finished
    pub const READ_DONE: Field = Field::bit("READ_DONE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PGM_DONE, READ_DONE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Masked interrupt status
pub mod int_st {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x10C;

    /// Program command finished
    pub const PGM_DONE: Field = Field::bit("PGM_DONE", 1, ReadOnly, 0);
    /// Read command finished
    pub const READ_DONE: Field = Field::bit("READ_DONE", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PGM_DONE, READ_DONE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt enable
pub mod int_ena {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x110;

    /// Program command finished
    pub const PGM_DONE: Field = Field::bit("PGM_DONE", 1, ReadWrite, 0);
    /// Read command finished
    pub const READ_DONE: Field = Field::bit("READ_DONE", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PGM_DONE, READ_DONE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt clear
pub mod int_clr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x114;

    /// Program command finished
    pub const PGM_DONE: Field = Field::bit("PGM_DONE", 1, WriteOnly, 0);
    /// Read command finished
    pub const READ_DONE: Field = Field::bit("READ_DONE", 0, WriteOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PGM_DONE, READ_DONE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Programming DAC configuration
pub mod dac_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x118;

    /// Route the programming DAC clock to a pad
    pub const DAC_CLK_PAD_SEL: Field = Field::bit("DAC_CLK_PAD_SEL", 8, ReadWrite, 0);
    /// Programming DAC clock divider
    pub const DAC_CLK_DIV: Field = Field::new("DAC_CLK_DIV", 0, 8, ReadWrite, 0x28);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DAC_CLK_PAD_SEL, DAC_CLK_DIV];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// 3/4 coding decode status
pub mod dec_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x11C;

    /// Per-block 3/4 coding decode warnings
    pub const DEC_WARNINGS: Field = Field::new("DEC_WARNINGS", 0, 12, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DEC_WARNINGS];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Version
pub mod date {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x1FC;

    /// Controller version
    pub const DATE: Field = Field::new("DATE", 0, 32, ReadWrite, 0x1604_2600);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// BLK1 to BLK3 read data
///
/// The three blocks are contiguous, eight words each.
pub mod blk_rdata {
    use super::*;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadOnly, 0);

    /// Offset of word `word` (0..=7) of block `block` (1..=3).
    pub const fn offset(block: usize, word: usize) -> Option<usize> {
        if block == 0 || block > 3 || word >= BLOCK_WORDS {
            return None;
        }
        Some(0x038 + (block - 1) * 0x20 + word * 4)
    }
}

/// BLK1 to BLK3 write data
pub mod blk_wdata {
    use super::*;

    /// Whole word
    pub const DATA: Field = Field::new("DATA", 0, 32, ReadWrite, 0);

    /// Offset of word `word` (0..=7) of block `block` (1..=3).
    pub const fn offset(block: usize, word: usize) -> Option<usize> {
        if block == 0 || block > 3 || word >= BLOCK_WORDS {
            return None;
        }
        Some(0x098 + (block - 1) * 0x20 + word * 4)
    }
}

/// Offset of BLK0 read word `word` (0..=6).
pub const fn blk0_rdata_offset(word: usize) -> Option<usize> {
    if word > 6 {
        return None;
    }
    Some(blk0_rdata0::OFFSET + word * 4)
}

/// Offset of BLK0 write word `word` (0..=6).
pub const fn blk0_wdata_offset(word: usize) -> Option<usize> {
    if word > 6 {
        return None;
    }
    Some(blk0_wdata0::OFFSET + word * 4)
}

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// eFuse controller register block
    EfuseRegs
}

#[cfg(feature = "esp32")]
impl EfuseRegs<Mmio> {
    /// eFuse registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not create a second handle to the
    /// same block while this one is in use.
    pub const unsafe fn steal() -> Self {
        Self::new(unsafe { Mmio::new() }, DR_REG_EFUSE_BASE)
    }
}

impl<B: RegisterBus> EfuseRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(clk, set_clk, clk::OFFSET, "Timing Configuration register");
    reg_rw!(conf, set_conf, conf::OFFSET, "Command Configuration register");
    reg_rw!(cmd, set_cmd, cmd::OFFSET, "Command register");
    reg_rw!(interrupt_enable, set_interrupt_enable, int_ena::OFFSET, "Interrupt Enable register");
    reg_rw!(dac_conf, set_dac_conf, dac_conf::OFFSET, "Programming DAC Configuration register");

    reg_ro!(status, status::OFFSET, "Status register");
    reg_ro!(raw_interrupts, int_raw::OFFSET, "Raw Interrupt Status register");
    reg_ro!(interrupt_status, int_st::OFFSET, "Interrupt Status register");
    reg_ro!(dec_status, dec_status::OFFSET, "Decode Status register");
    reg_ro!(date, date::OFFSET, "Date register (version info)");

    reg_wo!(clear_interrupts, int_clr::OFFSET, "Interrupt Clear register");

    // -------------------------------------------------------------------------
    // Fuse data
    // -------------------------------------------------------------------------

    /// Read BLK0 word `word` (0..=6)
    pub fn blk0_word(&mut self, word: usize) -> Result<u32> {
        let offset = blk0_rdata_offset(word).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        Ok(self.bus.read(addr))
    }

    /// Read word `word` (0..=7) of block `block` (1..=3)
    pub fn block_word(&mut self, block: usize, word: usize) -> Result<u32> {
        let offset = blk_rdata::offset(block, word).ok_or(FieldError::InvalidSlot)?;
        let addr = self.addr(offset);
        Ok(self.bus.read(addr))
    }

    /// Read all 256 bits of block `block` (1..=3), word 0 first.
    ///
    /// A read-protected block reads back as zeros.
    pub fn read_block(&mut self, block: usize) -> Result<[u32; BLOCK_WORDS]> {
        let mut words = [0u32; BLOCK_WORDS];
        for (word, slot) in words.iter_mut().enumerate() {
            *slot = self.block_word(block, word)?;
        }
        Ok(words)
    }

    /// Reload the read registers from the fuses.
    ///
    /// Loads the read op code, issues the read command and waits for the
    /// controller to clear it.
    pub fn reload<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let conf_addr = self.addr(conf::OFFSET);
        self.bus
            .write_field_truncating(conf_addr, conf::OP_CODE, conf::READ_OP_CODE);
        let cmd_addr = self.addr(cmd::OFFSET);
        self.bus.write(cmd_addr, cmd::READ_CMD.mask());

        #[cfg(feature = "defmt")]
        defmt::debug!("efuse: read command issued");

        wait_bits_clear(
            &mut self.bus,
            cmd_addr,
            cmd::READ_CMD.mask() | cmd::PGM_CMD.mask(),
            delay,
            timeout_us,
        )
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

    const BASE: usize = 0x3FF5_A000;

    #[test]
    fn blk0_offsets() {
        let read = [
            blk0_rdata0::OFFSET,
            blk0_rdata1::OFFSET,
            blk0_rdata2::OFFSET,
            blk0_rdata3::OFFSET,
            blk0_rdata4::OFFSET,
            blk0_rdata5::OFFSET,
            blk0_rdata6::OFFSET,
        ];
        let write = [
            blk0_wdata0::OFFSET,
            blk0_wdata1::OFFSET,
            blk0_wdata2::OFFSET,
            blk0_wdata3::OFFSET,
            blk0_wdata4::OFFSET,
            blk0_wdata5::OFFSET,
            blk0_wdata6::OFFSET,
        ];
        for word in 0..7 {
            assert_eq!(read[word], word * 4);
            assert_eq!(write[word], 0x1C + word * 4);
            assert_eq!(blk0_rdata_offset(word), Some(read[word]));
            assert_eq!(blk0_wdata_offset(word), Some(write[word]));
        }
        assert_eq!(blk0_rdata_offset(7), None);
    }

    #[test]
    fn data_block_offsets() {
        assert_eq!(blk_rdata::offset(1, 0), Some(0x038));
        assert_eq!(blk_rdata::offset(1, 7), Some(0x054));
        assert_eq!(blk_rdata::offset(2, 0), Some(0x058));
        assert_eq!(blk_rdata::offset(3, 3), Some(blk3_rdata3::OFFSET));
        assert_eq!(blk_rdata::offset(3, 4), Some(blk3_rdata4::OFFSET));
        assert_eq!(blk_rdata::offset(3, 7), Some(0x094));
        assert_eq!(blk_wdata::offset(1, 0), Some(0x098));
        assert_eq!(blk_wdata::offset(2, 0), Some(0x0B8));
        assert_eq!(blk_wdata::offset(3, 3), Some(blk3_wdata3::OFFSET));
        assert_eq!(blk_wdata::offset(3, 7), Some(0x0F4));
        assert_eq!(blk_rdata::offset(0, 0), None);
        assert_eq!(blk_rdata::offset(4, 0), None);
        assert_eq!(blk_wdata::offset(1, 8), None);
    }

    #[test]
    fn control_offsets() {
        assert_eq!(clk::OFFSET, 0x0F8);
        assert_eq!(conf::OFFSET, 0x0FC);
        assert_eq!(status::OFFSET, 0x100);
        assert_eq!(cmd::OFFSET, 0x104);
        assert_eq!(int_raw::OFFSET, 0x108);
        assert_eq!(int_st::OFFSET, 0x10C);
        assert_eq!(int_ena::OFFSET, 0x110);
        assert_eq!(int_clr::OFFSET, 0x114);
        assert_eq!(dac_conf::OFFSET, 0x118);
        assert_eq!(dec_status::OFFSET, 0x11C);
        assert_eq!(date::OFFSET, 0x1FC);
    }

    #[test]
    fn blk0_layout() {
        assert_eq!(blk0_rdata0::FLASH_CRYPT_CNT.mask(), 0x07F0_0000);
        assert_eq!(blk0_rdata0::RD_DIS.mask(), 0x000F_0000);
        assert_eq!(blk0_rdata0::WR_DIS.mask(), 0x0000_FFFF);
        assert_eq!(blk0_rdata2::WIFI_MAC_HIGH.mask(), 0x00FF_FFFF);
        assert_eq!(blk0_rdata3::CHIP_PACKAGE.mask(), 0x0000_0E00);
        assert_eq!(blk0_rdata3::SPI_PAD_CONFIG_HD.mask(), 0x0000_01F0);
        assert_eq!(blk0_rdata3::CHIP_VER_REV1.mask(), 1 << 15);
        assert_eq!(blk0_rdata4::ADC_VREF.mask(), 0x0000_1F00);
        assert_eq!(blk0_rdata5::INST_CONFIG.mask(), 0x0FF0_0000);
        assert_eq!(blk0_rdata5::SPI_PAD_CONFIG_CS0.mask(), 0x000F_8000);
        assert_eq!(blk0_rdata6::CODING_SCHEME.mask(), 0x3);
        assert_eq!(blk0_rdata6::KEY_STATUS.mask(), 1 << 10);
        for (read, write) in blk0_rdata3::FIELDS.iter().zip(blk0_wdata3::FIELDS) {
            assert_eq!(read.mask(), write.mask(), "{}", read.name());
        }
    }

    #[test]
    fn protection_bits_sit_inside_their_fields() {
        for bit in [rd_dis::BLK1, rd_dis::BLK2, rd_dis::BLK3, rd_dis::BLK0_PARTIAL] {
            assert_eq!(bit & !blk0_rdata0::RD_DIS.mask(), 0);
        }
        assert_eq!(blk0_rdata0::RD_DIS.get(rd_dis::BLK3), 0b0100);
        assert_eq!(wr_dis::CONSOLE_DL_DISABLE & !blk0_rdata0::WR_DIS.mask(), 0);
    }

    #[test]
    fn fields_never_overlap() {
        let maps: &[&[Field]] = &[
            blk0_rdata0::FIELDS,
            blk0_rdata1::FIELDS,
            blk0_rdata2::FIELDS,
            blk0_rdata3::FIELDS,
            blk0_rdata4::FIELDS,
            blk0_rdata5::FIELDS,
            blk0_rdata6::FIELDS,
            blk0_wdata0::FIELDS,
            blk0_wdata1::FIELDS,
            blk0_wdata2::FIELDS,
            blk0_wdata3::FIELDS,
            blk0_wdata4::FIELDS,
            blk0_wdata5::FIELDS,
            blk0_wdata6::FIELDS,
            blk3_rdata3::FIELDS,
            blk3_rdata4::FIELDS,
            blk3_wdata3::FIELDS,
            blk3_wdata4::FIELDS,
            clk::FIELDS,
            conf::FIELDS,
            status::FIELDS,
            cmd::FIELDS,
            int_raw::FIELDS,
            int_st::FIELDS,
            int_ena::FIELDS,
            int_clr::FIELDS,
            dac_conf::FIELDS,
            dec_status::FIELDS,
            date::FIELDS,
        ];
        for fields in maps {
            assert!(fields_disjoint(fields), "{}", fields[0].name());
        }
    }

    #[test]
    fn aliases_stay_out_of_field_lists() {
        assert!(fields_disjoint(blk0_rdata4::FIELDS));
        assert!(fields_disjoint(blk0_rdata5::FIELDS));
        assert!(blk0_rdata4::ADC_VREF.overlaps(&blk0_rdata4::SDIO_DREFH));
        assert!(blk0_rdata5::INST_CONFIG.overlaps(&blk0_rdata5::DIG_VOL_L6));
        assert!(!blk0_rdata4::FIELDS.contains(&blk0_rdata4::ADC_VREF));
        assert_eq!(blk3_rdata3::ADC2_TP_HIGH.mask(), 0xFF80_0000);
        assert_eq!(blk3_rdata3::ADC1_TP_LOW.mask(), 0x0000_007F);
        assert_eq!(blk3_rdata4::CAL_RESERVED.mask(), 0x0000_FFFF);
    }

    #[test]
    fn reset_values() {
        assert_eq!(clk::RESET, 0x0000_4052);
        assert_eq!(conf::RESET, 0x0001_0000);
        assert_eq!(dac_conf::RESET, 0x0000_0028);
        assert_eq!(date::RESET, 0x1604_2600);
        assert_eq!(cmd::RESET, 0);
    }

    #[test]
    fn op_codes() {
        assert_eq!(conf::READ_OP_CODE, 0x5AA5);
        assert_eq!(conf::PGM_OP_CODE, 0x5A5A);
        assert!(conf::READ_OP_CODE <= conf::OP_CODE.max());
    }

    #[test]
    fn read_block_orders_words() {
        let mut bus = MockRegisterBus::new();
        for word in 0..8 {
            bus.set_register(BASE + 0x058 + word * 4, 0x1000 + word as u32);
        }
        let mut efuse = EfuseRegs::new(bus, BASE);

        let block = efuse.read_block(2).unwrap();
        assert_eq!(block[0], 0x1000);
        assert_eq!(block[7], 0x1007);
        assert_eq!(
            efuse.read_block(0),
            Err(Error::Field(FieldError::InvalidSlot))
        );
    }

    #[test]
    fn reload_keeps_force_bit_and_waits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x0FC, conf::RESET);
        let mut efuse = EfuseRegs::new(bus, BASE);
        efuse.bus_mut().clear_after_reads(BASE + 0x104, 0x1, 2);
        let mut delay = MockDelay::new();

        efuse.reload(&mut delay, 1_000).unwrap();
        assert_eq!(efuse.conf(), 0x0001_5AA5);

        let bus = efuse.free();
        assert_eq!(bus.writes_to(BASE + 0x104), std::vec![0x1]);
        assert_eq!(bus.register(BASE + 0x104), 0);
    }

    #[test]
    fn reload_times_out_when_command_sticks() {
        let mut efuse = EfuseRegs::new(MockRegisterBus::new(), BASE);
        let mut delay = MockDelay::new();
        assert_eq!(
            efuse.reload(&mut delay, 30),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
