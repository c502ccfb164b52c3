//! Decoded eFuse contents
//!
//! Interprets the BLK0 read registers: chip package and ratings, the
//! factory MAC address, the coding scheme and the protection bits. All
//! decoders work on raw words so they can be tested without hardware;
//! the [`EfuseRegs`] helpers read those words first.

use crate::error::{DecodeError, DecodeResult, FieldError, Result};
use crate::hal::emac::MacAddress;
use crate::register::efuse::{
    EfuseRegs, blk0_rdata0, blk0_rdata1, blk0_rdata2, blk0_rdata3, blk0_rdata6, coding_scheme,
    package, rd_dis,
};
use crate::soc::RegisterBus;

// =============================================================================
// Coding Scheme
// =============================================================================

/// Encoding applied to BLK1 to BLK3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodingScheme {
    /// Raw bits
    None,
    /// 3/4 encoding
    ThreeFourths,
    /// Every bit stored twice
    Repeat,
}

impl CodingScheme {
    /// Decode `CODING_SCHEME`. The unused value 3 reads as no encoding.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            coding_scheme::THREE_FOURTHS => Self::ThreeFourths,
            coding_scheme::REPEAT => Self::Repeat,
            _ => Self::None,
        }
    }

    /// Usable bits per 256-bit block.
    pub const fn usable_bits(self) -> u32 {
        match self {
            Self::None => 256,
            Self::ThreeFourths => 192,
            Self::Repeat => 128,
        }
    }
}

// =============================================================================
// Chip Identification
// =============================================================================

/// Package variant from `CHIP_PACKAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipPackage {
    /// ESP32-D0WDQ6
    D0wdq6,
    /// ESP32-D0WDQ5
    D0wdq5,
    /// ESP32-D2WDQ5
    D2wdq5,
    /// ESP32-PICO-D2, or ESP32-U4WDH which shares its code
    PicoD2,
    /// ESP32-PICO-D4
    PicoD4,
    /// ESP32-PICO-V3-02
    PicoV302,
    /// ESP32-D0WDR2-V3
    D0wdr2V3,
    /// Value with no known package
    Unknown(u8),
}

impl ChipPackage {
    /// Decode the 3-bit package value.
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            package::ESP32D0WDQ6 => Self::D0wdq6,
            package::ESP32D0WDQ5 => Self::D0wdq5,
            package::ESP32D2WDQ5 => Self::D2wdq5,
            package::ESP32PICOD2 => Self::PicoD2,
            package::ESP32PICOD4 => Self::PicoD4,
            package::ESP32PICOV302 => Self::PicoV302,
            package::ESP32D0WDR2V3 => Self::D0wdr2V3,
            other => Self::Unknown(other as u8),
        }
    }

    /// Flash inside the package
    pub const fn has_embedded_flash(self) -> bool {
        matches!(self, Self::D2wdq5 | Self::PicoD2 | Self::PicoD4 | Self::PicoV302)
    }
}

/// Chip facts from BLK0 word 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Package variant
    pub package: ChipPackage,
    /// Silicon revision 1 or later
    pub rev1: bool,
    /// Second core fused off
    pub app_cpu_disabled: bool,
    /// Bluetooth fused off
    pub bt_disabled: bool,
    /// Highest rated CPU frequency in MHz
    pub max_cpu_mhz: u32,
}

impl ChipInfo {
    /// Decode BLK0 read word 3.
    pub const fn from_word(word: u32) -> Self {
        let rated = blk0_rdata3::CPU_FREQ_RATED.is_set(word);
        let low = blk0_rdata3::CPU_FREQ_LOW.is_set(word);
        Self {
            package: ChipPackage::from_bits(blk0_rdata3::CHIP_PACKAGE.get(word)),
            rev1: blk0_rdata3::CHIP_VER_REV1.is_set(word),
            app_cpu_disabled: blk0_rdata3::DIS_APP_CPU.is_set(word),
            bt_disabled: blk0_rdata3::DIS_BT.is_set(word),
            max_cpu_mhz: if rated && low { 160 } else { 240 },
        }
    }

    /// Number of usable CPU cores.
    pub const fn core_count(&self) -> u32 {
        if self.app_cpu_disabled { 1 } else { 2 }
    }
}

// =============================================================================
// Factory MAC Address
// =============================================================================

/// CRC-8 with the reflected 0x8C polynomial, zero initial value.
///
/// This is the checksum burned next to the factory MAC address.
pub const fn crc8_maxim(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    let mut i = 0;
    while i < data.len() {
        crc ^= data[i];
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0x8C } else { crc >> 1 };
            bit += 1;
        }
        i += 1;
    }
    crc
}

/// Factory MAC address and its stored checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryMac {
    /// Address bytes
    pub address: MacAddress,
    /// CRC burned alongside the address
    pub crc: u8,
}

impl FactoryMac {
    /// Split BLK0 read words 1 and 2.
    ///
    /// Word 2 holds address bytes 0 and 1 in its low half and the CRC above
    /// them; word 1 holds bytes 2 to 5, most significant first.
    pub const fn from_words(word1: u32, word2: u32) -> Self {
        let low = blk0_rdata1::WIFI_MAC_LOW.get(word1).to_be_bytes();
        let high = blk0_rdata2::WIFI_MAC_HIGH.get(word2);
        Self {
            address: MacAddress::new([
                (high >> 8) as u8,
                high as u8,
                low[0],
                low[1],
                low[2],
                low[3],
            ]),
            crc: (high >> 16) as u8,
        }
    }

    /// Whether the stored CRC matches the address.
    pub const fn is_valid(&self) -> bool {
        crc8_maxim(&self.address.0) == self.crc
    }

    /// The address, if its CRC matches.
    pub const fn verified(&self) -> DecodeResult<MacAddress> {
        if self.is_valid() {
            Ok(self.address)
        } else {
            Err(DecodeError::CrcMismatch)
        }
    }
}

// =============================================================================
// Protection
// =============================================================================

/// Flash encryption is on while `FLASH_CRYPT_CNT` has an odd bit count.
pub const fn flash_encryption_enabled(word0: u32) -> bool {
    blk0_rdata0::FLASH_CRYPT_CNT.get(word0).count_ones() % 2 == 1
}

/// Whether `block` (1..=3) is read protected according to BLK0 word 0.
pub const fn is_block_read_protected(word0: u32, block: usize) -> Option<bool> {
    let bit = match block {
        1 => rd_dis::BLK1,
        2 => rd_dis::BLK2,
        3 => rd_dis::BLK3,
        _ => return None,
    };
    Some(word0 & bit != 0)
}

impl<B: RegisterBus> EfuseRegs<B> {
    fn read_word(&mut self, offset: usize) -> u32 {
        let addr = self.addr(offset);
        self.bus.read(addr)
    }

    /// Package and ratings.
    pub fn chip_info(&mut self) -> ChipInfo {
        let word = self.read_word(blk0_rdata3::OFFSET);
        ChipInfo::from_word(word)
    }

    /// Coding scheme of BLK1 to BLK3.
    pub fn coding_scheme(&mut self) -> CodingScheme {
        let word = self.read_word(blk0_rdata6::OFFSET);
        CodingScheme::from_bits(blk0_rdata6::CODING_SCHEME.get(word))
    }

    /// Factory MAC address with its CRC checked.
    pub fn factory_mac(&mut self) -> Result<MacAddress> {
        let word1 = self.read_word(blk0_rdata1::OFFSET);
        let word2 = self.read_word(blk0_rdata2::OFFSET);
        let mac = FactoryMac::from_words(word1, word2);
        #[cfg(feature = "defmt")]
        if !mac.is_valid() {
            defmt::warn!("efuse: factory MAC CRC mismatch ({=u8:#x})", mac.crc);
        }
        Ok(mac.verified()?)
    }

    /// Flash encryption state.
    pub fn flash_encryption_enabled(&mut self) -> bool {
        let word = self.read_word(blk0_rdata0::OFFSET);
        flash_encryption_enabled(word)
    }

    /// Read protection of `block` (1..=3).
    pub fn is_read_protected(&mut self, block: usize) -> Result<bool> {
        let word = self.read_word(blk0_rdata0::OFFSET);
        Ok(is_block_read_protected(word, block).ok_or(FieldError::InvalidSlot)?)
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
    use crate::testing::MockRegisterBus;

    const BASE: usize = 0x3FF5_A000;

    fn mac_words(mac: [u8; 6]) -> (u32, u32) {
        let word1 = u32::from_be_bytes([mac[2], mac[3], mac[4], mac[5]]);
        let crc = crc8_maxim(&mac);
        let word2 = (u32::from(crc) << 16) | (u32::from(mac[0]) << 8) | u32::from(mac[1]);
        (word1, word2)
    }

    #[test]
    fn crc8_check_value() {
        assert_eq!(crc8_maxim(b"123456789"), 0xA1);
        assert_eq!(crc8_maxim(&[]), 0);
    }

    #[test]
    fn factory_mac_byte_order() {
        let mac = FactoryMac::from_words(0xC401_0203, 0x00AB_240A);
        assert_eq!(mac.address.0, [0x24, 0x0A, 0xC4, 0x01, 0x02, 0x03]);
        assert_eq!(mac.crc, 0xAB);
    }

    #[test]
    fn factory_mac_crc_checked() {
        let bytes = [0x24, 0x0A, 0xC4, 0x12, 0x34, 0x56];
        let (word1, word2) = mac_words(bytes);
        assert_eq!(FactoryMac::from_words(word1, word2).verified(), Ok(MacAddress(bytes)));

        let corrupt = FactoryMac::from_words(word1 ^ 1, word2);
        assert!(!corrupt.is_valid());
        assert_eq!(corrupt.verified(), Err(DecodeError::CrcMismatch));
    }

    #[test]
    fn factory_mac_from_registers() {
        let bytes = [0x30, 0xAE, 0xA4, 0x00, 0x11, 0x22];
        let (word1, word2) = mac_words(bytes);
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x04, word1);
        bus.set_register(BASE + 0x08, word2);
        let mut efuse = EfuseRegs::new(bus, BASE);
        assert_eq!(efuse.factory_mac(), Ok(MacAddress(bytes)));

        efuse.bus_mut().set_register(BASE + 0x08, word2 ^ 0x0001_0000);
        assert_eq!(
            efuse.factory_mac(),
            Err(Error::Decode(DecodeError::CrcMismatch))
        );
    }

    #[test]
    fn coding_scheme_values() {
        assert_eq!(CodingScheme::from_bits(0), CodingScheme::None);
        assert_eq!(CodingScheme::from_bits(1), CodingScheme::ThreeFourths);
        assert_eq!(CodingScheme::from_bits(2), CodingScheme::Repeat);
        assert_eq!(CodingScheme::from_bits(3), CodingScheme::None);
        assert_eq!(CodingScheme::ThreeFourths.usable_bits(), 192);
    }

    #[test]
    fn chip_info_decode() {
        let word = (5 << 9) | (1 << 15) | (1 << 13) | (1 << 12) | 1;
        let info = ChipInfo::from_word(word);
        assert_eq!(info.package, ChipPackage::PicoD4);
        assert!(info.rev1);
        assert!(info.app_cpu_disabled);
        assert!(!info.bt_disabled);
        assert_eq!(info.max_cpu_mhz, 160);
        assert_eq!(info.core_count(), 1);
        assert!(info.package.has_embedded_flash());

        let info = ChipInfo::from_word(1 << 12);
        assert_eq!(info.package, ChipPackage::D0wdq6);
        assert_eq!(info.max_cpu_mhz, 240);
        assert_eq!(info.core_count(), 2);
        assert_eq!(ChipPackage::from_bits(3), ChipPackage::Unknown(3));
    }

    #[test]
    fn every_package_code_decodes() {
        let expected = [
            (ChipPackage::D0wdq6, false),
            (ChipPackage::D0wdq5, false),
            (ChipPackage::D2wdq5, true),
            (ChipPackage::Unknown(3), false),
            (ChipPackage::PicoD2, true),
            (ChipPackage::PicoD4, true),
            (ChipPackage::PicoV302, true),
            (ChipPackage::D0wdr2V3, false),
        ];
        for (code, (package, flash)) in expected.iter().enumerate() {
            let word = blk0_rdata3::CHIP_PACKAGE.to_value(code as u32);
            let info = ChipInfo::from_word(word);
            assert_eq!(info.package, *package, "package code {code}");
            assert_eq!(info.package.has_embedded_flash(), *flash, "package code {code}");
        }
        assert_eq!(package::ESP32U4WDH, package::ESP32PICOD2);
    }

    #[test]
    fn flash_encryption_parity() {
        assert!(!flash_encryption_enabled(0));
        assert!(flash_encryption_enabled(0b001 << 20));
        assert!(!flash_encryption_enabled(0b011 << 20));
        assert!(flash_encryption_enabled(0b111 << 20));
        assert!(!flash_encryption_enabled(0x0F << 16));
    }

    #[test]
    fn read_protection() {
        let word = rd_dis::BLK3;
        assert_eq!(is_block_read_protected(word, 3), Some(true));
        assert_eq!(is_block_read_protected(word, 1), Some(false));
        assert_eq!(is_block_read_protected(word, 0), None);

        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE, rd_dis::BLK1);
        let mut efuse = EfuseRegs::new(bus, BASE);
        assert_eq!(efuse.is_read_protected(1), Ok(true));
        assert_eq!(
            efuse.is_read_protected(4),
            Err(Error::Field(FieldError::InvalidSlot))
        );
    }

    #[test]
    fn coding_scheme_from_registers() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x18, 0x0000_0402);
        let mut efuse = EfuseRegs::new(bus, BASE);
        assert_eq!(efuse.coding_scheme(), CodingScheme::Repeat);
    }
}
