//! SoC-wide definitions
//!
//! Peripheral base addresses, bit helpers, the [`RegisterBus`] access seam
//! and chip constants shared by every register block.
//!
//! # Modules
//!
//! - [`field`]: [`Field`] descriptors and bit manipulation helpers
//! - [`bus`]: [`RegisterBus`], volatile [`Mmio`] access and polling
//! - [`clock`]: fixed clock frequencies
//! - [`memory`]: address space regions
//! - [`interrupt`]: peripheral interrupt sources

pub mod bus;
pub mod clock;
pub mod field;
pub mod interrupt;
pub mod memory;

pub use bus::{
    DEFAULT_POLL_TIMEOUT_US, Mmio, POLL_INTERVAL_US, RegisterBus, wait_bits_clear, wait_bits_set,
    wait_field_clear,
};
pub use field::{Access, Field, bit, bit64, genmask, reset_value};
pub use interrupt::InterruptSource;

// =============================================================================
// Peripheral Base Addresses (ESP32)
// =============================================================================

/// DPORT system registers
pub const DR_REG_DPORT_BASE: usize = 0x3FF0_0000;
/// AES accelerator
pub const DR_REG_AES_BASE: usize = 0x3FF0_1000;
/// RSA accelerator
pub const DR_REG_RSA_BASE: usize = 0x3FF0_2000;
/// SHA accelerator
pub const DR_REG_SHA_BASE: usize = 0x3FF0_3000;
/// PRO CPU flash MMU table
pub const DR_REG_FLASH_MMU_TABLE_PRO: usize = 0x3FF1_0000;
/// APP CPU flash MMU table
pub const DR_REG_FLASH_MMU_TABLE_APP: usize = 0x3FF1_2000;
/// Last register of the DPORT window
pub const DR_REG_DPORT_END: usize = 0x3FF1_3FFC;
/// UART0
pub const DR_REG_UART_BASE: usize = 0x3FF4_0000;
/// SPI1
pub const DR_REG_SPI1_BASE: usize = 0x3FF4_2000;
/// SPI0
pub const DR_REG_SPI0_BASE: usize = 0x3FF4_3000;
/// GPIO matrix
pub const DR_REG_GPIO_BASE: usize = 0x3FF4_4000;
/// GPIO sigma-delta
pub const DR_REG_GPIO_SD_BASE: usize = 0x3FF4_4F00;
/// Free-running counter timer
pub const DR_REG_FRC_TIMER_BASE: usize = 0x3FF4_7000;
/// RTC control
pub const DR_REG_RTCCNTL_BASE: usize = 0x3FF4_8000;
/// RTC IO mux
pub const DR_REG_RTCIO_BASE: usize = 0x3FF4_8400;
/// Sensors (SAR ADC, touch, hall)
pub const DR_REG_SENS_BASE: usize = 0x3FF4_8800;
/// RTC I2C
pub const DR_REG_RTC_I2C_BASE: usize = 0x3FF4_8C00;
/// IO mux
pub const DR_REG_IO_MUX_BASE: usize = 0x3FF4_9000;
/// SDIO slave host interface
pub const DR_REG_HINF_BASE: usize = 0x3FF4_B000;
/// UHCI1
pub const DR_REG_UHCI1_BASE: usize = 0x3FF4_C000;
/// I2S0
pub const DR_REG_I2S_BASE: usize = 0x3FF4_F000;
/// UART1
pub const DR_REG_UART1_BASE: usize = 0x3FF5_0000;
/// I2C0
pub const DR_REG_I2C_EXT_BASE: usize = 0x3FF5_3000;
/// UHCI0
pub const DR_REG_UHCI0_BASE: usize = 0x3FF5_4000;
/// SDIO slave host registers
pub const DR_REG_SLCHOST_BASE: usize = 0x3FF5_5000;
/// Remote control peripheral
pub const DR_REG_RMT_BASE: usize = 0x3FF5_6000;
/// Pulse counter
pub const DR_REG_PCNT_BASE: usize = 0x3FF5_7000;
/// SDIO slave
pub const DR_REG_SLC_BASE: usize = 0x3FF5_8000;
/// LED PWM
pub const DR_REG_LEDC_BASE: usize = 0x3FF5_9000;
/// eFuse controller
pub const DR_REG_EFUSE_BASE: usize = 0x3FF5_A000;
/// Flash encryption
pub const DR_REG_SPI_ENCRYPT_BASE: usize = 0x3FF5_B000;
/// Motor PWM 0
pub const DR_REG_PWM_BASE: usize = 0x3FF5_E000;
/// Timer group 0
pub const DR_REG_TIMERGROUP0_BASE: usize = 0x3FF5_F000;
/// Timer group 1
pub const DR_REG_TIMERGROUP1_BASE: usize = 0x3FF6_0000;
/// SPI2 (HSPI)
pub const DR_REG_SPI2_BASE: usize = 0x3FF6_4000;
/// SPI3 (VSPI)
pub const DR_REG_SPI3_BASE: usize = 0x3FF6_5000;
/// APB control (system control)
pub const DR_REG_SYSCON_BASE: usize = 0x3FF6_6000;
/// APB control, older name of [`DR_REG_SYSCON_BASE`]
pub const DR_REG_APB_CTRL_BASE: usize = DR_REG_SYSCON_BASE;
/// I2C1
pub const DR_REG_I2C1_EXT_BASE: usize = 0x3FF6_7000;
/// SD/MMC host
pub const DR_REG_SDMMC_BASE: usize = 0x3FF6_8000;
/// Ethernet MAC (DMA, extension and MAC blocks)
pub const DR_REG_EMAC_BASE: usize = 0x3FF6_9000;
/// TWAI (CAN)
pub const DR_REG_CAN_BASE: usize = 0x3FF6_B000;
/// Motor PWM 1
pub const DR_REG_PWM1_BASE: usize = 0x3FF6_C000;
/// I2S1
pub const DR_REG_I2S1_BASE: usize = 0x3FF6_D000;
/// UART2
pub const DR_REG_UART2_BASE: usize = 0x3FF6_E000;

/// Start of the UART FIFO aliases on the AHB bus
pub const UART_AHB_BASE: usize = 0x6000_0000;

/// Number of UART controllers
pub const UART_NUM: usize = 3;

/// Whether `addr` lies in the DPORT window.
///
/// DPORT registers on the ESP32 need the dual-core access workaround and must
/// not be read through plain MMIO.
#[inline]
pub const fn is_dport_reg(addr: usize) -> bool {
    addr >= DR_REG_DPORT_BASE && addr <= DR_REG_DPORT_END
}

/// Register base of UART `instance`.
///
/// UART2 sits 0xE000 above the regular 64 KiB stride.
#[inline]
pub const fn uart_base(instance: usize) -> Option<usize> {
    if instance >= UART_NUM {
        return None;
    }
    Some(DR_REG_UART_BASE + instance * 0x1_0000 + if instance > 1 { 0xE000 } else { 0 })
}

/// AHB alias base of UART `instance`, used for FIFO access.
#[inline]
pub const fn uart_ahb_base(instance: usize) -> Option<usize> {
    if instance >= UART_NUM {
        return None;
    }
    Some(UART_AHB_BASE + instance * 0x1_0000 + if instance > 1 { 0xE000 } else { 0 })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uart_bases_follow_stride_and_gap() {
        assert_eq!(uart_base(0), Some(DR_REG_UART_BASE));
        assert_eq!(uart_base(1), Some(DR_REG_UART1_BASE));
        assert_eq!(uart_base(2), Some(DR_REG_UART2_BASE));
        assert_eq!(uart_base(3), None);
    }

    #[test]
    fn uart_ahb_bases() {
        assert_eq!(uart_ahb_base(0), Some(0x6000_0000));
        assert_eq!(uart_ahb_base(1), Some(0x6001_0000));
        assert_eq!(uart_ahb_base(2), Some(0x6002_E000));
        assert_eq!(uart_ahb_base(usize::MAX), None);
    }

    #[test]
    fn dport_window() {
        assert!(is_dport_reg(DR_REG_DPORT_BASE));
        assert!(is_dport_reg(0x3FF0_00CC));
        assert!(is_dport_reg(DR_REG_DPORT_END));
        assert!(!is_dport_reg(DR_REG_DPORT_END + 4));
        assert!(!is_dport_reg(DR_REG_UART_BASE));
        assert!(!is_dport_reg(DR_REG_EMAC_BASE));
    }

    #[test]
    fn block_bases() {
        assert_eq!(DR_REG_EMAC_BASE, 0x3FF6_9000);
        assert_eq!(DR_REG_EFUSE_BASE, 0x3FF5_A000);
        assert_eq!(DR_REG_APB_CTRL_BASE, 0x3FF6_6000);
    }
}
