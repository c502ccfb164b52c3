//! Group 2: boot configuration
//!
//! The ROM loader leaves UART0 at 115200 8N1 and the PLL REF_TICK divider
//! at its reset value. The SAR ADC controller is untouched until an ADC
//! driver runs.
//!
//! | Test ID | Name | Description |
//! |---------|------|-------------|
//! | IT-2-001 | UART0 baud divider | Divider decodes to 115200 baud |
//! | IT-2-002 | UART0 framing | conf0 decodes to 8N1 |
//! | IT-2-003 | PLL REF_TICK divider | 80 MHz / (79 + 1) |
//! | IT-2-004 | SAR ADC control 2 reset | Matches the map's reset value |

use log::{error, info};
use ph_esp32_soc::hal::apb::tick_num;
use ph_esp32_soc::hal::uart::{ClockDivider, FrameFormat};
use ph_esp32_soc::register::apb_ctrl;
use ph_esp32_soc::soc::clock::{APB_CLK_FREQ, REF_CLK_FREQ};
use ph_esp32_soc::{ApbCtrlRegs, UartRegs};

use super::framework::{TestResult, expect_eq};

const BOOT_BAUD: u32 = 115_200;

/// IT-2-001
pub fn test_uart_baud() -> TestResult {
    let Ok(mut uart) = (unsafe { UartRegs::instance(0) }) else {
        return TestResult::Fail;
    };
    let divider = ClockDivider::from_bits(uart.clkdiv());
    let baud = divider.baud(APB_CLK_FREQ);
    info!(
        "  divider {}+{}/16 -> {} baud",
        divider.integer, divider.frag, baud
    );
    // Within 1%
    if baud.abs_diff(BOOT_BAUD) * 100 <= BOOT_BAUD {
        TestResult::Pass
    } else {
        error!("  expected about {BOOT_BAUD} baud");
        TestResult::Fail
    }
}

/// IT-2-002
pub fn test_uart_frame() -> TestResult {
    let Ok(mut uart) = (unsafe { UartRegs::instance(0) }) else {
        return TestResult::Fail;
    };
    match uart.frame_format() {
        Ok(format) if format == FrameFormat::EIGHT_N_ONE => {
            info!("  8N1");
            TestResult::Pass
        }
        Ok(format) => {
            error!("  unexpected format {format:?}");
            TestResult::Fail
        }
        Err(e) => {
            error!("  conf0 decode failed: {e:?}");
            TestResult::Fail
        }
    }
}

/// IT-2-003
pub fn test_pll_tick() -> TestResult {
    let mut apb = unsafe { ApbCtrlRegs::steal() };
    let Ok(expected) = tick_num(APB_CLK_FREQ, REF_CLK_FREQ) else {
        return TestResult::Fail;
    };
    expect_eq("PLL_TICK_NUM", apb.pll_tick_num(), expected)
}

/// IT-2-004
pub fn test_saradc_ctrl2() -> TestResult {
    let mut apb = unsafe { ApbCtrlRegs::steal() };
    expect_eq("SARADC_CTRL2", apb.saradc_ctrl2(), apb_ctrl::saradc_ctrl2::RESET)
}
