//! Register Readback Checks
//!
//! Reads version registers, reset values and factory eFuse data through the
//! `ph-esp32-soc` register maps and compares them with the values the maps
//! declare. Any plain ESP32 board works; no Ethernet hardware is needed
//! unless `CHECK_EMAC` is set.
//!
//! # Building and Flashing
//!
//! ```bash
//! cd integration_tests
//! cargo run --release
//! ```

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_bootloader_esp_idf::esp_app_desc;
use esp_hal::{delay::Delay, main};
use log::{error, info};

mod tests;

use tests::TestRunner;

// ESP-IDF bootloader requires an app descriptor
esp_app_desc!();

/// Also check the EMAC window. Enables the EMAC peripheral clock.
const CHECK_EMAC: bool = true;

#[main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    info!("ph-esp32-soc register readback");
    info!("==============================");

    let _peripherals = esp_hal::init(esp_hal::Config::default());
    let mut delay = Delay::new();
    let mut runner = TestRunner::new();

    info!("");
    info!("Group 1: block versions");
    runner.run("IT-1-001", "UART0 DATE", tests::group1_identity::test_uart_date);
    runner.run("IT-1-002", "UART0 ID", tests::group1_identity::test_uart_id);
    runner.run("IT-1-003", "APB_CTRL DATE", tests::group1_identity::test_apb_date);
    if CHECK_EMAC {
        runner.run("IT-1-004", "EMAC extension DATE", tests::group1_identity::test_emac_date);
    }

    info!("");
    info!("Group 2: boot configuration");
    runner.run("IT-2-001", "UART0 baud divider", tests::group2_defaults::test_uart_baud);
    runner.run("IT-2-002", "UART0 framing", tests::group2_defaults::test_uart_frame);
    runner.run("IT-2-003", "PLL REF_TICK divider", tests::group2_defaults::test_pll_tick);
    runner.run("IT-2-004", "SAR ADC control 2 reset", tests::group2_defaults::test_saradc_ctrl2);

    info!("");
    info!("Group 3: eFuse");
    runner.run("IT-3-001", "factory MAC CRC", tests::group3_efuse::test_factory_mac);
    runner.run("IT-3-002", "chip info", tests::group3_efuse::test_chip_info);
    runner.run_with("IT-3-003", "eFuse reload", &mut delay, tests::group3_efuse::test_reload);

    runner.summary();
    if runner.failed() > 0 {
        error!("=== READBACK FAILED ===");
    } else {
        info!("=== READBACK PASSED ===");
    }

    loop {
        delay.delay_millis(1000);
    }
}
