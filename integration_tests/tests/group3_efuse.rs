//! Group 3: eFuse
//!
//! | Test ID | Name | Description |
//! |---------|------|-------------|
//! | IT-3-001 | factory MAC CRC | BLK0 MAC bytes match their CRC-8 |
//! | IT-3-002 | chip info | Package and core count decode |
//! | IT-3-003 | eFuse reload | Read command completes and data is stable |

use esp_hal::delay::Delay;
use log::{error, info};
use ph_esp32_soc::EfuseRegs;
use ph_esp32_soc::hal::efuse::ChipPackage;
use ph_esp32_soc::soc::DEFAULT_POLL_TIMEOUT_US;

use super::framework::{TestResult, expect_eq};

/// IT-3-001
pub fn test_factory_mac() -> TestResult {
    let mut efuse = unsafe { EfuseRegs::steal() };
    match efuse.factory_mac() {
        Ok(mac) => {
            info!("  factory MAC {mac}");
            TestResult::Pass
        }
        Err(e) => {
            error!("  {e:?}");
            TestResult::Fail
        }
    }
}

/// IT-3-002
pub fn test_chip_info() -> TestResult {
    let mut efuse = unsafe { EfuseRegs::steal() };
    let info = efuse.chip_info();
    info!(
        "  package {:?}, rev1 {}, {} core(s), {} MHz max, coding {:?}",
        info.package,
        info.rev1,
        info.core_count(),
        info.max_cpu_mhz,
        efuse.coding_scheme()
    );
    if matches!(info.package, ChipPackage::Unknown(_)) {
        TestResult::Fail
    } else {
        TestResult::Pass
    }
}

/// IT-3-003
pub fn test_reload(delay: &mut Delay) -> TestResult {
    let mut efuse = unsafe { EfuseRegs::steal() };
    let Ok(before) = efuse.blk0_word(1) else {
        return TestResult::Fail;
    };
    if let Err(e) = efuse.reload(delay, DEFAULT_POLL_TIMEOUT_US) {
        error!("  reload: {e:?}");
        return TestResult::Fail;
    }
    let Ok(after) = efuse.blk0_word(1) else {
        return TestResult::Fail;
    };
    expect_eq("BLK0 word 1 after reload", after, before)
}
