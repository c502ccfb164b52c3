//! Test runner and shared helpers

use log::{error, info, warn};

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Counts results and logs each one
pub struct TestRunner {
    passed: u32,
    failed: u32,
    skipped: u32,
}

impl TestRunner {
    pub const fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            skipped: 0,
        }
    }

    pub fn run(&mut self, id: &str, name: &str, test: fn() -> TestResult) {
        info!("[{id}] {name}");
        let result = test();
        self.record(id, result);
    }

    pub fn run_with<T>(&mut self, id: &str, name: &str, ctx: &mut T, test: fn(&mut T) -> TestResult) {
        info!("[{id}] {name}");
        let result = test(ctx);
        self.record(id, result);
    }

    fn record(&mut self, id: &str, result: TestResult) {
        match result {
            TestResult::Pass => {
                self.passed += 1;
                info!("[{id}] PASS");
            }
            TestResult::Fail => {
                self.failed += 1;
                error!("[{id}] FAIL");
            }
            TestResult::Skip => {
                self.skipped += 1;
                warn!("[{id}] SKIP");
            }
        }
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn summary(&self) {
        info!("");
        info!(
            "passed: {}, failed: {}, skipped: {}",
            self.passed, self.failed, self.skipped
        );
    }
}

/// Pass when `actual == expected`, logging both.
pub fn expect_eq(what: &str, actual: u32, expected: u32) -> TestResult {
    if actual == expected {
        info!("  {what} = {actual:#010x}");
        TestResult::Pass
    } else {
        error!("  {what} = {actual:#010x}, expected {expected:#010x}");
        TestResult::Fail
    }
}
