//! Mock register bus and delay for host tests
//!
//! Only available when running `cargo test`.

// The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use crate::soc::RegisterBus;

// =============================================================================
// Mock Register Bus
// =============================================================================

/// In-memory register file
///
/// Unset registers read as 0. Every bus access is logged so tests can check
/// exactly what a register block touched.
///
/// # Example
///
/// ```ignore
/// let mut bus = MockRegisterBus::new();
/// bus.set_register(0x3FF6_9000, 0x0000_0001);
/// bus.clear_after_reads(0x3FF6_9000, 0x1, 2);
/// ```
#[derive(Debug, Default)]
pub struct MockRegisterBus {
    registers: HashMap<usize, u32>,
    /// (addr, value) in write order
    write_log: Vec<(usize, u32)>,
    read_log: RefCell<Vec<usize>>,
    /// addr -> (mask, reads left before the mask clears)
    self_clear: HashMap<usize, (u32, u32)>,
}

impl MockRegisterBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a register without logging a write.
    pub fn set_register(&mut self, addr: usize, value: u32) {
        self.registers.insert(addr, value);
    }

    /// Current register value, without logging a read.
    pub fn register(&self, addr: usize) -> u32 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    /// Every write so far, oldest first.
    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.write_log.clone()
    }

    /// Values written to one register, oldest first.
    pub fn writes_to(&self, addr: usize) -> Vec<u32> {
        self.write_log
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Every read address so far, oldest first.
    pub fn reads(&self) -> Vec<usize> {
        self.read_log.borrow().clone()
    }

    pub fn clear_log(&mut self) {
        self.write_log.clear();
        self.read_log.borrow_mut().clear();
    }

    /// Emulate a self-clearing flag.
    ///
    /// The next `reads` reads still see `mask`; the read after that finds
    /// it cleared.
    pub fn clear_after_reads(&mut self, addr: usize, mask: u32, reads: u32) {
        self.self_clear.insert(addr, (mask, reads));
    }
}

impl RegisterBus for MockRegisterBus {
    fn read(&mut self, addr: usize) -> u32 {
        self.read_log.borrow_mut().push(addr);
        if let Some((mask, left)) = self.self_clear.get_mut(&addr) {
            if *left == 0 {
                let mask = *mask;
                self.self_clear.remove(&addr);
                let value = self.register(addr) & !mask;
                self.registers.insert(addr, value);
            } else {
                *left -= 1;
            }
        }
        self.register(addr)
    }

    fn write(&mut self, addr: usize, value: u32) {
        self.write_log.push((addr, value));
        self.registers.insert(addr, value);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Delay that only counts.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn unset_registers_read_zero() {
        let mut bus = MockRegisterBus::new();
        assert_eq!(bus.read(0x10), 0);
        assert_eq!(bus.reads(), std::vec![0x10]);
    }

    #[test]
    fn writes_are_logged_and_stored() {
        let mut bus = MockRegisterBus::new();
        bus.write(0x10, 1);
        bus.write(0x14, 2);
        bus.write(0x10, 3);

        assert_eq!(bus.register(0x10), 3);
        assert_eq!(bus.writes_to(0x10), std::vec![1, 3]);
        assert_eq!(bus.writes().len(), 3);
    }

    #[test]
    fn self_clear_after_reads() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(0x20, 0x11);
        bus.clear_after_reads(0x20, 0x1, 1);

        assert_eq!(bus.read(0x20), 0x11);
        assert_eq!(bus.read(0x20), 0x10);
        assert_eq!(bus.read(0x20), 0x10);
    }

    #[test]
    fn delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(10);
        delay.delay_ms(1);
        assert_eq!(delay.total_us(), 1_010);
    }
}
