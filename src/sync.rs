//! Interrupt-safe register access
//!
//! Registers such as the UART `conf0` or the APB `saradc_ctrl` hold bits
//! that both thread code and interrupt handlers change. A plain
//! read-modify-write can lose an update when an interrupt lands between the
//! read and the write.
//!
//! - [`CsBus`] wraps any [`RegisterBus`] and runs every read-modify-write
//!   inside `critical_section::with`.
//! - [`CriticalSectionCell`] shares a whole register block between contexts.
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_soc::register::uart::UartRegs;
//! use ph_esp32_soc::soc::{DR_REG_UART_BASE, Mmio};
//! use ph_esp32_soc::sync::{CriticalSectionCell, CsBus};
//!
//! static UART0: CriticalSectionCell<Option<UartRegs<CsBus<Mmio>>>> =
//!     CriticalSectionCell::new(None);
//!
//! UART0.with(|slot| {
//!     *slot = Some(UartRegs::new(CsBus::new(unsafe { Mmio::new() }), DR_REG_UART_BASE));
//! });
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::soc::RegisterBus;

// =============================================================================
// CsBus
// =============================================================================

/// Register bus whose read-modify-write cycles cannot be interrupted
#[derive(Debug, Default)]
pub struct CsBus<B> {
    inner: B,
}

impl<B> CsBus<B> {
    /// Wrap `inner`.
    pub const fn new(inner: B) -> Self {
        Self { inner }
    }

    /// Unwrap the inner bus.
    pub fn into_inner(self) -> B {
        self.inner
    }

    /// Borrow the inner bus.
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }
}

impl<B: RegisterBus> RegisterBus for CsBus<B> {
    #[inline]
    fn read(&mut self, addr: usize) -> u32 {
        self.inner.read(addr)
    }

    #[inline]
    fn write(&mut self, addr: usize, value: u32) {
        self.inner.write(addr, value);
    }

    #[inline]
    fn modify<F>(&mut self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        critical_section::with(|_| self.inner.modify(addr, f));
    }
}

// =============================================================================
// CriticalSectionCell
// =============================================================================

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` so a register block
/// stored in a `static` can be used from thread code and interrupt handlers.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    ///
    /// Panics if called again from inside `f`.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::register::uart::{UartRegs, conf0};
    use crate::testing::MockRegisterBus;

    const BASE: usize = 0x3FF5_0000;

    #[test]
    fn cs_bus_forwards_accesses() {
        let mut bus = CsBus::new(MockRegisterBus::new());
        bus.write(BASE, 0x10);
        bus.set_bits(BASE, 0x01);
        bus.clear_bits(BASE, 0x10);
        assert_eq!(bus.read(BASE), 0x01);
        assert_eq!(bus.into_inner().writes_to(BASE), std::vec![0x10, 0x11, 0x01]);
    }

    #[test]
    fn register_block_over_cs_bus() {
        let mut uart = UartRegs::new(CsBus::new(MockRegisterBus::new()), BASE);
        uart.bus_mut().inner_mut().set_register(BASE + conf0::OFFSET, conf0::RESET);
        uart.enable_loopback();
        assert_eq!(uart.conf0(), conf0::RESET | conf0::LOOPBACK.mask());
    }

    #[test]
    fn cell_gives_exclusive_access() {
        let cell = CriticalSectionCell::new(UartRegs::new(MockRegisterBus::new(), BASE));
        cell.with(|uart| uart.set_conf1(0x1234));
        assert_eq!(cell.with(|uart| uart.conf1()), 0x1234);

        let nested = cell.with(|_| cell.try_with(|_| ()));
        assert!(nested.is_none());
        assert_eq!(cell.try_with(|uart| uart.base()), Some(BASE));
    }
}
