//! Register bus abstraction
//!
//! [`RegisterBus`] is the seam between register maps and hardware. Register
//! blocks are generic over it so the same code drives real MMIO through
//! [`Mmio`] and a mock register file in host tests.
//!
//! The provided methods mirror the classic peripheral macros:
//!
//! | Method | Macro |
//! |--------|-------|
//! | [`read`](RegisterBus::read) | `REG_READ`, `READ_PERI_REG` |
//! | [`write`](RegisterBus::write) | `REG_WRITE`, `WRITE_PERI_REG` |
//! | [`set_bits`](RegisterBus::set_bits) | `REG_SET_BIT`, `SET_PERI_REG_MASK` |
//! | [`clear_bits`](RegisterBus::clear_bits) | `REG_CLR_BIT`, `CLEAR_PERI_REG_MASK` |
//! | [`get_bits`](RegisterBus::get_bits) | `REG_GET_BIT`, `GET_PERI_REG_MASK` |
//! | [`set_masked`](RegisterBus::set_masked) | `REG_SET_BITS` |
//! | [`read_field`](RegisterBus::read_field) | `REG_GET_FIELD` |
//! | [`write_field_truncating`](RegisterBus::write_field_truncating) | `REG_SET_FIELD` |
//! | [`read_bit_range`](RegisterBus::read_bit_range) | `GET_PERI_REG_BITS` |
//! | [`write_bits_shifted`](RegisterBus::write_bits_shifted) | `SET_PERI_REG_BITS` |

use embedded_hal::delay::DelayNs;

use super::field::{Field, get_bits, set_bits_shifted};
use crate::error::{FieldError, IoError, Result};

// =============================================================================
// Polling Constants
// =============================================================================

/// Interval between two reads while polling a flag
pub const POLL_INTERVAL_US: u32 = 10;

/// Default polling budget for self-clearing command bits
pub const DEFAULT_POLL_TIMEOUT_US: u32 = 10_000;

// =============================================================================
// Register Bus Trait
// =============================================================================

/// 32-bit register access by absolute address.
pub trait RegisterBus {
    /// Read the register at `addr`.
    fn read(&mut self, addr: usize) -> u32;

    /// Write `value` to the register at `addr`.
    fn write(&mut self, addr: usize, value: u32);

    /// Read-modify-write.
    ///
    /// Every provided method that changes part of a register goes through
    /// here, so wrappers only need to override this one to make them atomic.
    #[inline]
    fn modify<F>(&mut self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(addr);
        self.write(addr, f(value));
    }

    /// Set the bits of `mask`.
    #[inline]
    fn set_bits(&mut self, addr: usize, mask: u32) {
        self.modify(addr, |v| v | mask);
    }

    /// Clear the bits of `mask`.
    #[inline]
    fn clear_bits(&mut self, addr: usize, mask: u32) {
        self.modify(addr, |v| v & !mask);
    }

    /// Register value masked by `mask`.
    #[inline]
    fn get_bits(&mut self, addr: usize, mask: u32) -> u32 {
        self.read(addr) & mask
    }

    /// Replace the bits selected by `mask` with the matching bits of `bits`.
    #[inline]
    fn set_masked(&mut self, addr: usize, bits: u32, mask: u32) {
        self.modify(addr, |v| (v & !mask) | (bits & mask));
    }

    /// Read one field, right-aligned.
    #[inline]
    fn read_field(&mut self, addr: usize, field: Field) -> u32 {
        field.get(self.read(addr))
    }

    /// Write one field, leaving the rest of the register unchanged.
    ///
    /// Fails without touching the bus if the field is not writable or the
    /// value does not fit.
    fn write_field(&mut self, addr: usize, field: Field, value: u32) -> Result<()> {
        if !field.access().is_writable() {
            return Err(FieldError::NotWritable.into());
        }
        if value > field.max() {
            return Err(FieldError::ValueOutOfRange.into());
        }
        self.modify(addr, |v| field.insert(v, value));
        Ok(())
    }

    /// Write one field, silently truncating `value` to the field width.
    #[inline]
    fn write_field_truncating(&mut self, addr: usize, field: Field, value: u32) {
        self.modify(addr, |v| field.insert(v, value));
    }

    /// Bits `lowpos..=hipos`, right-aligned.
    #[inline]
    fn read_bit_range(&mut self, addr: usize, hipos: u32, lowpos: u32) -> u32 {
        get_bits(self.read(addr), hipos, lowpos)
    }

    /// Replace `bit_map << shift` with `value << shift`.
    #[inline]
    fn write_bits_shifted(&mut self, addr: usize, bit_map: u32, value: u32, shift: u32) {
        self.modify(addr, |v| set_bits_shifted(v, bit_map, value, shift));
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    #[inline]
    fn read(&mut self, addr: usize) -> u32 {
        (**self).read(addr)
    }

    #[inline]
    fn write(&mut self, addr: usize, value: u32) {
        (**self).write(addr, value);
    }

    #[inline]
    fn modify<F>(&mut self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        (**self).modify(addr, f);
    }
}

// =============================================================================
// Volatile MMIO
// =============================================================================

/// Volatile access to the physical address space.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create an MMIO bus.
    ///
    /// # Safety
    ///
    /// Every address later passed to the bus must be a valid, 4-byte aligned
    /// peripheral register, and the caller must coordinate with any other
    /// code accessing the same registers.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&mut self, addr: usize) -> u32 {
        debug_assert!(!super::is_dport_reg(addr), "DPORT register accessed through Mmio");
        // SAFETY: guaranteed by the contract of `Mmio::new`
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, addr: usize, value: u32) {
        debug_assert!(!super::is_dport_reg(addr), "DPORT register accessed through Mmio");
        // SAFETY: guaranteed by the contract of `Mmio::new`
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

// =============================================================================
// Polling
// =============================================================================

fn poll<B, D>(
    bus: &mut B,
    addr: usize,
    mask: u32,
    want_set: bool,
    delay: &mut D,
    timeout_us: u32,
) -> Result<()>
where
    B: RegisterBus + ?Sized,
    D: DelayNs,
{
    let mut waited_us = 0u32;
    loop {
        let bits = bus.read(addr) & mask;
        let done = if want_set { bits == mask } else { bits == 0 };
        if done {
            return Ok(());
        }
        if waited_us >= timeout_us {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "poll timeout: addr={=usize:#x} mask={=u32:#x} want_set={}",
                addr,
                mask,
                want_set
            );
            return Err(IoError::Timeout.into());
        }
        delay.delay_us(POLL_INTERVAL_US);
        waited_us = waited_us.saturating_add(POLL_INTERVAL_US);
    }
}

/// Wait until every bit of `mask` reads as 0.
///
/// The register is read once more after the budget is used up, so a flag
/// that clears during the last interval still counts.
pub fn wait_bits_clear<B, D>(
    bus: &mut B,
    addr: usize,
    mask: u32,
    delay: &mut D,
    timeout_us: u32,
) -> Result<()>
where
    B: RegisterBus + ?Sized,
    D: DelayNs,
{
    poll(bus, addr, mask, false, delay, timeout_us)
}

/// Wait until every bit of `mask` reads as 1.
pub fn wait_bits_set<B, D>(
    bus: &mut B,
    addr: usize,
    mask: u32,
    delay: &mut D,
    timeout_us: u32,
) -> Result<()>
where
    B: RegisterBus + ?Sized,
    D: DelayNs,
{
    poll(bus, addr, mask, true, delay, timeout_us)
}

/// Wait for a field to read back as zero.
///
/// Intended for self-clearing command bits such as a software reset.
pub fn wait_field_clear<B, D>(
    bus: &mut B,
    addr: usize,
    field: Field,
    delay: &mut D,
    timeout_us: u32,
) -> Result<()>
where
    B: RegisterBus + ?Sized,
    D: DelayNs,
{
    poll(bus, addr, field.mask(), false, delay, timeout_us)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::Error;
    use crate::soc::field::Access;
    use crate::testing::{MockDelay, MockRegisterBus};

    const REG: usize = 0x3FF4_0020;
    const STOP: Field = Field::new("STOP", 4, 2, Access::ReadWrite, 1);
    const STATUS: Field = Field::new("STATUS", 0, 8, Access::ReadOnly, 0);

    #[test]
    fn set_and_clear_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x0000_00F0);

        bus.set_bits(REG, 0x0000_000F);
        assert_eq!(bus.register(REG), 0x0000_00FF);

        bus.clear_bits(REG, 0x0000_0030);
        assert_eq!(bus.register(REG), 0x0000_00CF);
        assert_eq!(bus.get_bits(REG, 0x0000_00C0), 0x0000_00C0);
    }

    #[test]
    fn set_masked_only_touches_mask() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0xFFFF_0000);

        bus.set_masked(REG, 0x0000_FFFF, 0x0000_0F0F);
        assert_eq!(bus.register(REG), 0xFFFF_0F0F);
    }

    #[test]
    fn read_and_write_field() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x0000_001C);

        assert_eq!(bus.read_field(REG, STOP), 1);
        bus.write_field(REG, STOP, 3).unwrap();
        assert_eq!(bus.register(REG), 0x0000_003C);
    }

    #[test]
    fn write_field_rejects_without_bus_access() {
        let mut bus = MockRegisterBus::new();

        assert_eq!(
            bus.write_field(REG, STOP, 4),
            Err(Error::Field(FieldError::ValueOutOfRange))
        );
        assert_eq!(
            bus.write_field(REG, STATUS, 0),
            Err(Error::Field(FieldError::NotWritable))
        );
        assert!(bus.writes().is_empty());
        assert!(bus.reads().is_empty());
    }

    #[test]
    fn write_field_truncating_drops_high_bits() {
        let mut bus = MockRegisterBus::new();
        bus.write_field_truncating(REG, STOP, 0x7);
        assert_eq!(bus.register(REG), 0x0000_0030);
    }

    #[test]
    fn bit_range_helpers() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0xABCD_1234);

        assert_eq!(bus.read_bit_range(REG, 15, 8), 0x12);
        assert_eq!(bus.read_bit_range(REG, 31, 0), 0xABCD_1234);

        bus.write_bits_shifted(REG, 0xFF, 0x56, 8);
        assert_eq!(bus.register(REG), 0xABCD_5634);
    }

    fn poke<B: RegisterBus>(mut bus: B) {
        bus.write(REG, 0x55);
        bus.set_bits(REG, 0xAA);
    }

    #[test]
    fn mut_ref_forwards() {
        let mut bus = MockRegisterBus::new();
        poke(&mut bus);
        assert_eq!(bus.register(REG), 0xFF);
    }

    #[test]
    fn wait_bits_clear_succeeds_after_self_clear() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x1);
        bus.clear_after_reads(REG, 0x1, 3);
        let mut delay = MockDelay::new();

        wait_bits_clear(&mut bus, REG, 0x1, &mut delay, 1_000).unwrap();
        assert_eq!(bus.register(REG), 0);
        assert_eq!(delay.total_us(), 3 * u64::from(POLL_INTERVAL_US));
    }

    #[test]
    fn wait_bits_clear_times_out() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x1);
        let mut delay = MockDelay::new();

        let result = wait_bits_clear(&mut bus, REG, 0x1, &mut delay, 100);
        assert_eq!(result, Err(Error::Io(IoError::Timeout)));
        assert_eq!(delay.total_us(), 100);
    }

    #[test]
    fn wait_with_zero_budget_still_checks_once() {
        let mut bus = MockRegisterBus::new();
        let mut delay = MockDelay::new();

        wait_bits_clear(&mut bus, REG, 0x1, &mut delay, 0).unwrap();
        assert_eq!(delay.total_us(), 0);
        assert_eq!(bus.reads().len(), 1);
    }

    #[test]
    fn wait_bits_set_requires_every_bit() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x1);
        let mut delay = MockDelay::new();

        let result = wait_bits_set(&mut bus, REG, 0x3, &mut delay, 20);
        assert_eq!(result, Err(Error::Io(IoError::Timeout)));

        bus.set_register(REG, 0x3);
        wait_bits_set(&mut bus, REG, 0x3, &mut delay, 20).unwrap();
    }

    #[test]
    fn wait_field_clear_uses_field_mask() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(REG, 0x0000_0001);
        let mut delay = MockDelay::new();

        // STOP covers bits 5:4; bit 0 is irrelevant
        wait_field_clear(&mut bus, REG, STOP, &mut delay, 0).unwrap();
    }
}
