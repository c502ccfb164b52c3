//! Bitfield descriptors and bit helpers
//!
//! A [`Field`] carries everything the datasheet says about a bitfield: its
//! position, width, access mode and reset value. The shift/value/mask triple
//! used by register headers (`_S`, `_V`, `_M`) is derived from it with
//! `const fn`s, so field descriptors can be used in constant expressions.

use crate::error::{FieldError, FieldResult};

// =============================================================================
// Bit Helpers
// =============================================================================

/// Single-bit mask.
///
/// # Panics
///
/// Panics (at compile time in const context) if `n >= 32`.
#[inline(always)]
pub const fn bit(n: u32) -> u32 {
    assert!(n < 32, "bit index out of range");
    1 << n
}

/// Single-bit mask for 64-bit values.
#[inline(always)]
pub const fn bit64(n: u32) -> u64 {
    assert!(n < 64, "bit index out of range");
    1 << n
}

/// Contiguous mask covering bits `lo..=hi`.
#[inline(always)]
pub const fn genmask(hi: u32, lo: u32) -> u32 {
    assert!(hi < 32 && lo <= hi, "invalid bit range");
    (u32::MAX >> (31 - hi)) & (u32::MAX << lo)
}

/// Extract bits `lowpos..=hipos` of `value`, right-aligned.
///
/// Unlike the C macro this is defined for the full `31..=0` range.
#[inline(always)]
pub const fn get_bits(value: u32, hipos: u32, lowpos: u32) -> u32 {
    (value & genmask(hipos, lowpos)) >> lowpos
}

/// `(value >> shift) & mask`.
#[inline(always)]
pub const fn get_bits_shifted(value: u32, mask: u32, shift: u32) -> u32 {
    (value >> shift) & mask
}

/// Replace the `bit_map << shift` bits of `value` with `bits`.
///
/// `bits` is truncated to `bit_map`.
#[inline(always)]
pub const fn set_bits_shifted(value: u32, bit_map: u32, bits: u32, shift: u32) -> u32 {
    (value & !(bit_map << shift)) | ((bits & bit_map) << shift)
}

/// Extract a field given its in-place mask: `(value & mask) >> shift`.
#[inline(always)]
pub const fn value_get_field2(value: u32, mask: u32, shift: u32) -> u32 {
    (value & mask) >> shift
}

/// Replace the in-place `mask` bits of `value` with `bits << shift`.
///
/// Excess bits of `bits` are dropped rather than leaking into neighbours.
#[inline(always)]
pub const fn value_set_field2(value: u32, mask: u32, shift: u32, bits: u32) -> u32 {
    (value & !mask) | ((bits << shift) & mask)
}

// =============================================================================
// Access Modes
// =============================================================================

/// How software and hardware interact with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Plain read/write
    ReadWrite,
    /// Read only
    ReadOnly,
    /// Write only; reads return an undefined value
    WriteOnly,
    /// Reads as a constant; any write triggers an action
    WriteTrigger,
    /// Write 1 to start; hardware clears the bit when done
    SetSelfClear,
    /// Read/write; hardware may clear the bit on its own
    ReadWriteSelfClear,
    /// Set by hardware; write 1 to clear
    WriteOneToClear,
    /// Set by hardware; cleared by reading
    ReadToClear,
}

impl Access {
    /// Whether a read returns meaningful state.
    pub const fn is_readable(self) -> bool {
        !matches!(self, Access::WriteOnly | Access::WriteTrigger)
    }

    /// Whether software writes have an effect.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Access::ReadOnly | Access::ReadToClear)
    }

    /// Whether hardware clears the field after software sets it.
    pub const fn is_self_clearing(self) -> bool {
        matches!(self, Access::SetSelfClear | Access::ReadWriteSelfClear)
    }

    /// Whether writing 1 clears the field.
    pub const fn is_write_one_to_clear(self) -> bool {
        matches!(self, Access::WriteOneToClear)
    }

    /// Whether reading the register clears the field.
    pub const fn is_read_to_clear(self) -> bool {
        matches!(self, Access::ReadToClear)
    }

    /// Datasheet mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Access::ReadWrite => "R/W",
            Access::ReadOnly => "RO",
            Access::WriteOnly => "WO",
            Access::WriteTrigger => "RO_WT",
            Access::SetSelfClear => "R_WS_SC",
            Access::ReadWriteSelfClear => "R_W_SC",
            Access::WriteOneToClear => "R_SS_WC",
            Access::ReadToClear => "R_SS_RC",
        }
    }
}

// =============================================================================
// Field Descriptor
// =============================================================================

/// A bitfield inside a 32-bit register.
///
/// # Example
///
/// ```
/// use ph_esp32_soc::soc::{Access, Field};
///
/// const PBL: Field = Field::new("PBL", 8, 6, Access::ReadWrite, 1);
///
/// assert_eq!(PBL.shift(), 8);
/// assert_eq!(PBL.max(), 0x3F);
/// assert_eq!(PBL.mask(), 0x3F00);
/// assert_eq!(PBL.get(0x0000_2000), 0x20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    name: &'static str,
    lsb: u8,
    width: u8,
    access: Access,
    reset: u32,
}

impl Field {
    /// Describe a field of `width` bits starting at bit `lsb`.
    ///
    /// # Panics
    ///
    /// Panics if the field does not fit in 32 bits or `reset` does not fit
    /// the field. In a `const` item this is a compile error.
    pub const fn new(name: &'static str, lsb: u8, width: u8, access: Access, reset: u32) -> Self {
        assert!(width >= 1 && width <= 32, "field width must be 1..=32");
        assert!(lsb as u32 + width as u32 <= 32, "field exceeds register width");
        let field = Self {
            name,
            lsb,
            width,
            access,
            reset,
        };
        assert!(reset <= field.max(), "reset value wider than field");
        field
    }

    /// Describe a single-bit field.
    pub const fn bit(name: &'static str, pos: u8, access: Access, reset: u32) -> Self {
        Self::new(name, pos, 1, access, reset)
    }

    /// Field name as printed in diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position of the least significant bit (`_S`).
    pub const fn shift(&self) -> u32 {
        self.lsb as u32
    }

    /// Position of the most significant bit.
    pub const fn msb(&self) -> u32 {
        self.lsb as u32 + self.width as u32 - 1
    }

    /// Width in bits.
    pub const fn width(&self) -> u32 {
        self.width as u32
    }

    /// Largest value the field can hold (`_V`).
    pub const fn max(&self) -> u32 {
        u32::MAX >> (32 - self.width as u32)
    }

    /// In-place mask (`_M`).
    pub const fn mask(&self) -> u32 {
        self.max() << self.lsb
    }

    /// Access mode.
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Reset value, right-aligned.
    pub const fn reset(&self) -> u32 {
        self.reset
    }

    /// Reset value shifted into place.
    pub const fn reset_bits(&self) -> u32 {
        self.to_value(self.reset)
    }

    /// Extract this field from a register value.
    pub const fn get(&self, reg: u32) -> u32 {
        (reg >> self.lsb) & self.max()
    }

    /// Whether any bit of the field is set in `reg`.
    pub const fn is_set(&self, reg: u32) -> bool {
        reg & self.mask() != 0
    }

    /// Shift `value` into place, truncated to the field width.
    pub const fn to_value(&self, value: u32) -> u32 {
        (value & self.max()) << self.lsb
    }

    /// Replace this field in `reg`, truncating `value` to the field width.
    pub const fn insert(&self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | self.to_value(value)
    }

    /// Replace this field in `reg`, rejecting values that do not fit.
    pub fn try_insert(&self, reg: u32, value: u32) -> FieldResult<u32> {
        if value > self.max() {
            return Err(FieldError::ValueOutOfRange);
        }
        Ok(self.insert(reg, value))
    }

    /// Whether two fields share any bit.
    pub const fn overlaps(&self, other: &Field) -> bool {
        self.mask() & other.mask() != 0
    }
}

/// Compose a register reset value from its fields.
pub const fn reset_value(fields: &[Field]) -> u32 {
    let mut value = 0;
    let mut i = 0;
    while i < fields.len() {
        value |= fields[i].reset_bits();
        i += 1;
    }
    value
}

/// Union of the masks of `fields`.
pub const fn fields_mask(fields: &[Field]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < fields.len() {
        mask |= fields[i].mask();
        i += 1;
    }
    mask
}

/// Whether no two fields in `fields` share a bit.
pub const fn fields_disjoint(fields: &[Field]) -> bool {
    let mut seen = 0;
    let mut i = 0;
    while i < fields.len() {
        if seen & fields[i].mask() != 0 {
            return false;
        }
        seen |= fields[i].mask();
        i += 1;
    }
    true
}

// =============================================================================
// Unit Tests
// =============================================================================
