//! Memory-mapped register definitions
//!
//! Each peripheral gets a module of per-register submodules. A register
//! submodule carries the register `OFFSET` from the peripheral base, one
//! [`Field`](crate::soc::Field) constant per bit field, the `FIELDS` list and
//! the composed `RESET` value.
//!
//! Next to the map, every peripheral has a register block (`DmaRegs`,
//! `EfuseRegs`, ...) that pairs a [`RegisterBus`](crate::soc::RegisterBus)
//! with a base address and exposes one accessor per register.

pub mod apb_ctrl;
pub mod efuse;
pub mod emac;
pub mod mcp;
pub mod uart;

// =============================================================================
// Register Block Macros
// =============================================================================

/// Declare a register block type.
///
/// Generates the struct plus `new`, `base`, `addr`, `bus_mut` and `free`.
/// The accessor macros below expand inside an `impl` of such a block.
macro_rules! register_block {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<B> {
            pub(crate) bus: B,
            pub(crate) base: usize,
        }

        impl<B: $crate::soc::RegisterBus> $name<B> {
            /// Wrap the register block located at `base`.
            #[inline]
            pub const fn new(bus: B, base: usize) -> Self {
                Self { bus, base }
            }

            /// Base address of the block
            #[inline(always)]
            pub const fn base(&self) -> usize {
                self.base
            }

            /// Underlying bus
            #[inline]
            pub fn bus_mut(&mut self) -> &mut B {
                &mut self.bus
            }

            /// Release the bus.
            #[inline]
            pub fn free(self) -> B {
                self.bus
            }

            /// Absolute address of the register at `offset`.
            #[inline(always)]
            pub const fn addr(&self, offset: usize) -> usize {
                self.base + offset
            }
        }
    };
}

/// Generate read/write accessor methods for a register.
///
/// # Example
/// ```ignore
/// impl<B: RegisterBus> DmaRegs<B> {
///     reg_rw!(bus_mode, set_bus_mode, bus_mode::OFFSET, "Bus Mode register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&mut self) -> u32 {
            let addr = self.addr($offset);
            self.bus.read(addr)
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&mut self, value: u32) {
            let addr = self.addr($offset);
            self.bus.write(addr, value)
        }
    };
}

/// Generate a read-only accessor method for a register.
macro_rules! reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&mut self) -> u32 {
            let addr = self.addr($offset);
            self.bus.read(addr)
        }
    };
}

/// Generate a write-only accessor method for a register.
macro_rules! reg_wo {
    ($write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&mut self, value: u32) {
            let addr = self.addr($offset);
            self.bus.write(addr, value)
        }
    };
}

/// Generate set/clear bit operation methods for a register.
///
/// # Example
/// ```ignore
/// impl<B: RegisterBus> DmaRegs<B> {
///     reg_bit_ops!(start_tx, stop_tx, operation_mode::OFFSET,
///                  operation_mode::START_STOP_TX.mask(), "TX DMA", "Start", "Stop");
/// }
/// ```
macro_rules! reg_bit_ops {
    ($set_fn:ident, $clear_fn:ident, $offset:expr, $bit:expr, $what:expr, $set_verb:expr, $clear_verb:expr) => {
        #[doc = concat!($set_verb, " ", $what)]
        #[inline(always)]
        pub fn $set_fn(&mut self) {
            let addr = self.addr($offset);
            self.bus.set_bits(addr, $bit)
        }

        #[doc = concat!($clear_verb, " ", $what)]
        #[inline(always)]
        pub fn $clear_fn(&mut self) {
            let addr = self.addr($offset);
            self.bus.clear_bits(addr, $bit)
        }
    };
}

/// Generate a bit check method (inverted - true when bit is clear).
macro_rules! reg_bit_check_clear {
    ($fn:ident, $offset:expr, $bit:expr, $doc:expr) => {
        #[doc = $doc]
        #[inline(always)]
        pub fn $fn(&mut self) -> bool {
            let addr = self.addr($offset);
            (self.bus.read(addr) & $bit) == 0
        }
    };
}

/// Generate a bit check method (true when bit is set).
macro_rules! reg_bit_check_set {
    ($fn:ident, $offset:expr, $bit:expr, $doc:expr) => {
        #[doc = $doc]
        #[inline(always)]
        pub fn $fn(&mut self) -> bool {
            let addr = self.addr($offset);
            (self.bus.read(addr) & $bit) != 0
        }
    };
}

/// Generate a getter and a checked setter for one field.
macro_rules! reg_field {
    ($get_fn:ident, $set_fn:ident, $offset:expr, $field:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline]
        pub fn $get_fn(&mut self) -> u32 {
            let addr = self.addr($offset);
            self.bus.read_field(addr, $field)
        }

        #[doc = concat!("Write ", $doc)]
        #[inline]
        pub fn $set_fn(&mut self, value: u32) -> $crate::error::Result<()> {
            let addr = self.addr($offset);
            self.bus.write_field(addr, $field, value)
        }
    };
}

// Export macros for use in submodules
pub(crate) use reg_bit_check_clear;
pub(crate) use reg_bit_check_set;
pub(crate) use reg_bit_ops;
pub(crate) use reg_field;
pub(crate) use reg_ro;
pub(crate) use reg_rw;
pub(crate) use reg_wo;
pub(crate) use register_block;
