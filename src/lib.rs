//! ESP32 SoC Register Definitions
//!
//! A `no_std`, `no_alloc` description of the ESP32 peripheral registers used
//! by the Ethernet, UART, eFuse, APB control and memory-copy DMA drivers.
//!
//! # Layers
//!
//! 1. **SoC** ([`soc`]): base addresses, bit helpers, the [`RegisterBus`]
//!    access trait and chip-wide constants
//! 2. **Registers** ([`register`]): per-peripheral offsets, [`Field`]
//!    descriptors, reset values and register block accessors
//! 3. **Typed values** ([`hal`]): enums and structs decoded from register
//!    bits, plus multi-field helpers
//!
//! Every register block is generic over [`RegisterBus`]. On target the bus
//! is [`soc::Mmio`] (volatile access); host tests use an in-memory mock.
//!
//! # Features
//!
//! - `esp32` (default): fixed-address constructors such as
//!   [`register::uart::UartRegs::instance`]
//! - `defmt`: `defmt::Format` for errors and decoded values
//! - `critical-section`: [`sync::CsBus`] for interrupt-safe read-modify-write
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_soc::register::uart::UartRegs;
//! use ph_esp32_soc::hal::uart::{ClockDivider, FrameFormat};
//! use ph_esp32_soc::soc::clock::APB_CLK_FREQ;
//!
//! let mut uart = unsafe { UartRegs::instance(0)? };
//! uart.set_clock_divider(ClockDivider::from_baud(APB_CLK_FREQ, 921_600)?);
//! uart.set_frame_format(&FrameFormat::EIGHT_N_ONE);
//! uart.write_bytes(b"hello\r\n");
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Mirrors the [lints] table in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::unusual_byte_groupings
)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod hal;
pub mod register;
pub mod soc;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DecodeError, DecodeResult, Error, FieldError, FieldResult, IoError, Result};
pub use soc::{Access, Field, Mmio, RegisterBus};

pub use register::apb_ctrl::ApbCtrlRegs;
pub use register::efuse::EfuseRegs;
pub use register::emac::{DmaRegs, ExtRegs, MacRegs};
pub use register::mcp::McpRegs;
pub use register::uart::UartRegs;

#[cfg(feature = "critical-section")]
pub use sync::{CriticalSectionCell, CsBus};
