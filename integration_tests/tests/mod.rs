//! Readback Check Modules
//!
//! # Test ID Format
//!
//! Test IDs follow the pattern: `IT-{GROUP}-{NUMBER}`
//!
//! | Group | ID Range | Category |
//! |-------|----------|----------|
//! | 1 | IT-1-xxx | Block versions |
//! | 2 | IT-2-xxx | Boot configuration |
//! | 3 | IT-3-xxx | eFuse |

pub mod framework;
pub mod group2_defaults;
pub mod group3_efuse;

pub use framework::*;
