//! Build script for the readback binary
//!
//! Warns when building for anything other than the ESP32.

fn main() {
    let target = std::env::var("TARGET").unwrap_or_default();

    if !target.contains("xtensa-esp32") {
        println!("cargo:warning==============================================");
        println!("cargo:warning= Building for target: {target}");
        println!("cargo:warning= This crate requires: xtensa-esp32-none-elf");
        println!("cargo:warning=");
        println!("cargo:warning= Install the ESP32 toolchain:");
        println!("cargo:warning=   cargo install espup");
        println!("cargo:warning=   espup install");
        println!("cargo:warning==============================================");
    }

    println!("cargo:rerun-if-env-changed=TARGET");
}
