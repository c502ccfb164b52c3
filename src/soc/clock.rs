//! Fixed clock frequencies

/// APB clock while running from the ROM bootloader configuration
pub const APB_CLK_FREQ_ROM: u32 = 26 * 1_000_000;
/// CPU clock while running from the ROM bootloader configuration
pub const CPU_CLK_FREQ_ROM: u32 = APB_CLK_FREQ_ROM;
/// APB clock once the PLL is up
pub const APB_CLK_FREQ: u32 = 80 * 1_000_000;
/// Default CPU clock (tracks the APB clock)
pub const CPU_CLK_FREQ: u32 = APB_CLK_FREQ;
/// REF_TICK frequency
pub const REF_CLK_FREQ: u32 = 1_000_000;
/// UART source clock
pub const UART_CLK_FREQ: u32 = APB_CLK_FREQ;
/// Watchdog source clock
pub const WDT_CLK_FREQ: u32 = APB_CLK_FREQ;
/// Legacy timer clock (APB / 16)
pub const TIMER_CLK_FREQ: u32 = 80_000_000 >> 4;
/// SPI clock divider used by the ROM
pub const SPI_CLK_DIV: u32 = 4;
/// ROM delay loop calibration
pub const TICKS_PER_US_ROM: u32 = 26;
/// Extra latency added by routing a signal through the GPIO matrix
pub const GPIO_MATRIX_DELAY_NS: u32 = 25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_clocks() {
        assert_eq!(TIMER_CLK_FREQ, 5_000_000);
        assert_eq!(UART_CLK_FREQ, 80_000_000);
        assert_eq!(APB_CLK_FREQ_ROM / 1_000_000, TICKS_PER_US_ROM);
    }
}
