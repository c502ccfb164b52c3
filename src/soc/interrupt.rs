//! Peripheral interrupt sources
//!
//! Source numbers feed the interrupt matrix, which routes them to CPU
//! interrupt lines.

/// Interrupt matrix source number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptSource {
    /// Wi-Fi MAC
    WifiMac = 0,
    /// Wi-Fi MAC, NMI
    WifiMacNmi = 1,
    /// Wi-Fi baseband
    WifiBb = 2,
    /// Bluetooth MAC
    BtMac = 3,
    /// Bluetooth baseband
    BtBb = 4,
    /// Bluetooth baseband, NMI
    BtBbNmi = 5,
    /// RWBT
    Rwbt = 6,
    /// RWBLE
    Rwble = 7,
    /// RWBT, NMI
    RwbtNmi = 8,
    /// RWBLE, NMI
    RwbleNmi = 9,
    /// SDIO slave channel 0
    Slc0 = 10,
    /// SDIO slave channel 1
    Slc1 = 11,
    /// UHCI0
    Uhci0 = 12,
    /// UHCI1
    Uhci1 = 13,
    /// Timer group 0 timer 0, level
    Tg0T0Level = 14,
    /// Timer group 0 timer 1, level
    Tg0T1Level = 15,
    /// Timer group 0 watchdog, level
    Tg0WdtLevel = 16,
    /// Timer group 0 LACT timer, level
    Tg0LactLevel = 17,
    /// Timer group 1 timer 0, level
    Tg1T0Level = 18,
    /// Timer group 1 timer 1, level
    Tg1T1Level = 19,
    /// Timer group 1 watchdog, level
    Tg1WdtLevel = 20,
    /// Timer group 1 LACT timer, level
    Tg1LactLevel = 21,
    /// GPIO
    Gpio = 22,
    /// GPIO, NMI
    GpioNmi = 23,
    /// Software interrupt 0
    FromCpu0 = 24,
    /// Software interrupt 1
    FromCpu1 = 25,
    /// Software interrupt 2
    FromCpu2 = 26,
    /// Software interrupt 3
    FromCpu3 = 27,
    /// SPI0
    Spi0 = 28,
    /// SPI1
    Spi1 = 29,
    /// SPI2
    Spi2 = 30,
    /// SPI3
    Spi3 = 31,
    /// I2S0
    I2s0 = 32,
    /// I2S1
    I2s1 = 33,
    /// UART0
    Uart0 = 34,
    /// UART1
    Uart1 = 35,
    /// UART2
    Uart2 = 36,
    /// SD/MMC host
    SdioHost = 37,
    /// Ethernet MAC
    EthMac = 38,
    /// Motor PWM 0
    Pwm0 = 39,
    /// Motor PWM 1
    Pwm1 = 40,
    /// Motor PWM 2
    Pwm2 = 41,
    /// Motor PWM 3
    Pwm3 = 42,
    /// LED PWM
    Ledc = 43,
    /// eFuse controller
    Efuse = 44,
    /// TWAI (CAN)
    Can = 45,
    /// RTC core
    RtcCore = 46,
    /// Remote control
    Rmt = 47,
    /// Pulse counter
    Pcnt = 48,
    /// I2C0
    I2cExt0 = 49,
    /// I2C1
    I2cExt1 = 50,
    /// RSA accelerator
    Rsa = 51,
    /// SPI1 DMA
    Spi1Dma = 52,
    /// SPI2 DMA
    Spi2Dma = 53,
    /// SPI3 DMA
    Spi3Dma = 54,
    /// Watchdog
    Wdt = 55,
    /// FRC timer 1
    Timer1 = 56,
    /// FRC timer 2
    Timer2 = 57,
    /// Timer group 0 timer 0, edge
    Tg0T0Edge = 58,
    /// Timer group 0 timer 1, edge
    Tg0T1Edge = 59,
    /// Timer group 0 watchdog, edge
    Tg0WdtEdge = 60,
    /// Timer group 0 LACT timer, edge
    Tg0LactEdge = 61,
    /// Timer group 1 timer 0, edge
    Tg1T0Edge = 62,
    /// Timer group 1 timer 1, edge
    Tg1T1Edge = 63,
    /// Timer group 1 watchdog, edge
    Tg1WdtEdge = 64,
    /// Timer group 1 LACT timer, edge
    Tg1LactEdge = 65,
    /// MMU invalid access
    MmuIa = 66,
    /// MPU invalid access
    MpuIa = 67,
    /// Cache invalid access
    CacheIa = 68,
}

impl InterruptSource {
    /// Number of sources.
    pub const COUNT: usize = 69;

    /// Source number.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Source for a matrix input number.
    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => Self::WifiMac,
            1 => Self::WifiMacNmi,
            2 => Self::WifiBb,
            3 => Self::BtMac,
            4 => Self::BtBb,
            5 => Self::BtBbNmi,
            6 => Self::Rwbt,
            7 => Self::Rwble,
            8 => Self::RwbtNmi,
            9 => Self::RwbleNmi,
            10 => Self::Slc0,
            11 => Self::Slc1,
            12 => Self::Uhci0,
            13 => Self::Uhci1,
            14 => Self::Tg0T0Level,
            15 => Self::Tg0T1Level,
            16 => Self::Tg0WdtLevel,
            17 => Self::Tg0LactLevel,
            18 => Self::Tg1T0Level,
            19 => Self::Tg1T1Level,
            20 => Self::Tg1WdtLevel,
            21 => Self::Tg1LactLevel,
            22 => Self::Gpio,
            23 => Self::GpioNmi,
            24 => Self::FromCpu0,
            25 => Self::FromCpu1,
            26 => Self::FromCpu2,
            27 => Self::FromCpu3,
            28 => Self::Spi0,
            29 => Self::Spi1,
            30 => Self::Spi2,
            31 => Self::Spi3,
            32 => Self::I2s0,
            33 => Self::I2s1,
            34 => Self::Uart0,
            35 => Self::Uart1,
            36 => Self::Uart2,
            37 => Self::SdioHost,
            38 => Self::EthMac,
            39 => Self::Pwm0,
            40 => Self::Pwm1,
            41 => Self::Pwm2,
            42 => Self::Pwm3,
            43 => Self::Ledc,
            44 => Self::Efuse,
            45 => Self::Can,
            46 => Self::RtcCore,
            47 => Self::Rmt,
            48 => Self::Pcnt,
            49 => Self::I2cExt0,
            50 => Self::I2cExt1,
            51 => Self::Rsa,
            52 => Self::Spi1Dma,
            53 => Self::Spi2Dma,
            54 => Self::Spi3Dma,
            55 => Self::Wdt,
            56 => Self::Timer1,
            57 => Self::Timer2,
            58 => Self::Tg0T0Edge,
            59 => Self::Tg0T1Edge,
            60 => Self::Tg0WdtEdge,
            61 => Self::Tg0LactEdge,
            62 => Self::Tg1T0Edge,
            63 => Self::Tg1T1Edge,
            64 => Self::Tg1WdtEdge,
            65 => Self::Tg1LactEdge,
            66 => Self::MmuIa,
            67 => Self::MpuIa,
            68 => Self::CacheIa,
            _ => return None,
        })
    }
}
