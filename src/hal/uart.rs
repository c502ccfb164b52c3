//! Typed UART configuration values
//!
//! Baud rate divider, character framing and the interrupt bit set, with
//! helpers on [`UartRegs`] that read and write them.

use core::ops::{BitOr, BitOrAssign};

use crate::error::{DecodeError, DecodeResult, FieldError, FieldResult};
use crate::register::uart::{INTERRUPT_MASK, UartRegs, clkdiv, conf0, int_raw};
use crate::soc::RegisterBus;

// =============================================================================
// Baud Rate
// =============================================================================

/// Baud rate divider in 1/16 steps
///
/// The UART divides its source clock by `integer + frag / 16` to get the
/// bit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivider {
    /// Whole part (1..=0xFFFFF)
    pub integer: u32,
    /// Sixteenths (0..=15)
    pub frag: u8,
}

impl ClockDivider {
    /// Divider closest to `baud` from a `clock_hz` source, rounded down.
    ///
    /// Fails for a zero baud rate or when the whole part does not fit the
    /// 20-bit field or would be zero.
    pub const fn from_baud(clock_hz: u32, baud: u32) -> FieldResult<Self> {
        if baud == 0 {
            return Err(FieldError::ValueOutOfRange);
        }
        let sixteenths = ((clock_hz as u64) << 4) / baud as u64;
        let integer = sixteenths >> 4;
        if integer == 0 || integer > clkdiv::INTEGER.max() as u64 {
            return Err(FieldError::ValueOutOfRange);
        }
        Ok(Self {
            integer: integer as u32,
            frag: (sixteenths & 0xF) as u8,
        })
    }

    /// Bit rate this divider produces from a `clock_hz` source.
    pub const fn baud(&self, clock_hz: u32) -> u32 {
        let sixteenths = ((self.integer as u64) << 4) | self.frag as u64;
        if sixteenths == 0 {
            return 0;
        }
        (((clock_hz as u64) << 4) / sixteenths) as u32
    }

    /// `clkdiv` register value
    pub const fn to_bits(&self) -> u32 {
        clkdiv::INTEGER.to_value(self.integer) | clkdiv::FRAG.to_value(self.frag as u32)
    }

    /// Decode a `clkdiv` register value.
    pub const fn from_bits(value: u32) -> Self {
        Self {
            integer: clkdiv::INTEGER.get(value),
            frag: clkdiv::FRAG.get(value) as u8,
        }
    }
}

// =============================================================================
// Character Framing
// =============================================================================

/// Data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataBits {
    /// 5 bits
    Five = 0,
    /// 6 bits
    Six = 1,
    /// 7 bits
    Seven = 2,
    /// 8 bits
    #[default]
    Eight = 3,
}

impl DataBits {
    /// Decode `BIT_NUM`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::Five,
            1 => Self::Six,
            2 => Self::Seven,
            _ => Self::Eight,
        }
    }
}

/// Parity bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// No parity bit
    #[default]
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// Stop bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StopBits {
    /// 1 stop bit
    #[default]
    One = 1,
    /// 1.5 stop bits
    OneAndHalf = 2,
    /// 2 stop bits
    Two = 3,
}

impl StopBits {
    /// Decode `STOP_BIT_NUM`. Zero is not a valid setting.
    pub const fn from_bits(bits: u32) -> DecodeResult<Self> {
        match bits {
            1 => Ok(Self::One),
            2 => Ok(Self::OneAndHalf),
            3 => Ok(Self::Two),
            _ => Err(DecodeError::Reserved),
        }
    }
}

/// Character format held in `conf0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameFormat {
    /// Data bits
    pub data_bits: DataBits,
    /// Parity
    pub parity: Parity,
    /// Stop bits
    pub stop_bits: StopBits,
}

impl FrameFormat {
    /// 8 data bits, no parity, 1 stop bit
    pub const EIGHT_N_ONE: Self = Self {
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };

    /// Replace the framing bits of a `conf0` value.
    pub const fn apply(&self, conf0: u32) -> u32 {
        let mut value = conf0::BIT_NUM.insert(conf0, self.data_bits as u32);
        value = conf0::STOP_BIT_NUM.insert(value, self.stop_bits as u32);
        let (enable, odd) = match self.parity {
            Parity::None => (0, 0),
            Parity::Even => (1, 0),
            Parity::Odd => (1, 1),
        };
        value = conf0::PARITY_EN.insert(value, enable);
        conf0::PARITY.insert(value, odd)
    }

    /// Decode the framing bits of a `conf0` value.
    pub const fn from_conf0(conf0: u32) -> DecodeResult<Self> {
        let stop_bits = match StopBits::from_bits(conf0::STOP_BIT_NUM.get(conf0)) {
            Ok(stop_bits) => stop_bits,
            Err(e) => return Err(e),
        };
        let parity = match (conf0::PARITY_EN.is_set(conf0), conf0::PARITY.is_set(conf0)) {
            (false, _) => Parity::None,
            (true, false) => Parity::Even,
            (true, true) => Parity::Odd,
        };
        Ok(Self {
            data_bits: DataBits::from_bits(conf0::BIT_NUM.get(conf0)),
            parity,
            stop_bits,
        })
    }

    /// Bit times per character, in halves, including start and stop bits.
    pub const fn half_bits_per_char(&self) -> u32 {
        let data = (self.data_bits as u32 + 5) * 2;
        let parity = if matches!(self.parity, Parity::None) { 0 } else { 2 };
        let stop = match self.stop_bits {
            StopBits::One => 2,
            StopBits::OneAndHalf => 3,
            StopBits::Two => 4,
        };
        2 + data + parity + stop
    }
}

// =============================================================================
// Interrupts
// =============================================================================

/// Set of UART interrupt bits, shared by all four interrupt registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartInterrupts(u32);

impl UartInterrupts {
    /// Receive FIFO above its threshold
    pub const RXFIFO_FULL: Self = Self(int_raw::RXFIFO_FULL.mask());
    /// Transmit FIFO below its threshold
    pub const TXFIFO_EMPTY: Self = Self(int_raw::TXFIFO_EMPTY.mask());
    /// Parity error
    pub const PARITY_ERR: Self = Self(int_raw::PARITY_ERR.mask());
    /// Frame error
    pub const FRM_ERR: Self = Self(int_raw::FRM_ERR.mask());
    /// Receive FIFO overflow
    pub const RXFIFO_OVF: Self = Self(int_raw::RXFIFO_OVF.mask());
    /// DSR changed
    pub const DSR_CHG: Self = Self(int_raw::DSR_CHG.mask());
    /// CTS changed
    pub const CTS_CHG: Self = Self(int_raw::CTS_CHG.mask());
    /// Break received
    pub const BRK_DET: Self = Self(int_raw::BRK_DET.mask());
    /// Receive timeout
    pub const RXFIFO_TOUT: Self = Self(int_raw::RXFIFO_TOUT.mask());
    /// XON received
    pub const SW_XON: Self = Self(int_raw::SW_XON.mask());
    /// XOFF received
    pub const SW_XOFF: Self = Self(int_raw::SW_XOFF.mask());
    /// Start bit glitch
    pub const GLITCH_DET: Self = Self(int_raw::GLITCH_DET.mask());
    /// Break sent
    pub const TX_BRK_DONE: Self = Self(int_raw::TX_BRK_DONE.mask());
    /// Idle after break sent
    pub const TX_BRK_IDLE_DONE: Self = Self(int_raw::TX_BRK_IDLE_DONE.mask());
    /// Transmitter idle
    pub const TX_DONE: Self = Self(int_raw::TX_DONE.mask());
    /// RS485 parity error
    pub const RS485_PARITY_ERR: Self = Self(int_raw::RS485_PARITY_ERR.mask());
    /// RS485 frame error
    pub const RS485_FRM_ERR: Self = Self(int_raw::RS485_FRM_ERR.mask());
    /// RS485 collision
    pub const RS485_CLASH: Self = Self(int_raw::RS485_CLASH.mask());
    /// AT command sequence detected
    pub const AT_CMD_CHAR_DET: Self = Self(int_raw::AT_CMD_CHAR_DET.mask());

    /// No bits
    pub const NONE: Self = Self(0);
    /// Every bit
    pub const ALL: Self = Self(INTERRUPT_MASK);
    /// Conditions that lose or corrupt received data
    pub const ERRORS: Self = Self(
        int_raw::PARITY_ERR.mask()
            | int_raw::FRM_ERR.mask()
            | int_raw::RXFIFO_OVF.mask()
            | int_raw::RS485_PARITY_ERR.mask()
            | int_raw::RS485_FRM_ERR.mask()
            | int_raw::RS485_CLASH.mask(),
    );

    /// Keep only defined interrupt bits of `bits`.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & INTERRUPT_MASK)
    }

    /// Register value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Every bit of `other` set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Any bit of `other` set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// No bit set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bits of `self` without those of `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for UartInterrupts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for UartInterrupts {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Register Block Helpers
// =============================================================================

impl<B: RegisterBus> UartRegs<B> {
    /// Current baud rate divider.
    pub fn clock_divider(&mut self) -> ClockDivider {
        ClockDivider::from_bits(self.clkdiv())
    }

    /// Program the baud rate divider.
    pub fn set_clock_divider(&mut self, divider: ClockDivider) {
        self.set_clkdiv(divider.to_bits());
    }

    /// Current character format.
    pub fn frame_format(&mut self) -> DecodeResult<FrameFormat> {
        FrameFormat::from_conf0(self.conf0())
    }

    /// Change the character format, leaving the rest of `conf0` alone.
    pub fn set_frame_format(&mut self, format: &FrameFormat) {
        let addr = self.addr(conf0::OFFSET);
        self.bus.modify(addr, |value| format.apply(value));
    }

    /// Pending masked interrupts.
    pub fn pending_interrupts(&mut self) -> UartInterrupts {
        UartInterrupts::from_bits_truncate(self.interrupt_status())
    }

    /// Enable the interrupts in `irq`, keeping the others as they are.
    pub fn enable_interrupts(&mut self, irq: UartInterrupts) {
        let addr = self.addr(crate::register::uart::int_ena::OFFSET);
        self.bus.set_bits(addr, irq.bits());
    }

    /// Disable the interrupts in `irq`.
    pub fn disable_interrupts(&mut self, irq: UartInterrupts) {
        let addr = self.addr(crate::register::uart::int_ena::OFFSET);
        self.bus.clear_bits(addr, irq.bits());
    }

    /// Clear the latched interrupts in `irq`.
    pub fn acknowledge(&mut self, irq: UartInterrupts) {
        self.clear_interrupts(irq.bits());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::register::uart::{conf0, int_clr};
    use crate::soc::clock::{APB_CLK_FREQ, REF_CLK_FREQ};
    use crate::testing::MockRegisterBus;

    const BASE: usize = 0x3FF4_0000;

    #[test]
    fn reset_divider_is_115200_from_apb() {
        let div = ClockDivider::from_bits(clkdiv::RESET);
        assert_eq!(div.integer, 694);
        assert_eq!(div.frag, 0);
        assert_eq!(ClockDivider::from_baud(APB_CLK_FREQ, 115_200).unwrap().integer, 694);
    }

    #[test]
    fn divider_keeps_fraction() {
        let div = ClockDivider::from_baud(APB_CLK_FREQ, 115_200).unwrap();
        assert_eq!(div.frag, 7);
        let actual = div.baud(APB_CLK_FREQ);
        assert!(actual.abs_diff(115_200) < 20, "{actual}");
        assert_eq!(div.to_bits(), (7 << 20) | 694);
        assert_eq!(ClockDivider::from_bits(div.to_bits()), div);
    }

    #[test]
    fn divider_rejects_out_of_range() {
        assert_eq!(ClockDivider::from_baud(APB_CLK_FREQ, 0), Err(FieldError::ValueOutOfRange));
        assert_eq!(
            ClockDivider::from_baud(REF_CLK_FREQ, 2_000_000),
            Err(FieldError::ValueOutOfRange)
        );
        assert_eq!(ClockDivider::from_baud(APB_CLK_FREQ, 50), Err(FieldError::ValueOutOfRange));
        assert!(ClockDivider::from_baud(APB_CLK_FREQ, 80).is_ok());
    }

    #[test]
    fn reset_frame_is_8n1() {
        assert_eq!(FrameFormat::from_conf0(conf0::RESET), Ok(FrameFormat::EIGHT_N_ONE));
        assert_eq!(FrameFormat::EIGHT_N_ONE.apply(conf0::RESET), conf0::RESET);
    }

    #[test]
    fn frame_format_bits() {
        let format = FrameFormat {
            data_bits: DataBits::Seven,
            parity: Parity::Odd,
            stop_bits: StopBits::Two,
        };
        let value = format.apply(conf0::TICK_REF_ALWAYS_ON.mask());
        assert_eq!(value, conf0::TICK_REF_ALWAYS_ON.mask() | (3 << 4) | (2 << 2) | 0b11);
        assert_eq!(FrameFormat::from_conf0(value), Ok(format));

        let even = FrameFormat {
            parity: Parity::Even,
            ..format
        };
        assert_eq!(even.apply(value) & 0b11, 0b10);
        assert_eq!(FrameFormat::from_conf0(0), Err(DecodeError::Reserved));
    }

    #[test]
    fn frame_length() {
        assert_eq!(FrameFormat::EIGHT_N_ONE.half_bits_per_char(), 20);
        let format = FrameFormat {
            data_bits: DataBits::Five,
            parity: Parity::Even,
            stop_bits: StopBits::OneAndHalf,
        };
        assert_eq!(format.half_bits_per_char(), 2 + 10 + 2 + 3);
    }

    #[test]
    fn interrupt_set_ops() {
        let irq = UartInterrupts::RXFIFO_FULL | UartInterrupts::RXFIFO_TOUT;
        assert_eq!(irq.bits(), 0x101);
        assert!(irq.contains(UartInterrupts::RXFIFO_TOUT));
        assert!(!irq.intersects(UartInterrupts::ERRORS));
        assert!(UartInterrupts::ALL.contains(UartInterrupts::ERRORS));
        assert_eq!(UartInterrupts::from_bits_truncate(u32::MAX), UartInterrupts::ALL);
        assert_eq!(irq.difference(UartInterrupts::RXFIFO_FULL), UartInterrupts::RXFIFO_TOUT);
        assert!(UartInterrupts::NONE.is_empty());
        assert_eq!(UartInterrupts::AT_CMD_CHAR_DET.bits(), 1 << 18);
    }

    #[test]
    fn interrupt_helpers_touch_the_right_registers() {
        let mut uart = UartRegs::new(MockRegisterBus::new(), BASE);
        uart.enable_interrupts(UartInterrupts::RXFIFO_FULL | UartInterrupts::TX_DONE);
        uart.disable_interrupts(UartInterrupts::TX_DONE);
        assert_eq!(uart.interrupt_enable(), 0x1);

        uart.acknowledge(UartInterrupts::ALL);
        let bus = uart.free();
        assert_eq!(bus.writes_to(BASE + int_clr::OFFSET), std::vec![0x0007_FFFF]);
    }

    #[test]
    fn set_frame_format_preserves_other_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + conf0::OFFSET, conf0::RESET | conf0::LOOPBACK.mask());
        let mut uart = UartRegs::new(bus, BASE);
        uart.set_frame_format(&FrameFormat {
            parity: Parity::Even,
            ..FrameFormat::EIGHT_N_ONE
        });
        assert_eq!(uart.conf0(), conf0::RESET | conf0::LOOPBACK.mask() | 0b10);
        assert_eq!(uart.frame_format().unwrap().parity, Parity::Even);
    }
}
