//! UART Register Definitions
//!
//! Three identical controllers, UART0 to UART2. The register offsets below
//! are relative to the base returned by [`uart_base`](crate::soc::uart_base).
//!
//! The 128-byte FIFOs share one 1 KiB RAM; `mem_conf` hands out blocks of
//! it. Several thresholds are split between a low part in `conf1` or
//! `swfc_conf` and high bits in `mem_conf`.

use embedded_hal::delay::DelayNs;

use crate::error::{FieldError, Result};
use crate::register::{reg_bit_ops, reg_field, reg_ro, reg_rw, reg_wo, register_block};
use crate::soc::field::{Access::*, Field, reset_value};
#[cfg(feature = "esp32")]
use crate::soc::Mmio;
use crate::soc::{RegisterBus, UART_NUM, uart_ahb_base, uart_base, wait_bits_set};

/// Default FIFO depth in bytes
pub const UART_FIFO_LEN: usize = 128;

/// Largest FIFO fill level the counters can report
pub const FIFO_CNT_MAX: u32 = 0x7FF;

/// FIFO data
///
/// Also reachable through the AHB alias, see
/// [`uart_ahb_base`](crate::soc::uart_ahb_base).
pub mod fifo {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x000;

    /// Next received byte on read, byte to send on write
    pub const RXFIFO_RD_BYTE: Field = Field::new("RXFIFO_RD_BYTE", 0, 8, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RXFIFO_RD_BYTE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Raw interrupt status
pub mod int_raw {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x004;

    /// AT command character sequence detected
    pub const AT_CMD_CHAR_DET: Field = Field::bit("AT_CMD_CHAR_DET", 18, ReadOnly, 0);
    /// RS485 transmitter and receiver collided
    pub const RS485_CLASH: Field = Field::bit("RS485_CLASH", 17, ReadOnly, 0);
    /// RS485 frame error
    pub const RS485_FRM_ERR: Field = Field::bit("RS485_FRM_ERR", 16, ReadOnly, 0);
    /// RS485 parity error
    pub const RS485_PARITY_ERR: Field = Field::bit("RS485_PARITY_ERR", 15, ReadOnly, 0);
    /// Transmitter idle after the last byte
    pub const TX_DONE: Field = Field::bit("TX_DONE", 14, ReadOnly, 0);
    /// Idle period after a break finished
    pub const TX_BRK_IDLE_DONE: Field = Field::bit("TX_BRK_IDLE_DONE", 13, ReadOnly, 0);
    /// Break sent
    pub const TX_BRK_DONE: Field = Field::bit("TX_BRK_DONE", 12, ReadOnly, 0);
    /// Start bit glitch detected
    pub const GLITCH_DET: Field = Field::bit("GLITCH_DET", 11, ReadOnly, 0);
    /// XOFF character received
    pub const SW_XOFF: Field = Field::bit("SW_XOFF", 10, ReadOnly, 0);
    /// XON character received
    pub const SW_XON: Field = Field::bit("SW_XON", 9, ReadOnly, 0);
    /// Receive timeout
    pub const RXFIFO_TOUT: Field = Field::bit("RXFIFO_TOUT", 8, ReadOnly, 0);
    /// Break received
    pub const BRK_DET: Field = Field::bit("BRK_DET", 7, ReadOnly, 0);
    /// CTS line changed
    pub const CTS_CHG: Field = Field::bit("CTS_CHG", 6, ReadOnly, 0);
    /// DSR line changed
    pub const DSR_CHG: Field = Field::bit("DSR_CHG", 5, ReadOnly, 0);
    /// Receive FIFO overflow
    pub const RXFIFO_OVF: Field = Field::bit("RXFIFO_OVF", 4, ReadOnly, 0);
    /// Frame error
    pub const FRM_ERR: Field = Field::bit("FRM_ERR", 3, ReadOnly, 0);
    /// Parity error
    pub const PARITY_ERR: Field = Field::bit("PARITY_ERR", 2, ReadOnly, 0);
    /// Transmit FIFO below its empty threshold
    pub const TXFIFO_EMPTY: Field = Field::bit("TXFIFO_EMPTY", 1, ReadOnly, 0);
    /// Receive FIFO above its full threshold
    pub const RXFIFO_FULL: Field = Field::bit("RXFIFO_FULL", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        AT_CMD_CHAR_DET, RS485_CLASH, RS485_FRM_ERR, RS485_PARITY_ERR, TX_DONE, TX_BRK_IDLE_DONE,
        TX_BRK_DONE, GLITCH_DET, SW_XOFF, SW_XON, RXFIFO_TOUT, BRK_DET, CTS_CHG, DSR_CHG,
        RXFIFO_OVF, FRM_ERR, PARITY_ERR, TXFIFO_EMPTY, RXFIFO_FULL,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Masked interrupt status
///
/// Bit positions match [`int_raw`].
pub mod int_st {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x008;

    /// AT command character sequence detected
    pub const AT_CMD_CHAR_DET: Field = Field::bit("AT_CMD_CHAR_DET", 18, ReadOnly, 0);
    /// RS485 transmitter and receiver collided
    pub const RS485_CLASH: Field = Field::bit("RS485_CLASH", 17, ReadOnly, 0);
    /// RS485 frame error
    pub const RS485_FRM_ERR: Field = Field::bit("RS485_FRM_ERR", 16, ReadOnly, 0);
    /// RS485 parity error
    pub const RS485_PARITY_ERR: Field = Field::bit("RS485_PARITY_ERR", 15, ReadOnly, 0);
    /// Transmitter idle after the last byte
    pub const TX_DONE: Field = Field::bit("TX_DONE", 14, ReadOnly, 0);
    /// Idle period after a break finished
    pub const TX_BRK_IDLE_DONE: Field = Field::bit("TX_BRK_IDLE_DONE", 13, ReadOnly, 0);
    /// Break sent
    pub const TX_BRK_DONE: Field = Field::bit("TX_BRK_DONE", 12, ReadOnly, 0);
    /// Start bit glitch detected
    pub const GLITCH_DET: Field = Field::bit("GLITCH_DET", 11, ReadOnly, 0);
    /// XOFF character received
    pub const SW_XOFF: Field = Field::bit("SW_XOFF", 10, ReadOnly, 0);
    /// XON character received
    pub const SW_XON: Field = Field::bit("SW_XON", 9, ReadOnly, 0);
    /// Receive timeout
    pub const RXFIFO_TOUT: Field = Field::bit("RXFIFO_TOUT", 8, ReadOnly, 0);
    /// Break received
    pub const BRK_DET: Field = Field::bit("BRK_DET", 7, ReadOnly, 0);
    /// CTS line changed
    pub const CTS_CHG: Field = Field::bit("CTS_CHG", 6, ReadOnly, 0);
    /// DSR line changed
    pub const DSR_CHG: Field = Field::bit("DSR_CHG", 5, ReadOnly, 0);
    /// Receive FIFO overflow
    pub const RXFIFO_OVF: Field = Field::bit("RXFIFO_OVF", 4, ReadOnly, 0);
    /// Frame error
    pub const FRM_ERR: Field = Field::bit("FRM_ERR", 3, ReadOnly, 0);
    /// Parity error
    pub const PARITY_ERR: Field = Field::bit("PARITY_ERR", 2, ReadOnly, 0);
    /// Transmit FIFO below its empty threshold
    pub const TXFIFO_EMPTY: Field = Field::bit("TXFIFO_EMPTY", 1, ReadOnly, 0);
    /// Receive FIFO above its full threshold
    pub const RXFIFO_FULL: Field = Field::bit("RXFIFO_FULL", 0, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        AT_CMD_CHAR_DET, RS485_CLASH, RS485_FRM_ERR, RS485_PARITY_ERR, TX_DONE, TX_BRK_IDLE_DONE,
        TX_BRK_DONE, GLITCH_DET, SW_XOFF, SW_XON, RXFIFO_TOUT, BRK_DET, CTS_CHG, DSR_CHG,
        RXFIFO_OVF, FRM_ERR, PARITY_ERR, TXFIFO_EMPTY, RXFIFO_FULL,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt enable
///
/// Bit positions match [`int_raw`].
pub mod int_ena {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x00C;

    /// AT command character sequence detected
    pub const AT_CMD_CHAR_DET: Field = Field::bit("AT_CMD_CHAR_DET", 18, ReadWrite, 0);
    /// RS485 transmitter and receiver collided
    pub const RS485_CLASH: Field = Field::bit("RS485_CLASH", 17, ReadWrite, 0);
    /// RS485 frame error
    pub const RS485_FRM_ERR: Field = Field::bit("RS485_FRM_ERR", 16, ReadWrite, 0);
    /// RS485 parity error
    pub const RS485_PARITY_ERR: Field = Field::bit("RS485_PARITY_ERR", 15, ReadWrite, 0);
    /// Transmitter idle after the last byte
    pub const TX_DONE: Field = Field::bit("TX_DONE", 14, ReadWrite, 0);
    /// Idle period after a break finished
    pub const TX_BRK_IDLE_DONE: Field = Field::bit("TX_BRK_IDLE_DONE", 13, ReadWrite, 0);
    /// Break sent
    pub const TX_BRK_DONE: Field = Field::bit("TX_BRK_DONE", 12, ReadWrite, 0);
    /// Start bit glitch detected
    pub const GLITCH_DET: Field = Field::bit("GLITCH_DET", 11, ReadWrite, 0);
    /// XOFF character received
    pub const SW_XOFF: Field = Field::bit("SW_XOFF", 10, ReadWrite, 0);
    /// XON character received
    pub const SW_XON: Field = Field::bit("SW_XON", 9, ReadWrite, 0);
    /// Receive timeout
    pub const RXFIFO_TOUT: Field = Field::bit("RXFIFO_TOUT", 8, ReadWrite, 0);
    /// Break received
    pub const BRK_DET: Field = Field::bit("BRK_DET", 7, ReadWrite, 0);
    /// CTS line changed
    pub const CTS_CHG: Field = Field::bit("CTS_CHG", 6, ReadWrite, 0);
    /// DSR line changed
    pub const DSR_CHG: Field = Field::bit("DSR_CHG", 5, ReadWrite, 0);
    /// Receive FIFO overflow
    pub const RXFIFO_OVF: Field = Field::bit("RXFIFO_OVF", 4, ReadWrite, 0);
    /// Frame error
    pub const FRM_ERR: Field = Field::bit("FRM_ERR", 3, ReadWrite, 0);
    /// Parity error
    pub const PARITY_ERR: Field = Field::bit("PARITY_ERR", 2, ReadWrite, 0);
    /// Transmit FIFO below its empty threshold
    pub const TXFIFO_EMPTY: Field = Field::bit("TXFIFO_EMPTY", 1, ReadWrite, 0);
    /// Receive FIFO above its full threshold
    pub const RXFIFO_FULL: Field = Field::bit("RXFIFO_FULL", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        AT_CMD_CHAR_DET, RS485_CLASH, RS485_FRM_ERR, RS485_PARITY_ERR, TX_DONE, TX_BRK_IDLE_DONE,
        TX_BRK_DONE, GLITCH_DET, SW_XOFF, SW_XON, RXFIFO_TOUT, BRK_DET, CTS_CHG, DSR_CHG,
        RXFIFO_OVF, FRM_ERR, PARITY_ERR, TXFIFO_EMPTY, RXFIFO_FULL,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt clear (write 1)
///
/// Bit positions match [`int_raw`].
pub mod int_clr {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x010;

    /// AT command character sequence detected
    pub const AT_CMD_CHAR_DET: Field = Field::bit("AT_CMD_CHAR_DET", 18, WriteOnly, 0);
    /// RS485 transmitter and receiver collided
    pub const RS485_CLASH: Field = Field::bit("RS485_CLASH", 17, WriteOnly, 0);
    /// RS485 frame error
    pub const RS485_FRM_ERR: Field = Field::bit("RS485_FRM_ERR", 16, WriteOnly, 0);
    /// RS485 parity error
    pub const RS485_PARITY_ERR: Field = Field::bit("RS485_PARITY_ERR", 15, WriteOnly, 0);
    /// Transmitter idle after the last byte
    pub const TX_DONE: Field = Field::bit("TX_DONE", 14, WriteOnly, 0);
    /// Idle period after a break finished
    pub const TX_BRK_IDLE_DONE: Field = Field::bit("TX_BRK_IDLE_DONE", 13, WriteOnly, 0);
    /// Break sent
    pub const TX_BRK_DONE: Field = Field::bit("TX_BRK_DONE", 12, WriteOnly, 0);
    /// Start bit glitch detected
    pub const GLITCH_DET: Field = Field::bit("GLITCH_DET", 11, WriteOnly, 0);
    /// XOFF character received
    pub const SW_XOFF: Field = Field::bit("SW_XOFF", 10, WriteOnly, 0);
    /// XON character received
    pub const SW_XON: Field = Field::bit("SW_XON", 9, WriteOnly, 0);
    /// Receive timeout
    pub const RXFIFO_TOUT: Field = Field::bit("RXFIFO_TOUT", 8, WriteOnly, 0);
    /// Break received
    pub const BRK_DET: Field = Field::bit("BRK_DET", 7, WriteOnly, 0);
    /// CTS line changed
    pub const CTS_CHG: Field = Field::bit("CTS_CHG", 6, WriteOnly, 0);
    /// DSR line changed
    pub const DSR_CHG: Field = Field::bit("DSR_CHG", 5, WriteOnly, 0);
    /// Receive FIFO overflow
    pub const RXFIFO_OVF: Field = Field::bit("RXFIFO_OVF", 4, WriteOnly, 0);
    /// Frame error
    pub const FRM_ERR: Field = Field::bit("FRM_ERR", 3, WriteOnly, 0);
    /// Parity error
    pub const PARITY_ERR: Field = Field::bit("PARITY_ERR", 2, WriteOnly, 0);
    /// Transmit FIFO below its empty threshold
    pub const TXFIFO_EMPTY: Field = Field::bit("TXFIFO_EMPTY", 1, WriteOnly, 0);
    /// Receive FIFO above its full threshold
    pub const RXFIFO_FULL: Field = Field::bit("RXFIFO_FULL", 0, WriteOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        AT_CMD_CHAR_DET, RS485_CLASH, RS485_FRM_ERR, RS485_PARITY_ERR, TX_DONE, TX_BRK_IDLE_DONE,
        TX_BRK_DONE, GLITCH_DET, SW_XOFF, SW_XON, RXFIFO_TOUT, BRK_DET, CTS_CHG, DSR_CHG,
        RXFIFO_OVF, FRM_ERR, PARITY_ERR, TXFIFO_EMPTY, RXFIFO_FULL,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Baud rate divider
pub mod clkdiv {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x014;

    /// Fractional part of the divider, in sixteenths
    pub const FRAG: Field = Field::new("FRAG", 20, 4, ReadWrite, 0);
    /// Integer part of the divider
    pub const INTEGER: Field = Field::new("INTEGER", 0, 20, ReadWrite, 0x2B6);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FRAG, INTEGER];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Baud rate detection
pub mod autobaud {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x018;

    /// Pulses shorter than this many APB cycles are ignored
    pub const GLITCH_FILT: Field = Field::new("GLITCH_FILT", 8, 8, ReadWrite, 0x10);
    /// Measure the incoming baud rate
    pub const AUTOBAUD_EN: Field = Field::bit("AUTOBAUD_EN", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[GLITCH_FILT, AUTOBAUD_EN];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Status
pub mod status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x01C;

    /// TXD line level
    pub const TXD: Field = Field::bit("TXD", 31, ReadOnly, 0);
    /// RTS line level
    pub const RTSN: Field = Field::bit("RTSN", 30, ReadOnly, 0);
    /// DTR line level
    pub const DTRN: Field = Field::bit("DTRN", 29, ReadOnly, 0);
    /// Transmitter state
    pub const ST_UTX_OUT: Field = Field::new("ST_UTX_OUT", 24, 4, ReadOnly, 0);
    /// Bytes waiting in the transmit FIFO
    pub const TXFIFO_CNT: Field = Field::new("TXFIFO_CNT", 16, 8, ReadOnly, 0);
    /// RXD line level
    pub const RXD: Field = Field::bit("RXD", 15, ReadOnly, 0);
    /// CTS line level
    pub const CTSN: Field = Field::bit("CTSN", 14, ReadOnly, 0);
    /// DSR line level
    pub const DSRN: Field = Field::bit("DSRN", 13, ReadOnly, 0);
    /// Receiver state
    pub const ST_URX_OUT: Field = Field::new("ST_URX_OUT", 8, 4, ReadOnly, 0);
    /// Bytes waiting in the receive FIFO
    pub const RXFIFO_CNT: Field = Field::new("RXFIFO_CNT", 0, 8, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TXD, RTSN, DTRN, ST_UTX_OUT, TXFIFO_CNT, RXD, CTSN, DSRN, ST_URX_OUT, RXFIFO_CNT,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Configuration 0
pub mod conf0 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x020;

    /// Clock from APB instead of REF_TICK
    pub const TICK_REF_ALWAYS_ON: Field = Field::bit("TICK_REF_ALWAYS_ON", 27, ReadWrite, 1);
    /// Drop bytes received with errors
    pub const ERR_WR_MASK: Field = Field::bit("ERR_WR_MASK", 26, ReadWrite, 0);
    /// Force the register clock on
    pub const CLK_EN: Field = Field::bit("CLK_EN", 25, ReadWrite, 0);
    /// Invert DTR
    pub const DTR_INV: Field = Field::bit("DTR_INV", 24, ReadWrite, 0);
    /// Invert RTS
    pub const RTS_INV: Field = Field::bit("RTS_INV", 23, ReadWrite, 0);
    /// Invert TXD
    pub const TXD_INV: Field = Field::bit("TXD_INV", 22, ReadWrite, 0);
    /// Invert DSR
    pub const DSR_INV: Field = Field::bit("DSR_INV", 21, ReadWrite, 0);
    /// Invert CTS
    pub const CTS_INV: Field = Field::bit("CTS_INV", 20, ReadWrite, 0);
    /// Invert RXD
    pub const RXD_INV: Field = Field::bit("RXD_INV", 19, ReadWrite, 0);
    /// Hold the transmit FIFO in reset
    pub const TXFIFO_RST: Field = Field::bit("TXFIFO_RST", 18, ReadWrite, 0);
    /// Hold the receive FIFO in reset
    pub const RXFIFO_RST: Field = Field::bit("RXFIFO_RST", 17, ReadWrite, 0);
    /// IrDA mode
    pub const IRDA_EN: Field = Field::bit("IRDA_EN", 16, ReadWrite, 0);
    /// Hardware transmit flow control
    pub const TX_FLOW_EN: Field = Field::bit("TX_FLOW_EN", 15, ReadWrite, 0);
    /// Internal loopback
    pub const LOOPBACK: Field = Field::bit("LOOPBACK", 14, ReadWrite, 0);
    /// Invert the IrDA receive level
    pub const IRDA_RX_INV: Field = Field::bit("IRDA_RX_INV", 13, ReadWrite, 0);
    /// Invert the IrDA transmit level
    pub const IRDA_TX_INV: Field = Field::bit("IRDA_TX_INV", 12, ReadWrite, 0);
    /// IrDA start bit handling
    pub const IRDA_WCTL: Field = Field::bit("IRDA_WCTL", 11, ReadWrite, 0);
    /// IrDA transmit
    pub const IRDA_TX_EN: Field = Field::bit("IRDA_TX_EN", 10, ReadWrite, 0);
    /// IrDA loopback
    pub const IRDA_DPLX: Field = Field::bit("IRDA_DPLX", 9, ReadWrite, 0);
    /// Send a break after the FIFO drains
    pub const TXD_BRK: Field = Field::bit("TXD_BRK", 8, ReadWrite, 0);
    /// Software DTR level
    pub const SW_DTR: Field = Field::bit("SW_DTR", 7, ReadWrite, 0);
    /// Software RTS level
    pub const SW_RTS: Field = Field::bit("SW_RTS", 6, ReadWrite, 0);
    /// Stop bits, 1 = 1, 2 = 1.5, 3 = 2
    pub const STOP_BIT_NUM: Field = Field::new("STOP_BIT_NUM", 4, 2, ReadWrite, 1);
    /// Data bits minus 5
    pub const BIT_NUM: Field = Field::new("BIT_NUM", 2, 2, ReadWrite, 3);
    /// Parity bit
    pub const PARITY_EN: Field = Field::bit("PARITY_EN", 1, ReadWrite, 0);
    /// Odd parity when set
    pub const PARITY: Field = Field::bit("PARITY", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TICK_REF_ALWAYS_ON, ERR_WR_MASK, CLK_EN, DTR_INV, RTS_INV, TXD_INV, DSR_INV, CTS_INV,
        RXD_INV, TXFIFO_RST, RXFIFO_RST, IRDA_EN, TX_FLOW_EN, LOOPBACK, IRDA_RX_INV, IRDA_TX_INV,
        IRDA_WCTL, IRDA_TX_EN, IRDA_DPLX, TXD_BRK, SW_DTR, SW_RTS, STOP_BIT_NUM, BIT_NUM, PARITY_EN,
        PARITY,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Configuration 1
pub mod conf1 {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x024;

    /// Receive timeout
    pub const RX_TOUT_EN: Field = Field::bit("RX_TOUT_EN", 31, ReadWrite, 0);
    /// Receive timeout in bit times, low bits
    pub const RX_TOUT_THRHD: Field = Field::new("RX_TOUT_THRHD", 24, 7, ReadWrite, 0);
    /// Hardware receive flow control
    pub const RX_FLOW_EN: Field = Field::bit("RX_FLOW_EN", 23, ReadWrite, 0);
    /// Receive FIFO level that deasserts RTS, low bits
    pub const RX_FLOW_THRHD: Field = Field::new("RX_FLOW_THRHD", 16, 7, ReadWrite, 0);
    /// Transmit FIFO empty threshold
    pub const TXFIFO_EMPTY_THRHD: Field = Field::new("TXFIFO_EMPTY_THRHD", 8, 7, ReadWrite, 0x60);
    /// Receive FIFO full threshold
    pub const RXFIFO_FULL_THRHD: Field = Field::new("RXFIFO_FULL_THRHD", 0, 7, ReadWrite, 0x60);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        RX_TOUT_EN, RX_TOUT_THRHD, RX_FLOW_EN, RX_FLOW_THRHD, TXFIFO_EMPTY_THRHD, RXFIFO_FULL_THRHD,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Shortest low pulse
pub mod lowpulse {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x028;

    /// Minimum low pulse width in APB cycles
    pub const MIN_CNT: Field = Field::new("MIN_CNT", 0, 20, ReadOnly, 0x000F_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[MIN_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Shortest high pulse
pub mod highpulse {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x02C;

    /// Minimum high pulse width in APB cycles
    pub const MIN_CNT: Field = Field::new("MIN_CNT", 0, 20, ReadOnly, 0x000F_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[MIN_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// RXD edge count
pub mod rxd_cnt {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x030;

    /// RXD edges seen
    pub const EDGE_CNT: Field = Field::new("EDGE_CNT", 0, 10, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[EDGE_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Software flow control
pub mod flow_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x034;

    /// Send an XOFF character
    pub const SEND_XOFF: Field = Field::bit("SEND_XOFF", 5, ReadWrite, 0);
    /// Send an XON character
    pub const SEND_XON: Field = Field::bit("SEND_XON", 4, ReadWrite, 0);
    /// Stop transmitting
    pub const FORCE_XOFF: Field = Field::bit("FORCE_XOFF", 3, ReadWrite, 0);
    /// Resume transmitting
    pub const FORCE_XON: Field = Field::bit("FORCE_XON", 2, ReadWrite, 0);
    /// Remove flow control characters from the received data
    pub const XONOFF_DEL: Field = Field::bit("XONOFF_DEL", 1, ReadWrite, 0);
    /// Software flow control
    pub const SW_FLOW_CON_EN: Field = Field::bit("SW_FLOW_CON_EN", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        SEND_XOFF, SEND_XON, FORCE_XOFF, FORCE_XON, XONOFF_DEL, SW_FLOW_CON_EN,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Light sleep wake-up
pub mod sleep_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x038;

    /// RXD edges that wake the chip from light sleep
    pub const ACTIVE_THRESHOLD: Field = Field::new("ACTIVE_THRESHOLD", 0, 10, ReadWrite, 0xF0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ACTIVE_THRESHOLD];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Software flow control characters
pub mod swfc_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x03C;

    /// XOFF character
    pub const XOFF_CHAR: Field = Field::new("XOFF_CHAR", 24, 8, ReadWrite, 0x13);
    /// XON character
    pub const XON_CHAR: Field = Field::new("XON_CHAR", 16, 8, ReadWrite, 0x11);
    /// Receive FIFO level that sends XOFF, low bits
    pub const XOFF_THRESHOLD: Field = Field::new("XOFF_THRESHOLD", 8, 8, ReadWrite, 0xE0);
    /// Receive FIFO level that sends XON, low bits
    pub const XON_THRESHOLD: Field = Field::new("XON_THRESHOLD", 0, 8, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[XOFF_CHAR, XON_CHAR, XOFF_THRESHOLD, XON_THRESHOLD];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Idle and break timing
pub mod idle_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x040;

    /// Break length in bit times
    pub const TX_BRK_NUM: Field = Field::new("TX_BRK_NUM", 20, 8, ReadWrite, 0xA);
    /// Idle time between transfers in bit times
    pub const TX_IDLE_NUM: Field = Field::new("TX_IDLE_NUM", 10, 10, ReadWrite, 0x100);
    /// Idle time that ends a receive frame
    pub const RX_IDLE_THRHD: Field = Field::new("RX_IDLE_THRHD", 0, 10, ReadWrite, 0x100);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TX_BRK_NUM, TX_IDLE_NUM, RX_IDLE_THRHD];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// RS485 configuration
pub mod rs485_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x044;

    /// Transmit delay
    pub const TX_DLY_NUM: Field = Field::new("TX_DLY_NUM", 6, 4, ReadWrite, 0);
    /// Receive delay
    pub const RX_DLY_NUM: Field = Field::bit("RX_DLY_NUM", 5, ReadWrite, 0);
    /// Transmit while receiving
    pub const RX_BY_TX_EN: Field = Field::bit("RX_BY_TX_EN", 4, ReadWrite, 0);
    /// Receive own transmission
    pub const TX_RX_EN: Field = Field::bit("TX_RX_EN", 3, ReadWrite, 0);
    /// Extra stop bit
    pub const DL1_EN: Field = Field::bit("DL1_EN", 2, ReadWrite, 0);
    /// Extra start bit
    pub const DL0_EN: Field = Field::bit("DL0_EN", 1, ReadWrite, 0);
    /// RS485 mode
    pub const RS485_EN: Field = Field::bit("RS485_EN", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TX_DLY_NUM, RX_DLY_NUM, RX_BY_TX_EN, TX_RX_EN, DL1_EN, DL0_EN, RS485_EN,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// AT command pre-idle time
pub mod at_cmd_precnt {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x048;

    /// Idle time before the first AT character
    pub const PRE_IDLE_NUM: Field = Field::new("PRE_IDLE_NUM", 0, 24, ReadWrite, 0x0018_6A00);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[PRE_IDLE_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// AT command post-idle time
pub mod at_cmd_postcnt {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x04C;

    /// Idle time after the last AT character
    pub const POST_IDLE_NUM: Field = Field::new("POST_IDLE_NUM", 0, 24, ReadWrite, 0x0018_6A00);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[POST_IDLE_NUM];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// AT command character gap
pub mod at_cmd_gaptout {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x050;

    /// Longest gap between AT characters
    pub const RX_GAP_TOUT: Field = Field::new("RX_GAP_TOUT", 0, 24, ReadWrite, 0x1E00);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RX_GAP_TOUT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// AT command character
pub mod at_cmd_char {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x054;

    /// Repetitions of the AT character
    pub const CHAR_NUM: Field = Field::new("CHAR_NUM", 8, 8, ReadWrite, 3);
    /// AT character
    pub const AT_CMD_CHAR: Field = Field::new("AT_CMD_CHAR", 0, 8, ReadWrite, 0x2B);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[CHAR_NUM, AT_CMD_CHAR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// FIFO memory configuration
pub mod mem_conf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x058;

    /// Transmit FIFO empty threshold, high bits
    pub const TX_MEM_EMPTY_THRHD: Field = Field::new("TX_MEM_EMPTY_THRHD", 28, 3, ReadWrite, 0);
    /// Receive FIFO full threshold, high bits
    pub const RX_MEM_FULL_THRHD: Field = Field::new("RX_MEM_FULL_THRHD", 25, 3, ReadWrite, 0);
    /// XOFF threshold, high bits
    pub const XOFF_THRESHOLD_H2: Field = Field::new("XOFF_THRESHOLD_H2", 23, 2, ReadWrite, 0);
    /// XON threshold, high bits
    pub const XON_THRESHOLD_H2: Field = Field::new("XON_THRESHOLD_H2", 21, 2, ReadWrite, 0);
    /// Receive timeout, high bits
    pub const RX_TOUT_THRHD_H3: Field = Field::new("RX_TOUT_THRHD_H3", 18, 3, ReadWrite, 0);
    /// Receive flow control threshold, high bits
    pub const RX_FLOW_THRHD_H3: Field = Field::new("RX_FLOW_THRHD_H3", 15, 3, ReadWrite, 0);
    /// Transmit FIFO size in 128-byte blocks
    pub const TX_SIZE: Field = Field::new("TX_SIZE", 7, 4, ReadWrite, 1);
    /// Receive FIFO size in 128-byte blocks
    pub const RX_SIZE: Field = Field::new("RX_SIZE", 3, 4, ReadWrite, 1);
    /// Power down the FIFO RAM
    pub const MEM_PD: Field = Field::bit("MEM_PD", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TX_MEM_EMPTY_THRHD, RX_MEM_FULL_THRHD, XOFF_THRESHOLD_H2, XON_THRESHOLD_H2,
        RX_TOUT_THRHD_H3, RX_FLOW_THRHD_H3, TX_SIZE, RX_SIZE, MEM_PD,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Transmit FIFO memory status
pub mod mem_tx_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x05C;

    /// Transmit FIFO pointers
    pub const STATUS: Field = Field::new("STATUS", 0, 24, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[STATUS];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Receive FIFO memory status
pub mod mem_rx_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x060;

    /// Receive FIFO pointers
    pub const STATUS: Field = Field::new("STATUS", 0, 24, ReadOnly, 0);
    /// Receive FIFO read pointer
    pub const RD_ADDR: Field = Field::new("RD_ADDR", 2, 11, ReadOnly, 0);
    /// Receive FIFO write pointer
    pub const WR_ADDR: Field = Field::new("WR_ADDR", 13, 11, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[STATUS];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// FIFO fill level, high bits
pub mod mem_cnt_status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x064;

    /// Transmit FIFO fill level, bits 10:8
    pub const TX_MEM_CNT: Field = Field::new("TX_MEM_CNT", 3, 3, ReadOnly, 0);
    /// Receive FIFO fill level, bits 10:8
    pub const RX_MEM_CNT: Field = Field::new("RX_MEM_CNT", 0, 3, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TX_MEM_CNT, RX_MEM_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Shortest interval between rising edges
pub mod pospulse {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x068;

    /// Minimum rising edge interval in APB cycles
    pub const MIN_CNT: Field = Field::new("MIN_CNT", 0, 20, ReadOnly, 0x000F_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[MIN_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Shortest interval between falling edges
pub mod negpulse {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x06C;

    /// Minimum falling edge interval in APB cycles
    pub const MIN_CNT: Field = Field::new("MIN_CNT", 0, 20, ReadOnly, 0x000F_FFFF);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[MIN_CNT];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Version
pub mod date {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x078;

    /// Block version
    pub const DATE: Field = Field::new("DATE", 0, 32, ReadWrite, 0x1512_2500);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[DATE];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Identifier
pub mod id {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x07C;

    /// Block identifier
    pub const ID: Field = Field::new("ID", 0, 32, ReadWrite, 0x500);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ID];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Every interrupt bit, valid for `int_raw`, `int_st`, `int_ena` and `int_clr`
pub const INTERRUPT_MASK: u32 = crate::soc::field::fields_mask(int_raw::FIELDS);

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// UART register block
    UartRegs
}

#[cfg(feature = "esp32")]
impl UartRegs<Mmio> {
    /// Registers of controller `instance` (0..=2).
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not hold another handle to the
    /// same controller.
    pub unsafe fn instance(instance: usize) -> Result<Self> {
        let base = uart_base(instance).ok_or(FieldError::InvalidInstance)?;
        Ok(Self::new(unsafe { Mmio::new() }, base))
    }
}

impl<B: RegisterBus> UartRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(conf0, set_conf0, conf0::OFFSET, "Configuration 0 register");
    reg_rw!(conf1, set_conf1, conf1::OFFSET, "Configuration 1 register");
    reg_rw!(clkdiv, set_clkdiv, clkdiv::OFFSET, "Clock Divider register");
    reg_rw!(autobaud, set_autobaud, autobaud::OFFSET, "Autobaud register");
    reg_rw!(interrupt_enable, set_interrupt_enable, int_ena::OFFSET, "Interrupt Enable register");
    reg_rw!(flow_conf, set_flow_conf, flow_conf::OFFSET, "Flow Control register");
    reg_rw!(sleep_conf, set_sleep_conf, sleep_conf::OFFSET, "Sleep Configuration register");
    reg_rw!(swfc_conf, set_swfc_conf, swfc_conf::OFFSET, "Software Flow Control register");
    reg_rw!(idle_conf, set_idle_conf, idle_conf::OFFSET, "Idle Configuration register");
    reg_rw!(rs485_conf, set_rs485_conf, rs485_conf::OFFSET, "RS485 Configuration register");
    reg_rw!(at_cmd_precnt, set_at_cmd_precnt, at_cmd_precnt::OFFSET, "AT Pre-Idle register");
    reg_rw!(at_cmd_postcnt, set_at_cmd_postcnt, at_cmd_postcnt::OFFSET, "AT Post-Idle register");
    reg_rw!(at_cmd_gaptout, set_at_cmd_gaptout, at_cmd_gaptout::OFFSET, "AT Gap register");
    reg_rw!(at_cmd_char, set_at_cmd_char, at_cmd_char::OFFSET, "AT Character register");
    reg_rw!(mem_conf, set_mem_conf, mem_conf::OFFSET, "FIFO Memory Configuration register");

    reg_ro!(status, status::OFFSET, "Status register");
    reg_ro!(raw_interrupts, int_raw::OFFSET, "Raw Interrupt Status register");
    reg_ro!(interrupt_status, int_st::OFFSET, "Interrupt Status register");
    reg_ro!(lowpulse, lowpulse::OFFSET, "Low Pulse register");
    reg_ro!(highpulse, highpulse::OFFSET, "High Pulse register");
    reg_ro!(pospulse, pospulse::OFFSET, "Rising Edge Interval register");
    reg_ro!(negpulse, negpulse::OFFSET, "Falling Edge Interval register");
    reg_ro!(rxd_edges, rxd_cnt::OFFSET, "RXD Edge Count register");
    reg_ro!(mem_tx_status, mem_tx_status::OFFSET, "TX FIFO Memory Status register");
    reg_ro!(mem_rx_status, mem_rx_status::OFFSET, "RX FIFO Memory Status register");
    reg_ro!(mem_cnt_status, mem_cnt_status::OFFSET, "FIFO Count register");
    reg_ro!(date, date::OFFSET, "Date register (version info)");
    reg_ro!(id, id::OFFSET, "ID register");

    reg_wo!(clear_interrupts, int_clr::OFFSET, "Interrupt Clear register");

    // -------------------------------------------------------------------------
    // Bit operations (generated by macros)
    // -------------------------------------------------------------------------

    reg_bit_ops!(enable_loopback, disable_loopback, conf0::OFFSET,
                 conf0::LOOPBACK.mask(), "internal loopback", "Enable", "Disable");
    reg_bit_ops!(start_break, stop_break, conf0::OFFSET,
                 conf0::TXD_BRK.mask(), "break after the FIFO drains", "Send", "Stop sending");
    reg_bit_ops!(enable_autobaud, disable_autobaud, autobaud::OFFSET,
                 autobaud::AUTOBAUD_EN.mask(), "baud rate detection", "Enable", "Disable");

    // -------------------------------------------------------------------------
    // Fields
    // -------------------------------------------------------------------------

    reg_field!(rx_full_threshold, set_rx_full_threshold, conf1::OFFSET,
               conf1::RXFIFO_FULL_THRHD, "receive FIFO full threshold, low bits");
    reg_field!(tx_empty_threshold, set_tx_empty_threshold, conf1::OFFSET,
               conf1::TXFIFO_EMPTY_THRHD, "transmit FIFO empty threshold, low bits");
    reg_field!(rx_idle_threshold, set_rx_idle_threshold, idle_conf::OFFSET,
               idle_conf::RX_IDLE_THRHD, "receive idle threshold");

    // -------------------------------------------------------------------------
    // FIFO access
    // -------------------------------------------------------------------------

    /// Bytes waiting in the receive FIFO.
    pub fn rx_fifo_count(&mut self) -> u32 {
        let low = status::RXFIFO_CNT.get(self.status());
        let high = mem_cnt_status::RX_MEM_CNT.get(self.mem_cnt_status());
        (high << status::RXFIFO_CNT.width()) | low
    }

    /// Bytes waiting in the transmit FIFO.
    pub fn tx_fifo_count(&mut self) -> u32 {
        let low = status::TXFIFO_CNT.get(self.status());
        let high = mem_cnt_status::TX_MEM_CNT.get(self.mem_cnt_status());
        (high << status::TXFIFO_CNT.width()) | low
    }

    /// Pop one byte from the receive FIFO.
    #[inline]
    pub fn read_fifo(&mut self) -> u8 {
        let addr = self.addr(fifo::OFFSET);
        fifo::RXFIFO_RD_BYTE.get(self.bus.read(addr)) as u8
    }

    /// Push one byte into the transmit FIFO through the APB address.
    ///
    /// ESP-IDF fills the FIFO through the AHB alias instead, see
    /// [`write_fifo_ahb`](Self::write_fifo_ahb).
    #[inline]
    pub fn write_fifo(&mut self, byte: u8) {
        let addr = self.addr(fifo::OFFSET);
        self.bus.write(addr, u32::from(byte))
    }

    /// AHB alias of the FIFO register, if the block sits at a UART base.
    pub fn ahb_fifo_addr(&self) -> Option<usize> {
        let instance = (0..UART_NUM).find(|&n| uart_base(n) == Some(self.base))?;
        uart_ahb_base(instance).map(|ahb| ahb + fifo::OFFSET)
    }

    /// Push one byte into the transmit FIFO through the AHB alias.
    pub fn write_fifo_ahb(&mut self, byte: u8) -> Result<()> {
        let addr = self.ahb_fifo_addr().ok_or(FieldError::InvalidInstance)?;
        self.bus.write(addr, u32::from(byte));
        Ok(())
    }

    /// Drain up to `buf.len()` received bytes, returning how many were read.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let available = self.rx_fifo_count() as usize;
        let n = available.min(buf.len());
        for slot in &mut buf[..n] {
            *slot = self.read_fifo();
        }
        n
    }

    /// Queue as much of `data` as fits in the transmit FIFO.
    ///
    /// Returns the number of bytes queued.
    pub fn write_bytes(&mut self, data: &[u8]) -> usize {
        let used = self.tx_fifo_count() as usize;
        let n = UART_FIFO_LEN.saturating_sub(used).min(data.len());
        for &byte in &data[..n] {
            self.write_fifo(byte);
        }
        n
    }

    /// Pulse the FIFO reset bits selected by `rx` and `tx`.
    pub fn reset_fifos(&mut self, rx: bool, tx: bool) {
        let mut mask = 0;
        if rx {
            mask |= conf0::RXFIFO_RST.mask();
        }
        if tx {
            mask |= conf0::TXFIFO_RST.mask();
        }
        if mask == 0 {
            return;
        }
        let addr = self.addr(conf0::OFFSET);
        self.bus.set_bits(addr, mask);
        self.bus.clear_bits(addr, mask);
    }

    /// Wait for the transmitter to go idle after the last queued byte.
    ///
    /// Clears the latched `TX_DONE` flag first so an earlier completion
    /// does not end the wait.
    pub fn wait_tx_done<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        self.clear_interrupts(int_clr::TX_DONE.mask());
        let addr = self.addr(int_raw::OFFSET);
        wait_bits_set(&mut self.bus, addr, int_raw::TX_DONE.mask(), delay, timeout_us)?;
        self.clear_interrupts(int_clr::TX_DONE.mask());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::{Error, IoError};
    use crate::soc::field::fields_disjoint;
    use crate::testing::{MockDelay, MockRegisterBus};

    const BASE: usize = 0x3FF5_0000;

    #[test]
    fn register_offsets() {
        let offsets = [
            fifo::OFFSET,
            int_raw::OFFSET,
            int_st::OFFSET,
            int_ena::OFFSET,
            int_clr::OFFSET,
            clkdiv::OFFSET,
            autobaud::OFFSET,
            status::OFFSET,
            conf0::OFFSET,
            conf1::OFFSET,
            lowpulse::OFFSET,
            highpulse::OFFSET,
            rxd_cnt::OFFSET,
            flow_conf::OFFSET,
            sleep_conf::OFFSET,
            swfc_conf::OFFSET,
            idle_conf::OFFSET,
            rs485_conf::OFFSET,
            at_cmd_precnt::OFFSET,
            at_cmd_postcnt::OFFSET,
            at_cmd_gaptout::OFFSET,
            at_cmd_char::OFFSET,
            mem_conf::OFFSET,
            mem_tx_status::OFFSET,
            mem_rx_status::OFFSET,
            mem_cnt_status::OFFSET,
            pospulse::OFFSET,
            negpulse::OFFSET,
        ];
        for (i, offset) in offsets.iter().enumerate() {
            assert_eq!(*offset, i * 4);
        }
        assert_eq!(date::OFFSET, 0x78);
        assert_eq!(id::OFFSET, 0x7C);
    }

    #[test]
    fn reset_values() {
        assert_eq!(clkdiv::RESET, 0x0000_02B6);
        assert_eq!(autobaud::RESET, 0x0000_1000);
        assert_eq!(conf0::RESET, 0x0800_001C);
        assert_eq!(conf1::RESET, 0x0000_6060);
        assert_eq!(sleep_conf::RESET, 0x0000_00F0);
        assert_eq!(swfc_conf::RESET, 0x1311_E000);
        assert_eq!(at_cmd_precnt::RESET, 0x0018_6A00);
        assert_eq!(at_cmd_postcnt::RESET, 0x0018_6A00);
        assert_eq!(at_cmd_gaptout::RESET, 0x0000_1E00);
        assert_eq!(at_cmd_char::RESET, 0x0000_032B);
        assert_eq!(mem_conf::RESET, 0x0000_0088);
        assert_eq!(date::RESET, 0x1512_2500);
        assert_eq!(id::RESET, 0x0000_0500);
    }

    #[test]
    fn interrupt_registers_share_layout() {
        assert_eq!(INTERRUPT_MASK, 0x0007_FFFF);
        assert_eq!(int_raw::TX_DONE.mask(), 1 << 14);
        assert_eq!(int_raw::RXFIFO_TOUT.mask(), 1 << 8);
        for ((raw, st), (ena, clr)) in int_raw::FIELDS
            .iter()
            .zip(int_st::FIELDS)
            .zip(int_ena::FIELDS.iter().zip(int_clr::FIELDS))
        {
            assert_eq!(raw.mask(), st.mask(), "{}", raw.name());
            assert_eq!(raw.mask(), ena.mask(), "{}", raw.name());
            assert_eq!(raw.mask(), clr.mask(), "{}", raw.name());
        }
        assert!(!int_clr::TX_DONE.access().is_readable());
    }

    #[test]
    fn fields_never_overlap() {
        let maps: &[&[Field]] = &[
            fifo::FIELDS,
            int_raw::FIELDS,
            int_st::FIELDS,
            int_ena::FIELDS,
            int_clr::FIELDS,
            clkdiv::FIELDS,
            autobaud::FIELDS,
            status::FIELDS,
            conf0::FIELDS,
            conf1::FIELDS,
            lowpulse::FIELDS,
            highpulse::FIELDS,
            rxd_cnt::FIELDS,
            flow_conf::FIELDS,
            sleep_conf::FIELDS,
            swfc_conf::FIELDS,
            idle_conf::FIELDS,
            rs485_conf::FIELDS,
            at_cmd_precnt::FIELDS,
            at_cmd_postcnt::FIELDS,
            at_cmd_gaptout::FIELDS,
            at_cmd_char::FIELDS,
            mem_conf::FIELDS,
            mem_tx_status::FIELDS,
            mem_rx_status::FIELDS,
            mem_cnt_status::FIELDS,
            pospulse::FIELDS,
            negpulse::FIELDS,
            date::FIELDS,
            id::FIELDS,
        ];
        for fields in maps {
            assert!(fields_disjoint(fields), "{}", fields[0].name());
        }
    }

    #[test]
    fn field_layouts() {
        assert_eq!(clkdiv::FRAG.mask(), 0x00F0_0000);
        assert_eq!(clkdiv::INTEGER.mask(), 0x000F_FFFF);
        assert_eq!(status::TXD.mask(), 1 << 31);
        assert_eq!(status::TXFIFO_CNT.mask(), 0x00FF_0000);
        assert_eq!(conf0::STOP_BIT_NUM.mask(), 0x30);
        assert_eq!(conf0::BIT_NUM.mask(), 0x0C);
        assert_eq!(mem_conf::TX_SIZE.mask(), 0x0780);
        assert_eq!(mem_conf::RX_SIZE.mask(), 0x0078);
        for fields in [status::FIELDS, conf0::FIELDS, conf1::FIELDS, mem_conf::FIELDS] {
            assert!(fields_disjoint(fields));
        }
    }

    #[test]
    fn rx_pointers_are_views_of_status() {
        assert_eq!(mem_rx_status::RD_ADDR.mask(), 0x0000_1FFC);
        assert_eq!(mem_rx_status::WR_ADDR.mask(), 0x00FF_E000);
        let both = mem_rx_status::RD_ADDR.mask() | mem_rx_status::WR_ADDR.mask();
        assert_eq!(both & !mem_rx_status::STATUS.mask(), 0);
        assert_eq!(mem_rx_status::FIELDS.len(), 1);
    }

    #[test]
    fn fifo_counts_combine_high_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + status::OFFSET, 0x0012_0034);
        bus.set_register(BASE + mem_cnt_status::OFFSET, (0b010 << 3) | 0b001);
        let mut uart = UartRegs::new(bus, BASE);

        assert_eq!(uart.rx_fifo_count(), 0x134);
        assert_eq!(uart.tx_fifo_count(), 0x212);
        assert!(uart.rx_fifo_count() <= FIFO_CNT_MAX);
    }

    #[test]
    fn write_bytes_stops_at_free_space() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + status::OFFSET, 126 << 16);
        let mut uart = UartRegs::new(bus, BASE);

        assert_eq!(uart.write_bytes(b"hello"), 2);
        let bus = uart.free();
        assert_eq!(bus.writes_to(BASE), std::vec![u32::from(b'h'), u32::from(b'e')]);
    }

    #[test]
    fn fifo_writes_through_ahb_alias() {
        let mut uart = UartRegs::new(MockRegisterBus::new(), BASE);
        assert_eq!(uart.ahb_fifo_addr(), Some(0x6001_0000));
        uart.write_fifo_ahb(b'A').unwrap();
        uart.write_fifo(b'B');
        let bus = uart.free();
        assert_eq!(bus.writes_to(0x6001_0000), std::vec![u32::from(b'A')]);
        assert_eq!(bus.writes_to(BASE), std::vec![u32::from(b'B')]);

        let uart2 = UartRegs::new(MockRegisterBus::new(), 0x3FF6_E000);
        assert_eq!(uart2.ahb_fifo_addr(), Some(0x6002_E000));

        let mut stray = UartRegs::new(MockRegisterBus::new(), 0x2000_0000);
        assert_eq!(stray.ahb_fifo_addr(), None);
        assert_eq!(
            stray.write_fifo_ahb(0),
            Err(Error::Field(FieldError::InvalidInstance))
        );
    }

    #[test]
    fn read_bytes_limited_by_fill_level() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + status::OFFSET, 3);
        bus.set_register(BASE, 0x5A);
        let mut uart = UartRegs::new(bus, BASE);

        let mut buf = [0u8; 8];
        assert_eq!(uart.read_bytes(&mut buf), 3);
        assert_eq!(&buf[..4], &[0x5A, 0x5A, 0x5A, 0]);
    }

    #[test]
    fn reset_fifos_pulses_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + conf0::OFFSET, conf0::RESET);
        let mut uart = UartRegs::new(bus, BASE);

        uart.reset_fifos(true, true);
        assert_eq!(uart.conf0(), conf0::RESET);
        let writes = uart.free().writes_to(BASE + conf0::OFFSET);
        assert_eq!(writes, std::vec![conf0::RESET | 0x0006_0000, conf0::RESET]);
    }

    #[test]
    fn threshold_setter_checks_width() {
        let mut uart = UartRegs::new(MockRegisterBus::new(), BASE);
        uart.set_rx_full_threshold(0x7F).unwrap();
        assert!(uart.set_rx_full_threshold(0x80).is_err());
        assert_eq!(uart.rx_full_threshold(), 0x7F);
    }

    #[test]
    fn wait_tx_done() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + int_raw::OFFSET, int_raw::TX_DONE.mask());
        let mut uart = UartRegs::new(bus, BASE);
        let mut delay = MockDelay::new();
        uart.wait_tx_done(&mut delay, 100).unwrap();

        let mut uart = UartRegs::new(MockRegisterBus::new(), BASE);
        assert_eq!(
            uart.wait_tx_done(&mut delay, 30),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
