//! DMA Controller Register Definitions
//!
//! The EMAC DMA controller moves frames between the MAC FIFOs and system
//! memory through descriptor rings. Offsets are relative to
//! [`DR_REG_EMAC_BASE`](crate::soc::DR_REG_EMAC_BASE).

use embedded_hal::delay::DelayNs;

use crate::error::Result;
#[cfg(feature = "esp32")]
use crate::soc::{DR_REG_EMAC_BASE, Mmio};
use crate::register::{
    reg_bit_check_clear, reg_bit_ops, reg_ro, reg_rw, reg_wo, register_block,
};
use crate::soc::field::{Access::*, Field, fields_mask, reset_value};
use crate::soc::{RegisterBus, wait_field_clear};

// =============================================================================
// Register Map
// =============================================================================

/// Bus mode
pub mod bus_mode {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x000;

    /// Mix fixed and undefined length bursts
    pub const MIXED_BURST: Field = Field::bit("MIXED_BURST", 26, ReadWrite, 0);
    /// Align bursts to the start address
    pub const ADDR_ALIGNED_BEATS: Field = Field::bit("ADDR_ALIGNED_BEATS", 25, ReadWrite, 0);
    /// Multiply both burst lengths by 8
    pub const PBLX8: Field = Field::bit("PBLX8", 24, ReadWrite, 0);
    /// Use `RX_DMA_PBL` for receive and `PROG_BURST_LEN` for transmit
    pub const USE_SEP_PBL: Field = Field::bit("USE_SEP_PBL", 23, ReadWrite, 0);
    /// Receive burst length in beats
    pub const RX_DMA_PBL: Field = Field::new("RX_DMA_PBL", 17, 6, ReadWrite, 1);
    /// Use fixed length bursts only
    pub const FIXED_BURST: Field = Field::bit("FIXED_BURST", 16, ReadWrite, 0);
    /// Receive to transmit arbitration ratio, `n + 1 : 1`
    pub const PRI_RATIO: Field = Field::new("PRI_RATIO", 14, 2, ReadWrite, 0);
    /// Burst length in beats
    pub const PROG_BURST_LEN: Field = Field::new("PROG_BURST_LEN", 8, 6, ReadWrite, 1);
    /// Use 8-word descriptors
    pub const ALT_DESC_SIZE: Field = Field::bit("ALT_DESC_SIZE", 7, ReadWrite, 0);
    /// Words skipped between ring descriptors
    pub const DESC_SKIP_LEN: Field = Field::new("DESC_SKIP_LEN", 2, 5, ReadWrite, 0);
    /// Fixed priority arbitration instead of weighted round robin
    pub const DMA_ARB_SCH: Field = Field::bit("DMA_ARB_SCH", 1, ReadWrite, 0);
    /// Software reset of the whole MAC, clears itself when done
    pub const SW_RST: Field = Field::bit("SW_RST", 0, SetSelfClear, 1);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        MIXED_BURST, ADDR_ALIGNED_BEATS, PBLX8, USE_SEP_PBL, RX_DMA_PBL, FIXED_BURST, PRI_RATIO,
        PROG_BURST_LEN, ALT_DESC_SIZE, DESC_SKIP_LEN, DMA_ARB_SCH, SW_RST,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Transmit poll demand
pub mod tx_poll_demand {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x004;

    /// Any write wakes the transmit DMA
    pub const TX_POLL_DEMAND: Field = Field::new("TX_POLL_DEMAND", 0, 32, WriteTrigger, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TX_POLL_DEMAND];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Receive poll demand
pub mod rx_poll_demand {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x008;

    /// Any write wakes the receive DMA
    pub const RX_POLL_DEMAND: Field = Field::new("RX_POLL_DEMAND", 0, 32, WriteTrigger, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RX_POLL_DEMAND];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Receive descriptor list address
pub mod rx_desc_list {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x00C;

    /// Address of the first receive descriptor
    pub const RX_LIST_ADDR: Field = Field::new("RX_LIST_ADDR", 0, 32, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RX_LIST_ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Transmit descriptor list address
pub mod tx_desc_list {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x010;

    /// Address of the first transmit descriptor
    pub const TX_LIST_ADDR: Field = Field::new("TX_LIST_ADDR", 0, 32, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[TX_LIST_ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Status
///
/// Interrupt flags are cleared by writing 1.
pub mod status {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x014;

    /// Timestamp trigger
    pub const TIMESTAMP_TRIGGER: Field = Field::bit("TIMESTAMP_TRIGGER", 29, ReadOnly, 0);
    /// Power management event in the MAC
    pub const PMT: Field = Field::bit("PMT", 28, ReadOnly, 0);
    /// Kind of the last fatal bus error
    pub const ERROR_BITS: Field = Field::new("ERROR_BITS", 23, 3, ReadOnly, 0);
    /// Transmit process state
    pub const TX_STATE: Field = Field::new("TX_STATE", 20, 3, ReadOnly, 0);
    /// Receive process state
    pub const RX_STATE: Field = Field::new("RX_STATE", 17, 3, ReadOnly, 0);
    /// Normal interrupt summary
    pub const NORMAL_SUMMARY: Field = Field::bit("NORMAL_SUMMARY", 16, WriteOneToClear, 0);
    /// Abnormal interrupt summary
    pub const ABNORMAL_SUMMARY: Field = Field::bit("ABNORMAL_SUMMARY", 15, WriteOneToClear, 0);
    /// Early receive
    pub const EARLY_RX: Field = Field::bit("EARLY_RX", 14, WriteOneToClear, 0);
    /// Fatal bus error
    pub const FATAL_BUS_ERR: Field = Field::bit("FATAL_BUS_ERR", 13, WriteOneToClear, 0);
    /// Early transmit
    pub const EARLY_TX: Field = Field::bit("EARLY_TX", 10, WriteOneToClear, 0);
    /// Receive watchdog timeout
    pub const RX_WATCHDOG: Field = Field::bit("RX_WATCHDOG", 9, WriteOneToClear, 0);
    /// Receive process stopped
    pub const RX_STOPPED: Field = Field::bit("RX_STOPPED", 8, WriteOneToClear, 0);
    /// Receive buffer unavailable
    pub const RX_BUF_UNAVAIL: Field = Field::bit("RX_BUF_UNAVAIL", 7, WriteOneToClear, 0);
    /// Frame received
    pub const RX: Field = Field::bit("RX", 6, WriteOneToClear, 0);
    /// Transmit underflow
    pub const TX_UNDERFLOW: Field = Field::bit("TX_UNDERFLOW", 5, WriteOneToClear, 0);
    /// Receive overflow
    pub const RX_OVERFLOW: Field = Field::bit("RX_OVERFLOW", 4, WriteOneToClear, 0);
    /// Transmit jabber timeout
    pub const TX_JABBER: Field = Field::bit("TX_JABBER", 3, WriteOneToClear, 0);
    /// Transmit buffer unavailable
    pub const TX_BUF_UNAVAIL: Field = Field::bit("TX_BUF_UNAVAIL", 2, WriteOneToClear, 0);
    /// Transmit process stopped
    pub const TX_STOPPED: Field = Field::bit("TX_STOPPED", 1, WriteOneToClear, 0);
    /// Frame transmitted
    pub const TX: Field = Field::bit("TX", 0, WriteOneToClear, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        TIMESTAMP_TRIGGER, PMT, ERROR_BITS, TX_STATE, RX_STATE, NORMAL_SUMMARY, ABNORMAL_SUMMARY,
        EARLY_RX, FATAL_BUS_ERR, EARLY_TX, RX_WATCHDOG, RX_STOPPED, RX_BUF_UNAVAIL, RX,
        TX_UNDERFLOW, RX_OVERFLOW, TX_JABBER, TX_BUF_UNAVAIL, TX_STOPPED, TX,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);

    /// Every write-one-to-clear interrupt flag.
    pub const INTERRUPTS: u32 = fields_mask(&[
        NORMAL_SUMMARY, ABNORMAL_SUMMARY, EARLY_RX, FATAL_BUS_ERR, EARLY_TX, RX_WATCHDOG, RX_STOPPED,
        RX_BUF_UNAVAIL, RX, TX_UNDERFLOW, RX_OVERFLOW, TX_JABBER, TX_BUF_UNAVAIL, TX_STOPPED, TX,
    ]);
}

/// Operation mode
pub mod operation_mode {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x018;

    /// Keep frames that failed checksum offload
    pub const DIS_DROP_TCPIP_ERR: Field = Field::bit("DIS_DROP_TCPIP_ERR", 26, ReadWrite, 0);
    /// Receive store and forward
    pub const RX_STORE_FORWARD: Field = Field::bit("RX_STORE_FORWARD", 25, ReadWrite, 0);
    /// Do not flush received frames when no buffer is available
    pub const DIS_FLUSH_RX: Field = Field::bit("DIS_FLUSH_RX", 24, ReadWrite, 0);
    /// Transmit store and forward
    pub const TX_STORE_FORWARD: Field = Field::bit("TX_STORE_FORWARD", 21, ReadWrite, 0);
    /// Flush the transmit FIFO, clears itself when done
    pub const FLUSH_TX_FIFO: Field = Field::bit("FLUSH_TX_FIFO", 20, SetSelfClear, 0);
    /// Transmit threshold
    pub const TX_THRESHOLD: Field = Field::new("TX_THRESHOLD", 14, 3, ReadWrite, 0);
    /// Run the transmit process
    pub const START_STOP_TX: Field = Field::bit("START_STOP_TX", 13, ReadWrite, 0);
    /// Forward frames with errors
    pub const FWD_ERR_FRAMES: Field = Field::bit("FWD_ERR_FRAMES", 7, ReadWrite, 0);
    /// Forward undersized good frames
    pub const FWD_UNDERSIZED: Field = Field::bit("FWD_UNDERSIZED", 6, ReadWrite, 0);
    /// Drop giant frames
    pub const DROP_GIANT: Field = Field::bit("DROP_GIANT", 5, ReadWrite, 0);
    /// Receive threshold
    pub const RX_THRESHOLD: Field = Field::new("RX_THRESHOLD", 3, 2, ReadWrite, 0);
    /// Operate on the second frame
    pub const OPERATE_ON_SECOND: Field = Field::bit("OPERATE_ON_SECOND", 2, ReadWrite, 0);
    /// Run the receive process
    pub const START_STOP_RX: Field = Field::bit("START_STOP_RX", 1, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        DIS_DROP_TCPIP_ERR, RX_STORE_FORWARD, DIS_FLUSH_RX, TX_STORE_FORWARD, FLUSH_TX_FIFO,
        TX_THRESHOLD, START_STOP_TX, FWD_ERR_FRAMES, FWD_UNDERSIZED, DROP_GIANT, RX_THRESHOLD,
        OPERATE_ON_SECOND, START_STOP_RX,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Interrupt enable
///
/// Bit positions match [`status`].
pub mod int_enable {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x01C;

    /// Normal interrupt summary
    pub const NORMAL_SUMMARY: Field = Field::bit("NORMAL_SUMMARY", 16, ReadWrite, 0);
    /// Abnormal interrupt summary
    pub const ABNORMAL_SUMMARY: Field = Field::bit("ABNORMAL_SUMMARY", 15, ReadWrite, 0);
    /// Early receive
    pub const EARLY_RX: Field = Field::bit("EARLY_RX", 14, ReadWrite, 0);
    /// Fatal bus error
    pub const FATAL_BUS_ERR: Field = Field::bit("FATAL_BUS_ERR", 13, ReadWrite, 0);
    /// Early transmit
    pub const EARLY_TX: Field = Field::bit("EARLY_TX", 10, ReadWrite, 0);
    /// Receive watchdog timeout
    pub const RX_WATCHDOG: Field = Field::bit("RX_WATCHDOG", 9, ReadWrite, 0);
    /// Receive process stopped
    pub const RX_STOPPED: Field = Field::bit("RX_STOPPED", 8, ReadWrite, 0);
    /// Receive buffer unavailable
    pub const RX_BUF_UNAVAIL: Field = Field::bit("RX_BUF_UNAVAIL", 7, ReadWrite, 0);
    /// Frame received
    pub const RX: Field = Field::bit("RX", 6, ReadWrite, 0);
    /// Transmit underflow
    pub const TX_UNDERFLOW: Field = Field::bit("TX_UNDERFLOW", 5, ReadWrite, 0);
    /// Receive overflow
    pub const RX_OVERFLOW: Field = Field::bit("RX_OVERFLOW", 4, ReadWrite, 0);
    /// Transmit jabber timeout
    pub const TX_JABBER: Field = Field::bit("TX_JABBER", 3, ReadWrite, 0);
    /// Transmit buffer unavailable
    pub const TX_BUF_UNAVAIL: Field = Field::bit("TX_BUF_UNAVAIL", 2, ReadWrite, 0);
    /// Transmit process stopped
    pub const TX_STOPPED: Field = Field::bit("TX_STOPPED", 1, ReadWrite, 0);
    /// Frame transmitted
    pub const TX: Field = Field::bit("TX", 0, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[
        NORMAL_SUMMARY, ABNORMAL_SUMMARY, EARLY_RX, FATAL_BUS_ERR, EARLY_TX, RX_WATCHDOG,
        RX_STOPPED, RX_BUF_UNAVAIL, RX, TX_UNDERFLOW, RX_OVERFLOW, TX_JABBER, TX_BUF_UNAVAIL,
        TX_STOPPED, TX,
    ];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Missed frame and buffer overflow counters
///
/// Counters clear on read.
pub mod missed_frames {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x020;

    /// Overflow of the FIFO overflow counter
    pub const FIFO_OVERFLOW_OVF: Field = Field::bit("FIFO_OVERFLOW_OVF", 28, ReadToClear, 0);
    /// Frames missed by the application due to FIFO overflow
    pub const FIFO_OVERFLOW: Field = Field::new("FIFO_OVERFLOW", 17, 11, ReadToClear, 0);
    /// Overflow of the missed frame counter
    pub const MISSED_OVF: Field = Field::bit("MISSED_OVF", 16, ReadToClear, 0);
    /// Frames missed because no host buffer was available
    pub const MISSED: Field = Field::new("MISSED", 0, 16, ReadToClear, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[FIFO_OVERFLOW_OVF, FIFO_OVERFLOW, MISSED_OVF, MISSED];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Receive interrupt watchdog
pub mod rx_int_watchdog {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x024;

    /// Watchdog count in units of 256 bus clocks
    pub const RIWTC: Field = Field::new("RIWTC", 0, 8, ReadWrite, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[RIWTC];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current transmit descriptor
pub mod cur_tx_desc {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x048;

    /// Descriptor the transmit DMA is reading
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current receive descriptor
pub mod cur_rx_desc {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x04C;

    /// Descriptor the receive DMA is reading
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current transmit buffer address
pub mod cur_tx_buf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x050;

    /// Buffer the transmit DMA is reading
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

/// Current receive buffer address
pub mod cur_rx_buf {
    use super::*;

    /// Offset from the block base.
    pub const OFFSET: usize = 0x054;

    /// Buffer the receive DMA is writing
    pub const ADDR: Field = Field::new("ADDR", 0, 32, ReadOnly, 0);

    /// Fields from the most significant bit down.
    pub const FIELDS: &[Field] = &[ADDR];
    /// Register value after reset.
    pub const RESET: u32 = reset_value(FIELDS);
}

// =============================================================================
// Register Block
// =============================================================================

register_block! {
    /// EMAC DMA register block
    DmaRegs
}

#[cfg(feature = "esp32")]
impl DmaRegs<Mmio> {
    /// DMA registers at their fixed address.
    ///
    /// # Safety
    ///
    /// See [`Mmio::new`]. The caller must not create a second handle to the
    /// same block while this one is in use.
    pub const unsafe fn steal() -> Self {
        Self::new(unsafe { Mmio::new() }, DR_REG_EMAC_BASE)
    }
}

impl<B: RegisterBus> DmaRegs<B> {
    // -------------------------------------------------------------------------
    // Register accessors (generated by macros)
    // -------------------------------------------------------------------------

    reg_rw!(bus_mode, set_bus_mode, bus_mode::OFFSET, "Bus Mode register");
    reg_rw!(status, set_status, status::OFFSET, "Status register");
    reg_rw!(operation_mode, set_operation_mode, operation_mode::OFFSET, "Operation Mode register");
    reg_rw!(interrupt_enable, set_interrupt_enable, int_enable::OFFSET, "Interrupt Enable register");
    reg_rw!(rx_watchdog, set_rx_watchdog, rx_int_watchdog::OFFSET, "RX Interrupt Watchdog register");
    reg_rw!(rx_desc_list_addr, set_rx_desc_list_addr, rx_desc_list::OFFSET, "RX Descriptor List address");
    reg_rw!(tx_desc_list_addr, set_tx_desc_list_addr, tx_desc_list::OFFSET, "TX Descriptor List address");

    reg_ro!(missed_frames, missed_frames::OFFSET, "Missed Frame counters (clears on read)");
    reg_ro!(current_tx_desc, cur_tx_desc::OFFSET, "Current TX Descriptor address");
    reg_ro!(current_rx_desc, cur_rx_desc::OFFSET, "Current RX Descriptor address");
    reg_ro!(current_tx_buffer, cur_tx_buf::OFFSET, "Current TX Buffer address");
    reg_ro!(current_rx_buffer, cur_rx_buf::OFFSET, "Current RX Buffer address");

    reg_wo!(write_tx_poll_demand, tx_poll_demand::OFFSET, "TX Poll Demand register");
    reg_wo!(write_rx_poll_demand, rx_poll_demand::OFFSET, "RX Poll Demand register");

    // -------------------------------------------------------------------------
    // Bit operations (generated by macros)
    // -------------------------------------------------------------------------

    reg_bit_ops!(start_tx, stop_tx, operation_mode::OFFSET, operation_mode::START_STOP_TX.mask(),
                 "TX DMA", "Start", "Stop");
    reg_bit_ops!(start_rx, stop_rx, operation_mode::OFFSET, operation_mode::START_STOP_RX.mask(),
                 "RX DMA", "Start", "Stop");

    reg_bit_check_clear!(is_tx_fifo_flush_complete, operation_mode::OFFSET,
                         operation_mode::FLUSH_TX_FIFO.mask(), "Check if TX FIFO flush is complete");
    reg_bit_check_clear!(is_reset_complete, bus_mode::OFFSET, bus_mode::SW_RST.mask(),
                         "Check if software reset is complete");

    // -------------------------------------------------------------------------
    // Special operations
    // -------------------------------------------------------------------------

    /// Wake the TX DMA
    #[inline(always)]
    pub fn tx_poll_demand(&mut self) {
        self.write_tx_poll_demand(0);
    }

    /// Wake the RX DMA
    #[inline(always)]
    pub fn rx_poll_demand(&mut self) {
        self.write_rx_poll_demand(0);
    }

    /// Acknowledge the interrupt flags in `mask`.
    ///
    /// Bits outside [`status::INTERRUPTS`] are dropped so a raw status
    /// value can be written back as is.
    #[inline(always)]
    pub fn clear_interrupts(&mut self, mask: u32) {
        self.set_status(mask & status::INTERRUPTS);
    }

    /// Acknowledge every interrupt flag
    #[inline(always)]
    pub fn clear_all_interrupts(&mut self) {
        self.set_status(status::INTERRUPTS);
    }

    /// Request a TX FIFO flush
    #[inline(always)]
    pub fn flush_tx_fifo(&mut self) {
        let addr = self.addr(operation_mode::OFFSET);
        self.bus.set_bits(addr, operation_mode::FLUSH_TX_FIFO.mask());
    }

    /// Wait for a pending software reset to finish.
    ///
    /// The reset bit reads 1 out of reset and clears once the MAC has seen
    /// its clocks, so this also fails when the RMII reference clock is
    /// missing.
    pub fn wait_reset_complete<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let addr = self.addr(bus_mode::OFFSET);
        wait_field_clear(&mut self.bus, addr, bus_mode::SW_RST, delay, timeout_us)
    }

    /// Wait for a requested TX FIFO flush to finish
    pub fn wait_tx_fifo_flushed<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        let addr = self.addr(operation_mode::OFFSET);
        wait_field_clear(&mut self.bus, addr, operation_mode::FLUSH_TX_FIFO, delay, timeout_us)
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

    const BASE: usize = 0x3FF6_9000;

    #[test]
    fn register_offsets() {
        assert_eq!(bus_mode::OFFSET, 0x00);
        assert_eq!(tx_poll_demand::OFFSET, 0x04);
        assert_eq!(rx_poll_demand::OFFSET, 0x08);
        assert_eq!(rx_desc_list::OFFSET, 0x0C);
        assert_eq!(tx_desc_list::OFFSET, 0x10);
        assert_eq!(status::OFFSET, 0x14);
        assert_eq!(operation_mode::OFFSET, 0x18);
        assert_eq!(int_enable::OFFSET, 0x1C);
        assert_eq!(missed_frames::OFFSET, 0x20);
        assert_eq!(rx_int_watchdog::OFFSET, 0x24);
        assert_eq!(cur_tx_desc::OFFSET, 0x48);
        assert_eq!(cur_rx_desc::OFFSET, 0x4C);
        assert_eq!(cur_tx_buf::OFFSET, 0x50);
        assert_eq!(cur_rx_buf::OFFSET, 0x54);
    }

    #[test]
    fn bus_mode_layout() {
        assert_eq!(bus_mode::SW_RST.mask(), 0x0000_0001);
        assert_eq!(bus_mode::DESC_SKIP_LEN.mask(), 0x0000_007C);
        assert_eq!(bus_mode::PROG_BURST_LEN.mask(), 0x0000_3F00);
        assert_eq!(bus_mode::PRI_RATIO.mask(), 0x0000_C000);
        assert_eq!(bus_mode::RX_DMA_PBL.shift(), 17);
        assert_eq!(bus_mode::RX_DMA_PBL.max(), 0x3F);
        assert_eq!(bus_mode::MIXED_BURST.mask(), 1 << 26);
        assert_eq!(bus_mode::RESET, 0x0002_0101);
    }

    #[test]
    fn status_layout() {
        assert_eq!(status::ERROR_BITS.mask(), 0x0380_0000);
        assert_eq!(status::TX_STATE.mask(), 0x0070_0000);
        assert_eq!(status::RX_STATE.mask(), 0x000E_0000);
        assert_eq!(status::TIMESTAMP_TRIGGER.mask(), 1 << 29);
        assert_eq!(status::INTERRUPTS, 0x0001_E7FF);
        assert!(status::NORMAL_SUMMARY.access().is_write_one_to_clear());
        assert_eq!(status::RESET, 0);
    }

    #[test]
    fn interrupt_enable_matches_status_bits() {
        let pairs = [
            (int_enable::NORMAL_SUMMARY, status::NORMAL_SUMMARY),
            (int_enable::ABNORMAL_SUMMARY, status::ABNORMAL_SUMMARY),
            (int_enable::FATAL_BUS_ERR, status::FATAL_BUS_ERR),
            (int_enable::RX, status::RX),
            (int_enable::TX, status::TX),
            (int_enable::RX_BUF_UNAVAIL, status::RX_BUF_UNAVAIL),
        ];
        for (enable, flag) in pairs {
            assert_eq!(enable.mask(), flag.mask(), "{}", enable.name());
        }
        assert_eq!(fields_mask(int_enable::FIELDS), status::INTERRUPTS);
    }

    #[test]
    fn operation_mode_layout() {
        assert_eq!(operation_mode::START_STOP_RX.mask(), 1 << 1);
        assert_eq!(operation_mode::RX_THRESHOLD.mask(), 0x0000_0018);
        assert_eq!(operation_mode::START_STOP_TX.mask(), 1 << 13);
        assert_eq!(operation_mode::TX_THRESHOLD.mask(), 0x0001_C000);
        assert_eq!(operation_mode::FLUSH_TX_FIFO.mask(), 1 << 20);
        assert_eq!(operation_mode::TX_STORE_FORWARD.mask(), 1 << 21);
        assert_eq!(operation_mode::RX_STORE_FORWARD.mask(), 1 << 25);
        assert_eq!(operation_mode::DIS_DROP_TCPIP_ERR.mask(), 1 << 26);
    }

    #[test]
    fn missed_frame_counters() {
        assert_eq!(missed_frames::MISSED.mask(), 0x0000_FFFF);
        assert_eq!(missed_frames::MISSED_OVF.mask(), 1 << 16);
        assert_eq!(missed_frames::FIFO_OVERFLOW.mask(), 0x0FFE_0000);
        assert_eq!(missed_frames::FIFO_OVERFLOW_OVF.mask(), 1 << 28);
        assert!(missed_frames::MISSED.access().is_read_to_clear());
        assert_eq!(rx_int_watchdog::RIWTC.mask(), 0xFF);
    }

    #[test]
    fn fields_never_overlap() {
        let maps: &[&[Field]] = &[
            bus_mode::FIELDS,
            status::FIELDS,
            operation_mode::FIELDS,
            int_enable::FIELDS,
            missed_frames::FIELDS,
        ];
        for fields in maps {
            assert!(fields_disjoint(fields));
        }
    }

    #[test]
    fn accessors_use_block_base() {
        let mut dma = DmaRegs::new(MockRegisterBus::new(), BASE);
        dma.set_rx_desc_list_addr(0x3FFB_0000);
        dma.set_tx_desc_list_addr(0x3FFB_1000);
        dma.tx_poll_demand();

        let bus = dma.free();
        assert_eq!(bus.register(BASE + 0x0C), 0x3FFB_0000);
        assert_eq!(bus.register(BASE + 0x10), 0x3FFB_1000);
        assert_eq!(bus.writes_to(BASE + 0x04), std::vec![0]);
    }

    #[test]
    fn start_and_stop_keep_other_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE + 0x18, 1 << 21);
        let mut dma = DmaRegs::new(bus, BASE);

        dma.start_tx();
        dma.start_rx();
        assert_eq!(dma.operation_mode(), (1 << 21) | (1 << 13) | (1 << 1));
        dma.stop_tx();
        assert_eq!(dma.operation_mode(), (1 << 21) | (1 << 1));
    }

    #[test]
    fn clear_interrupts_drops_read_only_bits() {
        let mut dma = DmaRegs::new(MockRegisterBus::new(), BASE);
        dma.clear_interrupts(0xFFFF_FFFF);
        let bus = dma.free();
        assert_eq!(bus.writes_to(BASE + 0x14), std::vec![0x0001_E7FF]);
    }

    #[test]
    fn reset_and_flush_state() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE, bus_mode::RESET);
        let mut dma = DmaRegs::new(bus, BASE);
        assert!(!dma.is_reset_complete());

        dma.bus_mut().set_register(BASE, 0x0002_0100);
        assert!(dma.is_reset_complete());

        dma.flush_tx_fifo();
        assert!(!dma.is_tx_fifo_flush_complete());
    }

    #[test]
    fn wait_reset_complete_polls_sw_rst() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE, bus_mode::RESET);
        bus.clear_after_reads(BASE, bus_mode::SW_RST.mask(), 2);
        let mut dma = DmaRegs::new(bus, BASE);
        let mut delay = MockDelay::new();

        dma.wait_reset_complete(&mut delay, 1_000).unwrap();
        assert_eq!(dma.bus_mode(), 0x0002_0100);
        assert!(dma.free().writes().is_empty());
    }

    #[test]
    fn wait_reset_complete_times_out_without_clock() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(BASE, bus_mode::RESET);
        let mut dma = DmaRegs::new(bus, BASE);
        let mut delay = MockDelay::new();

        assert_eq!(
            dma.wait_reset_complete(&mut delay, 50),
            Err(Error::Io(IoError::Timeout))
        );
    }
}
