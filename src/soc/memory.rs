//! Address space regions
//!
//! Bounds are half-open: `LOW` is the first address inside the region and
//! `HIGH` the first address past it.

use core::ops::Range;

/// Flash-mapped data (DROM)
pub const DROM: Range<usize> = 0x3F40_0000..0x3F80_0000;
/// External RAM data window
pub const EXTRAM_DATA: Range<usize> = 0x3F80_0000..0x3FC0_0000;
/// Internal data RAM
pub const DRAM: Range<usize> = 0x3FFA_E000..0x4000_0000;
/// Flash-mapped instructions (IROM)
pub const IROM: Range<usize> = 0x400D_0000..0x4040_0000;
/// Mask ROM
pub const IROM_MASK: Range<usize> = 0x4000_0000..0x4006_4F00;
/// PRO CPU flash cache
pub const CACHE_PRO: Range<usize> = 0x4007_0000..0x4007_8000;
/// APP CPU flash cache
pub const CACHE_APP: Range<usize> = 0x4007_8000..0x4008_0000;
/// Internal instruction RAM
pub const IRAM: Range<usize> = 0x4008_0000..0x400A_0000;
/// RTC fast memory, instruction bus
pub const RTC_IRAM: Range<usize> = 0x400C_0000..0x400C_2000;
/// RTC fast memory, data bus
pub const RTC_DRAM: Range<usize> = 0x3FF8_0000..0x3FF8_2000;
/// RTC slow memory
pub const RTC_DATA: Range<usize> = 0x5000_0000..0x5000_2000;
/// RAM reachable as both IRAM and DRAM, instruction side
pub const DIRAM_IRAM: Range<usize> = 0x400A_0000..0x400C_0000;
/// RAM reachable as both IRAM and DRAM, data side
pub const DIRAM_DRAM: Range<usize> = 0x3FFE_0000..0x4000_0000;
/// Memory the peripheral DMA engines can reach
pub const DMA: Range<usize> = 0x3FFA_E000..0x4000_0000;
/// Byte-accessible memory
pub const BYTE_ACCESSIBLE: Range<usize> = 0x3FF9_0000..0x4000_0000;
/// Internal memory as seen from either bus
pub const MEM_INTERNAL: Range<usize> = 0x3FF9_0000..0x400C_2000;
/// Peripheral register space
pub const PERIPHERAL: Range<usize> = 0x3FF0_0000..0x3FF8_0000;

#[inline]
const fn within(region: &Range<usize>, addr: usize) -> bool {
    addr >= region.start && addr < region.end
}

/// Whether `addr` is internal data RAM.
pub const fn is_dram(addr: usize) -> bool {
    within(&DRAM, addr)
}

/// Whether `addr` is internal instruction RAM.
pub const fn is_iram(addr: usize) -> bool {
    within(&IRAM, addr)
}

/// Whether `addr` is reachable by peripheral DMA.
///
/// EMAC descriptors and buffers must satisfy this.
pub const fn is_dma_capable(addr: usize) -> bool {
    within(&DMA, addr)
}

/// Whether `addr` is a buffer of `len` bytes entirely inside DMA memory.
pub const fn is_dma_capable_range(addr: usize, len: usize) -> bool {
    if len == 0 {
        return is_dma_capable(addr);
    }
    match addr.checked_add(len) {
        Some(end) => within(&DMA, addr) && end <= DMA.end,
        None => false,
    }
}

/// Whether `addr` is flash-mapped (instruction or data).
pub const fn is_in_flash(addr: usize) -> bool {
    within(&DROM, addr) || within(&IROM, addr)
}

/// Whether `addr` is external RAM.
pub const fn is_external_ram(addr: usize) -> bool {
    within(&EXTRAM_DATA, addr)
}

/// Whether `addr` is internal memory.
pub const fn is_internal(addr: usize) -> bool {
    within(&MEM_INTERNAL, addr)
}

/// Whether `addr` is in RTC memory of any kind.
pub const fn is_rtc(addr: usize) -> bool {
    within(&RTC_IRAM, addr) || within(&RTC_DRAM, addr) || within(&RTC_DATA, addr)
}

/// Whether `addr` is in the peripheral register space.
pub const fn is_peripheral(addr: usize) -> bool {
    within(&PERIPHERAL, addr)
}

/// Whether `addr` is byte-accessible.
pub const fn is_byte_accessible(addr: usize) -> bool {
    within(&BYTE_ACCESSIBLE, addr)
}
