//! avr-libc heap allocator over an emulated SRAM image.
//!
//! Layout matches the target: every chunk starts with a 2-byte little-endian
//! size header, and the returned pointer is the address just past it. Free
//! chunks are kept in an address-ordered list. New memory is carved from
//! `__brkval`, which grows from `__malloc_heap_start` toward the heap limit.

use thiserror::Error;

/// Size of the chunk header (`size_t` on the AVR).
pub const HEADER: u16 = 2;
/// Smallest chunk that can hold a freelist entry (`sz` + `nx`).
pub const FREELIST_ENTRY: u16 = 4;
/// Default `__malloc_margin`.
pub const DEFAULT_MARGIN: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("heap bounds are inverted: start {start:#06x} >= end {end:#06x}")]
    InvertedBounds { start: u16, end: u16 },
    #[error("address {addr:#06x} is outside the emulated SRAM")]
    OutOfMemoryImage { addr: u16 },
}

/// Where the heap stops growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapLimit {
    /// `__malloc_heap_end` set explicitly.
    Fixed(u16),
    /// `__malloc_heap_end == 0`: grow until `__malloc_margin` below the stack.
    Stack { stack_pointer: u16, margin: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreeChunk {
    /// Address of the size header.
    addr: u16,
    /// Usable size, excluding the header.
    size: u16,
}

impl FreeChunk {
    fn end(self) -> u32 {
        u32::from(self.addr) + u32::from(HEADER) + u32::from(self.size)
    }
}

/// The allocator state: `__malloc_heap_start`, the limit, `__brkval`, the
/// freelist and the SRAM bytes it manages.
#[derive(Debug, Clone)]
pub struct Heap {
    sram: Vec<u8>,
    heap_start: u16,
    limit: HeapLimit,
    brkval: u16,
    freelist: Vec<FreeChunk>,
}

impl Heap {
    /// Heap restricted to `[heap_start, heap_end)`.
    pub fn new(heap_start: u16, heap_end: u16) -> Result<Self, HeapError> {
        if heap_start >= heap_end {
            return Err(HeapError::InvertedBounds {
                start: heap_start,
                end: heap_end,
            });
        }
        Ok(Self::with_limit(heap_start, HeapLimit::Fixed(heap_end)))
    }

    /// Heap growing toward the stack.
    #[must_use]
    pub fn below_stack(heap_start: u16, stack_pointer: u16, margin: u16) -> Self {
        Self::with_limit(
            heap_start,
            HeapLimit::Stack {
                stack_pointer,
                margin,
            },
        )
    }

    fn with_limit(heap_start: u16, limit: HeapLimit) -> Self {
        let top = match limit {
            HeapLimit::Fixed(end) => end,
            HeapLimit::Stack { stack_pointer, .. } => stack_pointer,
        };
        Self {
            sram: vec![0; usize::from(top.max(heap_start)) + 1],
            heap_start,
            limit,
            brkval: heap_start,
            freelist: Vec::new(),
        }
    }

    /// `__brkval`: first address not yet handed out.
    #[must_use]
    pub fn brkval(&self) -> u16 {
        self.brkval
    }

    /// Number of chunks on the freelist.
    #[must_use]
    pub fn free_chunks(&self) -> usize {
        self.freelist.len()
    }

    /// Usable size recorded in the chunk header of `ptr`.
    pub fn chunk_size(&self, ptr: u16) -> Result<u16, HeapError> {
        let hdr = ptr.checked_sub(HEADER).ok_or(HeapError::OutOfMemoryImage { addr: ptr })?;
        let lo = self.byte(hdr)?;
        let hi = self.byte(hdr + 1)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn read(&self, addr: u16, len: usize) -> Result<&[u8], HeapError> {
        let start = usize::from(addr);
        self.sram
            .get(start..start + len)
            .ok_or(HeapError::OutOfMemoryImage { addr })
    }

    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<(), HeapError> {
        let start = usize::from(addr);
        let dst = self
            .sram
            .get_mut(start..start + data.len())
            .ok_or(HeapError::OutOfMemoryImage { addr })?;
        dst.copy_from_slice(data);
        Ok(())
    }

    /// `malloc`. Returns `None` where the C function returns `NULL`.
    pub fn malloc(&mut self, len: usize) -> Option<u16> {
        let len = u16::try_from(len).ok()?.max(FREELIST_ENTRY - HEADER);

        if let Some(ptr) = self.take_from_freelist(len) {
            return Some(ptr);
        }

        let top = self.top();
        if top <= self.brkval {
            return None;
        }
        let avail = u32::from(top - self.brkval);
        if avail < u32::from(len) + u32::from(HEADER) {
            return None;
        }
        let hdr = self.brkval;
        self.brkval = hdr + HEADER + len;
        self.set_header(hdr, len);
        Some(hdr + HEADER)
    }

    /// `calloc`: zero-filled, `None` on `nele * size` overflow.
    pub fn calloc(&mut self, nele: usize, size: usize) -> Option<u16> {
        let total = nele.checked_mul(size)?;
        let ptr = self.malloc(total)?;
        let start = usize::from(ptr);
        self.sram[start..start + total].fill(0);
        Some(ptr)
    }

    /// `free`. A null pointer is ignored.
    pub fn free(&mut self, ptr: u16) {
        if ptr == 0 {
            return;
        }
        let Ok(size) = self.chunk_size(ptr) else {
            return;
        };
        let chunk = FreeChunk {
            addr: ptr - HEADER,
            size,
        };

        let at = self.freelist.partition_point(|c| c.addr < chunk.addr);
        self.freelist.insert(at, chunk);

        // Merge with the following chunk, then with the preceding one.
        if at + 1 < self.freelist.len() && self.freelist[at].end() == u32::from(self.freelist[at + 1].addr) {
            let next = self.freelist.remove(at + 1);
            self.freelist[at].size += HEADER + next.size;
        }
        if at > 0 && self.freelist[at - 1].end() == u32::from(self.freelist[at].addr) {
            let cur = self.freelist.remove(at);
            self.freelist[at - 1].size += HEADER + cur.size;
        }

        // A free chunk touching __brkval goes back to the break.
        if let Some(last) = self.freelist.last().copied() {
            if last.end() == u32::from(self.brkval) {
                self.freelist.pop();
                self.brkval = last.addr;
            }
        }
        self.sync_headers();
    }

    /// `realloc`: shrink in place, grow at the break or into a following free
    /// chunk, otherwise move.
    pub fn realloc(&mut self, ptr: u16, len: usize) -> Option<u16> {
        if ptr == 0 {
            return self.malloc(len);
        }
        let old = self.chunk_size(ptr).ok()?;
        let len = u16::try_from(len).ok()?.max(FREELIST_ENTRY - HEADER);
        let hdr = ptr - HEADER;

        if len <= old {
            if old - len >= FREELIST_ENTRY {
                let rest = ptr + len;
                self.set_header(hdr, len);
                self.set_header(rest, old - len - HEADER);
                self.free(rest + HEADER);
            }
            return Some(ptr);
        }

        let end = u32::from(ptr) + u32::from(old);
        let grow = len - old;
        if end == u32::from(self.brkval) && u32::from(self.top()) >= end + u32::from(grow) {
            self.brkval += grow;
            self.set_header(hdr, len);
            return Some(ptr);
        }
        if let Some(at) = self.freelist.iter().position(|c| u32::from(c.addr) == end) {
            let next = self.freelist[at];
            let merged = u32::from(old) + u32::from(HEADER) + u32::from(next.size);
            if merged >= u32::from(len) {
                self.freelist.remove(at);
                self.set_header(hdr, merged as u16);
                return self.realloc(ptr, usize::from(len));
            }
        }

        let new_ptr = self.malloc(usize::from(len))?;
        let (src, dst) = (usize::from(ptr), usize::from(new_ptr));
        self.sram.copy_within(src..src + usize::from(old), dst);
        self.free(ptr);
        Some(new_ptr)
    }

    fn top(&self) -> u16 {
        match self.limit {
            HeapLimit::Fixed(end) => end,
            HeapLimit::Stack {
                stack_pointer,
                margin,
            } => stack_pointer.saturating_sub(margin),
        }
    }

    /// Exact fit first, else the smallest larger chunk; large leftovers are
    /// split so the allocation comes from the chunk's top end.
    fn take_from_freelist(&mut self, len: u16) -> Option<u16> {
        if let Some(at) = self.freelist.iter().position(|c| c.size == len) {
            let chunk = self.freelist.remove(at);
            return Some(chunk.addr + HEADER);
        }
        let at = self
            .freelist
            .iter()
            .enumerate()
            .filter(|(_, c)| c.size > len)
            .min_by_key(|(_, c)| c.size)
            .map(|(i, _)| i)?;
        let chunk = self.freelist[at];
        if chunk.size - len < FREELIST_ENTRY {
            self.freelist.remove(at);
            return Some(chunk.addr + HEADER);
        }
        let remaining = chunk.size - len - HEADER;
        self.freelist[at].size = remaining;
        self.set_header(chunk.addr, remaining);
        let hdr = chunk.addr + HEADER + remaining;
        self.set_header(hdr, len);
        Some(hdr + HEADER)
    }

    fn sync_headers(&mut self) {
        for i in 0..self.freelist.len() {
            let c = self.freelist[i];
            self.set_header(c.addr, c.size);
        }
    }

    fn set_header(&mut self, hdr: u16, size: u16) {
        let at = usize::from(hdr);
        if let Some(cell) = self.sram.get_mut(at..at + 2) {
            cell.copy_from_slice(&size.to_le_bytes());
        }
    }

    fn byte(&self, addr: u16) -> Result<u8, HeapError> {
        self.sram
            .get(usize::from(addr))
            .copied()
            .ok_or(HeapError::OutOfMemoryImage { addr })
    }
}

impl Default for Heap {
    /// ATmega128 layout: heap after `.bss` at 0x200, stack at RAMEND 0x10FF.
    fn default() -> Self {
        Self::below_stack(0x0200, 0x10FF, DEFAULT_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_respects_heap_end() {
        let mut heap = Heap::new(0x200, 0x1000).unwrap();
        assert_eq!(heap.malloc(0xe00), None);
        assert_eq!(heap.malloc(0xdfe), Some(0x202));
        assert_eq!(heap.brkval(), 0x1000);
        assert_eq!(heap.malloc(1), None);
    }

    #[test]
    fn small_requests_round_up_to_freelist_entry() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let p = heap.malloc(0).unwrap();
        assert_eq!(p, 0x102);
        assert_eq!(heap.chunk_size(p), Ok(2));
        assert_eq!(heap.brkval(), 0x104);
    }

    #[test]
    fn freeing_top_chunk_lowers_brkval() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let a = heap.malloc(10).unwrap();
        let b = heap.malloc(10).unwrap();
        heap.free(b);
        assert_eq!(heap.brkval(), b - HEADER);
        heap.free(a);
        assert_eq!(heap.brkval(), 0x100);
        assert_eq!(heap.free_chunks(), 0);
    }

    #[test]
    fn freed_neighbours_coalesce_and_are_reused() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let a = heap.malloc(8).unwrap();
        let b = heap.malloc(8).unwrap();
        let _guard = heap.malloc(8).unwrap();
        heap.free(a);
        heap.free(b);
        assert_eq!(heap.free_chunks(), 1);
        assert_eq!(heap.chunk_size(a), Ok(18));
        assert_eq!(heap.malloc(18), Some(a));
    }

    #[test]
    fn larger_free_chunk_is_split_from_its_top() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let a = heap.malloc(20).unwrap();
        let _guard = heap.malloc(2).unwrap();
        heap.free(a);
        let p = heap.malloc(4).unwrap();
        assert_eq!(p, a + 20 - 4);
        assert_eq!(heap.chunk_size(a), Ok(14));
    }

    #[test]
    fn calloc_zeroes_and_checks_overflow() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let p = heap.malloc(4).unwrap();
        heap.write(p, &[0xAA; 4]).unwrap();
        heap.free(p);
        let q = heap.calloc(2, 2).unwrap();
        assert_eq!(heap.read(q, 4).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(heap.calloc(usize::MAX, 2), None);
    }

    #[test]
    fn realloc_grows_at_break_and_moves_otherwise() {
        let mut heap = Heap::new(0x100, 0x200).unwrap();
        let p = heap.malloc(4).unwrap();
        heap.write(p, b"abcd").unwrap();
        assert_eq!(heap.realloc(p, 8), Some(p));
        let _guard = heap.malloc(2).unwrap();
        let q = heap.realloc(p, 16).unwrap();
        assert_ne!(q, p);
        assert_eq!(heap.read(q, 4).unwrap(), b"abcd");
    }

    #[test]
    fn stack_limited_heap_keeps_margin() {
        let mut heap = Heap::below_stack(0x100, 0x200, DEFAULT_MARGIN);
        assert_eq!(heap.malloc(0xE0 - 2 + 1), None);
        assert_eq!(heap.malloc(0xE0 - 2), Some(0x102));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(matches!(
            Heap::new(0x200, 0x100),
            Err(HeapError::InvertedBounds { .. })
        ));
    }
}
