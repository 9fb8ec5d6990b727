//! Bit-parallel begin-of-statement detection.
//!
//! A chunk of the input is reduced to two bitmaps, `nl_mask` (newline bytes)
//! and `ws_mask` (space or newline bytes), with bit 0 holding the earliest
//! byte. BOS positions are the first non-space byte after each newline, plus
//! the first non-space byte of the buffer; a single unsigned add computes all
//! of them at once:
//!
//! ```text
//! sum      = ws_mask + nl_mask + need_bos_in      (w-bit add, carry captured)
//! bos_mask = sum & !ws_mask
//! ```
//!
//! Each newline adds 1 on top of a set `ws_mask` bit, so the add's carry chain
//! runs leftward through the whitespace run that follows it and lands on the
//! first zero bit of `ws_mask`, which is exactly the line's first non-space
//! byte. `need_bos_in` injects the same carry at bit 0 when the previous chunk
//! ended while still looking for a line's first non-space byte. A carry that
//! falls off the top of the chunk is the next chunk's `need_bos_in`.

/// Computes the BOS bitmap for one 64-byte chunk.
///
/// `need_bos` is the cross-chunk carry: true while the current line has not
/// yet produced a BOS. Returns the BOS bitmap and the carry to thread into the
/// next chunk. Total on all inputs.
#[inline]
pub fn detect(nl_mask: u64, ws_mask: u64, need_bos: bool) -> (u64, bool) {
    debug_assert_eq!(nl_mask & !ws_mask, 0);
    let (sum, carry_a) = ws_mask.overflowing_add(nl_mask);
    let (sum, carry_b) = sum.overflowing_add(need_bos as u64);
    // The three addends total at most 2^65 - 1, so at most one of the two
    // partial adds can overflow.
    (sum & !ws_mask, carry_a | carry_b)
}

/// The 32-bit variant of [detect], for the narrow remainder chunk.
#[inline]
pub fn detect32(nl_mask: u32, ws_mask: u32, need_bos: bool) -> (u32, bool) {
    debug_assert_eq!(nl_mask & !ws_mask, 0);
    let (sum, carry_a) = ws_mask.overflowing_add(nl_mask);
    let (sum, carry_b) = sum.overflowing_add(need_bos as u32);
    (sum & !ws_mask, carry_a | carry_b)
}
