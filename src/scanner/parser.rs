//! The driver: walks a buffer chunk by chunk and reports through a sink.

use super::bos;
use super::chunk;
use super::chunk::ChunkMasks;
use super::sink::{CountingSink, Counts, EventSink};
use crate::source::SourceBuffer;

const WIDE: usize = 64;
const NARROW: usize = 32;
const STRIDE: usize = 3 * WIDE;

const_assert!(WIDE == 2 * NARROW);
const_assert_eq!(STRIDE % WIDE, 0);

/// A line-structure parser over a fixed sink type.
///
/// Reentrant across distinct instances; a single instance must not be parsed
/// from two threads at once. Holds no state between [parse](Parser::parse)
/// calls beyond what the sink retains.
pub struct Parser<S: EventSink> {
    sink: S,
}

impl<S: EventSink> Parser<S> {
    pub fn new(sink: S) -> Parser<S> {
        Parser { sink }
    }

    /// Scans `source` and drives the sink: BOD first, then EOL and BOS events
    /// in ascending byte-offset order, then EOD. Allocation-free.
    pub fn parse(&mut self, source: &SourceBuffer) {
        let bytes = source.bytes();
        self.sink.on_bod();
        scan(bytes, true, &mut self.sink);
        self.sink.on_eod(bytes.len());
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl Parser<CountingSink> {
    pub fn counts(&self) -> &Counts {
        self.sink.counts()
    }

    pub fn reset(&mut self) {
        self.sink.reset();
    }
}

impl Default for Parser<CountingSink> {
    fn default() -> Parser<CountingSink> {
        Parser::new(CountingSink::default())
    }
}

/// The resumable chunk walk: emits EOL/BOS events for `bytes`, starting from
/// the given `need_bos` carry and returning the carry after the final byte.
///
/// [Parser::parse] is this plus the BOD/EOD bracketing; the function is public
/// so piecewise scans can thread the carry themselves.
pub fn scan<S: EventSink>(bytes: &[u8], need_bos: bool, sink: &mut S) -> bool {
    let len = bytes.len();
    let mut need_bos = need_bos;
    let mut pos = 0;

    // Three chunks per iteration share one carry chain. The classification of
    // the later chunks is independent of the detector's scalar math, so an
    // out-of-order core overlaps the two.
    while pos + STRIDE <= len {
        let m0 = chunk::classify64(bytes, pos);
        let m1 = chunk::classify64(bytes, pos + WIDE);
        let m2 = chunk::classify64(bytes, pos + 2 * WIDE);
        need_bos = report64(sink, pos, m0, need_bos);
        need_bos = report64(sink, pos + WIDE, m1, need_bos);
        need_bos = report64(sink, pos + 2 * WIDE, m2, need_bos);
        pos += STRIDE;
    }

    while pos + WIDE <= len {
        let masks = chunk::classify64(bytes, pos);
        need_bos = report64(sink, pos, masks, need_bos);
        pos += WIDE;
    }

    if pos + NARROW <= len {
        let (nl, sp) = chunk::classify32(bytes, pos);
        need_bos = report32(sink, pos, nl, sp, need_bos);
        pos += NARROW;
    }

    // Byte-wise tail, the reference algorithm verbatim.
    for (i, &byte) in bytes[pos..].iter().enumerate() {
        if byte == b'\n' {
            sink.on_eol(pos + i);
            need_bos = true;
        } else if byte != b' ' && need_bos {
            sink.on_bos(pos + i);
            need_bos = false;
        }
    }

    need_bos
}

#[inline]
fn report64<S: EventSink>(sink: &mut S, base: usize, masks: ChunkMasks, need_bos: bool) -> bool {
    let ws_mask = masks.nl | masks.sp;
    let (bos_mask, need_bos) = bos::detect(masks.nl, ws_mask, need_bos);
    if S::BATCHED {
        sink.on_eol_batch(masks.nl.count_ones() as u64);
        sink.on_bos_batch(bos_mask.count_ones() as u64);
    } else {
        report_positions(sink, base, masks.nl, bos_mask);
    }
    need_bos
}

#[inline]
fn report32<S: EventSink>(sink: &mut S, base: usize, nl: u32, sp: u32, need_bos: bool) -> bool {
    let ws = nl | sp;
    let (bos_mask, need_bos) = bos::detect32(nl, ws, need_bos);
    if S::BATCHED {
        sink.on_eol_batch(nl.count_ones() as u64);
        sink.on_bos_batch(bos_mask.count_ones() as u64);
    } else {
        report_positions(sink, base, nl as u64, bos_mask as u64);
    }
    need_bos
}

// Positional sinks see events in ascending bit order. An EOL bit is always a
// whitespace byte and a BOS bit never is, so the two masks are disjoint and
// one merged walk suffices.
#[inline]
fn report_positions<S: EventSink>(sink: &mut S, base: usize, nl_mask: u64, bos_mask: u64) {
    debug_assert_eq!(nl_mask & bos_mask, 0);
    let mut remaining = nl_mask | bos_mask;
    while remaining != 0 {
        let bit = remaining.trailing_zeros() as usize;
        if nl_mask >> bit & 1 == 1 {
            sink.on_eol(base + bit);
        } else {
            sink.on_bos(base + bit);
        }
        remaining &= remaining - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::scan;
    use crate::scanner::reference;
    use crate::scanner::sink::{CollectingSink, CountingSink, EventSink};

    // The batched and positional reporting paths must agree with each other
    // and with the reference on the same bytes.
    fn check_paths_agree(bytes: &[u8]) {
        let mut counting = CountingSink::default();
        counting.on_bod();
        scan(bytes, true, &mut counting);
        counting.on_eod(bytes.len());

        let mut collecting = CollectingSink::default();
        collecting.on_bod();
        let carry = scan(bytes, true, &mut collecting);
        collecting.on_eod(bytes.len());

        let mut oracle = CollectingSink::default();
        reference::parse(bytes, &mut oracle);
        let oracle_carry = reference::scan(bytes, true, &mut CountingSink::default());

        assert_eq!(collecting.events(), oracle.events(), "input: {bytes:?}");
        assert_eq!(carry, oracle_carry, "carry for input: {bytes:?}");

        let counts = counting.counts();
        let eol = collecting.events().iter().filter(|e| e.kind == crate::scanner::EventKind::Eol);
        let bos = collecting.events().iter().filter(|e| e.kind == crate::scanner::EventKind::Bos);
        assert_eq!(counts.eol, eol.count() as u64);
        assert_eq!(counts.bos, bos.count() as u64);
    }

    #[test]
    fn paths_agree_on_chunk_boundary_shapes() {
        check_paths_agree(b"");
        check_paths_agree(b"\n");
        check_paths_agree(&[b'a'; 31]);
        check_paths_agree(&[b'\n'; 32]);
        check_paths_agree(&[b' '; 63]);
        check_paths_agree(&[b'a'; 64]);
        check_paths_agree(&[b'\n'; 65]);
        check_paths_agree(&[b' '; 191]);
        check_paths_agree(&[b'\n'; 192]);
        check_paths_agree(&[b'a'; 193]);

        let mut mixed = Vec::new();
        for width in [1usize, 7, 31, 32, 33, 63, 64, 65, 191, 192] {
            mixed.extend(std::iter::repeat(b' ').take(width / 2));
            mixed.extend(std::iter::repeat(b'w').take(width));
            mixed.push(b'\n');
            check_paths_agree(&mixed);
        }
    }

    #[test]
    fn carry_survives_a_whitespace_chunk_run() {
        // A newline at the very end of a chunk, followed by chunks of spaces,
        // must keep looking until the first non-space byte.
        let mut bytes = vec![b'x'; 63];
        bytes.push(b'\n');
        bytes.extend(std::iter::repeat(b' ').take(128));
        bytes.push(b'y');
        check_paths_agree(&bytes);

        let mut sink = CollectingSink::default();
        scan(&bytes, true, &mut sink);
        let last = sink.events().last().unwrap();
        assert_eq!((last.kind, last.offset), (crate::scanner::EventKind::Bos, 192));
    }
}
