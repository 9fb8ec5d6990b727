//! A chunked bit-parallel scanner for line structure.
//!
//! The scanner reports the structural skeleton of a buffer through light-weight
//! [EventSink] callbacks: BOD once at the start, EOL at every newline byte, BOS
//! at the first non-space byte of every line, and EOD once at the end. It
//! intends to support callers like an indentation-aware front end or a line
//! indexer that need line boundaries long before they need tokens, so it must
//! be fast: the buffer is consumed in 64-byte windows reduced to newline and
//! space bitmaps, and BOS positions fall out of a single add-with-carry per
//! window (see [bos]). Sinks that only need totals opt into per-window batch
//! reporting and never pay for per-event dispatch.
//!
//! The simdjson structural-index family of scanners inspired this design.
//!

pub mod bos;
pub mod reference;

mod chunk;
mod parser;
mod sink;

pub use parser::{scan, Parser};
pub use sink::{CollectingSink, CountingSink, Counts, Event, EventKind, EventSink};

use crate::source::SourceBuffer;

/// Scans `source` once and returns the event totals.
pub fn count_events(source: &SourceBuffer) -> Counts {
    let mut parser = Parser::new(CountingSink::default());
    parser.parse(source);
    *parser.counts()
}
