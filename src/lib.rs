//! Single-pass line-structure scanning.
//!
//! linemark walks an in-memory byte buffer once, left to right, and reports
//! four kinds of structural events: document start (BOD), the first
//! non-space byte of each line (BOS), each newline byte (EOL), and document
//! end (EOD). The scan is chunked and bit-parallel, so on ordinary text it
//! runs within a small constant factor of a plain newline-counting pass.
//!

#[macro_use]
extern crate static_assertions;

pub mod scanner;
pub mod source;
