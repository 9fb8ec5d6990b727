#![no_main]

use libfuzzer_sys::fuzz_target;

use linemark::scanner::{reference, CollectingSink, Parser};
use linemark::source::SourceBuffer;

// Positional reporting: the full ordered event sequence must match the
// reference, not just the totals.
fuzz_target!(|data: &[u8]| {
    let source = SourceBuffer::new_from_bytes(data);
    let mut parser = Parser::new(CollectingSink::default());
    parser.parse(&source);

    let mut oracle = CollectingSink::default();
    reference::parse(data, &mut oracle);

    assert_eq!(parser.sink().events(), oracle.events());
});
