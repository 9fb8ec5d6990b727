#![no_main]

use libfuzzer_sys::fuzz_target;

use linemark::scanner::{reference, CountingSink, Parser};
use linemark::source::SourceBuffer;

// The chunked parser must report the same totals as the byte-at-a-time
// reference on any input.
fuzz_target!(|data: &[u8]| {
    let source = SourceBuffer::new_from_bytes(data);
    let mut parser = Parser::new(CountingSink::default());
    parser.parse(&source);

    let mut oracle = CountingSink::default();
    reference::parse(data, &mut oracle);

    assert_eq!(parser.counts(), oracle.counts());
});
