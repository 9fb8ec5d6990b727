//! Byte-at-a-time reference implementation of the scan semantics.
//!
//! This is the definition the chunked scanner is tested against, and the
//! exact loop the driver runs on the sub-chunk tail. A newline emits EOL and
//! starts a new line; the first byte of a line that is neither a space nor a
//! newline emits BOS; everything else is passed over.

use super::sink::EventSink;

/// Scans the whole buffer: BOD, per-byte events, EOD.
pub fn parse<S: EventSink>(bytes: &[u8], sink: &mut S) {
    sink.on_bod();
    scan(bytes, true, sink);
    sink.on_eod(bytes.len());
}

/// The resumable core: emits EOL/BOS events only, threading `need_bos`
/// through so buffers can be scanned piecewise.
pub fn scan<S: EventSink>(bytes: &[u8], mut need_bos: bool, sink: &mut S) -> bool {
    for (pos, &byte) in bytes.iter().enumerate() {
        if byte == b'\n' {
            sink.on_eol(pos);
            need_bos = true;
        } else if byte != b' ' && need_bos {
            sink.on_bos(pos);
            need_bos = false;
        }
    }
    need_bos
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::scanner::sink::{CollectingSink, Event, EventKind::*};

    fn events(bytes: &[u8]) -> Vec<Event> {
        let mut sink = CollectingSink::default();
        parse(bytes, &mut sink);
        sink.into_events()
    }

    #[test]
    fn empty_buffer_is_bod_then_eod() {
        assert_eq!(
            events(b""),
            vec![Event { kind: Bod, offset: 0 }, Event { kind: Eod, offset: 0 }]
        );
    }

    #[test]
    fn indented_line() {
        assert_eq!(
            events(b"  a\n"),
            vec![
                Event { kind: Bod, offset: 0 },
                Event { kind: Bos, offset: 2 },
                Event { kind: Eol, offset: 3 },
                Event { kind: Eod, offset: 4 },
            ]
        );
    }

    #[test]
    fn blank_lines_emit_no_bos() {
        assert_eq!(
            events(b" \n\n"),
            vec![
                Event { kind: Bod, offset: 0 },
                Event { kind: Eol, offset: 1 },
                Event { kind: Eol, offset: 2 },
                Event { kind: Eod, offset: 3 },
            ]
        );
    }

    #[test]
    fn trailing_line_without_newline_gets_a_bos_but_no_eol() {
        assert_eq!(
            events(b"a\nb"),
            vec![
                Event { kind: Bod, offset: 0 },
                Event { kind: Bos, offset: 0 },
                Event { kind: Eol, offset: 1 },
                Event { kind: Bos, offset: 2 },
                Event { kind: Eod, offset: 3 },
            ]
        );
    }

    #[test]
    fn carriage_return_is_an_ordinary_byte() {
        assert_eq!(
            events(b" \r\n"),
            vec![
                Event { kind: Bod, offset: 0 },
                Event { kind: Bos, offset: 1 },
                Event { kind: Eol, offset: 2 },
                Event { kind: Eod, offset: 3 },
            ]
        );
    }
}
