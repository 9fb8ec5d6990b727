/// Event totals accumulated by a [CountingSink].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub bod: u64,
    pub bos: u64,
    pub eol: u64,
    pub eod: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Bod,
    Bos,
    Eol,
    Eod,
}

/// One structural event: its kind and the byte offset it was observed at.
/// BOD is always at offset 0 and EOD at the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub offset: usize,
}

/// The capability set the driver reports through.
///
/// A sink always receives `on_bod` first and `on_eod` last. In between, the
/// default is one positional callback per event, in strictly ascending byte
/// offset order. A sink that sets [BATCHED](EventSink::BATCHED) instead
/// receives per-chunk population counts through `on_eol_batch` and
/// `on_bos_batch` and must override both; the scalar tail of a scan still
/// reports through the positional callbacks, so a batched sink implements
/// those too.
pub trait EventSink {
    /// Compile-time opt-in to per-chunk count reporting. The driver branches
    /// on this constant, so the unused callback family costs nothing.
    const BATCHED: bool = false;

    fn on_bod(&mut self);
    fn on_eod(&mut self, len: usize);

    fn on_eol(&mut self, pos: usize);
    fn on_bos(&mut self, pos: usize);

    fn on_eol_batch(&mut self, count: u64) {
        let _ = count;
    }

    fn on_bos_batch(&mut self, count: u64) {
        let _ = count;
    }
}

/// Accumulates event totals and nothing else. The fast path for callers that
/// only want counts.
#[derive(Debug, Default)]
pub struct CountingSink {
    counts: Counts,
}

impl CountingSink {
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn reset(&mut self) {
        self.counts = Counts::default();
    }
}

impl EventSink for CountingSink {
    const BATCHED: bool = true;

    fn on_bod(&mut self) {
        self.counts.bod += 1;
    }

    fn on_eod(&mut self, _len: usize) {
        self.counts.eod += 1;
    }

    fn on_eol(&mut self, _pos: usize) {
        self.counts.eol += 1;
    }

    fn on_bos(&mut self, _pos: usize) {
        self.counts.bos += 1;
    }

    fn on_eol_batch(&mut self, count: u64) {
        self.counts.eol += count;
    }

    fn on_bos_batch(&mut self, count: u64) {
        self.counts.bos += count;
    }
}

/// Records every event with its position, in emission order. Used to verify
/// position correctness against the scalar reference.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Vec<Event>,
}

impl CollectingSink {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for CollectingSink {
    fn on_bod(&mut self) {
        self.events.push(Event { kind: EventKind::Bod, offset: 0 });
    }

    fn on_eod(&mut self, len: usize) {
        self.events.push(Event { kind: EventKind::Eod, offset: len });
    }

    fn on_eol(&mut self, pos: usize) {
        self.events.push(Event { kind: EventKind::Eol, offset: pos });
    }

    fn on_bos(&mut self, pos: usize) {
        self.events.push(Event { kind: EventKind::Bos, offset: pos });
    }
}
