use mmap_rs;
use std::fs::File;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { bytes: &'a [u8] },
}

/// An immutable byte region for the duration of a parse: either a
/// memory-mapped file or a slice borrowed from the caller.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
}

impl<'a> SourceBuffer<'a> {
    // The file contents are treated as raw bytes; no encoding is assumed.
    pub fn new_from_file(
        file_path: &std::path::Path,
    ) -> Result<SourceBuffer<'static>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer = unsafe {
            mmap_rs::MmapOptions::new(len.try_into().unwrap())?.with_file(&file, 0).map()?
        };
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer } })
    }

    pub fn new_from_bytes(bytes: &'a [u8]) -> SourceBuffer<'a> {
        SourceBuffer { kind: SourceBufferKind::Memory { bytes } }
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.kind {
            SourceBufferKind::File { buffer } => buffer.as_slice(),
            SourceBufferKind::Memory { bytes } => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
