pub mod source_buffer;

pub use source_buffer::SourceBuffer;
