// Common utilities shared by the segment file readers

pub mod binary;
pub mod io_pool;

// Re-exports for convenience
pub use binary::{read_bytes, read_prefix_at, read_u16_le, read_u32_le, read_u8};
pub use io_pool::{FileIoPool, DEFAULT_MAX_OPEN_FILES};
