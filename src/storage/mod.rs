pub mod allocator;
pub mod mmap;
pub mod reader;
pub mod store;
pub mod writer;

pub use allocator::allocate;
pub use mmap::MmapStorage;
pub use reader::read_slots;
pub use store::SlotStore;
pub use writer::{write_records, SkippedRecord, WriteReport};
