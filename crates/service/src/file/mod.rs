//! File-backed catalog source, override layer and listing writer.

pub mod file_source;
pub mod slot_override_store;
pub mod listing_writer;

pub use file_source::FileSource;
pub use listing_writer::ListingFileWriter;
pub use slot_override_store::SlotOverrideStore;
