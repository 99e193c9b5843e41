mod entry;
mod store;

pub use entry::HistoryEntry;
pub use store::HistoryStore;
