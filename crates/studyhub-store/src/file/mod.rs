//! File-backed state provider.

pub mod store;

pub use store::FileStateStore;
