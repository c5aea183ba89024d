//! In-memory transient store.

pub mod store;

pub use store::MemoryTransientStore;
