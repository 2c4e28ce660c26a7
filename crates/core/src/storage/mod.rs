pub mod backend;
pub mod format;
pub mod keys;
pub mod repository;
pub mod store;

pub use backend::{KeyValueBackend, MemoryBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use backend::FileBackend;
pub use keys::StorageKey;
pub use repository::{PortfolioRepository, Repository};
pub use store::Store;
