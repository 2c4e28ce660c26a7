pub mod traits;

// Upstream API implementations
pub mod chat;
pub mod marketstack;
