pub mod manager;
pub mod memory;
pub mod models;
pub mod record;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryLogStore;
pub use record::{LogPayload, LogRequest, RecordError};
pub use repository::PgLogStore;
pub use store::LogStore;
