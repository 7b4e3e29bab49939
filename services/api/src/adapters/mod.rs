pub mod catalog;
pub mod db;
pub mod fallback;
pub mod memory;
pub mod selector;

pub use catalog::StaticCatalog;
pub use db::DbAdapter;
pub use fallback::FallbackStorage;
pub use memory::MemoryStorage;
pub use selector::DateSeededSelector;
