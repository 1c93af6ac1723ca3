//! Token store implementations.

pub mod file;
pub mod memory;

use std::sync::Arc;

use brainbox_core::config::session::{SessionConfig, TokenStoreKind};
use brainbox_core::traits::TokenStore;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Build the token store selected by configuration.
pub fn from_config(config: &SessionConfig) -> Arc<dyn TokenStore> {
    match config.token_store {
        TokenStoreKind::File => Arc::new(FileTokenStore::new(&config.token_file)),
        TokenStoreKind::Memory => Arc::new(MemoryTokenStore::new()),
    }
}
