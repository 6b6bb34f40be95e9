//! Persistence layer
//!
//! - **backend**: the `KvBackend` trait and startup backend selection
//! - **file**: async JSON-file backend
//! - **memory**: in-process fallback backend
//! - **token_store**: versioned load/save of the tracked-token collection
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use mindshare::store::{select_backend, BackendKind, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = select_backend(&[BackendKind::File, BackendKind::Memory], "./data").await?;
//!     let store = TokenStore::new(backend);
//!
//!     let tokens = store.load().await;
//!     store.save(&tokens).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;
pub mod token_store;

pub use backend::{select_backend, BackendKind, KvBackend};
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use token_store::{TokenStore, SCHEMA_VERSION, TOKENS_KEY};
