//! Bill store abstraction
//!
//! - memory: in-process store, seeded with sample bills
//! - remote: REST backend client

pub mod memory;
pub mod remote;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Bill, BillUpdate, NewBill};

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Store failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Erreur {status}")]
    Status { status: u16 },

    #[error("Bill not found: {id}")]
    NotFound { id: String },

    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Invalid response: {message}")]
    Decode { message: String },
}

/// Source of bill records
#[async_trait]
pub trait BillStore: Send + Sync {
    /// List the connected user's bills
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Fetch one bill
    async fn get(&self, id: &str) -> Result<Bill, StoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|bill| bill.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Submit a new bill
    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError>;

    /// Apply a partial update to a bill
    async fn update(&self, id: &str, update: BillUpdate) -> Result<Bill, StoreError>;
}

/// Shared store handle
pub type StoreRef = Arc<dyn BillStore>;
