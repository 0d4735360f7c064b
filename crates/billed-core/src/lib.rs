//! Bill records, display formatting and store access

pub mod bills;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod models;
pub mod store;
pub mod types;

pub use bills::Bills;
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
pub use models::{sort_most_recent_first, Bill, BillUpdate, DisplayBill, NewBill};
pub use store::{BillStore, MemoryStore, RemoteStore, StoreError, StoreRef};
pub use types::{BillStatus, EXPENSE_TYPES};
