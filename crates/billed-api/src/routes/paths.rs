//! Named application paths

/// Login screen. Authentication lives outside this server, so it redirects to the bills.
pub const LOGIN: &str = "/";
pub const BILLS: &str = "/employee/bills";
pub const NEW_BILL: &str = "/employee/bill/new";
