//! Bill routes - employee bill list, receipt preview, bill submission
//!
//! Endpoints:
//! - GET  /employee/bills            bills page
//! - GET  /employee/bills/list       bills table (HTMX partial)
//! - GET  /employee/bills/:id/proof  receipt preview dialog (HTMX)
//! - GET  /employee/bill/new         new bill form
//! - POST /employee/bills            submit a new bill
//! - GET  /api/bills, /api/bills/:id JSON API
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_bills,
    api_bill_detail,
    htmx_bills_list,
    htmx_bill_proof,
    htmx_bill_store,
};

pub use page::{
    page_bills,
    page_new_bill,
};
