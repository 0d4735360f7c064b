//! Bill page rendering
//!
//! Full page routes:
//! - page_bills: GET /employee/bills
//! - page_new_bill: GET /employee/bill/new

use axum::response::{Html, IntoResponse, Response};

use crate::routes::paths;
use crate::views::{bills_ui, new_bill_form, BillsView};
use crate::{error_response, page_response, report, AppState};

/// Bills page
///
/// A failed listing is not retried: the error page is rendered with the
/// store's message instead of the table.
pub async fn page_bills(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let user_type = state.config.user.user_type;

    match state.bills().get_bills().await {
        Ok(bills) => {
            log::debug!("Rendering {} bills", bills.len());
            let inner_content = bills_ui(BillsView::Data(&bills));
            Html(page_response(&headers, "Mes notes de frais", paths::BILLS, user_type, &inner_content))
                .into_response()
        }
        Err(e) => {
            let error = report(e, "list_bills", &state);
            error_response(&headers, user_type, paths::BILLS, &error)
        }
    }
}

/// New bill form page
pub async fn page_new_bill(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    Html(page_response(
        &headers,
        "Nouvelle note de frais",
        paths::NEW_BILL,
        state.config.user.user_type,
        &new_bill_form(None),
    ))
}
