//! Bill API endpoints
//!
//! JSON API:
//! - api_bills: display records
//! - api_bill_detail: one raw bill
//!
//! HTMX:
//! - htmx_bills_list: bills table partial
//! - htmx_bill_proof: receipt preview dialog
//! - htmx_bill_store: submit the new bill form

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use billed_config::UserType;
use billed_core::{CoreError, NewBill};
use std::collections::HashMap;

use crate::routes::paths;
use crate::views::{bills_table, new_bill_form, proof_modal};
use crate::{error_response, is_htmx_request, page_response, report, ApiError, AppState};

/// Get display-ready bills (JSON API)
pub async fn api_bills(state: axum::extract::State<AppState>) -> Response {
    match state.bills().get_bills().await {
        Ok(bills) => Json(bills).into_response(),
        Err(e) => report(e, "api_bills", &state).into_json(),
    }
}

/// Get single bill (JSON API)
pub async fn api_bill_detail(
    state: axum::extract::State<AppState>,
    path: Path<String>,
) -> Response {
    match state.bills().get_bill(&path.0).await {
        Ok(bill) => Json(bill).into_response(),
        Err(e) => report(e, "api_bill_detail", &state).into_json(),
    }
}

/// HTMX: Bills table - Partial page update
pub async fn htmx_bills_list(state: axum::extract::State<AppState>) -> Response {
    match state.bills().get_bills().await {
        Ok(bills) => Html(bills_table(&bills)).into_response(),
        Err(e) => report(e, "list_bills", &state).into_response(),
    }
}

/// HTMX: Receipt preview, appended to the body
pub async fn htmx_bill_proof(
    state: axum::extract::State<AppState>,
    path: Path<String>,
) -> Response {
    match state.bills().get_bill(&path.0).await {
        Ok(bill) => Html(proof_modal(&bill)).into_response(),
        Err(e) => report(e, "show_proof", &state).into_response(),
    }
}

/// HTMX: Store new bill from the form
pub async fn htmx_bill_store(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    body: String,
) -> Response {
    let user_type = state.config.user.user_type;
    let params = match parse_form(&body) {
        Ok(params) => params,
        Err(e) => {
            log::info!("Rejected bill form: {}", e);
            return rejected_form(&headers, user_type, &e.to_string());
        }
    };
    let bill = new_bill_from_form(&params, &state.config.user.email);

    match state.bills().create_bill(bill).await {
        Ok(_) if is_htmx_request(&headers) => {
            (StatusCode::OK, [("HX-Redirect", paths::BILLS)], "").into_response()
        }
        Ok(_) => Redirect::to(paths::BILLS).into_response(),
        Err(CoreError::ValidationError { message }) => {
            log::info!("Rejected bill form: {}", message);
            rejected_form(&headers, user_type, &message)
        }
        Err(e) => {
            let error: ApiError = report(e, "create_bill", &state);
            error_response(&headers, user_type, paths::NEW_BILL, &error)
        }
    }
}

/// The new bill form again, with the reason it was refused
fn rejected_form(headers: &axum::http::HeaderMap, user_type: UserType, message: &str) -> Response {
    let inner_content = new_bill_form(Some(message));
    (
        StatusCode::BAD_REQUEST,
        Html(page_response(headers, "Nouvelle note de frais", paths::NEW_BILL, user_type, &inner_content)),
    )
        .into_response()
}

/// Decode an `application/x-www-form-urlencoded` body
///
/// Fails on the first key or value that is not valid percent-encoded UTF-8.
fn parse_form(body: &str) -> Result<HashMap<String, String>, ApiError> {
    let decode = |raw: &str| {
        urlencoding::decode(&raw.replace('+', " "))
            .map(|v| v.into_owned())
            .map_err(|_| ApiError::BadRequest {
                message: format!("formulaire mal encodé: {}", raw),
            })
    };

    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode(key)?, decode(value)?);
    }
    Ok(params)
}

fn new_bill_from_form(params: &HashMap<String, String>, email: &str) -> NewBill {
    let field = |name: &str| params.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
    let number = |name: &str| field(name).replace(',', ".").parse::<f64>().unwrap_or(0.0);

    let file_url = field("file_url");
    NewBill {
        bill_type: field("type"),
        name: field("name"),
        date: field("date"),
        amount: number("amount"),
        vat: field("vat"),
        pct: number("pct"),
        commentary: field("commentary"),
        file_name: file_name_from_url(&file_url),
        file_url,
        email: email.to_string(),
    }
}

/// Last path segment of a receipt URL, query string removed
fn file_name_from_url(url: &str) -> String {
    let path = url.split('?').next().unwrap_or_default();
    let decoded = urlencoding::decode(path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_string());
    decoded.rsplit('/').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form() {
        let params = parse_form("type=H%C3%B4tel+et+logement&name=Nuit&amount=120.5&empty=").unwrap();
        assert_eq!(params["type"], "Hôtel et logement");
        assert_eq!(params["name"], "Nuit");
        assert_eq!(params["amount"], "120.5");
        assert_eq!(params["empty"], "");
    }

    #[test]
    fn test_new_bill_from_form() {
        let params = parse_form(
            "type=Transports&name=Taxi&date=2022-01-10&amount=35%2C5&pct=20&file_url=https%3A%2F%2Fcdn.tld%2Fo%2Fjustificatifs%252Fticket.png%3Falt%3Dmedia",
        )
        .unwrap();
        let bill = new_bill_from_form(&params, "a@a");

        assert_eq!(bill.bill_type, "Transports");
        assert_eq!(bill.amount, 35.5);
        assert_eq!(bill.pct, 20.0);
        assert_eq!(bill.file_name, "ticket.png");
        assert_eq!(bill.email, "a@a");
        assert!(bill.validate().is_ok());
    }

    #[test]
    fn test_parse_form_rejects_invalid_utf8() {
        let err = parse_form("type=Transports&name=%FF%FE&amount=10").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
        assert!(err.to_string().contains("%FF%FE"));
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(file_name_from_url("https://cdn.tld/a/facture.jpg"), "facture.jpg");
        assert_eq!(file_name_from_url(""), "");
    }
}
