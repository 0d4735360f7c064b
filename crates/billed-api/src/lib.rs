//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::bills: Bill list, receipt preview, new bill form
//! - routes::paths: Named application paths

pub mod error;
pub mod routes;
pub mod views;

use axum::{
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use billed_config::{Config, UserType};
use billed_core::{Bills, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, StoreRef};
use tokio::net::TcpListener;

pub use error::ApiError;

use routes::paths;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: StoreRef,
    pub config: Config,
}

impl AppState {
    /// Bills adapter over the shared store, in the configured locale
    pub fn bills(&self) -> Bills {
        Bills::new(self.store.clone(), self.config.display.locale)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::bills::{api_bills, api_bill_detail, htmx_bills_list, htmx_bill_proof, htmx_bill_store, page_bills, page_new_bill};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/bills", get(api_bills))
        .route("/api/bills/:id", get(api_bill_detail))
        // HTMX page routes
        .route(paths::LOGIN, get(index_page))
        .route(paths::BILLS, get(page_bills).post(htmx_bill_store))
        .route(paths::NEW_BILL, get(page_new_bill))
        // HTMX partial routes
        .route("/employee/bills/list", get(htmx_bills_list))
        .route("/employee/bills/:id/proof", get(htmx_bill_proof))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Login lives outside this server; go straight to the bills
async fn index_page() -> Redirect {
    Redirect::to(paths::BILLS)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Billed</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ display: none; }}
        .htmx-request .htmx-indicator {{ display: block; }}
        .htmx-request.htmx-indicator {{ display: block; }}
        .active-icon {{ background-color: #eef2ff; color: #4f46e5; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <div id="proof-modal"></div>
    <script>
    function closeProofModal() {{
        document.getElementById('proof-modal').innerHTML = '';
    }}
    document.addEventListener('keydown', function(e) {{
        if (e.key === 'Escape') closeProofModal();
    }});
    // Error pages come back as 404/502 fragments; swap them instead of dropping them
    document.body.addEventListener('htmx:beforeSwap', function(evt) {{
        const status = evt.detail.xhr.status;
        if (status === 404 || status === 502) {{
            evt.detail.shouldSwap = true;
            evt.detail.isError = false;
        }}
    }});
    </script>
</body>
</html>"#,
        title, content
    )
}

/// Vertical navigation bar
///
/// Employees get the bills and new bill icons, the one for the current page
/// marked `active-icon`. Administrators get the bare bar.
pub fn vertical_layout(current_path: &str, user_type: UserType) -> String {
    let mut nav = String::from("<div class='vertical-navbar bg-white border-r h-screen flex flex-col items-center py-4 gap-4'><div class='text-xl font-bold text-indigo-600'>Billed</div>");

    if user_type == UserType::Employee {
        let links = [
            (paths::BILLS, "icon-window", "Mes notes de frais", "M4 5a1 1 0 011-1h14a1 1 0 011 1v14a1 1 0 01-1 1H5a1 1 0 01-1-1V5zm0 4h16"),
            (paths::NEW_BILL, "icon-mail", "Nouvelle note de frais", "M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"),
        ];

        for (path, id, label, icon) in &links {
            let active_class = if current_path == *path { "active-icon" } else { "text-gray-500 hover:bg-gray-50" };
            nav.push_str(&format!(
                r#"<a href='{}' id='layout-{}' data-testid='{}' title='{}' class='p-3 rounded-lg {}'><svg xmlns='http://www.w3.org/2000/svg' class='h-6 w-6' fill='none' viewBox='0 0 24 24' stroke='currentColor'><path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='{}'/></svg></a>"#,
                path, id, id, label, active_class, icon
            ));
        }
    }

    nav.push_str("</div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, user_type: UserType, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex h-screen overflow-hidden'>
    <aside class='w-20 flex-shrink-0'>{}</aside>
    <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
</div>"#,
            vertical_layout(current_path, user_type), inner_content))
    }
}

/// Error page with the error's status code
pub fn error_response(headers: &HeaderMap, user_type: UserType, current_path: &str, error: &ApiError) -> Response {
    let inner_content = views::error_page(&error.to_string());
    (
        error.status(),
        Html(page_response(headers, "Erreur", current_path, user_type, &inner_content)),
    )
        .into_response()
}

/// Log a core failure for the configured user and turn it into an `ApiError`
pub fn report(error: CoreError, operation: &str, state: &AppState) -> ApiError {
    let context = ErrorContext::new(operation).with_user(&state.config.user.email);
    DefaultErrorLogger.log_error(&error, &context);
    ApiError::from(error)
}

/// Start the HTTP server
///
/// Binds the configured address and serves until Ctrl-C.
pub async fn start_server(config: Config, store: StoreRef) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Billed server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - {} (Bills)", paths::BILLS);
    log::info!("  - {} (New bill)", paths::NEW_BILL);
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
