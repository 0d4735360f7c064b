//! HTML views - pure functions from data to markup
//!
//! Views return the content area only; `page_response` adds the document
//! and the vertical layout around it.

use billed_core::{sort_most_recent_first, Bill, BillStatus, DisplayBill, EXPENSE_TYPES};
use billed_utils::{escape_html, format_amount};

use crate::routes::paths;

/// What the bills view is asked to show
pub enum BillsView<'a> {
    Loading,
    Error(&'a str),
    Data(&'a [DisplayBill]),
}

/// Bills view: loading page, error page, or the bills table
pub fn bills_ui(view: BillsView<'_>) -> String {
    match view {
        BillsView::Loading => loading_page(),
        BillsView::Error(message) => error_page(message),
        BillsView::Data(bills) => format!(
            r#"<div class='content'>
            <div class='content-header flex items-center justify-between mb-6'>
                <h2 class='content-title text-2xl font-bold'>Mes notes de frais</h2>
                <div class='flex items-center gap-2'>
                    <button type='button' hx-get='{}/list' hx-target='#data-table' hx-indicator='#bills-loading' class='px-3 py-2 border rounded-lg hover:bg-gray-50'>Actualiser</button>
                    <a href='{}' data-testid='btn-new-bill' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Nouvelle note de frais</a>
                </div>
            </div>
            <div id='bills-loading' class='htmx-indicator'>{}</div>
            <div id='data-table' class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
            paths::BILLS,
            paths::NEW_BILL,
            loading_page(),
            bills_table(bills)
        ),
    }
}

/// Bills table, most recent bill first
pub fn bills_table(bills: &[DisplayBill]) -> String {
    let mut ordered = bills.to_vec();
    sort_most_recent_first(&mut ordered);
    let rows: String = ordered.iter().map(bill_row).collect();

    format!(
        r#"<table id='example' class='w-full text-sm'>
            <thead>
                <tr class='text-left text-gray-500 border-b'>
                    <th class='py-2'>Type</th><th>Nom</th><th>Date</th><th>Montant</th><th>Statut</th><th>Actions</th>
                </tr>
            </thead>
            <tbody data-testid='tbody'>{}</tbody>
        </table>"#,
        rows
    )
}

fn bill_row(bill: &DisplayBill) -> String {
    let badge = match bill.status_code {
        BillStatus::Pending => "bg-yellow-100 text-yellow-700",
        BillStatus::Accepted => "bg-green-100 text-green-700",
        BillStatus::Refused => "bg-red-100 text-red-700",
    };

    format!(
        r#"<tr class='border-b hover:bg-gray-50'>
            <td class='py-2'>{}</td>
            <td>{}</td>
            <td data-testid='bill-date'>{}</td>
            <td>{}</td>
            <td><span class='px-2 py-1 rounded text-xs {}'>{}</span></td>
            <td>{}</td>
        </tr>"#,
        escape_html(&bill.bill_type),
        escape_html(&bill.name),
        escape_html(&bill.date),
        format_amount(bill.amount, "€"),
        badge,
        escape_html(&bill.status),
        actions(bill)
    )
}

fn actions(bill: &DisplayBill) -> String {
    format!(
        r#"<div class='icon-actions'>
                <button type='button' class='icon-eye text-indigo-600 hover:text-indigo-800' data-testid='icon-eye' data-bill-url='{}'
                    hx-get='/employee/bills/{}/proof' hx-target='#proof-modal' hx-swap='innerHTML' title='Voir le justificatif'>
                    <svg xmlns='http://www.w3.org/2000/svg' class='h-5 w-5' fill='none' viewBox='0 0 24 24' stroke='currentColor'>
                        <path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M15 12a3 3 0 11-6 0 3 3 0 016 0z'/>
                        <path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M2.458 12C3.732 7.943 7.523 5 12 5c4.478 0 8.268 2.943 9.542 7-1.274 4.057-5.064 7-9.542 7-4.477 0-8.268-2.943-9.542-7z'/>
                    </svg>
                </button>
            </div>"#,
        escape_html(&bill.file_url),
        escape_html(&bill.id)
    )
}

/// Error page content
pub fn error_page(message: &str) -> String {
    format!(
        r#"<div class='content'>
            <div class='content-header mb-6'><div class='content-title text-2xl font-bold'>Erreur</div></div>
            <div data-testid='error-message' class='bg-red-50 border border-red-200 rounded-lg p-4 text-red-700'>{}</div>
        </div>"#,
        escape_html(message)
    )
}

pub fn loading_page() -> String {
    "<div class='content' id='loading'><p class='text-gray-500 text-center'>Loading...</p></div>".to_string()
}

/// Receipt preview dialog, swapped into the page's `#proof-modal` container and
/// visible as soon as it lands. Closing is handled by the page script.
pub fn proof_modal(bill: &Bill) -> String {
    let body = if bill.file_url.is_empty() {
        "<p class='text-gray-500 text-center'>Aucun justificatif</p>".to_string()
    } else {
        format!(
            r#"<div class='bill-proof-container text-center'><img src='{}' alt='Bill' style='width: 50%;' class='inline-block'></div>"#,
            escape_html(&bill.file_url)
        )
    };

    format!(
        r#"<div id='modaleFile' role='dialog' aria-modal='true' aria-labelledby='modaleFile-title'
    class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' onclick='if(event.target.id === "modaleFile") closeProofModal()'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-3xl' onclick='event.stopPropagation()'>
        <div class='flex items-center justify-between px-6 py-4 border-b'>
            <h5 id='modaleFile-title' class='text-xl font-bold'>Justificatif</h5>
            <button type='button' onclick='closeProofModal()' aria-label='Close' class='text-gray-500 hover:text-gray-700 p-2'>&times;</button>
        </div>
        <div class='modal-body p-6'>{}</div>
        <div class='px-6 pb-4 text-sm text-gray-500'>{}</div>
    </div>
</div>"#,
        body,
        escape_html(&bill.file_name)
    )
}

/// New bill form content, with an optional error banner
pub fn new_bill_form(error: Option<&str>) -> String {
    let banner = error
        .map(|message| {
            format!(
                "<div data-testid='form-error' class='bg-red-50 border border-red-200 rounded-lg p-4 mb-4 text-red-700'>{}</div>",
                escape_html(message)
            )
        })
        .unwrap_or_default();
    let options: String = EXPENSE_TYPES
        .iter()
        .map(|t| format!("<option>{}</option>", escape_html(t)))
        .collect();

    format!(
        r#"<div class='content'>
            <div class='content-header mb-6'><h2 class='content-title text-2xl font-bold'>Envoyer une note de frais</h2></div>
            {}
            <form data-testid='form-new-bill' method='post' action='{}' class='bg-white rounded-xl shadow-sm p-6 grid grid-cols-1 md:grid-cols-2 gap-4'>
                <label class='flex flex-col gap-1 text-sm'>Type de dépense
                    <select name='type' data-testid='expense-type' required class='px-3 py-2 border rounded-lg'>{}</select></label>
                <label class='flex flex-col gap-1 text-sm'>Nom de la dépense
                    <input type='text' name='name' data-testid='expense-name' placeholder='Vol Paris Londres' class='px-3 py-2 border rounded-lg'></label>
                <label class='flex flex-col gap-1 text-sm'>Date
                    <input type='date' name='date' data-testid='datepicker' required class='px-3 py-2 border rounded-lg'></label>
                <label class='flex flex-col gap-1 text-sm'>Montant TTC
                    <input type='number' step='0.01' name='amount' data-testid='amount' placeholder='348' required class='px-3 py-2 border rounded-lg'></label>
                <label class='flex flex-col gap-1 text-sm'>TVA
                    <input type='number' name='vat' data-testid='vat' placeholder='70' class='px-3 py-2 border rounded-lg'></label>
                <label class='flex flex-col gap-1 text-sm'>%
                    <input type='number' name='pct' data-testid='pct' placeholder='20' required class='px-3 py-2 border rounded-lg'></label>
                <label class='flex flex-col gap-1 text-sm md:col-span-2'>Commentaire
                    <textarea name='commentary' data-testid='commentary' rows='3' class='px-3 py-2 border rounded-lg'></textarea></label>
                <label class='flex flex-col gap-1 text-sm md:col-span-2'>Justificatif (URL d'une image jpg, jpeg ou png)
                    <input type='url' name='file_url' data-testid='file' class='px-3 py-2 border rounded-lg'></label>
                <div class='md:col-span-2'>
                    <button type='submit' id='btn-send-bill' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Envoyer</button>
                </div>
            </form>
        </div>"#,
        banner,
        paths::BILLS,
        options
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_config::Locale;
    use billed_core::fixtures;
    use chrono::NaiveDate;

    fn display_bills() -> Vec<DisplayBill> {
        fixtures::bills()
            .into_iter()
            .map(|b| DisplayBill::from_bill(b, Locale::Fr))
            .collect()
    }

    fn tbody(html: &str) -> &str {
        let start = html.find("<tbody").unwrap();
        let end = html.find("</tbody>").unwrap();
        &html[start..end]
    }

    fn date_cells(html: &str) -> Vec<String> {
        html.split("data-testid='bill-date'>")
            .skip(1)
            .map(|rest| rest[..rest.find("</td>").unwrap()].to_string())
            .collect()
    }

    #[test]
    fn test_bills_table_has_one_row_per_bill() {
        let html = bills_ui(BillsView::Data(&display_bills()));
        assert_eq!(tbody(&html).matches("<tr").count(), 4);
        for name in ["encore", "test1", "test2", "test3"] {
            assert!(html.contains(&format!("<td>{}</td>", name)));
        }
        assert_eq!(html.matches("data-testid='icon-eye'").count(), 4);
    }

    #[test]
    fn test_bills_ordered_most_recent_first() {
        let bills: Vec<DisplayBill> = fixtures::bills()
            .into_iter()
            .map(|b| {
                let raw = b.date.clone();
                let mut display = DisplayBill::from_bill(b, Locale::Fr);
                display.date = raw;
                display
            })
            .collect();

        let html = bills_ui(BillsView::Data(&bills));
        let dates: Vec<NaiveDate> = date_cells(&html)
            .iter()
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));

        assert_eq!(dates.len(), 4);
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_formatted_dates_rendered_in_order() {
        let html = bills_ui(BillsView::Data(&display_bills()));
        assert_eq!(date_cells(&html), vec!["4 Avr. 04", "3 Mar. 03", "2 Fév. 02", "1 Jan. 01"]);
    }

    #[test]
    fn test_row_cells() {
        let html = bills_table(&display_bills()[..1]);
        assert!(html.contains("<td class='py-2'>Hôtel et logement</td>"));
        assert!(html.contains("<td>400 €</td>"));
        assert!(html.contains(">En attente</span>"));
        assert!(html.contains("hx-get='/employee/bills/47qAXb6fIm2zOKkLzMro/proof' hx-target='#proof-modal' hx-swap='innerHTML'"));
        assert!(html.contains("data-bill-url='https://test.storage.tld/"));
    }

    #[test]
    fn test_empty_table() {
        let html = bills_ui(BillsView::Data(&[]));
        assert_eq!(tbody(&html).matches("<tr").count(), 0);
        assert!(html.contains("data-testid='btn-new-bill'"));
    }

    #[test]
    fn test_error_view() {
        for message in ["Erreur 500", "Erreur 401", "Erreur 404"] {
            let html = bills_ui(BillsView::Error(message));
            assert!(html.contains(&format!("<div data-testid='error-message' class='bg-red-50 border border-red-200 rounded-lg p-4 text-red-700'>{}</div>", message)));
            assert!(!html.contains("<tbody"));
        }
    }

    #[test]
    fn test_loading_view() {
        assert!(bills_ui(BillsView::Loading).contains("Loading..."));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut bills = display_bills();
        bills[0].name = "<script>alert(1)</script>".to_string();
        let html = bills_table(&bills);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_proof_modal_is_visible_dialog() {
        let bill = fixtures::bills().remove(0);
        let html = proof_modal(&bill);
        assert!(html.contains("role='dialog'"));
        assert!(html.contains("aria-modal='true'"));
        assert!(!html.contains("aria-hidden"));
        assert!(!html.contains("hidden"));
        assert!(html.contains(&format!("<img src='{}'", bill.file_url)));
        assert!(html.contains("Justificatif"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("addEventListener"));
    }

    #[test]
    fn test_proof_modal_without_receipt() {
        let mut bill = fixtures::bills().remove(0);
        bill.file_url.clear();
        assert!(proof_modal(&bill).contains("Aucun justificatif"));
    }

    #[test]
    fn test_new_bill_form() {
        let html = new_bill_form(Some("date invalide"));
        assert!(html.contains("data-testid='form-error'"));
        assert!(html.contains("<option>Transports</option>"));
        assert!(html.contains("action='/employee/bills'"));
        assert!(!new_bill_form(None).contains("form-error"));
    }
}
