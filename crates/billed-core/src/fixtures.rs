//! Sample bills used to seed the in-memory store

use crate::models::Bill;
use crate::types::BillStatus;

const STORAGE: &str = "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs";

/// Four sample bills for the employee `a@a`
pub fn bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            status: BillStatus::Pending,
            date: "2004-04-04".to_string(),
            amount: 400.0,
            name: "encore".to_string(),
            bill_type: "Hôtel et logement".to_string(),
            file_url: format!("{}/preview-facture-free-201801-pdf-1.jpg", STORAGE),
            file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
            vat: "80".to_string(),
            pct: 20.0,
            commentary: "séminaire billed".to_string(),
            comment_admin: "ok".to_string(),
            email: "a@a".to_string(),
        },
        Bill {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            status: BillStatus::Refused,
            date: "2001-01-01".to_string(),
            amount: 100.0,
            name: "test1".to_string(),
            bill_type: "Transports".to_string(),
            file_url: format!("{}/1592770761.jpeg", STORAGE),
            file_name: "1592770761.jpeg".to_string(),
            vat: String::new(),
            pct: 20.0,
            commentary: "plop".to_string(),
            comment_admin: "en fait non".to_string(),
            email: "a@a".to_string(),
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            status: BillStatus::Accepted,
            date: "2003-03-03".to_string(),
            amount: 300.0,
            name: "test3".to_string(),
            bill_type: "Services en ligne".to_string(),
            file_url: format!("{}/facture-client-php-exportee.png", STORAGE),
            file_name: "facture-client-php-exportee.png".to_string(),
            vat: "60".to_string(),
            pct: 20.0,
            commentary: String::new(),
            comment_admin: "bon bah d'accord".to_string(),
            email: "a@a".to_string(),
        },
        Bill {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            status: BillStatus::Refused,
            date: "2002-02-02".to_string(),
            amount: 200.0,
            name: "test2".to_string(),
            bill_type: "Restaurants et bars".to_string(),
            file_url: format!("{}/preview-facture-free-201801-pdf-1.jpg", STORAGE),
            file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
            vat: "40".to_string(),
            pct: 20.0,
            commentary: "test2".to_string(),
            comment_admin: "pas la bonne facture".to_string(),
            email: "a@a".to_string(),
        },
    ]
}
