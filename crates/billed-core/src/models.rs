//! Core data models for bills

use billed_config::Locale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::format::{format_date, format_status, parse_bill_date};
use crate::types::BillStatus;

/// Bill record as served by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Unique bill identifier
    pub id: String,
    /// Approval status
    pub status: BillStatus,
    /// Expense date, normally YYYY-MM-DD
    #[serde(default)]
    pub date: String,
    /// Amount including taxes
    #[serde(default)]
    pub amount: f64,
    /// Expense name
    #[serde(default)]
    pub name: String,
    /// Expense category
    #[serde(rename = "type", default)]
    pub bill_type: String,
    /// Receipt image URL
    #[serde(default)]
    pub file_url: String,
    /// Receipt file name
    #[serde(default)]
    pub file_name: String,
    /// VAT amount
    #[serde(default)]
    pub vat: String,
    /// VAT rate in percent
    #[serde(default)]
    pub pct: f64,
    /// Employee comment
    #[serde(default)]
    pub commentary: String,
    /// Administrator comment
    #[serde(default)]
    pub comment_admin: String,
    /// Owner e-mail
    #[serde(default)]
    pub email: String,
}

/// Fields of a bill being submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: String,
    pub pct: f64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub email: String,
}

impl NewBill {
    /// Check the fields a bill cannot be submitted without
    pub fn validate(&self) -> CoreResult<()> {
        if self.bill_type.trim().is_empty() {
            return Err(CoreError::ValidationError {
                message: "type de dépense requis".to_string(),
            });
        }
        if parse_bill_date(&self.date).is_none() {
            return Err(CoreError::ValidationError {
                message: format!("date invalide: {}", self.date),
            });
        }
        if !(self.amount > 0.0) {
            return Err(CoreError::ValidationError {
                message: "le montant doit être positif".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&self.pct) {
            return Err(CoreError::ValidationError {
                message: "le taux de TVA doit être entre 0 et 100".to_string(),
            });
        }
        if !self.file_name.is_empty() && !has_image_extension(&self.file_name) {
            return Err(CoreError::ValidationError {
                message: "le justificatif doit être un fichier jpg, jpeg ou png".to_string(),
            });
        }
        Ok(())
    }

    /// Turn into a stored record; new bills always start pending
    pub fn into_bill(self, id: String) -> Bill {
        Bill {
            id,
            status: BillStatus::Pending,
            date: self.date,
            amount: self.amount,
            name: self.name,
            bill_type: self.bill_type,
            file_url: self.file_url,
            file_name: self.file_name,
            vat: self.vat,
            pct: self.pct,
            commentary: self.commentary,
            comment_admin: String::new(),
            email: self.email,
        }
    }
}

fn has_image_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg" | "png"),
        None => false,
    }
}

/// Partial update of a bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl BillUpdate {
    pub fn apply(&self, bill: &mut Bill) {
        if let Some(status) = self.status {
            bill.status = status;
        }
        if let Some(ref comment) = self.comment_admin {
            bill.comment_admin = comment.clone();
        }
        if let Some(ref commentary) = self.commentary {
            bill.commentary = commentary.clone();
        }
        if let Some(amount) = self.amount {
            bill.amount = amount;
        }
        if let Some(ref date) = self.date {
            bill.date = date.clone();
        }
    }
}

/// Bill ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBill {
    pub id: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    /// Short localized date, or the raw input when it is not a date
    pub date: String,
    /// Parsed calendar date, used for ordering
    #[serde(skip)]
    pub calendar_date: Option<NaiveDate>,
    pub amount: f64,
    /// Localized status label
    pub status: String,
    pub status_code: BillStatus,
    pub file_url: String,
    pub file_name: String,
    pub commentary: String,
}

impl DisplayBill {
    /// Format a bill for display.
    ///
    /// A date that does not parse is kept exactly as received; the status is
    /// relabeled either way.
    pub fn from_bill(bill: Bill, locale: Locale) -> Self {
        let calendar_date = parse_bill_date(&bill.date);
        let date = match format_date(&bill.date, locale) {
            Ok(formatted) => formatted,
            Err(e) => {
                log::warn!("Bill {}: {}, keeping the date as is", bill.id, e);
                bill.date
            }
        };

        Self {
            id: bill.id,
            bill_type: bill.bill_type,
            name: bill.name,
            date,
            calendar_date,
            amount: bill.amount,
            status: format_status(bill.status, locale).to_string(),
            status_code: bill.status,
            file_url: bill.file_url,
            file_name: bill.file_name,
            commentary: bill.commentary,
        }
    }
}

/// Order bills most recent first. Undated bills go last, in their original order.
pub fn sort_most_recent_first(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| match (a.calendar_date, b.calendar_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn new_bill() -> NewBill {
        NewBill {
            bill_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            date: "2022-06-01".to_string(),
            amount: 348.0,
            vat: "70".to_string(),
            pct: 20.0,
            commentary: String::new(),
            file_url: "https://test.storage.tld/ticket.png".to_string(),
            file_name: "ticket.png".to_string(),
            email: "a@a".to_string(),
        }
    }

    #[test]
    fn test_bill_deserialize_partial_record() {
        let json = r#"{"id": "43225ddsf6fIm2zOKkLzMro", "status": "pending", "date": "wrong_date_example"}"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount, 0.0);
        assert!(bill.file_url.is_empty());
    }

    #[test]
    fn test_bill_deserialize_backend_names() {
        let json = r#"{"id": "x", "status": "refused", "type": "Transports", "fileUrl": "https://f", "commentAdmin": "non", "amount": 100}"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.bill_type, "Transports");
        assert_eq!(bill.file_url, "https://f");
        assert_eq!(bill.comment_admin, "non");
        assert_eq!(bill.amount, 100.0);
    }

    #[test]
    fn test_display_bill_formats_date_and_status() {
        let bill = fixtures::bills().remove(0);
        let display = DisplayBill::from_bill(bill, Locale::Fr);
        assert_eq!(display.date, "4 Avr. 04");
        assert_eq!(display.status, "En attente");
        assert_eq!(display.calendar_date, NaiveDate::from_ymd_opt(2004, 4, 4));
    }

    #[test]
    fn test_display_bill_keeps_unparseable_date() {
        let mut bill = fixtures::bills().remove(1);
        bill.date = "wrong_date_example".to_string();
        let display = DisplayBill::from_bill(bill, Locale::Fr);
        assert_eq!(display.date, "wrong_date_example");
        assert_eq!(display.status, "Refusé");
        assert!(display.calendar_date.is_none());
    }

    #[test]
    fn test_display_bill_date_matches_format_date() {
        let mut bills = fixtures::bills();
        bills[0].date = "2021-12-25T10:30:00+01:00".to_string();
        for bill in bills {
            let expected = crate::format::format_date(&bill.date, Locale::En).unwrap();
            assert_eq!(DisplayBill::from_bill(bill, Locale::En).date, expected);
        }
    }

    #[test]
    fn test_sort_most_recent_first() {
        let mut bills: Vec<DisplayBill> = fixtures::bills()
            .into_iter()
            .map(|b| DisplayBill::from_bill(b, Locale::Fr))
            .collect();
        bills[2].calendar_date = None;
        bills[2].date = "???".to_string();

        sort_most_recent_first(&mut bills);
        let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["4 Avr. 04", "2 Fév. 02", "1 Jan. 01", "???"]);
    }

    #[test]
    fn test_new_bill_validate() {
        assert!(new_bill().validate().is_ok());

        let mut bill = new_bill();
        bill.date = "01/06/2022".to_string();
        assert!(bill.validate().is_err());

        let mut bill = new_bill();
        bill.amount = 0.0;
        assert!(bill.validate().is_err());

        let mut bill = new_bill();
        bill.file_name = "ticket.pdf".to_string();
        assert!(bill.validate().is_err());

        let mut bill = new_bill();
        bill.bill_type = " ".to_string();
        assert!(bill.validate().is_err());
    }

    #[test]
    fn test_new_bill_into_bill_is_pending() {
        let bill = new_bill().into_bill("id-1".to_string());
        assert_eq!(bill.id, "id-1");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.name, "Vol Paris Londres");
    }

    #[test]
    fn test_bill_update_apply() {
        let mut bill = fixtures::bills().remove(0);
        let update = BillUpdate {
            status: Some(BillStatus::Accepted),
            comment_admin: Some("ok pour moi".to_string()),
            ..Default::default()
        };
        update.apply(&mut bill);
        assert_eq!(bill.status, BillStatus::Accepted);
        assert_eq!(bill.comment_admin, "ok pour moi");
        assert_eq!(bill.amount, 400.0);
    }
}
