use chrono::{NaiveDate, NaiveTime};

use super::domain::Receipt;

/// First rule a submitted receipt failed. Only used for diagnostics; clients see a single
/// generic rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptViolation {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("retailer may only contain letters, digits, underscores, whitespace, `-` and `&`")]
    RetailerCharacters,
    #[error("total must be digits followed by exactly two decimal places")]
    TotalFormat,
    #[error("purchaseDate must be a YYYY-MM-DD calendar date")]
    PurchaseDate,
    #[error("purchaseTime must be a 24-hour HH:MM time")]
    PurchaseTime,
}

/// Run every validation rule, returning the first violation encountered.
pub fn check(receipt: &Receipt) -> Result<(), ReceiptViolation> {
    let required = [
        ("retailer", receipt.retailer.is_empty()),
        ("purchaseDate", receipt.purchase_date.is_empty()),
        ("purchaseTime", receipt.purchase_time.is_empty()),
        ("items", receipt.items.is_empty()),
        ("total", receipt.total.is_empty()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
        return Err(ReceiptViolation::MissingField(*field));
    }

    if !is_retailer_name(&receipt.retailer) {
        return Err(ReceiptViolation::RetailerCharacters);
    }
    if !is_money_amount(&receipt.total) {
        return Err(ReceiptViolation::TotalFormat);
    }
    if parse_purchase_date(&receipt.purchase_date).is_none() {
        return Err(ReceiptViolation::PurchaseDate);
    }
    if parse_purchase_time(&receipt.purchase_time).is_none() {
        return Err(ReceiptViolation::PurchaseTime);
    }

    Ok(())
}

/// Accept/reject decision used to gate scoring.
pub fn is_valid(receipt: &Receipt) -> bool {
    check(receipt).is_ok()
}

fn is_retailer_name(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || matches!(c, '_' | '-' | '&')
        })
}

fn is_money_amount(value: &str) -> bool {
    let Some((dollars, cents)) = value.split_once('.') else {
        return false;
    };

    !dollars.is_empty()
        && dollars.bytes().all(|b| b.is_ascii_digit())
        && cents.len() == 2
        && cents.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD` with zero-padded fields that names a real calendar day.
pub(crate) fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    if !matches_shape(value, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `HH:MM` on a 24-hour clock, no seconds.
pub(crate) fn parse_purchase_time(value: &str) -> Option<NaiveTime> {
    if !matches_shape(value, "dd:dd") {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

// `d` in the shape matches an ASCII digit; every other byte must match literally.
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(actual, expected)| match expected {
            b'd' => actual.is_ascii_digit(),
            literal => actual == literal,
        })
}
