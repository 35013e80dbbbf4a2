//! Card detail validation. No payment is ever processed.

use chrono::{Datelike, NaiveDate};

use crate::model::payment::{PaymentDto, PaymentResultDto};

const MIN_CARD_DIGITS: usize = 13;
const MAX_CARD_DIGITS: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRejection {
    MissingFields,
    InvalidCardNumber,
    InvalidExpiry,
    Expired,
    InvalidCvv,
}

impl PaymentRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Card number, expiry date and CVV are required",
            Self::InvalidCardNumber => "Invalid card number",
            Self::InvalidExpiry => "Expiry date must be in MM/YY format",
            Self::Expired => "Card has expired",
            Self::InvalidCvv => "CVV must be 3 or 4 digits",
        }
    }
}

/// Checks card details against the calendar date `today`.
pub fn validate(dto: &PaymentDto, today: NaiveDate) -> Result<(), PaymentRejection> {
    let card_number: String = dto
        .card_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    let expiry = dto.expiry_date.trim();
    let cvv = dto.cvv.trim();

    if card_number.is_empty() || expiry.is_empty() || cvv.is_empty() {
        return Err(PaymentRejection::MissingFields);
    }

    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&card_number.len())
        || !card_number.bytes().all(|b| b.is_ascii_digit())
        || !luhn_valid(&card_number)
    {
        return Err(PaymentRejection::InvalidCardNumber);
    }

    let (year, month) = parse_expiry(expiry).ok_or(PaymentRejection::InvalidExpiry)?;
    if (year, month) < (today.year(), today.month()) {
        return Err(PaymentRejection::Expired);
    }

    if !(3..=4).contains(&cvv.len()) || !cvv.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PaymentRejection::InvalidCvv);
    }

    Ok(())
}

pub fn validate_to_dto(dto: &PaymentDto, today: NaiveDate) -> PaymentResultDto {
    match validate(dto, today) {
        Ok(()) => PaymentResultDto {
            success: true,
            message: "Payment details are valid".to_string(),
        },
        Err(rejection) => PaymentResultDto {
            success: false,
            message: rejection.message().to_string(),
        },
    }
}

/// Luhn checksum over an all-digit string.
fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Parses `MM/YY` into `(year, month)`. Years below 50 are 20YY, the rest 19YY.
fn parse_expiry(expiry: &str) -> Option<(i32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    let (month, year) = (month.trim(), year.trim());

    if month.len() != 2 || year.len() != 2 {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    let year = if year < 50 { 2000 + year } else { 1900 + year };
    Some((year, month))
}
