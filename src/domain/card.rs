use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PAN_LENGTH: usize = 13;
pub const MAX_PAN_LENGTH: usize = 19;

/// Card brand inferred from the PAN prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
    Unknown,
}

impl CardNetwork {
    /// Prefix rules, first match wins: Amex, Discover, Mastercard, Visa.
    pub fn detect(pan: &str) -> Self {
        if pan.starts_with("34") || pan.starts_with("37") {
            Self::AmericanExpress
        } else if pan.starts_with("6011") || pan.starts_with("65") {
            Self::Discover
        } else if matches!(pan.get(..2), Some("51" | "52" | "53" | "54" | "55")) {
            Self::Mastercard
        } else if pan.starts_with('4') {
            Self::Visa
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Raw card data as submitted by a caller. Never stored.
#[derive(Clone, Deserialize)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &"<redacted>")
            .field("card_holder", &self.card_holder)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

/// What survives validation: the network and the last four digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub network: CardNetwork,
    pub last_four: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardViolation {
    InvalidCardNumber(String),
    ExpiredCard(String),
    InvalidCvv(String),
}

impl CardViolation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCardNumber(_) => "invalid_card_number",
            Self::ExpiredCard(_) => "expired_card",
            Self::InvalidCvv(_) => "invalid_cvv",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidCardNumber(_) => "card_number",
            Self::ExpiredCard(_) => "expiry",
            Self::InvalidCvv(_) => "cvv",
        }
    }
}

impl fmt::Display for CardViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::InvalidCardNumber(reason) | Self::ExpiredCard(reason) | Self::InvalidCvv(reason) => {
                reason
            }
        };
        write!(f, "{} ({})", reason, self.code())
    }
}

/// Every field that failed validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRejection {
    violations: Vec<CardViolation>,
}

impl CardRejection {
    pub fn violations(&self) -> &[CardViolation] {
        &self.violations
    }

    pub fn code(&self) -> &'static str {
        self.violations
            .first()
            .map(CardViolation::code)
            .unwrap_or("invalid_card_number")
    }
}

impl fmt::Display for CardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Strips spaces and dashes from a submitted PAN.
pub fn normalize_pan(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Validates the card against `now`, checking every field before reporting.
pub fn validate_card(card: &CardDetails, now: DateTime<Utc>) -> Result<ValidatedCard, CardRejection> {
    let mut violations = Vec::new();

    let pan = normalize_pan(&card.card_number);
    if pan.is_empty() || !pan.chars().all(|c| c.is_ascii_digit()) {
        violations.push(CardViolation::InvalidCardNumber(
            "card number must contain only digits".to_string(),
        ));
    } else if !(MIN_PAN_LENGTH..=MAX_PAN_LENGTH).contains(&pan.len()) {
        violations.push(CardViolation::InvalidCardNumber(format!(
            "card number must be {MIN_PAN_LENGTH}-{MAX_PAN_LENGTH} digits, got {}",
            pan.len()
        )));
    }

    if !(1..=12).contains(&card.expiry_month) {
        violations.push(CardViolation::ExpiredCard(format!(
            "expiry month {} is not between 1 and 12",
            card.expiry_month
        )));
    } else if (card.expiry_year, card.expiry_month) < (now.year(), now.month()) {
        violations.push(CardViolation::ExpiredCard(format!(
            "card expired {:02}/{}",
            card.expiry_month, card.expiry_year
        )));
    }

    let cvv = card.cvv.as_str();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        violations.push(CardViolation::InvalidCvv(
            "cvv must be 3 or 4 digits".to_string(),
        ));
    }

    if !violations.is_empty() {
        return Err(CardRejection { violations });
    }

    Ok(ValidatedCard {
        network: CardNetwork::detect(&pan),
        last_four: pan[pan.len() - 4..].to_string(),
    })
}
