use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Percentage applied when the submitted form leaves it empty or zero.
pub const DEFAULT_PCT: i64 = 20;

const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Label shown to employees in the bills table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refused",
        }
    }
}

impl Default for BillStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        })
    }
}

/// An expense report as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    #[serde(flatten)]
    pub fields: CreateBill,
}

/// Body of a store create operation. The store assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBill {
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: i64,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub comment_admin: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Bill {
    pub fn new(id: impl Into<String>, fields: CreateBill) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

impl std::ops::Deref for Bill {
    type Target = CreateBill;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

/// Payload returned by both store read and store create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillList {
    pub data: Vec<Bill>,
}

impl From<Vec<Bill>> for BillList {
    fn from(data: Vec<Bill>) -> Self {
        Self { data }
    }
}

/// Orders bills latest first by comparing their raw date strings.
///
/// The comparison is lexical, so it only matches calendar order for
/// zero-padded `YYYY-MM-DD` dates.
pub fn sort_latest_first(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Formats a `YYYY-MM-DD` date for display, e.g. `2004-04-04` becomes
/// `4 Avr. 04`.
pub fn format_date(value: &str) -> Result<String, Error> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        Error::InvalidDate {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    ))
}

/// Reads an amount sent as a JSON integer or float. Fractions are dropped,
/// as the form does with typed amounts (`348.5` is 348).
fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a numeric amount")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            if value.is_finite() {
                Ok(value.trunc() as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// Parses the leading integer of `value`, ignoring surrounding whitespace and
/// any trailing garbage (`"348.5 €"` is 348).
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let digits_start = usize::from(value.starts_with(['-', '+']));
    let digits_len = value[digits_start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }
    value[..digits_start + digits_len].parse().ok()
}
