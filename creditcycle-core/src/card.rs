//! Card record: the single form the calculator persists.
//!
//! Numeric fields are kept as the text the user typed and only coerced when
//! something needs a number, so a half-typed form round-trips untouched.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_UTIL_TARGET: u32 = 30;
pub const UTIL_TARGET_MIN: u32 = 1;
pub const UTIL_TARGET_MAX: u32 = 100;

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("decimal prefix pattern compiles")
});

static INTEGER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("integer prefix pattern compiles"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown card field: {0}")]
    UnknownField(String),
    #[error("utilization target must be a whole percent, got '{0}'")]
    InvalidUtilTarget(String),
}

/// One credit card as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRecord {
    pub nickname: String,
    /// Credit limit, as typed.
    pub limit: String,
    /// Current balance, as typed.
    pub current_balance: String,
    /// Day of month the statement closes (1-31), as typed.
    pub statement_date: String,
    /// Day of month the payment is due (1-31), as typed.
    pub due_date: String,
    /// Target utilization percent (1-100).
    pub util_target: u32,
}

impl Default for CardRecord {
    fn default() -> Self {
        Self {
            nickname: String::new(),
            limit: String::new(),
            current_balance: String::new(),
            statement_date: String::new(),
            due_date: String::new(),
            util_target: DEFAULT_UTIL_TARGET,
        }
    }
}

impl CardRecord {
    pub fn new(
        nickname: impl Into<String>,
        limit: impl Into<String>,
        current_balance: impl Into<String>,
        statement_date: impl Into<String>,
        due_date: impl Into<String>,
        util_target: u32,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            limit: limit.into(),
            current_balance: current_balance.into(),
            statement_date: statement_date.into(),
            due_date: due_date.into(),
            util_target,
        }
    }

    pub fn limit_value(&self) -> f64 {
        parse_lenient_f64(&self.limit)
    }

    pub fn balance_value(&self) -> f64 {
        parse_lenient_f64(&self.current_balance)
    }

    /// Statement day, 0 when unset or unparsable.
    pub fn statement_day(&self) -> i64 {
        parse_lenient_i64(&self.statement_date)
    }

    /// Due day, 0 when unset or unparsable.
    pub fn due_day(&self) -> i64 {
        parse_lenient_i64(&self.due_date)
    }

    /// Text currently held for `field`.
    pub fn get(&self, field: CardField) -> String {
        match field {
            CardField::Nickname => self.nickname.clone(),
            CardField::Limit => self.limit.clone(),
            CardField::CurrentBalance => self.current_balance.clone(),
            CardField::StatementDate => self.statement_date.clone(),
            CardField::DueDate => self.due_date.clone(),
            CardField::UtilTarget => self.util_target.to_string(),
        }
    }

    /// Apply one form edit. Text fields take the value verbatim; the target
    /// slider only accepts a whole number and snaps it into 1..=100.
    pub fn set(&mut self, field: CardField, value: &str) -> Result<(), CardError> {
        match field {
            CardField::Nickname => self.nickname = value.to_string(),
            CardField::Limit => self.limit = value.to_string(),
            CardField::CurrentBalance => self.current_balance = value.to_string(),
            CardField::StatementDate => self.statement_date = value.to_string(),
            CardField::DueDate => self.due_date = value.to_string(),
            CardField::UtilTarget => {
                let pct: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| CardError::InvalidUtilTarget(value.to_string()))?;
                self.util_target =
                    pct.clamp(UTIL_TARGET_MIN as i64, UTIL_TARGET_MAX as i64) as u32;
            }
        }
        Ok(())
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<CardField> {
        CardField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    /// Whether "Calculate" is enabled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Header shown above results.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            "Your Card"
        } else {
            &self.nickname
        }
    }
}

/// The editable fields of the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Nickname,
    Limit,
    CurrentBalance,
    StatementDate,
    DueDate,
    UtilTarget,
}

impl CardField {
    pub const ALL: [CardField; 6] = [
        CardField::Nickname,
        CardField::Limit,
        CardField::CurrentBalance,
        CardField::StatementDate,
        CardField::DueDate,
        CardField::UtilTarget,
    ];

    /// Fields that must be non-empty before results are shown.
    pub const REQUIRED: [CardField; 5] = [
        CardField::Nickname,
        CardField::Limit,
        CardField::CurrentBalance,
        CardField::StatementDate,
        CardField::DueDate,
    ];

    /// Key used in the persisted JSON object.
    pub fn key(&self) -> &'static str {
        match self {
            CardField::Nickname => "nickname",
            CardField::Limit => "limit",
            CardField::CurrentBalance => "currentBalance",
            CardField::StatementDate => "statementDate",
            CardField::DueDate => "dueDate",
            CardField::UtilTarget => "utilTarget",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardField::Nickname => "Card Nickname",
            CardField::Limit => "Credit Limit",
            CardField::CurrentBalance => "Current Balance",
            CardField::StatementDate => "Statement Date (Day)",
            CardField::DueDate => "Due Date (Day)",
            CardField::UtilTarget => "Target Utilization",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CardField {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "nickname" | "name" => Ok(CardField::Nickname),
            "limit" | "creditlimit" => Ok(CardField::Limit),
            "currentbalance" | "balance" => Ok(CardField::CurrentBalance),
            "statementdate" | "statement" => Ok(CardField::StatementDate),
            "duedate" | "due" => Ok(CardField::DueDate),
            "utiltarget" | "target" => Ok(CardField::UtilTarget),
            _ => Err(CardError::UnknownField(s.to_string())),
        }
    }
}

/// Coerce free text to a number the way a browser number field does:
/// take the longest leading decimal literal, otherwise 0.
pub fn parse_lenient_f64(text: &str) -> f64 {
    DECIMAL_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integer prefix of `text`, otherwise 0. "15.7" is 15.
pub fn parse_lenient_i64(text: &str) -> i64 {
    INTEGER_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let card = CardRecord::default();
        assert!(card.nickname.is_empty());
        assert!(card.limit.is_empty());
        assert_eq!(card.util_target, 30);
        assert!(!card.is_complete());
        assert_eq!(card.missing_fields().len(), 5);
    }

    #[test]
    fn test_lenient_float_parsing() {
        assert_eq!(parse_lenient_f64("2500"), 2500.0);
        assert_eq!(parse_lenient_f64("  12.5abc"), 12.5);
        assert_eq!(parse_lenient_f64(".5"), 0.5);
        assert_eq!(parse_lenient_f64("1e3"), 1000.0);
        assert_eq!(parse_lenient_f64("-4"), -4.0);
        assert_eq!(parse_lenient_f64(""), 0.0);
        assert_eq!(parse_lenient_f64("abc"), 0.0);
        assert_eq!(parse_lenient_f64("1,000"), 1.0);
        assert_eq!(parse_lenient_f64("1e999"), 0.0);
    }

    #[test]
    fn test_prefix_patterns_compile() {
        assert!(DECIMAL_PREFIX.is_match("-1.5e2"));
        assert!(INTEGER_PREFIX.is_match("+42"));
        assert!(!INTEGER_PREFIX.is_match("abc"));
    }

    #[test]
    fn test_lenient_int_parsing() {
        assert_eq!(parse_lenient_i64("15"), 15);
        assert_eq!(parse_lenient_i64("15.7"), 15);
        assert_eq!(parse_lenient_i64(" 7th"), 7);
        assert_eq!(parse_lenient_i64(""), 0);
        assert_eq!(parse_lenient_i64("x1"), 0);
    }

    #[test]
    fn test_set_fields() {
        let mut card = CardRecord::default();
        card.set(CardField::Nickname, "Sapphire").unwrap();
        card.set(CardField::Limit, "10000").unwrap();
        card.set(CardField::CurrentBalance, "2500").unwrap();
        card.set(CardField::StatementDate, "15").unwrap();
        card.set(CardField::DueDate, "5").unwrap();
        assert!(card.is_complete());
        assert_eq!(card.limit_value(), 10000.0);
        assert_eq!(card.statement_day(), 15);
    }

    #[test]
    fn test_util_target_snaps_into_slider_range() {
        let mut card = CardRecord::default();
        card.set(CardField::UtilTarget, "150").unwrap();
        assert_eq!(card.util_target, 100);
        card.set(CardField::UtilTarget, "0").unwrap();
        assert_eq!(card.util_target, 1);
        let err = card.set(CardField::UtilTarget, "ten").unwrap_err();
        assert_eq!(err, CardError::InvalidUtilTarget("ten".into()));
        assert_eq!(card.util_target, 1);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let card = CardRecord::new("Amex", "", "100", "", "5", 30);
        assert_eq!(
            card.missing_fields(),
            vec![CardField::Limit, CardField::StatementDate]
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!("currentBalance".parse::<CardField>().unwrap(), CardField::CurrentBalance);
        assert_eq!("statement-date".parse::<CardField>().unwrap(), CardField::StatementDate);
        assert_eq!("util_target".parse::<CardField>().unwrap(), CardField::UtilTarget);
        assert!("apr".parse::<CardField>().is_err());
    }

    #[test]
    fn test_json_layout_uses_form_keys() {
        let card = CardRecord::new("Chase", "10000", "2500", "15", "5", 30);
        let v = serde_json::to_value(&card).unwrap();
        assert_eq!(v["currentBalance"], "2500");
        assert_eq!(v["statementDate"], "15");
        assert_eq!(v["dueDate"], "5");
        assert_eq!(v["utilTarget"], 30);
        assert_eq!(v.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let card: CardRecord = serde_json::from_str(r#"{"nickname":"Discover"}"#).unwrap();
        assert_eq!(card.nickname, "Discover");
        assert_eq!(card.util_target, DEFAULT_UTIL_TARGET);
    }

    #[test]
    fn test_display_name_falls_back() {
        assert_eq!(CardRecord::default().display_name(), "Your Card");
    }
}
