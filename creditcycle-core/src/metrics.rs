//! Utilization metrics derived from a card record.

use serde::{Deserialize, Serialize};

use crate::card::CardRecord;

/// Numbers recomputed from a [`CardRecord`] on every change. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Parsed credit limit.
    pub limit: f64,
    /// Parsed current balance.
    pub balance: f64,
    /// balance / limit * 100, or 0 when the limit is not positive.
    pub current_util_pct: f64,
    /// Balance that would sit exactly on the target utilization.
    pub target_balance: f64,
    /// Payment needed to get down to `target_balance`, never negative.
    pub required_payment: f64,
    /// Unrounded utilization strictly above the target percent.
    pub is_over_target: bool,
}

impl DerivedMetrics {
    /// Utilization as shown to the user, one decimal place.
    pub fn util_display(&self) -> String {
        format!("{:.1}%", self.current_util_pct)
    }

    pub fn target_balance_display(&self) -> String {
        format_money(self.target_balance)
    }

    pub fn required_payment_display(&self) -> String {
        format_money(self.required_payment)
    }

    pub fn status_badge(&self) -> &'static str {
        if self.is_over_target {
            "Over Target"
        } else {
            "On Track"
        }
    }
}

pub fn derive(record: &CardRecord) -> DerivedMetrics {
    let limit = record.limit_value();
    let balance = record.balance_value();
    let target_pct = record.util_target as f64 / 100.0;

    let current_util_pct = if limit > 0.0 {
        (balance / limit) * 100.0
    } else {
        0.0
    };
    let target_balance = limit * target_pct;
    let required_payment = (balance - target_balance).max(0.0);

    DerivedMetrics {
        limit,
        balance,
        current_util_pct,
        target_balance,
        required_payment,
        // Compared before rounding: 30.04% shows as "30.0%" yet counts as over 30.
        is_over_target: current_util_pct > record.util_target as f64,
    }
}

/// Rounded to cents, grouped by thousands, trailing zero cents dropped:
/// "$12,345.67", "$2,500.5", "$3,000".
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = match frac {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{f:02}"),
    };
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(limit: &str, balance: &str, target: u32) -> CardRecord {
        CardRecord::new("Test", limit, balance, "15", "5", target)
    }

    #[test]
    fn test_basic_derivation() {
        let m = derive(&card("10000", "2500", 30));
        assert_eq!(m.current_util_pct, 25.0);
        assert_eq!(m.target_balance, 3000.0);
        assert_eq!(m.required_payment, 0.0);
        assert!(!m.is_over_target);
        assert_eq!(m.status_badge(), "On Track");
        assert_eq!(m.target_balance_display(), "$3,000");
        assert_eq!(m.required_payment_display(), "$0");
    }

    #[test]
    fn test_over_target_requires_payment() {
        let m = derive(&card("4000", "3000", 30));
        assert_eq!(m.current_util_pct, 75.0);
        assert_eq!(m.target_balance, 1200.0);
        assert_eq!(m.required_payment, 1800.0);
        assert!(m.is_over_target);
        assert_eq!(m.status_badge(), "Over Target");
    }

    #[test]
    fn test_zero_limit_has_zero_utilization() {
        for balance in ["0", "1", "2500", "999999"] {
            let m = derive(&card("0", balance, 30));
            assert_eq!(m.current_util_pct, 0.0);
            assert!(!m.is_over_target);
        }
        let m = derive(&card("", "100", 30));
        assert_eq!(m.current_util_pct, 0.0);
        assert_eq!(m.required_payment, 100.0);
    }

    #[test]
    fn test_negative_limit_treated_as_no_limit() {
        let m = derive(&card("-100", "50", 30));
        assert_eq!(m.current_util_pct, 0.0);
        assert_eq!(m.required_payment, 80.0);
    }

    #[test]
    fn test_unrounded_over_target_comparison() {
        // 30.04% displays as 30.0% but is over a 30% target
        let m = derive(&card("10000", "3004", 30));
        assert_eq!(m.util_display(), "30.0%");
        assert!(m.is_over_target);

        // exactly on target is not over
        let m = derive(&card("10000", "2500", 25));
        assert_eq!(m.util_display(), "25.0%");
        assert!(!m.is_over_target);
    }

    #[test]
    fn test_degenerate_record_yields_zeros() {
        let m = derive(&CardRecord::default());
        assert_eq!(m.limit, 0.0);
        assert_eq!(m.balance, 0.0);
        assert_eq!(m.current_util_pct, 0.0);
        assert_eq!(m.target_balance, 0.0);
        assert_eq!(m.required_payment, 0.0);
        assert!(!m.is_over_target);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(3000.0), "$3,000");
        assert_eq!(format_money(2500.5), "$2,500.5");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(999.999), "$1,000");
        assert_eq!(format_money(0.07), "$0.07");
        assert_eq!(format_money(-40.0), "-$40");
    }
}
