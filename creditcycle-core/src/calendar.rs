//! Monthly day strip: which days fall in the pay-down window before the
//! statement closes, and which one needs attention today.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::CardRecord;

/// Number of slots in the strip, one per possible day of month.
pub const DAYS_IN_STRIP: usize = 31;

/// Days before the statement date that open the action window.
pub const ACTION_WINDOW_LEAD_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Safe,
    /// Inside the window before the statement date.
    Action,
    /// Today, inside the window, while over target.
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayLabel {
    Stmt,
    Due,
    Today,
}

impl DayLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayLabel::Stmt => "Stmt",
            DayLabel::Due => "Due",
            DayLabel::Today => "Today",
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// 1-31
    pub day: u32,
    pub status: DayStatus,
    pub is_today: bool,
    pub label: Option<DayLabel>,
}

impl DayEntry {
    pub fn is_action_window(&self) -> bool {
        self.status == DayStatus::Action
    }

    /// Hover text for the cell: its label, or "Day N".
    pub fn title(&self) -> String {
        match self.label {
            Some(label) => label.to_string(),
            None => format!("Day {}", self.day),
        }
    }
}

/// Inclusive day range of the action window, `None` when no statement day is set.
pub fn action_window(statement_day: i64) -> Option<(i64, i64)> {
    if statement_day == 0 {
        return None;
    }
    let start = statement_day.saturating_sub(ACTION_WINDOW_LEAD_DAYS).max(1);
    Some((start, statement_day))
}

/// Classify every day of the month for `record`.
///
/// `today` is the caller's day of month; nothing here reads the clock.
pub fn classify(record: &CardRecord, is_over_target: bool, today: u32) -> [DayEntry; DAYS_IN_STRIP] {
    let statement_day = record.statement_day();
    let due_day = record.due_day();
    let window = action_window(statement_day);

    std::array::from_fn(|i| {
        let day = i as u32 + 1;
        let d = day as i64;
        let is_today = day == today;

        let mut status = match window {
            Some((start, end)) if (start..=end).contains(&d) => DayStatus::Action,
            _ => DayStatus::Safe,
        };
        if is_today && status == DayStatus::Action && is_over_target {
            status = DayStatus::Critical;
        }

        // first match wins: Stmt, then Due, then Today
        let label = if d == statement_day {
            Some(DayLabel::Stmt)
        } else if d == due_day {
            Some(DayLabel::Due)
        } else if is_today {
            Some(DayLabel::Today)
        } else {
            None
        };

        DayEntry {
            day,
            status,
            is_today,
            label,
        }
    })
}
