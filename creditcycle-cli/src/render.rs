//! Plain-text views of the form and the results.

use creditcycle_core::{CardField, CardRecord, CardReport, DayEntry, DayStatus};

/// Cells per row of the day strip.
const STRIP_ROW: usize = 7;
const CELL_WIDTH: usize = 7;

pub fn render_form(record: &CardRecord) -> String {
    let mut s = String::new();
    for field in CardField::ALL {
        let value = match field {
            CardField::UtilTarget => format!("{}%", record.util_target),
            _ => record.get(field),
        };
        let shown = if value.is_empty() { "(empty)" } else { value.as_str() };
        s.push_str(&format!("{:<22} {}\n", format!("{}:", field.label()), shown));
    }

    let missing = record.missing_fields();
    if missing.is_empty() {
        s.push_str("\nReady: run `creditcycle calculate`\n");
    } else {
        let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        s.push_str(&format!("\nMissing: {}\n", names.join(", ")));
    }
    s
}

fn cell_text(entry: &DayEntry) -> String {
    let marker = match entry.status {
        DayStatus::Safe => "",
        DayStatus::Action => "*",
        DayStatus::Critical => "!",
    };
    if entry.is_today {
        format!("[{marker}{}]", entry.day)
    } else {
        format!("{marker}{}", entry.day)
    }
}

pub fn render_strip(days: &[DayEntry]) -> String {
    let mut s = String::new();
    for row in days.chunks(STRIP_ROW) {
        let labels: String = row
            .iter()
            .map(|d| format!("{:^w$}", d.label.map(|l| l.as_str()).unwrap_or(""), w = CELL_WIDTH))
            .collect();
        let cells: String = row
            .iter()
            .map(|d| format!("{:^w$}", cell_text(d), w = CELL_WIDTH))
            .collect();
        s.push_str(labels.trim_end());
        s.push('\n');
        s.push_str(cells.trim_end());
        s.push('\n');
    }
    s
}

pub fn render_report(report: &CardReport) -> String {
    let m = &report.metrics;
    let mut s = String::new();

    s.push_str(&format!(
        "{}  [{}]\n\n",
        report.record.display_name(),
        m.status_badge()
    ));
    s.push_str(&format!("{:<14} {}\n", "Current Util", m.util_display()));
    s.push_str(&format!("{:<14} {}%\n", "Target Util", report.record.util_target));
    s.push_str(&format!("{:<14} {}\n", "Target Bal", m.target_balance_display()));
    s.push_str(&format!("{:<14} {}\n", "Pay This", m.required_payment_display()));

    s.push_str("\nMonthly Cycle\n");
    s.push_str("legend: * pay-down window   ! pay today   [n] today\n\n");
    s.push_str(&render_strip(&report.days));

    s.push_str(
        "\nPro tip: pay down to your target balance 2-3 days before your statement date \
         for the best credit score impact.\n",
    );
    s
}
