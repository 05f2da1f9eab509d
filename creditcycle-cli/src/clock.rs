//! Resolve "today" from the wall clock. Only the binary reads the clock;
//! the classifier takes the day as a plain argument.

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, Utc};
use chrono_tz::Tz;

/// Day of month for `now_utc`, in `tz` when given, else system local time.
pub fn day_of_month(now_utc: DateTime<Utc>, tz: Option<&str>) -> Result<u32> {
    match tz {
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))?;
            Ok(now_utc.with_timezone(&tz).day())
        }
        None => Ok(now_utc.with_timezone(&Local).day()),
    }
}
