//! creditcycle-core: utilization math, the monthly day strip, and card persistence

pub mod calendar;
pub mod card;
pub mod metrics;
pub mod session;
pub mod store;

pub use calendar::{classify, DayEntry, DayLabel, DayStatus, ACTION_WINDOW_LEAD_DAYS, DAYS_IN_STRIP};
pub use card::{
    parse_lenient_f64, parse_lenient_i64, CardError, CardField, CardRecord, DEFAULT_UTIL_TARGET,
    UTIL_TARGET_MAX, UTIL_TARGET_MIN,
};
pub use metrics::{derive, format_money, DerivedMetrics};
pub use session::{build_report, CardReport, CardSession, SessionError};
pub use store::{CardStore, JsonFileStore, MemoryStore, StoreError, STORAGE_KEY};
