//! The in-memory card plus the store it is mirrored to.

use serde::Serialize;
use thiserror::Error;

use crate::calendar::{classify, DayEntry, DAYS_IN_STRIP};
use crate::card::{CardError, CardField, CardRecord};
use crate::metrics::{derive, DerivedMetrics};
use crate::store::{CardStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("card is incomplete, fill in: {}", field_list(.missing))]
    Incomplete { missing: Vec<CardField> },
}

fn field_list(fields: &[CardField]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

/// Everything the results view shows.
#[derive(Debug, Clone, Serialize)]
pub struct CardReport {
    pub record: CardRecord,
    pub metrics: DerivedMetrics,
    pub days: [DayEntry; DAYS_IN_STRIP],
}

/// Compute metrics and the day strip for `record` as of `today`.
pub fn build_report(record: &CardRecord, today: u32) -> CardReport {
    let metrics = derive(record);
    let days = classify(record, metrics.is_over_target, today);
    CardReport {
        record: record.clone(),
        metrics,
        days,
    }
}

/// Single writer over one card. Every mutation is written through to the store.
pub struct CardSession<S: CardStore> {
    store: S,
    record: CardRecord,
}

impl<S: CardStore> CardSession<S> {
    /// Load the last saved card, or start from defaults.
    pub fn open(store: S) -> Self {
        let record = store.load();
        Self { store, record }
    }

    pub fn record(&self) -> &CardRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one field edit and persist.
    pub fn set(&mut self, field: CardField, value: &str) -> Result<(), SessionError> {
        self.record.set(field, value)?;
        tracing::debug!(%field, "card field updated");
        self.store.save(&self.record)?;
        Ok(())
    }

    /// Replace the whole card and persist.
    pub fn replace(&mut self, record: CardRecord) -> Result<(), SessionError> {
        self.record = record;
        self.store.save(&self.record)?;
        Ok(())
    }

    /// Back to the default card, with the persisted slot removed.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.record = CardRecord::default();
        self.store.clear()?;
        tracing::debug!("card reset");
        Ok(())
    }

    /// Results for the current card, whether or not the form is complete.
    pub fn report(&self, today: u32) -> CardReport {
        build_report(&self.record, today)
    }

    /// The "Calculate" action: only runs once every required field is filled.
    pub fn calculate(&self, today: u32) -> Result<CardReport, SessionError> {
        let missing = self.record.missing_fields();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete { missing });
        }
        Ok(self.report(today))
    }
}
