//! Lead delivery
//!
//! A [`LeadSink`] is whatever receives a finished lead: a mail relay, a CRM
//! client, a queue. This crate ships two: [`LogSink`] writes the payload to
//! the log, [`MemorySink`] keeps it for inspection.

use crate::error::Result;
use crate::record::LeadRecord;

/// Receives validated lead records
pub trait LeadSink {
    /// Hand over one record
    ///
    /// Errors are reported back to the form, which stays editable.
    fn deliver(&mut self, record: &LeadRecord) -> Result<()>;
}

/// Logs each lead's JSON payload at `info`
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl LeadSink for LogSink {
    fn deliver(&mut self, record: &LeadRecord) -> Result<()> {
        let payload = record.to_payload()?;
        tracing::info!(%payload, "lead received");
        Ok(())
    }
}

/// Keeps every delivered record and its payload
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<LeadRecord>,
    payloads: Vec<serde_json::Value>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    /// Payloads exactly as a delivery endpoint would receive them
    pub fn payloads(&self) -> &[serde_json::Value] {
        &self.payloads
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.payloads.clear();
    }
}

impl LeadSink for MemorySink {
    fn deliver(&mut self, record: &LeadRecord) -> Result<()> {
        self.payloads.push(record.to_payload()?);
        self.records.push(record.clone());
        Ok(())
    }
}
