#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use zags::config::AppConfig;
use zags::models::DocumentType;
use zags::numbering::NumberGenerator;
use zags::print::{PrintJob, PrintSink};
use zags::state::AppState;

#[derive(Default)]
pub struct RecordingSink {
    jobs: Mutex<Vec<PrintJob>>,
}

impl PrintSink for RecordingSink {
    fn submit(&self, job: &PrintJob) -> Result<()> {
        let mut guard = self
            .jobs
            .lock()
            .map_err(|_| anyhow!("recording sink poisoned"))?;
        guard.push(job.clone());
        Ok(())
    }
}

impl RecordingSink {
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.jobs.lock().unwrap().clone()
    }
}

/// Sink standing in for a printer that is switched off.
pub struct FailingSink;

impl PrintSink for FailingSink {
    fn submit(&self, _job: &PrintJob) -> Result<()> {
        Err(anyhow!("printer offline"))
    }
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

pub struct TestApp {
    pub state: AppState,
    sink: Arc<RecordingSink>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let sink = Arc::new(RecordingSink::default());
        let state = AppState::new(config, sink.clone())
            .with_numbers(NumberGenerator::seeded(7))
            .with_clock(fixed_today);
        Self { state, sink }
    }

    pub fn sink(&self) -> Arc<RecordingSink> {
        self.sink.clone()
    }

    pub fn fill(&mut self, doc_type: DocumentType, fields: &[(&str, &str)]) -> Result<()> {
        for (key, value) in fields {
            self.state.set_field(doc_type, key, *value)?;
        }
        Ok(())
    }
}
