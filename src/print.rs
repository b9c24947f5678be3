use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::render::FormattedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintFormat {
    Text,
    Html,
}

impl PrintFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PrintFormat::Text => "txt",
            PrintFormat::Html => "html",
        }
    }

    pub fn encode(self, document: &FormattedDocument) -> String {
        match self {
            PrintFormat::Text => document.to_text(),
            PrintFormat::Html => document.to_html(),
        }
    }
}

impl FromStr for PrintFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(PrintFormat::Text),
            "html" => Ok(PrintFormat::Html),
            other => bail!("unsupported print format `{other}`"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStatus {
    Queued,
    Printed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PrintJob {
    pub id: Uuid,
    pub number: String,
    pub format: PrintFormat,
    pub body: String,
    pub status: PrintStatus,
    pub last_error: Option<String>,
}

pub trait PrintSink: Send + Sync + 'static {
    fn submit(&self, job: &PrintJob) -> Result<()>;
}

pub struct SpoolDirSink {
    dir: PathBuf,
}

impl SpoolDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create spool directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, job: &PrintJob) -> PathBuf {
        self.dir.join(format!(
            "{}-{}.{}",
            spool_file_stem(&job.number),
            job.id,
            job.format.extension()
        ))
    }
}

impl PrintSink for SpoolDirSink {
    fn submit(&self, job: &PrintJob) -> Result<()> {
        let path = self.path_for(job);
        fs::write(&path, job.body.as_bytes())
            .with_context(|| format!("failed to write print job to {}", path.display()))?;
        Ok(())
    }
}

pub struct StdoutSink;

impl PrintSink for StdoutSink {
    fn submit(&self, job: &PrintJob) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(job.body.as_bytes())
            .context("failed to write print job to stdout")?;
        handle.flush().context("failed to flush stdout")?;
        Ok(())
    }
}

/// Queue of print jobs delivered to a sink on [`PrintSpooler::flush`].
///
/// Submitting never reports sink failures back to the caller; they are
/// logged and kept on the job.
pub struct PrintSpooler {
    sink: Arc<dyn PrintSink>,
    format: PrintFormat,
    queue: VecDeque<PrintJob>,
    history: Vec<PrintJob>,
}

impl PrintSpooler {
    pub fn new(sink: Arc<dyn PrintSink>, format: PrintFormat) -> Self {
        Self {
            sink,
            format,
            queue: VecDeque::new(),
            history: Vec::new(),
        }
    }

    pub fn enqueue(&mut self, document: &FormattedDocument) -> Uuid {
        let job = PrintJob {
            id: Uuid::new_v4(),
            number: document.number.clone(),
            format: self.format,
            body: self.format.encode(document),
            status: PrintStatus::Queued,
            last_error: None,
        };
        info!(job_id = %job.id, number = %job.number, "print job queued");
        let id = job.id;
        self.queue.push_back(job);
        id
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn history(&self) -> &[PrintJob] {
        &self.history
    }

    pub fn job(&self, id: Uuid) -> Option<&PrintJob> {
        self.queue
            .iter()
            .chain(self.history.iter())
            .find(|job| job.id == id)
    }

    /// Delivers every queued job, returning how many reached the sink.
    pub fn flush(&mut self) -> usize {
        let mut printed = 0;
        let mut failed = 0;
        while let Some(mut job) = self.queue.pop_front() {
            match self.sink.submit(&job) {
                Ok(()) => {
                    job.status = PrintStatus::Printed;
                    printed += 1;
                    info!(job_id = %job.id, number = %job.number, "print job delivered");
                }
                Err(err) => {
                    let message = format!("{err:#}");
                    error!(job_id = %job.id, number = %job.number, error = %message, "print job failed");
                    job.status = PrintStatus::Failed;
                    job.last_error = Some(message);
                    failed += 1;
                }
            }
            self.history.push(job);
        }
        if failed > 0 {
            warn!(printed, failed, "some print jobs were not delivered");
        }
        printed
    }
}

fn spool_file_stem(number: &str) -> String {
    let stem: String = number
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem.to_string()
    }
}
