//! Record processing pipeline.
//!
//! Records are handled strictly one at a time, each passing through:
//! 1. **Read**: stream the next `<record>` out of the export
//! 2. **Normalize**: trailing commas and repeated spaces
//! 3. **Rules**: the rule table from `marc-transform`
//! 4. **Validate**: call number lookup, identifier derivation, acceptance
//! 5. **Write**: serialize into the collection envelope and hand to the sink
//!
//! A missing call number or malformed XML aborts the run. A failed write is
//! recorded and the batch moves on to the next record.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, info_span, warn};

use marc_ingest::MarcXmlReader;
use marc_model::{Record, RecordFailure, RecordOutcome, RunReport};
use marc_output::{RecordSink, emit_record};
use marc_transform::{RuleEngine, TransformReport, normalize_record};
use marc_validate::{Acceptance, AcceptancePolicy, call_number, validate_record};

/// Everything a run needs besides the sink.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// MARCXML export to read.
    pub source: PathBuf,
    pub engine: RuleEngine,
    pub policy: AcceptancePolicy,
}

impl PipelineConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            engine: RuleEngine::new(),
            policy: AcceptancePolicy::new(),
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Open the configured export and process every record in it.
pub fn run_pipeline<S: RecordSink + ?Sized>(
    config: &PipelineConfig,
    sink: &mut S,
) -> Result<RunReport> {
    let reader = MarcXmlReader::from_path(&config.source)
        .with_context(|| format!("open {}", config.source.display()))?;
    run_records(reader, config, sink)
}

/// Process every record produced by `reader`.
pub fn run_records<R: BufRead, S: RecordSink + ?Sized>(
    reader: MarcXmlReader<R>,
    config: &PipelineConfig,
    sink: &mut S,
) -> Result<RunReport> {
    let span = info_span!("convert", source = %config.source.display());
    let _guard = span.enter();
    let started = Instant::now();
    let mut report = RunReport::new(&config.source);

    for (index, record) in reader.enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(source) => {
                error!(index, error = %source, "cannot read record");
                return Err(anyhow::Error::new(source)
                    .context(format!("read record {index} of {}", config.source.display())));
            }
        };
        let (outcome, transform) = process_record(index, record, config, sink)?;
        report.record(outcome, &transform.actions);
    }

    info!(
        read = report.records_read,
        written = report.written.len(),
        skipped = report.skipped_count(),
        failed = report.failures.len(),
        duration_ms = started.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(report)
}

/// Normalize, clean up, validate and write one record.
///
/// Returns an error only for conditions that stop the whole run.
pub fn process_record<S: RecordSink + ?Sized>(
    index: usize,
    mut record: Record,
    config: &PipelineConfig,
    sink: &mut S,
) -> Result<(RecordOutcome, TransformReport)> {
    let raw_call_number = call_number(&record).unwrap_or_default().to_string();
    let span = info_span!("record", index, call_number = %raw_call_number);
    let _guard = span.enter();

    normalize_record(&mut record);
    let transform = config.engine.apply(&mut record);
    if !transform.is_empty() {
        debug!(actions = transform.actions.len(), "rules applied");
    }

    let validation = match validate_record(&mut record, index, &config.policy) {
        Ok(validation) => validation,
        Err(source) => {
            error!(error = %source, "cannot derive output file name");
            return Err(source.into());
        }
    };
    let identifier = validation.identifier;

    let outcome = match validation.acceptance {
        Acceptance::Skip(reason) => RecordOutcome::Skipped { identifier, reason },
        Acceptance::Accept => match emit_record(sink, &identifier, &record) {
            Ok(path) => {
                info!(identifier = %identifier, path = %path.display(), "wrote record");
                RecordOutcome::Written { identifier, path }
            }
            Err(source) => {
                let message = format!("{source:#}");
                warn!(identifier = %identifier, error = %message, "record not written");
                RecordOutcome::Failed(RecordFailure {
                    index,
                    path: sink.location(&identifier),
                    identifier,
                    message,
                })
            }
        },
    };
    Ok((outcome, transform))
}
