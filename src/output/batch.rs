//! Batch report rendering

use std::io::Write;

use serde_json::{json, Value};

use crate::batch::{BatchOutcome, BatchResult};
use crate::cli::OutputFormat;
use crate::error::{PdsError, Result};

fn outcome_payload(target: &str, outcome: &BatchOutcome) -> Value {
    match outcome {
        BatchOutcome::Success(detail) => json!({
            "target": target,
            "status": "ok",
            "detail": detail,
        }),
        BatchOutcome::Failure(error) => json!({
            "target": target,
            "status": "failed",
            "error": error,
        }),
        BatchOutcome::Skipped => json!({
            "target": target,
            "status": "skipped",
        }),
    }
}

/// Render the per-target outcomes of a batch run.
///
/// Same stream discipline as listings: structured formats put only the
/// outcome array on the primary sink, with the summary line on the side
/// sink; human formats put both on the primary sink.
pub fn render_batch_report(
    format: OutputFormat,
    targets: &[String],
    result: &BatchResult,
    primary: &mut dyn Write,
    side: &mut dyn Write,
) -> Result<()> {
    if targets.len() != result.outcomes.len() {
        return Err(PdsError::InvalidArgument(format!(
            "batch report mismatch: {} targets, {} outcomes",
            targets.len(),
            result.outcomes.len()
        )));
    }

    let summary = format!(
        "{} succeeded, {} failed, {} skipped",
        result.succeeded(),
        result.failed(),
        result.skipped()
    );

    if format.is_structured() {
        let payload: Vec<Value> = targets
            .iter()
            .zip(&result.outcomes)
            .map(|(target, outcome)| outcome_payload(target, outcome))
            .collect();
        let rendered = match format {
            OutputFormat::Yaml => serde_yml::to_string(&payload)
                .map_err(|e| PdsError::Io(format!("YAML serialization failed: {}", e)))?,
            _ => format!("{}\n", serde_json::to_string_pretty(&payload)?),
        };
        write!(primary, "{}", rendered)?;
        writeln!(side, "{}", summary)?;
    } else {
        for (target, outcome) in targets.iter().zip(&result.outcomes) {
            match outcome {
                BatchOutcome::Success(detail) => writeln!(primary, "ok      {} -> {}", target, detail)?,
                BatchOutcome::Failure(error) => writeln!(primary, "failed  {}: {}", target, error)?,
                BatchOutcome::Skipped => writeln!(primary, "skipped {}", target)?,
            }
        }
        writeln!(primary, "{}", summary)?;
    }
    Ok(())
}
