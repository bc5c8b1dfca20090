//! Record subcommand implementations
//!
//! Each `run_*` returns the process exit code: 0 only on full success, so
//! partial batch failures are visible to shell pipelines.

use std::io::{self, Write};
use std::sync::atomic::AtomicBool;

use log::info;
use serde_json::{Map, Value};

use crate::batch::run_batch;
use crate::cli::{
    parse_field_args, read_records_from_stdin, read_updates_from_stdin, read_uris_from_stdin,
    CreateArgs, DeleteArgs, GetArgs, ListArgs, OutputFormat, UpdateArgs, UploadBlobArgs,
};
use crate::config::api;
use crate::error::{PdsError, Result};
use crate::output::{render_batch_report, render_listing, render_record};
use crate::pds::uri::AtUri;
use crate::pds::PdsClient;
use crate::ui::{clear_spinner, confirm_deletion, create_progress, create_spinner};

use super::pager::list_collection;

/// List records in a collection, walking pages up to `--limit`
pub async fn run_list(client: &PdsClient, repo: &str, args: &ListArgs) -> Result<i32> {
    let page_size = args.limit.min(api::MAX_PAGE_SIZE);
    let spinner = create_spinner(&format!("fetching {}...", args.collection));
    let walk = list_collection(
        client,
        repo,
        &args.collection,
        page_size,
        args.cursor.as_deref(),
        Some(args.limit),
    )
    .await;
    clear_spinner(spinner);

    let (records, continuation) = walk?;
    info!("Fetched {} record(s) from {}", records.len(), args.collection);

    render_listing(
        args.output,
        &args.collection,
        &records,
        &continuation,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(0)
}

/// Fetch and display a single record
pub async fn run_get(client: &PdsClient, repo: &str, args: &GetArgs) -> Result<i32> {
    let uri = AtUri::parse(&args.uri, Some(repo))?;
    let record = client.get_record(&uri).await?;
    render_record(
        args.output,
        &record,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(0)
}

fn write_success(action: &str, uri: &str, cid: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{} {}", action, uri)?;
    writeln!(out, "  cid: {}", cid)?;
    Ok(())
}

/// Create one record from key=value args, or many from JSONL on stdin
pub async fn run_create(client: &PdsClient, args: &CreateArgs, abort: &AtomicBool) -> Result<i32> {
    if !args.fields.is_empty() {
        let record = parse_field_args(&args.fields)?;
        let response = client.create_record(&args.collection, record).await?;
        write_success("created", &response.uri, &response.cid)?;
        return Ok(0);
    }

    let records = read_records_from_stdin()?;
    if records.is_empty() {
        return Err(PdsError::InvalidArgument(
            "no record fields given and no records on stdin".to_string(),
        ));
    }
    if let [record] = records.as_slice() {
        let response = client.create_record(&args.collection, record.clone()).await?;
        write_success("created", &response.uri, &response.cid)?;
        return Ok(0);
    }

    let labels: Vec<String> = (1..=records.len()).map(|i| format!("record {}", i)).collect();
    let progress = create_progress(records.len() as u64, &format!("creating in {}", args.collection));
    let result = run_batch(
        records,
        args.concurrency,
        args.fail_fast,
        abort,
        progress.as_ref(),
        |record| async move { client.create_record(&args.collection, record).await.map(|r| r.uri) },
    )
    .await;
    clear_spinner(progress);

    let result = result?;
    render_batch_report(
        OutputFormat::Compact,
        &labels,
        &result,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(if result.is_full_success() { 0 } else { 1 })
}

/// Update one record from key=value args, or many from JSONL on stdin
pub async fn run_update(
    client: &PdsClient,
    repo: &str,
    args: &UpdateArgs,
    abort: &AtomicBool,
) -> Result<i32> {
    let updates: Vec<(AtUri, Map<String, Value>)> = match &args.uri {
        Some(uri) => {
            if args.fields.is_empty() {
                return Err(PdsError::InvalidArgument(
                    "update needs at least one key=value field".to_string(),
                ));
            }
            vec![(AtUri::parse(uri, Some(repo))?, parse_field_args(&args.fields)?)]
        }
        None => {
            let lines = read_updates_from_stdin()?;
            if lines.is_empty() {
                return Err(PdsError::InvalidArgument(
                    "no URI given and no updates on stdin".to_string(),
                ));
            }
            // Bad URIs fail the whole batch before any network work
            lines
                .into_iter()
                .map(|(uri, fields)| Ok((AtUri::parse(&uri, Some(repo))?, fields)))
                .collect::<Result<Vec<_>>>()?
        }
    };

    if let [(uri, fields)] = updates.as_slice() {
        let response = client.update_record(uri, fields.clone()).await?;
        write_success("updated", &response.uri, &response.cid)?;
        return Ok(0);
    }

    let labels: Vec<String> = updates.iter().map(|(uri, _)| uri.to_string()).collect();
    let progress = create_progress(updates.len() as u64, "updating");
    let result = run_batch(
        updates,
        args.concurrency,
        args.fail_fast,
        abort,
        progress.as_ref(),
        |(uri, fields)| async move { client.update_record(&uri, fields).await.map(|r| r.uri) },
    )
    .await;
    clear_spinner(progress);

    let result = result?;
    render_batch_report(
        OutputFormat::Compact,
        &labels,
        &result,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(if result.is_full_success() { 0 } else { 1 })
}

/// Delete records given as args or piped one-per-line on stdin
pub async fn run_delete(
    client: &PdsClient,
    repo: &str,
    args: &DeleteArgs,
    abort: &AtomicBool,
) -> Result<i32> {
    let raw_uris = if args.uris.is_empty() {
        read_uris_from_stdin()?
    } else {
        args.uris.clone()
    };
    if raw_uris.is_empty() {
        return Err(PdsError::InvalidArgument(
            "no URIs given and none on stdin".to_string(),
        ));
    }

    let targets: Vec<AtUri> = raw_uris
        .iter()
        .map(|uri| AtUri::parse(uri, Some(repo)))
        .collect::<Result<Vec<_>>>()?;

    if let [uri] = targets.as_slice() {
        client.delete_record(uri).await?;
        writeln!(io::stdout().lock(), "deleted {}", uri)?;
        return Ok(0);
    }

    if !confirm_deletion(targets.len(), args.yes) {
        writeln!(io::stderr().lock(), "aborted")?;
        return Ok(1);
    }

    let labels: Vec<String> = targets.iter().map(|uri| uri.to_string()).collect();
    let progress = create_progress(targets.len() as u64, "deleting");
    let result = run_batch(
        targets,
        args.concurrency,
        args.fail_fast,
        abort,
        progress.as_ref(),
        |uri| async move { client.delete_record(&uri).await.map(|_| "deleted".to_string()) },
    )
    .await;
    clear_spinner(progress);

    let result = result?;
    render_batch_report(
        OutputFormat::Compact,
        &labels,
        &result,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(if result.is_full_success() { 0 } else { 1 })
}

/// Upload a blob and print its reference JSON for reuse in records
pub async fn run_upload_blob(client: &PdsClient, args: &UploadBlobArgs) -> Result<i32> {
    let data = std::fs::read(&args.file_path)
        .map_err(|e| PdsError::Io(format!("cannot read {}: {}", args.file_path.display(), e)))?;
    info!("Uploading {} bytes", data.len());

    let spinner = create_spinner("uploading blob...");
    let response = client.upload_blob(data).await;
    clear_spinner(spinner);

    let response = response?;
    let reference = serde_json::to_string_pretty(&response.reference())?;
    writeln!(io::stdout().lock(), "{}", reference)?;
    Ok(0)
}
