//! pdsctl - Main entry point

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

use pdsctl::pds::{resolve_credentials, resolve_pds_override};
use pdsctl::{
    run_create, run_delete, run_get, run_list, run_update, run_upload_blob, Cli, Command,
    IdentityResolver, PdsClient, Result,
};

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Errors stay off stdout so piped output remains parseable
            eprintln!("error: {}", e);
            1
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting pdsctl v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: repo={:?}, pds={:?}, log_level={}",
        cli.repo, cli.pds, cli.log_level
    );

    // Ctrl-C stops dispatching new batch work; in-flight requests finish
    let abort = Arc::new(AtomicBool::new(false));
    {
        let abort = abort.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                abort.store(true, Ordering::SeqCst);
            }
        });
    }

    let is_read = matches!(cli.command, Command::List(_) | Command::Get(_));
    let resolver = IdentityResolver::new();

    // Reads with --repo skip auth entirely; everything else logs in
    let (client, repo_did) = match (&cli.repo, is_read) {
        (Some(repo), true) => {
            let did = resolver.resolve_repo_to_did(repo).await?;
            let pds_url = match resolve_pds_override(cli.pds.as_deref()) {
                Some(url) => url,
                None => resolver.resolve_did_to_pds(&did).await?,
            };
            debug!("Unauthenticated read of {} via {}", did, pds_url);
            (PdsClient::new(pds_url), did)
        }
        _ => {
            let credentials = resolve_credentials(cli.handle.as_deref(), cli.password.as_deref())?;
            let pds_url = match resolve_pds_override(cli.pds.as_deref()) {
                Some(url) => url,
                None => resolver.discover_pds(&credentials.handle).await?,
            };
            let mut client = PdsClient::new(pds_url);
            let did = client.login(&credentials.handle, &credentials.password).await?;
            info!("Authenticated as {}", did);
            (client, did)
        }
    };

    match &cli.command {
        Command::List(args) => run_list(&client, &repo_did, args).await,
        Command::Get(args) => run_get(&client, &repo_did, args).await,
        Command::Create(args) => run_create(&client, args, &abort).await,
        Command::Update(args) => run_update(&client, &repo_did, args, &abort).await,
        Command::Delete(args) => run_delete(&client, &repo_did, args, &abort).await,
        Command::UploadBlob(args) => run_upload_blob(&client, args).await,
    }
}
