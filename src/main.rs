//! rp - inspect and normalize per-device remapping profiles.
//!
//! Provides both human-friendly and script-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use rp::cli::{Cli, Commands, CompletionsArgs, DocumentArgs};
use rp::config::{LoadPolicy, default_fn_function_keys, load_devices, read_document};
use rp::error::{Result, RpError};
use rp::logging::init_logging;
use rp::output::{self, CheckReport, Output, VersionInfo};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let out = output::for_cli(&cli);
    if let Err(e) = run(&cli, out.as_ref()) {
        out.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => cmd_check(args, out),
        Commands::Normalize(args) => cmd_normalize(args, out),
        Commands::Defaults => {
            out.document(&default_fn_function_keys().to_json());
            Ok(())
        }
        Commands::Version => {
            out.version(&version_info());
            Ok(())
        }
        Commands::Completions(args) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

const fn policy(args: &DocumentArgs) -> LoadPolicy {
    if args.skip_invalid {
        LoadPolicy::Skip
    } else {
        LoadPolicy::Abort
    }
}

fn cmd_check(args: &DocumentArgs, out: &dyn Output) -> Result<()> {
    let document = read_document(&args.file)?;
    let (devices, skipped) = load_devices(&document, policy(args))?;
    info!(devices = devices.len(), skipped = skipped.len(), "Checked document");

    let report = CheckReport::new(args.file.display().to_string(), &devices, skipped);
    out.check_report(&report);
    Ok(())
}

fn cmd_normalize(args: &DocumentArgs, out: &dyn Output) -> Result<()> {
    let document = read_document(&args.file)?;
    let (devices, skipped) = load_devices(&document, policy(args))?;
    out.skipped(&skipped);

    // Keep the input's shape: one object in, one object out.
    let normalized = if document.is_object() {
        devices
            .iter()
            .next()
            .map(rp::config::DeviceProfile::to_json)
            .ok_or_else(|| RpError::Other("Document produced no device".to_string()))?
    } else {
        devices.to_json()
    };
    debug!(devices = devices.len(), "Normalized document");

    out.document(&normalized);
    Ok(())
}

fn cmd_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "rp", &mut std::io::stdout());
}

fn version_info() -> VersionInfo {
    VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty(),
        build_timestamp: build_info::build_timestamp(),
        rustc: build_info::rustc_semver(),
        target: build_info::target(),
    }
}
