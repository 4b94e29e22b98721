use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::fmt::format::FmtSpan;

use git_versioning::cli::orchestration::{run_resolve_workflow, ResolveWorkflowArgs, WorkflowResult};
use git_versioning::ui::{self, OutputFormat};

#[derive(clap::Parser)]
#[command(
    name = "git-versioning",
    version,
    about = "Derive a project version from git branches, tags and commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Directory inside the git repository")]
    dir: PathBuf,

    #[arg(short, long, default_value = "", help = "Group id of the versioned component")]
    group: String,

    #[arg(short, long, default_value = "", help = "Artifact id of the versioned component")]
    artifact: String,

    #[arg(long, help = "Version as declared in the build descriptor")]
    declared_version: String,

    #[arg(short, long, help = "Use this branch instead of the checked out one (empty: no branch)")]
    branch: Option<String>,

    #[arg(short, long, help = "Use this tag instead of the head tags (empty: no tags)")]
    tag: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NONE)
        .with_target(false)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        ui::display_warning(&format!("Unable to configure logging: {}", e));
    }

    let workflow_args = ResolveWorkflowArgs {
        config_path: args.config,
        dir: args.dir,
        group_id: args.group,
        artifact_id: args.artifact,
        declared_version: args.declared_version,
        branch: args.branch,
        tag: args.tag,
    };

    let result = match run_resolve_workflow(&workflow_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let WorkflowResult::Resolved(resolved) = &result {
        if args.debug {
            ui::display_status(&ui::format_summary(resolved));
        }
    }

    println!("{}", ui::render(&result, args.format)?);
    Ok(())
}
