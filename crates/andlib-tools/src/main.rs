//! Andlib CLI - Android library module scaffolding

use andlib_core::tui::CreateArgs;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "andlib")]
#[command(about = "Scaffold an Android library module, optionally from a Cordova plugin")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Android library module
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Destination directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Library name (skips the name prompt)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Package name for the library (skips the package prompt)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Exclude default dependencies from the module build.gradle
    #[arg(long = "exclude-dependencies", alias = "deps")]
    pub exclude_dependencies: bool,

    /// Select a fork organization on a remote git host (github by default)
    #[arg(
        long = "git-fork",
        alias = "fork",
        num_args = 0..=1,
        default_missing_value = "github"
    )]
    pub git_fork: Option<String>,

    /// Remote API token; falls back to the GITREMOTE_TOKEN env var
    #[arg(long = "git-remote-token", alias = "token")]
    pub git_remote_token: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            name: args.name,
            package: args.package,
            git_fork: args.git_fork,
            git_remote_token: args.git_remote_token,
            exclude_dependencies: args.exclude_dependencies,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs::default(),
    };

    let result = andlib_core::run(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
