//! Command definitions and shared plumbing for the `persona-browser` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod commands;

pub const DATA_ROOT_ENV: &str = "PERSONA_DATA_ROOT";
const DEFAULT_DATA_ROOT: &str = "out";

#[derive(Debug, Parser)]
#[command(
    name = "persona-browser",
    about = "Browse and render generated persona datasets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List personas with aggregate stats.
    Personas(PersonasArgs),
    /// Inspect a persona's note vault.
    Vault(VaultArgs),
    /// Enumerate every renderable route.
    Routes(RoutesArgs),
    /// Render the whole site to markdown files.
    Render(RenderArgs),
    /// List and filter MCP tool definitions.
    Tools(ToolsArgs),
    /// Cross-check generated store JSON against mock-server CSVs.
    Validate(ValidateArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Data root produced by the generator. Falls back to
    /// $PERSONA_DATA_ROOT, then `./out`.
    #[arg(long)]
    pub data_root: Option<PathBuf>,
    /// Emit a JSON payload instead of status lines.
    #[arg(long)]
    pub json: bool,
}

impl CommonArgs {
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(root) = self.data_root.as_ref() {
            return root.clone();
        }
        if let Some(env_root) = std::env::var_os(DATA_ROOT_ENV) {
            return PathBuf::from(env_root);
        }
        PathBuf::from(DEFAULT_DATA_ROOT)
    }
}

#[derive(Debug, Args)]
pub struct PersonasArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct VaultArgs {
    #[command(subcommand)]
    pub command: VaultCommands,
}

#[derive(Debug, Subcommand)]
pub enum VaultCommands {
    /// Scan a persona's vault and print its structure and note index.
    Scan(VaultScanArgs),
    /// Render one note: tags split off, wiki-links resolved.
    Note(VaultNoteArgs),
}

#[derive(Debug, Args)]
pub struct VaultScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Persona id owning the vault.
    #[arg(long)]
    pub persona: String,
}

#[derive(Debug, Args)]
pub struct VaultNoteArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Persona id owning the vault.
    #[arg(long)]
    pub persona: String,
    /// Note path relative to the vault, e.g. "Daily Notes/2026-01-30".
    pub note_path: String,
}

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Output directory for the rendered site.
    #[arg(long, default_value = "site")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Tool category directory under `tools/`.
    pub category: String,
    /// Substring filter over tool name, title, and description.
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Root of the mock-server tree holding `<store>/data/*.csv`.
    #[arg(long)]
    pub servers_root: PathBuf,
    /// Restrict the check to one persona (default: everyone in index.json).
    #[arg(long)]
    pub persona: Option<String>,
}

pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Personas(args) => commands::personas::run(args),
        Commands::Vault(args) => match args.command {
            VaultCommands::Scan(scan) => commands::vault::run_scan(scan),
            VaultCommands::Note(note) => commands::vault::run_note(note),
        },
        Commands::Routes(args) => commands::routes::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Tools(args) => commands::tools::run(args),
        Commands::Validate(args) => commands::validate::run(args),
    }
}
