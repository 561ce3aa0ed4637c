mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// blockbind - Apply block bindings to rendered block markup
#[derive(Parser)]
#[command(name = blockbind_lib::consts::APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, default_value = "text", global = true)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Render a block document, substituting bound attribute values
  Render {
    /// Path to the block document (JSON)
    document: PathBuf,

    /// Extra block type declarations (defaults to $BLOCKBIND_BLOCK_TYPES)
    #[arg(long)]
    block_types: Option<PathBuf>,

    /// Post meta served by the core/post-meta source (JSON)
    #[arg(long)]
    meta: Option<PathBuf>,
  },

  /// List registered binding sources
  Sources,

  /// Show which block attributes support bindings
  Blocks {
    /// Extra block type declarations (defaults to $BLOCKBIND_BLOCK_TYPES)
    #[arg(long)]
    block_types: Option<PathBuf>,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Render {
      document,
      block_types,
      meta,
    } => cmd::cmd_render(&document, block_types.as_deref(), meta.as_deref(), cli.format),
    Commands::Sources => cmd::cmd_sources(cli.format),
    Commands::Blocks { block_types } => cmd::cmd_blocks(block_types.as_deref(), cli.format),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
