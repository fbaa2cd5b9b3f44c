use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mdag",
    about = "Content-addressed Merkle DAG builder",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a file or directory to the object store
    Add(AddArgs),
    /// Show the effective chunking configuration
    Config(ConfigArgs),
}

/// Chunking parameters shared by every subcommand.
#[derive(Args, Clone, Debug, Default)]
pub struct ChunkingArgs {
    /// TOML file with `chunk_size` and `max_fanout`
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Leaf chunk size in bytes (overrides the config file)
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Maximum links per list object (overrides the config file)
    #[arg(long)]
    pub fanout: Option<usize>,
}

#[derive(Args)]
pub struct AddArgs {
    /// File or directory to add
    pub path: PathBuf,
    /// Object store directory
    #[arg(short, long, default_value = ".mdag/objects")]
    pub store: PathBuf,
    #[command(flatten)]
    pub chunking: ChunkingArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub chunking: ChunkingArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_with_overrides() {
        let cli = Cli::try_parse_from([
            "mdag", "-vv", "add", "some/dir", "--store", "/tmp/objs", "--chunk-size", "1024",
            "--fanout", "8", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.path, PathBuf::from("some/dir"));
        assert_eq!(args.store, PathBuf::from("/tmp/objs"));
        assert_eq!(args.chunking.chunk_size, Some(1024));
        assert_eq!(args.chunking.fanout, Some(8));
        assert!(args.chunking.config.is_none());
    }

    #[test]
    fn add_defaults() {
        let cli = Cli::try_parse_from(["mdag", "add", "file.bin"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.format, OutputFormat::Text);
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.store, PathBuf::from(".mdag/objects"));
    }

    #[test]
    fn add_requires_a_path() {
        assert!(Cli::try_parse_from(["mdag", "add"]).is_err());
    }

    #[test]
    fn config_takes_a_file() {
        let cli = Cli::try_parse_from(["mdag", "config", "-c", "mdag.toml"]).unwrap();
        let Command::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert_eq!(args.chunking.config, Some(PathBuf::from("mdag.toml")));
    }
}
