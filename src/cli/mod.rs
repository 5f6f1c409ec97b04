//! Command line interface

pub mod serve;

use clap::{Parser, Subcommand};

/// Proteus - account lifecycle, sessions and AI-assisted test conversion
#[derive(Parser)]
#[command(name = "proteus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["proteus", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["proteus", "ui"]).is_err());
    }
}
