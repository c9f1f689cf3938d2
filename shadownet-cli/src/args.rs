//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shadownet")]
#[command(version, about = "Shadow an existing network interface", long_about = None)]
pub struct Cli {
    /// Underlying interface to shadow
    #[arg(short, long, default_value = "eth0")]
    pub link: String,

    /// Name prefix for the shadow interface
    #[arg(short = 'n', long, default_value = "virt")]
    pub ifname: String,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available network interfaces
    Interfaces,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["shadownet"]);
        assert_eq!(cli.link, "eth0");
        assert_eq!(cli.ifname, "virt");
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["shadownet", "--link", "wlan0", "-n", "shadow", "-vv"]);
        assert_eq!(cli.link, "wlan0");
        assert_eq!(cli.ifname, "shadow");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_interfaces_subcommand() {
        let cli = Cli::parse_from(["shadownet", "interfaces"]);
        assert!(matches!(cli.command, Some(Commands::Interfaces)));
    }
}
