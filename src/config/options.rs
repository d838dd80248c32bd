//! Command-line options.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Options resolved from the process arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "server-manager")]
#[command(about = "Game server management service", long_about = None)]
pub struct ProcessOptions {
    /// Path to the game server installation.
    #[arg(short = 's', long = "serverdir")]
    pub server_dir: PathBuf,

    /// Port for the administrative web panel.
    #[arg(short = 'w', long = "webport", default_value_t = 8080)]
    pub web_port: u16,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Disable logging entirely.
    #[arg(short = 'n', long = "nologs")]
    pub no_logs: bool,
}

impl ProcessOptions {
    /// Parse options from an argument list (first item is the program name).
    pub fn load<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let opts = ProcessOptions::load([
            "server-manager",
            "--serverdir",
            "/srv/dayz",
            "--webport",
            "9090",
            "--debug",
        ])
        .unwrap();
        assert_eq!(opts.server_dir, PathBuf::from("/srv/dayz"));
        assert_eq!(opts.web_port, 9090);
        assert!(opts.debug);
        assert!(!opts.no_logs);
    }

    #[test]
    fn test_defaults() {
        let opts = ProcessOptions::load(["server-manager", "-s", "/srv/dayz", "-n"]).unwrap();
        assert_eq!(opts.web_port, 8080);
        assert!(opts.no_logs);
    }

    #[test]
    fn test_missing_server_dir_is_rejected() {
        assert!(ProcessOptions::load(["server-manager", "--webport", "80"]).is_err());
    }

    #[test]
    fn test_bad_port_is_rejected() {
        assert!(ProcessOptions::load(["server-manager", "-s", "/srv", "-w", "99999"]).is_err());
        assert!(ProcessOptions::load(["server-manager", "-s", "/srv", "-w", "web"]).is_err());
    }
}
