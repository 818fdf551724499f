use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Batch bit-depth normalizer for microscopy images
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter directive for the requested verbosity
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["depthnorm"]);
        assert_eq!(args.config, PathBuf::from("config.yaml"));
        assert_eq!(args.verbose, 0);
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_config_and_verbosity() {
        let args = Args::parse_from(["depthnorm", "--config", "run.json", "-vv"]);
        assert_eq!(args.config, PathBuf::from("run.json"));
        assert_eq!(args.log_level(), "trace");

        let args = Args::parse_from(["depthnorm", "-c", "x.yml", "-v"]);
        assert_eq!(args.config, PathBuf::from("x.yml"));
        assert_eq!(args.log_level(), "debug");
    }
}
