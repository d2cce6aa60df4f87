//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use waterclock_config::Config;

/// A clock face of pixel digits that slowly fill with dripping liquid.
#[derive(Debug, Default, Parser)]
#[command(name = "waterclock", version, about)]
pub struct Cli {
    /// Simulated seconds per real second.
    #[arg(short, long)]
    pub acceleration: Option<u32>,
    /// Seed for the liquid's random choices.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Frames per second at normal speed.
    #[arg(long)]
    pub fps: Option<u32>,
    /// Read configuration from this file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Do not keep droplet colours on screen after they move.
    #[arg(long)]
    pub no_trail: bool,
}

impl Cli {
    /// Override configuration values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(acceleration) = self.acceleration {
            config.acceleration = acceleration;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_trail {
            config.trail = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["waterclock", "-a", "60", "--seed", "7", "--no-trail"]);
        assert_eq!(cli.acceleration, Some(60));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.no_trail);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_apply_overrides_only_given_values() {
        let mut config = Config {
            seed: Some(1),
            ..Config::default()
        };
        let cli = Cli {
            fps: Some(10),
            ..Cli::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.fps, 10);
        assert_eq!(config.acceleration, 1);
        assert_eq!(config.seed, Some(1));
        assert!(config.trail);
    }
}
