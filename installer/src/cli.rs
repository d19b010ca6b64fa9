// File: installer/src/cli.rs
use anyhow::{bail, Result};

use crate::constants::defaults;

/// Command line options: `installer [--yes] [config path]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub assume_yes: bool,
    pub config_path: String,
}

impl CliOptions {
    /// Parses the arguments after the program name.
    ///
    /// Unknown flags are rejected instead of being taken as a config path.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self {
            assume_yes: false,
            config_path: defaults::CONFIG_PATH.to_string(),
        };
        let mut config_path_seen = false;

        for arg in args {
            match arg.as_str() {
                "--yes" | "-y" => options.assume_yes = true,
                flag if flag.starts_with('-') => {
                    bail!("Unknown option '{}'. Usage: installer [--yes] [config path]", flag)
                }
                _ if config_path_seen => bail!("Unexpected extra argument '{}'", arg),
                _ => {
                    options.config_path = arg;
                    config_path_seen = true;
                }
            }
        }

        Ok(options)
    }
}
