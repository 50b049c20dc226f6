//! Command-line configuration for the demo binary

use std::path::PathBuf;

use crate::backend::minitel::{check_baud, DEFAULT_BAUD};
use crate::error::{Error, Result};

pub const USAGE: &str = "\
Minicurses demo - a login form on a character terminal

Usage: minicurses-demo [options]

Options:
  --backend <kind>     emulator | bordered | minitel | script (default: emulator)
  --device <path>      Serial device for the minitel backend
  --baud <n>           Line speed: 1200, 4800 or 9600 (default: 4800)
  --art <file>         ASCII art logo shown above the form
  --script <file>      JSON event script for the script backend
  --help, -h           Show this help

Log level is read from RUST_LOG (default: info).";

/// Which device the demo draws on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Emulator,
    /// Emulator with a frame drawn around the screen
    Bordered,
    Minitel,
    /// Headless replay of a JSON event script
    Script,
}

impl BackendKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "emulator" => Ok(BackendKind::Emulator),
            "bordered" => Ok(BackendKind::Bordered),
            "minitel" => Ok(BackendKind::Minitel),
            "script" => Ok(BackendKind::Script),
            other => Err(Error::Config(format!("unknown backend '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendKind,
    pub device: Option<PathBuf>,
    pub baud: u32,
    pub art: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            device: None,
            baud: DEFAULT_BAUD,
            art: None,
            script: None,
            help: false,
        }
    }
}

impl Config {
    /// Parse arguments, excluding the program name
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = Config::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--backend" => {
                    config.backend = BackendKind::parse(value(&args, i)?)?;
                    i += 2;
                }
                "--device" => {
                    config.device = Some(PathBuf::from(value(&args, i)?));
                    i += 2;
                }
                "--baud" => {
                    let raw = value(&args, i)?;
                    config.baud = raw
                        .parse()
                        .map_err(|_| Error::Config(format!("invalid baud rate '{}'", raw)))?;
                    i += 2;
                }
                "--art" => {
                    config.art = Some(PathBuf::from(value(&args, i)?));
                    i += 2;
                }
                "--script" => {
                    config.script = Some(PathBuf::from(value(&args, i)?));
                    i += 2;
                }
                "--help" | "-h" => {
                    config.help = true;
                    return Ok(config);
                }
                other => {
                    return Err(Error::Config(format!("unexpected argument '{}'", other)));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_baud(self.baud)?;
        match self.backend {
            BackendKind::Minitel if self.device.is_none() => {
                Err(Error::Config("--backend minitel requires --device".into()))
            }
            BackendKind::Script if self.script.is_none() => {
                Err(Error::Config("--backend script requires --script".into()))
            }
            _ => Ok(()),
        }
    }
}

fn value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(format!("{} requires a value", args[i])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend, BackendKind::Emulator);
        assert_eq!(config.baud, 4800);
    }

    #[test]
    fn test_minitel_options() {
        let config =
            Config::from_args(["--backend", "minitel", "--device", "/dev/ttyUSB0", "--baud", "1200"]).unwrap();
        assert_eq!(config.backend, BackendKind::Minitel);
        assert_eq!(config.device, Some(PathBuf::from("/dev/ttyUSB0")));
        assert_eq!(config.baud, 1200);
    }

    #[test]
    fn test_backend_requirements() {
        assert!(matches!(
            Config::from_args(["--backend", "minitel"]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_args(["--backend", "script"]),
            Err(Error::Config(_))
        ));
        let config = Config::from_args(["--backend", "SCRIPT", "--script", "demo.json"]).unwrap();
        assert_eq!(config.script, Some(PathBuf::from("demo.json")));
    }

    #[test]
    fn test_rejects_bad_input() {
        for args in [
            vec!["--baud", "2400"],
            vec!["--baud", "fast"],
            vec!["--backend", "vga"],
            vec!["--art"],
            vec!["extra"],
        ] {
            assert!(matches!(Config::from_args(args), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_help_short_circuits() {
        let config = Config::from_args(["--help", "--backend", "nonsense"]).unwrap();
        assert!(config.help);
    }
}
