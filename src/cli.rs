//! Command-line parsing.
//!
//! Free-text arguments are the message. A handful of flags used by common
//! notification senders are accepted and ignored so that `notistack` can be
//! dropped in where one of them is expected.

use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "Usage: notistack [-t SECS | -e MS] [-u low|normal|critical] [--config PATH] BODY...";

/// Flags taken for compatibility; each consumes one value that is discarded.
const IGNORED_FLAGS: [[&str; 2]; 4] = [
    ["-a", "--app-name"],
    ["-i", "--icon"],
    ["-c", "--category"],
    ["-h", "--hint"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "0" => Ok(Urgency::Low),
            "normal" | "1" => Ok(Urgency::Normal),
            "critical" | "2" => Ok(Urgency::Critical),
            other => Err(format!("unknown urgency {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Message tokens, each wrapped on its own.
    pub message: Vec<String>,
    /// Display duration from the command line; `None` keeps the configured one.
    pub duration: Option<u32>,
    pub config_path: Option<PathBuf>,
}

impl Options {
    /// Duration to use given the configured default.
    pub fn duration_or(&self, configured: u32) -> u32 {
        self.duration.unwrap_or(configured)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(Options),
    Version,
}

/// Milliseconds to whole seconds, rounded to nearest, never below one.
pub fn millis_to_secs(ms: u64) -> u32 {
    let secs = ms.saturating_add(500) / 1000;
    u32::try_from(secs).unwrap_or(u32::MAX).max(1)
}

fn to_path(s: &OsStr) -> std::result::Result<PathBuf, &'static str> {
    Ok(PathBuf::from(s))
}

fn usage_error(e: pico_args::Error) -> Error {
    Error::Usage(format!("{}\n{}", e, USAGE))
}

/// Parse arguments (without the program name).
pub fn parse(args: Vec<OsString>) -> Result<Command> {
    let mut args = pico_args::Arguments::from_vec(args);

    if args.contains(["-v", "--version"]) {
        return Ok(Command::Version);
    }

    let timeout: Option<u32> = args
        .opt_value_from_str(["-t", "--timeout"])
        .map_err(usage_error)?;
    let expire_ms: Option<u64> = args
        .opt_value_from_str(["-e", "--expire-time"])
        .map_err(usage_error)?;
    let urgency: Option<Urgency> = args
        .opt_value_from_str(["-u", "--urgency"])
        .map_err(usage_error)?;
    let config_path = args
        .opt_value_from_os_str("--config", to_path)
        .map_err(usage_error)?;

    for keys in IGNORED_FLAGS {
        while args
            .opt_value_from_str::<_, String>(keys)
            .map_err(usage_error)?
            .is_some()
        {}
    }

    let message: Vec<String> = args
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .filter(|arg| !(arg.starts_with("--") && arg.contains('=')))
        .collect();

    if message.is_empty() {
        return Err(Error::Usage(USAGE.to_string()));
    }

    let duration = match (urgency, expire_ms, timeout) {
        (Some(Urgency::Critical), _, _) => Some(0),
        (_, Some(ms), _) => Some(millis_to_secs(ms)),
        (_, None, Some(secs)) => Some(secs),
        (_, None, None) => None,
    };

    Ok(Command::Show(Options {
        message,
        duration,
        config_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Command> {
        parse(args.iter().map(OsString::from).collect())
    }

    fn options(args: &[&str]) -> Options {
        match parse_strs(args).expect("arguments should parse") {
            Command::Show(options) => options,
            Command::Version => panic!("unexpected version command"),
        }
    }

    #[test]
    fn message_tokens_are_kept_in_order() {
        let opts = options(&["hello", "big world"]);
        assert_eq!(opts.message, vec!["hello", "big world"]);
        assert_eq!(opts.duration, None);
        assert_eq!(opts.duration_or(5), 5);
    }

    #[test]
    fn no_message_is_a_usage_error() {
        assert!(matches!(parse_strs(&[]), Err(Error::Usage(_))));
        assert!(matches!(parse_strs(&["-t", "3"]), Err(Error::Usage(_))));
    }

    #[test]
    fn version_wins_over_everything() {
        assert_eq!(parse_strs(&["--version"]).unwrap(), Command::Version);
        assert_eq!(parse_strs(&["-v", "body"]).unwrap(), Command::Version);
    }

    #[test]
    fn timeout_in_seconds() {
        assert_eq!(options(&["-t", "0", "x"]).duration, Some(0));
        assert_eq!(options(&["--timeout", "12", "x"]).duration, Some(12));
    }

    #[test]
    fn expire_time_rounds_milliseconds() {
        assert_eq!(options(&["-e", "2500", "x"]).duration, Some(3));
        assert_eq!(options(&["-e", "2499", "x"]).duration, Some(2));
        assert_eq!(options(&["-e", "100", "x"]).duration, Some(1));
        assert_eq!(millis_to_secs(0), 1);
    }

    #[test]
    fn critical_urgency_never_expires() {
        assert_eq!(options(&["-u", "critical", "-t", "4", "x"]).duration, Some(0));
        assert_eq!(options(&["-u", "low", "-t", "4", "x"]).duration, Some(4));
        assert!(parse_strs(&["-u", "panic", "x"]).is_err());
    }

    #[test]
    fn compatibility_flags_are_swallowed() {
        let opts = options(&[
            "-a", "mail", "-i", "icon.png", "--hint", "int:x:1", "-h", "string:y:2",
            "--category=email", "--transient=true", "body",
        ]);
        assert_eq!(opts.message, vec!["body"]);
    }

    #[test]
    fn config_path_is_taken() {
        let opts = options(&["--config", "/tmp/n.toml", "x"]);
        assert_eq!(opts.config_path, Some(PathBuf::from("/tmp/n.toml")));
    }
}
