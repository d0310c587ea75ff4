//! CLI argument definitions using clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::cli::error::{CliError, CliResult};
use crate::domain::Invocation;

/// Legacy two-letter short flag for `--localfs`.
const LEGACY_LOCALFS: &str = "-fs";

/// Thin front end for rclone: list configured remotes and clean local landing zones
#[derive(Parser, Debug, Default)]
#[command(name = "rcloneit")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Remove all files and directories from the landing zone
    #[arg(short, long)]
    pub clean: bool,

    /// Download from a remote (reserved)
    #[arg(short, long)]
    pub download: bool,

    /// List rclone remotes configured on this machine
    #[arg(short, long)]
    pub list: bool,

    /// Operate on a remote (reserved)
    #[arg(short, long)]
    pub remote: bool,

    /// Local filesystem directory to clean (also -fs)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub localfs: Option<PathBuf>,

    /// Print help
    #[arg(short, long)]
    pub help: bool,

    /// Print version
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Set when the program was started without any argument
    #[arg(skip)]
    pub no_args: bool,
}

impl Cli {
    /// Dispatch-relevant view of the parsed flags.
    pub fn invocation(&self) -> Invocation {
        Invocation {
            no_args: self.no_args,
            clean: self.clean,
            download: self.download,
            list: self.list,
            remote: self.remote,
            localfs: self.localfs.clone(),
            help: self.help,
            version: self.version,
        }
    }
}

/// Rewrite the legacy `-fs` spellings to `--localfs`.
///
/// Handles `-fs PATH`, `-fs=PATH` and `-fsPATH`. Arguments after `--` are
/// passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_separator {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                past_separator = true;
                return arg;
            }
            match s.strip_prefix(LEGACY_LOCALFS) {
                Some("") => OsString::from("--localfs"),
                Some(rest) => {
                    let value = rest.strip_prefix('=').unwrap_or(rest);
                    OsString::from(format!("--localfs={value}"))
                }
                None => arg,
            }
        })
        .collect()
}

/// Parse a full argv (program name first).
///
/// # Errors
/// `CliError::InvalidArgs` for anything clap rejects.
pub fn parse_args<I, T>(args: I) -> CliResult<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv = normalize_args(args);
    let no_args = argv.len() <= 1;
    let mut cli = Cli::try_parse_from(argv).map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    cli.no_args = no_args;
    Ok(cli)
}
