//! Command execution: turns a decided [`Action`] into output and an exit status

use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument, warn};

use crate::application::services::{CleanService, RemoteService};
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{decide, Action, EntryKind, RemoteName};
use crate::infrastructure::ServiceContainer;

const MISSING_TARGET: &str =
    "You must also enter a local filesystem directory to clean (--localfs)";

const REMOTES_HEADER: &str = "Found the following rclone remote endpoints on this machine:";

/// Width of the indent in front of each listed remote.
const LIST_INDENT: usize = 16;

/// Run the single action selected by `cli`.
///
/// # Errors
/// Returns a `CliError` whose `exit_code()` is the process status to use.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    if let Ok(toml) = container.settings.to_toml() {
        debug!("effective settings:\n{}", toml);
    }

    let remote = container.remote_service();
    let silent = cli.verbose == 0;
    let invocation = cli.invocation();

    let action = decide(&invocation, || {
        check_installed(&remote, remote.tool(), silent)
    });
    debug!("action: {:?}", action);

    match action {
        Action::Help => {
            print_help();
            Ok(())
        }
        Action::Clean { dir } => _clean(&container.clean_service(), &dir),
        Action::CleanMissingTarget => Err(CliError::Usage(missing_target_message(
            container.settings.landing_dir.as_deref(),
        ))),
        Action::ListRemotes => _list(&remote),
        Action::ToolMissing => Err(CliError::ToolMissing(remote.tool().to_string())),
        Action::Version => {
            output::info(&format!("\n{}\n", version_string()));
            Ok(())
        }
        Action::Unmatched => {
            warn!("no actionable flag in invocation: {:?}", invocation);
            Err(CliError::Unmatched)
        }
    }
}

/// Look up `program` on PATH, reporting a hit unless `silent`.
///
/// A miss is reported once, by the caller, through `CliError::ToolMissing`.
pub fn check_installed(service: &RemoteService, program: &str, silent: bool) -> bool {
    let installed = service.is_installed(program);
    if let Some(notice) = install_notice(program, installed, silent) {
        output::status(&notice);
    }
    installed
}

fn install_notice(program: &str, installed: bool, silent: bool) -> Option<String> {
    (installed && !silent).then(|| format!("Program {} is installed", program))
}

/// Warning for `--clean` without `--localfs`. A configured landing zone is only
/// suggested, never cleaned implicitly.
pub fn missing_target_message(landing_dir: Option<&Path>) -> String {
    match landing_dir {
        Some(dir) => format!("{} (e.g. --localfs {})", MISSING_TARGET, dir.display()),
        None => MISSING_TARGET.to_string(),
    }
}

#[instrument(skip(service))]
fn _clean(service: &CleanService, dir: &Path) -> CliResult<()> {
    debug!("clean: dir={}", dir.display());
    let report = service.clear_directory_with(dir, output::removed)?;

    if report.is_empty() {
        output::status(&format!("{} is already empty", dir.display()));
    } else {
        output::action(
            "Cleaned",
            &format!(
                "{} ({} directories, {} files)",
                dir.display(),
                report.count(EntryKind::Directory),
                report.count(EntryKind::File) + report.count(EntryKind::Symlink),
            ),
        );
    }
    Ok(())
}

#[instrument(skip(service))]
fn _list(service: &RemoteService) -> CliResult<()> {
    let remotes = service.list_remotes()?;
    if remotes.is_empty() {
        output::warning(&format!(
            "no remotes configured (run `{} config` to add one)",
            service.tool()
        ));
        return Ok(());
    }
    output::header(REMOTES_HEADER);
    output::info(&render_remote_list(&remotes));
    Ok(())
}

/// One line per remote, numbered from 1, each line newline-terminated.
pub fn render_remote_list(remotes: &[RemoteName]) -> String {
    remotes
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:indent$}{}:   {}\n", "", i + 1, name, indent = LIST_INDENT))
        .collect()
}

pub fn version_string() -> String {
    format!("{} version {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

pub fn print_help() {
    output::info(&help_text());
}

/// Print `err` the way the process boundary reports failures.
pub fn report_error(err: &CliError) {
    match err {
        // clap renders its own message including usage
        CliError::InvalidArgs(rendered) => eprint!("{}", rendered),
        _ if err.is_warning() => {
            output::warning(&format!("{}. Error code {}", err, err.exit_code()))
        }
        _ => output::error(&format!("{}. Error code {}", err, err.exit_code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_two_remotes_when_render_then_numbered_from_one() {
        let remotes = vec![RemoteName::from("gdrive:"), RemoteName::from("s3:")];

        let rendered = render_remote_list(&remotes);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{}1:   gdrive:", " ".repeat(16)));
        assert_eq!(lines[1], format!("{}2:   s3:", " ".repeat(16)));
    }

    #[test]
    fn given_missing_tool_when_install_notice_then_nothing_printed_even_verbose() {
        assert_eq!(install_notice("rclone", false, false), None);
        assert_eq!(install_notice("rclone", false, true), None);
    }

    #[test]
    fn given_found_tool_when_install_notice_then_only_when_verbose() {
        assert_eq!(
            install_notice("rclone", true, false).as_deref(),
            Some("Program rclone is installed")
        );
        assert_eq!(install_notice("rclone", true, true), None);
    }

    #[test]
    fn given_configured_landing_dir_when_missing_target_message_then_suggests_it() {
        let msg = missing_target_message(Some(Path::new("/srv/landing")));
        assert!(msg.contains("--localfs /srv/landing"));
        assert_eq!(missing_target_message(None), MISSING_TARGET);
    }

    #[test]
    fn given_no_remotes_when_render_then_empty() {
        assert_eq!(render_remote_list(&[]), "");
    }

    #[test]
    fn given_crate_when_version_string_then_contains_version_token() {
        assert!(version_string().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn given_cli_when_help_text_then_lists_every_flag() {
        let help = help_text();
        for flag in [
            "--clean", "--download", "--list", "--remote", "--localfs", "--help", "--version",
        ] {
            assert!(help.contains(flag), "help should mention {flag}");
        }
    }
}
