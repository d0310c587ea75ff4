//! End-to-end tests for argument parsing + command execution
//!
//! The external tool is replaced by a mock runner; the filesystem is real.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Output;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use rcloneit::cli::commands::execute_command;
use rcloneit::cli::{parse_args, CliError, CliResult};
use rcloneit::config::Settings;
use rcloneit::exitcode;
use rcloneit::infrastructure::traits::{CommandRunner, RealFileSystem};
use rcloneit::infrastructure::ServiceContainer;
use rcloneit::util::testing::{exit_status, init_test_setup};

/// Runner standing in for rclone: counts lookups and runs.
struct FakeRclone {
    installed: bool,
    lookups: AtomicUsize,
    runs: AtomicUsize,
}

impl FakeRclone {
    fn new(installed: bool) -> Arc<Self> {
        Arc::new(Self {
            installed,
            lookups: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
        })
    }
}

impl CommandRunner for FakeRclone {
    fn run(&self, _cmd: &str, args: &[&str], _timeout: Duration) -> io::Result<Output> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        assert_eq!(args, ["listremotes"]);
        Ok(Output {
            status: exit_status(0),
            stdout: b"gdrive:\ns3-archive:\n".to_vec(),
            stderr: Vec::new(),
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.installed
            .then(|| PathBuf::from("/usr/local/bin").join(program))
    }
}

fn run(argv: &[&str], rclone: Arc<FakeRclone>, settings: Settings) -> CliResult<()> {
    init_test_setup();
    let cli = parse_args(argv.iter().copied())?;
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), rclone);
    execute_command(&cli, &container)
}

fn populated_landing_zone() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("album/raw")).unwrap();
    fs::write(temp.path().join("album/raw/a.cr2"), "raw").unwrap();
    fs::write(temp.path().join("notes.txt"), "notes").unwrap();
    temp
}

fn entry_count(temp: &TempDir) -> usize {
    fs::read_dir(temp.path()).unwrap().count()
}

// ============================================================
// help / version / fallback
// ============================================================

#[test]
fn given_no_arguments_when_execute_then_help_and_success() {
    let rclone = FakeRclone::new(true);

    let result = run(&["rcloneit"], rclone.clone(), Settings::default());

    assert!(result.is_ok());
    assert_eq!(rclone.lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn given_help_flag_when_execute_then_success() {
    let result = run(&["rcloneit", "--help"], FakeRclone::new(true), Settings::default());
    assert!(result.is_ok());
}

#[test]
fn given_version_flag_when_execute_then_success() {
    let result = run(&["rcloneit", "--version"], FakeRclone::new(false), Settings::default());
    assert!(result.is_ok());
}

#[test]
fn given_only_reserved_flags_when_execute_then_misc_error() {
    // Arrange
    let rclone = FakeRclone::new(true);

    // Act
    let err = run(&["rcloneit", "-d", "-r"], rclone.clone(), Settings::default()).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::Unmatched));
    assert_eq!(err.exit_code(), exitcode::MISC);
    assert_eq!(rclone.runs.load(Ordering::SeqCst), 0);
}

#[test]
fn given_malformed_arguments_when_parse_then_usage_exit_code() {
    let err = run(&["rcloneit", "--nope"], FakeRclone::new(true), Settings::default()).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

// ============================================================
// clean
// ============================================================

#[test]
fn given_clean_with_localfs_when_execute_then_landing_zone_emptied() {
    // Arrange
    let landing = populated_landing_zone();
    let path = landing.path().to_str().unwrap().to_string();

    // Act
    let result = run(
        &["rcloneit", "--clean", "-fs", path.as_str()],
        FakeRclone::new(true),
        Settings::default(),
    );

    // Assert
    assert!(result.is_ok(), "{result:?}");
    assert!(landing.path().is_dir());
    assert_eq!(entry_count(&landing), 0);
}

#[test]
fn given_clean_without_localfs_when_execute_then_warns_and_deletes_nothing() {
    // Arrange
    let landing = populated_landing_zone();
    let before = entry_count(&landing);

    // Act
    let err = run(&["rcloneit", "-c"], FakeRclone::new(true), Settings::default()).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::Usage(_)));
    assert!(err.is_warning());
    assert!(err.to_string().contains("--localfs"));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(entry_count(&landing), before);
}

#[test]
fn given_clean_without_localfs_and_configured_landing_dir_when_execute_then_deletes_nothing() {
    // Arrange
    let landing = populated_landing_zone();
    let before = entry_count(&landing);
    let settings = Settings {
        landing_dir: Some(landing.path().to_path_buf()),
        ..Settings::default()
    };

    // Act
    let err = run(&["rcloneit", "-c"], FakeRclone::new(true), settings).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(entry_count(&landing), before);
    assert!(landing.path().join("notes.txt").exists());
}

#[test]
fn given_clean_of_missing_directory_when_execute_then_dir_exit_code() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");
    let missing_str = missing.to_str().unwrap().to_string();

    // Act
    let err = run(
        &["rcloneit", "-c", "--localfs", missing_str.as_str()],
        FakeRclone::new(true),
        Settings::default(),
    )
    .unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::DIR);
    assert!(err.is_warning());
    assert!(!missing.exists());
}

#[test]
fn given_clean_and_list_when_execute_then_clean_only() {
    let landing = populated_landing_zone();
    let path = landing.path().to_str().unwrap().to_string();
    let rclone = FakeRclone::new(true);

    let result = run(&["rcloneit", "-c", "-l", "-fs", path.as_str()], rclone.clone(), Settings::default());

    assert!(result.is_ok());
    assert_eq!(entry_count(&landing), 0);
    assert_eq!(rclone.lookups.load(Ordering::SeqCst), 0);
    assert_eq!(rclone.runs.load(Ordering::SeqCst), 0);
}

// ============================================================
// list
// ============================================================

#[test]
fn given_list_when_tool_absent_then_unavailable_and_no_listing() {
    // Arrange
    let rclone = FakeRclone::new(false);

    // Act
    let err = run(&["rcloneit", "--list"], rclone.clone(), Settings::default()).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::ToolMissing(ref p) if p == "rclone"));
    assert_ne!(err.exit_code(), exitcode::OK);
    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
    assert_eq!(rclone.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(rclone.runs.load(Ordering::SeqCst), 0);
}

#[test]
fn given_list_when_tool_present_then_lists_once_and_succeeds() {
    // Arrange
    let rclone = FakeRclone::new(true);

    // Act
    let result = run(&["rcloneit", "-l", "-v"], rclone.clone(), Settings::default());

    // Assert
    assert!(result.is_ok(), "{result:?}");
    assert_eq!(rclone.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(rclone.runs.load(Ordering::SeqCst), 1);
}
