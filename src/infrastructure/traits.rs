//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory (follows symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// List the entries directly inside a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Remove a file or symbolic link.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command, capturing stdout and stderr.
    ///
    /// `io::ErrorKind::TimedOut` is returned if the child has not exited, or its
    /// output pipes have not closed, after `timeout`. A child still running at
    /// the deadline is killed.
    fn run(&self, cmd: &str, args: &[&str], timeout: Duration) -> io::Result<Output>;

    /// Resolve a program name on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        #[cfg(windows)]
        {
            // directory symlinks are removed with remove_dir on Windows
            if self.is_symlink(path) && path.is_dir() {
                return std::fs::remove_dir(path);
            }
        }
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

/// Interval between exit checks while waiting on a child.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str], timeout: Duration) -> io::Result<Output> {
        debug!("run: {} {:?} (timeout {:?})", cmd, args, timeout);

        let mut child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain pipes concurrently so a chatty child cannot block on a full pipe.
        // Descendants may inherit the pipes, so the output wait shares the deadline.
        let (tx, rx) = mpsc::channel();
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);
        thread::spawn(move || {
            tx.send((collect(stdout), collect(stderr))).ok();
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(e);
                }
            }
            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait()?;
                return Err(timed_out(cmd, timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        let (stdout, stderr) = rx.recv_timeout(remaining).map_err(|e| match e {
            RecvTimeoutError::Timeout => timed_out(cmd, timeout),
            RecvTimeoutError::Disconnected => {
                io::Error::new(io::ErrorKind::Other, "output reader thread panicked")
            }
        })?;

        Ok(Output {
            status,
            stdout: stdout?,
            stderr: stderr?,
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

fn timed_out(cmd: &str, timeout: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("{} did not finish within {:?}", cmd, timeout),
    )
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match handle {
        Some(h) => h
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output reader thread panicked"))?,
        None => Ok(Vec::new()),
    }
}
