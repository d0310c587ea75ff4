//! Remote endpoint names as reported by `rclone listremotes`

use std::fmt;

/// Name of a remote configured in the external tool, e.g. `gdrive:`.
///
/// Opaque: no structure beyond "one non-blank line of tool output".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteName(String);

impl RemoteName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Split `listremotes` output into remote names, preserving tool order.
///
/// Blank lines are skipped and surrounding whitespace (including `\r`) is trimmed.
pub fn parse_remotes(stdout: &str) -> Vec<RemoteName> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RemoteName::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_trailing_newline_when_parse_then_no_empty_entry() {
        let remotes = parse_remotes("remoteA\nremoteB\n");
        assert_eq!(
            remotes,
            vec![RemoteName::from("remoteA"), RemoteName::from("remoteB")]
        );
    }

    #[test]
    fn given_empty_output_when_parse_then_empty() {
        assert!(parse_remotes("").is_empty());
        assert!(parse_remotes("\n\n").is_empty());
    }

    #[test]
    fn given_crlf_output_when_parse_then_trims_carriage_returns() {
        let remotes = parse_remotes("gdrive:\r\ns3:\r\n");
        assert_eq!(remotes[0].as_str(), "gdrive:");
        assert_eq!(remotes[1].as_str(), "s3:");
    }
}
