//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Miscellaneous failure (no more specific code applies)
pub const MISC: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Directory missing or unreadable (sysexits EX_NOINPUT)
pub const DIR: i32 = 66;

/// Service unavailable (external tool not installed)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (external tool failed or timed out)
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;

/// Resolve a symbolic exit code name to its integer value.
///
/// Accepts both bare names (`"DIR"`) and the `EX_` prefixed form (`"EX_DIR"`),
/// case-insensitively.
pub fn lookup(name: &str) -> Option<i32> {
    let upper = name.trim().to_ascii_uppercase();
    let bare = upper.strip_prefix("EX_").unwrap_or(&upper);
    match bare {
        "OK" => Some(OK),
        "MISC" => Some(MISC),
        "USAGE" => Some(USAGE),
        "DIR" => Some(DIR),
        "UNAVAILABLE" => Some(UNAVAILABLE),
        "SOFTWARE" => Some(SOFTWARE),
        "IOERR" => Some(IOERR),
        "CONFIG" => Some(CONFIG),
        _ => None,
    }
}
