//! rcloneit: command-line front end for rclone
//!
//! Lists the remotes rclone knows about and empties local landing zones.
//! All transfer logic stays in the external `rclone` binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
