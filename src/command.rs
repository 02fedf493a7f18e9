//! How a finished run is reported to the invoking shell.

use crate::error::SeedError;
use std::io::Write;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_COMMAND_ERROR: u8 = 1;

/// Print `CommandError: {message}` and return the process exit status.
pub fn command_error<W: Write>(err: &SeedError, out: &mut W) -> u8 {
    // nothing left to report to if stderr itself is gone
    let _ = writeln!(out, "CommandError: {err}");
    EXIT_COMMAND_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_site_id_is_a_command_error() {
        let mut stderr = Vec::new();
        let code = command_error(
            &SeedError::InvalidSiteId {
                raw: "abc".to_string(),
            },
            &mut stderr,
        );
        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "CommandError: SITE_ID must be an integer, got: abc\n"
        );
    }

    #[test]
    fn store_failures_share_the_exit_status() {
        let mut stderr = Vec::new();
        let code = command_error(&SeedError::DatabaseError(sqlx::Error::PoolClosed), &mut stderr);
        assert_eq!(code, EXIT_COMMAND_ERROR);
        assert!(
            String::from_utf8(stderr)
                .unwrap()
                .starts_with("CommandError: Database error:")
        );
    }
}
