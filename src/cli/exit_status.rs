use std::process::ExitCode;

/// Exit status for the CLI.
///
/// - `Success` (0): catalog produced
/// - `Error` (1): any failure (bad argument, unreadable file, merge failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Catalog produced without errors.
    Success,
    /// The run failed; a diagnostic was printed to stderr.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
