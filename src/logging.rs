use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, Naming, opt_format};

use crate::{ReviewError, Result};

/// Starts the file logger. Level is taken from the environment (`RUST_LOG`)
/// with "info" as the fallback.
pub fn setup_logging(log_directory: &str) -> Result<()> {
    Logger::try_with_env_or_str("info")
        .map_err(|e| ReviewError::Logging(e.to_string()))?
        .log_to_file(FileSpec::default().directory(log_directory))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .start()
        .map_err(|e| ReviewError::Logging(e.to_string()))?;
    Ok(())
}
