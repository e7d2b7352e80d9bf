/// The common module holds the few helpers that every other module leans on: order-preserving
/// de-duplication and logging setup.
use crate::error::{QuickTagError, Result};
use directories::ProjectDirs;
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::sync::{Mutex, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

pub fn uniq<T: Clone + Eq + Hash>(xs: Vec<T>) -> Vec<T> {
    let mut rv = Vec::new();
    let mut seen = HashSet::new();
    for x in xs {
        if seen.insert(x.clone()) {
            rv.push(x);
        }
    }
    rv
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "quicktag").ok_or_else(|| QuickTagError::Generic("Failed to get project directories".to_string()))
}

// Logging initialization
static LOGGING_INITIALIZED: Mutex<Vec<Option<String>>> = Mutex::new(Vec::new());
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. A logger name is only recorded once its subscriber is installed,
/// so a failed call can be retried.
pub fn initialize_logging(logger_name: Option<&str>, output: &str) -> Result<()> {
    let mut initialized = LOGGING_INITIALIZED.lock().map_err(|_| QuickTagError::Generic("Logging state poisoned".to_string()))?;
    let key = logger_name.map(|s| s.to_string());
    if initialized.contains(&key) {
        return Ok(());
    }
    install_subscriber(output)?;
    initialized.push(key);
    Ok(())
}

#[cfg(test)]
fn is_logging_initialized(logger_name: Option<&str>) -> bool {
    let key = logger_name.map(|s| s.to_string());
    LOGGING_INITIALIZED.lock().is_ok_and(|initialized| initialized.contains(&key))
}

fn install_subscriber(output: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match output {
        "stderr" => {
            let subscriber = fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr).with_target(true).finish();
            tracing::subscriber::set_global_default(subscriber).map_err(|e| QuickTagError::Generic(format!("Failed to install logger: {e}")))?;
        }
        "file" => {
            let dirs = project_dirs()?;
            let log_dir = if cfg!(target_os = "macos") { dirs.cache_dir() } else { dirs.state_dir().unwrap_or(dirs.cache_dir()) };
            fs::create_dir_all(log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .max_log_files(10)
                .filename_prefix("quicktag")
                .filename_suffix("log")
                .build(log_dir)
                .map_err(|e| QuickTagError::Generic(format!("Failed to open log file: {e}")))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber).map_err(|e| QuickTagError::Generic(format!("Failed to install logger: {e}")))?;
            let _ = FILE_GUARD.set(guard);
        }
        other => {
            return Err(QuickTagError::Generic(format!("Unknown logging output: {other}")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniq() {
        let input = vec![1, 2, 2, 3, 1, 4, 3];
        let result = uniq(input);
        assert_eq!(result, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_uniq_keeps_first_occurrence() {
        let input = vec!["House".to_string(), "Techno".to_string(), "House".to_string()];
        assert_eq!(uniq(input), vec!["House", "Techno"]);
    }

    #[test]
    fn test_initialize_logging_retry_after_failure() {
        let name = Some("retry-after-failure");
        assert!(initialize_logging(name, "syslog").is_err());
        assert!(!is_logging_initialized(name));

        // Another test's subscriber may already be the global default, in which case the retry
        // fails too and the name stays unrecorded.
        let retry = initialize_logging(name, "stderr");
        assert!(tracing::dispatcher::has_been_set());
        assert_eq!(retry.is_ok(), is_logging_initialized(name));
        if retry.is_ok() {
            assert!(initialize_logging(name, "stderr").is_ok());
        }
    }
}
