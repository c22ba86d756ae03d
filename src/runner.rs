//! The external script-runner boundary.
//!
//! The core only produces text. Actually executing it is delegated to a host
//! capability behind [`ScriptRunner`]; the core drives the fixed
//! init/execute/cleanup sequence and interprets nothing beyond the boolean
//! result and the error text. Without a runner, execution degrades to a
//! preview-only outcome and the scene is untouched either way.

use std::thread;
use std::time::Duration;

/// Capability contract exposed by a host script engine.
pub trait ScriptRunner: Send {
    /// Prepares a fresh engine state. `false` means the capability is
    /// unavailable right now.
    fn init(&mut self) -> bool;

    /// Runs one script, reporting only success or failure.
    fn execute(&mut self, source: &str) -> bool;

    /// The engine's error text after a failed [`execute`](Self::execute).
    fn last_error(&self) -> Option<String>;

    /// Tears the engine state down.
    fn cleanup(&mut self);
}

/// Outcome of handing a script across the runner boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script ran to completion.
    Success,
    /// The engine reported a failure; the payload is its error text.
    Failed(String),
    /// No runner capability is present; the script was generated but not run.
    PreviewOnly,
}

/// Pause before delegation so a host UI has a beat to show its busy
/// indicator.
const BUSY_INDICATOR_DELAY: Duration = Duration::from_millis(100);

/// Drives the runner sequence for one script.
pub struct ScriptExecutor;

impl ScriptExecutor {
    /// Runs `source` through an optional runner capability.
    ///
    /// Degrades to [`RunOutcome::PreviewOnly`] when no runner is supplied or
    /// the runner fails to initialize. Cleanup always runs after a
    /// successful init, whatever execution reported.
    pub fn run(runner: Option<&mut dyn ScriptRunner>, source: &str) -> RunOutcome {
        let Some(runner) = runner else {
            tracing::info!("no script runner available, preview only");
            return RunOutcome::PreviewOnly;
        };

        thread::sleep(BUSY_INDICATOR_DELAY);

        if !runner.init() {
            tracing::warn!("script runner failed to initialize, preview only");
            return RunOutcome::PreviewOnly;
        }

        let succeeded = runner.execute(source);
        let outcome = if succeeded {
            RunOutcome::Success
        } else {
            let message = runner
                .last_error()
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(error = %message, "script execution failed");
            RunOutcome::Failed(message)
        };
        runner.cleanup();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingRunner {
        init_ok: bool,
        execute_ok: bool,
        error: Option<String>,
        cleaned_up: bool,
    }

    impl RecordingRunner {
        fn new(init_ok: bool, execute_ok: bool) -> Self {
            Self {
                init_ok,
                execute_ok,
                error: None,
                cleaned_up: false,
            }
        }
    }

    impl ScriptRunner for RecordingRunner {
        fn init(&mut self) -> bool {
            self.init_ok
        }

        fn execute(&mut self, _source: &str) -> bool {
            self.execute_ok
        }

        fn last_error(&self) -> Option<String> {
            self.error.clone()
        }

        fn cleanup(&mut self) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_missing_runner_degrades_to_preview() {
        assert_eq!(
            ScriptExecutor::run(None, "print('x')"),
            RunOutcome::PreviewOnly
        );
    }

    #[test]
    fn test_failed_init_degrades_to_preview() {
        let mut runner = RecordingRunner::new(false, true);
        assert_eq!(
            ScriptExecutor::run(Some(&mut runner), "print('x')"),
            RunOutcome::PreviewOnly
        );
        assert!(!runner.cleaned_up);
    }

    #[test]
    fn test_success_runs_cleanup() {
        let mut runner = RecordingRunner::new(true, true);
        assert_eq!(
            ScriptExecutor::run(Some(&mut runner), "print('x')"),
            RunOutcome::Success
        );
        assert!(runner.cleaned_up);
    }

    #[test]
    fn test_failure_relays_error_text() {
        let mut runner = RecordingRunner::new(true, false);
        runner.error = Some("attempt to call a nil value".to_string());
        let outcome = ScriptExecutor::run(Some(&mut runner), "oops()");
        assert_eq!(
            outcome,
            RunOutcome::Failed("attempt to call a nil value".to_string())
        );
        assert!(runner.cleaned_up);
    }

    #[test]
    fn test_failure_without_error_text_reports_unknown() {
        let mut runner = RecordingRunner::new(true, false);
        let outcome = ScriptExecutor::run(Some(&mut runner), "oops()");
        assert_eq!(outcome, RunOutcome::Failed("Unknown error".to_string()));
    }
}
