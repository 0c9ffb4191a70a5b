//! Stopping and starting the indexing daemon.

use crate::config::Settings;
use crate::error::{failure_reason, Error, Result};
use std::process::Command;
use tracing::{info, warn};

/// Something that can stop and start the indexing service.
pub trait ServiceControl {
    fn stop(&self) -> Result<()>;
    fn start(&self) -> Result<()>;
}

/// Controls a launchd job through `launchctl`.
#[derive(Debug, Clone)]
pub struct Launchctl {
    program: String,
    label: String,
}

impl Launchctl {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: "launchctl".to_string(),
            label: settings.service_label.clone(),
        }
    }

    /// Uses `program` instead of `launchctl` from `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, action: &'static str) -> Result<()> {
        let output = Command::new(&self.program)
            .arg(action)
            .arg(&self.label)
            .output()
            .map_err(|e| Error::spawn(&self.program, e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Service {
                action,
                reason: failure_reason(&output),
            })
        }
    }
}

impl ServiceControl for Launchctl {
    fn stop(&self) -> Result<()> {
        self.run("stop")
    }

    fn start(&self) -> Result<()> {
        self.run("start")
    }
}

/// Result of a restart. Both steps are always attempted.
#[derive(Debug, Default)]
pub struct RestartReport {
    pub stop: Option<Error>,
    pub start: Option<Error>,
}

impl RestartReport {
    pub fn is_clean(&self) -> bool {
        self.stop.is_none() && self.start.is_none()
    }
}

/// Stops then starts the service. Failures are logged, never fatal.
pub fn restart(control: &impl ServiceControl) -> RestartReport {
    info!("Restarting indexing service");
    let stop = control.stop().err();
    if let Some(ref e) = stop {
        warn!("{}", e);
    }
    let start = control.start().err();
    if let Some(ref e) = start {
        warn!("{}", e);
    }
    RestartReport { stop, start }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<&'static str>>,
        fail_stop: bool,
    }

    impl ServiceControl for Recorder {
        fn stop(&self) -> Result<()> {
            self.calls.borrow_mut().push("stop");
            if self.fail_stop {
                return Err(Error::Service {
                    action: "stop",
                    reason: "exit status: 3".to_string(),
                });
            }
            Ok(())
        }

        fn start(&self) -> Result<()> {
            self.calls.borrow_mut().push("start");
            Ok(())
        }
    }

    #[test]
    fn test_restart_stops_then_starts() {
        let recorder = Recorder::default();
        let report = restart(&recorder);
        assert!(report.is_clean());
        assert_eq!(*recorder.calls.borrow(), vec!["stop", "start"]);
    }

    #[test]
    fn test_stop_failure_still_starts() {
        let recorder = Recorder {
            fail_stop: true,
            ..Recorder::default()
        };
        let report = restart(&recorder);
        assert!(!report.is_clean());
        assert!(report.stop.is_some());
        assert!(report.start.is_none());
        assert_eq!(*recorder.calls.borrow(), vec!["stop", "start"]);
    }

    #[test]
    fn test_missing_launchctl_is_a_warning() {
        let control =
            Launchctl::new(&Settings::default()).with_program("mdskip-no-such-launchctl-binary");
        let report = restart(&control);
        assert!(matches!(report.stop, Some(Error::ToolNotFound { .. })));
        assert!(matches!(report.start, Some(Error::ToolNotFound { .. })));
    }
}
