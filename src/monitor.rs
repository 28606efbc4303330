/// Sampler loop: spawn the child, poll its RSS once per tick, report changes,
/// stop when the child exits.
use crate::config::MonitorConfig;
use crate::probe::MemProbe;
use crate::tracker::{Report, SampleTracker};
use std::fmt;
use tokio::process::Command;

/// User-facing events emitted by the loop, printed to stdout by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// Child spawned successfully.
    Launched { name: String, pid: u32 },
    /// A sample worth reporting (initial value or a change).
    Sample(Report),
    /// Child observed to have exited.
    Terminated { name: String },
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorEvent::Launched { name, pid } => {
                write!(f, "Launched {} with PID: {}", name, pid)
            }
            MonitorEvent::Sample(report) => report.fmt(f),
            MonitorEvent::Terminated { name } => write!(f, "{} terminated.", name),
        }
    }
}

/// Errors that prevent the loop from running at all.
#[derive(Debug)]
pub enum MonitorError {
    /// Spawning the child failed; the loop never starts.
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Spawn { command, source } => {
                write!(f, "failed to launch {}: {}", command, source)
            }
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Spawn { source, .. } => Some(source),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct MonitorOutcome {
    /// Number of polling ticks before termination was observed.
    pub ticks: u64,
    /// Last successfully sampled RSS, if any sample landed.
    pub last_rss_kb: Option<f64>,
}

/// Spawn the child and poll until it exits.
///
/// The child is invoked as `<command> <config_arg> <interval_arg>` and runs
/// concurrently; the loop only observes its liveness and memory footprint.
/// A failed probe skips that tick's reporting and the loop carries on; the
/// only error returned is a spawn failure.
pub async fn run<P: MemProbe>(
    config: &MonitorConfig,
    probe: &P,
    mut on_event: impl FnMut(MonitorEvent),
) -> Result<MonitorOutcome, MonitorError> {
    let mut child = Command::new(&config.command)
        .arg(&config.config_arg)
        .arg(&config.interval_arg)
        .spawn()
        .map_err(|e| MonitorError::Spawn {
            command: config.command.clone(),
            source: e,
        })?;

    let pid = child.id().unwrap_or(0);
    tracing::info!(pid, command = %config.command, "child process started");
    on_event(MonitorEvent::Launched {
        name: config.child_name().to_string(),
        pid,
    });

    let mut tracker = SampleTracker::default();
    let mut ticks = 0u64;

    loop {
        // Liveness first: exit status value is not inspected, only exit.
        match child.try_wait() {
            Ok(Some(_)) => {
                tracing::info!(pid, ticks, "child process exited");
                on_event(MonitorEvent::Terminated {
                    name: config.child_name().to_string(),
                });
                return Ok(MonitorOutcome {
                    ticks,
                    last_rss_kb: tracker.last_rss_kb(),
                });
            }
            Ok(None) => match probe.rss_kb(pid) {
                Ok(rss_kb) => {
                    tracing::debug!(pid, rss_kb, "sampled rss");
                    if let Some(report) = tracker.observe(rss_kb) {
                        on_event(MonitorEvent::Sample(report));
                    }
                }
                Err(e) => {
                    // Skipped sample: no report this tick, state untouched.
                    tracing::debug!(pid, error = %e, "rss probe failed, skipping tick");
                }
            },
            Err(e) => {
                // Treated like a failed sample: skip this tick, keep polling.
                tracing::warn!(pid, error = %e, "liveness check failed");
            }
        }

        tokio::time::sleep(config.tick).await;
        ticks += 1;
    }
}
