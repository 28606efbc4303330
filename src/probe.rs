/// Resident-memory queries for an arbitrary pid.
///
/// The sampler loop only depends on the `MemProbe` trait; the shipped
/// implementation shells out to `ps`, which reports RSS in kilobytes on
/// every platform we care about. A probe call is blocking from the loop's
/// perspective and carries no timeout.
use std::process::Command;

/// Errors produced by a single memory query.
#[derive(Debug)]
pub enum ProbeError {
    /// The query utility could not be invoked at all.
    Io(std::io::Error),
    /// The utility ran but could not report on the pid (already exited,
    /// not visible to this user).
    Query { pid: u32 },
    /// The utility produced output we could not parse as a KB value.
    Parse { raw: String },
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::Io(e) => write!(f, "failed to invoke ps: {e}"),
            ProbeError::Query { pid } => write!(f, "ps could not query pid {pid}"),
            ProbeError::Parse { raw } => write!(f, "unparseable rss value {raw:?}"),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Io(e) => Some(e),
            ProbeError::Query { .. } | ProbeError::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        ProbeError::Io(e)
    }
}

/// Capability to read a process's current resident set size.
pub trait MemProbe {
    /// Current RSS of `pid` in kilobytes.
    fn rss_kb(&self, pid: u32) -> Result<f64, ProbeError>;
}

/// `MemProbe` backed by `ps -o rss= -p <pid>`.
pub struct PsProbe;

impl MemProbe for PsProbe {
    fn rss_kb(&self, pid: u32) -> Result<f64, ProbeError> {
        let output = Command::new("ps")
            .args(["-o", "rss=", "-p", &pid.to_string()])
            .output()?;
        if !output.status.success() {
            return Err(ProbeError::Query { pid });
        }
        parse_rss(&output.stdout)
    }
}

/// Parse the `ps` output: a single whitespace-padded KB number.
fn parse_rss(stdout: &[u8]) -> Result<f64, ProbeError> {
    let raw = String::from_utf8_lossy(stdout);
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| ProbeError::Parse {
            raw: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rss_plain_number() {
        assert_eq!(parse_rss(b"  12345\n").unwrap(), 12345.0);
    }

    #[test]
    fn test_parse_rss_no_padding() {
        assert_eq!(parse_rss(b"42").unwrap(), 42.0);
    }

    #[test]
    fn test_parse_rss_rejects_garbage() {
        let err = parse_rss(b"not-a-number\n").unwrap_err();
        assert!(matches!(err, ProbeError::Parse { .. }));
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_parse_rss_rejects_empty() {
        assert!(matches!(
            parse_rss(b"\n").unwrap_err(),
            ProbeError::Parse { .. }
        ));
    }

    #[test]
    fn test_ps_probe_reads_own_process() {
        // The test process itself is always alive and queryable.
        let rss = PsProbe.rss_kb(std::process::id()).unwrap();
        assert!(rss > 0.0);
    }

    #[test]
    fn test_ps_probe_fails_for_dead_pid() {
        // A child reaped before the query leaves a pid ps cannot find.
        let mut child = std::process::Command::new("true").spawn().unwrap();
        let pid = child.id();
        child.wait().unwrap();
        let err = PsProbe.rss_kb(pid).unwrap_err();
        assert!(matches!(err, ProbeError::Query { .. }));
    }
}
