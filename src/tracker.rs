/// Change detection over successive RSS samples.
///
/// Holds the last successfully reported value and decides, per sample,
/// whether anything is worth printing. Failed probe ticks never reach
/// `observe`, so the stored value always refers to the last *successful*
/// sample.
use std::fmt;

/// What a single observed sample means for reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// First successful sample — the baseline.
    Initial { rss_kb: f64 },
    /// Sample differs from the previous reported value.
    Changed {
        last_kb: f64,
        current_kb: f64,
        diff_mb: f64,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Initial { rss_kb } => write!(f, "Initial RSS value: {} KB", rss_kb),
            Report::Changed {
                last_kb,
                current_kb,
                diff_mb,
            } => write!(
                f,
                "Last: {} KB, Current: {} KB, Difference: {:.2} MB",
                last_kb, current_kb, diff_mb
            ),
        }
    }
}

/// Tracks the last reported RSS value across loop iterations.
#[derive(Debug, Default)]
pub struct SampleTracker {
    last_rss: Option<f64>,
}

impl SampleTracker {
    /// Feed one successful sample (in KB).
    ///
    /// Returns a report for the first sample and for every sample that
    /// differs (strict inequality, no tolerance) from the previous one.
    /// Equal samples return `None` and leave the state unchanged.
    pub fn observe(&mut self, rss_kb: f64) -> Option<Report> {
        match self.last_rss {
            None => {
                self.last_rss = Some(rss_kb);
                Some(Report::Initial { rss_kb })
            }
            Some(last) if rss_kb != last => {
                // Difference is computed against the prior value, which is
                // only then replaced.
                let diff_mb = (rss_kb - last) / 1024.0;
                self.last_rss = Some(rss_kb);
                Some(Report::Changed {
                    last_kb: last,
                    current_kb: rss_kb,
                    diff_mb,
                })
            }
            Some(_) => None,
        }
    }

    /// Last successfully observed RSS in KB, if any sample has landed.
    pub fn last_rss_kb(&self) -> Option<f64> {
        self.last_rss
    }
}
