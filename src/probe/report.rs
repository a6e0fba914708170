//! Per-probe outcomes and the closing summary table.

use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    Failed,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Ok => write!(f, "OK"),
            ProbeStatus::Failed => write!(f, "FAIL"),
        }
    }
}

/// Result of one probe attempt.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Probe kind, e.g. `"list_models"`.
    pub name: &'static str,
    /// What was probed: a URL or a model name.
    pub target: String,
    pub status: ProbeStatus,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn ok(name: &'static str, target: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name,
            target: target.into(),
            status: ProbeStatus::Ok,
            duration_ms,
            error: None,
        }
    }

    pub fn failed(
        name: &'static str,
        target: impl Into<String>,
        duration_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name,
            target: target.into(),
            status: ProbeStatus::Failed,
            duration_ms,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ProbeStatus::Ok
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    pub fn push(&mut self, outcome: ProbeOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn extend(&mut self, outcomes: impl IntoIterator<Item = ProbeOutcome>) {
        self.outcomes.extend(outcomes);
    }

    pub fn ok_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn fail_count(&self) -> usize {
        self.outcomes.len() - self.ok_count()
    }

    pub fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "| Probe        | Target                     | Status | Duration(ms) |")?;
        writeln!(out, "|--------------|----------------------------|--------|--------------|")?;
        for o in &self.outcomes {
            writeln!(
                out,
                "| {:<12} | {:<26} | {:<6} | {:<12} |",
                o.name,
                abbreviate(&o.target, 26),
                o.status.to_string(),
                o.duration_ms
            )?;
            if let Some(err) = &o.error {
                writeln!(out, "|              | {} |", abbreviate(err, 60))?;
            }
        }
        writeln!(
            out,
            "\n=== Summary: {} OK, {} FAIL ===",
            self.ok_count(),
            self.fail_count()
        )
    }
}

/// Shorten to `width` characters, ending in `...` when cut.
fn abbreviate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
