use std::collections::HashMap;
use std::time::Instant;

/// Classification of a single capture tick, for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeKind {
    Marked,
    Duplicate,
    Rejected,
    Idle,
}

impl OutcomeKind {
    fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Marked => "marked",
            OutcomeKind::Duplicate => "duplicate",
            OutcomeKind::Rejected => "rejected",
            OutcomeKind::Idle => "idle",
        }
    }
}

/// Cross-cutting observer for attendance session events.
///
/// Keeps the session drivers free of any particular output mechanism.
pub trait SessionLogger: Send {
    fn outcome(&mut self, kind: OutcomeKind);

    /// Record how long a named step (capture, recognize) took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events. Used by tests and one-shot commands.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn outcome(&mut self, _kind: OutcomeKind) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count and total duration of one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTiming {
    pub count: usize,
    pub total_ms: f64,
}

impl StageTiming {
    pub fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// Counts outcomes and step timings and reports a summary through `log`.
///
/// Memory stays constant however long the session runs.
pub struct StdoutSessionLogger {
    outcomes: HashMap<OutcomeKind, usize>,
    timings: HashMap<String, StageTiming>,
    start_time: Instant,
}

impl StdoutSessionLogger {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            timings: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.get(&kind).copied().unwrap_or(0)
    }

    pub fn timing_for(&self, stage: &str) -> Option<StageTiming> {
        self.timings.get(stage).copied()
    }

    /// Returns the formatted summary, or `None` if nothing happened.
    pub fn summary_string(&self) -> Option<String> {
        if self.outcomes.is_empty() {
            return None;
        }

        let captures: usize = self.outcomes.values().sum();
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Session summary ({captures} captures, {elapsed:.1}s total):"
        )];

        let mut kinds: Vec<_> = self.outcomes.keys().copied().collect();
        kinds.sort();
        for kind in kinds {
            lines.push(format!("  {:10}: {}", kind.label(), self.outcomes[&kind]));
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let timing = self.timings[stage];
            lines.push(format!(
                "  {stage:10}: avg {:6.1}ms  total {:7.0}ms",
                timing.avg_ms(),
                timing.total_ms
            ));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn outcome(&mut self, kind: OutcomeKind) {
        *self.outcomes.entry(kind).or_default() += 1;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        let timing = self.timings.entry(stage.to_string()).or_default();
        timing.count += 1;
        timing.total_ms += duration_ms;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
