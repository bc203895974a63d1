//! Per-session analysis state.
//!
//! Each analysis moves through
//! `Idle → Validating → Fetching → Computing → Ready`, dropping to `Failed`
//! from any of the three working phases. A failed run never clears the last
//! `Ready` result.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::cache::FrameCache;
use crate::error::EngineError;
use crate::report::{RangeVarReport, ReturnVarReport, VolatilityReport};
use crate::request::AnalysisKind;

/// Lifecycle phase of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Never run
    #[default]
    Idle,
    /// Checking request parameters
    Validating,
    /// Waiting on the data source
    Fetching,
    /// Building series and simulating
    Computing,
    /// Latest run succeeded
    Ready,
    /// Latest run failed
    Failed,
}

impl Phase {
    /// Returns true if a run can move from `self` to `next`.
    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle | Ready | Failed, Validating)
                | (Validating, Fetching)
                | (Fetching, Computing)
                | (Computing, Ready)
                | (Validating | Fetching | Computing, Failed)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Fetching => "fetching",
            Phase::Computing => "computing",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// State of one analysis within a session.
#[derive(Debug, Clone)]
pub struct AnalysisSlot<T> {
    kind: AnalysisKind,
    phase: Phase,
    trail: Vec<Phase>,
    latest: Option<T>,
    last_error: Option<EngineError>,
}

impl<T> AnalysisSlot<T> {
    fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            phase: Phase::Idle,
            trail: Vec::new(),
            latest: None,
            last_error: None,
        }
    }

    /// Which analysis this slot holds.
    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phases visited by the latest run, in order.
    pub fn trail(&self) -> &[Phase] {
        &self.trail
    }

    /// Result of the most recent successful run.
    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    /// Error of the latest run, if it failed.
    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    /// Returns true if a result is available.
    pub fn has_result(&self) -> bool {
        self.latest.is_some()
    }

    pub(crate) fn begin(&mut self) {
        self.trail.clear();
        self.last_error = None;
        self.advance(Phase::Validating);
    }

    pub(crate) fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {} -> {}",
            self.phase,
            next
        );
        debug!(analysis = %self.kind, from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        self.trail.push(next);
    }

    pub(crate) fn succeed(&mut self, value: T) -> &T {
        self.advance(Phase::Ready);
        self.latest.insert(value)
    }

    pub(crate) fn fail(&mut self, error: EngineError) -> EngineError {
        self.advance(Phase::Failed);
        self.last_error = Some(error.clone());
        error
    }
}

/// Caller-owned state for one interactive session.
///
/// Holds the three analyses and the frames fetched so far. Sessions share
/// nothing with each other.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) return_var: AnalysisSlot<ReturnVarReport>,
    pub(crate) range_var: AnalysisSlot<RangeVarReport>,
    pub(crate) volatility: AnalysisSlot<VolatilityReport>,
    pub(crate) cache: FrameCache,
}

impl SessionState {
    /// Fresh session with every analysis idle.
    pub fn new() -> Self {
        Self::with_cache(FrameCache::new())
    }

    /// Fresh session whose cache holds at most `capacity` frames.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self::with_cache(FrameCache::with_capacity(capacity))
    }

    fn with_cache(cache: FrameCache) -> Self {
        Self {
            return_var: AnalysisSlot::new(AnalysisKind::ReturnVar),
            range_var: AnalysisSlot::new(AnalysisKind::RangeVar),
            volatility: AnalysisSlot::new(AnalysisKind::Volatility),
            cache,
        }
    }

    /// Return VaR slot.
    pub fn return_var(&self) -> &AnalysisSlot<ReturnVarReport> {
        &self.return_var
    }

    /// Range VaR slot.
    pub fn range_var(&self) -> &AnalysisSlot<RangeVarReport> {
        &self.range_var
    }

    /// Volatility slot.
    pub fn volatility(&self) -> &AnalysisSlot<VolatilityReport> {
        &self.volatility
    }

    /// Phase of the given analysis.
    pub fn phase(&self, kind: AnalysisKind) -> Phase {
        match kind {
            AnalysisKind::ReturnVar => self.return_var.phase(),
            AnalysisKind::RangeVar => self.range_var.phase(),
            AnalysisKind::Volatility => self.volatility.phase(),
        }
    }

    /// Fetched frames.
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Forget fetched frames; results are kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(Phase::Idle.can_transition_to(Phase::Validating));
        assert!(Phase::Ready.can_transition_to(Phase::Validating));
        assert!(Phase::Fetching.can_transition_to(Phase::Failed));
        assert!(!Phase::Idle.can_transition_to(Phase::Ready));
        assert!(!Phase::Validating.can_transition_to(Phase::Computing));
        assert!(!Phase::Ready.can_transition_to(Phase::Failed));
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut slot: AnalysisSlot<u32> = AnalysisSlot::new(AnalysisKind::ReturnVar);
        slot.begin();
        slot.advance(Phase::Fetching);
        slot.advance(Phase::Computing);
        assert_eq!(*slot.succeed(7), 7);

        slot.begin();
        slot.advance(Phase::Fetching);
        let err = slot.fail(EngineError::DataSource("empty".into()));

        assert_eq!(slot.phase(), Phase::Failed);
        assert_eq!(slot.latest(), Some(&7));
        assert_eq!(slot.last_error(), Some(&err));
        assert_eq!(
            slot.trail(),
            &[Phase::Validating, Phase::Fetching, Phase::Failed]
        );
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = SessionState::new();
        for kind in [
            AnalysisKind::ReturnVar,
            AnalysisKind::RangeVar,
            AnalysisKind::Volatility,
        ] {
            assert_eq!(session.phase(kind), Phase::Idle);
        }
        assert!(!session.return_var().has_result());
    }
}
