use chrono::Utc;

use crate::config::{ConfigAccess, ALLOWED_DRIFT_KEY};

/// Current time as epoch seconds. Injected so tests can pin "now".
pub trait Clock {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Decides whether a timestamp claim falls within the configured clock
/// drift of "now".
#[derive(Debug, Clone, Default)]
pub struct DriftChecker<C = SystemClock> {
    clock: C,
}

impl DriftChecker {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> DriftChecker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether `timestamp` (epoch seconds) is within the allowed drift of
    /// now. Drift is resolved from the context as [`ALLOWED_DRIFT_KEY`] in
    /// milliseconds, default 0, and the boundary is inclusive.
    ///
    /// Advisory only: a missing timestamp yields `true` (no time claim to
    /// check means nothing to reject on time grounds), and no outcome is
    /// ever an error. Callers wanting rejection semantics must turn a
    /// `false` into their own error.
    pub fn is_within_drift(&self, ctx: &impl ConfigAccess, timestamp: Option<i64>) -> bool {
        let timestamp = match timestamp {
            Some(value) => value,
            None => return true,
        };
        let allowed = ctx.config_value(ALLOWED_DRIFT_KEY, 0) / 1000;
        (timestamp - self.clock.now()).abs() <= allowed
    }
}
