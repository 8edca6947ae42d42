//! A single in-flight property animation.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, WindowType, WindowTypeMask};
use super::value::FPx2;
use crate::error::AnimError;
use crate::util::easing::EasingFunction;

/// Parameters for creating an [`AnimationRecord`].
///
/// Durations and delays are signed so that out-of-range requests coming from
/// configuration or effect code can be rejected instead of wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnimationSpec {
    /// Property being animated.
    pub attribute: Attribute,
    /// Opaque per-animation flags, interpreted by the caller.
    #[serde(default)]
    pub meta: u32,
    /// Total animation length in milliseconds.
    pub duration_ms: i64,
    /// Target value.
    pub to: FPx2,
    /// Easing curve. `None` uses the scheduler's default curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<EasingFunction>,
    /// Delay before the animation becomes eligible, in milliseconds.
    #[serde(default)]
    pub delay_ms: i64,
    /// Source value. `None` starts from the attribute's neutral value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<FPx2>,
    /// Hold at `from` while pending instead of being hidden.
    #[serde(default)]
    pub wait_at_source: bool,
    /// Stay at `to` after completion until cancelled.
    #[serde(default)]
    pub keep_at_target: bool,
    /// Window types this animation applies to (empty = all).
    #[serde(default)]
    pub window_types: WindowTypeMask,
}

impl AnimationSpec {
    /// Animation of `attribute` to `to` over `duration_ms`, starting now from
    /// the neutral value.
    #[must_use]
    pub fn new(attribute: Attribute, duration_ms: i64, to: FPx2) -> Self {
        Self {
            attribute,
            meta: 0,
            duration_ms,
            to,
            curve: None,
            delay_ms: 0,
            from: None,
            wait_at_source: false,
            keep_at_target: false,
            window_types: WindowTypeMask::empty(),
        }
    }

    /// Start from an explicit value.
    #[must_use]
    pub fn with_from(mut self, from: FPx2) -> Self {
        self.from = Some(from);
        self
    }

    /// Use a specific easing curve.
    #[must_use]
    pub fn with_curve(mut self, curve: EasingFunction) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Delay the start.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: i64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Attach caller-defined flags.
    #[must_use]
    pub fn with_meta(mut self, meta: u32) -> Self {
        self.meta = meta;
        self
    }

    /// Restrict to the given window types.
    #[must_use]
    pub fn with_window_types(mut self, window_types: WindowTypeMask) -> Self {
        self.window_types = window_types;
        self
    }

    /// Hold at the source value while pending.
    #[must_use]
    pub fn waiting_at_source(mut self) -> Self {
        self.wait_at_source = true;
        self
    }

    /// Keep the target value after completion.
    #[must_use]
    pub fn keeping_at_target(mut self) -> Self {
        self.keep_at_target = true;
        self
    }
}

/// Lifecycle position of a record at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Start time not reached yet.
    Pending,
    /// Elapsed time is advancing.
    Active,
    /// Finished; will be retired on the next tick.
    Complete,
    /// Finished and kept at target until cancelled.
    Held,
}

/// One in-flight animation of a single window attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRecord {
    attribute: Attribute,
    from: FPx2,
    to: FPx2,
    curve: EasingFunction,
    duration_ms: u64,
    elapsed_ms: u64,
    start_time_ms: u64,
    window_types: WindowTypeMask,
    meta: u32,
    wait_at_source: bool,
    keep_at_target: bool,
}

impl AnimationRecord {
    /// Validate `spec` and build a record eligible at `now_ms + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] for a negative duration or
    /// delay, a malformed curve, or an unset or non-finite endpoint.
    pub fn create(spec: &AnimationSpec, now_ms: u64) -> Result<Self, AnimError> {
        let duration_ms = u64::try_from(spec.duration_ms).map_err(|_| {
            AnimError::InvalidArgument(format!(
                "{} animation has negative duration {}ms",
                spec.attribute, spec.duration_ms
            ))
        })?;
        let delay_ms = u64::try_from(spec.delay_ms).map_err(|_| {
            AnimError::InvalidArgument(format!(
                "{} animation has negative delay {}ms",
                spec.attribute, spec.delay_ms
            ))
        })?;

        let curve = spec.curve.unwrap_or_default();
        curve.validate()?;

        check_endpoint(spec.attribute, "target", spec.to)?;
        let from = match spec.from {
            Some(from) => {
                check_endpoint(spec.attribute, "source", from)?;
                from
            }
            None => spec.attribute.neutral(),
        };

        Ok(Self {
            attribute: spec.attribute,
            from,
            to: spec.to,
            curve,
            duration_ms,
            elapsed_ms: 0,
            start_time_ms: now_ms.saturating_add(delay_ms),
            window_types: spec.window_types,
            meta: spec.meta,
            wait_at_source: spec.wait_at_source,
            keep_at_target: spec.keep_at_target,
        })
    }

    /// Add `delta_ms` of progress, saturating at the duration.
    ///
    /// Does nothing while the record is pending. When the frame ending at
    /// `now_ms` began before the start time, only the part after the start
    /// counts.
    pub fn advance(&mut self, delta_ms: u64, now_ms: u64) {
        if self.is_pending(now_ms) {
            return;
        }
        let credited = if now_ms.saturating_sub(delta_ms) < self.start_time_ms {
            delta_ms.min(now_ms - self.start_time_ms)
        } else {
            delta_ms
        };
        self.elapsed_ms =
            self.elapsed_ms.saturating_add(credited).min(self.duration_ms);
    }

    /// Jump to the end: eligible immediately and fully elapsed.
    pub fn finish(&mut self, now_ms: u64) {
        self.start_time_ms = self.start_time_ms.min(now_ms);
        self.elapsed_ms = self.duration_ms;
    }

    /// Interpolated value at `now_ms`.
    ///
    /// A pending record reports its source if it waits at source; otherwise
    /// it has no visual contribution yet.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidState`] while pending without
    /// wait-at-source.
    pub fn current_value(&self, now_ms: u64) -> Result<FPx2, AnimError> {
        if self.is_pending(now_ms) {
            if self.wait_at_source {
                return Ok(self.from);
            }
            return Err(AnimError::InvalidState(format!(
                "{} animation is pending for another {}ms",
                self.attribute,
                self.start_time_ms - now_ms
            )));
        }
        Ok(FPx2::interpolate(
            self.from,
            self.to,
            self.progress(),
            &self.curve,
        ))
    }

    /// Raw progress in `[0, 1]`. Zero-length animations are always at 1.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            1.0
        } else {
            (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
        }
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Whether the start time is still in the future.
    #[must_use]
    pub const fn is_pending(&self, now_ms: u64) -> bool {
        now_ms < self.start_time_ms
    }

    /// Lifecycle state at `now_ms`.
    #[must_use]
    pub const fn state(&self, now_ms: u64) -> RecordState {
        if self.is_pending(now_ms) {
            RecordState::Pending
        } else if !self.is_complete() {
            RecordState::Active
        } else if self.keep_at_target {
            RecordState::Held
        } else {
            RecordState::Complete
        }
    }

    /// Whether this record animates windows of `window_type`.
    #[must_use]
    pub const fn applies_to(&self, window_type: WindowType) -> bool {
        self.window_types.matches(window_type)
    }

    /// Animated property.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Source value.
    #[must_use]
    pub const fn from(&self) -> FPx2 {
        self.from
    }

    /// Target value.
    #[must_use]
    pub const fn to(&self) -> FPx2 {
        self.to
    }

    /// Easing curve.
    #[must_use]
    pub const fn curve(&self) -> EasingFunction {
        self.curve
    }

    /// Total length in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Milliseconds advanced so far.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Absolute clock time at which the record becomes eligible.
    #[must_use]
    pub const fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Window types this record applies to.
    #[must_use]
    pub const fn window_types(&self) -> WindowTypeMask {
        self.window_types
    }

    /// Caller-defined flags.
    #[must_use]
    pub const fn meta(&self) -> u32 {
        self.meta
    }

    /// Whether the record holds at source while pending.
    #[must_use]
    pub const fn wait_at_source(&self) -> bool {
        self.wait_at_source
    }

    /// Whether the record is kept at target after completion.
    #[must_use]
    pub const fn keep_at_target(&self) -> bool {
        self.keep_at_target
    }

    /// Multi-line diagnostic dump of this record at `now_ms`.
    #[must_use]
    pub fn describe(&self, now_ms: u64) -> String {
        DescribeRecord {
            record: self,
            now_ms,
        }
        .to_string()
    }
}

/// [`fmt::Display`] adaptor printing [`AnimationRecord::describe`] output
/// without allocating.
pub struct DescribeRecord<'a> {
    /// Record to print.
    pub record: &'a AnimationRecord,
    /// Clock time the description is relative to.
    pub now_ms: u64,
}

impl fmt::Display for DescribeRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        writeln!(f, "Animation: {}", r.attribute)?;
        writeln!(f, "     From: {}", r.from)?;
        writeln!(f, "       To: {}", r.to)?;
        if self.now_ms >= r.start_time_ms {
            writeln!(f, "  Started: {}ms ago", self.now_ms - r.start_time_ms)?;
        } else {
            writeln!(f, "  Started: in {}ms", r.start_time_ms - self.now_ms)?;
        }
        writeln!(f, " Duration: {}ms", r.duration_ms)?;
        writeln!(f, "   Passed: {}ms", r.elapsed_ms)?;
        writeln!(f, " Applying: {}", r.window_types.bits())
    }
}

fn check_endpoint(
    attribute: Attribute,
    which: &str,
    value: FPx2,
) -> Result<(), AnimError> {
    if !value.is_valid() || !value.is_finite() {
        return Err(AnimError::InvalidArgument(format!(
            "{attribute} animation has unusable {which} value {value}"
        )));
    }
    Ok(())
}
