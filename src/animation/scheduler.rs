//! Per-window animation scheduler.
//!
//! Owns every in-flight [`AnimationRecord`], keyed by window. The host's paint
//! loop calls [`AnimationScheduler::tick`] once per frame and then reads
//! [`AnimationScheduler::values_for`] for each window it composites.

use std::fmt::{self, Write as _};

use rustc_hash::FxHashMap;

use super::attribute::{Attribute, WindowType};
use super::record::{AnimationRecord, AnimationSpec, DescribeRecord};
use super::values::AttributeValues;
use crate::error::AnimError;
use crate::options::Options;
use crate::util::clock::{Clock, SystemClock};
use crate::util::easing::EasingFunction;

/// Identifier of a managed window, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Handle to one scheduled animation, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: AnimationId,
    record: AnimationRecord,
}

/// Drives every window's animations from a single frame tick.
///
/// Records for one window are kept in scheduling order. When several records
/// touch the same attribute, the most recently scheduled one wins, so a new
/// animation supersedes an older one without an explicit cancel.
pub struct AnimationScheduler<C: Clock = SystemClock> {
    clock: C,
    windows: FxHashMap<WindowId, Vec<Scheduled>>,
    next_id: u64,
    enabled: bool,
    duration_factor: f32,
    default_curve: EasingFunction,
    trace_records: bool,
}

impl AnimationScheduler<SystemClock> {
    /// Scheduler on the platform monotonic clock with default options.
    #[must_use]
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock> AnimationScheduler<C> {
    /// Scheduler reading time from `clock`, with default options.
    pub fn new(clock: C) -> Self {
        let defaults = Options::default();
        Self {
            clock,
            windows: FxHashMap::default(),
            next_id: 0,
            enabled: defaults.animation.enabled,
            duration_factor: defaults.animation.duration_factor,
            default_curve: defaults.animation.default_curve,
            trace_records: defaults.debug.trace_records,
        }
    }

    /// Scheduler configured from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] if `options` fail validation.
    pub fn with_options(clock: C, options: &Options) -> Result<Self, AnimError> {
        let mut scheduler = Self::new(clock);
        scheduler.apply_options(options)?;
        Ok(scheduler)
    }

    /// Apply new tuning. Disabling animations finishes everything in flight.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] if `options` fail validation;
    /// the current tuning is left unchanged.
    pub fn apply_options(&mut self, options: &Options) -> Result<(), AnimError> {
        options.validate()?;
        self.duration_factor = options.animation.duration_factor;
        self.default_curve = options.animation.default_curve;
        self.trace_records = options.debug.trace_records;
        self.set_enabled(options.animation.enabled);
        Ok(())
    }

    /// The injected clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Enable or disable animations.
    ///
    /// While disabled, newly scheduled records complete immediately; turning
    /// animations off also finishes every record already in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        log::debug!(
            "animations {}",
            if enabled { "enabled" } else { "disabled" }
        );
        if !enabled {
            let now = self.clock.now_ms();
            for entry in self.windows.values_mut().flatten() {
                entry.record.finish(now);
            }
        }
    }

    /// Whether animations are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append `record` to `window`'s animations.
    pub fn schedule(
        &mut self,
        window: WindowId,
        mut record: AnimationRecord,
    ) -> AnimationId {
        let now = self.clock.now_ms();
        if !self.enabled {
            record.finish(now);
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;

        if self.trace_records {
            log::trace!(
                "scheduling {id} on {window}:\n{}",
                DescribeRecord {
                    record: &record,
                    now_ms: now,
                }
            );
        }

        let records = self.windows.entry(window).or_insert_with(|| {
            log::debug!("{window} became active");
            Vec::new()
        });
        records.push(Scheduled { id, record });
        id
    }

    /// Build a record from `spec` and schedule it.
    ///
    /// Duration and delay are scaled by the configured speed factor, and the
    /// default curve fills in when the spec names none.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] if the spec is rejected by
    /// [`AnimationRecord::create`]; nothing is scheduled then.
    pub fn animate(
        &mut self,
        window: WindowId,
        spec: &AnimationSpec,
    ) -> Result<AnimationId, AnimError> {
        let mut spec = spec.clone();
        spec.duration_ms = scale_ms(spec.duration_ms, self.duration_factor);
        spec.delay_ms = scale_ms(spec.delay_ms, self.duration_factor);
        if spec.curve.is_none() {
            spec.curve = Some(self.default_curve);
        }

        let record = AnimationRecord::create(&spec, self.clock.now_ms())
            .inspect_err(|e| {
                log::warn!("rejected {} animation on {window}: {e}", spec.attribute);
            })?;
        Ok(self.schedule(window, record))
    }

    /// Advance every record by `delta_ms` and retire finished ones.
    ///
    /// Complete records are dropped unless they keep at target; pending
    /// records are never retired here. Windows left without records become
    /// inactive. Returns whether any record still needs further ticks.
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        let now = self.clock.now_ms();
        let trace = self.trace_records;
        let mut animating = false;

        self.windows.retain(|window, records| {
            for entry in records.iter_mut() {
                entry.record.advance(delta_ms, now);
            }

            records.retain(|entry| {
                let record = &entry.record;
                let retire = !record.is_pending(now)
                    && record.is_complete()
                    && !record.keep_at_target();
                if retire && trace {
                    log::trace!(
                        "retiring {} on {window}:\n{}",
                        entry.id,
                        DescribeRecord {
                            record,
                            now_ms: now,
                        }
                    );
                }
                !retire
            });

            animating |= records.iter().any(|entry| needs_tick(&entry.record, now));

            if records.is_empty() {
                log::debug!("{window} has no remaining animations");
                false
            } else {
                true
            }
        });

        animating
    }

    /// Current value of every animated attribute on `window`.
    ///
    /// Records are applied in scheduling order, so the latest record for an
    /// attribute wins. Pending records that do not wait at source contribute
    /// nothing.
    pub fn values_for(&self, window: WindowId) -> AttributeValues {
        self.collect_values(window, |_| true)
    }

    /// Like [`values_for`](Self::values_for), skipping records whose window
    /// type mask excludes `window_type`.
    pub fn values_for_type(
        &self,
        window: WindowId,
        window_type: WindowType,
    ) -> AttributeValues {
        self.collect_values(window, |record| record.applies_to(window_type))
    }

    fn collect_values(
        &self,
        window: WindowId,
        include: impl Fn(&AnimationRecord) -> bool,
    ) -> AttributeValues {
        let now = self.clock.now_ms();
        let mut values = AttributeValues::new();
        for entry in self.windows.get(&window).into_iter().flatten() {
            if !include(&entry.record) {
                continue;
            }
            if let Ok(value) = entry.record.current_value(now) {
                values.set(entry.record.attribute(), value);
            }
        }
        values
    }

    /// Remove every record animating `attribute` on `window`, whatever its
    /// state. Returns how many were removed.
    pub fn cancel(&mut self, window: WindowId, attribute: Attribute) -> usize {
        self.remove_where(window, |entry| entry.record.attribute() == attribute)
    }

    /// Remove a single animation. Returns whether it was found.
    pub fn cancel_id(&mut self, window: WindowId, id: AnimationId) -> bool {
        self.remove_where(window, |entry| entry.id == id) > 0
    }

    /// Drop every animation on `window`, e.g. when it is destroyed.
    pub fn cancel_window(&mut self, window: WindowId) -> usize {
        let removed = self.windows.remove(&window).map_or(0, |records| records.len());
        if removed > 0 {
            log::debug!("cancelled {removed} animation(s) on {window}");
        }
        removed
    }

    fn remove_where(
        &mut self,
        window: WindowId,
        predicate: impl Fn(&Scheduled) -> bool,
    ) -> usize {
        let Some(records) = self.windows.get_mut(&window) else {
            return 0;
        };
        let before = records.len();
        records.retain(|entry| !predicate(entry));
        let removed = before - records.len();
        if removed > 0 {
            log::debug!("cancelled {removed} animation(s) on {window}");
        }
        if records.is_empty() {
            let _ = self.windows.remove(&window);
            log::debug!("{window} has no remaining animations");
        }
        removed
    }

    /// Whether any record still needs ticks (held records do not count).
    pub fn is_animating(&self) -> bool {
        let now = self.clock.now_ms();
        self.windows
            .values()
            .flatten()
            .any(|entry| needs_tick(&entry.record, now))
    }

    /// Whether `window` has any records, held ones included.
    pub fn is_window_active(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    /// Windows with at least one record, in ascending id order.
    pub fn active_windows(&self) -> Vec<WindowId> {
        let mut windows: Vec<WindowId> = self.windows.keys().copied().collect();
        windows.sort_unstable();
        windows
    }

    /// Records on `window`, in scheduling order.
    pub fn records(
        &self,
        window: WindowId,
    ) -> impl Iterator<Item = (AnimationId, &AnimationRecord)> + '_ {
        self.windows
            .get(&window)
            .into_iter()
            .flatten()
            .map(|entry| (entry.id, &entry.record))
    }

    /// Total number of records across all windows.
    pub fn len(&self) -> usize {
        self.windows.values().map(Vec::len).sum()
    }

    /// Whether no records are scheduled.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Diagnostic dump of every record on `window`.
    pub fn describe_window(&self, window: WindowId) -> String {
        let now = self.clock.now_ms();
        let mut out = String::new();
        for (id, record) in self.records(window) {
            let _ = write!(
                out,
                "[{id}]\n{}",
                DescribeRecord {
                    record,
                    now_ms: now,
                }
            );
        }
        out
    }
}

impl<C: Clock> fmt::Debug for AnimationScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("windows", &self.windows.len())
            .field("records", &self.len())
            .field("enabled", &self.enabled)
            .field("duration_factor", &self.duration_factor)
            .finish_non_exhaustive()
    }
}

/// Whether `record` still changes over time at `now_ms`.
fn needs_tick(record: &AnimationRecord, now_ms: u64) -> bool {
    record.is_pending(now_ms) || !record.is_complete()
}

/// Scale a millisecond count by the speed factor. Negative inputs pass
/// through untouched so record creation can reject them.
fn scale_ms(ms: i64, factor: f32) -> i64 {
    if ms <= 0 || factor == 1.0 {
        return ms;
    }
    (ms as f64 * f64::from(factor)).round() as i64
}
