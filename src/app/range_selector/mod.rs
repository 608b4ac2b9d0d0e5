// Range selector - Keeps the start/end pickers valid for the current video

use tracing::debug;

use crate::domain::model::*;
use crate::domain::rules::RangePolicy;
use crate::utils::time::format_clock;

/// User-editable start/end time pair bound to one video's duration.
///
/// The derived [`ClipInterval`] is recomputed on every edit and always
/// satisfies `start <= end <= duration`. Invalid input is corrected, never
/// rejected: when the end would not lie after the start it is pushed to
/// `start + min_clip` (or the video end) and the end picker is rewritten to
/// show the corrected value.
pub struct RangeSelector {
    policy: RangePolicy,
    duration: u64,
    start: TimeSelection,
    end: TimeSelection,
    interval: ClipInterval,
}

impl RangeSelector {
    pub fn new(min_clip_seconds: u64) -> Self {
        Self {
            policy: RangePolicy::new(min_clip_seconds),
            duration: 0,
            start: TimeSelection::default(),
            end: TimeSelection::default(),
            interval: ClipInterval::default(),
        }
    }

    /// Bind to a newly extracted video: start at zero, end at the full duration
    pub fn initialize(&mut self, duration: u64) {
        self.duration = duration;
        self.start = TimeSelection::default();
        self.end = TimeSelection::from_seconds(duration);
        self.on_field_change();
        debug!(duration, interval = %self.interval, "Range selector initialized");
    }

    /// Recompute the interval after any picker edit
    pub fn on_field_change(&mut self) -> ClipInterval {
        let derived = self.policy.derive(&self.start, &self.end, self.duration);
        if let Some(corrected) = derived.corrected_end {
            debug!(from = %self.end, to = %corrected, "End time corrected");
            self.end = corrected;
        }
        self.interval = derived.interval;
        self.interval
    }

    /// Last computed interval
    pub fn current_interval(&self) -> ClipInterval {
        self.interval
    }

    /// Change one field of one picker; the value is held to the field's range
    pub fn edit(&mut self, endpoint: Endpoint, field: TimeField, value: u32) -> ClipInterval {
        let max_hour = self.max_hour();
        let slot = match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        };
        *slot = slot.with_field(field, value).clamp_fields(max_hour);
        self.on_field_change()
    }

    pub fn set_start(&mut self, selection: TimeSelection) -> ClipInterval {
        self.start = selection.clamp_fields(self.max_hour());
        self.on_field_change()
    }

    pub fn set_end(&mut self, selection: TimeSelection) -> ClipInterval {
        self.end = selection.clamp_fields(self.max_hour());
        self.on_field_change()
    }

    pub fn start(&self) -> TimeSelection {
        self.start
    }

    pub fn end(&self) -> TimeSelection {
        self.end
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Largest value the hour pickers offer
    pub fn max_hour(&self) -> u32 {
        max_hour_for(self.duration)
    }

    pub fn min_clip_seconds(&self) -> u64 {
        self.policy.min_clip_seconds()
    }

    /// Segment label, e.g. `clip: 2:00 - 2:05`
    pub fn segment_label(&self) -> String {
        format!("clip: {}", self.interval)
    }

    /// Clip length label, e.g. `Duration: 0:05`
    pub fn length_label(&self) -> String {
        format!("Duration: {}", format_clock(self.interval.length()))
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::new(crate::domain::rules::DEFAULT_MIN_CLIP_SECONDS)
    }
}
