use crate::logging::{LogEvent, LogLevel};

/// Counters collected while composing one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Content rows emitted between the borders.
    pub rows: u64,
    /// Empty input lines that produced no row.
    pub dropped_empty: u64,
    /// Lines cut down by the truncator.
    pub truncated: u64,
    /// Header labels too wide for their border, emitted with zero fill.
    pub label_clamped: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_row(&mut self, truncated: bool) {
        self.rows = self.rows.saturating_add(1);
        if truncated {
            self.truncated = self.truncated.saturating_add(1);
        }
    }

    pub fn record_dropped(&mut self) {
        self.dropped_empty = self.dropped_empty.saturating_add(1);
    }

    pub fn record_label_clamp(&mut self) {
        self.label_clamped = self.label_clamped.saturating_add(1);
    }

    /// Fold another frame's counters into this one.
    pub fn merge(&mut self, other: &FrameStats) {
        self.rows = self.rows.saturating_add(other.rows);
        self.dropped_empty = self.dropped_empty.saturating_add(other.dropped_empty);
        self.truncated = self.truncated.saturating_add(other.truncated);
        self.label_clamped = self.label_clamped.saturating_add(other.label_clamped);
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::new(LogLevel::Debug, target, "frame.rendered")
            .field("rows", self.rows)
            .field("dropped_empty", self.dropped_empty)
            .field("truncated", self.truncated)
            .field("label_clamped", self.label_clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_merge() {
        let mut stats = FrameStats::new();
        stats.record_row(false);
        stats.record_row(true);
        stats.record_dropped();

        let mut total = FrameStats::new();
        total.record_label_clamp();
        total.merge(&stats);

        assert_eq!(total.rows, 2);
        assert_eq!(total.truncated, 1);
        assert_eq!(total.dropped_empty, 1);
        assert_eq!(total.label_clamped, 1);
    }

    #[test]
    fn log_event_carries_every_counter() {
        let mut stats = FrameStats::new();
        stats.record_row(true);
        let event = stats.to_log_event("boxframe::frame");
        assert_eq!(event.message, "frame.rendered");
        assert_eq!(event.fields["rows"], 1);
        assert_eq!(event.fields["truncated"], 1);
        assert_eq!(event.fields.len(), 4);
    }
}
