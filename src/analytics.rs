use serde::Serialize;

use crate::domain::filter::FilterParams;

/// Events recorded by the saved filter service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// A filter configuration was saved under a name.
    FilterSaved {
        name: String,
        filter_data: FilterParams,
    },
    /// A saved filter was applied to the listings.
    SavedFilterApplied { filter_id: i32, name: String },
}

impl AnalyticsEvent {
    /// Stable event name used by downstream dashboards.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::FilterSaved { .. } => "filter_saved",
            AnalyticsEvent::SavedFilterApplied { .. } => "saved_filter_applied",
        }
    }
}

/// Fire-and-forget sink for product analytics events.
///
/// Implementations must not fail the caller.
pub trait Analytics {
    fn track(&self, event: AnalyticsEvent);
}

/// Writes each event as a JSON line to the `analytics` log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => log::info!(target: "analytics", "{payload}"),
            Err(err) => log::warn!(target: "analytics", "Dropped {} event: {err}", event.name()),
        }
    }
}

#[cfg(test)]
mockall::mock! {
    pub Analytics {}

    impl Analytics for Analytics {
        fn track(&self, event: AnalyticsEvent);
    }
}
