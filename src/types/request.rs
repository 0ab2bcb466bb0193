//! Generation request types

use serde::{Deserialize, Serialize};

use super::CostMode;

/// Smallest and largest number of titles a single request may ask for.
pub const MIN_TITLES: usize = 1;
pub const MAX_TITLES: usize = 5;

/// Bounds on the description character budget.
pub const MIN_DESCRIPTION_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Request for a batch of event titles.
///
/// ```rust
/// # use eventsmith::{CostMode, TitleRequest};
/// let request = TitleRequest::new("Technology", "Conference", "Professional")
///     .count(3)
///     .cost_mode(CostMode::Premium);
/// assert_eq!(request.count, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRequest {
    pub category: String,
    pub event_type: String,
    pub tone: String,
    /// Requested number of titles; clamped to `[1, 5]` at generation time.
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub cost_mode: CostMode,
}

impl TitleRequest {
    pub fn new(
        category: impl Into<String>,
        event_type: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            event_type: event_type.into(),
            tone: tone.into(),
            count: MAX_TITLES,
            context: None,
            cost_mode: CostMode::default(),
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// Requested count clamped to the supported range.
    pub fn clamped_count(&self) -> usize {
        self.count.clamp(MIN_TITLES, MAX_TITLES)
    }
}

/// Request for a single event description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionRequest {
    pub title: String,
    pub category: String,
    pub event_type: String,
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Character budget; clamped to `[100, 5000]` at generation time.
    pub max_chars: usize,
    #[serde(default)]
    pub cost_mode: CostMode,
}

impl DescriptionRequest {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        event_type: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            event_type: event_type.into(),
            tone: tone.into(),
            context: None,
            max_chars: MAX_DESCRIPTION_CHARS,
            cost_mode: CostMode::default(),
        }
    }

    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// Character budget clamped to the supported range.
    pub fn clamped_max_chars(&self) -> usize {
        self.max_chars
            .clamp(MIN_DESCRIPTION_CHARS, MAX_DESCRIPTION_CHARS)
    }
}

/// Trimmed context, or `None` when absent or blank.
pub(crate) fn effective_context(context: Option<&str>) -> Option<&str> {
    context.map(str::trim).filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_count_is_clamped() {
        let base = TitleRequest::new("Technology", "Conference", "Professional");
        assert_eq!(base.clone().count(0).clamped_count(), 1);
        assert_eq!(base.clone().count(3).clamped_count(), 3);
        assert_eq!(base.count(12).clamped_count(), 5);
    }

    #[test]
    fn description_budget_is_clamped() {
        let base = DescriptionRequest::new("T", "Technology", "Conference", "Professional");
        assert_eq!(base.clone().max_chars(10).clamped_max_chars(), 100);
        assert_eq!(base.clone().max_chars(800).clamped_max_chars(), 800);
        assert_eq!(base.max_chars(9000).clamped_max_chars(), 5000);
    }

    #[test]
    fn blank_context_is_ignored() {
        assert_eq!(effective_context(Some("   ")), None);
        assert_eq!(effective_context(Some(" AI focus ")), Some("AI focus"));
        assert_eq!(effective_context(None), None);
    }
}
