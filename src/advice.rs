//! Event vocabularies and static planning advice.

use serde::Serialize;

/// Known event categories, suitable for [`fuzzy_correct`](crate::fuzzy_correct).
pub const CATEGORIES: [&str; 7] = [
    "Technology",
    "Business",
    "Education",
    "Health",
    "Entertainment",
    "Sports",
    "Arts & Culture",
];

/// Known event types.
pub const EVENT_TYPES: [&str; 7] = [
    "Conference",
    "Workshop",
    "Seminar",
    "Webinar",
    "Festival",
    "Exhibition",
    "Meetup",
];

/// Known tones.
pub const TONES: [&str; 8] = [
    "Professional",
    "Casual",
    "Formal",
    "Creative",
    "Premium",
    "Innovative",
    "Friendly",
    "Corporate",
];

/// Recommended request settings for a (category, event type) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestedSettings {
    pub tone: &'static str,
    pub title_count: usize,
    pub description_chars: usize,
}

const fn settings(
    tone: &'static str,
    title_count: usize,
    description_chars: usize,
) -> SuggestedSettings {
    SuggestedSettings {
        tone,
        title_count,
        description_chars,
    }
}

const DEFAULT_SETTINGS: SuggestedSettings = settings("Professional", 3, 800);

/// Settings that tend to work for `category` / `event_type`.
///
/// Unknown pairs get Professional / 3 titles / 800 characters.
pub fn suggest_settings(category: &str, event_type: &str) -> SuggestedSettings {
    match (category, event_type) {
        ("Technology", "Conference") => settings("Professional", 5, 1200),
        ("Technology", "Workshop") => settings("Creative", 4, 800),
        ("Technology", "Seminar") => settings("Professional", 4, 1000),
        ("Technology", "Webinar") => settings("Innovative", 4, 900),
        ("Technology", "Festival") => settings("Creative", 5, 1100),
        ("Technology", "Exhibition") => settings("Professional", 4, 1000),
        ("Business", "Conference") => settings("Professional", 5, 1400),
        ("Business", "Workshop") => settings("Formal", 4, 900),
        ("Business", "Seminar") => settings("Formal", 3, 1000),
        ("Business", "Webinar") => settings("Professional", 4, 1000),
        ("Business", "Festival") => settings("Professional", 4, 1200),
        ("Business", "Exhibition") => settings("Professional", 4, 1100),
        ("Education", "Conference") => settings("Innovative", 5, 1400),
        ("Education", "Workshop") => settings("Creative", 4, 900),
        ("Education", "Seminar") => settings("Innovative", 4, 1100),
        ("Education", "Webinar") => settings("Creative", 5, 1000),
        ("Education", "Festival") => settings("Creative", 5, 1200),
        ("Education", "Exhibition") => settings("Innovative", 4, 1000),
        ("Health", "Conference") => settings("Professional", 4, 1300),
        ("Health", "Workshop") => settings("Friendly", 4, 900),
        ("Health", "Seminar") => settings("Professional", 3, 800),
        ("Health", "Webinar") => settings("Friendly", 4, 900),
        ("Health", "Festival") => settings("Friendly", 5, 1100),
        ("Health", "Exhibition") => settings("Professional", 4, 1000),
        ("Entertainment", "Conference") => settings("Creative", 4, 1100),
        ("Entertainment", "Workshop") => settings("Casual", 4, 800),
        ("Entertainment", "Seminar") => settings("Creative", 3, 900),
        ("Entertainment", "Webinar") => settings("Casual", 4, 800),
        ("Entertainment", "Festival") => settings("Casual", 5, 1000),
        ("Entertainment", "Exhibition") => settings("Creative", 5, 1100),
        ("Sports", "Conference") => settings("Professional", 4, 1200),
        ("Sports", "Workshop") => settings("Professional", 4, 900),
        ("Sports", "Seminar") => settings("Professional", 3, 800),
        ("Sports", "Webinar") => settings("Professional", 4, 900),
        ("Sports", "Festival") => settings("Casual", 5, 1100),
        ("Sports", "Exhibition") => settings("Professional", 4, 1000),
        ("Arts & Culture", "Conference") => settings("Creative", 4, 1200),
        ("Arts & Culture", "Workshop") => settings("Creative", 4, 900),
        ("Arts & Culture", "Seminar") => settings("Creative", 3, 900),
        ("Arts & Culture", "Webinar") => settings("Creative", 4, 800),
        ("Arts & Culture", "Festival") => settings("Creative", 5, 1200),
        ("Arts & Culture", "Exhibition") => settings("Creative", 5, 1100),
        _ => DEFAULT_SETTINGS,
    }
}

/// A one-line titling tip for the event.
pub fn optimization_tip(category: &str, event_type: &str, tone: &str) -> String {
    let curated = match (category, event_type, tone) {
        ("Technology", "Conference", "Professional") => {
            "Technology conferences perform best with titles that emphasize innovation, future \
             trends, and networking opportunities."
        }
        ("Technology", "Workshop", "Creative") => {
            "Creative technology workshops work best when titles suggest hands-on learning and \
             innovation."
        }
        ("Business", "Workshop", "Formal") => {
            "Formal business workshops should highlight specific skills, ROI, and executive-level \
             insights."
        }
        ("Business", "Conference", "Professional") => {
            "Professional business conferences perform best with titles emphasizing leadership \
             and strategic outcomes."
        }
        ("Education", "Seminar", "Creative") => {
            "Creative education seminars work best when titles suggest transformation and \
             hands-on learning."
        }
        ("Education", "Conference", "Innovative") => {
            "Innovative education conferences should emphasize future learning methods and \
             technology integration."
        }
        ("Health", "Workshop", "Friendly") => {
            "Friendly health workshops perform best with approachable titles that emphasize \
             wellness and community."
        }
        ("Entertainment", "Festival", "Casual") => {
            "Casual entertainment festivals work best with energetic titles that create \
             excitement."
        }
        ("Sports", "Conference", "Professional") => {
            "Professional sports conferences should emphasize performance, strategy, and \
             industry insights."
        }
        ("Arts & Culture", "Exhibition", "Creative") => {
            "Creative arts exhibitions work best with inspiring titles that evoke curiosity and \
             artistic expression."
        }
        _ => {
            return format!(
                "{tone} {event_type}s in {category} perform best when titles clearly communicate \
                 the unique value and target outcome."
            );
        }
    };
    curated.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pair_has_table_settings() {
        let s = suggest_settings("Business", "Conference");
        assert_eq!(s, settings("Professional", 5, 1400));
    }

    #[test]
    fn unknown_pair_gets_default() {
        assert_eq!(suggest_settings("Gardening", "Meetup"), DEFAULT_SETTINGS);
    }

    #[test]
    fn suggestions_stay_within_request_bounds() {
        for category in CATEGORIES {
            for event_type in EVENT_TYPES {
                let s = suggest_settings(category, event_type);
                assert!((1..=5).contains(&s.title_count));
                assert!((100..=5000).contains(&s.description_chars));
                assert!(TONES.contains(&s.tone));
            }
        }
    }

    #[test]
    fn tips_fall_back_to_template() {
        assert!(optimization_tip("Technology", "Conference", "Professional").contains("innovation"));
        assert_eq!(
            optimization_tip("Health", "Meetup", "Casual"),
            "Casual Meetups in Health perform best when titles clearly communicate the unique \
             value and target outcome."
        );
    }
}
