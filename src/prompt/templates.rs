//! Prompt construction for titles and descriptions.
//!
//! Every builder returns a [`PromptPlan`]: the system/user prompt pair plus
//! the output-token bound and temperature for that call. Wording varies by
//! [`CostMode`] but the structural asks stay fixed: a JSON list of 3–6 word
//! unique titles, or flowing prose of a target length ending in a
//! call-to-action.

use crate::types::CostMode;

/// Inclusive word-count bounds for a title.
pub const MIN_TITLE_WORDS: usize = 3;
pub const MAX_TITLE_WORDS: usize = 6;

/// A ready-to-send prompt pair with its sampling bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPlan {
    pub system: String,
    pub user: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

/// The event being written about.
#[derive(Debug, Clone, Copy)]
pub struct EventBrief<'a> {
    pub category: &'a str,
    pub event_type: &'a str,
    pub tone: &'a str,
    /// Already trimmed; `None` when blank.
    pub context: Option<&'a str>,
}

const TITLE_DIVERSITY: &str = "Each title MUST be unique, creative and use different wording. \
Avoid repeating phrases or structures. No emojis or decorative symbols.";

const DESCRIPTION_STYLE: &str = "Write in flowing paragraphs without bullet points or numbered \
lists. Use natural transitions between ideas. End with a strong call-to-action. No emojis or \
decorative symbols.";

const PREMIUM_TITLE_SAMPLES: [&str; 3] = [
    r#"["Innovate Now Summit", "Future Leaders Forum", "Tech Vision Expo"]"#,
    r#"["Business Growth Bootcamp", "Leadership Mastery Workshop", "Strategic Success Seminar"]"#,
    r#"["Learning Revolution Conference", "Education Innovation Forum", "Teaching Excellence Expo"]"#,
];

/// Example titles for a (category, event type, tone) combination.
///
/// Known combinations return curated examples; anything else gets three
/// templated ones.
pub fn title_examples(category: &str, event_type: &str, tone: &str) -> Vec<String> {
    let curated: &[&str] = match (category, event_type, tone) {
        ("Technology", "Conference", "Professional") => &[
            "Tech Leadership Summit",
            "Digital Innovation Forum",
            "Future Systems Expo",
        ],
        ("Technology", "Workshop", "Creative") => &[
            "Code & Create Lab",
            "Innovation Studio",
            "Digital Makers Hub",
        ],
        ("Business", "Conference", "Professional") => &[
            "Business Growth Summit",
            "Leadership Excellence Forum",
            "Strategic Success Conference",
        ],
        ("Business", "Seminar", "Formal") => &[
            "Executive Mastery Series",
            "Strategic Leadership Institute",
            "Business Excellence Summit",
        ],
        ("Education", "Conference", "Innovative") => &[
            "Learning Revolution Summit",
            "Educational Innovation Forum",
            "Teaching Excellence Expo",
        ],
        _ => {
            return vec![
                format!("{category} Excellence Summit"),
                format!("{event_type} Innovation Forum"),
                format!("Advanced {category} Workshop"),
            ];
        }
    };
    curated.iter().map(|s| s.to_string()).collect()
}

fn title_context_block(context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!(
            "\n\nCRITICAL CONTEXT REQUIREMENTS:\n\
             - Incorporate the following specific context: {ctx}\n\
             - Titles must reflect the unique aspects mentioned in the context\n\
             - Avoid generic titles that ignore the context"
        ),
        None => String::new(),
    }
}

fn description_context_block(context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!(
            "\n\nCRITICAL CONTEXT REQUIREMENTS:\n\
             - Incorporate the following specific context: {ctx}\n\
             - The description must reflect the unique aspects mentioned in the context\n\
             - Avoid generic copy that ignores the context"
        ),
        None => String::new(),
    }
}

/// Primary prompt for `count` titles.
pub fn title_prompt(brief: &EventBrief<'_>, count: usize, mode: CostMode) -> PromptPlan {
    let EventBrief {
        category,
        event_type,
        tone,
        context,
    } = *brief;
    let tone_lc = tone.to_lowercase();
    let ctx = title_context_block(context);

    match mode {
        CostMode::Economy => PromptPlan {
            system: format!(
                "Generate EXACTLY {count} creative, unique {tone_lc} event titles for {category} \
                 {event_type}. Each MUST be {MIN_TITLE_WORDS}-{MAX_TITLE_WORDS} words, no colons. \
                 JSON array format. {TITLE_DIVERSITY}{ctx}"
            ),
            user: format!(
                "Create {count} unique, creative titles for {category} {event_type} ({tone}). \
                 Output MUST be a JSON array.{ctx}"
            ),
            max_tokens: 15 * count + 40,
            temperature: 0.85,
        },
        CostMode::Balanced => {
            let examples = title_examples(category, event_type, tone);
            PromptPlan {
                system: format!(
                    "Professional event title generator. Create EXACTLY {count} {tone_lc} titles \
                     for {category} {event_type}.\n\n\
                     REQUIREMENTS:\n\
                     - Generate EXACTLY {count} titles\n\
                     - Length MUST be {MIN_TITLE_WORDS}-{MAX_TITLE_WORDS} words each\n\
                     - Style: {tone_lc}, memorable\n\
                     - Output MUST be a JSON array only\n\
                     - {TITLE_DIVERSITY}\n\n\
                     Examples: {}, {}{ctx}",
                    examples[0], examples[1]
                ),
                user: format!(
                    "Generate EXACTLY {count} unique titles: {category} {event_type} ({tone}). \
                     Return a JSON array only; this is REQUIRED.{ctx}"
                ),
                max_tokens: 18 * count + 50,
                temperature: 0.85,
            }
        }
        CostMode::Premium => {
            let samples = PREMIUM_TITLE_SAMPLES.join("\n");
            PromptPlan {
                system: format!(
                    "Expert event marketer. Generate EXACTLY {count} compelling {tone_lc} titles \
                     for {category} {event_type}.\n\n\
                     CRITICAL REQUIREMENTS:\n\
                     - Generate EXACTLY {count} titles, no more, no less\n\
                     - Each title must be {MIN_TITLE_WORDS}-{MAX_TITLE_WORDS} words long\n\
                     - Each title must be unique and creative\n\
                     - Use different words, phrases and focus areas for each title\n\
                     - Format as a clean JSON array: [\"Title 1\", \"Title 2\", \"Title 3\"]\n\
                     - NO explanations, NO extra text, just the JSON array\n\n\
                     Examples of diverse titles:\n{samples}\n\n\
                     Style: {tone_lc}, memorable, actionable{ctx}"
                ),
                user: format!(
                    "Generate EXACTLY {count} exceptional, unique titles for {category} \
                     {event_type} with {tone} tone. Return only a JSON array.{ctx}"
                ),
                max_tokens: 20 * count + 60,
                temperature: 0.9,
            }
        }
    }
}

/// Follow-up prompt asking for `needed` more titles, avoiding `accepted`.
pub fn title_retry_prompt(
    primary: &PromptPlan,
    brief: &EventBrief<'_>,
    count: usize,
    needed: usize,
    accepted: &[String],
) -> PromptPlan {
    let EventBrief {
        category,
        event_type,
        tone,
        ..
    } = *brief;
    PromptPlan {
        system: primary.system.replace(
            &format!("EXACTLY {count}"),
            &format!("EXACTLY {needed} additional"),
        ),
        user: format!(
            "Generate {needed} more unique titles for {category} {event_type} ({tone}). \
             Titles MUST differ from these existing titles: {}. Return a JSON array only.",
            accepted.join(", ")
        ),
        max_tokens: primary.max_tokens + 20,
        temperature: primary.temperature + 0.1,
    }
}

/// Primary prompt for a description of about `max_chars` characters.
pub fn description_prompt(
    title: &str,
    brief: &EventBrief<'_>,
    max_chars: usize,
    mode: CostMode,
) -> PromptPlan {
    let EventBrief {
        category,
        event_type,
        tone,
        context,
    } = *brief;
    let tone_lc = tone.to_lowercase();
    let ctx = description_context_block(context);

    match mode {
        CostMode::Economy => PromptPlan {
            system: format!(
                "Write a compelling {tone_lc} description for '{title}' - {category} {event_type}. \
                 It MUST be EXACTLY {max_chars} characters. Include benefits and a call-to-action. \
                 Use all available space. {DESCRIPTION_STYLE}{ctx}"
            ),
            user: format!(
                "Description for: {title} ({category} {event_type}, {tone}) (MUST be {max_chars} \
                 characters){ctx}"
            ),
            max_tokens: (max_chars as f64 / 2.8) as usize + 50,
            temperature: 0.7,
        },
        CostMode::Balanced => PromptPlan {
            system: format!(
                "Professional copywriter. Create an engaging {tone_lc} description for '{title}' - \
                 {category} {event_type}.\n\
                 Length REQUIRED: EXACTLY {max_chars} characters (use all available space, do not \
                 stop early)\n\
                 Include: value proposition, benefits, call-to-action\n\
                 Style: {tone_lc}, compelling{ctx}\n\
                 {DESCRIPTION_STYLE} These style rules MUST be followed."
            ),
            user: format!(
                "Write description: '{title}' ({category} {event_type}, {tone}). Target \
                 {max_chars} chars. Use all available space; the length is REQUIRED.{ctx}"
            ),
            max_tokens: (max_chars as f64 / 2.6) as usize + 75,
            temperature: 0.72,
        },
        CostMode::Premium => PromptPlan {
            system: format!(
                "Expert copywriter. Write a compelling {max_chars}-character description for \
                 '{title}' - {tone_lc} {event_type} in {category}.\n\
                 Structure: Hook → Problem → Solution → Benefits → CTA\n\
                 Tone: {tone_lc}, persuasive, action-oriented\n\
                 TARGET: Use the full {max_chars} characters available. Do not stop early. Fill \
                 all space. {DESCRIPTION_STYLE}{ctx}"
            ),
            user: format!(
                "Write description for '{title}' ({category} {event_type}, {tone}). MUST be as \
                 close as possible to {max_chars} characters.{ctx}"
            ),
            max_tokens: (max_chars as f64 / 2.5) as usize + 100,
            temperature: 0.75,
        },
    }
}

/// Follow-up prompt that extends `current` toward `max_chars`.
pub fn extension_prompt(current: &str, max_chars: usize, temperature: f32) -> PromptPlan {
    let remaining = max_chars.saturating_sub(current.chars().count());
    PromptPlan {
        system: format!(
            "You are extending an event description. You MUST add about {remaining} more \
             characters to make it more detailed and compelling. {DESCRIPTION_STYLE}"
        ),
        user: format!(
            "Current description: {current}\n\n\
             Continue this description with more details, benefits, or a call-to-action to \
             reach closer to {max_chars} total characters. Output ONLY the new text; it is \
             REQUIRED not to repeat the current description."
        ),
        max_tokens: (remaining as f64 / 2.5) as usize + 30,
        temperature,
    }
}
