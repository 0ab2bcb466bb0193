//! Cost-mode prompt shaping.

use crate::types::CostMode;

/// Lines containing any of these (case-insensitive) survive compression intact.
pub const EMPHASIS_MARKERS: [&str; 4] = ["CRITICAL", "MUST", "REQUIRED", "ESSENTIAL"];

/// Filler phrases rewritten in economy mode, with their replacements.
pub const FILLER_PHRASES: [(&str, &str); 4] = [
    ("Please provide", "Provide"),
    ("You should", ""),
    ("It is important to", ""),
    ("Make sure to", ""),
];

/// Fraction of each ordinary line dropped in economy mode.
pub const ECONOMY_REDUCTION: f64 = 0.5;
/// Fraction of each ordinary line dropped in balanced mode.
pub const BALANCED_REDUCTION: f64 = 0.25;

/// Lossy, one-way prompt compression keyed on [`CostMode`].
pub struct PromptOptimizer;

impl PromptOptimizer {
    /// Shape `prompt` for `mode`.
    ///
    /// - economy: [`compress`](Self::compress) at 0.5, then strip filler phrases
    /// - balanced: [`compress`](Self::compress) at 0.25
    /// - premium: unchanged
    pub fn optimize(prompt: &str, mode: CostMode) -> String {
        match mode {
            CostMode::Economy => {
                let compressed = Self::compress(prompt, ECONOMY_REDUCTION);
                FILLER_PHRASES
                    .iter()
                    .fold(compressed, |text, (phrase, replacement)| {
                        text.replace(phrase, replacement)
                    })
            }
            CostMode::Balanced => Self::compress(prompt, BALANCED_REDUCTION),
            CostMode::Premium => prompt.to_string(),
        }
    }

    /// Line-level compression.
    ///
    /// Emphasised lines are kept whole. Other lines longer than ten
    /// characters that are not bullets keep the first `1 - reduction` of
    /// their characters. Short lines and bullets are dropped.
    pub fn compress(prompt: &str, reduction: f64) -> String {
        let keep_ratio = (1.0 - reduction).clamp(0.0, 1.0);
        prompt
            .split('\n')
            .filter_map(|line| {
                if is_emphasised(line) {
                    return Some(line.to_string());
                }
                let trimmed = line.trim();
                if trimmed.chars().count() > 10 && !trimmed.starts_with('-') {
                    let keep = (line.chars().count() as f64 * keep_ratio) as usize;
                    Some(line.chars().take(keep).collect())
                } else {
                    None
                }
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn is_emphasised(line: &str) -> bool {
    let upper = line.to_uppercase();
    EMPHASIS_MARKERS.iter().any(|marker| upper.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_is_identity() {
        let prompt = "short\n- bullet\nA line that is definitely long enough";
        assert_eq!(PromptOptimizer::optimize(prompt, CostMode::Premium), prompt);
    }

    #[test]
    fn emphasised_lines_survive_whole() {
        let prompt = "- you must keep this bullet\nCritical: never drop";
        let out = PromptOptimizer::compress(prompt, 0.5);
        assert_eq!(out, prompt);
    }

    #[test]
    fn short_lines_and_bullets_are_dropped() {
        let prompt = "tiny\n- a bullet that is quite long\n   \n0123456789AB";
        let out = PromptOptimizer::compress(prompt, 0.5);
        assert_eq!(out, "012345");
    }

    #[test]
    fn balanced_keeps_three_quarters() {
        let line = "abcdefghijklmnopqrst"; // 20 chars
        assert_eq!(
            PromptOptimizer::optimize(line, CostMode::Balanced),
            "abcdefghijklmno"
        );
    }

    #[test]
    fn economy_strips_filler_from_emphasised_lines() {
        let prompt = "Please provide titles. You MUST make sure to be brief.";
        let out = PromptOptimizer::optimize(prompt, CostMode::Economy);
        assert_eq!(out, "Provide titles. You MUST make sure to be brief.");

        let prompt = "REQUIRED: It is important to be concise. Make sure to rhyme.";
        let out = PromptOptimizer::optimize(prompt, CostMode::Economy);
        assert_eq!(out, "REQUIRED:  be concise.  rhyme.");
    }

    #[test]
    fn truncation_is_char_safe() {
        let line = "éééééééééééééééééééé"; // 20 two-byte chars
        let out = PromptOptimizer::compress(line, 0.5);
        assert_eq!(out.chars().count(), 10);
    }
}
