use crate::domain::permalink::policy::{CharacterSubstitutions, PermalinkPolicy};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static AMPERSANDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"&+").expect("valid regex"));
static SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").expect("valid regex"));
static DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.+").expect("valid regex"));
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]").expect("valid regex"));
static NON_ASCII_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid regex"));
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Text normalization for permalinks.
///
/// Output is lowercase, limited to `[a-z0-9_-]`, free of leading, trailing
/// and repeated hyphens, and at most `max_length` characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrubber {
    substitutions: CharacterSubstitutions,
    max_length: usize,
    transliterate: bool,
}

impl Scrubber {
    pub fn new(substitutions: CharacterSubstitutions, max_length: usize) -> Self {
        Self {
            substitutions,
            max_length,
            transliterate: false,
        }
    }

    pub fn for_policy(policy: &PermalinkPolicy) -> Self {
        Self {
            substitutions: policy.character_substitutions(),
            max_length: policy.max_length(),
            transliterate: policy.transliterate(),
        }
    }

    pub fn with_transliteration(mut self, enabled: bool) -> Self {
        self.transliterate = enabled;
        self
    }

    /// Returns `None` when nothing usable is left: blank input, or input made
    /// only of characters that scrub away.
    pub fn scrub(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let text = self.apply_substitutions(text);
        // Only non-ASCII runs are folded, so ASCII such as `_` passes
        // through to the generic replacement untouched.
        let text = if self.transliterate {
            NON_ASCII_RUNS
                .replace_all(&text, |caps: &Captures<'_>| slug::slugify(&caps[0]))
                .into_owned()
        } else {
            text
        };
        let text = text.to_lowercase();
        let text = NON_SLUG_CHARS.replace_all(text.trim(), "-");
        let text = text.trim_matches('-');
        let text = HYPHEN_RUNS.replace_all(text, "-");

        // Everything is ASCII by now, so byte and char boundaries agree.
        let mut text = text.into_owned();
        text.truncate(self.max_length);
        let text = text.trim_end_matches('-');

        (!text.is_empty()).then(|| text.to_string())
    }

    fn apply_substitutions(&self, text: &str) -> String {
        let mut text = text.to_string();
        if self.substitutions.ampersand {
            text = AMPERSANDS.replace_all(&text, "-and-").into_owned();
        }
        if self.substitutions.slash {
            text = SLASHES.replace_all(&text, "-slash-").into_owned();
        }
        if self.substitutions.dot {
            text = DOTS.replace_all(&text, "-dot-").into_owned();
        }
        text
    }
}
