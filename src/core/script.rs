//! Dialogue script parsing into sentence-grained caption units.
//!
//! A script is a UTF-8 text where each line is either a speaker turn
//! (`Speaker 2: text`) or a bare continuation of the current speaker.
//! The parser splits each turn into sentences and packs consecutive
//! sentences into [`CaptionUnit`]s of bounded word count, never breaking
//! a sentence across units.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default word budget per caption unit.
pub const DEFAULT_MAX_WORDS: usize = 15;

static SPEAKER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Speaker\s+(\d+)\s*:\s*(.*)$").unwrap());

// Matches the whitespace that ends a sentence; the terminal punctuation
// stays with the preceding sentence.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// One parsed, sentence-aligned caption candidate before timing is assigned.
///
/// Units are produced once by [`ScriptParser::parse`] and are immutable from
/// then on. `text` carries one or more whole sentences joined by a single
/// space and never contains a speaker prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionUnit {
    /// Speaker identifier from the `Speaker N:` prefix (1-based).
    pub speaker_id: u32,
    /// Sentence text of the unit.
    pub text: String,
    /// Whitespace-split token count of `text`.
    pub word_count: usize,
    /// Character count of `text`.
    pub char_count: usize,
}

impl CaptionUnit {
    fn new(speaker_id: u32, text: String) -> Self {
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        Self {
            speaker_id,
            text,
            word_count,
            char_count,
        }
    }
}

/// Parser turning raw scripts into ordered [`CaptionUnit`] lists.
///
/// # Examples
///
/// ```rust
/// use capx_cli::core::script::ScriptParser;
///
/// let parser = ScriptParser::new(15);
/// let units = parser.parse("Speaker 1: Hello there.\nSpeaker 2: Hi back!");
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[0].speaker_id, 1);
/// assert_eq!(units[1].text, "Hi back!");
/// ```
#[derive(Debug, Clone)]
pub struct ScriptParser {
    max_words: usize,
}

impl ScriptParser {
    /// Create a parser with the given per-unit word budget.
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Parse a script into caption units in script order.
    ///
    /// Lines with a `Speaker N:` prefix set the current speaker; any other
    /// non-empty line continues the current speaker. A bare line before any
    /// speaker prefix defaults to speaker 1 with a warning. An entirely
    /// empty script yields an empty list; nothing here is fatal.
    pub fn parse(&self, script: &str) -> Vec<CaptionUnit> {
        let mut units = Vec::new();
        let mut current_speaker: Option<u32> = None;

        for line in script.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = SPEAKER_LINE.captures(line) {
                // The pattern only admits decimal digits; an id too large
                // for u32 falls back to continuation handling below.
                if let Ok(id) = caps[1].parse::<u32>() {
                    current_speaker = Some(id);
                    let text = caps[2].trim();
                    if !text.is_empty() {
                        self.pack_sentences(id, text, &mut units);
                    }
                    continue;
                }
            }

            let speaker = match current_speaker {
                Some(id) => id,
                None => {
                    warn!(
                        "No speaker label before line, defaulting to Speaker 1: {}",
                        truncate_for_log(line)
                    );
                    current_speaker = Some(1);
                    1
                }
            };
            self.pack_sentences(speaker, line, &mut units);
        }

        units
    }

    /// Split `text` into sentences and pack them into units of at most
    /// `max_words` words. A sentence that would overflow a non-empty bucket
    /// flushes the bucket first; a single oversized sentence still becomes
    /// one intact unit.
    fn pack_sentences(&self, speaker_id: u32, text: &str, units: &mut Vec<CaptionUnit>) {
        let mut bucket: Vec<String> = Vec::new();
        let mut bucket_words = 0usize;

        for sentence in split_sentences(text) {
            let sentence_words = sentence.split_whitespace().count();
            if bucket_words + sentence_words > self.max_words && !bucket.is_empty() {
                units.push(CaptionUnit::new(speaker_id, bucket.join(" ")));
                bucket_words = sentence_words;
                bucket = vec![sentence];
            } else {
                bucket.push(sentence);
                bucket_words += sentence_words;
            }
        }

        if !bucket.is_empty() {
            units.push(CaptionUnit::new(speaker_id, bucket.join(" ")));
        }
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS)
    }
}

/// Split text into sentences on whitespace that follows `.`, `!` or `?`,
/// keeping the punctuation with the preceding sentence. Text without any
/// sentence-ending punctuation is returned as a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut last = 0usize;
    for m in SENTENCE_BREAK.find_iter(trimmed) {
        // The match starts on the punctuation character; the sentence ends
        // right after it.
        let end = m.start() + 1;
        let part = trimmed[last..end].trim();
        if !part.is_empty() {
            sentences.push(part.to_string());
        }
        last = m.end();
    }
    let tail = trimmed[last..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

fn truncate_for_log(line: &str) -> String {
    const LIMIT: usize = 50;
    if line.chars().count() <= LIMIT {
        line.to_string()
    } else {
        let cut: String = line.chars().take(LIMIT).collect();
        format!("{}...", cut)
    }
}
