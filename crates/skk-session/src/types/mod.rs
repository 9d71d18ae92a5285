mod context;
pub(crate) use context::*;

use skk_core::romaji::PunctuationStyle;
use skk_core::settings::Settings;

/// One logical key event, already resolved by the host.
///
/// Characters arrive shift-composed (`'K'`, not shift + `'k'`). Control
/// actions that have no character of their own get dedicated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    Backspace,
    Enter,
    NextCandidate,
    PrevCandidate,
    /// The configurable mode-toggle ("kana") key.
    ToggleKana,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanaStyle {
    Hiragana,
    Katakana,
}

/// Input mode as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Direct(KanaStyle),
    FullWidthLatin,
    LatinPassthrough,
    KanjiReading,
    OkuriganaPending,
    CandidateChoose,
    EnglishToKanji,
    /// A word registration is active and the entry is being typed in
    /// Direct mode.
    Registering,
}

/// Marked (composing) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    pub text: String,
}

/// Candidate panel action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateAction {
    /// Show or update the panel with these entries.
    Show { surfaces: Vec<String>, selected: u32 },
    Hide,
}

/// Response to one key event.
///
/// `marked` always describes the complete composing text after the event;
/// `None` means the host should clear it. `commit` is inserted before the
/// new composing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub consumed: bool,
    pub commit: Option<String>,
    pub marked: Option<MarkedText>,
    pub candidates: CandidateAction,
}

impl KeyResponse {
    /// The key was not handled; the host should process it itself.
    pub fn not_consumed() -> Self {
        Self {
            consumed: false,
            commit: None,
            marked: None,
            candidates: CandidateAction::Hide,
        }
    }

    pub fn marked_text(&self) -> &str {
        self.marked.as_ref().map_or("", |m| m.text.as_str())
    }

    pub fn commit_text(&self) -> &str {
        self.commit.as_deref().unwrap_or("")
    }
}

/// Session behaviour supplied by the host at startup.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub punctuation: PunctuationStyle,
    /// Start in hiragana input rather than Latin passthrough.
    pub start_in_kana: bool,
    /// Number of dictionary keys scanned for completion suggestions.
    pub completion_limit: usize,
    /// Offer key-completion suggestions while a reading is typed.
    pub show_completions: bool,
}

impl SessionOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            punctuation: settings.input.punctuation,
            start_in_kana: settings.input.start_in_kana,
            completion_limit: settings.dictionary.completion_limit,
            show_completions: settings.input.candidate_strip,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            punctuation: PunctuationStyle::default(),
            start_in_kana: true,
            completion_limit: 5,
            show_completions: true,
        }
    }
}

pub(crate) fn cyclic_index(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current as i32;
    let n = count as i32;
    ((c + delta).rem_euclid(n)) as usize
}
