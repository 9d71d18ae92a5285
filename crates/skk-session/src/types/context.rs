use skk_core::dict::Candidate;

/// Internal input mode. Registration is tracked separately in
/// [`ConversionContext::registration`] and overlays any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Direct,
    FullWidthLatin,
    LatinPassthrough,
    KanjiReading,
    OkuriganaPending,
    CandidateChoose,
    EnglishToKanji,
}

/// Where the key of the current conversion was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConversionOrigin {
    /// Kana reading from `KanjiReading` / `OkuriganaPending`.
    Reading,
    /// Literal Latin text from `EnglishToKanji`.
    English,
}

/// Word registration in progress.
#[derive(Debug, Clone)]
pub(crate) struct RegistrationSession {
    /// Dictionary key the new entry is stored under.
    pub(crate) key: String,
    /// Text to restore on cancel: the kana stem or the literal Latin key.
    pub(crate) reading: String,
    pub(crate) origin: ConversionOrigin,
    /// Okurigana appended to the entry when it is committed.
    pub(crate) okurigana: Option<String>,
    pub(crate) entry: String,
}

/// All mutable conversion state, threaded through every transition.
#[derive(Debug, Default)]
pub(crate) struct ConversionContext {
    /// Romaji not yet resolved; literal text in `EnglishToKanji`.
    pub(crate) composing: String,
    /// Kana reading (dictionary key without the okuri consonant).
    pub(crate) reading: String,
    /// Lower-cased consonant that started okurigana capture.
    pub(crate) okuri_consonant: Option<char>,
    /// Okurigana resolved so far.
    pub(crate) okurigana: Option<String>,
    /// Key of the active conversion.
    pub(crate) key: String,
    pub(crate) origin: Option<ConversionOrigin>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) selected: usize,
    /// Completion suggestions for the reading being typed.
    pub(crate) suggestions: Vec<String>,
    pub(crate) registration: Option<RegistrationSession>,
}

impl ConversionContext {
    /// Drop the composition, keeping any registration.
    pub(crate) fn clear_composition(&mut self) {
        self.composing.clear();
        self.reading.clear();
        self.clear_okuri();
        self.clear_conversion();
        self.suggestions.clear();
    }

    pub(crate) fn clear_okuri(&mut self) {
        self.okuri_consonant = None;
        self.okurigana = None;
    }

    pub(crate) fn clear_conversion(&mut self) {
        self.key.clear();
        self.origin = None;
        self.candidates.clear();
        self.selected = 0;
    }

    /// Dictionary key for the reading as currently captured.
    pub(crate) fn reading_key(&self) -> String {
        let mut key = self.reading.clone();
        if let Some(c) = self.okuri_consonant {
            key.push(c);
        }
        key
    }

    pub(crate) fn current_candidate(&self) -> Option<&Candidate> {
        self.candidates.get(self.selected)
    }

    pub(crate) fn is_registering(&self) -> bool {
        self.registration.is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.composing.is_empty() && self.reading.is_empty()
    }
}

/// Text produced while handling one event.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub(crate) commit: String,
}
