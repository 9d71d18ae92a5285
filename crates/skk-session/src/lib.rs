//! SKK conversion state machine.
//!
//! `InputSession` owns the composing, reading and okurigana buffers plus any
//! word registration, processes one key event at a time, and answers with
//! the text to commit, the composing text to display and the candidate list.

pub(crate) mod types;

mod choose;
mod direct;
mod key_handlers;
mod reading;
mod registration;
mod response;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use skk_core::dict::{LearningStore, Lookup};
use skk_core::romaji::Transliterator;

pub use types::{
    CandidateAction, KanaStyle, KeyEvent, KeyResponse, MarkedText, Mode, SessionOptions,
};

use types::{ConversionContext, InputMode};

/// Stateful SKK session for one input context.
pub struct InputSession {
    system: Arc<dyn Lookup>,
    user: Box<dyn LearningStore>,
    options: SessionOptions,
    romaji: Transliterator<'static>,

    mode: InputMode,
    /// Kana style of Direct input, kept across conversions.
    kana: KanaStyle,
    ctx: ConversionContext,
}

impl InputSession {
    pub fn new(
        system: Arc<dyn Lookup>,
        user: Box<dyn LearningStore>,
        options: SessionOptions,
    ) -> Self {
        let mode = if options.start_in_kana {
            InputMode::Direct
        } else {
            InputMode::LatinPassthrough
        };
        Self {
            system,
            user,
            romaji: Transliterator::global(options.punctuation),
            options,
            mode,
            kana: KanaStyle::Hiragana,
            ctx: ConversionContext::default(),
        }
    }

    /// Current mode. A registration reports `Registering` while its entry
    /// is typed in Direct mode; otherwise the inner mode is reported.
    pub fn mode(&self) -> Mode {
        match self.mode {
            InputMode::Direct if self.ctx.is_registering() => Mode::Registering,
            InputMode::Direct => Mode::Direct(self.kana),
            InputMode::FullWidthLatin => Mode::FullWidthLatin,
            InputMode::LatinPassthrough => Mode::LatinPassthrough,
            InputMode::KanjiReading => Mode::KanjiReading,
            InputMode::OkuriganaPending => Mode::OkuriganaPending,
            InputMode::CandidateChoose => Mode::CandidateChoose,
            InputMode::EnglishToKanji => Mode::EnglishToKanji,
        }
    }

    pub fn is_registering(&self) -> bool {
        self.ctx.is_registering()
    }

    /// True when any buffer or registration is active.
    pub fn is_composing(&self) -> bool {
        self.ctx.is_registering()
            || !self.ctx.is_empty()
            || matches!(
                self.mode,
                InputMode::KanjiReading
                    | InputMode::OkuriganaPending
                    | InputMode::CandidateChoose
                    | InputMode::EnglishToKanji
            )
    }

    /// Composing text as it would be displayed now.
    pub fn composed_string(&self) -> String {
        self.display()
    }

    /// Candidates (or completion suggestions) currently offered.
    pub fn candidates(&self) -> Vec<String> {
        match self.candidate_action() {
            CandidateAction::Show { surfaces, .. } => surfaces,
            CandidateAction::Hide => Vec::new(),
        }
    }

    /// Force the user dictionary's buffered writes to disk.
    pub fn commit_changes(&mut self) {
        self.user.commit_changes();
    }

    /// Read access to the user dictionary.
    pub fn user_dictionary(&self) -> &dyn LearningStore {
        self.user.as_ref()
    }
}
