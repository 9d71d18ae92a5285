use tracing::debug;

use skk_core::candidates::lookup_merged;

use super::types::{cyclic_index, ConversionOrigin, Effects, InputMode};
use super::InputSession;

impl InputSession {
    /// Look `key` up and enter `CandidateChoose`, or start a registration
    /// when nothing is found.
    pub(crate) fn start_conversion(&mut self, key: String, origin: ConversionOrigin) {
        // Unresolved okurigana romaji is not part of the conversion.
        if matches!(origin, ConversionOrigin::Reading) {
            self.ctx.composing.clear();
        }
        let found = lookup_merged(self.system.as_ref(), self.user.as_ref(), &key)
            .filter(|c| !c.is_empty());

        match found {
            Some(candidates) => {
                debug!(%key, count = candidates.len(), "conversion");
                self.ctx.suggestions.clear();
                self.ctx.key = key;
                self.ctx.origin = Some(origin);
                self.ctx.candidates = candidates;
                self.ctx.selected = 0;
                self.mode = InputMode::CandidateChoose;
            }
            None if self.ctx.is_registering() => {
                debug!(%key, "no candidates during registration, staying in reading");
                self.return_to_origin(origin);
            }
            None => self.start_registration(key, origin),
        }
    }

    pub(super) fn choose_char(&mut self, ch: char, fx: &mut Effects) -> bool {
        let last = self.ctx.candidates.len().saturating_sub(1);
        match ch {
            ' ' if self.ctx.selected == last && !self.ctx.is_registering() => {
                let key = self.ctx.key.clone();
                let origin = self.ctx.origin.unwrap_or(ConversionOrigin::Reading);
                self.start_registration(key, origin);
            }
            ' ' => {
                self.ctx.selected = cyclic_index(self.ctx.selected, 1, self.ctx.candidates.len());
            }
            'x' if self.ctx.selected == 0 => {
                let origin = self.ctx.origin.unwrap_or(ConversionOrigin::Reading);
                self.return_to_origin(origin);
            }
            'x' => self.ctx.selected -= 1,
            c => {
                self.commit_candidate(fx);
                return self.dispatch_char(c, fx);
            }
        }
        true
    }

    /// Commit the highlighted candidate plus okurigana and learn the choice.
    pub(crate) fn commit_candidate(&mut self, fx: &mut Effects) {
        let Some(candidate) = self.ctx.current_candidate().cloned() else {
            debug!("no candidate selected");
            self.enter_direct();
            return;
        };
        let mut text = candidate.text.clone();
        if let Some(okuri) = &self.ctx.okurigana {
            text.push_str(okuri);
        }
        self.emit(fx, &text);

        let key = std::mem::take(&mut self.ctx.key);
        self.user.record_choice(&key, &candidate.raw());
        self.enter_direct();
    }

    /// Backspace in `CandidateChoose` deletes the last key character and
    /// returns to editing. For an okuri-ari key that is the consonant, so
    /// the stem comes back intact.
    pub(super) fn choose_backspace(&mut self) {
        let origin = self.ctx.origin.unwrap_or(ConversionOrigin::Reading);
        self.ctx.clear_conversion();
        match origin {
            ConversionOrigin::Reading => {
                if self.ctx.okuri_consonant.is_some() {
                    self.ctx.clear_okuri();
                } else {
                    self.ctx.reading.pop();
                }
                self.ctx.composing.clear();
                self.mode = InputMode::KanjiReading;
            }
            ConversionOrigin::English => {
                self.ctx.composing.pop();
                self.mode = InputMode::EnglishToKanji;
            }
        }
        if self.ctx.is_empty() {
            self.enter_direct();
        } else {
            self.refresh_suggestions();
        }
    }

    /// Leave the conversion and resume editing the text it was typed as.
    pub(crate) fn return_to_origin(&mut self, origin: ConversionOrigin) {
        self.ctx.clear_conversion();
        self.ctx.clear_okuri();
        self.mode = match origin {
            ConversionOrigin::Reading => InputMode::KanjiReading,
            ConversionOrigin::English => InputMode::EnglishToKanji,
        };
        self.refresh_suggestions();
    }
}
