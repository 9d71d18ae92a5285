use tracing::{debug, debug_span};

use super::types::{cyclic_index, Effects, InputMode, KanaStyle, KeyEvent, KeyResponse};
use super::InputSession;

impl InputSession {
    /// Process a key event. Returns a KeyResponse describing what the caller should do.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event, mode = ?self.mode).entered();

        let mut fx = Effects::default();
        let consumed = match event {
            KeyEvent::Char(ch) => self.dispatch_char(ch, &mut fx),
            KeyEvent::Backspace => self.handle_backspace(),
            KeyEvent::Enter => self.handle_enter(&mut fx),
            KeyEvent::NextCandidate => self.step_candidate(1),
            KeyEvent::PrevCandidate => self.step_candidate(-1),
            KeyEvent::ToggleKana => self.handle_toggle_kana(&mut fx),
            KeyEvent::Cancel => self.handle_cancel(),
        };
        self.respond(consumed, fx)
    }

    /// Pick entry `index` of the offered list: a conversion candidate in
    /// `CandidateChoose`, a completion suggestion while typing a reading.
    pub fn pick_candidate(&mut self, index: usize) -> KeyResponse {
        let _span = debug_span!("pick_candidate", index, mode = ?self.mode).entered();

        let mut fx = Effects::default();
        let consumed = match self.mode {
            InputMode::CandidateChoose if index < self.ctx.candidates.len() => {
                self.ctx.selected = index;
                self.commit_candidate(&mut fx);
                true
            }
            InputMode::KanjiReading | InputMode::EnglishToKanji
                if index < self.ctx.suggestions.len() =>
            {
                let key = self.ctx.suggestions[index].clone();
                self.pick_suggestion(key, &mut fx);
                true
            }
            _ => {
                debug!("no candidate to pick");
                false
            }
        };
        self.respond(consumed, fx)
    }

    pub(crate) fn dispatch_char(&mut self, ch: char, fx: &mut Effects) -> bool {
        match self.mode {
            InputMode::Direct => self.direct_char(ch, fx),
            InputMode::FullWidthLatin => {
                let wide = skk_core::unicode::to_full_width(ch);
                self.emit(fx, wide.encode_utf8(&mut [0; 4]));
                true
            }
            InputMode::LatinPassthrough => {
                self.emit(fx, ch.encode_utf8(&mut [0; 4]));
                true
            }
            InputMode::KanjiReading => self.reading_char(ch, fx),
            InputMode::OkuriganaPending => self.okurigana_char(ch, fx),
            InputMode::CandidateChoose => self.choose_char(ch, fx),
            InputMode::EnglishToKanji => self.english_char(ch, fx),
        }
    }

    /// Send finished text to the host, or into the registration entry
    /// while one is being typed.
    pub(crate) fn emit(&mut self, fx: &mut Effects, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.ctx.registration.as_mut() {
            Some(reg) => reg.entry.push_str(text),
            None => fx.commit.push_str(text),
        }
    }

    fn handle_backspace(&mut self) -> bool {
        match self.mode {
            InputMode::Direct => {
                if self.ctx.composing.pop().is_some() {
                    true
                } else {
                    self.registration_backspace()
                }
            }
            InputMode::FullWidthLatin | InputMode::LatinPassthrough => {
                self.registration_backspace()
            }
            InputMode::KanjiReading => {
                if self.ctx.composing.pop().is_none() {
                    self.ctx.reading.pop();
                }
                if self.ctx.is_empty() {
                    self.enter_direct();
                } else {
                    self.refresh_suggestions();
                }
                true
            }
            InputMode::OkuriganaPending => {
                self.ctx.composing.clear();
                self.ctx.clear_okuri();
                self.mode = InputMode::KanjiReading;
                self.refresh_suggestions();
                true
            }
            InputMode::CandidateChoose => {
                self.choose_backspace();
                true
            }
            InputMode::EnglishToKanji => {
                self.ctx.composing.pop();
                if self.ctx.composing.is_empty() {
                    self.enter_direct();
                } else {
                    self.refresh_suggestions();
                }
                true
            }
        }
    }

    fn handle_enter(&mut self, fx: &mut Effects) -> bool {
        match self.mode {
            InputMode::Direct if !self.ctx.composing.is_empty() => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                true
            }
            InputMode::Direct | InputMode::FullWidthLatin | InputMode::LatinPassthrough => {
                self.registration_enter(fx)
            }
            InputMode::KanjiReading => {
                self.settle_pending_n();
                let reading = std::mem::take(&mut self.ctx.reading);
                self.emit(fx, &reading);
                self.enter_direct();
                true
            }
            InputMode::OkuriganaPending => {
                let mut text = std::mem::take(&mut self.ctx.reading);
                if let Some(okuri) = self.ctx.okurigana.take() {
                    text.push_str(&okuri);
                }
                self.emit(fx, &text);
                self.enter_direct();
                true
            }
            InputMode::CandidateChoose => {
                self.commit_candidate(fx);
                true
            }
            InputMode::EnglishToKanji => {
                let literal = std::mem::take(&mut self.ctx.composing);
                self.emit(fx, &literal);
                self.enter_direct();
                true
            }
        }
    }

    fn step_candidate(&mut self, delta: i32) -> bool {
        if self.mode == InputMode::CandidateChoose {
            self.ctx.selected = cyclic_index(self.ctx.selected, delta, self.ctx.candidates.len());
            return true;
        }
        if self.is_composing() {
            debug!("candidate step ignored outside CandidateChoose");
            return true;
        }
        false
    }

    fn handle_toggle_kana(&mut self, fx: &mut Effects) -> bool {
        match (self.mode, self.kana) {
            (InputMode::Direct, KanaStyle::Hiragana) => {
                if self.ctx.is_registering() {
                    debug!("Latin passthrough unavailable while registering");
                } else {
                    let flushed = self.flush_composing();
                    self.emit(fx, &flushed);
                    self.mode = InputMode::LatinPassthrough;
                }
            }
            (InputMode::Direct, KanaStyle::Katakana) => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                self.kana = KanaStyle::Hiragana;
            }
            (InputMode::FullWidthLatin | InputMode::LatinPassthrough, _) => {
                self.kana = KanaStyle::Hiragana;
                self.mode = InputMode::Direct;
            }
            (InputMode::EnglishToKanji, _) => {
                self.kana = KanaStyle::Hiragana;
                self.enter_direct();
            }
            (InputMode::CandidateChoose, _) => self.commit_candidate(fx),
            (InputMode::KanjiReading | InputMode::OkuriganaPending, _) => {
                debug!("kana key ignored while typing a reading");
            }
        }
        true
    }

    fn handle_cancel(&mut self) -> bool {
        if self.ctx.is_registering() {
            self.cancel_registration();
            return true;
        }
        if self.is_composing() {
            self.enter_direct();
            return true;
        }
        false
    }

    /// Drop the composition and return to Direct input, keeping the kana
    /// style and any registration.
    pub(crate) fn enter_direct(&mut self) {
        self.ctx.clear_composition();
        self.mode = InputMode::Direct;
    }

    /// Resolve the romaji buffer for a mode exit: a trailing `n` becomes ん,
    /// anything else is returned as typed.
    pub(crate) fn flush_composing(&mut self) -> String {
        let pending = std::mem::take(&mut self.ctx.composing);
        self.kana_text(&skk_core::romaji::Transliterator::flush(&pending))
    }

    /// Kana output in the current Direct style.
    pub(crate) fn kana_text(&self, hiragana: &str) -> String {
        match self.kana {
            KanaStyle::Hiragana => hiragana.to_string(),
            KanaStyle::Katakana => skk_core::unicode::hiragana_to_katakana(hiragana),
        }
    }
}
