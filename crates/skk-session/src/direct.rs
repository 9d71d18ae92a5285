use tracing::debug;

use super::types::{Effects, InputMode, KanaStyle};
use super::InputSession;

impl InputSession {
    /// Direct (hiragana / katakana) input: romaji resolves and commits
    /// immediately, a shifted letter opens a reading.
    pub(super) fn direct_char(&mut self, ch: char, fx: &mut Effects) -> bool {
        // `zl` and `z/` are table entries, not mode switches.
        let z_pending = self.ctx.composing == "z";

        match ch {
            'q' => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                self.kana = match self.kana {
                    KanaStyle::Hiragana => KanaStyle::Katakana,
                    KanaStyle::Katakana => KanaStyle::Hiragana,
                };
            }
            'l' if !z_pending => {
                if self.ctx.is_registering() {
                    debug!("Latin passthrough unavailable while registering");
                } else {
                    let flushed = self.flush_composing();
                    self.emit(fx, &flushed);
                    self.mode = InputMode::LatinPassthrough;
                }
            }
            'L' => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                self.mode = InputMode::FullWidthLatin;
            }
            '/' if !z_pending => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                self.ctx.clear_composition();
                self.mode = InputMode::EnglishToKanji;
                self.refresh_suggestions();
            }
            c if c.is_ascii_uppercase() => {
                let flushed = self.flush_composing();
                self.emit(fx, &flushed);
                self.ctx.clear_composition();
                self.mode = InputMode::KanjiReading;
                return self.reading_char(c.to_ascii_lowercase(), fx);
            }
            c => {
                let step = self.romaji.feed(&self.ctx.composing, c);
                self.ctx.composing = step.pending;
                let out = self.kana_text(&step.output);
                self.emit(fx, &out);
            }
        }
        true
    }
}
