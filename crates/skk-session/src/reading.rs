use tracing::debug;

use skk_core::candidates::complete_keys;
use skk_core::romaji::Transliterator;
use skk_core::unicode::{hiragana_to_katakana, is_latin, is_vowel};

use super::types::{ConversionOrigin, Effects, InputMode};
use super::InputSession;

impl InputSession {
    /// `KanjiReading`: romaji accumulates into the reading instead of
    /// being committed.
    pub(super) fn reading_char(&mut self, ch: char, fx: &mut Effects) -> bool {
        let shifted = ch.is_ascii_uppercase();
        let lower = ch.to_ascii_lowercase();

        match lower {
            'q' => {
                self.settle_pending_n();
                let katakana = hiragana_to_katakana(&self.ctx.reading);
                self.emit(fx, &katakana);
                self.enter_direct();
            }
            ' ' => {
                if self.ctx.reading.is_empty() && !Transliterator::is_hatsuon(&self.ctx.composing) {
                    debug!("empty reading, nothing to convert");
                    return true;
                }
                self.settle_pending_n();
                let key = self.ctx.reading.clone();
                self.start_conversion(key, ConversionOrigin::Reading);
            }
            c if shifted && !self.ctx.reading.is_empty() => self.start_okurigana(c),
            c => {
                let step = self.romaji.feed(&self.ctx.composing, c);
                self.ctx.reading.push_str(&step.output);
                self.ctx.composing = step.pending;
                self.refresh_suggestions();
            }
        }
        true
    }

    /// A shifted consonant after a non-empty reading fixes the stem; a
    /// shifted vowel is a complete okurigana by itself.
    fn start_okurigana(&mut self, consonant: char) {
        self.settle_pending_n();
        self.ctx.suggestions.clear();
        self.ctx.okuri_consonant = Some(consonant);

        if is_vowel(consonant) {
            self.ctx.okurigana = self.romaji.lookup_exact(&consonant.to_string());
            let key = self.ctx.reading_key();
            self.start_conversion(key, ConversionOrigin::Reading);
        } else {
            self.ctx.composing = consonant.to_string();
            self.mode = InputMode::OkuriganaPending;
        }
    }

    /// `OkuriganaPending`: keep resolving until a full syllable completes
    /// the okurigana, then convert.
    pub(super) fn okurigana_char(&mut self, ch: char, _fx: &mut Effects) -> bool {
        if ch == ' ' {
            if Transliterator::is_hatsuon(&self.ctx.composing) {
                self.ctx.composing.clear();
                self.ctx.okurigana.get_or_insert_with(String::new).push('ん');
            }
            if self.ctx.okurigana.is_some() {
                self.convert_okurigana();
            } else {
                debug!("okurigana incomplete, space ignored");
            }
            return true;
        }
        if !ch.is_ascii_alphabetic() && ch != '\'' {
            debug!(?ch, "key undefined while capturing okurigana");
            return true;
        }

        let lower = ch.to_ascii_lowercase();
        // The n/sokuon rules apply only to the first syllable.
        let step = if self.ctx.okurigana.is_none() {
            self.romaji.feed(&self.ctx.composing, lower)
        } else {
            self.romaji.feed_plain(&self.ctx.composing, lower)
        };
        let kana: String = step.output.chars().filter(|c| !c.is_ascii()).collect();
        if kana.is_empty() && step.pending.is_empty() {
            debug!(?ch, "key cannot extend the okurigana");
            return true;
        }

        if !kana.is_empty() {
            self.ctx.okurigana.get_or_insert_with(String::new).push_str(&kana);
        }
        self.ctx.composing = step.pending;
        if self.ctx.composing.is_empty() {
            self.convert_okurigana();
        }
        true
    }

    fn convert_okurigana(&mut self) {
        let key = self.ctx.reading_key();
        self.start_conversion(key, ConversionOrigin::Reading);
    }

    /// `EnglishToKanji`: Latin text accumulates verbatim until space.
    pub(super) fn english_char(&mut self, ch: char, _fx: &mut Effects) -> bool {
        if ch == ' ' {
            if self.ctx.composing.is_empty() {
                debug!("empty literal, nothing to convert");
            } else {
                let key = self.ctx.composing.clone();
                self.start_conversion(key, ConversionOrigin::English);
            }
        } else {
            self.ctx.composing.push(ch);
            self.refresh_suggestions();
        }
        true
    }

    /// Resolve a bare trailing `n` into the reading; other unresolved
    /// romaji is dropped.
    pub(crate) fn settle_pending_n(&mut self) {
        if Transliterator::is_hatsuon(&self.ctx.composing) {
            self.ctx.reading.push('ん');
        }
        self.ctx.composing.clear();
    }

    /// Recompute completion suggestions for the text being typed.
    pub(crate) fn refresh_suggestions(&mut self) {
        self.ctx.suggestions.clear();
        if !self.options.show_completions {
            return;
        }
        let limit = self.options.completion_limit;

        match self.mode {
            InputMode::EnglishToKanji if !self.ctx.composing.is_empty() => {
                let literal = self.ctx.composing.clone();
                let keys = complete_keys(self.system.as_ref(), &literal, true, limit);
                self.ctx.suggestions.push(literal);
                self.ctx.suggestions.extend(keys);
            }
            InputMode::KanjiReading if !self.ctx.is_empty() => {
                if self.ctx.composing.is_empty() {
                    let reading = self.ctx.reading.clone();
                    let keys = complete_keys(self.system.as_ref(), &reading, false, limit);
                    self.ctx.suggestions.push(reading);
                    self.ctx.suggestions.extend(keys);
                } else {
                    // Guess the a-row syllable for the pending consonant.
                    let mut probe = self.ctx.composing.clone();
                    probe.push('a');
                    let tail = self
                        .romaji
                        .lookup_exact(&probe)
                        .unwrap_or_else(|| self.ctx.composing.clone());
                    let query = format!("{}{}", self.ctx.reading, tail);
                    self.ctx.suggestions = complete_keys(self.system.as_ref(), &query, false, limit);
                }
            }
            _ => {}
        }
    }

    /// Restart from a picked completion suggestion.
    pub(crate) fn pick_suggestion(&mut self, key: String, fx: &mut Effects) {
        match self.mode {
            InputMode::EnglishToKanji => {
                self.ctx.composing = key.clone();
                self.start_conversion(key, ConversionOrigin::English);
            }
            _ => {
                self.ctx.composing.clear();
                self.ctx.clear_okuri();
                match key.chars().last() {
                    Some(last) if is_latin(last) && key.chars().count() > 1 => {
                        self.ctx.reading = key[..key.len() - last.len_utf8()].to_string();
                        self.reading_char(last.to_ascii_uppercase(), fx);
                    }
                    _ => {
                        self.ctx.reading = key.clone();
                        self.start_conversion(key, ConversionOrigin::Reading);
                    }
                }
            }
        }
    }
}
