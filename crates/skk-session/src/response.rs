use super::types::{CandidateAction, Effects, InputMode, KeyResponse, MarkedText};
use super::InputSession;

/// Marker shown before a reading being typed.
const READING_MARK: char = '▽';
/// Marker shown before a conversion candidate and a registration.
const CONVERSION_MARK: char = '▼';

impl InputSession {
    pub(super) fn respond(&self, consumed: bool, fx: Effects) -> KeyResponse {
        if !consumed {
            return KeyResponse::not_consumed();
        }
        let display = self.display();
        KeyResponse {
            consumed,
            commit: (!fx.commit.is_empty()).then_some(fx.commit),
            marked: (!display.is_empty()).then_some(MarkedText { text: display }),
            candidates: self.candidate_action(),
        }
    }

    /// Full composing text, prefixed by the registration prompt when one is
    /// active.
    pub(super) fn display(&self) -> String {
        let ctx = &self.ctx;
        let mut out = String::new();

        if let Some(reg) = &ctx.registration {
            out.push(CONVERSION_MARK);
            out.push_str(&reg.key);
            out.push('：');
            out.push_str(&reg.entry);
        }

        match self.mode {
            InputMode::Direct => out.push_str(&ctx.composing),
            InputMode::FullWidthLatin | InputMode::LatinPassthrough => {}
            InputMode::KanjiReading => {
                out.push(READING_MARK);
                out.push_str(&ctx.reading);
                out.push_str(&ctx.composing);
            }
            InputMode::OkuriganaPending => {
                out.push(READING_MARK);
                out.push_str(&ctx.reading);
                out.push('*');
                if let Some(okuri) = &ctx.okurigana {
                    out.push_str(okuri);
                }
                out.push_str(&ctx.composing);
            }
            InputMode::CandidateChoose => {
                out.push(CONVERSION_MARK);
                if let Some(candidate) = ctx.current_candidate() {
                    out.push_str(&candidate.text);
                }
                if let Some(okuri) = &ctx.okurigana {
                    out.push_str(okuri);
                }
            }
            InputMode::EnglishToKanji => {
                out.push(READING_MARK);
                out.push_str(&ctx.composing);
            }
        }
        out
    }

    pub(super) fn candidate_action(&self) -> CandidateAction {
        let ctx = &self.ctx;
        match self.mode {
            InputMode::CandidateChoose if !ctx.candidates.is_empty() => CandidateAction::Show {
                surfaces: ctx.candidates.iter().map(|c| c.text.clone()).collect(),
                selected: ctx.selected as u32,
            },
            InputMode::KanjiReading | InputMode::EnglishToKanji if !ctx.suggestions.is_empty() => {
                CandidateAction::Show {
                    surfaces: ctx.suggestions.clone(),
                    selected: 0,
                }
            }
            _ => CandidateAction::Hide,
        }
    }
}
