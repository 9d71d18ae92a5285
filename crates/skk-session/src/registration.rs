use tracing::{debug, info};

use super::types::{ConversionOrigin, Effects, InputMode, RegistrationSession};
use super::InputSession;

impl InputSession {
    /// Begin teaching the user dictionary a word for `key`. The entry is
    /// typed in Direct mode; committed text accumulates into it.
    pub(crate) fn start_registration(&mut self, key: String, origin: ConversionOrigin) {
        debug!(%key, "registration start");
        let reading = match origin {
            ConversionOrigin::Reading => self.ctx.reading.clone(),
            ConversionOrigin::English => self.ctx.composing.clone(),
        };
        let okurigana = self.ctx.okurigana.take();
        self.ctx.clear_composition();
        self.ctx.registration = Some(RegistrationSession {
            key,
            reading,
            origin,
            okurigana,
            entry: String::new(),
        });
        self.mode = InputMode::Direct;
    }

    /// Enter with nothing left to compose: persist and commit the entry, or
    /// cancel when it is empty. Outside a registration the key belongs to
    /// the host.
    pub(crate) fn registration_enter(&mut self, fx: &mut Effects) -> bool {
        let Some(reg) = self.ctx.registration.as_ref() else {
            return false;
        };
        if reg.entry.is_empty() {
            self.cancel_registration();
            return true;
        }
        let Some(reg) = self.ctx.registration.take() else {
            return false;
        };

        info!(key = %reg.key, entry = %reg.entry, "word registered");
        self.user.record_choice(&reg.key, &reg.entry);
        self.user.commit_changes();

        let mut text = reg.entry;
        if let Some(okuri) = reg.okurigana {
            text.push_str(&okuri);
        }
        self.enter_direct();
        self.emit(fx, &text);
        true
    }

    /// Backspace with an empty composing buffer: delete from the entry, or
    /// cancel once it is empty.
    pub(crate) fn registration_backspace(&mut self) -> bool {
        let Some(reg) = self.ctx.registration.as_mut() else {
            return false;
        };
        if reg.entry.pop().is_none() {
            self.cancel_registration();
        }
        true
    }

    /// Discard the registration and resume editing its reading.
    pub(crate) fn cancel_registration(&mut self) {
        let Some(reg) = self.ctx.registration.take() else {
            return;
        };
        debug!(key = %reg.key, "registration cancelled");
        self.ctx.clear_composition();
        match reg.origin {
            ConversionOrigin::Reading => {
                self.ctx.reading = reg.reading;
                self.mode = InputMode::KanjiReading;
            }
            ConversionOrigin::English => {
                self.ctx.composing = reg.reading;
                self.mode = InputMode::EnglishToKanji;
            }
        }
        if self.ctx.is_empty() {
            self.mode = InputMode::Direct;
        } else {
            self.refresh_suggestions();
        }
    }
}
