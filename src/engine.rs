use std::path::Path;
use std::sync::Arc;

use skk_core::dict::{LearningStore, Lookup, SystemDictionary};
use skk_core::settings::{self, Settings};
use skk_core::user_dict::UserDictionary;
use skk_session::{InputSession, KeyEvent, KeyResponse, Mode, SessionOptions};
use tracing::{error, info};

use crate::EngineError;

/// One SKK engine: the shared system dictionary, the user dictionary and the
/// session that routes host keys through them.
///
/// Dropping the engine flushes the user dictionary.
pub struct SkkEngine {
    session: InputSession,
    system: Arc<dyn Lookup>,
    kana_key: u16,
}

impl SkkEngine {
    /// Open the dictionaries under `dict_dir` with the global settings.
    ///
    /// Never fails: an unusable system dictionary leaves lookups to the user
    /// dictionary, and an unusable user dictionary is replaced by one that
    /// only lives in memory.
    pub fn open(dict_dir: &Path) -> Self {
        Self::open_with_settings(dict_dir, settings::settings())
    }

    pub fn open_with_settings(dict_dir: &Path, settings: &Settings) -> Self {
        let system = SystemDictionary::open(&dict_dir.join(&settings.dictionary.system_file));
        let user_path = dict_dir.join(&settings.dictionary.user_file);
        let interval = settings.dictionary.commit_interval;
        let user = match UserDictionary::open(&user_path, interval) {
            Ok(user) => user,
            Err(e) => {
                error!(path = %user_path.display(), error = %e, "user dictionary unavailable, learning is not persisted");
                match UserDictionary::in_memory(interval) {
                    Ok(user) => user,
                    Err(e) => {
                        error!(error = %e, "in-memory user dictionary unavailable");
                        return Self::with_stores(
                            Arc::new(system),
                            Box::new(NullStore),
                            settings,
                        );
                    }
                }
            }
        };
        Self::with_stores(Arc::new(system), Box::new(user), settings)
    }

    /// Open the dictionaries under `dict_dir`, failing when the user
    /// dictionary cannot be opened.
    pub fn try_open(dict_dir: &Path, settings: &Settings) -> Result<Self, EngineError> {
        if !dict_dir.is_dir() {
            return Err(EngineError::MissingDirectory(dict_dir.to_path_buf()));
        }
        let system = SystemDictionary::open(&dict_dir.join(&settings.dictionary.system_file));
        let user = UserDictionary::open(
            &dict_dir.join(&settings.dictionary.user_file),
            settings.dictionary.commit_interval,
        )?;
        Ok(Self::with_stores(Arc::new(system), Box::new(user), settings))
    }

    pub fn with_stores(
        system: Arc<dyn Lookup>,
        user: Box<dyn LearningStore>,
        settings: &Settings,
    ) -> Self {
        info!(
            punctuation = ?settings.input.punctuation,
            start_in_kana = settings.input.start_in_kana,
            "engine started"
        );
        let options = SessionOptions::from_settings(settings);
        Self {
            session: InputSession::new(Arc::clone(&system), user, options),
            system,
            kana_key: settings.input.kana_key,
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        self.session.handle_key(event)
    }

    /// Feed a resolved character code. Codes that are not Unicode scalar
    /// values are left to the host.
    pub fn handle_char_code(&mut self, code: u32) -> KeyResponse {
        match char::from_u32(code) {
            Some(ch) => self.session.handle_key(KeyEvent::Char(ch)),
            None => KeyResponse::not_consumed(),
        }
    }

    /// Feed a host key code, translating the configured mode-toggle key.
    /// Returns `None` for any other key code.
    pub fn handle_key_code(&mut self, code: u16) -> Option<KeyResponse> {
        self.is_kana_key(code)
            .then(|| self.session.handle_key(KeyEvent::ToggleKana))
    }

    pub fn pick_candidate(&mut self, index: usize) -> KeyResponse {
        self.session.pick_candidate(index)
    }

    pub fn is_kana_key(&self, code: u16) -> bool {
        code == self.kana_key
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn is_composing(&self) -> bool {
        self.session.is_composing()
    }

    pub fn composed_string(&self) -> String {
        self.session.composed_string()
    }

    pub fn candidates(&self) -> Vec<String> {
        self.session.candidates()
    }

    /// The read-only system dictionary shared with the session.
    pub fn system_dictionary(&self) -> &dyn Lookup {
        self.system.as_ref()
    }

    pub fn user_dictionary(&self) -> &dyn LearningStore {
        self.session.user_dictionary()
    }

    /// Host-requested durability point.
    pub fn commit_changes(&mut self) {
        self.session.commit_changes();
    }

    /// Flush and release everything.
    pub fn shutdown(mut self) {
        self.session.commit_changes();
        info!("engine shut down");
    }
}

/// Stands in for the user dictionary when not even an in-memory store could
/// be created. Lookups find nothing and choices are dropped.
struct NullStore;

impl Lookup for NullStore {
    fn lookup(&self, _key: &str) -> Option<Vec<skk_core::dict::Candidate>> {
        None
    }

    fn scan_from(&self, _from: &str, _limit: usize) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl skk_core::dict::Mutate for NullStore {
    fn record_choice(&mut self, reading: &str, _candidate: &str) {
        error!(reading, "choice dropped, no user dictionary");
    }

    fn commit_changes(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use skk_core::dict::source;
    use skk_core::settings::parse_settings_toml;
    use skk_session::KanaStyle;

    fn test_settings() -> Settings {
        parse_settings_toml(settings::default_toml()).unwrap()
    }

    fn write_system_dict(dir: &Path, settings: &Settings) {
        let import = source::parse_jisyo(
            ";; okuri-nasi entries.\nみず /水/瑞/\nきょう /今日/京/\n",
        );
        source::write_dictionary(&import, &dir.join(&settings.dictionary.system_file)).unwrap();
    }

    fn type_chars(engine: &mut SkkEngine, s: &str) -> String {
        let mut out = String::new();
        for ch in s.chars() {
            let resp = engine.handle_char_code(ch as u32);
            out.push_str(resp.commit_text());
        }
        out
    }

    #[test]
    fn test_open_converts_with_system_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings();
        write_system_dict(dir.path(), &settings);

        let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
        type_chars(&mut engine, "Mizu ");
        assert_eq!(engine.mode(), Mode::CandidateChoose);
        assert_eq!(engine.candidates(), vec!["水", "瑞"]);
        assert_eq!(engine.composed_string(), "▼水");
    }

    #[test]
    fn test_missing_system_dictionary_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings();

        let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
        assert!(engine.system_dictionary().lookup("みず").is_none());

        // Falls through to registration.
        type_chars(&mut engine, "Mizu ");
        assert_eq!(engine.mode(), Mode::Registering);
    }

    #[test]
    fn test_learning_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings();
        write_system_dict(dir.path(), &settings);

        {
            let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
            type_chars(&mut engine, "Mizu  ");
            let resp = engine.handle_key(KeyEvent::Enter);
            assert_eq!(resp.commit_text(), "瑞");
            engine.shutdown();
        }

        let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
        type_chars(&mut engine, "Mizu ");
        assert_eq!(engine.candidates(), vec!["瑞", "水"]);
    }

    #[test]
    fn test_registration_persists() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings();

        {
            let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
            type_chars(&mut engine, "Tesuto ");
            type_chars(&mut engine, "qtesuto");
            engine.handle_key(KeyEvent::Enter);
        }

        let engine = SkkEngine::open_with_settings(dir.path(), &settings);
        let stored = engine.user_dictionary().lookup("てすと").unwrap();
        assert_eq!(stored[0].text, "テスト");
    }

    #[test]
    fn test_kana_key_code_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings();
        let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);

        assert!(engine.handle_key_code(12).is_none());
        let resp = engine.handle_key_code(settings.input.kana_key).unwrap();
        assert!(resp.consumed);
        assert_eq!(engine.mode(), Mode::LatinPassthrough);

        engine.handle_key_code(settings.input.kana_key);
        assert_eq!(engine.mode(), Mode::Direct(KanaStyle::Hiragana));
    }

    #[test]
    fn test_start_in_latin() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings();
        settings.input.start_in_kana = false;
        let mut engine = SkkEngine::open_with_settings(dir.path(), &settings);
        assert_eq!(engine.mode(), Mode::LatinPassthrough);
        assert_eq!(type_chars(&mut engine, "ka"), "ka");
    }

    #[test]
    fn test_try_open_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = SkkEngine::try_open(&missing, &test_settings()).err().unwrap();
        assert!(matches!(err, EngineError::MissingDirectory(_)));
    }

    #[test]
    fn test_invalid_char_code_not_consumed() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = SkkEngine::open_with_settings(dir.path(), &test_settings());
        assert!(!engine.handle_char_code(0xD800).consumed);
    }
}
