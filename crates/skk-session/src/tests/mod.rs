mod proptest_fsm;

use std::sync::{Arc, OnceLock};

use skk_core::dict::{Lookup, SystemDictionary};
use skk_core::user_dict::UserDictionary;

use super::InputSession;
use super::{KeyEvent, KeyResponse, SessionOptions};

/// The read-only test dictionary, built once and shared by every session.
pub(super) fn make_test_dict() -> Arc<dyn Lookup> {
    static DICT: OnceLock<Arc<dyn Lookup>> = OnceLock::new();
    Arc::clone(DICT.get_or_init(build_test_dict))
}

fn build_test_dict() -> Arc<dyn Lookup> {
    let entries = vec![
        ("みず", vec!["水", "瑞", "みず"]),
        ("かんじ", vec!["漢字", "感じ", "幹事;organizer"]),
        ("かんじる", vec!["感じる"]),
        ("かんじゃ", vec!["患者"]),
        ("きょう", vec!["今日", "京"]),
        ("へんかん", vec!["変換"]),
        ("かk", vec!["書", "描"]),
        ("おもu", vec!["思"]),
        ("いt", vec!["行"]),
        ("しn", vec!["死"]),
        ("こんにちは", vec!["今日は"]),
        ("android", vec!["アンドロイド"]),
        ("and", vec!["アンド"]),
    ];
    Arc::new(SystemDictionary::from_entries(entries).unwrap())
}

pub(super) fn make_session() -> InputSession {
    make_session_with(SessionOptions::default())
}

pub(super) fn make_session_with(options: SessionOptions) -> InputSession {
    let user = UserDictionary::in_memory(1000).unwrap();
    InputSession::new(make_test_dict(), Box::new(user), options)
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_string(session: &mut InputSession, s: &str) -> Vec<KeyResponse> {
    s.chars()
        .map(|ch| session.handle_key(KeyEvent::Char(ch)))
        .collect()
}

pub(super) fn press(session: &mut InputSession, event: KeyEvent) -> KeyResponse {
    session.handle_key(event)
}

/// Concatenated commit text of a run of responses.
pub(super) fn committed(responses: &[KeyResponse]) -> String {
    responses.iter().map(|r| r.commit_text()).collect()
}

/// Type `s` and return everything it committed.
pub(super) fn type_committed(session: &mut InputSession, s: &str) -> String {
    committed(&type_string(session, s))
}
