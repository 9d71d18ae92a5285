//! C ABI for hosts that embed the engine.
//!
//! Every response handed out must be returned through
//! [`skk_key_response_free`]; engines through [`skk_engine_free`], which also
//! flushes the user dictionary.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::{CandidateAction, KanaStyle, KeyEvent, KeyResponse, Mode, SkkEngine};

/// Allocate a value on the heap and return a raw pointer suitable for FFI.
fn owned_new<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// # Safety
/// `ptr` must come from [`owned_new`] and must not have been freed already.
unsafe fn owned_drop<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Returns `None` if the pointer is null or contains invalid UTF-8.
unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Null-check an engine pointer and bind it mutably, returning `$on_err`
/// from the calling function when it is null.
macro_rules! engine_guard {
    ($on_err:expr ; $name:ident = $ptr:expr) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &mut *$ptr };
    };
}

#[repr(C)]
pub struct SkkKeyResponse {
    pub consumed: u8,
    /// NULL when nothing is committed.
    pub commit_text: *const c_char,
    /// NULL when the composing text is cleared.
    pub marked_text: *const c_char,
    pub candidates: *const *const c_char,
    pub candidates_len: u32,
    pub selected_index: u32,
    pub show_candidates: u8,
    pub(crate) _owned: *mut OwnedKeyResponse,
}

pub(crate) struct OwnedKeyResponse {
    _commit_text: Option<CString>,
    _marked_text: Option<CString>,
    _candidate_ptrs: Vec<*const c_char>,
    _candidate_strings: Vec<CString>,
}

impl SkkKeyResponse {
    fn empty() -> Self {
        Self {
            consumed: 0,
            commit_text: ptr::null(),
            marked_text: ptr::null(),
            candidates: ptr::null(),
            candidates_len: 0,
            selected_index: 0,
            show_candidates: 0,
            _owned: ptr::null_mut(),
        }
    }
}

fn pack_key_response(resp: KeyResponse) -> SkkKeyResponse {
    let commit = resp.commit.and_then(|s| CString::new(s).ok());
    let marked = resp.marked.and_then(|m| CString::new(m.text).ok());

    let mut candidate_strings = Vec::new();
    let mut candidate_ptrs = Vec::new();
    let (show, selected_index) = match resp.candidates {
        CandidateAction::Show { surfaces, selected } => {
            for s in surfaces {
                if let Ok(cs) = CString::new(s) {
                    candidate_ptrs.push(cs.as_ptr());
                    candidate_strings.push(cs);
                }
            }
            (true, selected)
        }
        CandidateAction::Hide => (false, 0),
    };

    // The CString heap buffers do not move when the owner is boxed.
    let commit_ptr = commit.as_ref().map_or(ptr::null(), |cs| cs.as_ptr());
    let marked_ptr = marked.as_ref().map_or(ptr::null(), |cs| cs.as_ptr());
    let (cand_ptr, cand_len) = if candidate_ptrs.is_empty() {
        (ptr::null(), 0)
    } else {
        (candidate_ptrs.as_ptr(), candidate_ptrs.len() as u32)
    };

    let owned = owned_new(OwnedKeyResponse {
        _commit_text: commit,
        _marked_text: marked,
        _candidate_ptrs: candidate_ptrs,
        _candidate_strings: candidate_strings,
    });

    SkkKeyResponse {
        consumed: resp.consumed as u8,
        commit_text: commit_ptr,
        marked_text: marked_ptr,
        candidates: cand_ptr,
        candidates_len: cand_len,
        selected_index,
        show_candidates: show as u8,
        _owned: owned,
    }
}

#[no_mangle]
pub extern "C" fn skk_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn skk_trace_init(log_dir: *const c_char) {
    let Some(dir) = (unsafe { cptr_to_str(log_dir) }) else {
        return;
    };
    crate::trace_init::init_tracing(Path::new(dir));
}

/// Open an engine over the dictionaries in `dict_dir`. Returns NULL only when
/// `dict_dir` is not a valid string.
#[no_mangle]
pub extern "C" fn skk_engine_new(dict_dir: *const c_char) -> *mut SkkEngine {
    let Some(dir) = (unsafe { cptr_to_str(dict_dir) }) else {
        return ptr::null_mut();
    };
    owned_new(SkkEngine::open(Path::new(dir)))
}

#[no_mangle]
pub extern "C" fn skk_engine_free(engine: *mut SkkEngine) {
    unsafe { owned_drop(engine) };
}

/// Feed a resolved character code.
#[no_mangle]
pub extern "C" fn skk_engine_handle_char(engine: *mut SkkEngine, code: u32) -> SkkKeyResponse {
    engine_guard!(SkkKeyResponse::empty(); engine = engine);
    pack_key_response(engine.handle_char_code(code))
}

/// Feed a control action: 0=Backspace, 1=Enter, 2=NextCandidate,
/// 3=PrevCandidate, 4=ToggleKana, 5=Cancel. Unknown actions are not consumed.
#[no_mangle]
pub extern "C" fn skk_engine_handle_action(engine: *mut SkkEngine, action: u8) -> SkkKeyResponse {
    engine_guard!(SkkKeyResponse::empty(); engine = engine);
    let event = match action {
        0 => KeyEvent::Backspace,
        1 => KeyEvent::Enter,
        2 => KeyEvent::NextCandidate,
        3 => KeyEvent::PrevCandidate,
        4 => KeyEvent::ToggleKana,
        5 => KeyEvent::Cancel,
        _ => return SkkKeyResponse::empty(),
    };
    pack_key_response(engine.handle_key(event))
}

/// Feed a host key code. Only the configured mode-toggle key is consumed.
#[no_mangle]
pub extern "C" fn skk_engine_handle_key_code(engine: *mut SkkEngine, code: u16) -> SkkKeyResponse {
    engine_guard!(SkkKeyResponse::empty(); engine = engine);
    match engine.handle_key_code(code) {
        Some(resp) => pack_key_response(resp),
        None => SkkKeyResponse::empty(),
    }
}

#[no_mangle]
pub extern "C" fn skk_engine_pick_candidate(engine: *mut SkkEngine, index: u32) -> SkkKeyResponse {
    engine_guard!(SkkKeyResponse::empty(); engine = engine);
    pack_key_response(engine.pick_candidate(index as usize))
}

#[no_mangle]
pub extern "C" fn skk_engine_commit_changes(engine: *mut SkkEngine) {
    engine_guard!((); engine = engine);
    engine.commit_changes();
}

/// Current mode: 0=Hiragana, 1=Katakana, 2=FullWidthLatin,
/// 3=LatinPassthrough, 4=KanjiReading, 5=OkuriganaPending,
/// 6=CandidateChoose, 7=EnglishToKanji, 8=Registering. 255 for NULL.
#[no_mangle]
pub extern "C" fn skk_engine_mode(engine: *mut SkkEngine) -> u8 {
    engine_guard!(u8::MAX; engine = engine);
    match engine.mode() {
        Mode::Direct(KanaStyle::Hiragana) => 0,
        Mode::Direct(KanaStyle::Katakana) => 1,
        Mode::FullWidthLatin => 2,
        Mode::LatinPassthrough => 3,
        Mode::KanjiReading => 4,
        Mode::OkuriganaPending => 5,
        Mode::CandidateChoose => 6,
        Mode::EnglishToKanji => 7,
        Mode::Registering => 8,
    }
}

#[no_mangle]
pub extern "C" fn skk_key_response_free(response: SkkKeyResponse) {
    unsafe { owned_drop(response._owned) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    unsafe fn text(p: *const c_char) -> Option<String> {
        if p.is_null() {
            None
        } else {
            Some(CStr::from_ptr(p).to_str().unwrap().to_string())
        }
    }

    #[test]
    fn test_ffi_null_safety() {
        let resp = skk_engine_handle_char(ptr::null_mut(), 'a' as u32);
        assert_eq!(resp.consumed, 0);
        skk_key_response_free(resp);

        assert_eq!(skk_engine_mode(ptr::null_mut()), u8::MAX);
        skk_engine_commit_changes(ptr::null_mut());
        skk_engine_free(ptr::null_mut());
        assert!(skk_engine_new(ptr::null()).is_null());
    }

    #[test]
    fn test_ffi_typing_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = CString::new(dir.path().to_str().unwrap()).unwrap();
        let engine = skk_engine_new(path.as_ptr());
        assert!(!engine.is_null());

        let resp = skk_engine_handle_char(engine, 'k' as u32);
        assert_eq!(resp.consumed, 1);
        assert_eq!(unsafe { text(resp.marked_text) }.as_deref(), Some("k"));
        skk_key_response_free(resp);

        let resp = skk_engine_handle_char(engine, 'a' as u32);
        assert_eq!(unsafe { text(resp.commit_text) }.as_deref(), Some("か"));
        assert!(resp.marked_text.is_null());
        skk_key_response_free(resp);

        // Unknown reading opens registration.
        for ch in "Tesuto ".chars() {
            skk_key_response_free(skk_engine_handle_char(engine, ch as u32));
        }
        assert_eq!(skk_engine_mode(engine), 8);

        let resp = skk_engine_handle_action(engine, 5);
        assert_eq!(resp.consumed, 1);
        skk_key_response_free(resp);
        assert_eq!(skk_engine_mode(engine), 4);

        let resp = skk_engine_handle_action(engine, 42);
        assert_eq!(resp.consumed, 0);
        skk_key_response_free(resp);

        skk_engine_free(engine);
    }

    #[test]
    fn test_ffi_candidates_exposed() {
        let dir = tempfile::tempdir().unwrap();
        let path = CString::new(dir.path().to_str().unwrap()).unwrap();
        let engine = skk_engine_new(path.as_ptr());

        for ch in "Tesuto ".chars() {
            skk_key_response_free(skk_engine_handle_char(engine, ch as u32));
        }
        for ch in "qtesuto".chars() {
            skk_key_response_free(skk_engine_handle_char(engine, ch as u32));
        }
        let resp = skk_engine_handle_action(engine, 1);
        assert_eq!(unsafe { text(resp.commit_text) }.as_deref(), Some("テスト"));
        skk_key_response_free(resp);

        skk_key_response_free(skk_engine_handle_char(engine, 'q' as u32));
        let mut last = SkkKeyResponse::empty();
        for ch in "Tesuto ".chars() {
            skk_key_response_free(last);
            last = skk_engine_handle_char(engine, ch as u32);
        }
        assert_eq!(last.show_candidates, 1);
        assert_eq!(last.candidates_len, 1);
        let first = unsafe { text(*last.candidates) };
        assert_eq!(first.as_deref(), Some("テスト"));
        skk_key_response_free(last);

        skk_engine_free(engine);
    }
}
