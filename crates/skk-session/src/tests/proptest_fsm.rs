//! Property-based tests for the InputSession state machine.
//!
//! Generates random key sequences via proptest and verifies that structural
//! invariants hold after every action.

use proptest::prelude::*;

use super::make_session;
use crate::types::{ConversionOrigin, InputMode};
use crate::{CandidateAction, InputSession, KeyEvent, KeyResponse, Mode};

// ---------------------------------------------------------------------------
// Action enum: every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Type(char),
    Key(KeyEvent),
    Pick(usize),
}

// ---------------------------------------------------------------------------
// Strategy: weighted random Action generation
// ---------------------------------------------------------------------------

fn arb_letter() -> impl Strategy<Value = char> {
    // Vowels at higher weight for more realistic romaji
    prop_oneof![
        3 => prop::sample::select(vec!['a', 'i', 'u', 'e', 'o']),
        2 => prop::sample::select(vec![
            'k', 's', 't', 'n', 'h', 'm', 'y', 'r', 'w', 'g', 'z', 'd', 'b', 'j', 'x',
        ]),
        1 => prop::sample::select(vec!['K', 'S', 'M', 'T', 'N', 'A', 'U', 'B']),
        1 => prop::sample::select(vec!['q', 'l', 'L', '/', ' ', '.', '-', '1']),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        50 => arb_letter().prop_map(Action::Type),
        10 => Just(Action::Key(KeyEvent::Char(' '))),
        8 => Just(Action::Key(KeyEvent::Backspace)),
        6 => Just(Action::Key(KeyEvent::Enter)),
        3 => Just(Action::Key(KeyEvent::NextCandidate)),
        3 => Just(Action::Key(KeyEvent::PrevCandidate)),
        2 => Just(Action::Key(KeyEvent::ToggleKana)),
        2 => Just(Action::Key(KeyEvent::Cancel)),
        3 => (0usize..8).prop_map(Action::Pick),
    ]
}

fn execute_action(session: &mut InputSession, action: &Action) -> KeyResponse {
    match action {
        Action::Type(ch) => session.handle_key(KeyEvent::Char(*ch)),
        Action::Key(event) => session.handle_key(*event),
        Action::Pick(index) => session.pick_candidate(*index),
    }
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(
    session: &InputSession,
    resp: &KeyResponse,
    action: &Action,
    before: InputMode,
) {
    let ctx = &session.ctx;

    // 1. CandidateChoose always has a valid selection
    if session.mode == InputMode::CandidateChoose {
        assert!(
            !ctx.candidates.is_empty(),
            "empty candidate list after {action:?}"
        );
        assert!(
            ctx.selected < ctx.candidates.len(),
            "selected {} out of bounds for {} after {action:?}",
            ctx.selected,
            ctx.candidates.len(),
        );
        if ctx.origin == Some(ConversionOrigin::Reading) {
            assert!(
                ctx.composing.is_empty(),
                "romaji {:?} left over in conversion after {action:?}",
                ctx.composing
            );
        }
    }

    // 2. Shown lists are non-empty with an in-range selection
    if let CandidateAction::Show { surfaces, selected } = &resp.candidates {
        assert!(!surfaces.is_empty(), "Show with no entries after {action:?}");
        assert!((*selected as usize) < surfaces.len());
    }

    // 3. Okurigana only exists after a shifted consonant started it
    if ctx.okurigana.is_some() {
        assert!(
            ctx.okuri_consonant.is_some(),
            "okurigana without consonant after {action:?}"
        );
        assert!(matches!(
            session.mode,
            InputMode::OkuriganaPending | InputMode::CandidateChoose
        ));
    }

    // 4. Only one buffer is extended outside the reading modes
    if matches!(
        session.mode,
        InputMode::Direct | InputMode::FullWidthLatin | InputMode::LatinPassthrough
    ) {
        assert!(ctx.reading.is_empty(), "stale reading after {action:?}");
        assert!(ctx.candidates.is_empty(), "stale candidates after {action:?}");
    }

    // 5. Idle means nothing displayed
    if !session.is_composing() {
        assert!(
            session.composed_string().is_empty(),
            "idle session displays {:?} after {action:?}",
            session.composed_string(),
        );
    }

    // 6. Committed text is non-empty when present; ignored keys commit nothing
    if let Some(text) = &resp.commit {
        assert!(!text.is_empty());
        assert!(resp.consumed);
    }

    // 7. Enter always finishes a reading, conversion or literal
    let reading_mode = matches!(
        before,
        InputMode::KanjiReading
            | InputMode::OkuriganaPending
            | InputMode::CandidateChoose
            | InputMode::EnglishToKanji
    );
    if reading_mode && matches!(action, Action::Key(KeyEvent::Enter)) {
        assert_eq!(session.mode, InputMode::Direct, "Enter from {before:?}");
    }
}

/// Press Backspace until the session is idle or a Latin mode swallows nothing.
fn drain(session: &mut InputSession) {
    for _ in 0..2000 {
        if !session.is_composing() {
            return;
        }
        let resp = session.handle_key(KeyEvent::Backspace);
        assert!(resp.consumed, "Backspace ignored while composing in {:?}", session.mode());
    }
    panic!("Backspace did not drain the session: {:?}", session.ctx);
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn session_invariants_hold(actions in prop::collection::vec(arb_action(), 1..100)) {
        let mut session = make_session();
        for action in &actions {
            let before = session.mode;
            let resp = execute_action(&mut session, action);
            assert_invariants(&session, &resp, action, before);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn backspace_drains_to_direct(actions in prop::collection::vec(arb_action(), 1..60)) {
        let mut session = make_session();
        for action in &actions {
            execute_action(&mut session, action);
        }
        drain(&mut session);

        prop_assert!(!session.is_registering());
        prop_assert!(session.ctx.composing.is_empty());
        prop_assert!(session.ctx.reading.is_empty());
        prop_assert!(matches!(
            session.mode(),
            Mode::Direct(_) | Mode::FullWidthLatin | Mode::LatinPassthrough
        ));
    }
}
