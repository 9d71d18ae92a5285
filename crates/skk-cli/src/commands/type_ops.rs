//! Headless key replay: drives an `InputSession` from a key script and
//! prints what a host would see.
//!
//! Script syntax: plain characters are typed as-is; `<bs>`, `<enter>`,
//! `<next>`, `<prev>`, `<kana>` and `<cancel>` stand for control actions;
//! `<pick:N>` picks candidate N; `<lt>` types a literal `<`.

use std::path::Path;
use std::process;
use std::sync::Arc;

use skk_core::dict::SystemDictionary;
use skk_core::settings::settings;
use skk_core::user_dict::UserDictionary;
use skk_session::{CandidateAction, InputSession, KeyEvent, KeyResponse, SessionOptions};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Key(KeyEvent),
    Pick(usize),
}

/// Parse a key script into steps.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, String> {
    let mut steps = Vec::new();
    let mut rest = script;
    while let Some(ch) = rest.chars().next() {
        if ch != '<' {
            steps.push(ScriptStep::Key(KeyEvent::Char(ch)));
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        let end = rest
            .find('>')
            .ok_or_else(|| format!("unterminated action in {rest:?}"))?;
        let name = &rest[1..end];
        let step = match name {
            "bs" => ScriptStep::Key(KeyEvent::Backspace),
            "enter" => ScriptStep::Key(KeyEvent::Enter),
            "next" => ScriptStep::Key(KeyEvent::NextCandidate),
            "prev" => ScriptStep::Key(KeyEvent::PrevCandidate),
            "kana" => ScriptStep::Key(KeyEvent::ToggleKana),
            "cancel" => ScriptStep::Key(KeyEvent::Cancel),
            "lt" => ScriptStep::Key(KeyEvent::Char('<')),
            _ => match name.strip_prefix("pick:") {
                Some(n) => ScriptStep::Pick(
                    n.parse()
                        .map_err(|_| format!("invalid candidate index: {n:?}"))?,
                ),
                None => return Err(format!("unknown action <{name}>")),
            },
        };
        steps.push(step);
        rest = &rest[end + 1..];
    }
    Ok(steps)
}

/// Replay `steps`, returning the committed text and one trace line per step.
pub fn replay(session: &mut InputSession, steps: &[ScriptStep]) -> (String, Vec<String>) {
    let mut committed = String::new();
    let mut trace = Vec::with_capacity(steps.len());
    for step in steps {
        let resp = match *step {
            ScriptStep::Key(event) => session.handle_key(event),
            ScriptStep::Pick(index) => session.pick_candidate(index),
        };
        committed.push_str(resp.commit_text());
        trace.push(format_step(step, &resp));
    }
    (committed, trace)
}

fn format_step(step: &ScriptStep, resp: &KeyResponse) -> String {
    let mut line = match step {
        ScriptStep::Key(KeyEvent::Char(c)) => format!("{c:?}"),
        ScriptStep::Key(event) => format!("{event:?}"),
        ScriptStep::Pick(index) => format!("Pick({index})"),
    };
    if !resp.consumed {
        line.push_str("  (not consumed)");
        return line;
    }
    if let Some(text) = &resp.commit {
        line.push_str(&format!("  commit={text:?}"));
    }
    line.push_str(&format!("  marked={:?}", resp.marked_text()));
    if let CandidateAction::Show { surfaces, selected } = &resp.candidates {
        line.push_str(&format!("  candidates={surfaces:?}@{selected}"));
    }
    line
}

pub fn type_cmd(dict_file: &str, user_file: Option<&str>, script: &str, verbose: bool) {
    let steps = die!(parse_script(script), "Error: {}");
    let s = settings();

    let system = SystemDictionary::open(Path::new(dict_file));
    if !system.is_available() {
        eprintln!("Warning: {dict_file} is not usable, converting with the user dictionary only");
    }
    let interval = s.dictionary.commit_interval;
    let user = match user_file {
        Some(path) => die!(
            UserDictionary::open(Path::new(path), interval),
            "Error opening user dictionary: {}"
        ),
        None => die!(
            UserDictionary::in_memory(interval),
            "Error creating user dictionary: {}"
        ),
    };

    let mut session = InputSession::new(
        Arc::new(system),
        Box::new(user),
        SessionOptions::from_settings(s),
    );
    let (committed, trace) = replay(&mut session, &steps);
    if verbose {
        for line in &trace {
            eprintln!("{line}");
        }
    }
    session.commit_changes();

    println!("{committed}");
    let pending = session.composed_string();
    if !pending.is_empty() {
        println!("(composing: {pending})");
    }
}
