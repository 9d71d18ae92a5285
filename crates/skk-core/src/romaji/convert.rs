use super::punctuation::{full_width_symbol, PunctuationStyle};
use super::trie::{RomajiTrie, TrieLookupResult};
use crate::unicode::is_vowel;

/// Result of feeding one key to the transliterator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomajiStep {
    /// Text resolved by this key (kana, full-width symbols, or flushed literals).
    pub output: String,
    /// Romaji still waiting for more input.
    pub pending: String,
}

impl RomajiStep {
    fn resolved(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            pending: String::new(),
        }
    }

    fn waiting(pending: String) -> Self {
        Self {
            output: String::new(),
            pending,
        }
    }

    fn after(mut self, prefix: &str) -> Self {
        self.output.insert_str(0, prefix);
        self
    }
}

/// Incremental romaji-to-hiragana transliterator.
///
/// Stateless: the caller owns the pending buffer and hands it back on every
/// key. Output is always hiragana; katakana is derived by the caller.
#[derive(Clone, Copy)]
pub struct Transliterator<'t> {
    trie: &'t RomajiTrie,
    punctuation: PunctuationStyle,
}

impl Transliterator<'static> {
    pub fn global(punctuation: PunctuationStyle) -> Self {
        Self::new(RomajiTrie::global(), punctuation)
    }
}

impl<'t> Transliterator<'t> {
    pub fn new(trie: &'t RomajiTrie, punctuation: PunctuationStyle) -> Self {
        Self { trie, punctuation }
    }

    /// Feed one lower-case key, applying the sokuon and hatsuon rules before
    /// the table lookup.
    ///
    /// A completed "nn" is held back until the next key so that
    /// "konnichiha" reads こんにちは: a following vowel or `y` re-seeds the
    /// second `n`.
    pub fn feed(&self, pending: &str, ch: char) -> RomajiStep {
        if pending == "nn" {
            let rest = if is_vowel(ch) || ch == 'y' {
                self.feed("n", ch)
            } else {
                self.feed("", ch)
            };
            return rest.after("ん");
        }
        if pending == "n" && ch == 'n' {
            return RomajiStep::waiting("nn".to_string());
        }
        if let Some(step) = self.hatsuon_or_sokuon(pending, ch) {
            return step;
        }
        self.feed_plain(pending, ch)
    }

    /// Feed one key using the table alone.
    pub fn feed_plain(&self, pending: &str, ch: char) -> RomajiStep {
        let mut candidate = String::with_capacity(pending.len() + ch.len_utf8());
        candidate.push_str(pending);
        candidate.push(ch);

        if let Some(sym) = full_width_symbol(&candidate, self.punctuation) {
            return RomajiStep::resolved(sym);
        }

        match self.trie.lookup(&candidate) {
            TrieLookupResult::Exact(kana) | TrieLookupResult::ExactAndPrefix(kana) => {
                RomajiStep::resolved(kana)
            }
            TrieLookupResult::Prefix => RomajiStep::waiting(candidate),
            // Dead end: the old buffer can never complete, emit it as typed.
            TrieLookupResult::None if pending.is_empty() => RomajiStep::resolved(candidate),
            TrieLookupResult::None => self.feed_plain("", ch).after(pending),
        }
    }

    fn hatsuon_or_sokuon(&self, pending: &str, ch: char) -> Option<RomajiStep> {
        let mut chars = pending.chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return None;
        };
        if first == 'n' {
            if ch == '\'' {
                return Some(RomajiStep::resolved("ん"));
            }
            if !is_vowel(ch) && ch != 'n' && ch != 'y' {
                return Some(self.feed("", ch).after("ん"));
            }
        } else if first == ch && is_geminate_consonant(ch) {
            return Some(RomajiStep {
                output: "っ".to_string(),
                pending: ch.to_string(),
            });
        }
        None
    }

    /// True when the pending buffer resolves to ん on its own.
    pub fn is_hatsuon(pending: &str) -> bool {
        pending == "n" || pending == "nn"
    }

    /// Resolve whatever is left in the buffer: a trailing `n`/`nn` becomes
    /// ん, anything else is returned as typed.
    pub fn flush(pending: &str) -> String {
        if Self::is_hatsuon(pending) {
            "ん".to_string()
        } else {
            pending.to_string()
        }
    }

    /// Exact table (or punctuation) entry for `romaji`, without any rules.
    pub fn lookup_exact(&self, romaji: &str) -> Option<String> {
        if let Some(sym) = full_width_symbol(romaji, self.punctuation) {
            return Some(sym.to_string());
        }
        match self.trie.lookup(romaji) {
            TrieLookupResult::Exact(kana) | TrieLookupResult::ExactAndPrefix(kana) => Some(kana),
            _ => None,
        }
    }

    /// Transliterate a whole string, flushing the tail.
    pub fn convert(&self, input: &str) -> String {
        let mut out = String::new();
        let mut pending = String::new();
        for ch in input.chars() {
            let step = self.feed(&pending, ch);
            out.push_str(&step.output);
            pending = step.pending;
        }
        out.push_str(&Self::flush(&pending));
        out
    }
}

fn is_geminate_consonant(ch: char) -> bool {
    ch.is_ascii_lowercase() && !is_vowel(ch) && ch != 'n' && ch != 'y'
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tr() -> Transliterator<'static> {
        Transliterator::global(PunctuationStyle::Jp)
    }

    fn feed_all(t: &Transliterator<'_>, pending: &str, input: &str) -> RomajiStep {
        let mut out = String::new();
        let mut pending = pending.to_string();
        for ch in input.chars() {
            let step = t.feed(&pending, ch);
            out.push_str(&step.output);
            pending = step.pending;
        }
        RomajiStep {
            output: out,
            pending,
        }
    }

    #[test]
    fn test_basic_ka() {
        let r = feed_all(&tr(), "", "ka");
        assert_eq!(r.output, "か");
        assert_eq!(r.pending, "");
    }

    #[test]
    fn test_konnichiha() {
        assert_eq!(tr().convert("konnichiha"), "こんにちは");
    }

    #[test]
    fn test_nn_before_consonant_and_vowel() {
        assert_eq!(tr().convert("konna"), "こんな");
        assert_eq!(tr().convert("konnnichiha"), "こんにちは");
        assert_eq!(tr().convert("kanji"), "かんじ");
        assert_eq!(tr().convert("sinbun"), "しんぶん");
        assert_eq!(tr().convert("hon'ya"), "ほんや");
    }

    #[test]
    fn test_sokuon_kk_keeps_second_k() {
        let r = feed_all(&tr(), "", "kk");
        assert_eq!(r.output, "っ");
        assert_eq!(r.pending, "k");
        assert_eq!(tr().convert("kitte"), "きって");
        assert_eq!(tr().convert("zasshi"), "ざっし");
    }

    #[test]
    fn test_no_sokuon_for_vowel_n_y() {
        let r = tr().feed("n", 'n');
        assert_eq!(r.output, "");
        assert_eq!(r.pending, "nn");
        let r = tr().feed("y", 'y');
        assert_ne!(r.output, "っ");
    }

    #[test]
    fn test_trailing_n_flush() {
        let r = feed_all(&tr(), "", "hon");
        assert_eq!(r.output, "ほ");
        assert_eq!(r.pending, "n");
        assert_eq!(Transliterator::flush(&r.pending), "ん");
        assert_eq!(Transliterator::flush("nn"), "ん");
        assert_eq!(Transliterator::flush("ky"), "ky");
    }

    #[test]
    fn test_youon() {
        assert_eq!(tr().convert("kyouha"), "きょうは");
        assert_eq!(tr().convert("shashin"), "しゃしん");
        assert_eq!(tr().convert("dhi"), "でぃ");
    }

    #[test]
    fn test_dead_end_flushes_literal() {
        let r = feed_all(&tr(), "", "kq");
        assert_eq!(r.output, "kq");
        assert_eq!(r.pending, "");
        let r = feed_all(&tr(), "", "tsa");
        assert_eq!(r.output, "tsあ");
        assert_eq!(r.pending, "");
    }

    #[test]
    fn test_digits_are_literal() {
        assert_eq!(tr().convert("1"), "1");
        assert_eq!(tr().convert("ka2"), "か2");
    }

    #[test]
    fn test_punctuation_by_style() {
        assert_eq!(tr().convert("ne."), "ね。");
        assert_eq!(tr().convert("a,i"), "あ、い");
        let en = Transliterator::global(PunctuationStyle::En);
        assert_eq!(en.convert("ne."), "ね．");
        assert_eq!(en.convert("a-"), "あー");
    }

    #[test]
    fn test_n_before_punctuation() {
        assert_eq!(tr().convert("hon."), "ほん。");
    }

    #[test]
    fn test_z_sequences_win_over_symbols() {
        assert_eq!(tr().convert("z/"), "・");
        assert_eq!(tr().convert("z-"), "〜");
        assert_eq!(tr().convert("z."), "…");
        assert_eq!(tr().convert("/"), "／");
    }

    #[test]
    fn test_vu_spelling() {
        assert_eq!(tr().convert("vu"), "う゛");
    }

    #[test]
    fn test_lookup_exact() {
        assert_eq!(tr().lookup_exact("ka"), Some("か".to_string()));
        assert_eq!(tr().lookup_exact("k"), None);
        assert_eq!(tr().lookup_exact("sha"), Some("しゃ".to_string()));
        assert_eq!(tr().lookup_exact("!"), Some("！".to_string()));
    }

    const SYLLABLES: &[(&str, &str)] = &[
        ("a", "あ"),
        ("i", "い"),
        ("u", "う"),
        ("ka", "か"),
        ("shi", "し"),
        ("tsu", "つ"),
        ("na", "な"),
        ("nya", "にゃ"),
        ("chi", "ち"),
        ("fu", "ふ"),
        ("ji", "じ"),
        ("wo", "を"),
        ("kyo", "きょ"),
        ("xtu", "っ"),
        ("ryu", "りゅ"),
        ("ge", "げ"),
    ];

    proptest! {
        #[test]
        fn concatenated_syllables_transliterate_piecewise(
            picks in prop::collection::vec(0..SYLLABLES.len(), 0..12)
        ) {
            let romaji: String = picks.iter().map(|&i| SYLLABLES[i].0).collect();
            let kana: String = picks.iter().map(|&i| SYLLABLES[i].1).collect();
            prop_assert_eq!(tr().convert(&romaji), kana);
        }

        #[test]
        fn split_feeding_matches_whole(
            input in "[a-z,.\\-]{0,16}",
            split in 0usize..17
        ) {
            let t = tr();
            let split = split.min(input.len());
            let (head, tail) = input.split_at(split);
            let first = feed_all(&t, "", head);
            let second = feed_all(&t, &first.pending, tail);
            let mut joined = first.output;
            joined.push_str(&second.output);
            joined.push_str(&Transliterator::flush(&second.pending));
            prop_assert_eq!(joined, t.convert(&input));
        }
    }
}
