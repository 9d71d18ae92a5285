use serde::Deserialize;

/// How `.` and `,` are rendered in kana input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationStyle {
    /// ．，
    #[default]
    En,
    /// 。、
    Jp,
    /// 。，
    JpEn,
}

impl PunctuationStyle {
    fn period(self) -> &'static str {
        match self {
            Self::En => "．",
            Self::Jp | Self::JpEn => "。",
        }
    }

    fn comma(self) -> &'static str {
        match self {
            Self::En | Self::JpEn => "，",
            Self::Jp => "、",
        }
    }
}

/// Full-width replacement for a single punctuation key, if it has one.
pub fn full_width_symbol(key: &str, style: PunctuationStyle) -> Option<&'static str> {
    let sym = match key {
        "." => style.period(),
        "," => style.comma(),
        "-" => "ー",
        "!" => "！",
        "?" => "？",
        "~" => "〜",
        "[" => "「",
        "]" => "」",
        "/" => "／",
        "@" => "＠",
        "{" => "｛",
        "}" => "｝",
        _ => return None,
    };
    Some(sym)
}

pub(super) fn is_punctuation_key(key: &str) -> bool {
    full_width_symbol(key, PunctuationStyle::En).is_some()
}
