use super::DictError;

/// One conversion candidate. The annotation follows `;` in the stored value
/// and is never shown or committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub annotation: Option<String>,
}

impl Candidate {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(';') {
            Some((text, annotation)) => Self {
                text: text.to_string(),
                annotation: Some(annotation.to_string()),
            },
            None => Self {
                text: raw.to_string(),
                annotation: None,
            },
        }
    }

    /// The value as stored, annotation included.
    pub fn raw(&self) -> String {
        match &self.annotation {
            Some(a) => format!("{};{}", self.text, a),
            None => self.text.clone(),
        }
    }
}

/// Split a `/c1/c2/.../` value into its raw segments.
///
/// The delimiters at both ends are mandatory. Empty segments are dropped, and
/// a value without a single candidate is rejected.
pub fn parse_raw_value(value: &str) -> Result<Vec<String>, DictError> {
    if value.len() < 2 || !value.starts_with('/') || !value.ends_with('/') {
        return Err(DictError::InvalidValue(value.to_string()));
    }
    let items: Vec<String> = value
        .split('/')
        .skip(1)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        return Err(DictError::InvalidValue(value.to_string()));
    }
    Ok(items)
}

pub fn parse_value(value: &str) -> Result<Vec<Candidate>, DictError> {
    Ok(parse_raw_value(value)?
        .iter()
        .map(|raw| Candidate::parse(raw))
        .collect())
}

pub fn format_value<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::from("/");
    for item in items {
        out.push_str(item.as_ref());
        out.push('/');
    }
    out
}
