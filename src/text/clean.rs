use regex::Regex;

// ============================================================================
// Text cleaning
// ============================================================================
//
// All cleaning here is idempotent: re-cleaning already-cleaned text is a
// no-op, so callers can clean defensively at any layer.

/// Compiled cleaning patterns. Built once per extractor, not per call.
pub struct Cleaner {
    tag_re: Regex,
    ws_re: Regex,
}

impl Cleaner {
    pub fn new() -> Self {
        Cleaner {
            tag_re: Regex::new(r"<[^<>]+>").expect("tag pattern"),
            ws_re: Regex::new(r"\s+").expect("whitespace pattern"),
        }
    }

    /// Strip markup tags, drop zero-width characters, collapse whitespace.
    pub fn clean_markup(&self, raw: &str) -> String {
        let no_tags = self.tag_re.replace_all(raw, " ");
        let no_zero_width: String = no_tags
            .chars()
            .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
            .collect();
        self.ws_re.replace_all(no_zero_width.trim(), " ").trim().to_string()
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a structural node name into something speakable: drop parenthetical
/// clone suffixes, underscores to spaces, split camel case, strip generic
/// trailing words, lowercase.
pub fn clean_structural_name(name: &str, strip_suffixes: &[String]) -> String {
    let no_parens = drop_parentheticals(name);
    let spaced = no_parens.replace('_', " ");
    let split = split_camel_case(&spaced);
    let lowered = split.to_lowercase();

    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    // Strip generic suffix words, but never down to nothing: a node literally
    // named "Button" keeps its one word.
    while words.len() > 1 {
        let last = *words.last().unwrap();
        if strip_suffixes.iter().any(|s| s == last) {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ")
}

/// Remove every "(...)" group, e.g. clone suffixes on instantiated nodes.
fn drop_parentheticals(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Insert spaces at camel-case and letter/digit boundaries.
/// "MasterVolume" -> "Master Volume", "HTTPServer" -> "HTTP Server",
/// "Volume75" -> "Volume 75".
pub fn split_camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let boundary = (c.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit()))
                || (c.is_uppercase()
                    && prev.is_uppercase()
                    && chars.get(i + 1).map(|n| n.is_lowercase()).unwrap_or(false))
                || (c.is_ascii_digit() && prev.is_alphabetic());
            if boundary && !prev.is_whitespace() {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

pub fn is_digits_only(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
