/// Lexed markup token.
///
/// Tokens are produced once by the lexer (or any external tokenizer) and
/// consumed read-only by layout; nothing downstream mutates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Literal text run, possibly containing several space-separated words.
    Text(String),
    /// Normalized tag name, e.g. `"b"`, `"/b"`, `"big"`, `"br"`, `"/p"`.
    ///
    /// Normalized means lowercased, attributes stripped, and any
    /// self-closing `/` suffix removed; a leading `/` marks a closing tag.
    Tag(String),
}

/// Recognized tag kinds for layout dispatch.
///
/// Dispatch is a closed match over this enumeration; every tag name the
/// engine does not recognize maps to [`TagKind::Other`], which is a
/// guaranteed no-op so unknown markup never becomes an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    /// `b`: weight becomes bold.
    Bold,
    /// `/b`: weight becomes normal.
    BoldEnd,
    /// `i`: slant becomes italic.
    Italic,
    /// `/i`: slant becomes roman.
    ItalicEnd,
    /// `big`: size grows by 4 points.
    Big,
    /// `/big`: size shrinks by 4 points.
    BigEnd,
    /// `small`: size shrinks by 2 points.
    Small,
    /// `/small`: size grows by 2 points.
    SmallEnd,
    /// `br`: forced line break.
    LineBreak,
    /// `/p`: line break plus paragraph spacing.
    ParagraphEnd,
    /// Any other tag; always ignored.
    Other,
}

impl TagKind {
    /// Map a normalized tag name onto its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "b" => Self::Bold,
            "/b" => Self::BoldEnd,
            "i" => Self::Italic,
            "/i" => Self::ItalicEnd,
            "big" => Self::Big,
            "/big" => Self::BigEnd,
            "small" => Self::Small,
            "/small" => Self::SmallEnd,
            "br" => Self::LineBreak,
            "/p" => Self::ParagraphEnd,
            _ => Self::Other,
        }
    }
}

impl From<&str> for TagKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{TagKind, Token};

    #[test]
    fn tag_kind_maps_recognized_names() {
        assert_eq!(TagKind::from_name("b"), TagKind::Bold);
        assert_eq!(TagKind::from_name("/b"), TagKind::BoldEnd);
        assert_eq!(TagKind::from_name("i"), TagKind::Italic);
        assert_eq!(TagKind::from_name("/i"), TagKind::ItalicEnd);
        assert_eq!(TagKind::from_name("big"), TagKind::Big);
        assert_eq!(TagKind::from_name("/big"), TagKind::BigEnd);
        assert_eq!(TagKind::from_name("small"), TagKind::Small);
        assert_eq!(TagKind::from_name("/small"), TagKind::SmallEnd);
        assert_eq!(TagKind::from_name("br"), TagKind::LineBreak);
        assert_eq!(TagKind::from_name("/p"), TagKind::ParagraphEnd);
    }

    #[test]
    fn tag_kind_maps_unknown_names_to_other() {
        assert_eq!(TagKind::from_name("p"), TagKind::Other);
        assert_eq!(TagKind::from_name("div"), TagKind::Other);
        assert_eq!(TagKind::from_name("/div"), TagKind::Other);
        assert_eq!(TagKind::from_name(""), TagKind::Other);
        assert_eq!(TagKind::from("blink"), TagKind::Other);
    }

    #[test]
    fn tokens_compare_by_value() {
        assert_eq!(
            Token::Text("hello".to_string()),
            Token::Text("hello".to_string())
        );
        assert_ne!(
            Token::Tag("b".to_string()),
            Token::Text("b".to_string())
        );
    }
}
