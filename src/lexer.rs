//! Markup lexer: splits raw markup into text runs and normalized tags.
//!
//! The input is tag soup, not XML: tags may be unbalanced or unknown and
//! must never produce an error. The scan is a single pass over characters
//! with an in-tag flag; everything between `<` and `>` is tag content,
//! everything else is text.

use crate::token::Token;

/// Lex raw markup into a token stream.
///
/// Tag names are normalized for dispatch: lowercased, attributes after the
/// first whitespace dropped, and a self-closing `/` suffix stripped, so
/// `<BR />` and `<br>` both yield `Tag("br")`. Named entities in text runs
/// are decoded; unknown entities pass through verbatim. An unterminated
/// tag at end of input is dropped.
pub fn lex(body: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut tag = String::new();
    let mut in_tag = false;

    for ch in body.chars() {
        match ch {
            '<' if !in_tag => {
                in_tag = true;
                if !text.is_empty() {
                    tokens.push(Token::Text(decode_entities(&text)));
                    text.clear();
                }
            }
            '>' if in_tag => {
                in_tag = false;
                let name = normalize_tag(&tag);
                if !name.is_empty() {
                    tokens.push(Token::Tag(name));
                }
                tag.clear();
            }
            _ if in_tag => tag.push(ch),
            _ => text.push(ch),
        }
    }

    if in_tag {
        log::warn!("dropping unterminated tag at end of input: <{}", tag);
    } else if !text.is_empty() {
        tokens.push(Token::Text(decode_entities(&text)));
    }

    tokens
}

/// Normalize raw tag content into a dispatchable name.
fn normalize_tag(raw: &str) -> String {
    let name = raw.split_whitespace().next().unwrap_or("");
    let name = match name.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    };
    name.to_ascii_lowercase()
}

/// Decode the small set of named entities the lexer recognizes.
fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 5] = [
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
        ("&copy;", "\u{00A9}"),
        ("&ndash;", "\u{2013}"),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);
        let replacement = ENTITIES.iter().find_map(|(entity, value)| {
            tail.starts_with(entity).then_some((entity.len(), *value))
        });
        match replacement {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::lex;
    use crate::token::Token;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn tag(s: &str) -> Token {
        Token::Tag(s.to_string())
    }

    #[test]
    fn splits_text_and_tags() {
        assert_eq!(
            lex("<b>Hello</b> world"),
            vec![tag("b"), text("Hello"), tag("/b"), text(" world")]
        );
    }

    #[test]
    fn normalizes_tag_names() {
        assert_eq!(lex("<BR>"), vec![tag("br")]);
        assert_eq!(lex("<br />"), vec![tag("br")]);
        assert_eq!(lex("<br/>"), vec![tag("br")]);
        assert_eq!(
            lex(r#"<p class="intro" id="x">"#),
            vec![tag("p")]
        );
        assert_eq!(lex("</P >"), vec![tag("/p")]);
    }

    #[test]
    fn decodes_known_entities_and_passes_unknown_through() {
        assert_eq!(lex("&lt;b&gt;"), vec![text("<b>")]);
        assert_eq!(lex("a &amp; b"), vec![text("a & b")]);
        assert_eq!(lex("&copy; 2020 &ndash; 2021"), vec![text("\u{00A9} 2020 \u{2013} 2021")]);
        assert_eq!(lex("&nope; &"), vec![text("&nope; &")]);
    }

    #[test]
    fn entities_inside_tags_are_not_decoded() {
        // Tag content is a name, not text; only the first word survives
        // normalization anyway.
        assert_eq!(lex("<b &amp;>x"), vec![tag("b"), text("x")]);
    }

    #[test]
    fn drops_unterminated_trailing_tag() {
        assert_eq!(lex("done<b"), vec![text("done")]);
        assert_eq!(lex("<"), Vec::new());
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert_eq!(lex(""), Vec::new());
    }

    #[test]
    fn empty_tag_emits_nothing() {
        assert_eq!(lex("a<>b"), vec![text("a"), text("b")]);
    }
}
