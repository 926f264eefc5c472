//! Lexer for layout scripts using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Keywords
    #[token("view")]
    View,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("safe")]
    Safe,

    // Relations, in both the symbolic and the ASCII spelling
    #[token("≈")]
    #[token("==")]
    Equal,
    #[token("≥")]
    #[token(">=")]
    GreaterOrEqual,
    #[token("≤")]
    #[token("<=")]
    LessOrEqual,

    // Priority operator
    #[token("•")]
    #[token("@")]
    Priority,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::View => write!(f, "view"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::Safe => write!(f, "safe"),
            Token::Equal => write!(f, "≈"),
            Token::GreaterOrEqual => write!(f, "≥"),
            Token::LessOrEqual => write!(f, "≤"),
            Token::Priority => write!(f, "•"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Bang => write!(f, "!"),
            Token::BraceOpen => write!(f, "{{"),
            Token::BraceClose => write!(f, "}}"),
            Token::BracketOpen => write!(f, "["),
            Token::BracketClose => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Dot => write!(f, "."),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Number(n) => write!(f, "{}", n),
            Token::LineComment | Token::BlockComment => write!(f, "comment"),
        }
    }
}

/// Lex input string into tokens with spans
///
/// Unrecognized input is dropped here; see [`invalid_spans`].
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Spans of input the lexer could not recognize
pub fn invalid_spans(input: &str) -> Vec<Span> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.is_err().then_some(span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let tokens: Vec<_> = lex("view if else safe").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![Token::View, Token::If, Token::Else, Token::Safe]
        );
    }

    #[test]
    fn test_relation_spellings() {
        let tokens: Vec<_> = lex("≈ == ≥ >= ≤ <=").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Equal,
                Token::Equal,
                Token::GreaterOrEqual,
                Token::GreaterOrEqual,
                Token::LessOrEqual,
                Token::LessOrEqual
            ]
        );
    }

    #[test]
    fn test_priority_spellings() {
        let tokens: Vec<_> = lex("• @").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Priority, Token::Priority]);
    }

    #[test]
    fn test_anchor_path() {
        let tokens: Vec<_> = lex("root.safe.top").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("root".to_string()),
                Token::Dot,
                Token::Safe,
                Token::Dot,
                Token::Ident("top".to_string())
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens: Vec<_> = lex("42 3.14 -10").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Number(42.0),
                Token::Number(3.14),
                Token::Minus,
                Token::Number(10.0)
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens: Vec<_> = lex("view a // comment\nview /* inline */ b")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::View,
                Token::Ident("a".to_string()),
                Token::View,
                Token::Ident("b".to_string())
            ]
        );
    }

    #[test]
    fn test_slash_is_not_a_comment() {
        let tokens: Vec<_> = lex("a.width / 2").map(|(t, _)| t).collect();
        assert_eq!(tokens[3], Token::Slash);
    }

    #[test]
    fn test_spans_cover_multibyte_symbols() {
        let spans: Vec<_> = lex("a ≈ b").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..1, 2..5, 6..7]);
    }

    #[test]
    fn test_invalid_spans() {
        assert!(invalid_spans("view a\na.width ≈ 10").is_empty());
        assert_eq!(invalid_spans("a.width ≈ $10"), vec![12..13]);
    }
}
