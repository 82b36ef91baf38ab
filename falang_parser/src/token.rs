//! Token definitions for the falang lexer.

use logos::Logos;

/// falang tokens.
///
/// Whitespace and `//` line comments are skipped by the lexer. `Str` is
/// never produced by logos directly: the lexer wrapper assembles it from a
/// `DoubleQuote` followed by a scan to the closing quote.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // ==================== Keywords ====================
    #[token("let")]
    KwLet,
    #[token("print")]
    KwPrint,
    #[token("load")]
    KwLoad,
    #[token("map")]
    KwMap,
    #[token("filter")]
    KwFilter,
    #[token("with")]
    KwWith,
    #[token("in")]
    KwIn,
    #[token("of")]
    KwOf,
    #[token("to")]
    KwTo,
    #[token("set_starts")]
    KwSetStarts,
    #[token("set_finals")]
    KwSetFinals,
    #[token("add_starts")]
    KwAddStarts,
    #[token("add_finals")]
    KwAddFinals,
    #[token("get_starts")]
    KwGetStarts,
    #[token("get_finals")]
    KwGetFinals,
    #[token("get_vertices")]
    KwGetVertices,
    #[token("get_edges")]
    KwGetEdges,
    #[token("get_labels")]
    KwGetLabels,
    #[token("get_reachable")]
    KwGetReachable,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("..")]
    DotDot,
    #[token("\\")]
    Backslash,
    #[token("->")]
    Arrow,

    // ==================== Operators ====================
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,
    #[token("++")]
    PlusPlus,
    #[token("*")]
    Star,

    // ==================== Literals ====================
    #[regex(r"-?[0-9]+")]
    Int,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[token("\"")]
    DoubleQuote,

    /// A complete string literal, quotes included. Assembled by the lexer
    /// wrapper, never matched by logos.
    Str,
}

impl Token {
    /// Human readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::KwLet => "'let'",
            Token::KwPrint => "'print'",
            Token::KwLoad => "'load'",
            Token::KwMap => "'map'",
            Token::KwFilter => "'filter'",
            Token::KwWith => "'with'",
            Token::KwIn => "'in'",
            Token::KwOf => "'of'",
            Token::KwTo => "'to'",
            Token::KwSetStarts => "'set_starts'",
            Token::KwSetFinals => "'set_finals'",
            Token::KwAddStarts => "'add_starts'",
            Token::KwAddFinals => "'add_finals'",
            Token::KwGetStarts => "'get_starts'",
            Token::KwGetFinals => "'get_finals'",
            Token::KwGetVertices => "'get_vertices'",
            Token::KwGetEdges => "'get_edges'",
            Token::KwGetLabels => "'get_labels'",
            Token::KwGetReachable => "'get_reachable'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Eq => "'='",
            Token::DotDot => "'..'",
            Token::Backslash => "'\\'",
            Token::Arrow => "'->'",
            Token::Pipe => "'|'",
            Token::Amp => "'&'",
            Token::PlusPlus => "'++'",
            Token::Star => "'*'",
            Token::Int => "integer literal",
            Token::Ident => "identifier",
            Token::DoubleQuote | Token::Str => "string literal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn tokens(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokens("let print load map filter with in of to"),
            vec![
                Token::KwLet,
                Token::KwPrint,
                Token::KwLoad,
                Token::KwMap,
                Token::KwFilter,
                Token::KwWith,
                Token::KwIn,
                Token::KwOf,
                Token::KwTo,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // "into" must not lex as "in" + "to"
        assert_eq!(tokens("into letter"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokens("| & ++ * .. -> \\"),
            vec![
                Token::Pipe,
                Token::Amp,
                Token::PlusPlus,
                Token::Star,
                Token::DotDot,
                Token::Arrow,
                Token::Backslash,
            ]
        );
    }

    #[test]
    fn test_int_range() {
        assert_eq!(
            tokens("{1..5}"),
            vec![
                Token::LBrace,
                Token::Int,
                Token::DotDot,
                Token::Int,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_negative_int() {
        assert_eq!(tokens("-5"), vec![Token::Int]);
        // arrow must win over a leading minus
        assert_eq!(tokens("->5"), vec![Token::Arrow, Token::Int]);
    }

    #[test]
    fn test_line_comment_skipped() {
        assert_eq!(
            tokens("let // all of this vanishes\nprint"),
            vec![Token::KwLet, Token::KwPrint]
        );
    }
}
