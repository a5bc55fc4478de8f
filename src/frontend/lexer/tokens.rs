//! Token types

/// Comment marker; everything from it to the end of the line is ignored
pub const COMMENT_START: char = '#';

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    OpenGroup,
    /// `}`
    CloseGroup,
    /// `|`
    BranchSeparator,
    /// Any other whitespace-delimited word
    Name,
}

impl TokenKind {
    /// Classify a single whitespace-delimited word
    pub fn classify(word: &str) -> Self {
        match word {
            "{" => TokenKind::OpenGroup,
            "}" => TokenKind::CloseGroup,
            "|" => TokenKind::BranchSeparator,
            _ => TokenKind::Name,
        }
    }

    /// Whether this kind is one of the three structural symbols
    #[inline]
    pub fn is_structural(self) -> bool {
        !matches!(self, TokenKind::Name)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Literal text of the word
    pub text: String,
    pub kind: TokenKind,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    /// Create a new token, classifying `text`
    pub fn new(
        text: impl Into<String>,
        line: usize,
    ) -> Self {
        let text = text.into();
        let kind = TokenKind::classify(&text);
        Self { text, kind, line }
    }

    #[inline]
    pub fn is(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
