use logos::Logos;

use crate::error::LexError;

/// The header line of a rendered token table.
pub const TABLE_HEADER: &str = "token,classification,line";

/// The classification attached to every scanned token.
///
/// Classification decides how the grammar engine treats a token; the text
/// is consulted only where one class covers several spellings (keywords,
/// delimiters, operators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A language keyword, including the boolean literals `true` and
    /// `false`.
    ReservedKeyword,
    /// A name: `[a-z][a-z0-9_]*`.
    Identifier,
    /// An integer literal such as `42`.
    Integer,
    /// A real literal such as `3.14`.
    Real,
    /// The assignment symbol `:=`.
    Attribution,
    /// One of `= < > <= >= <>`.
    Comparison,
    /// One of `; . : ( ) ,`.
    Delimiter,
    /// One of `+ -` or the keyword-spelled `or`.
    AdditiveOperator,
    /// One of `* /` or the keyword-spelled `and`.
    MultiplicativeOperator,
}

impl TokenClass {
    /// Maps a token table classification name back to its class.
    ///
    /// The names are the same ones [`Display`](std::fmt::Display) produces,
    /// so rendered tables read back without translation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reserved keyword" => Some(Self::ReservedKeyword),
            "identifier" => Some(Self::Identifier),
            "integer" => Some(Self::Integer),
            "real" => Some(Self::Real),
            "attribution" => Some(Self::Attribution),
            "comparison" => Some(Self::Comparison),
            "delimiter" => Some(Self::Delimiter),
            "additive operator" => Some(Self::AdditiveOperator),
            "multiplicative operator" => Some(Self::MultiplicativeOperator),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ReservedKeyword => "reserved keyword",
            Self::Identifier => "identifier",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Attribution => "attribution",
            Self::Comparison => "comparison",
            Self::Delimiter => "delimiter",
            Self::AdditiveOperator => "additive operator",
            Self::MultiplicativeOperator => "multiplicative operator",
        };
        write!(f, "{name}")
    }
}

/// One classified token of the stream the analyzer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexeme, case-normalized to lowercase.
    pub text:  String,
    /// The classification assigned by the scanner.
    pub class: TokenClass,
    /// The 1-based source line the lexeme started on.
    pub line:  usize,
}

/// Represents one matched lexeme in the source input.
///
/// The variants mirror the token classes; the matched slice supplies the
/// text, so spellings sharing a class share a variant.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = LexerExtras)]
enum Lexeme {
    /// Reserved words, including the boolean literals.
    #[token("program")]
    #[token("var")]
    #[token("integer")]
    #[token("real")]
    #[token("boolean")]
    #[token("procedure")]
    #[token("begin")]
    #[token("end")]
    #[token("if")]
    #[token("then")]
    #[token("else")]
    #[token("while")]
    #[token("do")]
    #[token("not")]
    #[token("true")]
    #[token("false")]
    Keyword,
    /// `:=`
    #[token(":=")]
    Attribution,
    /// `= < > <= >= <>`
    #[regex(r"<=|>=|<>|=|<|>")]
    Comparison,
    /// `; . : ( ) ,`
    #[regex(r"[;.:(),]")]
    Delimiter,
    /// `+ - or`
    #[token("+")]
    #[token("-")]
    #[token("or")]
    Additive,
    /// `* / and`
    #[token("*")]
    #[token("/")]
    #[token("and")]
    Multiplicative,
    /// Real literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*")]
    Real,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    Integer,
    /// Identifier tokens, such as `x` or `counter_2`.
    #[regex(r"[a-z][a-z0-9_]*")]
    Identifier,
    /// `{ Comments. }`
    #[regex(r"\{[^}]*\}", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    Comment,
    /// Line breaks; tracked for diagnostics, never emitted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl Lexeme {
    /// The classification this lexeme carries into the token stream.
    const fn class(self) -> TokenClass {
        match self {
            Self::Keyword => TokenClass::ReservedKeyword,
            Self::Attribution => TokenClass::Attribution,
            Self::Comparison => TokenClass::Comparison,
            Self::Delimiter => TokenClass::Delimiter,
            Self::Additive => TokenClass::AdditiveOperator,
            Self::Multiplicative => TokenClass::MultiplicativeOperator,
            Self::Real => TokenClass::Real,
            Self::Integer => TokenClass::Integer,
            Self::Identifier => TokenClass::Identifier,
            // Trivia is skipped before reaching the token stream.
            Self::Comment | Self::NewLine | Self::Ignored => unreachable!(),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics;
/// newline and comment callbacks increment it as line breaks are consumed.
#[derive(Default)]
struct LexerExtras {
    /// The current line number in the source being tokenized.
    line: usize,
}

/// Verifies that comment braces pair up before any rule matching runs.
///
/// Nested comments are not part of the language, so a plain depth count is
/// enough: a `}` at depth zero and a `{` still open at the end of input are
/// both fatal.
fn check_comment_braces(source: &str) -> Result<(), LexError> {
    let mut line = 1;
    let mut depth = 0usize;
    let mut opened_on = 0;

    for c in source.chars() {
        match c {
            '\n' => line += 1,
            '{' => {
                if depth == 0 {
                    opened_on = line;
                }
                depth += 1;
            },
            '}' => {
                if depth == 0 {
                    return Err(LexError::UnexpectedCommentClose { line });
                }
                depth -= 1;
            },
            _ => {},
        }
    }

    if depth > 0 {
        return Err(LexError::UnclosedComment { line: opened_on });
    }

    Ok(())
}

/// Scans source text into the classified token stream.
///
/// The source is lowercased first, comment braces are balance-checked, and
/// comments and whitespace are stripped; what remains must match the lexical
/// rules exactly.
///
/// # Parameters
/// - `source`: The program text to scan.
///
/// # Returns
/// The tokens in source order, each carrying its lexeme, classification and
/// 1-based line.
///
/// # Errors
/// Returns a [`LexError`] if comment braces are unbalanced or if any input
/// remains that no lexical rule matches.
///
/// # Example
/// ```
/// use minipas::analyzer::lexer::{TokenClass, tokenize};
///
/// let tokens = tokenize("program demo;").unwrap();
///
/// assert_eq!(tokens[0].class, TokenClass::ReservedKeyword);
/// assert_eq!(tokens[1].text, "demo");
/// assert_eq!(tokens[2].text, ";");
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    check_comment_braces(source)?;

    let source = source.to_lowercase();
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer_with_extras(&source, LexerExtras { line: 1 });

    while let Some(lexeme) = lexer.next() {
        match lexeme {
            Ok(lexeme) => {
                tokens.push(Token { text:  lexer.slice().to_string(),
                                    class: lexeme.class(),
                                    line:  lexer.extras.line, });
            },
            Err(()) => {
                return Err(LexError::UnrecognizedLexeme { lexeme: lexer.slice().to_string(),
                                                          line:   lexer.extras.line, });
            },
        }
    }

    Ok(tokens)
}

/// Renders a token stream as the textual token table.
///
/// The table starts with [`TABLE_HEADER`] and holds one
/// `text,classification,line` row per token.
#[must_use]
pub fn render_token_table(tokens: &[Token]) -> String {
    let mut table = String::from(TABLE_HEADER);

    for token in tokens {
        table.push('\n');
        table.push_str(&format!("{},{},{}", token.text, token.class, token.line));
    }

    table
}

/// Reads a rendered token table back into a token stream.
///
/// Rows are split from the right into line, classification and text, so the
/// comma delimiter token, whose text is `,` itself, round-trips.
///
/// # Parameters
/// - `table`: The table text, starting with [`TABLE_HEADER`].
///
/// # Returns
/// The tokens in table order.
///
/// # Errors
/// Returns a [`LexError`] if the header does not match, a row does not hold
/// three fields with a numeric line, or a classification name is unknown.
pub fn read_token_table(table: &str) -> Result<Vec<Token>, LexError> {
    let mut rows = table.lines().enumerate();

    match rows.next() {
        Some((_, header)) if header.trim() == TABLE_HEADER => {},
        Some((_, header)) => {
            return Err(LexError::MalformedHeader { found: header.to_string(),
                                                   line:  1, });
        },
        None => {
            return Err(LexError::MalformedHeader { found: String::new(),
                                                   line:  1, });
        },
    }

    let mut tokens = Vec::new();

    for (index, row) in rows {
        if row.trim().is_empty() {
            continue;
        }
        let table_line = index + 1;

        let mut fields = row.rsplitn(3, ',');
        let (line_field, class_field, text) =
            match (fields.next(), fields.next(), fields.next()) {
                (Some(line_field), Some(class_field), Some(text)) => (line_field, class_field, text),
                _ => {
                    return Err(LexError::MalformedRow { row:  row.to_string(),
                                                        line: table_line, });
                },
            };

        let line = match line_field.trim().parse::<usize>() {
            Ok(line) => line,
            Err(_) => {
                return Err(LexError::MalformedRow { row:  row.to_string(),
                                                    line: table_line, });
            },
        };

        let class = match TokenClass::from_name(class_field.trim()) {
            Some(class) => class,
            None => {
                return Err(LexError::UnknownClass { class: class_field.to_string(),
                                                    line:  table_line, });
            },
        };

        tokens.push(Token { text: text.to_string(),
                            class,
                            line });
    }

    Ok(tokens)
}
