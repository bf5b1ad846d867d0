/// The lexer module turns source text into the classified token stream.
///
/// The lexer lowercases the input, validates comment braces, strips comments
/// and whitespace, and matches everything else against the lexical rules,
/// producing tokens that carry their lexeme, classification and line. It
/// also renders and reads the textual token table, so the scanning and
/// analysis stages can run as separate invocations.
///
/// # Responsibilities
/// - Converts the input character stream into classified tokens with source
///   lines.
/// - Strips comments and validates brace balance before rule matching.
/// - Reports lexical errors for input no rule matches.
/// - Renders token streams as tables and reads them back.
pub mod lexer;

/// The grammar module recognizes the token stream against the language.
///
/// The grammar engine is a set of recursive-descent functions, one per
/// non-terminal, driven from the `program` root. There is no syntax tree:
/// as each production is recognized, the engine declares and resolves
/// identifiers in the symbol table and feeds the type checker, so parsing
/// and semantic analysis happen in one left-to-right pass.
///
/// # Responsibilities
/// - Validates grammar and syntax, reporting errors with line info.
/// - Selects among statement alternatives without consuming tokens until
///   one commits.
/// - Drives scope opening/closing and expression boundary evaluation.
pub mod grammar;

/// The scope module is the block-structured symbol table.
///
/// One stack holds scope markers and `(identifier, kind)` bindings in
/// declaration order. Inner scopes shadow outer ones on lookup, while
/// redeclaration checks stay within the innermost scope.
///
/// # Responsibilities
/// - Defines `Kind`, the declared role of an identifier.
/// - Declares identifiers, rejecting same-scope duplicates.
/// - Resolves identifiers across all open scopes, innermost first.
pub mod scope;

/// The type control module checks expression types.
///
/// While an expression parses, its operand kinds and operator symbols
/// accumulate in infix order. At expression boundaries the buffer is
/// linearized to postfix by precedence and executed as a typed stack
/// machine, reducing the expression to one result kind or failing on the
/// first incompatible operation.
///
/// # Responsibilities
/// - Defines the operator table: precedence, associativity, typing rules.
/// - Converts infix buffers to postfix and executes them over kinds.
/// - Reports incompatible operand kinds for operators and assignment.
pub mod type_control;
