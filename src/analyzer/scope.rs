/// The declared role of an identifier.
///
/// A `Kind` is what the symbol table binds names to, and at the same time the
/// operand vocabulary of the type checker: expression evaluation computes
/// over the kinds resolved from declarations and literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An `integer` variable or literal.
    Integer,
    /// A `real` variable or literal.
    Real,
    /// A `boolean` variable or literal.
    Boolean,
    /// A declared procedure name.
    Procedure,
    /// The program's own name.
    Program,
}

impl Kind {
    /// Maps a type keyword to its kind.
    ///
    /// Only the three declarable type names are accepted. `procedure` and
    /// `program` kinds are assigned by the grammar and never appear in a
    /// declaration's type position.
    ///
    /// # Example
    /// ```
    /// use minipas::analyzer::scope::Kind;
    ///
    /// assert_eq!(Kind::from_type_name("real"), Some(Kind::Real));
    /// assert_eq!(Kind::from_type_name("procedure"), None);
    /// ```
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(Self::Integer),
            "real" => Some(Self::Real),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Boolean => write!(f, "boolean"),
            Self::Procedure => write!(f, "procedure"),
            Self::Program => write!(f, "program"),
        }
    }
}

#[derive(Debug)]
/// Errors raised by the symbol table itself.
///
/// The grammar engine converts these into analysis errors carrying the line
/// of the offending identifier.
pub enum ScopeError {
    /// An identifier was declared twice in the same scope.
    Redeclaration {
        /// The identifier that was already bound.
        name: String,
    },
    /// An identifier was used without any visible declaration.
    Undeclared {
        /// The identifier that failed to resolve.
        name: String,
    },
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redeclaration { name } => {
                write!(f, "Tried to redefine already existing identifier '{name}'.")
            },

            Self::Undeclared { name } => {
                write!(f, "Identifier '{name}' was used before declaration.")
            },
        }
    }
}

impl std::error::Error for ScopeError {}

/// One frame of the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    /// Delimits one scope's bindings from the ones below it.
    Marker,
    /// A declared identifier and its kind.
    Binding {
        name: String,
        kind: Kind,
    },
}

/// A block-structured symbol table.
///
/// Bindings and scope markers share one stack, ordered by declaration time.
/// Opening a scope pushes a marker; closing one pops everything down to and
/// including the nearest marker. Lookup scans from the top across all open
/// scopes, so inner declarations shadow outer ones, while redeclaration
/// checks stop at the innermost marker, so only same-scope duplicates are
/// rejected.
///
/// # Example
/// ```
/// use minipas::analyzer::scope::{Kind, ScopeStack};
///
/// let mut scopes = ScopeStack::new();
/// scopes.open_scope();
/// scopes.declare("x", Kind::Integer).unwrap();
///
/// scopes.open_scope();
/// scopes.declare("x", Kind::Real).unwrap(); // shadows the outer `x`
/// assert_eq!(scopes.resolve("x").unwrap(), Kind::Real);
///
/// scopes.close_scope();
/// assert_eq!(scopes.resolve("x").unwrap(), Kind::Integer);
/// ```
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// Creates an empty symbol table with no open scope.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Opens a new scope by pushing a marker.
    pub fn open_scope(&mut self) {
        self.frames.push(Frame::Marker);
    }

    /// Binds `name` to `kind` in the innermost scope.
    ///
    /// # Errors
    /// Returns `ScopeError::Redeclaration` if `name` is already bound in the
    /// innermost scope. A binding in an enclosing scope does not conflict;
    /// the new binding shadows it.
    pub fn declare(&mut self, name: &str, kind: Kind) -> Result<(), ScopeError> {
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Marker => break,
                Frame::Binding { name: bound, .. } if bound == name => {
                    return Err(ScopeError::Redeclaration { name: name.to_string() });
                },
                Frame::Binding { .. } => {},
            }
        }
        self.frames.push(Frame::Binding { name: name.to_string(),
                                          kind });

        Ok(())
    }

    /// Resolves `name` to the kind of its innermost visible binding.
    ///
    /// The scan runs from the most recent frame toward the bottom and crosses
    /// scope markers, so all enclosing scopes are searched.
    ///
    /// # Errors
    /// Returns `ScopeError::Undeclared` if no scope binds `name`.
    pub fn resolve(&self, name: &str) -> Result<Kind, ScopeError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| match frame {
                Frame::Binding { name: bound, kind } if bound == name => Some(*kind),
                _ => None,
            })
            .ok_or_else(|| ScopeError::Undeclared { name: name.to_string() })
    }

    /// Closes the innermost scope, dropping all of its bindings.
    ///
    /// # Panics
    /// Panics if no scope is open. The grammar engine opens and closes scopes
    /// in strict pairs, so hitting this indicates a caller bug, not bad
    /// input.
    pub fn close_scope(&mut self) {
        while let Some(frame) = self.frames.pop() {
            if frame == Frame::Marker {
                return;
            }
        }
        panic!("close_scope called with no open scope");
    }
}
