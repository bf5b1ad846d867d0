use crate::analyzer::scope::Kind;

/// An operator symbol as it appears on the type control stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Logical negation, `not`.
    Not,
    /// Logical conjunction, `and`.
    And,
    /// Logical disjunction, `or`.
    Or,
    /// Multiplication, `*`.
    Mul,
    /// Division, `/`. The result is always `real`.
    Div,
    /// Addition, `+`.
    Add,
    /// Subtraction, `-`.
    Sub,
    /// Equality, `=`.
    Equal,
    /// Inequality, `<>`.
    NotEqual,
    /// Strictly less, `<`.
    Less,
    /// Strictly greater, `>`.
    Greater,
    /// Less or equal, `<=`.
    LessOrEqual,
    /// Greater or equal, `>=`.
    GreaterOrEqual,
    /// Assignment, `:=`. Lowest precedence, evaluated last.
    Assign,
}

impl Operator {
    /// Returns the operator's binding strength for the shunting-yard pass.
    ///
    /// The tiers are taken from the language's operator table: `not` binds
    /// tightest, then `and`/`or` alongside `*` and `/`, then `+`/`-`, then
    /// the relational operators, with `:=` last.
    ///
    /// # Example
    /// ```
    /// use minipas::analyzer::type_control::Operator;
    ///
    /// assert!(Operator::Mul.precedence() > Operator::Add.precedence());
    /// assert_eq!(Operator::And.precedence(), Operator::Div.precedence());
    /// assert_eq!(Operator::Assign.precedence(), 0);
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => 4,
            Self::And | Self::Or | Self::Mul | Self::Div => 3,
            Self::Add | Self::Sub => 2,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessOrEqual
            | Self::GreaterOrEqual => 1,
            Self::Assign => 0,
        }
    }

    /// Returns `true` for operators that group to the right.
    ///
    /// `not` groups right so that `not not x` negates innermost-first, and
    /// `:=` groups right because it is the final act of an assignment.
    /// Every other operator is left-associative.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Not | Self::Assign)
    }

    /// Returns `true` for the six relational operators.
    ///
    /// # Example
    /// ```
    /// use minipas::analyzer::type_control::Operator;
    ///
    /// assert!(Operator::LessOrEqual.is_relational());
    /// assert!(!Operator::Add.is_relational());
    /// ```
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessOrEqual
                 | Self::GreaterOrEqual)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
            Self::Assign => ":=",
        };
        write!(f, "{symbol}")
    }
}

/// One element of the infix buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// The kind of a literal or resolved identifier.
    Operand(Kind),
    /// An operator symbol.
    Operator(Operator),
    /// An opening parenthesis marker.
    Open,
    /// A closing parenthesis marker.
    Close,
}

#[derive(Debug)]
/// Errors raised while evaluating the type of an expression.
///
/// The grammar engine converts these into analysis errors carrying the line
/// of the expression boundary that triggered evaluation.
pub enum TypeError {
    /// A binary operator was applied to an unsupported pair of kinds.
    Incompatible {
        /// The operator that failed.
        operator: Operator,
        /// The left operand's kind.
        left:     Kind,
        /// The right operand's kind.
        right:    Kind,
    },
    /// A unary operator was applied to an unsupported kind.
    IncompatibleOperand {
        /// The operator that failed.
        operator: Operator,
        /// The operand's kind.
        operand:  Kind,
    },
    /// An operator had too few operands to consume.
    MissingOperand {
        /// The operator left without an operand.
        operator: Operator,
    },
    /// Parenthesis markers did not pair up.
    UnbalancedGroup,
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incompatible { operator, left, right } => {
                write!(f, "Incompatible types for operation '{operator}': {left} and {right}.")
            },

            Self::IncompatibleOperand { operator, operand } => {
                write!(f, "Incompatible type for operation '{operator}': {operand}.")
            },

            Self::MissingOperand { operator } => {
                write!(f, "Operation '{operator}' is missing an operand.")
            },

            Self::UnbalancedGroup => write!(f, "Unbalanced parentheses in expression."),
        }
    }
}

impl std::error::Error for TypeError {}

/// An element of the postfix sequence produced by the shunting-yard pass.
/// Parenthesis markers are consumed during conversion and never reach
/// execution.
#[derive(Debug, Clone, Copy)]
enum PostfixItem {
    Operand(Kind),
    Operator(Operator),
}

/// An operator parked on the side stack of the shunting-yard pass. `Open`
/// fences off a parenthesized group so operators outside it stay put.
#[derive(Debug, Clone, Copy)]
enum Held {
    Operator(Operator),
    Open,
}

/// The expression type checker.
///
/// While an expression is parsed, operand kinds, operator symbols and
/// parenthesis markers accumulate here in the order they were encountered.
/// At an expression boundary [`evaluate`](Self::evaluate) linearizes the
/// buffer to postfix and executes it as a typed stack machine, reducing the
/// whole expression to at most one result kind or failing on the first
/// incompatible operation.
///
/// # Example
/// ```
/// use minipas::analyzer::{scope::Kind,
///                         type_control::{Entry, Operator, TypeControlStack}};
///
/// let mut types = TypeControlStack::new();
/// types.push(Entry::Operand(Kind::Integer));
/// types.push(Entry::Operator(Operator::Add));
/// types.push(Entry::Operand(Kind::Real));
///
/// assert_eq!(types.evaluate().unwrap(), Some(Kind::Real));
/// ```
#[derive(Debug, Default)]
pub struct TypeControlStack {
    entries: Vec<Entry>,
}

impl TypeControlStack {
    /// Creates an empty type control stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends one entry to the infix buffer.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the number of buffered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the buffer holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reduces the buffered expression to its result kind.
    ///
    /// The infix buffer is converted to postfix using the precedence table
    /// and then executed: operands push their kinds, operators pop their
    /// operands and push the result kind their typing rule produces.
    /// Assignment consumes its operand pair without producing a result.
    /// Afterwards the buffer holds the result alone, so at most one entry.
    ///
    /// Evaluating an empty buffer is a no-op returning `Ok(None)`.
    ///
    /// # Returns
    /// The kind of the evaluated expression, or `None` when nothing remains
    /// (an assignment, or an empty buffer).
    ///
    /// # Errors
    /// Returns a [`TypeError`] when an operator's typing rule rejects its
    /// operands, when an operator has too few operands, or when parenthesis
    /// markers do not pair up.
    pub fn evaluate(&mut self) -> Result<Option<Kind>, TypeError> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let postfix = self.to_postfix()?;
        let mut operands = Vec::new();

        for item in postfix {
            match item {
                PostfixItem::Operand(kind) => operands.push(kind),
                PostfixItem::Operator(operator) => Self::execute(operator, &mut operands)?,
            }
        }

        let result = operands.last().copied();
        self.entries = operands.into_iter().map(Entry::Operand).collect();

        Ok(result)
    }

    /// Drains the infix buffer into a postfix sequence.
    fn to_postfix(&mut self) -> Result<Vec<PostfixItem>, TypeError> {
        let mut output = Vec::with_capacity(self.entries.len());
        let mut held = Vec::new();

        for entry in self.entries.drain(..) {
            match entry {
                Entry::Operand(kind) => output.push(PostfixItem::Operand(kind)),

                Entry::Open => held.push(Held::Open),

                Entry::Close => loop {
                    match held.pop() {
                        Some(Held::Operator(op)) => output.push(PostfixItem::Operator(op)),
                        Some(Held::Open) => break,
                        None => return Err(TypeError::UnbalancedGroup),
                    }
                },

                Entry::Operator(op) => {
                    while let Some(Held::Operator(parked)) = held.last() {
                        let pops = if op.is_right_associative() {
                            parked.precedence() > op.precedence()
                        } else {
                            parked.precedence() >= op.precedence()
                        };
                        if !pops {
                            break;
                        }
                        output.push(PostfixItem::Operator(*parked));
                        held.pop();
                    }
                    held.push(Held::Operator(op));
                },
            }
        }

        for parked in held.into_iter().rev() {
            match parked {
                Held::Operator(op) => output.push(PostfixItem::Operator(op)),
                Held::Open => return Err(TypeError::UnbalancedGroup),
            }
        }

        Ok(output)
    }

    /// Applies one operator to the operand stack.
    fn execute(operator: Operator, operands: &mut Vec<Kind>) -> Result<(), TypeError> {
        if operator == Operator::Not {
            let operand = operands.pop()
                                  .ok_or(TypeError::MissingOperand { operator })?;

            return if operand == Kind::Boolean {
                operands.push(Kind::Boolean);
                Ok(())
            } else {
                Err(TypeError::IncompatibleOperand { operator,
                                                     operand })
            };
        }

        let right = operands.pop()
                            .ok_or(TypeError::MissingOperand { operator })?;
        let left = operands.pop()
                           .ok_or(TypeError::MissingOperand { operator })?;

        if operator == Operator::Assign {
            return if left == right {
                Ok(())
            } else {
                Err(TypeError::Incompatible { operator,
                                              left,
                                              right })
            };
        }

        match Self::binary_result(operator, left, right) {
            Some(kind) => {
                operands.push(kind);
                Ok(())
            },
            None => {
                Err(TypeError::Incompatible { operator,
                                              left,
                                              right })
            },
        }
    }

    /// The typing rules for the binary operators.
    ///
    /// `+`, `-` and `*` stay integer on integers and promote to real on any
    /// real operand; `/` always produces real; `and`/`or` demand booleans;
    /// the relational operators accept integer/real in any combination and
    /// produce boolean, rejecting boolean operands.
    const fn binary_result(operator: Operator, left: Kind, right: Kind) -> Option<Kind> {
        use Kind::{Boolean, Integer, Real};

        match operator {
            Operator::Add | Operator::Sub | Operator::Mul => match (left, right) {
                (Integer, Integer) => Some(Integer),
                (Real, Real) | (Integer, Real) | (Real, Integer) => Some(Real),
                _ => None,
            },

            Operator::Div => match (left, right) {
                (Integer | Real, Integer | Real) => Some(Real),
                _ => None,
            },

            Operator::And | Operator::Or => match (left, right) {
                (Boolean, Boolean) => Some(Boolean),
                _ => None,
            },

            op if op.is_relational() => match (left, right) {
                (Integer | Real, Integer | Real) => Some(Boolean),
                _ => None,
            },

            // `not` and `:=` are consumed before the binary dispatch.
            _ => unreachable!(),
        }
    }
}
