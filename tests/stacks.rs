use minipas::analyzer::{scope::{Kind, ScopeError, ScopeStack},
                        type_control::{Entry, Operator, TypeControlStack, TypeError}};

fn evaluate(entries: &[Entry]) -> Result<Option<Kind>, TypeError> {
    let mut types = TypeControlStack::new();
    for entry in entries {
        types.push(*entry);
    }

    types.evaluate()
}

#[test]
fn declared_identifiers_resolve() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare("a", Kind::Integer).unwrap();

    assert_eq!(scopes.resolve("a").unwrap(), Kind::Integer);
    assert!(matches!(scopes.resolve("b"), Err(ScopeError::Undeclared { .. })));
}

#[test]
fn redeclaration_in_the_same_scope_is_rejected() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare("a", Kind::Integer).unwrap();

    assert!(matches!(scopes.declare("a", Kind::Real),
                     Err(ScopeError::Redeclaration { .. })));
}

#[test]
fn inner_bindings_shadow_outer_ones() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare("a", Kind::Integer).unwrap();

    scopes.open_scope();
    scopes.declare("a", Kind::Real).unwrap();
    assert_eq!(scopes.resolve("a").unwrap(), Kind::Real);

    scopes.close_scope();
    assert_eq!(scopes.resolve("a").unwrap(), Kind::Integer);
}

#[test]
fn resolution_crosses_scope_markers() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare("outer", Kind::Boolean).unwrap();

    scopes.open_scope();
    assert_eq!(scopes.resolve("outer").unwrap(), Kind::Boolean);
}

#[test]
fn closing_a_scope_drops_its_bindings() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();

    scopes.open_scope();
    scopes.declare("local", Kind::Integer).unwrap();
    scopes.close_scope();

    assert!(scopes.resolve("local").is_err());
}

#[test]
#[should_panic(expected = "no open scope")]
fn closing_without_an_open_scope_panics() {
    let mut scopes = ScopeStack::new();
    scopes.close_scope();
}

#[test]
fn integer_arithmetic_stays_integer() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Add),
                            Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Mul),
                            Entry::Operand(Kind::Integer)]);

    assert_eq!(result.unwrap(), Some(Kind::Integer));
}

#[test]
fn any_real_operand_promotes() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Sub),
                            Entry::Operand(Kind::Real)]);

    assert_eq!(result.unwrap(), Some(Kind::Real));
}

#[test]
fn division_always_yields_real() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Div),
                            Entry::Operand(Kind::Integer)]);

    assert_eq!(result.unwrap(), Some(Kind::Real));
}

#[test]
fn logical_operators_demand_booleans() {
    let result = evaluate(&[Entry::Operand(Kind::Boolean),
                            Entry::Operator(Operator::And),
                            Entry::Operand(Kind::Boolean)]);
    assert_eq!(result.unwrap(), Some(Kind::Boolean));

    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Or),
                            Entry::Operand(Kind::Integer)]);
    assert!(matches!(result, Err(TypeError::Incompatible { .. })));
}

#[test]
fn relational_operators_yield_boolean() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Equal),
                            Entry::Operand(Kind::Integer)]);
    assert_eq!(result.unwrap(), Some(Kind::Boolean));

    let result = evaluate(&[Entry::Operand(Kind::Real),
                            Entry::Operator(Operator::GreaterOrEqual),
                            Entry::Operand(Kind::Integer)]);
    assert_eq!(result.unwrap(), Some(Kind::Boolean));
}

#[test]
fn relational_operators_reject_booleans() {
    let result = evaluate(&[Entry::Operand(Kind::Boolean),
                            Entry::Operator(Operator::Equal),
                            Entry::Operand(Kind::Boolean)]);

    assert!(matches!(result, Err(TypeError::Incompatible { .. })));
}

#[test]
fn not_negates_booleans_only() {
    let result = evaluate(&[Entry::Operator(Operator::Not), Entry::Operand(Kind::Boolean)]);
    assert_eq!(result.unwrap(), Some(Kind::Boolean));

    let result = evaluate(&[Entry::Operator(Operator::Not), Entry::Operand(Kind::Integer)]);
    assert!(matches!(result, Err(TypeError::IncompatibleOperand { .. })));
}

#[test]
fn not_reduces_innermost_first() {
    let result = evaluate(&[Entry::Operator(Operator::Not),
                            Entry::Operator(Operator::Not),
                            Entry::Operand(Kind::Boolean)]);

    assert_eq!(result.unwrap(), Some(Kind::Boolean));
}

#[test]
fn assignment_consumes_both_sides() {
    let mut types = TypeControlStack::new();
    types.push(Entry::Operand(Kind::Integer));
    types.push(Entry::Operator(Operator::Assign));
    types.push(Entry::Operand(Kind::Integer));

    assert_eq!(types.evaluate().unwrap(), None);
    assert!(types.is_empty());
}

#[test]
fn assignment_requires_identical_kinds() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Assign),
                            Entry::Operand(Kind::Real)]);

    assert!(matches!(result,
                     Err(TypeError::Incompatible { operator: Operator::Assign, .. })));
}

#[test]
fn assignment_is_reduced_last() {
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Assign),
                            Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Add),
                            Entry::Operand(Kind::Integer)]);

    assert_eq!(result.unwrap(), None);
}

#[test]
fn multiplicative_operators_bind_before_relational_ones() {
    // If `and` reduced after `<`, the left comparison would produce the
    // boolean it needs; reduced first, it meets an integer and fails.
    let result = evaluate(&[Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Less),
                            Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::And),
                            Entry::Operand(Kind::Boolean)]);

    assert!(matches!(result, Err(TypeError::Incompatible { .. })));
}

#[test]
fn grouping_markers_override_precedence() {
    let result = evaluate(&[Entry::Operand(Kind::Boolean),
                            Entry::Operator(Operator::And),
                            Entry::Open,
                            Entry::Operand(Kind::Integer),
                            Entry::Operator(Operator::Less),
                            Entry::Operand(Kind::Integer),
                            Entry::Close]);

    assert_eq!(result.unwrap(), Some(Kind::Boolean));
}

#[test]
fn unbalanced_grouping_markers_are_rejected() {
    let result = evaluate(&[Entry::Open, Entry::Operand(Kind::Integer)]);
    assert!(matches!(result, Err(TypeError::UnbalancedGroup)));

    let result = evaluate(&[Entry::Operand(Kind::Integer), Entry::Close]);
    assert!(matches!(result, Err(TypeError::UnbalancedGroup)));
}

#[test]
fn operators_without_operands_are_rejected() {
    let result = evaluate(&[Entry::Operator(Operator::Add)]);
    assert!(matches!(result, Err(TypeError::MissingOperand { .. })));
}

#[test]
fn an_empty_stack_evaluates_to_nothing() {
    let mut types = TypeControlStack::new();

    assert_eq!(types.evaluate().unwrap(), None);
    assert!(types.is_empty());
}

#[test]
fn evaluation_leaves_at_most_the_result() {
    let mut types = TypeControlStack::new();
    types.push(Entry::Operand(Kind::Integer));
    types.push(Entry::Operator(Operator::Add));
    types.push(Entry::Operand(Kind::Integer));

    assert_eq!(types.evaluate().unwrap(), Some(Kind::Integer));
    assert_eq!(types.len(), 1);
}
