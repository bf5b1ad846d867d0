use std::fs::{self};

use minipas::{analyzer::lexer::{TokenClass, read_token_table, render_token_table, tokenize},
              check, check_table};
use walkdir::WalkDir;

#[test]
fn sample_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "pas"))
                                      .filter(|e| !e.path().to_string_lossy().contains("invalid"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = check(&content) {
            panic!("Sample program {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No sample programs found in tests/programs");
}

#[test]
fn rejected_sample_programs_fail() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs/invalid").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "pas"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if check(&content).is_ok() {
            panic!("Sample program {path:?} passed but was expected to fail:\n{content}");
        }
    }

    assert!(count > 0, "No sample programs found in tests/programs/invalid");
}

fn assert_success(src: &str) {
    if let Err(e) = check(src) {
        panic!("Program failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if check(src).is_ok() {
        panic!("Program passed but was expected to fail")
    }
}

#[test]
fn minimal_program_and_header() {
    assert_success("program p; begin end.");
    assert_failure("begin end.");
    assert_failure("program ; begin end.");
    assert_failure("program p begin end.");
}

#[test]
fn final_period_is_mandatory() {
    assert_failure("program p; begin end");
    assert_failure("program p; begin end;");
}

#[test]
fn trailing_tokens_after_the_period_fail() {
    assert_failure("program p; begin end. end");
    assert_failure("program p; begin end.\nprogram q; begin end.");
}

#[test]
fn declarations_and_use() {
    assert_success("program p; var a: integer; begin a := 1 end.");
    assert_success("program p; var a, b: integer; c: real; begin b := a + 2 end.");
    assert_failure("program p; begin a := 1 end.");
    assert_failure("program p; var a: integer; begin b := 1 end.");
}

#[test]
fn redeclaration_in_the_same_scope_fails() {
    assert_failure("program p; var a: integer; a: real; begin end.");
    assert_failure("program p; var a, a: integer; begin end.");
    assert_failure("program p; var a: integer; procedure a; begin end; begin end.");
}

#[test]
fn the_program_name_occupies_the_outer_scope() {
    assert_failure("program p; var p: integer; begin end.");
    // Resolvable as a call target, like any other bound identifier.
    assert_success("program p; begin p end.");
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    assert_success("program p; var a: integer; procedure q(a: real); begin a := 1.5 end; begin a := 1 end.");
    assert_success("program p; var a: integer; procedure q; var a: boolean; begin a := true end; begin a := 1 end.");
}

#[test]
fn procedure_locals_are_invisible_outside() {
    assert_failure("program p; procedure q; var b: integer; begin b := 1 end; begin b := 2 end.");
    assert_failure("program p; procedure q(x: integer); begin end; begin x := 1 end.");
}

#[test]
fn nested_procedures_resolve_where_declared() {
    assert_success("program p; procedure q; procedure r; begin end; begin r end; begin q end.");
    assert_failure("program p; procedure q; procedure r; begin end; begin end; begin r end.");
}

#[test]
fn integer_arithmetic_and_promotion() {
    assert_success("program p; var a: integer; begin a := 1 + 2 * 3 end.");
    assert_success("program p; var b: real; begin b := 1 + 2.5 end.");
    assert_failure("program p; var a: integer; begin a := 1 + 2.5 end.");
}

#[test]
fn division_always_produces_real() {
    assert_success("program p; var b: real; begin b := 2 / 2 end.");
    assert_failure("program p; var a: integer; begin a := 2 / 2 end.");
}

#[test]
fn logical_operators_demand_booleans() {
    assert_success("program p; var d: boolean; begin d := true and not false end.");
    assert_success("program p; var d, e: boolean; begin d := e or true end.");
    assert_failure("program p; var d: boolean; begin d := 1 and 2 end.");
    assert_failure("program p; var a: integer; begin a := not true end.");
}

#[test]
fn relational_operators_produce_boolean() {
    assert_success("program p; var d: boolean; begin d := 1 < 2 end.");
    assert_success("program p; var d: boolean; begin d := 1.5 >= 2 end.");
    assert_success("program p; var d: boolean; begin d := 1 <> 2 end.");
    assert_failure("program p; var a: integer; begin a := 1 < 2 end.");
}

#[test]
fn relational_operators_reject_boolean_operands() {
    assert_failure("program p; var d: boolean; begin d := true < false end.");
    assert_failure("program p; var d: boolean; begin d := (1 < 2) = (3 < 4) end.");
}

#[test]
fn parentheses_group_subexpressions() {
    assert_success("program p; var a: integer; begin a := (1 + 2) * 3 end.");
    assert_success("program p; var d: boolean; begin d := (1 < 2) and (3 >= 3) end.");
    assert_failure("program p; var a: integer; begin a := (1 + 2 end.");
}

#[test]
fn a_leading_sign_keeps_the_operand_kind() {
    assert_success("program p; var a: integer; begin a := -1 end.");
    assert_success("program p; var b: real; begin b := +2.5 - 1 end.");
}

#[test]
fn assignment_requires_identical_kinds() {
    assert_success("program p; var a, b: integer; begin a := b end.");
    assert_failure("program p; var a: boolean; begin a := 1 end.");
    assert_failure("program p; var b: real; begin b := true end.");
    // Kinds only have to match; two procedures satisfy that.
    assert_success("program p; procedure q; begin end; procedure r; begin q := r end; begin end.");
}

#[test]
fn procedure_calls_resolve_the_callee() {
    assert_success("program p; procedure q; begin end; begin q end.");
    assert_success("program p; procedure q(x: integer); begin end; begin q(1) end.");
    assert_failure("program p; begin q end.");
    assert_failure("program p; begin q(1) end.");
}

#[test]
fn call_arguments_are_checked_in_isolation() {
    assert_success("program p; var b: real; procedure q(x: integer); begin end; begin q(1 + 2, b / 2) end.");
    assert_failure("program p; procedure q(x: integer); begin end; begin q(1 + true) end.");
}

#[test]
fn call_shape_is_not_validated_against_the_declaration() {
    // Arity and parameter kinds are not checked at the call site.
    assert_success("program p; procedure q(x: integer); begin end; begin q(1, 2) end.");
    assert_success("program p; procedure q(x: integer); begin end; begin q(true) end.");
    // Any resolvable identifier can stand in call position.
    assert_success("program p; var a: integer; begin a(2) end.");
    assert_success("program p; var a, b: integer; begin b := a(2) end.");
}

#[test]
fn if_commands() {
    assert_success("program p; var a: integer; begin if a < 1 then a := 2 end.");
    assert_success("program p; var a: integer; begin if a < 1 then a := 2 else a := 3 end.");
    assert_failure("program p; var a: integer; begin if a < 1 a := 2 end.");
    assert_failure("program p; var a: integer; begin if then a := 2 end.");
}

#[test]
fn a_dangling_else_belongs_to_the_nearest_if() {
    assert_success("program p; var a: integer; begin if a < 1 then if a < 2 then a := 3 else a := 4 end.");
}

#[test]
fn while_commands() {
    assert_success("program p; var a: integer; begin while a < 10 do a := a + 1 end.");
    assert_success("program p; var a: integer; begin while a < 10 do begin a := a + 1 end end.");
    assert_failure("program p; var a: integer; begin while a < 10 a := a + 1 end.");
}

#[test]
fn conditions_are_evaluated_but_not_constrained() {
    // The test expression only has to type-check, not to be boolean.
    assert_success("program p; var a: integer; begin if a then a := 1 end.");
    assert_success("program p; var a: integer; begin while a + 1 do a := 2 end.");
    assert_failure("program p; var a: integer; begin if 1 + true then a := 1 end.");
}

#[test]
fn semicolons_separate_commands() {
    assert_success("program p; var a: integer; begin a := 1; a := 2 end.");
    assert_success("program p; begin begin end end.");
    assert_failure("program p; var a: integer; begin a := 1; end.");
    assert_failure("program p; var a: integer; begin a := 1 a := 2 end.");
}

#[test]
fn comments_are_stripped() {
    assert_success("program p; { a comment } var a: integer; begin a := 1 { another } end.");
    assert_success("program p;\nvar a: integer;\n{ spanning\ntwo lines }\nbegin a := 1 end.");
    assert_failure("program p; { never closed\nbegin end.");
    assert_failure("program p; } begin end.");
}

#[test]
fn keywords_are_case_insensitive() {
    assert_success("PROGRAM P; VAR A: INTEGER; BEGIN A := 1 END.");
    assert_success("Program Mixed; Begin End.");
}

#[test]
fn errors_carry_the_source_line() {
    let err = check("program p;\nvar a: integer;\n{ two\nlines }\nbegin\na := true\nend.").unwrap_err();
    assert!(err.to_string().contains("line 6"), "unexpected message: {err}");

    let err = check("program p;\nbegin @ end.").unwrap_err();
    assert!(err.to_string().contains("line 2"), "unexpected message: {err}");
}

#[test]
fn scanning_follows_longest_match() {
    let tokens = tokenize("a<=2").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].text, "<=");
    assert_eq!(tokens[1].class, TokenClass::Comparison);

    let tokens = tokenize("a:=b").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].class, TokenClass::Attribution);

    let tokens = tokenize("2.").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].class, TokenClass::Real);
}

#[test]
fn keywords_match_whole_lexemes_only() {
    let tokens = tokenize("programx program").unwrap();
    assert_eq!(tokens[0].class, TokenClass::Identifier);
    assert_eq!(tokens[1].class, TokenClass::ReservedKeyword);
}

#[test]
fn scanning_tracks_lines_and_rejects_unknown_input() {
    let tokens = tokenize("a\nb").unwrap();
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);

    assert!(tokenize("program @").is_err());
}

#[test]
fn the_token_table_renders_as_documented() {
    let table = render_token_table(&tokenize("program p;").unwrap());
    assert_eq!(table,
               "token,classification,line\nprogram,reserved keyword,1\np,identifier,1\n;,delimiter,1");
}

#[test]
fn the_token_table_round_trips() {
    // The comma delimiter token puts a ',' in the token field itself.
    let source = "program p; procedure q(x, y: integer); begin end; begin q(1, 2) end.";
    let tokens = tokenize(source).unwrap();
    let table = render_token_table(&tokens);

    assert_eq!(read_token_table(&table).unwrap(), tokens);
    assert!(check_table(&table).is_ok());
}

#[test]
fn malformed_token_tables_are_rejected() {
    assert!(check_table("bogus header\nprogram,reserved keyword,1").is_err());
    assert!(check_table("token,classification,line\nprogram,1").is_err());
    assert!(check_table("token,classification,line\nprogram,gizmo,1").is_err());
    assert!(check_table("token,classification,line\nprogram,reserved keyword,abc").is_err());
}

#[test]
fn analysis_from_a_table_matches_analysis_from_source() {
    let valid = "program p; var a: integer; begin a := 1 end.";
    let table = render_token_table(&tokenize(valid).unwrap());
    assert!(check_table(&table).is_ok());

    let invalid = "program p; begin a := 1 end.";
    let table = render_token_table(&tokenize(invalid).unwrap());
    assert!(check_table(&table).is_err());
}
