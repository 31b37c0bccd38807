//! End-to-end tests for the lexer → parser → generator pipeline.

use dvibhasha::ast::{ExprKind, LiteralValue, Statement, StatementKind};
use dvibhasha::lexer::{LexErrorKind, TokenKind, lex, lex_errors};
use dvibhasha::parser::{ParseError, Parser};
use dvibhasha::{CompileError, compile, parse_source};

fn sexprs(ast: &[Statement]) -> Vec<String> {
    ast.iter().map(|stmt| stmt.to_string()).collect()
}

fn compile_ok(source: &str) -> String {
    match compile(source) {
        Ok(js) => js,
        Err(CompileError::Syntax(errors)) => panic!("syntax errors: {errors:?}"),
        Err(err) => panic!("{err}"),
    }
}

const YOGA_ROMANIZED: &str =
    "function yoga(a: number, b: number = 10) -> number { return a + b; }";
const YOGA_NATIVE: &str = "कार्य yoga(a: number, b: number = 10) -> number { लौटाओ a YOGA b; }";

// ==================== Termination and error count ====================

#[test]
fn test_malformed_inputs_terminate_with_one_error_per_failed_statement() {
    let inputs = [
        "",
        "}}}",
        "let let let",
        "function (",
        "@@@ # let x = 1;",
        "yadi { } anyatha",
        "`unterminated ${",
        "\"abc",
        "class { }",
        "f(1, 2",
        "a = = b; c = 1;",
        "try { } x();",
        "match x { 1 2 }",
        "प्रयास { a(); } पकड़ो (",
        "))) let ok = 1; (((",
    ];

    for source in inputs {
        let result = parse_source(source);
        let placeholders = result
            .ast
            .iter()
            .filter(|stmt| matches!(stmt.kind, StatementKind::Error))
            .count();
        assert_eq!(result.errors.len(), placeholders, "for {source:?}");
    }
}

#[test]
fn test_recovery_keeps_later_statements() {
    let result = parse_source("let = 1;\nf(;\nconst c;\nlet ok = 2;\ng();");
    assert_eq!(result.errors.len(), 3);
    let lines: Vec<usize> = result.errors.iter().map(ParseError::line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(&sexprs(&result.ast)[3..], ["(let ok 2)", "(call g)"]);
}

// ==================== Idempotence ====================

#[test]
fn test_parsing_same_tokens_twice_is_identical() {
    let tokens = lex(
        "varga A { karya m(x = 1) { yadi x { lautao `v${x}`; } } }\n\
         let broken = ;\n\
         milan y { 1 -> a(), default -> b() }",
    );
    let first = Parser::new(&tokens).parse();
    let second = Parser::new(&tokens).parse();
    assert_eq!(first.ast, second.ast);
    assert_eq!(first.errors, second.errors);
}

// ==================== Keyword-spelling equivalence ====================

#[test]
fn test_spellings_tokenize_to_same_kinds() {
    let native = lex(YOGA_NATIVE);
    let romanized = lex("karya yoga(a: number, b: number = 10) -> number { lautao a + b; }");

    let kinds = |tokens: &[dvibhasha::lexer::Token]| -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    };
    assert_eq!(kinds(&native), kinds(&romanized));

    let differing: Vec<(&str, &str)> = native
        .iter()
        .zip(&romanized)
        .filter(|(n, r)| n.text != r.text)
        .map(|(n, r)| (n.text.as_str(), r.text.as_str()))
        .collect();
    assert_eq!(
        differing,
        vec![("कार्य", "karya"), ("लौटाओ", "lautao"), ("YOGA", "+")]
    );
}

#[test]
fn test_spellings_compile_to_identical_output() {
    let native = "यदि सत्य { प्रयास { स्थिर क = शून्य; } पकड़ो (ग) { लौटाओ असत्य; } } अन्यथा { चर x; }";
    let romanized = "yadi satya { prayas { sthir क = shunya; } pakdo (ग) { lautao asatya; } } anyatha { char x; }";
    let english = "if true { try { const क = null; } catch (ग) { return false; } } else { let x; }";

    let expected = compile_ok(english);
    assert_eq!(compile_ok(native), expected);
    assert_eq!(compile_ok(romanized), expected);
}

#[test]
fn test_mnemonics_compile_like_symbols() {
    assert_eq!(
        compile_ok("x = a YOGA b GUNA c VIYOGA d BHAGA e SHESHA f;"),
        compile_ok("x = a + b * c - d / e % f;")
    );
    assert_eq!(
        compile_ok("y = a SAMA b VA a ASAMA c CHA NA (a LAGHU b);"),
        compile_ok("y = a == b || a != c && !(a < b);")
    );
}

// ==================== Default parameters ====================

#[test]
fn test_default_parameters_survive_verbatim() {
    let js = compile_ok("function f(a = 10, b = 20) { return a + b; }");
    assert!(js.contains("function f(a = 10, b = 20) {"), "{js}");
}

// ==================== Pattern matching ====================

#[test]
fn test_match_lowering() {
    let js = compile_ok(r#"let r = match x { 1 -> "one", 2 -> "two", default -> "other" };"#);
    assert_eq!(
        js,
        "let r = (() => {\n\
         \x20   const $match_0 = x;\n\
         \x20   if ($match_0 === 1) {\n\
         \x20       return \"one\";\n\
         \x20   } else if ($match_0 === 2) {\n\
         \x20       return \"two\";\n\
         \x20   } else {\n\
         \x20       return \"other\";\n\
         \x20   }\n\
         })();\n"
    );
}

#[test]
fn test_match_case_order_only_reorders_tests() {
    let forward = compile_ok(r#"let r = match x { 1 -> "one", 2 -> "two", default -> "other" };"#);
    let reversed = compile_ok(r#"let r = match x { default -> "other", 2 -> "two", 1 -> "one" };"#);

    let tests = |js: &str| -> Vec<String> {
        let mut lines: Vec<String> = js
            .lines()
            .filter(|line| line.contains("==="))
            .map(|line| line.trim().trim_start_matches("} else ").to_string())
            .collect();
        lines.sort();
        lines
    };
    assert_eq!(tests(&forward), tests(&reversed));

    // The fallback is the last arm in both.
    for js in [&forward, &reversed] {
        let fallback = js.find("return \"other\";").unwrap_or(0);
        let last_test = js.rfind("===").unwrap_or(usize::MAX);
        assert!(last_test < fallback, "{js}");
        assert!(js.contains("    } else {\n        return \"other\";\n    }\n"), "{js}");
    }
}

#[test]
fn test_match_without_default_throws_at_runtime() {
    let js = compile_ok("milan status { 200 -> ok(); 404 -> missing(); }");
    assert!(js.contains("    } else {\n        throw new Error("), "{js}");
}

#[test]
fn test_matched_block_arm_is_the_only_arm_run() {
    let js = compile_ok(r#"milan x { 1 -> { log("one"); } default -> { log("other"); } }"#);
    assert_eq!(
        js,
        "(() => {\n\
         \x20   const $match_0 = x;\n\
         \x20   if ($match_0 === 1) {\n\
         \x20       log(\"one\");\n\
         \x20   } else {\n\
         \x20       log(\"other\");\n\
         \x20   }\n\
         })();\n"
    );
}

#[test]
fn test_match_with_await_in_async_function() {
    let js = compile_ok("async function g(x) { return match x { 1 -> await f(), default -> 0 }; }");
    assert!(
        js.starts_with("async function g(x) {\n    return await (async () => {\n"),
        "{js}"
    );
    assert!(js.contains("            return await f();\n"), "{js}");
    assert!(js.ends_with("    })();\n}\n"), "{js}");
}

#[test]
fn test_reserved_names_compile_to_valid_bindings() {
    let js = compile_ok("let new = 1;\nlet r = match new { 1 -> typeof(new), default -> 0 };");
    assert!(js.starts_with("let $new = 1;\n"), "{js}");
    assert!(js.contains("const $match_0 = $new;"), "{js}");
    assert!(js.contains("return $typeof($new);"), "{js}");
}

// ==================== Nesting limit ====================

#[test]
fn test_deep_nesting_is_a_diagnostic() {
    let depth = 50_000;
    let source = format!("x = {}1{};\nlet ok = 1;", "(".repeat(depth), ")".repeat(depth));
    let result = parse_source(&source);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], ParseError::NestingTooDeep { .. }));
    assert_eq!(sexprs(&result.ast)[1], "(let ok 1)");
    assert!(matches!(compile(&source), Err(CompileError::Syntax(e)) if e.len() == 1));

    let blocks = format!("karya f() {}{}", "{".repeat(depth), "}".repeat(depth));
    let result = parse_source(&blocks);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], ParseError::NestingTooDeep { .. }));
}

#[test]
fn test_nesting_inside_templates_counts() {
    let depth = 1_000;
    let source = format!("x = `${{{}1{}}}`;", "(".repeat(depth), ")".repeat(depth));
    let result = parse_source(&source);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].to_string().contains("nesting deeper than"));
}

// ==================== Round trip ====================

#[test]
fn test_generated_code_reparses_to_same_tree() {
    let source = r#"
karya yoga(a, b = 10) { lautao a YOGA b; }
varga Counter {
    constructor(start) { this.n = start; }
    async tick(step = 1) { this.n += step; await save(this.n); }
}
char total = yoga(1, 2) GUNA (3 VIYOGA 4);
sthir greeting = `Hello, ${user.name}! You have ${total + 1} items`;
yadi total ADHIKA 10 CHA NA done { log("big"); } anyatha yadi total SAMA 0 { log('zero'); } anyatha { log(-total, ~mask, !ok); }
prayas { risky(); } pakdo (e) { report(e.message); } antatah { cleanup(); }
prayas { risky(); } pakdo { }
let flag = a || b && c | d ^ e & f;
let z;
{ z = 3.5; z %= 2; z = - -z; }
async function main() { return await fetch("url\twith \"quotes\"").json(); }
"#;

    let original = parse_source(source);
    assert!(original.is_ok(), "{:?}", original.errors);

    let js = compile_ok(source);
    let reparsed = parse_source(&js);
    assert!(reparsed.is_ok(), "{:?}\n{js}", reparsed.errors);

    assert_eq!(sexprs(&reparsed.ast), sexprs(&original.ast), "{js}");
}

// ==================== Fault tolerance ====================

#[test]
fn test_unterminated_string_is_one_lexical_error() {
    let source = "let s = \"oops\nlet t = 1;\nlet u = t + 1;";

    let errors = lex_errors(&lex(source));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
    assert_eq!(errors[0].line, 1);

    let result = parse_source(source);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], ParseError::Lexical(_)));
    assert_eq!(result.errors[0].line(), 1);
    assert_eq!(&sexprs(&result.ast)[1..], ["(let t 1)", "(let u (+ t 1))"]);

    assert!(matches!(compile(source), Err(CompileError::Syntax(e)) if e.len() == 1));
}

// ==================== Worked example ====================

#[test]
fn test_yoga_example_in_both_spellings() {
    for source in [YOGA_ROMANIZED, YOGA_NATIVE] {
        let result = parse_source(source);
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(result.ast.len(), 1);

        let StatementKind::FunctionDecl(decl) = &result.ast[0].kind else {
            panic!("expected a function, got {:?}", result.ast[0].kind);
        };
        assert_eq!(decl.params.len(), 2);
        assert!(decl.params[0].default.is_none());
        assert!(matches!(
            decl.params[1].default.as_ref().map(|e| &e.kind),
            Some(ExprKind::Literal(LiteralValue::Number(n))) if *n == 10.0
        ));
        assert_eq!(decl.body.len(), 1);
        assert_eq!(decl.body[0].to_string(), "(return (+ a b))");

        let js = compile_ok(source);
        assert!(js.contains("function yoga(a, b = 10)"), "{js}");
        assert!(js.contains("a + b"), "{js}");
    }
}
