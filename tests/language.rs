use std::fs;

use pretty_assertions::assert_eq;
use shellexpr::{
    error::{Error, ErrorKind, RuntimeError, ScanError},
    interpreter::{
        core::Interpreter,
        environment::{Callable, Entry, EvalResult, Member},
        evaluator::core::Outcome,
        history::Status,
        host::{MemorySink, Sink},
        token::Token,
        value::core::Value,
    },
};
use walkdir::WalkDir;

fn interpreter() -> (Interpreter, MemorySink) {
    let sink = MemorySink::default();
    (Interpreter::with_sink(Box::new(sink.clone())), sink)
}

/// Runs every non-empty line in one interpreter and returns what was
/// written.
fn run_lines(src: &str) -> Result<Vec<String>, Error> {
    let (mut interpreter, sink) = interpreter();
    for line in src.lines().filter(|line| !line.trim().is_empty()) {
        interpreter.run(line)?;
    }
    Ok(sink.lines())
}

fn assert_output(src: &str, expected: &[&str]) {
    match run_lines(src) {
        Ok(lines) => assert_eq!(lines, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match run_lines(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
    }
}

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run_lines(&code) {
                panic!("Example {} in {:?} failed:\n{}\nError: {:?}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```shellexpr") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn test_script_file() {
    let script = fs::read_to_string("tests/example.shx").expect("missing file");
    assert_output(&script,
                  &["Hello world!", "42", "hi", "hi", "[1, 2, 3]", "{name: \"shell\", depth: 2}"]);
}

#[test]
fn console_log_writes_its_first_argument() {
    assert_output(r#"console.log("hi");"#, &["hi"]);
    assert_output(r#"console.log("Hello world!"); "#, &["Hello world!"]);
    assert_output(r#"console.log("a", "b");"#, &["a"]);
    assert_output("console.log(7);", &["7"]);
    assert_output("console.log(2.5);", &["2.5"]);
    assert_output("console.log(true);", &["true"]);
}

#[test]
fn invocation_returns_undefined() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run(r#"console.log("hi");"#),
               Ok(Outcome::Invoked(Value::Undefined)));
}

#[test]
fn whitespace_around_member_access() {
    assert_output(r#"console . log("hi");"#, &["hi"]);
    assert_output("   console.log('hi')", &["hi"]);
}

#[test]
fn unbound_name_completes_unchanged() {
    let (mut interpreter, sink) = interpreter();
    assert_eq!(interpreter.run("x;"), Ok(Outcome::Completed(vec![Token::name("x")])));
    assert!(sink.lines().is_empty());
}

#[test]
fn empty_input_completes_with_no_tokens() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run(""), Ok(Outcome::Completed(vec![])));
    assert_eq!(interpreter.run(";"), Ok(Outcome::Completed(vec![])));
}

#[test]
fn nested_object_materializes() {
    let (mut interpreter, _) = interpreter();
    let inner = Value::Object(vec![("b".to_string(), Value::Integer(1))]);
    let expected = Value::Object(vec![("a".to_string(), inner)]);

    assert_eq!(interpreter.run("{a:{b:1}}"),
               Ok(Outcome::Completed(vec![Token::Literal(expected)])));
}

#[test]
fn quoted_text_keeps_delimiters_and_escapes() {
    assert_output(r#"console.log(")");"#, &[")"]);
    assert_output(r#"console.log("it's");"#, &["it's"]);
    assert_output(r#"console.log("a\"b");"#, &["a\"b"]);
    assert_output(r#"console.log('{[(');"#, &["{[("]);
}

#[test]
fn composite_arguments_use_display() {
    assert_output("console.log([1, [2, 3]]);", &["[1, [2, 3]]"]);
    assert_output(r#"console.log({a: "x", b: null});"#, &[r#"{a: "x", b: null}"#]);
    assert_output("console.log((1, 2));", &["(1, 2)"]);
}

#[test]
fn assignment_binds_literals() {
    let (mut interpreter, sink) = interpreter();

    assert_eq!(interpreter.run(r#"greeting = "hi";"#),
               Ok(Outcome::Assigned { name: "greeting".to_string() }));
    assert!(interpreter.environment().contains("greeting"));

    interpreter.run("console.log(greeting);").unwrap();
    assert_eq!(sink.lines(), vec!["hi".to_string()]);
}

#[test]
fn assignment_binds_numbers() {
    assert_output("n = 42;\nconsole.log(n);", &["42"]);
    assert_output("r = 1.5;\nconsole.log(r);", &["1.5"]);
}

#[test]
fn assignment_shares_referenced_entries() {
    let (mut interpreter, sink) = interpreter();

    interpreter.run("out = console;").unwrap();
    interpreter.run(r#"out.log("shared");"#).unwrap();

    let console = interpreter.environment().resolve("console").unwrap();
    let out = interpreter.environment().resolve("out").unwrap();
    assert!(std::rc::Rc::ptr_eq(&console, &out));
    assert_eq!(sink.lines(), vec!["shared".to_string()]);
}

#[test]
fn member_targets_are_not_assigned() {
    let (mut interpreter, _) = interpreter();
    let a = Entry::default().with_member("b", Entry::with_source(Value::Integer(1)));
    interpreter.environment_mut().assign("a", a);

    let outcome = interpreter.run("a.b = 5;").unwrap();

    assert!(matches!(outcome, Outcome::Completed(_)), "unexpected outcome: {outcome:?}");
    assert_eq!(interpreter.environment().names(), vec!["a", "console"]);

    let b = match interpreter.environment().resolve("a").unwrap().member("b") {
        Some(Member::Entry(entry)) => entry.source.clone(),
        other => panic!("unexpected member: {other:?}"),
    };
    assert_eq!(b, Some(Value::Integer(1)));
}

#[test]
fn callable_member_is_not_an_assignment_target() {
    let (mut interpreter, _) = interpreter();

    assert!(matches!(interpreter.run("console.log = 1;"), Ok(Outcome::Completed(_))));
    assert_eq!(interpreter.environment().names(), vec!["console"]);
}

#[test]
fn member_reference_can_be_assigned_to_a_name() {
    let (mut interpreter, sink) = interpreter();
    let inner = Entry::with_source(Value::from("deep"));
    interpreter.environment_mut().assign("outer", Entry::default().with_member("inner", inner));

    assert_eq!(interpreter.run("alias = outer.inner;"),
               Ok(Outcome::Assigned { name: "alias".to_string() }));
    interpreter.run("console.log(alias);").unwrap();
    assert_eq!(sink.lines(), vec!["deep".to_string()]);
}

#[test]
fn object_keys_are_members() {
    let (mut interpreter, _) = interpreter();

    assert_eq!(interpreter.run("{a: 1, b: 2}.b;"),
               Ok(Outcome::Completed(vec![Token::Literal(Value::Integer(2))])));

    interpreter.run("config = {depth: 2, name: 'shell'};").unwrap();
    assert_eq!(interpreter.run("config.name;"),
               Ok(Outcome::Completed(vec![Token::Literal(Value::from("shell"))])));
    assert_failure("config = {depth: 2};\nconfig.width;", ErrorKind::MemberNotFound);
}

#[test]
fn callables_compare_by_name_and_procedure() {
    fn quiet(_: &[Value], _: &mut dyn Sink, _: usize) -> EvalResult<Value> {
        Ok(Value::Undefined)
    }

    let (mut interpreter, _) = interpreter();
    let other = Entry::default().with_callable(Callable { name: "log",
                                                          func: quiet, });
    interpreter.environment_mut().assign("other", other);

    let console = interpreter.environment().resolve("console").unwrap();
    let other = interpreter.environment().resolve("other").unwrap();
    assert_ne!(console.member("log"), other.member("log"));
    assert_eq!(console.member("log"), console.member("log"));
}

#[test]
fn reassignment_replaces_binding() {
    assert_output("v = 1;\nv = 2;\nconsole.log(v);", &["2"]);
}

#[test]
fn unbound_identifiers_in_literals_are_undefined() {
    assert_output("console.log(missing);", &["undefined"]);
}

#[test]
fn host_bindings_are_reachable() {
    fn twice(args: &[Value], sink: &mut dyn Sink, _position: usize) -> EvalResult<Value> {
        let text = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        sink.write(&text);
        sink.write(&text);
        Ok(Value::Integer(2))
    }

    let (mut interpreter, sink) = interpreter();
    let echo = Entry::default().with_callable(Callable { name: "twice",
                                                         func: twice, });
    let host = Entry::default().with_member("echo", echo);
    interpreter.environment_mut().assign("host", host);
    interpreter.environment_mut().assign("answer", Entry::with_source(Value::Integer(42)));

    assert_eq!(interpreter.run("host.echo.twice(answer, 1);"),
               Ok(Outcome::Invoked(Value::Integer(2))));
    assert_eq!(sink.lines(), vec!["42 1".to_string(), "42 1".to_string()]);
}

#[test]
fn invocation_stops_the_scan() {
    assert_output(r#"console.log("a"); console.log("b");"#, &["a"]);
    assert_output(r#"console.log("a") console.log("b")"#, &["a"]);

    let (mut interpreter, _) = interpreter();
    assert!(interpreter.run(r#"console.log("hi") (]"#).is_ok());
}

#[test]
fn text_after_end_is_ignored() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run("x; (]"), Ok(Outcome::Completed(vec![Token::name("x")])));
}

#[test]
fn mismatched_delimiter_is_an_error() {
    let (mut interpreter, _) = interpreter();
    let error = interpreter.run("(]").unwrap_err();

    assert_eq!(error,
               Error::Scan(ScanError::UnexpectedToken { token:    ']',
                                                        position: 1, }));
    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(error.position(), 1);
    assert_eq!(error.to_string(), "Error at position 1: Unexpected token: ].");
}

#[test]
fn stray_closing_delimiter_is_an_error() {
    assert_failure("a)", ErrorKind::UnexpectedToken);
    assert_failure("}", ErrorKind::UnexpectedToken);
}

#[test]
fn unclosed_delimiter_is_an_error() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run(r#"console.log("hi""#),
               Err(Error::Scan(ScanError::UnclosedDelimiter { delimiter: '(',
                                                              position:  11, })));
    assert_failure(r#"console.log("hi"#, ErrorKind::UnclosedDelimiter);
}

#[test]
fn missing_member_is_an_error() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run(r#"console.warn("x");"#),
               Err(Error::Runtime(RuntimeError::MemberNotFound { member:   "warn".to_string(),
                                                                 position: 8, })));
}

#[test]
fn member_of_unbound_name_is_an_error() {
    let (mut interpreter, _) = interpreter();
    assert_eq!(interpreter.run("foo.bar;"),
               Err(Error::Runtime(RuntimeError::UnknownReference { name:     "foo".to_string(),
                                                                   position: 0, })));
}

#[test]
fn member_of_literal_is_an_error() {
    assert_failure("(1).x;", ErrorKind::MemberNotFound);
}

#[test]
fn operator_without_left_operand_is_an_error() {
    assert_failure("=x;", ErrorKind::UnexpectedToken);
    assert_failure("!x;", ErrorKind::UnexpectedToken);
}

#[test]
fn log_requires_an_argument() {
    assert_failure("console.log();", ErrorKind::ArgumentCountMismatch);
}

#[test]
fn malformed_literals_are_errors() {
    assert_failure("console.log(1 2);", ErrorKind::MalformedLiteral);
    assert_failure("console.log({a 1});", ErrorKind::MalformedLiteral);
    assert_failure("console.log(#);", ErrorKind::MalformedLiteral);
}

#[test]
fn history_records_every_run() {
    let (mut interpreter, _) = interpreter();

    interpreter.run("x = 1;").unwrap();
    interpreter.run("console.log(x);").unwrap();
    interpreter.run("(]").unwrap_err();
    interpreter.run("y;").unwrap();

    let history = interpreter.history();
    assert_eq!(history.len(), 4);

    let sequences = history.records().iter().map(|r| r.sequence).collect::<Vec<_>>();
    assert_eq!(sequences, vec![1, 2, 3, 4]);

    let statuses = history.records().iter().map(|r| r.status.clone()).collect::<Vec<_>>();
    assert_eq!(statuses,
               vec![Status::Assigned("x".to_string()),
                    Status::Invoked(Value::Undefined),
                    Status::Failed(Error::Scan(ScanError::UnexpectedToken { token:    ']',
                                                                            position: 1, })),
                    Status::Completed]);
    assert_eq!(history.last().map(|r| r.input.as_str()), Some("y;"));
}

#[test]
fn errors_do_not_undo_earlier_bindings() {
    let (mut interpreter, _) = interpreter();

    interpreter.run("kept = 3;").unwrap();
    interpreter.run("nope.x;").unwrap_err();

    assert!(interpreter.environment().contains("kept"));
    assert_eq!(interpreter.environment().names(), vec!["console", "kept"]);
}
