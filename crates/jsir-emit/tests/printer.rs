use jsir_core::js::{
    JsBinaryOperator, JsBlock, JsExpression, JsFunction, JsProgramFragment, JsStatement,
    JsUnaryOperator,
};
use jsir_emit::{Emitter, EmitterConfig, JsPrinter};
use pretty_assertions::assert_eq;

fn call(name: &str, arguments: Vec<JsExpression>) -> JsExpression {
    JsExpression::invoke(JsExpression::name(name), arguments)
}

fn guarded_loop() -> JsStatement {
    JsStatement::while_loop(
        JsExpression::BooleanLiteral(true),
        JsStatement::block(vec![
            JsStatement::block(vec![JsStatement::var("tmp", Some(call("next", vec![])))]),
            JsStatement::if_then(
                JsExpression::not(JsExpression::name("tmp")),
                JsStatement::Break(None),
            ),
            JsStatement::Expression(call("work", vec![])),
        ]),
    )
}

#[test]
fn test_compact_guarded_loop() {
    let output = JsPrinter::compact().print_statement(&guarded_loop());
    insta::assert_snapshot!(output, @"while (true) { { var tmp = next(); } if (!tmp) break; work(); }");
}

#[test]
fn test_pretty_guarded_loop() {
    let output = JsPrinter::pretty().print_statements(&[guarded_loop()]);
    let expected = "\
while (true) {
    {
        var tmp = next();
    }
    if (!tmp) break;
    work();
}
";
    assert_eq!(output, expected);
}

#[test]
fn test_empty_loop_body() {
    let statement = JsStatement::while_loop(call("poll", vec![]), JsStatement::Empty);
    let output = JsPrinter::compact().print_statement(&statement);
    assert_eq!(output, "while (poll());");
}

#[test]
fn test_member_call_with_absent_argument() {
    let expression = JsExpression::invoke(
        JsExpression::member(JsExpression::name("recv"), "f"),
        vec![JsExpression::name("x"), JsExpression::void_zero()],
    );
    let output = JsPrinter::compact().print_expression(&expression);
    insta::assert_snapshot!(output, @"recv.f(x, void 0)");
}

#[test]
fn test_string_literal_is_escaped() {
    let expression = JsExpression::string("say \"hi\"\n");
    let output = JsPrinter::compact().print_expression(&expression);
    assert_eq!(output, r#""say \"hi\"\n""#);
}

#[test]
fn test_operands_are_parenthesized() {
    let sum = JsExpression::binary(
        JsBinaryOperator::Add,
        JsExpression::name("a"),
        JsExpression::IntLiteral(1),
    );
    let negated = JsExpression::not(sum.clone());
    let member = JsExpression::member(sum, "length");
    let printer = JsPrinter::compact();
    assert_eq!(printer.print_expression(&negated), "!(a + 1)");
    assert_eq!(printer.print_expression(&member), "(a + 1).length");
}

#[test]
fn test_fragment_prints_declarations_first() {
    let mut fragment = JsProgramFragment::new();
    fragment
        .initializer_block
        .statements
        .push(JsStatement::Expression(call("main", vec![])));
    fragment
        .declaration_block
        .statements
        .push(JsStatement::Function(JsFunction {
            name: Some("main".to_string()),
            params: vec!["args".to_string()],
            body: JsBlock {
                statements: vec![JsStatement::Return(Some(JsExpression::name("args")))],
            },
        }));

    let output = JsPrinter::pretty().emit_to_string(&fragment).unwrap();
    let expected = "\
function main(args) {
    return args;
}
main();
";
    assert_eq!(output, expected);
}

#[test]
fn test_nested_negation_does_not_fuse_into_decrement() {
    let printer = JsPrinter::compact();
    let negate = |operand| JsExpression::prefix(JsUnaryOperator::Neg, operand);

    assert_eq!(
        printer.print_expression(&negate(negate(JsExpression::name("x")))),
        "-(-x)"
    );
    assert_eq!(printer.print_expression(&negate(JsExpression::IntLiteral(-5))), "-(-5)");
    assert_eq!(
        printer.print_expression(&negate(JsExpression::NumberLiteral(-2.5))),
        "-(-2.5)"
    );
    assert_eq!(printer.print_expression(&negate(JsExpression::IntLiteral(5))), "-5");
    assert_eq!(
        printer.print_expression(&JsExpression::not(JsExpression::not(JsExpression::name("x")))),
        "!(!x)"
    );
    assert_eq!(
        printer.print_expression(&JsExpression::prefix(
            JsUnaryOperator::Void,
            JsExpression::IntLiteral(-1)
        )),
        "void -1"
    );
}

#[test]
fn test_empty_fragment_prints_nothing() {
    let output = JsPrinter::pretty().print_fragment(&JsProgramFragment::new());
    assert_eq!(output, "");
}

#[test]
fn test_colored_keywords() {
    colored::control::set_override(true);
    let statement = JsStatement::while_loop(call("poll", vec![]), JsStatement::Break(None));
    let printer = JsPrinter::new(EmitterConfig::compact().with_colors(true));
    let output = printer.print_statement(&statement);
    colored::control::unset_override();

    assert!(output.contains("\u{1b}["));
    assert!(output.contains("poll()"));
    assert_ne!(output, "while (poll()) break;");
    assert_eq!(
        JsPrinter::compact().print_statement(&statement),
        "while (poll()) break;"
    );
}
