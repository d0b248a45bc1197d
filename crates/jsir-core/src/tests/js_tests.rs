use crate::js::{JsExpression, JsScope, JsUnaryOperator};
use crate::types::IrType;

#[test]
fn test_path_builds_nested_qualifiers() {
    let path = JsExpression::path(&["Kotlin", "Long", "fromInt"]);
    let expected = JsExpression::member(
        JsExpression::member(JsExpression::name("Kotlin"), "Long"),
        "fromInt",
    );
    assert_eq!(path, expected);
}

#[test]
fn test_void_zero() {
    let absent = JsExpression::void_zero();
    assert!(absent.is_void_zero());
    assert!(!JsExpression::prefix(JsUnaryOperator::Not, JsExpression::IntLiteral(0)).is_void_zero());
}

#[test]
fn test_scope_lookup_reaches_parent() {
    let mut root = JsScope::root("root");
    assert!(root.contains("while"));
    assert!(root.declare("counter"));
    assert!(!root.declare("counter"));

    let mut child = root.child("function f");
    child.declare("x");
    assert!(child.contains("x"));
    assert!(child.contains("counter"));
    assert_eq!(child.parent().map(|p| p.description.as_str()), Some("root"));
}

#[test]
fn test_nullable_type_helpers() {
    let ty = IrType::Char.nullable();
    assert!(ty.is_nullable());
    assert_eq!(ty.non_null(), &IrType::Char);
    assert_eq!(ty.clone().nullable(), ty);
    assert_eq!(ty.to_string(), "Char?");
}
