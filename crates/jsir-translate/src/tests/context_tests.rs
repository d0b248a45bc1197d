use crate::{TranslateError, TranslationConfig, TranslationContext, TypedExpression};
use jsir_core::{
    IrModule, IrType, JsExpression, JsProgramFragment, JsStatement, ModuleBuilder, Visibility,
};
use pretty_assertions::assert_eq;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn empty_module() -> IrModule {
    ModuleBuilder::new("main").build()
}

#[test]
fn test_with_statements_swaps_and_restores_sink() {
    let module = empty_module();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    context.add_statement(JsStatement::Break(None));
    let (value, inner) = context.with_statements(vec![JsStatement::Empty], |context| {
        assert_eq!(context.statements(), &[JsStatement::Empty]);
        context.add_statement(JsStatement::Continue(None));
        42
    });

    assert_eq!(value, 42);
    assert_eq!(inner, vec![JsStatement::Empty, JsStatement::Continue(None)]);
    assert_eq!(context.statements(), &[JsStatement::Break(None)]);
}

#[test]
fn test_nested_sinks_do_not_leak_into_each_other() {
    let module = empty_module();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    let ((), outer) = context.with_statements(Vec::new(), |context| {
        context.add_statement(JsStatement::Break(None));
        let ((), inner) = context.with_statements(Vec::new(), |context| {
            context.add_statement(JsStatement::Continue(None));
        });
        assert_eq!(inner, vec![JsStatement::Continue(None)]);
        context.add_statement(JsStatement::Empty);
    });

    assert_eq!(outer, vec![JsStatement::Break(None), JsStatement::Empty]);
    assert!(context.statements().is_empty());
}

#[test]
fn test_sink_is_restored_after_panic() {
    let module = empty_module();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);
    context.add_statement(JsStatement::Break(None));

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        context.with_statements(Vec::new(), |context| {
            context.add_statement(JsStatement::Empty);
            panic!("lowering failed");
        })
    }));

    assert!(outcome.is_err());
    assert_eq!(context.statements(), &[JsStatement::Break(None)]);
}

#[test]
fn test_finish_moves_top_level_sink_into_initializer() {
    let module = empty_module();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    {
        let mut context = TranslationContext::new(&config, &mut fragment);
        context.add_statement(JsStatement::Empty);
        context.declaration_statements().push(JsStatement::Break(None));
        context.finish();
    }

    assert_eq!(fragment.initializer_block.statements, vec![JsStatement::Empty]);
    assert_eq!(fragment.declaration_block.statements, vec![JsStatement::Break(None)]);
}

#[test]
fn test_nested_declaration_restores_previous() {
    let mut builder = ModuleBuilder::new("main");
    let outer = builder.function("outer").build();
    let inner = builder.function("inner").member_of(outer).build();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    assert_eq!(context.current_declaration(), None);
    context.nested_declaration(outer, |context| {
        assert_eq!(context.current_declaration(), Some(outer));
        context.nested_declaration(inner, |context| {
            assert_eq!(context.current_declaration(), Some(inner));
            assert_eq!(context.describe_location(), "outer.inner");
        });
        assert_eq!(context.current_declaration(), Some(outer));
    });
    assert_eq!(context.current_declaration(), None);
    assert_eq!(context.describe_location(), "<top level>");

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        context.nested_declaration(outer, |_| panic!("lowering failed"))
    }));
    assert!(outcome.is_err());
    assert_eq!(context.current_declaration(), None);
}

#[test]
fn test_aliases_shadow_and_restore() {
    let mut builder = ModuleBuilder::new("main");
    let function = builder.function("f").param("x", IrType::Int).build();
    let x = builder.param(function, 0).unwrap();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    assert_eq!(context.translate_as_value_reference(x).unwrap(), JsExpression::name("x"));

    context.with_aliases([(x, JsExpression::name("a"))], |context| {
        assert_eq!(context.translate_as_value_reference(x).unwrap(), JsExpression::name("a"));
        context.with_aliases([(x, JsExpression::name("b"))], |context| {
            assert_eq!(context.translate_as_value_reference(x).unwrap(), JsExpression::name("b"));
        });
        assert_eq!(context.translate_as_value_reference(x).unwrap(), JsExpression::name("a"));
    });

    assert!(context.alias(x).is_none());
    assert!(context.aliases().is_empty());
    assert_eq!(context.translate_as_value_reference(x).unwrap(), JsExpression::name("x"));
}

#[test]
fn test_repeated_alias_in_one_binding_is_fully_undone() {
    let mut builder = ModuleBuilder::new("main");
    let function = builder.function("f").param("x", IrType::Int).build();
    let x = builder.param(function, 0).unwrap();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    context.with_aliases([(x, JsExpression::name("outer"))], |context| {
        context.with_aliases(
            [(x, JsExpression::name("a")), (x, JsExpression::name("b"))],
            |context| {
                assert_eq!(context.alias(x), Some(&JsExpression::name("b")));
            },
        );
        assert_eq!(context.alias(x), Some(&JsExpression::name("outer")));
    });
    assert!(context.alias(x).is_none());

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        context.with_aliases([(x, JsExpression::name("a"))], |_| panic!("lowering failed"))
    }));
    assert!(outcome.is_err());
    assert!(context.alias(x).is_none());
}

#[test]
fn test_public_inline_function_detection() {
    let mut builder = ModuleBuilder::new("main");
    let public_inline = builder.function("run").inline().build();
    let local = builder.local_variable("tmp", IrType::Int, public_inline);
    let private_inline = builder
        .function("hidden")
        .inline()
        .visibility(Visibility::Private)
        .build();
    let plain = builder.function("plain").build();
    let plain_in_inline = builder.function("step").member_of(public_inline).build();
    let private_class = builder.class("Box").visibility(Visibility::Private).build();
    let inline_member = builder.function("get").inline().member_of(private_class).build();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    assert!(!context.is_public_inline_function());
    let cases = [
        (public_inline, true),
        (local, true),
        (private_inline, false),
        (plain, false),
        (plain_in_inline, false),
        (inline_member, false),
    ];
    for (declaration, expected) in cases {
        let actual = context.nested_declaration(declaration, |context| {
            context.is_public_inline_function()
        });
        assert_eq!(actual, expected, "{}", declaration);
    }
}

#[test]
fn test_coerce_reports_location() {
    let mut builder = ModuleBuilder::new("main");
    let function = builder.function("main").build();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    let value = TypedExpression::new(JsExpression::IntLiteral(1), IrType::Int);
    let widened = context.coerce(value.clone(), &IrType::Long).unwrap();
    assert_eq!(
        widened.expression,
        JsExpression::invoke(
            JsExpression::path(&["Kotlin", "Long", "fromInt"]),
            vec![JsExpression::IntLiteral(1)]
        )
    );
    assert_eq!(widened.ty, IrType::Long);

    let error = context
        .nested_declaration(function, |context| context.coerce(value, &IrType::String))
        .unwrap_err();
    assert!(matches!(
        &error,
        TranslateError::NoConversion { declaration, .. } if declaration == "main"
    ));
    assert_eq!(error.to_string(), "No conversion from Int to String in main");
}

#[test]
fn test_inner_reference_is_fully_qualified() {
    let mut builder = ModuleBuilder::new("main");
    let counter = builder.class("Counter").build();
    let increment = builder.function("increment").member_of(counter).build();
    let stdlib = builder.import("kotlin-stdlib");
    let println = builder.function("println").in_module(stdlib).build();
    let module = builder.build();
    let config = TranslationConfig::new(&module);
    let mut fragment = JsProgramFragment::new();
    let mut context = TranslationContext::new(&config, &mut fragment);

    assert_eq!(
        context.get_inner_reference(increment).unwrap(),
        JsExpression::path(&["Counter", "increment"])
    );
    assert_eq!(
        context.translate_as_value_reference(increment).unwrap(),
        JsExpression::member(JsExpression::This, "increment")
    );
    assert_eq!(
        context.get_inner_reference(println).unwrap(),
        JsExpression::path(&["$module$kotlin_stdlib", "println"])
    );
    assert_eq!(context.name_of(counter).unwrap(), "Counter");
}
