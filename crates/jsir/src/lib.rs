/*! Unified interface for lowering typed IR to JavaScript.
 *
 * One import covers the IR model, the translator and the printer. [`compile_module`] runs the
 * whole pipeline on an in-memory module; [`compile_json`] does the same for a module serialized
 * by an upstream phase.
 */

pub use jsir_core as core;
pub use jsir_emit as emit;
pub use jsir_translate as translate;

pub use jsir_core::{
    DeclId, DeclarationTable, IrModule, IrNode, IrType, JsExpression, JsProgramFragment,
    JsStatement, ModuleBuilder,
};

pub use jsir_emit::{EmitterConfig, JsPrinter, OutputStyle};

pub use jsir_translate::{
    translate_fragment, translate_module, ExpressionTranslator, IntrinsicTable, TranslateError,
    TranslationConfig, TranslationContext, TypedExpression,
};

use anyhow::{Context, Result};

/// Translates `module` with the given intrinsics and prints the resulting fragment.
pub fn compile_module(
    module: &IrModule,
    intrinsics: IntrinsicTable,
    emitter: EmitterConfig,
) -> std::result::Result<String, TranslateError> {
    let config = TranslationConfig::new(module).with_intrinsics(intrinsics);
    let fragment = translate_module(&config)?;
    Ok(JsPrinter::new(emitter).print_fragment(&fragment))
}

/// Loads a module from its JSON form and compiles it to pretty-printed JavaScript.
pub fn compile_json(source: &str) -> Result<String> {
    let module = IrModule::from_json(source).context("Failed to load IR module")?;
    compile_module(&module, IntrinsicTable::new(), EmitterConfig::default())
        .with_context(|| format!("Failed to translate module '{}'", module.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsir_core::IrCall;
    use pretty_assertions::assert_eq;

    fn hello_module() -> IrModule {
        let mut builder = ModuleBuilder::new("hello");
        let greet = builder
            .function("greet")
            .param("name", IrType::String)
            .returns(IrType::String)
            .build();
        let name = builder.param(greet, 0).unwrap();
        builder
            .body(greet, IrNode::get_value(name, IrType::String))
            .initializer(
                IrCall::new(greet, IrType::String)
                    .with_argument(IrNode::string("world"))
                    .into(),
            );
        builder.build()
    }

    #[test]
    fn test_compile_module() {
        let output =
            compile_module(&hello_module(), IntrinsicTable::new(), EmitterConfig::compact())
                .unwrap();
        assert_eq!(output, r#"function greet(name) { return name; } greet("world");"#);
    }

    #[test]
    fn test_compile_json() {
        let source = serde_json::to_string(&hello_module()).unwrap();
        let output = compile_json(&source).unwrap();
        let expected = "\
function greet(name) {
    return name;
}
greet(\"world\");
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_compile_json_reports_malformed_input() {
        let error = compile_json("{\"id\": 0").unwrap_err();
        assert_eq!(error.to_string(), "Failed to load IR module");
    }

    #[test]
    fn test_compile_json_reports_translation_failure() {
        let mut builder = ModuleBuilder::new("broken");
        builder.initializer(IrNode::block(Vec::new(), IrType::Unit));
        let source = serde_json::to_string(&builder.build()).unwrap();

        let error = compile_json(&source).unwrap_err();
        assert_eq!(error.to_string(), "Failed to translate module 'broken'");
        assert!(matches!(
            error.downcast_ref::<TranslateError>(),
            Some(TranslateError::EmptyBlock { .. })
        ));
    }
}
