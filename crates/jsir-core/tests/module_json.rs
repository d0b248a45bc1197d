use jsir_core::{DeclId, IrError, IrModule, IrNode, IrType, ModuleBuilder};
use pretty_assertions::assert_eq;

#[test]
fn test_module_loads_from_json() {
    let mut builder = ModuleBuilder::new("app");
    let f = builder.function("answer").returns(IrType::Int).build();
    builder.body(f, IrNode::int(42));
    let module = builder.build();

    let json = serde_json::to_string(&module).unwrap();
    let loaded = IrModule::from_json(&json).unwrap();

    assert_eq!(loaded.name, "app");
    assert_eq!(loaded.declarations.len(), 1);
    assert_eq!(loaded.function_body(f).map(|function| &function.body), Some(&IrNode::int(42)));
    assert!(loaded.function_body(DeclId(7)).is_none());
}

#[test]
fn test_malformed_json_is_reported() {
    let result = IrModule::from_json("{\"id\": 0");
    assert!(matches!(result, Err(IrError::Deserialize(_))));
}
