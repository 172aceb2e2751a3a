use serde_json::json;

use super::*;
use crate::symbols::binding::StorageFlags;

fn function_binding(
    return_type: &str,
    parameter_types: &[&str],
) -> FunctionBinding {
    FunctionBinding {
        return_type: return_type.to_string(),
        parameter_types: parameter_types.iter().map(|t| t.to_string()).collect(),
        storage: StorageFlags::default(),
    }
}

#[test]
fn function_parameters_serialize_as_indexed_object() {
    let descriptor = FunctionDescriptor::build("copy", &function_binding("char *", &["char *", "const char *"]), 7);

    assert_eq!(descriptor.name, "copy");
    assert_eq!(
        serde_json::to_value(&descriptor).expect("serializable"),
        json!({ "return": "char *", "parameters": { "0": "char *", "1": "const char *" }, "line": 7 })
    );
}

#[test]
fn zero_parameters_omit_the_key() {
    let descriptor = FunctionDescriptor::build("tick", &function_binding("void", &[]), 2);
    let text = serde_json::to_string(&descriptor).expect("serializable");

    assert_eq!(text, r#"{"return":"void","line":2}"#);
}

#[test]
fn variable_descriptor_shape() {
    let binding = VariableBinding {
        ty: "const int".to_string(),
        storage: StorageFlags {
            is_static: true,
            ..StorageFlags::default()
        },
    };
    let descriptor = VariableDescriptor::build("limit", &binding, 12);

    assert_eq!(descriptor.name, "limit");
    assert_eq!(serde_json::to_string(&descriptor).expect("serializable"), r#"{"type":"const int","line":12}"#);
}
