use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::symbols::binding::{FunctionBinding, VariableBinding};

/// Normalized record of one function declaration.
///
/// Serializes as `{"return": T, "parameters": {"0": T, ...}, "line": N}`;
/// `parameters` is omitted entirely when the function takes none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "return")]
    pub return_type: String,
    #[serde(rename = "parameters", skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_indexed")]
    pub parameter_types: Vec<String>,
    pub line: u32,
}

/// Normalized record of one variable declaration: `{"type": T, "line": N}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDescriptor {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub line: u32,
}

impl FunctionDescriptor {
    pub fn build(
        name: &str,
        binding: &FunctionBinding,
        line: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            return_type: binding.return_type.clone(),
            parameter_types: binding.parameter_types.clone(),
            line,
        }
    }
}

impl VariableDescriptor {
    pub fn build(
        name: &str,
        binding: &VariableBinding,
        line: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            ty: binding.ty.clone(),
            line,
        }
    }
}

/// Parameter types are keyed by their stringified zero-based position.
fn serialize_indexed<S: Serializer>(
    types: &[String],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(types.len()))?;
    for (index, ty) in types.iter().enumerate() {
        map.serialize_entry(&index.to_string(), ty)?;
    }
    map.end()
}

#[cfg(test)]
#[path = "../../tests/src/symbols/descriptor_tests.rs"]
mod tests;
