//! Symbol extraction: binding resolution and classification, descriptor
//! building, and the single-pass report assembly over a translation unit.

pub mod binding;
pub mod descriptor;
pub mod report;
pub mod traversal;
pub mod type_text;

pub use binding::{Binding, Classification, FunctionBinding, StorageFlags, VariableBinding, classify};
pub use descriptor::{FunctionDescriptor, VariableDescriptor};
pub use report::{SymbolReport, assemble, to_json_pretty};
pub use traversal::{NameOccurrence, NameOccurrences, NameRole, name_occurrences};
pub use type_text::{FunctionSignature, split_function_type};
