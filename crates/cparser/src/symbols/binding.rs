use std::fmt::{Display, Formatter};

use crate::{
    ast::clang_nodes::{Clang, DeclData},
    symbols::type_text::split_function_type,
};

/// Storage-class and linkage flags of a declaration.
///
/// The flags are independent; the data model does not enforce the C rules
/// that forbid some combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorageFlags {
    pub is_auto: bool,
    pub is_extern: bool,
    pub is_static: bool,
    pub is_register: bool,
    pub is_inline: bool,
}

impl StorageFlags {
    fn from_decl(data: &DeclData) -> Self {
        let storage_class = data.storage_class();
        Self {
            is_auto: storage_class == Some("auto"),
            is_extern: storage_class == Some("extern"),
            is_static: storage_class == Some("static"),
            is_register: storage_class == Some("register"),
            is_inline: data.is_inline(),
        }
    }
}

/// Renders as the specifier prefix of a declaration, e.g. `"static inline "`.
impl Display for StorageFlags {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        let specifiers = [
            (self.is_auto, "auto "),
            (self.is_extern, "extern "),
            (self.is_static, "static "),
            (self.is_register, "register "),
            (self.is_inline, "inline "),
        ];
        for (_, text) in specifiers.iter().filter(|(set, _)| *set) {
            f.write_str(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBinding {
    pub return_type: String,
    pub parameter_types: Vec<String>,
    pub storage: StorageFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub ty: String,
    /// `is_inline` is never set for variables.
    pub storage: StorageFlags,
}

/// Semantic information resolved for a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Function(FunctionBinding),
    Variable(VariableBinding),
    Parameter(VariableBinding),
    /// Types, namespaces, templates and every other kind of entity.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Function,
    Variable,
    Skip,
}

impl Binding {
    /// Resolve the binding a declaration node introduces.
    ///
    /// Returns `None` when the node lacks the type information its kind
    /// requires, so the name cannot be resolved.
    pub fn resolve(kind: &Clang) -> Option<Binding> {
        match kind {
            Clang::FunctionDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d) => {
                // A function declared through a typedef spells only the
                // typedef name; its signature is in the desugared type.
                let signature = d
                    .qual_type()
                    .and_then(split_function_type)
                    .or_else(|| d.desugared_qual_type().and_then(split_function_type))?;
                Some(Binding::Function(FunctionBinding {
                    return_type: signature.return_type,
                    parameter_types: signature.parameter_types,
                    storage: StorageFlags::from_decl(d),
                }))
            },
            Clang::VarDecl(d) | Clang::FieldDecl(d) | Clang::VarTemplateSpecializationDecl(d) => {
                Some(Binding::Variable(variable_binding(d)?))
            },
            Clang::ParmVarDecl(d) => Some(Binding::Parameter(variable_binding(d)?)),
            _ => Some(Binding::Other),
        }
    }
}

fn variable_binding(data: &DeclData) -> Option<VariableBinding> {
    Some(VariableBinding {
        ty: data.qual_type()?.to_string(),
        storage: StorageFlags {
            is_inline: false,
            ..StorageFlags::from_decl(data)
        },
    })
}

/// Decide whether a binding is reported as a function, a variable, or not at all.
///
/// Parameters are variables structurally but are never reported.
pub fn classify(binding: &Binding) -> Classification {
    match binding {
        Binding::Function(_) => Classification::Function,
        Binding::Variable(_) => Classification::Variable,
        Binding::Parameter(_) | Binding::Other => Classification::Skip,
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/binding_tests.rs"]
mod tests;
