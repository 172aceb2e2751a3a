use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    ast::TranslationUnit,
    symbols::{
        binding::{Binding, Classification, classify},
        descriptor::{FunctionDescriptor, VariableDescriptor},
        traversal::{NameOccurrence, NameRole, name_occurrences},
    },
};

/// Functions and variables declared in one translation unit, keyed by name.
///
/// Keys keep the order in which names were first discovered. A later
/// declaration of a known name replaces the earlier descriptor in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolReport {
    pub variables: IndexMap<String, VariableDescriptor>,
    pub functions: IndexMap<String, FunctionDescriptor>,
}

/// Build the symbol report for a translation unit.
///
/// Never fails; with no unit the report is empty.
pub fn assemble(unit: Option<&TranslationUnit>) -> SymbolReport {
    let Some(unit) = unit else {
        return SymbolReport::default();
    };

    let report = SymbolReport::from_occurrences(name_occurrences(unit));
    debug!(
        "[assemble] {}: {} functions, {} variables",
        unit.file_path(),
        report.functions.len(),
        report.variables.len()
    );
    report
}

impl SymbolReport {
    pub fn from_occurrences<'a>(occurrences: impl IntoIterator<Item = NameOccurrence<'a>>) -> Self {
        occurrences.into_iter().fold(Self::default(), |mut report, occurrence| {
            report.record(&occurrence);
            report
        })
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.variables.is_empty()
    }

    /// Serialize with 4-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        to_json_pretty(self)
    }

    fn record(
        &mut self,
        occurrence: &NameOccurrence<'_>,
    ) {
        if occurrence.role != NameRole::Declaration {
            return;
        }
        let (Some(binding), Some(line)) = (occurrence.binding.as_ref(), occurrence.line) else {
            return;
        };
        let name = occurrence.name;

        match (classify(binding), binding) {
            (Classification::Function, Binding::Function(function)) => {
                trace!(
                    "[assemble] {}{} {name}({}) at line {line}",
                    function.storage,
                    function.return_type,
                    function.parameter_types.join(", ")
                );
                self.functions.insert(name.to_string(), FunctionDescriptor::build(name, function, line));
            },
            (Classification::Variable, Binding::Variable(variable)) => {
                trace!("[assemble] {}{} {name} at line {line}", variable.storage, variable.ty);
                self.variables.insert(name.to_string(), VariableDescriptor::build(name, variable, line));
            },
            _ => {},
        }
    }
}

/// Serialize any value as JSON with 4-space indentation.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
