use clang_ast::BareSourceLocation;

use crate::{
    ast::{
        TranslationUnit,
        clang_nodes::{Clang, Node, resolve_loc},
    },
    symbols::binding::Binding,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// The occurrence introduces the name.
    Declaration,
    /// The occurrence uses a name declared elsewhere.
    Reference,
}

/// One identifier occurrence in the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOccurrence<'a> {
    pub name: &'a str,
    pub role: NameRole,
    /// `None` when the name could not be resolved. References are never resolved.
    pub binding: Option<Binding>,
    /// 1-based line of the name token.
    pub line: Option<u32>,
}

/// Lazily walks a translation unit in document order, yielding each name
/// occurrence exactly once.
///
/// Subtrees are pruned when they are implicit (compiler-generated) or start
/// in a file other than the main file. Inside template declarations only the
/// templated pattern is walked, never its instantiations.
pub struct NameOccurrences<'a> {
    stack: Vec<&'a Node>,
    main_file: &'a str,
}

pub fn name_occurrences(unit: &TranslationUnit) -> NameOccurrences<'_> {
    NameOccurrences {
        stack: vec![unit.root()],
        main_file: unit.main_file(),
    }
}

impl<'a> NameOccurrences<'a> {
    fn push_children(
        &mut self,
        node: &'a Node,
    ) {
        let first_child = self.stack.len();
        match &node.kind {
            Clang::FunctionTemplateDecl(_) => {
                let mut seen_pattern = false;
                for child in &node.inner {
                    if child.kind.is_function_decl() {
                        if seen_pattern {
                            continue;
                        }
                        seen_pattern = true;
                    }
                    self.stack.push(child);
                }
            },
            Clang::ClassTemplateDecl(_) => self.stack.extend(
                node.inner.iter().filter(|child| !matches!(child.kind, Clang::ClassTemplateSpecializationDecl(_))),
            ),
            Clang::VarTemplateDecl(_) => self.stack.extend(
                node.inner.iter().filter(|child| !matches!(child.kind, Clang::VarTemplateSpecializationDecl(_))),
            ),
            _ => self.stack.extend(node.inner.iter()),
        }
        // The stack pops from the end; reverse so the first child comes out first.
        self.stack[first_child..].reverse();
    }

    fn in_main_file(
        &self,
        location: &BareSourceLocation,
    ) -> bool {
        &*location.file == self.main_file
    }
}

impl<'a> Iterator for NameOccurrences<'a> {
    type Item = NameOccurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.kind.is_implicit() {
                continue;
            }
            let location = node.kind.loc().and_then(resolve_loc);
            if location.is_some_and(|loc| !self.in_main_file(loc)) {
                continue;
            }

            self.push_children(node);

            if let Some(occurrence) = occurrence_of(&node.kind, location) {
                return Some(occurrence);
            }
        }
        None
    }
}

fn occurrence_of<'a>(
    kind: &'a Clang,
    location: Option<&BareSourceLocation>,
) -> Option<NameOccurrence<'a>> {
    let line = location.map(|loc| loc.line as u32).filter(|&line| line > 0);

    match kind {
        Clang::DeclRefExpr(data) | Clang::MemberExpr(data) => Some(NameOccurrence {
            name: data.name()?,
            role: NameRole::Reference,
            binding: None,
            line,
        }),
        _ => {
            let data = kind.decl_data()?;
            Some(NameOccurrence {
                name: data.name()?,
                role: NameRole::Declaration,
                binding: Binding::resolve(kind),
                line,
            })
        },
    }
}
