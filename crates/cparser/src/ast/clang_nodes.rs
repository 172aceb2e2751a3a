use clang_ast::{BareSourceLocation, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the extractor cares about.
///
/// Each variant corresponds to a Clang AST node `"kind"` value.
/// The `Other` fallback skips all unrecognized node kinds.
#[derive(Deserialize, Debug)]
pub enum Clang {
    // --- Functions ---
    FunctionDecl(DeclData),
    CXXMethodDecl(DeclData),
    CXXConstructorDecl(DeclData),
    CXXDestructorDecl(DeclData),
    CXXConversionDecl(DeclData),

    // --- Variables ---
    VarDecl(DeclData),
    FieldDecl(DeclData),
    ParmVarDecl(DeclData),

    // --- Templates ---
    FunctionTemplateDecl(DeclData),
    ClassTemplateDecl(DeclData),
    VarTemplateDecl(DeclData),
    ClassTemplateSpecializationDecl(DeclData),
    VarTemplateSpecializationDecl(DeclData),

    // --- References ---
    DeclRefExpr(RefExprData),
    MemberExpr(RefExprData),

    // --- Catch-all ---
    // `loc` and `range` MUST be deserialized even for unrecognized node
    // kinds: `clang-ast` carries the "current file" and "current line" across
    // the stream through `SourceLocation`, so skipping them corrupts every
    // later location that omits those fields.
    #[allow(dead_code)]
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
        #[serde(rename = "isImplicit", default)]
        is_implicit: bool,
    },
}

/// Common data for all declaration nodes.
///
/// `ty` captures Clang's `type.qualType` string, e.g. `"int (const char *)"`
/// for functions or `"unsigned long"` for variables.
#[derive(Deserialize, Debug)]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    #[allow(dead_code)]
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    #[serde(rename = "storageClass")]
    pub storage_class: Option<String>,
    pub inline: Option<bool>,
}

/// Reference expression data (DeclRefExpr, MemberExpr).
#[derive(Deserialize, Debug)]
pub struct RefExprData {
    pub loc: Option<SourceLocation>,
    #[allow(dead_code)]
    pub range: Option<SourceRange>,
    #[serde(rename = "referencedDecl")]
    pub referenced_decl: Option<ReferencedDecl>,
    /// `MemberExpr` names the member directly instead of through `referencedDecl`.
    pub name: Option<String>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
}

/// Inline summary of a referenced declaration.
#[derive(Deserialize, Debug)]
pub struct ReferencedDecl {
    pub name: Option<String>,
}

/// Clang's qualified type representation.
#[derive(Deserialize, Debug)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
    /// Present when `qualType` names a typedef or alias.
    #[serde(rename = "desugaredQualType")]
    pub desugared_qual_type: Option<String>,
}

impl DeclData {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }
    pub fn qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref())
    }
    pub fn desugared_qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.desugared_qual_type.as_deref())
    }
    pub fn storage_class(&self) -> Option<&str> {
        self.storage_class.as_deref()
    }
    pub fn is_inline(&self) -> bool {
        self.inline.unwrap_or(false)
    }
}

impl RefExprData {
    pub fn name(&self) -> Option<&str> {
        self.referenced_decl
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
    }
    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }
}

impl Clang {
    /// Location of the node's name token (or of the node, for kinds without a name).
    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Clang::FunctionDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::VarDecl(d)
            | Clang::FieldDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::VarTemplateDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::VarTemplateSpecializationDecl(d) => d.loc.as_ref(),
            Clang::DeclRefExpr(r) | Clang::MemberExpr(r) => r.loc.as_ref(),
            Clang::Other {
                loc,
                ..
            } => loc.as_ref(),
        }
    }

    pub fn is_implicit(&self) -> bool {
        match self {
            Clang::DeclRefExpr(r) | Clang::MemberExpr(r) => r.is_implicit(),
            Clang::Other {
                is_implicit,
                ..
            } => *is_implicit,
            _ => self.decl_data().is_some_and(DeclData::is_implicit),
        }
    }

    pub fn decl_data(&self) -> Option<&DeclData> {
        match self {
            Clang::FunctionDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::VarDecl(d)
            | Clang::FieldDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::VarTemplateDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::VarTemplateSpecializationDecl(d) => Some(d),
            Clang::DeclRefExpr(_)
            | Clang::MemberExpr(_)
            | Clang::Other {
                ..
            } => None,
        }
    }

    pub fn is_function_decl(&self) -> bool {
        matches!(
            self,
            Clang::FunctionDecl(_)
                | Clang::CXXMethodDecl(_)
                | Clang::CXXConstructorDecl(_)
                | Clang::CXXDestructorDecl(_)
                | Clang::CXXConversionDecl(_)
        )
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location (where a macro was invoked, the position
/// the user sees in their source file) over the spelling location (inside the
/// macro definition).
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
