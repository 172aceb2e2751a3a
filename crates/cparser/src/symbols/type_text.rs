//! Splitting clang's function type spellings into return and parameter types.
//!
//! Clang spells a function type as `R (P1, P2)`, e.g. `"int (const char *, int)"`.
//! When the return type itself contains a declarator, the parameter list sits
//! inside it: `"int (*(int))(char)"` is a function taking `int` and returning
//! `int (*)(char)`.

/// Return and parameter types of one function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub return_type: String,
    pub parameter_types: Vec<String>,
}

/// Split a function `qualType` into its return type and parameter types.
///
/// Returns `None` when the spelling has no parameter list, which happens for
/// functions declared through a typedef'd function type.
pub fn split_function_type(qual_type: &str) -> Option<FunctionSignature> {
    let (return_type, parameters, trailing) = strip_parameter_list(qual_type.trim())?;
    let return_type = match trailing_return_type(trailing) {
        Some(declared) if return_type.trim() == "auto" => declared,
        _ => return_type.trim(),
    };
    if return_type.is_empty() {
        return None;
    }

    Some(FunctionSignature {
        return_type: return_type.to_string(),
        parameter_types: split_parameter_list(parameters),
    })
}

/// The `T` of a trailing `-> T` after the parameter list and its qualifiers.
fn trailing_return_type(trailing: &str) -> Option<&str> {
    trailing.split_once("->").map(|(_, declared)| declared.trim()).filter(|declared| !declared.is_empty())
}

/// Split the text between a parameter list's parentheses into types.
///
/// `void` alone and an empty list both mean no parameters; the variadic
/// marker `...` is not a parameter type.
pub fn split_parameter_list(parameters: &str) -> Vec<String> {
    let trimmed = parameters.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return Vec::new();
    }

    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in trimmed.char_indices() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                types.push(trimmed[start..i].trim());
                start = i + 1;
            },
            _ => {},
        }
    }
    types.push(trimmed[start..].trim());

    types.into_iter().filter(|t| !t.is_empty() && *t != "...").map(str::to_string).collect()
}

/// Remove the function's own parameter list from `spelling`.
///
/// Returns the remaining return type text, the list's contents, and whatever
/// follows the list (qualifiers and a trailing return type).
fn strip_parameter_list(spelling: &str) -> Option<(String, &str, &str)> {
    let open = find_parameter_list(spelling)?;
    let close = matching_paren(spelling, open)?;
    let inner = &spelling[open + 1..close];
    let trailing = &spelling[close + 1..];

    if inner.trim_start().starts_with(['*', '&', '^']) {
        // Declarator group: the parameter list belongs to the innermost
        // declarator, the outer parentheses belong to the return type.
        let (stripped, parameters, inner_trailing) = strip_parameter_list(inner)?;
        let rebuilt = format!("{}({}){}", &spelling[..open], stripped, trailing);
        return Some((rebuilt, parameters, inner_trailing));
    }

    // `const`, `noexcept` and attributes after the list qualify the function
    // type itself, not its return type.
    Some((spelling[..open].trim_end().to_string(), inner, trailing))
}

/// Operators whose parenthesized operand is part of a type, not a parameter list.
const TYPE_OPERATORS: [&str; 6] = ["decltype", "typeof", "__typeof__", "__typeof", "_Atomic", "__underlying_type"];

/// Offset of the first `(` that opens a parameter list or declarator group.
///
/// Parentheses inside template arguments and operands of type operators such
/// as `decltype(expr)` are skipped.
fn find_parameter_list(spelling: &str) -> Option<usize> {
    let mut angle_depth = 0usize;
    let mut skip_until = 0usize;
    for (i, c) in spelling.char_indices() {
        if i < skip_until {
            continue;
        }
        match c {
            '<' => angle_depth += 1,
            '>' => angle_depth = angle_depth.saturating_sub(1),
            '(' if angle_depth == 0 => {
                if !follows_type_operator(&spelling[..i]) {
                    return Some(i);
                }
                skip_until = matching_paren(spelling, i)? + 1;
            },
            _ => {},
        }
    }
    None
}

fn follows_type_operator(prefix: &str) -> bool {
    let prefix = prefix.trim_end();
    let word_start = prefix.rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).map_or(0, |i| i + 1);
    TYPE_OPERATORS.contains(&&prefix[word_start..])
}

fn matching_paren(
    spelling: &str,
    open: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in spelling[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            },
            _ => {},
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src/symbols/type_text_tests.rs"]
mod tests;
