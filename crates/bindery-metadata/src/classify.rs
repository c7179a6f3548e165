//! Method classification by naming convention and shape.
//!
//! Getters are `get_<name>()` returning a value, predicate getters are
//! `is_<name>()` returning `bool`, setters are `set_<name>(value)`.

use bindery_core::MethodDecl;
use bindery_core::naming::upper_camel;

pub const GETTER_PREFIX: &str = "get_";
pub const PREDICATE_PREFIX: &str = "is_";
pub const SETTER_PREFIX: &str = "set_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    None,
    Getter,
    PredicateGetter,
    Setter,
}

/// Classify a declaration by name and shape. Visibility is not considered.
#[must_use]
pub fn classify(decl: &MethodDecl) -> MethodKind {
    let name = decl.name.as_str();
    let no_params = decl.params.is_empty();
    if has_prefix(name, GETTER_PREFIX) && no_params && decl.returns.is_some() {
        MethodKind::Getter
    } else if has_prefix(name, PREDICATE_PREFIX)
        && no_params
        && decl.returns.as_deref() == Some("bool")
    {
        MethodKind::PredicateGetter
    } else if has_prefix(name, SETTER_PREFIX) && decl.params.len() == 1 {
        MethodKind::Setter
    } else {
        MethodKind::None
    }
}

/// Whether the method is named like a setter, whatever its arity.
#[must_use]
pub fn is_setter_name(name: &str) -> bool {
    has_prefix(name, SETTER_PREFIX)
}

/// Attribute name derived from an accessor name: `set_home_page` -> `HomePage`.
///
/// Returns `None` for names without a `get_`, `is_` or `set_` prefix.
#[must_use]
pub fn attribute_name(method_name: &str) -> Option<String> {
    [SETTER_PREFIX, GETTER_PREFIX, PREDICATE_PREFIX]
        .iter()
        .find_map(|prefix| method_name.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .map(upper_camel)
}

/// The getter names that pair with an attribute's setter, `get_` first.
#[must_use]
pub fn getter_names(setter_name: &str) -> Option<[String; 2]> {
    let rest = setter_name.strip_prefix(SETTER_PREFIX).filter(|rest| !rest.is_empty())?;
    Some([format!("{GETTER_PREFIX}{rest}"), format!("{PREDICATE_PREFIX}{rest}")])
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty())
}
