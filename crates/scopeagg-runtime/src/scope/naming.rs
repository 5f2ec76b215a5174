//! Scoped feature name composition
//!
//! `a.b.c` scoped by value `V` under label `L` becomes `a.scoped.b.c` with
//! extensions `[(scope_name, L), (scope, V)]`. No escaping is applied to the
//! scope value or label.

/// Token inserted after the first name component
pub const SCOPED_TOKEN: &str = "scoped";

/// Extension key carrying the scope label
pub const SCOPE_NAME_EXTENSION: &str = "scope_name";

/// Extension key carrying the scope value
pub const SCOPE_EXTENSION: &str = "scope";

/// Name and extensions of a scoped feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedName {
    pub name: String,
    pub extensions: Vec<(String, String)>,
}

impl ScopedName {
    /// Extension dimensions declared by every scoped feature
    pub fn extension_dimensions() -> Vec<String> {
        vec![SCOPE_NAME_EXTENSION.to_string(), SCOPE_EXTENSION.to_string()]
    }
}

/// Compose the scoped name for `base_name`
///
/// Components are split on `.` and kept verbatim, empty ones included.
pub fn compose_scoped_name(base_name: &str, scope_value: &str, scope_name: &str) -> ScopedName {
    let mut components: Vec<&str> = base_name.split('.').collect();
    // split never yields an empty sequence
    components.insert(1, SCOPED_TOKEN);

    ScopedName {
        name: components.join("."),
        extensions: vec![
            (SCOPE_NAME_EXTENSION.to_string(), scope_name.to_string()),
            (SCOPE_EXTENSION.to_string(), scope_value.to_string()),
        ],
    }
}
