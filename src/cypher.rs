//! Small helpers for writing identifiers and parameter references into
//! generated Cypher text.

/// Backtick-quote an identifier (label, type, property key). Embedded
/// backticks are doubled so the identifier cannot terminate early.
pub(crate) fn quote(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

/// `:`Label`` for every label, in iteration order.
pub(crate) fn labels<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    labels.into_iter().map(|l| format!(":{}", quote(l))).collect()
}

/// Reference a bound parameter. Plain identifiers are written as `$name`,
/// anything else is quoted.
pub(crate) fn parameter(name: &str) -> String {
    let simple = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        format!("${name}")
    } else {
        format!("${}", quote(name))
    }
}
