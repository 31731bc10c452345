//! Optimistic locking fragments.
//!
//! Cypher has no per-row compare-and-swap, so the check is written into the
//! statement: filter rows on the version the caller last saw, increment it,
//! then re-check the incremented value inside the same statement. A row that
//! lost the race drops out, and the executor notices the affected-row count
//! falling short of [`OptimisticLockingConfig::expected_affected_count`].
//! Concurrent writers that interleave between the increment and the
//! re-check are not detected.
//!
//! Every fragment starts with a space and has no trailing space, so it can
//! be spliced directly after the clause it extends.
//!
//! [`OptimisticLockingConfig::expected_affected_count`]: grapho_core::OptimisticLockingConfig::expected_affected_count

use std::collections::BTreeSet;

use grapho_core::{GraphoError, PropertyContainer};

use crate::cypher;

/// Row key holding the version the caller last saw, whatever the entity
/// names its version property.
pub const EXPECTED_VERSION: &str = "version";

fn version_key<'a>(container: &'a PropertyContainer, variable: &str) -> Result<&'a str, GraphoError> {
    container
        .version_key()
        .ok_or_else(|| GraphoError::MissingVersion(variable.to_owned()))
}

/// Fragment for entities that already exist. Must directly follow a
/// `WHERE` condition on `variable`:
///
/// ```text
///  AND v.`k` = row.`version` SET v.`k` = v.`k` + 1 WITH v, row WHERE v.`k` = row.`version` + 1
/// ```
///
/// `increment` 0 checks the version without changing it.
pub fn existing_entity(container: &PropertyContainer, variable: &str, increment: u32) -> Result<String, GraphoError> {
    let key = cypher::quote(version_key(container, variable)?);
    Ok(format!(
        " AND {v}.{k} = row.{e} SET {v}.{k} = {v}.{k} + {inc} WITH {v}, row WHERE {v}.{k} = row.{e} + {inc}",
        v = variable,
        k = key,
        e = cypher::quote(EXPECTED_VERSION),
        inc = increment
    ))
}

/// Fragment for entities that may or may not exist yet, e.g. after a
/// `MERGE`. A missing version on either side counts as -1, so the first
/// write stores version 0:
///
/// ```text
///  WITH v, row WHERE COALESCE(v.`k`, -1) = COALESCE(row.`version`, -1) SET v.`k` = COALESCE(v.`k`, -1) + 1 WITH v, row WHERE v.`k` = COALESCE(row.`version`, -1) + 1
/// ```
pub fn new_or_existing(container: &PropertyContainer, variable: &str) -> Result<String, GraphoError> {
    let key = cypher::quote(version_key(container, variable)?);
    Ok(format!(
        " WITH {v}, row WHERE COALESCE({v}.{k}, -1) = COALESCE(row.{e}, -1) \
         SET {v}.{k} = COALESCE({v}.{k}, -1) + 1 \
         WITH {v}, row WHERE {v}.{k} = COALESCE(row.{e}, -1) + 1",
        v = variable,
        k = key,
        e = cypher::quote(EXPECTED_VERSION)
    ))
}

/// ` REMOVE v.`a`, v.`b`` for the given property names; empty when there
/// is nothing to remove.
pub fn remove_properties(names: &BTreeSet<String>, variable: &str) -> String {
    if names.is_empty() {
        return String::new();
    }
    let items: Vec<String> = names
        .iter()
        .map(|name| format!("{}.{}", variable, cypher::quote(name)))
        .collect();
    format!(" REMOVE {}", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned() -> PropertyContainer {
        let mut c = PropertyContainer::new();
        c.set_version("version", 3_i64);
        c
    }

    #[test]
    fn existing_entity_fragment() {
        assert_eq!(
            existing_entity(&versioned(), "r", 1).unwrap(),
            " AND r.`version` = row.`version` SET r.`version` = r.`version` + 1 WITH r, row WHERE r.`version` = row.`version` + 1"
        );
    }

    #[test]
    fn zero_increment_only_checks() {
        let fragment = existing_entity(&versioned(), "n", 0).unwrap();
        assert!(fragment.ends_with("WHERE n.`version` = row.`version` + 0"));
    }

    #[test]
    fn new_or_existing_fragment() {
        assert_eq!(
            new_or_existing(&versioned(), "n").unwrap(),
            " WITH n, row WHERE COALESCE(n.`version`, -1) = COALESCE(row.`version`, -1) \
             SET n.`version` = COALESCE(n.`version`, -1) + 1 \
             WITH n, row WHERE n.`version` = COALESCE(row.`version`, -1) + 1"
        );
    }

    #[test]
    fn expected_version_row_key_is_fixed() {
        let mut c = PropertyContainer::new();
        c.set_version("props", 3_i64);
        assert_eq!(
            existing_entity(&c, "n", 1).unwrap(),
            " AND n.`props` = row.`version` SET n.`props` = n.`props` + 1 WITH n, row WHERE n.`props` = row.`version` + 1"
        );
        assert!(new_or_existing(&c, "n").unwrap().contains("COALESCE(row.`version`, -1)"));
    }

    #[test]
    fn unversioned_container_is_an_error() {
        let err = existing_entity(&PropertyContainer::new(), "n", 1).unwrap_err();
        assert!(matches!(err, GraphoError::MissingVersion(v) if v == "n"));
    }

    #[test]
    fn remove_fragment() {
        let names: BTreeSet<String> = ["b", "a"].into_iter().map(String::from).collect();
        assert_eq!(remove_properties(&names, "r"), " REMOVE r.`a`, r.`b`");
        assert_eq!(remove_properties(&BTreeSet::new(), "r"), "");
    }
}
