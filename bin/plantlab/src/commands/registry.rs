//! Entity name lookup for the CLI.
//!
//! Resolves the entity argument of `get`/`add`/`edit`/`delete` to its
//! definition. The operator master is not listed here — it has a typed
//! client of its own and is special-cased by the resource commands.

use plantlab_core::EntityDef;

/// All table-backed entities, indoor then outdoor.
pub fn all() -> Vec<EntityDef> {
    let mut defs = plantlab_indoor::entities();
    defs.extend(plantlab_outdoor::entities());
    defs
}

/// Look an entity up by its registry name (e.g. "subculturing").
pub fn find(entity: &str) -> Option<EntityDef> {
    all().into_iter().find(|d| d.name == entity)
}

/// Known names, for the unknown-entity error message.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all().iter().map(|d| d.name).collect();
    names.push("operators");
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_entities_plus_operators() {
        assert_eq!(all().len(), 15);
        assert_eq!(names().len(), 16);
        assert!(names().contains(&"operators"));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(find("subculturing").map(|d| d.path), Some("/indoor/subculturing"));
        assert_eq!(find("shifting").map(|d| d.path), Some("/outdoor/shifting"));
        assert!(find("nope").is_none());
    }
}
