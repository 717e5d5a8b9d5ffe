//! Cross-reference inheritance between references.
//!
//! Grounded in `bibutils_sys/src/bibtexin.c`'s `bibtex_crossref` handling:
//! a child reference naming a `CROSSREF` parent inherits every field from
//! that parent one level deeper, and a `TITLE` inherited into an
//! `Inproceedings`/`Incollection` child is renamed to `booktitle` to match
//! BibTeX's own convention for collection-level titles.

use crate::diagnostics::Diagnostics;
use crate::field_store::level;
use crate::reference::ReferenceCollection;
use crate::reftypes::Reftype;

const CROSSREF_TAG: &str = "CROSSREF";

/// Resolve every `CROSSREF` field in `collection` against its sibling
/// references, copying the parent's fields one level deeper into the
/// child. `reftype_of` supplies each reference's resolved type so the
/// `TITLE`→`booktitle` rename rule can be applied.
pub fn resolve_crossrefs(
    collection: &mut ReferenceCollection,
    reftype_of: impl Fn(usize) -> Reftype,
    diagnostics: &mut Diagnostics,
) {
    let pending: Vec<(usize, String, usize)> = collection
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let idx = r.fields.find(CROSSREF_TAG, level::ANY)?;
            let parent_key = r.fields.value(idx).to_string();
            Some((i, parent_key, idx))
        })
        .collect();

    for (child_idx, parent_key, crossref_field_idx) in pending {
        let Some(parent_idx) = collection.find_by_refnum(&parent_key) else {
            diagnostics.warn_field(child_idx, CROSSREF_TAG, format!("missing parent '{parent_key}'"));
            continue;
        };
        if parent_idx == child_idx {
            diagnostics.warn_field(child_idx, CROSSREF_TAG, "self-referential crossref");
            continue;
        }

        let parent_entries: Vec<(String, String, i32)> = collection
            .get(parent_idx)
            .unwrap()
            .fields
            .iter()
            .filter(|e| e.tag != "INTERNAL_TYPE" && e.tag != "REFNUM")
            .map(|e| (e.tag.clone(), e.value.clone(), e.level))
            .collect();

        let child_reftype = reftype_of(child_idx);
        let rename_title = matches!(child_reftype, Reftype::Inproceedings | Reftype::Inbook);

        let child = collection.get_mut(child_idx).unwrap();
        for (tag, value, lvl) in parent_entries {
            let out_tag = if rename_title && tag.eq_ignore_ascii_case("TITLE") {
                "booktitle".to_string()
            } else {
                tag
            };
            child.fields.add(out_tag, value, lvl + 1);
        }
        child.fields.set_used(crossref_field_idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_store::level::MAIN;
    use crate::reference::Reference;

    #[test]
    fn inherits_parent_fields_one_level_deeper() {
        let mut collection = ReferenceCollection::new();

        let mut parent = Reference::new();
        parent.set_refnum("proc99");
        parent.fields.add("TITLE", "Proceedings of X", MAIN);
        collection.add(parent);

        let mut child = Reference::new();
        child.set_refnum("paper1");
        child.fields.add(CROSSREF_TAG, "proc99", MAIN);
        collection.add(child);

        let mut diag = Diagnostics::new();
        resolve_crossrefs(&mut collection, |_| Reftype::Inproceedings, &mut diag);

        assert!(diag.is_empty());
        let child = collection.get(1).unwrap();
        assert_eq!(child.fields.findv(MAIN + 1, "booktitle"), Some("Proceedings of X"));
    }

    #[test]
    fn missing_parent_warns_without_failing() {
        let mut collection = ReferenceCollection::new();
        let mut child = Reference::new();
        child.fields.add(CROSSREF_TAG, "ghost", MAIN);
        collection.add(child);

        let mut diag = Diagnostics::new();
        resolve_crossrefs(&mut collection, |_| Reftype::Misc, &mut diag);
        assert_eq!(diag.len(), 1);
    }
}
