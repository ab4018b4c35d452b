//! Children type synthesis
//!
//! Every children type is recursive: the helper aliases it refers to
//! accept iterables of themselves, so nested arrays and fragments of
//! valid children are valid children too.

use crate::assembler::{ELEMENT_COMPONENT, STRING_COMPONENT, STRING_OR_ELEMENT_COMPONENT};
use crate::ast::{Keyword, TypeNode};
use crate::error::{GeneratorError, Result};
use crate::model::{Children, ComponentRef};

/// Accepted children of `component`, widened by `extra_refs` harvested from
/// its component-typed properties. Extra references come first.
pub fn children_type(component: &str, children: &Children, extra_refs: &[&ComponentRef]) -> Result<TypeNode> {
    match children {
        Children::None => {
            if extra_refs.is_empty() {
                return Err(GeneratorError::empty_children(component));
            }
            Ok(TypeNode::generic(
                ELEMENT_COMPONENT,
                vec![reference_union(extra_refs.iter().copied())],
            ))
        }
        Children::String => Ok(TypeNode::reference(STRING_COMPONENT)),
        Children::Members(members) => {
            let merged = members.merged();
            let refs = extra_refs.iter().copied().chain(merged.values().copied());
            Ok(TypeNode::generic(ELEMENT_COMPONENT, vec![reference_union(refs)]))
        }
        Children::StringOrMembers(members) => {
            let merged = members.merged();
            let refs = extra_refs.iter().copied().chain(merged.values().copied());
            Ok(TypeNode::generic(STRING_OR_ELEMENT_COMPONENT, vec![reference_union(refs)]))
        }
    }
}

/// `typeof A | typeof B`, first occurrence wins; `never` when nothing is accepted
fn reference_union<'a>(refs: impl Iterator<Item = &'a ComponentRef>) -> TypeNode {
    let mut seen: Vec<&str> = Vec::new();
    for reference in refs {
        if !seen.contains(&reference.component_name.as_str()) {
            seen.push(&reference.component_name);
        }
    }

    match seen.len() {
        0 => TypeNode::keyword(Keyword::Never),
        1 => TypeNode::query(seen[0]),
        _ => TypeNode::Union(seen.into_iter().map(TypeNode::query).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Members;
    use crate::printer::print_type;
    use indexmap::IndexMap;

    fn members(ordered: &[(&str, &str)], per_type: &[(&str, &str)]) -> Members {
        let map = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(name, target)| (name.to_string(), ComponentRef::new(*target)))
                .collect::<IndexMap<_, _>>()
        };
        Members {
            ordered_members: map(ordered),
            per_type_members: map(per_type),
        }
    }

    fn rendered(children: &Children, extra: &[&ComponentRef]) -> String {
        print_type(&children_type("Test", children, extra).unwrap())
    }

    #[test]
    fn test_none_requires_extra_refs() {
        let err = children_type("Separator", &Children::None, &[]).unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyChildren { ref component } if component == "Separator"));

        let metadata = ComponentRef::new("Metadata");
        assert_eq!(rendered(&Children::None, &[&metadata]), "ElementComponent<typeof Metadata>");
    }

    #[test]
    fn test_string_children() {
        let extra = ComponentRef::new("Ignored");
        assert_eq!(rendered(&Children::String, &[]), "StringComponent");
        assert_eq!(rendered(&Children::String, &[&extra]), "StringComponent");
    }

    #[test]
    fn test_members_union_with_extras_first() {
        let children = Children::Members(members(&[("Item", "ListItem")], &[("Section", "ListSection")]));
        let empty_view = ComponentRef::new("EmptyView");
        assert_eq!(
            rendered(&children, &[&empty_view]),
            "ElementComponent<typeof EmptyView | typeof ListItem | typeof ListSection>"
        );
    }

    #[test]
    fn test_string_or_members_includes_keyed_members() {
        let children = Children::StringOrMembers(members(&[("Link", "Link")], &[("Bold", "Bold")]));
        assert_eq!(
            rendered(&children, &[]),
            "StringOrElementComponent<typeof Link | typeof Bold>"
        );
    }

    #[test]
    fn test_duplicate_refs_collapse() {
        let children = Children::Members(members(&[("Item", "Item")], &[]));
        let item = ComponentRef::new("Item");
        assert_eq!(rendered(&children, &[&item]), "ElementComponent<typeof Item>");
        assert_eq!(
            rendered(&Children::Members(Members::default()), &[]),
            "ElementComponent<never>"
        );
    }
}
