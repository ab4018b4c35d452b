//! Property placement and component reference harvesting
//!
//! The element construction primitive only carries plain values as
//! attributes. Component-typed properties are therefore passed as nested
//! content, and the components they reference have to be accepted by the
//! owning element's children type.

use crate::error::{GeneratorError, Result};
use crate::model::{ComponentRef, Property, PropertyType, StandardComponent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Forwarded as a flat element attribute
    Attribute,
    /// Appended to the element's nested content
    Children,
}

pub fn classify(ty: &PropertyType) -> Result<Placement> {
    match ty {
        PropertyType::Boolean
        | PropertyType::Number
        | PropertyType::String
        | PropertyType::Function { .. }
        | PropertyType::SharedTypeRef { .. } => Ok(Placement::Attribute),
        PropertyType::Component { .. } => Ok(Placement::Children),
        PropertyType::Array { item } => classify(item),
        PropertyType::Union { items } if items.is_empty() => Err(GeneratorError::empty_union(ty)),
        PropertyType::Union { items } => {
            let placements = items.iter().map(classify).collect::<Result<Vec<_>>>()?;
            if placements.iter().all(|placement| *placement == Placement::Attribute) {
                Ok(Placement::Attribute)
            } else if placements.iter().all(|placement| *placement == Placement::Children) {
                Ok(Placement::Children)
            } else {
                Err(GeneratorError::mixed_union(ty))
            }
        }
    }
}

/// Every component reachable through array and union nesting, in declaration order
pub fn collect_component_refs(ty: &PropertyType) -> Vec<&ComponentRef> {
    let mut refs = Vec::new();
    collect_into(ty, &mut refs);
    refs
}

fn collect_into<'a>(ty: &'a PropertyType, refs: &mut Vec<&'a ComponentRef>) {
    match ty {
        PropertyType::Component { reference } => refs.push(reference),
        PropertyType::Array { item } => collect_into(item, refs),
        PropertyType::Union { items } => {
            for item in items {
                collect_into(item, refs);
            }
        }
        PropertyType::Boolean
        | PropertyType::Number
        | PropertyType::String
        | PropertyType::Function { .. }
        | PropertyType::SharedTypeRef { .. } => {}
    }
}

/// Properties of one component split by placement, plus the references
/// the children-placed ones contribute to the children type.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    pub attributes: Vec<&'a Property>,
    pub children: Vec<&'a Property>,
    pub harvested_refs: Vec<&'a ComponentRef>,
}

impl<'a> Partition<'a> {
    pub fn of(component: &'a StandardComponent) -> Result<Self> {
        let mut partition = Partition::default();
        for property in &component.props {
            match classify(&property.ty)? {
                Placement::Attribute => partition.attributes.push(property),
                Placement::Children => {
                    partition.harvested_refs.extend(collect_component_refs(&property.ty));
                    partition.children.push(property);
                }
            }
        }
        log::trace!(
            "{}: {} attribute properties, {} children properties, {} harvested refs",
            component.name,
            partition.attributes.len(),
            partition.children.len(),
            partition.harvested_refs.len()
        );
        Ok(partition)
    }

    pub fn is_attribute(&self, property: &Property) -> bool {
        self.attributes.iter().any(|attribute| std::ptr::eq(*attribute, property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Children, Optional};

    fn component_type(name: &str) -> PropertyType {
        PropertyType::Component {
            reference: ComponentRef::new(name),
        }
    }

    fn property(name: &str, ty: PropertyType) -> Property {
        Property {
            name: name.to_string(),
            ty,
            optional: Optional::No,
        }
    }

    #[test]
    fn test_scalar_placements() {
        assert_eq!(classify(&PropertyType::Boolean).unwrap(), Placement::Attribute);
        assert_eq!(classify(&PropertyType::Function { arguments: vec![] }).unwrap(), Placement::Attribute);
        assert_eq!(
            classify(&PropertyType::SharedTypeRef { name: "Icons".into() }).unwrap(),
            Placement::Attribute
        );
        assert_eq!(classify(&component_type("A")).unwrap(), Placement::Children);
    }

    #[test]
    fn test_array_defers_to_item() {
        let array = PropertyType::Array {
            item: Box::new(component_type("A")),
        };
        assert_eq!(classify(&array).unwrap(), Placement::Children);
        let strings = PropertyType::Array {
            item: Box::new(PropertyType::String),
        };
        assert_eq!(classify(&strings).unwrap(), Placement::Attribute);
    }

    #[test]
    fn test_union_requires_agreement() {
        let agreeing = PropertyType::Union {
            items: vec![component_type("A"), component_type("B")],
        };
        assert_eq!(classify(&agreeing).unwrap(), Placement::Children);

        let mixed = PropertyType::Union {
            items: vec![PropertyType::String, component_type("A")],
        };
        assert!(matches!(classify(&mixed), Err(GeneratorError::MixedUnion { .. })));

        let empty = PropertyType::Union { items: vec![] };
        assert!(matches!(classify(&empty), Err(GeneratorError::EmptyUnion { .. })));
    }

    #[test]
    fn test_collect_through_nesting() {
        let ty = PropertyType::Union {
            items: vec![
                PropertyType::Array {
                    item: Box::new(component_type("A")),
                },
                component_type("B"),
            ],
        };
        let names: Vec<&str> = collect_component_refs(&ty)
            .into_iter()
            .map(|reference| reference.component_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(collect_component_refs(&PropertyType::Function { arguments: vec![] }).is_empty());
    }

    #[test]
    fn test_partition() {
        let component = StandardComponent {
            name: "Detail".into(),
            internal_name: "detail".into(),
            props: vec![
                property("isLoading", PropertyType::Boolean),
                property("metadata", component_type("Metadata")),
                property("title", PropertyType::String),
            ],
            children: Children::None,
        };
        let partition = Partition::of(&component).unwrap();
        assert_eq!(partition.attributes.len(), 2);
        assert_eq!(partition.children[0].name, "metadata");
        assert_eq!(partition.harvested_refs, vec![&ComponentRef::new("Metadata")]);
        assert!(partition.is_attribute(&component.props[0]));
        assert!(!partition.is_attribute(&component.props[1]));
    }
}
