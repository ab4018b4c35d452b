//! Intrinsic element registry
//!
//! Declares every low-level element tag in the global `JSX` namespace.
//! A component whose tag is missing here cannot be constructed at the
//! low level, whatever its props interface says.

use crate::ast::{PropertySignature, Stmt, TypeNode};
use crate::classify::Partition;
use crate::component::{property_signatures, Shape};
use crate::error::Result;
use crate::model::ComponentModel;
use crate::GeneratorOptions;

const INTERNAL_MARKER: &str = "*@internal";

pub fn intrinsic_registry(model: &ComponentModel, options: &GeneratorOptions) -> Result<Stmt> {
    let elements = model
        .standard_components()
        .map(|component| {
            let partition = Partition::of(component)?;
            let shape = property_signatures(component, &partition, Shape::Intrinsic)?;
            Ok(PropertySignature::computed(
                format!("{}:{}", options.element_namespace, component.internal_name),
                TypeNode::Literal(shape),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Registered {} intrinsic elements", elements.len());

    let registry = Stmt::DeclareGlobal(vec![Stmt::Namespace {
        name: "JSX".to_string(),
        body: vec![Stmt::Interface {
            export: false,
            name: "IntrinsicElements".to_string(),
            members: elements,
        }],
    }]);

    // `@internal` lets declaration bundlers strip the augmentation from public typings
    if options.mark_internal {
        Ok(Stmt::Commented {
            comment: INTERNAL_MARKER.to_string(),
            stmt: Box::new(registry),
        })
    } else {
        Ok(registry)
    }
}
