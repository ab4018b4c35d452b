//! Per-component props interface and forwarding function
//!
//! Each standard component becomes a function value that renders exactly
//! one low-level element at `<namespace:internalName>`. Attribute-placed
//! properties are forwarded as attributes; children-placed ones are
//! appended to the nested content ahead of the caller's own children.

use crate::assembler::{FC, REACT_NODE};
use crate::ast::{Expr, JsxAttribute, JsxElement, Keyword, Parameter, PropertySignature, Stmt, TypeNode};
use crate::children::children_type;
use crate::classify::Partition;
use crate::error::Result;
use crate::model::{Children, StandardComponent};
use crate::type_renderer::render_type;
use crate::GeneratorOptions;

const PROPS: &str = "props";
const CHILDREN: &str = "children";

/// Which property list is being built for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Attribute shape registered for the low-level element: attribute
    /// properties only, children widened by harvested references
    Intrinsic,
    /// Public props interface: every property, declared children only
    Props,
}

/// Property signatures of `component`, children slot first
pub fn property_signatures(
    component: &StandardComponent,
    partition: &Partition<'_>,
    shape: Shape,
) -> Result<Vec<PropertySignature>> {
    let mut signatures = Vec::with_capacity(component.props.len() + 1);

    match shape {
        Shape::Intrinsic => {
            let children = children_type(&component.name, &component.children, &partition.harvested_refs)?;
            signatures.push(PropertySignature::new(CHILDREN, true, children));
        }
        Shape::Props => {
            if component.children != Children::None {
                let children = children_type(&component.name, &component.children, &[])?;
                signatures.push(PropertySignature::new(CHILDREN, true, children));
            }
        }
    }

    for property in &component.props {
        if shape == Shape::Intrinsic && !partition.is_attribute(property) {
            continue;
        }
        signatures.push(PropertySignature::new(
            &property.name,
            property.optional.is_optional(),
            render_type(&property.ty, property.optional)?,
        ));
    }

    Ok(signatures)
}

/// Statements emitted for one component, with counts for statistics
#[derive(Debug, Clone)]
pub struct EmittedComponent {
    pub statements: Vec<Stmt>,
    pub attribute_count: usize,
    pub children_count: usize,
    pub member_count: usize,
}

pub fn emit_component(component: &StandardComponent, options: &GeneratorOptions) -> Result<EmittedComponent> {
    let partition = Partition::of(component)?;
    let props_name = format!("{}Props", component.name);
    let interface_members = property_signatures(component, &partition, Shape::Props)?;
    let takes_props = !interface_members.is_empty();

    let mut statements = Vec::new();
    if takes_props {
        statements.push(Stmt::Interface {
            export: true,
            name: props_name.clone(),
            members: interface_members,
        });
    }

    let props = || Expr::ident(PROPS);

    let attributes = partition
        .attributes
        .iter()
        .map(|property| JsxAttribute {
            name: property.name.clone(),
            value: Expr::member(props(), &property.name),
        })
        .collect();

    let mut content: Vec<Expr> = partition
        .children
        .iter()
        .map(|property| Expr::cast(Expr::member(props(), &property.name), TypeNode::keyword(Keyword::Any)))
        .collect();
    if component.children != Children::None {
        content.push(Expr::member(props(), CHILDREN));
    }

    let fc_type = if takes_props {
        TypeNode::generic(FC, vec![TypeNode::reference(&props_name)])
    } else {
        TypeNode::reference(FC)
    };

    let members = component.children.members().map(|members| members.merged()).unwrap_or_default();
    let value_type = if matches!(component.children, Children::Members(_) | Children::StringOrMembers(_)) {
        TypeNode::Intersection(vec![
            fc_type,
            TypeNode::Literal(
                members
                    .iter()
                    .map(|(name, reference)| {
                        PropertySignature::new(*name, false, TypeNode::query(&reference.component_name))
                    })
                    .collect(),
            ),
        ])
    } else {
        fc_type
    };

    let params = if takes_props {
        vec![Parameter::new(PROPS, TypeNode::reference(&props_name))]
    } else {
        Vec::new()
    };

    statements.push(Stmt::Const {
        export: true,
        name: component.name.clone(),
        ty: Some(value_type),
        init: Expr::Arrow {
            params,
            ret: Some(TypeNode::reference(REACT_NODE)),
            body: vec![Stmt::Return(Expr::Jsx(JsxElement {
                namespace: options.element_namespace.clone(),
                name: component.internal_name.clone(),
                attributes,
                children: content,
            }))],
        },
    });

    for (name, reference) in &members {
        statements.push(Stmt::Assign {
            target: Expr::member(Expr::ident(&component.name), *name),
            value: Expr::ident(&reference.component_name),
        });
    }

    Ok(EmittedComponent {
        statements,
        attribute_count: partition.attributes.len(),
        children_count: partition.children.len(),
        member_count: members.len(),
    })
}
