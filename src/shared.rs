//! Shared type declarations from the root component

use crate::ast::{PropertySignature, Stmt, TypeNode};
use crate::error::{GeneratorError, Result};
use crate::model::{ComponentModel, Optional, SharedType};
use crate::type_renderer::render_type;

/// One exported declaration per shared type, in declaration order
pub fn shared_declarations(model: &ComponentModel) -> Result<Vec<Stmt>> {
    let shared_types = model.root()?;

    shared_types
        .iter()
        .map(|(name, shared_type)| {
            log::trace!("Emitting shared type {}", name);
            shared_declaration(name, shared_type)
        })
        .collect()
}

fn shared_declaration(name: &str, shared_type: &SharedType) -> Result<Stmt> {
    let stmt = match shared_type {
        SharedType::Enum { items } => Stmt::Enum {
            export: true,
            name: name.to_string(),
            members: items.iter().map(|item| (item.clone(), item.clone())).collect(),
        },
        SharedType::Object { items } => {
            let members = items
                .iter()
                .map(|(field, ty)| Ok(PropertySignature::new(field, false, render_type(ty, Optional::No)?)))
                .collect::<Result<Vec<_>>>()?;
            Stmt::TypeAlias {
                export: true,
                name: name.to_string(),
                params: Vec::new(),
                ty: TypeNode::Literal(members),
            }
        }
        SharedType::Union { items } if items.is_empty() => return Err(GeneratorError::empty_union(shared_type)),
        SharedType::Union { items } => Stmt::TypeAlias {
            export: true,
            name: name.to_string(),
            params: Vec::new(),
            ty: TypeNode::Union(
                items
                    .iter()
                    .map(|ty| render_type(ty, Optional::No))
                    .collect::<Result<_>>()?,
            ),
        },
    };
    Ok(stmt)
}
