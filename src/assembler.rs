//! Source assembly
//!
//! Concatenates the generated pieces in a fixed order:
//!
//! 1. imports
//! 2. helper type aliases
//! 3. intrinsic element registry
//! 4. shared types declared by the root component
//! 5. one props interface and function value per component, in model order

use crate::ast::{Keyword, SourceFile, Stmt, TypeNode, TypeParameter};
use crate::component::emit_component;
use crate::error::Result;
use crate::intrinsic::intrinsic_registry;
use crate::model::ComponentModel;
use crate::shared::shared_declarations;
use crate::{GenerationStats, GeneratorOptions};
use std::fs;
use std::path::Path;

pub const FC: &str = "FC";
pub const JSX_ELEMENT_CONSTRUCTOR: &str = "JSXElementConstructor";
pub const REACT_ELEMENT: &str = "ReactElement";
pub const REACT_NODE: &str = "ReactNode";

pub const ELEMENT_PARAMS: &str = "ElementParams";
pub const ELEMENT: &str = "Element";
pub const STRING_NODE: &str = "StringNode";
pub const EMPTY_NODE: &str = "EmptyNode";
pub const ELEMENT_COMPONENT: &str = "ElementComponent";
pub const STRING_COMPONENT: &str = "StringComponent";
pub const STRING_OR_ELEMENT_COMPONENT: &str = "StringOrElementComponent";

const COMP: &str = "Comp";
const ITERABLE: &str = "Iterable";

/// Build the complete syntax tree for `model`
pub fn assemble(model: &ComponentModel, options: &GeneratorOptions) -> Result<(SourceFile, GenerationStats)> {
    let mut file = SourceFile::new();
    let mut stats = GenerationStats::default();

    file.push(imports(options));
    file.extend(helper_declarations());

    log::debug!("Emitting intrinsic element registry...");
    file.push(intrinsic_registry(model, options)?);

    log::debug!("Emitting shared types...");
    let shared = shared_declarations(model)?;
    stats.shared_type_count = shared.len();
    file.extend(shared);

    log::debug!("Emitting components...");
    for component in model.standard_components() {
        log::trace!("Emitting component {} ({})", component.name, component.internal_name);
        let emitted = emit_component(component, options)?;
        stats.component_count += 1;
        stats.attribute_property_count += emitted.attribute_count;
        stats.children_property_count += emitted.children_count;
        stats.member_count += emitted.member_count;
        file.extend(emitted.statements);
    }

    Ok((file, stats))
}

fn imports(options: &GeneratorOptions) -> Stmt {
    Stmt::Import {
        names: [FC, JSX_ELEMENT_CONSTRUCTOR, REACT_ELEMENT, REACT_NODE]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        source: options.import_source.clone(),
    }
}

fn comp() -> TypeNode {
    TypeNode::reference(COMP)
}

/// `<Comp extends FC<any>>`
fn comp_param() -> Vec<TypeParameter> {
    vec![TypeParameter {
        name: COMP.to_string(),
        constraint: Some(TypeNode::generic(FC, vec![TypeNode::keyword(Keyword::Any)])),
    }]
}

fn alias(name: &str, params: Vec<TypeParameter>, ty: TypeNode) -> Stmt {
    Stmt::TypeAlias {
        export: true,
        name: name.to_string(),
        params,
        ty,
    }
}

fn iterable_of(name: &str, args: Vec<TypeNode>) -> TypeNode {
    TypeNode::generic(ITERABLE, vec![TypeNode::generic(name, args)])
}

/// Fixed aliases shared by every generated module, independent of the model
pub fn helper_declarations() -> Vec<Stmt> {
    let element_params = || TypeNode::generic(ELEMENT_PARAMS, vec![comp()]);

    vec![
        alias(
            ELEMENT_PARAMS,
            comp_param(),
            TypeNode::Conditional {
                check: Box::new(comp()),
                extends: Box::new(TypeNode::generic(FC, vec![TypeNode::Infer("Params".to_string())])),
                true_type: Box::new(TypeNode::reference("Params")),
                false_type: Box::new(TypeNode::keyword(Keyword::Never)),
            },
        ),
        alias(
            ELEMENT,
            comp_param(),
            TypeNode::generic(
                REACT_ELEMENT,
                vec![
                    element_params(),
                    TypeNode::generic(JSX_ELEMENT_CONSTRUCTOR, vec![element_params()]),
                ],
            ),
        ),
        alias(
            STRING_NODE,
            Vec::new(),
            TypeNode::Union(vec![TypeNode::keyword(Keyword::String), TypeNode::keyword(Keyword::Number)]),
        ),
        alias(
            EMPTY_NODE,
            Vec::new(),
            TypeNode::Union(vec![
                TypeNode::keyword(Keyword::Boolean),
                TypeNode::Null,
                TypeNode::keyword(Keyword::Undefined),
            ]),
        ),
        alias(
            ELEMENT_COMPONENT,
            comp_param(),
            TypeNode::Union(vec![
                TypeNode::generic(ELEMENT, vec![comp()]),
                TypeNode::reference(EMPTY_NODE),
                iterable_of(ELEMENT_COMPONENT, vec![comp()]),
            ]),
        ),
        alias(
            STRING_COMPONENT,
            Vec::new(),
            TypeNode::Union(vec![
                TypeNode::reference(STRING_NODE),
                TypeNode::reference(EMPTY_NODE),
                iterable_of(STRING_COMPONENT, Vec::new()),
            ]),
        ),
        alias(
            STRING_OR_ELEMENT_COMPONENT,
            comp_param(),
            TypeNode::Union(vec![
                TypeNode::reference(STRING_NODE),
                TypeNode::reference(EMPTY_NODE),
                TypeNode::generic(ELEMENT, vec![comp()]),
                iterable_of(STRING_OR_ELEMENT_COMPONENT, vec![comp()]),
            ]),
        ),
    ]
}

/// Write generated text, creating missing parent directories
pub fn write_output(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            log::debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, source)?;
    Ok(())
}
