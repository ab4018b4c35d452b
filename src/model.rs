//! Component model: the declarative schema the generator consumes
//!
//! The model is a JSON array of components. Exactly one of them is the
//! root aggregator carrying shared type declarations; every other entry
//! describes one emittable component. All tagged unions use a `type`
//! discriminator, so an unknown tag is rejected while loading.

use crate::error::{GeneratorError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern"));

// JSX namespaced tag names may also contain dashes
static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$-]*$").expect("tag name pattern"));

// Names that cannot start a `const`, `interface`, `enum` or `type` declaration
const RESERVED_WORDS: &[&str] = &[
    "any", "bigint", "boolean", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "never", "new",
    "null", "number", "object", "package", "private", "protected", "public", "return", "static",
    "string", "super", "switch", "symbol", "this", "throw", "true", "try", "typeof", "undefined",
    "unknown", "var", "void", "while", "with", "yield",
];

/// Ordered list of components, loaded once per run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentModel {
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Root {
        #[serde(rename = "sharedTypes", default)]
        shared_types: IndexMap<String, SharedType>,
    },
    Standard(StandardComponent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardComponent {
    pub name: String,
    #[serde(rename = "internalName")]
    pub internal_name: String,
    #[serde(default)]
    pub props: Vec<Property>,
    pub children: Children,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub optional: Optional,
}

/// Function arguments share the property shape but accept a narrower optional set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    pub optional: Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optional {
    No,
    Yes,
    /// May be omitted and may also be explicitly `null`
    YesButComplicated,
}

impl Optional {
    pub fn as_str(&self) -> &'static str {
        match self {
            Optional::No => "no",
            Optional::Yes => "yes",
            Optional::YesButComplicated => "yes_but_complicated",
        }
    }

    pub fn is_optional(&self) -> bool {
        !matches!(self, Optional::No)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyType {
    Boolean,
    Number,
    String,
    Function {
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    Component {
        reference: ComponentRef,
    },
    Array {
        item: Box<PropertyType>,
    },
    SharedTypeRef {
        name: String,
    },
    Union {
        items: Vec<PropertyType>,
    },
}

impl PropertyType {
    /// Visit this node and every nested type, depth first, in declaration order
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a PropertyType)) {
        visit(self);
        match self {
            PropertyType::Function { arguments } => {
                for argument in arguments {
                    argument.ty.walk(visit);
                }
            }
            PropertyType::Array { item } => item.walk(visit),
            PropertyType::Union { items } => {
                for item in items {
                    item.walk(visit);
                }
            }
            PropertyType::Boolean
            | PropertyType::Number
            | PropertyType::String
            | PropertyType::Component { .. }
            | PropertyType::SharedTypeRef { .. } => {}
        }
    }
}

/// Name-based pointer to a standard component, used only in type positions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    #[serde(rename = "componentName")]
    pub component_name: String,
}

impl ComponentRef {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Children {
    None,
    String,
    Members(Members),
    StringOrMembers(Members),
}

impl Children {
    pub fn members(&self) -> Option<&Members> {
        match self {
            Children::Members(members) | Children::StringOrMembers(members) => Some(members),
            Children::None | Children::String => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Children::None => "none",
            Children::String => "string",
            Children::Members(_) => "members",
            Children::StringOrMembers(_) => "string_or_members",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Members {
    #[serde(default)]
    pub ordered_members: IndexMap<String, ComponentRef>,
    #[serde(default)]
    pub per_type_members: IndexMap<String, ComponentRef>,
}

impl Members {
    /// Ordered members followed by keyed-by-type members.
    /// A name present in both keeps its first position and the keyed-by-type target.
    pub fn merged(&self) -> IndexMap<&str, &ComponentRef> {
        let mut merged = IndexMap::with_capacity(self.ordered_members.len() + self.per_type_members.len());
        for (name, reference) in self.ordered_members.iter().chain(&self.per_type_members) {
            merged.insert(name.as_str(), reference);
        }
        merged
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SharedType {
    Enum { items: Vec<String> },
    Object { items: IndexMap<String, PropertyType> },
    Union { items: Vec<PropertyType> },
}

impl ComponentModel {
    /// Parse a model, reporting the JSON path of the first offending node
    pub fn from_json(source: &str) -> Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(source);
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            GeneratorError::invalid_model(path, err.into_inner().to_string())
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| GeneratorError::FileNotFound {
            path: format!("{}: {}", path.display(), e),
        })?;
        log::debug!("Read component model from {} ({} bytes)", path.display(), source.len());
        Self::from_json(&source)
    }

    /// Shared types of the single root component
    pub fn root(&self) -> Result<&IndexMap<String, SharedType>> {
        let mut roots = self.components.iter().filter_map(|component| match component {
            Component::Root { shared_types } => Some(shared_types),
            Component::Standard(_) => None,
        });

        let root = roots.next().ok_or(GeneratorError::MissingRoot)?;
        let extra = roots.count();
        if extra > 0 {
            return Err(GeneratorError::DuplicateRoot { count: extra + 1 });
        }
        Ok(root)
    }

    pub fn standard_components(&self) -> impl Iterator<Item = &StandardComponent> {
        self.components.iter().filter_map(|component| match component {
            Component::Standard(standard) => Some(standard),
            Component::Root { .. } => None,
        })
    }

    /// Structural checks that must hold before anything is emitted
    pub fn validate(&self) -> Result<()> {
        let shared_types = self.root()?;

        let mut names = HashSet::new();
        for component in self.standard_components() {
            if !names.insert(component.name.as_str()) {
                return Err(GeneratorError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
        }

        for (name, shared_type) in shared_types {
            check_declaration_name(name, "shared type name")?;
            let owner = format!("shared type '{}'", name);
            match shared_type {
                SharedType::Enum { items } => {
                    for item in items {
                        check_identifier(item, &format!("enum '{}'", name))?;
                    }
                }
                SharedType::Object { items } => {
                    for (field, ty) in items {
                        check_identifier(field, &owner)?;
                        self.check_type(ty, shared_types, &names, &owner)?;
                    }
                }
                SharedType::Union { items } => {
                    if items.is_empty() {
                        return Err(GeneratorError::empty_union(shared_type));
                    }
                    for ty in items {
                        self.check_type(ty, shared_types, &names, &owner)?;
                    }
                }
            }
        }

        for component in self.standard_components() {
            check_declaration_name(&component.name, "component name")?;
            if !TAG_NAME.is_match(&component.internal_name) {
                return Err(GeneratorError::invalid_identifier(
                    &component.internal_name,
                    format!("internal name of '{}'", component.name),
                ));
            }

            for property in &component.props {
                let owner = format!("{}.{}", component.name, property.name);
                check_identifier(&property.name, &format!("component '{}'", component.name))?;
                self.check_type(&property.ty, shared_types, &names, &owner)?;
            }

            if let Some(members) = component.children.members() {
                for (member, reference) in members.merged() {
                    let owner = format!("{}.{}", component.name, member);
                    check_identifier(member, &format!("members of '{}'", component.name))?;
                    if !names.contains(reference.component_name.as_str()) {
                        return Err(GeneratorError::unknown_component(&reference.component_name, owner));
                    }
                }
            }
        }

        Ok(())
    }

    fn check_type(
        &self,
        ty: &PropertyType,
        shared_types: &IndexMap<String, SharedType>,
        components: &HashSet<&str>,
        owner: &str,
    ) -> Result<()> {
        let mut failure = None;
        ty.walk(&mut |node| {
            if failure.is_some() {
                return;
            }
            failure = match node {
                PropertyType::Component { reference }
                    if !components.contains(reference.component_name.as_str()) =>
                {
                    Some(GeneratorError::unknown_component(&reference.component_name, owner))
                }
                PropertyType::Union { items } if items.is_empty() => Some(GeneratorError::empty_union(node)),
                PropertyType::SharedTypeRef { name } if !shared_types.contains_key(name) => {
                    Some(GeneratorError::unknown_shared_type(name, owner))
                }
                PropertyType::Function { arguments } => arguments
                    .iter()
                    .find(|argument| !IDENTIFIER.is_match(&argument.name))
                    .map(|argument| GeneratorError::invalid_identifier(&argument.name, format!("arguments of {}", owner))),
                _ => None,
            };
        });
        failure.map_or(Ok(()), Err)
    }
}

fn check_identifier(name: &str, context: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(GeneratorError::invalid_identifier(name, context))
    }
}

fn check_declaration_name(name: &str, context: &str) -> Result<()> {
    check_identifier(name, context)?;
    if RESERVED_WORDS.contains(&name) {
        return Err(GeneratorError::invalid_identifier(name, format!("{} (reserved word)", context)));
    }
    Ok(())
}
