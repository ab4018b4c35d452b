//! Error types for the binding generator

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid component model at {path}: {message}")]
    InvalidModel { path: String, message: String },

    #[error("Component model has no root component")]
    MissingRoot,

    #[error("Component model has {count} root components, expected exactly one")]
    DuplicateRoot { count: usize },

    #[error("Component '{name}' is declared more than once")]
    DuplicateComponent { name: String },

    #[error("Unknown component '{name}' referenced by {referenced_by}")]
    UnknownComponent { name: String, referenced_by: String },

    #[error("Unknown shared type '{name}' referenced by {referenced_by}")]
    UnknownSharedType { name: String, referenced_by: String },

    #[error("Union members disagree on attribute/children placement: {node}")]
    MixedUnion { node: String },

    #[error("Union has no members: {node}")]
    EmptyUnion { node: String },

    #[error("Optional mode '{optional}' is not supported on function argument: {argument}")]
    UnsupportedArgumentOptional { argument: String, optional: String },

    #[error("Cannot construct children type for '{component}': policy is none and no component properties exist")]
    EmptyChildren { component: String },

    #[error("Invalid identifier '{name}' in {context}")]
    InvalidIdentifier { name: String, context: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Generated file is out of date: {path}")]
    Outdated { path: String },
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    pub fn invalid_model(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn mixed_union<T: Serialize>(node: &T) -> Self {
        Self::MixedUnion {
            node: describe_node(node),
        }
    }

    pub fn empty_union<T: Serialize>(node: &T) -> Self {
        Self::EmptyUnion {
            node: describe_node(node),
        }
    }

    pub fn unsupported_argument<T: Serialize>(argument: &T, optional: impl Into<String>) -> Self {
        Self::UnsupportedArgumentOptional {
            argument: describe_node(argument),
            optional: optional.into(),
        }
    }

    pub fn empty_children(component: impl Into<String>) -> Self {
        Self::EmptyChildren {
            component: component.into(),
        }
    }

    pub fn unknown_component(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnknownComponent {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn unknown_shared_type(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnknownSharedType {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn invalid_identifier(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            context: context.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for failures caused by the shape of the component model itself
    pub fn is_model_error(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::FileNotFound { .. } | Self::InvalidConfig { .. } | Self::Outdated { .. }
        )
    }
}

/// Schema nodes are reported back in their JSON form
fn describe_node<T: Serialize>(node: &T) -> String {
    serde_json::to_string(node).unwrap_or_else(|e| format!("<unprintable node: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_union_carries_node() {
        let node = json!({ "type": "union", "items": [{ "type": "string" }] });
        let err = GeneratorError::mixed_union(&node);
        let message = err.to_string();
        assert!(message.contains(r#""type":"union""#), "{}", message);
        assert!(err.is_model_error());
    }

    #[test]
    fn test_io_is_not_model_error() {
        let err = GeneratorError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!err.is_model_error());
        assert!(err.to_string().starts_with("IO error"));
    }
}
