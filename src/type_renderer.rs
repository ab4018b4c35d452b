//! Property type rendering
//!
//! Converts one schema type into a TypeScript type expression. The
//! property's own optional mode is applied after the base rendering:
//! `yes_but_complicated` adds an explicit `| null`, `yes` only makes the
//! field omissible and never changes the type itself.

use crate::assembler::ELEMENT_COMPONENT;
use crate::ast::{Keyword, Parameter, TypeNode};
use crate::error::{GeneratorError, Result};
use crate::model::{Argument, Optional, PropertyType};

pub fn render_type(ty: &PropertyType, optional: Optional) -> Result<TypeNode> {
    let base = render_base(ty)?;

    Ok(match optional {
        Optional::YesButComplicated => TypeNode::nullable(base),
        Optional::No | Optional::Yes => base,
    })
}

fn render_base(ty: &PropertyType) -> Result<TypeNode> {
    let node = match ty {
        PropertyType::Boolean => TypeNode::keyword(Keyword::Boolean),
        PropertyType::Number => TypeNode::keyword(Keyword::Number),
        PropertyType::String => TypeNode::keyword(Keyword::String),
        PropertyType::Function { arguments } => TypeNode::Function {
            params: arguments.iter().map(render_argument).collect::<Result<_>>()?,
            ret: Box::new(TypeNode::keyword(Keyword::Void)),
        },
        PropertyType::Component { reference } => TypeNode::generic(
            ELEMENT_COMPONENT,
            vec![TypeNode::query(&reference.component_name)],
        ),
        PropertyType::Array { item } => TypeNode::array(render_type(item, Optional::No)?),
        PropertyType::SharedTypeRef { name } => TypeNode::reference(name),
        PropertyType::Union { items } if items.is_empty() => return Err(GeneratorError::empty_union(ty)),
        PropertyType::Union { items } => TypeNode::Union(
            items
                .iter()
                .map(|item| render_type(item, Optional::No))
                .collect::<Result<_>>()?,
        ),
    };
    Ok(node)
}

/// Optional arguments stay positional and accept `null` instead
fn render_argument(argument: &Argument) -> Result<Parameter> {
    let ty = match argument.optional {
        Optional::No => render_type(&argument.ty, Optional::No)?,
        Optional::Yes => TypeNode::nullable(render_type(&argument.ty, Optional::Yes)?),
        Optional::YesButComplicated => {
            return Err(GeneratorError::unsupported_argument(argument, argument.optional.as_str()));
        }
    };
    Ok(Parameter::new(&argument.name, ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentRef;
    use crate::printer::print_type;

    fn rendered(ty: &PropertyType, optional: Optional) -> String {
        print_type(&render_type(ty, optional).unwrap())
    }

    fn argument(name: &str, ty: PropertyType, optional: Optional) -> Argument {
        Argument {
            name: name.to_string(),
            ty,
            optional,
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(rendered(&PropertyType::Boolean, Optional::No), "boolean");
        assert_eq!(rendered(&PropertyType::Number, Optional::No), "number");
        assert_eq!(rendered(&PropertyType::String, Optional::Yes), "string");
    }

    #[test]
    fn test_complicated_optional_adds_null() {
        let union = PropertyType::Union {
            items: vec![PropertyType::String, PropertyType::Number],
        };
        for ty in [PropertyType::Boolean, union] {
            let base = rendered(&ty, Optional::No);
            assert_eq!(rendered(&ty, Optional::Yes), base);
            let complicated = rendered(&ty, Optional::YesButComplicated);
            assert_ne!(complicated, base);
            assert!(complicated.ends_with(" | null"), "{}", complicated);
        }
        assert_eq!(
            rendered(
                &PropertyType::Union {
                    items: vec![PropertyType::String, PropertyType::Number]
                },
                Optional::YesButComplicated
            ),
            "(string | number) | null"
        );
    }

    #[test]
    fn test_union_is_union_of_members_in_order() {
        let items = vec![
            PropertyType::Number,
            PropertyType::SharedTypeRef { name: "Icons".into() },
            PropertyType::Array {
                item: Box::new(PropertyType::String),
            },
        ];
        let expected = items
            .iter()
            .map(|item| rendered(item, Optional::No))
            .collect::<Vec<_>>()
            .join(" | ");
        assert_eq!(rendered(&PropertyType::Union { items }, Optional::No), expected);
        assert_eq!(expected, "number | Icons | string[]");
    }

    #[test]
    fn test_component_and_array() {
        let component = PropertyType::Component {
            reference: ComponentRef::new("ActionPanel"),
        };
        assert_eq!(rendered(&component, Optional::No), "ElementComponent<typeof ActionPanel>");
        let array = PropertyType::Array {
            item: Box::new(component),
        };
        assert_eq!(rendered(&array, Optional::No), "ElementComponent<typeof ActionPanel>[]");
    }

    #[test]
    fn test_function_arguments() {
        let ty = PropertyType::Function {
            arguments: vec![
                argument("id", PropertyType::String, Optional::No),
                argument("value", PropertyType::Number, Optional::Yes),
            ],
        };
        assert_eq!(rendered(&ty, Optional::No), "(id: string, value: number | null) => void");
        assert_eq!(
            rendered(&ty, Optional::YesButComplicated),
            "((id: string, value: number | null) => void) | null"
        );
    }

    #[test]
    fn test_complicated_function_argument_rejected() {
        let ty = PropertyType::Function {
            arguments: vec![argument("id", PropertyType::String, Optional::YesButComplicated)],
        };
        let err = render_type(&ty, Optional::No).unwrap_err();
        match err {
            GeneratorError::UnsupportedArgumentOptional { argument, optional } => {
                assert_eq!(optional, "yes_but_complicated");
                assert!(argument.contains("\"id\""), "{}", argument);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_union_rejected() {
        let empty = PropertyType::Union { items: vec![] };
        for optional in [Optional::No, Optional::YesButComplicated] {
            assert!(matches!(render_type(&empty, optional), Err(GeneratorError::EmptyUnion { .. })));
        }

        let nested = PropertyType::Array {
            item: Box::new(PropertyType::Union { items: vec![] }),
        };
        match render_type(&nested, Optional::No) {
            Err(GeneratorError::EmptyUnion { node }) => assert!(node.contains(r#""items":[]"#), "{}", node),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
