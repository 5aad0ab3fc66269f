//! Fully parenthesized dump of a document, for structural diffing in tests.
//!
//! Every node becomes `(tag field...)` with fields in declaration order. Names are
//! bare atoms, absent optionals are `nil`, strings are quoted like printer strings.

use std::fmt;

use crate::ast::{
    Definition, DirectiveDefinition, DirectiveLocation, Document, EnumValueDefinition,
    FieldDefinition, InputValueDefinition, OperationType, Selection, Type, VariableDefinition,
};
use crate::literal;
use crate::value::{Argument, Directive, Value, ValueMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Sexp {
    List(Vec<Sexp>),
    Atom(String),
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Nil,
    Variable(String),
}

impl Sexp {
    fn atom(text: impl Into<String>) -> Self {
        Sexp::Atom(text.into())
    }

    fn tagged(tag: &str, fields: impl IntoIterator<Item = Sexp>) -> Self {
        let mut items = vec![Sexp::atom(tag)];
        items.extend(fields);
        Sexp::List(items)
    }

    fn list<'a, T: ToSexp + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        Sexp::List(items.into_iter().map(ToSexp::to_sexp).collect())
    }

    fn atoms<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        Sexp::List(names.into_iter().map(|n| Sexp::atom(n.as_str())).collect())
    }

    fn optional_string(value: Option<&str>) -> Self {
        value.map_or(Sexp::Nil, |s| Sexp::String(s.to_owned()))
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Sexp::Atom(atom) => f.write_str(atom),
            Sexp::String(s) => f.write_str(&literal::quoted(s)),
            Sexp::Int(i) => write!(f, "{i}"),
            Sexp::Float(x) => f.write_str(&literal::format_float(*x)),
            Sexp::Boolean(b) => write!(f, "{b}"),
            Sexp::Nil => f.write_str("nil"),
            Sexp::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// Conversion of a node into its s-expression.
pub trait ToSexp {
    fn to_sexp(&self) -> Sexp;
}

/// Renders a whole document as s-expression text.
pub fn to_sexp(document: &Document<'_>) -> String {
    document.to_sexp().to_string()
}

impl ToSexp for Document<'_> {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged("doc", [Sexp::list(&self.definitions)])
    }
}

impl ToSexp for Definition {
    fn to_sexp(&self) -> Sexp {
        match self {
            Definition::Operation(op) => Sexp::tagged(
                "op",
                [
                    op.name.as_deref().map_or(Sexp::Nil, Sexp::atom),
                    Sexp::list(&op.variables),
                    Sexp::list(&op.directives),
                    op.operation.to_sexp(),
                    Sexp::list(&op.selections),
                ],
            ),
            Definition::Fragment(frag) => Sexp::tagged(
                "frag",
                [
                    Sexp::atom(frag.name.as_str()),
                    Sexp::atom(frag.type_condition.as_str()),
                    Sexp::list(&frag.directives),
                    Sexp::list(&frag.selections),
                ],
            ),
            Definition::Schema(schema) => Sexp::tagged(
                "schema",
                [
                    Sexp::optional_string(schema.description.as_deref()),
                    Sexp::Boolean(schema.extend),
                    Sexp::list(&schema.directives),
                    Sexp::List(
                        schema
                            .operation_types
                            .iter()
                            .map(|(op, name)| Sexp::List(vec![op.to_sexp(), Sexp::atom(name.as_str())]))
                            .collect(),
                    ),
                ],
            ),
            Definition::Scalar(scalar) => Sexp::tagged(
                "scalar",
                [
                    Sexp::optional_string(scalar.description.as_deref()),
                    Sexp::Boolean(scalar.extend),
                    Sexp::atom(scalar.name.as_str()),
                    Sexp::list(&scalar.directives),
                ],
            ),
            Definition::Object(object) => Sexp::tagged(
                "type",
                [
                    Sexp::optional_string(object.description.as_deref()),
                    Sexp::Boolean(object.extend),
                    Sexp::atom(object.name.as_str()),
                    Sexp::atoms(&object.interfaces),
                    Sexp::list(&object.directives),
                    Sexp::list(&object.fields),
                ],
            ),
            Definition::Interface(interface) => Sexp::tagged(
                "interface",
                [
                    Sexp::optional_string(interface.description.as_deref()),
                    Sexp::Boolean(interface.extend),
                    Sexp::atom(interface.name.as_str()),
                    Sexp::atoms(&interface.interfaces),
                    Sexp::list(&interface.directives),
                    Sexp::list(&interface.fields),
                ],
            ),
            Definition::Union(union) => Sexp::tagged(
                "union",
                [
                    Sexp::optional_string(union.description.as_deref()),
                    Sexp::Boolean(union.extend),
                    Sexp::atom(union.name.as_str()),
                    Sexp::list(&union.directives),
                    Sexp::atoms(&union.members),
                ],
            ),
            Definition::Enum(enumeration) => Sexp::tagged(
                "enum",
                [
                    Sexp::optional_string(enumeration.description.as_deref()),
                    Sexp::Boolean(enumeration.extend),
                    Sexp::atom(enumeration.name.as_str()),
                    Sexp::list(&enumeration.directives),
                    Sexp::list(&enumeration.values),
                ],
            ),
            Definition::InputObject(input) => Sexp::tagged(
                "input",
                [
                    Sexp::optional_string(input.description.as_deref()),
                    Sexp::Boolean(input.extend),
                    Sexp::atom(input.name.as_str()),
                    Sexp::list(&input.directives),
                    Sexp::list(&input.fields),
                ],
            ),
            Definition::Directive(def) => def.to_sexp(),
        }
    }
}

impl ToSexp for DirectiveDefinition {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "directive-def",
            [
                Sexp::optional_string(self.description.as_deref()),
                Sexp::atom(self.name.as_str()),
                Sexp::list(&self.arguments),
                Sexp::Boolean(self.repeatable),
                Sexp::list(&self.locations),
            ],
        )
    }
}

impl ToSexp for DirectiveLocation {
    fn to_sexp(&self) -> Sexp {
        Sexp::atom(self.as_str())
    }
}

impl ToSexp for OperationType {
    fn to_sexp(&self) -> Sexp {
        Sexp::atom(self.as_str().to_ascii_uppercase())
    }
}

impl ToSexp for FieldDefinition {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "field-def",
            [
                Sexp::optional_string(self.description.as_deref()),
                Sexp::atom(self.name.as_str()),
                Sexp::list(&self.arguments),
                self.ty.to_sexp(),
                Sexp::list(&self.directives),
            ],
        )
    }
}

impl ToSexp for InputValueDefinition {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "input-value",
            [
                Sexp::optional_string(self.description.as_deref()),
                Sexp::atom(self.name.as_str()),
                self.ty.to_sexp(),
                self.default_value.as_ref().map_or(Sexp::Nil, ToSexp::to_sexp),
                Sexp::list(&self.directives),
            ],
        )
    }
}

impl ToSexp for EnumValueDefinition {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "enum-value-def",
            [
                Sexp::optional_string(self.description.as_deref()),
                Sexp::atom(self.name.as_str()),
                Sexp::list(&self.directives),
            ],
        )
    }
}

impl ToSexp for VariableDefinition {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "var",
            [
                Sexp::atom(self.name.as_str()),
                self.ty.to_sexp(),
                self.default_value.as_ref().map_or(Sexp::Nil, ToSexp::to_sexp),
                Sexp::list(&self.directives),
            ],
        )
    }
}

impl ToSexp for Type {
    fn to_sexp(&self) -> Sexp {
        match self {
            Type::Named(name) => Sexp::atom(name.as_str()),
            Type::List(inner) => Sexp::tagged("list", [inner.to_sexp()]),
            Type::NonNull(inner) => Sexp::tagged("non-null", [inner.to_sexp()]),
        }
    }
}

impl ToSexp for Selection {
    fn to_sexp(&self) -> Sexp {
        match self {
            Selection::Field(field) => Sexp::tagged(
                "field",
                [
                    field.alias.as_deref().map_or(Sexp::Nil, Sexp::atom),
                    Sexp::atom(field.name.as_str()),
                    Sexp::list(&field.arguments),
                    Sexp::list(&field.directives),
                    Sexp::list(&field.selections),
                ],
            ),
            Selection::FragmentSpread(spread) => Sexp::tagged(
                "frag-spread",
                [
                    Sexp::atom(spread.name.as_str()),
                    Sexp::list(&spread.directives),
                ],
            ),
            Selection::InlineFragment(inline) => Sexp::tagged(
                "inline-frag",
                [
                    Sexp::atom(inline.type_condition.as_str()),
                    Sexp::list(&inline.directives),
                    Sexp::list(&inline.selections),
                ],
            ),
        }
    }
}

impl<V: ValueMode> ToSexp for Directive<V> {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "directive",
            [Sexp::atom(self.name.as_str()), Sexp::list(&self.arguments)],
        )
    }
}

impl<V: ValueMode> ToSexp for Argument<V> {
    fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "arg",
            [Sexp::atom(self.name.as_str()), self.value.to_sexp()],
        )
    }
}

impl<V: ValueMode> ToSexp for Value<V> {
    fn to_sexp(&self) -> Sexp {
        let (list_tag, object_tag) = if V::ALLOWS_VARIABLES {
            ("list", "obj")
        } else {
            ("const-list", "const-obj")
        };
        match self {
            Value::Variable(var) => Sexp::Variable(var.name().to_owned()),
            Value::Boolean(b) => Sexp::Boolean(*b),
            Value::Int(i) => Sexp::Int(*i),
            Value::Float(x) => Sexp::Float(*x),
            Value::String(s) => Sexp::String(s.clone()),
            Value::Enum(e) => Sexp::tagged("enum-value", [Sexp::atom(e.as_str())]),
            Value::Null => Sexp::atom("null"),
            Value::List(items) => Sexp::tagged(list_tag, [Sexp::list(items)]),
            Value::Object(fields) => Sexp::tagged(
                object_tag,
                [Sexp::List(
                    fields
                        .iter()
                        .map(|(name, value)| Sexp::List(vec![Sexp::atom(name.as_str()), value.to_sexp()]))
                        .collect(),
                )],
            ),
        }
    }
}
