//! Document tree produced by the parser and read by the printer and s-expression dump.
//!
//! Nodes own their strings and carry no source positions, so documents can be built
//! by hand and compared structurally with `==`.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::{ConstDirective, ConstValue, DynArgument, DynDirective};

// ============================================================================
// Document
// ============================================================================

/// Root node: top-level definitions in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document<'src> {
    pub definitions: Vec<Definition>,
    /// Text the document was parsed from, kept for span-based tooling.
    #[serde(skip)]
    pub source: Option<&'src str>,
}

impl<'src> Document<'src> {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self {
            definitions,
            source: None,
        }
    }

    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }
}

/// Structural equality; the retained source text is ignored.
impl PartialEq for Document<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.definitions == other.definitions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    Schema(SchemaDefinition),
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    Directive(DirectiveDefinition),
}

impl Definition {
    /// Operations and fragments; everything else belongs to the type system.
    pub fn is_executable(&self) -> bool {
        matches!(self, Definition::Operation(_) | Definition::Fragment(_))
    }

    /// Name of the definition. Anonymous operations and schema definitions have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Operation(d) => d.name.as_deref(),
            Definition::Fragment(d) => Some(&d.name),
            Definition::Schema(_) => None,
            Definition::Scalar(d) => Some(&d.name),
            Definition::Object(d) => Some(&d.name),
            Definition::Interface(d) => Some(&d.name),
            Definition::Union(d) => Some(&d.name),
            Definition::Enum(d) => Some(&d.name),
            Definition::InputObject(d) => Some(&d.name),
            Definition::Directive(d) => Some(&d.name),
        }
    }
}

// ============================================================================
// Executable definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Keyword as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDefinition {
    pub name: Option<String>,
    pub operation: OperationType,
    pub variables: Vec<VariableDefinition>,
    pub directives: Vec<DynDirective>,
    pub selections: Vec<Selection>,
}

impl OperationDefinition {
    /// `{ ... }` form: an anonymous query with no variables or directives.
    pub fn is_shorthand(&self) -> bool {
        self.operation == OperationType::Query
            && self.name.is_none()
            && self.variables.is_empty()
            && self.directives.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<DynDirective>,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: Type,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<ConstDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

/// Field selection. An empty `selections` means the field has no sub-selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<DynArgument>,
    pub directives: Vec<DynDirective>,
    pub selections: Vec<Selection>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            directives: Vec::new(),
            selections: Vec::new(),
        }
    }

    /// Key under which the field appears in a response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<DynDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineFragment {
    pub type_condition: String,
    pub directives: Vec<DynDirective>,
    pub selections: Vec<Selection>,
}

// ============================================================================
// Types
// ============================================================================

/// Type reference. `[Int]!` is `NonNull(List(Named("Int")))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn list(inner: Type) -> Self {
        Type::List(Box::new(inner))
    }

    pub fn non_null(inner: Type) -> Self {
        Type::NonNull(Box::new(inner))
    }

    /// Name under all list and non-null wrappers.
    pub fn innermost_name(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.innermost_name(),
        }
    }
}

// ============================================================================
// Type-system definitions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub directives: Vec<ConstDirective>,
    pub operation_types: IndexMap<OperationType, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub directives: Vec<ConstDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub interfaces: Vec<String>,
    pub directives: Vec<ConstDirective>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub interfaces: Vec<String>,
    pub directives: Vec<ConstDirective>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub directives: Vec<ConstDirective>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub directives: Vec<ConstDirective>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub extend: bool,
    pub name: String,
    pub directives: Vec<ConstDirective>,
    pub fields: Vec<InputValueDefinition>,
}

/// `directive @name(args) repeatable on A | B`. Directive definitions cannot be extended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<ConstDirective>,
}

/// Argument definition or input object field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<ConstDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<ConstDirective>,
}

/// Grammar positions where a directive may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub const ALL: [DirectiveLocation; 19] = [
        DirectiveLocation::Query,
        DirectiveLocation::Mutation,
        DirectiveLocation::Subscription,
        DirectiveLocation::Field,
        DirectiveLocation::FragmentDefinition,
        DirectiveLocation::FragmentSpread,
        DirectiveLocation::InlineFragment,
        DirectiveLocation::VariableDefinition,
        DirectiveLocation::Schema,
        DirectiveLocation::Scalar,
        DirectiveLocation::Object,
        DirectiveLocation::FieldDefinition,
        DirectiveLocation::ArgumentDefinition,
        DirectiveLocation::Interface,
        DirectiveLocation::Union,
        DirectiveLocation::Enum,
        DirectiveLocation::EnumValue,
        DirectiveLocation::InputObject,
        DirectiveLocation::InputFieldDefinition,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}
