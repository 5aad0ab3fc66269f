#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Document model for the graphed query language, plus its two serializers.
//!
//! - [`print`]: compact source text that parses back to an equal document
//! - [`to_sexp`]: parenthesized structural dump for fixtures and diffing
//!
//! Parsing lives in `graphed-lib`; nothing here touches source positions.

pub mod ast;
pub mod literal;
pub mod printer;
pub mod sexp;
pub mod value;


pub use ast::{
    Definition, DirectiveDefinition, DirectiveLocation, Document, EnumTypeDefinition,
    EnumValueDefinition, Field, FieldDefinition, FragmentDefinition, FragmentSpread,
    InlineFragment, InputObjectTypeDefinition, InputValueDefinition, InterfaceTypeDefinition,
    ObjectTypeDefinition, OperationDefinition, OperationType, ScalarTypeDefinition,
    SchemaDefinition, Selection, Type, UnionTypeDefinition, VariableDefinition,
};
pub use printer::print;
pub use sexp::{Sexp, ToSexp, to_sexp};
pub use value::{
    Argument, Const, ConstArgument, ConstDirective, ConstValue, Directive, DynArgument,
    DynDirective, DynValue, Value, ValueMode, Variable,
};
