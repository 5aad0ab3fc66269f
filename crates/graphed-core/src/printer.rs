//! Compact re-printer: the shortest token sequence that parses back to the same document.
//!
//! Punctuators delimit themselves, so separators are only needed where two tokens
//! would otherwise lex as one:
//! - two word-like tokens (names, ints, floats) in a row, e.g. `query Foo`
//! - two strings in a row, since `""` followed by `"` would open a block string

use crate::ast::{
    Definition, DirectiveDefinition, Document, EnumTypeDefinition, EnumValueDefinition, Field,
    FieldDefinition, FragmentDefinition, InputObjectTypeDefinition, InputValueDefinition,
    InterfaceTypeDefinition, ObjectTypeDefinition, OperationDefinition, ScalarTypeDefinition,
    SchemaDefinition, Selection, Type, UnionTypeDefinition, VariableDefinition,
};
use crate::literal;
use crate::value::{Argument, Directive, Value, ValueMode};

pub fn print(document: &Document<'_>) -> String {
    let mut printer = Printer::default();
    printer.document(document);
    printer.out
}

/// Whether `def` was printed without its optional `{ ... }` block, so that a
/// shorthand query right after it would be parsed as that block.
fn takes_trailing_block(def: &Definition) -> bool {
    match def {
        Definition::Schema(schema) => schema.operation_types.is_empty(),
        Definition::Object(object) => object.fields.is_empty(),
        Definition::Interface(interface) => interface.fields.is_empty(),
        Definition::Enum(enumeration) => enumeration.values.is_empty(),
        Definition::InputObject(input) => input.fields.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Last {
    #[default]
    Punct,
    Word,
    Str,
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    last: Last,
}

impl Printer {
    fn punct(&mut self, text: &str) {
        self.out.push_str(text);
        self.last = Last::Punct;
    }

    fn word(&mut self, text: &str) {
        if self.last == Last::Word {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.last = Last::Word;
    }

    fn string(&mut self, value: &str) {
        if self.last == Last::Str {
            self.out.push(' ');
        }
        literal::write_quoted(&mut self.out, value);
        self.last = Last::Str;
    }

    fn document(&mut self, document: &Document<'_>) {
        let mut open = false;
        for def in &document.definitions {
            self.definition(def, open);
            open = takes_trailing_block(def);
        }
    }

    /// `after_open` is set when a `{` printed next would be read as the body of
    /// the previous definition.
    fn definition(&mut self, def: &Definition, after_open: bool) {
        match def {
            Definition::Operation(op) => self.operation(op, after_open),
            Definition::Fragment(frag) => self.fragment(frag),
            Definition::Schema(schema) => self.schema(schema),
            Definition::Scalar(scalar) => self.scalar(scalar),
            Definition::Object(object) => self.object(object),
            Definition::Interface(interface) => self.interface(interface),
            Definition::Union(union) => self.union(union),
            Definition::Enum(enumeration) => self.enumeration(enumeration),
            Definition::InputObject(input) => self.input_object(input),
            Definition::Directive(directive) => self.directive_definition(directive),
        }
    }

    fn operation(&mut self, op: &OperationDefinition, after_open: bool) {
        if !op.is_shorthand() || after_open {
            self.word(op.operation.as_str());
            if let Some(name) = &op.name {
                self.word(name);
            }
            self.variable_definitions(&op.variables);
            self.directives(&op.directives);
        }
        self.selection_set(&op.selections);
    }

    fn fragment(&mut self, frag: &FragmentDefinition) {
        self.word("fragment");
        self.word(&frag.name);
        self.word("on");
        self.word(&frag.type_condition);
        self.directives(&frag.directives);
        self.selection_set(&frag.selections);
    }

    fn variable_definitions(&mut self, vars: &[VariableDefinition]) {
        if vars.is_empty() {
            return;
        }
        self.punct("(");
        for var in vars {
            self.punct("$");
            self.word(&var.name);
            self.punct(":");
            self.ty(&var.ty);
            self.default_value(var.default_value.as_ref());
            self.directives(&var.directives);
        }
        self.punct(")");
    }

    fn selection_set(&mut self, selections: &[Selection]) {
        self.punct("{");
        for selection in selections {
            self.selection(selection);
        }
        self.punct("}");
    }

    fn selection(&mut self, selection: &Selection) {
        match selection {
            Selection::Field(field) => self.field(field),
            Selection::FragmentSpread(spread) => {
                self.punct("...");
                self.word(&spread.name);
                self.directives(&spread.directives);
            }
            Selection::InlineFragment(inline) => {
                self.punct("...");
                self.word("on");
                self.word(&inline.type_condition);
                self.directives(&inline.directives);
                self.selection_set(&inline.selections);
            }
        }
    }

    fn field(&mut self, field: &Field) {
        if let Some(alias) = &field.alias {
            self.word(alias);
            self.punct(":");
        }
        self.word(&field.name);
        self.arguments(&field.arguments);
        self.directives(&field.directives);
        if !field.selections.is_empty() {
            self.selection_set(&field.selections);
        }
    }

    fn arguments<V: ValueMode>(&mut self, args: &[Argument<V>]) {
        if args.is_empty() {
            return;
        }
        self.punct("(");
        for arg in args {
            self.word(&arg.name);
            self.punct(":");
            self.value(&arg.value);
        }
        self.punct(")");
    }

    fn directives<V: ValueMode>(&mut self, directives: &[Directive<V>]) {
        for directive in directives {
            self.punct("@");
            self.word(&directive.name);
            self.arguments(&directive.arguments);
        }
    }

    fn default_value<V: ValueMode>(&mut self, value: Option<&Value<V>>) {
        if let Some(value) = value {
            self.punct("=");
            self.value(value);
        }
    }

    fn value<V: ValueMode>(&mut self, value: &Value<V>) {
        match value {
            Value::Variable(var) => {
                self.punct("$");
                self.word(var.name());
            }
            Value::Boolean(b) => self.word(if *b { "true" } else { "false" }),
            Value::Int(i) => self.word(&i.to_string()),
            Value::Float(f) => self.word(&literal::format_float(*f)),
            Value::String(s) => self.string(s),
            Value::Enum(e) => self.word(e),
            Value::Null => self.word("null"),
            Value::List(items) => {
                self.punct("[");
                for item in items {
                    self.value(item);
                }
                self.punct("]");
            }
            Value::Object(fields) => {
                self.punct("{");
                for (name, value) in fields {
                    self.word(name);
                    self.punct(":");
                    self.value(value);
                }
                self.punct("}");
            }
        }
    }

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Named(name) => self.word(name),
            Type::List(inner) => {
                self.punct("[");
                self.ty(inner);
                self.punct("]");
            }
            Type::NonNull(inner) => {
                self.ty(inner);
                self.punct("!");
            }
        }
    }

    /// Description and `extend` marker shared by type-system definitions.
    fn preamble(&mut self, description: Option<&str>, extend: bool) {
        self.description(description);
        if extend {
            self.word("extend");
        }
    }

    fn description(&mut self, description: Option<&str>) {
        if let Some(text) = description {
            self.string(text);
        }
    }

    fn schema(&mut self, schema: &SchemaDefinition) {
        self.preamble(schema.description.as_deref(), schema.extend);
        self.word("schema");
        self.directives(&schema.directives);
        if schema.operation_types.is_empty() {
            return;
        }
        self.punct("{");
        for (op, type_name) in &schema.operation_types {
            self.word(op.as_str());
            self.punct(":");
            self.word(type_name);
        }
        self.punct("}");
    }

    fn scalar(&mut self, scalar: &ScalarTypeDefinition) {
        self.preamble(scalar.description.as_deref(), scalar.extend);
        self.word("scalar");
        self.word(&scalar.name);
        self.directives(&scalar.directives);
    }

    fn object(&mut self, object: &ObjectTypeDefinition) {
        self.preamble(object.description.as_deref(), object.extend);
        self.word("type");
        self.word(&object.name);
        self.implements(&object.interfaces);
        self.directives(&object.directives);
        self.field_definitions(&object.fields);
    }

    fn interface(&mut self, interface: &InterfaceTypeDefinition) {
        self.preamble(interface.description.as_deref(), interface.extend);
        self.word("interface");
        self.word(&interface.name);
        self.implements(&interface.interfaces);
        self.directives(&interface.directives);
        self.field_definitions(&interface.fields);
    }

    fn implements(&mut self, interfaces: &[String]) {
        if interfaces.is_empty() {
            return;
        }
        self.word("implements");
        for (i, name) in interfaces.iter().enumerate() {
            if i > 0 {
                self.punct("&");
            }
            self.word(name);
        }
    }

    fn field_definitions(&mut self, fields: &[FieldDefinition]) {
        if fields.is_empty() {
            return;
        }
        self.punct("{");
        for field in fields {
            self.description(field.description.as_deref());
            self.word(&field.name);
            self.argument_definitions(&field.arguments);
            self.punct(":");
            self.ty(&field.ty);
            self.directives(&field.directives);
        }
        self.punct("}");
    }

    fn argument_definitions(&mut self, args: &[InputValueDefinition]) {
        if args.is_empty() {
            return;
        }
        self.punct("(");
        for arg in args {
            self.input_value(arg);
        }
        self.punct(")");
    }

    fn input_value(&mut self, input: &InputValueDefinition) {
        self.description(input.description.as_deref());
        self.word(&input.name);
        self.punct(":");
        self.ty(&input.ty);
        self.default_value(input.default_value.as_ref());
        self.directives(&input.directives);
    }

    fn union(&mut self, union: &UnionTypeDefinition) {
        self.preamble(union.description.as_deref(), union.extend);
        self.word("union");
        self.word(&union.name);
        self.directives(&union.directives);
        for (i, member) in union.members.iter().enumerate() {
            self.punct(if i == 0 { "=" } else { "|" });
            self.word(member);
        }
    }

    fn enumeration(&mut self, enumeration: &EnumTypeDefinition) {
        self.preamble(enumeration.description.as_deref(), enumeration.extend);
        self.word("enum");
        self.word(&enumeration.name);
        self.directives(&enumeration.directives);
        if enumeration.values.is_empty() {
            return;
        }
        self.punct("{");
        for value in &enumeration.values {
            self.enum_value(value);
        }
        self.punct("}");
    }

    fn enum_value(&mut self, value: &EnumValueDefinition) {
        self.description(value.description.as_deref());
        self.word(&value.name);
        self.directives(&value.directives);
    }

    fn input_object(&mut self, input: &InputObjectTypeDefinition) {
        self.preamble(input.description.as_deref(), input.extend);
        self.word("input");
        self.word(&input.name);
        self.directives(&input.directives);
        if input.fields.is_empty() {
            return;
        }
        self.punct("{");
        for field in &input.fields {
            self.input_value(field);
        }
        self.punct("}");
    }

    fn directive_definition(&mut self, def: &DirectiveDefinition) {
        self.description(def.description.as_deref());
        self.word("directive");
        self.punct("@");
        self.word(&def.name);
        self.argument_definitions(&def.arguments);
        if def.repeatable {
            self.word("repeatable");
        }
        self.word("on");
        for (i, location) in def.locations.iter().enumerate() {
            if i > 0 {
                self.punct("|");
            }
            self.word(location.as_str());
        }
    }
}
