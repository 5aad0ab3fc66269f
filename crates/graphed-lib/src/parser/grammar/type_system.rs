//! Type-system definitions and extensions.
//!
//! `extend schema`, `extend interface`, `extend enum` and `extend input` must add
//! something; the other extensions are accepted as written.

use indexmap::IndexMap;

use graphed_core::{
    Const, DirectiveDefinition, DirectiveLocation, EnumTypeDefinition, EnumValueDefinition,
    FieldDefinition, InputObjectTypeDefinition, InputValueDefinition, InterfaceTypeDefinition,
    ObjectTypeDefinition, OperationType, ScalarTypeDefinition, SchemaDefinition,
    UnionTypeDefinition,
};

use super::definitions::Preamble;
use crate::Result;
use crate::parser::core::Parser;
use crate::parser::lexer::TokenKind;

impl Parser<'_> {
    /// `schema @directives { query: Query ... }`; needs directives, the block, or both.
    pub(super) fn parse_schema(&mut self, preamble: Preamble) -> Result<SchemaDefinition> {
        self.assert_keyword("schema");
        self.bump()?;

        let directives = self.parse_directives::<Const>()?;
        let mut operation_types = IndexMap::new();

        if self.eat(TokenKind::BraceOpen)? {
            let entries = self.delimited_nonempty(TokenKind::BraceClose, "operation type", |p| {
                let operation = p.parse_operation_type()?;
                p.expect(TokenKind::Colon)?;
                let type_name = p.expect_name()?.to_owned();
                Ok((operation, type_name))
            })?;
            operation_types.extend(entries);
        } else if directives.is_empty() {
            return Err(self.error("expected `{` or directives after `schema`"));
        }

        Ok(SchemaDefinition {
            description: preamble.description,
            extend: preamble.extend,
            directives,
            operation_types,
        })
    }

    fn parse_operation_type(&mut self) -> Result<OperationType> {
        let TokenKind::Name(name) = self.current.kind else {
            return Err(self.error("expected an operation type"));
        };
        let Some(operation) = OperationType::from_name(name) else {
            return Err(self.error("unknown operation type"));
        };
        self.bump()?;
        Ok(operation)
    }

    pub(super) fn parse_scalar(&mut self, preamble: Preamble) -> Result<ScalarTypeDefinition> {
        self.assert_keyword("scalar");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Const>()?;

        Ok(ScalarTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            directives,
        })
    }

    pub(super) fn parse_object(&mut self, preamble: Preamble) -> Result<ObjectTypeDefinition> {
        self.assert_keyword("type");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let interfaces = self.parse_implements()?;
        let directives = self.parse_directives::<Const>()?;
        let fields = self.parse_field_definitions()?;

        Ok(ObjectTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            interfaces,
            directives,
            fields,
        })
    }

    pub(super) fn parse_interface(
        &mut self,
        preamble: Preamble,
    ) -> Result<InterfaceTypeDefinition> {
        self.assert_keyword("interface");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let interfaces = self.parse_implements()?;
        let directives = self.parse_directives::<Const>()?;
        let fields = self.parse_field_definitions()?;

        if preamble.extend && interfaces.is_empty() && directives.is_empty() && fields.is_empty() {
            return Err(self.error(format!(
                "interface extension `{name}` must add interfaces, directives or fields"
            )));
        }

        Ok(InterfaceTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            interfaces,
            directives,
            fields,
        })
    }

    /// `implements &? A (& B)*`, empty without the keyword.
    fn parse_implements(&mut self) -> Result<Vec<String>> {
        if !self.eat_keyword("implements")? {
            return Ok(Vec::new());
        }
        self.eat(TokenKind::Amp)?;
        let mut interfaces = vec![self.expect_name()?.to_owned()];
        while self.eat(TokenKind::Amp)? {
            interfaces.push(self.expect_name()?.to_owned());
        }
        Ok(interfaces)
    }

    fn parse_field_definitions(&mut self) -> Result<Vec<FieldDefinition>> {
        if !self.eat(TokenKind::BraceOpen)? {
            return Ok(Vec::new());
        }
        self.delimited_nonempty(TokenKind::BraceClose, "field", Self::parse_field_definition)
    }

    fn parse_field_definition(&mut self) -> Result<FieldDefinition> {
        let description = self.parse_description()?;
        let name = self.expect_name()?.to_owned();
        let arguments = self.parse_argument_definitions()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let directives = self.parse_directives::<Const>()?;

        Ok(FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
        })
    }

    fn parse_argument_definitions(&mut self) -> Result<Vec<InputValueDefinition>> {
        if !self.eat(TokenKind::ParenOpen)? {
            return Ok(Vec::new());
        }
        self.delimited_nonempty(
            TokenKind::ParenClose,
            "argument definition",
            Self::parse_input_value_definition,
        )
    }

    /// Shared by argument definitions and input object fields.
    fn parse_input_value_definition(&mut self) -> Result<InputValueDefinition> {
        let description = self.parse_description()?;
        let name = self.expect_name()?.to_owned();
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let default_value = self.parse_default_value()?;
        let directives = self.parse_directives::<Const>()?;

        Ok(InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
        })
    }

    pub(super) fn parse_union(&mut self, preamble: Preamble) -> Result<UnionTypeDefinition> {
        self.assert_keyword("union");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Const>()?;
        let mut members = Vec::new();
        if self.eat(TokenKind::Equals)? {
            self.eat(TokenKind::Pipe)?;
            members.push(self.expect_name()?.to_owned());
            while self.eat(TokenKind::Pipe)? {
                members.push(self.expect_name()?.to_owned());
            }
        }

        Ok(UnionTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            directives,
            members,
        })
    }

    pub(super) fn parse_enum(&mut self, preamble: Preamble) -> Result<EnumTypeDefinition> {
        self.assert_keyword("enum");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Const>()?;
        let values = if self.eat(TokenKind::BraceOpen)? {
            self.delimited_nonempty(
                TokenKind::BraceClose,
                "enum value",
                Self::parse_enum_value_definition,
            )?
        } else {
            Vec::new()
        };

        if preamble.extend && directives.is_empty() && values.is_empty() {
            return Err(self.error(format!(
                "enum extension `{name}` must add directives or values"
            )));
        }

        Ok(EnumTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            directives,
            values,
        })
    }

    fn parse_enum_value_definition(&mut self) -> Result<EnumValueDefinition> {
        let description = self.parse_description()?;
        let name = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Const>()?;

        Ok(EnumValueDefinition {
            description,
            name,
            directives,
        })
    }

    pub(super) fn parse_input_object(
        &mut self,
        preamble: Preamble,
    ) -> Result<InputObjectTypeDefinition> {
        self.assert_keyword("input");
        self.bump()?;

        let name = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Const>()?;
        let fields = if self.eat(TokenKind::BraceOpen)? {
            self.delimited_nonempty(
                TokenKind::BraceClose,
                "input field",
                Self::parse_input_value_definition,
            )?
        } else {
            Vec::new()
        };

        if preamble.extend && directives.is_empty() && fields.is_empty() {
            return Err(self.error(format!(
                "input extension `{name}` must add directives or fields"
            )));
        }

        Ok(InputObjectTypeDefinition {
            description: preamble.description,
            extend: preamble.extend,
            name,
            directives,
            fields,
        })
    }

    /// `directive @name(args) repeatable? on LOCATION (| LOCATION)*`
    pub(super) fn parse_directive_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<DirectiveDefinition> {
        self.assert_keyword("directive");
        self.bump()?;

        self.expect(TokenKind::At)?;
        let name = self.expect_name()?.to_owned();
        let arguments = self.parse_argument_definitions()?;
        let repeatable = self.eat_keyword("repeatable")?;
        self.expect_keyword("on")?;

        self.eat(TokenKind::Pipe)?;
        let mut locations = vec![self.parse_directive_location()?];
        while self.eat(TokenKind::Pipe)? {
            locations.push(self.parse_directive_location()?);
        }

        Ok(DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_location(&mut self) -> Result<DirectiveLocation> {
        let TokenKind::Name(name) = self.current.kind else {
            return Err(self.error("expected a directive location"));
        };
        let Some(location) = DirectiveLocation::from_name(name) else {
            return Err(self.error("unknown directive location"));
        };
        self.bump()?;
        Ok(location)
    }
}
