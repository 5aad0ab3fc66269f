//! Top-level dispatch, operations and fragments.

use graphed_core::{
    Const, Definition, FragmentDefinition, OperationDefinition, OperationType, Variable,
    VariableDefinition,
};

use crate::Result;
use crate::parser::core::Parser;
use crate::parser::lexer::TokenKind;

/// Leading parts shared by every definition: an optional description and `extend`.
pub(super) struct Preamble {
    pub description: Option<String>,
    pub extend: bool,
}

impl Parser<'_> {
    pub(crate) fn parse_definitions(&mut self) -> Result<Vec<Definition>> {
        let mut definitions = Vec::new();
        while !self.at_eof() {
            definitions.push(self.parse_definition()?);
        }
        Ok(definitions)
    }

    fn parse_definition(&mut self) -> Result<Definition> {
        if self.at(TokenKind::BraceOpen) {
            let selections = self.parse_selection_set()?;
            return Ok(Definition::Operation(OperationDefinition {
                name: None,
                operation: OperationType::Query,
                variables: Vec::new(),
                directives: Vec::new(),
                selections,
            }));
        }

        let preamble = Preamble {
            description: self.parse_description()?,
            extend: self.eat_keyword("extend")?,
        };

        let TokenKind::Name(keyword) = self.current.kind else {
            return Err(self.error("expected a definition"));
        };

        if let Some(operation) = OperationType::from_name(keyword) {
            self.reject_preamble(&preamble, keyword)?;
            return self
                .parse_operation(operation)
                .map(Definition::Operation);
        }

        match keyword {
            "fragment" => {
                self.reject_preamble(&preamble, keyword)?;
                self.parse_fragment().map(Definition::Fragment)
            }
            "directive" => {
                if preamble.extend {
                    return Err(self.error("directive definitions cannot be extended"));
                }
                self.parse_directive_definition(preamble.description)
                    .map(Definition::Directive)
            }
            "schema" => self.parse_schema(preamble).map(Definition::Schema),
            "scalar" => self.parse_scalar(preamble).map(Definition::Scalar),
            "type" => self.parse_object(preamble).map(Definition::Object),
            "interface" => self.parse_interface(preamble).map(Definition::Interface),
            "union" => self.parse_union(preamble).map(Definition::Union),
            "enum" => self.parse_enum(preamble).map(Definition::Enum),
            "input" => self.parse_input_object(preamble).map(Definition::InputObject),
            _ => Err(self.error("unknown definition type")),
        }
    }

    /// Executable definitions take neither a description nor `extend`.
    fn reject_preamble(&self, preamble: &Preamble, keyword: &str) -> Result<()> {
        if preamble.description.is_some() {
            return Err(self.error(format!("`{keyword}` definitions cannot have a description")));
        }
        if preamble.extend {
            return Err(self.error(format!("`{keyword}` definitions cannot be extended")));
        }
        Ok(())
    }

    pub(super) fn parse_description(&mut self) -> Result<Option<String>> {
        let TokenKind::String(text) = &self.current.kind else {
            return Ok(None);
        };
        let text = text.clone();
        self.bump()?;
        Ok(Some(text))
    }

    fn parse_operation(&mut self, operation: OperationType) -> Result<OperationDefinition> {
        self.assert_keyword(operation.as_str());
        self.bump()?;

        let name = match self.current.kind {
            TokenKind::Name(name) => {
                self.bump()?;
                Some(name.to_owned())
            }
            _ => None,
        };

        let variables = if self.eat(TokenKind::ParenOpen)? {
            self.delimited_nonempty(
                TokenKind::ParenClose,
                "variable definition",
                Self::parse_variable_definition,
            )?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives::<Variable>()?;
        let selections = self.parse_selection_set()?;

        Ok(OperationDefinition {
            name,
            operation,
            variables,
            directives,
            selections,
        })
    }

    fn parse_variable_definition(&mut self) -> Result<VariableDefinition> {
        self.expect(TokenKind::Dollar)?;
        let name = self.expect_name()?.to_owned();
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let default_value = self.parse_default_value()?;
        let directives = self.parse_directives::<Const>()?;

        Ok(VariableDefinition {
            name,
            ty,
            default_value,
            directives,
        })
    }

    fn parse_fragment(&mut self) -> Result<FragmentDefinition> {
        self.assert_keyword("fragment");
        self.bump()?;

        if self.at_keyword("on") {
            return Err(self.error("expected a fragment name"));
        }
        let name = self.expect_name()?.to_owned();
        self.expect_keyword("on")?;
        let type_condition = self.expect_name()?.to_owned();
        let directives = self.parse_directives::<Variable>()?;
        let selections = self.parse_selection_set()?;

        Ok(FragmentDefinition {
            name,
            type_condition,
            directives,
            selections,
        })
    }
}
