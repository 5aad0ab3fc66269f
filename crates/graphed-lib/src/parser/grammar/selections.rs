//! Selection sets, arguments and directive applications.

use graphed_core::{
    Argument, Directive, Field, FragmentSpread, InlineFragment, Selection, ValueMode, Variable,
};

use crate::Result;
use crate::parser::core::Parser;
use crate::parser::lexer::TokenKind;

impl Parser<'_> {
    /// `{ selection+ }`
    pub(super) fn parse_selection_set(&mut self) -> Result<Vec<Selection>> {
        self.expect(TokenKind::BraceOpen)?;
        self.enter_recursion()?;

        let selections =
            self.delimited_nonempty(TokenKind::BraceClose, "selection", Self::parse_selection)?;

        self.exit_recursion();
        Ok(selections)
    }

    fn parse_selection(&mut self) -> Result<Selection> {
        if !self.eat(TokenKind::Spread)? {
            return self.parse_field().map(Selection::Field);
        }

        match self.current.kind {
            TokenKind::Name("on") => {
                self.bump()?;
                let type_condition = self.expect_name()?.to_owned();
                let directives = self.parse_directives::<Variable>()?;
                let selections = self.parse_selection_set()?;
                Ok(Selection::InlineFragment(InlineFragment {
                    type_condition,
                    directives,
                    selections,
                }))
            }
            TokenKind::Name(name) => {
                self.bump()?;
                let directives = self.parse_directives::<Variable>()?;
                Ok(Selection::FragmentSpread(FragmentSpread {
                    name: name.to_owned(),
                    directives,
                }))
            }
            _ => Err(self.error("expected name or `on` after `...`")),
        }
    }

    /// `alias: name(args) @directives { ... }`, everything but the name optional.
    fn parse_field(&mut self) -> Result<Field> {
        let first = self.expect_name()?;
        let (alias, name) = if self.eat(TokenKind::Colon)? {
            (Some(first.to_owned()), self.expect_name()?)
        } else {
            (None, first)
        };

        let arguments = self.parse_arguments::<Variable>()?;
        let directives = self.parse_directives::<Variable>()?;
        let selections = if self.at(TokenKind::BraceOpen) {
            self.parse_selection_set()?
        } else {
            Vec::new()
        };

        Ok(Field {
            alias,
            name: name.to_owned(),
            arguments,
            directives,
            selections,
        })
    }

    /// `(name: value ...)`; empty when no parenthesis follows.
    pub(super) fn parse_arguments<V: ValueMode>(&mut self) -> Result<Vec<Argument<V>>> {
        if !self.eat(TokenKind::ParenOpen)? {
            return Ok(Vec::new());
        }
        self.delimited_nonempty(TokenKind::ParenClose, "argument", |p| {
            let name = p.expect_name()?.to_owned();
            p.expect(TokenKind::Colon)?;
            let value = p.parse_value::<V>()?;
            Ok(Argument { name, value })
        })
    }

    /// Zero or more `@name(args)`. `V` decides whether arguments may use variables.
    pub(super) fn parse_directives<V: ValueMode>(&mut self) -> Result<Vec<Directive<V>>> {
        let mut directives = Vec::new();
        while self.eat(TokenKind::At)? {
            let name = self.expect_name()?.to_owned();
            let arguments = self.parse_arguments::<V>()?;
            directives.push(Directive { name, arguments });
        }
        Ok(directives)
    }
}
