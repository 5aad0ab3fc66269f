//! Input values and type references.

use indexmap::IndexMap;

use graphed_core::{Const, ConstValue, Type, Value, ValueMode};

use crate::Result;
use crate::parser::core::Parser;
use crate::parser::lexer::TokenKind;

impl Parser<'_> {
    /// A value in mode `V`. In const mode a `$name` is rejected at the `$`.
    pub(super) fn parse_value<V: ValueMode>(&mut self) -> Result<Value<V>> {
        let value = match &self.current.kind {
            TokenKind::Name("true") => Value::Boolean(true),
            TokenKind::Name("false") => Value::Boolean(false),
            TokenKind::Name("null") => Value::Null,
            TokenKind::Name(name) => Value::Enum((*name).to_owned()),
            TokenKind::Int(value) => Value::Int(*value),
            TokenKind::Float(value) => Value::Float(*value),
            TokenKind::String(value) => Value::String(value.clone()),
            TokenKind::BracketOpen => return self.parse_list_value(),
            TokenKind::BraceOpen => return self.parse_object_value(),
            TokenKind::Dollar => return self.parse_variable(),
            _ => return Err(self.error("expected a value")),
        };
        self.bump()?;
        Ok(value)
    }

    fn parse_variable<V: ValueMode>(&mut self) -> Result<Value<V>> {
        if !V::ALLOWS_VARIABLES {
            return Err(self.error("variables are not allowed in const values"));
        }
        let dollar = self.expect(TokenKind::Dollar)?;
        let name = self.expect_name()?;
        V::variable(name)
            .map(Value::Variable)
            .ok_or_else(|| self.error_at(&dollar, "variables are not allowed in const values"))
    }

    fn parse_list_value<V: ValueMode>(&mut self) -> Result<Value<V>> {
        self.assert_current(TokenKind::BracketOpen);
        self.bump()?;
        self.enter_recursion()?;
        let items = self.delimited(TokenKind::BracketClose, Self::parse_value::<V>)?;
        self.exit_recursion();
        Ok(Value::List(items))
    }

    /// `{ name: value ... }`. A repeated name keeps its first position and takes the last value.
    fn parse_object_value<V: ValueMode>(&mut self) -> Result<Value<V>> {
        self.assert_current(TokenKind::BraceOpen);
        self.bump()?;
        self.enter_recursion()?;
        let fields = self.delimited(TokenKind::BraceClose, |p| {
            let name = p.expect_name()?.to_owned();
            p.expect(TokenKind::Colon)?;
            let value = p.parse_value::<V>()?;
            Ok((name, value))
        })?;
        self.exit_recursion();
        Ok(Value::Object(fields.into_iter().collect::<IndexMap<_, _>>()))
    }

    /// `= value` in const mode, if present.
    pub(super) fn parse_default_value(&mut self) -> Result<Option<ConstValue>> {
        if !self.eat(TokenKind::Equals)? {
            return Ok(None);
        }
        self.parse_value::<Const>().map(Some)
    }

    /// `Name`, `[Type]`, either followed by `!`.
    pub(super) fn parse_type(&mut self) -> Result<Type> {
        let ty = if self.eat(TokenKind::BracketOpen)? {
            self.enter_recursion()?;
            let inner = self.parse_type()?;
            self.expect(TokenKind::BracketClose)?;
            self.exit_recursion();
            Type::list(inner)
        } else {
            Type::named(self.expect_name()?)
        };

        if self.eat(TokenKind::Bang)? {
            Ok(Type::non_null(ty))
        } else {
            Ok(ty)
        }
    }
}
