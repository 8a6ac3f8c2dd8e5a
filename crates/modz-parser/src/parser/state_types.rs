//! Parser state - type annotation parsing.
//!
//! Types are parsed so that declarations can be read back by the declared
//! type service. Shapes the engine never inspects (object type literals,
//! mapped and conditional types, template literal types, `import()` types)
//! are consumed as opaque `TYPE_LITERAL` nodes spanning their text.

use modz_scanner::SyntaxKind;

use super::state::ParserState;
use crate::parser::node::*;
use crate::parser::{NodeIndex, NodeList, syntax_kind_ext};

impl ParserState {
    /// Parse `: Type` (current token is the colon).
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::ColonToken);
        self.parse_return_or_annotated_type()
    }

    /// A type, allowing `x is T` and `asserts x is T` predicates.
    fn parse_return_or_annotated_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        if self.is_contextual_identifier("asserts")
            && self.look_ahead(|state| {
                state.next_token();
                !state.has_preceding_line_break()
                    && (state.is_identifier() || state.is_token(SyntaxKind::ThisKeyword))
            })
        {
            self.next_token();
        }
        let is_predicate = (self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
            && self.look_ahead(|state| {
                state.next_token();
                !state.has_preceding_line_break() && state.is_contextual_identifier("is")
            });
        if is_predicate {
            self.next_token();
            self.next_token();
            self.parse_type();
            return self
                .arena
                .add_token(syntax_kind_ext::TYPE_LITERAL, start_pos, self.node_end());
        }
        self.parse_type()
    }

    /// Identifier token with the given text (`is`, `asserts`, `unique`, `infer`).
    pub(crate) fn is_contextual_identifier(&self, text: &str) -> bool {
        self.is_token(SyntaxKind::Identifier) && self.scanner.get_token_value() == text
    }

    /// Parse a type
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_expression();
        }
        let start_pos = self.token_pos();
        let result = if self.is_start_of_function_type() {
            self.parse_function_type()
        } else {
            let check_type = self.parse_union_type();
            if self.is_token(SyntaxKind::ExtendsKeyword) && !self.has_preceding_line_break() {
                // Conditional type: `T extends U ? X : Y`
                self.next_token();
                self.parse_union_type();
                self.parse_expected(SyntaxKind::QuestionToken);
                self.parse_type();
                self.parse_expected(SyntaxKind::ColonToken);
                self.parse_type();
                self.arena
                    .add_token(syntax_kind_ext::TYPE_LITERAL, start_pos, self.node_end())
            } else {
                check_type
            }
        };
        self.exit_recursion();
        result
    }

    fn is_start_of_function_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken => true,
            SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.look_ahead(|state| {
                state.next_token();
                state.is_token(SyntaxKind::NewKeyword)
            }),
            SyntaxKind::OpenParenToken => self.look_ahead(|state| {
                state.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                state.is_token(SyntaxKind::EqualsGreaterThanToken)
            }),
            _ => false,
        }
    }

    /// `(a: A) => R`, `<T>(a: T) => R`, `new (...) => R`
    fn parse_function_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_optional(SyntaxKind::AbstractKeyword);
        self.parse_optional(SyntaxKind::NewKeyword);
        self.skip_type_parameters();
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        } else {
            self.error_at_current_token("'(' expected.");
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_return_or_annotated_type();
        self.arena.add_function_type(
            syntax_kind_ext::FUNCTION_TYPE,
            start_pos,
            self.node_end(),
            FunctionTypeData { return_type },
        )
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::BarToken,
            syntax_kind_ext::UNION_TYPE,
            Self::parse_intersection_type,
        )
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::AmpersandToken,
            syntax_kind_ext::INTERSECTION_TYPE,
            Self::parse_type_operator,
        )
    }

    fn parse_composite_type(
        &mut self,
        separator: SyntaxKind,
        kind: u16,
        parse_member: fn(&mut ParserState) -> NodeIndex,
    ) -> NodeIndex {
        let start_pos = self.token_pos();
        let has_leading = self.parse_optional(separator);
        let first = parse_member(self);
        if !self.is_token(separator) && !has_leading {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(separator) {
            types.push(parse_member(self));
        }
        self.arena.add_composite_type(
            kind,
            start_pos,
            self.node_end(),
            CompositeTypeData {
                types: NodeList::from_nodes(types),
            },
        )
    }

    /// `keyof T`, `readonly T[]`, `unique symbol`, `infer U`
    fn parse_type_operator(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let operator = match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::ReadonlyKeyword => Some(self.token() as u16),
            _ if self.is_contextual_identifier("unique") || self.is_contextual_identifier("infer") => {
                Some(SyntaxKind::Identifier as u16)
            }
            _ => None,
        };
        let Some(operator) = operator else {
            return self.parse_postfix_type();
        };
        self.next_token();
        let type_node = self.parse_type_operator();
        self.arena.add_wrapped_type(
            syntax_kind_ext::TYPE_OPERATOR,
            start_pos,
            self.node_end(),
            WrappedTypeData {
                operator,
                type_node,
            },
        )
    }

    /// `T[]` and `T[K]`
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut result = self.parse_non_array_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                result = self.arena.add_array_type(
                    syntax_kind_ext::ARRAY_TYPE,
                    start_pos,
                    self.node_end(),
                    ArrayTypeData {
                        element_type: result,
                    },
                );
            } else {
                let index_type = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                result = self.arena.add_composite_type(
                    syntax_kind_ext::INDEXED_ACCESS_TYPE,
                    start_pos,
                    self.node_end(),
                    CompositeTypeData {
                        types: NodeList::from_nodes(vec![result, index_type]),
                    },
                );
            }
        }
        result
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
                if !self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::DotToken)
                }) =>
            {
                self.parse_token_node()
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let literal = if self.is_token(SyntaxKind::TrueKeyword)
                    || self.is_token(SyntaxKind::FalseKeyword)
                {
                    self.parse_token_node()
                } else {
                    self.parse_literal()
                };
                self.add_literal_type(start_pos, literal)
            }
            SyntaxKind::MinusToken => {
                self.next_token();
                let literal = self.parse_literal();
                self.add_literal_type(start_pos, literal)
            }
            SyntaxKind::TemplateHead => {
                self.skip_template_literal_type();
                self.arena
                    .add_token(syntax_kind_ext::TYPE_LITERAL, start_pos, self.node_end())
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapped_type(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    start_pos,
                    self.node_end(),
                    WrappedTypeData {
                        operator: SyntaxKind::OpenParenToken as u16,
                        type_node,
                    },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenBraceToken => {
                self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                self.arena
                    .add_token(syntax_kind_ext::TYPE_LITERAL, start_pos, self.node_end())
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                self.skip_entity_name();
                if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                    self.skip_type_arguments();
                }
                self.arena
                    .add_token(syntax_kind_ext::TYPE_QUERY, start_pos, self.node_end())
            }
            SyntaxKind::ImportKeyword => {
                self.next_token();
                if self.is_token(SyntaxKind::OpenParenToken) {
                    self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                }
                if self.parse_optional(SyntaxKind::DotToken) {
                    self.skip_entity_name();
                }
                if self.is_token(SyntaxKind::LessThanToken) {
                    self.skip_type_arguments();
                }
                self.arena
                    .add_token(syntax_kind_ext::TYPE_LITERAL, start_pos, self.node_end())
            }
            _ if self.is_identifier_or_keyword() => self.parse_type_reference(),
            _ => {
                self.error_at_current_token("Type expected.");
                self.create_missing_expression()
            }
        }
    }

    fn add_literal_type(&mut self, start_pos: u32, literal: NodeIndex) -> NodeIndex {
        self.arena.add_literal_type(
            syntax_kind_ext::LITERAL_TYPE,
            start_pos,
            self.node_end(),
            LiteralTypeData { literal },
        )
    }

    /// `[A, B?, ...C[]]` and named members `[a: A, b?: B]`
    fn parse_tuple_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut types = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_optional(SyntaxKind::DotDotDotToken);
            let is_named = self.is_identifier_or_keyword()
                && self.look_ahead(|state| {
                    state.next_token();
                    state.parse_optional(SyntaxKind::QuestionToken);
                    state.is_token(SyntaxKind::ColonToken)
                });
            if is_named {
                self.next_token();
                self.parse_optional(SyntaxKind::QuestionToken);
                self.parse_expected(SyntaxKind::ColonToken);
                self.parse_optional(SyntaxKind::DotDotDotToken);
            }
            types.push(self.parse_type());
            self.parse_optional(SyntaxKind::QuestionToken);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_composite_type(
            syntax_kind_ext::TUPLE_TYPE,
            start_pos,
            self.node_end(),
            CompositeTypeData {
                types: NodeList::from_nodes(types),
            },
        )
    }

    /// `Name`, `A.B.C`, `Map<K, V>`
    fn parse_type_reference(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut type_name = self.parse_identifier_name();
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            type_name = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                start_pos,
                self.node_end(),
                QualifiedNameData {
                    left: type_name,
                    right,
                },
            );
        }

        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                self.next_token();
                let mut arguments = Vec::new();
                while !self.is_token(SyntaxKind::GreaterThanToken)
                    && !self.is_token(SyntaxKind::EndOfFileToken)
                {
                    arguments.push(self.parse_type());
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                self.parse_expected(SyntaxKind::GreaterThanToken);
                Some(NodeList::from_nodes(arguments))
            } else {
                None
            };

        self.arena.add_type_ref(
            syntax_kind_ext::TYPE_REFERENCE,
            start_pos,
            self.node_end(),
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    // =========================================================================
    // Token skipping
    // =========================================================================

    /// Consume an `open ... close` group including nested groups of the same kind.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0u32;
        loop {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_at_current_token("Unexpected end of text.");
                return;
            }
            if self.is_token(open) {
                depth += 1;
            } else if self.is_token(close) {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    self.next_token();
                    return;
                }
            }
            self.next_token();
        }
    }

    /// Consume `<T, U extends X = Y>` if present.
    pub(crate) fn skip_type_parameters(&mut self) {
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
    }

    /// Consume `<A, B>` type arguments (current token is `<`).
    pub(crate) fn skip_type_arguments(&mut self) {
        self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
    }

    fn skip_entity_name(&mut self) {
        self.parse_identifier_name();
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier_name();
        }
    }

    fn skip_template_literal_type(&mut self) {
        self.next_token();
        loop {
            self.parse_type();
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_at_current_token("'}' expected.");
                return;
            }
            self.current_token = self.scanner.re_scan_template_token();
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            self.next_token();
            if is_tail {
                return;
            }
        }
    }

    /// True if a `<` starts type arguments of a call: `f<T>(x)`, `` tag<T>`x` ``.
    pub(crate) fn is_type_argument_list_for_call(&mut self) -> bool {
        self.look_ahead(|state| {
            let mut depth = 0u32;
            loop {
                match state.token() {
                    SyntaxKind::LessThanToken => depth += 1,
                    SyntaxKind::GreaterThanToken => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    SyntaxKind::Identifier
                    | SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::CommaToken
                    | SyntaxKind::DotToken
                    | SyntaxKind::DotDotDotToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::BarToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::EqualsGreaterThanToken => {}
                    token if token.is_keyword() => {}
                    _ => return false,
                }
                state.next_token();
            }
            state.next_token();
            matches!(
                state.token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::TemplateHead
            )
        })
    }
}
