//! Parser state - expression parsing methods

use modz_scanner::{SyntaxKind, numeric_literal_value};

use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR,
    CONTEXT_FLAG_IN_CONDITIONAL_TRUE, CONTEXT_FLAG_IN_FUNCTION, ParserState,
};
use crate::parser::node::*;
use crate::parser::{NodeIndex, NodeList, node_flags, syntax_kind_ext};

/// Flags cleared when entering a bracketed sub-expression.
const NESTED_CLEAR: u32 = CONTEXT_FLAG_DISALLOW_IN | CONTEXT_FLAG_IN_CONDITIONAL_TRUE;

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Parse an expression (including comma operator)
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_assignment_expression();

        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.node_end(),
                BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }

        left
    }

    /// Parse assignment expression (arrows, `yield`, conditionals, assignments)
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_expression();
        }

        let result = if self.is_token(SyntaxKind::YieldKeyword)
            && self.in_context(CONTEXT_FLAG_GENERATOR)
        {
            self.parse_yield_expression()
        } else if self.is_start_of_arrow_function() {
            self.parse_arrow_function()
        } else {
            // Precedence 2 covers assignment and conditional operators.
            self.parse_binary_expression(2)
        };

        self.exit_recursion();
        result
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if !self.has_preceding_line_break() && self.is_start_of_expression() {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_unary_expr_ex(
            syntax_kind_ext::YIELD_EXPRESSION,
            start_pos,
            self.node_end(),
            UnaryExprDataEx { expression },
        )
    }

    /// Tokens that can begin an expression.
    pub(crate) fn is_start_of_expression(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::AtToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::ImportKeyword => true,
            token => token.is_contextual_keyword(),
        }
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Check if we're at the start of an arrow function
    pub(crate) fn is_start_of_arrow_function(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken => self.look_ahead(|state| state.scan_arrow_after_open_paren()),
            SyntaxKind::LessThanToken => self.look_ahead(|state| state.look_ahead_is_generic_arrow_function()),
            SyntaxKind::AsyncKeyword => self.look_ahead(|state| {
                state.next_token();
                if state.has_preceding_line_break() {
                    return false;
                }
                match state.token() {
                    // `async => x` takes a parameter named async
                    SyntaxKind::EqualsGreaterThanToken => true,
                    SyntaxKind::OpenParenToken => state.scan_arrow_after_open_paren(),
                    SyntaxKind::LessThanToken => state.look_ahead_is_generic_arrow_function(),
                    _ if state.is_identifier() => {
                        state.next_token();
                        !state.has_preceding_line_break()
                            && state.is_token(SyntaxKind::EqualsGreaterThanToken)
                    }
                    _ => false,
                }
            }),
            _ if self.is_identifier() => self.look_ahead(|state| {
                state.next_token();
                !state.has_preceding_line_break()
                    && state.is_token(SyntaxKind::EqualsGreaterThanToken)
            }),
            _ => false,
        }
    }

    /// With the current token on `(`, skip to the matching `)` and decide
    /// whether an arrow follows. Only called inside `look_ahead`.
    fn scan_arrow_after_open_paren(&mut self) -> bool {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
            self.next_token();
        }
        self.next_token();

        if self.has_preceding_line_break() {
            return false;
        }
        match self.token() {
            SyntaxKind::EqualsGreaterThanToken => true,
            // A ':' in the true branch of a conditional belongs to the conditional.
            SyntaxKind::ColonToken if !self.in_context(CONTEXT_FLAG_IN_CONDITIONAL_TRUE) => {
                self.next_token();
                self.skip_return_type_to_arrow()
            }
            _ => false,
        }
    }

    /// Skip a return type annotation and report whether `=>` follows it.
    fn skip_return_type_to_arrow(&mut self) -> bool {
        let mut depth = 0i32;
        loop {
            match self.token() {
                SyntaxKind::EqualsGreaterThanToken if depth == 0 => {
                    return !self.has_preceding_line_break();
                }
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::GreaterThanToken => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                SyntaxKind::SemicolonToken
                | SyntaxKind::CommaToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::EndOfFileToken
                    if depth == 0 =>
                {
                    return false;
                }
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
            self.next_token();
        }
    }

    /// `<T>(x: T) => x`, `<T, U>(...) => ...`, `<T extends X>(...) => ...`
    pub(crate) fn look_ahead_is_generic_arrow_function(&mut self) -> bool {
        self.next_token();
        if !self.is_identifier() {
            return false;
        }
        self.next_token();
        if !matches!(
            self.token(),
            SyntaxKind::CommaToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::ExtendsKeyword
                | SyntaxKind::EqualsToken
        ) {
            return false;
        }
        let mut depth = 1u32;
        while depth > 0 {
            match self.token() {
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => depth -= 1,
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
            self.next_token();
        }
        self.is_token(SyntaxKind::OpenParenToken) && self.scan_arrow_after_open_paren()
    }

    /// Parse arrow function expression: `(params) => body`, `x => body`,
    /// `async x => body`, `<T>(x) => body`
    pub(crate) fn parse_arrow_function(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        // `async => x` keeps async as the parameter name.
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead(|state| {
                state.next_token();
                !state.is_token(SyntaxKind::EqualsGreaterThanToken)
            });
        if is_async {
            self.next_token();
        }

        self.skip_type_parameters();

        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            let async_flag = if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
            self.with_context(async_flag, NESTED_CLEAR, |state| state.parse_parameter_list())
        } else {
            let param_start = self.token_pos();
            let name = self.parse_identifier();
            let param = self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_start,
                self.node_end(),
                ParameterData {
                    dot_dot_dot_token: false,
                    name,
                    question_token: false,
                    type_annotation: NodeIndex::NONE,
                    initializer: NodeIndex::NONE,
                },
            );
            NodeList::from_nodes(vec![param])
        };

        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        let set = CONTEXT_FLAG_IN_FUNCTION | if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
        let clear = CONTEXT_FLAG_GENERATOR | if is_async { 0 } else { CONTEXT_FLAG_ASYNC };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.with_context(set, clear | NESTED_CLEAR, |state| state.parse_block())
        } else {
            self.with_context(set, clear, |state| state.parse_assignment_expression())
        };

        self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start_pos,
            self.node_end(),
            FunctionData {
                name: NodeIndex::NONE,
                parameters,
                type_annotation,
                body,
                is_async,
                asterisk_token: false,
            },
        )
    }

    // =========================================================================
    // Binary and unary operators
    // =========================================================================

    fn get_operator_precedence(&self, op: SyntaxKind) -> u8 {
        match op {
            SyntaxKind::QuestionToken => 2,
            op if op.is_assignment_operator() => 2,
            SyntaxKind::QuestionQuestionToken => 3,
            SyntaxKind::BarBarToken => 4,
            SyntaxKind::AmpersandAmpersandToken => 5,
            SyntaxKind::BarToken => 6,
            SyntaxKind::CaretToken => 7,
            SyntaxKind::AmpersandToken => 8,
            op if op.is_equality_operator() => 9,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword => 10,
            SyntaxKind::InKeyword if !self.in_context(CONTEXT_FLAG_DISALLOW_IN) => 10,
            SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword
                if !self.has_preceding_line_break() =>
            {
                10
            }
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 11,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 12,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 13,
            SyntaxKind::AsteriskAsteriskToken => 14,
            _ => 0,
        }
    }

    /// Parse binary expression with precedence climbing
    pub(crate) fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_expression();
        }

        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();

        loop {
            // `>` is scanned alone; it may be the start of `>>`, `>=` and friends.
            let op = if self.is_token(SyntaxKind::GreaterThanToken) {
                self.current_token = self.scanner.re_scan_greater_token();
                self.current_token
            } else {
                self.token()
            };
            let precedence = self.get_operator_precedence(op);
            if precedence == 0 || precedence < min_precedence {
                break;
            }

            if op == SyntaxKind::AsKeyword || op == SyntaxKind::SatisfiesKeyword {
                left = self.parse_as_or_satisfies_expression(left, start_pos);
                continue;
            }

            self.next_token();

            if op == SyntaxKind::QuestionToken {
                let when_true = self.with_context(
                    CONTEXT_FLAG_IN_CONDITIONAL_TRUE,
                    CONTEXT_FLAG_DISALLOW_IN,
                    |state| state.parse_assignment_expression(),
                );
                self.parse_expected(SyntaxKind::ColonToken);
                let when_false = self.with_context(0, CONTEXT_FLAG_IN_CONDITIONAL_TRUE, |state| {
                    state.parse_assignment_expression()
                });
                left = self.arena.add_conditional_expr(
                    syntax_kind_ext::CONDITIONAL_EXPRESSION,
                    start_pos,
                    self.node_end(),
                    ConditionalExprData {
                        condition: left,
                        when_true,
                        when_false,
                    },
                );
                continue;
            }

            let right = if op.is_assignment_operator() {
                self.parse_assignment_expression()
            } else {
                // `**` is right associative.
                let next_min = if op == SyntaxKind::AsteriskAsteriskToken {
                    precedence
                } else {
                    precedence + 1
                };
                self.parse_binary_expression(next_min)
            };

            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.node_end(),
                BinaryExprData {
                    left,
                    operator_token: op as u16,
                    right,
                },
            );
        }

        self.exit_recursion();
        left
    }

    /// Parse `expr as Type`, `expr as const`, `expr satisfies Type`
    pub(crate) fn parse_as_or_satisfies_expression(
        &mut self,
        expression: NodeIndex,
        start_pos: u32,
    ) -> NodeIndex {
        let is_satisfies = self.is_token(SyntaxKind::SatisfiesKeyword);
        self.next_token();

        let type_node = if !is_satisfies && self.is_token(SyntaxKind::ConstKeyword) {
            self.parse_token_node()
        } else {
            self.parse_type()
        };

        self.arena.add_type_assertion(
            if is_satisfies {
                syntax_kind_ext::SATISFIES_EXPRESSION
            } else {
                syntax_kind_ext::AS_EXPRESSION
            },
            start_pos,
            self.node_end(),
            TypeAssertionData {
                expression,
                type_node,
            },
        )
    }

    /// Parse unary expression
    pub(crate) fn parse_unary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.node_end(),
                    UnaryExprData { operator, operand },
                )
            }
            SyntaxKind::DeleteKeyword | SyntaxKind::TypeOfKeyword | SyntaxKind::VoidKeyword => {
                let kind = match self.token() {
                    SyntaxKind::DeleteKeyword => syntax_kind_ext::DELETE_EXPRESSION,
                    SyntaxKind::TypeOfKeyword => syntax_kind_ext::TYPE_OF_EXPRESSION,
                    _ => syntax_kind_ext::VOID_EXPRESSION,
                };
                self.next_token();
                let expression = self.parse_unary_expression();
                self.arena.add_unary_expr_ex(
                    kind,
                    start_pos,
                    self.node_end(),
                    UnaryExprDataEx { expression },
                )
            }
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.next_token();
                let expression = self.parse_unary_expression();
                self.arena.add_unary_expr_ex(
                    syntax_kind_ext::AWAIT_EXPRESSION,
                    start_pos,
                    self.node_end(),
                    UnaryExprDataEx { expression },
                )
            }
            SyntaxKind::LessThanToken => self.parse_angle_bracket_assertion(),
            _ => self.parse_postfix_expression(),
        }
    }

    /// `await` is an operator in async functions and at module top level.
    fn is_await_expression(&mut self) -> bool {
        if self.in_context(CONTEXT_FLAG_ASYNC) {
            return true;
        }
        if self.in_context(CONTEXT_FLAG_IN_FUNCTION) {
            return false;
        }
        self.look_ahead(|state| {
            state.next_token();
            if state.has_preceding_line_break() {
                return false;
            }
            match state.token() {
                SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::SlashToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::LessThanToken => false,
                _ => state.is_start_of_expression(),
            }
        })
    }

    /// `<Type>expr` (legacy type assertion in `.ts` files)
    fn parse_angle_bracket_assertion(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_unary_expression();
        self.arena.add_type_assertion(
            syntax_kind_ext::AS_EXPRESSION,
            start_pos,
            self.node_end(),
            TypeAssertionData {
                expression,
                type_node,
            },
        )
    }

    /// Parse postfix expression (`x++`, `x--`)
    pub(crate) fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();

        if (self.is_token(SyntaxKind::PlusPlusToken) || self.is_token(SyntaxKind::MinusMinusToken))
            && !self.has_preceding_line_break()
        {
            let operator = self.token() as u16;
            self.next_token();
            return self.arena.add_unary_expr(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                start_pos,
                self.node_end(),
                UnaryExprData {
                    operator,
                    operand: expression,
                },
            );
        }

        expression
    }

    // =========================================================================
    // Member access and calls
    // =========================================================================

    /// Parse left-hand side expression (member access, calls, optional chains)
    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_member_expression_base();
        self.parse_member_and_call_tail(expression, start_pos, true)
    }

    /// Primary expression, `new` expression, `super` or `import`.
    fn parse_member_expression_base(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::SuperKeyword => self.parse_token_node(),
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => self.parse_primary_expression(),
        }
    }

    /// `import(...)` callee or `import.meta`
    fn parse_import_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_meta = self.look_ahead(|state| {
            state.next_token();
            state.is_token(SyntaxKind::DotToken)
        });
        if !is_meta {
            return self.parse_token_node();
        }
        self.next_token();
        self.next_token();
        self.parse_identifier_name();
        self.arena
            .add_token(syntax_kind_ext::META_PROPERTY, start_pos, self.node_end())
    }

    /// Parse `.name`, `[expr]`, `(args)`, `?.`, `!` and tagged templates.
    fn parse_member_and_call_tail(
        &mut self,
        mut expression: NodeIndex,
        start_pos: u32,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expression = self.add_access(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start_pos,
                        expression,
                        name,
                        false,
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list();
                            let call = self.add_call(
                                syntax_kind_ext::CALL_EXPRESSION,
                                start_pos,
                                expression,
                                Some(arguments),
                            );
                            self.add_node_flags(call, node_flags::OPTIONAL_CHAIN);
                            call
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument = self.parse_element_argument();
                            self.add_access(
                                syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                                start_pos,
                                expression,
                                argument,
                                true,
                            )
                        }
                        _ => {
                            let name = self.parse_member_name();
                            self.add_access(
                                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                                start_pos,
                                expression,
                                name,
                                true,
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_argument();
                    expression = self.add_access(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start_pos,
                        expression,
                        argument,
                        false,
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_argument_list();
                    expression = self.add_call(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start_pos,
                        expression,
                        Some(arguments),
                    );
                }
                SyntaxKind::LessThanToken if allow_calls && self.is_type_argument_list_for_call() => {
                    self.skip_type_arguments();
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = self.arena.add_unary_expr_ex(
                        syntax_kind_ext::NON_NULL_EXPRESSION,
                        start_pos,
                        self.node_end(),
                        UnaryExprDataEx { expression },
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_literal();
                    expression = self.arena.add_tagged_template(
                        syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION,
                        start_pos,
                        self.node_end(),
                        TaggedTemplateData {
                            tag: expression,
                            template,
                        },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn add_access(
        &mut self,
        kind: u16,
        start_pos: u32,
        expression: NodeIndex,
        name_or_argument: NodeIndex,
        question_dot_token: bool,
    ) -> NodeIndex {
        let access = self.arena.add_access_expr(
            kind,
            start_pos,
            self.node_end(),
            AccessExprData {
                expression,
                name_or_argument,
                question_dot_token,
            },
        );
        if question_dot_token {
            self.add_node_flags(access, node_flags::OPTIONAL_CHAIN);
        }
        access
    }

    fn add_call(
        &mut self,
        kind: u16,
        start_pos: u32,
        expression: NodeIndex,
        arguments: Option<NodeList>,
    ) -> NodeIndex {
        self.arena.add_call_expr(
            kind,
            start_pos,
            self.node_end(),
            CallExprData {
                expression,
                arguments,
            },
        )
    }

    /// Name after `.` or `?.`: any identifier, keyword or `#private`.
    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.parse_private_identifier();
        }
        self.parse_identifier_name()
    }

    /// `[expr]` of an element access
    fn parse_element_argument(&mut self) -> NodeIndex {
        self.next_token();
        let argument = if self.is_token(SyntaxKind::CloseBracketToken) {
            self.error_expression_expected();
            self.create_missing_expression()
        } else {
            self.with_context(0, NESTED_CLEAR, |state| state.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        argument
    }

    /// Parse argument list: `(a, ...b, c)`
    pub(crate) fn parse_argument_list(&mut self) -> NodeList {
        self.next_token();
        let mut arguments = Vec::new();
        let mut has_trailing_comma = false;

        self.with_context(0, NESTED_CLEAR, |state| {
            while !state.is_token(SyntaxKind::CloseParenToken)
                && !state.is_token(SyntaxKind::EndOfFileToken)
            {
                let argument = if state.is_token(SyntaxKind::DotDotDotToken) {
                    state.parse_spread_element()
                } else {
                    state.parse_assignment_expression()
                };
                arguments.push(argument);
                if !state.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
                has_trailing_comma = state.is_token(SyntaxKind::CloseParenToken);
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);

        NodeList {
            nodes: arguments,
            has_trailing_comma,
        }
    }

    fn parse_spread_element(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        self.arena.add_unary_expr_ex(
            syntax_kind_ext::SPREAD_ELEMENT,
            start_pos,
            self.node_end(),
            UnaryExprDataEx { expression },
        )
    }

    /// Parse `new X`, `new X(args)`, `new.target`
    pub(crate) fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();

        if self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            self.parse_identifier_name();
            return self
                .arena
                .add_token(syntax_kind_ext::META_PROPERTY, start_pos, self.node_end());
        }

        let callee_start = self.token_pos();
        let callee = self.parse_member_expression_base();
        let expression = self.parse_member_and_call_tail(callee, callee_start, false);

        if self.is_token(SyntaxKind::LessThanToken) && self.is_type_argument_list_for_call() {
            self.skip_type_arguments();
        }

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };

        self.add_call(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            expression,
            arguments,
        )
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    /// Parse primary expression
    pub(crate) fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal(),
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.current_token = self.scanner.re_scan_slash_token();
                self.parse_literal()
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_token_node(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::AsyncKeyword
                if self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::FunctionKeyword) && !state.has_preceding_line_break()
                }) =>
            {
                self.parse_function_expression()
            }
            SyntaxKind::ClassKeyword => {
                let start_pos = self.token_pos();
                self.parse_class_like(syntax_kind_ext::CLASS_EXPRESSION, start_pos)
            }
            SyntaxKind::AtToken => {
                let start_pos = self.token_pos();
                self.skip_decorators();
                if self.is_token(SyntaxKind::ClassKeyword) {
                    self.parse_class_like(syntax_kind_ext::CLASS_EXPRESSION, start_pos)
                } else {
                    self.error_expression_expected();
                    self.create_missing_expression()
                }
            }
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.error_expression_expected();
                self.create_missing_expression()
            }
        }
    }

    /// Parse a literal token (numbers, bigints, strings, templates, regexes)
    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token();
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.get_token_value().to_string();
        let value = if kind == SyntaxKind::NumericLiteral {
            numeric_literal_value(self.scanner.get_token_text())
        } else {
            None
        };
        if self.scanner.is_unterminated() {
            self.error_at_current_token("Unterminated literal.");
        }
        self.next_token();
        self.arena
            .add_literal(kind as u16, start_pos, end_pos, LiteralData { text, value })
    }

    /// Parse a template: either a substitution-free literal or a template expression.
    pub(crate) fn parse_template_literal(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::TemplateHead) {
            self.parse_template_expression()
        } else {
            self.parse_literal()
        }
    }

    /// Parse `` `head${expr}middle${expr}tail` ``
    pub(crate) fn parse_template_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let head = self.parse_literal();
        let mut spans = Vec::new();

        loop {
            let span_start = self.token_pos();
            let expression = self.with_context(0, NESTED_CLEAR, |state| state.parse_expression());
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_at_current_token("'}' expected.");
                break;
            }
            self.current_token = self.scanner.re_scan_template_token();
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            let literal = self.parse_literal();
            spans.push(self.arena.add_template_span(
                syntax_kind_ext::TEMPLATE_SPAN,
                span_start,
                self.node_end(),
                TemplateSpanData {
                    expression,
                    literal,
                },
            ));
            if is_tail {
                break;
            }
        }

        self.arena.add_template_expr(
            syntax_kind_ext::TEMPLATE_EXPRESSION,
            start_pos,
            self.node_end(),
            TemplateExprData {
                head,
                template_spans: NodeList::from_nodes(spans),
            },
        )
    }

    /// Parse parenthesized expression
    pub(crate) fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.with_context(0, NESTED_CLEAR, |state| state.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.arena.add_parenthesized(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            start_pos,
            self.node_end(),
            ParenthesizedData { expression },
        )
    }

    fn spans_multiple_lines(&self, start: u32, end: u32) -> bool {
        self.get_source_text()
            .get(start as usize..end as usize)
            .is_some_and(|text| text.contains('\n'))
    }

    /// Parse array literal: `[a, , ...b]`
    pub(crate) fn parse_array_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        let mut has_trailing_comma = false;

        self.with_context(0, NESTED_CLEAR, |state| {
            while !state.is_token(SyntaxKind::CloseBracketToken)
                && !state.is_token(SyntaxKind::EndOfFileToken)
            {
                let element = match state.token() {
                    SyntaxKind::CommaToken => {
                        let pos = state.token_pos();
                        state
                            .arena
                            .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos)
                    }
                    SyntaxKind::DotDotDotToken => state.parse_spread_element(),
                    _ => state.parse_assignment_expression(),
                };
                elements.push(element);
                if !state.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
                has_trailing_comma = state.is_token(SyntaxKind::CloseBracketToken);
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let end_pos = self.node_end();
        let multi_line = self.spans_multiple_lines(start_pos, end_pos);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData {
                elements: NodeList {
                    nodes: elements,
                    has_trailing_comma,
                },
                multi_line,
            },
        )
    }

    /// Parse object literal: `{ a, b: c, ...d, m() {}, get x() {} }`
    pub(crate) fn parse_object_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        let mut has_trailing_comma = false;

        self.with_context(0, NESTED_CLEAR, |state| {
            while !state.is_token(SyntaxKind::CloseBraceToken)
                && !state.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = state.token_pos();
                let element = state.parse_object_literal_element();
                elements.push(element);
                if !state.parse_optional(SyntaxKind::CommaToken) {
                    if state.token_pos() == before {
                        state.next_token();
                    }
                    break;
                }
                has_trailing_comma = state.is_token(SyntaxKind::CloseBraceToken);
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end_pos = self.node_end();
        let multi_line = self.spans_multiple_lines(start_pos, end_pos);
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData {
                elements: NodeList {
                    nodes: elements,
                    has_trailing_comma,
                },
                multi_line,
            },
        )
    }

    /// True if the token after the current one can start a property name
    /// on the same line (so the current `get`/`set`/`async`/`static` is a modifier).
    pub(crate) fn next_token_is_property_name_on_same_line(&mut self) -> bool {
        self.look_ahead(|state| {
            state.next_token();
            !state.has_preceding_line_break() && state.is_property_name_start()
        })
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::AsteriskToken
        ) || self.is_identifier_or_keyword()
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        if self.is_token(SyntaxKind::DotDotDotToken) {
            self.next_token();
            let expression = self.parse_assignment_expression();
            return self.arena.add_unary_expr_ex(
                syntax_kind_ext::SPREAD_ASSIGNMENT,
                start_pos,
                self.node_end(),
                UnaryExprDataEx { expression },
            );
        }

        if (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.next_token_is_property_name_on_same_line()
        {
            let kind = if self.is_token(SyntaxKind::GetKeyword) {
                syntax_kind_ext::GET_ACCESSOR
            } else {
                syntax_kind_ext::SET_ACCESSOR
            };
            self.next_token();
            let name = self.parse_property_name();
            return self.parse_method_rest(kind, start_pos, name, false, false);
        }

        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_token_is_property_name_on_same_line();
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let name = self.parse_property_name();

        if is_async
            || is_generator
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            return self.parse_method_rest(
                syntax_kind_ext::METHOD_DECLARATION,
                start_pos,
                name,
                is_async,
                is_generator,
            );
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start_pos,
                self.node_end(),
                PropertyAssignmentData { name, initializer },
            );
        }

        // Shorthand `{ a }` or cover-initialized `{ a = 1 }` (destructuring targets)
        let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_shorthand_property(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            start_pos,
            self.node_end(),
            ShorthandPropertyData {
                name,
                object_assignment_initializer,
            },
        )
    }

    /// Parameters, return type and body of a method, accessor or constructor.
    pub(crate) fn parse_method_rest(
        &mut self,
        kind: u16,
        start_pos: u32,
        name: NodeIndex,
        is_async: bool,
        is_generator: bool,
    ) -> NodeIndex {
        self.parse_optional(SyntaxKind::QuestionToken);
        self.skip_type_parameters();
        let (parameters, type_annotation, body) =
            self.parse_signature_and_body(is_async, is_generator);
        self.arena.add_function(
            kind,
            start_pos,
            self.node_end(),
            FunctionData {
                name,
                parameters,
                type_annotation,
                body,
                is_async,
                asterisk_token: is_generator,
            },
        )
    }

    /// `(params): Type { body }`. The body is NONE for overloads and
    /// abstract or ambient declarations.
    pub(crate) fn parse_signature_and_body(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> (NodeList, NodeIndex, NodeIndex) {
        let mut set = CONTEXT_FLAG_IN_FUNCTION;
        let mut clear = NESTED_CLEAR;
        if is_async {
            set |= CONTEXT_FLAG_ASYNC;
        } else {
            clear |= CONTEXT_FLAG_ASYNC;
        }
        if is_generator {
            set |= CONTEXT_FLAG_GENERATOR;
        } else {
            clear |= CONTEXT_FLAG_GENERATOR;
        }

        let parameters = self.with_context(set, clear, |state| state.parse_parameter_list());
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.with_context(set, clear, |state| state.parse_block())
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };
        (parameters, type_annotation, body)
    }

    /// Parse a property name: identifier, keyword, string, number, `[computed]`, `#private`
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal()
            }
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            SyntaxKind::OpenBracketToken => {
                let start_pos = self.token_pos();
                self.next_token();
                let expression =
                    self.with_context(0, NESTED_CLEAR, |state| state.parse_assignment_expression());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_computed_property(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start_pos,
                    self.node_end(),
                    ComputedPropertyData { expression },
                )
            }
            _ if self.is_identifier_or_keyword() => self.parse_identifier_name(),
            _ => {
                self.error_at_current_token("Property assignment expected.");
                self.create_missing_expression()
            }
        }
    }

    /// Parse function expression: `function name(params) { body }`
    pub(crate) fn parse_function_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.skip_type_parameters();
        let (parameters, type_annotation, body) =
            self.parse_signature_and_body(is_async, is_generator);

        self.arena.add_function(
            syntax_kind_ext::FUNCTION_EXPRESSION,
            start_pos,
            self.node_end(),
            FunctionData {
                name,
                parameters,
                type_annotation,
                body,
                is_async,
                asterisk_token: is_generator,
            },
        )
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Parse a binding or reference identifier
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.error_at_current_token("Identifier expected.");
            return self.create_missing_expression();
        }
        self.parse_identifier_name()
    }

    /// Parse an identifier name: keywords are allowed (`a.default`, `{ if: 1 }`)
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            self.error_at_current_token("Identifier expected.");
            return self.create_missing_expression();
        }
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let escaped_text = self.scanner.get_token_value().to_string();
        self.next_token();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            start_pos,
            end_pos,
            IdentifierData { escaped_text },
        )
    }

    pub(crate) fn parse_private_identifier(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let escaped_text = self.scanner.get_token_value().to_string();
        self.next_token();
        self.arena.add_identifier(
            SyntaxKind::PrivateIdentifier as u16,
            start_pos,
            end_pos,
            IdentifierData { escaped_text },
        )
    }

    // =========================================================================
    // Parameters and binding patterns
    // =========================================================================

    /// Parse `(a, b = 1, ...rest)` including TypeScript annotations.
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        let mut has_trailing_comma = false;
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return NodeList::new();
        }

        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            has_trailing_comma = self.is_token(SyntaxKind::CloseParenToken);
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        NodeList {
            nodes: parameters,
            has_trailing_comma,
        }
    }

    fn is_parameter_modifier(&mut self) -> bool {
        let is_modifier_word = matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
        ) || (self.is_token(SyntaxKind::Identifier)
            && self.scanner.get_token_value() == "override");
        is_modifier_word
            && self.look_ahead(|state| {
                state.next_token();
                state.is_identifier()
                    || state.is_token(SyntaxKind::OpenBraceToken)
                    || state.is_token(SyntaxKind::OpenBracketToken)
            })
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        self.skip_decorators();
        let start_pos = self.token_pos();
        while self.is_parameter_modifier() {
            self.next_token();
        }

        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.is_token(SyntaxKind::ThisKeyword) {
            self.parse_identifier_name()
        } else {
            self.parse_binding_name()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let initializer = self.parse_initializer();

        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            start_pos,
            self.node_end(),
            ParameterData {
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// `= expr` or NONE.
    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.with_context(0, CONTEXT_FLAG_IN_CONDITIONAL_TRUE, |state| {
                state.parse_assignment_expression()
            })
        } else {
            NodeIndex::NONE
        }
    }

    /// Identifier, `{...}` or `[...]` binding target.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    /// Parse `{ a, b: c, d = 1, ...rest }` in a binding position
    pub(crate) fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();

        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let (property_name, name) = if dot_dot_dot_token {
                (NodeIndex::NONE, self.parse_identifier())
            } else {
                let property = self.parse_property_name();
                if self.parse_optional(SyntaxKind::ColonToken) {
                    (property, self.parse_binding_name())
                } else {
                    (NodeIndex::NONE, property)
                }
            };
            let initializer = self.parse_initializer();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_start,
                self.node_end(),
                BindingElementData {
                    dot_dot_dot_token,
                    property_name,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start_pos,
            self.node_end(),
            BindingPatternData {
                elements: NodeList::from_nodes(elements),
            },
        )
    }

    /// Parse `[a, , b = 1, ...rest]` in a binding position
    pub(crate) fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();

        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }
            let element_start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_initializer();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_start,
                self.node_end(),
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);

        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start_pos,
            self.node_end(),
            BindingPatternData {
                elements: NodeList::from_nodes(elements),
            },
        )
    }

    /// Decorators are parsed for their extent and dropped.
    pub(crate) fn skip_decorators(&mut self) {
        while self.parse_optional(SyntaxKind::AtToken) {
            self.parse_left_hand_side_expression();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/state_expression_tests.rs"]
mod tests;
