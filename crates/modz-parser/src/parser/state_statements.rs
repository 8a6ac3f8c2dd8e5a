//! Parser state - statement and declaration parsing methods

use modz_scanner::SyntaxKind;

use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR,
    CONTEXT_FLAG_IN_CONDITIONAL_TRUE, CONTEXT_FLAG_IN_FUNCTION, ParserState,
};
use crate::parser::node::*;
use crate::parser::{NodeIndex, NodeList, node_flags, syntax_kind_ext};

impl ParserState {
    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.next_token();
            return NodeIndex::NONE;
        }
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, start_pos, self.node_end())
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(start_pos, 0),
            SyntaxKind::ConstKeyword => {
                if self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::EnumKeyword)
                }) {
                    self.next_token();
                    self.parse_enum_declaration(start_pos)
                } else {
                    self.parse_variable_statement(start_pos, node_flags::CONST)
                }
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(start_pos, node_flags::LET)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start_pos),
            SyntaxKind::AsyncKeyword if self.next_is_function_on_same_line() => {
                self.parse_function_declaration(start_pos)
            }
            SyntaxKind::ClassKeyword => {
                self.parse_class_like(syntax_kind_ext::CLASS_DECLARATION, start_pos)
            }
            SyntaxKind::AtToken => {
                self.skip_decorators();
                self.parse_statement_worker_at(start_pos)
            }
            SyntaxKind::AbstractKeyword
                if self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::ClassKeyword) && !state.has_preceding_line_break()
                }) =>
            {
                self.next_token();
                self.parse_class_like(syntax_kind_ext::CLASS_DECLARATION, start_pos)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_jump_statement(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.arena
                    .add_token(syntax_kind_ext::DEBUGGER_STATEMENT, start_pos, self.node_end())
            }
            SyntaxKind::ImportKeyword
                if !self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::OpenParenToken) || state.is_token(SyntaxKind::DotToken)
                }) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::InterfaceKeyword if self.next_is_identifier_on_same_line() => {
                self.parse_interface_declaration(start_pos)
            }
            SyntaxKind::TypeKeyword if self.next_is_identifier_on_same_line() => {
                self.parse_type_alias_declaration(start_pos)
            }
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(start_pos),
            SyntaxKind::DeclareKeyword if self.next_is_declaration_on_same_line() => {
                self.next_token();
                let declaration = self.parse_statement_worker();
                self.add_node_flags(declaration, node_flags::AMBIENT);
                self.extend_node_start(declaration, start_pos);
                declaration
            }
            SyntaxKind::Identifier
                if (self.is_contextual_identifier("namespace")
                    || self.is_contextual_identifier("module")
                    || self.is_contextual_identifier("global"))
                    && self.look_ahead(|state| {
                        state.next_token();
                        !state.has_preceding_line_break()
                            && (state.is_identifier_or_keyword()
                                || state.is_token(SyntaxKind::StringLiteral)
                                || state.is_token(SyntaxKind::OpenBraceToken))
                    }) =>
            {
                self.parse_namespace_declaration()
            }
            _ if self.is_identifier()
                && self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::ColonToken)
                }) =>
            {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Statement after decorators: a class, possibly exported.
    fn parse_statement_worker_at(&mut self, start_pos: u32) -> NodeIndex {
        let statement = self.parse_statement_worker();
        self.extend_node_start(statement, start_pos);
        statement
    }

    /// Move a node's start back to include leading modifiers.
    fn extend_node_start(&mut self, index: NodeIndex, start_pos: u32) {
        if let Some(node) = self.arena.get_mut(index)
            && start_pos < node.pos
        {
            node.pos = start_pos;
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|state| {
            state.next_token();
            state.is_identifier()
                || state.is_token(SyntaxKind::OpenBraceToken)
                || state.is_token(SyntaxKind::OpenBracketToken)
        })
    }

    fn next_is_function_on_same_line(&mut self) -> bool {
        self.look_ahead(|state| {
            state.next_token();
            state.is_token(SyntaxKind::FunctionKeyword) && !state.has_preceding_line_break()
        })
    }

    fn next_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|state| {
            state.next_token();
            state.is_identifier() && !state.has_preceding_line_break()
        })
    }

    fn next_is_declaration_on_same_line(&mut self) -> bool {
        self.look_ahead(|state| {
            state.next_token();
            !state.has_preceding_line_break()
                && (state.is_identifier_or_keyword() || state.is_token(SyntaxKind::AtToken))
        })
    }

    /// Parse block statement
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_block_of_kind(syntax_kind_ext::BLOCK, start_pos)
    }

    fn parse_block_of_kind(&mut self, kind: u16, start_pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.with_context(
            0,
            CONTEXT_FLAG_DISALLOW_IN | CONTEXT_FLAG_IN_CONDITIONAL_TRUE,
            |state| state.parse_statement_list(|s| s.is_token(SyntaxKind::CloseBraceToken)),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.node_end();
        let multi_line = self
            .get_source_text()
            .get(start_pos as usize..end_pos as usize)
            .is_some_and(|text| text.contains('\n'));
        self.arena.add_block(
            kind,
            start_pos,
            end_pos,
            BlockData {
                statements,
                multi_line,
            },
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            self.node_end(),
            ExprStatementData { expression },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            start_pos,
            self.node_end(),
            LabeledData { label, statement },
        )
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn parse_variable_statement(&mut self, start_pos: u32, flags: u16) -> NodeIndex {
        let list = self.parse_variable_declaration_list(flags);
        self.parse_semicolon();
        let statement = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start_pos,
            self.node_end(),
            VariableData {
                declarations: NodeList::from_nodes(vec![list]),
            },
        );
        self.add_node_flags(statement, flags);
        statement
    }

    /// Parse `var|let|const a = 1, b` (current token is the keyword).
    pub(crate) fn parse_variable_declaration_list(&mut self, flags: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_name();
            let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);
            let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
                self.parse_type_annotation()
            } else {
                NodeIndex::NONE
            };
            let initializer = self.parse_initializer();
            let declaration = self.arena.add_variable_declaration(
                syntax_kind_ext::VARIABLE_DECLARATION,
                decl_start,
                self.node_end(),
                VariableDeclarationData {
                    name,
                    exclamation_token,
                    type_annotation,
                    initializer,
                },
            );
            self.add_node_flags(declaration, flags);
            declarations.push(declaration);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            start_pos,
            self.node_end(),
            VariableData {
                declarations: NodeList::from_nodes(declarations),
            },
        );
        self.add_node_flags(list, flags);
        list
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// `(expr)` of `if`, `while`, `switch`
    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.with_context(
            0,
            CONTEXT_FLAG_DISALLOW_IN | CONTEXT_FLAG_IN_CONDITIONAL_TRUE,
            |state| state.parse_expression(),
        );
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start_pos,
            self.node_end(),
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        // The semicolon after `do ... while (x)` is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            start_pos,
            self.node_end(),
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start_pos,
            self.node_end(),
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    /// `for (;;)`, `for (x in y)`, `for (x of y)`, `for await (x of y)`
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let await_modifier = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_context(
                CONTEXT_FLAG_DISALLOW_IN,
                CONTEXT_FLAG_IN_CONDITIONAL_TRUE,
                |state| match state.token() {
                    SyntaxKind::VarKeyword => state.parse_variable_declaration_list(0),
                    SyntaxKind::ConstKeyword => {
                        state.parse_variable_declaration_list(node_flags::CONST)
                    }
                    SyntaxKind::LetKeyword if state.is_let_declaration() => {
                        state.parse_variable_declaration_list(node_flags::LET)
                    }
                    _ => state.parse_expression(),
                },
            )
        };

        let nested_clear = CONTEXT_FLAG_DISALLOW_IN | CONTEXT_FLAG_IN_CONDITIONAL_TRUE;
        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let kind = if self.is_token(SyntaxKind::OfKeyword) {
                syntax_kind_ext::FOR_OF_STATEMENT
            } else {
                syntax_kind_ext::FOR_IN_STATEMENT
            };
            self.next_token();
            let expression = self.with_context(0, nested_clear, |state| {
                if kind == syntax_kind_ext::FOR_OF_STATEMENT {
                    state.parse_assignment_expression()
                } else {
                    state.parse_expression()
                }
            });
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.arena.add_for_in_of(
                kind,
                start_pos,
                self.node_end(),
                ForInOfData {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.with_context(0, nested_clear, |state| state.parse_expression())
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.with_context(0, nested_clear, |state| state.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();

        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start_pos,
            self.node_end(),
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_jump_statement(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena
            .add_jump(kind, start_pos, self.node_end(), JumpData { label })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::RETURN_STATEMENT,
            start_pos,
            self.node_end(),
            ReturnData { expression },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = if self.has_preceding_line_break() {
            self.error_at_current_token("Line break not permitted here.");
            self.create_missing_expression()
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_return(
            syntax_kind_ext::THROW_STATEMENT,
            start_pos,
            self.node_end(),
            ReturnData { expression },
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let decl_start = self.token_pos();
                let name = self.parse_binding_name();
                let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
                    self.parse_type_annotation()
                } else {
                    NodeIndex::NONE
                };
                let declaration = self.arena.add_variable_declaration(
                    syntax_kind_ext::VARIABLE_DECLARATION,
                    decl_start,
                    self.node_end(),
                    VariableDeclarationData {
                        name,
                        exclamation_token: false,
                        type_annotation,
                        initializer: NodeIndex::NONE,
                    },
                );
                self.parse_expected(SyntaxKind::CloseParenToken);
                declaration
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_start,
                self.node_end(),
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.error_at_current_token("'catch' or 'finally' expected.");
        }

        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            start_pos,
            self.node_end(),
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_start = self.token_pos();
            let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
                let expression = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |state| {
                    state.parse_expression()
                });
                (syntax_kind_ext::CASE_CLAUSE, expression)
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
            } else {
                self.error_at_current_token("'case' or 'default' expected.");
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_statement_list(|state| {
                state.is_token(SyntaxKind::CaseKeyword)
                    || state.is_token(SyntaxKind::DefaultKeyword)
                    || state.is_token(SyntaxKind::CloseBraceToken)
            });
            clauses.push(self.arena.add_case_clause(
                kind,
                clause_start,
                self.node_end(),
                CaseClauseData {
                    expression,
                    statements,
                },
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            start_pos,
            self.node_end(),
            SwitchData {
                expression,
                clauses: NodeList::from_nodes(clauses),
            },
        )
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    /// `[async] function [*] name(params): R { body }`
    fn parse_function_declaration(&mut self, start_pos: u32) -> NodeIndex {
        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        // Name is optional for `export default function () {}`.
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.skip_type_parameters();
        let (parameters, type_annotation, body) =
            self.parse_signature_and_body(is_async, is_generator);
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
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

    /// Class declaration or expression (current token is `class`).
    pub(crate) fn parse_class_like(&mut self, kind: u16, start_pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.skip_type_parameters();

        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            let heritage = self.parse_left_hand_side_expression();
            if self.is_token(SyntaxKind::LessThanToken) {
                self.skip_type_arguments();
            }
            heritage
        } else {
            NodeIndex::NONE
        };
        if self.is_token(SyntaxKind::ImplementsKeyword) {
            while !self.is_token(SyntaxKind::OpenBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                self.next_token();
            }
        }

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.error_at_current_token("Unexpected token. A class member was expected.");
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_class(
            kind,
            start_pos,
            self.node_end(),
            ClassData {
                name,
                heritage,
                members: NodeList::from_nodes(members),
            },
        )
    }

    fn is_class_member_modifier(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::StaticKeyword
        ) || self.is_contextual_identifier("override")
            || self.is_contextual_identifier("accessor")
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return NodeIndex::NONE;
        }
        let start_pos = self.token_pos();
        self.skip_decorators();

        let mut is_static = false;
        while self.is_class_member_modifier() {
            if self.is_token(SyntaxKind::StaticKeyword)
                && self.look_ahead(|state| {
                    state.next_token();
                    state.is_token(SyntaxKind::OpenBraceToken)
                })
            {
                self.next_token();
                return self.with_context(
                    CONTEXT_FLAG_IN_FUNCTION,
                    CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR,
                    |state| {
                        state.parse_block_of_kind(
                            syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION,
                            start_pos,
                        )
                    },
                );
            }
            // A modifier keyword not followed by a name is itself the member name.
            if !self.next_token_is_property_name_on_same_line() {
                break;
            }
            is_static |= self.is_token(SyntaxKind::StaticKeyword);
            self.next_token();
        }

        // Index signature: `[key: string]: T;`
        if self.is_token(SyntaxKind::OpenBracketToken)
            && self.look_ahead(|state| {
                state.next_token();
                state.is_identifier_or_keyword() && {
                    state.next_token();
                    state.is_token(SyntaxKind::ColonToken)
                }
            })
        {
            self.skip_balanced(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
            if self.is_token(SyntaxKind::ColonToken) {
                self.parse_type_annotation();
            }
            self.parse_semicolon();
            return NodeIndex::NONE;
        }

        let member = self.parse_class_member_body(start_pos);
        if is_static {
            self.add_node_flags(member, node_flags::STATIC);
        }
        member
    }

    fn parse_class_member_body(&mut self, start_pos: u32) -> NodeIndex {
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

        let is_constructor = (self.is_contextual_identifier("constructor")
            || (self.is_token(SyntaxKind::StringLiteral)
                && self.scanner.get_token_value() == "constructor"))
            && self.look_ahead(|state| {
                state.next_token();
                state.is_token(SyntaxKind::OpenParenToken)
            });
        let name = self.parse_property_name();

        if is_constructor {
            return self.parse_method_rest(syntax_kind_ext::CONSTRUCTOR, start_pos, name, false, false);
        }

        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
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

        self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let initializer = self.with_context(
            CONTEXT_FLAG_IN_FUNCTION,
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
            |state| state.parse_initializer(),
        );
        self.parse_semicolon();

        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start_pos,
            self.node_end(),
            PropertyDeclData {
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }

    // =========================================================================
    // TypeScript declarations
    // =========================================================================

    fn parse_interface_declaration(&mut self, start_pos: u32) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        while !self.is_token(SyntaxKind::OpenBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.next_token();
        }
        self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
        self.arena.add_declaration(
            syntax_kind_ext::INTERFACE_DECLARATION,
            start_pos,
            self.node_end(),
            DeclarationData {
                name,
                type_node: NodeIndex::NONE,
            },
        )
    }

    fn parse_type_alias_declaration(&mut self, start_pos: u32) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        self.skip_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add_declaration(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            start_pos,
            self.node_end(),
            DeclarationData { name, type_node },
        )
    }

    fn parse_enum_declaration(&mut self, start_pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
        } else {
            self.error_at_current_token("'{' expected.");
        }
        self.arena.add_declaration(
            syntax_kind_ext::ENUM_DECLARATION,
            start_pos,
            self.node_end(),
            DeclarationData {
                name,
                type_node: NodeIndex::NONE,
            },
        )
    }

    /// `namespace A.B { ... }`, `module "m" { ... }`, `global { ... }`.
    /// The body is kept as a block so its code is still visited.
    fn parse_namespace_declaration(&mut self) -> NodeIndex {
        self.next_token();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            if self.is_token(SyntaxKind::StringLiteral) {
                self.next_token();
            } else {
                self.parse_identifier_name();
                while self.parse_optional(SyntaxKind::DotToken) {
                    self.parse_identifier_name();
                }
            }
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_module_specifier(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            let specifier = self.parse_literal();
            // Import attributes: `with { type: "json" }`
            if (self.is_token(SyntaxKind::WithKeyword) || self.is_contextual_identifier("assert"))
                && !self.has_preceding_line_break()
            {
                self.next_token();
                if self.is_token(SyntaxKind::OpenBraceToken) {
                    self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                }
            }
            specifier
        } else {
            self.error_at_current_token("String literal expected.");
            NodeIndex::NONE
        }
    }

    /// `{ a, b as c, type d }` for imports and exports.
    fn parse_named_specifiers(&mut self, kind: u16) -> Vec<NodeIndex> {
        let mut specifiers = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start_pos = self.token_pos();
            if self.is_token(SyntaxKind::TypeKeyword)
                && self.look_ahead(|state| {
                    state.next_token();
                    state.is_identifier_or_keyword() || state.is_token(SyntaxKind::StringLiteral)
                })
            {
                self.next_token();
            }
            let first = if self.is_token(SyntaxKind::StringLiteral) {
                self.parse_literal()
            } else {
                self.parse_identifier_name()
            };
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                let alias = if self.is_token(SyntaxKind::StringLiteral) {
                    self.parse_literal()
                } else {
                    self.parse_identifier_name()
                };
                (first, alias)
            } else {
                (NodeIndex::NONE, first)
            };
            specifiers.push(self.arena.add_specifier(
                kind,
                start_pos,
                self.node_end(),
                SpecifierData {
                    property_name,
                    name,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        specifiers
    }

    fn add_simple_specifier(&mut self, kind: u16, start_pos: u32, name: NodeIndex) -> NodeIndex {
        self.arena.add_specifier(
            kind,
            start_pos,
            self.node_end(),
            SpecifierData {
                property_name: NodeIndex::NONE,
                name,
            },
        )
    }

    /// `import x from "m"`, `import { a } from "m"`, `import * as ns from "m"`,
    /// `import "m"`, `import x = require("m")`
    fn parse_import_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();

        if self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|state| {
                state.next_token();
                !state.is_token(SyntaxKind::FromKeyword) && !state.is_token(SyntaxKind::EqualsToken)
                    && !state.is_token(SyntaxKind::CommaToken)
            })
        {
            self.next_token();
        }

        let mut specifiers = Vec::new();
        let module_specifier = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_module_specifier()
        } else {
            if self.is_identifier() {
                let spec_start = self.token_pos();
                let name = self.parse_identifier();
                if self.parse_optional(SyntaxKind::EqualsToken) {
                    // `import x = require("m")` / `import x = A.B`
                    let spec = self.add_simple_specifier(syntax_kind_ext::IMPORT_SPECIFIER, spec_start, name);
                    let target = self.parse_left_hand_side_expression();
                    self.parse_semicolon();
                    return self.arena.add_import_decl(
                        syntax_kind_ext::IMPORT_DECLARATION,
                        start_pos,
                        self.node_end(),
                        ImportDeclData {
                            specifiers: NodeList::from_nodes(vec![spec]),
                            module_specifier: target,
                        },
                    );
                }
                specifiers.push(self.add_simple_specifier(
                    syntax_kind_ext::IMPORT_SPECIFIER,
                    spec_start,
                    name,
                ));
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.is_token(SyntaxKind::AsteriskToken) {
                let spec_start = self.token_pos();
                self.next_token();
                self.parse_expected(SyntaxKind::AsKeyword);
                let name = self.parse_identifier();
                specifiers.push(self.add_simple_specifier(
                    syntax_kind_ext::IMPORT_SPECIFIER,
                    spec_start,
                    name,
                ));
            } else if self.is_token(SyntaxKind::OpenBraceToken) {
                specifiers.extend(self.parse_named_specifiers(syntax_kind_ext::IMPORT_SPECIFIER));
            }
            self.parse_expected(SyntaxKind::FromKeyword);
            self.parse_module_specifier()
        };
        self.parse_semicolon();

        self.arena.add_import_decl(
            syntax_kind_ext::IMPORT_DECLARATION,
            start_pos,
            self.node_end(),
            ImportDeclData {
                specifiers: NodeList::from_nodes(specifiers),
                module_specifier,
            },
        )
    }

    /// All `export` forms.
    fn parse_export_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();

        // `export = x;` and `export default <expr>;`
        let is_default = self.is_token(SyntaxKind::DefaultKeyword);
        if self.is_token(SyntaxKind::EqualsToken) || is_default {
            self.next_token();
            let declaration_follows = is_default
                && (matches!(
                    self.token(),
                    SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword | SyntaxKind::AtToken
                ) || (self.is_token(SyntaxKind::AsyncKeyword) && self.next_is_function_on_same_line())
                    || (self.is_token(SyntaxKind::AbstractKeyword)
                        && self.look_ahead(|state| {
                            state.next_token();
                            state.is_token(SyntaxKind::ClassKeyword)
                        }))
                    || (self.is_token(SyntaxKind::InterfaceKeyword)
                        && self.next_is_identifier_on_same_line()));
            if declaration_follows {
                let declaration = self.parse_statement_worker();
                self.add_node_flags(declaration, node_flags::EXPORT | node_flags::DEFAULT);
                self.extend_node_start(declaration, start_pos);
                return declaration;
            }
            let expression = self.parse_assignment_expression();
            self.parse_semicolon();
            let assignment = self.arena.add_unary_expr_ex(
                syntax_kind_ext::EXPORT_ASSIGNMENT,
                start_pos,
                self.node_end(),
                UnaryExprDataEx { expression },
            );
            if is_default {
                self.add_node_flags(assignment, node_flags::DEFAULT);
            }
            return assignment;
        }

        if self.is_token(SyntaxKind::AsKeyword) {
            // `export as namespace X;`
            while !self.can_parse_semicolon() {
                self.next_token();
            }
            self.parse_semicolon();
            return NodeIndex::NONE;
        }

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|state| {
                state.next_token();
                state.is_token(SyntaxKind::OpenBraceToken) || state.is_token(SyntaxKind::AsteriskToken)
            });
        if is_type_only {
            self.next_token();
        }

        if self.is_token(SyntaxKind::AsteriskToken) || self.is_token(SyntaxKind::OpenBraceToken) {
            let mut specifiers = Vec::new();
            if self.is_token(SyntaxKind::AsteriskToken) {
                let spec_start = self.token_pos();
                self.next_token();
                if self.parse_optional(SyntaxKind::AsKeyword) {
                    let name = self.parse_identifier_name();
                    specifiers.push(self.add_simple_specifier(
                        syntax_kind_ext::EXPORT_SPECIFIER,
                        spec_start,
                        name,
                    ));
                }
            } else {
                specifiers = self.parse_named_specifiers(syntax_kind_ext::EXPORT_SPECIFIER);
            }
            let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
                self.parse_module_specifier()
            } else {
                NodeIndex::NONE
            };
            self.parse_semicolon();
            return self.arena.add_export_decl(
                syntax_kind_ext::EXPORT_DECLARATION,
                start_pos,
                self.node_end(),
                ExportDeclData {
                    specifiers: NodeList::from_nodes(specifiers),
                    module_specifier,
                },
            );
        }

        // `export <declaration>`
        let declaration = self.parse_statement_worker();
        self.add_node_flags(declaration, node_flags::EXPORT);
        self.extend_node_start(declaration, start_pos);
        declaration
    }
}

#[cfg(test)]
#[path = "../../tests/state_statement_tests.rs"]
mod tests;
