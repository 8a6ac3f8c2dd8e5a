//! Binder tree walk: scope creation, declaration collection and write tracking.

use modz_parser::node::NodeArena;
use modz_parser::node_access::is_function_like_kind;
use modz_parser::{NodeIndex, node_flags, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::scopes::ContainerKind;
use crate::state::BinderState;
use crate::symbols::symbol_flags;

/// One unit of work for the binder walk.
///
/// The walk keeps its own stack so that long left-deep chains such as
/// `a + b + ... + z` or `a.b.c...` cannot exhaust the thread stack.
enum BindStep {
    Visit(NodeIndex),
    /// Enter a switch's case-block scope and declare its lexical names.
    EnterCaseBlock(NodeIndex),
    ExitScope,
}

impl BinderState {
    /// Bind `root` and everything below it, in source order.
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, root: NodeIndex) {
        let mut steps = vec![BindStep::Visit(root)];
        while let Some(step) = steps.pop() {
            match step {
                BindStep::Visit(idx) => self.visit_node(arena, idx, &mut steps),
                BindStep::EnterCaseBlock(idx) => {
                    self.enter_scope(ContainerKind::Switch, idx);
                    if let Some(switch) = arena.get_switch_at(idx) {
                        for &clause in &switch.clauses.nodes {
                            if let Some(clause_data) = arena.get_case_clause_at(clause) {
                                self.declare_lexical(arena, &clause_data.statements.nodes);
                            }
                        }
                    }
                }
                BindStep::ExitScope => self.exit_scope(),
            }
        }
    }

    fn visit_node(&mut self, arena: &NodeArena, idx: NodeIndex, steps: &mut Vec<BindStep>) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            syntax_kind_ext::SOURCE_FILE => {
                self.enter_scope(ContainerKind::SourceFile, idx);
                if let Some(sf) = arena.get_source_file(node) {
                    self.hoist_var_declarations(arena, &sf.statements.nodes);
                    self.declare_lexical(arena, &sf.statements.nodes);
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::BLOCK => {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(block) = arena.get_block(node) {
                    self.declare_lexical(arena, &block.statements.nodes);
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION => {
                self.enter_scope(ContainerKind::Function, idx);
                if let Some(block) = arena.get_block(node) {
                    self.hoist_var_declarations(arena, &block.statements.nodes);
                    self.declare_lexical(arena, &block.statements.nodes);
                }
                push_scoped_children(arena, idx, steps);
            }
            kind if is_function_like_kind(kind) => self.bind_function(arena, idx, steps),
            syntax_kind_ext::CLASS_DECLARATION | syntax_kind_ext::CLASS_EXPRESSION => {
                self.enter_scope(ContainerKind::Class, idx);
                if node.kind == syntax_kind_ext::CLASS_EXPRESSION
                    && let Some(class) = arena.get_class(node)
                    && let Some(name) = arena.identifier_text(class.name)
                {
                    self.declare_symbol(name, symbol_flags::CLASS, idx, class.name);
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::FOR_STATEMENT => {
                self.enter_scope(ContainerKind::Loop, idx);
                if let Some(loop_data) = arena.get_loop(node) {
                    self.declare_loop_head(arena, loop_data.initializer);
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::FOR_IN_STATEMENT | syntax_kind_ext::FOR_OF_STATEMENT => {
                self.enter_scope(ContainerKind::Loop, idx);
                if let Some(for_data) = arena.get_for_in_of(node) {
                    let initializer = for_data.initializer;
                    if arena.is_kind(initializer, syntax_kind_ext::VARIABLE_DECLARATION_LIST) {
                        self.declare_loop_head(arena, initializer);
                    } else {
                        self.record_write_target(arena, initializer);
                    }
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::CATCH_CLAUSE => {
                self.enter_scope(ContainerKind::CatchClause, idx);
                if let Some(catch) = arena.get_catch_clause(node)
                    && let Some(decl) = arena.get_variable_declaration_at(catch.variable_declaration)
                {
                    let mut names = Vec::new();
                    collect_binding_names(arena, decl.name, catch.variable_declaration, &mut names);
                    for (declaration, ident) in names {
                        self.declare_name(arena, ident, symbol_flags::CATCH_VARIABLE, declaration, false);
                    }
                }
                push_scoped_children(arena, idx, steps);
            }
            syntax_kind_ext::SWITCH_STATEMENT => {
                let Some(switch) = arena.get_switch(node) else {
                    return;
                };
                // The discriminant is evaluated outside the case block.
                steps.push(BindStep::ExitScope);
                steps.extend(switch.clauses.nodes.iter().rev().map(|&clause| BindStep::Visit(clause)));
                steps.push(BindStep::EnterCaseBlock(idx));
                steps.push(BindStep::Visit(switch.expression));
            }
            syntax_kind_ext::BINARY_EXPRESSION => {
                if let Some(binary) = arena.get_binary_expr(node)
                    && is_assignment_operator(binary.operator_token)
                {
                    self.record_write_target(arena, binary.left);
                }
                push_children(arena, idx, steps);
            }
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION | syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                if let Some(unary) = arena.get_unary_expr(node)
                    && (unary.operator == SyntaxKind::PlusPlusToken as u16
                        || unary.operator == SyntaxKind::MinusMinusToken as u16)
                {
                    self.record_write_target(arena, unary.operand);
                }
                push_children(arena, idx, steps);
            }
            _ => push_children(arena, idx, steps),
        }
    }

    fn bind_function(&mut self, arena: &NodeArena, idx: NodeIndex, steps: &mut Vec<BindStep>) {
        let Some(func) = arena.get_function_at(idx) else {
            return;
        };
        self.enter_scope(ContainerKind::Function, idx);

        // A function expression's own name is visible only inside it.
        if arena.is_kind(idx, syntax_kind_ext::FUNCTION_EXPRESSION)
            && let Some(name) = arena.identifier_text(func.name)
        {
            self.declare_symbol(name, symbol_flags::FUNCTION, idx, func.name);
        }

        for &param in &func.parameters.nodes {
            if let Some(param_data) = arena.get_parameter_at(param) {
                let mut names = Vec::new();
                collect_binding_names(arena, param_data.name, param, &mut names);
                for (declaration, ident) in names {
                    self.declare_name(arena, ident, symbol_flags::PARAMETER, declaration, false);
                }
            }
        }

        if let Some(body) = arena.get_block_at(func.body) {
            self.hoist_var_declarations(arena, &body.statements.nodes);
        }

        push_scoped_children(arena, idx, steps);
    }

    // =========================================================================
    // Declaration collection
    // =========================================================================

    fn declare_name(
        &mut self,
        arena: &NodeArena,
        ident: NodeIndex,
        flags: u32,
        declaration: NodeIndex,
        hoisted: bool,
    ) {
        let Some(name) = arena.identifier_text(ident) else {
            return;
        };
        if hoisted {
            self.declare_hoisted(name, flags, declaration, ident);
        } else {
            self.declare_symbol(name, flags, declaration, ident);
        }
    }

    /// Declare `let`/`const` names of a loop head in the loop scope.
    fn declare_loop_head(&mut self, arena: &NodeArena, list: NodeIndex) {
        let Some(list_node) = arena.get(list) else {
            return;
        };
        if list_node.kind != syntax_kind_ext::VARIABLE_DECLARATION_LIST
            || !list_node.has_flag(node_flags::BLOCK_SCOPED)
        {
            return;
        }
        let flags = variable_flags(list_node.flags);
        self.declare_variable_list(arena, list, flags, false);
    }

    fn declare_variable_list(&mut self, arena: &NodeArena, list: NodeIndex, flags: u32, hoisted: bool) {
        let Some(list_data) = arena.get_variable_at(list) else {
            return;
        };
        for &decl in &list_data.declarations.nodes {
            let Some(decl_data) = arena.get_variable_declaration_at(decl) else {
                continue;
            };
            let mut names = Vec::new();
            collect_binding_names(arena, decl_data.name, decl, &mut names);
            for (declaration, ident) in names {
                self.declare_name(arena, ident, flags, declaration, hoisted);
            }
        }
    }

    /// Declare block-scoped names of a statement list in the current scope:
    /// `let`, `const`, functions, classes, enums, imports and type declarations.
    pub(crate) fn declare_lexical(&mut self, arena: &NodeArena, statements: &[NodeIndex]) {
        for &stmt in statements {
            let Some(node) = arena.get(stmt) else {
                continue;
            };
            let ambient = if node.has_flag(node_flags::AMBIENT) {
                symbol_flags::AMBIENT
            } else {
                symbol_flags::NONE
            };
            match node.kind {
                syntax_kind_ext::VARIABLE_STATEMENT if node.has_flag(node_flags::BLOCK_SCOPED) => {
                    let flags = variable_flags(node.flags) | ambient;
                    if let Some(stmt_data) = arena.get_variable(node) {
                        for &list in &stmt_data.declarations.nodes {
                            self.declare_variable_list(arena, list, flags, false);
                        }
                    }
                }
                syntax_kind_ext::FUNCTION_DECLARATION => {
                    if let Some(func) = arena.get_function(node) {
                        self.declare_name(arena, func.name, symbol_flags::FUNCTION | ambient, stmt, false);
                    }
                }
                syntax_kind_ext::CLASS_DECLARATION => {
                    if let Some(class) = arena.get_class(node) {
                        self.declare_name(arena, class.name, symbol_flags::CLASS | ambient, stmt, false);
                    }
                }
                syntax_kind_ext::ENUM_DECLARATION
                | syntax_kind_ext::INTERFACE_DECLARATION
                | syntax_kind_ext::TYPE_ALIAS_DECLARATION => {
                    let flags = match node.kind {
                        syntax_kind_ext::ENUM_DECLARATION => symbol_flags::ENUM,
                        syntax_kind_ext::INTERFACE_DECLARATION => symbol_flags::INTERFACE,
                        _ => symbol_flags::TYPE_ALIAS,
                    };
                    if let Some(decl) = arena.get_declaration(node) {
                        self.declare_name(arena, decl.name, flags | ambient, stmt, false);
                    }
                }
                syntax_kind_ext::IMPORT_DECLARATION => {
                    if let Some(import) = arena.get_import_decl(node) {
                        for &spec in &import.specifiers.nodes {
                            if let Some(spec_data) = arena.get_specifier_at(spec) {
                                self.declare_name(arena, spec_data.name, symbol_flags::ALIAS, spec, false);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Hoist `var` declarations (and functions declared in nested blocks)
    /// to the current function or file scope.
    pub(crate) fn hoist_var_declarations(&mut self, arena: &NodeArena, statements: &[NodeIndex]) {
        for &stmt in statements {
            self.collect_hoisted_from_node(arena, stmt, false);
        }
    }

    fn collect_hoisted_from_node(&mut self, arena: &NodeArena, idx: NodeIndex, nested: bool) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match node.kind {
            syntax_kind_ext::VARIABLE_STATEMENT => {
                if node.has_flag(node_flags::BLOCK_SCOPED) {
                    return;
                }
                let ambient = if node.has_flag(node_flags::AMBIENT) {
                    symbol_flags::AMBIENT
                } else {
                    symbol_flags::NONE
                };
                if let Some(stmt_data) = arena.get_variable(node) {
                    for &list in &stmt_data.declarations.nodes {
                        self.declare_variable_list(
                            arena,
                            list,
                            symbol_flags::FUNCTION_SCOPED_VARIABLE | ambient,
                            true,
                        );
                    }
                }
            }
            syntax_kind_ext::VARIABLE_DECLARATION_LIST => {
                if !node.has_flag(node_flags::BLOCK_SCOPED) {
                    self.declare_variable_list(arena, idx, symbol_flags::FUNCTION_SCOPED_VARIABLE, true);
                }
            }
            syntax_kind_ext::FUNCTION_DECLARATION if nested => {
                if let Some(func) = arena.get_function(node) {
                    self.declare_name(arena, func.name, symbol_flags::FUNCTION, idx, true);
                }
            }
            syntax_kind_ext::BLOCK => {
                if let Some(block) = arena.get_block(node) {
                    for &stmt in &block.statements.nodes {
                        self.collect_hoisted_from_node(arena, stmt, true);
                    }
                }
            }
            syntax_kind_ext::IF_STATEMENT => {
                if let Some(if_data) = arena.get_if_statement(node) {
                    self.collect_hoisted_from_node(arena, if_data.then_statement, true);
                    self.collect_hoisted_from_node(arena, if_data.else_statement, true);
                }
            }
            syntax_kind_ext::FOR_STATEMENT
            | syntax_kind_ext::WHILE_STATEMENT
            | syntax_kind_ext::DO_STATEMENT => {
                if let Some(loop_data) = arena.get_loop(node) {
                    self.collect_hoisted_from_node(arena, loop_data.initializer, true);
                    self.collect_hoisted_from_node(arena, loop_data.statement, true);
                }
            }
            syntax_kind_ext::FOR_IN_STATEMENT | syntax_kind_ext::FOR_OF_STATEMENT => {
                if let Some(for_data) = arena.get_for_in_of(node) {
                    self.collect_hoisted_from_node(arena, for_data.initializer, true);
                    self.collect_hoisted_from_node(arena, for_data.statement, true);
                }
            }
            syntax_kind_ext::TRY_STATEMENT => {
                if let Some(try_data) = arena.get_try(node) {
                    self.collect_hoisted_from_node(arena, try_data.try_block, true);
                    if let Some(catch) = arena.get_catch_clause_at(try_data.catch_clause) {
                        self.collect_hoisted_from_node(arena, catch.block, true);
                    }
                    self.collect_hoisted_from_node(arena, try_data.finally_block, true);
                }
            }
            syntax_kind_ext::SWITCH_STATEMENT => {
                if let Some(switch) = arena.get_switch(node) {
                    for &clause in &switch.clauses.nodes {
                        if let Some(clause_data) = arena.get_case_clause_at(clause) {
                            for &stmt in &clause_data.statements.nodes {
                                self.collect_hoisted_from_node(arena, stmt, true);
                            }
                        }
                    }
                }
            }
            syntax_kind_ext::LABELED_STATEMENT => {
                if let Some(labeled) = arena.get_labeled_statement(node) {
                    self.collect_hoisted_from_node(arena, labeled.statement, true);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Write tracking
    // =========================================================================

    /// Record writes to every identifier bound by an assignment target,
    /// including destructuring patterns written as literals.
    fn record_write_target(&mut self, arena: &NodeArena, target: NodeIndex) {
        let target = arena.skip_parenthesized(target);
        let Some(node) = arena.get(target) else {
            return;
        };
        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => self.record_write(arena, target),
            syntax_kind_ext::NON_NULL_EXPRESSION => {
                if let Some(inner) = arena.get_unary_expr_ex(node) {
                    self.record_write_target(arena, inner.expression);
                }
            }
            syntax_kind_ext::AS_EXPRESSION | syntax_kind_ext::SATISFIES_EXPRESSION => {
                if let Some(assertion) = arena.get_type_assertion(node) {
                    self.record_write_target(arena, assertion.expression);
                }
            }
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION => {
                if let Some(literal) = arena.get_literal_expr(node) {
                    for &element in &literal.elements.nodes {
                        self.record_write_target(arena, element);
                    }
                }
            }
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => {
                if let Some(literal) = arena.get_literal_expr(node) {
                    for &element in &literal.elements.nodes {
                        self.record_object_write_target(arena, element);
                    }
                }
            }
            syntax_kind_ext::SPREAD_ELEMENT | syntax_kind_ext::SPREAD_ASSIGNMENT => {
                if let Some(spread) = arena.get_unary_expr_ex(node) {
                    self.record_write_target(arena, spread.expression);
                }
            }
            // Destructuring default: `[a = 1] = xs`
            syntax_kind_ext::BINARY_EXPRESSION => {
                if let Some(binary) = arena.get_binary_expr(node)
                    && binary.operator_token == SyntaxKind::EqualsToken as u16
                {
                    self.record_write_target(arena, binary.left);
                }
            }
            _ => {}
        }
    }

    fn record_object_write_target(&mut self, arena: &NodeArena, element: NodeIndex) {
        let Some(node) = arena.get(element) else {
            return;
        };
        match node.kind {
            syntax_kind_ext::PROPERTY_ASSIGNMENT => {
                if let Some(prop) = arena.get_property_assignment(node) {
                    self.record_write_target(arena, prop.initializer);
                }
            }
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(prop) = arena.get_shorthand_property(node) {
                    self.record_write(arena, prop.name);
                }
            }
            syntax_kind_ext::SPREAD_ASSIGNMENT => self.record_write_target(arena, element),
            _ => {}
        }
    }
}

/// Queue `idx`'s children so they are visited in source order.
fn push_children(arena: &NodeArena, idx: NodeIndex, steps: &mut Vec<BindStep>) {
    steps.extend(arena.children(idx).into_iter().rev().map(BindStep::Visit));
}

/// Queue `idx`'s children followed by leaving the scope `idx` opened.
fn push_scoped_children(arena: &NodeArena, idx: NodeIndex, steps: &mut Vec<BindStep>) {
    steps.push(BindStep::ExitScope);
    push_children(arena, idx, steps);
}

fn is_assignment_operator(op: u16) -> bool {
    SyntaxKind::from_u16(op).is_some_and(SyntaxKind::is_assignment_operator)
}

fn variable_flags(node_flags_value: u16) -> u32 {
    if node_flags_value & node_flags::CONST != 0 {
        symbol_flags::BLOCK_SCOPED_VARIABLE | symbol_flags::CONST
    } else if node_flags_value & node_flags::LET != 0 {
        symbol_flags::BLOCK_SCOPED_VARIABLE
    } else {
        symbol_flags::FUNCTION_SCOPED_VARIABLE
    }
}

/// Collect `(declaration, identifier)` pairs for every name a binding
/// introduces. Names inside destructuring patterns are declared by their
/// binding element.
pub(crate) fn collect_binding_names(
    arena: &NodeArena,
    name: NodeIndex,
    declaration: NodeIndex,
    out: &mut Vec<(NodeIndex, NodeIndex)>,
) {
    let Some(node) = arena.get(name) else {
        return;
    };
    match node.kind {
        k if k == SyntaxKind::Identifier as u16 => out.push((declaration, name)),
        syntax_kind_ext::OBJECT_BINDING_PATTERN | syntax_kind_ext::ARRAY_BINDING_PATTERN => {
            if let Some(pattern) = arena.get_binding_pattern(node) {
                for &element in &pattern.elements.nodes {
                    if let Some(binding) = arena.get_binding_element_at(element) {
                        collect_binding_names(arena, binding.name, element, out);
                    }
                }
            }
        }
        _ => {}
    }
}
