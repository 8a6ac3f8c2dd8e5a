//! NodeArena access methods.
//!
//! Typed accessors return `None` when the node has a different kind, so
//! callers can chain them with `and_then` without checking kinds first.

use modz_scanner::SyntaxKind;

use super::base::NodeIndex;
use super::node::syntax_kind_ext as ext;
use super::node::*;

macro_rules! define_accessors {
    ($($(#[$meta:meta])* $fn_name:ident, $fn_at:ident => $pool:ident : $data:ty [$($kind:expr),+ $(,)?];)+) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
                if node.has_data() && [$($kind),+].contains(&node.kind) {
                    self.$pool.get(node.data_index as usize)
                } else {
                    None
                }
            }

            #[inline]
            pub fn $fn_at(&self, index: NodeIndex) -> Option<&$data> {
                self.get(index).and_then(|node| self.$fn_name(node))
            }
        )+
    };
}

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable thin node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, or NONE for the root and unknown indices.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.kind(index) == Some(kind)
    }

    define_accessors! {
        /// Identifier data for identifiers and private identifiers.
        get_identifier, get_identifier_at => identifiers: IdentifierData [
            SyntaxKind::Identifier as u16,
            SyntaxKind::PrivateIdentifier as u16,
        ];
        get_literal, get_literal_at => literals: LiteralData [
            SyntaxKind::NumericLiteral as u16,
            SyntaxKind::BigIntLiteral as u16,
            SyntaxKind::StringLiteral as u16,
            SyntaxKind::RegularExpressionLiteral as u16,
            SyntaxKind::NoSubstitutionTemplateLiteral as u16,
            SyntaxKind::TemplateHead as u16,
            SyntaxKind::TemplateMiddle as u16,
            SyntaxKind::TemplateTail as u16,
        ];
        get_qualified_name, get_qualified_name_at => qualified_names: QualifiedNameData [
            ext::QUALIFIED_NAME,
        ];
        get_computed_property, get_computed_property_at => computed_properties: ComputedPropertyData [
            ext::COMPUTED_PROPERTY_NAME,
        ];
        get_binary_expr, get_binary_expr_at => binary_exprs: BinaryExprData [
            ext::BINARY_EXPRESSION,
        ];
        get_unary_expr, get_unary_expr_at => unary_exprs: UnaryExprData [
            ext::PREFIX_UNARY_EXPRESSION,
            ext::POSTFIX_UNARY_EXPRESSION,
        ];
        get_unary_expr_ex, get_unary_expr_ex_at => unary_exprs_ex: UnaryExprDataEx [
            ext::DELETE_EXPRESSION,
            ext::TYPE_OF_EXPRESSION,
            ext::VOID_EXPRESSION,
            ext::AWAIT_EXPRESSION,
            ext::YIELD_EXPRESSION,
            ext::SPREAD_ELEMENT,
            ext::SPREAD_ASSIGNMENT,
            ext::NON_NULL_EXPRESSION,
            ext::EXPORT_ASSIGNMENT,
        ];
        get_parenthesized, get_parenthesized_at => parenthesized: ParenthesizedData [
            ext::PARENTHESIZED_EXPRESSION,
        ];
        get_call_expr, get_call_expr_at => call_exprs: CallExprData [
            ext::CALL_EXPRESSION,
            ext::NEW_EXPRESSION,
        ];
        get_access_expr, get_access_expr_at => access_exprs: AccessExprData [
            ext::PROPERTY_ACCESS_EXPRESSION,
            ext::ELEMENT_ACCESS_EXPRESSION,
        ];
        get_conditional_expr, get_conditional_expr_at => conditional_exprs: ConditionalExprData [
            ext::CONDITIONAL_EXPRESSION,
        ];
        get_literal_expr, get_literal_expr_at => literal_exprs: LiteralExprData [
            ext::ARRAY_LITERAL_EXPRESSION,
            ext::OBJECT_LITERAL_EXPRESSION,
        ];
        get_template_expr, get_template_expr_at => template_exprs: TemplateExprData [
            ext::TEMPLATE_EXPRESSION,
        ];
        get_template_span, get_template_span_at => template_spans: TemplateSpanData [
            ext::TEMPLATE_SPAN,
        ];
        get_tagged_template, get_tagged_template_at => tagged_templates: TaggedTemplateData [
            ext::TAGGED_TEMPLATE_EXPRESSION,
        ];
        get_type_assertion, get_type_assertion_at => type_assertions: TypeAssertionData [
            ext::AS_EXPRESSION,
            ext::SATISFIES_EXPRESSION,
        ];
        /// Function-like nodes: declarations, expressions, arrows, methods,
        /// accessors and constructors.
        get_function, get_function_at => functions: FunctionData [
            ext::FUNCTION_DECLARATION,
            ext::FUNCTION_EXPRESSION,
            ext::ARROW_FUNCTION,
            ext::METHOD_DECLARATION,
            ext::GET_ACCESSOR,
            ext::SET_ACCESSOR,
            ext::CONSTRUCTOR,
        ];
        get_class, get_class_at => classes: ClassData [
            ext::CLASS_DECLARATION,
            ext::CLASS_EXPRESSION,
        ];
        get_parameter, get_parameter_at => parameters: ParameterData [
            ext::PARAMETER,
        ];
        get_property_assignment, get_property_assignment_at => property_assignments: PropertyAssignmentData [
            ext::PROPERTY_ASSIGNMENT,
        ];
        get_shorthand_property, get_shorthand_property_at => shorthand_properties: ShorthandPropertyData [
            ext::SHORTHAND_PROPERTY_ASSIGNMENT,
        ];
        get_property_decl, get_property_decl_at => property_decls: PropertyDeclData [
            ext::PROPERTY_DECLARATION,
        ];
        get_source_file, get_source_file_at => source_files: SourceFileData [
            ext::SOURCE_FILE,
        ];
        get_block, get_block_at => blocks: BlockData [
            ext::BLOCK,
            ext::CLASS_STATIC_BLOCK_DECLARATION,
        ];
        get_variable, get_variable_at => variables: VariableData [
            ext::VARIABLE_STATEMENT,
            ext::VARIABLE_DECLARATION_LIST,
        ];
        get_variable_declaration, get_variable_declaration_at => variable_declarations: VariableDeclarationData [
            ext::VARIABLE_DECLARATION,
        ];
        get_expression_statement, get_expression_statement_at => expr_statements: ExprStatementData [
            ext::EXPRESSION_STATEMENT,
        ];
        get_if_statement, get_if_statement_at => if_statements: IfStatementData [
            ext::IF_STATEMENT,
        ];
        get_loop, get_loop_at => loops: LoopData [
            ext::FOR_STATEMENT,
            ext::WHILE_STATEMENT,
            ext::DO_STATEMENT,
        ];
        get_for_in_of, get_for_in_of_at => for_in_of: ForInOfData [
            ext::FOR_IN_STATEMENT,
            ext::FOR_OF_STATEMENT,
        ];
        get_jump_data, get_jump_data_at => jump_data: JumpData [
            ext::BREAK_STATEMENT,
            ext::CONTINUE_STATEMENT,
        ];
        get_return_statement, get_return_statement_at => return_data: ReturnData [
            ext::RETURN_STATEMENT,
            ext::THROW_STATEMENT,
        ];
        get_switch, get_switch_at => switch_data: SwitchData [
            ext::SWITCH_STATEMENT,
        ];
        get_case_clause, get_case_clause_at => case_clauses: CaseClauseData [
            ext::CASE_CLAUSE,
            ext::DEFAULT_CLAUSE,
        ];
        get_labeled_statement, get_labeled_statement_at => labeled_data: LabeledData [
            ext::LABELED_STATEMENT,
        ];
        get_try, get_try_at => try_data: TryData [
            ext::TRY_STATEMENT,
        ];
        get_catch_clause, get_catch_clause_at => catch_clauses: CatchClauseData [
            ext::CATCH_CLAUSE,
        ];
        get_binding_pattern, get_binding_pattern_at => binding_patterns: BindingPatternData [
            ext::OBJECT_BINDING_PATTERN,
            ext::ARRAY_BINDING_PATTERN,
        ];
        get_binding_element, get_binding_element_at => binding_elements: BindingElementData [
            ext::BINDING_ELEMENT,
        ];
        get_declaration, get_declaration_at => declarations: DeclarationData [
            ext::INTERFACE_DECLARATION,
            ext::TYPE_ALIAS_DECLARATION,
            ext::ENUM_DECLARATION,
        ];
        get_import_decl, get_import_decl_at => import_decls: ImportDeclData [
            ext::IMPORT_DECLARATION,
        ];
        get_specifier, get_specifier_at => specifiers: SpecifierData [
            ext::IMPORT_SPECIFIER,
            ext::EXPORT_SPECIFIER,
        ];
        get_export_decl, get_export_decl_at => export_decls: ExportDeclData [
            ext::EXPORT_DECLARATION,
        ];
        get_type_ref, get_type_ref_at => type_refs: TypeRefData [
            ext::TYPE_REFERENCE,
        ];
        get_array_type, get_array_type_at => array_types: ArrayTypeData [
            ext::ARRAY_TYPE,
        ];
        get_composite_type, get_composite_type_at => composite_types: CompositeTypeData [
            ext::TUPLE_TYPE,
            ext::UNION_TYPE,
            ext::INTERSECTION_TYPE,
            ext::INDEXED_ACCESS_TYPE,
        ];
        get_literal_type, get_literal_type_at => literal_types: LiteralTypeData [
            ext::LITERAL_TYPE,
        ];
        get_function_type, get_function_type_at => function_types: FunctionTypeData [
            ext::FUNCTION_TYPE,
        ];
        get_wrapped_type, get_wrapped_type_at => wrapped_types: WrappedTypeData [
            ext::PARENTHESIZED_TYPE,
            ext::TYPE_OPERATOR,
        ];
    }

    // =========================================================================
    // Child enumeration
    // =========================================================================

    /// Children of a node in source order.
    ///
    /// This is the single definition of the tree shape: parent links and
    /// traversal both go through it.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        if !node.has_data() {
            return out;
        }
        let d = node.data_index as usize;

        fn push(out: &mut Vec<NodeIndex>, index: NodeIndex) {
            if index.is_some() {
                out.push(index);
            }
        }
        fn push_list(out: &mut Vec<NodeIndex>, list: &super::base::NodeList) {
            out.extend(list.nodes.iter().copied().filter(|n| n.is_some()));
        }

        match node.kind {
            ext::SOURCE_FILE => {
                if let Some(data) = self.source_files.get(d) {
                    push_list(&mut out, &data.statements);
                }
            }
            ext::QUALIFIED_NAME => {
                if let Some(data) = self.qualified_names.get(d) {
                    push(&mut out, data.left);
                    push(&mut out, data.right);
                }
            }
            ext::COMPUTED_PROPERTY_NAME => {
                if let Some(data) = self.computed_properties.get(d) {
                    push(&mut out, data.expression);
                }
            }
            ext::PARAMETER => {
                if let Some(data) = self.parameters.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_annotation);
                    push(&mut out, data.initializer);
                }
            }
            ext::OBJECT_BINDING_PATTERN | ext::ARRAY_BINDING_PATTERN => {
                if let Some(data) = self.binding_patterns.get(d) {
                    push_list(&mut out, &data.elements);
                }
            }
            ext::BINDING_ELEMENT => {
                if let Some(data) = self.binding_elements.get(d) {
                    push(&mut out, data.property_name);
                    push(&mut out, data.name);
                    push(&mut out, data.initializer);
                }
            }
            ext::ARRAY_LITERAL_EXPRESSION | ext::OBJECT_LITERAL_EXPRESSION => {
                if let Some(data) = self.literal_exprs.get(d) {
                    push_list(&mut out, &data.elements);
                }
            }
            ext::PROPERTY_ACCESS_EXPRESSION | ext::ELEMENT_ACCESS_EXPRESSION => {
                if let Some(data) = self.access_exprs.get(d) {
                    push(&mut out, data.expression);
                    push(&mut out, data.name_or_argument);
                }
            }
            ext::CALL_EXPRESSION | ext::NEW_EXPRESSION => {
                if let Some(data) = self.call_exprs.get(d) {
                    push(&mut out, data.expression);
                    if let Some(arguments) = &data.arguments {
                        push_list(&mut out, arguments);
                    }
                }
            }
            ext::TAGGED_TEMPLATE_EXPRESSION => {
                if let Some(data) = self.tagged_templates.get(d) {
                    push(&mut out, data.tag);
                    push(&mut out, data.template);
                }
            }
            ext::PARENTHESIZED_EXPRESSION => {
                if let Some(data) = self.parenthesized.get(d) {
                    push(&mut out, data.expression);
                }
            }
            ext::FUNCTION_DECLARATION
            | ext::FUNCTION_EXPRESSION
            | ext::ARROW_FUNCTION
            | ext::METHOD_DECLARATION
            | ext::GET_ACCESSOR
            | ext::SET_ACCESSOR
            | ext::CONSTRUCTOR => {
                if let Some(data) = self.functions.get(d) {
                    push(&mut out, data.name);
                    push_list(&mut out, &data.parameters);
                    push(&mut out, data.type_annotation);
                    push(&mut out, data.body);
                }
            }
            ext::DELETE_EXPRESSION
            | ext::TYPE_OF_EXPRESSION
            | ext::VOID_EXPRESSION
            | ext::AWAIT_EXPRESSION
            | ext::YIELD_EXPRESSION
            | ext::SPREAD_ELEMENT
            | ext::SPREAD_ASSIGNMENT
            | ext::NON_NULL_EXPRESSION
            | ext::EXPORT_ASSIGNMENT => {
                if let Some(data) = self.unary_exprs_ex.get(d) {
                    push(&mut out, data.expression);
                }
            }
            ext::PREFIX_UNARY_EXPRESSION | ext::POSTFIX_UNARY_EXPRESSION => {
                if let Some(data) = self.unary_exprs.get(d) {
                    push(&mut out, data.operand);
                }
            }
            ext::BINARY_EXPRESSION => {
                if let Some(data) = self.binary_exprs.get(d) {
                    push(&mut out, data.left);
                    push(&mut out, data.right);
                }
            }
            ext::CONDITIONAL_EXPRESSION => {
                if let Some(data) = self.conditional_exprs.get(d) {
                    push(&mut out, data.condition);
                    push(&mut out, data.when_true);
                    push(&mut out, data.when_false);
                }
            }
            ext::TEMPLATE_EXPRESSION => {
                if let Some(data) = self.template_exprs.get(d) {
                    push(&mut out, data.head);
                    push_list(&mut out, &data.template_spans);
                }
            }
            ext::TEMPLATE_SPAN => {
                if let Some(data) = self.template_spans.get(d) {
                    push(&mut out, data.expression);
                    push(&mut out, data.literal);
                }
            }
            ext::CLASS_DECLARATION | ext::CLASS_EXPRESSION => {
                if let Some(data) = self.classes.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.heritage);
                    push_list(&mut out, &data.members);
                }
            }
            ext::AS_EXPRESSION | ext::SATISFIES_EXPRESSION => {
                if let Some(data) = self.type_assertions.get(d) {
                    push(&mut out, data.expression);
                    push(&mut out, data.type_node);
                }
            }
            ext::PROPERTY_ASSIGNMENT => {
                if let Some(data) = self.property_assignments.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.initializer);
                }
            }
            ext::SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(data) = self.shorthand_properties.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.object_assignment_initializer);
                }
            }
            ext::PROPERTY_DECLARATION => {
                if let Some(data) = self.property_decls.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_annotation);
                    push(&mut out, data.initializer);
                }
            }
            ext::BLOCK | ext::CLASS_STATIC_BLOCK_DECLARATION => {
                if let Some(data) = self.blocks.get(d) {
                    push_list(&mut out, &data.statements);
                }
            }
            ext::VARIABLE_STATEMENT | ext::VARIABLE_DECLARATION_LIST => {
                if let Some(data) = self.variables.get(d) {
                    push_list(&mut out, &data.declarations);
                }
            }
            ext::VARIABLE_DECLARATION => {
                if let Some(data) = self.variable_declarations.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_annotation);
                    push(&mut out, data.initializer);
                }
            }
            ext::EXPRESSION_STATEMENT => {
                if let Some(data) = self.expr_statements.get(d) {
                    push(&mut out, data.expression);
                }
            }
            ext::IF_STATEMENT => {
                if let Some(data) = self.if_statements.get(d) {
                    push(&mut out, data.expression);
                    push(&mut out, data.then_statement);
                    push(&mut out, data.else_statement);
                }
            }
            ext::DO_STATEMENT => {
                if let Some(data) = self.loops.get(d) {
                    push(&mut out, data.statement);
                    push(&mut out, data.condition);
                }
            }
            ext::WHILE_STATEMENT | ext::FOR_STATEMENT => {
                if let Some(data) = self.loops.get(d) {
                    push(&mut out, data.initializer);
                    push(&mut out, data.condition);
                    push(&mut out, data.incrementor);
                    push(&mut out, data.statement);
                }
            }
            ext::FOR_IN_STATEMENT | ext::FOR_OF_STATEMENT => {
                if let Some(data) = self.for_in_of.get(d) {
                    push(&mut out, data.initializer);
                    push(&mut out, data.expression);
                    push(&mut out, data.statement);
                }
            }
            ext::BREAK_STATEMENT | ext::CONTINUE_STATEMENT => {
                if let Some(data) = self.jump_data.get(d) {
                    push(&mut out, data.label);
                }
            }
            ext::RETURN_STATEMENT | ext::THROW_STATEMENT => {
                if let Some(data) = self.return_data.get(d) {
                    push(&mut out, data.expression);
                }
            }
            ext::SWITCH_STATEMENT => {
                if let Some(data) = self.switch_data.get(d) {
                    push(&mut out, data.expression);
                    push_list(&mut out, &data.clauses);
                }
            }
            ext::CASE_CLAUSE | ext::DEFAULT_CLAUSE => {
                if let Some(data) = self.case_clauses.get(d) {
                    push(&mut out, data.expression);
                    push_list(&mut out, &data.statements);
                }
            }
            ext::LABELED_STATEMENT => {
                if let Some(data) = self.labeled_data.get(d) {
                    push(&mut out, data.label);
                    push(&mut out, data.statement);
                }
            }
            ext::TRY_STATEMENT => {
                if let Some(data) = self.try_data.get(d) {
                    push(&mut out, data.try_block);
                    push(&mut out, data.catch_clause);
                    push(&mut out, data.finally_block);
                }
            }
            ext::CATCH_CLAUSE => {
                if let Some(data) = self.catch_clauses.get(d) {
                    push(&mut out, data.variable_declaration);
                    push(&mut out, data.block);
                }
            }
            ext::INTERFACE_DECLARATION | ext::TYPE_ALIAS_DECLARATION | ext::ENUM_DECLARATION => {
                if let Some(data) = self.declarations.get(d) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_node);
                }
            }
            ext::IMPORT_DECLARATION => {
                if let Some(data) = self.import_decls.get(d) {
                    push_list(&mut out, &data.specifiers);
                    push(&mut out, data.module_specifier);
                }
            }
            ext::IMPORT_SPECIFIER | ext::EXPORT_SPECIFIER => {
                if let Some(data) = self.specifiers.get(d) {
                    push(&mut out, data.property_name);
                    push(&mut out, data.name);
                }
            }
            ext::EXPORT_DECLARATION => {
                if let Some(data) = self.export_decls.get(d) {
                    push_list(&mut out, &data.specifiers);
                    push(&mut out, data.module_specifier);
                }
            }
            ext::TYPE_REFERENCE => {
                if let Some(data) = self.type_refs.get(d) {
                    push(&mut out, data.type_name);
                    if let Some(arguments) = &data.type_arguments {
                        push_list(&mut out, arguments);
                    }
                }
            }
            ext::ARRAY_TYPE => {
                if let Some(data) = self.array_types.get(d) {
                    push(&mut out, data.element_type);
                }
            }
            ext::TUPLE_TYPE | ext::UNION_TYPE | ext::INTERSECTION_TYPE | ext::INDEXED_ACCESS_TYPE => {
                if let Some(data) = self.composite_types.get(d) {
                    push_list(&mut out, &data.types);
                }
            }
            ext::LITERAL_TYPE => {
                if let Some(data) = self.literal_types.get(d) {
                    push(&mut out, data.literal);
                }
            }
            ext::FUNCTION_TYPE => {
                if let Some(data) = self.function_types.get(d) {
                    push(&mut out, data.return_type);
                }
            }
            ext::PARENTHESIZED_TYPE | ext::TYPE_OPERATOR => {
                if let Some(data) = self.wrapped_types.get(d) {
                    push(&mut out, data.type_node);
                }
            }
            _ => {}
        }
        out
    }

    // =========================================================================
    // Tree queries
    // =========================================================================

    /// Skip any number of wrapping parentheses.
    pub fn skip_parenthesized(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(paren) = self.get_parenthesized_at(index) {
            index = paren.expression;
        }
        index
    }

    /// Walk up past wrapping parentheses.
    ///
    /// Returns `(parent, child)` where `child` is the outermost parenthesized
    /// wrapper of `index` (or `index` itself) and `parent` is its parent.
    pub fn parent_skipping_parens(&self, index: NodeIndex) -> (NodeIndex, NodeIndex) {
        let mut child = index;
        let mut parent = self.parent(child);
        while self.is_kind(parent, ext::PARENTHESIZED_EXPRESSION) {
            child = parent;
            parent = self.parent(parent);
        }
        (parent, child)
    }

    /// Source text covered by a node.
    pub fn node_text<'a>(&self, index: NodeIndex, text: &'a str) -> &'a str {
        self.get(index)
            .and_then(|node| text.get(node.pos as usize..node.end as usize))
            .unwrap_or_default()
    }

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier_at(index)
            .map(|data| data.escaped_text.as_str())
    }

    /// True for a plain identifier (not private) with the given name.
    pub fn is_identifier_named(&self, index: NodeIndex, name: &str) -> bool {
        self.is_kind(index, SyntaxKind::Identifier as u16)
            && self.identifier_text(index) == Some(name)
    }

    /// Value of a numeric literal, looking through parentheses.
    pub fn numeric_literal_value(&self, index: NodeIndex) -> Option<f64> {
        let index = self.skip_parenthesized(index);
        if !self.is_kind(index, SyntaxKind::NumericLiteral as u16) {
            return None;
        }
        self.get_literal_at(index).and_then(|lit| lit.value)
    }

    /// Value of a numeric literal with an optional leading `-` or `+`.
    pub fn signed_numeric_value(&self, index: NodeIndex) -> Option<f64> {
        let index = self.skip_parenthesized(index);
        if let Some(unary) = self.get(index).filter(|n| n.kind == ext::PREFIX_UNARY_EXPRESSION)
            && let Some(data) = self.get_unary_expr(unary)
        {
            let value = self.numeric_literal_value(data.operand)?;
            return match data.operator {
                op if op == SyntaxKind::MinusToken as u16 => Some(-value),
                op if op == SyntaxKind::PlusToken as u16 => Some(value),
                _ => None,
            };
        }
        self.numeric_literal_value(index)
    }

    /// Cooked value of a string literal or substitution-free template.
    pub fn string_literal_value(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if node.kind == SyntaxKind::StringLiteral as u16
            || node.kind == SyntaxKind::NoSubstitutionTemplateLiteral as u16
        {
            self.get_literal(node).map(|lit| lit.text.as_str())
        } else {
            None
        }
    }

    /// Name of a non-computed property access (`a.name` gives `name`).
    pub fn property_access_name(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if node.kind != ext::PROPERTY_ACCESS_EXPRESSION {
            return None;
        }
        let access = self.get_access_expr(node)?;
        self.identifier_text(access.name_or_argument)
    }

    /// Arguments of a call or `new` expression (empty for `new X`).
    pub fn call_arguments(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get_call_expr_at(index)
            .and_then(|call| call.arguments.as_ref())
            .map_or(&[], |args| args.nodes.as_slice())
    }

    /// True if `index` or any receiver below it uses `?.`.
    pub fn is_optional_chain(&self, index: NodeIndex) -> bool {
        let mut current = self.skip_parenthesized(index);
        loop {
            let Some(node) = self.get(current) else {
                return false;
            };
            if node.has_flag(node_flags::OPTIONAL_CHAIN) {
                return true;
            }
            if let Some(access) = self.get_access_expr(node) {
                if access.question_dot_token {
                    return true;
                }
                current = access.expression;
            } else if let Some(call) = self.get_call_expr(node).filter(|_| node.kind == ext::CALL_EXPRESSION) {
                current = call.expression;
            } else if let Some(non_null) = self
                .get_unary_expr_ex(node)
                .filter(|_| node.kind == ext::NON_NULL_EXPRESSION)
            {
                current = non_null.expression;
            } else {
                return false;
            }
        }
    }

    /// Nearest ancestor (excluding `index`) that satisfies `pred`.
    pub fn find_ancestor(&self, index: NodeIndex, pred: impl Fn(&Node) -> bool) -> NodeIndex {
        let mut current = self.parent(index);
        while let Some(node) = self.get(current) {
            if pred(node) {
                return current;
            }
            current = self.parent(current);
        }
        NodeIndex::NONE
    }
}

// =============================================================================
// Kind utilities
// =============================================================================

/// Functions, arrows, methods, accessors and constructors.
pub fn is_function_like_kind(kind: u16) -> bool {
    matches!(
        kind,
        ext::FUNCTION_DECLARATION
            | ext::FUNCTION_EXPRESSION
            | ext::ARROW_FUNCTION
            | ext::METHOD_DECLARATION
            | ext::GET_ACCESSOR
            | ext::SET_ACCESSOR
            | ext::CONSTRUCTOR
    )
}

/// Human-readable kind name for logs and test failures.
pub fn kind_name(kind: u16) -> String {
    if kind < ext::FIRST_NODE {
        return SyntaxKind::from_u16(kind).map_or_else(|| format!("Kind({kind})"), |k| format!("{k:?}"));
    }
    let name = match kind {
        ext::SOURCE_FILE => "SourceFile",
        ext::QUALIFIED_NAME => "QualifiedName",
        ext::COMPUTED_PROPERTY_NAME => "ComputedPropertyName",
        ext::PARAMETER => "Parameter",
        ext::OBJECT_BINDING_PATTERN => "ObjectBindingPattern",
        ext::ARRAY_BINDING_PATTERN => "ArrayBindingPattern",
        ext::BINDING_ELEMENT => "BindingElement",
        ext::ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        ext::OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        ext::PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ext::ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        ext::CALL_EXPRESSION => "CallExpression",
        ext::NEW_EXPRESSION => "NewExpression",
        ext::TAGGED_TEMPLATE_EXPRESSION => "TaggedTemplateExpression",
        ext::PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        ext::FUNCTION_EXPRESSION => "FunctionExpression",
        ext::ARROW_FUNCTION => "ArrowFunction",
        ext::DELETE_EXPRESSION => "DeleteExpression",
        ext::TYPE_OF_EXPRESSION => "TypeOfExpression",
        ext::VOID_EXPRESSION => "VoidExpression",
        ext::AWAIT_EXPRESSION => "AwaitExpression",
        ext::PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        ext::POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        ext::BINARY_EXPRESSION => "BinaryExpression",
        ext::CONDITIONAL_EXPRESSION => "ConditionalExpression",
        ext::TEMPLATE_EXPRESSION => "TemplateExpression",
        ext::TEMPLATE_SPAN => "TemplateSpan",
        ext::YIELD_EXPRESSION => "YieldExpression",
        ext::SPREAD_ELEMENT => "SpreadElement",
        ext::CLASS_EXPRESSION => "ClassExpression",
        ext::OMITTED_EXPRESSION => "OmittedExpression",
        ext::AS_EXPRESSION => "AsExpression",
        ext::SATISFIES_EXPRESSION => "SatisfiesExpression",
        ext::NON_NULL_EXPRESSION => "NonNullExpression",
        ext::META_PROPERTY => "MetaProperty",
        ext::PROPERTY_ASSIGNMENT => "PropertyAssignment",
        ext::SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        ext::SPREAD_ASSIGNMENT => "SpreadAssignment",
        ext::METHOD_DECLARATION => "MethodDeclaration",
        ext::GET_ACCESSOR => "GetAccessor",
        ext::SET_ACCESSOR => "SetAccessor",
        ext::CONSTRUCTOR => "Constructor",
        ext::PROPERTY_DECLARATION => "PropertyDeclaration",
        ext::CLASS_STATIC_BLOCK_DECLARATION => "ClassStaticBlockDeclaration",
        ext::BLOCK => "Block",
        ext::EMPTY_STATEMENT => "EmptyStatement",
        ext::VARIABLE_STATEMENT => "VariableStatement",
        ext::EXPRESSION_STATEMENT => "ExpressionStatement",
        ext::IF_STATEMENT => "IfStatement",
        ext::DO_STATEMENT => "DoStatement",
        ext::WHILE_STATEMENT => "WhileStatement",
        ext::FOR_STATEMENT => "ForStatement",
        ext::FOR_IN_STATEMENT => "ForInStatement",
        ext::FOR_OF_STATEMENT => "ForOfStatement",
        ext::CONTINUE_STATEMENT => "ContinueStatement",
        ext::BREAK_STATEMENT => "BreakStatement",
        ext::RETURN_STATEMENT => "ReturnStatement",
        ext::SWITCH_STATEMENT => "SwitchStatement",
        ext::LABELED_STATEMENT => "LabeledStatement",
        ext::THROW_STATEMENT => "ThrowStatement",
        ext::TRY_STATEMENT => "TryStatement",
        ext::DEBUGGER_STATEMENT => "DebuggerStatement",
        ext::VARIABLE_DECLARATION => "VariableDeclaration",
        ext::VARIABLE_DECLARATION_LIST => "VariableDeclarationList",
        ext::FUNCTION_DECLARATION => "FunctionDeclaration",
        ext::CLASS_DECLARATION => "ClassDeclaration",
        ext::INTERFACE_DECLARATION => "InterfaceDeclaration",
        ext::TYPE_ALIAS_DECLARATION => "TypeAliasDeclaration",
        ext::ENUM_DECLARATION => "EnumDeclaration",
        ext::IMPORT_DECLARATION => "ImportDeclaration",
        ext::IMPORT_SPECIFIER => "ImportSpecifier",
        ext::EXPORT_DECLARATION => "ExportDeclaration",
        ext::EXPORT_SPECIFIER => "ExportSpecifier",
        ext::EXPORT_ASSIGNMENT => "ExportAssignment",
        ext::CASE_CLAUSE => "CaseClause",
        ext::DEFAULT_CLAUSE => "DefaultClause",
        ext::CATCH_CLAUSE => "CatchClause",
        ext::TYPE_REFERENCE => "TypeReference",
        ext::ARRAY_TYPE => "ArrayType",
        ext::TUPLE_TYPE => "TupleType",
        ext::UNION_TYPE => "UnionType",
        ext::INTERSECTION_TYPE => "IntersectionType",
        ext::LITERAL_TYPE => "LiteralType",
        ext::TYPE_LITERAL => "TypeLiteral",
        ext::FUNCTION_TYPE => "FunctionType",
        ext::PARENTHESIZED_TYPE => "ParenthesizedType",
        ext::TYPE_OPERATOR => "TypeOperator",
        ext::INDEXED_ACCESS_TYPE => "IndexedAccessType",
        ext::TYPE_QUERY => "TypeQuery",
        _ => return format!("Kind({kind})"),
    };
    name.to_string()
}

#[cfg(test)]
#[path = "../../tests/node_access_tests.rs"]
mod tests;
