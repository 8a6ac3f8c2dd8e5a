//! NodeArena creation methods (add_* methods).
//!
//! Nodes are built bottom-up: children exist before their parent, and the
//! parent link of every child is written exactly once, when the parent is
//! added.

use super::base::NodeIndex;
use super::node::*;

macro_rules! define_add_methods {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident : $data:ty;)+) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                let data_index = self.$pool.len() as u32;
                self.$pool.push(data);
                self.push_node(Node::with_data(kind, pos, end, data_index))
            }
        )+
    };
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for roughly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 4);
        arena.literals = Vec::with_capacity(safe_capacity / 8);
        arena.binary_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.call_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.access_exprs = Vec::with_capacity(safe_capacity / 8);
        arena
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        for child in self.children(index) {
            self.set_parent(child, index);
        }
        index
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (keyword expressions, keyword types, omitted expressions).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    define_add_methods! {
        add_identifier => identifiers: IdentifierData;
        add_literal => literals: LiteralData;
        add_qualified_name => qualified_names: QualifiedNameData;
        add_computed_property => computed_properties: ComputedPropertyData;
        add_binary_expr => binary_exprs: BinaryExprData;
        add_unary_expr => unary_exprs: UnaryExprData;
        /// `delete`/`typeof`/`void`/`await`/`yield`, spreads, `x!`, `export default x`
        add_unary_expr_ex => unary_exprs_ex: UnaryExprDataEx;
        add_parenthesized => parenthesized: ParenthesizedData;
        add_call_expr => call_exprs: CallExprData;
        add_access_expr => access_exprs: AccessExprData;
        add_conditional_expr => conditional_exprs: ConditionalExprData;
        add_literal_expr => literal_exprs: LiteralExprData;
        add_template_expr => template_exprs: TemplateExprData;
        add_template_span => template_spans: TemplateSpanData;
        add_tagged_template => tagged_templates: TaggedTemplateData;
        add_type_assertion => type_assertions: TypeAssertionData;
        add_function => functions: FunctionData;
        add_class => classes: ClassData;
        add_parameter => parameters: ParameterData;
        add_property_assignment => property_assignments: PropertyAssignmentData;
        add_shorthand_property => shorthand_properties: ShorthandPropertyData;
        add_property_decl => property_decls: PropertyDeclData;
        add_source_file => source_files: SourceFileData;
        add_block => blocks: BlockData;
        add_variable => variables: VariableData;
        add_variable_declaration => variable_declarations: VariableDeclarationData;
        add_expr_statement => expr_statements: ExprStatementData;
        add_if_statement => if_statements: IfStatementData;
        add_loop => loops: LoopData;
        add_for_in_of => for_in_of: ForInOfData;
        add_jump => jump_data: JumpData;
        add_return => return_data: ReturnData;
        add_switch => switch_data: SwitchData;
        add_case_clause => case_clauses: CaseClauseData;
        add_labeled => labeled_data: LabeledData;
        add_try => try_data: TryData;
        add_catch_clause => catch_clauses: CatchClauseData;
        add_binding_pattern => binding_patterns: BindingPatternData;
        add_binding_element => binding_elements: BindingElementData;
        add_declaration => declarations: DeclarationData;
        add_import_decl => import_decls: ImportDeclData;
        add_specifier => specifiers: SpecifierData;
        add_export_decl => export_decls: ExportDeclData;
        add_type_ref => type_refs: TypeRefData;
        add_array_type => array_types: ArrayTypeData;
        add_composite_type => composite_types: CompositeTypeData;
        add_literal_type => literal_types: LiteralTypeData;
        add_function_type => function_types: FunctionTypeData;
        add_wrapped_type => wrapped_types: WrappedTypeData;
    }
}
