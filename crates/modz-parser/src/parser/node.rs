//! Thin node headers, typed data pools and the arena that owns them.

use std::sync::Arc;

use serde::Serialize;

use super::base::{NodeIndex, NodeList};

/// Node kinds that are not scanner tokens.
///
/// Leaf nodes (identifiers, literals, `this`, `null`, ...) use their
/// `SyntaxKind` value; everything composite uses one of these.
pub mod syntax_kind_ext {
    pub const FIRST_NODE: u16 = 300;

    pub const SOURCE_FILE: u16 = 300;

    // Names and bindings
    pub const QUALIFIED_NAME: u16 = 301;
    pub const COMPUTED_PROPERTY_NAME: u16 = 302;
    pub const PARAMETER: u16 = 303;
    pub const OBJECT_BINDING_PATTERN: u16 = 304;
    pub const ARRAY_BINDING_PATTERN: u16 = 305;
    pub const BINDING_ELEMENT: u16 = 306;

    // Expressions
    pub const ARRAY_LITERAL_EXPRESSION: u16 = 310;
    pub const OBJECT_LITERAL_EXPRESSION: u16 = 311;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = 312;
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = 313;
    pub const CALL_EXPRESSION: u16 = 314;
    pub const NEW_EXPRESSION: u16 = 315;
    pub const TAGGED_TEMPLATE_EXPRESSION: u16 = 316;
    pub const PARENTHESIZED_EXPRESSION: u16 = 317;
    pub const FUNCTION_EXPRESSION: u16 = 318;
    pub const ARROW_FUNCTION: u16 = 319;
    pub const DELETE_EXPRESSION: u16 = 320;
    pub const TYPE_OF_EXPRESSION: u16 = 321;
    pub const VOID_EXPRESSION: u16 = 322;
    pub const AWAIT_EXPRESSION: u16 = 323;
    pub const PREFIX_UNARY_EXPRESSION: u16 = 324;
    pub const POSTFIX_UNARY_EXPRESSION: u16 = 325;
    pub const BINARY_EXPRESSION: u16 = 326;
    pub const CONDITIONAL_EXPRESSION: u16 = 327;
    pub const TEMPLATE_EXPRESSION: u16 = 328;
    pub const TEMPLATE_SPAN: u16 = 329;
    pub const YIELD_EXPRESSION: u16 = 330;
    pub const SPREAD_ELEMENT: u16 = 331;
    pub const CLASS_EXPRESSION: u16 = 332;
    pub const OMITTED_EXPRESSION: u16 = 333;
    pub const AS_EXPRESSION: u16 = 334;
    pub const SATISFIES_EXPRESSION: u16 = 335;
    pub const NON_NULL_EXPRESSION: u16 = 336;
    pub const META_PROPERTY: u16 = 337;

    // Object and class members
    pub const PROPERTY_ASSIGNMENT: u16 = 340;
    pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 341;
    pub const SPREAD_ASSIGNMENT: u16 = 342;
    pub const METHOD_DECLARATION: u16 = 343;
    pub const GET_ACCESSOR: u16 = 344;
    pub const SET_ACCESSOR: u16 = 345;
    pub const CONSTRUCTOR: u16 = 346;
    pub const PROPERTY_DECLARATION: u16 = 347;
    pub const CLASS_STATIC_BLOCK_DECLARATION: u16 = 348;

    // Statements
    pub const BLOCK: u16 = 350;
    pub const EMPTY_STATEMENT: u16 = 351;
    pub const VARIABLE_STATEMENT: u16 = 352;
    pub const EXPRESSION_STATEMENT: u16 = 353;
    pub const IF_STATEMENT: u16 = 354;
    pub const DO_STATEMENT: u16 = 355;
    pub const WHILE_STATEMENT: u16 = 356;
    pub const FOR_STATEMENT: u16 = 357;
    pub const FOR_IN_STATEMENT: u16 = 358;
    pub const FOR_OF_STATEMENT: u16 = 359;
    pub const CONTINUE_STATEMENT: u16 = 360;
    pub const BREAK_STATEMENT: u16 = 361;
    pub const RETURN_STATEMENT: u16 = 362;
    pub const SWITCH_STATEMENT: u16 = 363;
    pub const LABELED_STATEMENT: u16 = 364;
    pub const THROW_STATEMENT: u16 = 365;
    pub const TRY_STATEMENT: u16 = 366;
    pub const DEBUGGER_STATEMENT: u16 = 367;

    // Declarations and clauses
    pub const VARIABLE_DECLARATION: u16 = 370;
    pub const VARIABLE_DECLARATION_LIST: u16 = 371;
    pub const FUNCTION_DECLARATION: u16 = 372;
    pub const CLASS_DECLARATION: u16 = 373;
    pub const INTERFACE_DECLARATION: u16 = 374;
    pub const TYPE_ALIAS_DECLARATION: u16 = 375;
    pub const ENUM_DECLARATION: u16 = 376;
    pub const IMPORT_DECLARATION: u16 = 377;
    pub const IMPORT_SPECIFIER: u16 = 378;
    pub const EXPORT_DECLARATION: u16 = 379;
    pub const EXPORT_SPECIFIER: u16 = 380;
    pub const EXPORT_ASSIGNMENT: u16 = 381;
    pub const CASE_CLAUSE: u16 = 382;
    pub const DEFAULT_CLAUSE: u16 = 383;
    pub const CATCH_CLAUSE: u16 = 384;

    // Types
    pub const TYPE_REFERENCE: u16 = 390;
    pub const ARRAY_TYPE: u16 = 391;
    pub const TUPLE_TYPE: u16 = 392;
    pub const UNION_TYPE: u16 = 393;
    pub const INTERSECTION_TYPE: u16 = 394;
    pub const LITERAL_TYPE: u16 = 395;
    pub const TYPE_LITERAL: u16 = 396;
    pub const FUNCTION_TYPE: u16 = 397;
    pub const PARENTHESIZED_TYPE: u16 = 398;
    pub const TYPE_OPERATOR: u16 = 399;
    pub const INDEXED_ACCESS_TYPE: u16 = 400;
    pub const TYPE_QUERY: u16 = 401;
}

/// Packed node flags stored in `Node::flags`.
pub mod node_flags {
    pub const LET: u16 = 1 << 0;
    pub const CONST: u16 = 1 << 1;
    pub const EXPORT: u16 = 1 << 2;
    pub const DEFAULT: u16 = 1 << 3;
    pub const AMBIENT: u16 = 1 << 4;
    pub const OPTIONAL_CHAIN: u16 = 1 << 5;
    pub const STATIC: u16 = 1 << 6;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
}

/// A thin node header (16 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// `SyntaxKind` value or a `syntax_kind_ext` constant
    pub kind: u16,
    /// `node_flags` bits
    pub flags: u16,
    /// Start of the node's first token (trivia excluded)
    pub pos: u32,
    /// One past the end of the node's last token
    pub end: u32,
    /// Index into the kind-specific data pool (`u32::MAX` = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Data pools
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    /// Cooked text for strings and templates, raw text otherwise
    pub text: String,
    /// Decoded value for numeric literals
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

/// Prefix and postfix operators (`!x`, `-x`, `x++`).
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

/// Keyword-style unary forms (`delete`, `typeof`, `void`, `await`, `yield`),
/// spread elements and non-null assertions.
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprDataEx {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    /// `None` for `new X` without an argument list
    pub arguments: Option<NodeList>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Array and object literal elements.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
    pub multi_line: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateExprData {
    pub head: NodeIndex,
    pub template_spans: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateSpanData {
    pub expression: NodeIndex,
    pub literal: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

/// Functions, arrows, methods, accessors and constructors.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    /// Block, or an expression for concise arrow bodies; NONE for overloads
    pub body: NodeIndex,
    pub is_async: bool,
    pub asterisk_token: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub name: NodeIndex,
    pub heritage: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    pub object_assignment_initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyDeclData {
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
    pub multi_line: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    pub statements: NodeList,
}

/// `VARIABLE_STATEMENT` holds one declaration list node;
/// `VARIABLE_DECLARATION_LIST` holds its declarations.
#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `for`, `while` and `do` loops.
#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

/// `return` and `throw`.
#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    /// NONE for `default:`
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Interfaces, type aliases and enums.
#[derive(Clone, Debug, Serialize)]
pub struct DeclarationData {
    pub name: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

/// `a as b` in import and export lists. `property_name` is NONE without `as`.
#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

/// Tuples, unions, intersections and indexed access types.
#[derive(Clone, Debug, Serialize)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct LiteralTypeData {
    pub literal: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionTypeData {
    pub return_type: NodeIndex,
}

/// Parenthesized types and `keyof`/`readonly`/`unique` operators.
#[derive(Clone, Debug, Serialize)]
pub struct WrappedTypeData {
    pub operator: u16,
    pub type_node: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Debug, Default)]
pub struct NodeArena {
    /// The thin node headers
    pub nodes: Vec<Node>,
    /// Parent links, parallel to `nodes`
    pub extended_info: Vec<ExtendedNodeInfo>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub qualified_names: Vec<QualifiedNameData>,
    pub computed_properties: Vec<ComputedPropertyData>,

    // Expressions
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub unary_exprs_ex: Vec<UnaryExprDataEx>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub template_exprs: Vec<TemplateExprData>,
    pub template_spans: Vec<TemplateSpanData>,
    pub tagged_templates: Vec<TaggedTemplateData>,
    pub type_assertions: Vec<TypeAssertionData>,

    // Functions, classes, members
    pub functions: Vec<FunctionData>,
    pub classes: Vec<ClassData>,
    pub parameters: Vec<ParameterData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub shorthand_properties: Vec<ShorthandPropertyData>,
    pub property_decls: Vec<PropertyDeclData>,

    // Statements
    pub source_files: Vec<SourceFileData>,
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub jump_data: Vec<JumpData>,
    pub return_data: Vec<ReturnData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub labeled_data: Vec<LabeledData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,
    pub binding_patterns: Vec<BindingPatternData>,
    pub binding_elements: Vec<BindingElementData>,
    pub declarations: Vec<DeclarationData>,
    pub import_decls: Vec<ImportDeclData>,
    pub specifiers: Vec<SpecifierData>,
    pub export_decls: Vec<ExportDeclData>,

    // Types
    pub type_refs: Vec<TypeRefData>,
    pub array_types: Vec<ArrayTypeData>,
    pub composite_types: Vec<CompositeTypeData>,
    pub literal_types: Vec<LiteralTypeData>,
    pub function_types: Vec<FunctionTypeData>,
    pub wrapped_types: Vec<WrappedTypeData>,
}
