//! A `TypeService` derived from what a file declares about itself.
//!
//! No inference engine: a type is read off a TypeScript annotation
//! (variable, parameter or function return type), an `as` assertion, or
//! the shape of an expression reached directly or through a single static
//! initializer. A `TypeId` is the index of the node the type was read from:
//! either a type node or an expression whose shape fixes the type.

use modz_binder::BinderState;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;
use tracing::trace;

use crate::type_oracle::{TriState, TypeId, TypeService};

const MAX_TYPE_RESOLUTION_DEPTH: u32 = 16;

const ARRAY_TYPE_NAMES: &[&str] = &[
    "Array",
    "ReadonlyArray",
    "Int8Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "Int16Array",
    "Uint16Array",
    "Int32Array",
    "Uint32Array",
    "Float32Array",
    "Float64Array",
    "BigInt64Array",
    "BigUint64Array",
];

const SET_TYPE_NAMES: &[&str] = &["Set", "ReadonlySet"];

const STRING_METHODS_RETURNING_STRING: &[&str] = &[
    "charAt",
    "concat",
    "normalize",
    "padEnd",
    "padStart",
    "repeat",
    "replace",
    "replaceAll",
    "slice",
    "substr",
    "substring",
    "toLocaleLowerCase",
    "toLocaleUpperCase",
    "toLowerCase",
    "toString",
    "toUpperCase",
    "trim",
    "trimEnd",
    "trimStart",
];

const ARRAY_METHODS_RETURNING_ARRAY: &[&str] = &[
    "concat",
    "copyWithin",
    "fill",
    "filter",
    "flat",
    "flatMap",
    "map",
    "reverse",
    "slice",
    "sort",
    "splice",
    "toReversed",
    "toSorted",
    "toSpliced",
    "with",
];

/// What a type node or expression says about a value.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Shape {
    Unknown,
    Array,
    String,
    Set,
    Primitive(&'static str),
    Nullish,
    /// A nominal type other than the ones above (`RegExp`, `NodeList`,
    /// a local class or interface).
    Named(String),
    /// Object types without a usable name.
    Object,
    Union(Vec<Shape>),
}

impl Shape {
    /// Apply `pred` to every non-nullish member of a union.
    fn test(&self, pred: &impl Fn(&Shape) -> TriState) -> TriState {
        match self {
            Shape::Unknown => TriState::Unknown,
            Shape::Union(members) => {
                let mut answers = members
                    .iter()
                    .filter(|member| **member != Shape::Nullish)
                    .map(|member| member.test(pred));
                let Some(first) = answers.next() else {
                    return TriState::No;
                };
                answers.fold(first, |acc, answer| if acc == answer { acc } else { TriState::Unknown })
            }
            other => pred(other),
        }
    }

    fn display(&self) -> Option<String> {
        Some(match self {
            Shape::Unknown => return None,
            Shape::Array => "Array".to_string(),
            Shape::String => "string".to_string(),
            Shape::Set => "Set".to_string(),
            Shape::Primitive(name) => (*name).to_string(),
            Shape::Nullish => "undefined".to_string(),
            Shape::Named(name) => name.clone(),
            Shape::Object => "object".to_string(),
            Shape::Union(members) => {
                let parts: Option<Vec<String>> = members.iter().map(Shape::display).collect();
                parts?.join(" | ")
            }
        })
    }
}

/// Declaration-driven type service for one bound file.
pub struct DeclaredTypeService<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
}

impl<'a> DeclaredTypeService<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> DeclaredTypeService<'a> {
        DeclaredTypeService { arena, binder }
    }

    // =========================================================================
    // Locating the type source
    // =========================================================================

    fn type_source(&self, node: NodeIndex, depth: u32) -> Option<NodeIndex> {
        if depth > MAX_TYPE_RESOLUTION_DEPTH {
            trace!(node = node.0, "type resolution depth exceeded");
            return None;
        }
        let arena = self.arena;
        let node = arena.skip_parenthesized(node);
        let n = arena.get(node)?;
        match n.kind {
            k if k == SyntaxKind::Identifier as u16 => self.identifier_type_source(node, depth),
            syntax_kind_ext::AS_EXPRESSION => {
                let assertion = arena.get_type_assertion(n)?;
                if arena.is_kind(assertion.type_node, SyntaxKind::ConstKeyword as u16) {
                    self.type_source(assertion.expression, depth + 1)
                } else {
                    Some(assertion.type_node)
                }
            }
            syntax_kind_ext::SATISFIES_EXPRESSION => {
                let assertion = arena.get_type_assertion(n)?;
                self.type_source(assertion.expression, depth + 1)
            }
            syntax_kind_ext::NON_NULL_EXPRESSION => {
                let inner = arena.get_unary_expr_ex(n)?;
                self.type_source(inner.expression, depth + 1)
            }
            syntax_kind_ext::CALL_EXPRESSION => Some(self.call_return_annotation(node).unwrap_or(node)),
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
            | syntax_kind_ext::TEMPLATE_EXPRESSION
            | syntax_kind_ext::NEW_EXPRESSION => Some(node),
            k if k == SyntaxKind::StringLiteral as u16
                || k == SyntaxKind::NoSubstitutionTemplateLiteral as u16
                || k == SyntaxKind::NumericLiteral as u16
                || k == SyntaxKind::BigIntLiteral as u16
                || k == SyntaxKind::RegularExpressionLiteral as u16
                || k == SyntaxKind::TrueKeyword as u16
                || k == SyntaxKind::FalseKeyword as u16 =>
            {
                Some(node)
            }
            _ => None,
        }
    }

    fn identifier_type_source(&self, ident: NodeIndex, depth: u32) -> Option<NodeIndex> {
        let arena = self.arena;
        let sym_id = self.binder.resolve_identifier(arena, ident)?;
        let symbol = self.binder.get_symbol(sym_id)?;
        let [declaration] = symbol.declarations.as_slice() else {
            return None;
        };
        let decl_node = arena.get(*declaration)?;
        match decl_node.kind {
            syntax_kind_ext::VARIABLE_DECLARATION => {
                let decl = arena.get_variable_declaration(decl_node)?;
                if decl.type_annotation.is_some() {
                    return Some(decl.type_annotation);
                }
                let init = self.binder.resolve_single_initializer(arena, ident)?;
                self.type_source(init, depth + 1)
            }
            syntax_kind_ext::PARAMETER => {
                let param = arena.get_parameter(decl_node)?;
                if param.type_annotation.is_some() {
                    Some(param.type_annotation)
                } else if param.dot_dot_dot_token && arena.is_kind(param.name, SyntaxKind::Identifier as u16) {
                    Some(*declaration)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Declared return type of a call to a local function.
    fn call_return_annotation(&self, call: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let callee = arena.skip_parenthesized(arena.get_call_expr_at(call)?.expression);
        if !arena.is_kind(callee, SyntaxKind::Identifier as u16) {
            return None;
        }
        let sym_id = self.binder.resolve_identifier(arena, callee)?;
        let symbol = self.binder.get_symbol(sym_id)?;
        let [declaration] = symbol.declarations.as_slice() else {
            return None;
        };
        let function = match arena.get_function_at(*declaration) {
            Some(function) => function,
            None => {
                let init = self.binder.resolve_single_initializer(arena, callee)?;
                arena.get_function_at(arena.skip_parenthesized(init))?
            }
        };
        if function.is_async || function.asterisk_token {
            return None;
        }
        function.type_annotation.is_some().then_some(function.type_annotation)
    }

    // =========================================================================
    // Reading the shape
    // =========================================================================

    fn shape(&self, source: NodeIndex, depth: u32) -> Shape {
        if depth > MAX_TYPE_RESOLUTION_DEPTH {
            return Shape::Unknown;
        }
        let arena = self.arena;
        let Some(n) = arena.get(source) else {
            return Shape::Unknown;
        };
        match n.kind {
            syntax_kind_ext::TYPE_REFERENCE => self.reference_shape(source, depth),
            syntax_kind_ext::ARRAY_TYPE
            | syntax_kind_ext::TUPLE_TYPE
            | syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
            | syntax_kind_ext::PARAMETER => Shape::Array,
            syntax_kind_ext::UNION_TYPE => arena.get_composite_type(n).map_or(Shape::Unknown, |union| {
                Shape::Union(
                    union
                        .types
                        .nodes
                        .iter()
                        .map(|&member| self.shape(member, depth + 1))
                        .collect(),
                )
            }),
            syntax_kind_ext::PARENTHESIZED_TYPE | syntax_kind_ext::TYPE_OPERATOR => {
                match arena.get_wrapped_type(n) {
                    Some(wrapped)
                        if wrapped.operator == SyntaxKind::OpenParenToken as u16
                            || wrapped.operator == SyntaxKind::ReadonlyKeyword as u16 =>
                    {
                        self.shape(wrapped.type_node, depth + 1)
                    }
                    _ => Shape::Unknown,
                }
            }
            syntax_kind_ext::LITERAL_TYPE => arena
                .get_literal_type(n)
                .map_or(Shape::Unknown, |lit| self.shape(lit.literal, depth + 1)),
            syntax_kind_ext::FUNCTION_TYPE => Shape::Object,
            syntax_kind_ext::TEMPLATE_EXPRESSION => Shape::String,
            syntax_kind_ext::NEW_EXPRESSION => self.constructed_shape(source),
            syntax_kind_ext::CALL_EXPRESSION => self.call_shape(source, depth),
            k => keyword_or_literal_shape(k),
        }
    }

    fn reference_shape(&self, type_ref: NodeIndex, depth: u32) -> Shape {
        let arena = self.arena;
        let Some(data) = arena.get_type_ref_at(type_ref) else {
            return Shape::Unknown;
        };
        let Some(name) = arena.identifier_text(data.type_name) else {
            return Shape::Unknown;
        };
        if let Some(sym_id) = self.binder.lookup_type(arena, type_ref, name) {
            let declaration = self
                .binder
                .get_symbol(sym_id)
                .and_then(|sym| sym.declarations.first().copied());
            return match declaration.and_then(|decl| arena.get(decl).map(|n| (decl, n.kind))) {
                Some((decl, syntax_kind_ext::TYPE_ALIAS_DECLARATION)) => arena
                    .get_declaration_at(decl)
                    .map_or(Shape::Unknown, |alias| self.shape(alias.type_node, depth + 1)),
                Some(_) => Shape::Named(name.to_string()),
                None => Shape::Unknown,
            };
        }
        builtin_shape(name)
    }

    fn constructed_shape(&self, new_expr: NodeIndex) -> Shape {
        let arena = self.arena;
        let Some(callee) = arena.get_call_expr_at(new_expr).map(|call| call.expression) else {
            return Shape::Unknown;
        };
        match self.global_constructor_name(callee) {
            Some("String") => Shape::String,
            Some(name) => builtin_shape(name),
            None => Shape::Object,
        }
    }

    /// `X`, `window.X` or `globalThis.X` where `X` is not shadowed locally.
    fn global_constructor_name(&self, callee: NodeIndex) -> Option<&'a str> {
        let arena = self.arena;
        let callee = arena.skip_parenthesized(callee);
        if arena.is_kind(callee, SyntaxKind::Identifier as u16) {
            let name = arena.identifier_text(callee)?;
            return self
                .binder
                .is_global_reference(arena, callee, name)
                .then_some(name);
        }
        let access = arena.get_access_expr_at(callee)?;
        let receiver = access.expression;
        let is_global_object = ["window", "globalThis"].iter().any(|global| {
            arena.is_identifier_named(receiver, global)
                && self.binder.is_global_reference(arena, receiver, global)
        });
        if is_global_object {
            arena.property_access_name(callee)
        } else {
            None
        }
    }

    fn call_shape(&self, call: NodeIndex, depth: u32) -> Shape {
        let arena = self.arena;
        let Some(callee) = arena.get_call_expr_at(call).map(|data| data.expression) else {
            return Shape::Unknown;
        };
        let callee = arena.skip_parenthesized(callee);
        if arena.is_kind(callee, SyntaxKind::Identifier as u16) {
            return match self.global_constructor_name(callee) {
                Some("Array") => Shape::Array,
                Some("String") => Shape::String,
                _ => Shape::Unknown,
            };
        }
        let Some(method) = arena.property_access_name(callee) else {
            return Shape::Unknown;
        };
        let Some(receiver) = arena.get_access_expr_at(callee).map(|access| access.expression) else {
            return Shape::Unknown;
        };
        let receiver_is = |global: &str| {
            arena.is_identifier_named(receiver, global)
                && self.binder.is_global_reference(arena, receiver, global)
        };
        if receiver_is("Array") && matches!(method, "from" | "of") {
            return Shape::Array;
        }
        if receiver_is("Object") && matches!(method, "keys" | "values" | "entries" | "getOwnPropertyNames") {
            return Shape::Array;
        }
        let receiver_shape = self
            .type_source(receiver, depth + 1)
            .map_or(Shape::Unknown, |source| self.shape(source, depth + 1));
        match receiver_shape {
            Shape::String if STRING_METHODS_RETURNING_STRING.contains(&method) => Shape::String,
            Shape::String if method == "split" => Shape::Array,
            Shape::Array if ARRAY_METHODS_RETURNING_ARRAY.contains(&method) => Shape::Array,
            Shape::Array if method == "join" => Shape::String,
            _ => Shape::Unknown,
        }
    }

    fn shape_of(&self, ty: TypeId) -> Shape {
        self.shape(NodeIndex(ty.0), 0)
    }
}

/// Shape of a keyword type, literal type member or literal expression.
fn keyword_or_literal_shape(kind: u16) -> Shape {
    let Some(kind) = SyntaxKind::from_u16(kind) else {
        return Shape::Unknown;
    };
    match kind {
        SyntaxKind::StringKeyword | SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
            Shape::String
        }
        SyntaxKind::NumberKeyword | SyntaxKind::NumericLiteral => Shape::Primitive("number"),
        SyntaxKind::BooleanKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
            Shape::Primitive("boolean")
        }
        SyntaxKind::BigIntKeyword | SyntaxKind::BigIntLiteral => Shape::Primitive("bigint"),
        SyntaxKind::SymbolKeyword => Shape::Primitive("symbol"),
        SyntaxKind::NullKeyword | SyntaxKind::UndefinedKeyword | SyntaxKind::VoidKeyword => Shape::Nullish,
        SyntaxKind::ObjectKeyword => Shape::Object,
        SyntaxKind::RegularExpressionLiteral => Shape::Named("RegExp".to_string()),
        _ => Shape::Unknown,
    }
}

/// Shape of a global type or constructor name.
fn builtin_shape(name: &str) -> Shape {
    if ARRAY_TYPE_NAMES.contains(&name) {
        Shape::Array
    } else if SET_TYPE_NAMES.contains(&name) {
        Shape::Set
    } else if name == "String" {
        Shape::String
    } else {
        Shape::Named(name.to_string())
    }
}

impl TypeService for DeclaredTypeService<'_> {
    fn type_of(&self, node: NodeIndex) -> Option<TypeId> {
        self.type_source(node, 0).map(|source| TypeId(source.0))
    }

    fn is_array_like(&self, ty: TypeId) -> TriState {
        self.shape_of(ty)
            .test(&|shape| TriState::from_bool(*shape == Shape::Array))
    }

    fn is_string_like(&self, ty: TypeId) -> TriState {
        self.shape_of(ty)
            .test(&|shape| TriState::from_bool(*shape == Shape::String))
    }

    fn is_set_like(&self, ty: TypeId) -> TriState {
        self.shape_of(ty)
            .test(&|shape| TriState::from_bool(*shape == Shape::Set))
    }

    fn has_nominal_name(&self, ty: TypeId, name: &str) -> TriState {
        self.shape_of(ty).test(&|shape| {
            TriState::from_bool(match shape {
                Shape::Named(own) => own == name,
                Shape::Array => name == "Array",
                Shape::Set => name == "Set",
                Shape::String => name == "String",
                _ => false,
            })
        })
    }

    fn type_name(&self, ty: TypeId) -> Option<String> {
        self.shape_of(ty).display()
    }
}

#[cfg(test)]
#[path = "../tests/declared_types_tests.rs"]
mod tests;
