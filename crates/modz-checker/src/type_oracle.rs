//! Type oracle: capability queries over an optional type service.
//!
//! A `TypeService` answers narrow questions about the static type of an
//! expression. The oracle maps each `Capability` onto those questions and,
//! when the answer is `Unknown`, collapses it with the capability's own
//! default (see `Capability::default_when_unknown`).

use modz_parser::NodeIndex;
use tracing::trace;

/// A three-valued answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriState {
    Yes,
    No,
    Unknown,
}

impl TriState {
    #[inline]
    pub fn from_bool(value: bool) -> TriState {
        if value { TriState::Yes } else { TriState::No }
    }

    #[inline]
    pub fn is_no(self) -> bool {
        self == TriState::No
    }

    /// Collapse to a boolean, using `default` for `Unknown`.
    #[inline]
    pub fn unwrap_or(self, default: bool) -> bool {
        match self {
            TriState::Yes => true,
            TriState::No => false,
            TriState::Unknown => default,
        }
    }

    /// Either holds.
    pub fn or(self, other: TriState) -> TriState {
        match (self, other) {
            (TriState::Yes, _) | (_, TriState::Yes) => TriState::Yes,
            (TriState::No, TriState::No) => TriState::No,
            _ => TriState::Unknown,
        }
    }

    /// Both hold.
    pub fn and(self, other: TriState) -> TriState {
        match (self, other) {
            (TriState::No, _) | (_, TriState::No) => TriState::No,
            (TriState::Yes, TriState::Yes) => TriState::Yes,
            _ => TriState::Unknown,
        }
    }
}

/// Opaque handle for a type, meaningful only to the service that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// The type-checking service interface the oracle consumes.
pub trait TypeService {
    /// False for the null object; matchers that require types check this
    /// once per run rather than per node.
    fn is_available(&self) -> bool {
        true
    }

    fn type_of(&self, node: NodeIndex) -> Option<TypeId>;

    fn is_array_like(&self, ty: TypeId) -> TriState;

    fn is_string_like(&self, ty: TypeId) -> TriState;

    fn is_set_like(&self, ty: TypeId) -> TriState;

    fn has_nominal_name(&self, ty: TypeId, name: &str) -> TriState;

    fn type_name(&self, ty: TypeId) -> Option<String>;
}

/// The "no type information" service: every question is `Unknown`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTypeService;

impl TypeService for NoTypeService {
    fn is_available(&self) -> bool {
        false
    }

    fn type_of(&self, _node: NodeIndex) -> Option<TypeId> {
        None
    }

    fn is_array_like(&self, _ty: TypeId) -> TriState {
        TriState::Unknown
    }

    fn is_string_like(&self, _ty: TypeId) -> TriState {
        TriState::Unknown
    }

    fn is_set_like(&self, _ty: TypeId) -> TriState {
        TriState::Unknown
    }

    fn has_nominal_name(&self, _ty: TypeId, _name: &str) -> TriState {
        TriState::Unknown
    }

    fn type_name(&self, _ty: TypeId) -> Option<String> {
        None
    }
}

/// A question a matcher asks about an expression's type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Receiver supports index-based access and `.at()` (array or string).
    /// Only used to drop matches on receivers known to be something else.
    Indexable,
    /// Receiver supports `.includes()` with `indexOf` semantics (array or
    /// string). Same role as `Indexable`.
    Searchable,
    /// Value is an array; the rewrite relies on array semantics.
    ArrayLike,
    /// Value is a string; the rewrite relies on string methods.
    StringLike,
    /// Value is a `Set`; the rewrite calls `.has()`.
    SetLike,
    /// Value is a `RegExp`; the rewrite calls `.test()`.
    RegExp,
}

impl Capability {
    /// What an `Unknown` answer collapses to.
    ///
    /// `Indexable` and `Searchable` guard syntactic matches whose rewrite
    /// is already correct for every receiver that has the original method,
    /// so they only decline on a definite `No`. Every other capability is a
    /// precondition of the rewrite and must be confirmed.
    pub fn default_when_unknown(self) -> bool {
        match self {
            Capability::Indexable | Capability::Searchable => true,
            Capability::ArrayLike
            | Capability::StringLike
            | Capability::SetLike
            | Capability::RegExp => false,
        }
    }
}

/// Capability queries over a `TypeService`.
#[derive(Clone, Copy)]
pub struct TypeOracle<'a> {
    service: &'a dyn TypeService,
}

impl<'a> TypeOracle<'a> {
    pub fn new(service: &'a dyn TypeService) -> TypeOracle<'a> {
        TypeOracle { service }
    }

    pub fn is_available(&self) -> bool {
        self.service.is_available()
    }

    pub fn service(&self) -> &'a dyn TypeService {
        self.service
    }

    /// Raw tri-state answer for one capability.
    pub fn query(&self, node: NodeIndex, capability: Capability) -> TriState {
        if !self.service.is_available() {
            return TriState::Unknown;
        }
        let Some(ty) = self.service.type_of(node) else {
            return TriState::Unknown;
        };
        let answer = match capability {
            Capability::Indexable | Capability::Searchable => self
                .service
                .is_array_like(ty)
                .or(self.service.is_string_like(ty)),
            Capability::ArrayLike => self.service.is_array_like(ty),
            Capability::StringLike => self.service.is_string_like(ty),
            Capability::SetLike => self.service.is_set_like(ty),
            Capability::RegExp => self.service.has_nominal_name(ty, "RegExp"),
        };
        trace!(node = node.0, ?capability, ?answer, "type query");
        answer
    }

    /// Collapsed answer using the capability's default for `Unknown`.
    pub fn holds(&self, node: NodeIndex, capability: Capability) -> bool {
        self.query(node, capability)
            .unwrap_or(capability.default_when_unknown())
    }

    /// Display name of the node's type, if the service knows it.
    pub fn type_name(&self, node: NodeIndex) -> Option<String> {
        let ty = self.service.type_of(node)?;
        self.service.type_name(ty)
    }
}

impl std::fmt::Debug for TypeOracle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeOracle")
            .field("available", &self.service.is_available())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/type_oracle_tests.rs"]
mod tests;
