use crate::type_oracle::{Capability, NoTypeService, TriState, TypeId, TypeOracle, TypeService};
use modz_parser::NodeIndex;

/// Every node has the same type with fixed answers.
struct FixedTypes {
    array: TriState,
    string: TriState,
    set: TriState,
    name: Option<&'static str>,
}

impl FixedTypes {
    fn new(array: TriState, string: TriState) -> FixedTypes {
        FixedTypes {
            array,
            string,
            set: TriState::No,
            name: None,
        }
    }
}

impl TypeService for FixedTypes {
    fn type_of(&self, _node: NodeIndex) -> Option<TypeId> {
        Some(TypeId(1))
    }

    fn is_array_like(&self, _ty: TypeId) -> TriState {
        self.array
    }

    fn is_string_like(&self, _ty: TypeId) -> TriState {
        self.string
    }

    fn is_set_like(&self, _ty: TypeId) -> TriState {
        self.set
    }

    fn has_nominal_name(&self, _ty: TypeId, name: &str) -> TriState {
        match self.name {
            Some(own) => TriState::from_bool(own == name),
            None => TriState::Unknown,
        }
    }

    fn type_name(&self, _ty: TypeId) -> Option<String> {
        self.name.map(str::to_string)
    }
}

const NODE: NodeIndex = NodeIndex(0);

#[test]
fn tri_state_combinators() {
    assert_eq!(TriState::Yes.or(TriState::Unknown), TriState::Yes);
    assert_eq!(TriState::No.or(TriState::No), TriState::No);
    assert_eq!(TriState::No.or(TriState::Unknown), TriState::Unknown);
    assert_eq!(TriState::No.and(TriState::Unknown), TriState::No);
    assert_eq!(TriState::Yes.and(TriState::Yes), TriState::Yes);
    assert_eq!(TriState::Yes.and(TriState::Unknown), TriState::Unknown);
    assert!(TriState::Unknown.unwrap_or(true));
    assert!(!TriState::Unknown.unwrap_or(false));
    assert!(!TriState::No.unwrap_or(true));
}

#[test]
fn null_object_answers_unknown_and_applies_defaults() {
    let service = NoTypeService;
    let oracle = TypeOracle::new(&service);
    assert!(!oracle.is_available());
    assert_eq!(oracle.query(NODE, Capability::ArrayLike), TriState::Unknown);
    assert!(oracle.holds(NODE, Capability::Indexable));
    assert!(oracle.holds(NODE, Capability::Searchable));
    assert!(!oracle.holds(NODE, Capability::ArrayLike));
    assert!(!oracle.holds(NODE, Capability::StringLike));
    assert!(!oracle.holds(NODE, Capability::SetLike));
    assert!(!oracle.holds(NODE, Capability::RegExp));
    assert_eq!(oracle.type_name(NODE), None);
}

#[test]
fn indexable_declines_only_on_definite_no() {
    let strings = FixedTypes::new(TriState::No, TriState::Yes);
    assert!(TypeOracle::new(&strings).holds(NODE, Capability::Indexable));

    let unknown = FixedTypes::new(TriState::No, TriState::Unknown);
    assert!(TypeOracle::new(&unknown).holds(NODE, Capability::Searchable));

    let neither = FixedTypes::new(TriState::No, TriState::No);
    let oracle = TypeOracle::new(&neither);
    assert_eq!(oracle.query(NODE, Capability::Indexable), TriState::No);
    assert!(!oracle.holds(NODE, Capability::Indexable));
}

#[test]
fn preconditions_need_confirmation() {
    let arrays = FixedTypes::new(TriState::Yes, TriState::No);
    let oracle = TypeOracle::new(&arrays);
    assert!(oracle.holds(NODE, Capability::ArrayLike));
    assert!(!oracle.holds(NODE, Capability::StringLike));
    assert!(!oracle.holds(NODE, Capability::SetLike));

    let maybe = FixedTypes::new(TriState::Unknown, TriState::Unknown);
    assert!(!TypeOracle::new(&maybe).holds(NODE, Capability::ArrayLike));
}

#[test]
fn regexp_uses_nominal_name() {
    let regex = FixedTypes {
        name: Some("RegExp"),
        ..FixedTypes::new(TriState::No, TriState::No)
    };
    let oracle = TypeOracle::new(&regex);
    assert!(oracle.holds(NODE, Capability::RegExp));
    assert_eq!(oracle.type_name(NODE), Some("RegExp".to_string()));

    let date = FixedTypes {
        name: Some("Date"),
        ..FixedTypes::new(TriState::No, TriState::No)
    };
    assert!(!TypeOracle::new(&date).holds(NODE, Capability::RegExp));
}
