use std::fmt::Debug;

pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::MembershipFunction;
use crate::sets::FuzzySet;

/// Membership functions for an enumerated term vocabulary, e.g. the
/// `Low`/`Med`/`High` terms of one linguistic variable.
///
/// The table owns its functions; sets handed out by [`Terms::set`] borrow
/// from it.
pub struct Terms<K: Key>(FixedMap<K, MembershipFunction>);

impl<K: Key> Default for Terms<K> {
    fn default() -> Self {
        Self(FixedMap::new())
    }
}

impl<K: Key + Debug> Terms<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, function: MembershipFunction) -> Option<MembershipFunction> {
        self.0.insert(key, function)
    }

    pub fn get(&self, key: K) -> Option<&MembershipFunction> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A fuzzy set labeled after `key`. If no function was inserted for the
    /// term the set is left unbound.
    pub fn set(&self, key: K) -> FuzzySet<'_> {
        let mut set = FuzzySet::new();

        set.set_label(format!("{key:?}"));

        if let Some(function) = self.0.get(key) {
            set.set_function(function);
        }

        set
    }
}

#[test]
fn test_terms_bind_sets() {
    use crate::error::FuzzyError;

    #[derive(Clone, Copy, Debug, Key)]
    enum Temp {
        Cold,
        Warm,
        Hot,
    }

    let mut terms = Terms::new();

    assert!(terms.is_empty());

    terms.insert(Temp::Cold, MembershipFunction::bell(20., 0., 1.).unwrap());
    terms.insert(Temp::Warm, MembershipFunction::bell(20., 20., 1.).unwrap());

    assert_eq!(terms.len(), 2);
    assert_eq!(terms.get(Temp::Warm).map(|f| f.center()), Some(20.));

    let warm = terms.set(Temp::Warm);

    assert_eq!(warm.label(), Some("Warm"));
    assert_eq!(warm.evaluate(20.), Ok(1.));

    let hot = terms.set(Temp::Hot);

    assert_eq!(
        hot.evaluate(20.),
        Err(FuzzyError::UnboundMembershipFunction {
            label: Some("Hot".into())
        })
    );
}
