use alloc::vec::Vec;

use hashbrown::HashMap;
use proptest::prelude::*;

use super::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64, u32),
    InsertIfAbsent(u64, u32),
    Remove(u64),
    Get(u64),
    EntryBump(u64),
    Clear,
    ShrinkToFit,
}

fn key_strategy() -> impl Strategy<Value = u64> + Clone {
    // Small keys revisit each other and hit zero often; the wide range keeps
    // some probes in sparse territory.
    prop_oneof![
        6 => 0u64..64,
        3 => (0u64..32).prop_map(|k| k << 40),
        1 => any::<u64>(),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        40 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        10 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::InsertIfAbsent(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Get),
        8 => key.clone().prop_map(Op::EntryBump),
        1 => Just(Op::Clear),
        1 => Just(Op::ShrinkToFit),
    ];
    prop::collection::vec(op, 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 20_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_hashbrown(ops in ops_strategy()) {
        let mut m: IntMap<u64, u32> = IntMap::new();
        let mut r: HashMap<u64, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(m.insert(key, value), r.insert(key, value));
                }
                Op::InsertIfAbsent(key, value) => {
                    let existed = r.contains_key(&key);
                    let stored = *r.entry(key).or_insert(value);
                    let (got, got_existed) = m.insert_if_absent(key, value);
                    prop_assert_eq!(*got, stored);
                    prop_assert_eq!(got_existed, existed);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(m.remove(key), r.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(m.get(key), r.get(&key));
                    prop_assert_eq!(m.contains_key(key), r.contains_key(&key));
                }
                Op::EntryBump(key) => {
                    let got = *m.entry(key).and_modify(|v| *v = v.wrapping_add(1)).or_insert(7);
                    let expected = *r.entry(key).and_modify(|v| *v = v.wrapping_add(1)).or_insert(7);
                    prop_assert_eq!(got, expected);
                }
                Op::Clear => {
                    m.clear();
                    r.clear();
                }
                Op::ShrinkToFit => {
                    m.shrink_to_fit();
                }
            }

            prop_assert_eq!(m.len(), r.len());
            m.assert_invariants();
        }

        let mut got: Vec<(u64, u32)> = m.iter().map(|(k, v)| (k, *v)).collect();
        let mut expected: Vec<(u64, u32)> = r.iter().map(|(k, v)| (*k, *v)).collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_set_matches_map_keys(keys in prop::collection::vec(key_strategy(), 0..=500)) {
        let mut s: IntSet<u64> = IntSet::new();
        let mut r: HashMap<u64, ()> = HashMap::new();

        for key in keys {
            prop_assert_eq!(s.insert(key), r.insert(key, ()).is_none());
        }
        prop_assert_eq!(s.len(), r.len());

        let mut got: Vec<u64> = s.iter().collect();
        let mut expected: Vec<u64> = r.keys().copied().collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_with_capacity_never_grows_within_hint(hint in 0usize..2000) {
        let mut m: IntMap<u32, ()> = IntMap::with_capacity(hint);
        let capacity = m.capacity();
        for k in 1..=hint as u32 {
            m.insert(k, ());
        }
        prop_assert_eq!(m.capacity(), capacity);
        prop_assert!(capacity.is_power_of_two());
    }
}
