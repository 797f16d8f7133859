//! Randomized operation sequences checked against a plain reference model.
//!
//! Every save, delete, delete-all and undo is mirrored on a `BTreeMap` of set name to captured
//! macro names, and the store must agree with it after each step. Saves may fall between a delete
//! and its undo.

use macro_sets_core::{
    InMemoryHost, MacroIcon, MacroInfo, MacroSetError, MacroSetStore, SlotScope,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;

type Model = BTreeMap<String, Vec<String>>;

fn host() -> InMemoryHost {
    let mut host = InMemoryHost::default();
    for index in [1, 4, 9, 120, 121, 150] {
        host.insert_macro(
            index,
            MacroInfo::new(format!("m{index}"), MacroIcon::DYNAMIC, "/dance"),
        );
    }
    host
}

fn captured(scope: SlotScope) -> Vec<String> {
    [1, 4, 9, 120, 121, 150]
        .into_iter()
        .filter(|index| scope.range().contains(*index))
        .map(|index| format!("m{index}"))
        .collect()
}

fn snapshot(store: &MacroSetStore<InMemoryHost, Vec<String>>) -> Model {
    store
        .sets()
        .iter()
        .map(|(name, set)| {
            (
                name.clone(),
                set.macros.iter().map(|m| m.name.clone()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_random_operations_match_reference() {
    let names = ["alpha", "beta", "gamma", "bad name", "delta"];
    let scopes = [SlotScope::General, SlotScope::Character, SlotScope::Both];

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = MacroSetStore::new(host(), Vec::new());
        let mut model = Model::new();
        let mut undo: Option<Model> = None;

        for _ in 0..200 {
            let name = names[rng.gen_range(0..names.len())];
            match rng.gen_range(0..10) {
                0..=3 => {
                    let scope = scopes[rng.gen_range(0..scopes.len())];
                    let result = store.save_macro_set(name, Some(scope));
                    if name.contains(' ') {
                        assert_eq!(result, Err(MacroSetError::InvalidSetName(name.into())));
                    } else {
                        assert!(result.is_ok());
                        model.insert(name.to_string(), captured(scope));
                    }
                }
                4..=6 => {
                    let removed = store.delete_macro_set(name);
                    assert_eq!(removed, model.contains_key(name));
                    if removed {
                        undo = Some(model.clone());
                        model.remove(name);
                    }
                }
                7 => {
                    assert_eq!(store.delete_all_macro_sets(), model.len());
                    undo = Some(std::mem::take(&mut model));
                }
                _ => match undo.take() {
                    Some(previous) => {
                        for (name, macros) in previous {
                            model.entry(name).or_insert(macros);
                        }
                        assert_eq!(store.undo_last_operation(), Ok(model.len()));
                    }
                    None => {
                        assert_eq!(
                            store.undo_last_operation(),
                            Err(MacroSetError::NothingToUndo)
                        );
                    }
                },
            }
            assert_eq!(snapshot(&store), model, "seed {seed}");
        }
    }
}
