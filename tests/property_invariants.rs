use proptest::prelude::*;

use petlog::{
    core::store::MemoryStore,
    persist::{RecordFilter, RecordStore, sqlite::SqliteStore},
    pipeline::reconcile::{Reconciled, reconcile},
    record::Record,
    types::{Classification, DietType},
};

const FAMILIES: [&str; 4] = ["Canidae", "Felidae", "Iguanidae", "Psittacidae"];

#[derive(Debug, Clone)]
enum Action {
    Reconcile { key: u8, class: u8, family: u8 },
    Update { target: u8, class: u8, family: u8 },
    Delete { target: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..32, 0u8..6, 0u8..4).prop_map(|(key, class, family)| Action::Reconcile { key, class, family }),
        (0u8..32, 0u8..6, 0u8..4).prop_map(|(target, class, family)| Action::Update { target, class, family }),
        (0u8..32).prop_map(|target| Action::Delete { target }),
    ]
}

fn pet(id: String, class: u8, family: u8) -> Record {
    Record {
        nickname: format!("{id}-nick"),
        id,
        classification: Some(Classification::ALL[usize::from(class) % 6]),
        family: FAMILIES[usize::from(family) % FAMILIES.len()].to_string(),
        genus: "Genus".to_string(),
        species: "species".to_string(),
        diet_type: Some(DietType::ALL[usize::from(class) % 6]),
        age: 1 + i32::from(family),
        weight: 0.5 + f64::from(class),
        notes: Some(String::new()),
    }
}

fn full_scan(store: &MemoryStore, filter: &RecordFilter) -> Vec<String> {
    store
        .list_all()
        .expect("list")
        .into_iter()
        .filter(|r| filter.matches(r))
        .map(|r| r.id)
        .collect()
}

fn found(store: &impl RecordStore, filter: &RecordFilter) -> Vec<String> {
    store.find(filter).expect("find").into_iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn random_sequences_keep_stores_in_agreement(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut memory = MemoryStore::new();
        let mut sqlite = SqliteStore::open_in_memory().expect("open sqlite");

        for action in actions {
            match action {
                Action::Reconcile { key, class, family } => {
                    let rec = pet(format!("P{key:03}"), class, family);
                    let expect_insert = !memory.exists(&rec.id).expect("exists");
                    let a = reconcile(rec.clone(), &mut memory).expect("memory reconcile");
                    let b = reconcile(rec, &mut sqlite).expect("sqlite reconcile");
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(a == Reconciled::Inserted, expect_insert);
                }
                Action::Update { target, class, family } => {
                    let ids = memory.ordered_ids().to_vec();
                    if ids.is_empty() {
                        continue;
                    }
                    let rec = pet(ids[usize::from(target) % ids.len()].clone(), class, family);
                    memory.update(rec.clone()).expect("memory update");
                    sqlite.update(rec).expect("sqlite update");
                }
                Action::Delete { target } => {
                    let ids = memory.ordered_ids().to_vec();
                    if ids.is_empty() {
                        continue;
                    }
                    let id = &ids[usize::from(target) % ids.len()];
                    memory.delete(id).expect("memory delete");
                    sqlite.delete(id).expect("sqlite delete");
                }
            }

            for class in Classification::ALL {
                let filter = RecordFilter { classification: Some(class), ..RecordFilter::default() };
                prop_assert_eq!(found(&memory, &filter), full_scan(&memory, &filter));
            }
            for family in FAMILIES {
                let filter = RecordFilter { family: Some(family.to_string()), ..RecordFilter::default() };
                prop_assert_eq!(found(&memory, &filter), full_scan(&memory, &filter));
            }
        }

        let ids = memory.ordered_ids();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(memory.list_all().expect("list"), sqlite.list_all().expect("list"));
        prop_assert_eq!(memory.len().expect("len"), sqlite.len().expect("len"));
    }
}
