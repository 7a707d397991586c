use tempfile::TempDir;

use petlog::{
    persist::{RecordFilter, RecordStore, StoreError, sqlite::SqliteStore},
    record::Record,
    types::{Classification, DietType},
};

fn pet(id: &str, classification: Classification, family: &str, diet: DietType) -> Record {
    Record {
        id: id.to_string(),
        nickname: format!("{id}-nick"),
        classification: Some(classification),
        family: family.to_string(),
        genus: "Genus".to_string(),
        species: "species".to_string(),
        diet_type: Some(diet),
        age: 4,
        weight: 12.5,
        notes: Some(String::new()),
    }
}

#[test]
fn records_survive_reopen_in_id_order() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("pets.db");

    let mut store = SqliteStore::open(&db_path).expect("open sqlite");
    store
        .insert(pet("P003", Classification::Bird, "Psittacidae", DietType::Frugivore))
        .expect("insert3");
    store
        .insert(pet("P001", Classification::Mammal, "Canidae", DietType::Carnivore))
        .expect("insert1");
    store
        .insert(pet("P002", Classification::Reptile, "Iguanidae", DietType::Herbivore))
        .expect("insert2");
    let before = store.list_all().expect("list");
    drop(store);

    let reopened = SqliteStore::open(&db_path).expect("reopen");
    let after = reopened.list_all().expect("list");
    assert_eq!(before, after);
    let ids: Vec<_> = after.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["P001", "P002", "P003"]);
}

#[test]
fn crud_round_trip() {
    let mut store = SqliteStore::open_in_memory().expect("open");
    let mut rex = pet("P001", Classification::Mammal, "Canidae", DietType::Carnivore);
    rex.notes = Some("friendly, loud".to_string());
    store.insert(rex.clone()).expect("insert");

    assert!(store.exists("P001").expect("exists"));
    assert!(!store.exists("P404").expect("exists"));
    assert_eq!(store.get("P001").expect("get"), Some(rex.clone()));

    rex.weight = 31.75;
    rex.age = 6;
    store.update(rex.clone()).expect("update");
    assert_eq!(store.get("P001").expect("get"), Some(rex));

    store.delete("P001").expect("delete");
    assert_eq!(store.get("P001").expect("get"), None);
    assert!(store.is_empty().expect("is_empty"));
}

#[test]
fn duplicate_insert_and_missing_targets_are_errors() {
    let mut store = SqliteStore::open_in_memory().expect("open");
    let rex = pet("P001", Classification::Mammal, "Canidae", DietType::Carnivore);
    store.insert(rex.clone()).expect("insert");

    assert!(matches!(store.insert(rex), Err(StoreError::AlreadyExists(id)) if id == "P001"));

    let ghost = pet("P404", Classification::Fish, "Cichlidae", DietType::Omnivore);
    assert!(matches!(store.update(ghost), Err(StoreError::Missing(id)) if id == "P404"));
    assert!(matches!(store.delete("P404"), Err(StoreError::Missing(id)) if id == "P404"));
    assert_eq!(store.len().expect("len"), 1);
}

#[test]
fn partial_records_are_refused() {
    let mut store = SqliteStore::open_in_memory().expect("open");
    let partial = Record {
        id: "P002".to_string(),
        nickname: "Spike".to_string(),
        ..Record::default()
    };
    assert!(matches!(store.insert(partial), Err(StoreError::Incomplete(_))));
    assert!(store.is_empty().expect("is_empty"));
}

#[test]
fn find_uses_first_set_criterion() {
    let mut store = SqliteStore::open_in_memory().expect("open");
    for rec in [
        pet("A1", Classification::Mammal, "Felidae", DietType::Carnivore),
        pet("A2", Classification::Mammal, "Canidae", DietType::Omnivore),
        pet("B1", Classification::Bird, "Psittacidae", DietType::Frugivore),
        pet("F1", Classification::Fish, "Cichlidae", DietType::Omnivore),
    ] {
        store.insert(rec).expect("insert");
    }

    let ids = |filter: RecordFilter| -> Vec<String> {
        store
            .find(&filter)
            .expect("find")
            .into_iter()
            .map(|r| r.id)
            .collect()
    };

    assert_eq!(
        ids(RecordFilter {
            classification: Some(Classification::Mammal),
            ..RecordFilter::default()
        }),
        ["A1", "A2"]
    );
    assert_eq!(
        ids(RecordFilter {
            diet_type: Some(DietType::Omnivore),
            ..RecordFilter::default()
        }),
        ["A2", "F1"]
    );
    assert_eq!(
        ids(RecordFilter {
            family: Some("Canidae".to_string()),
            diet_type: Some(DietType::Frugivore),
            ..RecordFilter::default()
        }),
        ["A2"]
    );
    assert_eq!(
        ids(RecordFilter {
            id: Some("B1".to_string()),
            classification: Some(Classification::Mammal),
            ..RecordFilter::default()
        }),
        ["B1"]
    );
    assert_eq!(ids(RecordFilter::default()).len(), 4);
}
