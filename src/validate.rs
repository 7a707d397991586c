//! Completeness predicate over [`Record`].

use crate::record::{Record, RecordField};

/// Returns every required field of `rec` that is empty, unset, or not
/// strictly positive, in positional order. `notes` must be present but may be
/// blank.
pub fn missing_fields(rec: &Record) -> Vec<RecordField> {
    RecordField::ALL
        .into_iter()
        .filter(|field| !field_present(rec, *field))
        .collect()
}

/// True when every required field is present and `age`/`weight` are > 0.
pub fn is_complete(rec: &Record) -> bool {
    RecordField::ALL
        .into_iter()
        .all(|field| field_present(rec, field))
}

fn field_present(rec: &Record, field: RecordField) -> bool {
    match field {
        RecordField::Id => !rec.id.is_empty(),
        RecordField::Nickname => !rec.nickname.is_empty(),
        RecordField::Classification => rec.classification.is_some(),
        RecordField::Family => !rec.family.is_empty(),
        RecordField::Genus => !rec.genus.is_empty(),
        RecordField::Species => !rec.species.is_empty(),
        RecordField::DietType => rec.diet_type.is_some(),
        RecordField::Age => rec.age > 0,
        // NaN fails this comparison as well.
        RecordField::Weight => rec.weight > 0.0,
        RecordField::Notes => rec.notes.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classification, DietType};

    fn full() -> Record {
        Record {
            id: "P001".to_string(),
            nickname: "Rex".to_string(),
            classification: Some(Classification::Mammal),
            family: "Canidae".to_string(),
            genus: "Canis".to_string(),
            species: "lupus".to_string(),
            diet_type: Some(DietType::Carnivore),
            age: 5,
            weight: 30.2,
            notes: Some(String::new()),
        }
    }

    #[test]
    fn empty_notes_still_complete() {
        assert!(is_complete(&full()));
        assert!(missing_fields(&full()).is_empty());
    }

    #[test]
    fn absent_notes_are_incomplete() {
        let mut rec = full();
        rec.notes = None;
        assert!(!is_complete(&rec));
        assert_eq!(missing_fields(&rec), vec![RecordField::Notes]);
    }

    #[test]
    fn zero_numbers_are_incomplete() {
        let mut rec = full();
        rec.age = 0;
        rec.weight = 0.0;
        assert!(!is_complete(&rec));
        assert_eq!(missing_fields(&rec), vec![RecordField::Age, RecordField::Weight]);
    }

    #[test]
    fn nan_weight_is_incomplete() {
        let mut rec = full();
        rec.weight = f64::NAN;
        assert!(!is_complete(&rec));
    }
}
