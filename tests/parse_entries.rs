use proptest::prelude::*;

use petlog::{
    parse::{LineOutcome, RecordParser, SkipReason, parse_value},
    record::{Record, RecordField},
    types::{Classification, DietType},
    validate::{is_complete, missing_fields},
};

fn entry(outcome: Option<LineOutcome>) -> Record {
    match outcome {
        Some(LineOutcome::Entry(entry)) => entry.record,
        other => panic!("expected entry, got {other:?}"),
    }
}

#[test]
fn full_line_parses_to_complete_record() {
    let parser = RecordParser::default();
    let rec = entry(parser.parse_line(
        1,
        "mascota.1=P001,Rex,Mammal,Canidae,Canis,lupus,Carnivore,5,30.2,friendly",
    ));

    assert_eq!(
        rec,
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
            notes: Some("friendly".to_string()),
        }
    );
    assert!(is_complete(&rec));
}

#[test]
fn two_tokens_parse_to_partial_record() {
    let parser = RecordParser::default();
    let rec = entry(parser.parse_line(2, "mascota.2=P002,Spike"));

    assert_eq!(rec.id, "P002");
    assert_eq!(rec.nickname, "Spike");
    assert_eq!(rec.classification, None);
    assert_eq!(rec.diet_type, None);
    assert!(rec.family.is_empty() && rec.genus.is_empty() && rec.species.is_empty());
    assert_eq!(rec.age, 0);
    assert_eq!(rec.weight, 0.0);
    assert_eq!(rec.notes, None);
    assert!(!is_complete(&rec));
}

#[test]
fn whitespace_around_key_and_tokens_is_trimmed() {
    let parser = RecordParser::default();
    let rec = entry(parser.parse_line(
        3,
        "  mascota.7 =  K1 , Kiki ,  BIRD , Psittacidae , Ara , macao , frugivore , 8 , 1.2 ,  ",
    ));
    assert_eq!(rec.id, "K1");
    assert_eq!(rec.classification, Some(Classification::Bird));
    assert_eq!(rec.diet_type, Some(DietType::Frugivore));
    assert_eq!(rec.weight, 1.2);
    assert_eq!(rec.notes.as_deref(), Some(""));
    assert!(is_complete(&rec));
}

#[test]
fn malformed_enums_and_numbers_are_left_unset() {
    let rec = parse_value("Q1,Quill,hedgehog,Erinaceidae,Atelerix,albiventris,bugs,two,-0.5,")
        .expect("record");
    assert_eq!(rec.classification, None);
    assert_eq!(rec.diet_type, None);
    assert_eq!(rec.age, 0);
    assert_eq!(rec.weight, 0.0);
    assert_eq!(rec.family, "Erinaceidae");
}

#[test]
fn nine_valid_tokens_are_partial_until_notes_arrive() {
    let rec = parse_value("P001,Rex,Mammal,Canidae,Canis,lupus,Carnivore,5,30.2").expect("record");
    assert_eq!(rec.notes, None);
    assert!(!is_complete(&rec));
    assert_eq!(missing_fields(&rec), vec![RecordField::Notes]);

    let rec = parse_value("P001,Rex,Mammal,Canidae,Canis,lupus,Carnivore,5,30.2,").expect("record");
    assert_eq!(rec.notes.as_deref(), Some(""));
    assert!(is_complete(&rec));
}

#[test]
fn foreign_keys_are_ignored_and_junk_is_skipped() {
    let parser = RecordParser::default();
    let source = "\
# pets
app.title=Clinic
mascota.1=P001,Rex
this line has no separator
mascota.2=  , ,
";
    let outcomes = parser.parse_source(source);
    assert_eq!(outcomes.len(), 4);

    assert_eq!(
        outcomes[0],
        LineOutcome::Ignored {
            line: 2,
            key: "app.title".to_string()
        }
    );
    assert!(matches!(&outcomes[1], LineOutcome::Entry(e) if e.line == 3 && e.key == "mascota.1"));
    assert_eq!(
        outcomes[2],
        LineOutcome::Skipped {
            line: 4,
            reason: SkipReason::MissingSeparator
        }
    );
    assert_eq!(
        outcomes[3],
        LineOutcome::Skipped {
            line: 5,
            reason: SkipReason::EmptyValue
        }
    );
}

#[test]
fn custom_prefix_changes_what_is_accepted() {
    let parser = RecordParser::new("pet.");
    assert!(matches!(parser.parse_line(1, "pet.1=A,B"), Some(LineOutcome::Entry(_))));
    assert!(matches!(parser.parse_line(2, "mascota.1=A,B"), Some(LineOutcome::Ignored { .. })));
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,8}"
}

fn cased(name: &'static str, style: u8) -> String {
    match style % 3 {
        0 => name.to_string(),
        1 => name.to_uppercase(),
        _ => {
            let mut chars = name.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
    }
}

proptest! {
    #[test]
    fn ten_tokens_map_field_by_field(
        words in prop::collection::vec(word(), 6),
        class_idx in 0usize..6,
        diet_idx in 0usize..6,
        class_style in any::<u8>(),
        diet_style in any::<u8>(),
        age in 1i32..10_000,
        weight in 0.01f64..5_000.0,
        notes in "[a-z ]{0,20}",
    ) {
        let class = Classification::ALL[class_idx];
        let diet = DietType::ALL[diet_idx];
        let value = format!(
            "{}, {} ,{},{},{},{},{},{},{},{}",
            words[0], words[1], cased(class.as_str(), class_style), words[2], words[3], words[4],
            cased(diet.as_str(), diet_style), age, weight, notes,
        );

        let rec = parse_value(&value).expect("record");
        prop_assert_eq!(&rec.id, &words[0]);
        prop_assert_eq!(&rec.nickname, &words[1]);
        prop_assert_eq!(rec.classification, Some(class));
        prop_assert_eq!(&rec.family, &words[2]);
        prop_assert_eq!(&rec.genus, &words[3]);
        prop_assert_eq!(&rec.species, &words[4]);
        prop_assert_eq!(rec.diet_type, Some(diet));
        prop_assert_eq!(rec.age, age);
        prop_assert_eq!(rec.weight, weight);
        prop_assert_eq!(rec.notes.as_deref(), Some(notes.trim()));
        prop_assert!(is_complete(&rec));
    }

    #[test]
    fn fewer_than_ten_tokens_is_partial(
        keep in 1usize..10,
        class_idx in 0usize..6,
        diet_idx in 0usize..6,
        age in 1i32..10_000,
        weight in 0.01f64..5_000.0,
        words in prop::collection::vec(word(), 5),
    ) {
        let full = [
            words[0].clone(),
            words[1].clone(),
            Classification::ALL[class_idx].as_str().to_string(),
            words[2].clone(),
            words[3].clone(),
            words[4].clone(),
            DietType::ALL[diet_idx].as_str().to_string(),
            age.to_string(),
            weight.to_string(),
        ];
        let value = full[..keep].join(",");
        let rec = parse_value(&value).expect("record");
        prop_assert!(!is_complete(&rec));
        prop_assert!(!missing_fields(&rec).is_empty());
        prop_assert_eq!(&rec.id, &words[0]);
    }
}
