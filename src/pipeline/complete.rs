//! Completion of partial records.
//!
//! A completer blocks the pipeline until it returns a finished record or
//! gives up on it. Returning a record whose id was cleared also counts as
//! giving up.

use std::io::{BufRead, Write};

use hashbrown::HashMap;

use crate::{
    record::{Record, RecordField, RecordPatch},
    types::{Classification, DietType, RecordId},
    validate::missing_fields,
};

/// Answer from a [`RecordCompleter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The record after completion. It may still be partial.
    Completed(Record),
    /// Drop the record; it must not be reconciled.
    Abandoned,
}

impl Completion {
    /// Maps a returned record onto a completion, treating an empty id as
    /// abandonment.
    pub fn from_record(rec: Record) -> Self {
        if rec.id.is_empty() {
            Self::Abandoned
        } else {
            Self::Completed(rec)
        }
    }
}

/// Synchronous collaborator that fills in partial records.
pub trait RecordCompleter {
    /// Completes `partial` or abandons it.
    fn complete(&mut self, partial: Record) -> Completion;
}

impl<C: RecordCompleter + ?Sized> RecordCompleter for &mut C {
    fn complete(&mut self, partial: Record) -> Completion {
        (**self).complete(partial)
    }
}

/// Abandons every partial record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl RecordCompleter for DeclineAll {
    fn complete(&mut self, _partial: Record) -> Completion {
        Completion::Abandoned
    }
}

/// Applies a prepared patch per record id; ids without a patch are abandoned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCompleter {
    patches: HashMap<RecordId, RecordPatch>,
    calls: usize,
}

impl ScriptedCompleter {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the patch applied to the partial record with `id`.
    pub fn with_patch(mut self, id: impl Into<RecordId>, patch: RecordPatch) -> Self {
        self.patches.insert(id.into(), patch);
        self
    }

    /// Number of records offered so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl RecordCompleter for ScriptedCompleter {
    fn complete(&mut self, mut partial: Record) -> Completion {
        self.calls += 1;
        let Some(patch) = self.patches.get(&partial.id) else {
            return Completion::Abandoned;
        };
        patch.apply_to(&mut partial);
        Completion::from_record(partial)
    }
}

/// Line-oriented dialog asking for each missing field.
///
/// An empty answer keeps the current value, except for the id where an empty
/// answer abandons the record and for notes where it records a blank note.
/// End of input also abandons.
pub struct PromptCompleter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptCompleter<R, W> {
    /// Dialog reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{question}: ").ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn fill(&mut self, rec: &mut Record, field: RecordField) -> Option<()> {
        let question = match field {
            RecordField::Classification => format!(
                "{field} ({})",
                Classification::ALL.map(Classification::as_str).join("/")
            ),
            RecordField::DietType => {
                format!("{field} ({})", DietType::ALL.map(DietType::as_str).join("/"))
            }
            _ => field.name().to_string(),
        };

        loop {
            let answer = self.ask(&question)?;
            let accepted = match field {
                RecordField::Id => {
                    rec.id = answer;
                    true
                }
                RecordField::Nickname => set_text(&mut rec.nickname, answer),
                RecordField::Family => set_text(&mut rec.family, answer),
                RecordField::Genus => set_text(&mut rec.genus, answer),
                RecordField::Species => set_text(&mut rec.species, answer),
                RecordField::Notes => {
                    rec.notes = Some(answer);
                    true
                }
                RecordField::Classification => match Classification::from_token(&answer) {
                    Some(c) => {
                        rec.classification = Some(c);
                        true
                    }
                    None => answer.is_empty(),
                },
                RecordField::DietType => match DietType::from_token(&answer) {
                    Some(d) => {
                        rec.diet_type = Some(d);
                        true
                    }
                    None => answer.is_empty(),
                },
                RecordField::Age => match answer.parse::<i32>() {
                    Ok(v) if v > 0 => {
                        rec.age = v;
                        true
                    }
                    _ => answer.is_empty(),
                },
                RecordField::Weight => match answer.parse::<f64>() {
                    Ok(v) if v.is_finite() && v > 0.0 => {
                        rec.weight = v;
                        true
                    }
                    _ => answer.is_empty(),
                },
            };
            if accepted {
                return Some(());
            }
            writeln!(self.output, "invalid {field}, try again").ok()?;
        }
    }
}

fn set_text(slot: &mut String, answer: String) -> bool {
    if !answer.is_empty() {
        *slot = answer;
    }
    true
}

impl<R: BufRead, W: Write> RecordCompleter for PromptCompleter<R, W> {
    fn complete(&mut self, mut partial: Record) -> Completion {
        let label = if partial.id.is_empty() {
            "<no id>".to_string()
        } else {
            partial.id.clone()
        };
        if writeln!(self.output, "record {label} is incomplete").is_err() {
            return Completion::Abandoned;
        }

        for field in missing_fields(&partial) {
            if self.fill(&mut partial, field).is_none() {
                return Completion::Abandoned;
            }
            if field == RecordField::Id && partial.id.is_empty() {
                return Completion::Abandoned;
            }
        }
        Completion::from_record(partial)
    }
}
