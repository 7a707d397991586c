//! Final-state snapshot file.
//!
//! Layout, all numbers big-endian, no header:
//!
//! ```text
//! i32 record_count
//! per record, in the order given (store order is id ascending):
//!   str id, str nickname, str classification, str family, str genus,
//!   str species, str diet_type, i32 age, f64 weight, str notes
//! str = i32 byte length + UTF-8 bytes; an unset value has length 0
//! (absent notes are written as blank and read back as blank)
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use tracing::info;

use crate::{
    persist::RecordStore,
    record::Record,
    types::{Classification, DietType},
};

use super::{CodecError, CodecResult};

/// Writes `records` in the given order.
pub fn write_snapshot<W: Write>(out: &mut W, records: &[Record]) -> CodecResult<()> {
    write_len(out, "record count", records.len())?;
    for rec in records {
        write_str(out, "id", &rec.id)?;
        write_str(out, "nickname", &rec.nickname)?;
        write_str(out, "classification", rec.classification.map_or("", Classification::as_str))?;
        write_str(out, "family", &rec.family)?;
        write_str(out, "genus", &rec.genus)?;
        write_str(out, "species", &rec.species)?;
        write_str(out, "diet type", rec.diet_type.map_or("", DietType::as_str))?;
        out.write_all(&rec.age.to_be_bytes())?;
        out.write_all(&rec.weight.to_be_bytes())?;
        write_str(out, "notes", rec.notes.as_deref().unwrap_or(""))?;
    }
    Ok(())
}

/// Snapshot bytes for `records`.
pub fn encode_snapshot(records: &[Record]) -> CodecResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_snapshot(&mut buf, records)?;
    Ok(buf)
}

/// Reads a whole snapshot and requires the input to end after the last record.
pub fn read_snapshot<R: Read>(input: &mut R) -> CodecResult<Vec<Record>> {
    let count = read_len(input, "record count")?;
    let mut records = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let id = read_str(input, "id")?;
        let nickname = read_str(input, "nickname")?;
        let classification = read_enum(input, "classification", Classification::from_token)?;
        let family = read_str(input, "family")?;
        let genus = read_str(input, "genus")?;
        let species = read_str(input, "species")?;
        let diet_type = read_enum(input, "diet type", DietType::from_token)?;
        let age = i32::from_be_bytes(read_array(input, "age")?);
        let weight = f64::from_be_bytes(read_array(input, "weight")?);
        let notes = Some(read_str(input, "notes")?);
        records.push(Record {
            id,
            nickname,
            classification,
            family,
            genus,
            species,
            diet_type,
            age,
            weight,
            notes,
        });
    }

    let mut rest = Vec::new();
    input.read_to_end(&mut rest)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }
    Ok(records)
}

/// Records decoded from snapshot bytes.
pub fn decode_snapshot(mut bytes: &[u8]) -> CodecResult<Vec<Record>> {
    read_snapshot(&mut bytes)
}

/// Writes `records` to `path`, creating or truncating it. On failure the file
/// is left as far as it got.
pub fn save_records(path: impl AsRef<Path>, records: &[Record]) -> CodecResult<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path.as_ref())?;
    let mut out = BufWriter::new(file);
    write_snapshot(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// Writes every record of `store`, id ascending, to `path`. Returns the
/// number of records written.
pub fn save_snapshot<S: RecordStore + ?Sized>(path: impl AsRef<Path>, store: &S) -> CodecResult<usize> {
    let path = path.as_ref();
    let records = store.list_all()?;
    save_records(path, &records)?;
    info!(path = %path.display(), records = records.len(), "snapshot written");
    Ok(records.len())
}

/// Reads a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> CodecResult<Vec<Record>> {
    let mut input = BufReader::new(File::open(path.as_ref())?);
    read_snapshot(&mut input)
}

fn write_len<W: Write>(out: &mut W, field: &'static str, len: usize) -> CodecResult<()> {
    let len = i32::try_from(len).map_err(|_| CodecError::TooLong { field, len })?;
    out.write_all(&len.to_be_bytes())?;
    Ok(())
}

fn write_str<W: Write>(out: &mut W, field: &'static str, value: &str) -> CodecResult<()> {
    write_len(out, field, value.len())?;
    out.write_all(value.as_bytes())?;
    Ok(())
}

fn read_array<R: Read, const N: usize>(input: &mut R, field: &'static str) -> CodecResult<[u8; N]> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf).map_err(|err| eof_as_truncated(err, field))?;
    Ok(buf)
}

fn read_len<R: Read>(input: &mut R, field: &'static str) -> CodecResult<usize> {
    let value = i32::from_be_bytes(read_array(input, field)?);
    usize::try_from(value).map_err(|_| CodecError::NegativeLength { field, value })
}

fn read_str<R: Read>(input: &mut R, field: &'static str) -> CodecResult<String> {
    let len = read_len(input, field)?;
    let mut bytes = Vec::with_capacity(len.min(4096));
    input.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(CodecError::Truncated { field });
    }
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { field })
}

fn read_enum<R: Read, T>(
    input: &mut R,
    field: &'static str,
    lookup: fn(&str) -> Option<T>,
) -> CodecResult<Option<T>> {
    let text = read_str(input, field)?;
    if text.is_empty() {
        return Ok(None);
    }
    lookup(&text)
        .map(Some)
        .ok_or(CodecError::UnknownVariant { field, value: text })
}

fn eof_as_truncated(err: io::Error, field: &'static str) -> CodecError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        CodecError::Truncated { field }
    } else {
        CodecError::Io(err)
    }
}
