//! Minimal delimited-record reading and writing over `csv-core`.

use std::io::Write;

use csv_core::{ReadFieldResult, ReaderBuilder, Terminator, WriteResult, WriterBuilder};

use super::CorpusError;

/// Parses every record in `input`. Quoted fields may span lines.
pub fn read_records(mut input: &[u8], delimiter: u8) -> Result<Vec<Vec<String>>, CorpusError> {
    let mut rdr = ReaderBuilder::new().delimiter(delimiter).build();
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = Vec::new();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(input, &mut output);
        input = &input[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let text = String::from_utf8(std::mem::take(&mut field))
                    .map_err(|_| CorpusError::Encoding(records.len() + 1))?;
                record.push(text);
                if record_end {
                    records.push(std::mem::take(&mut record));
                }
            }
            ReadFieldResult::End => break,
        }
    }
    Ok(records)
}

/// Writes one record, quoting fields only where needed, terminated by `\n`.
/// Empty cells are written as nothing between delimiters.
pub fn write_record<W, S>(mut wtr: W, fields: &[S], delimiter: u8) -> std::io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    if fields.is_empty() {
        return wtr.write_all(b"\n");
    }
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .build();
    let mut output = [0; 4096];
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            let (_, nout) = writer.delimiter(&mut output);
            wtr.write_all(&output[..nout])?;
        }
        let mut data = field.as_ref().as_bytes();
        loop {
            let (result, nin, nout) = writer.field(data, &mut output);
            wtr.write_all(&output[..nout])?;
            data = &data[nin..];
            if result == WriteResult::InputEmpty {
                break;
            }
        }
    }
    let (_, nout) = writer.terminator(&mut output);
    wtr.write_all(&output[..nout])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(fields: &[&str], delimiter: u8) -> String {
        let mut out = Vec::new();
        write_record(&mut out, fields, delimiter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reads_header_and_rows() {
        let records =
            read_records(b"id,sentence\n1,Hello world\n2,\"Hi, there\"\n", b',').unwrap();
        assert_eq!(
            records,
            vec![
                vec!["id", "sentence"],
                vec!["1", "Hello world"],
                vec!["2", "Hi, there"],
            ]
        );
    }

    #[test]
    fn quoted_field_spans_lines() {
        let records = read_records(b"1,\"two\nlines\"\n", b',').unwrap();
        assert_eq!(records, vec![vec!["1", "two\nlines"]]);
    }

    #[test]
    fn final_record_without_newline() {
        let records = read_records(b"a\tb\nc\td", b'\t').unwrap();
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = read_records(b"ok\n\xFF\n", b',').unwrap_err();
        assert!(matches!(err, CorpusError::Encoding(2)));
    }

    #[test]
    fn writes_quotes_only_when_needed() {
        assert_eq!(write_to_string(&["a", "b c"], b','), "a,b c\n");
        assert_eq!(
            write_to_string(&["a, b", "say \"hi\""], b','),
            "\"a, b\",\"say \"\"hi\"\"\"\n"
        );
        assert_eq!(write_to_string(&["x", ""], b','), "x,\n");
    }

    #[test]
    fn empty_cells_stay_unquoted() {
        assert_eq!(write_to_string(&["", "x"], b','), ",x\n");
        assert_eq!(write_to_string(&["id", "", ""], b','), "id,,\n");
        assert_eq!(write_to_string(&["", ""], b'\t'), "\t\n");
    }

    #[test]
    fn quoted_field_followed_by_more_fields() {
        assert_eq!(write_to_string(&["a,b", "c", ""], b','), "\"a,b\",c,\n");
    }

    #[test]
    fn tab_delimiter_quotes_tabs() {
        assert_eq!(write_to_string(&["a,b", "c\td"], b'\t'), "a,b\t\"c\td\"\n");
    }

    #[test]
    fn empty_record_is_blank_line() {
        assert_eq!(write_to_string(&[], b','), "\n");
    }
}
