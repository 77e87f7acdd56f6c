// Primitives for reading delimited text files.

use csv::ByteRecord;

use crate::merge::*;

/// Opens a delimited file and reads its header. Data rows are read lazily.
///
/// Tab-separated files are read without any quoting: Msatallele does not quote
/// its cells. A data row that is not valid UTF-8 comes out as an
/// `InvalidEncoding` error for that row only.
pub fn read_delimited(path: &str, delimiter: u8) -> BMergeResult<RowSource> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .quoting(delimiter != b'\t')
        .from_path(path)
        .context(OpeningInputSnafu { path })?;
    let mut records = rdr.into_byte_records();

    let header_record = match records.next() {
        Some(r) => r.context(ReadingRowSnafu { path })?,
        None => {
            return Err(Box::new(MergeError::MissingHeader {
                path: path.to_string(),
            }))
        }
    };
    let header: Vec<String> = decode_cells(&header_record)
        .context(InvalidEncodingSnafu {
            lineno: 1u64,
            label: lossy_label(&header_record),
        })?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_delimited: {}: header: {:?}", path, header);

    let p = path.to_string();
    let rows = records
        .enumerate()
        .map(move |(idx, line_r)| -> BMergeResult<ParsedRow> {
            let line = line_r.context(ReadingRowSnafu { path: p.clone() })?;
            // The header is line 1.
            let lineno = line
                .position()
                .map(|pos| pos.line())
                .unwrap_or((idx + 2) as u64);
            parsed_row(lineno, &line)
        });
    Ok(RowSource {
        header,
        rows: Box::new(rows),
    })
}

fn decode_cells(line: &ByteRecord) -> Option<Vec<String>> {
    line.iter()
        .map(|c| std::str::from_utf8(c).ok().map(|s| s.to_string()))
        .collect()
}

fn lossy_label(line: &ByteRecord) -> String {
    line.get(0)
        .map(|c| String::from_utf8_lossy(c).trim().to_string())
        .unwrap_or_default()
}

fn parsed_row(lineno: u64, line: &ByteRecord) -> BMergeResult<ParsedRow> {
    let mut cells = decode_cells(line).context(InvalidEncodingSnafu {
        lineno,
        label: lossy_label(line),
    })?;
    let label = if cells.is_empty() {
        "".to_string()
    } else {
        cells.remove(0).trim().to_string()
    };
    Ok(ParsedRow {
        lineno,
        label,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_bytes(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f
    }

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        write_tmp_bytes(content.as_bytes())
    }

    #[test]
    fn reads_tab_separated_rows() {
        let f = write_tmp("Sample\tM1\tM2\r\nA_1\t123456\t\r\n\r\n\"B_2\"\t\t654321\n");
        let src = read_delimited(f.path().to_str().unwrap(), b'\t').unwrap();
        assert_eq!(src.header, vec!["Sample", "M1", "M2"]);
        let rows: Vec<ParsedRow> = src.rows.map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "A_1");
        assert_eq!(rows[0].cells, vec!["123456", ""]);
        assert_eq!(rows[0].lineno, 2);
        // No quoting in tab-separated input.
        assert_eq!(rows[1].label, "\"B_2\"");
        assert_eq!(rows[1].lineno, 4);
    }

    #[test]
    fn rows_with_invalid_bytes_are_rejected_alone() {
        let f = write_tmp_bytes(
            b"Sample\tM1\nWexford_12\t123456\nWexford_13\t12\xff456\nWexford_14\t111222\n",
        );
        let src = read_delimited(f.path().to_str().unwrap(), b'\t').unwrap();
        let rows: Vec<BMergeResult<ParsedRow>> = src.rows.collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].as_ref().unwrap().label, "Wexford_12");
        match rows[1].as_ref().map_err(|e| &**e) {
            Err(MergeError::InvalidEncoding { lineno, label }) => {
                assert_eq!(*lineno, 3);
                assert_eq!(label, "Wexford_13");
            }
            _ => panic!("expected an encoding error on line 3"),
        }
        assert_eq!(rows[2].as_ref().unwrap().cells, vec!["111222"]);
    }

    #[test]
    fn invalid_header_bytes_are_fatal() {
        let f = write_tmp_bytes(b"Sample\tM\xff1\nWexford_12\t123456\n");
        let res = read_delimited(f.path().to_str().unwrap(), b'\t');
        assert!(matches!(
            res.map(|s| s.header).map_err(|e| *e),
            Err(MergeError::InvalidEncoding { lineno: 1, .. })
        ));
    }

    #[test]
    fn reads_comma_separated_rows() {
        let f = write_tmp("Sample,M1\n\"A,1\",123456\nB_2\n");
        let src = read_delimited(f.path().to_str().unwrap(), b',').unwrap();
        let rows: Vec<ParsedRow> = src.rows.map(|r| r.unwrap()).collect();
        assert_eq!(rows[0].label, "A,1");
        assert_eq!(rows[1].cells.len(), 0);
    }

    #[test]
    fn empty_file_has_no_header() {
        let f = write_tmp("");
        let res = read_delimited(f.path().to_str().unwrap(), b'\t');
        assert!(matches!(
            res.map(|s| s.header).map_err(|e| *e),
            Err(MergeError::MissingHeader { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let res = read_delimited("/nonexistent/msatmerge/input.txt", b'\t');
        assert!(matches!(
            res.map(|s| s.header).map_err(|e| *e),
            Err(MergeError::OpeningInput { .. })
        ));
    }
}
