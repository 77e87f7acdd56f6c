// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::merge::{io_common::pad_numeric, *};

pub fn read_xlsx(
    path: &str,
    worksheet_name: Option<&str>,
    format: &CodeFormat,
) -> BMergeResult<RowSource> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header_cells = iter.next().context(MissingHeaderSnafu { path })?;
    let header: Vec<String> = header_cells
        .iter()
        .map(|c| read_text_cell(c, 1, ""))
        .collect::<BMergeResult<_>>()?;
    debug!("read_xlsx: {}: header: {:?}", path, header);

    let mut rows: Vec<BMergeResult<ParsedRow>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is row 1.
        let lineno = (idx + 2) as u64;
        rows.push(read_row(row, lineno, format));
    }
    debug!("read_xlsx: {}: {} rows", path, rows.len());
    Ok(RowSource {
        header,
        rows: Box::new(rows.into_iter()),
    })
}

fn read_row(row: &[DataType], lineno: u64, format: &CodeFormat) -> BMergeResult<ParsedRow> {
    let label = match row.first() {
        Some(c) => read_text_cell(c, lineno, "")?.trim().to_string(),
        None => "".to_string(),
    };
    let cells: Vec<String> = row
        .iter()
        .skip(1)
        .map(|c| read_genotype_cell(c, lineno, &label, format))
        .collect::<BMergeResult<_>>()?;
    Ok(ParsedRow {
        lineno,
        label,
        cells,
    })
}

// `label` is the label of the row, when already known.
fn read_text_cell(cell: &DataType, lineno: u64, label: &str) -> BMergeResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        _ => Err(Box::new(MergeError::ExcelWrongCellType {
            lineno,
            label: label.to_string(),
            content: format!("{:?}", cell),
        })),
    }
}

// Genotype codes typed as numbers lose their leading zeros in a spreadsheet.
fn read_genotype_cell(
    cell: &DataType,
    lineno: u64,
    label: &str,
    format: &CodeFormat,
) -> BMergeResult<String> {
    match cell {
        DataType::Int(_) | DataType::Float(_) => {
            let s = read_text_cell(cell, lineno, label)?;
            Ok(pad_numeric(&s, format.code_width))
        }
        _ => read_text_cell(cell, lineno, label),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> BMergeResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    let wrange = if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: name,
            })?
            .context(OpeningExcelSnafu { path })?
    } else {
        let names = workbook.sheet_names().to_owned();
        if names.len() > 1 {
            info!(
                "get_range: {} has {} worksheets, reading the first one ({:?})",
                path,
                names.len(),
                names.first()
            );
        }
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?
    };
    Ok(wrange)
}
