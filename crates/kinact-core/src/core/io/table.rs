use super::{
    LoadError, open_delimited, parse_optional_f64, path_string, read_headers, record_line,
};
use crate::core::models::table::SiteTable;
use std::io::Write;
use std::path::Path;

/// Picks a delimiter from the file extension: tab for `.tsv`/`.tab`/`.txt`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") | Some("txt") => b'\t',
        _ => b',',
    }
}

/// Reads a wide site × condition table.
///
/// The first column holds site identifiers, every further column one condition.
pub fn read_site_table(path: &Path) -> Result<SiteTable, LoadError> {
    let mut reader = open_delimited(path, delimiter_for(path))?;
    let headers = read_headers(&mut reader, path)?;
    if headers.len() < 2 {
        return Err(LoadError::InvalidRequest(format!(
            "'{}' needs a site column and at least one condition column",
            path_string(path)
        )));
    }

    let conditions: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    let mut table = SiteTable::new(conditions.clone());

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })?;
        let line = record_line(&record);
        let site = record.get(0).unwrap_or_default().trim().to_string();

        let values = record
            .iter()
            .skip(1)
            .zip(&conditions)
            .map(|(raw, column)| parse_optional_f64(raw, path, line, column))
            .collect::<Result<Vec<_>, _>>()?;

        table
            .insert_row(site, values)
            .map_err(|e| LoadError::Table {
                path: path_string(path),
                source: e,
            })?;
    }
    Ok(table)
}

/// Writes a table in the layout [`read_site_table`] reads, missing cells left empty.
pub fn write_site_table(table: &SiteTable, writer: impl Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["site".to_string()];
    header.extend(table.conditions().iter().cloned());
    writer.write_record(&header)?;

    for (site, values) in table.rows() {
        let mut record = vec![site.to_string()];
        record.extend(
            values
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_wide_table_with_missing_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fc.csv");
        fs::write(&path, "site,5min,10min\nA_S1,0.5,NaN\nB_T2,,1.5\n").unwrap();

        let table = read_site_table(&path).unwrap();
        assert_eq!(table.conditions(), &["5min".to_string(), "10min".to_string()]);
        assert_eq!(table.value("A_S1", "5min").unwrap(), Some(0.5));
        assert_eq!(table.value("A_S1", "10min").unwrap(), None);
        assert_eq!(table.value("B_T2", "5min").unwrap(), None);
    }

    #[test]
    fn tab_separated_files_are_detected_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fc.tsv");
        fs::write(&path, "site\tc1\nA_S1\t-1.25\n").unwrap();

        let table = read_site_table(&path).unwrap();
        assert_eq!(table.value("A_S1", "c1").unwrap(), Some(-1.25));
    }

    #[test]
    fn non_numeric_cell_is_reported_with_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "site,c1\nA_S1,high\n").unwrap();

        let err = read_site_table(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { line: 2, ref column, .. } if column == "c1"
        ));
    }

    #[test]
    fn written_table_can_be_read_back() {
        let mut table = SiteTable::new(vec!["c1".into()]);
        table.insert_row("A_S1", vec![Some(2.0)]).unwrap();
        table.insert_row("B_T2", vec![None]).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_site_table(&table, fs::File::create(&path).unwrap()).unwrap();

        assert_eq!(read_site_table(&path).unwrap(), table);
    }
}
