use kdam::tqdm;
use serde::Serialize;
use std::path::Path;

use super::create_dirs;
use crate::collection::CollectionError;

/// writes rows to a CSV file with a header taken from the row type's field
/// names. the parent directory is created when missing and an existing file
/// is overwritten. returns the number of rows written.
pub fn write_csv<T>(rows: &[T], path: &Path) -> Result<usize, CollectionError>
where
    T: Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dirs(parent)?;
    }
    let path_str = path.display().to_string();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| CollectionError::CsvWriteError {
            path: path_str.clone(),
            source,
        })?;

    let row_iter = tqdm!(rows.iter(), total = rows.len(), desc = "write csv rows");
    for row in row_iter {
        writer
            .serialize(row)
            .map_err(|source| CollectionError::CsvWriteError {
                path: path_str.clone(),
                source,
            })?;
    }
    eprintln!();

    writer.flush().map_err(|source| CollectionError::FileWriteError {
        path: path_str.clone(),
        source,
    })?;
    log::info!("wrote {} rows to {path_str}", rows.len());
    Ok(rows.len())
}

#[cfg(test)]
mod test {
    use super::write_csv;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        station: String,
        delay_in_min: f64,
        temperature_2m: Option<f64>,
        is_weekend: bool,
    }

    #[test]
    fn test_write_creates_parent_dir() {
        let dir = tempfile::tempdir().expect("should not fail");
        let path = dir.path().join("output").join("nested").join("rows.csv");
        let rows = vec![
            Row {
                station: String::from("München Hbf"),
                delay_in_min: 3.0,
                temperature_2m: Some(-2.5),
                is_weekend: false,
            },
            Row {
                station: String::from("München Hbf"),
                delay_in_min: -1.0,
                temperature_2m: None,
                is_weekend: true,
            },
        ];
        let n = write_csv(&rows, &path).expect("should not fail");
        assert_eq!(n, 2);

        let written = std::fs::read_to_string(&path).expect("should not fail");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "station,delay_in_min,temperature_2m,is_weekend",
                "München Hbf,3.0,-2.5,false",
                "München Hbf,-1.0,,true",
            ]
        );
    }

    #[test]
    fn test_write_empty_overwrites() {
        let dir = tempfile::tempdir().expect("should not fail");
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "stale contents\n").expect("should not fail");
        let rows: Vec<Row> = vec![];
        let n = write_csv(&rows, &path).expect("should not fail");
        assert_eq!(n, 0);
        let written = std::fs::read_to_string(&path).expect("should not fail");
        assert!(written.is_empty());
    }
}
