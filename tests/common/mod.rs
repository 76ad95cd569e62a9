use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes a scenarios CSV with the standard header followed by `rows`.
pub fn scenarios_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "salary, rate, tenor")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

/// `count` valid scenarios sweeping salary, rate and tenor.
pub fn sweep_rows(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("{}, {}, {}", i * 100, (i % 101) as f64 / 2.0, 3 + i % 34))
        .collect()
}
