use crate::domain::loan::LoanInputs;
use crate::error::{LoanError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Batch input: one `salary, rate, tenor` scenario per line after a header.
///
/// Padding around values is ignored. A row with a missing column or an
/// unparsable value is not fatal to the file; it comes back as its own
/// `CsvError`.
pub struct ScenarioReader<R: Read> {
    rows: csv::Reader<R>,
}

impl ScenarioReader<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> ScenarioReader<R> {
    pub fn new(source: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { rows }
    }

    pub fn scenarios(self) -> impl Iterator<Item = Result<LoanInputs>> {
        self.rows
            .into_deserialize::<LoanInputs>()
            .map(|row| row.map_err(LoanError::from))
    }
}
