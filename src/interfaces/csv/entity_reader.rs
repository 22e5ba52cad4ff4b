use super::schema::{HeaderIndex, cell, parse_count};
use crate::domain::entity::EntityRecord;
use crate::error::Result;
use csv::StringRecord;
use std::io::Read;

/// Column positions of the seed/onboarding table.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    orders: usize,
    identity: Option<usize>,
    name: Option<usize>,
    week: Option<usize>,
    city: Option<usize>,
    zone: Option<usize>,
    shift: Option<usize>,
    onboarding_date: Option<usize>,
}

impl EntitySchema {
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let index = HeaderIndex::new(headers);
        Ok(Self {
            orders: index.require("orders", &["TOTAL ORDERS", "ORDERS", "ORDER COUNT"])?,
            identity: index.find(&["DE ID", "IDENTITY", "ID"]),
            name: index.find(&["DE NAME", "NAME"]),
            week: index.find(&["WEEK"]),
            city: index.find(&["CITY"]),
            zone: index.find(&["ZONE NAME", "ZONE"]),
            shift: index.find(&["SHIFT NAME", "SHIFT"]),
            onboarding_date: index.find(&["ONBOARDING DATE", "OB DATE"]),
        })
    }

    /// Maps one row; `row` is its line number in the source file.
    pub fn record(&self, record: &StringRecord, row: u64) -> Result<EntityRecord> {
        Ok(EntityRecord {
            orders: parse_count("orders", record.get(self.orders), row)?,
            identity: cell(record, self.identity),
            name: cell(record, self.name),
            week: cell(record, self.week),
            city: cell(record, self.city),
            zone: cell(record, self.zone),
            shift: cell(record, self.shift),
            onboarding_date: cell(record, self.onboarding_date),
        })
    }
}

/// Reads delivery executive rows from a seed/onboarding CSV source.
///
/// Header names are matched case- and whitespace-insensitively. Rows are
/// yielded lazily; a row with a missing or non-numeric order count yields
/// `SurgeError::MalformedRecord` and the caller decides whether to go on.
pub struct EntityReader<R: Read> {
    reader: csv::Reader<R>,
    schema: EntitySchema,
}

impl<R: Read> EntityReader<R> {
    /// Creates a new `EntityReader` and resolves the column layout from the
    /// header row.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        let schema = EntitySchema::resolve(reader.headers()?)?;
        Ok(Self { reader, schema })
    }

    pub fn records(self) -> impl Iterator<Item = Result<EntityRecord>> {
        let schema = self.schema;
        self.reader.into_records().map(move |result| {
            let record = result?;
            let row = record.position().map_or(0, |p| p.line());
            schema.record(&record, row)
        })
    }
}
