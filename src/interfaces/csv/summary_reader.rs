use super::schema::{HeaderIndex, cell, parse_count, parse_decimal};
use crate::domain::recommendation::ZoneSummary;
use crate::error::{Result, SurgeError};
use csv::StringRecord;
use std::io::Read;

/// Column positions of the zone-weekly summary table.
#[derive(Debug, Clone)]
pub struct SummarySchema {
    city: usize,
    zone: usize,
    week: Option<usize>,
    total_orders: usize,
    de_count: usize,
    median_orders: Option<usize>,
    percent_des_over_10_orders: Option<usize>,
}

impl SummarySchema {
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let index = HeaderIndex::new(headers);
        Ok(Self {
            city: index.require("city", &["CITY"])?,
            zone: index.require("zone", &["ZONE NAME", "ZONE"])?,
            week: index.find(&["WEEK"]),
            total_orders: index.require("total orders", &["TOTAL ORDERS", "ORDERS"])?,
            de_count: index.require("DE count", &["DE COUNT", "DES", "ACTIVE DES"])?,
            median_orders: index.find(&["MEDIAN ORDERS"]),
            percent_des_over_10_orders: index.find(&[
                "% DES > 10 ORDERS",
                "PCT DES OVER 10 ORDERS",
                "PERCENT DES OVER 10 ORDERS",
            ]),
        })
    }

    pub fn record(&self, record: &StringRecord, row: u64) -> Result<ZoneSummary> {
        let required = |column: usize, field: &str| {
            cell(record, Some(column)).ok_or_else(|| SurgeError::MalformedRecord {
                row,
                reason: format!("{field} is empty"),
            })
        };
        let total_orders = parse_decimal("total orders", record.get(self.total_orders), row)?
            .ok_or_else(|| SurgeError::MalformedRecord {
                row,
                reason: "total orders is empty".to_string(),
            })?;

        Ok(ZoneSummary {
            city: required(self.city, "city")?,
            zone: required(self.zone, "zone")?,
            week: cell(record, self.week),
            total_orders,
            de_count: parse_count("DE count", record.get(self.de_count), row)?,
            median_orders: parse_decimal(
                "median orders",
                self.median_orders.and_then(|i| record.get(i)),
                row,
            )?,
            percent_des_over_10_orders: parse_decimal(
                "% DEs > 10 orders",
                self.percent_des_over_10_orders.and_then(|i| record.get(i)),
                row,
            )?,
        })
    }
}

/// Reads zone-weekly summary rows from a CSV source.
pub struct SummaryReader<R: Read> {
    reader: csv::Reader<R>,
    schema: SummarySchema,
}

impl<R: Read> SummaryReader<R> {
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        let schema = SummarySchema::resolve(reader.headers()?)?;
        Ok(Self { reader, schema })
    }

    pub fn summaries(self) -> impl Iterator<Item = Result<ZoneSummary>> {
        let schema = self.schema;
        self.reader.into_records().map(move |result| {
            let record = result?;
            let row = record.position().map_or(0, |p| p.line());
            schema.record(&record, row)
        })
    }
}
