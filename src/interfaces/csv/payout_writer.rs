use crate::application::engine::thresholds_in;
use crate::domain::payout::PayoutRecord;
use crate::error::Result;
use std::io::Write;

const LEADING_COLUMNS: [&str; 7] = ["de_id", "de_name", "week", "city", "zone", "shift", "orders"];

/// Orders records by total payout, highest first. Ties keep their order.
pub fn sort_by_total_payout(records: &mut [PayoutRecord]) {
    records.sort_by(|a, b| b.total_payout.cmp(&a.total_payout));
}

/// Writes payout records as CSV.
///
/// Columns are the DE's identity fields, one payout column per distinct
/// threshold in order of first appearance, then the total. A record whose
/// milestone set lacks a threshold leaves that cell blank.
pub struct PayoutWriter<W: Write> {
    writer: csv::Writer<W>,
    eligibility: bool,
}

impl<W: Write> PayoutWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            eligibility: false,
        }
    }

    /// Adds a `milestone_<n>_eligible` column after each payout column.
    pub fn with_eligibility(mut self, eligibility: bool) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn write_payouts(&mut self, mut records: Vec<PayoutRecord>) -> Result<()> {
        sort_by_total_payout(&mut records);
        let thresholds = thresholds_in(&records);

        let mut header: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
        for threshold in &thresholds {
            header.push(format!("milestone_{threshold}_payout"));
            if self.eligibility {
                header.push(format!("milestone_{threshold}_eligible"));
            }
        }
        header.push("total_payout".to_string());
        self.writer.write_record(&header)?;

        for record in &records {
            let de = &record.entity;
            let mut row: Vec<String> = [
                &de.identity,
                &de.name,
                &de.week,
                &de.city,
                &de.zone,
                &de.shift,
            ]
            .into_iter()
            .map(|v| v.clone().unwrap_or_default())
            .collect();
            row.push(de.orders.to_string());

            for threshold in &thresholds {
                let outcome = record.outcome(*threshold);
                row.push(outcome.map(|o| o.payout.to_string()).unwrap_or_default());
                if self.eligibility {
                    row.push(outcome.map(|o| o.eligible.to_string()).unwrap_or_default());
                }
            }
            row.push(record.total_payout.to_string());
            self.writer.write_record(&row)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
