use super::{NominalColumn, NumericColumn};
use crate::{dataset::Dataset, feature::FeatureRecord};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// turns [`FeatureRecord`] rows into a dense [`Dataset`]. numeric columns come
/// first, followed by one indicator column per level of each nominal column.
/// levels are learned by [`OneHotEncoder::fit`] and sorted; with `drop_first`
/// the lowest level of every nominal column is left out, so a row of zeros
/// stands for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    numeric: Vec<NumericColumn>,
    nominal: Vec<(NominalColumn, Vec<String>)>,
}

impl OneHotEncoder {
    /// collects the levels present in `records` for each nominal column.
    pub fn fit(
        records: &[FeatureRecord],
        numeric: &[NumericColumn],
        nominal: &[NominalColumn],
        drop_first: bool,
    ) -> OneHotEncoder {
        let nominal = nominal
            .iter()
            .map(|column| {
                let mut levels = records
                    .iter()
                    .filter_map(|r| column.level(r))
                    .unique()
                    .collect_vec();
                sort_levels(&mut levels);
                if drop_first && !levels.is_empty() {
                    levels.remove(0);
                }
                log::debug!("encoding {} with {} levels", column.name(), levels.len());
                (*column, levels)
            })
            .collect_vec();

        OneHotEncoder {
            numeric: numeric.to_vec(),
            nominal,
        }
    }

    /// column names of the encoded matrix. indicator columns are named
    /// `{column}_{level}`.
    pub fn feature_names(&self) -> Vec<String> {
        let numeric = self.numeric.iter().map(|c| c.name().to_string());
        let nominal = self.nominal.iter().flat_map(|(column, levels)| {
            levels
                .iter()
                .map(move |level| format!("{}_{}", column.name(), level))
        });
        numeric.chain(nominal).collect()
    }

    /// encodes one record, or `None` if any numeric value is missing.
    /// a missing or unseen nominal level encodes as all zeros.
    pub fn encode(&self, record: &FeatureRecord) -> Option<Vec<f64>> {
        let mut row = self
            .numeric
            .iter()
            .map(|c| c.value(record))
            .collect::<Option<Vec<f64>>>()?;
        for (column, levels) in self.nominal.iter() {
            let level = column.level(record);
            row.extend(
                levels
                    .iter()
                    .map(|l| if Some(l) == level.as_ref() { 1.0 } else { 0.0 }),
            );
        }
        Some(row)
    }

    /// encodes all records with a complete numeric row, labeled by their
    /// delay class. rows with missing numeric values are skipped.
    pub fn transform(&self, records: &[FeatureRecord]) -> Dataset {
        let mut dataset = Dataset::new(self.feature_names());
        let mut skipped = 0;
        for record in records.iter() {
            match self.encode(record) {
                Some(row) => {
                    dataset.features.push(row);
                    dataset.labels.push(record.delay_class.code());
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::info!(
                "excluded {skipped} of {} rows with missing weather values from the feature matrix",
                records.len()
            );
        }
        dataset
    }
}

/// sorts the levels of one column numerically when every level parses as an
/// integer, otherwise all of them as strings.
fn sort_levels(levels: &mut Vec<String>) {
    let numeric = levels
        .iter()
        .map(|l| l.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>();
    match numeric {
        Some(values) => {
            let mut pairs = values.into_iter().zip(levels.drain(..)).collect_vec();
            pairs.sort_by_key(|(value, _)| *value);
            levels.extend(pairs.into_iter().map(|(_, level)| level));
        }
        None => levels.sort(),
    }
}
