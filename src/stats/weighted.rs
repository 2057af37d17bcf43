use std::collections::BTreeMap;

use crate::data::model::{Record, Value};
use crate::error::StatsError;

/// Running totals for one group.
#[derive(Debug, Default)]
struct GroupAggregate {
    weight_sum: f64,
    value_sum: f64,
    count: usize,
}

impl GroupAggregate {
    fn mean(&self) -> f64 {
        self.value_sum / self.count as f64
    }
}

/// Weighted mean of `value` across the groups of `group`.
///
/// Each group contributes the plain mean of its `value` cells, scaled by the
/// group's share of the total `weight`:
///
/// ```text
/// share[g] = sum(weight in g) / sum(weight)
/// result   = sum(share[g] * mean(value in g)) / sum(share[g])
/// ```
///
/// The denominator is summed explicitly rather than taken as 1.0. Groups are
/// formed by key equality, so `1`, `1.0` and `-0.0`/`0.0` each collapse into
/// one group. NaN values or weights propagate into the result.
pub fn weighted_mean(
    records: &[Record],
    group: &str,
    value: &str,
    weight: &str,
) -> Result<f64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut groups: BTreeMap<Value, GroupAggregate> = BTreeMap::new();
    let mut total_weight = 0.0;

    for (row, record) in records.iter().enumerate() {
        let key = record.get(group).ok_or_else(|| StatsError::MissingField {
            row,
            field: group.to_string(),
        })?;
        let v = record.number(row, value)?;
        let w = record.number(row, weight)?;

        let agg = groups.entry(key.group_key()).or_default();
        agg.weight_sum += w;
        agg.value_sum += v;
        agg.count += 1;
        total_weight += w;
    }

    if total_weight == 0.0 {
        return Err(StatsError::DivisionByZero {
            field: weight.to_string(),
        });
    }

    let (numerator, denominator) = groups.values().fold((0.0, 0.0), |(num, den), agg| {
        let share = agg.weight_sum / total_weight;
        (num + share * agg.mean(), den + share)
    });

    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, rate: f64, population: f64) -> Record {
        Record::from_pairs([
            ("State", Value::from(state)),
            ("Rate", Value::Float(rate)),
            ("Population", Value::Float(population)),
        ])
    }

    fn wmean(records: &[Record]) -> Result<f64, StatsError> {
        weighted_mean(records, "State", "Rate", "Population")
    }

    fn plain_mean(records: &[Record]) -> f64 {
        let values: Vec<f64> = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.number(i, "Rate").unwrap())
            .collect();
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_two_groups_worked_example() {
        let records = vec![row("A", 10.0, 2.0), row("A", 20.0, 2.0), row("B", 100.0, 6.0)];
        let result = wmean(&records).unwrap();
        assert!((result - 66.0).abs() < 1e-12, "got {result}");
    }

    #[test]
    fn test_single_group_equals_plain_mean() {
        let records = vec![row("A", 1.0, 10.0), row("A", 4.0, 3.0), row("A", 7.0, 100.0)];
        let result = wmean(&records).unwrap();
        assert!((result - plain_mean(&records)).abs() < 1e-12);
    }

    #[test]
    fn test_equal_weights_equals_plain_mean() {
        let records = vec![
            row("A", 1.0, 5.0),
            row("A", 2.0, 5.0),
            row("A", 9.0, 5.0),
            row("B", 4.0, 5.0),
            row("C", 11.0, 5.0),
            row("C", 3.0, 5.0),
        ];
        let result = wmean(&records).unwrap();
        assert!((result - plain_mean(&records)).abs() < 1e-12);
    }

    #[test]
    fn test_scaling_weights_leaves_result_unchanged() {
        let records = vec![
            row("A", 5.6, 4_779_736.0),
            row("B", 5.6, 710_231.0),
            row("C", 4.7, 6_392_017.0),
        ];
        let scaled: Vec<Record> = records
            .iter()
            .map(|r| {
                let mut r = r.clone();
                let p = r.number(0, "Population").unwrap();
                r.fields.insert("Population".into(), Value::Float(p * 1000.0));
                r
            })
            .collect();
        let a = wmean(&records).unwrap();
        let b = wmean(&scaled).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_integer_weights_accepted() {
        let records = vec![
            Record::from_pairs([
                ("State", Value::from("A")),
                ("Rate", Value::Float(2.0)),
                ("Population", Value::Integer(1)),
            ]),
            Record::from_pairs([
                ("State", Value::from("B")),
                ("Rate", Value::Float(4.0)),
                ("Population", Value::Integer(3)),
            ]),
        ];
        let result = wmean(&records).unwrap();
        assert!((result - 3.5).abs() < 1e-12);
    }

    fn keyed(key: Value, rate: f64, population: f64) -> Record {
        Record::from_pairs([
            ("State", key),
            ("Rate", Value::Float(rate)),
            ("Population", Value::Float(population)),
        ])
    }

    #[test]
    fn test_integer_and_float_keys_share_a_group() {
        // one group: share 1.0 * mean 15
        let records = vec![
            keyed(Value::Integer(1), 10.0, 1.0),
            keyed(Value::Float(1.0), 20.0, 3.0),
        ];
        assert_eq!(wmean(&records).unwrap(), 15.0);
    }

    #[test]
    fn test_signed_zero_keys_share_a_group() {
        let records = vec![
            keyed(Value::Float(0.0), 10.0, 1.0),
            keyed(Value::Float(-0.0), 20.0, 3.0),
        ];
        assert_eq!(wmean(&records).unwrap(), 15.0);
    }

    #[test]
    fn test_keys_guessed_from_csv_cells_share_a_group() {
        use crate::data::loader::guess_value_type;
        let records = vec![
            keyed(guess_value_type("1"), 10.0, 1.0),
            keyed(guess_value_type("1.0"), 20.0, 3.0),
        ];
        assert_eq!(wmean(&records).unwrap(), 15.0);
    }

    #[test]
    fn test_interleaved_mixed_keys() {
        // groups {1, 1.0} → mean 20, share 0.5; {2.0, 2} → mean 40, share 0.5
        let records = vec![
            keyed(Value::Integer(1), 10.0, 1.0),
            keyed(Value::Float(2.0), 30.0, 1.0),
            keyed(Value::Float(1.0), 30.0, 1.0),
            keyed(Value::Integer(2), 50.0, 1.0),
        ];
        assert_eq!(wmean(&records).unwrap(), 30.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wmean(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_all_weights_zero() {
        let records = vec![row("A", 1.0, 0.0), row("B", 2.0, 0.0)];
        assert_eq!(
            wmean(&records),
            Err(StatsError::DivisionByZero { field: "Population".into() })
        );
    }

    #[test]
    fn test_missing_fields() {
        let mut records = vec![row("A", 1.0, 1.0), row("B", 2.0, 1.0)];
        records[1].fields.remove("Rate");
        assert_eq!(
            wmean(&records),
            Err(StatsError::MissingField { row: 1, field: "Rate".into() })
        );

        records[1].fields.insert("Rate".into(), Value::Float(2.0));
        records[1].fields.insert("State".into(), Value::Null);
        assert_eq!(
            wmean(&records),
            Err(StatsError::MissingField { row: 1, field: "State".into() })
        );
    }

    #[test]
    fn test_non_numeric_weight() {
        let mut records = vec![row("A", 1.0, 1.0)];
        records[0].fields.insert("Population".into(), Value::from("lots"));
        assert!(matches!(wmean(&records), Err(StatsError::NotNumeric { row: 0, .. })));
    }

    #[test]
    fn test_nan_value_propagates() {
        let records = vec![row("A", f64::NAN, 1.0), row("B", 2.0, 1.0)];
        assert!(wmean(&records).unwrap().is_nan());
    }
}
