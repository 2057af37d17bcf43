use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::StatsError;
use crate::stats::weighted;

// ---------------------------------------------------------------------------
// Value – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the common Pandas dtypes.
/// Group keys live in a `BTreeMap`, so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can group by Value --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn rank(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Interpret the cell as an `f64`. Only `Integer` and `Float` are numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical form for grouping: integral floats in `i64` range become
    /// `Integer`, so `1`, `1.0` and `0.0`/`-0.0` land on the same key.
    pub fn group_key(&self) -> Value {
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63
        match *self {
            Value::Float(f) if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) => {
                Value::Integer(f as i64)
            }
            _ => self.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single row: column_name → cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The cell for `column`, or `None` when the column is absent or null.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column).filter(|v| !v.is_null())
    }

    /// Read `column` as a number. `row` is only used for error reporting.
    pub fn number(&self, row: usize, column: &str) -> Result<f64, StatsError> {
        let value = self.get(column).ok_or_else(|| StatsError::MissingField {
            row,
            field: column.to_string(),
        })?;
        value.as_f64().ok_or_else(|| StatsError::NotNumeric {
            row,
            field: column.to_string(),
            value: value.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in file order.
    pub records: Vec<Record>,
    /// Sorted list of every column name seen across the rows.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the loaded rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        let column_names: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.fields.keys().cloned())
            .collect();
        Dataset {
            records,
            column_names: column_names.into_iter().collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract `column` as numbers, failing on the first missing or
    /// non-numeric cell.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>, StatsError> {
        self.records
            .iter()
            .enumerate()
            .map(|(row, r)| r.number(row, column))
            .collect()
    }

    /// Weighted mean of `value` across groups of `group`, weighted by `weight`.
    pub fn weighted_mean(&self, group: &str, value: &str, weight: &str) -> Result<f64, StatsError> {
        weighted::weighted_mean(&self.records, group, value, weight)
    }
}
