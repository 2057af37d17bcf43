use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Synthetic state table
// ---------------------------------------------------------------------------

/// One row of the synthetic table, laid out like `state.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Population")]
    pub population: i64,
    #[serde(rename = "Murder.Rate")]
    pub murder_rate: f64,
    #[serde(rename = "Abbreviation")]
    pub abbreviation: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Two-letter code for the `i`-th synthetic state: AA, AB, ..., ZZ.
fn abbreviation(i: usize) -> String {
    let a = (b'A' + ((i / 26) % 26) as u8) as char;
    let b = (b'A' + (i % 26) as u8) as char;
    format!("{a}{b}")
}

/// Generate `n_rows` synthetic states.
///
/// Populations are log-normal (median around 4 million), murder rates are
/// normal around 4.5 per 100k and rounded to one decimal, never negative.
pub fn sample_states(n_rows: usize, seed: u64) -> Vec<StateRow> {
    let mut rng = SimpleRng::new(seed);
    (0..n_rows)
        .map(|i| {
            let population = rng.gauss(15.2, 1.0).exp().round() as i64;
            let murder_rate = (rng.gauss(4.5, 1.9).max(0.0) * 10.0).round() / 10.0;
            StateRow {
                state: format!("State_{:02}", i + 1),
                population: population.max(1),
                murder_rate,
                abbreviation: abbreviation(i),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write rows to `path`, picking CSV or Parquet from the extension.
pub fn write_file(path: &Path, rows: &[StateRow]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, rows),
        "parquet" | "pq" => write_parquet(path, rows),
        other => bail!("Unsupported output extension: .{other}"),
    }
}

pub fn write_csv(path: &Path, rows: &[StateRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

pub fn write_parquet(path: &Path, rows: &[StateRow]) -> Result<()> {
    let state_array = StringArray::from(rows.iter().map(|r| r.state.as_str()).collect::<Vec<_>>());
    let population_array = Int64Array::from(rows.iter().map(|r| r.population).collect::<Vec<_>>());
    let rate_array = Float64Array::from(rows.iter().map(|r| r.murder_rate).collect::<Vec<_>>());
    let abbreviation_array = StringArray::from(
        rows.iter().map(|r| r.abbreviation.as_str()).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("State", DataType::Utf8, false),
        Field::new("Population", DataType::Int64, false),
        Field::new("Murder.Rate", DataType::Float64, false),
        Field::new("Abbreviation", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(state_array),
            Arc::new(population_array),
            Arc::new(rate_array),
            Arc::new(abbreviation_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::Value;

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(sample_states(20, 42), sample_states(20, 42));
        assert_ne!(sample_states(20, 42), sample_states(20, 7));
    }

    #[test]
    fn test_sample_values_are_plausible() {
        let rows = sample_states(50, 42);
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0].state, "State_01");
        assert_eq!(rows[0].abbreviation, "AA");
        assert_eq!(rows[27].abbreviation, "BB");
        assert!(rows.iter().all(|r| r.population >= 1 && r.murder_rate >= 0.0));
    }

    #[test]
    fn test_parquet_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.parquet");
        let rows = sample_states(5, 1);
        write_file(&path, &rows).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.records[3].get("State"), Some(&Value::from("State_04")));
        assert_eq!(ds.records[3].get("Population"), Some(&Value::Integer(rows[3].population)));
        assert_eq!(ds.records[3].get("Murder.Rate"), Some(&Value::Float(rows[3].murder_rate)));
    }

    #[test]
    fn test_csv_file_uses_state_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.csv");
        write_file(&path, &sample_states(3, 1)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("State,Population,Murder.Rate,Abbreviation\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_unsupported_output_extension() {
        assert!(write_file(Path::new("out.txt"), &[]).is_err());
    }
}
