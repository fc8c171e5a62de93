use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Static per-deployment configuration
// ---------------------------------------------------------------------------

/// What to load and which columns drive the dashboard. Hard-coded per
/// deployment; only the data path can be overridden by a positional
/// argument. There are no CLI flags.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Path to the tabular data file (.csv, .json or .parquet).
    pub data_path: PathBuf,
    /// Numeric column plotted on the x axis.
    pub x_axis: String,
    /// Categorical columns the data can be split and filtered by.
    pub segments: Vec<String>,
    /// Numeric columns whose mean can be plotted.
    pub metrics: Vec<String>,
}

impl Deployment {
    /// The demo deployment, matching the sample data generator's schema.
    pub fn demo() -> Self {
        Deployment {
            data_path: PathBuf::from("sample_data.csv"),
            x_axis: "week".to_string(),
            segments: vec!["region".to_string(), "product".to_string()],
            metrics: vec!["revenue".to_string(), "units".to_string()],
        }
    }
}
