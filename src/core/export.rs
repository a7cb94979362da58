use crate::domain::model::{
    GrowthParameters, RiskAssessment, RiskTier, SimulationInput, SimulationOutcome, Trajectory,
    TrajectoryPoint,
};
use crate::domain::ports::Storage;
use crate::utils::error::{RiskError, Result};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use zip::write::{FileOptions, ZipWriter};

pub const TIME_HEADER: &str = "Time (hours)";
pub const POPULATION_HEADER: &str = "Population (CFU/g)";
pub const DEFAULT_BASE_NAME: &str = "pathogen_growth_simulation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub const SUPPORTED: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    pub fn parse_list(formats: &[String]) -> Result<Vec<ExportFormat>> {
        let mut parsed: Vec<ExportFormat> = Vec::with_capacity(formats.len());
        for raw in formats {
            let format = raw.parse()?;
            if !parsed.contains(&format) {
                parsed.push(format);
            }
        }
        Ok(parsed)
    }
}

impl FromStr for ExportFormat {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(RiskError::ConfigError {
                message: format!(
                    "Unsupported export format '{}'. Valid formats: {}",
                    other,
                    ExportFormat::SUPPORTED.join(", ")
                ),
            }),
        }
    }
}

/// Shortest round-trip form, keeping `.0` on integral values (`1000.0`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn delimited(trajectory: &Trajectory, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record([TIME_HEADER, POPULATION_HEADER])?;
    for TrajectoryPoint { time, population } in trajectory.points() {
        writer.write_record([format_float(*time), format_float(*population)])?;
    }
    writer.into_inner().map_err(|e| RiskError::ExportError {
        message: format!("Failed to flush delimited output: {}", e),
    })
}

/// Two-column `Time (hours),Population (CFU/g)` table.
pub fn trajectory_to_csv(trajectory: &Trajectory) -> Result<Vec<u8>> {
    delimited(trajectory, b',')
}

pub fn trajectory_to_tsv(trajectory: &Trajectory) -> Result<Vec<u8>> {
    delimited(trajectory, b'\t')
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub tier: RiskTier,
    pub score: f64,
    pub label: &'static str,
    pub color: &'static str,
    pub recommendations: &'static [&'static str],
}

impl From<&RiskAssessment> for RiskReport {
    fn from(risk: &RiskAssessment) -> Self {
        Self {
            tier: risk.tier,
            score: risk.score,
            label: risk.tier.label(),
            color: risk.tier.color(),
            recommendations: risk.tier.recommendations(),
        }
    }
}

/// JSON export document.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport<'a> {
    pub generated_at: String,
    pub input: &'a SimulationInput,
    pub parameters: &'a GrowthParameters,
    pub risk: RiskReport,
    pub trajectory: &'a Trajectory,
}

impl<'a> SimulationReport<'a> {
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input: &outcome.input,
            parameters: &outcome.parameters,
            risk: RiskReport::from(&outcome.risk),
            trajectory: &outcome.trajectory,
        }
    }
}

/// One row per scenario in a batch summary table.
pub fn summary_to_csv(rows: &[(String, SimulationOutcome)]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "scenario",
        "food_type",
        "temperature",
        "exposure_hours",
        "ph",
        "water_activity",
        "growth_rate",
        "final_population",
        "risk_score",
        "risk_tier",
    ])?;
    for (name, outcome) in rows {
        let input = &outcome.input;
        writer.write_record([
            name.clone(),
            input.food_type.to_string(),
            format_float(input.temperature),
            format_float(input.exposure_hours),
            format_float(input.ph),
            format_float(input.water_activity),
            format_float(outcome.parameters.growth_rate),
            format_float(outcome.trajectory.final_population()),
            format_float(outcome.risk.score),
            outcome.risk.tier.to_string(),
        ])?;
    }
    writer.into_inner().map_err(|e| RiskError::ExportError {
        message: format!("Failed to flush summary output: {}", e),
    })
}

pub struct TrajectoryExporter<S: Storage> {
    storage: S,
    formats: Vec<ExportFormat>,
    bundle: bool,
    base_name: String,
}

impl<S: Storage> TrajectoryExporter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            formats: vec![ExportFormat::Csv],
            bundle: false,
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }

    pub fn with_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn render(&self, outcome: &SimulationOutcome) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            let data = match format {
                ExportFormat::Csv => trajectory_to_csv(&outcome.trajectory)?,
                ExportFormat::Tsv => trajectory_to_tsv(&outcome.trajectory)?,
                ExportFormat::Json => {
                    serde_json::to_vec_pretty(&SimulationReport::new(outcome))?
                }
            };
            files.push((format!("{}.{}", self.base_name, format.extension()), data));
        }
        Ok(files)
    }

    /// Writes every configured format, or a single zip holding them all.
    /// Returns the relative names written.
    pub fn export(&self, outcome: &SimulationOutcome) -> Result<Vec<String>> {
        if self.formats.is_empty() {
            return Err(RiskError::ExportError {
                message: "No export formats configured".to_string(),
            });
        }

        let files = self.render(outcome)?;

        if self.bundle {
            let zip_name = format!("{}.zip", self.base_name);
            let zip_data = bundle_files(&files)?;
            tracing::debug!(
                "Writing ZIP bundle ({} files, {} bytes) to {}",
                files.len(),
                zip_data.len(),
                self.storage.locate(&zip_name)
            );
            self.storage.write_file(&zip_name, &zip_data)?;
            return Ok(vec![zip_name]);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in files {
            tracing::debug!("Writing {} ({} bytes)", self.storage.locate(&name), data.len());
            self.storage.write_file(&name, &data)?;
            written.push(name);
        }
        Ok(written)
    }

    pub fn export_summary(&self, file_name: &str, rows: &[(String, SimulationOutcome)]) -> Result<String> {
        let data = summary_to_csv(rows)?;
        self.storage.write_file(file_name, &data)?;
        Ok(file_name.to_string())
    }
}

fn bundle_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::growth::generate;
    use crate::domain::model::{GrowthParameters, CARRYING_CAPACITY, INITIAL_POPULATION};

    fn flat_trajectory() -> Trajectory {
        let params = GrowthParameters {
            initial_population: INITIAL_POPULATION,
            growth_rate: 0.0,
            carrying_capacity: CARRYING_CAPACITY,
        };
        generate(3.0, &params).unwrap()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1000.0), "1000.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.25), "0.25");
    }

    #[test]
    fn test_csv_header_is_exact() {
        let csv = String::from_utf8(trajectory_to_csv(&flat_trajectory()).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Time (hours),Population (CFU/g)"));
        assert_eq!(lines.next(), Some("0.0,1000.0"));
        assert_eq!(lines.last(), Some("3.0,1000.0"));
        assert_eq!(csv.lines().count(), 101);
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let tsv = String::from_utf8(trajectory_to_tsv(&flat_trajectory()).unwrap()).unwrap();
        assert!(tsv.starts_with("Time (hours)\tPopulation (CFU/g)\n"));
    }

    #[test]
    fn test_parse_format_list() {
        let formats =
            ExportFormat::parse_list(&["CSV".to_string(), "json".to_string(), "csv".to_string()])
                .unwrap();
        assert_eq!(formats, vec![ExportFormat::Csv, ExportFormat::Json]);
        assert!(ExportFormat::parse_list(&["xlsx".to_string()]).is_err());
    }
}
