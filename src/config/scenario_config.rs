use crate::core::export::ExportFormat;
use crate::core::{FoodType, InputProvider, SimulationInput};
use crate::utils::error::{RiskError, Result};
use crate::utils::validation::{
    validate_path, validate_scenario_name, validate_unique_names, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SUMMARY_FILE: &str = "scenario_summary.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub batch: BatchConfig,
    pub defaults: Option<InputOverrides>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
    pub export: ExportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    /// 超出範圍的輸入改為夾限，而不是報錯
    pub clamp: Option<bool>,
}

/// Partial input; unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputOverrides {
    pub temperature: Option<f64>,
    pub exposure_hours: Option<f64>,
    pub ph: Option<f64>,
    pub water_activity: Option<f64>,
    pub food_type: Option<String>,
}

impl InputOverrides {
    fn apply(&self, mut input: SimulationInput) -> Result<SimulationInput> {
        if let Some(temperature) = self.temperature {
            input.temperature = temperature;
        }
        if let Some(exposure_hours) = self.exposure_hours {
            input.exposure_hours = exposure_hours;
        }
        if let Some(ph) = self.ph {
            input.ph = ph;
        }
        if let Some(water_activity) = self.water_activity {
            input.water_activity = water_activity;
        }
        if let Some(food_type) = &self.food_type {
            input.food_type = food_type.parse::<FoodType>()?;
        }
        Ok(input)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub name: String,
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub input: InputOverrides,
}

impl ScenarioEntry {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub bundle: Option<bool>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RiskError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RiskError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RiskError::ConfigParseError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn clamp(&self) -> bool {
        self.batch.clamp.unwrap_or(false)
    }

    pub fn enabled_scenarios(&self) -> impl Iterator<Item = &ScenarioEntry> {
        self.scenarios.iter().filter(|s| s.is_enabled())
    }

    fn base_input(&self) -> Result<SimulationInput> {
        match &self.defaults {
            Some(defaults) => defaults.apply(SimulationInput::default()),
            None => Ok(SimulationInput::default()),
        }
    }

    /// Built-in defaults, then `[defaults]`, then the scenario's own fields.
    pub fn resolve_input(&self, scenario: &ScenarioEntry) -> Result<SimulationInput> {
        let input = scenario.input.apply(self.base_input()?)?;
        if self.clamp() {
            Ok(input.clamped())
        } else {
            Ok(input)
        }
    }

    pub fn resolved_inputs(&self) -> Result<Vec<(String, SimulationInput)>> {
        self.enabled_scenarios()
            .map(|s| -> Result<(String, SimulationInput)> {
                Ok((s.name.clone(), self.resolve_input(s)?))
            })
            .collect()
    }

    pub fn export_formats(&self) -> Result<Vec<ExportFormat>> {
        ExportFormat::parse_list(&self.export.formats)
    }

    pub fn summary_file(&self) -> &str {
        self.export.summary.as_deref().unwrap_or(DEFAULT_SUMMARY_FILE)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .map(|level| matches!(level.to_ascii_lowercase().as_str(), "debug" | "trace"))
            .unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("export.output_path", &self.export.output_path)?;
        validate_path("export.summary", self.summary_file())?;

        if self.export.formats.is_empty() {
            return Err(RiskError::ConfigError {
                message: "export.formats must list at least one format".to_string(),
            });
        }
        self.export_formats()?;

        validate_unique_names("scenarios.name", self.scenarios.iter().map(|s| s.name.as_str()))?;
        for scenario in &self.scenarios {
            validate_scenario_name("scenarios.name", &scenario.name)?;
        }

        for (name, input) in self.resolved_inputs()? {
            input.validate().map_err(|e| match e {
                RiskError::InvalidParameter {
                    field,
                    value,
                    reason,
                } => RiskError::InvalidParameter {
                    field: format!("scenarios.{}.{}", name, field),
                    value,
                    reason,
                },
                other => other,
            })?;
        }

        Ok(())
    }
}

impl InputProvider for ScenarioConfig {
    /// First enabled scenario, or the defaults when none is listed.
    fn simulation_input(&self) -> Result<SimulationInput> {
        match self.enabled_scenarios().next() {
            Some(scenario) => self.resolve_input(scenario),
            None => self.base_input(),
        }
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.export.formats
    }

    fn bundle(&self) -> bool {
        self.export.bundle.unwrap_or(false)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[batch]
name = "cold-chain"
description = "Cold chain audit"
version = "1.0.0"

[defaults]
ph = 6.2
food_type = "dairy"

[[scenarios]]
name = "fridge"
temperature = 4.0
exposure_hours = 72

[[scenarios]]
name = "counter"
temperature = 22.0
exposure_hours = 8
water_activity = 0.99
food_type = "Produce"

[[scenarios]]
name = "skipped"
enabled = false
temperature = 30.0

[export]
output_path = "./output"
formats = ["csv", "json"]
"#;

    #[test]
    fn test_parse_basic_scenario_config() {
        let config = ScenarioConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.batch.name, "cold-chain");
        assert_eq!(config.scenarios.len(), 3);
        assert_eq!(config.enabled_scenarios().count(), 2);
        assert_eq!(config.summary_file(), DEFAULT_SUMMARY_FILE);
        assert!(!config.bundle());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layered_resolution() {
        let config = ScenarioConfig::from_toml_str(BASIC).unwrap();
        let inputs = config.resolved_inputs().unwrap();

        let (name, fridge) = &inputs[0];
        assert_eq!(name, "fridge");
        assert_eq!(fridge.temperature, 4.0);
        assert_eq!(fridge.exposure_hours, 72.0);
        assert_eq!(fridge.ph, 6.2);
        assert_eq!(fridge.water_activity, 0.95);
        assert_eq!(fridge.food_type, FoodType::Dairy);

        let (_, counter) = &inputs[1];
        assert_eq!(counter.food_type, FoodType::Produce);
        assert_eq!(counter.water_activity, 0.99);

        assert_eq!(config.simulation_input().unwrap(), *fridge);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PATHOGEN_RISK_TEST_OUTPUT", "/tmp/risk-out");

        let content = r#"
[batch]
name = "env"

[export]
output_path = "${PATHOGEN_RISK_TEST_OUTPUT}"
formats = ["csv"]
summary = "${PATHOGEN_RISK_UNSET_VAR}.csv"
"#;

        let config = ScenarioConfig::from_toml_str(content).unwrap();
        assert_eq!(config.export.output_path, "/tmp/risk-out");
        assert_eq!(config.summary_file(), "${PATHOGEN_RISK_UNSET_VAR}.csv");

        std::env::remove_var("PATHOGEN_RISK_TEST_OUTPUT");
    }

    #[test]
    fn test_validation_rejects_out_of_range_scenario() {
        let content = r#"
[batch]
name = "bad"

[[scenarios]]
name = "oven"
temperature = 90.0

[export]
output_path = "./output"
formats = ["csv"]
"#;

        let config = ScenarioConfig::from_toml_str(content).unwrap();
        match config.validate() {
            Err(RiskError::InvalidParameter { field, .. }) => {
                assert_eq!(field, "scenarios.oven.temperature")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_clamp_accepts_out_of_range_scenario() {
        let content = r#"
[batch]
name = "clamped"
clamp = true

[[scenarios]]
name = "oven"
temperature = 90.0

[export]
output_path = "./output"
formats = ["tsv"]
"#;

        let config = ScenarioConfig::from_toml_str(content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation_input().unwrap().temperature, 50.0);
    }

    #[test]
    fn test_validation_rejects_bad_formats_and_duplicates() {
        let bad_format = BASIC.replace(r#"["csv", "json"]"#, r#"["xlsx"]"#);
        let config = ScenarioConfig::from_toml_str(&bad_format).unwrap();
        assert!(matches!(config.validate(), Err(RiskError::ConfigError { .. })));

        let duplicate = BASIC.replace("name = \"counter\"", "name = \"fridge\"");
        let config = ScenarioConfig::from_toml_str(&duplicate).unwrap();
        assert!(matches!(config.validate(), Err(RiskError::ConfigError { .. })));
    }

    #[test]
    fn test_validation_rejects_path_like_scenario_names() {
        for bad in ["../escaped", "nested/dir", ".."] {
            let content = BASIC.replace("name = \"counter\"", &format!("name = \"{}\"", bad));
            let config = ScenarioConfig::from_toml_str(&content).unwrap();
            match config.validate() {
                Err(RiskError::ConfigError { message }) => {
                    assert!(message.contains(bad), "{}", message)
                }
                other => panic!("expected ConfigError for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_logging_section() {
        let content = format!("{}\n[logging]\nlevel = \"DEBUG\"\njson = true\n", BASIC);
        let config = ScenarioConfig::from_toml_str(&content).unwrap();
        assert!(config.verbose_logging());
        assert!(config.log_json());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.batch.name, "cold-chain");
    }

    #[test]
    fn test_missing_export_section_is_parse_error() {
        let err = ScenarioConfig::from_toml_str("[batch]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, RiskError::ConfigParseError { .. }));
    }
}
