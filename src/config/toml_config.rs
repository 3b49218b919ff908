use crate::domain::model::Setback;
use crate::utils::error::{FloorPlanError, Result};
use crate::utils::validation::{
    validate_fractions_sum, validate_non_negative, validate_positive_number, validate_range,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置演算法使用的常數, 預設值為現行規範
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub setback: Setback,
    pub zones: ZoneSplit,
    pub light_reserve_m2: f64,
    pub light_rule: LightReserveRule,
    /// 休閒區佔可建築面積的比例, 位於土地後方
    pub leisure_fraction: f64,
    pub max_total_rooms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSplit {
    pub private: f64,
    pub social: f64,
    pub service: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightReserveRule {
    /// 固定使用 `light_reserve_m2`
    #[default]
    Fixed,
    /// `max(light_reserve_m2, available_width)`
    AtLeastWidth,
}

impl AllocatorConfig {
    const fn default_light_reserve_m2() -> f64 {
        6.0
    }

    const fn default_leisure_fraction() -> f64 {
        0.15
    }

    const fn default_max_total_rooms() -> u64 {
        200
    }

    /// 關閉採光與休閒保留區的設定
    pub fn without_reserves() -> Self {
        Self {
            light_reserve_m2: 0.0,
            leisure_fraction: 0.0,
            ..Self::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FloorPlanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${LIGHT_RESERVE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FloorPlanError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_negative("setback.frontal", self.setback.frontal)?;
        validate_non_negative("setback.lateral", self.setback.lateral)?;
        validate_non_negative("setback.back", self.setback.back)?;

        validate_range("zones.private", self.zones.private, 0.0, 1.0)?;
        validate_range("zones.social", self.zones.social, 0.0, 1.0)?;
        validate_range("zones.service", self.zones.service, 0.0, 1.0)?;
        validate_fractions_sum(
            "zones",
            &[self.zones.private, self.zones.social, self.zones.service],
            1e-6,
        )?;

        validate_non_negative("light_reserve_m2", self.light_reserve_m2)?;
        validate_range("leisure_fraction", self.leisure_fraction, 0.0, 1.0)?;
        if self.leisure_fraction >= 1.0 {
            return Err(FloorPlanError::InvalidConfigValueError {
                field: "leisure_fraction".to_string(),
                value: self.leisure_fraction.to_string(),
                reason: "Leisure cannot take the whole buildable area".to_string(),
            });
        }

        let max_rooms = usize::try_from(self.max_total_rooms).unwrap_or(usize::MAX);
        validate_positive_number("max_total_rooms", max_rooms, 1)?;

        Ok(())
    }

    /// 依規則計算採光保留區面積
    pub fn light_reserve(&self, available_width: f64) -> f64 {
        match self.light_rule {
            LightReserveRule::Fixed => self.light_reserve_m2,
            LightReserveRule::AtLeastWidth => self.light_reserve_m2.max(available_width),
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            setback: Setback::default(),
            zones: ZoneSplit::default(),
            light_reserve_m2: Self::default_light_reserve_m2(),
            light_rule: LightReserveRule::default(),
            leisure_fraction: Self::default_leisure_fraction(),
            max_total_rooms: Self::default_max_total_rooms(),
        }
    }
}

impl Default for ZoneSplit {
    fn default() -> Self {
        Self {
            private: 0.4,
            social: 0.4,
            service: 0.2,
        }
    }
}

impl Validate for AllocatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
