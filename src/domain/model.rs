use serde::{Deserialize, Serialize};
use std::fmt;

/// 完整的土地邊界 (公尺)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotFootprint {
    pub width: f64,
    pub length: f64,
}

impl LotFootprint {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomCategory {
    Bedrooms,
    Bathrooms,
    Kitchen,
    LivingRoom,
    ServiceArea,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 5] = [
        RoomCategory::Bedrooms,
        RoomCategory::Bathrooms,
        RoomCategory::Kitchen,
        RoomCategory::LivingRoom,
        RoomCategory::ServiceArea,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoomCategory::Bedrooms => "bedrooms",
            RoomCategory::Bathrooms => "bathrooms",
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::LivingRoom => "livingRoom",
            RoomCategory::ServiceArea => "serviceArea",
        }
    }
}

/// 各類房間的數量, 未填寫的類別視為 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RoomRequest {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub kitchen: u32,
    pub living_room: u32,
    pub service_area: u32,
}

impl RoomRequest {
    pub fn count(&self, category: RoomCategory) -> u32 {
        match category {
            RoomCategory::Bedrooms => self.bedrooms,
            RoomCategory::Bathrooms => self.bathrooms,
            RoomCategory::Kitchen => self.kitchen,
            RoomCategory::LivingRoom => self.living_room,
            RoomCategory::ServiceArea => self.service_area,
        }
    }

    pub fn total(&self) -> u64 {
        RoomCategory::ALL
            .iter()
            .map(|c| u64::from(self.count(*c)))
            .sum()
    }
}

/// 法定退縮距離 (recess)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setback {
    #[serde(rename = "frontalRecess", alias = "frontal")]
    pub frontal: f64,
    #[serde(rename = "lateralRecess", alias = "lateral")]
    pub lateral: f64,
    #[serde(rename = "backRecess", alias = "back")]
    pub back: f64,
}

impl Setback {
    pub const fn none() -> Self {
        Self {
            frontal: 0.0,
            lateral: 0.0,
            back: 0.0,
        }
    }
}

impl Default for Setback {
    fn default() -> Self {
        Self {
            frontal: 3.0,
            lateral: 1.5,
            back: 1.5,
        }
    }
}

/// 扣除退縮後可建築的矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildableEnvelope {
    pub available_width: f64,
    pub available_length: f64,
}

impl BuildableEnvelope {
    pub fn from_footprint(footprint: &LotFootprint, setback: &Setback) -> Self {
        Self {
            available_width: footprint.width - 2.0 * setback.lateral,
            available_length: footprint.length - setback.frontal - setback.back,
        }
    }

    pub fn area(&self) -> f64 {
        self.available_width * self.available_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBudget {
    pub private: f64,
    pub social: f64,
    pub service: f64,
}

impl ZoneBudget {
    pub fn total(&self) -> f64 {
        self.private + self.social + self.service
    }
}

/// 輸出紀錄的類型: 保留區 (採光、休閒) 或使用者要求的房間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Light,
    Leisure,
    Room(RoomCategory),
}

impl RoomKind {
    pub fn label(&self) -> &'static str {
        match self {
            RoomKind::Light => "light",
            RoomKind::Leisure => "leisure",
            RoomKind::Room(category) => category.label(),
        }
    }

    pub fn is_reserve(&self) -> bool {
        matches!(self, RoomKind::Light | RoomKind::Leisure)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "light" => Some(RoomKind::Light),
            "leisure" => Some(RoomKind::Leisure),
            other => RoomCategory::ALL
                .iter()
                .find(|c| c.label() == other)
                .map(|c| RoomKind::Room(*c)),
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RoomKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RoomKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        RoomKind::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown room type '{}'", label)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub rooms: Vec<RoomRecord>,
    pub available_width: f64,
    pub available_length: f64,
    pub setbacks: Setback,
}

impl AllocationResult {
    pub fn total_area(&self) -> f64 {
        self.rooms.iter().map(|r| r.area).sum()
    }

    /// 不含採光與休閒保留區的面積
    pub fn room_area(&self) -> f64 {
        self.rooms
            .iter()
            .filter(|r| !r.kind.is_reserve())
            .map(|r| r.area)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// 全部面積平均分給所有房間
    Proportional,
    /// 分區配置, 同區只要求一類時由該類吸收整區預算
    Zoned,
    /// 分區配置, 成對類別必須同時出現才配置
    Optimized,
}

/// 對外的兩個入口: `generate` 與 `generate-ai`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    Generate,
    GenerateAi,
}

impl Endpoint {
    pub fn policy(&self, optimization: bool) -> Policy {
        match (self, optimization) {
            (Endpoint::Generate, _) => Policy::Proportional,
            (Endpoint::GenerateAi, false) => Policy::Zoned,
            (Endpoint::GenerateAi, true) => Policy::Optimized,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Endpoint::Generate => "Floor plan generated",
            Endpoint::GenerateAi => "Zoned floor plan generated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanRequest {
    pub dimensions: LotFootprint,
    pub rooms: RoomRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub layout: Vec<RoomRecord>,
    pub available_width: f64,
    pub available_length: f64,
    pub recesses: Setback,
}

impl LayoutResponse {
    pub fn from_result(result: AllocationResult, message: Option<String>) -> Self {
        Self {
            message,
            layout: result.rooms,
            available_width: result.available_width,
            available_length: result.available_length,
            recesses: result.setbacks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
