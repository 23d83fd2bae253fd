// src/models/crop.rs
// DOCUMENTATION: Crop token records and request DTOs
// PURPOSE: Field rules, normalization and the status/isActive derivation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a crop token
/// DOCUMENTATION: Stored as the PostgreSQL enum `crop_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "crop_status")]
pub enum CropStatus {
    Active,
    #[default]
    #[serde(rename = "Coming Soon")]
    #[sqlx(rename = "Coming Soon")]
    ComingSoon,
    Completed,
    Paused,
}

impl CropStatus {
    pub const ALL: [CropStatus; 4] = [
        CropStatus::Active,
        CropStatus::ComingSoon,
        CropStatus::Completed,
        CropStatus::Paused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropStatus::Active => "Active",
            CropStatus::ComingSoon => "Coming Soon",
            CropStatus::Completed => "Completed",
            CropStatus::Paused => "Paused",
        }
    }
}

impl fmt::Display for CropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropStatus {
    type Err = String;

    /// Exact, case-sensitive match against the four status names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CropStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown crop status: {}", s))
    }
}

/// Represents a complete crop record from the database
/// DOCUMENTATION: Maps to the `crops` table
/// `is_active` is never written from input; see `sync_derived_fields`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: Uuid,

    /// Token name, e.g. "$POTATO" (unique)
    pub name: String,

    /// Token symbol, stored uppercase (unique)
    pub symbol: String,

    /// Crop type, e.g. "Premium Potatoes"
    pub crop: String,

    pub image: String,
    pub land_area: String,
    pub yield_season: String,
    pub status: CropStatus,

    /// Total value locked, display string
    pub tvl: String,
    pub apy: String,
    pub yield_logic: String,
    pub bg_color: String,
    pub status_color: String,

    /// Always equal to `status == Active` once persisted
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Crop {
    /// Build a new, not yet persisted record from a validated request
    pub fn from_request(req: CreateCropRequest) -> Self {
        let now = Utc::now();
        let status = req.status.unwrap_or_default();

        let mut crop = Crop {
            id: Uuid::new_v4(),
            name: req.name,
            symbol: req.symbol,
            crop: req.crop,
            image: req.image,
            land_area: req.land_area,
            yield_season: req.yield_season,
            status,
            tvl: req.tvl,
            apy: req.apy,
            yield_logic: req.yield_logic,
            bg_color: req.bg_color,
            status_color: req.status_color,
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        crop.sync_derived_fields();
        crop
    }

    /// Recompute `is_active` from `status`
    /// Called by the repository immediately before every write
    pub fn sync_derived_fields(&mut self) {
        self.is_active = self.status == CropStatus::Active;
    }
}

/// Request DTO for creating a new crop
/// DOCUMENTATION: Body of POST /api/crops
/// Call `normalize()` before `validate()`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCropRequest {
    #[validate(length(min = 1, message = "Crop token name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Token symbol is required"))]
    pub symbol: String,

    #[validate(length(min = 1, message = "Crop type is required"))]
    pub crop: String,

    #[validate(length(min = 1, message = "Crop image is required"))]
    pub image: String,

    #[validate(length(min = 1, message = "Land area is required"))]
    pub land_area: String,

    #[validate(length(min = 1, message = "Yield season is required"))]
    pub yield_season: String,

    /// Defaults to "Coming Soon"
    #[serde(default)]
    pub status: Option<CropStatus>,

    #[validate(length(min = 1, message = "TVL (Total Value Locked) is required"))]
    pub tvl: String,

    #[validate(length(min = 1, message = "APY is required"))]
    pub apy: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Yield logic must be between 10 and 500 characters"
    ))]
    pub yield_logic: String,

    #[validate(length(min = 1, message = "Background color is required"))]
    pub bg_color: String,

    #[validate(length(min = 1, message = "Status color is required"))]
    pub status_color: String,
}

impl CreateCropRequest {
    /// Trim every string and uppercase the symbol
    pub fn normalize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.crop,
            &mut self.image,
            &mut self.land_area,
            &mut self.yield_season,
            &mut self.tvl,
            &mut self.apy,
            &mut self.yield_logic,
            &mut self.bg_color,
            &mut self.status_color,
        ] {
            *field = field.trim().to_string();
        }
        self.symbol = normalize_symbol(&self.symbol);
    }
}

/// Request DTO for updating an existing crop
/// DOCUMENTATION: Body of PUT /api/crops/{symbol}
/// All fields are optional - only provided fields are merged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCropRequest {
    #[validate(length(min = 1, message = "Crop token name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Token symbol cannot be empty"))]
    pub symbol: Option<String>,

    #[validate(length(min = 1, message = "Crop type cannot be empty"))]
    pub crop: Option<String>,

    #[validate(length(min = 1, message = "Crop image cannot be empty"))]
    pub image: Option<String>,

    #[validate(length(min = 1, message = "Land area cannot be empty"))]
    pub land_area: Option<String>,

    #[validate(length(min = 1, message = "Yield season cannot be empty"))]
    pub yield_season: Option<String>,

    pub status: Option<CropStatus>,

    #[validate(length(min = 1, message = "TVL cannot be empty"))]
    pub tvl: Option<String>,

    #[validate(length(min = 1, message = "APY cannot be empty"))]
    pub apy: Option<String>,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Yield logic must be between 10 and 500 characters"
    ))]
    pub yield_logic: Option<String>,

    #[validate(length(min = 1, message = "Background color cannot be empty"))]
    pub bg_color: Option<String>,

    #[validate(length(min = 1, message = "Status color cannot be empty"))]
    pub status_color: Option<String>,
}

impl UpdateCropRequest {
    pub fn normalize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.crop,
            &mut self.image,
            &mut self.land_area,
            &mut self.yield_season,
            &mut self.tvl,
            &mut self.apy,
            &mut self.yield_logic,
            &mut self.bg_color,
            &mut self.status_color,
        ]
        .into_iter()
        .flatten()
        {
            *field = field.trim().to_string();
        }
        if let Some(symbol) = self.symbol.as_mut() {
            *symbol = normalize_symbol(symbol);
        }
    }

    /// Merge provided fields into an existing record
    pub fn apply_to(self, crop: &mut Crop) {
        if let Some(name) = self.name {
            crop.name = name;
        }
        if let Some(symbol) = self.symbol {
            crop.symbol = symbol;
        }
        if let Some(value) = self.crop {
            crop.crop = value;
        }
        if let Some(image) = self.image {
            crop.image = image;
        }
        if let Some(land_area) = self.land_area {
            crop.land_area = land_area;
        }
        if let Some(yield_season) = self.yield_season {
            crop.yield_season = yield_season;
        }
        if let Some(status) = self.status {
            crop.status = status;
        }
        if let Some(tvl) = self.tvl {
            crop.tvl = tvl;
        }
        if let Some(apy) = self.apy {
            crop.apy = apy;
        }
        if let Some(yield_logic) = self.yield_logic {
            crop.yield_logic = yield_logic;
        }
        if let Some(bg_color) = self.bg_color {
            crop.bg_color = bg_color;
        }
        if let Some(status_color) = self.status_color {
            crop.status_color = status_color;
        }
    }
}

/// Body of PUT /api/crops/{symbol}/status
/// Kept as a raw string so an unknown value yields the dedicated message
#[derive(Debug, Deserialize)]
pub struct UpdateCropStatusRequest {
    pub status: Option<String>,
}

/// Symbols are compared and stored uppercase
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potato_request() -> CreateCropRequest {
        CreateCropRequest {
            name: "  $POTATO ".to_string(),
            symbol: " spotato".to_string(),
            crop: "Premium Potatoes".to_string(),
            image: "/assets/potato-crop.jpg".to_string(),
            land_area: "247 acres".to_string(),
            yield_season: "Sep - Nov 2024".to_string(),
            status: None,
            tvl: "$142,000".to_string(),
            apy: "12.4%".to_string(),
            yield_logic: "Harvest revenue distributed proportionally to token holders"
                .to_string(),
            bg_color: "bg-bright-green".to_string(),
            status_color: "bg-green-500".to_string(),
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Coming Soon".parse::<CropStatus>(), Ok(CropStatus::ComingSoon));
        assert_eq!("Paused".parse::<CropStatus>(), Ok(CropStatus::Paused));
        assert!("active".parse::<CropStatus>().is_err());
        assert!("ComingSoon".parse::<CropStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_display_names() {
        let json = serde_json::to_string(&CropStatus::ComingSoon).unwrap();
        assert_eq!(json, "\"Coming Soon\"");

        let parsed: CropStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, CropStatus::Completed);
        assert!(serde_json::from_str::<CropStatus>("\"Harvesting\"").is_err());
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        let mut req = potato_request();
        req.normalize();

        assert_eq!(req.name, "$POTATO");
        assert_eq!(req.symbol, "SPOTATO");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_yield_logic_bounds() {
        let mut req = potato_request();
        req.yield_logic = "too short".to_string();
        assert!(req.validate().is_err());

        req.yield_logic = "x".repeat(501);
        assert!(req.validate().is_err());

        req.yield_logic = "x".repeat(500);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_required_field_rejected_after_normalize() {
        let mut req = potato_request();
        req.apy = "   ".to_string();
        req.normalize();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("apy"));
    }

    #[test]
    fn test_new_crop_defaults_to_coming_soon_and_inactive() {
        let mut req = potato_request();
        req.normalize();
        let crop = Crop::from_request(req);

        assert_eq!(crop.status, CropStatus::ComingSoon);
        assert!(!crop.is_active);
    }

    #[test]
    fn test_is_active_follows_status() {
        let mut req = potato_request();
        req.status = Some(CropStatus::Active);
        let mut crop = Crop::from_request(req);
        assert!(crop.is_active);

        for status in CropStatus::ALL {
            crop.status = status;
            crop.sync_derived_fields();
            assert_eq!(crop.is_active, status == CropStatus::Active);
        }
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let mut crop = Crop::from_request(potato_request());
        let mut update = UpdateCropRequest {
            symbol: Some("spud ".to_string()),
            tvl: Some(" $150,000 ".to_string()),
            status: Some(CropStatus::Paused),
            ..Default::default()
        };
        update.normalize();
        assert!(update.validate().is_ok());
        update.apply_to(&mut crop);

        assert_eq!(crop.symbol, "SPUD");
        assert_eq!(crop.tvl, "$150,000");
        assert_eq!(crop.status, CropStatus::Paused);
        assert_eq!(crop.apy, "12.4%");
    }

    #[test]
    fn test_is_active_in_body_is_ignored() {
        let body = serde_json::json!({
            "name": "$BEET",
            "symbol": "sbeet",
            "crop": "Sugar Beets",
            "image": "/assets/beet.jpg",
            "landArea": "40 acres",
            "yieldSeason": "Oct 2024",
            "status": "Paused",
            "tvl": "TBD",
            "apy": "9%",
            "yieldLogic": "Sugar sales split between holders",
            "bgColor": "bg-peach",
            "statusColor": "bg-yellow-500",
            "isActive": true
        });
        let req: CreateCropRequest = serde_json::from_value(body).unwrap();
        let crop = Crop::from_request(req);
        assert!(!crop.is_active);
    }
}
