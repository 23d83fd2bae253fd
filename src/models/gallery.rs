// src/models/gallery.rs
// DOCUMENTATION: Farm gallery images, filters and statistics DTOs
// PURPOSE: Field rules, enum vocabularies and the derived imageAlt text

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::ApiError;

/// Plot status shown on a gallery image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gallery_status")]
pub enum GalleryStatus {
    Acquired,
    Cultivation,
    Harvested,
    Planned,
    Maintenance,
}

impl GalleryStatus {
    pub const ALL: [GalleryStatus; 5] = [
        GalleryStatus::Acquired,
        GalleryStatus::Cultivation,
        GalleryStatus::Harvested,
        GalleryStatus::Planned,
        GalleryStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryStatus::Acquired => "Acquired",
            GalleryStatus::Cultivation => "Cultivation",
            GalleryStatus::Harvested => "Harvested",
            GalleryStatus::Planned => "Planned",
            GalleryStatus::Maintenance => "Maintenance",
        }
    }

    /// CSS classes used by the frontend badge
    pub fn color_class(&self) -> &'static str {
        match self {
            GalleryStatus::Acquired => "bg-orange text-orange-foreground",
            GalleryStatus::Cultivation => "bg-green-500 text-white",
            GalleryStatus::Harvested => "bg-blue-500 text-white",
            GalleryStatus::Planned => "bg-purple-500 text-white",
            GalleryStatus::Maintenance => "bg-yellow-500 text-white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gallery_region")]
pub enum GalleryRegion {
    Midwest,
    Northwest,
    Southwest,
    Southeast,
    Northeast,
}

impl GalleryRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryRegion::Midwest => "Midwest",
            GalleryRegion::Northwest => "Northwest",
            GalleryRegion::Southwest => "Southwest",
            GalleryRegion::Southeast => "Southeast",
            GalleryRegion::Northeast => "Northeast",
        }
    }
}

/// Kind of photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gallery_label")]
pub enum GalleryLabel {
    Before,
    Drone,
    Harvest,
    Progress,
    Equipment,
}

impl GalleryLabel {
    pub const ALL: [GalleryLabel; 5] = [
        GalleryLabel::Before,
        GalleryLabel::Drone,
        GalleryLabel::Harvest,
        GalleryLabel::Progress,
        GalleryLabel::Equipment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryLabel::Before => "Before",
            GalleryLabel::Drone => "Drone",
            GalleryLabel::Harvest => "Harvest",
            GalleryLabel::Progress => "Progress",
            GalleryLabel::Equipment => "Equipment",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            GalleryLabel::Before => "bg-muted text-muted-foreground",
            GalleryLabel::Drone => "bg-primary text-primary-foreground",
            GalleryLabel::Harvest => "bg-bright-green text-bright-green-foreground",
            GalleryLabel::Progress => "bg-blue-500 text-white",
            GalleryLabel::Equipment => "bg-gray-500 text-white",
        }
    }
}

/// Represents a complete gallery image record from the database
/// DOCUMENTATION: Maps to the `gallery_images` table
/// `is_active = false` means soft deleted: hidden from listings, still readable by id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub plot_name: String,

    /// Several images may share a plot
    pub plot_id: i32,

    pub status: GalleryStatus,

    /// Free text, not a reference to a crop token
    pub crop: String,

    pub region: GalleryRegion,
    pub label: GalleryLabel,
    pub caption: String,

    /// When the photo was taken
    pub date: DateTime<Utc>,

    /// URL or asset path
    pub image: String,

    /// Never empty once persisted
    pub image_alt: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GalleryImage {
    /// Build a new, not yet persisted record from a validated request
    pub fn from_request(req: CreateGalleryImageRequest) -> Self {
        let now = Utc::now();
        let mut image = GalleryImage {
            id: Uuid::new_v4(),
            plot_name: req.plot_name,
            plot_id: req.plot_id,
            status: req.status,
            crop: req.crop,
            region: req.region,
            label: req.label,
            caption: req.caption,
            date: req.date,
            image: req.image,
            image_alt: req.image_alt.unwrap_or_default(),
            is_active: req.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        image.fill_derived_fields();
        image
    }

    /// Alt text used when none was supplied
    pub fn default_image_alt(&self) -> String {
        format!(
            "{} photo of {} - {} in {}",
            self.label.as_str(),
            self.plot_name,
            self.crop,
            self.region.as_str()
        )
    }

    /// Synthesize `image_alt` when absent; a supplied value is kept verbatim
    /// Called by the repository immediately before every write
    pub fn fill_derived_fields(&mut self) {
        if self.image_alt.trim().is_empty() {
            self.image_alt = self.default_image_alt();
        }
    }

    pub fn to_response(&self) -> GalleryImageResponse {
        GalleryImageResponse {
            image: self.clone(),
            status_color: self.status.color_class(),
            label_color: self.label.color_class(),
        }
    }
}

/// Gallery image as returned by the API, with badge classes attached
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageResponse {
    #[serde(flatten)]
    pub image: GalleryImage,
    pub status_color: &'static str,
    pub label_color: &'static str,
}

/// Request DTO for creating a gallery image
/// DOCUMENTATION: Body of POST /api/gallery
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImageRequest {
    #[validate(length(min = 2, max = 100, message = "Plot name must be between 2 and 100 characters"))]
    pub plot_name: String,

    #[validate(range(min = 1, message = "Plot ID must be a positive number"))]
    pub plot_id: i32,

    pub status: GalleryStatus,

    #[validate(length(min = 2, max = 50, message = "Crop name must be between 2 and 50 characters"))]
    pub crop: String,

    pub region: GalleryRegion,
    pub label: GalleryLabel,

    #[validate(length(min = 10, max = 500, message = "Caption must be between 10 and 500 characters"))]
    pub caption: String,

    /// RFC 3339 timestamp or plain `YYYY-MM-DD`
    #[serde(deserialize_with = "deserialize_date")]
    #[validate(custom = "validate_not_future")]
    pub date: DateTime<Utc>,

    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image: String,

    #[validate(length(max = 200, message = "Image alt text cannot exceed 200 characters"))]
    pub image_alt: Option<String>,

    pub is_active: Option<bool>,
}

impl CreateGalleryImageRequest {
    pub fn normalize(&mut self) {
        for field in [
            &mut self.plot_name,
            &mut self.crop,
            &mut self.caption,
            &mut self.image,
        ] {
            *field = field.trim().to_string();
        }
        self.image_alt = normalize_alt(self.image_alt.take());
    }
}

/// Request DTO for updating a gallery image
/// DOCUMENTATION: Body of PUT /api/gallery/{id}; provided fields are merged
/// A blank `imageAlt` counts as absent, so existing alt text is kept; it
/// cannot be cleared back to the generated alt through an update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryImageRequest {
    #[validate(length(min = 2, max = 100, message = "Plot name must be between 2 and 100 characters"))]
    pub plot_name: Option<String>,

    #[validate(range(min = 1, message = "Plot ID must be a positive number"))]
    pub plot_id: Option<i32>,

    pub status: Option<GalleryStatus>,

    #[validate(length(min = 2, max = 50, message = "Crop name must be between 2 and 50 characters"))]
    pub crop: Option<String>,

    pub region: Option<GalleryRegion>,
    pub label: Option<GalleryLabel>,

    #[validate(length(min = 10, max = 500, message = "Caption must be between 10 and 500 characters"))]
    pub caption: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[validate(custom = "validate_not_future")]
    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "Image URL cannot be empty"))]
    pub image: Option<String>,

    #[validate(length(max = 200, message = "Image alt text cannot exceed 200 characters"))]
    pub image_alt: Option<String>,

    pub is_active: Option<bool>,
}

impl UpdateGalleryImageRequest {
    pub fn normalize(&mut self) {
        for field in [
            &mut self.plot_name,
            &mut self.crop,
            &mut self.caption,
            &mut self.image,
        ]
        .into_iter()
        .flatten()
        {
            *field = field.trim().to_string();
        }
        self.image_alt = normalize_alt(self.image_alt.take());
    }

    /// Merge provided fields into an existing record
    pub fn apply_to(self, image: &mut GalleryImage) {
        if let Some(plot_name) = self.plot_name {
            image.plot_name = plot_name;
        }
        if let Some(plot_id) = self.plot_id {
            image.plot_id = plot_id;
        }
        if let Some(status) = self.status {
            image.status = status;
        }
        if let Some(crop) = self.crop {
            image.crop = crop;
        }
        if let Some(region) = self.region {
            image.region = region;
        }
        if let Some(label) = self.label {
            image.label = label;
        }
        if let Some(caption) = self.caption {
            image.caption = caption;
        }
        if let Some(date) = self.date {
            image.date = date;
        }
        if let Some(url) = self.image {
            image.image = url;
        }
        if let Some(image_alt) = self.image_alt {
            image.image_alt = image_alt;
        }
        if let Some(is_active) = self.is_active {
            image.is_active = is_active;
        }
    }
}

/// Query string of GET /api/gallery/filter
/// DOCUMENTATION: Every value is optional; the literal "all" disables a filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFilterQuery {
    /// Case-insensitive substring of the crop name
    pub crop: Option<String>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub label: Option<String>,
    pub plot_id: Option<String>,
}

impl GalleryFilterQuery {
    pub fn crop(&self) -> Option<&str> {
        active_filter(&self.crop)
    }

    pub fn status(&self) -> Option<&str> {
        active_filter(&self.status)
    }

    pub fn region(&self) -> Option<&str> {
        active_filter(&self.region)
    }

    pub fn label(&self) -> Option<&str> {
        active_filter(&self.label)
    }

    pub fn plot_id(&self) -> Result<Option<i32>, ApiError> {
        active_filter(&self.plot_id)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| ApiError::InvalidInput(format!("plotId must be an integer, got '{}'", raw)))
            })
            .transpose()
    }

    /// Resolve the raw query into the typed filter the repository runs
    pub fn to_filter(&self) -> Result<GalleryFilter, ApiError> {
        Ok(GalleryFilter {
            plot_id: self.plot_id()?,
            crop: self.crop().map(str::to_string),
            status: self.status().map(str::to_string),
            region: self.region().map(str::to_string),
            label: self.label().map(str::to_string),
        })
    }
}

/// Gallery filter with "all"/empty values removed and plotId parsed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryFilter {
    pub crop: Option<String>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub label: Option<String>,
    pub plot_id: Option<i32>,
}

fn active_filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "all")
}

/// Distinct values for the gallery filter UI
#[derive(Debug, Serialize)]
pub struct GalleryFilterOptions {
    pub crops: Vec<String>,
    pub regions: Vec<String>,
    pub statuses: Vec<&'static str>,
    pub labels: Vec<&'static str>,
}

/// One group of an aggregate count
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CountBucket {
    #[serde(rename = "_id")]
    pub value: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryBreakdown {
    pub by_status: Vec<CountBucket>,
    pub by_region: Vec<CountBucket>,
    pub by_label: Vec<CountBucket>,
}

/// Body of GET /api/gallery/stats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryStats {
    pub total_images: i64,
    pub breakdown: GalleryBreakdown,
    pub recent_images: Vec<GalleryImageResponse>,
}

fn normalize_alt(value: Option<String>) -> Option<String> {
    value
        .map(|alt| alt.trim().to_string())
        .filter(|alt| !alt.is_empty())
}

fn validate_not_future(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date > Utc::now() {
        let mut error = ValidationError::new("future_date");
        error.message = Some("Date cannot be in the future".into());
        return Err(error);
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| format!("invalid date '{}', expected RFC 3339 or YYYY-MM-DD", raw))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(raw.trim()).map_err(serde::de::Error::custom)
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(raw.trim()).map_err(serde::de::Error::custom))
        .transpose()
}
