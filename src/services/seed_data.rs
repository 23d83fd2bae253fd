// src/services/seed_data.rs
// DOCUMENTATION: Fixed records inserted by the seed endpoints and the seed binary
// PURPOSE: Keep the launch catalogue in one place, parsed through the request DTOs

use crate::errors::ApiError;
use crate::models::{CreateCropRequest, CreateGalleryImageRequest};
use serde_json::json;

/// The four launch crop tokens
pub fn initial_crops() -> Result<Vec<CreateCropRequest>, ApiError> {
    let crops = json!([
        {
            "name": "$POTATO",
            "symbol": "SPOTATO",
            "crop": "Premium Potatoes",
            "image": "/assets/potato-crop.jpg",
            "landArea": "247 acres",
            "yieldSeason": "Sep - Nov 2024",
            "status": "Active",
            "tvl": "$142,000",
            "apy": "12.4%",
            "yieldLogic": "Harvest revenue distributed proportionally to token holders",
            "bgColor": "bg-bright-green",
            "statusColor": "bg-green-500"
        },
        {
            "name": "$AVOCADO",
            "symbol": "SAVOCADO",
            "crop": "Organic Avocados",
            "image": "/assets/avocado-crop.jpg",
            "landArea": "89 acres",
            "yieldSeason": "Year-round",
            "status": "Active",
            "tvl": "$89,500",
            "apy": "15.2%",
            "yieldLogic": "Monthly harvest yields shared among all token holders",
            "bgColor": "bg-accent",
            "statusColor": "bg-green-500"
        },
        {
            "name": "$CORN",
            "symbol": "SCORN",
            "crop": "Sweet Corn",
            "image": "/assets/corn-crop.jpg",
            "landArea": "156 acres",
            "yieldSeason": "Aug - Oct 2024",
            "status": "Coming Soon",
            "tvl": "TBD",
            "apy": "Est. 11.8%",
            "yieldLogic": "Seasonal harvest profits distributed to holders quarterly",
            "bgColor": "bg-orange",
            "statusColor": "bg-yellow-500"
        },
        {
            "name": "$WHEAT",
            "symbol": "SWHEAT",
            "crop": "Golden Wheat",
            "image": "/assets/wheat-crop.jpg",
            "landArea": "312 acres",
            "yieldSeason": "Jun - Aug 2024",
            "status": "Coming Soon",
            "tvl": "TBD",
            "apy": "Est. 10.5%",
            "yieldLogic": "Annual wheat sales revenue shared proportionally with token holders",
            "bgColor": "bg-peach",
            "statusColor": "bg-yellow-500"
        }
    ]);

    serde_json::from_value(crops).map_err(|e| {
        log::error!("Invalid crop seed data: {}", e);
        ApiError::InternalError
    })
}

/// Six photos across plots 1-6
pub fn initial_gallery_images() -> Result<Vec<CreateGalleryImageRequest>, ApiError> {
    let images = json!([
        {
            "plotName": "Green Valley Farm",
            "plotId": 1,
            "status": "Cultivation",
            "crop": "Potatoes",
            "region": "Midwest",
            "label": "Drone",
            "caption": "Aerial view of our 247-acre potato cultivation showing healthy crop growth during peak season.",
            "date": "2024-08-15",
            "image": "/assets/gallery/drone-1.jpg"
        },
        {
            "plotName": "Sunny Acres",
            "plotId": 2,
            "status": "Acquired",
            "crop": "Corn",
            "region": "Midwest",
            "label": "Before",
            "caption": "Freshly acquired 156-acre plot prepared for corn planting in the upcoming spring season.",
            "date": "2024-03-10",
            "image": "/assets/gallery/before-1.jpg"
        },
        {
            "plotName": "Mountain View Ranch",
            "plotId": 3,
            "status": "Harvested",
            "crop": "Wheat",
            "region": "Northwest",
            "label": "Harvest",
            "caption": "Successful wheat harvest from our 312-acre plot yielding exceptional quality grain.",
            "date": "2024-09-22",
            "image": "/assets/gallery/harvest-1.jpg"
        },
        {
            "plotName": "Riverside Farm",
            "plotId": 4,
            "status": "Cultivation",
            "crop": "Avocados",
            "region": "Southwest",
            "label": "Drone",
            "caption": "Drone footage of our organic avocado orchard showing mature trees ready for year-round harvest.",
            "date": "2024-07-30",
            "image": "/assets/gallery/drone-2.jpg"
        },
        {
            "plotName": "Prairie Fields",
            "plotId": 5,
            "status": "Acquired",
            "crop": "Soybeans",
            "region": "Southeast",
            "label": "Before",
            "caption": "Newly acquired 89-acre field being prepared for soybean cultivation with sustainable farming practices.",
            "date": "2024-04-05",
            "image": "/assets/gallery/before-2.jpg"
        },
        {
            "plotName": "Golden Plains",
            "plotId": 6,
            "status": "Harvested",
            "crop": "Corn",
            "region": "Midwest",
            "label": "Harvest",
            "caption": "Corn harvest season in full swing with high-quality grain being collected and processed.",
            "date": "2024-10-12",
            "image": "/assets/gallery/harvest-2.jpg"
        }
    ]);

    serde_json::from_value(images).map_err(|e| {
        log::error!("Invalid gallery seed data: {}", e);
        ApiError::InternalError
    })
}
