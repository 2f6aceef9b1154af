use serde::{Deserialize, Serialize};

use super::yes_no;
use crate::PredictionRequest;

pub const SHARE_TITLE: &str = "Sales Prediction";

/// Plain-text summary for the share sheet or clipboard.
pub fn share_text(prediction: u32, request: &PredictionRequest) -> String {
    format!(
        "Sales Prediction Result: {prediction} units\n\
         \n\
         Parameters:\n\
         Store ID: {}\n\
         SKU ID: {}\n\
         Total Price: ${}\n\
         Base Price: ${}\n\
         Featured: {}\n\
         Display: {}",
        request.store_id,
        request.sku_id,
        request.total_price,
        request.base_price,
        yes_no(request.is_featured_sku),
        yes_no(request.is_display_sku),
    )
}

/// Payload for the Web Share API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn new(prediction: u32, request: &PredictionRequest, url: impl Into<String>) -> Self {
        SharePayload {
            title: SHARE_TITLE.to_string(),
            text: share_text(prediction, request),
            url: url.into(),
        }
    }
}
