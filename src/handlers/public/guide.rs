use crate::guide::{GuideCard, GUIDE_CARDS};
use crate::middleware::ApiResponse;

/// GET /api/guide-cards - Static campus guide cards
pub async fn list() -> ApiResponse<&'static [GuideCard]> {
    ApiResponse::success(GUIDE_CARDS)
}
