use actix_web::HttpResponse;

use crate::models::focus_area;

/// GET /api/v1/focus-areas - The static 10-entry taxonomy catalog.
pub async fn list() -> HttpResponse {
    HttpResponse::Ok().json(focus_area::all_focus_areas())
}
