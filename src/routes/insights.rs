use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::core::InsightEngine;
use crate::error::InsightError;
use crate::models::{
    ApiResponse, EnergyTrendRequest, ErrorResponse, GuestListRequest, HealthResponse,
    MatchRankRequest,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: InsightEngine,
}

/// Configure all insight routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/insights", web::post().to(full_report))
        .route("/insights/engagement", web::post().to(social_engagement))
        .route("/insights/energy-trend", web::post().to(energy_trend))
        .route("/insights/networking", web::post().to(networking))
        .route("/insights/pairings", web::post().to(top_pairings))
        .route("/insights/pairings/greedy", web::post().to(guest_pairings))
        .route("/insights/matching", web::post().to(guest_matching))
        .route("/insights/matches", web::post().to(rank_matches))
        .route("/insights/emotions", web::post().to(emotions))
        .route("/insights/sentiment", web::post().to(sentiment));
}

fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

fn validation_failed(endpoint: &str, errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed for {} request: field_errors={:?}", endpoint, errors);
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}

fn insight_error(err: InsightError) -> HttpResponse {
    match &err {
        InsightError::InsufficientGuests { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new("Insufficient guests", err.to_string(), 400),
        ),
        InsightError::GuestNotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Guest not found",
            err.to_string(),
            404,
        )),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full insight report
///
/// POST /api/v1/insights
///
/// Request body:
/// ```json
/// {
///   "guests": [{ "id": "g1", "name": "Ana", "interests": ["AI"] }]
/// }
/// ```
async fn full_report(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("insights", errors);
    }

    tracing::info!("Generating insight report for {} guests", req.guests.len());

    ok(state.engine.generate_insights(&req.guests))
}

async fn social_engagement(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("engagement", errors);
    }

    tracing::info!("Scoring social engagement for {} guests", req.guests.len());

    ok(state.engine.social_engagement(&req.guests))
}

/// Group energy trend
///
/// POST /api/v1/insights/energy-trend
///
/// The caller keeps the returned `current` value and sends it back as
/// `previousEnergy` on the next call.
async fn energy_trend(
    state: web::Data<AppState>,
    req: web::Json<EnergyTrendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("energy-trend", errors);
    }

    let update = state.engine.energy_trend(&req.guests, req.previous_energy);

    tracing::info!(
        "Energy trend for {} guests: {:?} (previous={:?}, current={})",
        req.guests.len(),
        update.trend,
        update.previous,
        update.current
    );

    ok(update)
}

async fn networking(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("networking", errors);
    }

    tracing::info!("Building networking groups for {} guests", req.guests.len());

    ok(state.engine.networking(&req.guests))
}

async fn top_pairings(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("pairings", errors);
    }

    tracing::info!("Ranking pairings for {} guests", req.guests.len());

    ok(state.engine.top_pairings(&req.guests))
}

async fn guest_pairings(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("pairings/greedy", errors);
    }

    tracing::info!("Global greedy pairing for {} guests", req.guests.len());

    match state.engine.guest_pairings(&req.guests) {
        Ok(pairs) => ok(pairs),
        Err(e) => insight_error(e),
    }
}

async fn guest_matching(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("matching", errors);
    }

    tracing::info!("Sequential matching for {} guests", req.guests.len());

    match state.engine.guest_matching(&req.guests) {
        Ok(pairs) => ok(pairs),
        Err(e) => insight_error(e),
    }
}

/// Ranked matches for one guest
///
/// POST /api/v1/insights/matches
///
/// Request body:
/// ```json
/// {
///   "targetId": "g1",
///   "guests": [...],
///   "limit": 10
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("matches", errors);
    }

    tracing::info!(
        "Ranking matches for guest {} among {} guests, limit: {}",
        req.target_id,
        req.guests.len(),
        req.limit
    );

    match state.engine.rank_matches(&req.target_id, &req.guests, req.limit) {
        Ok(matches) => ok(matches),
        Err(e) => {
            tracing::info!("Match ranking for {} failed: {}", req.target_id, e);
            insight_error(e)
        }
    }
}

async fn emotions(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("emotions", errors);
    }

    tracing::info!("Inferring emotional states for {} guests", req.guests.len());

    ok(state.engine.emotions(&req.guests))
}

async fn sentiment(
    state: web::Data<AppState>,
    req: web::Json<GuestListRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed("sentiment", errors);
    }

    tracing::info!("Analysing feedback sentiment for {} guests", req.guests.len());

    ok(state.engine.sentiment(&req.guests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_insight_error_status_codes() {
        let resp = insight_error(InsightError::InsufficientGuests { required: 2, found: 0 });
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = insight_error(InsightError::GuestNotFound("g9".to_string()));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["status_code"], 404);
    }
}
