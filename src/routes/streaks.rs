use actix_web::{get, post, web, HttpResponse};
use chrono::{Datelike, Local};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::middleware::AuthUser;
use crate::models::dto::ToggleStreakRequest;
use crate::services::streak_service::StreakService;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /streaks/calendar?year=2024&month=3 - Vue calendrier d'un mois
/// (grille lundi-premier + statistiques). Sans paramètres : le mois courant.
/// La navigation se fait en rappelant cette route avec prev_month/next_month.
#[get("/calendar")]
pub async fn get_calendar(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    query: web::Query<CalendarQuery>,
) -> HttpResponse {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    match StreakService::load_month_view(db.get_ref(), auth_user.user_id, year, month).await {
        Some(view) => HttpResponse::Ok().json(view),
        None => HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid month: {}-{}", year, month)
        })),
    }
}

/// POST /streaks/toggle - Marque une date comme jour de lecture.
/// Historique en append-only : re-marquer une date déjà marquée est un no-op,
/// dé-marquer n'est pas supporté, les dates futures sont refusées.
#[post("/toggle")]
pub async fn toggle_streak(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    body: web::Json<ToggleStreakRequest>,
) -> HttpResponse {
    let date = body.date;
    let today = Local::now().date_naive();

    if date > today {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Future dates cannot be marked as reading days"
        }));
    }

    // Déjà marquée : on n'y touche plus
    if StreakService::has_streak(db.get_ref(), auth_user.user_id, date).await {
        return HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "already_recorded": true
        }));
    }

    // Un clic calendrier marque le jour sans pages comptabilisées
    if StreakService::add_reading_streak(db.get_ref(), auth_user.user_id, date, 0).await {
        HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "already_recorded": false
        }))
    } else {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to record reading day"
        }))
    }
}

pub fn streaks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/streaks")
            .service(get_calendar)
            .service(toggle_streak)
    );
}
