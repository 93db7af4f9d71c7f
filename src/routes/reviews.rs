use actix_web::{delete, get, put, web, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, Set, ActiveModelTrait};
use chrono::Utc;
use validator::Validate;

use crate::middleware::AuthUser;
use crate::models::dto::ReviewRequest;
use crate::models::review::{self, Entity as Reviews, Column as ReviewColumn, ActiveModel as ReviewActiveModel};

/// GET /reviews/{book_id} - L'avis de l'utilisateur sur un livre
#[get("/{book_id}")]
pub async fn get_review(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> HttpResponse {
    let review = Reviews::find()
        .filter(ReviewColumn::UserId.eq(auth_user.user_id))
        .filter(ReviewColumn::BookId.eq(path.into_inner()))
        .one(db.get_ref())
        .await;

    match review {
        Ok(Some(review)) => HttpResponse::Ok().json(review),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "No review for this book"
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {}", e)
        })),
    }
}

/// PUT /reviews/{book_id} - Crée ou remplace l'avis (un seul par user et par
/// livre) : sauvegarder à nouveau écrase la note et le texte et rafraîchit
/// updated_at
#[put("/{book_id}")]
pub async fn save_review(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<ReviewRequest>,
) -> HttpResponse {
    // 1. Valider la note (1 à 5)
    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(errors);
    }

    let book_id = path.into_inner();
    let now = Utc::now().naive_utc();

    // 2. Upsert d'écrasement
    let existing = Reviews::find()
        .filter(ReviewColumn::UserId.eq(auth_user.user_id))
        .filter(ReviewColumn::BookId.eq(book_id))
        .one(db.get_ref())
        .await;

    let result = match existing {
        Ok(Some(model)) => {
            let mut active: ReviewActiveModel = model.into();
            active.rating = Set(body.rating);
            active.review_text = Set(body.review_text.clone());
            active.updated_at = Set(Some(now));
            active.update(db.get_ref()).await
        }
        Ok(None) => {
            let new = ReviewActiveModel {
                user_id: Set(auth_user.user_id),
                book_id: Set(book_id),
                rating: Set(body.rating),
                review_text: Set(body.review_text.clone()),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
                ..Default::default()
            };
            new.insert(db.get_ref()).await
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
    };

    match result {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to save review: {}", e)
        })),
    }
}

/// DELETE /reviews/{book_id} - Supprime l'avis
#[delete("/{book_id}")]
pub async fn delete_review(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> HttpResponse {
    let result = review::Entity::delete_many()
        .filter(ReviewColumn::UserId.eq(auth_user.user_id))
        .filter(ReviewColumn::BookId.eq(path.into_inner()))
        .exec(db.get_ref())
        .await;

    match result {
        Ok(res) if res.rows_affected > 0 => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Ok(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "No review for this book"
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete review: {}", e)
        })),
    }
}

pub fn reviews_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .service(get_review)
            .service(save_review)
            .service(delete_review)
    );
}
