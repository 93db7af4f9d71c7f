use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryFilter, ColumnTrait, QueryOrder};
use chrono::Local;
use validator::Validate;

use crate::middleware::AuthUser;
use crate::models::dto::{
    AddToCollectionRequest, CollectionBookResponse, ProgressUpdateResponse, UpdateProgressRequest,
};
use crate::models::{book, user_book};
use crate::models::user_book::{is_valid_status, STATUS_CURRENTLY_READING};
use crate::services::collection_service::CollectionService;
use crate::services::streak_service::StreakService;

fn build_row(ub: user_book::Model, b: book::Model) -> CollectionBookResponse {
    CollectionBookResponse {
        user_book_id: ub.id,
        book_id: b.id,
        google_books_id: b.google_books_id,
        title: b.title,
        authors: b.authors,
        description: b.description,
        cover_url: b.cover_url,
        page_count: b.page_count,
        published_date: b.published_date,
        categories: b.categories,
        status: ub.status,
        current_page: ub.current_page,
        date_added: ub.date_added,
        date_finished: ub.date_finished,
    }
}

/// Récupère un user_book en vérifiant qu'il appartient bien à l'utilisateur
/// authentifié (une ligne d'un autre compte est traitée comme absente)
async fn find_owned_user_book(
    db: &DatabaseConnection,
    user_book_id: i32,
    user_id: i32,
) -> Result<Option<user_book::Model>, DbErr> {
    let found = user_book::Entity::find_by_id(user_book_id).one(db).await?;
    Ok(found.filter(|ub| ub.user_id == user_id))
}

/// GET /collection/{status} - Les livres d'une liste (lecture en cours,
/// terminés, favoris), du plus récemment ajouté au plus ancien
#[get("/{status}")]
pub async fn get_collection(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<String>,
) -> HttpResponse {
    let status = path.into_inner();
    if !is_valid_status(&status) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid status: {}", status)
        }));
    }

    let rows = user_book::Entity::find()
        .filter(user_book::Column::UserId.eq(auth_user.user_id))
        .filter(user_book::Column::Status.eq(&status))
        .find_also_related(book::Entity)
        .order_by_desc(user_book::Column::DateAdded)
        .all(db.get_ref())
        .await;

    match rows {
        Ok(rows) => {
            let response: Vec<CollectionBookResponse> = rows
                .into_iter()
                .filter_map(|(ub, maybe_book)| maybe_book.map(|b| build_row(ub, b)))
                .collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(format!("Error: {}", e)),
    }
}

/// POST /collection - Ajoute un livre à une liste. Le livre vient soit de la
/// recherche (métadonnées complètes), soit d'une autre liste (book_id).
/// Ré-ajouter un statut déjà présent rafraîchit juste date_added.
#[post("")]
pub async fn add_to_collection(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    body: web::Json<AddToCollectionRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    if !is_valid_status(&body.status) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid status: {}", body.status)
        }));
    }

    // 1. Identifier le livre : id existant ou insertion des métadonnées
    let book_id = if let Some(id) = body.book_id {
        match book::Entity::find_by_id(id).one(db.get_ref()).await {
            Ok(Some(found)) => found.id,
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": "Book not found"
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {}", e)
                }));
            }
        }
    } else if let Some(ref payload) = body.book {
        match CollectionService::find_or_create_book(db.get_ref(), payload).await {
            Ok(id) => id,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to save book: {}", e)
                }));
            }
        }
    } else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Either book_id or book must be provided"
        }));
    };

    // 2. Upsert du triple (user, book, status)
    match CollectionService::add_user_book(db.get_ref(), auth_user.user_id, book_id, &body.status, None).await {
        Ok(user_book_id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "user_book_id": user_book_id,
            "book_id": book_id
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to add book to collection: {}", e)
        })),
    }
}

/// PUT /collection/{user_book_id}/progress - Enregistre une mise à jour de
/// progression : écrit la page courante, puis marque aujourd'hui comme jour
/// de lecture (delta fixe de 1, indépendant des pages réellement lues).
/// Deux écritures indépendantes, volontairement sans transaction : la
/// progression reste mise à jour même si l'écriture du streak échoue.
#[put("/{user_book_id}/progress")]
pub async fn update_progress(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UpdateProgressRequest>,
) -> HttpResponse {
    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest().json(errors);
    }

    let user_book = match find_owned_user_book(db.get_ref(), path.into_inner(), auth_user.user_id).await {
        Ok(Some(ub)) => ub,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Book not found in your collection"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
    };

    // 1. Écrire la position de lecture (pas de borne sur total_pages)
    if !StreakService::update_progress(db.get_ref(), user_book.id, body.current_page).await {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to update progress"
        }));
    }

    // 2. Marquer le jour de lecture (échec non bloquant)
    let today = Local::now().date_naive();
    let streak_recorded = StreakService::add_reading_streak(db.get_ref(), auth_user.user_id, today, 1).await;

    HttpResponse::Ok().json(ProgressUpdateResponse {
        success: true,
        current_page: body.current_page,
        streak_recorded,
    })
}

/// POST /collection/{user_book_id}/finish - Déplace un livre de la liste de
/// lecture vers les livres terminés
#[post("/{user_book_id}/finish")]
pub async fn mark_finished(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> HttpResponse {
    let user_book = match find_owned_user_book(db.get_ref(), path.into_inner(), auth_user.user_id).await {
        Ok(Some(ub)) => ub,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Book not found in your collection"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
    };

    if user_book.status != STATUS_CURRENTLY_READING {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Only a currently reading book can be marked as finished"
        }));
    }

    match CollectionService::mark_as_finished(db.get_ref(), user_book).await {
        Ok(user_book_id) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user_book_id": user_book_id
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mark book as finished: {}", e)
        })),
    }
}

/// DELETE /collection/{user_book_id} - Retire un livre d'une liste
#[delete("/{user_book_id}")]
pub async fn remove_from_collection(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> HttpResponse {
    let user_book = match find_owned_user_book(db.get_ref(), path.into_inner(), auth_user.user_id).await {
        Ok(Some(ub)) => ub,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Book not found in your collection"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
    };

    match user_book::Entity::delete_by_id(user_book.id).exec(db.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to remove book: {}", e)
        })),
    }
}

pub fn collection_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/collection")
            .service(add_to_collection)
            .service(update_progress)
            .service(mark_finished)
            .service(remove_from_collection)
            .service(get_collection)
    );
}
