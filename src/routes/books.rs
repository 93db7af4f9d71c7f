use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::services::metadata::google_books::GoogleBooksApi;
use crate::services::metadata::provider::BookMetadataProvider;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub max_results: Option<u32>,
}

/// GET /books/search?q=...&max_results=20 - Recherche dans le catalogue
/// externe. Un échec de la recherche dégrade en liste vide ("no results"),
/// jamais en erreur.
#[get("/search")]
pub async fn search_books(query: web::Query<SearchQuery>) -> HttpResponse {
    if query.q.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Missing search query"
        }));
    }

    let max_results = query.max_results.unwrap_or(20);
    let api = GoogleBooksApi::new();
    let books = api.search(query.q.trim(), max_results).await;

    HttpResponse::Ok().json(books)
}

/// GET /books/{google_books_id} - Fiche détaillée d'un livre du catalogue
#[get("/{google_books_id}")]
pub async fn get_book(path: web::Path<String>) -> HttpResponse {
    let api = GoogleBooksApi::new();

    match api.get_by_id(&path.into_inner()).await {
        Some(book) => HttpResponse::Ok().json(book),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Book not found"
        })),
    }
}

pub fn books_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .service(search_books)
            .service(get_book)
    );
}
