use async_trait::async_trait;
use serde::{Serialize, Deserialize};

/// Fiche livre normalisée, quelle que soit la forme renvoyée par le
/// catalogue externe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMetadata {
    pub google_books_id: String,
    pub title: String,
    pub authors: String, // "Auteur A, Auteur B"
    pub description: String,
    pub cover_url: String,
    pub page_count: i32,
    pub published_date: String,
    pub categories: String,
}

//trait = Interface
#[async_trait]
pub trait BookMetadataProvider {
    /// Recherche plein texte dans le catalogue externe.
    /// Les échecs (réseau, décodage) dégradent en liste vide, jamais en
    /// erreur : l'appelant affiche simplement "no results".
    async fn search(&self, query: &str, max_results: u32) -> Vec<BookMetadata>;

    /// Fiche détaillée par identifiant du catalogue externe
    async fn get_by_id(&self, external_id: &str) -> Option<BookMetadata>;
}
