//DTOs pour les requêtes et réponses structurées
use serde::{Serialize, Deserialize};
use chrono::{NaiveDate, NaiveDateTime};
use validator::Validate;

use crate::services::metadata::provider::BookMetadata;

// Une ligne de collection = le livre + les infos user_books associées
// (équivalent du JOIN books/user_books)
#[derive(Debug, Serialize)]
pub struct CollectionBookResponse {
    pub user_book_id: i32,
    pub book_id: i32,
    pub google_books_id: Option<String>,
    pub title: String,
    pub authors: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub page_count: Option<i32>,
    pub published_date: Option<String>,
    pub categories: Option<String>,
    pub status: String,
    pub current_page: i32,
    pub date_added: Option<NaiveDateTime>,
    pub date_finished: Option<NaiveDateTime>,
}

// Ajout à une liste : soit un book_id déjà connu (ex: depuis les favoris),
// soit les métadonnées complètes venant de la recherche
#[derive(Debug, Deserialize)]
pub struct AddToCollectionRequest {
    pub book_id: Option<i32>,
    pub book: Option<BookMetadata>,
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(range(min = 0))]
    pub current_page: i32,
}

#[derive(Debug, Serialize)]
pub struct ProgressUpdateResponse {
    pub success: bool,
    pub current_page: i32,
    // La position de lecture est considérée comme mise à jour même si
    // l'enregistrement du streak échoue ensuite (deux écritures séparées)
    pub streak_recorded: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub review_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleStreakRequest {
    pub date: NaiveDate,
}

// État d'affichage d'une case du calendrier (propriété dérivée, jamais stockée)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    TodayStreak,
    Today,
    Streak,
    Plain,
}

// Case du calendrier : day = None pour les cases vides de début/fin de mois
#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub state: Option<CellState>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct MonthViewResponse {
    pub year: i32,
    pub month: u32,
    pub month_label: String, // ex: "March 2024"
    pub weeks: Vec<Vec<CalendarCell>>,
    pub current_streak: u32,
    pub total_days: usize, // jours de lecture dans le mois affiché
    pub prev_month: MonthRef,
    pub next_month: MonthRef,
}
