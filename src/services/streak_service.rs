use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, Set, ActiveModelTrait};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::HashSet;

use crate::models::dto::{CalendarCell, CellState, MonthRef, MonthViewResponse};
use crate::models::reading_streak::{self, Entity as ReadingStreak, Column as StreakColumn, ActiveModel as StreakActiveModel};
use crate::models::user_book::{self, Entity as UserBook};

pub struct StreakService;

impl StreakService {
    // ------------------------------------------------------------------
    // Opérations de persistance
    // Échec = false / liste vide + message de diagnostic, jamais d'erreur
    // structurée remontée à l'appelant
    // ------------------------------------------------------------------

    /// Persiste la position de lecture d'un user_book
    /// Aucune borne sur [0, total_pages] : la contrainte reste côté saisie
    pub async fn update_progress(db: &DatabaseConnection, user_book_id: i32, current_page: i32) -> bool {
        match UserBook::find_by_id(user_book_id).one(db).await {
            Ok(Some(model)) => {
                let mut active: user_book::ActiveModel = model.into();
                active.current_page = Set(current_page);
                match active.update(db).await {
                    Ok(_) => true,
                    Err(e) => {
                        eprintln!("Error updating progress: {}", e);
                        false
                    }
                }
            }
            Ok(None) => {
                eprintln!("Error updating progress: user_book {} not found", user_book_id);
                false
            }
            Err(e) => {
                eprintln!("Error updating progress: {}", e);
                false
            }
        }
    }

    /// Upsert ADDITIF du streak : une ligne par (user, date), pages_read
    /// CUMULE le delta entrant au lieu de l'écraser. Seul upsert additif du
    /// modèle — ne pas unifier avec l'upsert d'écrasement de user_books.
    pub async fn add_reading_streak(
        db: &DatabaseConnection,
        user_id: i32,
        date: NaiveDate,
        pages_read: i32,
    ) -> bool {
        let existing = ReadingStreak::find()
            .filter(StreakColumn::UserId.eq(user_id))
            .filter(StreakColumn::Date.eq(date))
            .one(db)
            .await;

        match existing {
            Ok(Some(model)) => {
                let total = model.pages_read + pages_read;
                let mut active: StreakActiveModel = model.into();
                active.pages_read = Set(total);
                match active.update(db).await {
                    Ok(_) => true,
                    Err(e) => {
                        eprintln!("Error adding reading streak: {}", e);
                        false
                    }
                }
            }
            Ok(None) => {
                let new = StreakActiveModel {
                    user_id: Set(user_id),
                    date: Set(date),
                    pages_read: Set(pages_read),
                    ..Default::default()
                };
                match new.insert(db).await {
                    Ok(_) => true,
                    Err(e) => {
                        eprintln!("Error adding reading streak: {}", e);
                        false
                    }
                }
            }
            Err(e) => {
                eprintln!("Error adding reading streak: {}", e);
                false
            }
        }
    }

    /// Vérifie si une date est déjà marquée comme jour de lecture
    pub async fn has_streak(db: &DatabaseConnection, user_id: i32, date: NaiveDate) -> bool {
        match ReadingStreak::find()
            .filter(StreakColumn::UserId.eq(user_id))
            .filter(StreakColumn::Date.eq(date))
            .one(db)
            .await
        {
            Ok(found) => found.is_some(),
            Err(e) => {
                eprintln!("Error getting streaks: {}", e);
                false
            }
        }
    }

    /// Récupère les jours de lecture d'un user pour un mois donné
    pub async fn get_reading_streaks(
        db: &DatabaseConnection,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Vec<reading_streak::Model> {
        let first_day = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(d) => d,
            None => return Vec::new(),
        };
        let last_day = first_day + Duration::days(Self::days_in_month(year, month) as i64 - 1);

        match ReadingStreak::find()
            .filter(StreakColumn::UserId.eq(user_id))
            .filter(StreakColumn::Date.gte(first_day))
            .filter(StreakColumn::Date.lte(last_day))
            .all(db)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Error getting streaks: {}", e);
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Dérivations pures (sans accès base)
    // ------------------------------------------------------------------

    /// Compte les jours consécutifs en remontant UN PAR UN depuis
    /// reference_date. La série doit inclure reference_date : sans
    /// enregistrement ce jour-là le streak vaut 0, peu importe la veille.
    pub fn calculate_current_streak(dates: &HashSet<NaiveDate>, reference_date: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut current = reference_date;

        while dates.contains(&current) {
            streak += 1;
            current = current - Duration::days(1);
        }

        streak
    }

    /// État d'affichage d'une case du calendrier (propriété dérivée)
    pub fn classify_day(date: NaiveDate, today: NaiveDate, streak_dates: &HashSet<NaiveDate>) -> CellState {
        let is_today = date == today;
        let has_streak = streak_dates.contains(&date);

        if is_today && has_streak {
            CellState::TodayStreak
        } else if is_today {
            CellState::Today
        } else if has_streak {
            CellState::Streak
        } else {
            CellState::Plain
        }
    }

    /// Construit la grille du mois : 7 colonnes, semaines commençant lundi,
    /// cases vides avant le 1er et après le dernier jour du mois
    pub fn month_grid(
        year: i32,
        month: u32,
        streak_dates: &HashSet<NaiveDate>,
        today: NaiveDate,
    ) -> Vec<Vec<CalendarCell>> {
        let first_day = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(d) => d,
            None => return Vec::new(),
        };

        let leading_blanks = first_day.weekday().num_days_from_monday();
        let total_days = Self::days_in_month(year, month);

        let mut cells: Vec<CalendarCell> = Vec::new();
        for _ in 0..leading_blanks {
            cells.push(CalendarCell { day: None, date: None, state: None });
        }
        for offset in 0..total_days {
            let date = first_day + Duration::days(offset as i64);
            cells.push(CalendarCell {
                day: Some(date.day()),
                date: Some(date),
                state: Some(Self::classify_day(date, today, streak_dates)),
            });
        }
        while cells.len() % 7 != 0 {
            cells.push(CalendarCell { day: None, date: None, state: None });
        }

        let mut weeks: Vec<Vec<CalendarCell>> = Vec::new();
        let mut week: Vec<CalendarCell> = Vec::new();
        for cell in cells {
            week.push(cell);
            if week.len() == 7 {
                weeks.push(week);
                week = Vec::new();
            }
        }

        weeks
    }

    pub fn days_in_month(year: i32, month: u32) -> u32 {
        let (next_year, next_month) = Self::next_month(year, month);
        match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
            Some(first_of_next) => (first_of_next - Duration::days(1)).day(),
            None => 0,
        }
    }

    /// Navigation : mois 12 + 1 = janvier de l'année suivante
    pub fn next_month(year: i32, month: u32) -> (i32, u32) {
        if month >= 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        }
    }

    /// Navigation : mois 1 - 1 = décembre de l'année précédente
    pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
        if month <= 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        }
    }

    /// Charge la vue calendrier d'un mois : grille + statistiques.
    /// Le streak courant est toujours calculé par rapport au vrai
    /// "aujourd'hui", jamais par rapport au mois affiché.
    /// None = année/mois invalides
    pub async fn load_month_view(
        db: &DatabaseConnection,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Option<MonthViewResponse> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;

        let streaks = Self::get_reading_streaks(db, user_id, year, month).await;
        let streak_dates: HashSet<NaiveDate> = streaks.iter().map(|s| s.date).collect();

        let today = Local::now().date_naive();
        let weeks = Self::month_grid(year, month, &streak_dates, today);
        let current_streak = Self::calculate_current_streak(&streak_dates, today);

        let (prev_year, prev_mon) = Self::prev_month(year, month);
        let (next_year, next_mon) = Self::next_month(year, month);

        Some(MonthViewResponse {
            year,
            month,
            month_label: first_day.format("%B %Y").to_string(),
            weeks,
            current_streak,
            total_days: streak_dates.len(),
            prev_month: MonthRef { year: prev_year, month: prev_mon },
            next_month: MonthRef { year: next_year, month: next_mon },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_streak_counts_consecutive_days_ending_today() {
        let dates: HashSet<NaiveDate> = [date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]
            .into_iter()
            .collect();

        assert_eq!(StreakService::calculate_current_streak(&dates, date(2024, 3, 3)), 3);
    }

    #[test]
    fn test_streak_is_zero_without_reference_date() {
        // La série doit inclure le jour de référence pour compter
        let dates: HashSet<NaiveDate> = [date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]
            .into_iter()
            .collect();

        assert_eq!(StreakService::calculate_current_streak(&dates, date(2024, 3, 4)), 0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let dates: HashSet<NaiveDate> = [date(2024, 3, 1), date(2024, 3, 3)].into_iter().collect();

        assert_eq!(StreakService::calculate_current_streak(&dates, date(2024, 3, 3)), 1);
    }

    #[test]
    fn test_streak_empty_set() {
        let dates = HashSet::new();
        assert_eq!(StreakService::calculate_current_streak(&dates, date(2024, 3, 3)), 0);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let dates: HashSet<NaiveDate> = [date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
            .into_iter()
            .collect();

        // 2024 est bissextile : 29 février présent
        assert_eq!(StreakService::calculate_current_streak(&dates, date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_month_grid_march_2024_layout() {
        let dates = HashSet::new();
        let weeks = StreakService::month_grid(2024, 3, &dates, date(2024, 5, 1));

        // 1er mars 2024 = vendredi : 4 cases vides, puis 31 jours = 35 cases
        assert_eq!(weeks.len(), 5);
        for week in &weeks {
            assert_eq!(week.len(), 7);
        }

        let cells: Vec<_> = weeks.iter().flatten().collect();
        assert_eq!(cells.len() % 7, 0);
        assert!(cells[0].day.is_none());
        assert!(cells[3].day.is_none());
        assert_eq!(cells[4].day, Some(1));
        assert_eq!(cells[34].day, Some(31));
    }

    #[test]
    fn test_month_grid_pads_trailing_blanks() {
        let dates = HashSet::new();
        // Février 2024 : 29 jours, commence un jeudi -> 3 + 29 = 32 cases,
        // complétées à 35
        let weeks = StreakService::month_grid(2024, 2, &dates, date(2024, 5, 1));
        let cells: Vec<_> = weeks.iter().flatten().collect();

        assert_eq!(cells.len(), 35);
        assert!(cells[32].day.is_none());
        assert!(cells[34].day.is_none());
    }

    #[test]
    fn test_month_grid_streak_cell_count() {
        let dates: HashSet<NaiveDate> = [date(2024, 3, 5), date(2024, 3, 12), date(2024, 3, 20)]
            .into_iter()
            .collect();
        // "Aujourd'hui" hors du mois affiché : aucune case today
        let weeks = StreakService::month_grid(2024, 3, &dates, date(2024, 5, 1));

        let streak_cells = weeks
            .iter()
            .flatten()
            .filter(|c| c.state == Some(CellState::Streak))
            .count();
        assert_eq!(streak_cells, 3);
    }

    #[test]
    fn test_month_grid_classification() {
        let dates: HashSet<NaiveDate> = [date(2024, 3, 10), date(2024, 3, 15)].into_iter().collect();
        let today = date(2024, 3, 15);
        let weeks = StreakService::month_grid(2024, 3, &dates, today);

        let state_of = |day: u32| {
            weeks
                .iter()
                .flatten()
                .find(|c| c.day == Some(day))
                .and_then(|c| c.state)
        };

        assert_eq!(state_of(15), Some(CellState::TodayStreak));
        assert_eq!(state_of(10), Some(CellState::Streak));
        assert_eq!(state_of(16), Some(CellState::Plain));
    }

    #[test]
    fn test_classify_today_without_streak() {
        let dates = HashSet::new();
        let today = date(2024, 3, 15);
        assert_eq!(StreakService::classify_day(today, today, &dates), CellState::Today);
    }

    #[test]
    fn test_month_paging_rollover() {
        assert_eq!(StreakService::next_month(2024, 12), (2025, 1));
        assert_eq!(StreakService::prev_month(2024, 1), (2023, 12));
        assert_eq!(StreakService::next_month(2024, 5), (2024, 6));
        assert_eq!(StreakService::prev_month(2024, 5), (2024, 4));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(StreakService::days_in_month(2024, 2), 29);
        assert_eq!(StreakService::days_in_month(2023, 2), 28);
        assert_eq!(StreakService::days_in_month(2024, 4), 30);
        assert_eq!(StreakService::days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_month_grid_invalid_month() {
        let dates = HashSet::new();
        assert!(StreakService::month_grid(2024, 13, &dates, date(2024, 5, 1)).is_empty());
    }
}
