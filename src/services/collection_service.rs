use sea_orm::*;
use chrono::{NaiveDateTime, Utc};

use crate::models::{book, user_book};
use crate::models::user_book::STATUS_FINISHED;
use crate::services::metadata::provider::BookMetadata;

pub struct CollectionService;

impl CollectionService {
    /// Retrouve un livre par son google_books_id, sinon insère les
    /// métadonnées. Les doublons ne sont évités que quand l'identifiant
    /// externe correspond exactement ; sans identifiant on insère toujours.
    pub async fn find_or_create_book(
        db: &DatabaseConnection,
        data: &BookMetadata,
    ) -> Result<i32, DbErr> {
        if !data.google_books_id.is_empty() {
            let existing = book::Entity::find()
                .filter(book::Column::GoogleBooksId.eq(&data.google_books_id))
                .one(db)
                .await?;

            if let Some(found) = existing {
                return Ok(found.id);
            }
        }

        let google_books_id = if data.google_books_id.is_empty() {
            None
        } else {
            Some(data.google_books_id.clone())
        };

        let new_book = book::ActiveModel {
            google_books_id: Set(google_books_id),
            title: Set(data.title.clone()),
            authors: Set(Some(data.authors.clone())),
            description: Set(Some(data.description.clone())),
            cover_url: Set(Some(data.cover_url.clone())),
            page_count: Set(Some(data.page_count)),
            published_date: Set(Some(data.published_date.clone())),
            categories: Set(Some(data.categories.clone())),
            ..Default::default()
        };

        let inserted = new_book.insert(db).await?;
        Ok(inserted.id)
    }

    /// Upsert d'ÉCRASEMENT du triple (user, book, status) : ré-ajouter un
    /// statut déjà présent rafraîchit simplement date_added, sans créer de
    /// doublon. À ne pas confondre avec l'upsert additif des streaks.
    pub async fn add_user_book(
        db: &DatabaseConnection,
        user_id: i32,
        book_id: i32,
        status: &str,
        date_finished: Option<NaiveDateTime>,
    ) -> Result<i32, DbErr> {
        let now = Utc::now().naive_utc();

        let existing = user_book::Entity::find()
            .filter(user_book::Column::UserId.eq(user_id))
            .filter(user_book::Column::BookId.eq(book_id))
            .filter(user_book::Column::Status.eq(status))
            .one(db)
            .await?;

        match existing {
            Some(model) => {
                let id = model.id;
                let mut active: user_book::ActiveModel = model.into();
                active.date_added = Set(Some(now));
                if date_finished.is_some() {
                    active.date_finished = Set(date_finished);
                }
                active.update(db).await?;
                Ok(id)
            }
            None => {
                let new = user_book::ActiveModel {
                    user_id: Set(user_id),
                    book_id: Set(book_id),
                    status: Set(status.to_string()),
                    current_page: Set(0),
                    date_added: Set(Some(now)),
                    date_finished: Set(date_finished),
                    ..Default::default()
                };
                Ok(new.insert(db).await?.id)
            }
        }
    }

    /// Déplace un livre de la liste de lecture vers les livres terminés :
    /// suppression de la ligne courante puis upsert du statut "finished"
    /// avec la date de fin
    pub async fn mark_as_finished(
        db: &DatabaseConnection,
        current: user_book::Model,
    ) -> Result<i32, DbErr> {
        let user_id = current.user_id;
        let book_id = current.book_id;

        user_book::Entity::delete_by_id(current.id).exec(db).await?;

        let now = Utc::now().naive_utc();
        Self::add_user_book(db, user_id, book_id, STATUS_FINISHED, Some(now)).await
    }
}
