use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{BookMetadata, BookMetadataProvider};

const BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Google Books plafonne maxResults à 40
const MAX_RESULTS_CAP: u32 = 40;

// Structures de désérialisation de la réponse Google Books
#[derive(Debug, Deserialize)]
struct VolumeList {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    description: Option<String>,
    page_count: Option<i32>,
    published_date: Option<String>,
    categories: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

pub struct GoogleBooksApi {
    client: reqwest::Client,
}

impl GoogleBooksApi {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// Normalise un volume Google Books vers la fiche interne
    fn parse_volume(volume: Volume) -> BookMetadata {
        let info = volume.volume_info;

        let authors = match info.authors {
            Some(list) if !list.is_empty() => list.join(", "),
            _ => "Unknown Author".to_string(),
        };

        let categories = info
            .categories
            .map(|list| list.join(", "))
            .unwrap_or_default();

        // Meilleure qualité d'image quand le lien le permet
        let cover_url = info
            .image_links
            .and_then(|links| links.thumbnail)
            .map(|url| url.replace("zoom=1", "zoom=2").replace("http://", "https://"))
            .unwrap_or_default();

        BookMetadata {
            google_books_id: volume.id,
            title: info.title.unwrap_or_else(|| "Unknown Title".to_string()),
            authors,
            description: info
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            cover_url,
            page_count: info.page_count.unwrap_or(0),
            published_date: info.published_date.unwrap_or_default(),
            categories,
        }
    }
}

#[async_trait]
impl BookMetadataProvider for GoogleBooksApi {
    async fn search(&self, query: &str, max_results: u32) -> Vec<BookMetadata> {
        let max_results = max_results.min(MAX_RESULTS_CAP).to_string();

        let response = match self
            .client
            .get(BASE_URL)
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                eprintln!("Error searching books: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            eprintln!("Error searching books: HTTP {}", response.status());
            return Vec::new();
        }

        match response.json::<VolumeList>().await {
            Ok(list) => list
                .items
                .unwrap_or_default()
                .into_iter()
                .map(Self::parse_volume)
                .collect(),
            Err(e) => {
                eprintln!("Error searching books: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_by_id(&self, external_id: &str) -> Option<BookMetadata> {
        let url = format!("{}/{}", BASE_URL, external_id);

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                eprintln!("Error getting book details: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            eprintln!("Error getting book details: HTTP {}", response.status());
            return None;
        }

        match response.json::<Volume>().await {
            Ok(volume) => Some(Self::parse_volume(volume)),
            Err(e) => {
                eprintln!("Error getting book details: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume_full() {
        let volume: Volume = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "volumeInfo": {
                "title": "Le Comte de Monte-Cristo",
                "authors": ["Alexandre Dumas", "Auguste Maquet"],
                "description": "Un classique.",
                "pageCount": 1276,
                "publishedDate": "1844",
                "categories": ["Fiction", "Classics"],
                "imageLinks": {
                    "thumbnail": "http://books.google.com/cover?zoom=1&id=abc123"
                }
            }
        }))
        .unwrap();

        let book = GoogleBooksApi::parse_volume(volume);

        assert_eq!(book.google_books_id, "abc123");
        assert_eq!(book.authors, "Alexandre Dumas, Auguste Maquet");
        assert_eq!(book.categories, "Fiction, Classics");
        assert_eq!(book.page_count, 1276);
        // Couverture : https + zoom amélioré
        assert_eq!(book.cover_url, "https://books.google.com/cover?zoom=2&id=abc123");
    }

    #[test]
    fn test_parse_volume_defaults() {
        let volume: Volume = serde_json::from_value(serde_json::json!({
            "id": "xyz"
        }))
        .unwrap();

        let book = GoogleBooksApi::parse_volume(volume);

        assert_eq!(book.title, "Unknown Title");
        assert_eq!(book.authors, "Unknown Author");
        assert_eq!(book.description, "No description available");
        assert_eq!(book.cover_url, "");
        assert_eq!(book.page_count, 0);
        assert_eq!(book.categories, "");
    }

    #[test]
    fn test_parse_volume_empty_author_list() {
        let volume: Volume = serde_json::from_value(serde_json::json!({
            "id": "xyz",
            "volumeInfo": { "title": "Sans auteur", "authors": [] }
        }))
        .unwrap();

        let book = GoogleBooksApi::parse_volume(volume);
        assert_eq!(book.authors, "Unknown Author");
    }
}
