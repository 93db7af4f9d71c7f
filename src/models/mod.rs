// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - users : Utilisateurs (auth + reset password)
//   - book : Catalogue de livres (métadonnées Google Books)
//   - user_book : Association user/livre avec statut de lecture
//   - review : Avis (note 1-5 + texte), un par (user, livre)
//   - reading_streak : Jours de lecture (un par user et par date)
//   - password_reset_tokens : Tokens de reset password (expire 1h)
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les relations entre tables sont définies dans chaque modèle
//   - Deux politiques d'upsert distinctes et voulues :
//       user_book/review = écrasement, reading_streak = additif
//
// ============================================================================

pub mod health;
pub mod users;
pub mod book;
pub mod user_book;
pub mod review;
pub mod reading_streak;
pub mod password_reset_tokens;
pub mod dto;
