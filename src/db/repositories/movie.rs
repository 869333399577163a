use crate::domain::MessageId;
use crate::entities::{movies, prelude::*};
use crate::models::movie::Movie;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No movie stored for message {0}")]
    NotFound(MessageId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Repository for movie candidates keyed by their card message
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn to_active_model(movie: &Movie, message_id: MessageId) -> movies::ActiveModel {
        movies::ActiveModel {
            title: Set(Some(movie.title.clone())),
            year: Set(Some(movie.year.clone())),
            rated: Set(Some(movie.rated.clone())),
            released: Set(Some(movie.released.clone())),
            runtime: Set(Some(movie.runtime.clone())),
            genre: Set(Some(movie.genre.clone())),
            director: Set(Some(movie.director.clone())),
            writer: Set(Some(movie.writer.clone())),
            actors: Set(Some(movie.actors.clone())),
            plot: Set(Some(movie.plot.clone())),
            language: Set(Some(movie.language.clone())),
            country: Set(Some(movie.country.clone())),
            awards: Set(Some(movie.awards.clone())),
            poster: Set(Some(movie.poster.clone())),
            metascore: Set(Some(movie.metascore.clone())),
            imdb_rating: Set(Some(movie.imdb_rating.clone())),
            imdb_votes: Set(Some(movie.imdb_votes.clone())),
            imdb_id: Set(Some(movie.imdb_id.clone())),
            kind: Set(Some(movie.kind.clone())),
            dvd: Set(Some(movie.dvd.clone())),
            box_office: Set(Some(movie.box_office.clone())),
            production: Set(Some(movie.production.clone())),
            website: Set(Some(movie.website.clone())),
            response: Set(Some(movie.response.clone())),
            error: Set(Some(movie.error.clone())),
            message_id: Set(message_id.value()),
        }
    }

    /// Ratings have no column and come back empty. NULL cells read as "".
    fn map_model(m: movies::Model) -> Movie {
        Movie {
            title: m.title.unwrap_or_default(),
            year: m.year.unwrap_or_default(),
            rated: m.rated.unwrap_or_default(),
            released: m.released.unwrap_or_default(),
            runtime: m.runtime.unwrap_or_default(),
            genre: m.genre.unwrap_or_default(),
            director: m.director.unwrap_or_default(),
            writer: m.writer.unwrap_or_default(),
            actors: m.actors.unwrap_or_default(),
            plot: m.plot.unwrap_or_default(),
            language: m.language.unwrap_or_default(),
            country: m.country.unwrap_or_default(),
            awards: m.awards.unwrap_or_default(),
            poster: m.poster.unwrap_or_default(),
            ratings: Vec::new(),
            metascore: m.metascore.unwrap_or_default(),
            imdb_rating: m.imdb_rating.unwrap_or_default(),
            imdb_votes: m.imdb_votes.unwrap_or_default(),
            imdb_id: m.imdb_id.unwrap_or_default(),
            kind: m.kind.unwrap_or_default(),
            dvd: m.dvd.unwrap_or_default(),
            box_office: m.box_office.unwrap_or_default(),
            production: m.production.unwrap_or_default(),
            website: m.website.unwrap_or_default(),
            response: m.response.unwrap_or_default(),
            error: m.error.unwrap_or_default(),
        }
    }

    // ========================================================================
    // Movie Operations
    // ========================================================================

    /// Returns the key the row was stored under.
    pub async fn save(
        &self,
        movie: &Movie,
        message_id: MessageId,
    ) -> Result<MessageId, StoreError> {
        let res = Movies::insert(Self::to_active_model(movie, message_id))
            .exec(&self.conn)
            .await?;

        debug!(
            event = "movie_saved",
            message_id = %message_id,
            title = %movie.title,
            "Stored movie candidate"
        );
        Ok(MessageId::new(res.last_insert_id))
    }

    pub async fn get_by_message_id(&self, message_id: MessageId) -> Result<Movie, StoreError> {
        Movies::find()
            .filter(movies::Column::MessageId.eq(message_id.value()))
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .ok_or(StoreError::NotFound(message_id))
    }

    pub async fn delete_by_message_id(&self, message_id: MessageId) -> Result<u64, StoreError> {
        let result = Movies::delete_many()
            .filter(movies::Column::MessageId.eq(message_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = Movies::find().all(&self.conn).await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}
