use crate::domain::MessageId;
use crate::models::movie::Movie;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::movie::StoreError;

/// Handle to the movie database.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects and makes sure the `movies` table and its index exist.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & schema ensured (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    /// Returns the message id the record is keyed by.
    pub async fn save_movie(
        &self,
        movie: &Movie,
        message_id: MessageId,
    ) -> Result<MessageId, StoreError> {
        self.movie_repo().save(movie, message_id).await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no row carries `message_id`.
    pub async fn get_movie_by_message_id(&self, message_id: MessageId) -> Result<Movie, StoreError> {
        self.movie_repo().get_by_message_id(message_id).await
    }

    /// Deleting an id with no rows is not an error; the count is `0`.
    pub async fn delete_movie_by_message_id(&self, message_id: MessageId) -> Result<u64, StoreError> {
        self.movie_repo().delete_by_message_id(message_id).await
    }

    pub async fn list_backlog(&self) -> Result<Vec<Movie>, StoreError> {
        self.movie_repo().list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::Rating;

    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    fn inception() -> Movie {
        Movie {
            title: "Inception".to_string(),
            year: "2010".to_string(),
            rated: "PG-13".to_string(),
            released: "16 Jul 2010".to_string(),
            runtime: "148 min".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            director: "Christopher Nolan".to_string(),
            writer: "Christopher Nolan".to_string(),
            actors: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
            plot: "A thief who steals corporate secrets <through> dreams & more.".to_string(),
            language: "English, Japanese".to_string(),
            country: "United States".to_string(),
            awards: "Won 4 Oscars".to_string(),
            poster: "https://example.com/inception.jpg".to_string(),
            ratings: vec![Rating {
                source: "Internet Movie Database".to_string(),
                value: "8.8/10".to_string(),
            }],
            metascore: "74".to_string(),
            imdb_rating: "8.8".to_string(),
            imdb_votes: "2,500,000".to_string(),
            imdb_id: "tt1375666".to_string(),
            kind: "movie".to_string(),
            dvd: "07 Dec 2010".to_string(),
            box_office: "$292,587,330".to_string(),
            production: "N/A".to_string(),
            website: "N/A".to_string(),
            response: "True".to_string(),
            error: String::new(),
        }
    }

    #[tokio::test]
    async fn save_then_get_round_trips_every_column_but_ratings() {
        let store = memory_store().await;
        let movie = inception();

        let key = store.save_movie(&movie, MessageId::new(7)).await.unwrap();
        assert_eq!(key, MessageId::new(7));

        let loaded = store
            .get_movie_by_message_id(MessageId::new(7))
            .await
            .unwrap();

        let expected = Movie {
            ratings: Vec::new(),
            ..movie
        };
        assert_eq!(loaded, expected);
    }

    #[tokio::test]
    async fn get_unknown_message_is_not_found() {
        let store = memory_store().await;
        let err = store
            .get_movie_by_message_id(MessageId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == MessageId::new(99)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = memory_store().await;
        store
            .save_movie(&inception(), MessageId::new(3))
            .await
            .unwrap();

        let removed = store
            .delete_movie_by_message_id(MessageId::new(3))
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let err = store
            .get_movie_by_message_id(MessageId::new(3))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_delete_is_a_no_op() {
        let store = memory_store().await;
        store
            .save_movie(&inception(), MessageId::new(5))
            .await
            .unwrap();

        assert_eq!(
            store
                .delete_movie_by_message_id(MessageId::new(5))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .delete_movie_by_message_id(MessageId::new(5))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn delete_only_touches_matching_message() {
        let store = memory_store().await;
        store
            .save_movie(&inception(), MessageId::new(1))
            .await
            .unwrap();
        store
            .save_movie(&inception(), MessageId::new(2))
            .await
            .unwrap();

        store
            .delete_movie_by_message_id(MessageId::new(1))
            .await
            .unwrap();

        assert!(
            store
                .get_movie_by_message_id(MessageId::new(2))
                .await
                .is_ok()
        );
        assert_eq!(store.list_backlog().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn backlog_is_empty_on_fresh_store() {
        let store = memory_store().await;
        assert!(store.list_backlog().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_message_ids_are_accepted() {
        let store = memory_store().await;
        store
            .save_movie(&inception(), MessageId::new(4))
            .await
            .unwrap();
        store
            .save_movie(&inception(), MessageId::new(4))
            .await
            .unwrap();

        assert_eq!(store.list_backlog().await.unwrap().len(), 2);
        assert_eq!(
            store
                .delete_movie_by_message_id(MessageId::new(4))
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn opens_existing_table_with_nullable_columns_and_no_key() {
        let db_path = std::env::temp_dir().join(format!(
            "cinemanager-existing-{}.db",
            uuid::Uuid::new_v4()
        ));
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let existing = Database::connect(db_url.as_str()).await.unwrap();
        existing
            .execute_unprepared(
                "CREATE TABLE movies (
                    title TEXT, year TEXT, rated TEXT, released TEXT, runtime TEXT,
                    genre TEXT, director TEXT, writer TEXT, actors TEXT, plot TEXT,
                    language TEXT, country TEXT, awards TEXT, poster TEXT,
                    metascore TEXT, imdb_rating TEXT, imdb_votes TEXT, imdb_id TEXT,
                    type TEXT, dvd TEXT, box_office TEXT, production TEXT,
                    website TEXT, response TEXT, error TEXT, message_id INTEGER
                )",
            )
            .await
            .unwrap();
        existing
            .execute_unprepared(
                "INSERT INTO movies (title, year, type, message_id) \
                 VALUES ('Alien', '1979', 'movie', 11)",
            )
            .await
            .unwrap();
        existing.close().await.unwrap();

        let store = Store::with_pool_options(&db_url, 1, 1).await.unwrap();

        let backlog = store.list_backlog().await.unwrap();
        assert_eq!(backlog.len(), 1);
        assert_eq!(backlog[0].title, "Alien");
        assert_eq!(backlog[0].plot, "");

        let alien = store
            .get_movie_by_message_id(MessageId::new(11))
            .await
            .unwrap();
        assert_eq!(alien.kind, "movie");

        store
            .save_movie(&inception(), MessageId::new(12))
            .await
            .unwrap();
        assert_eq!(store.list_backlog().await.unwrap().len(), 2);

        store.close().await.unwrap();
        let _ = std::fs::remove_file(&db_path);
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let store = memory_store().await;
        use sea_orm_migration::MigratorTrait;
        migrator::Migrator::up(&store.conn, None).await.unwrap();
        store.ping().await.unwrap();
    }
}
