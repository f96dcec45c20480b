//! SeaORM-based Series repository implementation

use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set};
use tracing::{debug, warn};

use crate::database::DbSession;
use crate::entities::{prelude::Series as SeriesEntity, series};
use crate::errors::RepositoryResult;
use crate::models::{Series, SeriesCreateRequest};

/// SeaORM-based repository for Series operations
pub struct SeriesSeaOrmRepository<'s> {
    session: &'s mut DbSession,
}

impl<'s> SeriesSeaOrmRepository<'s> {
    pub fn new(session: &'s mut DbSession) -> Self {
        Self { session }
    }

    /// Insert a new series and commit the session.
    ///
    /// Any `id` on the request is discarded; the returned record carries the
    /// identifier assigned by storage.
    pub async fn create(&mut self, request: SeriesCreateRequest) -> RepositoryResult<Series> {
        if let Some(ignored) = request.id {
            debug!("Ignoring client-supplied series id {}", ignored);
        }

        let active_model = series::ActiveModel {
            id: NotSet,
            titulo: Set(request.titulo),
            ano: Set(request.ano),
            genero: Set(request.genero),
            qtd_temporadas: Set(request.qtd_temporadas),
        };

        let model = active_model.insert(self.session.transaction().await?).await?;
        self.session.commit().await?;

        debug!("Created series {} ({})", model.id, model.titulo);
        Ok(model.into())
    }

    /// Every stored series, in storage order
    pub async fn list(&mut self) -> RepositoryResult<Vec<Series>> {
        let models = SeriesEntity::find()
            .all(self.session.transaction().await?)
            .await?;
        Ok(models.into_iter().map(Series::from).collect())
    }

    /// Single-record lookup is not offered. The call succeeds without reading storage.
    pub async fn get_one(&mut self) -> RepositoryResult<()> {
        warn!("Series lookup is not supported");
        Ok(())
    }

    /// Removal is not offered. The call succeeds and leaves storage untouched.
    pub async fn remove(&mut self) -> RepositoryResult<()> {
        warn!("Series removal is not supported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Database;
    use tracing_test::traced_test;

    async fn migrated_database() -> Database {
        let database = Database::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
        })
        .await
        .unwrap();
        database.migrate().await.unwrap();
        database
    }

    fn request(titulo: &str, ano: i32) -> SeriesCreateRequest {
        SeriesCreateRequest {
            id: None,
            titulo: titulo.to_string(),
            ano,
            genero: "Sci-Fi".to_string(),
            qtd_temporadas: 4,
        }
    }

    async fn create(database: &Database, request: SeriesCreateRequest) -> Series {
        let mut session = database.session();
        SeriesSeaOrmRepository::new(&mut session)
            .create(request)
            .await
            .unwrap()
    }

    async fn list(database: &Database) -> Vec<Series> {
        let mut session = database.session();
        SeriesSeaOrmRepository::new(&mut session).list().await.unwrap()
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let database = migrated_database().await;
        assert!(list(&database).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let database = migrated_database().await;

        let dark = create(&database, request("Dark", 2017)).await;
        let lost = create(&database, request("Lost", 2004)).await;

        assert_eq!(dark.titulo, "Dark");
        assert_eq!(dark.ano, 2017);
        assert_eq!(dark.genero, "Sci-Fi");
        assert_eq!(dark.qtd_temporadas, 4);
        assert_ne!(dark.id, lost.id);

        let stored = list(&database).await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.iter().filter(|s| **s == dark).count(), 1);
        assert_eq!(stored.iter().filter(|s| **s == lost).count(), 1);
    }

    #[tokio::test]
    async fn test_client_id_is_discarded() {
        let database = migrated_database().await;

        let first = create(&database, request("Dark", 2017)).await;
        let mut colliding = request("Lost", 2004);
        colliding.id = Some(first.id);
        let second = create(&database, colliding).await;

        assert_ne!(second.id, first.id);
        assert_eq!(list(&database).await.len(), 2);
    }

    #[tokio::test]
    async fn test_create_commits_session() {
        let database = migrated_database().await;
        let mut session = database.session();

        SeriesSeaOrmRepository::new(&mut session)
            .create(request("Dark", 2017))
            .await
            .unwrap();

        assert!(!session.is_open());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_get_one_is_a_no_op() {
        let database = migrated_database().await;
        let dark = create(&database, request("Dark", 2017)).await;

        let mut session = database.session();
        SeriesSeaOrmRepository::new(&mut session)
            .get_one()
            .await
            .unwrap();

        assert!(!session.is_open());
        drop(session);
        assert_eq!(list(&database).await, vec![dark]);
        assert!(logs_contain("Series lookup is not supported"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_remove_leaves_store_untouched() {
        let database = migrated_database().await;
        let dark = create(&database, request("Dark", 2017)).await;

        let mut session = database.session();
        SeriesSeaOrmRepository::new(&mut session)
            .remove()
            .await
            .unwrap();
        assert!(!session.is_open());
        drop(session);

        assert_eq!(list(&database).await, vec![dark]);
        assert!(logs_contain("Series removal is not supported"));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let database = Database::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
        })
        .await
        .unwrap();

        let mut session = database.session();
        let result = SeriesSeaOrmRepository::new(&mut session).list().await;

        assert!(matches!(
            result,
            Err(crate::errors::RepositoryError::Database(_))
        ));
    }
}
