mod embedded;

use embedded::migrations;

use tokio_postgres::{Client, Config, NoTls};
use uuid::Uuid;

use crate::models::Note;

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_url: &str) -> Result<Self, tokio_postgres::Error> {
        let config: Config = database_url.parse()?;
        Self::connect(&config).await
    }

    pub async fn connect(config: &Config) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = config.connect(NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// Ensures the pgcrypto extension and the `notes` table exist.
    ///
    /// The embedded migration only uses `IF NOT EXISTS` statements, so running
    /// it against a database that already has the table is a no-op.
    pub async fn bootstrap(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB bootstrap finished!");

        Ok(())
    }

    pub async fn create_note(
        &self,
        title: &str,
        content: &str,
    ) -> Result<Note, tokio_postgres::Error> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at, updated_at",
                &[&title, &content],
            )
            .await?;

        Ok(Note::from(row))
    }

    pub async fn update_note(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "UPDATE notes SET title = $1, content = $2, updated_at = NOW() \
                 WHERE id = $3 RETURNING id, title, content, created_at, updated_at",
                &[&title, &content, &id],
            )
            .await?;

        Ok(row.map(Note::from))
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    pub async fn get_one_note(&self, id: Uuid) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.map(Note::from))
    }

    /// Most recently updated notes come first; ties are broken by id so the
    /// order is stable between calls.
    pub async fn get_all_notes(&self) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY updated_at DESC, id",
                &[],
            )
            .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }
}
