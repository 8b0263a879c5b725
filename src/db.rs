use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};

use crate::forms::NewArticle;

#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// RFC 3339 timestamp, assigned at creation and never updated
    pub publication_date: String,
    pub body: String,
    /// Relative path under the media directory, if an image was uploaded
    pub image: Option<String>,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                publication_date TEXT NOT NULL,
                body TEXT NOT NULL,
                image TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_articles_publication_date
            ON articles(publication_date DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a validated article, stamping it with the current time.
    pub async fn create_article(
        &self,
        article: &NewArticle,
        image_path: Option<&str>,
    ) -> anyhow::Result<Article> {
        let publication_date = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, publication_date, body, image)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&publication_date)
        .bind(&article.body)
        .bind(image_path)
        .execute(&self.pool)
        .await?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: article.title.clone(),
            publication_date,
            body: article.body.clone(),
            image: image_path.map(str::to_string),
        })
    }

    /// All articles, newest first. Insert order breaks timestamp ties.
    pub async fn list_articles(&self) -> anyhow::Result<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            ORDER BY publication_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    pub async fn count_articles(&self) -> anyhow::Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
