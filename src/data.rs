use crate::{dedup::dedup_key, utils, CollectorError, JobPosting, Remote};
use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};
use std::{fmt::Display, path::Path};

#[async_trait::async_trait]
pub trait Table {
    type Record<'a>;

    fn get_name(&self) -> &str;
    fn get_pool(&self) -> &SqlitePool;

    async fn create(&self) -> Result<(), sqlx::Error>;
    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<(), sqlx::Error>;

    async fn is_exist<I: AsRef<str> + Display + Send + Sync>(
        &self,
        id: I,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT id FROM {} WHERE id = ?", self.get_name());
        Ok(sqlx::query(&query)
            .bind(id.as_ref())
            .fetch_optional(self.get_pool())
            .await?
            .is_some())
    }

    async fn delete<I: AsRef<str> + Send + Sync>(&self, id: I) -> Result<(), sqlx::Error> {
        let query = format!(r#"DELETE FROM {} WHERE id = ?"#, self.get_name());
        sqlx::query(&query)
            .bind(id.as_ref())
            .execute(self.get_pool())
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u32, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {}", self.get_name());
        Ok(sqlx::query(&query)
            .fetch_one(self.get_pool())
            .await?
            .try_get(0)?)
    }
}

/// Row id of a posting: the source plus its dedup key.
pub fn posting_id(posting: &JobPosting) -> String {
    let (company, title) = dedup_key(posting);
    format!("{}|{}|{}", posting.source, company, title)
}

pub struct PostingTable {
    name: String,
    pool: SqlitePool,
}

#[async_trait::async_trait]
impl Table for PostingTable {
    type Record<'a> = &'a JobPosting;

    fn get_name(&self) -> &str {
        self.name.as_str()
    }

    fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create(&self) -> Result<(), sqlx::Error> {
        if !utils::is_table_exists(self.get_pool(), &self.name).await? {
            let query = format!(
                r#"
                    CREATE TABLE {} (
                        id TEXT PRIMARY KEY,
                        created_at DATETIME,
                        source TEXT,
                        title TEXT,
                        company TEXT,
                        salary TEXT,
                        city TEXT,
                        country TEXT,
                        remote TEXT,
                        tech_stack TEXT,
                        date_posted TEXT,
                        link TEXT
                    )
                "#,
                &self.name
            );
            sqlx::query(query.as_str()).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<(), sqlx::Error> {
        let mut tx = self.get_pool().begin().await?;
        let query = format!(
            r#"INSERT OR IGNORE INTO {} (
                id,
                source,
                title,
                company,
                salary,
                city,
                country,
                remote,
                tech_stack,
                date_posted,
                link,
                created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            self.name
        );
        sqlx::query(&query)
            .bind(posting_id(record))
            .bind(record.source.as_str())
            .bind(record.title.as_str())
            .bind(record.company.as_str())
            .bind(record.salary.as_str())
            .bind(record.city.as_str())
            .bind(record.country.as_str())
            .bind(record.remote.as_str())
            .bind(record.tech_stack.as_str())
            .bind(record.date_posted.as_str())
            .bind(record.link.as_str())
            .bind(utils::get_now())
            .execute(&mut tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

/// SQLite file accumulating the postings of every run.
///
/// A posting already archived (same source and dedup key) keeps its first row.
pub struct PostingArchive {
    pub postings: PostingTable,
    pool: SqlitePool,
}

impl PostingArchive {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<PostingArchive, CollectorError> {
        let opt = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opt).await?;
        let archive = PostingArchive {
            postings: PostingTable {
                name: "postings".to_string(),
                pool: pool.clone(),
            },
            pool,
        };

        if !utils::is_table_exists(&archive.pool, archive.postings.get_name()).await? {
            tracing::debug!("Create table {}", archive.postings.get_name());
            archive.postings.create().await?;
        } else {
            tracing::debug!("Use table {}", archive.postings.get_name());
        }

        Ok(archive)
    }

    /// Inserts every posting and returns how many rows are new.
    pub async fn archive(&self, postings: &[JobPosting]) -> Result<u32, CollectorError> {
        let before = self.postings.count().await?;
        for posting in postings {
            self.postings.insert(posting).await?;
        }
        Ok(self.postings.count().await? - before)
    }

    /// Every archived posting, in insertion order.
    pub async fn all(&self) -> Result<Vec<JobPosting>, CollectorError> {
        let query = format!(
            "SELECT * FROM {} ORDER BY rowid",
            self.postings.get_name()
        );
        let mut postings = vec![];
        for row in sqlx::query(&query).fetch_all(&self.pool).await? {
            let remote: String = row.try_get("remote")?;
            postings.push(JobPosting {
                source: row.try_get("source")?,
                title: row.try_get("title")?,
                company: row.try_get("company")?,
                salary: row.try_get("salary")?,
                city: row.try_get("city")?,
                country: row.try_get("country")?,
                remote: Remote::from(remote.as_str()),
                tech_stack: row.try_get("tech_stack")?,
                date_posted: row.try_get("date_posted")?,
                link: row.try_get("link")?,
            });
        }
        Ok(postings)
    }
}
