//! Company repository
//!
//! Companies are read-only for the API; `insert_names` exists for seeding.

use sqlx::{FromRow, PgPool};

use super::DbError;
use likectl_core::{Company, CompanyId, Page, PageWindow};

/// Company record from database
#[derive(Debug, Clone, FromRow)]
pub struct CompanyRow {
    pub id: i32,
    pub company_name: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId(row.id),
            company_name: row.company_name,
        }
    }
}

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List companies ordered by id.
    ///
    /// The total is counted separately so it stays correct when the offset
    /// runs past the last row.
    pub async fn list(&self, window: PageWindow) -> Result<Page<Company>, DbError> {
        let rows: Vec<CompanyRow> = sqlx::query_as(
            r#"
            SELECT id, company_name
            FROM companies
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(window.limit))
        .bind(offset(window))
        .fetch_all(self.pool)
        .await?;

        Ok(Page {
            items: rows.into_iter().map(Company::from).collect(),
            total: self.count().await?,
        })
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    /// Insert companies by name in one statement. Returns rows inserted.
    pub async fn insert_names(&self, names: &[String]) -> Result<u64, DbError> {
        if names.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO companies (company_name)
            SELECT * FROM UNNEST($1::text[])
            "#,
        )
        .bind(names)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Postgres OFFSET is BIGINT; windows past i64::MAX just return nothing.
pub(crate) fn offset(window: PageWindow) -> i64 {
    i64::try_from(window.offset).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_company() {
        let company = Company::from(CompanyRow {
            id: 7,
            company_name: "Acme".into(),
        });
        assert_eq!(company.id, CompanyId(7));
        assert_eq!(company.company_name, "Acme");
    }

    #[test]
    fn huge_offset_saturates() {
        assert_eq!(offset(PageWindow::new(u64::MAX, 10)), i64::MAX);
        assert_eq!(offset(PageWindow::new(20, 10)), 20);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn total_independent_of_limit() {
        let pool = crate::db::pool::test_pool().await;
        let repo = CompanyRepo::new(&pool);

        let small = repo.list(PageWindow::new(0, 1)).await.expect("list");
        let large = repo.list(PageWindow::new(0, 100)).await.expect("list");
        assert_eq!(small.total, large.total);
        assert!(small.items.len() <= 1);
    }
}
