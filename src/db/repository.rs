use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::report::types::Report;

/// Insert a single report and return the stored row (id and timestamp are
/// store-assigned). Reports are append-only; there is no update or delete.
pub async fn insert_report(
    pool: &PgPool,
    number: &str,
    category: &str,
    message: &str,
    scam_probability: f64,
) -> eyre::Result<Report> {
    let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO reports (number, category, message, scam_probability)
         VALUES ($1, $2, $3, $4)
         RETURNING id, created_at",
    )
    .bind(number)
    .bind(category)
    .bind(message)
    .bind(scam_probability)
    .fetch_one(pool)
    .await?;

    Ok(Report {
        id,
        number: number.to_string(),
        category: category.to_string(),
        message: message.to_string(),
        scam_probability,
        created_at,
    })
}

/// Full history for a normalized number, most recent first.
pub async fn find_by_number(pool: &PgPool, number: &str) -> eyre::Result<Vec<Report>> {
    let rows: Vec<(i64, String, String, String, f64, DateTime<Utc>)> = sqlx::query_as(
        "SELECT id, number, category, message, scam_probability, created_at
         FROM reports WHERE number = $1
         ORDER BY created_at DESC",
    )
    .bind(number)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, number, category, message, scam_probability, created_at)| Report {
                id,
                number,
                category,
                message,
                scam_probability,
                created_at,
            },
        )
        .collect())
}

pub async fn count_all(pool: &PgPool) -> eyre::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reports")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Report counts per category, descending.
pub async fn group_by_category(pool: &PgPool) -> eyre::Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT category, COUNT(*) FROM reports
         GROUP BY category ORDER BY COUNT(*) DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Most-reported numbers, descending by report count.
pub async fn group_by_number(pool: &PgPool, limit: i64) -> eyre::Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT number, COUNT(*) FROM reports
         GROUP BY number ORDER BY COUNT(*) DESC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// A report row ready for batch insertion with an explicit timestamp
/// (seed loading backdates reports).
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub number: String,
    pub category: String,
    pub message: String,
    pub scam_probability: f64,
    pub created_at: DateTime<Utc>,
}

/// Insert a batch of reports using a multi-row INSERT. Chunks into groups
/// of 1000 to stay within PostgreSQL parameter limits.
pub async fn insert_reports_batch(pool: &PgPool, rows: &[ReportRow]) -> eyre::Result<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut inserted = 0u64;
    for chunk in rows.chunks(1000) {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> = sqlx::QueryBuilder::new(
            "INSERT INTO reports (number, category, message, scam_probability, created_at) ",
        );

        query_builder.push_values(chunk, |mut b, r| {
            b.push_bind(&r.number)
                .push_bind(&r.category)
                .push_bind(&r.message)
                .push_bind(r.scam_probability)
                .push_bind(r.created_at);
        });

        let result = query_builder.build().execute(pool).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}
