use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info};

use super::{format_date, parse_date, parse_decimal};
use crate::domain::calendar_math;
use crate::domain::models::{EventOccurrence, Frequency};
use crate::storage::connection::DbConnection;
use crate::storage::traits::EventStorage;

/// Repository for materialized expense occurrences
#[derive(Clone)]
pub struct EventRepository {
    db: DbConnection,
}

impl EventRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_event(row: &SqliteRow) -> Result<EventOccurrence> {
        let date: String = row.get("date");
        let amount: String = row.get("amount");
        let total: String = row.get("total");
        let frequency: String = row.get("frequency");

        Ok(EventOccurrence {
            id: row.get("id"),
            recurrence_id: row.get("recurrence_id"),
            expense_id: row.get("expense_id"),
            summary: row.get("summary"),
            date: parse_date(&date)?,
            amount: parse_decimal(&amount)?,
            frequency: frequency.parse::<Frequency>()?,
            total: parse_decimal(&total)?,
            excluded: row.get("excluded"),
        })
    }
}

fn storable_bound(date: NaiveDate) -> Option<String> {
    (calendar_math::MIN_YEAR..=calendar_math::MAX_YEAR)
        .contains(&date.year())
        .then(|| format_date(date))
}

#[async_trait]
impl EventStorage for EventRepository {
    async fn list_events_in_window(
        &self,
        user_id: &str,
        center_year: i32,
        center_month: u32,
    ) -> Result<Vec<EventOccurrence>> {
        let (start, end) = calendar_math::window_bounds(center_year, center_month)?;
        self.list_events_between(user_id, start, end).await
    }

    async fn list_events_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventOccurrence>> {
        // A bound outside the storable years would not compare correctly as
        // text; every stored date lies on its side of it anyway
        let lower = storable_bound(start);
        let upper = storable_bound(end);

        let rows = sqlx::query(
            r#"
            SELECT id, recurrence_id, expense_id, summary, date, amount, frequency, total, excluded
            FROM events
            WHERE user_id = ?
              AND (? IS NULL OR date >= ?)
              AND (? IS NULL OR date < ?)
            ORDER BY date ASC, ROWID ASC
            "#,
        )
        .bind(user_id)
        .bind(lower.clone())
        .bind(lower)
        .bind(upper.clone())
        .bind(upper)
        .fetch_all(self.db.pool())
        .await?;

        debug!(
            "Loaded {} events for user {} between {} and {}",
            rows.len(),
            user_id,
            start,
            end
        );
        rows.iter().map(Self::row_to_event).collect()
    }

    async fn get_event(&self, user_id: &str, event_id: &str) -> Result<Option<EventOccurrence>> {
        let row = sqlx::query(
            r#"
            SELECT id, recurrence_id, expense_id, summary, date, amount, frequency, total, excluded
            FROM events
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_event).transpose()
    }

    async fn list_exclusions(&self, user_id: &str) -> Result<Vec<(String, NaiveDate)>> {
        let rows = sqlx::query(
            r#"
            SELECT expense_id, date
            FROM events
            WHERE user_id = ? AND excluded = TRUE
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let date: String = row.get("date");
                Ok((row.get("expense_id"), parse_date(&date)?))
            })
            .collect()
    }

    async fn replace_events(&self, user_id: &str, events: &[EventOccurrence]) -> Result<()> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .context("failed to begin event replacement")?;

        sqlx::query("DELETE FROM events WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for event in events {
            sqlx::query(
                r#"
                INSERT INTO events
                    (id, user_id, recurrence_id, expense_id, summary, date, amount, frequency, total, excluded)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&event.id)
            .bind(user_id)
            .bind(&event.recurrence_id)
            .bind(&event.expense_id)
            .bind(&event.summary)
            .bind(format_date(event.date))
            .bind(event.amount.to_string())
            .bind(event.frequency.as_str())
            .bind(event.total.to_string())
            .bind(event.excluded)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to insert event {}", event.id))?;
        }

        // Dropping `tx` on any error above rolls the whole replacement back
        tx.commit().await.context("failed to commit event replacement")?;

        info!("Replaced events for user {} with {} occurrences", user_id, events.len());
        Ok(())
    }

    async fn set_event_excluded(&self, user_id: &str, event_id: &str, excluded: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE events SET excluded = ? WHERE user_id = ? AND id = ?")
            .bind(excluded)
            .bind(user_id)
            .bind(event_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
