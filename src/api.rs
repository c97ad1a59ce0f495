// API client for the habit-tracker REST backend
//
// Thin wrapper over reqwest. Every operation maps to one endpoint under
// /api and collapses any failure - transport error or non-success status -
// into a single static message for that operation. No retries, no backoff,
// no explicit timeouts (reqwest defaults apply).

use crate::models::{Habit, HabitLog, MonthlyStats, NewHabit, RangeStats};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (scheme + host + port).
    /// Trailing slashes are stripped so URL joins stay predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// GET /habits
    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        const MSG: &str = "Failed to fetch habits";
        let resp = self
            .http
            .get(self.url("/habits"))
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        resp.json().await.context(MSG)
    }

    /// POST /habits
    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit> {
        const MSG: &str = "Failed to create habit";
        let resp = self
            .http
            .post(self.url("/habits"))
            .json(habit)
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        resp.json().await.context(MSG)
    }

    /// DELETE /habits/{id}
    pub async fn delete_habit(&self, id: i64) -> Result<()> {
        const MSG: &str = "Failed to delete habit";
        let resp = self
            .http
            .delete(self.url(&format!("/habits/{id}")))
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        Ok(())
    }

    /// POST /habits/{id}/mark - the completion date is server-determined.
    pub async fn mark_habit(&self, id: i64) -> Result<()> {
        const MSG: &str = "Failed to mark habit";
        let resp = self
            .http
            .post(self.url(&format!("/habits/{id}/mark")))
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        Ok(())
    }

    /// POST /habits/{id}/markOn?date=ISO
    pub async fn mark_habit_on(&self, id: i64, date: NaiveDate) -> Result<()> {
        const MSG: &str = "Failed to mark habit on date";
        let resp = self
            .http
            .post(self.url(&format!("/habits/{id}/markOn")))
            .query(&[("date", date.to_string())])
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        Ok(())
    }

    /// DELETE /habits/{id}/unmarkOn?date=ISO
    pub async fn unmark_habit_on(&self, id: i64, date: NaiveDate) -> Result<()> {
        const MSG: &str = "Failed to unmark habit on date";
        let resp = self
            .http
            .delete(self.url(&format!("/habits/{id}/unmarkOn")))
            .query(&[("date", date.to_string())])
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        Ok(())
    }

    /// GET /habits/stats?year=Y&month=M
    pub async fn monthly_stats(&self, year: i32, month: u32) -> Result<MonthlyStats> {
        const MSG: &str = "Failed to fetch monthly stats";
        let resp = self
            .http
            .get(self.url("/habits/stats"))
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        resp.json().await.context(MSG)
    }

    /// GET /habits/stats/range?start=ISO&end=ISO
    ///
    /// The range is sent as-is; end-before-start validation is the backend's
    /// problem, matching the rest of the client's trust model.
    pub async fn range_stats(&self, start: NaiveDate, end: NaiveDate) -> Result<RangeStats> {
        const MSG: &str = "Failed to fetch range stats";
        let resp = self
            .http
            .get(self.url("/habits/stats/range"))
            .query(&[("start", start.to_string()), ("end", end.to_string())])
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        resp.json().await.context(MSG)
    }

    /// GET /habits/{id}/logs?start=ISO&end=ISO
    pub async fn habit_logs(
        &self,
        id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HabitLog>> {
        const MSG: &str = "Failed to fetch habit logs";
        let resp = self
            .http
            .get(self.url(&format!("/habits/{id}/logs")))
            .query(&[("start", start.to_string()), ("end", end.to_string())])
            .send()
            .await
            .context(MSG)?;
        if !resp.status().is_success() {
            bail!(MSG);
        }
        resp.json().await.context(MSG)
    }
}
