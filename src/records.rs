//! Record Store
//!
//! Plain keyed storage for student analyses and user preferences, plus the
//! usage summary built from them. Unlike the market cache these records do
//! not expire.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::cache::Clock;
use crate::error::{Result, ServiceError};
use crate::kv::KvStore;
use crate::namespace::Namespace;

/// Field stamped onto saved preferences.
pub const LAST_UPDATED_FIELD: &str = "lastUpdated";

// == Analytics ==
/// Usage summary over stored records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Number of stored student analyses
    pub total_analyses: usize,
    /// Number of users with saved preferences
    pub total_users: usize,
    /// Users whose preferences changed in the last seven days
    pub last_week_activity: usize,
    /// Reserved for per-field aggregation, currently always empty
    pub popular_fields: Map<String, Value>,
    /// When the summary was computed (RFC 3339)
    pub timestamp: String,
}

// == Record Store ==
pub struct RecordStore {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_ms() as i64).unwrap_or_default()
    }

    // == Student Analysis ==
    /// Stores the analysis for `student_id`, replacing any earlier one.
    pub async fn put_analysis(&self, student_id: &str, analysis: Value) -> Result<()> {
        let key = Namespace::StudentAnalysis.key(student_id)?;
        self.store.set(&key, analysis).await?;
        info!("Stored analysis for student: {}", student_id);
        Ok(())
    }

    /// Returns the stored analysis for `student_id`.
    pub async fn get_analysis(&self, student_id: &str) -> Result<Value> {
        let key = Namespace::StudentAnalysis.key(student_id)?;
        self.store
            .get(&key)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Analysis not found".to_string()))
    }

    // == User Preferences ==
    /// Saves `preferences` for `user_id`, stamped with `lastUpdated`.
    ///
    /// `preferences` must be a JSON object.
    pub async fn save_preferences(&self, user_id: &str, preferences: Value) -> Result<()> {
        let key = Namespace::UserPreferences.key(user_id)?;
        let Value::Object(mut fields) = preferences else {
            return Err(ServiceError::InvalidRequest(
                "Preferences must be a JSON object".to_string(),
            ));
        };

        fields.insert(
            LAST_UPDATED_FIELD.to_string(),
            Value::String(self.now().to_rfc3339()),
        );
        self.store.set(&key, Value::Object(fields)).await?;
        info!("Saved preferences for user: {}", user_id);
        Ok(())
    }

    /// Returns the saved preferences for `user_id`.
    pub async fn get_preferences(&self, user_id: &str) -> Result<Value> {
        let key = Namespace::UserPreferences.key(user_id)?;
        self.store
            .get(&key)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Preferences not found".to_string()))
    }

    // == Analytics ==
    /// Counts stored records by namespace.
    pub async fn analytics(&self) -> Result<Analytics> {
        let analyses = self
            .store
            .get_by_prefix(Namespace::StudentAnalysis.prefix())
            .await?;
        let preferences = self
            .store
            .get_by_prefix(Namespace::UserPreferences.prefix())
            .await?;

        let now = self.now();
        let week_ago = now - Duration::days(7);
        let last_week_activity = preferences
            .iter()
            .filter_map(|(_, prefs)| prefs.get(LAST_UPDATED_FIELD)?.as_str())
            .filter_map(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .filter(|ts| ts.with_timezone(&Utc) >= week_ago)
            .count();

        Ok(Analytics {
            total_analyses: analyses.len(),
            total_users: preferences.len(),
            last_week_activity,
            popular_fields: Map::new(),
            timestamp: now.to_rfc3339(),
        })
    }
}
