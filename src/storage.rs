use crate::errors::StoreError;
use crate::models::{Goal, GoalPatch, NewGoal};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{error, warn};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS goal (
    goal_id INTEGER PRIMARY KEY AUTOINCREMENT,
    goal_type TEXT NOT NULL,
    image TEXT,
    description TEXT NOT NULL,
    target_days INTEGER NOT NULL,
    percentage_of_achievement REAL NOT NULL
)";

const GOAL_COLUMNS: &str =
    "goal_id, goal_type, image, description, target_days, percentage_of_achievement";

/// Single SQLite connection shared by every request. Queries run one at a
/// time on the blocking pool.
#[derive(Clone)]
pub struct GoalStore {
    conn: Arc<Mutex<Connection>>,
}

impl GoalStore {
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let path = path.to_path_buf();
        let conn = tokio::task::spawn_blocking(move || Connection::open(path)).await??;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Closes the connection if this is the last handle to it.
    pub fn close(self) -> Result<(), StoreError> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            warn!("goal store still shared at shutdown; leaving connection to drop");
            return Ok(());
        };
        let conn = mutex.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, err)| {
            error!("failed to close goal store: {err}");
            StoreError::Sqlite(err)
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }

    pub async fn list_goals(&self) -> Result<Vec<Goal>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {GOAL_COLUMNS} FROM goal ORDER BY goal_id"))?;
            let goals = stmt.query_map([], goal_from_row)?;
            goals.collect()
        })
        .await
    }

    /// `id` is bound as-is; text that is not a number simply matches nothing.
    pub async fn get_goal(&self, id: &str) -> Result<Option<Goal>, StoreError> {
        let id = id.to_owned();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {GOAL_COLUMNS} FROM goal WHERE goal_id = ?1"),
                params![id],
                goal_from_row,
            )
            .optional()
        })
        .await
    }

    pub async fn insert_goal(&self, goal: NewGoal) -> Result<i64, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO goal (goal_type, image, description, target_days, percentage_of_achievement) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    goal.goal_type,
                    goal.image,
                    goal.description,
                    goal.target_days,
                    goal.percentage_of_achievement
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Writes only the columns present in `patch`. Returns the number of rows
    /// touched, which is 0 for an unknown id.
    pub async fn update_goal(&self, id: &str, patch: &GoalPatch) -> Result<usize, StoreError> {
        let columns = patch_columns(patch);
        if columns.is_empty() {
            return Ok(0);
        }

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE goal SET {assignments} WHERE goal_id = ?{}",
            columns.len() + 1
        );
        let values = columns
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(Value::Text(id.to_owned())))
            .collect::<Vec<_>>();

        let affected = self
            .with_conn(move |conn| conn.execute(&sql, params_from_iter(values)))
            .await?;
        if affected == 0 {
            warn!(goal_id = id, "update matched no goal");
        }
        Ok(affected)
    }

    pub async fn delete_goal(&self, id: &str) -> Result<usize, StoreError> {
        let owned = id.to_owned();
        let affected = self
            .with_conn(move |conn| conn.execute("DELETE FROM goal WHERE goal_id = ?1", params![owned]))
            .await?;
        if affected == 0 {
            warn!(goal_id = id, "delete matched no goal");
        }
        Ok(affected)
    }
}

fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        goal_id: row.get("goal_id")?,
        goal_type: row.get("goal_type")?,
        image: row.get("image")?,
        description: row.get("description")?,
        target_days: row.get("target_days")?,
        percentage_of_achievement: row.get("percentage_of_achievement")?,
    })
}

fn patch_columns(patch: &GoalPatch) -> Vec<(&'static str, Value)> {
    let mut columns = Vec::new();
    if let Some(goal_type) = &patch.goal_type {
        columns.push(("goal_type", Value::Text(goal_type.clone())));
    }
    if let Some(description) = &patch.description {
        columns.push(("description", Value::Text(description.clone())));
    }
    if let Some(days) = patch.target_days {
        columns.push(("target_days", Value::Integer(days)));
    }
    if let Some(percentage) = patch.percentage_of_achievement {
        columns.push(("percentage_of_achievement", Value::Real(percentage)));
    }
    if let Some(image) = &patch.image {
        columns.push(("image", Value::Text(image.clone())));
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_goal(image: Option<&str>) -> NewGoal {
        NewGoal {
            goal_type: "Health".into(),
            image: image.map(str::to_owned),
            description: "Drink water".into(),
            target_days: 30,
            percentage_of_achievement: 12.5,
        }
    }

    fn scalar_patch() -> GoalPatch {
        GoalPatch {
            goal_type: Some("Study".into()),
            image: None,
            description: Some("Read a chapter".into()),
            target_days: Some(60),
            percentage_of_achievement: Some(50.0),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = GoalStore::open_in_memory().unwrap();
        assert!(store.list_goals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_get_returns_submitted_fields() {
        let store = GoalStore::open_in_memory().unwrap();
        let id = store.insert_goal(new_goal(Some("water.png"))).await.unwrap();

        let goal = store.get_goal(&id.to_string()).await.unwrap().expect("goal");
        assert_eq!(goal.goal_id, id);
        assert_eq!(goal.goal_type, "Health");
        assert_eq!(goal.description, "Drink water");
        assert_eq!(goal.target_days, 30);
        assert_eq!(goal.percentage_of_achievement, 12.5);
        assert_eq!(goal.image.as_deref(), Some("water.png"));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = GoalStore::open_in_memory().unwrap();
        let first = store.insert_goal(new_goal(None)).await.unwrap();
        let second = store.insert_goal(new_goal(None)).await.unwrap();

        let ids: Vec<i64> = store
            .list_goals()
            .await
            .unwrap()
            .into_iter()
            .map(|goal| goal.goal_id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn unknown_or_non_numeric_id_matches_nothing() {
        let store = GoalStore::open_in_memory().unwrap();
        store.insert_goal(new_goal(None)).await.unwrap();

        assert!(store.get_goal("999").await.unwrap().is_none());
        assert!(store.get_goal("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_without_image_keeps_stored_image() {
        let store = GoalStore::open_in_memory().unwrap();
        let id = store.insert_goal(new_goal(Some("old.png"))).await.unwrap().to_string();

        let affected = store.update_goal(&id, &scalar_patch()).await.unwrap();
        assert_eq!(affected, 1);

        let goal = store.get_goal(&id).await.unwrap().unwrap();
        assert_eq!(goal.goal_type, "Study");
        assert_eq!(goal.description, "Read a chapter");
        assert_eq!(goal.target_days, 60);
        assert_eq!(goal.percentage_of_achievement, 50.0);
        assert_eq!(goal.image.as_deref(), Some("old.png"));
    }

    #[tokio::test]
    async fn update_with_image_replaces_it() {
        let store = GoalStore::open_in_memory().unwrap();
        let id = store.insert_goal(new_goal(Some("old.png"))).await.unwrap().to_string();

        let patch = GoalPatch {
            image: Some("new.png".into()),
            ..scalar_patch()
        };
        store.update_goal(&id, &patch).await.unwrap();

        let goal = store.get_goal(&id).await.unwrap().unwrap();
        assert_eq!(goal.image.as_deref(), Some("new.png"));
    }

    #[tokio::test]
    async fn update_of_missing_goal_is_a_no_op() {
        let store = GoalStore::open_in_memory().unwrap();
        assert_eq!(store.update_goal("41", &scalar_patch()).await.unwrap(), 0);
        assert_eq!(store.update_goal("41", &GoalPatch::default()).await.unwrap(), 0);
        assert!(store.list_goals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_never_errors() {
        let store = GoalStore::open_in_memory().unwrap();
        let id = store.insert_goal(new_goal(None)).await.unwrap().to_string();

        assert_eq!(store.delete_goal(&id).await.unwrap(), 1);
        assert_eq!(store.delete_goal(&id).await.unwrap(), 0);
        assert!(store.get_goal(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn close_releases_last_handle() {
        let dir = tempfile::tempdir().unwrap();
        let store = GoalStore::open(&dir.path().join("nested/goals.db")).await.unwrap();
        store.insert_goal(new_goal(None)).await.unwrap();
        store.close().unwrap();

        let reopened = GoalStore::open(&dir.path().join("nested/goals.db")).await.unwrap();
        assert_eq!(reopened.list_goals().await.unwrap().len(), 1);
    }
}
