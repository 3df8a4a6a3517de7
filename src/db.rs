use crate::model::attendance::{
    AttendanceDate, AttendanceEntry, AttendanceRecord, DayAttendance,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;

/// Read-only access to the `attendance(name, time, date)` table.
///
/// Rows are written by the recognizer process; this side only reads them. A
/// fresh connection is opened for every lookup and closed right after the
/// single statement, so nothing is held open between requests.
#[derive(Clone, Debug)]
pub struct AttendanceStore {
    options: SqliteConnectOptions,
}

impl AttendanceStore {
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
        Ok(Self { options })
    }

    async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// `(name, time)` rows for one day, in table order.
    pub async fn entries_for(
        &self,
        date: &AttendanceDate,
    ) -> Result<DayAttendance<AttendanceEntry>, sqlx::Error> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query_as::<_, AttendanceEntry>(
            r#"
            SELECT name, time
            FROM attendance
            WHERE date = ?
            "#,
        )
        .bind(date.normalized())
        .fetch_all(&mut conn)
        .await?;

        conn.close().await?;
        Ok(rows.into())
    }

    /// `(name, time, date)` rows for one day, in table order.
    pub async fn records_for(
        &self,
        date: &AttendanceDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT name, time, date
            FROM attendance
            WHERE date = ?
            "#,
        )
        .bind(date.normalized())
        .fetch_all(&mut conn)
        .await?;

        conn.close().await?;
        Ok(rows)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    /// Creates `attendance.db` under `dir` holding the given rows.
    pub(crate) async fn seed_db(dir: &Path, rows: &[(&str, &str, &str)]) -> String {
        let path = dir.join("attendance.db");
        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .expect("create db");

        sqlx::query("CREATE TABLE attendance (name TEXT, time TEXT, date TEXT)")
            .execute(&mut conn)
            .await
            .expect("create table");

        for (name, time, date) in rows {
            sqlx::query("INSERT INTO attendance (name, time, date) VALUES (?, ?, ?)")
                .bind(*name)
                .bind(*time)
                .bind(*date)
                .execute(&mut conn)
                .await
                .expect("insert row");
        }

        conn.close().await.expect("close");
        format!("sqlite://{}", path.display())
    }

    fn day(raw: &str) -> AttendanceDate {
        AttendanceDate::parse(Some(raw)).unwrap()
    }

    #[actix_web::test]
    async fn entries_are_filtered_by_exact_date() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = seed_db(
            dir.path(),
            &[
                ("Alice", "09:00:00", "2024-01-01"),
                ("Carol", "10:00:00", "2024-01-02"),
                ("Bob", "09:05:00", "2024-01-01"),
            ],
        )
        .await;
        let store = AttendanceStore::new(&url).unwrap();

        let found = store.entries_for(&day("2024-01-01")).await.unwrap();
        let DayAttendance::Found(mut rows) = found else {
            panic!("expected rows");
        };
        // no ORDER BY in the query, so compare as a set
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            rows,
            vec![
                AttendanceEntry {
                    name: "Alice".into(),
                    time: "09:00:00".into(),
                },
                AttendanceEntry {
                    name: "Bob".into(),
                    time: "09:05:00".into(),
                },
            ]
        );
    }

    #[actix_web::test]
    async fn empty_day_is_no_data_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = seed_db(dir.path(), &[("Alice", "09:00:00", "2024-01-01")]).await;
        let store = AttendanceStore::new(&url).unwrap();

        let outcome = store.entries_for(&day("2023-12-31")).await.unwrap();
        assert_eq!(outcome, DayAttendance::NoData);
    }

    #[actix_web::test]
    async fn short_date_input_matches_padded_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = seed_db(dir.path(), &[("Alice", "09:00:00", "2024-01-05")]).await;
        let store = AttendanceStore::new(&url).unwrap();

        let records = store.records_for(&day("2024-1-5")).await.unwrap();
        assert_eq!(
            records,
            vec![AttendanceRecord {
                name: "Alice".into(),
                time: "09:00:00".into(),
                date: "2024-01-05".into(),
            }]
        );
    }

    #[actix_web::test]
    async fn missing_database_is_a_store_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}", dir.path().join("absent.db").display());
        let store = AttendanceStore::new(&url).unwrap();

        assert!(store.entries_for(&day("2024-01-01")).await.is_err());
        // the read-only store never creates the file
        assert!(!dir.path().join("absent.db").exists());
    }
}
