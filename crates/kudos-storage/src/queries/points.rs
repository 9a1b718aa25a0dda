// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Points ledger persistence.

use kudos_core::{KudosError, PointsRecord};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Loads every points record in first-seen order.
pub async fn load_points(db: &Database) -> Result<Vec<PointsRecord>, KudosError> {
    db.connection()
        .call(|conn| -> Result<Vec<PointsRecord>, rusqlite::Error> {
            let mut stmt =
                conn.prepare("SELECT user_id, points FROM points ORDER BY position ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(PointsRecord {
                    user_id: row.get(0)?,
                    points: row.get(1)?,
                })
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

/// Replaces the whole points table with `records` in one transaction.
pub async fn replace_points(db: &Database, records: &[PointsRecord]) -> Result<(), KudosError> {
    let records = records.to_vec();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM points", [])?;
            {
                let mut stmt =
                    tx.prepare("INSERT INTO points (user_id, points, position) VALUES (?1, ?2, ?3)")?;
                for (position, record) in records.iter().enumerate() {
                    let position = i64::try_from(position)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    stmt.execute(params![record.user_id, record.points, position])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(map_tr_err)
}
