// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Picture catalog persistence.

use kudos_core::{KudosError, NewPicture, PictureEntry};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

fn to_sql_count(value: u64) -> Result<i64, rusqlite::Error> {
    i64::try_from(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Loads every picture in insertion order.
pub async fn load_pictures(db: &Database) -> Result<Vec<PictureEntry>, KudosError> {
    db.connection()
        .call(|conn| -> Result<Vec<PictureEntry>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, media_url, caption, appearances FROM pictures ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let appearances: i64 = row.get(3)?;
                Ok(PictureEntry {
                    id: row.get(0)?,
                    media_url: row.get(1)?,
                    caption: row.get(2)?,
                    appearances: u64::try_from(appearances)
                        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(3, appearances))?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}

/// Inserts a picture with zero appearances. Returns the generated id.
pub async fn append_picture(db: &Database, picture: &NewPicture) -> Result<String, KudosError> {
    let id = uuid::Uuid::new_v4().to_string();
    let picture = picture.clone();
    let inserted_id = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO pictures (id, media_url, caption, appearances) VALUES (?1, ?2, ?3, 0)",
                params![inserted_id, picture.media_url, picture.caption],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(id)
}

/// Overwrites the stored row whose id matches `entry.id`.
pub async fn update_picture(db: &Database, entry: &PictureEntry) -> Result<(), KudosError> {
    let entry = entry.clone();
    let id = entry.id.clone();
    let changed = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE pictures SET media_url = ?1, caption = ?2, appearances = ?3 WHERE id = ?4",
                params![
                    entry.media_url,
                    entry.caption,
                    to_sql_count(entry.appearances)?,
                    entry.id
                ],
            )
        })
        .await
        .map_err(map_tr_err)?;

    if changed == 0 {
        return Err(KudosError::NotFound {
            what: format!("stored picture {id}"),
        });
    }
    Ok(())
}
