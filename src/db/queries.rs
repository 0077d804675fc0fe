use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Session, User};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Users ──

pub fn create_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id,
            user.email,
            user.password_hash,
            user.created_at.format(DATE_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
    )?;

    let user = stmt
        .query_row(params![email], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .optional()?;

    Ok(user.map(|(id, email, password_hash, created_at)| User {
        id,
        email,
        password_hash,
        created_at: parse_timestamp(&created_at),
    }))
}

// ── Sessions ──

pub fn create_session(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![
            session.token,
            session.user_id,
            session.created_at.format(DATE_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_session(conn: &Connection, token: &str) -> anyhow::Result<Option<Session>> {
    let mut stmt =
        conn.prepare("SELECT token, user_id, created_at FROM sessions WHERE token = ?1")?;

    let row = stmt
        .query_row(params![token], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .optional()?;

    Ok(row.map(|(token, user_id, created_at)| Session {
        token,
        user_id,
        created_at: parse_timestamp(&created_at),
    }))
}

pub fn delete_session(conn: &Connection, token: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(count > 0)
}

// ── Key-value slots ──

pub fn kv_get(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
    let value = stmt
        .query_row(params![key], |row| row.get::<_, String>(0))
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .unwrap_or_else(|_| chrono::Utc::now().naive_utc())
}
