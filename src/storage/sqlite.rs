//! SQLite storage implementation.
//!
//! [`DrillFile`] wraps a `rusqlite::Connection` opened on a drill file and
//! exposes typed CRUD over the domain tables. Every public mutation runs
//! inside one IMMEDIATE transaction and closes one undo group, so a single
//! undo reverses the whole gesture (e.g. a marcher plus all of its
//! auto-created placements).

use crate::error::{Error, Result};
use crate::model::{Marcher, MarcherPage, Page, SectionAppearance};
use crate::model::page::DEFAULT_COORDINATE;
use crate::storage::history::{self, HistoryResponse, HistoryStats};
use crate::storage::{migrations, schema};
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Fields for a marcher to be created.
#[derive(Debug, Clone)]
pub struct NewMarcher {
    pub name: Option<String>,
    pub section: String,
    pub year: Option<String>,
    pub notes: Option<String>,
    pub drill_prefix: String,
    pub drill_order: i64,
}

/// Fields for a page to be created.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub counts: i64,
    pub is_subset: bool,
    pub notes: Option<String>,
}

/// A coordinate change for one marcher on one page.
#[derive(Debug, Clone)]
pub struct CoordinateUpdate {
    pub marcher_id: i64,
    pub page_id: i64,
    pub x: f64,
    pub y: f64,
    /// Replaces the placement's notes when provided.
    pub notes: Option<String>,
}

/// A drill file opened for reading and writing.
#[derive(Debug)]
pub struct DrillFile {
    conn: Connection,
}

impl DrillFile {
    /// Open a drill file at the given path.
    ///
    /// Creates the file and applies the schema if it doesn't exist, runs
    /// pending migrations, and (re)installs the undo capture triggers.
    /// Triggers are reinstalled on every open because they bake column
    /// lists in at creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema/migrations fail.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::prepare(conn)
    }

    /// Open an in-memory drill file (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        schema::apply_schema(&conn)?;
        let applied = migrations::run_migrations(&conn)?;
        if applied > 0 {
            debug!(applied, "migrations applied, history was reset");
        }
        schema::install_undo_triggers(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a mutation as one undo group.
    ///
    /// Runs the closure inside an IMMEDIATE transaction and closes the
    /// undo group before committing. On error everything rolls back,
    /// including the trigger-captured history entries.
    fn mutate<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        let result = f(&tx)?;
        history::increment_undo_group(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    // ==================
    // Marcher Operations
    // ==================

    /// Create marchers, plus a default placement on every existing page.
    ///
    /// The whole batch is one undo group.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails (e.g. a duplicate drill
    /// number); nothing is written in that case.
    pub fn create_marchers(&mut self, new_marchers: &[NewMarcher]) -> Result<Vec<Marcher>> {
        let now = now_timestamp();
        let created = self.mutate(|tx| {
            let mut stmt = tx.prepare("SELECT id FROM pages ORDER BY id")?;
            let page_ids: Vec<i64> = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<_>>()?;

            let mut ids = Vec::with_capacity(new_marchers.len());
            for marcher in new_marchers {
                let drill_number =
                    Marcher::drill_number_for(&marcher.drill_prefix, marcher.drill_order);
                tx.execute(
                    "INSERT INTO marchers
                     (name, section, year, notes, drill_prefix, drill_order, drill_number,
                      created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                    rusqlite::params![
                        marcher.name,
                        marcher.section,
                        marcher.year,
                        marcher.notes,
                        marcher.drill_prefix,
                        marcher.drill_order,
                        drill_number,
                        now,
                    ],
                )?;
                let marcher_id = tx.last_insert_rowid();

                for page_id in &page_ids {
                    tx.execute(
                        "INSERT INTO marcher_pages
                         (marcher_id, page_id, x, y, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                        rusqlite::params![
                            marcher_id,
                            page_id,
                            DEFAULT_COORDINATE.0,
                            DEFAULT_COORDINATE.1,
                            now,
                        ],
                    )?;
                }
                ids.push(marcher_id);
            }
            Ok(ids)
        })?;

        created.iter().map(|id| self.get_marcher(*id)).collect()
    }

    /// Get a marcher by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarcherNotFound`] if no such row exists.
    pub fn get_marcher(&self, id: i64) -> Result<Marcher> {
        self.conn
            .query_row(
                "SELECT id, name, section, year, notes, drill_prefix, drill_order,
                        drill_number, created_at, updated_at
                 FROM marchers WHERE id = ?1",
                [id],
                marcher_from_row,
            )
            .optional()?
            .ok_or(Error::MarcherNotFound { id })
    }

    /// List all marchers ordered by drill number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_marchers(&self) -> Result<Vec<Marcher>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, section, year, notes, drill_prefix, drill_order,
                    drill_number, created_at, updated_at
             FROM marchers ORDER BY drill_prefix, drill_order",
        )?;
        let marchers = stmt
            .query_map([], marcher_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(marchers)
    }

    /// Update a marcher's editable fields. `None` leaves a field unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarcherNotFound`] if no such row exists.
    pub fn update_marcher(
        &mut self,
        id: i64,
        name: Option<&str>,
        section: Option<&str>,
        year: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Marcher> {
        self.get_marcher(id)?;
        let now = now_timestamp();
        self.mutate(|tx| {
            tx.execute(
                "UPDATE marchers SET
                     name = COALESCE(?2, name),
                     section = COALESCE(?3, section),
                     year = COALESCE(?4, year),
                     notes = COALESCE(?5, notes),
                     updated_at = ?6
                 WHERE id = ?1",
                rusqlite::params![id, name, section, year, notes, now],
            )?;
            Ok(())
        })?;
        self.get_marcher(id)
    }

    /// Delete marchers and all of their placements, as one undo group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarcherNotFound`] for the first missing ID;
    /// nothing is deleted in that case.
    pub fn delete_marchers(&mut self, ids: &[i64]) -> Result<()> {
        for id in ids {
            self.get_marcher(*id)?;
        }
        self.mutate(|tx| {
            for id in ids {
                tx.execute("DELETE FROM marcher_pages WHERE marcher_id = ?1", [id])?;
                tx.execute("DELETE FROM marchers WHERE id = ?1", [id])?;
            }
            Ok(())
        })
    }

    // ===============
    // Page Operations
    // ===============

    /// Create pages, plus a default placement for every existing marcher.
    ///
    /// Also remembers the last page's counts in the utility row (used as
    /// the default for the next page). The whole batch is one undo group.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails; nothing is written then.
    pub fn create_pages(&mut self, new_pages: &[NewPage]) -> Result<Vec<Page>> {
        let now = now_timestamp();
        let created = self.mutate(|tx| {
            let mut stmt = tx.prepare("SELECT id FROM marchers ORDER BY id")?;
            let marcher_ids: Vec<i64> = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<_>>()?;

            let mut ids = Vec::with_capacity(new_pages.len());
            for page in new_pages {
                tx.execute(
                    "INSERT INTO pages (counts, is_subset, notes, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)",
                    rusqlite::params![page.counts, page.is_subset, page.notes, now],
                )?;
                let page_id = tx.last_insert_rowid();

                for marcher_id in &marcher_ids {
                    tx.execute(
                        "INSERT INTO marcher_pages
                         (marcher_id, page_id, x, y, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                        rusqlite::params![
                            marcher_id,
                            page_id,
                            DEFAULT_COORDINATE.0,
                            DEFAULT_COORDINATE.1,
                            now,
                        ],
                    )?;
                }

                tx.execute(
                    "UPDATE utility SET last_page_counts = ?1 WHERE id = 0",
                    [page.counts],
                )?;
                ids.push(page_id);
            }
            Ok(ids)
        })?;

        created.iter().map(|id| self.get_page(*id)).collect()
    }

    /// Get a page by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] if no such row exists.
    pub fn get_page(&self, id: i64) -> Result<Page> {
        self.conn
            .query_row(
                "SELECT id, counts, is_subset, notes, created_at, updated_at
                 FROM pages WHERE id = ?1",
                [id],
                page_from_row,
            )
            .optional()?
            .ok_or(Error::PageNotFound { id })
    }

    /// List all pages in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pages(&self) -> Result<Vec<Page>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, counts, is_subset, notes, created_at, updated_at
             FROM pages ORDER BY id",
        )?;
        let pages = stmt
            .query_map([], page_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(pages)
    }

    /// Update a page's counts and/or notes. `None` leaves a field unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] if no such row exists.
    pub fn update_page(
        &mut self,
        id: i64,
        counts: Option<i64>,
        notes: Option<&str>,
    ) -> Result<Page> {
        self.get_page(id)?;
        let now = now_timestamp();
        self.mutate(|tx| {
            tx.execute(
                "UPDATE pages SET
                     counts = COALESCE(?2, counts),
                     notes = COALESCE(?3, notes),
                     updated_at = ?4
                 WHERE id = ?1",
                rusqlite::params![id, counts, notes, now],
            )?;
            Ok(())
        })?;
        self.get_page(id)
    }

    /// Delete pages and all of their placements, as one undo group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] for the first missing ID; nothing
    /// is deleted in that case.
    pub fn delete_pages(&mut self, ids: &[i64]) -> Result<()> {
        for id in ids {
            self.get_page(*id)?;
        }
        self.mutate(|tx| {
            for id in ids {
                tx.execute("DELETE FROM marcher_pages WHERE page_id = ?1", [id])?;
                tx.execute("DELETE FROM pages WHERE id = ?1", [id])?;
            }
            Ok(())
        })
    }

    // ====================
    // Placement Operations
    // ====================

    /// All placements on one page, ordered by marcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] if the page doesn't exist.
    pub fn placements_for_page(&self, page_id: i64) -> Result<Vec<MarcherPage>> {
        self.get_page(page_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, marcher_id, page_id, x, y, notes, created_at, updated_at
             FROM marcher_pages WHERE page_id = ?1 ORDER BY marcher_id",
        )?;
        let placements = stmt
            .query_map([page_id], placement_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(placements)
    }

    /// Move marchers on pages. The whole batch is one undo group, so a
    /// multi-select drag undoes in one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlacementNotFound`] for the first update whose
    /// (marcher, page) pair has no placement; nothing is written then.
    pub fn update_placements(&mut self, updates: &[CoordinateUpdate]) -> Result<()> {
        let now = now_timestamp();
        self.mutate(|tx| {
            for update in updates {
                let changed = tx.execute(
                    "UPDATE marcher_pages SET
                         x = ?3, y = ?4,
                         notes = COALESCE(?5, notes),
                         updated_at = ?6
                     WHERE marcher_id = ?1 AND page_id = ?2",
                    rusqlite::params![
                        update.marcher_id,
                        update.page_id,
                        update.x,
                        update.y,
                        update.notes,
                        now,
                    ],
                )?;
                if changed == 0 {
                    return Err(Error::PlacementNotFound {
                        marcher_id: update.marcher_id,
                        page_id: update.page_id,
                    });
                }
            }
            Ok(())
        })
    }

    // =====================
    // Appearance & Utility
    // =====================

    /// Create or replace the appearance override for a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_section_appearance(
        &mut self,
        section: &str,
        fill_color: &str,
        outline_color: &str,
    ) -> Result<SectionAppearance> {
        let now = now_timestamp();
        self.mutate(|tx| {
            tx.execute(
                "INSERT INTO section_appearances
                 (section, fill_color, outline_color, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT (section) DO UPDATE SET
                     fill_color = excluded.fill_color,
                     outline_color = excluded.outline_color,
                     updated_at = excluded.updated_at",
                rusqlite::params![section, fill_color, outline_color, now],
            )?;
            Ok(())
        })?;

        let appearance = self.conn.query_row(
            "SELECT id, section, fill_color, outline_color, created_at, updated_at
             FROM section_appearances WHERE section = ?1",
            [section],
            |row| {
                Ok(SectionAppearance {
                    id: row.get(0)?,
                    section: row.get(1)?,
                    fill_color: row.get(2)?,
                    outline_color: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            },
        )?;
        Ok(appearance)
    }

    /// List all section appearance overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_section_appearances(&self) -> Result<Vec<SectionAppearance>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, section, fill_color, outline_color, created_at, updated_at
             FROM section_appearances ORDER BY section",
        )?;
        let appearances = stmt
            .query_map([], |row| {
                Ok(SectionAppearance {
                    id: row.get(0)?,
                    section: row.get(1)?,
                    fill_color: row.get(2)?,
                    outline_color: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(appearances)
    }

    /// The counts of the most recently created page (default for the next).
    ///
    /// # Errors
    ///
    /// Returns an error if the utility row is missing.
    pub fn last_page_counts(&self) -> Result<i64> {
        let counts = self.conn.query_row(
            "SELECT last_page_counts FROM utility WHERE id = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(counts)
    }

    // ==================
    // History Operations
    // ==================

    /// Undo the most recent group of mutations.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for infrastructure failures; replay failures
    /// come back as `success: false` in the response.
    pub fn undo(&mut self) -> Result<HistoryResponse> {
        history::perform_undo(&mut self.conn)
    }

    /// Redo the most recently undone group.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for infrastructure failures.
    pub fn redo(&mut self) -> Result<HistoryResponse> {
        history::perform_redo(&mut self.conn)
    }

    /// Current undo/redo counters and retention limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the stats row is missing.
    pub fn history_stats(&self) -> Result<HistoryStats> {
        history::history_stats(&self.conn)
    }

    /// Distinct pending groups in the undo and redo logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the logs cannot be read.
    pub fn history_depth(&self) -> Result<(i64, i64)> {
        let undo: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT history_group) FROM history_undo",
            [],
            |row| row.get(0),
        )?;
        let redo: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT history_group) FROM history_redo",
            [],
            |row| row.get(0),
        )?;
        Ok((undo, redo))
    }

    /// Reconfigure the history retention window.
    ///
    /// # Errors
    ///
    /// Returns an error if the stats row cannot be updated.
    pub fn set_group_limit(&self, limit: i64) -> Result<()> {
        history::set_group_limit(&self.conn, limit)
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn marcher_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Marcher> {
    Ok(Marcher {
        id: row.get(0)?,
        name: row.get(1)?,
        section: row.get(2)?,
        year: row.get(3)?,
        notes: row.get(4)?,
        drill_prefix: row.get(5)?,
        drill_order: row.get(6)?,
        drill_number: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn page_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        counts: row.get(1)?,
        is_subset: row.get(2)?,
        notes: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn placement_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MarcherPage> {
    Ok(MarcherPage {
        id: row.get(0)?,
        marcher_id: row.get(1)?,
        page_id: row.get(2)?,
        x: row.get(3)?,
        y: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trumpet(order: i64) -> NewMarcher {
        NewMarcher {
            name: None,
            section: "Trumpet".to_string(),
            year: None,
            notes: None,
            drill_prefix: "T".to_string(),
            drill_order: order,
        }
    }

    fn page(counts: i64) -> NewPage {
        NewPage {
            counts,
            is_subset: false,
            notes: None,
        }
    }

    #[test]
    fn test_create_marcher_places_on_every_page() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_pages(&[page(8), page(16)]).unwrap();

        let marchers = db.create_marchers(&[trumpet(1)]).unwrap();
        assert_eq!(marchers.len(), 1);
        assert_eq!(marchers[0].drill_number, "T1");

        for page in db.list_pages().unwrap() {
            let placements = db.placements_for_page(page.id).unwrap();
            assert_eq!(placements.len(), 1);
            assert_eq!((placements[0].x, placements[0].y), DEFAULT_COORDINATE);
        }
    }

    #[test]
    fn test_create_page_places_every_marcher() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_marchers(&[trumpet(1), trumpet(2)]).unwrap();

        let pages = db.create_pages(&[page(8)]).unwrap();
        let placements = db.placements_for_page(pages[0].id).unwrap();
        assert_eq!(placements.len(), 2);
        assert_eq!(db.last_page_counts().unwrap(), 8);
    }

    #[test]
    fn test_single_undo_reverses_compound_creation() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_pages(&[page(8), page(16)]).unwrap();
        db.create_marchers(&[trumpet(1)]).unwrap();

        // One gesture: the marcher and both placements vanish together.
        let response = db.undo().unwrap();
        assert!(response.success);
        assert!(db.list_marchers().unwrap().is_empty());
        for page in db.list_pages().unwrap() {
            assert!(db.placements_for_page(page.id).unwrap().is_empty());
        }

        db.redo().unwrap();
        assert_eq!(db.list_marchers().unwrap().len(), 1);
        assert_eq!(db.placements_for_page(1).unwrap().len(), 1);
    }

    #[test]
    fn test_move_then_undo_restores_coordinate() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_marchers(&[trumpet(1)]).unwrap();
        let pages = db.create_pages(&[page(8)]).unwrap();
        let marcher_id = db.list_marchers().unwrap()[0].id;

        db.update_placements(&[CoordinateUpdate {
            marcher_id,
            page_id: pages[0].id,
            x: 42.0,
            y: 7.5,
            notes: None,
        }])
        .unwrap();

        let moved = &db.placements_for_page(pages[0].id).unwrap()[0];
        assert_eq!((moved.x, moved.y), (42.0, 7.5));

        db.undo().unwrap();
        let back = &db.placements_for_page(pages[0].id).unwrap()[0];
        assert_eq!((back.x, back.y), DEFAULT_COORDINATE);
    }

    #[test]
    fn test_failed_batch_writes_nothing() {
        let mut db = DrillFile::open_memory().unwrap();

        // Second marcher collides on drill number; the whole batch
        // (including its history entries) must roll back.
        let result = db.create_marchers(&[trumpet(1), trumpet(1)]);
        assert!(result.is_err());
        assert!(db.list_marchers().unwrap().is_empty());
        assert_eq!(db.history_depth().unwrap(), (0, 0));
    }

    #[test]
    fn test_delete_marcher_round_trip() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_pages(&[page(8)]).unwrap();
        db.create_marchers(&[trumpet(1)]).unwrap();
        let id = db.list_marchers().unwrap()[0].id;

        db.delete_marchers(&[id]).unwrap();
        assert!(matches!(
            db.get_marcher(id),
            Err(Error::MarcherNotFound { .. })
        ));

        db.undo().unwrap();
        // Row identity survives the round-trip.
        assert_eq!(db.get_marcher(id).unwrap().id, id);
        assert_eq!(db.placements_for_page(1).unwrap().len(), 1);
    }

    #[test]
    fn test_update_placement_unknown_pair() {
        let mut db = DrillFile::open_memory().unwrap();
        let result = db.update_placements(&[CoordinateUpdate {
            marcher_id: 1,
            page_id: 1,
            x: 0.0,
            y: 0.0,
            notes: None,
        }]);
        assert!(matches!(result, Err(Error::PlacementNotFound { .. })));
    }

    #[test]
    fn test_section_appearance_upsert() {
        let mut db = DrillFile::open_memory().unwrap();
        db.upsert_section_appearance("Trumpet", "rgba(255, 0, 0, 1)", "rgba(0, 0, 0, 1)")
            .unwrap();
        let updated = db
            .upsert_section_appearance("Trumpet", "rgba(0, 255, 0, 1)", "rgba(0, 0, 0, 1)")
            .unwrap();
        assert_eq!(updated.fill_color, "rgba(0, 255, 0, 1)");
        assert_eq!(db.list_section_appearances().unwrap().len(), 1);
    }

    #[test]
    fn test_update_marcher_partial_fields() {
        let mut db = DrillFile::open_memory().unwrap();
        db.create_marchers(&[trumpet(1)]).unwrap();
        let id = db.list_marchers().unwrap()[0].id;

        let updated = db
            .update_marcher(id, Some("Ada"), None, None, Some("solo"))
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ada"));
        assert_eq!(updated.section, "Trumpet");
        assert_eq!(updated.notes.as_deref(), Some("solo"));
    }
}
