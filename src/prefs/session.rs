//! Batched writes

use super::{PrefKey, Prefs};
use crate::error::Result;
use crate::store::Edit;
use crate::value::object;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Deref;

/// A batch of writes committed together.
///
/// Writes are buffered in order and become visible only when the session is
/// ended. Reads through the session (via `Deref<Target = Prefs>`) see the
/// committed state, not the pending edits.
///
/// Dropping a session without calling [`end`](Self::end) or
/// [`discard`](Self::discard) commits it; a failed implicit commit is logged.
/// A session dropped while its thread is panicking is discarded instead.
///
/// ```rust
/// use typed_prefs::Prefs;
///
/// let mut prefs = Prefs::builder().memory().build()?;
///
/// let mut session = prefs.begin();
/// session.put_int("a", 1)?.put_string("b", "two")?;
/// assert!(!session.contains("a")?);
/// session.end()?;
///
/// assert_eq!(prefs.get_int("a")?, 1);
/// # Ok::<(), typed_prefs::Error>(())
/// ```
#[must_use = "edits are committed when the session ends"]
pub struct EditSession<'a> {
    prefs: &'a mut Prefs,
    edits: Vec<Edit>,
    finished: bool,
}

impl<'a> EditSession<'a> {
    pub(super) fn new(prefs: &'a mut Prefs) -> Self {
        log::debug!("Edit session started on store '{}'", prefs.store.name());
        Self {
            prefs,
            edits: Vec::new(),
            finished: false,
        }
    }

    fn key_name(&self, key: PrefKey) -> Result<String> {
        self.prefs.key_name(key)
    }

    #[allow(clippy::unnecessary_wraps)]
    fn apply(&mut self, edit: Edit) -> Result<&mut Self> {
        self.edits.push(edit);
        Ok(self)
    }

    /// Number of buffered edits
    #[must_use]
    pub fn pending(&self) -> usize {
        self.edits.len()
    }

    write_methods!();

    /// Commit every buffered edit in one store operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the commit. The store is left
    /// unchanged in that case.
    pub fn end(mut self) -> Result<()> {
        self.finished = true;
        self.commit()
    }

    /// Drop every buffered edit without committing
    pub fn discard(mut self) {
        log::debug!("Discarding {} pending edit(s)", self.edits.len());
        self.edits.clear();
        self.finished = true;
    }

    fn commit(&mut self) -> Result<()> {
        if self.edits.is_empty() {
            return Ok(());
        }
        let edits = std::mem::take(&mut self.edits);
        log::debug!(
            "Committing {} edit(s) to store '{}'",
            edits.len(),
            self.prefs.store.name()
        );
        self.prefs.store.commit(&edits)
    }
}

impl Deref for EditSession<'_> {
    type Target = Prefs;

    fn deref(&self) -> &Prefs {
        self.prefs
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if std::thread::panicking() {
            log::warn!(
                "Edit session dropped during a panic, discarding {} pending edit(s)",
                self.edits.len()
            );
            return;
        }
        if let Err(e) = self.commit() {
            log::warn!("Implicit commit of edit session failed: {e}");
        }
    }
}
