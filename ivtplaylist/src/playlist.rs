//! Ordered entry sequence with a wrap-around cursor.

use crate::entry::PlaylistEntry;

/// An ordered, append-only playlist plus a cursor.
///
/// Invariants: the cursor is either unset or a valid index; navigation
/// wraps modulo the playlist length; every operation is a no-op while the
/// playlist is empty. For navigation math an unset cursor behaves as -1,
/// so the first `next` lands on index 0.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: PlaylistEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = PlaylistEntry>) {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    /// The cursor, if one has been set.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    /// Normalizes `request` into range (wrapping in both directions) and
    /// moves the cursor there. `None` while empty.
    pub fn select(&mut self, request: isize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let index = request.rem_euclid(self.entries.len() as isize) as usize;
        self.current = Some(index);
        Some(index)
    }

    /// The raw (un-normalized) index a relative step would request,
    /// counting from the cursor or from -1 when unset. `None` while empty.
    pub fn step_target(&self, delta: isize) -> Option<isize> {
        if self.entries.is_empty() {
            return None;
        }
        let from = self.current.map(|i| i as isize).unwrap_or(-1);
        Some(from + delta)
    }
}
