//! The ordered file collection and its batch operations.

use super::batch::{repeat, BatchOutcome, BatchPrompt};
use super::item::FileItem;
use super::share::ShareMode;
use crate::{log_info, log_trace};

/// Ordered list of file references, insertion order preserved (it drives the
/// display order). Entries are owned exclusively; the same path may be added
/// twice, producing two independent lock attempts for the OS to arbitrate.
#[derive(Debug, Default)]
pub struct FileCollection {
    items: Vec<FileItem>,
}

impl FileCollection {
    pub fn new() -> Self {
        FileCollection { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileItem> {
        self.items.iter()
    }

    /// Adds one reference per path, with per-path fault isolation.
    ///
    /// A path that fails construction is escalated and not added. When
    /// `immediate` carries a share mode, each freshly added item is locked
    /// with it right away; a lock failure is escalated but the item stays in
    /// the collection, consistent with add-then-lock being two steps.
    pub fn add_paths<I>(
        &mut self,
        paths: I,
        immediate: Option<ShareMode>,
        prompt: &mut dyn BatchPrompt,
    ) -> BatchOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let items = &mut self.items;
        let outcome = repeat(
            paths,
            |path| {
                let item = FileItem::new(&path)?;
                log_trace!("added '{}'", item.full_path().display());
                items.push(item);
                if let Some(mode) = immediate {
                    if let Some(added) = items.last_mut() {
                        added.lock(mode)?;
                    }
                }
                Ok(())
            },
            prompt,
        );
        log_info!(
            "add: {} added, {} failed, {} total",
            outcome.succeeded,
            outcome.failed,
            items.len()
        );
        outcome
    }

    /// Locks the selected entries with `share`, in selection order.
    ///
    /// The index list is a snapshot taken by the caller before anything
    /// mutates; stale indices are skipped. Already-locked entries are no-ops
    /// and keep their original share mode.
    pub fn lock_selected(
        &mut self,
        indices: &[usize],
        share: ShareMode,
        prompt: &mut dyn BatchPrompt,
    ) -> BatchOutcome {
        let items = &mut self.items;
        let outcome = repeat(
            indices.iter().copied(),
            |index| match items.get_mut(index) {
                Some(item) => item.lock(share),
                None => Ok(()),
            },
            prompt,
        );
        log_info!("lock: {} ok, {} failed", outcome.succeeded, outcome.failed);
        outcome
    }

    /// Releases the selected entries, in selection order.
    ///
    /// This is the explicit user action, so close failures are escalated
    /// rather than swallowed.
    pub fn release_selected(
        &mut self,
        indices: &[usize],
        prompt: &mut dyn BatchPrompt,
    ) -> BatchOutcome {
        let items = &mut self.items;
        let outcome = repeat(
            indices.iter().copied(),
            |index| match items.get_mut(index) {
                Some(item) => item.release(),
                None => Ok(()),
            },
            prompt,
        );
        log_info!(
            "release: {} ok, {} failed",
            outcome.succeeded,
            outcome.failed
        );
        outcome
    }

    /// Removes the selected entries: best-effort release first (failures
    /// ignored), then detach. Returns how many were detached so the caller
    /// can shrink the visible count.
    pub fn remove_selected(&mut self, indices: &[usize]) -> usize {
        for &index in indices {
            if let Some(item) = self.items.get_mut(index) {
                item.release_quiet();
            }
        }

        // Detach highest-first so earlier removals cannot shift the
        // remaining snapshot indices.
        let mut ordered: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.items.len())
            .collect();
        ordered.sort_unstable();
        ordered.dedup();

        let removed = ordered.len();
        for index in ordered.into_iter().rev() {
            self.items.remove(index);
        }
        log_info!("remove: {} detached, {} left", removed, self.items.len());
        removed
    }

    /// Best-effort release of every entry, then empty the collection.
    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.release_quiet();
        }
        self.items.clear();
        log_info!("collection cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::batch::tests::ScriptedPrompt;
    use crate::engine::batch::PromptChoice;
    use std::fs;
    use tempfile::TempDir;

    fn fixtures(dir: &TempDir, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, b"data").unwrap();
                path.to_string_lossy().into_owned()
            })
            .collect()
    }

    fn silent() -> ScriptedPrompt {
        ScriptedPrompt::new(vec![])
    }

    #[test]
    fn add_then_immediate_lock_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["a.txt", "b.txt", "c.txt"]);

        let mut files = FileCollection::new();
        let mut prompt = silent();
        let outcome = files.add_paths(paths, Some(ShareMode::NONE), &mut prompt);

        assert_eq!(outcome.succeeded, 3);
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|item| item.is_locked()));
        assert_eq!(prompt.prompts, 0);

        files.clear();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_path_is_escalated_and_not_added() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixtures(&dir, &["ok.txt"]);
        paths.push(dir.path().join("absent.txt").to_string_lossy().into_owned());

        let mut files = FileCollection::new();
        let mut prompt = ScriptedPrompt::new(vec![PromptChoice::Skip]);
        let outcome = files.add_paths(paths, None, &mut prompt);

        assert_eq!(files.len(), 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(prompt.prompts, 1);
    }

    #[test]
    fn duplicate_paths_produce_independent_entries() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["dup.txt"]);
        let twice = vec![paths[0].clone(), paths[0].clone()];

        let mut files = FileCollection::new();
        files.add_paths(twice, None, &mut silent());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn lock_and_release_selected_subset() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["a.txt", "b.txt", "c.txt"]);

        let mut files = FileCollection::new();
        files.add_paths(paths, None, &mut silent());

        files.lock_selected(&[0, 2], ShareMode::NONE, &mut silent());
        assert!(files.get(0).unwrap().is_locked());
        assert!(!files.get(1).unwrap().is_locked());
        assert!(files.get(2).unwrap().is_locked());

        files.release_selected(&[0, 1, 2], &mut silent());
        assert!(files.iter().all(|item| !item.is_locked()));
    }

    #[test]
    fn suppression_covers_rest_of_failing_batch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["a.txt", "b.txt", "c.txt"]);

        let mut files = FileCollection::new();
        files.add_paths(paths.clone(), None, &mut silent());
        // Delete the backing files so every lock attempt fails.
        for path in &paths {
            fs::remove_file(path).unwrap();
        }

        let mut prompt = ScriptedPrompt::new(vec![PromptChoice::Ignore]);
        let outcome = files.lock_selected(&[0, 1, 2], ShareMode::NONE, &mut prompt);

        assert_eq!(prompt.prompts, 1);
        assert_eq!(outcome.failed, 3);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn cancel_leaves_remaining_items_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["bad.txt", "good.txt"]);

        let mut files = FileCollection::new();
        files.add_paths(paths.clone(), None, &mut silent());
        fs::remove_file(&paths[0]).unwrap();

        let mut prompt = ScriptedPrompt::new(vec![PromptChoice::Cancel]);
        let outcome = files.lock_selected(&[0, 1], ShareMode::NONE, &mut prompt);

        assert!(outcome.cancelled);
        // The second item was never processed.
        assert!(!files.get(1).unwrap().is_locked());
    }

    #[test]
    fn remove_releases_then_detaches() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["a.txt", "b.txt", "c.txt"]);

        let mut files = FileCollection::new();
        files.add_paths(paths, Some(ShareMode::NONE), &mut silent());

        let removed = files.remove_selected(&[2, 0]);
        assert_eq!(removed, 2);
        assert_eq!(files.len(), 1);
        assert_eq!(files.get(0).unwrap().file_name(), "b.txt");
    }

    #[test]
    fn remove_tolerates_stale_indices() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures(&dir, &["only.txt"]);

        let mut files = FileCollection::new();
        files.add_paths(paths, None, &mut silent());

        let removed = files.remove_selected(&[5, 0, 0]);
        assert_eq!(removed, 1);
        assert!(files.is_empty());
    }
}
