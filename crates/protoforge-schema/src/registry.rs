use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, LazyLock, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::{CorpusHarvester, ScanConfig, SchemaCatalog, SchemaEntry, SourceScanner};

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::default);

enum State {
    Empty,
    Building(PathBuf),
    Ready {
        root: PathBuf,
        catalog: Arc<SchemaCatalog>,
    },
}

struct Inner {
    state: State,
    builds_completed: usize,
}

/// Build-once cache of the schema catalog for one repository root.
///
/// At most one build runs at a time. Callers arriving during a build wait
/// for it and never see a partial catalog.
pub struct SchemaRegistry {
    scanner: SourceScanner,
    harvester: CorpusHarvester,
    inner: Mutex<Inner>,
    changed: Condvar,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl SchemaRegistry {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            scanner: SourceScanner::new(config.clone()),
            harvester: CorpusHarvester::new(config),
            inner: Mutex::new(Inner {
                state: State::Empty,
                builds_completed: 0,
            }),
            changed: Condvar::new(),
        }
    }

    /// Process-wide registry with the default configuration.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Catalog for `root`, scanning only when it is not cached yet.
    ///
    /// A cached catalog for a different root is replaced.
    pub fn build(&self, root: &Path) -> Arc<SchemaCatalog> {
        let mut inner = self.wait_idle(self.lock());
        if let State::Ready { root: built, catalog } = &inner.state
            && built == root
        {
            debug!(root = %root.display(), "schema catalog already built");
            return catalog.clone();
        }
        inner.state = State::Building(root.to_path_buf());
        drop(inner);

        let mut guard = BuildGuard {
            registry: self,
            finished: false,
        };
        let catalog = Arc::new(self.scan(root));

        let mut inner = self.lock();
        inner.state = State::Ready {
            root: root.to_path_buf(),
            catalog: catalog.clone(),
        };
        inner.builds_completed += 1;
        guard.finished = true;
        drop(inner);
        self.changed.notify_all();
        catalog
    }

    fn scan(&self, root: &Path) -> SchemaCatalog {
        let mut entries = self.scanner.scan(root);
        let report = self.harvester.harvest_and_merge(root, &mut entries);
        info!(
            root = %root.display(),
            corpus_files = report.files_parsed,
            "scanned {} component entries",
            entries.len()
        );
        SchemaCatalog::new(entries)
    }

    /// Drop the cached catalog, after any running build finishes.
    pub fn invalidate(&self) {
        let mut inner = self.wait_idle(self.lock());
        inner.state = State::Empty;
    }

    /// The cached catalog, if a build has finished.
    pub fn snapshot(&self) -> Option<Arc<SchemaCatalog>> {
        match &self.wait_idle(self.lock()).state {
            State::Ready { catalog, .. } => Some(catalog.clone()),
            _ => None,
        }
    }

    /// Suffix-tolerant lookup in the cached catalog.
    pub fn lookup(&self, name: &str) -> Option<SchemaEntry> {
        self.snapshot()?.lookup(name).cloned()
    }

    pub fn entries(&self) -> Vec<SchemaEntry> {
        self.snapshot()
            .map(|catalog| catalog.entries().cloned().collect())
            .unwrap_or_default()
    }

    /// Root of the cached catalog.
    pub fn built_root(&self) -> Option<PathBuf> {
        match &self.wait_idle(self.lock()).state {
            State::Ready { root, .. } => Some(root.clone()),
            _ => None,
        }
    }

    /// Number of scans actually performed.
    pub fn builds_completed(&self) -> usize {
        self.lock().builds_completed
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_idle<'a>(&self, guard: MutexGuard<'a, Inner>) -> MutexGuard<'a, Inner> {
        self.changed
            .wait_while(guard, |inner| matches!(inner.state, State::Building(_)))
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets a build that unwound before finishing, so waiters are released.
struct BuildGuard<'a> {
    registry: &'a SchemaRegistry,
    finished: bool,
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.registry.lock().state = State::Empty;
        self.registry.changed.notify_all();
    }
}
