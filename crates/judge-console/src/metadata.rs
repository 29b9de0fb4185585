//! Shared lookup data for filter pickers.
//!
//! Tag, topic and language lists change rarely and are needed by several
//! list screens at once. [`MetadataCache`] loads them once and hands out an
//! immutable [`MetadataSnapshot`] that readers can hold without locking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use judge_console_core::Signal;
use judge_console_core::logging::targets;
use judge_console_net::{NetworkError, RestApiClient};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::resources::{Tag, Topic};

pub const TAGS_PATH: &str = "/tags/all";
pub const TOPICS_PATH: &str = "/topics/all";
pub const LANGUAGES_PATH: &str = "/languages";

/// A programming language accepted by the judge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Everything the cache holds, loaded together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub tags: Vec<Tag>,
    pub topics: Vec<Topic>,
    pub languages: Vec<Language>,
}

impl MetadataSnapshot {
    pub fn tag(&self, id: u64) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn topic(&self, id: u64) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    pub fn language(&self, id: u64) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    /// Languages that can currently be submitted in.
    pub fn active_languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter().filter(|language| language.is_active)
    }

    /// Display name for a language id, falling back to `#<id>`.
    pub fn language_name(&self, id: u64) -> String {
        self.language(id)
            .map(|language| match &language.version {
                Some(version) => format!("{} ({version})", language.name),
                None => language.name.clone(),
            })
            .unwrap_or_else(|| format!("#{id}"))
    }
}

/// Read-mostly cache of tags, topics and languages.
///
/// Populated once; there is no invalidation.
pub struct MetadataCache {
    snapshot: RwLock<Arc<MetadataSnapshot>>,
    loaded: AtomicBool,
    loaded_signal: Signal<Arc<MetadataSnapshot>>,
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(MetadataSnapshot::default())),
            loaded: AtomicBool::new(false),
            loaded_signal: Signal::new(),
        }
    }

    /// The current snapshot. Empty until [`load`](Self::load) succeeds.
    pub fn snapshot(&self) -> Arc<MetadataSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Emitted once, when the snapshot is installed.
    pub fn loaded(&self) -> &Signal<Arc<MetadataSnapshot>> {
        &self.loaded_signal
    }

    /// Fetch all three lists and install them.
    ///
    /// Later calls return the installed snapshot without touching the
    /// network. On failure the cache stays empty and the call can be retried.
    pub async fn load(&self, client: &RestApiClient) -> Result<Arc<MetadataSnapshot>, NetworkError> {
        if self.is_loaded() {
            return Ok(self.snapshot());
        }

        let (tags, topics, languages) = tokio::try_join!(
            client.get(TAGS_PATH).envelope::<Vec<Tag>>(),
            client.get(TOPICS_PATH).envelope::<Vec<Topic>>(),
            client.get(LANGUAGES_PATH).envelope::<Vec<Language>>(),
        )
        .inspect_err(|err| {
            tracing::warn!(target: targets::METADATA, error = %err, "failed to load metadata");
        })?;

        Ok(self.install(MetadataSnapshot {
            tags,
            topics,
            languages,
        }))
    }

    /// Install a snapshot directly, unless one is already installed.
    ///
    /// Returns the snapshot in effect afterwards.
    pub fn install(&self, snapshot: MetadataSnapshot) -> Arc<MetadataSnapshot> {
        let installed = {
            let mut current = self.snapshot.write();
            if self.loaded.swap(true, Ordering::SeqCst) {
                return Arc::clone(&current);
            }
            *current = Arc::new(snapshot);
            Arc::clone(&current)
        };

        tracing::debug!(
            target: targets::METADATA,
            tags = installed.tags.len(),
            topics = installed.topics.len(),
            languages = installed.languages.len(),
            "metadata loaded"
        );
        self.loaded_signal.emit(Arc::clone(&installed));
        installed
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
