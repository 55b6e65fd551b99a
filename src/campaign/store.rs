#![cfg(feature = "std")]

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;

use super::maps::CAMPAIGN_CITIES;
use super::progress::{Campaign, CampaignProgress};
use crate::common::Orientation;

/// Key under which campaign progress is stored.
pub const STORAGE_KEY: &str = "squart:story-progress:v1";

/// String key/value persistence for campaign progress.
pub trait ProgressStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Volatile store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', "_")))
    }
}

impl ProgressStore for FileStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Writes a sibling temp file and renames it over the target, so readers
    /// see either the previous blob or the new one.
    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
            file.write_all(value.as_bytes())
                .and_then(|()| file.sync_all())
                .with_context(|| format!("writing {}", tmp.display()))?;
        }
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))
    }
}

/// A [`Campaign`] whose every change is written through to a store.
#[derive(Debug)]
pub struct PersistentCampaign<S: ProgressStore> {
    campaign: Campaign,
    store: S,
}

impl<S: ProgressStore> PersistentCampaign<S> {
    /// Load saved progress, falling back to a fresh campaign when nothing is
    /// stored or the stored blob does not parse.
    pub fn open(store: S) -> anyhow::Result<Self> {
        let progress = match store.load(STORAGE_KEY)? {
            Some(text) => match serde_json::from_str::<CampaignProgress>(&text) {
                Ok(progress) => progress,
                Err(e) => {
                    log::warn!("discarding unreadable campaign progress: {}", e);
                    CampaignProgress::default()
                }
            },
            None => CampaignProgress::default(),
        };
        let campaign = Campaign::from_progress(CAMPAIGN_CITIES, progress);
        let mut store = store;
        persist(&mut store, &campaign)?;
        Ok(Self { campaign, store })
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Record a mission result and save. Nothing changes if saving fails.
    pub fn record_result(
        &mut self,
        city_id: &str,
        neighborhood_id: &str,
        winner: Option<Orientation>,
    ) -> anyhow::Result<()> {
        let mut next = self.campaign.clone();
        next.record_result(city_id, neighborhood_id, winner)?;
        self.commit(next)
    }

    pub fn reset(&mut self) -> anyhow::Result<()> {
        let mut next = self.campaign.clone();
        next.reset();
        self.commit(next)
    }

    fn commit(&mut self, next: Campaign) -> anyhow::Result<()> {
        persist(&mut self.store, &next)?;
        self.campaign = next;
        Ok(())
    }
}

fn persist<S: ProgressStore>(store: &mut S, campaign: &Campaign) -> anyhow::Result<()> {
    let text = serde_json::to_string(campaign.progress()).context("encoding campaign progress")?;
    store.save(STORAGE_KEY, &text)
}
