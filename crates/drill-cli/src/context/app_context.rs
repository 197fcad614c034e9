use std::collections::BTreeMap;

use anyhow::Context;
use drill_config::DrillConfig;
use drill_core::entities::{MetadataRecord, StudyItem};
use drill_core::ids::PointId;
use drill_core::responses::{SyncResponse, UncertaintyReport};
use drill_core::scheduler::Scheduler;
use drill_parser::{ParsedFile, allocate_and_persist, discover, parse_file};
use drill_store::MetadataStore;

/// Compiled study sets and the store they were reconciled against.
///
/// Building one runs every step that can fail on bad input (discovery,
/// parsing, allocation and rewrite, store load and registration) so errors
/// surface before any interaction starts.
pub struct AppContext {
    pub config: DrillConfig,
    pub store: MetadataStore,
    /// Every point of the corpus, file order then line order.
    pub items: Vec<StudyItem>,
    pub uncertainties: Vec<UncertaintyReport>,
    pub sync: SyncResponse,
}

impl AppContext {
    pub fn init(config: DrillConfig) -> anyhow::Result<Self> {
        let paths = discover(&config.sources).context("failed to discover study sets")?;
        if paths.is_empty() {
            tracing::warn!("no study sets found in the configured sources");
        }

        let files = paths
            .iter()
            .map(|path| parse_file(path))
            .collect::<Result<Vec<ParsedFile>, _>>()?;
        let uncertainties = collect_uncertainties(&files);

        let mut store = MetadataStore::load(&config.store.path)?;
        let allocation = allocate_and_persist(files, &store.ids())?;
        let registered = store.ensure_entries(allocation.ids());

        let items = allocation
            .points
            .iter()
            .map(|allocated| {
                let point = allocated.point.clone();
                let id = point.id.context("allocated point has no identifier")?;
                let record = store.get(id)?;
                Ok(StudyItem::new(point, record)?)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let sync = SyncResponse {
            files: paths.len(),
            points: items.len(),
            assigned: allocation.assigned(),
            rewritten_files: allocation.rewritten_files,
            registered,
        };
        tracing::debug!(
            files = sync.files,
            points = sync.points,
            assigned = sync.assigned.len(),
            registered,
            "compiled study sets"
        );

        Ok(Self {
            config,
            store,
            items,
            uncertainties,
            sync,
        })
    }

    /// The scheduled study queue.
    pub fn queue(&self) -> anyhow::Result<Vec<StudyItem>> {
        let scheduler = Scheduler::new(self.config.study.schedule_options())?;
        Ok(scheduler.select_and_order(self.items.clone()))
    }

    /// Write records registered during this run, if there were any.
    pub fn persist_registrations(&mut self) -> anyhow::Result<()> {
        if self.sync.registered == 0 {
            return Ok(());
        }
        self.store
            .commit(&BTreeMap::new())
            .context("failed to register new points in the metadata store")
    }

    /// Commit session outcomes, retrying once. When both attempts fail the
    /// outcomes are saved to the pending file next to the store.
    pub fn commit_session(
        &mut self,
        updates: &BTreeMap<PointId, MetadataRecord>,
    ) -> anyhow::Result<()> {
        if updates.is_empty() && self.sync.registered == 0 {
            return Ok(());
        }

        let first = match self.store.commit(updates) {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };
        tracing::warn!(error = %first, "metadata commit failed; retrying once");

        let second = match self.store.commit(updates) {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };

        match self.store.write_pending(updates) {
            Ok(pending) => Err(anyhow::Error::new(second).context(format!(
                "failed to commit session; outcomes saved to {}",
                pending.display()
            ))),
            Err(pending_error) => {
                tracing::error!(error = %pending_error, "could not save session outcomes");
                Err(anyhow::Error::new(second).context("failed to commit session; outcomes lost"))
            }
        }
    }
}

fn collect_uncertainties(files: &[ParsedFile]) -> Vec<UncertaintyReport> {
    files
        .iter()
        .filter(|file| !file.uncertainties.is_empty())
        .map(|file| UncertaintyReport {
            source: file.path.clone(),
            lines: file.uncertainties.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use drill_core::enums::Outcome;
    use drill_core::session::SessionState;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn config(temp: &TempDir, sources: Vec<PathBuf>) -> DrillConfig {
        let mut config = DrillConfig {
            sources,
            ..DrillConfig::default()
        };
        config.store.path = temp.path().join("metadata.json");
        config
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("fixture should write");
        path
    }

    fn store_json(temp: &TempDir) -> serde_json::Value {
        let content =
            std::fs::read_to_string(temp.path().join("metadata.json")).expect("store should exist");
        serde_json::from_str(&content).expect("store should be JSON")
    }

    #[test]
    fn first_question_is_studied_and_committed() {
        let temp = TempDir::new().unwrap();
        let deck = write(temp.path(), "math.txt", "What is 2+2??\n4\n");

        let mut ctx = AppContext::init(config(&temp, vec![deck.clone()])).unwrap();
        assert_eq!(std::fs::read_to_string(&deck).unwrap(), "What is 2+2?? 1\n4\n");
        assert_eq!(ctx.sync.assigned, vec![1]);

        let queue = ctx.queue().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].point.question, "What is 2+2?");
        assert_eq!(queue[0].point.answer, "4");

        let mut state = SessionState::new(&queue);
        state.record_outcome(1, Outcome::Succeeded).unwrap();
        ctx.commit_session(&state.updates()).unwrap();

        assert_eq!(
            store_json(&temp),
            serde_json::json!({
                "1": {"total_attempt_count": 1, "successful_attempt_count": 1, "is_hidden": false}
            })
        );
    }

    #[test]
    fn teardown_touches_only_seen_points() {
        let temp = TempDir::new().unwrap();
        let deck = write(
            temp.path(),
            "deck.txt",
            "#!drill\nA?\na\nB?\nb\nC?\nc\nD?\nd\n# not sure about D\n",
        );

        let mut ctx = AppContext::init(config(&temp, vec![deck])).unwrap();
        let queue = ctx.queue().unwrap();
        let mut state = SessionState::new(&queue);
        state.record_outcome(1, Outcome::Succeeded).unwrap();
        state.record_outcome(2, Outcome::Failed).unwrap();
        state.record_outcome(3, Outcome::Succeeded).unwrap();
        ctx.commit_session(&state.updates()).unwrap();

        let store = store_json(&temp);
        assert_eq!(store["1"]["successful_attempt_count"], 1);
        assert_eq!(store["2"]["total_attempt_count"], 1);
        assert_eq!(store["2"]["successful_attempt_count"], 0);
        assert_eq!(store["3"]["total_attempt_count"], 1);
        assert_eq!(
            store["4"],
            serde_json::json!({"total_attempt_count": 0, "successful_attempt_count": 0, "is_hidden": false})
        );
        assert_eq!(
            ctx.uncertainties,
            vec![UncertaintyReport {
                source: temp.path().join("deck.txt"),
                lines: vec!["# not sure about D".into()],
            }]
        );
    }

    #[test]
    fn directories_only_yield_shebang_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "deck.txt", "#!drill\nQ?\na\n");
        write(temp.path(), "notes.txt", "Unrelated?\nnot a deck\n");

        let ctx = AppContext::init(config(&temp, vec![temp.path().to_path_buf()])).unwrap();

        assert_eq!(ctx.sync.files, 1);
        assert_eq!(ctx.items.len(), 1);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("notes.txt")).unwrap(),
            "Unrelated?\nnot a deck\n"
        );
    }

    #[test]
    fn corrupt_store_aborts_before_rewriting_sources() {
        let temp = TempDir::new().unwrap();
        let deck = write(temp.path(), "deck.txt", "Q?\na\n");
        std::fs::write(temp.path().join("metadata.json"), "not json").unwrap();

        let result = AppContext::init(config(&temp, vec![deck.clone()]));

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&deck).unwrap(), "Q?\na\n");
        assert_eq!(
            std::fs::read_to_string(temp.path().join("metadata.json")).unwrap(),
            "not json"
        );
    }

    #[test]
    fn unwritable_store_falls_back_to_pending_file() {
        let temp = TempDir::new().unwrap();
        let deck = write(temp.path(), "deck.txt", "A?\na\nB?\nb\n");
        let mut ctx = AppContext::init(config(&temp, vec![deck])).unwrap();

        let queue = ctx.queue().unwrap();
        let mut state = SessionState::new(&queue);
        state.record_outcome(2, Outcome::Failed).unwrap();
        let updates = state.updates();

        let store_path = temp.path().join("metadata.json");
        std::fs::remove_file(&store_path).unwrap();
        std::fs::create_dir(&store_path).unwrap();

        let err = ctx.commit_session(&updates).unwrap_err();

        assert!(format!("{err:#}").contains("outcomes saved to"));
        let pending = temp.path().join("metadata.json.pending.json");
        let content = std::fs::read_to_string(pending).expect("pending file should exist");
        let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({"2": {"total_attempt_count": 1, "successful_attempt_count": 0, "is_hidden": false}})
        );
        assert_eq!(ctx.store.get(2).unwrap(), MetadataRecord::default());
    }

    #[test]
    fn registrations_are_persisted_once() {
        let temp = TempDir::new().unwrap();
        let deck = write(temp.path(), "deck.txt", "Q? 4\na\nR?\nb\n");

        let mut ctx = AppContext::init(config(&temp, vec![deck])).unwrap();
        assert_eq!(ctx.sync.registered, 2);
        ctx.persist_registrations().unwrap();

        let store = store_json(&temp);
        assert_eq!(store.as_object().map(serde_json::Map::len), Some(2));
        assert!(store.get("4").is_some());
        assert!(store.get("5").is_some());
    }
}
