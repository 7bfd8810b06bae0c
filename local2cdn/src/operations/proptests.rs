//! Property-based tests for run planning.

use super::plan::{RunPlan, RunWarning};
use super::store::DocumentStore;
use crate::config::{FileGroup, SourceList};
use crate::error::Result;
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

struct Existing(HashSet<PathBuf>);

impl DocumentStore for Existing {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    fn read(&self, _path: &Path) -> Result<String> {
        Ok(String::new())
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<()> {
        Ok(())
    }
}

fn group_strategy() -> impl Strategy<Value = (Vec<(String, bool)>, String)> {
    (
        prop::collection::vec(("[a-z]{1,6}\\.(html|css)", any::<bool>()), 1..5),
        "out/[a-z]{1,6}",
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    /// The chosen source is always the first existing one.
    #[test]
    fn planned_source_is_first_existing(groups in prop::collection::vec(group_strategy(), 0..6)) {
        let mut existing = HashSet::new();
        let file_groups: Vec<FileGroup> = groups
            .iter()
            .map(|(srcs, dest)| {
                for (path, exists) in srcs {
                    if *exists {
                        existing.insert(PathBuf::from(path));
                    }
                }
                FileGroup {
                    src: SourceList(srcs.iter().map(|(p, _)| PathBuf::from(p)).collect()),
                    dest: PathBuf::from(dest),
                }
            })
            .collect();
        let store = Existing(existing);

        let plan = RunPlan::build(&file_groups, &store);
        prop_assert_eq!(plan.groups.len(), file_groups.len());

        for (planned, group) in plan.groups.iter().zip(&file_groups) {
            let expected = group.src.paths().iter().find(|p| store.exists(p)).cloned();
            prop_assert_eq!(&planned.source, &expected);
            prop_assert_eq!(&planned.dest, &group.dest);

            let skipped = planned
                .warnings
                .iter()
                .any(|w| matches!(w, RunWarning::NoValidSource { .. }));
            prop_assert_eq!(skipped, expected.is_none());
        }
    }

    /// Every missing source is reported exactly once per occurrence.
    #[test]
    fn missing_sources_all_reported((srcs, dest) in group_strategy()) {
        let store = Existing(
            srcs.iter().filter(|(_, e)| *e).map(|(p, _)| PathBuf::from(p)).collect(),
        );
        let group = FileGroup {
            src: SourceList(srcs.iter().map(|(p, _)| PathBuf::from(p)).collect()),
            dest: PathBuf::from(dest),
        };
        let plan = RunPlan::build(&[group.clone()], &store);

        let missing = group.src.paths().iter().filter(|p| !store.exists(p)).count();
        let reported = plan
            .warnings()
            .filter(|w| matches!(w, RunWarning::SourceMissing { .. }))
            .count();
        prop_assert_eq!(reported, missing);
    }
}
