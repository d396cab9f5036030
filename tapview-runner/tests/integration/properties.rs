// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    arbitrary::any,
    collection::{btree_set, vec},
    prop_assert, prop_assert_eq,
    strategy::Strategy,
};
use std::collections::{BTreeSet, HashMap};
use tap_report::{RawStatus, TestResult, TestSet};
use tapview_runner::{
    history::HistoryWalker,
    job::{BuildRecord, Job, JobLookup, JobRegistry},
    view::classify_build,
};
use test_strategy::proptest;

#[proptest(cases = 64)]
fn history_is_bounded_and_newest_first(
    #[strategy(btree_set(1u32..500, 0..30))] numbers: BTreeSet<u32>,
    #[strategy(1usize..20)] max_builds: usize,
) {
    let mut job = Job::new("app");
    // Insert oldest first, the chain sorts them.
    job.set_builds(numbers.iter().map(|&number| BuildRecord::new(number)));
    let registry: JobRegistry = [job].into_iter().collect();
    let walker = HistoryWalker::new(&registry, max_builds);

    let history = walker.history(registry.job("app").expect("job was added"));
    prop_assert_eq!(history.len(), numbers.len().min(max_builds));

    let expected: Vec<_> = numbers.iter().rev().take(max_builds).copied().collect();
    let actual: Vec<_> = history.iter().map(|entry| entry.build.get()).collect();
    prop_assert_eq!(actual, expected);
    for (index, entry) in history.iter().enumerate() {
        prop_assert_eq!(entry.position, index);
    }
}

fn description() -> impl Strategy<Value = String> {
    "[a-z ]{1,12}"
}

#[proptest(cases = 64)]
fn identifiers_are_unique_and_referenced_once(
    #[strategy(vec((any::<bool>(), description(), 0usize..3), 0..12))] tests: Vec<(
        bool,
        String,
        usize,
    )>,
) {
    let mut test_set = TestSet::new("prop.tap");
    for (ok, description, output_len) in &tests {
        let status = if *ok { RawStatus::Ok } else { RawStatus::NotOk };
        let mut result = TestResult::new(status, description.clone());
        for index in 0..*output_len {
            result.add_output(format!("key{index}"), "value");
        }
        test_set.add_test_result(result);
    }
    let page = classify_build(&[test_set].into_iter().collect())
        .expect("identifiers within one file never collide");

    let ids: Vec<_> = page.ids().map(|id| id.as_str()).collect();
    let unique: BTreeSet<_> = ids.iter().copied().collect();
    prop_assert_eq!(unique.len(), ids.len());

    let mut references: HashMap<&str, usize> = HashMap::new();
    for link in page.nav_links() {
        *references.entry(link.target.as_str()).or_default() += 1;
    }
    prop_assert_eq!(references.len(), ids.len());
    prop_assert!(references.values().all(|&count| count == 1));
}
