use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::core::engine::SearchEngine;
use crate::core::types::DocId;

/// Removes every document whose word set duplicates another document's,
/// keeping the smallest id of each group.
///
/// Word frequencies are ignored when grouping; only the set of words
/// counts. Removals happen in ascending id order, and each one writes
/// `Found duplicate document id <id>` to `sink`.
pub fn remove_duplicates(engine: &mut SearchEngine, sink: &mut dyn Write) -> io::Result<()> {
    let mut groups: BTreeMap<Vec<String>, Vec<DocId>> = BTreeMap::new();
    for id in engine.ids() {
        let words: Vec<String> = engine.word_frequencies(id).into_keys().collect();
        groups.entry(words).or_default().push(id);
    }

    // Ids were collected in ascending order, so the first of each group is
    // the smallest.
    let mut duplicates: Vec<DocId> = groups
        .into_values()
        .flat_map(|ids| ids.into_iter().skip(1))
        .collect();
    duplicates.sort_unstable();

    for id in duplicates {
        writeln!(sink, "Found duplicate document id {}", id)?;
        engine.remove_document(id);
    }
    Ok(())
}
