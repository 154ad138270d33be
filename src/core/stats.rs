use std::collections::VecDeque;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::Document;

/// Length of the sliding request window, in ticks. One query is one tick.
pub const REQUEST_WINDOW_TICKS: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct RequestEntry {
    tick: u64,
    empty: bool,
}

/// Sliding window over recent requests counting the ones that came back
/// empty.
///
/// The running counter always equals the number of empty-result entries
/// whose tick still lies inside the window.
#[derive(Debug, Default)]
pub struct RequestWindow {
    entries: VecDeque<RequestEntry>,
    current_tick: u64,
    empty_count: usize,
}

impl RequestWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the default ranked query against `engine` and records whether
    /// it came back empty.
    pub fn add_find_request(
        &mut self,
        engine: &SearchEngine,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        let results = engine.find_top(raw_query)?;
        self.record_results(&results);
        Ok(results)
    }

    /// Records one finished request, advancing the virtual clock and
    /// evicting entries that fell out of the window.
    pub fn record_results(&mut self, results: &[Document]) {
        self.current_tick += 1;
        let empty = results.is_empty();
        if empty {
            self.empty_count += 1;
        }
        self.entries.push_back(RequestEntry {
            tick: self.current_tick,
            empty,
        });
        while let Some(front) = self.entries.front() {
            if front.tick + REQUEST_WINDOW_TICKS > self.current_tick {
                break;
            }
            if front.empty {
                self.empty_count -= 1;
            }
            self.entries.pop_front();
        }
    }

    /// Number of empty-result requests inside the window.
    pub fn no_result_requests(&self) -> usize {
        self.empty_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocId;

    fn hit() -> Vec<Document> {
        vec![Document {
            id: DocId(1),
            relevance: 0.5,
            rating: 2,
        }]
    }

    #[test]
    fn counts_empty_requests() {
        let mut window = RequestWindow::new();
        window.record_results(&[]);
        window.record_results(&hit());
        window.record_results(&[]);
        assert_eq!(window.no_result_requests(), 2);
    }

    #[test]
    fn old_entries_fall_out_of_the_window() {
        let mut window = RequestWindow::new();
        for _ in 0..1439 {
            window.record_results(&[]);
        }
        assert_eq!(window.no_result_requests(), 1439);

        // Tick 1440 still keeps every earlier entry in the window.
        window.record_results(&hit());
        assert_eq!(window.no_result_requests(), 1439);

        // Each further request pushes one old empty entry out.
        window.record_results(&hit());
        assert_eq!(window.no_result_requests(), 1438);
        window.record_results(&hit());
        assert_eq!(window.no_result_requests(), 1437);
    }

    #[test]
    fn window_full_of_hits_counts_zero() {
        let mut window = RequestWindow::new();
        for _ in 0..2000 {
            window.record_results(&hit());
        }
        assert_eq!(window.no_result_requests(), 0);
    }
}
