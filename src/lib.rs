pub mod core;
pub mod analysis;
pub mod query;
pub mod index;
pub mod search;
pub mod parallel;
pub mod maintenance;

/*
┌──────────────────────────── MINNOW STRUCT MAP ─────────────────────────────┐
│                                                                             │
│  struct SearchEngine                 // core::engine                        │
│  ├─ stop_words: StopWordSet          // analysis::stopwords                 │
│  ├─ index: InvertedIndex             // index::inverted (mirrored maps)     │
│  ├─ documents: BTreeMap<DocId, _>    // rating + status per id              │
│  └─ ids: BTreeSet<DocId>             // ascending id directory              │
│                                                                             │
│  query path:   split_words → parse_query → find_all → rank_top_documents   │
│  parallel:     rayon over plus/minus words → ConcurrentMap<f64> shards     │
│  maintenance:  remove_duplicates (word-set grouping, smallest id wins)     │
│  monitoring:   RequestWindow (1440-tick sliding window of empty results)   │
│  display:      Paginator / Page over any result slice                      │
│                                                                             │
└─────────────────────────────────────────────────────────────────────────────┘
*/
