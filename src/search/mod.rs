pub mod filter;
pub mod ranker;
pub mod paginator;
