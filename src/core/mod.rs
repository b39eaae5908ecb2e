pub mod logging;

// Universal search: normalization + classification + scoring + ranking + orchestration
pub mod search;
