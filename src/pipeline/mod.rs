// Check pipeline: fetch -> diff -> notify -> merge + prune -> persist.

pub mod diff;
pub mod run;
