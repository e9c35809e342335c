// Persisted state: the set of alert IDs we've already notified about.

pub mod store;

use std::collections::BTreeSet;

use crate::hamsat::models::AlertId;

/// Alert IDs already notified. Ordered so the on-disk array is stable.
pub type SeenSet = BTreeSet<AlertId>;
