// Output: terminal summaries and the compact widget view.

pub mod terminal;
pub mod widget;
