// hamsalert: desktop notifications for new hams.at satellite alerts.
//
// This is the library root. Each module corresponds to one stage of the
// check run: fetch, remember, diff, notify, present.

pub mod config;
pub mod hamsat;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod state;
