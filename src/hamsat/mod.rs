// hams.at API: alert models and the authenticated HTTP fetcher.
//
// hams.at publishes upcoming satellite activations ("alerts"). We only read
// the upcoming-alerts endpoint, which requires a bearer API key.

pub mod client;
pub mod models;
