//! Module clients, one per eCX resource group.
//!
//! Each sub-client is a thin parameter-shaping layer over the shared
//! dispatcher: endpoint paths and option shapes in, raw responses out.
//! Response bodies are never interpreted here, with one exception — the
//! group file-download flow follows a hypermedia link out of the metadata
//! body.

pub mod alerts;
pub mod groups;
pub mod index;
pub mod mal_ip;
pub mod phish;
pub mod query;
pub mod report_phishing;
