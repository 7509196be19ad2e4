//! JSON codec for the research and project lists stored inside single CV fields.
//!
//! Independent of the outer file codec: a corrupt payload here only empties
//! its own list.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::models::cv::{ProjectEntry, ResearchEntry};

pub fn decode_research(text: &str) -> Vec<ResearchEntry> {
    decode_list(text, "research")
}

pub fn decode_projects(text: &str) -> Vec<ProjectEntry> {
    decode_list(text, "project")
}

pub fn encode_research(entries: &[ResearchEntry]) -> String {
    encode_list(entries)
}

pub fn encode_projects(entries: &[ProjectEntry]) -> String {
    encode_list(entries)
}

/// Blank text, JSON `null` and malformed JSON all decode to an empty list.
fn decode_list<T: DeserializeOwned>(text: &str, kind: &str) -> Vec<T> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Option<Vec<T>>>(text) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) => {
            warn!("Discarding malformed {kind} list: {e}");
            Vec::new()
        }
    }
}

fn encode_list<T: Serialize>(entries: &[T]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string())
}
