//! Recorded viewer sessions for `flipbook replay`.

use anyhow::{Context, Result};
use flipbook_core::Event;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Milliseconds after the start of the replay
    pub at_ms: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ScriptEntry>,
}

impl ReplayScript {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_slice(&bytes)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }

    /// Parse a script, ordering entries by time. Entries sharing a timestamp
    /// keep their written order.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut script: Self = serde_json::from_slice(bytes)?;
        script.events.sort_by_key(|entry| entry.at_ms);
        Ok(script)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.events.last().map_or(0, |entry| entry.at_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::NavigationRequest;

    #[test]
    fn demo_session_parses() {
        let script = ReplayScript::from_slice(include_bytes!("../demos/session.json")).unwrap();

        assert!(matches!(
            script.events.first().map(|entry| &entry.event),
            Some(Event::Resized { .. })
        ));
        assert!(script.events.iter().any(|entry| matches!(
            entry.event,
            Event::Navigate {
                request: NavigationRequest::Slide(_)
            }
        )));
        assert!(script.events.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    }

    #[test]
    fn entries_are_ordered_by_time() {
        let json = br#"{
            "events": [
                { "at_ms": 300, "event": { "type": "flipped", "page_index": 4 } },
                { "at_ms": 100, "event": { "type": "zoomed", "scale": 2.0 } },
                { "at_ms": 100, "event": { "type": "flipped", "page_index": 2 } }
            ]
        }"#;
        let script = ReplayScript::from_slice(json).unwrap();

        let events: Vec<_> = script.events.iter().map(|entry| &entry.event).collect();
        assert_eq!(
            events,
            vec![
                &Event::Zoomed { scale: 2.0 },
                &Event::Flipped { page_index: 2 },
                &Event::Flipped { page_index: 4 },
            ]
        );
        assert_eq!(script.duration(), Duration::from_millis(300));
    }

    #[test]
    fn invalid_metadata_is_rejected() {
        let json = br#"{
            "events": [
                { "at_ms": 0, "event": { "type": "document_loaded",
                  "metadata": { "total_pages": 0, "page_width": 600.0, "page_height": 800.0 } } }
            ]
        }"#;
        assert!(ReplayScript::from_slice(json).is_err());
    }
}
