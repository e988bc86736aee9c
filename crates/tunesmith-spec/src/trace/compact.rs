//! Size-cap compaction for persisted traces.

use super::{TraceEvent, TraceRun, TRACE_CLIP_CHARS};

impl TraceRun {
    /// Serialized JSON size in bytes.
    pub fn measured_size(&self) -> usize {
        serde_json::to_vec(self).map_or(0, |bytes| bytes.len())
    }

    /// Shrinks the trace until it serializes within `max_bytes`.
    ///
    /// Long strings inside `llm.call` events are clipped first, then the
    /// oldest decision events are dropped. `stats.truncatedForCap` is set
    /// whenever anything was clipped or removed, and `stats.sizeBytes` always
    /// holds the final size. Returns true if the trace fits.
    pub fn compact(&mut self, max_bytes: usize) -> bool {
        let mut clip_limits = [TRACE_CLIP_CHARS, TRACE_CLIP_CHARS / 8].into_iter();
        loop {
            self.refresh_stats();
            let size = self.stats.size_bytes;
            if size <= max_bytes {
                return true;
            }
            self.stats.truncated_for_cap = true;

            if let Some(limit) = clip_limits.next() {
                self.clip_llm_strings(limit);
                continue;
            }
            if !self.drop_oldest_decisions(size - max_bytes) {
                self.refresh_stats();
                return false;
            }
        }
    }

    fn refresh_stats(&mut self) {
        self.recompute_counts();
        // Twice: the size field itself contributes to the size.
        self.stats.size_bytes = self.measured_size();
        self.stats.size_bytes = self.measured_size();
    }

    fn clip_llm_strings(&mut self, limit: usize) {
        for event in &mut self.events {
            if let TraceEvent::LlmCall(call) = event {
                clip(&mut call.request.system, limit);
                clip(&mut call.request.prompt, limit);
                if let Some(response) = call.response.as_mut() {
                    clip(&mut response.text, limit);
                }
            }
        }
    }

    /// Drops decisions oldest-first until roughly `excess` bytes are freed.
    fn drop_oldest_decisions(&mut self, excess: usize) -> bool {
        let mut freed = 0;
        let mut dropped_any = false;
        while freed < excess {
            let Some(index) = self
                .events
                .iter()
                .position(|e| matches!(e, TraceEvent::Decision(_)))
            else {
                break;
            };
            let removed = self.events.remove(index);
            freed += serde_json::to_vec(&removed).map_or(1, |b| b.len() + 1);
            dropped_any = true;
        }
        dropped_any
    }
}

fn clip(text: &mut String, limit: usize) {
    if text.chars().count() > limit {
        let mut clipped: String = text.chars().take(limit).collect();
        clipped.push('…');
        *text = clipped;
    }
}
