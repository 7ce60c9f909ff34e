//! Event bus with pluggable sinks.
//!
//! The bus is frame-aware: [`EventBus::begin_frame`] sets the frame that
//! [`EventBus::record`] stamps on each payload, and [`EventBus::end_frame`]
//! delivers everything queued for that frame. Kinds can be muted by name
//! (see [`EventKind::name`]) and delivered events are counted per kind.
//! Events travel through a `std::sync::mpsc` channel until flushed.

use std::collections::{BTreeMap, HashSet};
use std::sync::mpsc;

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Broadcast bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
    muted: HashSet<&'static str>,
    frame: u64,
    delivered: BTreeMap<&'static str, u64>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            muted: HashSet::new(),
            frame: 0,
            delivered: BTreeMap::new(),
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// A disabled bus drops every event.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drops events of the named kind until unmuted. Unknown names are
    /// ignored.
    pub fn mute(&mut self, kind: &str) {
        if let Some(name) = EventKind::NAMES.iter().find(|n| **n == kind) {
            self.muted.insert(*name);
        }
    }

    pub fn unmute(&mut self, kind: &str) {
        self.muted.remove(kind);
    }

    pub fn is_muted(&self, kind: &str) -> bool {
        self.muted.contains(kind)
    }

    /// Queues an event. No-op while disabled or when its kind is muted.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled || self.muted.contains(event.kind.name()) {
            return;
        }
        // The receiver lives as long as the bus.
        let _ = self.sender.send(event);
    }

    /// Queues `kind` stamped with the current frame.
    pub fn record(&self, kind: EventKind) {
        self.emit(SimulationEvent::new(self.frame, kind));
    }

    /// Sets the frame stamped by [`EventBus::record`].
    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Delivers the frame's events.
    pub fn end_frame(&mut self) {
        self.flush();
    }

    /// Dispatches all queued events to the registered sinks.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            *self.delivered.entry(event.kind.name()).or_insert(0) += 1;
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Flushes, then lets every sink finalize.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Delivered events per kind name since the bus was created.
    pub fn delivered(&self) -> &BTreeMap<&'static str, u64> {
        &self.delivered
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
