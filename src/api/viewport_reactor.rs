use serde::{Deserialize, Serialize};
use tracing::debug;

/// Independently updating redraw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactorSource {
    /// Container size notification.
    Resize,
    /// Dataset replacement.
    Data,
    /// Explicit time-domain override set or cleared.
    TimeRange,
    /// Thresholds, series visibility or other presentation options.
    Style,
}

impl ReactorSource {
    pub const ALL: [Self; 4] = [Self::Resize, Self::Data, Self::TimeRange, Self::Style];

    const fn slot(self) -> usize {
        match self {
            Self::Resize => 0,
            Self::Data => 1,
            Self::TimeRange => 2,
            Self::Style => 3,
        }
    }
}

/// Capture of the reactor generations a redraw was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedrawTicket {
    generation: u64,
    sources: [u64; 4],
}

impl RedrawTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn source_generation(self, source: ReactorSource) -> u64 {
        self.sources[source.slot()]
    }
}

/// Latest-wins redraw scheduler over merged input sources.
///
/// Every `notify` bumps the global generation and the generation of its
/// source, and abandons the in-flight ticket. Sources are merged: a pending
/// data change never waits for a resize, the next redraw simply picks up the
/// latest value of every source at once.
#[derive(Debug, Clone, Default)]
pub struct ViewportReactor {
    generation: u64,
    sources: [u64; 4],
    pending: [bool; 4],
    in_flight: Option<RedrawTicket>,
    committed: Option<u64>,
    abandoned: u64,
}

impl ViewportReactor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new value on `source`; returns the new global generation.
    pub fn notify(&mut self, source: ReactorSource) -> u64 {
        self.generation += 1;
        self.sources[source.slot()] += 1;
        self.pending[source.slot()] = true;
        if let Some(stale) = self.in_flight.take() {
            self.abandoned += 1;
            debug!(
                stale_generation = stale.generation,
                generation = self.generation,
                ?source,
                "superseding in-flight redraw"
            );
        } else {
            debug!(generation = self.generation, ?source, "redraw requested");
        }
        self.generation
    }

    /// Starts a redraw for the current generation, replacing any ticket
    /// already in flight.
    pub fn begin_redraw(&mut self) -> RedrawTicket {
        let ticket = RedrawTicket {
            generation: self.generation,
            sources: self.sources,
        };
        if let Some(previous) = self.in_flight.replace(ticket)
            && previous != ticket
        {
            self.abandoned += 1;
        }
        ticket
    }

    #[must_use]
    pub fn is_current(&self, ticket: RedrawTicket) -> bool {
        ticket.generation == self.generation && self.in_flight == Some(ticket)
    }

    /// True when a newer value arrived on `source` after `ticket` was issued.
    #[must_use]
    pub fn is_stale_for(&self, ticket: RedrawTicket, source: ReactorSource) -> bool {
        ticket.source_generation(source) != self.sources[source.slot()]
    }

    /// Marks `ticket` applied. Stale tickets are rejected and change nothing.
    pub fn commit(&mut self, ticket: RedrawTicket) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding superseded redraw"
            );
            return false;
        }
        self.in_flight = None;
        self.pending = [false; 4];
        self.committed = Some(ticket.generation);
        true
    }

    /// Drops the in-flight ticket without applying it; pending sources stay
    /// pending so the next frame retries.
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            self.abandoned += 1;
        }
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.committed != Some(self.generation)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn source_generation(&self, source: ReactorSource) -> u64 {
        self.sources[source.slot()]
    }

    #[must_use]
    pub fn committed_generation(&self) -> Option<u64> {
        self.committed
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<RedrawTicket> {
        self.in_flight
    }

    /// Sources that changed since the last committed redraw.
    #[must_use]
    pub fn pending_sources(&self) -> Vec<ReactorSource> {
        ReactorSource::ALL
            .into_iter()
            .filter(|source| self.pending[source.slot()])
            .collect()
    }

    /// Tickets dropped because a newer generation replaced them.
    #[must_use]
    pub fn abandoned_count(&self) -> u64 {
        self.abandoned
    }
}
