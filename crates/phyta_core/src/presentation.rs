//! Outbound notifications for whatever is drawing the world.
//!
//! The engine never calls a sink directly. Callers take the events from a
//! [`TickReport`](crate::world::TickReport) and pass them to [`dispatch`].

use phyta_data::{Color, OrganismId, Position, WorldEvent};

/// Receives placement and removal notifications.
pub trait PresentationSink {
    fn on_create(&mut self, id: OrganismId, position: Position, color: Color);

    fn on_destroy(&mut self, id: OrganismId, position: Position);

    /// Full event access. The default forwards to the two callbacks above.
    fn on_event(&mut self, event: &WorldEvent) {
        match *event {
            WorldEvent::Created {
                id, position, color, ..
            } => self.on_create(id, position, color),
            WorldEvent::Destroyed { id, position, .. } => self.on_destroy(id, position),
        }
    }

    /// Called once after a batch has been dispatched.
    fn flush(&mut self) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_create(&mut self, _id: OrganismId, _position: Position, _color: Color) {}

    fn on_destroy(&mut self, _id: OrganismId, _position: Position) {}
}

/// Feeds `events` to `sink` in order, then flushes it.
pub fn dispatch<S: PresentationSink + ?Sized>(events: &[WorldEvent], sink: &mut S) {
    for event in events {
        sink.on_event(event);
    }
    sink.flush();
}
