//! Search progress forwarded over a channel, for renderers that must not
//! hold the grid lock.

use std::sync::mpsc::Sender;

use relief_core::{Grid, Point};
use relief_paths::{SearchObserver, SearchOutcome};

/// One unit of search progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SearchEvent {
    Visited(Point),
    Finished(SearchOutcome),
    Revealed(Point, f64),
}

/// A [`SearchObserver`] that sends every event down a channel.
///
/// A dropped receiver is not an error: events are simply discarded.
pub struct EventSender(pub Sender<SearchEvent>);

impl SearchObserver for EventSender {
    fn visited(&mut self, _grid: &Grid, p: Point) {
        let _ = self.0.send(SearchEvent::Visited(p));
    }

    fn finished(&mut self, outcome: &SearchOutcome) {
        let _ = self.0.send(SearchEvent::Finished(*outcome));
    }

    fn revealed(&mut self, p: Point, progress: f64) {
        let _ = self.0.send(SearchEvent::Revealed(p, progress));
    }
}
