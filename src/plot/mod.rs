//! Plotted commits: commits annotated with a lane and the lanes that connect
//! them to their neighbours, ready to be painted one row at a time.

mod layout;

use git2::Oid;

pub use layout::PlotCommitList;

/// A vertical track in the graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotLane {
    pub position: usize,
}

impl PlotLane {
    pub const fn new(position: usize) -> Self {
        Self { position }
    }
}

/// One row of the history graph
#[derive(Clone, Debug)]
pub struct PlotCommit {
    pub id: Oid,
    pub row: usize,
    pub lane: PlotLane,
    /// Lanes crossing this row top to bottom without touching the commit
    pub passing_lanes: Vec<PlotLane>,
    /// Lane of each visible parent, in parent order
    pub parent_lanes: Vec<PlotLane>,
    /// A child line enters the commit's lane from above
    pub has_children: bool,
    /// At least one parent lies outside the walked range
    pub boundary: bool,
    /// Full ref names pointing at this commit
    pub refs: Vec<String>,
    pub short_message: String,
    pub author: String,
    pub author_email: String,
    /// Author time, seconds since the epoch
    pub author_time: i64,
    /// Author timezone, minutes east of UTC
    pub author_offset: i32,
}

impl PlotCommit {
    /// A commit with no connections, in lane 0
    pub fn new(id: Oid, short_message: impl Into<String>) -> Self {
        Self {
            id,
            row: 0,
            lane: PlotLane::new(0),
            passing_lanes: Vec::new(),
            parent_lanes: Vec::new(),
            has_children: false,
            boundary: false,
            refs: Vec::new(),
            short_message: short_message.into(),
            author: String::new(),
            author_email: String::new(),
            author_time: 0,
            author_offset: 0,
        }
    }
}
