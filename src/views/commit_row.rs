use chrono::{DateTime, FixedOffset};

use crate::plot::PlotCommit;
use crate::renderer::{PlotRenderer, Surface};
use crate::ui::TextMeasure;

/// One row of the history list.
///
/// The host changes the commit with [`CommitRow::set_commit`], which only marks
/// the row dirty; drawing happens when the host calls [`CommitRow::render`].
#[derive(Debug, Default)]
pub struct CommitRow {
    commit: Option<PlotCommit>,
    tooltip: Option<String>,
    width: f32,
    dirty: bool,
}

impl CommitRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_commit(&mut self, commit: Option<PlotCommit>) {
        self.tooltip = commit.as_ref().map(author_ident);
        self.commit = commit;
        self.dirty = true;
    }

    pub fn commit(&self) -> Option<&PlotCommit> {
        self.commit.as_ref()
    }

    /// Author ident of the bound commit: `name <email> date`
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Needs a repaint since the commit last changed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Width used by the last render
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Draw the row and remember the width it took
    pub fn render<M: TextMeasure, S: Surface + ?Sized>(
        &mut self,
        renderer: &PlotRenderer<M>,
        surface: &mut S,
    ) -> f32 {
        self.width = renderer.draw_commit(self.commit.as_ref(), surface);
        self.dirty = false;
        self.width
    }
}

/// `Name <email> Tue Nov 14 22:13:20 2023 +0100`, dropping the date when the
/// stored time or offset is out of range
fn author_ident(commit: &PlotCommit) -> String {
    let ident = format!("{} <{}>", commit.author, commit.author_email);
    let date = FixedOffset::east_opt(commit.author_offset * 60).and_then(|tz| {
        DateTime::from_timestamp(commit.author_time, 0).map(|utc| utc.with_timezone(&tz))
    });
    match date {
        Some(date) => format!("{ident} {}", date.format("%a %b %e %H:%M:%S %Y %z")),
        None => ident,
    }
}
