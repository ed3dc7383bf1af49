use git2::Oid;

use crate::error::Result;
use crate::git::GitRepo;
use crate::plot::{PlotCommit, PlotCommitList};
use crate::renderer::{DisplayList, PlotRenderer};
use crate::ui::TextMeasure;
use crate::views::CommitRow;

/// The commit list with its legend and selection notification
pub struct HistoryView {
    list: PlotCommitList,
    rows: Vec<CommitRow>,
    legend: Option<DisplayList>,
    selected: Option<usize>,
    commit_clicked: Option<Box<dyn FnMut(Oid)>>,
}

impl HistoryView {
    pub fn new() -> Self {
        Self {
            list: PlotCommitList::new(),
            rows: Vec::new(),
            legend: None,
            selected: None,
            commit_clicked: None,
        }
    }

    /// Walk `repo` (at most `max_commits`) and show the result
    pub fn load<M: TextMeasure>(
        &mut self,
        repo: &GitRepo,
        max_commits: usize,
        renderer: &PlotRenderer<M>,
    ) -> Result<()> {
        let commits = repo.commit_graph(max_commits)?;
        let refs = repo.refs_by_commit()?;
        self.update(PlotCommitList::build(&commits, &refs), renderer);
        Ok(())
    }

    /// Replace the plotted list; every row is marked for repaint
    pub fn update<M: TextMeasure>(&mut self, list: PlotCommitList, renderer: &PlotRenderer<M>) {
        self.rows = list
            .commits()
            .iter()
            .map(|c| {
                let mut row = CommitRow::new();
                row.set_commit(Some(c.clone()));
                row
            })
            .collect();
        self.list = list;
        self.selected = None;
        self.legend = Some(renderer.build_legend());
    }

    pub fn list(&self) -> &PlotCommitList {
        &self.list
    }

    pub fn rows(&self) -> &[CommitRow] {
        &self.rows
    }

    pub fn legend(&self) -> Option<&DisplayList> {
        self.legend.as_ref()
    }

    pub fn selected(&self) -> Option<&PlotCommit> {
        self.selected.and_then(|i| self.list.get(i))
    }

    /// Register the callback run when a commit gets selected
    pub fn on_commit_clicked(&mut self, callback: impl FnMut(Oid) + 'static) {
        self.commit_clicked = Some(Box::new(callback));
    }

    /// Select a row; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        let Some(id) = self.list.get(index).map(|c| c.id) else {
            return;
        };
        self.selected = Some(index);
        if let Some(callback) = self.commit_clicked.as_mut() {
            callback(id);
        }
    }

    /// Repaint dirty rows, each into its own display list, with their widths
    pub fn render_rows<M: TextMeasure>(
        &mut self,
        renderer: &PlotRenderer<M>,
    ) -> Vec<(DisplayList, f32)> {
        self.rows
            .iter_mut()
            .filter(|row| row.is_dirty())
            .map(|row| {
                let mut drawing = DisplayList::new();
                let width = row.render(renderer, &mut drawing);
                (drawing, width)
            })
            .collect()
    }
}

impl Default for HistoryView {
    fn default() -> Self {
        Self::new()
    }
}
