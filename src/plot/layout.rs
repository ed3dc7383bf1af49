use std::collections::HashMap;

use git2::Oid;

use crate::git::CommitInfo;
use crate::plot::{PlotCommit, PlotLane};

/// Lane assignment over a topologically ordered commit list
pub struct PlotCommitList {
    commits: Vec<PlotCommit>,
    /// Active lanes (which commit ID each lane is heading towards, if any)
    active_lanes: Vec<Option<Oid>>,
    /// Number of lanes needed to draw the widest row
    lane_count: usize,
}

impl PlotCommitList {
    pub fn new() -> Self {
        Self {
            commits: Vec::new(),
            active_lanes: Vec::new(),
            lane_count: 0,
        }
    }

    /// Lay out `commits` (children before parents). `refs` maps commit ids to
    /// the full names of the refs pointing at them.
    pub fn build(commits: &[CommitInfo], refs: &HashMap<Oid, Vec<String>>) -> Self {
        let mut list = Self::new();

        let commit_indices: HashMap<Oid, usize> = commits
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        for (row, commit) in commits.iter().enumerate() {
            let before = list.active_lanes.clone();

            // Find lane for this commit (may already be reserved by a child).
            // Parents join an existing lane, so at most one lane tracks an id.
            let (lane, has_children) = list.find_or_assign_lane(commit.id);

            let (parent_lanes, boundary) =
                list.update_lanes_for_parents(commit, lane, row, &commit_indices);

            // Lanes untouched by this row pass straight through it
            let passing_lanes = before
                .iter()
                .enumerate()
                .filter(|&(i, occupant)| {
                    i != lane
                        && occupant.is_some_and(|id| id != commit.id)
                        && list.active_lanes.get(i) == Some(occupant)
                })
                .map(|(i, _)| PlotLane::new(i))
                .collect();

            list.update_peak(lane);

            list.commits.push(PlotCommit {
                id: commit.id,
                row,
                lane: PlotLane::new(lane),
                passing_lanes,
                parent_lanes,
                has_children,
                boundary,
                refs: refs.get(&commit.id).cloned().unwrap_or_default(),
                short_message: commit.summary.clone(),
                author: commit.author.clone(),
                author_email: commit.email.clone(),
                author_time: commit.time,
                author_offset: commit.offset_minutes,
            });
        }

        tracing::debug!(
            commits = list.commits.len(),
            lanes = list.lane_count,
            "plotted commit list"
        );
        list
    }

    /// Find the lowest-numbered free lane, or allocate a new one
    fn lowest_free_lane(&mut self) -> usize {
        for (lane, occupant) in self.active_lanes.iter().enumerate() {
            if occupant.is_none() {
                return lane;
            }
        }
        let lane = self.active_lanes.len();
        self.active_lanes.push(None);
        lane
    }

    fn find_or_assign_lane(&mut self, id: Oid) -> (usize, bool) {
        if let Some(lane) = self.tracking_lane(id) {
            return (lane, true);
        }
        // Branch tip or orphan
        (self.lowest_free_lane(), false)
    }

    fn tracking_lane(&self, id: Oid) -> Option<usize> {
        self.active_lanes.iter().position(|o| *o == Some(id))
    }

    fn update_lanes_for_parents(
        &mut self,
        commit: &CommitInfo,
        commit_lane: usize,
        row: usize,
        commit_indices: &HashMap<Oid, usize>,
    ) -> (Vec<PlotLane>, bool) {
        while self.active_lanes.len() <= commit_lane {
            self.active_lanes.push(None);
        }
        self.active_lanes[commit_lane] = None;

        let mut parent_lanes = Vec::with_capacity(commit.parent_ids.len());
        let mut boundary = false;

        for (i, &parent_id) in commit.parent_ids.iter().enumerate() {
            let visible = commit_indices.get(&parent_id).is_some_and(|&idx| idx > row);
            if !visible {
                boundary = true;
                continue;
            }

            // Join a lane already heading to this parent
            if let Some(lane) = self.tracking_lane(parent_id) {
                parent_lanes.push(PlotLane::new(lane));
                continue;
            }

            // First parent continues straight down, merge sources take a free lane
            let lane = if i == 0 { commit_lane } else { self.lowest_free_lane() };
            self.active_lanes[lane] = Some(parent_id);
            parent_lanes.push(PlotLane::new(lane));
        }

        (parent_lanes, boundary)
    }

    fn update_peak(&mut self, commit_lane: usize) {
        let highest = self
            .active_lanes
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1);
        self.lane_count = self.lane_count.max(highest).max(commit_lane + 1);
    }

    pub fn commits(&self) -> &[PlotCommit] {
        &self.commits
    }

    pub fn get(&self, row: usize) -> Option<&PlotCommit> {
        self.commits.get(row)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Lanes needed for the widest row
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

impl Default for PlotCommitList {
    fn default() -> Self {
        Self::new()
    }
}
