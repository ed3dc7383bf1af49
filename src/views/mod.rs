mod commit_row;
mod history;

pub use commit_row::CommitRow;
pub use history::HistoryView;
