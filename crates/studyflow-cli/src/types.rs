use clap::ValueEnum;
use studyflow_engine::Period;
use studyflow_types::{AssignmentSort, Priority, SessionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Focus,
    Break,
    LongBreak,
}

impl From<KindArg> for SessionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Focus => SessionKind::Focus,
            KindArg::Break => SessionKind::Break,
            KindArg::LongBreak => SessionKind::LongBreak,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    DueDate,
    Priority,
    CreatedAt,
    Stored,
}

impl From<SortArg> for AssignmentSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::DueDate => AssignmentSort::DueDate,
            SortArg::Priority => AssignmentSort::Priority,
            SortArg::CreatedAt => AssignmentSort::CreatedAt,
            SortArg::Stored => AssignmentSort::Stored,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Day,
    Week,
    Month,
    All,
}

impl From<PeriodArg> for Period {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Day => Period::Day,
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::All => Period::All,
        }
    }
}
