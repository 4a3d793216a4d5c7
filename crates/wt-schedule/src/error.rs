use thiserror::Error;

use wt_core::{AgentKind, CellId};

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Every pool member of `kind` has used up its daily allotment while
    /// `cell` still needs `remaining` ticks of presence.  Indicates an
    /// undersized pool, never a transient condition.
    #[error("{kind} pool exhausted with {remaining} ticks of presence still required at {cell}")]
    CapacityExhausted {
        cell:      CellId,
        kind:      AgentKind,
        remaining: u32,
    },

    #[error("distributing {kind} presence to {cell} exceeded {iterations} iterations")]
    IterationCapExceeded {
        cell:       CellId,
        kind:       AgentKind,
        iterations: u64,
    },

    #[error("census parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
