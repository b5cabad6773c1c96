use serde::{Deserialize, Serialize};

/// Side effects requested by [`update`](crate::core::update::update).
///
/// The app runner executes them against the list controller and the
/// terminal; the update function itself never touches either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Selection came close to the last item of `card`
    RequestMore { card: usize },
    /// Pull-to-refresh of `card`
    Refresh { card: usize },
    Resize { width: u16, height: u16 },
    LogError { message: String },
}

impl Cmd {
    /// The card whose list controller the command reaches, if any
    pub fn card(&self) -> Option<usize> {
        match self {
            Cmd::RequestMore { card } | Cmd::Refresh { card } => Some(*card),
            Cmd::Resize { .. } | Cmd::LogError { .. } => None,
        }
    }
}
