//! Per-round reporting and cumulative scheduler metrics.

use galvan_grid::LossList;
use galvan_proto::IncomingSummary;

/// What one [`Scheduler::poll`](crate::Scheduler::poll) iteration did.
#[derive(Clone, Debug, Default)]
pub struct RoundReport {
    /// Whether the world advanced a generation this round.
    pub ticked: bool,
    /// Whether that advancement was forced by the deadline rather than
    /// a full set of responses.
    pub forced: bool,
    /// Flag owners who lost territory during this round's CA pass, in
    /// discovery order. Empty when `ticked` is false. The scoring
    /// consequences belong to the caller.
    pub losses: LossList,
}

/// Cumulative counters across the life of a scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundMetrics {
    /// World generations advanced.
    pub ticks: u64,
    /// Generations forced by the deadline.
    pub forced_ticks: u64,
    /// Server frames handed to an endpoint.
    pub frames_sent: u64,
    /// Server frames discarded because an endpoint went away.
    pub frames_dropped: u64,
    /// Client messages applied (acknowledged ok).
    pub messages_accepted: u64,
    /// Client messages answered invalid-action or invalid-message.
    pub messages_rejected: u64,
    /// Extra same-turn messages answered multiple-messages.
    pub messages_duplicate: u64,
    /// Messages dropped for echoing a stale timestamp.
    pub messages_stale: u64,
}

impl RoundMetrics {
    /// Fold one agent's incoming summary into the counters.
    pub(crate) fn absorb(&mut self, summary: IncomingSummary) {
        self.messages_accepted += u64::from(summary.accepted);
        self.messages_rejected += u64::from(summary.rejected);
        self.messages_duplicate += u64::from(summary.duplicates);
        self.messages_stale += u64::from(summary.stale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RoundMetrics::default();
        assert_eq!(m, RoundMetrics::default());
        assert_eq!(m.ticks, 0);
        assert_eq!(m.frames_sent, 0);
    }

    #[test]
    fn absorb_accumulates() {
        let mut m = RoundMetrics::default();
        m.absorb(IncomingSummary {
            accepted: 2,
            rejected: 1,
            duplicates: 0,
            stale: 3,
        });
        m.absorb(IncomingSummary {
            accepted: 1,
            rejected: 0,
            duplicates: 2,
            stale: 0,
        });
        assert_eq!(m.messages_accepted, 3);
        assert_eq!(m.messages_rejected, 1);
        assert_eq!(m.messages_duplicate, 2);
        assert_eq!(m.messages_stale, 3);
    }
}
