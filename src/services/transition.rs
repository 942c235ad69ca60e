use crate::{
    error::{AppError, AppResult},
    models::ReportStatus,
};
use std::str::FromStr;

/// Which status changes staff may make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Open,
    /// Only forward moves along the triage flow, plus closing from anywhere.
    Guarded,
}

impl TransitionPolicy {
    pub fn check(self, from: ReportStatus, to: ReportStatus) -> AppResult<()> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from, to })
        }
    }

    pub fn allows(self, from: ReportStatus, to: ReportStatus) -> bool {
        use ReportStatus::{Closed, InProgress, New, PendingStudent, Resolved};

        match self {
            Self::Open => true,
            Self::Guarded => {
                from == to
                    || to == Closed
                    || matches!(
                        (from, to),
                        (New, InProgress)
                            | (InProgress, PendingStudent)
                            | (InProgress, Resolved)
                            | (PendingStudent, InProgress)
                            | (PendingStudent, Resolved)
                    )
            }
        }
    }

    /// Statuses reachable from `from` in one step, in display order.
    pub fn targets(self, from: ReportStatus) -> Vec<ReportStatus> {
        ReportStatus::ALL
            .into_iter()
            .filter(|to| *to != from && self.allows(from, *to))
            .collect()
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "any" => Ok(Self::Open),
            "guarded" | "strict" => Ok(Self::Guarded),
            other => Err(format!("unknown transition policy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReportStatus::{Closed, InProgress, New, PendingStudent, Resolved};

    #[test]
    fn open_policy_allows_everything() {
        for from in ReportStatus::ALL {
            for to in ReportStatus::ALL {
                assert!(TransitionPolicy::Open.allows(from, to));
            }
        }
        assert!(TransitionPolicy::Open.check(Closed, New).is_ok());
    }

    #[test]
    fn guarded_policy_follows_triage_flow() {
        let policy = TransitionPolicy::Guarded;
        assert_eq!(policy.targets(New), vec![InProgress, Closed]);
        assert_eq!(policy.targets(InProgress), vec![PendingStudent, Resolved, Closed]);
        assert_eq!(policy.targets(PendingStudent), vec![InProgress, Resolved, Closed]);
        assert_eq!(policy.targets(Resolved), vec![Closed]);
        assert!(policy.targets(Closed).is_empty());
    }

    #[test]
    fn guarded_policy_rejects_reopening() {
        let err = TransitionPolicy::Guarded.check(Closed, New).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: Closed,
                to: New
            }
        ));
    }

    #[test]
    fn guarded_policy_allows_reapplying_current_status() {
        assert!(TransitionPolicy::Guarded.check(Resolved, Resolved).is_ok());
    }

    #[test]
    fn parse_policy() {
        assert_eq!("Guarded".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Guarded);
        assert_eq!("open".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Open);
        assert!("dag".parse::<TransitionPolicy>().is_err());
    }
}
