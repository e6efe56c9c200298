//! # Request Status
//!
//! Per-slice bookkeeping of in-flight operations.
//!
//! Every dispatch calls [`RequestStatus::begin`] and receives a generation
//! number; the reducer calls [`RequestStatus::settle`] with the same number.
//! For reads, only the newest generation of an operation is applied: when a
//! user pages quickly through withdrawals, the response for an older page
//! must not overwrite the newer one. Mutations are never superseded, since
//! each of them changed something on the server.

use std::collections::HashMap;

use super::events::Outcome;

/// Identifies a remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // auth
    Register,
    Login,
    Logout,
    FetchCurrentUser,
    UpdateProfile,
    VerifyPassword,
    // catalog
    FetchMachines,
    CreateMachine,
    UpdateMachine,
    DeleteMachine,
    // user machines
    FetchUserMachines,
    FetchAllUserMachines,
    AssignMachine,
    RemoveUserMachine,
    FetchTransactions,
    PurchaseMachine,
    // profit
    UpdateMonthlyProfit,
    ManualProfitUpdate,
    FetchProfitStatus,
    FetchTotalProfit,
    // shares
    FetchSpecialMachine,
    FetchUserShares,
    PurchaseShares,
    UpdateShareProfits,
    // withdrawals
    RequestWithdrawal,
    ProcessWithdrawal,
    FetchPendingWithdrawals,
    FetchUserWithdrawals,
    FetchWithdrawalStats,
    FetchAllWithdrawals,
    // balance
    FetchBalance,
    UpdateBalance,
    // contacts
    SubmitContact,
    FetchContacts,
    // admin
    FetchUsers,
}

impl Op {
    /// Reads are superseded by a newer dispatch of the same operation.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Op::FetchCurrentUser
                | Op::FetchMachines
                | Op::FetchUserMachines
                | Op::FetchAllUserMachines
                | Op::FetchTransactions
                | Op::FetchProfitStatus
                | Op::FetchTotalProfit
                | Op::FetchSpecialMachine
                | Op::FetchUserShares
                | Op::FetchPendingWithdrawals
                | Op::FetchUserWithdrawals
                | Op::FetchWithdrawalStats
                | Op::FetchAllWithdrawals
                | Op::FetchBalance
                | Op::FetchContacts
                | Op::FetchUsers
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InFlight {
    latest: u64,
    count: u32,
}

/// Loading and error state of one slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    in_flight: HashMap<Op, InFlight>,
    /// Generations at or below the floor are discarded on settle
    invalidated: HashMap<Op, u64>,
    next_generation: u64,
    /// Message of the last failed operation, cleared by the next dispatch
    pub error: Option<String>,
}

impl RequestStatus {
    /// Mark `op` as started. Clears the slice error.
    pub fn begin(&mut self, op: Op) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let entry = self.in_flight.entry(op).or_default();
        entry.latest = generation;
        entry.count += 1;
        self.error = None;
        generation
    }

    /// Mark one dispatch of `op` as finished.
    ///
    /// Returns `false` when the outcome must be discarded: a read that was
    /// superseded by a newer dispatch, or an operation that was never begun.
    pub fn settle(&mut self, op: Op, generation: u64) -> bool {
        let Some(entry) = self.in_flight.get_mut(&op) else {
            return false;
        };
        let latest = entry.latest;
        entry.count = entry.count.saturating_sub(1);
        if entry.count == 0 {
            self.in_flight.remove(&op);
        }
        if self.invalidated.get(&op).is_some_and(|floor| generation <= *floor) {
            return false;
        }
        !op.is_read() || generation == latest
    }

    /// Discard the outcome of every dispatch of `op` begun so far.
    ///
    /// The requests stay counted as in flight until they settle.
    pub fn invalidate(&mut self, op: Op) {
        self.invalidated.insert(op, self.next_generation);
    }

    /// Settle `op` and unwrap its outcome.
    ///
    /// `None` when the outcome was discarded as stale or failed; a failure
    /// is recorded as the slice error.
    pub fn resolve<T>(&mut self, op: Op, outcome: Outcome<T>) -> Option<T> {
        if !self.settle(op, outcome.generation) {
            tracing::debug!(?op, generation = outcome.generation, "Discarding stale result");
            return None;
        }
        match outcome.result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(?op, status = ?e.status, error = %e, "Request failed");
                self.fail(e.message);
                None
            }
        }
    }

    /// Record a failure message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// True while any operation of this slice is in flight.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_pending(&self, op: Op) -> bool {
        self.in_flight.contains_key(&op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_settle() {
        let mut status = RequestStatus::default();
        status.fail("old error");

        let generation = status.begin(Op::FetchBalance);
        assert!(status.is_loading());
        assert!(status.is_pending(Op::FetchBalance));
        assert_eq!(status.error, None);

        assert!(status.settle(Op::FetchBalance, generation));
        assert!(!status.is_loading());
    }

    #[test]
    fn test_superseded_read_is_discarded() {
        let mut status = RequestStatus::default();
        let first = status.begin(Op::FetchUserWithdrawals);
        let second = status.begin(Op::FetchUserWithdrawals);
        assert!(second > first);

        assert!(status.settle(Op::FetchUserWithdrawals, second));
        assert!(status.is_loading(), "older request still outstanding");
        assert!(!status.settle(Op::FetchUserWithdrawals, first));
        assert!(!status.is_loading());
    }

    #[test]
    fn test_concurrent_mutations_all_apply() {
        let mut status = RequestStatus::default();
        let a = status.begin(Op::ProcessWithdrawal);
        let b = status.begin(Op::ProcessWithdrawal);

        assert!(status.settle(Op::ProcessWithdrawal, a));
        assert!(status.settle(Op::ProcessWithdrawal, b));
        assert!(!status.is_loading());
    }

    #[test]
    fn test_resolve_records_failure() {
        use crate::core::error::ApiError;

        let mut status = RequestStatus::default();
        let generation = status.begin(Op::FetchWithdrawalStats);
        let outcome: Outcome<()> = Outcome::new(
            generation,
            Err(ApiError::new(Some(500), "Failed to fetch withdrawal statistics")),
        );
        assert_eq!(status.resolve(Op::FetchWithdrawalStats, outcome), None);
        assert_eq!(status.error.as_deref(), Some("Failed to fetch withdrawal statistics"));

        let generation = status.begin(Op::FetchWithdrawalStats);
        assert_eq!(status.error, None);
        assert_eq!(status.resolve(Op::FetchWithdrawalStats, Outcome::new(generation, Ok(7))), Some(7));
    }

    #[test]
    fn test_invalidated_dispatches_are_discarded() {
        let mut status = RequestStatus::default();
        let login = status.begin(Op::Login);
        let me = status.begin(Op::FetchCurrentUser);

        status.invalidate(Op::Login);
        status.invalidate(Op::FetchCurrentUser);
        assert!(status.is_pending(Op::Login));

        assert!(!status.settle(Op::Login, login));
        assert!(!status.settle(Op::FetchCurrentUser, me));
        assert!(!status.is_loading());

        // Later dispatches apply again
        let me = status.begin(Op::FetchCurrentUser);
        assert!(status.settle(Op::FetchCurrentUser, me));
    }

    #[test]
    fn test_settle_without_begin_is_rejected() {
        let mut status = RequestStatus::default();
        assert!(!status.settle(Op::Login, 1));
    }

    #[test]
    fn test_loading_tracks_every_op() {
        let mut status = RequestStatus::default();
        let a = status.begin(Op::FetchPendingWithdrawals);
        let b = status.begin(Op::FetchWithdrawalStats);
        status.settle(Op::FetchPendingWithdrawals, a);
        assert!(status.is_loading());
        status.settle(Op::FetchWithdrawalStats, b);
        assert!(!status.is_loading());
    }
}
