//! # Purchase Confirmation Flow
//!
//! ```text
//!  Idle ──open──> Confirming ──confirm──> Processing ──ok──> Idle
//!                   ^    │                    │
//!                   │    └──cancel──> Idle    │
//!                   └────────── err ──────────┘
//! ```
//!
//! The balance check is advisory: the backend re-checks funds and its
//! answer wins.

use crate::core::error::{AppError, Result};

/// What is being bought
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseTarget {
    /// Whole machines from the catalog
    Machine { machine_id: String, name: String },
    /// Shares of the share-based machine
    Shares {
        machine_id: String,
        name: String,
        available_shares: u32,
    },
}

impl PurchaseTarget {
    pub fn name(&self) -> &str {
        match self {
            PurchaseTarget::Machine { name, .. } | PurchaseTarget::Shares { name, .. } => name,
        }
    }

    pub fn is_machine(&self) -> bool {
        matches!(self, PurchaseTarget::Machine { .. })
    }

    pub fn is_shares(&self) -> bool {
        matches!(self, PurchaseTarget::Shares { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseQuote {
    pub target: PurchaseTarget,
    pub unit_price: f64,
    pub quantity: u32,
}

impl PurchaseQuote {
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    /// False when the balance cannot cover the total.
    pub fn can_confirm(&self, balance_total: f64) -> bool {
        balance_total >= self.total()
    }

    /// Quantity rules: at least one machine; shares within what is left.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(AppError::Validation("Quantity must be at least 1".to_string()));
        }
        if let PurchaseTarget::Shares { available_shares, .. } = &self.target {
            if self.quantity > *available_shares {
                return Err(AppError::Validation(format!(
                    "Only {} shares available",
                    available_shares
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PurchaseFlow {
    #[default]
    Idle,
    Confirming(PurchaseQuote),
    Processing(PurchaseQuote),
}

impl PurchaseFlow {
    /// Show the confirmation for `quote`. Requires a logged-in user.
    pub fn open(&mut self, quote: PurchaseQuote, authenticated: bool) -> Result<()> {
        if !authenticated {
            return Err(AppError::State("Please login to make a purchase".to_string()));
        }
        if matches!(self, PurchaseFlow::Processing(_)) {
            return Err(AppError::State("A purchase is already being processed".to_string()));
        }
        quote.validate()?;
        *self = PurchaseFlow::Confirming(quote);
        Ok(())
    }

    /// Change the quantity while confirming.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<()> {
        let PurchaseFlow::Confirming(quote) = self else {
            return Err(AppError::State("No purchase to update".to_string()));
        };
        let updated = PurchaseQuote {
            quantity,
            ..quote.clone()
        };
        updated.validate()?;
        *quote = updated;
        Ok(())
    }

    /// Move `Confirming` to `Processing` and hand out the quote to submit.
    pub fn confirm(&mut self, balance_total: f64) -> Result<PurchaseQuote> {
        let PurchaseFlow::Confirming(quote) = self else {
            return Err(AppError::State("No purchase awaiting confirmation".to_string()));
        };
        if !quote.can_confirm(balance_total) {
            return Err(AppError::Validation("Insufficient balance".to_string()));
        }
        let quote = quote.clone();
        *self = PurchaseFlow::Processing(quote.clone());
        Ok(quote)
    }

    /// Close the confirmation. Not possible while processing.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, PurchaseFlow::Confirming(_)) {
            *self = PurchaseFlow::Idle;
            true
        } else {
            false
        }
    }

    /// Apply the backend's answer. Success closes the flow; failure returns
    /// to confirmation so the user can retry. No-op unless processing.
    pub fn finish(&mut self, success: bool) {
        if let PurchaseFlow::Processing(quote) = self {
            *self = if success {
                PurchaseFlow::Idle
            } else {
                PurchaseFlow::Confirming(quote.clone())
            };
        }
    }

    /// [`finish`](Self::finish), but only when the open quote's target
    /// passes `is_target`. A result for another kind of purchase leaves
    /// the flow alone.
    pub fn finish_for(&mut self, is_target: fn(&PurchaseTarget) -> bool, success: bool) {
        if self.quote().is_some_and(|quote| is_target(&quote.target)) {
            self.finish(success);
        }
    }

    pub fn quote(&self) -> Option<&PurchaseQuote> {
        match self {
            PurchaseFlow::Idle => None,
            PurchaseFlow::Confirming(quote) | PurchaseFlow::Processing(quote) => Some(quote),
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, PurchaseFlow::Processing(_))
    }
}
