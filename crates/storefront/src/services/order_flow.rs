//! Order flow controller.
//!
//! One [`OrderFlow`] per ordering session. It owns the cart and the
//! `Select → Checkout → Confirmation` phase, validates every transition, and
//! records user-visible [`Notice`]s in an outbox that the caller drains.
//!
//! Placing an order is split in two so that the asynchronous kitchen call
//! can run without holding whatever lock guards the flow:
//!
//! ```text
//! begin_submission()  -> OrderDraft      (validates, sets `submitting`)
//! Kitchen::submit()   -> Result<Receipt> (no lock held)
//! finish_submission() -> Result<Receipt> (applies the outcome)
//! ```
//!
//! [`OrderFlow::place_order`] runs all three for callers that own the flow.

use heights_bites_core::{
    Cart, MenuItem, MenuItemId, Notice, OrderDraft, OrderPhase, OrderReceipt, Price,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::kitchen::{Kitchen, SubmitError};

/// Reasons an order flow operation was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The order was placed without a delivery address.
    #[error("delivery address is required")]
    AddressRequired,

    /// An order is already on its way to the kitchen.
    #[error("an order is already being submitted")]
    SubmissionInProgress,

    /// The operation is not valid in the current phase.
    #[error("cannot {operation} during {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: OrderPhase,
    },

    /// The kitchen did not accept the order.
    #[error("order submission failed: {0}")]
    Submission(#[from] SubmitError),
}

impl FlowError {
    /// Whether the user can fix this by changing their input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyCart | Self::AddressRequired)
    }
}

/// Cart contents, checkout details and phase for one session.
#[derive(Debug, Clone, Default)]
pub struct OrderFlow {
    phase: OrderPhase,
    cart: Cart,
    address: String,
    notes: String,
    contactless: bool,
    submitting: bool,
    last_receipt: Option<OrderReceipt>,
    notices: Vec<Notice>,
}

impl OrderFlow {
    /// A fresh flow in `Select` with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[must_use]
    pub const fn phase(&self) -> OrderPhase {
        self.phase
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn contactless(&self) -> bool {
        self.contactless
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Receipt of the order placed most recently, until `restart`.
    #[must_use]
    pub const fn last_receipt(&self) -> Option<&OrderReceipt> {
        self.last_receipt.as_ref()
    }

    /// Σ(unit price × quantity), recomputed on every call.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Take every notice emitted since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Select phase
    // =========================================================================

    /// Add one unit of `item`. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Rejected outside `Select`.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<u32, FlowError> {
        self.ensure(OrderPhase::Select, "add items")?;

        let quantity = self.cart.add(item);
        debug!(item = %item.id, quantity, "Added to cart");
        self.notices.push(Notice::success(
            "Added to cart",
            format!("{} has been added to your order.", item.name),
        ));
        Ok(quantity)
    }

    /// Set a line's quantity; zero or below removes the line. Unknown items
    /// are ignored. Returns `true` if the cart changed.
    ///
    /// # Errors
    ///
    /// Rejected outside `Select`.
    pub fn set_quantity(&mut self, item_id: MenuItemId, quantity: i64) -> Result<bool, FlowError> {
        self.ensure(OrderPhase::Select, "change quantities")?;
        Ok(self.cart.set_quantity(item_id, quantity))
    }

    /// Remove a line. Unknown items are ignored. Returns `true` if a line
    /// was removed.
    ///
    /// # Errors
    ///
    /// Rejected outside `Select`.
    pub fn remove_item(&mut self, item_id: MenuItemId) -> Result<bool, FlowError> {
        self.ensure(OrderPhase::Select, "remove items")?;
        Ok(self.cart.remove(item_id))
    }

    /// Move to `Checkout`.
    ///
    /// # Errors
    ///
    /// [`FlowError::EmptyCart`] (with a warning notice) if nothing has been
    /// added; rejected outside `Select`.
    pub fn proceed_to_checkout(&mut self) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Select, "check out")?;

        if self.cart.is_empty() {
            self.notices.push(Notice::warning(
                "Cart is empty",
                "Please add items to your cart before proceeding to checkout.",
            ));
            return Err(FlowError::EmptyCart);
        }

        self.transition(OrderPhase::Checkout);
        Ok(())
    }

    // =========================================================================
    // Checkout phase
    // =========================================================================

    /// Update the delivery address.
    ///
    /// # Errors
    ///
    /// Rejected outside `Checkout` or while submitting.
    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Checkout, "edit the address")?;
        self.address = address.into();
        Ok(())
    }

    /// Update the delivery notes.
    ///
    /// # Errors
    ///
    /// Rejected outside `Checkout` or while submitting.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Checkout, "edit the notes")?;
        self.notes = notes.into();
        Ok(())
    }

    /// Toggle contactless delivery.
    ///
    /// # Errors
    ///
    /// Rejected outside `Checkout` or while submitting.
    pub fn set_contactless(&mut self, contactless: bool) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Checkout, "change delivery options")?;
        self.contactless = contactless;
        Ok(())
    }

    /// Return to `Select`, keeping the cart.
    ///
    /// # Errors
    ///
    /// Rejected outside `Checkout` or while submitting.
    pub fn back_to_menu(&mut self) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Checkout, "go back to the menu")?;
        self.transition(OrderPhase::Select);
        Ok(())
    }

    /// Validate the checkout details and mark the flow as submitting.
    ///
    /// # Errors
    ///
    /// [`FlowError::AddressRequired`] (with a warning notice) if the trimmed
    /// address is empty; [`FlowError::SubmissionInProgress`] if an order is
    /// already out; rejected outside `Checkout`.
    pub fn begin_submission(&mut self) -> Result<OrderDraft, FlowError> {
        self.ensure(OrderPhase::Checkout, "place an order")?;

        if self.address.trim().is_empty() {
            self.notices.push(Notice::warning(
                "Address required",
                "Please enter your delivery address.",
            ));
            return Err(FlowError::AddressRequired);
        }

        self.submitting = true;
        Ok(OrderDraft::from_cart(
            &self.cart,
            &self.address,
            &self.notes,
            self.contactless,
        ))
    }

    /// Apply the kitchen's answer to a submission started with
    /// [`begin_submission`](Self::begin_submission).
    ///
    /// On success the flow moves to `Confirmation` and the cart, address,
    /// notes and contactless flag are cleared. On failure the flow stays in
    /// `Checkout` with everything intact so the user can try again.
    ///
    /// # Errors
    ///
    /// [`FlowError::Submission`] (with an error notice) if the kitchen
    /// failed; rejected if no submission was in progress.
    pub fn finish_submission(
        &mut self,
        outcome: Result<OrderReceipt, SubmitError>,
    ) -> Result<OrderReceipt, FlowError> {
        if !self.submitting {
            return Err(FlowError::InvalidTransition {
                operation: "finish a submission",
                phase: self.phase,
            });
        }
        self.submitting = false;

        match outcome {
            Ok(receipt) => {
                self.transition(OrderPhase::Confirmation);
                self.cart.clear();
                self.address.clear();
                self.notes.clear();
                self.contactless = false;
                self.last_receipt = Some(receipt.clone());
                self.notices.push(Notice::success(
                    "Order placed successfully!",
                    "Your delicious food is on its way.",
                ));
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "Order could not be placed");
                self.notices.push(Notice::error(
                    "Order failed",
                    "We couldn't place your order. Please try again.",
                ));
                Err(FlowError::Submission(err))
            }
        }
    }

    /// Validate, submit to `kitchen`, and apply the outcome.
    ///
    /// If the returned future is dropped before the kitchen answers, the flow
    /// is released back to `Checkout` with its cart and details intact. The
    /// kitchen may still have received the order.
    ///
    /// # Errors
    ///
    /// See [`begin_submission`](Self::begin_submission) and
    /// [`finish_submission`](Self::finish_submission).
    pub async fn place_order(&mut self, kitchen: &Kitchen) -> Result<OrderReceipt, FlowError> {
        let draft = self.begin_submission()?;
        let pending = PendingSubmission { flow: self };
        let outcome = kitchen.submit(&draft).await;
        pending.flow.finish_submission(outcome)
    }

    // =========================================================================
    // Confirmation phase
    // =========================================================================

    /// Start a new order. The cart is already empty.
    ///
    /// # Errors
    ///
    /// Rejected outside `Confirmation`.
    pub fn restart(&mut self) -> Result<(), FlowError> {
        self.ensure(OrderPhase::Confirmation, "start a new order")?;
        self.last_receipt = None;
        self.transition(OrderPhase::Select);
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure(&self, expected: OrderPhase, operation: &'static str) -> Result<(), FlowError> {
        if self.submitting {
            return Err(FlowError::SubmissionInProgress);
        }
        if self.phase != expected {
            return Err(FlowError::InvalidTransition {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: OrderPhase) {
        debug_assert!(self.phase.can_transition_to(next));
        info!(from = %self.phase, to = %next, "Order flow transition");
        self.phase = next;
    }
}

/// Clears `submitting` if a submission is abandoned mid-flight.
struct PendingSubmission<'a> {
    flow: &'a mut OrderFlow,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.flow.submitting {
            warn!("Order submission abandoned before the kitchen answered");
            self.flow.submitting = false;
        }
    }
}
