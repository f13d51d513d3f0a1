//! Order flow route handlers.
//!
//! Every handler resolves the visitor's [`OrderFlow`] from the session, runs
//! one controller operation under the flow's lock, and answers with the
//! resulting [`FlowView`]. Notices produced by the operation are drained into
//! the response, whether it succeeded or not.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use heights_bites_core::{CartLine, MenuItemId, Notice, OrderPhase, OrderReceipt};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{error, info, instrument};

use crate::error::{AppError, Result};
use crate::middleware::flow_key;
use crate::services::{FlowError, OrderFlow, SharedFlow, SubmitError};
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLine> for LineView {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id(),
            name: line.item().name.clone(),
            unit_price: line.item().price.display(),
            quantity: line.quantity(),
            line_total: line.line_total().display(),
        }
    }
}

/// Confirmation page data.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptView {
    pub order_number: String,
    pub reference: String,
    pub placed_at: DateTime<Utc>,
    pub total: String,
    pub item_count: u64,
    pub estimated_delivery: String,
}

impl From<&OrderReceipt> for ReceiptView {
    fn from(receipt: &OrderReceipt) -> Self {
        Self {
            order_number: receipt.number.to_string(),
            reference: receipt.number.short(),
            placed_at: receipt.placed_at,
            total: receipt.total.display(),
            item_count: receipt.item_count,
            estimated_delivery: receipt.estimated_delivery.clone(),
        }
    }
}

/// Everything the order page needs to render.
#[derive(Debug, Clone, Serialize)]
pub struct FlowView {
    pub phase: OrderPhase,
    pub heading: &'static str,
    pub lines: Vec<LineView>,
    pub total: String,
    pub item_count: u64,
    pub address: String,
    pub notes: String,
    pub contactless: bool,
    pub submitting: bool,
    pub receipt: Option<ReceiptView>,
    pub notices: Vec<Notice>,
}

impl FlowView {
    /// Snapshot the flow and drain its notices.
    #[must_use]
    pub fn capture(flow: &mut OrderFlow) -> Self {
        let notices = flow.drain_notices();
        Self {
            phase: flow.phase(),
            heading: flow.phase().heading(),
            lines: flow.cart().lines().iter().map(LineView::from).collect(),
            total: flow.cart_total().display(),
            item_count: flow.cart().item_count(),
            address: flow.address().to_owned(),
            notes: flow.notes().to_owned(),
            contactless: flow.contactless(),
            submitting: flow.is_submitting(),
            receipt: flow.last_receipt().map(ReceiptView::from),
            notices,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Add or remove an item.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub item_id: MenuItemId,
}

/// Change a line's quantity.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub item_id: MenuItemId,
    pub quantity: i64,
}

/// Checkout form fields. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct DetailsRequest {
    pub address: Option<String>,
    pub notes: Option<String>,
    pub contactless: Option<bool>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Resolve this session's flow, creating it on first use.
async fn session_flow(state: &AppState, session: &Session) -> Result<SharedFlow> {
    let key = flow_key(session).await?;
    Ok(state.flows().get_or_create(key).await)
}

/// Turn a controller refusal into an error response carrying its notices.
fn rejected(flow: &mut OrderFlow, err: FlowError) -> AppError {
    AppError::Flow(err, flow.drain_notices())
}

/// Run a synchronous controller operation and render the result.
async fn apply<T>(
    state: &AppState,
    session: &Session,
    op: impl FnOnce(&mut OrderFlow) -> std::result::Result<T, FlowError>,
) -> Result<Json<FlowView>> {
    let flow = session_flow(state, session).await?;
    let mut flow = flow.lock().await;
    match op(&mut *flow) {
        Ok(_) => Ok(Json(FlowView::capture(&mut flow))),
        Err(err) => Err(rejected(&mut flow, err)),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current state of the order.
///
/// GET /order
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<FlowView>> {
    apply(&state, &session, |_| Ok(())).await
}

/// Add one unit of an item to the cart.
///
/// POST /order/cart/add
#[instrument(skip(state, session), fields(item_id = %request.item_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ItemRequest>,
) -> Result<Json<FlowView>> {
    let item = state
        .catalog()
        .get(request.item_id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", request.item_id)))?
        .clone();

    apply(&state, &session, |flow| flow.add_item(&item)).await
}

/// Set a line's quantity; zero or below removes it.
///
/// POST /order/cart/update
#[instrument(skip(state, session), fields(item_id = %request.item_id, quantity = request.quantity))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<FlowView>> {
    apply(&state, &session, |flow| {
        flow.set_quantity(request.item_id, request.quantity)
    })
    .await
}

/// Remove a line from the cart.
///
/// POST /order/cart/remove
#[instrument(skip(state, session), fields(item_id = %request.item_id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ItemRequest>,
) -> Result<Json<FlowView>> {
    apply(&state, &session, |flow| flow.remove_item(request.item_id)).await
}

/// Move from the menu to checkout.
///
/// POST /order/checkout
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Json<FlowView>> {
    apply(&state, &session, OrderFlow::proceed_to_checkout).await
}

/// Update the checkout form.
///
/// POST /order/details
#[instrument(skip_all)]
pub async fn details(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<DetailsRequest>,
) -> Result<Json<FlowView>> {
    apply(&state, &session, |flow| {
        if let Some(address) = request.address {
            flow.set_address(address)?;
        }
        if let Some(notes) = request.notes {
            flow.set_notes(notes)?;
        }
        if let Some(contactless) = request.contactless {
            flow.set_contactless(contactless)?;
        }
        Ok(())
    })
    .await
}

/// Place the order and wait for the kitchen.
///
/// POST /order/place
///
/// The flow is locked only to start and to finish the submission. The
/// kitchen call runs on its own task, so an order that was started is always
/// settled even if the client goes away; its notices then show up on the
/// next `GET /order`.
#[instrument(skip(state, session))]
pub async fn place(State(state): State<AppState>, session: Session) -> Result<Json<FlowView>> {
    let flow = session_flow(&state, &session).await?;

    let draft = {
        let mut guard = flow.lock().await;
        match guard.begin_submission() {
            Ok(draft) => draft,
            Err(err) => return Err(rejected(&mut guard, err)),
        }
    };

    let kitchen = state.kitchen().clone();
    let task_flow = Arc::clone(&flow);
    let submission = tokio::spawn(async move {
        let outcome = kitchen.submit(&draft).await;
        settle(&task_flow, outcome).await
    });

    match submission.await {
        Ok(Ok(view)) => Ok(Json(view)),
        Ok(Err((err, notices))) => Err(AppError::Flow(err, notices)),
        Err(join_error) => {
            error!(error = %join_error, "Order submission task failed");
            let outcome = Err(SubmitError::Unavailable(
                "submission task did not complete".to_string(),
            ));
            match settle(&flow, outcome).await {
                Ok(view) => Ok(Json(view)),
                Err((err, notices)) => Err(AppError::Flow(err, notices)),
            }
        }
    }
}

/// Apply the kitchen's answer to a flow that is still submitting.
async fn settle(
    flow: &SharedFlow,
    outcome: std::result::Result<OrderReceipt, SubmitError>,
) -> std::result::Result<FlowView, (FlowError, Vec<Notice>)> {
    let mut guard = flow.lock().await;
    if !guard.is_submitting() {
        return Ok(FlowView::capture(&mut guard));
    }
    match guard.finish_submission(outcome) {
        Ok(receipt) => {
            info!(order = %receipt.number, total = %receipt.total, "Order placed");
            Ok(FlowView::capture(&mut guard))
        }
        Err(err) => Err((err, guard.drain_notices())),
    }
}

/// Leave checkout and return to the menu.
///
/// POST /order/back
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Json<FlowView>> {
    apply(&state, &session, OrderFlow::back_to_menu).await
}

/// Start a new order after a confirmation.
///
/// POST /order/restart
#[instrument(skip(state, session))]
pub async fn restart(State(state): State<AppState>, session: Session) -> Result<Json<FlowView>> {
    apply(&state, &session, OrderFlow::restart).await
}
