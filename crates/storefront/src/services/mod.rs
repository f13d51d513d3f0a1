//! Business logic services for the ordering API.
//!
//! # Services
//!
//! - `order_flow` - Cart and checkout state machine for one session
//! - `kitchen` - Order submission with timeout and retry
//! - `flow_store` - Session-keyed storage for order flows
//! - `forms` - Contact, login and registration forms

pub mod flow_store;
pub mod forms;
pub mod kitchen;
pub mod order_flow;

pub use flow_store::{FlowStore, SharedFlow};
pub use forms::{ContactForm, FormError, LoginForm, RegisterForm};
pub use kitchen::{Kitchen, OrderSubmitter, SimulatedKitchen, SubmitError};
pub use order_flow::{FlowError, OrderFlow};
