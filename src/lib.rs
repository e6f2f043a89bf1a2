//! Core job-requirement capture workflow for the BirdEarner marketplace
//! client.
//!
//! One screen session owns one [`workflow::JobRequirementsWorkflow`]: it
//! holds the draft, validates it with an ordered short-circuiting rule
//! list, filters the freelancer-type catalog by job mode, manages the
//! attachment list, resolves free-text location through an external
//! geocoder, and hands the finished draft to the job-creation stage over
//! a one-shot channel. Rendering, navigation, and session management stay
//! in the host app, behind the ports in [`services`].

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod validation;
pub mod workflow;

pub use error::{WorkflowError, WorkflowResult};
pub use workflow::handoff::{DraftHandoff, HandoffReceiver};
pub use workflow::{JobRequirementsWorkflow, LocationResolver};
