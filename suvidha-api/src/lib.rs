#![forbid(unsafe_code)]

//! REST adapter for the external complaint service. The kiosk core never
//! talks to the network directly; it goes through [`client::ComplaintApi`].

pub mod client;
pub mod error;
pub mod model;

pub use client::{ComplaintApi, ComplaintClient};
pub use error::{ApiError, Result};
pub use model::{Complaint, CreateComplaintResponse, NewComplaint, StatusUpdate};
