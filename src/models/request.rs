//! # Request Ledger Types
//!
//! Row and view types for `cleaner_requests`. A request starts as `Pending`,
//! becomes `Assigned` when a cleaner is selected, and after that the status
//! is free text supplied by the client or the assigned cleaner.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Initial status of a freshly submitted request.
pub const STATUS_PENDING: &str = "Pending";
/// Status set when a cleaner is selected for a request.
pub const STATUS_ASSIGNED: &str = "Assigned";

/// A client's service request as stored in the `cleaner_requests` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CleanerRequest {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub location: String,
    pub service: String,
    pub status: String,
    pub cleaner_id: Option<Uuid>,
}

impl CleanerRequest {
    /// Returns true if the given user may update this request's status:
    /// the requesting client or the assigned cleaner.
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == Some(user_id) || self.cleaner_id == Some(user_id)
    }
}

/// Assigned request as seen from a client's profile, with the cleaner resolved.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientRequestView {
    pub request_id: Uuid,
    pub location: String,
    pub service: String,
    pub status: String,
    pub cleaner_name: String,
}

/// Request as seen from the assigned cleaner's profile, with the client resolved.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CleanerRequestView {
    pub request_id: Uuid,
    pub location: String,
    pub service: String,
    pub status: String,
    pub client_name: Option<String>,
}
