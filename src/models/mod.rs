mod request;
mod state;
mod user;

pub use request::{
    CleanerRequest, CleanerRequestView, ClientRequestView, STATUS_ASSIGNED, STATUS_PENDING,
};
pub use state::AppState;
pub use user::{CleanerService, PublicUser, Role, User};
