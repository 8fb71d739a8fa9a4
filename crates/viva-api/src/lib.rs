pub mod auth;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;

pub mod browser;
pub mod email;
pub mod gamification;
pub mod messaging;
pub mod privacy;
pub mod settings;
pub mod system;
pub mod vault;
pub mod vpn;

pub use router::build_router;
pub use state::{AppState, AppStateInner};
