pub mod bot_handlers;
pub mod health;
mod helpers;
mod router;
pub mod types;
pub mod url_handlers;

pub use router::{create_api_router, create_bot_router};

// Re-export state types for convenience
pub use crate::state::{AppState, BotState};
