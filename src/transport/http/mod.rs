pub mod render;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod form;
    pub mod health;
    pub mod process;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
