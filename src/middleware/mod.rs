pub mod auth;
pub mod gate;
pub mod response;

pub use auth::AuthUser;
pub use gate::{gate_middleware, Gate, GateStage, StageOutcome};
pub use response::{ApiResponse, ApiResult};
