//! Videoflix client core: session state, readiness and route admission

pub mod admission;
pub mod error;
pub mod identity;
pub mod readiness;
pub mod routes;
pub mod session;
pub mod validation;

#[cfg(any(test, feature = "tests"))]
pub mod tests;

pub use admission::{Admission, LANDING_ROUTE, NavigationHistory, Navigator, RouteAdmission};
pub use error::{IdentityError, RouteError, ValidationError};
pub use identity::{Credential, Identity};
pub use readiness::{ReadinessGate, ReadyOnDrop};
pub use routes::{LOGIN_ROUTE, Navigation, Route, RouteMatch, RouteTable, Router};
pub use session::{AuthenticationWatch, Session, SessionStore};
pub use validation::ValidateConfig;
