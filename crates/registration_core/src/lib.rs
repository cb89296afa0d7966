//! Attraction pass registration flow: the controller, its pure reducer, and the
//! collaborators it is wired to (pass catalog, notification sink, navigator).

pub mod catalog;
pub mod controller;
pub mod navigate;
pub mod notify;
pub mod reducer;
pub mod routing;

pub use catalog::{FixedPassCatalog, KeyedPassCatalog, MissingPassCatalog, PassCatalog};
pub use controller::{ControllerOptions, RegistrationController, DEFAULT_LOOKUP_TIMEOUT};
pub use navigate::{ExternalNavigator, LoggingNavigator};
pub use notify::{BufferedNotificationSink, NotificationSink, TracingNotificationSink};
pub use reducer::{reduce, ReducerRules, RegistrationState, Transition, DEFAULT_MIN_MOBILE_LEN};
pub use routing::{EmptyCatalogPolicy, Route, RoutingPolicy};
