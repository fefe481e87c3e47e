//! Screens
//!
//! One routed component per screen, each paired with the request flows it
//! runs so those flows can be exercised without a browser.

mod login;
mod menu;
mod orders;
mod reports;
mod restaurants;
mod reviews;
mod users;

pub use login::LoginScreen;
pub use menu::MenuScreen;
pub use orders::OrdersScreen;
pub use reports::ReportsScreen;
pub use restaurants::RestaurantsScreen;
pub use reviews::ReviewsScreen;
pub use users::UsersScreen;
