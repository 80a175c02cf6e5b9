pub mod forms;
pub mod get;
pub mod health;
pub mod list;
pub mod login;
pub mod put;
pub mod status;

pub use forms::{contact_handler, demo_handler};
pub use get::get_handler;
pub use health::{health_handler, root_handler};
pub use list::list_handler;
pub use login::login_handler;
pub use put::put_handler;
pub use status::{create_status_handler, list_status_handler};
