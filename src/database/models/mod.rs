pub mod drawer;
pub mod note;
pub mod user;

pub use drawer::Drawer;
pub use note::Note;
pub use user::User;
