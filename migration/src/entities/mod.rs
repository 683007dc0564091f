pub mod bug;
pub mod user;

pub use bug::BugState;
pub use bug::Entity as BugEntity;
pub use user::Entity as UserEntity;
