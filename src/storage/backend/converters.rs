use crate::storage::{Bug, BugState, User};
use migration::entities::{bug, user};

impl From<bug::BugState> for BugState {
    fn from(state: bug::BugState) -> Self {
        match state {
            bug::BugState::Open => BugState::Open,
            bug::BugState::Closed => BugState::Closed,
        }
    }
}

impl From<BugState> for bug::BugState {
    fn from(state: BugState) -> Self {
        match state {
            BugState::Open => bug::BugState::Open,
            BugState::Closed => bug::BugState::Closed,
        }
    }
}

/// 将 Sea-ORM Model（及其 owner）转换为 Bug
pub fn model_to_bug(model: bug::Model, owner: Option<user::Model>) -> Bug {
    Bug {
        id: model.id,
        owner_id: model.owner_id,
        // owner_id is a foreign key; a missing join only happens mid-delete
        owner: owner.map(|u| u.username).unwrap_or_default(),
        title: model.title,
        state: model.state.into(),
        text: model.text,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        is_staff: model.is_staff,
        created_at: model.created_at,
    }
}
