//! Free-form user profile slice. No field is validated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    SetName(String),
    SetAge(u32),
    SetEmail(String),
    SetPhone(String),
}

pub fn reduce(state: &UserProfile, action: ProfileAction) -> UserProfile {
    let mut next = state.clone();
    match action {
        ProfileAction::SetName(name) => next.name = name,
        ProfileAction::SetAge(age) => next.age = age,
        ProfileAction::SetEmail(email) => next.email = email,
        ProfileAction::SetPhone(phone) => next.phone = phone,
    }
    next
}
