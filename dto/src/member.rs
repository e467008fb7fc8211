use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A gym member. Owned by the member-management part of the system;
/// the enrollment engine only reads it.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Member {
    id: i32,
    last_name: String,
    first_name: String,
    email_address: String,
    active: bool,
}

impl Member {
    pub fn new(
        id: i32,
        last_name: String,
        first_name: String,
        email_address: String,
        active: bool,
    ) -> Self {
        Self {
            id,
            last_name,
            first_name,
            email_address,
            active,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub fn jon_doe() -> Member {
        Member {
            id: 1,
            last_name: "Doe".to_string(),
            first_name: "Jon".to_string(),
            email_address: "jon.doe@email.com".to_string(),
            active: true,
        }
    }

    pub fn jonette_snow() -> Member {
        Member {
            id: 2,
            last_name: "Snow".to_string(),
            first_name: "Jonette".to_string(),
            email_address: "jonette.snow@email.com".to_string(),
            active: true,
        }
    }

    pub fn lapsed_member() -> Member {
        Member {
            id: 3,
            last_name: "Lapsed".to_string(),
            first_name: "Larry".to_string(),
            email_address: "larry.lapsed@email.com".to_string(),
            active: false,
        }
    }
}
