use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A document in the users collection. The password is stored as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime>,
    #[serde(default)]
    pub favorite_movies: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

/// Fields to `$set` on an existing user; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_movies: Option<Vec<ObjectId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        *self == UserUpdate::default()
    }

    /// Merges the provided fields into `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref username) = self.username {
            user.username = username.clone();
        }
        if let Some(ref password) = self.password {
            user.password = password.clone();
        }
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(dob) = self.date_of_birth {
            user.date_of_birth = Some(dob);
        }
        if let Some(ref favorites) = self.favorite_movies {
            user.favorite_movies = favorites.clone();
        }
        if let Some(created_at) = self.created_at {
            user.created_at = Some(created_at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Some(ObjectId::new()),
            username: "neo".to_string(),
            password: "matrix".to_string(),
            email: "neo@zion.io".to_string(),
            date_of_birth: None,
            favorite_movies: Vec::new(),
            created_at: Some(DateTime::now()),
        }
    }

    #[test]
    fn test_update_document_only_contains_set_fields() {
        let update = UserUpdate { email: Some("thomas@anderson.io".to_string()), ..Default::default() };
        let document = bson::to_document(&update).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.get_str("email").unwrap(), "thomas@anderson.io");
    }

    #[test]
    fn test_apply_to_merges_fields() {
        let mut user = sample_user();
        let favorite = ObjectId::new();
        let update = UserUpdate {
            password: Some("red-pill".to_string()),
            favorite_movies: Some(vec![favorite]),
            ..Default::default()
        };
        update.apply_to(&mut user);
        assert_eq!(user.username, "neo");
        assert_eq!(user.password, "red-pill");
        assert_eq!(user.favorite_movies, vec![favorite]);
    }

    #[test]
    fn test_empty_update() {
        assert!(UserUpdate::default().is_empty());
        assert!(!UserUpdate { username: Some("x".to_string()), ..Default::default() }.is_empty());
    }
}
