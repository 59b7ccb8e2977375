use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::{User, UserUpdate};
use crate::util::cast::{OneOrMany, Scalar};
use crate::util::validation::{format_date, FieldErrors};

const USER_FIELDS: &[&str] = &["username", "password", "email", "dateOfBirth", "favoriteMovies", "createdAt"];

/// Body of `POST /users`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required)]
    pub username: Option<Scalar>,
    #[validate(required)]
    pub password: Option<Scalar>,
    #[validate(required)]
    pub email: Option<Scalar>,
    pub date_of_birth: Option<Scalar>,
    pub favorite_movies: Option<OneOrMany<Scalar>>,
    pub created_at: Option<Scalar>,
}

impl CreateUserRequest {
    /// Validates and casts the body into a `User`. A missing `createdAt` is
    /// left for the repository to stamp.
    pub fn into_user(self) -> Result<User, String> {
        let mut errors = FieldErrors::new("User", USER_FIELDS);
        if let Err(e) = self.validate() {
            errors.add_validation(&e);
        }

        let username = required_text(&mut errors, "username", self.username);
        let password = required_text(&mut errors, "password", self.password);
        let email = required_text(&mut errors, "email", self.email);
        let date_of_birth = errors.cast("dateOfBirth", self.date_of_birth.as_ref(), Scalar::to_date);
        let favorite_movies = match self.favorite_movies.map(cast_object_ids) {
            Some(Ok(ids)) => ids,
            Some(Err(e)) => {
                errors.push("favoriteMovies", e);
                Vec::new()
            }
            None => Vec::new(),
        };
        let created_at = errors.cast("createdAt", self.created_at.as_ref(), Scalar::to_date);
        errors.into_result()?;

        Ok(User {
            id: None,
            username,
            password,
            email,
            date_of_birth,
            favorite_movies,
            created_at,
        })
    }
}

/// Body of `PUT /users/:id`. Every field is optional; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<Scalar>,
    pub password: Option<Scalar>,
    pub email: Option<Scalar>,
    pub date_of_birth: Option<Scalar>,
    pub favorite_movies: Option<OneOrMany<Scalar>>,
    pub created_at: Option<Scalar>,
}

impl UpdateUserRequest {
    /// Fails with the first cast error, without an entity prefix.
    pub fn into_update(self) -> Result<UserUpdate, String> {
        Ok(UserUpdate {
            username: self.username.map(Scalar::into_text),
            password: self.password.map(Scalar::into_text),
            email: self.email.map(Scalar::into_text),
            date_of_birth: self.date_of_birth.map(|v| v.to_date("dateOfBirth")).transpose()?,
            favorite_movies: self.favorite_movies.map(cast_object_ids).transpose()?,
            created_at: self.created_at.map(|v| v.to_date("createdAt")).transpose()?,
        })
    }
}

/// An empty string counts as missing.
fn required_text(errors: &mut FieldErrors, path: &str, value: Option<Scalar>) -> String {
    let text = value.map(Scalar::into_text).unwrap_or_default();
    if text.is_empty() {
        errors.required(path);
    }
    text
}

fn cast_object_ids(values: OneOrMany<Scalar>) -> Result<Vec<ObjectId>, String> {
    values
        .into_vec()
        .iter()
        .map(|value| value.to_object_id("favoriteMovies"))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub favorite_movies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()),
            username: user.username,
            password: user.password,
            email: user.email,
            date_of_birth: user.date_of_birth.map(format_date),
            favorite_movies: user.favorite_movies.iter().map(|id| id.to_hex()).collect(),
            created_at: user.created_at.map(format_date),
        }
    }
}
