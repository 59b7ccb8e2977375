use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A document in the movies collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub cast: Vec<String>,
}

impl Movie {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Movie {
            id: None,
            title: title.into(),
            description: None,
            genre: None,
            director: None,
            image_url: None,
            is_featured: false,
            release_year: None,
            rating: None,
            cast: Vec::new(),
        }
    }
}
