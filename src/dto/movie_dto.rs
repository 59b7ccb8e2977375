use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::json_number;
use crate::model::movie::Movie;
use crate::util::cast::{OneOrMany, Scalar};
use crate::util::validation::FieldErrors;

const MOVIE_FIELDS: &[&str] = &[
    "title",
    "description",
    "genre",
    "director",
    "imageURL",
    "isFeatured",
    "releaseYear",
    "rating",
    "cast",
];

/// Body of `POST /movies`. Unknown fields are ignored; scalar values are cast
/// to the field's type when possible.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[validate(required)]
    pub title: Option<Scalar>,
    pub description: Option<Scalar>,
    pub genre: Option<Scalar>,
    pub director: Option<Scalar>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<Scalar>,
    pub is_featured: Option<Scalar>,
    pub release_year: Option<Scalar>,
    pub rating: Option<Scalar>,
    pub cast: Option<OneOrMany<Scalar>>,
}

impl CreateMovieRequest {
    /// Validates and casts the body. Every failing path is reported in one
    /// `Movie validation failed: ...` message.
    pub fn into_movie(self) -> Result<Movie, String> {
        let mut errors = FieldErrors::new("Movie", MOVIE_FIELDS);
        if let Err(e) = self.validate() {
            errors.add_validation(&e);
        }

        let title = self.title.map(Scalar::into_text).unwrap_or_default();
        if title.is_empty() {
            errors.required("title");
        }
        let is_featured = errors.cast("isFeatured", self.is_featured.as_ref(), Scalar::to_bool);
        let release_year = errors.cast("releaseYear", self.release_year.as_ref(), Scalar::to_number);
        let rating = errors.cast("rating", self.rating.as_ref(), Scalar::to_number);
        errors.into_result()?;

        Ok(Movie {
            id: None,
            title,
            description: self.description.map(Scalar::into_text),
            genre: self.genre.map(Scalar::into_text),
            director: self.director.map(Scalar::into_text),
            image_url: self.image_url.map(Scalar::into_text),
            is_featured: is_featured.unwrap_or(false),
            release_year: release_year.flatten(),
            rating: rating.flatten(),
            cast: self
                .cast
                .map(|c| c.into_vec().into_iter().map(Scalar::into_text).collect())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<serde_json::Number>,
    pub cast: Vec<String>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        MovieResponse {
            id: movie.id.map(|id| id.to_hex()),
            title: movie.title,
            description: movie.description,
            genre: movie.genre,
            director: movie.director,
            image_url: movie.image_url,
            is_featured: movie.is_featured,
            release_year: movie.release_year.and_then(json_number),
            rating: movie.rating.and_then(json_number),
            cast: movie.cast,
        }
    }
}

/// Body of `GET /genres/:genre`.
#[derive(Debug, Clone, Serialize)]
pub struct GenreResponse {
    pub genre: String,
    pub description: String,
    pub examples: Vec<MovieResponse>,
}

impl GenreResponse {
    pub fn new(genre: &str, movies: Vec<Movie>) -> Self {
        GenreResponse {
            genre: genre.to_string(),
            description: format!("Movies in the {} genre", genre),
            examples: movies.into_iter().map(MovieResponse::from).collect(),
        }
    }
}

/// Body of `GET /directors/:name`. Biographical data is not stored, so the
/// bio is a placeholder and the years are always null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorResponse {
    pub director: String,
    pub bio: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub movies: Vec<MovieResponse>,
}

impl DirectorResponse {
    pub fn new(director: &str, movies: Vec<Movie>) -> Self {
        DirectorResponse {
            director: director.to_string(),
            bio: "Bio not stored".to_string(),
            birth_year: None,
            death_year: None,
            movies: movies.into_iter().map(MovieResponse::from).collect(),
        }
    }
}
