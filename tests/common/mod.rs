#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use bson::{doc, oid::ObjectId, Bson, Document};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use movie_api::model::movie::Movie;
use movie_api::model::user::{User, UserUpdate};
use movie_api::repository::movie_repo::{genre_filter, MovieRepository};
use movie_api::repository::repository_error::{RepositoryError, RepositoryResult};
use movie_api::repository::user_repo::UserRepository;
use movie_api::router::app_router;
use movie_api::service::movie_service::MovieServiceImpl;
use movie_api::service::user_service::UserServiceImpl;

/// Movie store holding raw documents and evaluating the repository's
/// equality filters against them, decoding matches like the driver does.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: Mutex<Vec<Document>>,
    pub calls: AtomicUsize,
    pub fail: bool,
}

fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

impl InMemoryMovieRepository {
    pub fn failing() -> Self {
        InMemoryMovieRepository { fail: true, ..Default::default() }
    }

    /// Stores a document as-is, bypassing the `Movie` model.
    pub fn insert_raw(&self, doc: Document) {
        self.movies.lock().unwrap().push(doc);
    }

    fn check(&self) -> RepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::ConnectionError("connection refused".to_string()));
        }
        Ok(())
    }

    fn query(&self, filter: Document) -> RepositoryResult<Vec<Movie>> {
        self.movies
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| filter.iter().all(|(key, expected)| lookup(doc, key) == Some(expected)))
            .map(|doc| bson::from_document(doc.clone()).map_err(RepositoryError::from))
            .collect()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Movie>> {
        self.check()?;
        self.query(Document::new())
    }

    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Movie>> {
        self.check()?;
        Ok(self.query(doc! { "title": title })?.into_iter().next())
    }

    async fn find_by_genre(&self, genre: &str) -> RepositoryResult<Vec<Movie>> {
        self.check()?;
        self.query(genre_filter(genre))
    }

    async fn find_by_director(&self, director: &str) -> RepositoryResult<Vec<Movie>> {
        self.check()?;
        self.query(doc! { "director": director })
    }

    async fn insert(&self, mut movie: Movie) -> RepositoryResult<Movie> {
        self.check()?;
        movie.id = Some(ObjectId::new());
        let doc = bson::to_document(&movie)?;
        self.insert_raw(doc);
        Ok(movie)
    }
}

/// User store enforcing unique username/email like the Mongo indexes.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl InMemoryUserRepository {
    pub fn failing() -> Self {
        InMemoryUserRepository { fail: true, ..Default::default() }
    }

    fn check(&self) -> RepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::DatabaseError("not primary and secondaryOk=false".to_string()));
        }
        Ok(())
    }

    fn duplicate(users: &[User], skip: Option<ObjectId>, username: &str, email: &str) -> Option<String> {
        for other in users.iter().filter(|u| u.id != skip) {
            if other.username == username {
                return Some(format!(
                    "E11000 duplicate key error collection: MovieDB.users index: username_1 dup key: {{ username: \"{}\" }}",
                    username
                ));
            }
            if other.email == email {
                return Some(format!(
                    "E11000 duplicate key error collection: MovieDB.users index: email_1 dup key: {{ email: \"{}\" }}",
                    email
                ));
            }
        }
        None
    }

    fn modify<F: FnOnce(&mut User)>(&self, id: ObjectId, f: F) -> Option<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == Some(id))?;
        f(user);
        Some(user.clone())
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if let Some(msg) = Self::duplicate(&users, None, &user.username, &user.email) {
            return Err(RepositoryError::already_exists(msg));
        }
        user.id = Some(ObjectId::new());
        if user.created_at.is_none() {
            user.created_at = Some(bson::DateTime::now());
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, update: UserUpdate) -> RepositoryResult<Option<User>> {
        self.check()?;
        {
            let users = self.users.lock().unwrap();
            if let Some(current) = users.iter().find(|u| u.id == Some(id)) {
                let mut merged = current.clone();
                update.apply_to(&mut merged);
                if let Some(msg) = Self::duplicate(&users, Some(id), &merged.username, &merged.email) {
                    return Err(RepositoryError::already_exists(msg));
                }
            }
        }
        Ok(self.modify(id, |u| update.apply_to(u)))
    }

    async fn add_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>> {
        self.check()?;
        Ok(self.modify(id, |u| {
            if !u.favorite_movies.contains(&movie_id) {
                u.favorite_movies.push(movie_id);
            }
        }))
    }

    async fn remove_favorite(&self, id: ObjectId, movie_id: ObjectId) -> RepositoryResult<Option<User>> {
        self.check()?;
        Ok(self.modify(id, |u| u.favorite_movies.retain(|m| *m != movie_id)))
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        self.check()?;
        self.users.lock().unwrap().retain(|u| u.id != Some(id));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub movies: Arc<InMemoryMovieRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn setup_app() -> TestApp {
    setup_app_with(Arc::new(InMemoryMovieRepository::default()))
}

pub fn setup_app_with(movies: Arc<InMemoryMovieRepository>) -> TestApp {
    setup_app_with_repos(movies, Arc::new(InMemoryUserRepository::default()))
}

pub fn setup_app_with_users(users: Arc<InMemoryUserRepository>) -> TestApp {
    setup_app_with_repos(Arc::new(InMemoryMovieRepository::default()), users)
}

fn setup_app_with_repos(movies: Arc<InMemoryMovieRepository>, users: Arc<InMemoryUserRepository>) -> TestApp {
    let movie_service = Arc::new(MovieServiceImpl::new(movies.clone()));
    let user_service = Arc::new(UserServiceImpl::new(users.clone()));
    TestApp { router: app_router(movie_service, user_service), movies, users }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let (status, text) = send(app, method, uri, body).await;
    let json = serde_json::from_str(&text).unwrap_or_else(|_| panic!("expected JSON body, got {:?}", text));
    (status, json)
}
