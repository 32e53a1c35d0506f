//! HTTP implementation of the remote recipe catalog contract.
//!
//! Thin reqwest client over the upstream JSON service. Endpoint shapes
//! follow the service's conventions: `_id` keys, `likes` arrays, bearer
//! tokens in the `Authorization` header.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use forkful_core::api::RecipeApi;
use forkful_core::recipe::{Recipe, RecipeDraft};
use forkful_core::session::Session;
use forkful_core::{ForkfulError, Result};

/// Client for the remote recipe service.
#[derive(Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    ingredients: &'a [String],
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: WireUser,
    token: String,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default, rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

/// Like acknowledgments optionally carry the authoritative set.
#[derive(Debug, Deserialize)]
struct LikeResponse {
    likes: Vec<String>,
}

impl HttpRecipeApi {
    /// Creates a client against `base_url` (e.g. `http://localhost:502`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_bearer(builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ForkfulError::transient(format!("request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ForkfulError::unauthenticated(format!(
                "server rejected credentials ({})",
                status
            )));
        }
        if !status.is_success() {
            return Err(ForkfulError::transient(format!(
                "server returned {}",
                status
            )));
        }
        Ok(response)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            ForkfulError::Serialization {
                format: "JSON".to_string(),
                message: e.to_string(),
            }
        })
    }

    fn session_from(auth: AuthResponse) -> Session {
        Session::new(auth.user.id, auth.token, auth.user.name, auth.user.email)
            .with_created_at(auth.user.created_at)
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn search(&self, tokens: &[String], bearer: Option<&str>) -> Result<Vec<Recipe>> {
        let builder = self
            .client
            .post(self.url("/api/recipes/search"))
            .json(&SearchRequest {
                ingredients: tokens,
            });
        let response = Self::send(Self::with_bearer(builder, bearer)).await?;
        Self::decode(response).await
    }

    async fn list_recipes(&self, bearer: &str) -> Result<Vec<Recipe>> {
        let builder = self.client.get(self.url("/api/recipes")).bearer_auth(bearer);
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    async fn toggle_like(&self, recipe_id: &str, bearer: &str) -> Result<Option<Vec<String>>> {
        let builder = self
            .client
            .post(self.url(&format!("/api/recipes/like/{}", recipe_id)))
            .bearer_auth(bearer);
        let response = Self::send(builder).await?;

        // The toggle endpoint acknowledges with an arbitrary body; only a
        // `likes` array counts as an authoritative membership set.
        let body = response
            .text()
            .await
            .map_err(|e| ForkfulError::transient(format!("failed to read response: {}", e)))?;
        match serde_json::from_str::<LikeResponse>(&body) {
            Ok(like) => Ok(Some(like.likes)),
            Err(_) => Ok(None),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let builder = self
            .client
            .post(self.url("/api/users/login"))
            .json(&LoginRequest { email, password });
        let response = Self::send(builder).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(Self::session_from(auth))
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let builder = self
            .client
            .post(self.url("/api/users/signup"))
            .json(&SignupRequest {
                name,
                email,
                password,
            });
        let response = Self::send(builder).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(Self::session_from(auth))
    }

    async fn create_recipe(&self, draft: &RecipeDraft, bearer: &str) -> Result<Recipe> {
        let builder = self
            .client
            .post(self.url("/api/recipes"))
            .bearer_auth(bearer)
            .json(draft);
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    async fn delete_recipe(&self, recipe_id: &str, bearer: &str) -> Result<()> {
        let builder = self
            .client
            .delete(self.url(&format!("/api/recipes/{}", recipe_id)))
            .bearer_auth(bearer);
        Self::send(builder).await?;
        Ok(())
    }
}
