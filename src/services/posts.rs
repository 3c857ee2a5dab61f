use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::db::Store;
use crate::entities::posts;
use crate::models::post::Comment;
use crate::services::{ServiceError, require_id};

/// Post with its embedded document fields decoded.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub post_id: String,
    pub business_id: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub likes: i64,
    pub liked_by: Vec<String>,
    pub comments: Vec<Comment>,
    pub flag: i32,
    pub created_at: String,
}

impl From<posts::Model> for PostView {
    fn from(model: posts::Model) -> Self {
        Self {
            liked_by: serde_json::from_str(&model.liked_by).unwrap_or_default(),
            comments: serde_json::from_str(&model.comments).unwrap_or_default(),
            post_id: model.post_id,
            business_id: model.business_id,
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            likes: model.likes,
            flag: model.flag,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

pub struct PostService {
    store: Store,
}

impl PostService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        business_id: &str,
        request: CreatePostRequest,
    ) -> Result<PostView, ServiceError> {
        require_id(business_id, "Business id")?;
        if request.title.trim().is_empty() {
            return Err(ServiceError::validation("Post title is required"));
        }

        let post = posts::ActiveModel {
            post_id: Set(uuid::Uuid::new_v4().to_string()),
            business_id: Set(business_id.to_string()),
            title: Set(request.title),
            content: Set(request.content),
            image_url: Set(request.image_url),
            likes: Set(0),
            liked_by: Set("[]".to_string()),
            comments: Set("[]".to_string()),
            flag: Set(0),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let model = self.store.posts().insert(post).await?;
        Ok(model.into())
    }

    pub async fn list(
        &self,
        business_id: &str,
        visible_only: bool,
    ) -> Result<Vec<PostView>, ServiceError> {
        require_id(business_id, "Business id")?;

        let posts = self
            .store
            .posts()
            .list_for_business(business_id, visible_only)
            .await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        &self,
        business_id: &str,
        post_id: &str,
        visible_only: bool,
    ) -> Result<PostView, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(post_id, "Post id")?;

        let post = self
            .store
            .posts()
            .get(business_id, post_id)
            .await?
            .filter(|p| !visible_only || p.flag == 0)
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(post.into())
    }

    pub async fn update(
        &self,
        business_id: &str,
        post_id: &str,
        request: UpdatePostRequest,
    ) -> Result<PostView, ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(post_id, "Post id")?;

        let post = self
            .store
            .posts()
            .get(business_id, post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;

        let mut active: posts::ActiveModel = post.into();
        if let Some(title) = request.title {
            active.title = Set(title);
        }
        if let Some(content) = request.content {
            active.content = Set(content);
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(Some(image_url));
        }

        let model = self.store.posts().update(active).await?;
        Ok(model.into())
    }

    /// Archives the post by bumping its flag past zero.
    pub async fn archive(&self, business_id: &str, post_id: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(post_id, "Post id")?;

        let found = self.store.posts().increment_flag(business_id, post_id).await?;
        if !found {
            return Err(ServiceError::not_found("Post"));
        }
        Ok(())
    }

    pub async fn delete(&self, business_id: &str, post_id: &str) -> Result<(), ServiceError> {
        require_id(business_id, "Business id")?;
        require_id(post_id, "Post id")?;

        let deleted = self.store.posts().delete(business_id, post_id).await?;
        if !deleted {
            return Err(ServiceError::not_found("Post"));
        }
        Ok(())
    }

    pub async fn like(&self, cust_id: &str, post_id: &str) -> Result<PostView, ServiceError> {
        require_id(cust_id, "Customer id")?;
        require_id(post_id, "Post id")?;

        let post = self
            .store
            .posts()
            .like(post_id, cust_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(post.into())
    }

    pub async fn unlike(&self, cust_id: &str, post_id: &str) -> Result<PostView, ServiceError> {
        require_id(cust_id, "Customer id")?;
        require_id(post_id, "Post id")?;

        let post = self
            .store
            .posts()
            .unlike(post_id, cust_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(post.into())
    }

    pub async fn comment(
        &self,
        cust_id: &str,
        post_id: &str,
        request: CommentRequest,
    ) -> Result<PostView, ServiceError> {
        require_id(cust_id, "Customer id")?;
        require_id(post_id, "Post id")?;
        if request.comment.trim().is_empty() {
            return Err(ServiceError::validation("Comment text is required"));
        }

        let post = self
            .store
            .posts()
            .add_comment(
                post_id,
                Comment {
                    customer_id: cust_id.to_string(),
                    comment: request.comment,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(post.into())
    }

    /// Removes every comment the customer left on the post.
    pub async fn uncomment(&self, cust_id: &str, post_id: &str) -> Result<PostView, ServiceError> {
        require_id(cust_id, "Customer id")?;
        require_id(post_id, "Post id")?;

        let post = self
            .store
            .posts()
            .remove_comments(post_id, cust_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post"))?;
        Ok(post.into())
    }
}
