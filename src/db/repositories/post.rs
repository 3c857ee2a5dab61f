use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};

use crate::entities::posts;
use crate::models::post::Comment;

pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, post: posts::ActiveModel) -> Result<posts::Model> {
        let model = post
            .insert(&self.conn)
            .await
            .context("Failed to insert post")?;
        Ok(model)
    }

    pub async fn get(&self, business_id: &str, post_id: &str) -> Result<Option<posts::Model>> {
        let post = posts::Entity::find_by_id(post_id)
            .filter(posts::Column::BusinessId.eq(business_id))
            .one(&self.conn)
            .await
            .context("Failed to query post")?;
        Ok(post)
    }

    /// Lookup without the business scope, for customer-side like/comment
    /// actions that only carry the post id.
    pub async fn get_by_id(&self, post_id: &str) -> Result<Option<posts::Model>> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.conn)
            .await
            .context("Failed to query post by id")?;
        Ok(post)
    }

    pub async fn list_for_business(
        &self,
        business_id: &str,
        visible_only: bool,
    ) -> Result<Vec<posts::Model>> {
        let mut query = posts::Entity::find().filter(posts::Column::BusinessId.eq(business_id));

        if visible_only {
            query = query.filter(posts::Column::Flag.eq(0));
        }

        let posts = query
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list posts")?;
        Ok(posts)
    }

    pub async fn update(&self, post: posts::ActiveModel) -> Result<posts::Model> {
        let model = post
            .update(&self.conn)
            .await
            .context("Failed to update post")?;
        Ok(model)
    }

    pub async fn increment_flag(&self, business_id: &str, post_id: &str) -> Result<bool> {
        let Some(post) = self.get(business_id, post_id).await? else {
            return Ok(false);
        };

        let flag = post.flag;
        let mut active: posts::ActiveModel = post.into();
        active.flag = Set(flag + 1);
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Like semantics of the original document updates: the like count and
    /// the liked_by list move together, and a customer can like a post at
    /// most once.
    pub async fn like(&self, post_id: &str, cust_id: &str) -> Result<Option<posts::Model>> {
        let Some(post) = self.get_by_id(post_id).await? else {
            return Ok(None);
        };

        let mut liked_by: Vec<String> = serde_json::from_str(&post.liked_by).unwrap_or_default();
        if liked_by.iter().any(|c| c == cust_id) {
            return Ok(Some(post));
        }
        liked_by.push(cust_id.to_string());

        let likes = post.likes + 1;
        let mut active: posts::ActiveModel = post.into();
        active.likes = Set(likes);
        active.liked_by = Set(serde_json::to_string(&liked_by)?);
        let model = active.update(&self.conn).await?;

        Ok(Some(model))
    }

    pub async fn unlike(&self, post_id: &str, cust_id: &str) -> Result<Option<posts::Model>> {
        let Some(post) = self.get_by_id(post_id).await? else {
            return Ok(None);
        };

        let mut liked_by: Vec<String> = serde_json::from_str(&post.liked_by).unwrap_or_default();
        let before = liked_by.len();
        liked_by.retain(|c| c != cust_id);
        if liked_by.len() == before {
            return Ok(Some(post));
        }

        let likes = (post.likes - 1).max(0);
        let mut active: posts::ActiveModel = post.into();
        active.likes = Set(likes);
        active.liked_by = Set(serde_json::to_string(&liked_by)?);
        let model = active.update(&self.conn).await?;

        Ok(Some(model))
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        comment: Comment,
    ) -> Result<Option<posts::Model>> {
        let Some(post) = self.get_by_id(post_id).await? else {
            return Ok(None);
        };

        let mut comments: Vec<Comment> = serde_json::from_str(&post.comments).unwrap_or_default();
        comments.push(comment);

        let mut active: posts::ActiveModel = post.into();
        active.comments = Set(serde_json::to_string(&comments)?);
        let model = active.update(&self.conn).await?;

        Ok(Some(model))
    }

    /// Removes every comment the customer left on the post.
    pub async fn remove_comments(
        &self,
        post_id: &str,
        cust_id: &str,
    ) -> Result<Option<posts::Model>> {
        let Some(post) = self.get_by_id(post_id).await? else {
            return Ok(None);
        };

        let mut comments: Vec<Comment> = serde_json::from_str(&post.comments).unwrap_or_default();
        comments.retain(|c| c.customer_id != cust_id);

        let mut active: posts::ActiveModel = post.into();
        active.comments = Set(serde_json::to_string(&comments)?);
        let model = active.update(&self.conn).await?;

        Ok(Some(model))
    }

    pub async fn delete(&self, business_id: &str, post_id: &str) -> Result<bool> {
        let result = posts::Entity::delete_many()
            .filter(posts::Column::BusinessId.eq(business_id))
            .filter(posts::Column::PostId.eq(post_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete post")?;
        Ok(result.rows_affected > 0)
    }
}
