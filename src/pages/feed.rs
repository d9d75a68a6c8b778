// SPDX-License-Identifier: MIT

//! Feed pages: the post list and the single-post view with comments.
//!
//! Counter policy is confirmed-after-success throughout: `likes_count`
//! and `comments_count` only move once the server has accepted the
//! mutation, so a failed request leaves the cache exactly as it was.

use crate::api::posts::PostQuery;
use crate::api::{ApiClient, ImageUpload};
use crate::error::{FieldErrors, Result};
use crate::models::{Comment, Post, PostUpdate};
use crate::notify::Notices;
use crate::state::{ChangeTracked, ConfirmFlow, Paginator};

// ─── Post list ───────────────────────────────────────────────────────────────

/// The scrolling post list (home feed, liked feed, a profile's posts).
pub struct PostFeed {
    client: ApiClient,
    notices: Notices,
    query: PostQuery,
    posts: Paginator<Post>,
    delete_flow: ConfirmFlow,
    pending_delete: Option<u64>,
    loaded: bool,
}

impl PostFeed {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self::with_filter(client, notices, "")
    }

    /// Feed restricted by a raw filter fragment, e.g. `owner__profile=3&`.
    pub fn with_filter(client: ApiClient, notices: Notices, filter: &str) -> Self {
        Self {
            client,
            notices,
            query: PostQuery {
                filter: filter.to_string(),
                search: String::new(),
            },
            posts: Paginator::new(),
            delete_flow: ConfirmFlow::new(),
            pending_delete: None,
            loaded: false,
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.items()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_more(&self) -> bool {
        self.posts.has_more()
    }

    pub fn is_loading_more(&self) -> bool {
        self.posts.is_loading()
    }

    /// Update the search query; the caller refetches afterwards.
    pub fn set_search(&mut self, search: &str) {
        self.query.search = search.to_string();
        self.loaded = false;
    }

    /// Fetch page 1, replacing the cache.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.client.list_posts(&self.query).await {
            Ok(page) => {
                self.posts.reset(page);
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load posts");
                self.notices.error("Failed to load posts. Please try again.");
                Err(err)
            }
        }
    }

    /// Infinite-scroll trigger: fetch and append the next page.
    pub async fn load_more(&mut self) -> Result<usize> {
        let client = self.client.clone();
        match self.posts.load_more(&client).await {
            Ok(count) => Ok(count),
            Err(err) => {
                self.notices.error("Failed to load more posts. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Likes ───────────────────────────────────────────────────────────────

    /// Like a post. The counter moves only after the server confirms.
    pub async fn like(&mut self, post_id: u64) -> Result<()> {
        let Some(post) = self.posts.collection().get(post_id) else {
            return Ok(());
        };
        if !like_allowed(&self.client, &self.notices, post) || post.like_id.is_some() {
            return Ok(());
        }

        match self.client.like_post(post_id).await {
            Ok(like) => {
                self.posts
                    .collection_mut()
                    .update_one(post_id, |post| post.apply_like(like.id));
                self.notices.success("Post liked!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error liking post. Please try again.");
                Err(err)
            }
        }
    }

    /// Remove the signed-in user's like of a post.
    pub async fn unlike(&mut self, post_id: u64) -> Result<()> {
        let Some(like_id) = self
            .posts
            .collection()
            .get(post_id)
            .and_then(|post| post.like_id)
        else {
            return Ok(());
        };

        match self.client.unlike(like_id).await {
            Ok(()) => {
                self.posts
                    .collection_mut()
                    .update_one(post_id, Post::apply_unlike);
                self.notices.success("Post unliked!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error unliking post. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Deletion (confirm-then-commit) ──────────────────────────────────────

    /// Open the delete dialog. Only the owner may delete.
    pub fn request_delete(&mut self, post_id: u64) -> bool {
        let owns = self
            .posts
            .collection()
            .get(post_id)
            .map(|post| post.owned_by(self.client.session().username().as_deref()))
            .unwrap_or(false);
        if !owns {
            return false;
        }
        if self.delete_flow.request() {
            self.pending_delete = Some(post_id);
            true
        } else {
            false
        }
    }

    pub fn delete_dialog_open(&self) -> bool {
        self.delete_flow.is_pending()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_flow.cancel();
        self.pending_delete = None;
    }

    /// Confirmed delete: one DELETE request, cache entry removed on success.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(post_id) = self.pending_delete.take() else {
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .delete_flow
            .commit(async move { client.delete_post(post_id).await })
            .await;

        match result {
            Ok(()) => {
                self.posts.collection_mut().remove_one(post_id);
                self.notices.success("Post deleted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error deleting post. Please try again.");
                Err(err)
            }
        }
    }
}

/// Gate a like attempt: signed in, and not the author.
fn like_allowed(client: &ApiClient, notices: &Notices, post: &Post) -> bool {
    let session = client.session();
    if !session.is_authenticated() {
        notices.warning("Log in to like posts!");
        return false;
    }
    if post.owned_by(session.username().as_deref()) {
        notices.info("You can't like your own post!");
        return false;
    }
    true
}

// ─── Post edit form ──────────────────────────────────────────────────────────

/// Edit form for a post: change-tracked title/content plus an optional
/// replacement image.
pub struct PostEditor {
    client: ApiClient,
    notices: Notices,
    post_id: u64,
    form: Option<ChangeTracked<PostUpdate>>,
    image: Option<ImageUpload>,
    errors: FieldErrors,
}

impl PostEditor {
    pub fn new(client: ApiClient, notices: Notices, post_id: u64) -> Self {
        Self {
            client,
            notices,
            post_id,
            form: None,
            image: None,
            errors: FieldErrors::new(),
        }
    }

    /// Fetch the post into the form. Only the owner may edit.
    pub async fn load(&mut self) -> Result<Post> {
        let post = match self.client.get_post(self.post_id).await {
            Ok(post) => post,
            Err(err) => {
                self.notices.error("Failed to load the post. Please try again.");
                return Err(err);
            }
        };

        if !post.owned_by(self.client.session().username().as_deref()) {
            self.notices
                .error("You don't have permission to edit this post.");
            return Err(crate::error::ApiError::Forbidden);
        }

        self.form = Some(ChangeTracked::new(PostUpdate::from(&post)));
        Ok(post)
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.title = title.to_string());
        }
    }

    pub fn set_content(&mut self, content: &str) {
        if let Some(form) = self.form.as_mut() {
            form.edit(|draft| draft.content = content.to_string());
        }
    }

    /// Select a replacement image; counts as a change on its own.
    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn can_submit(&self) -> bool {
        let fields_dirty = self
            .form
            .as_ref()
            .map(|form| form.is_dirty())
            .unwrap_or(false);
        fields_dirty || self.image.is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Save the edit; the draft survives a failure for retry.
    pub async fn save(&mut self) -> Result<Post> {
        let Some(form) = self.form.as_ref() else {
            return Err(crate::error::ApiError::Internal(anyhow::anyhow!(
                "post not loaded"
            )));
        };
        let update = form.draft().clone();

        let result = self
            .client
            .update_post(self.post_id, &update, self.image.clone())
            .await;

        match result {
            Ok(post) => {
                self.errors.clear();
                self.image = None;
                if let Some(form) = self.form.as_mut() {
                    form.commit_value(PostUpdate::from(&post));
                }
                self.notices.success("Post updated successfully!");
                Ok(post)
            }
            Err(err) => {
                if let Some(fields) = err.field_errors() {
                    self.errors = fields.clone();
                }
                self.notices.error("Error updating post. Please try again.");
                Err(err)
            }
        }
    }
}

// ─── Single post with comments ───────────────────────────────────────────────

struct CommentEditor {
    comment_id: u64,
    form: ChangeTracked<String>,
}

/// The single-post page: the post itself plus its comment thread.
pub struct PostDetail {
    client: ApiClient,
    notices: Notices,
    post: Option<Post>,
    comments: Paginator<Comment>,
    composer: String,
    editor: Option<CommentEditor>,
    delete_flow: ConfirmFlow,
    pending_delete: Option<u64>,
}

impl PostDetail {
    pub fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            post: None,
            comments: Paginator::new(),
            composer: String::new(),
            editor: None,
            delete_flow: ConfirmFlow::new(),
            pending_delete: None,
        }
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.items()
    }

    pub fn has_more_comments(&self) -> bool {
        self.comments.has_more()
    }

    /// Load the post and the first page of its comments together.
    pub async fn load(&mut self, post_id: u64) -> Result<()> {
        let loaded = tokio::try_join!(
            self.client.get_post(post_id),
            self.client.list_comments(post_id)
        );

        match loaded {
            Ok((post, comments)) => {
                self.post = Some(post);
                self.comments.reset(comments);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, post_id, "Failed to load post");
                self.notices.error("Failed to load the post. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn load_more_comments(&mut self) -> Result<usize> {
        let client = self.client.clone();
        match self.comments.load_more(&client).await {
            Ok(count) => Ok(count),
            Err(err) => {
                self.notices
                    .error("Failed to load more comments. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Likes on the loaded post ────────────────────────────────────────────

    pub async fn like(&mut self) -> Result<()> {
        let Some(post) = self.post.as_ref() else {
            return Ok(());
        };
        if !like_allowed(&self.client, &self.notices, post) || post.like_id.is_some() {
            return Ok(());
        }

        match self.client.like_post(post.id).await {
            Ok(like) => {
                if let Some(post) = self.post.as_mut() {
                    post.apply_like(like.id);
                }
                self.notices.success("Post liked!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error liking post. Please try again.");
                Err(err)
            }
        }
    }

    pub async fn unlike(&mut self) -> Result<()> {
        let Some(like_id) = self.post.as_ref().and_then(|post| post.like_id) else {
            return Ok(());
        };

        match self.client.unlike(like_id).await {
            Ok(()) => {
                if let Some(post) = self.post.as_mut() {
                    post.apply_unlike();
                }
                self.notices.success("Post unliked!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error unliking post. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Comment composer ────────────────────────────────────────────────────

    pub fn composer(&self) -> &str {
        &self.composer
    }

    pub fn set_composer(&mut self, content: &str) {
        self.composer = content.to_string();
    }

    /// The post button stays disabled for blank input or anonymous users.
    pub fn can_submit_comment(&self) -> bool {
        !self.composer.trim().is_empty() && self.client.session().is_authenticated()
    }

    /// Post the drafted comment: prepend it and bump the parent counter
    /// once the server confirms.
    pub async fn submit_comment(&mut self) -> Result<()> {
        if !self.can_submit_comment() {
            return Ok(());
        }
        let Some(post_id) = self.post.as_ref().map(|post| post.id) else {
            return Ok(());
        };

        match self.client.create_comment(post_id, &self.composer).await {
            Ok(comment) => {
                self.comments.collection_mut().prepend(comment);
                if let Some(post) = self.post.as_mut() {
                    post.adjust_comments(1);
                }
                self.composer.clear();
                self.notices.success("Comment posted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error posting comment. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Comment editing ─────────────────────────────────────────────────────

    /// Open the inline edit form for one of the user's own comments.
    pub fn begin_edit(&mut self, comment_id: u64) -> bool {
        let username = self.client.session().username();
        let Some(comment) = self.comments.collection().get(comment_id) else {
            return false;
        };
        if !comment.owned_by(username.as_deref()) {
            return false;
        }

        self.editor = Some(CommentEditor {
            comment_id,
            form: ChangeTracked::new(comment.content.clone()),
        });
        true
    }

    pub fn editing_comment(&self) -> Option<u64> {
        self.editor.as_ref().map(|editor| editor.comment_id)
    }

    pub fn edit_content(&mut self, content: &str) {
        if let Some(editor) = self.editor.as_mut() {
            editor.form.edit(|draft| *draft = content.to_string());
        }
    }

    pub fn can_save_edit(&self) -> bool {
        self.editor
            .as_ref()
            .map(|editor| editor.form.can_submit())
            .unwrap_or(false)
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Save the edited comment; the draft survives a failure for retry.
    pub async fn save_edit(&mut self) -> Result<()> {
        let Some(editor) = self.editor.as_ref() else {
            return Ok(());
        };
        if !editor.form.can_submit() {
            self.notices.info("No changes were made to the comment.");
            return Ok(());
        }

        let comment_id = editor.comment_id;
        let content = editor.form.draft().clone();
        match self.client.update_comment(comment_id, &content).await {
            Ok(updated) => {
                self.comments.collection_mut().replace_one(comment_id, updated);
                self.editor = None;
                self.notices.success("Comment updated successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error updating comment. Please try again.");
                Err(err)
            }
        }
    }

    // ─── Comment deletion (confirm-then-commit) ──────────────────────────────

    pub fn request_delete_comment(&mut self, comment_id: u64) -> bool {
        let username = self.client.session().username();
        let owns = self
            .comments
            .collection()
            .get(comment_id)
            .map(|comment| comment.owned_by(username.as_deref()))
            .unwrap_or(false);
        if !owns {
            return false;
        }
        if self.delete_flow.request() {
            self.pending_delete = Some(comment_id);
            true
        } else {
            false
        }
    }

    pub fn delete_dialog_open(&self) -> bool {
        self.delete_flow.is_pending()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_flow.cancel();
        self.pending_delete = None;
    }

    /// Confirmed delete: removes exactly one comment and decrements the
    /// parent post's counter by exactly one.
    pub async fn confirm_delete_comment(&mut self) -> Result<()> {
        let Some(comment_id) = self.pending_delete.take() else {
            return Ok(());
        };

        let client = self.client.clone();
        let result = self
            .delete_flow
            .commit(async move { client.delete_comment(comment_id).await })
            .await;

        match result {
            Ok(()) => {
                if self.comments.collection_mut().remove_one(comment_id).is_some() {
                    if let Some(post) = self.post.as_mut() {
                        post.adjust_comments(-1);
                    }
                }
                self.notices.success("Comment deleted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notices.error("Error deleting comment. Please try again.");
                Err(err)
            }
        }
    }
}
