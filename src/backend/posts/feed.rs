//! Feed ranking
//!
//! Builds the paginated post listings. Filters combine conjunctively and
//! ordering has two tiers:
//!
//! 1. a pin tier: `personal_top` when listing one author's posts, otherwise
//!    `site_top` when the feed is time-ordered, otherwise none
//! 2. a metric tier: creation time, views or likes, all descending
//!
//! The row count and the page are produced from the same filter builder so
//! `total` always describes the rows the page was cut from.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::db::{attach_tags, ensure_user, fetch_post, post_from_row, post_select};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::query::like_pattern;
use crate::shared::blog::{Actor, PageMeta, Post, PostPage, PostStatus, SortKey};

/// Status restriction of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Only(PostStatus),
    /// No restriction; reserved for the author or an admin
    Any,
}

/// Parameters of a feed listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// 1-based page number
    pub page: i64,
    pub page_size: i64,
    /// Exact tag name
    pub tag: Option<String>,
    pub author_id: Option<i64>,
    pub status: StatusFilter,
    pub sort: SortKey,
    /// Case-insensitive substring over title, author username and tag names
    pub keyword: Option<String>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            tag: None,
            author_id: None,
            status: StatusFilter::Only(PostStatus::Published),
            sort: SortKey::CreatedAt,
            keyword: None,
        }
    }
}

impl FeedQuery {
    fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.page_size
    }

    /// `ORDER BY` expression for this query
    pub fn order_clause(&self) -> String {
        let mut order = Vec::with_capacity(3);
        if self.author_id.is_some() {
            order.push("p.personal_top DESC");
        } else if self.sort.is_time_based() {
            order.push("p.site_top DESC");
        }
        order.push(match self.sort {
            SortKey::CreatedAt => "p.created_at DESC",
            SortKey::Views => "p.view_count DESC",
            SortKey::Likes => "like_count DESC",
        });
        order.push("p.id DESC");
        order.join(", ")
    }
}

/// Append the `WHERE` clause of `query` to a statement over `posts p JOIN users u`
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &FeedQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some(tag) = &query.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id AND t.name = ",
        );
        builder.push_bind(tag.clone());
        builder.push(")");
    }

    if let Some(author_id) = query.author_id {
        builder.push(" AND p.user_id = ");
        builder.push_bind(author_id);
    }

    if let StatusFilter::Only(status) = query.status {
        builder.push(" AND p.status = ");
        builder.push_bind(status.as_str());
    }

    if let Some(keyword) = &query.keyword {
        let pattern = like_pattern(keyword);
        builder.push(" AND (p.title_folded LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR u.username_folded LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(
            " ESCAPE '\\' OR EXISTS (SELECT 1 FROM post_tags pt2 JOIN tags t2 ON t2.id = pt2.tag_id \
             WHERE pt2.post_id = p.id AND t2.name_folded LIKE ",
        );
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\'))");
    }
}

/// List posts matching `query`.
///
/// # Returns
///
/// The requested page and the number of matching rows before pagination.
pub async fn list_posts(pool: &SqlitePool, query: &FeedQuery) -> Result<PostPage, sqlx::Error> {
    let mut count: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) FROM posts p JOIN users u ON u.id = p.user_id");
    push_filters(&mut count, query);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select: QueryBuilder<Sqlite> = QueryBuilder::new(post_select());
    push_filters(&mut select, query);
    select.push(" ORDER BY ");
    select.push(query.order_clause());
    select.push(" LIMIT ");
    select.push_bind(query.page_size);
    select.push(" OFFSET ");
    select.push_bind(query.offset());

    let rows = select.build().fetch_all(pool).await?;
    let mut list = rows
        .iter()
        .map(post_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    attach_tags(pool, &mut list).await?;

    tracing::debug!(
        "Feed page {} ({} rows of {})",
        query.page,
        list.len(),
        total
    );

    Ok(PostPage {
        list,
        meta: PageMeta {
            current_page: query.page,
            page_size: query.page_size,
            total,
        },
    })
}

/// Published posts of one author, pinned posts first
///
/// # Errors
///
/// * `NotFound` - the user does not exist
pub async fn list_user_posts(
    pool: &SqlitePool,
    user_id: i64,
    page: i64,
    page_size: i64,
) -> BackendResult<PostPage> {
    ensure_user(pool, user_id).await?;
    let query = FeedQuery {
        page,
        page_size,
        author_id: Some(user_id),
        ..FeedQuery::default()
    };
    Ok(list_posts(pool, &query).await?)
}

/// Published posts ordered by likes, then comments
pub async fn get_hot_posts(pool: &SqlitePool, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        "{} WHERE p.status = ? ORDER BY like_count DESC, comment_count DESC, p.id DESC LIMIT ?",
        post_select()
    );
    let rows = sqlx::query(&sql)
        .bind(PostStatus::Published.as_str())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    let mut posts = rows
        .iter()
        .map(post_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    attach_tags(pool, &mut posts).await?;
    Ok(posts)
}

/// Fetch a post and count the view.
///
/// Every successful call adds exactly one view; the returned post includes
/// it. Hidden posts are only visible to their author or an admin.
///
/// # Errors
///
/// * `NotFound` - the post does not exist or is hidden from `viewer`
pub async fn get_post_detail(
    pool: &SqlitePool,
    id: i64,
    viewer: Option<Actor>,
) -> BackendResult<Post> {
    let mut post = fetch_post(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", id))?;

    if post.status == PostStatus::Hidden
        && !viewer.is_some_and(|actor| actor.can_manage(post.author.id))
    {
        return Err(BackendError::not_found("post", id));
    }

    sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    post.view_count += 1;

    Ok(post)
}

/// Decide the status filter of a listing from the `status` query value.
///
/// * absent or `published` - published only
/// * `all` - unrestricted for an admin or the filtered author, else published only
/// * `hidden` - hidden only for an admin or the filtered author, else `Forbidden`
pub fn resolve_status_filter(
    requested: Option<&str>,
    actor: Option<Actor>,
    author_filter: Option<i64>,
) -> BackendResult<StatusFilter> {
    let privileged = actor.is_some_and(|a| {
        a.is_admin() || author_filter.is_some_and(|author| author == a.user_id)
    });

    match requested.map(str::trim) {
        None | Some("") | Some("published") => Ok(StatusFilter::Only(PostStatus::Published)),
        Some("all") if privileged => Ok(StatusFilter::Any),
        Some("all") => Ok(StatusFilter::Only(PostStatus::Published)),
        Some("hidden") if privileged => Ok(StatusFilter::Only(PostStatus::Hidden)),
        Some("hidden") => Err(BackendError::forbidden(
            "only the author or an admin may list hidden posts",
        )),
        Some(other) => Err(BackendError::from(crate::shared::SharedError::validation(
            "status",
            format!("unknown status '{}'", other),
        ))),
    }
}
