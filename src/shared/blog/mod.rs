//! Blog domain types
//!
//! Serializable types exchanged over the REST API: users, posts, tags,
//! comments, notifications and search results.

pub mod comment;
pub mod notification;
pub mod post;
pub mod search;
pub mod tag;
pub mod user;

pub use comment::{Comment, CommentNode, CreateCommentRequest, UserComment};
pub use notification::{excerpt, MarkAllReadResponse, Notification, NotificationKind, UnreadCount};
pub use post::{
    CreatePostRequest, Engagement, Page, PageMeta, Post, PostPage, PostStatus, SortKey,
    ToggleResponse, UpdatePostRequest,
};
pub use search::SearchResults;
pub use tag::{Tag, TagWithCount};
pub use user::{Actor, Role, UpdateProfileRequest, User, UserProfile, UserSummary};
