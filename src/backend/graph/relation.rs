//! Relation kinds and their storage layout
//!
//! Every relation is an edge table with a composite primary key
//! `(source, target)` and a `created_at` column.

/// Entity kinds that can sit at either end of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Post,
    Tag,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::Post => "posts",
            Entity::Tag => "tags",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Post => "post",
            Entity::Tag => "tag",
        }
    }
}

/// A many-to-many relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// follower -> followed
    Follow,
    /// user -> post
    Like,
    /// user -> post
    Favorite,
    /// post -> tag
    PostTag,
}

/// Which side of the edge the key sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Key is the source; yields targets
    Outgoing,
    /// Key is the target; yields sources
    Incoming,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Follow => "follow",
            Relation::Like => "like",
            Relation::Favorite => "favorite",
            Relation::PostTag => "post_tag",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Relation::Follow => "user_follows",
            Relation::Like => "user_likes",
            Relation::Favorite => "user_favorites",
            Relation::PostTag => "post_tags",
        }
    }

    pub fn source_column(&self) -> &'static str {
        match self {
            Relation::Follow => "follower_id",
            Relation::Like | Relation::Favorite => "user_id",
            Relation::PostTag => "post_id",
        }
    }

    pub fn target_column(&self) -> &'static str {
        match self {
            Relation::Follow => "followed_id",
            Relation::Like | Relation::Favorite => "post_id",
            Relation::PostTag => "tag_id",
        }
    }

    pub fn source(&self) -> Entity {
        match self {
            Relation::Follow | Relation::Like | Relation::Favorite => Entity::User,
            Relation::PostTag => Entity::Post,
        }
    }

    pub fn target(&self) -> Entity {
        match self {
            Relation::Follow => Entity::User,
            Relation::Like | Relation::Favorite => Entity::Post,
            Relation::PostTag => Entity::Tag,
        }
    }

    /// Both ends are the same entity kind, so an edge could loop
    pub fn is_self_referential(&self) -> bool {
        self.source() == self.target()
    }

    /// `(key column, related column)` for a lookup in `direction`
    pub fn columns(&self, direction: Direction) -> (&'static str, &'static str) {
        match direction {
            Direction::Outgoing => (self.source_column(), self.target_column()),
            Direction::Incoming => (self.target_column(), self.source_column()),
        }
    }
}
