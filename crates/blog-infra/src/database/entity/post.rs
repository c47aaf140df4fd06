//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_time: DateTimeWithTimeZone,
    pub modified_time: DateTimeWithTimeZone,
    pub excerpt: String,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub views: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Domain post carrying the given tag ids, which live in `post_tags`.
    pub fn into_post(self, tag_ids: Vec<Uuid>) -> blog_core::domain::Post {
        blog_core::domain::Post {
            id: self.id,
            title: self.title,
            body: self.body,
            created_time: self.created_time.into(),
            modified_time: self.modified_time.into(),
            excerpt: self.excerpt,
            category_id: self.category_id,
            tag_ids,
            author_id: self.author_id,
            views: u32::try_from(self.views).unwrap_or(0),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel. `views` is left
/// unset so a save never clobbers the counter.
impl From<&blog_core::domain::Post> for ActiveModel {
    fn from(post: &blog_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            body: Set(post.body.clone()),
            created_time: Set(post.created_time.into()),
            modified_time: Set(post.modified_time.into()),
            excerpt: Set(post.excerpt.clone()),
            category_id: Set(post.category_id),
            author_id: Set(post.author_id),
            ..Default::default()
        }
    }
}
