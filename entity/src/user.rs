use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub role: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub contact_info: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::teacher_profile::Entity")]
    TeacherProfile,
    #[sea_orm(has_one = "super::student_profile::Entity")]
    StudentProfile,
    #[sea_orm(has_many = "super::availability::Entity")]
    Availability,
}

impl Related<super::teacher_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherProfile.def()
    }
}

impl Related<super::student_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfile.def()
    }
}

impl Related<super::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
