//! 预导入模块，方便使用

pub use super::anonymous_user_ids::{
    ActiveModel as AnonymousUserIdActiveModel, Entity as AnonymousUserIds,
    Model as AnonymousUserIdModel,
};
pub use super::course_access_roles::{
    ActiveModel as CourseAccessRoleActiveModel, Entity as CourseAccessRoles,
    Model as CourseAccessRoleModel,
};
pub use super::course_overviews::{
    ActiveModel as CourseOverviewActiveModel, Entity as CourseOverviews,
    Model as CourseOverviewModel,
};
pub use super::turnitin_submissions::{
    ActiveModel as TurnitinSubmissionActiveModel, Entity as TurnitinSubmissions,
    Model as TurnitinSubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
