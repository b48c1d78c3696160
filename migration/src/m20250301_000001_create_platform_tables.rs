use sea_orm_migration::prelude::*;

/// 宿主平台的只读镜像表
///
/// 生产环境中这些表的内容由宿主平台维护，这里仅负责在独立部署和测试时建表。
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(
                        ColumnDef::new(Users::IsStaff)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建匿名用户 ID 映射表
        manager
            .create_table(
                Table::create()
                    .table(AnonymousUserIds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnonymousUserIds::AnonymousUserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnonymousUserIds::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AnonymousUserIds::CourseId).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnonymousUserIds::Table, AnonymousUserIds::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程概览表
        manager
            .create_table(
                Table::create()
                    .table(CourseOverviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseOverviews::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::OtherCourseSettings)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseOverviews::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程角色表
        manager
            .create_table(
                Table::create()
                    .table(CourseAccessRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseAccessRoles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseAccessRoles::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseAccessRoles::CourseId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseAccessRoles::Role).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseAccessRoles::Table, CourseAccessRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseAccessRoles::Table, CourseAccessRoles::CourseId)
                            .to(CourseOverviews::Table, CourseOverviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_access_roles_user_course")
                    .table(CourseAccessRoles::Table)
                    .col(CourseAccessRoles::UserId)
                    .col(CourseAccessRoles::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseAccessRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseOverviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnonymousUserIds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Username,
    Email,
    FullName,
    IsStaff,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AnonymousUserIds {
    Table,
    AnonymousUserId,
    UserId,
    CourseId,
}

#[derive(DeriveIden)]
enum CourseOverviews {
    Table,
    Id,
    DisplayName,
    OtherCourseSettings,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseAccessRoles {
    Table,
    Id,
    UserId,
    CourseId,
    Role,
}
