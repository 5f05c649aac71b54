use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建教职工表
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::StaffNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::FullName).string().not_null())
                    .col(ColumnDef::new(Staff::Email).string().null())
                    .col(ColumnDef::new(Staff::Phone).string().null())
                    .col(ColumnDef::new(Staff::Position).string().not_null())
                    .col(ColumnDef::new(Staff::Status).string().not_null())
                    .col(ColumnDef::new(Staff::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Staff::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Classes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classes::GradeLevel).integer().null())
                    .col(ColumnDef::new(Classes::ClassTeacherId).big_integer().null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::ClassTeacherId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::AdmissionNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().null())
                    .col(ColumnDef::new(Students::DateOfBirth).string().null())
                    .col(ColumnDef::new(Students::ClassId).big_integer().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建监护人表
        manager
            .create_table(
                Table::create()
                    .table(Guardians::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guardians::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guardians::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Guardians::Phone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Guardians::Email).string().null())
                    .col(ColumnDef::new(Guardians::Relationship).string().null())
                    .col(ColumnDef::new(Guardians::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Guardians::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生-监护人关联表
        manager
            .create_table(
                Table::create()
                    .table(StudentGuardians::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentGuardians::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentGuardians::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGuardians::GuardianId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGuardians::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentGuardians::LinkedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGuardians::Table, StudentGuardians::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGuardians::Table, StudentGuardians::GuardianId)
                            .to(Guardians::Table, Guardians::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_guardians_pair")
                    .table(StudentGuardians::Table)
                    .col(StudentGuardians::StudentId)
                    .col(StudentGuardians::GuardianId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建课表模板表
        manager
            .create_table(
                Table::create()
                    .table(TimetableTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimetableTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimetableTemplates::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TimetableTemplates::Term).string().null())
                    .col(
                        ColumnDef::new(TimetableTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TimetableTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableTemplates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课表条目表
        manager
            .create_table(
                Table::create()
                    .table(TimetableEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimetableEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimetableEntries::Slot).integer().not_null())
                    .col(ColumnDef::new(TimetableEntries::Room).string().null())
                    .col(
                        ColumnDef::new(TimetableEntries::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableEntries::Table, TimetableEntries::TemplateId)
                            .to(TimetableTemplates::Table, TimetableTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableEntries::Table, TimetableEntries::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableEntries::Table, TimetableEntries::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableEntries::Table, TimetableEntries::TeacherId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 冲突检测按 模板+星期+节次 查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_timetable_entries_slot")
                    .table(TimetableEntries::Table)
                    .col(TimetableEntries::TemplateId)
                    .col(TimetableEntries::DayOfWeek)
                    .col(TimetableEntries::Slot)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimetableEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimetableTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentGuardians::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guardians::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Staff {
    #[sea_orm(iden = "staff")]
    Table,
    Id,
    StaffNo,
    FullName,
    Email,
    Phone,
    Position,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    Name,
    GradeLevel,
    ClassTeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Code,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    AdmissionNo,
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    ClassId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Guardians {
    #[sea_orm(iden = "guardians")]
    Table,
    Id,
    FullName,
    Phone,
    Email,
    Relationship,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentGuardians {
    #[sea_orm(iden = "student_guardians")]
    Table,
    Id,
    StudentId,
    GuardianId,
    IsPrimary,
    LinkedAt,
}

#[derive(DeriveIden)]
enum TimetableTemplates {
    #[sea_orm(iden = "timetable_templates")]
    Table,
    Id,
    Name,
    Term,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimetableEntries {
    #[sea_orm(iden = "timetable_entries")]
    Table,
    Id,
    TemplateId,
    ClassId,
    SubjectId,
    TeacherId,
    DayOfWeek,
    Slot,
    Room,
    CreatedAt,
    UpdatedAt,
}
