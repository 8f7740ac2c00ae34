use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::projects::{
    self, Categories, CreateProject, Milestones, Skills, Status, Visibility,
};

/// Insert a new project (defaults to Open status).
pub async fn insert_project(
    db: &DatabaseConnection,
    client_id: Uuid,
    input: CreateProject,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category.unwrap_or(Categories::Other)),
        skills: Set(Skills(input.skills.unwrap_or_default())),
        budget_min: Set(input.budget_min),
        budget_max: Set(input.budget_max),
        currency: Set(input.currency.unwrap_or_else(|| "INR".to_string())),
        payment_type: Set(input.payment_type),
        duration: Set(input.duration),
        experience_level: Set(input.experience_level),
        status: Set(Status::Open),
        visibility: Set(input.visibility.unwrap_or(Visibility::Public)),
        freelancer_id: Set(None),
        escrow_id: Set(None),
        milestones: Set(Milestones(input.milestones.unwrap_or_default())),
        start_date: Set(None),
        completion_date: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// List publicly visible open projects, newest first.
pub async fn get_open_projects(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Status.eq(Status::Open))
        .filter(projects::Column::Visibility.eq(Visibility::Public))
        .order_by_desc(projects::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// All open projects regardless of visibility (recommendation batch input).
pub async fn get_all_open_projects(
    db: &DatabaseConnection,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Status.eq(Status::Open))
        .all(db)
        .await
}

/// Fetch all projects owned by a client, newest first.
pub async fn get_projects_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::ClientId.eq(client_id))
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Update a project's status.
pub async fn update_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Assign the winning freelancer and move the project to in-progress.
/// First step of the proposal-accept cascade.
pub async fn assign_freelancer(
    db: &DatabaseConnection,
    id: Uuid,
    freelancer_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let now = chrono::Utc::now();
    let mut active: projects::ActiveModel = project.into();
    active.freelancer_id = Set(Some(freelancer_id));
    active.status = Set(Status::InProgress);
    active.start_date = Set(Some(now));
    active.updated_at = Set(Some(now));

    active.update(db).await
}

/// Link the project's escrow after creation.
pub async fn attach_escrow(
    db: &DatabaseConnection,
    id: Uuid,
    escrow_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();
    active.escrow_id = Set(Some(escrow_id));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Promote an open project to in-progress when its escrow is funded
/// directly, without going through proposal acceptance.
pub async fn mark_in_progress(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    projects::Entity::update_many()
        .col_expr(projects::Column::Status, Expr::value(Status::InProgress))
        .col_expr(projects::Column::StartDate, Expr::value(Some(now)))
        .col_expr(projects::Column::UpdatedAt, Expr::value(Some(now)))
        .filter(projects::Column::Id.eq(id))
        .filter(projects::Column::Status.eq(Status::Open))
        .exec(db)
        .await?;
    Ok(())
}

/// Mark a project completed once its escrow is fully released.
pub async fn mark_completed(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    projects::Entity::update_many()
        .col_expr(projects::Column::Status, Expr::value(Status::Completed))
        .col_expr(projects::Column::CompletionDate, Expr::value(Some(now)))
        .col_expr(projects::Column::UpdatedAt, Expr::value(Some(now)))
        .filter(projects::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
