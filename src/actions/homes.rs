//! Actions of the manage-homes page.

use model::entities::{home, home_user_connection};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{ActionContext, ActionError, ActionOutcome, HomeFields, ValidationError, scope};

pub async fn switch_home(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    home_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let home = scope::connected_home(db, ctx.username, home_id).await?;
    Ok(ActionOutcome {
        current_home: Some(home.id),
        ..ActionOutcome::done(format!("Switched to {}.", home.name))
    })
}

pub async fn update_home(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    home_id: i32,
    fields: HomeFields,
) -> Result<ActionOutcome, ActionError> {
    let home = scope::connected_home(db, ctx.username, home_id).await?;

    let mut active: home::ActiveModel = home.into();
    active.name = Set(fields.name);
    active.address = Set(fields.address);
    active.city = Set(fields.city);
    active.state = Set(fields.state);
    active.zip_code = Set(fields.zip_code);
    active.update(db).await?;

    Ok(ActionOutcome::done("Home details updated."))
}

/// Creates a home connected to the user and makes it the current one.
pub async fn add_home(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    fields: HomeFields,
) -> Result<ActionOutcome, ActionError> {
    let txn = db.begin().await?;
    let home = home::ActiveModel {
        name: Set(fields.name),
        address: Set(fields.address),
        city: Set(fields.city),
        state: Set(fields.state),
        zip_code: Set(fields.zip_code),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    home_user_connection::ActiveModel {
        username: Set(ctx.username.to_string()),
        home_id: Set(home.id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!("Home {} created for {}", home.id, ctx.username);
    Ok(ActionOutcome {
        current_home: Some(home.id),
        ..ActionOutcome::done(format!("{} was added.", home.name))
    })
}

/// Deletes a home with everything in it. The last home of a user stays.
pub async fn delete_home(
    db: &DatabaseConnection,
    ctx: &ActionContext<'_>,
    home_id: i32,
) -> Result<ActionOutcome, ActionError> {
    let home = scope::connected_home(db, ctx.username, home_id).await?;

    let connected = home_user_connection::Entity::find()
        .filter(home_user_connection::Column::Username.eq(ctx.username))
        .count(db)
        .await?;
    if connected <= 1 {
        return Err(ValidationError::new("You need to keep at least one home.").into());
    }

    let name = home.name.clone();
    home.delete(db).await?;

    // Move the session off the deleted home.
    let current_home = if home_id == ctx.home.id {
        home_user_connection::Entity::find()
            .filter(home_user_connection::Column::Username.eq(ctx.username))
            .order_by_asc(home_user_connection::Column::HomeId)
            .one(db)
            .await?
            .map(|link| link.home_id)
    } else {
        None
    };

    Ok(ActionOutcome {
        current_home,
        ..ActionOutcome::done(format!("{} was deleted.", name))
    })
}
