pub mod access;
pub mod cart;
pub mod chapter;
pub mod checkout;
pub mod comic;
pub mod comment;
pub mod history;
pub mod notification;
pub mod payment;
pub mod premium_plan;
pub mod product;
pub mod receipt;
pub mod subscription;
pub mod thread;
pub mod user;
pub mod waitlist;

use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::user::User;
use inkwell_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run the `validator` rules declared on a request DTO.
pub(crate) fn validated<T: Validate>(input: T) -> AppResult<T> {
    input.validate()?;
    Ok(input)
}

/// Load a user or fail with 404.
pub(crate) async fn require_user(pool: &inkwell_db::DbPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
