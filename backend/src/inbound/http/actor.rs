//! Session-to-actor resolution.
//!
//! The cookie stores only a user id. Gated handlers resolve the full user
//! record through the identity port and thread it into domain calls, so role
//! checks always see current flags rather than whatever was true at login.

use std::sync::Arc;

use crate::domain::ports::UsersQuery;
use crate::domain::{Error, User};
use crate::inbound::http::session::SessionContext;

/// Resolve the authenticated user behind a session, or fail with 401.
///
/// A session naming a user that no longer exists is treated as
/// unauthenticated, not as an internal error: the cookie outlived the row.
pub async fn require_actor(
    session: &SessionContext,
    users: &Arc<dyn UsersQuery>,
) -> Result<User, Error> {
    let user_id = session.require_user_id()?;
    users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))
}
