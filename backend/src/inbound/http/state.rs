//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without a database.

use std::sync::Arc;

use crate::domain::ports::{
    IdentityResolver, LoginService, ProfileCommand, ProfileQuery, TicketCommand, TicketQuery,
};
use crate::domain::{Error, User};

use super::session::SessionContext;

/// Port bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub identity: Arc<dyn IdentityResolver>,
    pub tickets: Arc<dyn TicketCommand>,
    pub tickets_query: Arc<dyn TicketQuery>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
}

impl HttpState {
    /// Resolve the acting user from the session.
    ///
    /// The session only holds an id; the record is reloaded on every call so
    /// deleted accounts lose access immediately.
    pub async fn require_actor(&self, session: &SessionContext) -> Result<User, Error> {
        let user_id = session.require_user_id()?;
        self.identity.resolve(&user_id).await
    }
}
