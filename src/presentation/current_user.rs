// Current user extractor - Identity supplied by the fronting authentication layer
use crate::domain::user::{Capability, UserContext, UserId};
use crate::presentation::errors::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_CAPABILITIES_HEADER: &str = "x-user-capabilities";

pub struct CurrentUser(pub UserContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };

        let id: UserId = header(USER_ID_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing user identity"))?
            .parse()
            .map_err(|_| ApiError::unauthorized("Malformed user identity"))?;
        let username = header(USER_NAME_HEADER)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("user{}", id));

        let mut user = UserContext::new(id, username);
        for capability in header(USER_CAPABILITIES_HEADER)
            .unwrap_or_default()
            .split(',')
            .filter_map(Capability::parse)
        {
            user = user.with_capability(capability);
        }

        Ok(CurrentUser(user))
    }
}
