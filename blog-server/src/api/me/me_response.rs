use crate::{ProfileDto, UserDto};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserDto,
    /// Best-effort projection; may lag behind the user record
    pub profile: Option<ProfileDto>,
}
