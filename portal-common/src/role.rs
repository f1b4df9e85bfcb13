use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, IntoStaticStr};

/// Portal user role as assigned by the server at registration
#[derive(
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    AsRefStr,
    PartialEq,
    Eq,
    Debug,
    Copy,
    Clone,
)]
pub enum Role {
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    User,
    /// Any role string this client does not know about. It has no home page.
    #[serde(rename = "unknown", other)]
    #[strum(serialize = "unknown")]
    Unknown,
}
