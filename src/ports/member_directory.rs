use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// A library member as exposed by the member service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Member lookup port.
///
/// The loan context only needs to resolve member ids to member details
/// (existence checks on create, the joined detail view on read). Member
/// lifecycle is owned by a separate service.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn get_member(&self, member_id: i64) -> Result<Option<Member>>;
}
