use crate::ports::member_directory::{Member, MemberDirectory as MemberDirectoryTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of the member directory.
///
/// Supports stateful testing by storing members keyed by id. Stands in for
/// the member service, which is a separate deployment.
pub struct MemberDirectory {
    members: Mutex<HashMap<i64, Member>>,
}

impl MemberDirectory {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
        }
    }

    /// Register a member.
    pub fn add_member(&self, member: Member) {
        self.members.lock().unwrap().insert(member.id, member);
    }
}

impl Default for MemberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberDirectoryTrait for MemberDirectory {
    /// Look up a registered member by id.
    async fn get_member(&self, member_id: i64) -> Result<Option<Member>> {
        Ok(self.members.lock().unwrap().get(&member_id).cloned())
    }
}
