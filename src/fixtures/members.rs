//! Member Fixtures

use serde::Deserialize;

use crate::catalog::{Member, MemberId};

/// Members fixture file
#[derive(Debug, Deserialize)]
pub struct MembersFixture {
    /// Member entries
    pub members: Vec<MemberFixture>,
}

/// One member entry in a fixture file.
#[derive(Debug, Deserialize)]
pub struct MemberFixture {
    /// Backend id
    pub id: u64,

    /// Display name
    pub name: String,
}

impl From<MemberFixture> for Member {
    fn from(fixture: MemberFixture) -> Self {
        Member {
            id: MemberId(fixture.id),
            name: fixture.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn member_fixture_converts() -> TestResult {
        let yaml = "members:\n  - id: 1\n    name: Ibu Sari\n  - id: 2\n    name: Pak Budi\n";
        let fixture: MembersFixture = serde_norway::from_str(yaml)?;

        let members: Vec<Member> = fixture.members.into_iter().map(Member::from).collect();

        assert_eq!(members.len(), 2);
        assert!(
            members
                .first()
                .is_some_and(|m| m.id == MemberId(1) && m.name == "Ibu Sari")
        );

        Ok(())
    }
}
