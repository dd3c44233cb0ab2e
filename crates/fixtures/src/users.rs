//! Seed user directory.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use artglass_core::UserId;
use artglass_session::{Role, User, UserDirectory};

/// Fixture-backed [`UserDirectory`], optionally with simulated latency.
///
/// Orders and wishlists come from the trait's empty defaults; only account
/// lookup is backed by data.
#[derive(Debug, Default)]
pub struct FixtureDirectory {
    latency: Duration,
}

impl FixtureDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate remote-call latency on every lookup.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl UserDirectory for FixtureDirectory {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(seed_users().into_iter().find(|u| u.email == email))
    }
}

fn user(
    id: &str,
    username: &str,
    email: &str,
    avatar: &str,
    role: Role,
    created: (i32, u32, u32),
) -> User {
    let (y, m, d) = created;
    User {
        id: UserId::new(id),
        username: username.into(),
        email: email.into(),
        avatar: Some(avatar.into()),
        role,
        created_at: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
    }
}

/// The full seed directory: six artists, one admin, one collector.
pub fn seed_users() -> Vec<User> {
    vec![
        user(
            "user-001",
            "neoncreator",
            "neoncreator@example.com",
            "/assets/images/avatars/avatar1.jpg",
            Role::Artist,
            (2022, 8, 15),
        ),
        user(
            "user-002",
            "abstractflow",
            "abstractflow@example.com",
            "/assets/images/avatars/avatar2.jpg",
            Role::Artist,
            (2022, 9, 22),
        ),
        user(
            "user-003",
            "crystal3d",
            "crystal3d@example.com",
            "/assets/images/avatars/avatar3.jpg",
            Role::Artist,
            (2022, 11, 5),
        ),
        user(
            "user-004",
            "pixelmaster",
            "pixelmaster@example.com",
            "/assets/images/avatars/avatar4.jpg",
            Role::Artist,
            (2023, 1, 18),
        ),
        user(
            "user-005",
            "generativecode",
            "generativecode@example.com",
            "/assets/images/avatars/avatar5.jpg",
            Role::Artist,
            (2023, 3, 29),
        ),
        user(
            "user-006",
            "urbanphotographer",
            "urbanphotographer@example.com",
            "/assets/images/avatars/avatar6.jpg",
            Role::Artist,
            (2023, 2, 14),
        ),
        user(
            "user-admin",
            "adminuser",
            "admin@artglass.com",
            "/assets/images/avatars/admin-avatar.jpg",
            Role::Admin,
            (2022, 1, 1),
        ),
        user(
            "user-regular",
            "artcollector",
            "collector@example.com",
            "/assets/images/avatars/user-avatar.jpg",
            Role::User,
            (2023, 4, 12),
        ),
    ]
}
