//! Rank and leaderboard scenarios

use chrono::Utc;

use integration_tests::TestHarness;
use levelup_core::{Snowflake, UserProgress};
use levelup_service::{AdminService, RankService};

const GUILD: Snowflake = Snowflake::new(100);

fn seeded(harness: &TestHarness, user: i64, level: i64, xp: i64) {
    let now = Utc::now();
    harness.progress_repo.seed(UserProgress {
        guild_id: GUILD,
        user_id: Snowflake::new(user),
        xp,
        level,
        message_count: 1,
        last_event_at: Some(now),
        active: true,
        created_at: now,
        updated_at: now,
    });
}

#[tokio::test]
async fn test_rank_orders_by_level_then_xp() {
    let harness = TestHarness::new();
    // A: level 3 / 50 xp, B: level 3 / 80 xp, C: level 5 / 10 xp
    seeded(&harness, 1, 3, 650); // 600 cumulative for level 3, 50 into it
    seeded(&harness, 2, 3, 680);
    seeded(&harness, 3, 5, 1510);

    let rank = RankService::new(&harness.ctx);

    let c = rank.rank_of(GUILD, Snowflake::new(3)).await.unwrap();
    let b = rank.rank_of(GUILD, Snowflake::new(2)).await.unwrap();
    let a = rank.rank_of(GUILD, Snowflake::new(1)).await.unwrap();

    assert_eq!(c.rank, 1);
    assert_eq!(b.rank, 2);
    assert_eq!(a.rank, 3);
    assert_eq!(b.total_ranked, 3);
}

#[tokio::test]
async fn test_unknown_user_is_unranked() {
    let harness = TestHarness::new();
    seeded(&harness, 1, 2, 350);

    let rank = RankService::new(&harness.ctx);
    let response = rank.rank_of(GUILD, Snowflake::new(99)).await.unwrap();

    assert_eq!(response.rank, 0);
    assert_eq!(response.total_ranked, 1);
    assert_eq!(response.level, 0);
}

#[tokio::test]
async fn test_rank_reports_remaining_xp_to_next_level() {
    let harness = TestHarness::new();
    // 150 lifetime XP: level 1 (threshold 100), 50 into it, 150 remaining of 200
    seeded(&harness, 1, 1, 150);

    let rank = RankService::new(&harness.ctx);
    let response = rank.rank_of(GUILD, Snowflake::new(1)).await.unwrap();

    assert_eq!(response.level, 1);
    assert_eq!(response.xp_into_level, 50);
    assert_eq!(response.xp_to_next_level, 150);
}

#[tokio::test]
async fn test_deactivated_member_leaves_the_ranking() {
    let harness = TestHarness::new();
    seeded(&harness, 1, 2, 350);
    seeded(&harness, 2, 3, 650);

    let admin = AdminService::new(&harness.ctx);
    admin
        .set_member_active(GUILD, Snowflake::new(2), false)
        .await
        .unwrap();

    let rank = RankService::new(&harness.ctx);
    let gone = rank.rank_of(GUILD, Snowflake::new(2)).await.unwrap();
    assert_eq!(gone.rank, 0);

    let remaining = rank.rank_of(GUILD, Snowflake::new(1)).await.unwrap();
    assert_eq!(remaining.rank, 1);
    assert_eq!(remaining.total_ranked, 1);
}

#[tokio::test]
async fn test_leaderboard_positions_and_truncation() {
    let harness = TestHarness::new();
    for user in 1..=10 {
        // Higher user id, more XP; everyone still on level 0
        seeded(&harness, user, 0, user * 9);
    }

    let rank = RankService::new(&harness.ctx);
    let board = rank.leaderboard(GUILD, 3).await.unwrap();

    assert_eq!(board.len(), 3);
    assert_eq!(board[0].position, 1);
    assert_eq!(board[0].user_id, "10");
    assert_eq!(board[1].user_id, "9");
    assert_eq!(board[2].user_id, "8");
}

#[tokio::test]
async fn test_leaderboard_of_empty_guild() {
    let harness = TestHarness::new();
    let rank = RankService::new(&harness.ctx);

    let board = rank.leaderboard(GUILD, 10).await.unwrap();
    assert!(board.is_empty());
}
