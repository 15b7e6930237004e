//! Tests for release note generation against a mocked forge.
use std::{rc::Rc, time::Duration};
use tokio::time::Instant;

use super::*;
use crate::{
    RelnoteError,
    forge::traits::MockForge,
    test_helpers::{
        at, closed_pr, create_test_forge_manager, create_test_remote_config,
        merged_pr, mock_forge_with_pages, test_config_builder,
    },
};

fn builder_for(
    config: RelnoteConfig,
    mock_forge: MockForge,
) -> ReleaseNoteBuilder {
    ReleaseNoteBuilder::new(
        Rc::new(config),
        create_test_forge_manager(mock_forge, false),
    )
    .unwrap()
}

fn numbers(notes: &ReleaseNotes) -> Vec<u64> {
    notes.entries.iter().map(|e| e.number).collect()
}

#[tokio::test]
async fn only_prs_merged_between_boundaries_are_included() {
    let mock_forge = mock_forge_with_pages(vec![
        vec![
            merged_pr(30, 300),
            merged_pr(20, 200),
            merged_pr(15, 150),
            merged_pr(10, 100),
        ],
        vec![merged_pr(5, 50)],
    ]);
    let config = test_config_builder().current(20u64).build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(numbers(&notes), vec![15]);
    assert_eq!(notes.window.start, at(100));
    assert_eq!(notes.window.end, at(200));
    assert_eq!(notes.body(), "   * Change 15 (#15, @dev15)\n");
}

#[tokio::test]
async fn pr_merged_before_last_is_excluded_when_listed_early() {
    // merged before #10 but edited afterwards, so it is listed ahead of it
    let mut stale = merged_pr(7, 50);
    stale.updated_at = Some(at(250));

    let mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(30, 300),
        stale,
        merged_pr(20, 200),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    let config = test_config_builder().current(20u64).build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(numbers(&notes), vec![15]);
}

#[tokio::test]
async fn stops_fetching_once_prs_predate_last_merge() {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge
        .expect_list_closed_prs()
        .withf(|req| req.page == 1 && req.per_page == 100)
        .times(1)
        .returning(|_| Ok(vec![merged_pr(20, 200), merged_pr(10, 100)]));
    mock_forge
        .expect_list_closed_prs()
        .withf(|req| req.page == 2)
        .times(1)
        .returning(|_| Ok(vec![merged_pr(12, 150), merged_pr(4, 40)]));

    let config = test_config_builder().current(20u64).build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    // PR 12 was updated after the last merge, so it is still considered
    assert_eq!(numbers(&notes), vec![12]);
}

#[tokio::test]
async fn requests_closed_prs_against_configured_base() {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge
        .expect_list_closed_prs()
        .withf(|req| req.base_branch == "release-1.x")
        .returning(|req| {
            if req.page == 1 {
                Ok(vec![merged_pr(20, 200), merged_pr(10, 100)])
            } else {
                Ok(vec![])
            }
        });

    let config = test_config_builder()
        .current(20u64)
        .base("release-1.x".to_string())
        .build()
        .unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert!(notes.entries.is_empty());
    assert_eq!(notes.base_branch, "release-1.x");
}

#[tokio::test]
async fn entries_are_ordered_by_merge_time() {
    let mut late = merged_pr(11, 120);
    late.updated_at = Some(at(190));
    let mut early = merged_pr(13, 110);
    early.updated_at = Some(at(180));

    let mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        late,
        early,
        merged_pr(14, 160),
        closed_pr(16, 170),
        merged_pr(10, 100),
    ]]);
    let config = test_config_builder().current(20u64).build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(numbers(&notes), vec![13, 11, 14]);
}

#[tokio::test]
async fn current_defaults_to_first_listed_pr() {
    let mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(25, 250),
        merged_pr(18, 180),
        merged_pr(10, 100),
    ]]);
    let config = test_config_builder().build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(notes.window.current, 25);
    assert_eq!(numbers(&notes), vec![18]);
    assert_eq!(
        notes.header(),
        "Release notes for PRs between #10 and #25 against branch \"master\":"
    );
}

#[tokio::test(start_paused = true)]
async fn label_filter_keeps_only_release_note_prs() {
    let mut mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        merged_pr(17, 170),
        merged_pr(16, 160),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    mock_forge
        .expect_list_pr_labels()
        .times(3)
        .returning(|number| match number {
            15 => Ok(vec!["bug".into(), "release-note".into()]),
            16 => Ok(vec!["release-note-none".into()]),
            17 => Ok(vec!["release-note".into()]),
            _ => Ok(vec![]),
        });

    let config = test_config_builder()
        .current(20u64)
        .relnote_filter(true)
        .build()
        .unwrap();

    let start = Instant::now();
    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(numbers(&notes), vec![15, 17]);
    // three lookups spaced by the default 5 second interval
    assert!(start.elapsed() >= Duration::from_secs(10));
}

#[tokio::test]
async fn label_lookups_skipped_without_filter() {
    let mut mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    mock_forge.expect_list_pr_labels().never();

    let config = test_config_builder().current(20u64).build().unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(numbers(&notes), vec![15]);
}

#[tokio::test(start_paused = true)]
async fn custom_throttle_controls_label_spacing() {
    let mut mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        merged_pr(16, 160),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    mock_forge
        .expect_list_pr_labels()
        .returning(|_| Ok(vec!["release-note".into()]));

    let config = test_config_builder()
        .current(20u64)
        .relnote_filter(true)
        .build()
        .unwrap();

    let start = Instant::now();
    let notes = builder_for(config, mock_forge)
        .with_throttle(Throttle::unlimited())
        .build()
        .await
        .unwrap();

    assert_eq!(numbers(&notes), vec![15, 16]);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn label_lookup_error_aborts() {
    let mut mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    mock_forge
        .expect_list_pr_labels()
        .returning(|_| Err(RelnoteError::RateLimitExceeded));

    let config = test_config_builder()
        .current(20u64)
        .relnote_filter(true)
        .label_interval_secs(0u64)
        .build()
        .unwrap();

    let err = builder_for(config, mock_forge).build().await.unwrap_err();

    assert!(matches!(err, RelnoteError::RateLimitExceeded));
}

#[tokio::test]
async fn listing_error_aborts() {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge
        .expect_list_closed_prs()
        .times(1)
        .returning(|_| Err(RelnoteError::forge("boom")));

    let config = test_config_builder().build().unwrap();

    let err = builder_for(config, mock_forge).build().await.unwrap_err();

    assert!(matches!(err, RelnoteError::ForgeError(_)));
}

#[tokio::test]
async fn missing_last_pr_is_reported() {
    let mock_forge =
        mock_forge_with_pages(vec![vec![merged_pr(20, 200), merged_pr(15, 150)]]);
    let config = test_config_builder().current(20u64).build().unwrap();

    let err = builder_for(config, mock_forge).build().await.unwrap_err();

    assert!(matches!(
        err,
        RelnoteError::BoundaryNotFound { which: "last", number: 10 }
    ));
}

#[tokio::test]
async fn custom_note_template_is_rendered() {
    let mock_forge = mock_forge_with_pages(vec![vec![
        merged_pr(20, 200),
        merged_pr(15, 150),
        merged_pr(10, 100),
    ]]);
    let config = test_config_builder()
        .current(20u64)
        .note_template("- {{ title }} ({{ author }})".to_string())
        .build()
        .unwrap();

    let notes = builder_for(config, mock_forge).build().await.unwrap();

    assert_eq!(notes.body(), "- Change 15 (dev15)\n");
}

#[test]
fn release_request_requires_tag_and_name() {
    let notes = ReleaseNotes {
        window: ReleaseWindow {
            last: 10,
            current: 20,
            start: at(100),
            end: at(200),
        },
        base_branch: "master".into(),
        entries: vec![
            NoteEntry {
                number: 15,
                line: "   * Change 15 (#15, @dev15)\n".into(),
            },
            NoteEntry {
                number: 16,
                line: "   * Change 16 (#16, @dev16)\n".into(),
            },
        ],
    };

    let config = test_config_builder()
        .tag_name("v1.0.0".to_string())
        .build()
        .unwrap();
    assert!(notes.release_request(&config).is_none());

    let config = test_config_builder()
        .tag_name("v1.0.0".to_string())
        .release_name("1.0.0".to_string())
        .release_owner("releases".to_string())
        .prerelease(true)
        .build()
        .unwrap();

    let req = notes.release_request(&config).unwrap();
    assert_eq!(
        req,
        CreateReleaseRequest {
            owner: "releases".into(),
            repo: "repo".into(),
            tag_name: "v1.0.0".into(),
            name: "1.0.0".into(),
            prerelease: true,
            body: "   * Change 15 (#15, @dev15)\n   * Change 16 (#16, @dev16)\n"
                .into(),
        }
    );
}
