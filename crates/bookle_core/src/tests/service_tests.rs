use super::helpers::{
    create_test_catalog, create_test_service, test_date, FakeCatalog, FakeStorage, FixedDailyBook,
    PLAYER,
};
use crate::domain::{GameStatus, MAX_ATTEMPTS};
use crate::error::GameError;
use crate::ports::StorageService;
use crate::service::GameService;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn session_is_created_lazily_once_per_date() {
    let (service, storage) = create_test_service(3);
    assert!(storage.get_session_by_date(test_date()).await.unwrap().is_none());

    let first = service.session_for_date(test_date()).await.unwrap();
    let second = service.session_for_date(test_date()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.daily_book_id, 3);
    assert!(storage.get_session_by_date(test_date()).await.unwrap().is_some());
}

#[tokio::test]
async fn win_on_third_guess_updates_stats() {
    let (service, storage) = create_test_service(3);

    let first = service.submit_guess(test_date(), "Book 1").await.unwrap();
    assert!(first.revealed_book.is_none());
    service.submit_guess(test_date(), "Book 2").await.unwrap();
    let outcome = service.submit_guess(test_date(), "Book 3").await.unwrap();

    assert!(outcome.guess.is_correct);
    assert_eq!(outcome.session.game_status, GameStatus::Won);
    assert_eq!(outcome.session.remaining_attempts, 5);
    assert!(outcome.session.stats_recorded);
    assert_eq!(outcome.revealed_book.map(|b| b.id), Some(3));

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.guess_distribution[2], 1);
    assert_eq!(stats.last_played_date, Some(test_date()));
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn eight_misses_lose_and_reset_streak() {
    let (service, storage) = create_test_service(10);
    let mut previous = crate::domain::Stats::new(PLAYER);
    previous.games_played = 3;
    previous.games_won = 3;
    previous.current_streak = 3;
    previous.max_streak = 3;
    storage.save_stats(&previous).await.unwrap();

    let mut last = None;
    for id in 1..=8 {
        last = Some(
            service
                .submit_guess(test_date(), &format!("Book {}", id))
                .await
                .unwrap(),
        );
    }
    let outcome = last.unwrap();

    assert_eq!(outcome.session.game_status, GameStatus::Lost);
    assert_eq!(outcome.session.remaining_attempts, 0);
    assert_eq!(outcome.revealed_book.map(|b| b.id), Some(10));

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.games_played, 4);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.max_streak, 3);
}

#[tokio::test]
async fn stats_are_recorded_exactly_once() {
    let (service, storage) = create_test_service(1);
    let outcome = service.submit_guess(test_date(), "Book 1").await.unwrap();

    let mut session = outcome.session;
    service.record_result(&mut session).await.unwrap();
    service.session_for_date(test_date()).await.unwrap();
    let err = service
        .submit_guess(test_date(), "Book 1")
        .await
        .unwrap_err();

    assert!(matches!(err, GameError::GameAlreadyOver { .. }));
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 1);
    assert_eq!(service.stats().await.unwrap().games_played, 1);
}

#[tokio::test]
async fn failed_stats_save_still_returns_the_win_and_is_retried() {
    let (service, storage) = create_test_service(1);
    storage.fail_stats_save.store(true, Ordering::SeqCst);

    let outcome = service.submit_guess(test_date(), "Book 1").await.unwrap();
    assert_eq!(outcome.session.game_status, GameStatus::Won);
    assert!(!outcome.session.stats_recorded);
    assert_eq!(outcome.revealed_book.map(|b| b.id), Some(1));
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 0);

    storage.fail_stats_save.store(false, Ordering::SeqCst);
    let session = service.session_for_date(test_date()).await.unwrap();

    assert!(session.stats_recorded);
    let stats = service.stats().await.unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_session_flag_save_does_not_double_count_on_retry() {
    let (service, storage) = create_test_service(1);
    storage.fail_flagged_session_save.store(true, Ordering::SeqCst);

    let outcome = service.submit_guess(test_date(), "Book 1").await.unwrap();
    assert_eq!(outcome.session.game_status, GameStatus::Won);
    assert!(!outcome.session.stats_recorded);
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 1);

    storage.fail_flagged_session_save.store(false, Ordering::SeqCst);
    let session = service.session_for_date(test_date()).await.unwrap();

    assert!(session.stats_recorded);
    assert_eq!(service.stats().await.unwrap().games_played, 1);
    assert_eq!(storage.stats_saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn date_locks_are_released_after_use() {
    let (service, _storage) = create_test_service(10);

    service.session_for_date(test_date()).await.unwrap();
    service.submit_guess(test_date(), "Book 1").await.unwrap();
    service
        .submit_guess(test_date(), "Not A Real Book")
        .await
        .unwrap_err();
    for day in 1..=20 {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        service.session_for_date(date).await.unwrap();
    }

    assert_eq!(service.tracked_locks().await, 0);
}

#[tokio::test]
async fn unknown_title_does_not_consume_an_attempt() {
    let (service, storage) = create_test_service(3);
    service.submit_guess(test_date(), "Book 1").await.unwrap();

    let err = service
        .submit_guess(test_date(), "Not A Real Book")
        .await
        .unwrap_err();

    assert!(matches!(err, GameError::BookNotFound(_)));
    let stored = storage
        .get_session_by_date(test_date())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.guesses.len(), 1);
    assert_eq!(stored.remaining_attempts, MAX_ATTEMPTS - 1);
}

#[tokio::test]
async fn empty_catalog_reports_no_books() {
    let service = GameService::new(
        Arc::new(FakeCatalog::new(Vec::new())),
        Arc::new(FixedDailyBook(None)),
        Arc::new(FakeStorage::default()),
        PLAYER,
    );

    let err = service.session_for_date(test_date()).await.unwrap_err();
    assert!(matches!(err, GameError::NoBooksAvailable));
}

#[tokio::test]
async fn concurrent_guesses_are_all_applied() {
    let (service, storage) = create_test_service(10);
    let service = Arc::new(service);

    let handles: Vec<_> = (1..=5)
        .map(|id| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .submit_guess(test_date(), &format!("Book {}", id))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = storage
        .get_session_by_date(test_date())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.guesses.len(), 5);
    assert_eq!(stored.remaining_attempts, MAX_ATTEMPTS - 5);
    assert_eq!(stored.revealed_names().len(), 5);
    assert_eq!(service.tracked_locks().await, 0);
}

#[tokio::test]
async fn stats_default_to_zero_for_new_player() {
    let (service, _storage) = create_test_service(3);
    let stats = service.stats().await.unwrap();
    assert_eq!(stats.player_id, PLAYER);
    assert_eq!(stats.games_played, 0);
    assert_eq!(stats.guess_distribution, [0; 8]);
}

#[tokio::test]
async fn list_books_returns_the_catalog() {
    let (service, _storage) = create_test_service(3);
    assert_eq!(service.list_books().await.unwrap(), create_test_catalog());
}
