use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use quiz_core::model::{Difficulty, QuestionBank, QuestionDraft};
use quiz_core::session::SessionStatus;
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AdvanceOutcome, AppServices, HistoryService, QuizService};
use storage::repository::{BlobStore, InMemoryBlobStore, USERNAME_KEY};

fn easy_only_bank(count: usize) -> Arc<QuestionBank> {
    let questions = (0..count)
        .map(|i| {
            QuestionDraft {
                id: format!("e{i}"),
                prompt: format!("Easy question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_option: (i + 1) % 4,
                difficulty: Difficulty::Easy,
                citation: Some("somewhere".into()),
            }
            .validate()
            .unwrap()
        })
        .collect();
    Arc::new(QuestionBank::from_questions(questions).unwrap())
}

async fn quiz_over(blobs: Arc<dyn BlobStore>, bank: Arc<QuestionBank>) -> QuizService {
    QuizService::load(fixed_clock(), bank, blobs)
        .await
        .unwrap()
        .with_rng(StdRng::seed_from_u64(99))
}

#[tokio::test]
async fn three_easy_questions_two_correct_records_one_entry() {
    let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    let mut quiz = quiz_over(Arc::clone(&blobs), easy_only_bank(3)).await;

    let session = quiz.select_difficulty(Difficulty::Easy, "Ana").await.unwrap();
    assert_eq!(session.questions().len(), 3);
    assert_eq!(session.status(), SessionStatus::Active);

    let mut completions = 0;
    let mut recorded = None;
    for i in 0..3 {
        let correct = quiz.session().current_question().unwrap().correct_option();
        let pick = if i == 1 { (correct + 1) % 4 } else { correct };
        quiz.advance_clock(Duration::seconds(4));
        quiz.answer_current_question(pick).unwrap();

        if let AdvanceOutcome::Completed { recorded: entry, .. } = quiz.advance().await.unwrap() {
            completions += 1;
            recorded = entry;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(quiz.session().status(), SessionStatus::Completed);
    assert!(quiz.session().ended_at().unwrap() >= quiz.session().started_at().unwrap());

    let entry = recorded.expect("entry recorded");
    assert_eq!(entry.correct_answers(), 2);
    assert_eq!(entry.total_questions(), 3);
    assert_eq!(entry.time_spent_ms(), 12_000);
    assert_eq!(entry.username(), "Ana");

    let history = HistoryService::new(blobs).entries().await.unwrap();
    assert_eq!(history, vec![entry]);
}

#[tokio::test]
async fn empty_pool_completes_without_history() {
    let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    let mut quiz = quiz_over(Arc::clone(&blobs), easy_only_bank(3)).await;

    let session = quiz.select_difficulty(Difficulty::Hard, "Bo").await.unwrap();
    assert!(session.questions().is_empty());
    assert_eq!(session.status(), SessionStatus::Active);

    let outcome = quiz.advance().await.unwrap();
    assert!(outcome.is_complete());
    assert!(matches!(
        outcome,
        AdvanceOutcome::Completed { recorded: None, .. }
    ));
    assert!(quiz.session().answers().is_empty());
    assert!(HistoryService::new(blobs).entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_keeps_name_and_clears_progress() {
    let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    let mut quiz = quiz_over(Arc::clone(&blobs), easy_only_bank(5)).await;
    quiz.select_difficulty(Difficulty::Easy, "Cy").await.unwrap();
    quiz.answer_current_question(0).unwrap();
    quiz.advance().await.unwrap();

    quiz.reset();
    let session = quiz.session();
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.questions().is_empty());
    assert!(session.answers().is_empty());
    assert_eq!(session.display_name(), "Cy");
    assert_eq!(blobs.get(USERNAME_KEY).await.unwrap().as_deref(), Some("Cy"));
}

#[tokio::test]
async fn bundled_bank_sessions_are_well_formed() {
    let app = AppServices::in_memory(fixed_clock()).unwrap();
    let mut quiz = app.quiz().await.unwrap();

    for difficulty in Difficulty::ALL {
        let session = quiz.select_difficulty(difficulty, "Ana").await.unwrap();
        let questions = session.questions();
        assert!((1..=10).contains(&questions.len()));
        assert!(questions.iter().all(|q| q.difficulty() == difficulty));
        let ids: HashSet<_> = questions.iter().map(|q| q.id().clone()).collect();
        assert_eq!(ids.len(), questions.len());
    }
}

#[tokio::test]
async fn repeated_games_accumulate_in_order() {
    let app = AppServices::in_memory(fixed_clock()).unwrap();
    let mut quiz = app.quiz().await.unwrap();

    let mut recorded = Vec::new();
    for difficulty in [Difficulty::Easy, Difficulty::Hard, Difficulty::Medium] {
        quiz.select_difficulty(difficulty, "Ana").await.unwrap();
        loop {
            quiz.answer_current_question(0).unwrap();
            if let AdvanceOutcome::Completed { recorded: entry, .. } =
                quiz.advance().await.unwrap()
            {
                recorded.push(entry.expect("entry recorded"));
                break;
            }
        }
        quiz.reset();
    }

    let history = app.history();
    assert_eq!(history.entries().await.unwrap(), recorded);

    let stats = history.stats().await.unwrap();
    assert_eq!(stats.total_games, 3);
    assert_eq!(stats.by_difficulty.easy, 1);
    assert_eq!(stats.by_difficulty.medium, 1);
    assert_eq!(stats.by_difficulty.hard, 1);
}

#[tokio::test]
async fn advisory_timer_restarts_on_next_question() {
    let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
    let mut quiz = quiz_over(blobs, easy_only_bank(3)).await;
    quiz.select_difficulty(Difficulty::Easy, "Ana").await.unwrap();

    quiz.advance_clock(Duration::seconds(5));
    assert_eq!(quiz.elapsed_ms(), 5_000);
    quiz.answer_current_question(0).unwrap();
    assert!(!quiz.advance().await.unwrap().is_complete());

    quiz.advance_clock(Duration::seconds(3));
    assert_eq!(quiz.elapsed_ms(), 3_000);
}
