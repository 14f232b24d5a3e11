use super::*;
use crate::testing::sample_vocab;
use tokio::time::Instant;

fn driver() -> QuizDriver {
    QuizDriver::new(QuizSession::with_seed(21), DEFAULT_FEEDBACK_DELAY)
}

fn wrong_option(driver: &QuizDriver) -> String {
    let q = driver.session().current_question().expect("quiz in progress");
    q.options.iter().find(|o| **o != q.correct_answer).cloned().unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_wrong_answer_advances_after_delay() {
    let mut driver = driver();
    driver.start(3, Arc::new(sample_vocab())).unwrap();

    let answer = wrong_option(&driver);
    let outcome = driver.submit_answer(Some(&answer)).unwrap();
    assert!(matches!(outcome, AnswerOutcome::Incorrect { pending: Some(_), .. }));
    assert!(driver.timer.is_scheduled());
    assert_eq!(driver.session().current_index(), 0);

    let started = Instant::now();
    assert!(driver.wait_feedback().await.unwrap());
    assert!(started.elapsed() >= DEFAULT_FEEDBACK_DELAY);
    assert_eq!(driver.session().current_index(), 1);
    assert!(driver.session().feedback().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_correct_answer_needs_no_wait() {
    let mut driver = driver();
    driver.start(2, Arc::new(sample_vocab())).unwrap();
    let answer = driver.session().current_question().unwrap().correct_answer.clone();

    assert_eq!(driver.submit_answer(Some(&answer)).unwrap(), AnswerOutcome::Correct);
    assert!(!driver.timer.is_scheduled());
    assert!(!driver.wait_feedback().await.unwrap());
    assert_eq!(driver.session().current_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_advance() {
    let mut driver = driver();
    driver.start(3, Arc::new(sample_vocab())).unwrap();
    let answer = wrong_option(&driver);
    driver.submit_answer(Some(&answer)).unwrap();

    driver.reset();
    assert!(!driver.timer.is_scheduled());
    tokio::time::sleep(DEFAULT_FEEDBACK_DELAY * 2).await;

    assert_eq!(driver.state(), QuizState::NotStarted);
    assert!(!driver.wait_feedback().await.unwrap());
    assert!(driver.session().questions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_restart_discards_old_feedback() {
    let mut driver = driver();
    let vocab = Arc::new(sample_vocab());
    driver.start(3, Arc::clone(&vocab)).unwrap();
    let answer = wrong_option(&driver);
    driver.submit_answer(Some(&answer)).unwrap();

    driver.start(2, vocab).unwrap();
    tokio::time::sleep(DEFAULT_FEEDBACK_DELAY * 2).await;

    assert_eq!(driver.session().current_index(), 0);
    assert!(driver.session().incorrect_answers().is_empty());
    assert!(driver.session().pending().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_full_run_reaches_summary() {
    let mut driver = driver();
    driver.start(4, Arc::new(sample_vocab())).unwrap();
    while driver.state() == QuizState::InProgress {
        let answer = wrong_option(&driver);
        driver.submit_answer(Some(&answer)).unwrap();
        driver.wait_feedback().await.unwrap();
    }
    let summary = driver.summary().unwrap();
    assert_eq!(summary.correct_count, 0);
    assert_eq!(summary.incorrect.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_timer_cancel_drops_fired_token() {
    let mut timer = FeedbackTimer::new(Duration::from_millis(10));
    let mut session = QuizSession::with_seed(1);
    session.start(2, Arc::new(sample_vocab())).unwrap();
    let answer = {
        let q = session.current_question().unwrap();
        q.options.iter().find(|o| **o != q.correct_answer).cloned().unwrap()
    };
    let token = match session.submit_answer(Some(&answer)).unwrap() {
        AnswerOutcome::Incorrect { pending, .. } => pending.unwrap(),
        AnswerOutcome::Correct => unreachable!(),
    };

    timer.schedule(token);
    tokio::time::sleep(Duration::from_millis(50)).await;
    timer.cancel();
    assert!(timer.fired().await.is_none());
}
