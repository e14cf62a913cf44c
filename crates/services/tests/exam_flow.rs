use exam_core::model::{QuestionKey, SectionId, SessionStatus, TestType};
use exam_core::time::fixed_clock;
use services::{ExamLoopService, FeedbackService};

#[test]
fn ielts_attempt_runs_section_by_section_to_completion() {
    let svc = ExamLoopService::new(fixed_clock(), FeedbackService::new(None));
    let mut session = svc.start_attempt(TestType::Ielts).unwrap();

    // Listening: answer a couple of questions, run the clock out.
    session
        .record_answer(QuestionKey::new(SectionId::new("listening"), 1), "A")
        .unwrap();
    session
        .record_answer(QuestionKey::new(SectionId::new("listening"), 2), "C")
        .unwrap();
    let mut snapshot = svc.tick(&mut session).unwrap();
    while snapshot.section_index == 0 {
        snapshot = svc.tick(&mut session).unwrap();
    }
    assert_eq!(snapshot.section_id, SectionId::new("reading"));
    assert_eq!(snapshot.section_remaining_secs, 3_600);
    assert_eq!(snapshot.current_question, 1);
    assert_eq!(snapshot.answered, 2);

    // Reading: answer out of order via the navigation grid, then move on
    // early instead of waiting out the timer.
    session.go_to_question(5).unwrap();
    session
        .record_answer(QuestionKey::new(SectionId::new("reading"), 5), "B")
        .unwrap();
    session.advance_section(svc.clock().now()).unwrap();
    let snapshot = svc.tick(&mut session).unwrap();
    assert_eq!(snapshot.section_id, SectionId::new("writing"));
    assert_eq!(snapshot.answered, 3);

    // Writing answered, then hand in without sitting through speaking.
    session
        .record_answer(
            QuestionKey::new(SectionId::new("writing"), 1),
            "Dear Sir or Madam,",
        )
        .unwrap();
    let final_snapshot = svc.submit(&mut session);

    assert_eq!(final_snapshot.status, SessionStatus::Completed);
    assert!(session.is_complete());
    assert_eq!(session.answers().len(), 4);
    assert!(session.completed_at().is_some());

    // A completed session rejects further driving.
    assert!(svc.tick(&mut session).is_err());
}
