// Quiz validation, grading, and the confirmation dialog state machine.

use constellation_engine::quiz::{
    q5_key, score, validate, Answer, FieldId, FormState, Modal, Os, SubmitAction, MAX_SCORE,
    POINTS_PER_QUESTION,
};

/// A fully answered form with every answer matching the key for `os`.
fn perfect(os: Os) -> FormState {
    FormState {
        name: "Ada".into(),
        os: Some(os),
        answers: [
            Some(Answer::B),
            Some(Answer::A),
            Some(Answer::C),
            Some(Answer::B),
            q5_key(Some(os)),
        ],
    }
}

#[test]
fn empty_form_flags_every_field_once() {
    let errors = validate(&FormState::default());
    assert_eq!(errors.len(), 7);

    let mut expected = vec![FieldId::Name, FieldId::Os];
    expected.extend((1..=5).map(FieldId::Question));
    for field in expected {
        assert_eq!(
            errors.iter().filter(|e| e.field == field).count(),
            1,
            "expected exactly one error for {field:?}"
        );
    }
}

#[test]
fn name_must_have_two_characters_after_trimming() {
    let mut form = perfect(Os::Windows);

    form.name = "A".into();
    assert!(validate(&form).iter().any(|e| e.field == FieldId::Name));

    form.name = " A ".into();
    assert!(validate(&form).iter().any(|e| e.field == FieldId::Name));

    form.name = "Al".into();
    assert!(validate(&form).is_empty());
}

#[test]
fn complete_form_has_no_errors() {
    for os in Os::ALL {
        assert!(validate(&perfect(os)).is_empty());
    }
}

#[test]
fn unanswered_fifth_question_is_flagged() {
    let mut form = perfect(Os::MacOs);
    form.answers[4] = None;

    let errors = validate(&form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, FieldId::Question(5));
}

#[test]
fn select_values_parse_and_round_trip() {
    for os in Os::ALL {
        assert_eq!(Os::parse(os.key()), Some(os));
    }
    assert_eq!(Os::parse(""), None);
    assert_eq!(Os::parse("beos"), None);

    for answer in [Answer::A, Answer::B, Answer::C] {
        assert_eq!(Answer::parse(answer.as_str()), Some(answer));
    }
    assert_eq!(Answer::parse("d"), None);
}

#[test]
fn all_correct_answers_score_the_maximum() {
    for os in Os::ALL {
        let card = score(&perfect(os));
        assert_eq!(card.total, MAX_SCORE);
        assert_eq!(card.max, MAX_SCORE);
        assert!(card.questions.iter().all(|q| q.correct));
    }
}

#[test]
fn q5_key_tracks_the_selected_system() {
    assert_eq!(q5_key(Some(Os::Windows)), Some(Answer::A));
    assert_eq!(q5_key(Some(Os::MacOs)), Some(Answer::B));
    assert_eq!(q5_key(Some(Os::Linux)), Some(Answer::C));
    assert_eq!(q5_key(None), None);
}

#[test]
fn unknown_system_forfeits_the_fifth_question() {
    let mut form = perfect(Os::Windows);
    form.os = None;

    let card = score(&form);
    assert_eq!(card.total, MAX_SCORE - POINTS_PER_QUESTION);

    let q5 = card.questions[4];
    assert_eq!(q5.expected, None);
    assert!(!q5.correct, "Q5 can never be correct without a system");
}

#[test]
fn wrong_answers_lose_exactly_their_points() {
    let mut form = perfect(Os::Linux);
    form.answers[0] = Some(Answer::C); // key says B

    let card = score(&form);
    assert_eq!(card.total, MAX_SCORE - POINTS_PER_QUESTION);
    assert!(!card.questions[0].correct);
    assert_eq!(card.questions[0].given, Some(Answer::C));
    assert_eq!(card.questions[0].expected, Some(Answer::B));
    assert!(card.questions[1..].iter().all(|q| q.correct));
}

#[test]
fn breakdown_is_numbered_in_question_order() {
    let card = score(&perfect(Os::Windows));
    let numbers: Vec<u8> = card.questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn invalid_submit_shows_errors_without_opening() {
    let mut modal = Modal::new();
    assert_eq!(modal.on_submit(false), SubmitAction::ShowErrors);
    assert!(!modal.is_open());
    assert!(!modal.armed());
}

#[test]
fn confirm_lets_exactly_one_submission_through() {
    let mut modal = Modal::new();

    assert_eq!(modal.on_submit(true), SubmitAction::OpenModal);
    assert!(modal.is_open());

    assert!(modal.confirm());
    assert!(!modal.is_open());
    assert!(modal.armed());

    // The confirmed submission passes; the latch is spent.
    assert_eq!(modal.on_submit(true), SubmitAction::PassThrough);
    assert!(!modal.armed());

    // The next submit is intercepted again.
    assert_eq!(modal.on_submit(true), SubmitAction::OpenModal);
}

#[test]
fn dismiss_closes_without_arming() {
    let mut modal = Modal::new();
    modal.on_submit(true);
    assert!(modal.is_open());

    modal.dismiss();
    assert!(!modal.is_open());
    assert!(!modal.armed());
    assert_eq!(modal.on_submit(true), SubmitAction::OpenModal);
}

#[test]
fn confirming_a_closed_dialog_is_a_no_op() {
    let mut modal = Modal::new();
    assert!(!modal.confirm());
    assert!(!modal.armed());
}
