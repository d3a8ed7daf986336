mod common;

use common::{
    advance_ms, async_form, person_form, person_form_with, recording_form, PanickingValidator,
    RecordingValidator, ERROR_NOT_ALLOWED,
};
use formflow::config::{ServerConfig, ValidationConfig};
use formflow::form::{ErrorSource, FieldValidators, Form, FormOptions};
use formflow::person::{first_name_validator, Person, PersonField};
use formflow::view::field_info;
use std::time::Duration;

#[tokio::test]
async fn sync_error_appears_immediately() {
    let person = person_form();
    let form = person.form();

    form.handle_change(PersonField::FirstName, "ab");

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert_eq!(
        meta.error_map.get(ErrorSource::OnChange),
        Some("First name must be at least 3 characters")
    );
    assert!(!meta.is_validating);
    assert!(!form.can_submit());
}

#[tokio::test]
async fn short_names_get_sync_error_long_names_do_not() {
    let person = person_form();
    let form = person.form();

    for (value, expected) in [
        ("", Some("A first name is required")),
        ("a", Some("First name must be at least 3 characters")),
        ("ab", Some("First name must be at least 3 characters")),
        ("abc", None),
        ("Maria", None),
    ] {
        form.handle_change(PersonField::FirstName, value);
        let meta = form.field_meta(PersonField::FirstName).unwrap();
        assert_eq!(
            meta.error_map.get(ErrorSource::OnChange),
            expected,
            "value {value:?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn error_substring_reported_after_debounce_and_delay() {
    let person = person_form();
    let form = person.form();
    let started = tokio::time::Instant::now();

    form.handle_change(PersonField::FirstName, "terror");
    form.validation_settled().await;

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert_eq!(
        meta.error_map.get(ErrorSource::OnChangeAsync),
        Some(ERROR_NOT_ALLOWED)
    );
    assert!(!meta.is_validating);
    assert!(started.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn clean_value_has_no_async_error() {
    let person = person_form();
    let form = person.form();

    form.handle_change(PersonField::FirstName, "Maria");
    form.validation_settled().await;

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert!(meta.error_map.is_empty());
    assert!(form.can_submit());
}

#[tokio::test(start_paused = true)]
async fn validating_flag_spans_only_the_validator() {
    let person = person_form();
    let form = person.form();
    let is_validating = || form.field_meta(PersonField::FirstName).unwrap().is_validating;

    form.handle_change(PersonField::FirstName, "Maria");

    advance_ms(499).await;
    assert!(!is_validating(), "still inside the debounce window");

    advance_ms(2).await;
    assert!(is_validating(), "validator running");

    advance_ms(998).await;
    assert!(is_validating(), "validator still running");

    advance_ms(2).await;
    assert!(!is_validating(), "validator settled");
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_collapse_into_one_run() {
    let validator = RecordingValidator::default();
    let form = recording_form(validator.clone());

    for value in ["M", "Ma", "Mar", "Mari", "Maria"] {
        form.handle_change(PersonField::FirstName, value);
        advance_ms(100).await;
    }
    form.validation_settled().await;

    assert_eq!(validator.calls(), 1);
    assert_eq!(validator.seen(), vec!["Maria".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn superseded_in_flight_result_is_discarded() {
    let validator = RecordingValidator::default();
    let form = recording_form(validator.clone());

    form.handle_change(PersonField::FirstName, "terror");
    advance_ms(600).await;
    assert!(form.field_meta(PersonField::FirstName).unwrap().is_validating);

    form.handle_change(PersonField::FirstName, "Maria");
    assert!(!form.field_meta(PersonField::FirstName).unwrap().is_validating);

    form.validation_settled().await;
    advance_ms(2000).await;

    assert_eq!(
        validator.seen(),
        vec!["terror".to_string(), "Maria".to_string()]
    );
    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert!(!meta.error_map.contains(ErrorSource::OnChangeAsync));
}

#[tokio::test(start_paused = true)]
async fn sync_failure_skips_async_validation() {
    let person = person_form();
    let form = person.form();

    form.handle_change(PersonField::FirstName, "er");

    assert!(!form.snapshot().is_validation_pending);
    advance_ms(2000).await;
    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert_eq!(meta.error_map.len(), 1);
    assert!(meta.error_map.contains(ErrorSource::OnChange));
}

#[tokio::test(start_paused = true)]
async fn async_always_lets_both_errors_coexist() {
    let validation = ValidationConfig {
        first_name_min_len: 10,
        async_always: true,
        ..ValidationConfig::default()
    };
    let person = person_form_with(validation, ServerConfig::default());
    let form = person.form();

    form.handle_change(PersonField::FirstName, "terror");
    form.validation_settled().await;

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    let messages: Vec<_> = meta.errors().collect();
    assert_eq!(
        messages,
        vec!["First name must be at least 10 characters", ERROR_NOT_ALLOWED]
    );
}

#[tokio::test]
async fn errors_show_only_after_blur() {
    let person = person_form();
    let form = person.form();

    form.handle_change(PersonField::FirstName, "");
    let snapshot = form.snapshot();
    assert_eq!(field_info(snapshot.field("firstName").unwrap()), None);

    form.handle_blur(PersonField::FirstName);
    let snapshot = form.snapshot();
    assert_eq!(
        field_info(snapshot.field("firstName").unwrap()),
        Some("A first name is required".to_string())
    );
}

#[tokio::test]
async fn subscribers_see_each_change() {
    let person = person_form();
    let form = person.form();
    let mut updates = form.subscribe();

    form.handle_change(PersonField::LastName, "Smith");

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.values.last_name, "Smith");
    assert!(snapshot.field("lastName").unwrap().meta.is_dirty);
    assert!(!snapshot.field("firstName").unwrap().meta.is_dirty);
}

#[tokio::test]
async fn set_field_meta_adds_without_erasing() {
    let person = person_form();
    let form = person.form();
    form.handle_change(PersonField::FirstName, "ab");

    form.set_field_meta(PersonField::FirstName, |meta| {
        meta.with_error(ErrorSource::OnServer, "taken")
    });

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert_eq!(
        meta.error_map.get(ErrorSource::OnChange),
        Some("First name must be at least 3 characters")
    );
    assert_eq!(meta.error_map.get(ErrorSource::OnServer), Some("taken"));
    assert!(form
        .field_meta(PersonField::LastName)
        .unwrap()
        .error_map
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn panicking_validator_settles_field() {
    let form = async_form(PanickingValidator);
    form.handle_change(PersonField::FirstName, "Maria");

    advance_ms(2000).await;

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert!(!meta.is_validating);
    assert!(!meta.error_map.contains(ErrorSource::OnChangeAsync));
    assert!(!form.snapshot().is_validation_pending);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        form.handle_submit(|values: Person| async move { Some(values.first_name) }),
    )
    .await
    .expect("submit settles");
    assert_eq!(result, Ok(Some("Maria".to_string())));
    assert!(!form.is_submitting());
}

fn blur_checked_form() -> Form<Person> {
    let validators = FieldValidators::new()
        .on_change(first_name_validator(3))
        .on_blur(|value: &str| {
            value
                .ends_with(' ')
                .then(|| "No trailing spaces".to_string())
        });
    Form::new(FormOptions::new(Person::default()).field(PersonField::FirstName, validators))
}

#[tokio::test]
async fn blur_error_sits_next_to_change_error() {
    let form = blur_checked_form();
    form.handle_change(PersonField::FirstName, "a ");
    form.handle_blur(PersonField::FirstName);

    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert!(meta.is_touched);
    assert_eq!(
        meta.error_map.get(ErrorSource::OnChange),
        Some("First name must be at least 3 characters")
    );
    assert_eq!(meta.error_map.get(ErrorSource::OnBlur), Some("No trailing spaces"));
    let messages: Vec<_> = meta.error_map.messages().collect();
    assert_eq!(
        messages,
        vec!["First name must be at least 3 characters", "No trailing spaces"]
    );
    assert!(!form.can_submit());
}

#[tokio::test]
async fn passing_blur_clears_blur_error() {
    let form = blur_checked_form();
    form.handle_change(PersonField::FirstName, "Anna ");
    form.handle_blur(PersonField::FirstName);
    assert!(form
        .field_meta(PersonField::FirstName)
        .unwrap()
        .error_map
        .contains(ErrorSource::OnBlur));

    form.handle_change(PersonField::FirstName, "Anna");
    // Only blur reruns the blur validator.
    assert!(form
        .field_meta(PersonField::FirstName)
        .unwrap()
        .error_map
        .contains(ErrorSource::OnBlur));

    form.handle_blur(PersonField::FirstName);
    let meta = form.field_meta(PersonField::FirstName).unwrap();
    assert!(meta.error_map.is_empty());
    assert!(form.can_submit());
}
