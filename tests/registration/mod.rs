//! End-to-end submission pipeline tests, driven through the service layer
//! against an in-memory database and a temporary upload root.

use chrono::{Datelike, Duration, Utc};
use registro::server::config::Settings;
use registro::server::model::form::{MemberEntry, RegistrationForm, UploadedFile};
use registro::server::model::session::SessionCaptcha;
use registro::server::service::auth::LockoutPolicy;
use registro::server::service::rate_limit::RateLimitPolicy;
use registro::server::service::registration::{SubmissionOutcome, SubmissionService};
use registro::server::service::validation::DATE_FORMAT;
use registro_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

const CAPTCHA_CODE: &str = "A1B2C3";

fn settings_for(test: &TestSetup) -> Settings {
    Settings {
        upload_dir: test.upload_root().to_path_buf(),
        upload_max_bytes: 5 * 1024 * 1024,
        login: LockoutPolicy::new(5, 30 * 60),
        rate_limit: RateLimitPolicy::new(10, 3600),
    }
}

fn pdf(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        bytes: fixtures::file::pdf_bytes(),
    }
}

fn valid_form() -> RegistrationForm {
    let today = Utc::now().date_naive();

    RegistrationForm {
        institution: Some("Test University".to_string()),
        coach_name: Some("Maria Santos".to_string()),
        prc_license: Some("1234567".to_string()),
        prc_registration_date: Some(
            (today - Duration::days(30)).format(DATE_FORMAT).to_string(),
        ),
        prc_expiration_date: Some(
            (today + Duration::days(180)).format(DATE_FORMAT).to_string(),
        ),
        payment_reference: Some("OR-12345".to_string()),
        captcha: Some(CAPTCHA_CODE.to_string()),
        natcon_proof: Some(pdf("natcon.pdf")),
        payment_proof: Some(pdf("payment.pdf")),
        members: vec![
            MemberEntry {
                name: Some("Ana Cruz".to_string()),
                proof: Some(pdf("ana.pdf")),
            },
            MemberEntry {
                name: Some("Jose Reyes".to_string()),
                proof: Some(pdf("jose.pdf")),
            },
        ],
        ..Default::default()
    }
}

async fn prime_captcha(test: &TestSetup) {
    SessionCaptcha::insert(&test.session, CAPTCHA_CODE)
        .await
        .unwrap();
}

#[tokio::test]
async fn well_formed_submission_is_accepted_end_to_end() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let outcome = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await
        .unwrap();

    let SubmissionOutcome::Accepted { registration_id } = outcome else {
        panic!("expected acceptance, got {outcome:?}");
    };

    // REG + 4-digit year + 4 digits.
    let year = Utc::now().year().to_string();
    assert_eq!(registration_id.len(), 11);
    assert!(registration_id.starts_with(&format!("REG{year}")));
    assert!(registration_id[3..].bytes().all(|b| b.is_ascii_digit()));

    let registrations = entity::prelude::Registration::find()
        .all(&test.state.db)
        .await?;
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].registration_id, registration_id);

    let members = entity::prelude::TeamMember::find()
        .all(&test.state.db)
        .await?;
    assert_eq!(members.len(), 2);
    assert!(members
        .iter()
        .all(|member| member.registration_id == registrations[0].id));

    // Files landed under the registration's directory tree.
    let root = test.upload_root().join(&registration_id);
    assert_eq!(std::fs::read_dir(&root)?.count(), 3);
    assert_eq!(std::fs::read_dir(root.join("members"))?.count(), 2);

    Ok(())
}

#[tokio::test]
async fn expiration_before_registration_is_rejected_without_rows() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);
    let today = Utc::now().date_naive();

    prime_captcha(&test).await;

    let mut form = valid_form();
    form.prc_registration_date = Some(
        (today - Duration::days(10)).format(DATE_FORMAT).to_string(),
    );
    form.prc_expiration_date = Some(
        (today - Duration::days(20)).format(DATE_FORMAT).to_string(),
    );

    let outcome = service
        .submit(&test.session, &form, TEST_CLIENT_IP)
        .await
        .unwrap();

    let SubmissionOutcome::Rejected { errors } = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert!(errors
        .iter()
        .any(|error| error.contains("expiration date must be after")));

    let count = entity::prelude::Registration::find()
        .count(&test.state.db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn missing_required_field_is_named_in_errors() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let mut form = valid_form();
    form.coach_name = None;

    let outcome = service
        .submit(&test.session, &form, TEST_CLIENT_IP)
        .await
        .unwrap();

    let SubmissionOutcome::Rejected { errors } = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert!(errors.contains(&"Coach name is required.".to_string()));

    let count = entity::prelude::Registration::find()
        .count(&test.state.db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn forged_file_content_is_rejected() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let mut form = valid_form();
    form.natcon_proof = Some(UploadedFile {
        file_name: "natcon.pdf".to_string(),
        bytes: fixtures::file::unknown_bytes(),
    });

    let outcome = service
        .submit(&test.session, &form, TEST_CLIENT_IP)
        .await
        .unwrap();

    let SubmissionOutcome::Rejected { errors } = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert!(errors
        .iter()
        .any(|error| error.contains("does not match its file type")));

    Ok(())
}

#[tokio::test]
async fn captcha_code_is_single_use_across_submissions() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let first = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(first, SubmissionOutcome::Accepted { .. }));

    // Same session, same code, no fresh challenge issued.
    let second = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await
        .unwrap();

    let SubmissionOutcome::Rejected { errors } = second else {
        panic!("expected rejection, got {second:?}");
    };
    assert_eq!(errors, vec!["Invalid security code.".to_string()]);

    Ok(())
}

#[tokio::test]
async fn generated_identifiers_avoid_stored_collisions() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..5 {
        prime_captcha(&test).await;
        let outcome = service
            .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
            .await
            .unwrap();
        let SubmissionOutcome::Accepted { registration_id } = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert!(seen.insert(registration_id), "identifier reused");
    }

    Ok(())
}

#[tokio::test]
async fn failed_persistence_removes_uploaded_files() -> Result<(), TestError> {
    // The team_members table is missing, so the transaction fails after
    // the proofs are on disk.
    let test = test_setup_with_tables!(entity::prelude::Registration, entity::prelude::RateLimit)?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let result = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await;
    assert!(result.is_err());

    assert_eq!(std::fs::read_dir(test.upload_root())?.count(), 0);

    let count = entity::prelude::Registration::find()
        .count(&test.state.db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn submissions_beyond_the_window_threshold_are_rate_limited() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let mut settings = settings_for(&test);
    settings.rate_limit = RateLimitPolicy::new(2, 3600);
    let service = SubmissionService::new(&test.state.db, &settings);

    for _ in 0..2 {
        prime_captcha(&test).await;
        let outcome = service
            .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
            .await
            .unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));
    }

    prime_captcha(&test).await;
    let outcome = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmissionOutcome::RateLimited));

    // A different address is unaffected.
    prime_captcha(&test).await;
    let outcome = service
        .submit(&test.session, &valid_form(), "198.51.100.9")
        .await
        .unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));

    Ok(())
}

#[tokio::test]
async fn accepted_submission_is_recorded_in_the_security_log() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let settings = settings_for(&test);
    let service = SubmissionService::new(&test.state.db, &settings);

    prime_captcha(&test).await;

    let outcome = service
        .submit(&test.session, &valid_form(), TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));

    let logs = entity::prelude::SecurityLog::find()
        .all(&test.state.db)
        .await?;
    assert!(logs
        .iter()
        .any(|log| log.event_type == "registration" && log.ip_address == TEST_CLIENT_IP));

    Ok(())
}
