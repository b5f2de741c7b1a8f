//! Registration intake pipeline.
//!
//! Orchestrates rate limiting, validation, file intake, captcha, and
//! transactional persistence. All validation and file errors are
//! collected before anything touches storage; a persistence failure
//! after files were written triggers compensating file cleanup.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::config::Settings;
use crate::server::data::{NewRegistration, NewTeamMember, RegistrationRepository};
use crate::server::error::Error;
use crate::server::model::form::{RegistrationForm, UploadedFile};
use crate::server::service::security_log::{self, event};
use crate::server::service::upload::{self, UploadStore};
use crate::server::service::validation::{self, DATE_FORMAT};
use crate::server::service::{captcha, rate_limit};

const REGISTRATION_ID_ATTEMPTS: usize = 100;

#[derive(Debug)]
pub enum SubmissionOutcome {
    Accepted { registration_id: String },
    Rejected { errors: Vec<String> },
    RateLimited,
}

pub struct SubmissionService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a Settings,
}

impl<'a> SubmissionService<'a> {
    pub fn new(db: &'a DatabaseConnection, settings: &'a Settings) -> Self {
        Self { db, settings }
    }

    pub async fn submit(
        &self,
        session: &Session,
        form: &RegistrationForm,
        client_ip: &str,
    ) -> Result<SubmissionOutcome, Error> {
        if !rate_limit::check(self.db, client_ip, &self.settings.rate_limit).await {
            security_log::record(
                self.db,
                event::RATE_LIMIT_EXCEEDED,
                "Registration submission rate limit exceeded",
                client_ip,
            )
            .await;
            return Ok(SubmissionOutcome::RateLimited);
        }

        let today = Utc::now().date_naive();
        let mut errors = validation::validate_submission(form, today);

        let max_bytes = self.settings.upload_max_bytes;
        errors.extend(upload::validate_upload(
            form.natcon_proof.as_ref(),
            "NatCon proof",
            max_bytes,
        ));
        errors.extend(upload::validate_upload(
            form.payment_proof.as_ref(),
            "Payment proof",
            max_bytes,
        ));
        for (index, member) in form.members.iter().enumerate() {
            errors.extend(upload::validate_upload(
                member.proof.as_ref(),
                &format!("Team member #{} proof", index + 1),
                max_bytes,
            ));
        }

        let captcha_ok = match &form.captcha {
            Some(input) => captcha::verify(session, input).await?,
            None => false,
        };
        if !captcha_ok {
            errors.push("Invalid security code.".to_string());
        }

        if !errors.is_empty() {
            return Ok(SubmissionOutcome::Rejected { errors });
        }

        let repo = RegistrationRepository::new(self.db);
        let registration_id = self.generate_registration_id(&repo).await?;

        let store = UploadStore::new(&self.settings.upload_dir);
        match self.persist(&repo, &store, &registration_id, form).await {
            Ok(_) => {
                security_log::record(
                    self.db,
                    event::REGISTRATION,
                    &format!("New registration submitted: {registration_id}"),
                    client_ip,
                )
                .await;
                rate_limit::sweep(self.db, &self.settings.rate_limit).await;

                Ok(SubmissionOutcome::Accepted { registration_id })
            }
            Err(error) => {
                store.remove_all(&registration_id);
                tracing::error!(
                    %error,
                    registration_id,
                    "registration persistence failed, uploaded files removed"
                );
                Err(error)
            }
        }
    }

    /// `REG<year><4 digits>`, re-rolled until no stored registration
    /// carries the candidate.
    async fn generate_registration_id(
        &self,
        repo: &RegistrationRepository<'_>,
    ) -> Result<String, Error> {
        let year = Utc::now().format("%Y").to_string();

        for _ in 0..REGISTRATION_ID_ATTEMPTS {
            let number: u32 = rand::rng().random_range(1..=9999);
            let candidate = format!("REG{year}{number:04}");

            if !repo.registration_id_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(Error::InternalError(
            "exhausted registration identifier candidates".to_string(),
        ))
    }

    async fn persist(
        &self,
        repo: &RegistrationRepository<'_>,
        store: &UploadStore<'_>,
        registration_id: &str,
        form: &RegistrationForm,
    ) -> Result<entity::registration::Model, Error> {
        let natcon_file =
            store_proof(store, registration_id, false, required_file(&form.natcon_proof)?)?;
        let payment_file =
            store_proof(store, registration_id, false, required_file(&form.payment_proof)?)?;

        let mut members = Vec::with_capacity(form.members.len());
        for member in &form.members {
            let proof_file =
                store_proof(store, registration_id, true, required_file(&member.proof)?)?;
            members.push(NewTeamMember {
                full_name: required_text(&member.name)?.to_string(),
                proof_file,
            });
        }

        let new = NewRegistration {
            registration_id: registration_id.to_string(),
            institution: required_text(&form.institution)?.to_string(),
            coach_name: required_text(&form.coach_name)?.to_string(),
            prc_license: required_text(&form.prc_license)?.to_string(),
            prc_registration_date: required_date(&form.prc_registration_date)?,
            prc_expiration_date: required_date(&form.prc_expiration_date)?,
            payment_reference: form.payment_reference.clone(),
            natcon_proof_file: natcon_file,
            payment_proof_file: payment_file,
            members,
        };

        Ok(repo.create_with_members(new).await?)
    }
}

fn store_proof(
    store: &UploadStore<'_>,
    registration_id: &str,
    member_proof: bool,
    file: &UploadedFile,
) -> Result<String, Error> {
    let name = upload::storage_name(&file.file_name);
    store.store(registration_id, member_proof, &name, &file.bytes)?;
    Ok(name)
}

// The validator guarantees these are present by the time persistence
// runs; a gap here is a programming error, not user input.
fn required_text(value: &Option<String>) -> Result<&str, Error> {
    value
        .as_deref()
        .ok_or_else(|| Error::InternalError("validated field missing at persistence".to_string()))
}

fn required_file(value: &Option<UploadedFile>) -> Result<&UploadedFile, Error> {
    value
        .as_ref()
        .ok_or_else(|| Error::InternalError("validated file missing at persistence".to_string()))
}

fn required_date(value: &Option<String>) -> Result<NaiveDate, Error> {
    let raw = required_text(value)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| Error::InternalError("validated date unparseable at persistence".to_string()))
}
