//! Submission field validation.
//!
//! Pure functions over the parsed form. Every violated rule appends its
//! own message; nothing short-circuits except checks that need a value an
//! earlier check failed to produce (date ordering needs parsed dates).

use chrono::NaiveDate;

use crate::server::model::form::RegistrationForm;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LICENSE_LEN: usize = 50;
pub const MIN_TEAM_MEMBERS: usize = 1;
pub const MAX_TEAM_MEMBERS: usize = 10;

pub fn validate_submission(form: &RegistrationForm, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    require(&mut errors, "Institution name", &form.institution);
    require(&mut errors, "Coach name", &form.coach_name);
    require(&mut errors, "PRC license number", &form.prc_license);
    require(&mut errors, "PRC registration date", &form.prc_registration_date);
    require(&mut errors, "PRC expiration date", &form.prc_expiration_date);

    if let Some(institution) = &form.institution {
        if institution.chars().count() > MAX_NAME_LEN {
            errors.push(format!(
                "Institution name must be {MAX_NAME_LEN} characters or fewer."
            ));
        }
        if !is_institution_name(institution) {
            errors.push("Institution name contains invalid characters.".to_string());
        }
    }

    if let Some(coach_name) = &form.coach_name {
        if coach_name.chars().count() > MAX_NAME_LEN {
            errors.push(format!("Coach name must be {MAX_NAME_LEN} characters or fewer."));
        }
        if !is_person_name(coach_name) {
            errors.push("Coach name contains invalid characters.".to_string());
        }
    }

    if let Some(license) = &form.prc_license {
        if license.chars().count() > MAX_LICENSE_LEN || !is_prc_license(license) {
            errors.push("Invalid PRC license number format.".to_string());
        }
    }

    if let Some(email) = &form.email {
        if !is_email(email) {
            errors.push("Please enter a valid email address.".to_string());
        }
    }

    if let Some(phone) = &form.phone {
        if !is_phone(phone) {
            errors.push("Please enter a valid phone number.".to_string());
        }
    }

    let registration_date = parse_date(
        &mut errors,
        "Please enter a valid PRC registration date.",
        &form.prc_registration_date,
    );
    let expiration_date = parse_date(
        &mut errors,
        "Please enter a valid PRC expiration date.",
        &form.prc_expiration_date,
    );

    if let Some(registration_date) = registration_date {
        if registration_date > today {
            errors.push("PRC registration date cannot be in the future.".to_string());
        }
    }
    if let Some(expiration_date) = expiration_date {
        if expiration_date <= today {
            errors.push("PRC license has expired. Please provide a valid license.".to_string());
        }
    }
    if let (Some(registration_date), Some(expiration_date)) = (registration_date, expiration_date)
    {
        if expiration_date <= registration_date {
            errors.push(
                "PRC expiration date must be after the registration date.".to_string(),
            );
        }
    }

    if form.members.len() < MIN_TEAM_MEMBERS {
        errors.push("At least one team member is required.".to_string());
    }
    if form.members.len() > MAX_TEAM_MEMBERS {
        errors.push(format!(
            "A maximum of {MAX_TEAM_MEMBERS} team members is allowed per registration."
        ));
    }

    for (index, member) in form.members.iter().enumerate() {
        let number = index + 1;
        match &member.name {
            None => errors.push(format!("Team member #{number} name is required.")),
            Some(name) => {
                if name.chars().count() > MAX_NAME_LEN {
                    errors.push(format!(
                        "Team member #{number} name must be {MAX_NAME_LEN} characters or fewer."
                    ));
                }
                if !is_person_name(name) {
                    errors.push(format!(
                        "Team member #{number} name contains invalid characters."
                    ));
                }
            }
        }
    }

    errors
}

fn require(errors: &mut Vec<String>, label: &str, value: &Option<String>) {
    if value.is_none() {
        errors.push(format!("{label} is required."));
    }
}

fn parse_date(
    errors: &mut Vec<String>,
    message: &str,
    value: &Option<String>,
) -> Option<NaiveDate> {
    let raw = value.as_deref()?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(message.to_string());
            None
        }
    }
}

/// Letters, whitespace, hyphen, period.
fn is_person_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '.')
}

/// Person-name charset plus digits and `&,()`.
fn is_institution_name(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '-' | '.' | '&' | ',' | '(' | ')')
        })
}

/// 7-10 digits, nothing else.
fn is_prc_license(value: &str) -> bool {
    (7..=10).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_phone(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')')
        })
}
