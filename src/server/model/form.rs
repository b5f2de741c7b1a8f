//! Multipart registration form parsing.
//!
//! All fields land as `Option`s; presence checks belong to the validator
//! so every missing field produces its own error message instead of the
//! parse aborting on the first gap.

use axum::extract::Multipart;

use crate::server::error::Error;

/// Indexes above this are dropped during parsing to bound memory; the
/// validator separately enforces the 1-10 member business rule.
const MAX_PARSED_MEMBERS: usize = 32;

/// One file field as received over the wire.
#[derive(Clone, Debug, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct MemberEntry {
    pub name: Option<String>,
    pub proof: Option<UploadedFile>,
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub institution: Option<String>,
    pub coach_name: Option<String>,
    pub prc_license: Option<String>,
    pub prc_registration_date: Option<String>,
    pub prc_expiration_date: Option<String>,
    pub payment_reference: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub captcha: Option<String>,
    pub csrf_token: Option<String>,
    pub natcon_proof: Option<UploadedFile>,
    pub payment_proof: Option<UploadedFile>,
    pub members: Vec<MemberEntry>,
}

impl RegistrationForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some((index, member_field)) = parse_member_field(&name) {
                if index >= MAX_PARSED_MEMBERS {
                    continue;
                }
                if form.members.len() <= index {
                    form.members.resize_with(index + 1, MemberEntry::default);
                }
                match member_field {
                    "name" => form.members[index].name = text_value(field.text().await?),
                    "proof" => {
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let bytes = field.bytes().await?.to_vec();
                        form.members[index].proof = file_value(file_name, bytes);
                    }
                    _ => {}
                }
                continue;
            }

            match name.as_str() {
                "institution" => form.institution = text_value(field.text().await?),
                "coach_name" => form.coach_name = text_value(field.text().await?),
                "prc_license" => form.prc_license = text_value(field.text().await?),
                "prc_registration_date" => {
                    form.prc_registration_date = text_value(field.text().await?)
                }
                "prc_expiration_date" => {
                    form.prc_expiration_date = text_value(field.text().await?)
                }
                "payment_reference" => form.payment_reference = text_value(field.text().await?),
                "email" => form.email = text_value(field.text().await?),
                "phone" => form.phone = text_value(field.text().await?),
                "captcha" => form.captcha = text_value(field.text().await?),
                "csrf_token" => form.csrf_token = text_value(field.text().await?),
                "natcon_proof" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?.to_vec();
                    form.natcon_proof = file_value(file_name, bytes);
                }
                "payment_proof" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?.to_vec();
                    form.payment_proof = file_value(file_name, bytes);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Trims a text field and drops it entirely when blank, so the validator
/// treats whitespace-only input the same as absent input.
fn text_value(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Browsers submit an empty part for file inputs the user left blank.
fn file_value(file_name: String, bytes: Vec<u8>) -> Option<UploadedFile> {
    if file_name.is_empty() && bytes.is_empty() {
        None
    } else {
        Some(UploadedFile { file_name, bytes })
    }
}

/// Splits `members[2][proof]` into `(2, "proof")`.
fn parse_member_field(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("members[")?;
    let (index, rest) = rest.split_once(']')?;
    let field = rest.strip_prefix('[')?.strip_suffix(']')?;
    let index = index.parse().ok()?;
    Some((index, field))
}
