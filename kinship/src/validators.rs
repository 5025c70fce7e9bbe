use email_address::EmailAddress;
use url::Url;

use crate::errors::{ValidationError, ValidationIssue, ValidationResult};
use crate::models::{GroupDraft, JobDraft, ProfileUpdate};

const MAX_GROUP_NAME_CHARS: usize = 100;
const MAX_BIO_CHARS: usize = 500;

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Returns `true` if the provided string parses as an http(s) URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

pub fn validate_group_draft(draft: &GroupDraft) -> ValidationResult<()> {
    let mut issues = Vec::new();
    let name = draft.name.trim();
    if name.is_empty() {
        issues.push(ValidationIssue::new("name", "required", "Group name is required"));
    } else if name.chars().count() > MAX_GROUP_NAME_CHARS {
        issues.push(ValidationIssue::new(
            "name",
            "too_long",
            format!("Group name must be at most {MAX_GROUP_NAME_CHARS} characters"),
        ));
    }
    ValidationError::new(issues).into_result()
}

pub fn validate_job_draft(draft: &JobDraft) -> ValidationResult<()> {
    let mut issues = Vec::new();
    if draft.title.trim().is_empty() {
        issues.push(ValidationIssue::new("title", "required", "Job title is required"));
    }
    if let Some(range) = &draft.salary_range
        && let (Some(min), Some(max)) = (range.min, range.max)
        && min > max
    {
        issues.push(ValidationIssue::new(
            "salaryRange",
            "range",
            "Minimum salary cannot exceed maximum salary",
        ));
    }
    ValidationError::new(issues).into_result()
}

pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<()> {
    let mut issues = Vec::new();
    if let Some(name) = &update.name
        && name.trim().is_empty()
    {
        issues.push(ValidationIssue::new("name", "required", "Name cannot be blank"));
    }
    if let Some(email) = &update.email
        && !is_valid_email(email)
    {
        issues.push(ValidationIssue::new("email", "format", "Enter a valid email address"));
    }
    if let Some(website) = &update.website
        && !website.trim().is_empty()
        && !is_valid_url(website)
    {
        issues.push(ValidationIssue::new("website", "format", "Website must be an http(s) URL"));
    }
    if let Some(bio) = &update.bio
        && bio.chars().count() > MAX_BIO_CHARS
    {
        issues.push(ValidationIssue::new(
            "bio",
            "too_long",
            format!("Bio must be at most {MAX_BIO_CHARS} characters"),
        ));
    }
    ValidationError::new(issues).into_result()
}
