/*
 * Responsibility
 * - 宣言的な FieldRule の集合で RequestContext を検査する
 * - 全ルールを評価してから失敗する (最初の違反で止めない)
 * - path param も body field も同じ仕組み・同じ error kind (InvalidParameter)
 */
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::api::v1::extractors::request_ctx::{
    BODY_FIELD, BODY_NOT_OBJECT_MESSAGE, JsonBody, RequestContext,
};
use crate::error::{AppError, FieldError, ViolationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// present, a string, and not blank
    NonEmpty,
    /// present and a syntactically valid email address
    Email,
}

/// One declared field. `message` is reported for every violation of this field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub location: Location,
    pub name: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn path(name: &'static str, message: &'static str) -> Self {
        Self {
            location: Location::Path,
            name,
            check: Check::NonEmpty,
            message,
        }
    }

    pub const fn body(name: &'static str, message: &'static str) -> Self {
        Self {
            location: Location::Body,
            name,
            check: Check::NonEmpty,
            message,
        }
    }

    pub const fn body_email(name: &'static str, message: &'static str) -> Self {
        Self {
            location: Location::Body,
            name,
            check: Check::Email,
            message,
        }
    }

    fn inspect(&self, ctx: &RequestContext) -> Option<ViolationKind> {
        match self.location {
            Location::Path => match ctx.path_param(self.name) {
                None => Some(ViolationKind::Required),
                Some(v) => self.inspect_str(v),
            },
            Location::Body => match ctx.body_field(self.name) {
                None | Some(Value::Null) => Some(ViolationKind::Required),
                Some(Value::String(v)) => self.inspect_str(v),
                Some(_) => Some(ViolationKind::Type),
            },
        }
    }

    fn inspect_str(&self, value: &str) -> Option<ViolationKind> {
        if value.trim().is_empty() {
            return Some(ViolationKind::Required);
        }
        match self.check {
            Check::NonEmpty => None,
            Check::Email if is_valid_email(value) => None,
            Check::Email => Some(ViolationKind::Format),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterValidator {
    rules: &'static [FieldRule],
}

impl ParameterValidator {
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    /// Every violation, in declaration order. Pure: same context, same result.
    pub fn violations(&self, ctx: &RequestContext) -> Vec<FieldError> {
        let body_is_object = !matches!(ctx.body, JsonBody::NotAnObject);
        let mut errors = Vec::new();

        if !body_is_object && self.rules.iter().any(|r| r.location == Location::Body) {
            errors.push(FieldError::new(
                BODY_FIELD,
                BODY_NOT_OBJECT_MESSAGE,
                ViolationKind::Type,
            ));
        }

        for rule in self.rules {
            if rule.location == Location::Body && !body_is_object {
                continue;
            }
            if let Some(kind) = rule.inspect(ctx) {
                errors.push(FieldError::new(rule.name, rule.message, kind));
            }
        }

        errors
    }

    pub fn validate(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let errors = self.violations(ctx);
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "request parameters rejected");
            Err(AppError::invalid_parameters(errors))
        }
    }
}

// Dot-atom local part, hostname labels, alphabetic TLD.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("Invalid email regex pattern")
});

const EMAIL_MAX_LEN: usize = 254;
const LOCAL_PART_MAX_LEN: usize = 64;

fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN || !EMAIL_PATTERN.is_match(value) {
        return false;
    }
    value
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= LOCAL_PART_MAX_LEN)
}
