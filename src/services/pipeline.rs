//! Request pipeline for owned resource routes.
//!
//! Validating → Authenticating → Authorizing → Handling → Responded.
//! Each stage either passes or fails with exactly one `AppError`; the first
//! failure jumps straight to `Responded` (the error's `IntoResponse`).
//! The order is fixed: cheap shape checks, then identity, then ownership,
//! then business logic.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::api::v1::extractors::RequestContext;
use crate::error::AppError;
use crate::services::auth::{OwnershipAuthorizer, TokenAuthenticator, TokenClaims};
use crate::services::validation::{FieldRule, ParameterValidator};

/// Inspect the request context and either let it through or reject it.
pub trait Stage: Send + Sync {
    fn inspect(&self, ctx: &mut RequestContext) -> Result<(), AppError>;
}

impl Stage for ParameterValidator {
    fn inspect(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        self.validate(ctx)
    }
}

impl Stage for TokenAuthenticator {
    fn inspect(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        let claims = self.authenticate(ctx.authorization.as_deref())?;
        ctx.claims = Some(claims);
        Ok(())
    }
}

impl Stage for OwnershipAuthorizer {
    fn inspect(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        // Only reachable without claims if the stage order were broken.
        let claims = ctx.claims.as_ref().ok_or_else(AppError::authentication)?;
        let owner = ctx.path_param(self.owner_param()).unwrap_or_default();
        self.authorize(claims, owner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Validating,
    Authenticating,
    Authorizing,
    Handling,
    Responded,
}

impl PipelineState {
    fn advance(self) -> Self {
        match self {
            Self::Validating => Self::Authenticating,
            Self::Authenticating => Self::Authorizing,
            Self::Authorizing => Self::Handling,
            Self::Handling | Self::Responded => Self::Responded,
        }
    }
}

/// A request that passed every gate. Handed to the business handler.
#[derive(Debug, Clone)]
pub struct Admitted {
    pub claims: TokenClaims,
    owner_id: String,
    ctx: RequestContext,
}

impl Admitted {
    /// The authorized owner id (equal to `claims.subject`).
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.ctx.path_param(name)
    }

    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        self.ctx.body_as()
    }
}

pub struct Pipeline<'a> {
    validator: ParameterValidator,
    authenticator: &'a TokenAuthenticator,
    authorizer: OwnershipAuthorizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(rules: &'static [FieldRule], authenticator: &'a TokenAuthenticator) -> Self {
        Self {
            validator: ParameterValidator::new(rules),
            authenticator,
            authorizer: OwnershipAuthorizer::default(),
        }
    }

    fn stage(&self, state: PipelineState) -> Option<&dyn Stage> {
        match state {
            PipelineState::Validating => Some(&self.validator),
            PipelineState::Authenticating => Some(self.authenticator),
            PipelineState::Authorizing => Some(&self.authorizer),
            PipelineState::Handling | PipelineState::Responded => None,
        }
    }

    /// Run the gates in order, then hand the admitted request to `handler`.
    ///
    /// The handler's own failure is treated like any other stage failure.
    pub async fn run<T, F, Fut>(&self, mut ctx: RequestContext, handler: F) -> Result<T, AppError>
    where
        F: FnOnce(Admitted) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut state = PipelineState::Validating;
        while let Some(stage) = self.stage(state) {
            if let Err(err) = stage.inspect(&mut ctx) {
                tracing::debug!(?state, kind = ?err.kind(), "request rejected");
                return Err(err);
            }
            state = state.advance();
        }
        debug_assert_eq!(state, PipelineState::Handling);

        let admitted = self.admit(ctx)?;
        let result = handler(admitted).await;
        if let Err(err) = &result {
            tracing::debug!(state = ?PipelineState::Handling, kind = ?err.kind(), "handler failed");
        }
        result
    }

    fn admit(&self, mut ctx: RequestContext) -> Result<Admitted, AppError> {
        let claims = ctx.claims.take().ok_or_else(AppError::authentication)?;
        let owner_id = claims.subject.clone();
        Ok(Admitted {
            claims,
            owner_id,
            ctx,
        })
    }
}
