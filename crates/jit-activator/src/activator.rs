//! The activation state machine (spec §4.5): builds, validates, signs, and
//! provisions self-approval and MPA requests. Stateless by construction —
//! there is no request store anywhere in this crate. Self-approval walks
//! `PENDING -> READY -> PROVISIONING -> ACTIVATED` in one call; MPA walks
//! `PENDING -> ISSUED -> AWAITING_APPROVAL` on request, then
//! `AWAITING_APPROVAL -> READY -> PROVISIONING -> ACTIVATED` on approval,
//! with the intervening state carried entirely in the signed token.

use crate::domain::ActivationOutcome;
use crate::error::ActivatorError;
use crate::events::ActivatorEvent;
use chrono::Duration;
use jit_catalog::{Catalog, UserContext};
use jit_condition::{ActivationType, ACTIVATED_CONDITION_TITLE};
use jit_kernel::{
    ActivationId, ActivationIdKind, Clock, EventPublisher, InMemoryEventBus, ProjectId,
    ProjectRole, TimeSpan, UserEmail,
};
use jit_notify::{render_confirmation_message, render_request_message, JustificationPolicy, NotificationSink};
use jit_provisioner::{Binding, Condition, PolicyClient, ProvisionOptions, ProvisioningEngine};
use jit_tokens::{deobfuscate, obfuscate, JwtSigner, JwtVerifier, SignMpaRequest};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const REASON_TAG: &str = "jit-access-activation";

pub struct Activator<C: PolicyClient> {
    catalog: Arc<Catalog>,
    provisioner: Arc<ProvisioningEngine<C>>,
    clock: Arc<dyn Clock>,
    justification_policy: Arc<JustificationPolicy>,
    notifier: Arc<dyn NotificationSink>,
    signer: Arc<JwtSigner>,
    verifier: Arc<JwtVerifier>,
    events: Arc<InMemoryEventBus>,
    approval_url_base: String,
}

impl<C: PolicyClient> Activator<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<Catalog>,
        provisioner: Arc<ProvisioningEngine<C>>,
        clock: Arc<dyn Clock>,
        justification_policy: Arc<JustificationPolicy>,
        notifier: Arc<dyn NotificationSink>,
        signer: Arc<JwtSigner>,
        verifier: Arc<JwtVerifier>,
        events: Arc<InMemoryEventBus>,
        approval_url_base: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            provisioner,
            clock,
            justification_policy,
            notifier,
            signer,
            verifier,
            events,
            approval_url_base: approval_url_base.into(),
        }
    }

    /// `POST /projects/{id}/roles/self-activate` (spec §6). Grants access
    /// in one call — there is no separate approval step for self-approval.
    #[instrument(skip(self, justification), fields(user = %ctx.user))]
    pub async fn create_self_request(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
        project_role: &ProjectRole,
        duration: Duration,
        justification: &str,
    ) -> Result<ActivationOutcome, ActivatorError> {
        self.justification_policy.validate(justification, &ctx.user)?;

        let privilege = self.find_privilege(ctx, project, project_role).await?;
        if !matches!(privilege.activation_type, ActivationType::SelfApproval) {
            return Err(ActivatorError::InvalidArgument(
                "this privilege requires multi-party approval".to_string(),
            ));
        }

        self.catalog
            .verify_user_can_request(
                ctx,
                project,
                std::slice::from_ref(project_role),
                &privilege.activation_type,
                duration,
                &HashSet::<UserEmail>::new(),
            )
            .await?;

        let time_span = TimeSpan::from_duration(self.clock.now(), duration)
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let activation_id = ActivationId::new(ActivationIdKind::SelfApproval);

        self.publish(ActivatorEvent::RequestCreated {
            activation_id: activation_id.to_string(),
            beneficiary: ctx.user.to_string(),
            project_role: project_role.to_string(),
        })
        .await;

        let description = format!("Self-approved, justification: {justification}");
        self.provision(
            project,
            project_role,
            &ctx.user,
            &privilege.resource_condition,
            time_span,
            description,
            ProvisionOptions::purge_existing_temporary_bindings(),
            &activation_id,
        )
        .await?;

        self.notify(&ctx.user, project_role, ctx.user.as_str(), time_span.end())
            .await;

        Ok(ActivationOutcome {
            activation_id,
            time_span,
        })
    }

    /// `POST /projects/{id}/roles/request` (spec §6): signs an MPA token
    /// and emails each reviewer a link carrying it.
    #[instrument(skip(self, justification, reviewers), fields(user = %ctx.user))]
    pub async fn create_mpa_request(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
        project_role: &ProjectRole,
        duration: Duration,
        justification: &str,
        reviewers: HashSet<UserEmail>,
    ) -> Result<crate::domain::IssuedMpaRequest, ActivatorError> {
        self.justification_policy.validate(justification, &ctx.user)?;

        let privilege = self.find_privilege(ctx, project, project_role).await?;
        if !matches!(
            privilege.activation_type,
            ActivationType::PeerApproval(_) | ActivationType::ExternalApproval(_)
        ) {
            return Err(ActivatorError::InvalidArgument(
                "this privilege does not require multi-party approval".to_string(),
            ));
        }

        self.catalog
            .verify_user_can_request(
                ctx,
                project,
                std::slice::from_ref(project_role),
                &privilege.activation_type,
                duration,
                &reviewers,
            )
            .await?;

        let time_span = TimeSpan::from_duration(self.clock.now(), duration)
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let activation_id = ActivationId::new(ActivationIdKind::MultiParty);

        let sign_request = SignMpaRequest {
            activation_id: activation_id.to_string(),
            beneficiary: ctx.user.to_string(),
            reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
            resource: project.to_resource_path(),
            role: project_role.role.clone(),
            justification: justification.to_string(),
            start: time_span.start(),
            end: time_span.end(),
        };
        let jwt = self.signer.sign(&sign_request).await?;
        let obfuscated_token = obfuscate(&jwt);

        self.publish(ActivatorEvent::RequestCreated {
            activation_id: activation_id.to_string(),
            beneficiary: ctx.user.to_string(),
            project_role: project_role.to_string(),
        })
        .await;
        self.publish(ActivatorEvent::TokenIssued {
            activation_id: activation_id.to_string(),
            reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        })
        .await;

        let approval_url = format!("{}?activation={}", self.approval_url_base, obfuscated_token);
        for reviewer in &reviewers {
            let message = render_request_message(
                ctx.user.as_str(),
                &project_role.role,
                justification,
                time_span.end(),
                &approval_url,
            );
            if let Err(err) = self.notifier.send(reviewer, message).await {
                warn!(%err, reviewer = reviewer.as_str(), "failed to notify reviewer");
            }
        }

        Ok(crate::domain::IssuedMpaRequest {
            activation_id,
            obfuscated_token,
            time_span,
        })
    }

    /// `GET /activation-request?activation=<obfuscated-token>` (spec §6):
    /// decodes and re-verifies a token's signature without provisioning
    /// anything or checking the caller's reviewer privilege.
    #[instrument(skip(self, obfuscated_token))]
    pub async fn decode_mpa_request(
        &self,
        obfuscated_token: &str,
    ) -> Result<crate::domain::MpaRequest, ActivatorError> {
        let (request, reviewers) = self.decode_token(obfuscated_token).await?;
        Ok(crate::domain::MpaRequest { request, reviewers })
    }

    /// `POST /activation-request/approve` (spec §6). Reconstructs the
    /// request entirely from the token, then re-checks the approver's
    /// reviewer privilege and the beneficiary's eligibility live — the
    /// token carries intent, never authorization.
    #[instrument(skip(self, obfuscated_token), fields(approver = %approver.user))]
    pub async fn approve_mpa_request(
        &self,
        approver: &UserContext,
        obfuscated_token: &str,
    ) -> Result<ActivationOutcome, ActivatorError> {
        let (request, _reviewers) = self.decode_token(obfuscated_token).await?;
        let beneficiary = request.beneficiary;
        let project = request.project;
        let project_role = request.project_role;
        let time_span = request.time_span;
        let activation_id = request.id;
        let justification = request.justification;

        let beneficiary_ctx = self.catalog.create_context(beneficiary.clone());
        let privilege = self
            .find_privilege(&beneficiary_ctx, &project, &project_role)
            .await?;
        if !matches!(
            privilege.activation_type,
            ActivationType::PeerApproval(_) | ActivationType::ExternalApproval(_)
        ) {
            return Err(ActivatorError::AccessDenied(
                "beneficiary no longer holds a qualifying privilege".to_string(),
            ));
        }

        self.catalog
            .verify_user_can_approve(
                &approver.user,
                &beneficiary,
                &project,
                &project_role,
                &privilege.activation_type,
            )
            .await?;

        let description = format!("Approved by {}, justification: {}", approver.user, justification);
        self.provision(
            &project,
            &project_role,
            &beneficiary,
            &privilege.resource_condition,
            time_span,
            description,
            ProvisionOptions::purge_existing_temporary_bindings().with_fail_if_exists(),
            &activation_id,
        )
        .await?;

        self.publish(ActivatorEvent::RequestApproved {
            activation_id: activation_id.to_string(),
            approver: approver.user.to_string(),
        })
        .await;

        self.notify(&beneficiary, &project_role, approver.user.as_str(), time_span.end())
            .await;

        Ok(ActivationOutcome {
            activation_id,
            time_span,
        })
    }

    /// Verifies the token and rebuilds the request object it carries.
    /// Topic information isn't part of the token schema (spec §4.6), so
    /// the decoded request's `activation_type` is only ever a generic
    /// peer-approval marker — callers that need the exact type re-fetch
    /// the beneficiary's live privilege, as `approve_mpa_request` does.
    async fn decode_token(
        &self,
        obfuscated_token: &str,
    ) -> Result<(crate::domain::ActivationRequest, Vec<UserEmail>), ActivatorError> {
        let jwt = deobfuscate(obfuscated_token)?;
        let claims = self.verifier.verify(&jwt).await?;

        let beneficiary = UserEmail::new(claims.beneficiary.clone())
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let project = ProjectId::from_str(&claims.resource)
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let project_role = ProjectRole::new(project.clone(), claims.role.clone());
        let start = chrono::DateTime::from_timestamp(claims.start, 0)
            .ok_or_else(|| ActivatorError::InvalidArgument("malformed token start".to_string()))?;
        let end = chrono::DateTime::from_timestamp(claims.end, 0)
            .ok_or_else(|| ActivatorError::InvalidArgument("malformed token end".to_string()))?;
        let time_span =
            TimeSpan::new(start, end).map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let activation_id = ActivationId::from_str(&claims.jti)
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;
        let reviewers = claims
            .reviewers
            .iter()
            .map(|r| UserEmail::new(r.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ActivatorError::InvalidArgument(e.to_string()))?;

        let request = crate::domain::ActivationRequest {
            id: activation_id,
            beneficiary,
            project,
            project_role,
            activation_type: ActivationType::PeerApproval(None),
            justification: claims.justification.clone(),
            time_span,
            resource_condition: None,
        };
        Ok((request, reviewers))
    }

    async fn find_privilege(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
        project_role: &ProjectRole,
    ) -> Result<jit_catalog::RequesterPrivilege, ActivatorError> {
        let privileges = self.catalog.list_privileges(ctx, project).await?;
        privileges
            .available
            .into_iter()
            .find(|p| &p.id == project_role)
            .ok_or_else(|| {
                ActivatorError::AccessDenied(format!("no eligible privilege for {project_role}"))
            })
    }

    #[allow(clippy::too_many_arguments)]
    async fn provision(
        &self,
        project: &ProjectId,
        project_role: &ProjectRole,
        principal: &UserEmail,
        resource_condition: &Option<String>,
        time_span: TimeSpan,
        description: String,
        options: ProvisionOptions,
        activation_id: &ActivationId,
    ) -> Result<(), ActivatorError> {
        let binding = Binding {
            principal: principal.clone(),
            role: project_role.role.clone(),
            condition: Some(Condition {
                title: ACTIVATED_CONDITION_TITLE.to_string(),
                description,
                expression: render_expression(&time_span, resource_condition),
            }),
        };

        self.provisioner
            .add_project_binding(project, binding, options, REASON_TAG)
            .await?;

        self.publish(ActivatorEvent::BindingProvisioned {
            activation_id: activation_id.to_string(),
            project_role: project_role.to_string(),
            start: time_span.start(),
            end: time_span.end(),
        })
        .await;

        Ok(())
    }

    async fn notify(
        &self,
        beneficiary: &UserEmail,
        project_role: &ProjectRole,
        approver: &str,
        end_time: chrono::DateTime<chrono::Utc>,
    ) {
        let message = render_confirmation_message(&project_role.role, approver, end_time);
        if let Err(err) = self.notifier.send(beneficiary, message).await {
            warn!(%err, "failed to send activation confirmation");
        }
    }

    async fn publish(&self, event: ActivatorEvent) {
        if let Err(err) = self.events.publish(event).await {
            warn!(%err, "failed to publish activator event");
        } else {
            info!("published activator event");
        }
    }
}

fn render_expression(time_span: &TimeSpan, resource_condition: &Option<String>) -> String {
    let window = format!(
        "request.time >= timestamp(\"{}\") && request.time < timestamp(\"{}\")",
        time_span.start().to_rfc3339(),
        time_span.end().to_rfc3339()
    );
    match resource_condition {
        Some(rc) => format!("{window} && {rc}"),
        None => window,
    }
}
