//! Identity synchronization middleware
//!
//! Reconciles the authenticated caller's identity-provider claims with the
//! internal users store and caches the resolved user per session. It never
//! produces a response itself: every non-error path forwards to the inner
//! service exactly once, and store failures propagate to the hosting
//! pipeline unchanged.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::context::AuthContext;
use crate::error::AppError;
use crate::services::reconcile::reconcile_user;
use crate::state::app_state::AppState;

pub struct IdentitySync;

impl<S, B> Transform<S, ServiceRequest> for IdentitySync
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentitySyncMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentitySyncMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentitySyncMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentitySyncMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // Extract the auth context and AppState before moving req
        let auth = req.extensions().get::<AuthContext>().cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            // No upstream auth layer ran, or the caller is anonymous:
            // forward without touching the store.
            let claims = match auth.as_ref().and_then(AuthContext::claims) {
                Some(claims) => claims,
                None => return service.call(req).await,
            };

            let app_state = match app_state {
                Some(state) => state,
                None => {
                    return Err(actix_web::error::ErrorInternalServerError(
                        "AppState not available",
                    ));
                }
            };

            // Session already reconciled: forward without touching the store.
            if app_state.sessions().check_and_refresh(&claims.session_id) {
                return service.call(req).await;
            }

            // Establish the store connection before inspecting the subject;
            // the no-subject branch below still goes through this step.
            let db = app_state
                .db()
                .ok_or_else(|| AppError::db_unavailable("Database unavailable"))?;
            db.ping().await.map_err(AppError::from)?;

            // An empty subject is treated as absent: containment of "" would
            // match any stored record.
            let subject = match claims.subject.as_deref().filter(|s| !s.is_empty()) {
                Some(subject) => subject,
                None => {
                    debug!(session_id = %claims.session_id, "Claims carry no subject, skipping reconciliation");
                    return service.call(req).await;
                }
            };

            let user = reconcile_user(subject, claims.name.as_deref(), claims.email.as_deref(), db)
                .await?;
            app_state.sessions().add_user(&claims.session_id, user);

            service.call(req).await
        })
    }
}
