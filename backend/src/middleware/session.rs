//! Session middleware resolving the session cookie for every request.
//!
//! A request presenting a valid signed id for a live session is bound to that
//! session. Anything else (no cookie, bad signature, destroyed session) gets
//! a fresh anonymous session, and the signed cookie for it is appended to the
//! response unless the handler already set or cleared the session cookie.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::ports::SessionStore;
use crate::inbound::http::session::{SessionContext, SessionCookie};

/// Middleware factory binding each request to a server-side session.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use actix_web::cookie::{Key, SameSite};
/// use intranet::inbound::http::session::SessionCookie;
/// use intranet::middleware::SessionLayer;
/// use intranet::outbound::InMemorySessionStore;
///
/// let layer = SessionLayer::new(
///     Arc::new(InMemorySessionStore::default()),
///     SessionCookie::new(Key::generate(), false, SameSite::Lax),
/// );
/// let _app = App::new().wrap(layer);
/// ```
#[derive(Clone)]
pub struct SessionLayer {
    store: Arc<dyn SessionStore>,
    cookie: Arc<SessionCookie>,
}

impl SessionLayer {
    /// Build the layer over a shared store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, cookie: SessionCookie) -> Self {
        Self {
            store,
            cookie: Arc::new(cookie),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddleware {
            service,
            store: Arc::clone(&self.store),
            cookie: Arc::clone(&self.cookie),
        }))
    }
}

/// Service wrapper produced by [`SessionLayer`].
pub struct SessionMiddleware<S> {
    service: S,
    store: Arc<dyn SessionStore>,
    cookie: Arc<SessionCookie>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let live = self
            .cookie
            .presented_id(req.request())
            .filter(|id| self.store.get(id).is_some());
        let (id, fresh) = match live {
            Some(id) => (id, false),
            None => (self.store.create(), true),
        };

        let context = SessionContext::new(id.clone(), Arc::clone(&self.store), Arc::clone(&self.cookie));
        req.extensions_mut().insert(context);

        let cookie = Arc::clone(&self.cookie);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if !fresh {
                return Ok(res);
            }
            let handler_set_cookie = res
                .response()
                .cookies()
                .any(|existing| existing.name() == cookie.name());
            if handler_set_cookie {
                return Ok(res);
            }
            match cookie.issue(&id) {
                Some(issued) => {
                    if let Err(error) = res.response_mut().add_cookie(&issued) {
                        error!(%error, "failed to attach session cookie");
                    }
                }
                None => error!("failed to sign session cookie"),
            }
            Ok(res)
        })
    }
}
