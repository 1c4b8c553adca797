use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::services::session_store::SessionStore;

/// Middleware that binds every request to a server-side session.
///
/// The session id travels in a cookie. Requests without a live id get a
/// fresh session and the cookie is set on whatever response goes out,
/// error responses included.
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
    cookie_name: Rc<str>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>, cookie_name: impl AsRef<str>) -> Self {
        Self {
            store,
            cookie_name: Rc::from(cookie_name.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: Arc::clone(&self.store),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<SessionStore>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
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
        let presented = req
            .cookie(&self.cookie_name)
            .map(|c| c.value().to_string());
        let store = Arc::clone(&self.store);
        let cookie_name = Rc::clone(&self.cookie_name);
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let (session_id, issued) = store.resolve(presented.as_deref()).await;
            req.extensions_mut().insert(session_id.clone());

            let mut res = service.call(req).await?;

            if issued {
                let cookie = Cookie::build(cookie_name.to_string(), session_id.0)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish();
                res.response_mut().add_cookie(&cookie)?;
            }

            Ok(res)
        })
    }
}
