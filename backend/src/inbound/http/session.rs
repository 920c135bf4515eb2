//! Session helpers keeping HTTP handlers free of framework-specific logic.
//!
//! Thin wrapper around Actix cookie sessions so handlers only deal with
//! persisting or requiring an authentication subject.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthSubject, Error};

pub(crate) const SUBJECT_KEY: &str = "subject";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the verified subject in the session cookie.
    pub fn persist_subject(&self, subject: &AuthSubject) -> Result<(), Error> {
        self.0
            .insert(SUBJECT_KEY, subject.as_ref())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Fetch the current subject from the session, if present.
    pub fn subject(&self) -> Result<Option<AuthSubject>, Error> {
        let raw = self
            .0
            .get::<String>(SUBJECT_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        match raw {
            Some(value) => match AuthSubject::new(value) {
                Ok(subject) => Ok(Some(subject)),
                Err(err) => {
                    tracing::warn!("invalid subject in session cookie: {err}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated subject or return `401 Unauthorized`.
    pub fn require_subject(&self) -> Result<AuthSubject, Error> {
        self.subject()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
