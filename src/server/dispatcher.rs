//! Command Dispatcher Module
//!
//! Maps an incoming request to a handler, enforcing authentication and
//! authorization before any business logic runs. Read commands keyed by
//! numeric id consult the cache first and backfill it from the store on a
//! miss; write commands go to the store first and touch the cache only after
//! the store confirms; deletes drop the cache entry before the store delete
//! so a racing read cannot resurrect a stale hit.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::auth::{TokenService, UserDirectory};
use crate::cache::RecordCache;
use crate::error::{Result, ServerError};
use crate::models::{Credentials, Record, Request, RequestType, Response, Role, User};
use crate::store::{RecordStore, StoreError};

// == Dispatch Outcome ==
/// What the session should do with the produced response.
#[derive(Debug)]
pub enum Dispatch {
    /// Write the response and keep reading
    Reply(Response),
    /// Write the response, then tear the session down
    Close(Response),
}

// == Dispatcher ==
/// Shared request router. One instance serves every session.
pub struct Dispatcher {
    cache: Arc<RwLock<RecordCache>>,
    store: Arc<dyn RecordStore>,
    users: Arc<UserDirectory>,
    tokens: TokenService,
}

impl Dispatcher {
    // == Constructor ==
    /// Wires the dispatcher to its collaborators. All handles are shared;
    /// tests construct isolated instances per test.
    pub fn new(
        cache: Arc<RwLock<RecordCache>>,
        store: Arc<dyn RecordStore>,
        users: Arc<UserDirectory>,
        tokens: TokenService,
    ) -> Self {
        Self {
            cache,
            store,
            users,
            tokens,
        }
    }

    // == Dispatch ==
    /// Routes one decoded request and produces exactly one response, even on
    /// handler failure.
    pub async fn dispatch(&self, request: Request) -> Dispatch {
        debug!(request_type = ?request.request_type, "dispatching request");

        if request.request_type == RequestType::Exit {
            return Dispatch::Close(Response::close());
        }

        let result = match request.request_type {
            RequestType::Login => self.login(&request),
            RequestType::FindAll => self.find_all(&request).await,
            RequestType::FindById => self.find_by_id(&request).await,
            RequestType::FindByCategory => self.find_by_category(&request).await,
            RequestType::FindByYear => self.find_by_year(&request).await,
            RequestType::Save => self.save(&request).await,
            RequestType::Update => self.update(&request).await,
            RequestType::Delete => self.delete(&request).await,
            RequestType::Exit => unreachable!("handled above"),
        };

        Dispatch::Reply(result.unwrap_or_else(|err| {
            warn!(error = %err, "request failed");
            Response::error(err.to_string())
        }))
    }

    // == Login ==
    /// Verifies credentials against the user directory and issues a token.
    /// A failed login never yields a token.
    fn login(&self, request: &Request) -> Result<Response> {
        let credentials: Credentials = serde_json::from_str(content(request)?)
            .map_err(|e| ServerError::MalformedRequest(format!("bad credentials payload: {e}")))?;

        let user = self
            .users
            .find_by_username(&credentials.username)
            .ok_or(ServerError::InvalidCredentials)?;

        if !self.users.verify_password(user, &credentials.password) {
            return Err(ServerError::InvalidCredentials);
        }

        let token = self.tokens.issue(user)?;
        info!(user = %user.username, "login succeeded");
        Ok(Response::token(token))
    }

    // == Authenticate ==
    /// Resolves the request token to a user context. Verification fails
    /// closed before any handler or store access.
    fn authenticate(&self, request: &Request) -> Result<User> {
        let token = request.token.as_deref().ok_or(ServerError::InvalidToken)?;
        let claims = self.tokens.claims(token)?;

        self.users
            .find_by_id(claims.sub)
            .cloned()
            .ok_or(ServerError::InvalidToken)
    }

    // == Read Commands ==

    async fn find_all(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let records = self.store.find_all().await.map_err(map_store)?;
        respond_with(&records)
    }

    /// By-id lookup: cache first, store on a miss, backfilling the cache
    /// with the store result before responding.
    async fn find_by_id(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let id = parse_id(content(request)?)?;

        if let Some(record) = self.cache.write().await.get(id) {
            debug!(id, "cache hit");
            return respond_with(&record);
        }

        let record = self
            .store
            .find_by_id(id)
            .await
            .map_err(map_store)?
            .ok_or_else(|| ServerError::NotFound(format!("record {id}")))?;

        self.cache.write().await.put(id, record.clone());
        respond_with(&record)
    }

    async fn find_by_category(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let category = content(request)?;
        let records = self.store.find_by_category(category).await.map_err(map_store)?;
        respond_with(&records)
    }

    async fn find_by_year(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let year: i32 = content(request)?
            .trim()
            .parse()
            .map_err(|_| ServerError::MalformedRequest("year must be an integer".to_string()))?;
        let records = self.store.find_by_year(year).await.map_err(map_store)?;
        respond_with(&records)
    }

    // == Write Commands ==

    /// Store first; the cache entry is inserted only after the store
    /// confirms, never before.
    async fn save(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let record = decode_record(content(request)?)?;

        let saved = self.store.save(record).await.map_err(map_store)?;
        if let Some(id) = saved.id {
            self.cache.write().await.put(id, saved.clone());
        }

        info!(id = ?saved.id, "record saved");
        respond_with(&saved)
    }

    async fn update(&self, request: &Request) -> Result<Response> {
        self.authenticate(request)?;
        let record = decode_record(content(request)?)?;

        let updated = self.store.update(record).await.map_err(map_store)?;
        if let Some(id) = updated.id {
            self.cache.write().await.put(id, updated.clone());
        }

        info!(id = ?updated.id, "record updated");
        respond_with(&updated)
    }

    // == Delete Command ==
    /// Requires the ADMIN role, rejected before any store access otherwise.
    /// The cache entry is removed before the store delete is issued.
    async fn delete(&self, request: &Request) -> Result<Response> {
        let user = self.authenticate(request)?;
        if user.role != Role::Admin {
            return Err(ServerError::Forbidden(
                "only administrators may delete records".to_string(),
            ));
        }

        let id = parse_id(content(request)?)?;

        self.cache.write().await.remove(id);

        let deleted = self.store.delete_by_id(id).await.map_err(map_store)?;
        if !deleted {
            return Err(ServerError::NotFound(format!("record {id}")));
        }

        info!(id, "record deleted");
        Ok(Response::ok(id.to_string()))
    }
}

// == Helpers ==

/// Extracts the mandatory content payload.
fn content(request: &Request) -> Result<&str> {
    request
        .content
        .as_deref()
        .ok_or_else(|| ServerError::MalformedRequest("missing content".to_string()))
}

fn parse_id(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| ServerError::MalformedRequest("id must be an integer".to_string()))
}

/// Decodes and validates a record carried as JSON text.
fn decode_record(text: &str) -> Result<Record> {
    let record: Record = serde_json::from_str(text)
        .map_err(|e| ServerError::MalformedRequest(format!("bad record payload: {e}")))?;
    if let Some(reason) = record.validate() {
        return Err(ServerError::MalformedRequest(reason));
    }
    Ok(record)
}

/// Serializes a payload into an OK response.
fn respond_with<T: serde::Serialize>(payload: &T) -> Result<Response> {
    let json = serde_json::to_string(payload)
        .map_err(|e| ServerError::Internal(format!("response encoding failed: {e}")))?;
    Ok(Response::ok(json))
}

/// Store absence is a domain not-found, not a store failure.
fn map_store(err: StoreError) -> ServerError {
    match err {
        StoreError::NotFound(message) => ServerError::NotFound(message),
        other => ServerError::Store(other),
    }
}
